//! Artwork image archive

use std::path::Path;

use crate::{HarvestError, Result};

/// Decodes fetched bytes as an image and persists them as a JPEG file
///
/// Decoding before writing keeps truncated or mislabeled downloads out of
/// the archive; both decode and write failures surface as
/// [`HarvestError::Image`].
pub fn store_image(bytes: &[u8], source_url: &str, path: &Path) -> Result<()> {
    let decoded = image::load_from_memory(bytes).map_err(|e| HarvestError::Image {
        url: source_url.to_string(),
        message: e.to_string(),
    })?;

    // JPEG has no alpha channel
    decoded
        .to_rgb8()
        .save(path)
        .map_err(|e| HarvestError::Image {
            url: source_url.to_string(),
            message: e.to_string(),
        })?;

    Ok(())
}
