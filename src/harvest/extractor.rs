//! Record extractor
//!
//! Parses one leaf content page into structured artwork records. The page is
//! expected to carry a preview table (identified by the literal `Preview`
//! marker in its header row); every data row of that table becomes one
//! [`ArtworkRecord`].

use std::collections::BTreeMap;

use scraper::{ElementRef, Html, Selector};
use url::Url;

use crate::{HarvestError, Result};

/// Marks where a bolded title run ended. Uppercase on purpose: the table
/// markup is lowercased before the marker is inserted, so the marker can
/// never collide with page text.
const TITLE_SENTINEL: &str = "_PICTITLE_";

/// One structured artwork row
///
/// `id` is the dense identifier assigned after aggregation; it names the
/// downloaded image file and is the stable correlation key during pruning.
#[derive(Debug, Clone, PartialEq)]
pub struct ArtworkRecord {
    pub id: u64,
    pub artist: String,
    pub title: String,
    pub attributes: BTreeMap<String, String>,
    pub image_url: String,
}

impl ArtworkRecord {
    /// Looks up an attribute field, treating a missing field as empty
    pub fn attribute(&self, name: &str) -> &str {
        self.attributes.get(name).map(String::as_str).unwrap_or("")
    }
}

/// Extracts every artwork record from a leaf page
///
/// Fails with [`HarvestError::NoPreviewTable`] when the page has no table
/// whose first row contains the `Preview` marker. A header-only table yields
/// zero records. Each data row must carry its own image link (an href ending
/// in `.jpg`); a row without one is a [`HarvestError::MissingRowImage`].
pub fn extract_records(html: &str, leaf_url: &Url, artist: &str) -> Result<Vec<ArtworkRecord>> {
    let document = Html::parse_document(html);
    let table_selector = parse_selector("table", leaf_url)?;
    let row_selector = parse_selector("tr", leaf_url)?;
    let cell_selector = parse_selector("td, th", leaf_url)?;
    let anchor_selector = parse_selector("a[href]", leaf_url)?;

    let preview = document
        .select(&table_selector)
        .find(|table| {
            table
                .select(&row_selector)
                .next()
                .map(|row| row.text().collect::<String>().contains("Preview"))
                .unwrap_or(false)
        })
        .ok_or_else(|| HarvestError::NoPreviewTable {
            url: leaf_url.to_string(),
        })?;

    let source_rows: Vec<ElementRef> = preview.select(&row_selector).collect();

    // Lowercase the table markup, mark bold-run ends, and turn line breaks
    // into field separators before re-parsing.
    let transformed = preview
        .html()
        .to_lowercase()
        .replace("</b>", TITLE_SENTINEL)
        .replace("<br>", ", ")
        .replace("<br/>", ", ");
    let fragment = Html::parse_fragment(&transformed);
    let transformed_rows: Vec<ElementRef> = fragment.select(&row_selector).collect();

    if transformed_rows.len() != source_rows.len() {
        return Err(HarvestError::HtmlParse {
            url: leaf_url.to_string(),
            message: format!(
                "preview table re-parse changed the row count ({} -> {})",
                source_rows.len(),
                transformed_rows.len()
            ),
        });
    }

    let headers: Vec<String> = match transformed_rows.first() {
        Some(header_row) => header_row
            .select(&cell_selector)
            .map(|cell| cell_text(&cell))
            .collect(),
        None => return Ok(Vec::new()),
    };

    // The first column (thumbnail) and the last (trailing index) carry no
    // record data; only the middle columns are kept.
    if headers.len() < 3 {
        return Err(HarvestError::HtmlParse {
            url: leaf_url.to_string(),
            message: format!("preview table has only {} columns", headers.len()),
        });
    }
    let kept_headers = &headers[1..headers.len() - 1];

    let mut records = Vec::new();
    let data_rows = source_rows.iter().skip(1).zip(transformed_rows.iter().skip(1));
    for (row_index, (source_row, row)) in data_rows.enumerate() {
        let cells: Vec<String> = row
            .select(&cell_selector)
            .map(|cell| cell_text(&cell))
            .collect();

        if cells.len() != headers.len() {
            return Err(HarvestError::HtmlParse {
                url: leaf_url.to_string(),
                message: format!(
                    "row {} has {} cells, expected {}",
                    row_index + 1,
                    cells.len(),
                    headers.len()
                ),
            });
        }

        let mut title: Option<String> = None;
        let mut attributes = BTreeMap::new();
        for (header, raw) in kept_headers.iter().zip(cells[1..cells.len() - 1].iter()) {
            let mut value = raw.clone();
            if let Some(position) = value.find(TITLE_SENTINEL) {
                let before = value[..position].trim().to_string();
                let after = value[position + TITLE_SENTINEL.len()..].to_string();
                // Only the first marked field of a row names the artwork
                if title.is_none() {
                    title = Some(before);
                }
                value = after;
            }
            attributes.insert(header.clone(), strip_separators(&value));
        }

        let image_url = row_image_url(source_row, &anchor_selector, leaf_url, row_index)?;

        records.push(ArtworkRecord {
            id: 0,
            artist: artist.to_string(),
            title: title.unwrap_or_default(),
            attributes,
            image_url,
        });
    }

    Ok(records)
}

/// Finds the image link belonging to one table row
///
/// The link is taken from the row's own markup, so a row without an image
/// surfaces as an explicit error instead of silently misaligning every
/// following row.
fn row_image_url(
    row: &ElementRef,
    anchor_selector: &Selector,
    leaf_url: &Url,
    row_index: usize,
) -> Result<String> {
    let href = row
        .select(anchor_selector)
        .filter_map(|anchor| anchor.value().attr("href"))
        .find(|href| href.ends_with(".jpg"))
        .ok_or_else(|| HarvestError::MissingRowImage {
            url: leaf_url.to_string(),
            row: row_index + 1,
        })?;

    let resolved = leaf_url.join(href).map_err(|source| HarvestError::InvalidUrl {
        url: href.to_string(),
        source,
    })?;
    Ok(resolved.to_string())
}

pub(crate) fn parse_selector(css: &str, url: &Url) -> Result<Selector> {
    Selector::parse(css).map_err(|e| HarvestError::HtmlParse {
        url: url.to_string(),
        message: format!("bad selector '{}': {}", css, e),
    })
}

fn cell_text(cell: &ElementRef) -> String {
    normalize_whitespace(&cell.text().collect::<String>())
}

fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Strips the separator artifacts left at cell boundaries by the line-break
/// substitution: one leading `, ` (or bare comma) and one trailing comma.
fn strip_separators(value: &str) -> String {
    let value = value.trim();
    let value = value
        .strip_prefix(", ")
        .or_else(|| value.strip_prefix(','))
        .unwrap_or(value);
    let value = value.strip_suffix(',').unwrap_or(value);
    value.trim().to_string()
}
