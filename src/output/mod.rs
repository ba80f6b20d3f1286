//! Output module for the persisted harvest artifacts
//!
//! This module writes:
//! - The artist dataset CSV (one row per surviving roster entry)
//! - The artwork dataset CSV (one row per surviving artwork record)
//! - The artwork image archive (one decoded image per record id)
//! - The prune log (one line per pruning decision, overwritten each run)

pub mod archive;
pub mod datasets;
pub mod log;

pub use archive::store_image;
pub use datasets::{write_artwork_dataset, write_info_dataset};
pub use log::PruneLog;
