//! Gallery-Harvest: an artwork directory harvester
//!
//! This crate crawls a structured art-gallery site into two correlated CSV
//! datasets (artist roster, artwork records) and a local image archive.

pub mod config;
pub mod harvest;
pub mod output;
pub mod roster;
pub mod runner;

use thiserror::Error;

/// Main error type for harvest operations
#[derive(Debug, Error)]
pub enum HarvestError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Request for {url} failed: {source}")]
    Fetch { url: String, source: reqwest::Error },

    #[error("HTTP client error: {0}")]
    Client(#[from] reqwest::Error),

    #[error("HTML parse error for {url}: {message}")]
    HtmlParse { url: String, message: String },

    #[error("No artwork preview table on {url}")]
    NoPreviewTable { url: String },

    #[error("Row {row} of the preview table on {url} has no image link")]
    MissingRowImage { url: String, row: usize },

    #[error("Artist index page is missing the expected listing table")]
    MalformedRoster,

    #[error("Image error for {url}: {message}")]
    Image { url: String, message: String },

    #[error("Invalid URL {url}: {source}")]
    InvalidUrl {
        url: String,
        source: url::ParseError,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in configuration: {0}")]
    InvalidUrl(String),
}

/// Result type alias for harvest operations
pub type Result<T> = std::result::Result<T, HarvestError>;

// Re-export commonly used types
pub use config::{HarvestConfig, RosterFilter, Selection};
pub use harvest::{ArtworkRecord, DirectoryBuilder, HarvestSummary};
pub use roster::ArtistEntry;
pub use runner::{run_all, TaskFailure, TaskResult};
