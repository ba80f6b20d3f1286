//! Crawl-and-harvest pipeline
//!
//! This module contains the harvest side of the system:
//! - Fetching pages and images over HTTP
//! - Crawling a hierarchical listing down to its leaf content pages
//! - Extracting structured artwork records from leaf pages
//! - Orchestrating the whole run through the directory builder

mod builder;
mod extractor;
mod fetcher;
mod leaf;

pub use builder::{harvest_artist, DirectoryBuilder, HarvestSummary};
pub use extractor::{extract_records, ArtworkRecord};
pub use fetcher::{build_http_client, fetch_bytes, fetch_text};
pub use leaf::{child_links, crawl_leaves};

pub(crate) use extractor::parse_selector;
