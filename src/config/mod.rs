//! Configuration module for Gallery-Harvest
//!
//! Run configuration is assembled from command-line flags by the binary and
//! validated here before the harvester starts.

mod types;
mod validation;

// Re-export types
pub use types::{
    HarvestConfig, RosterFilter, Selection, DEFAULT_BASE_URL, DEFAULT_DEMONYM_SOURCE,
    DEFAULT_TASK_TIMEOUT_SECS,
};

// Re-export validation
pub use validation::validate;
