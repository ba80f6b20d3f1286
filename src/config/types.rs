use std::path::PathBuf;
use std::time::Duration;
use url::Url;

/// Root of the gallery site the harvester runs against.
pub const DEFAULT_BASE_URL: &str = "https://www.wga.hu";

/// Two-column CSV mapping demonyms to place names, used to normalize the
/// roster's `base` column.
pub const DEFAULT_DEMONYM_SOURCE: &str = "https://raw.githubusercontent.com/knowitall/chunkedextractor/master/src/main/resources/edu/knowitall/chunkedextractor/demonyms.csv";

/// Default per-task timeout in seconds
pub const DEFAULT_TASK_TIMEOUT_SECS: u64 = 20;

/// Main configuration for a harvest run
#[derive(Debug, Clone)]
pub struct HarvestConfig {
    /// Directory all outputs are written under
    pub save_dir: PathBuf,

    /// Optional prefix for output file names
    pub name_prefix: Option<String>,

    /// Number of parallel workers for harvest and download tasks
    pub worker_count: usize,

    /// Per-task timeout
    pub task_timeout: Duration,

    /// Root URL of the gallery site
    pub base_url: Url,

    /// Location of the demonym CSV used for roster normalization
    pub demonym_source: Url,
}

impl HarvestConfig {
    /// File-name prefix derived from `name_prefix` (`"<prefix>_"` or empty)
    pub fn prefix(&self) -> String {
        match &self.name_prefix {
            Some(name) => format!("{}_", name),
            None => String::new(),
        }
    }

    /// Path of the artist dataset CSV
    pub fn info_dataset_path(&self) -> PathBuf {
        self.save_dir.join(format!("{}info_dataset.csv", self.prefix()))
    }

    /// Path of the artwork dataset CSV
    pub fn artwork_dataset_path(&self) -> PathBuf {
        self.save_dir
            .join(format!("{}artwork_dataset.csv", self.prefix()))
    }

    /// Directory the downloaded images are stored in
    pub fn artwork_dir(&self) -> PathBuf {
        self.save_dir.join(format!("{}artwork", self.prefix()))
    }

    /// Path of the prune log, overwritten on every run
    pub fn download_log_path(&self) -> PathBuf {
        self.save_dir
            .join(format!("{}download_log.log", self.prefix()))
    }
}

/// One roster selection: either everything or an explicit value list
#[derive(Debug, Clone)]
pub enum Selection {
    All,
    Only(Vec<String>),
}

impl Selection {
    /// Builds a selection from CLI values; `["all"]` (or nothing) selects all
    pub fn from_values(values: &[String]) -> Self {
        if values.is_empty() || (values.len() == 1 && values[0].eq_ignore_ascii_case("all")) {
            Selection::All
        } else {
            Selection::Only(values.to_vec())
        }
    }

    /// Case-insensitive membership test
    pub fn matches(&self, value: &str) -> bool {
        match self {
            Selection::All => true,
            Selection::Only(values) => values
                .iter()
                .any(|v| v.to_lowercase() == value.to_lowercase()),
        }
    }
}

/// Roster selections applied after demographic normalization
#[derive(Debug, Clone)]
pub struct RosterFilter {
    pub period: Selection,
    pub school: Selection,
    pub base: Selection,
    pub nationality: Selection,
}

impl Default for RosterFilter {
    fn default() -> Self {
        Self {
            period: Selection::All,
            school: Selection::All,
            base: Selection::All,
            nationality: Selection::All,
        }
    }
}
