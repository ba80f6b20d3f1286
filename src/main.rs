//! Gallery-Harvest main entry point
//!
//! This is the command-line interface for the artwork directory harvester.

use std::cmp;
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use gallery_harvest::config::{
    HarvestConfig, RosterFilter, Selection, DEFAULT_BASE_URL, DEFAULT_DEMONYM_SOURCE,
    DEFAULT_TASK_TIMEOUT_SECS,
};
use gallery_harvest::DirectoryBuilder;
use tracing_subscriber::EnvFilter;
use url::Url;

/// Gallery-Harvest: an artwork directory harvester
///
/// Crawls a gallery site's artist listings into an artist dataset, an
/// artwork dataset, and a local image archive.
#[derive(Parser, Debug)]
#[command(name = "gallery-harvest")]
#[command(version = "1.0.0")]
#[command(about = "Harvests artist and artwork datasets from a gallery site", long_about = None)]
struct Cli {
    /// Directory to download files to
    #[arg(value_name = "SAVE_DIR")]
    save_dir: PathBuf,

    /// Artist period selection, comma-separated ("all" for everything)
    #[arg(long, default_value = "all", value_delimiter = ',')]
    period: Vec<String>,

    /// Artist school selection, comma-separated
    #[arg(long, default_value = "all", value_delimiter = ',')]
    school: Vec<String>,

    /// Artist base selection, comma-separated
    #[arg(long, default_value = "all", value_delimiter = ',')]
    base: Vec<String>,

    /// Artist nationality selection, comma-separated
    #[arg(long, default_value = "all", value_delimiter = ',')]
    nationality: Vec<String>,

    /// Custom prefix for the output files
    #[arg(long)]
    custom_name: Option<String>,

    /// Number of parallel workers
    #[arg(long, default_value_t = default_worker_count())]
    workers: usize,

    /// Per-task timeout in seconds
    #[arg(long, default_value_t = DEFAULT_TASK_TIMEOUT_SECS)]
    timeout: u64,

    /// Root URL of the gallery site
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    base_url: Url,

    /// Location of the demonym CSV used for roster normalization
    #[arg(long, default_value = DEFAULT_DEMONYM_SOURCE)]
    demonym_source: Url,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

fn default_worker_count() -> usize {
    cmp::max(1, num_cpus::get().saturating_sub(1))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let config = HarvestConfig {
        save_dir: cli.save_dir,
        name_prefix: cli.custom_name,
        worker_count: cli.workers,
        task_timeout: Duration::from_secs(cli.timeout),
        base_url: cli.base_url,
        demonym_source: cli.demonym_source,
    };
    let filter = RosterFilter {
        period: Selection::from_values(&cli.period),
        school: Selection::from_values(&cli.school),
        base: Selection::from_values(&cli.base),
        nationality: Selection::from_values(&cli.nationality),
    };

    let builder = DirectoryBuilder::new(config, filter)?;
    let summary = builder.run().await?;

    println!(
        "All downloaded artworks are stored in {}",
        builder.artwork_dir().display()
    );
    println!(
        "Harvested {} artists and {} artworks in {}m{}s",
        summary.artist_count,
        summary.artwork_count,
        summary.elapsed.as_secs() / 60,
        summary.elapsed.as_secs() % 60
    );

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("gallery_harvest=info,warn"),
            1 => EnvFilter::new("gallery_harvest=debug,info"),
            2 => EnvFilter::new("gallery_harvest=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}
