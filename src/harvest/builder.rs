//! Directory builder - harvest orchestration
//!
//! Runs the four phases of a harvest in strict order: fetch the artist
//! roster, harvest artwork records (one crawl+extract task per artist),
//! download the images (one task per record), and persist the surviving
//! datasets. Per-task failures are never fatal: the corresponding roster row
//! or artwork record is pruned and the decision logged. Only a roster
//! failure aborts the run.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use reqwest::Client;
use url::Url;

use crate::config::{validate, HarvestConfig, RosterFilter};
use crate::harvest::extractor::{extract_records, ArtworkRecord};
use crate::harvest::fetcher::{build_http_client, fetch_bytes, fetch_text};
use crate::harvest::leaf::crawl_leaves;
use crate::output::archive::store_image;
use crate::output::datasets::{write_artwork_dataset, write_info_dataset};
use crate::output::log::PruneLog;
use crate::roster::{self, ArtistEntry};
use crate::runner::run_all;
use crate::{HarvestError, Result};

/// Orchestrates one full harvest run
pub struct DirectoryBuilder {
    config: HarvestConfig,
    filter: RosterFilter,
    client: Client,
}

/// Counts reported after a completed run
#[derive(Debug)]
pub struct HarvestSummary {
    pub artist_count: usize,
    pub artwork_count: usize,
    pub elapsed: Duration,
}

impl DirectoryBuilder {
    /// Creates a builder, validating the configuration and preparing the
    /// output directories
    pub fn new(config: HarvestConfig, filter: RosterFilter) -> Result<Self> {
        validate(&config)?;
        fs::create_dir_all(config.artwork_dir())?;
        let client = build_http_client()?;
        Ok(Self {
            config,
            filter,
            client,
        })
    }

    /// Directory the downloaded images are stored in
    pub fn artwork_dir(&self) -> PathBuf {
        self.config.artwork_dir()
    }

    /// Runs the full harvest
    pub async fn run(&self) -> Result<HarvestSummary> {
        let start_time = Instant::now();
        let mut prune_log = PruneLog::create(&self.config.download_log_path())?;

        // Roster failures are fatal; nothing has been submitted yet
        tracing::info!("Building artists dataset...");
        let roster = roster::build_roster(&self.client, &self.config, &self.filter).await?;
        tracing::info!("Roster contains {} artists", roster.len());

        tracing::info!("Building artwork dataset...");
        let (roster, artworks) = self.harvest_artworks(roster, &mut prune_log).await?;

        tracing::info!("Downloading {} artwork images...", artworks.len());
        let artworks = self.download_images(artworks, &mut prune_log).await?;

        write_info_dataset(&self.config.info_dataset_path(), &roster)?;
        write_artwork_dataset(&self.config.artwork_dataset_path(), &artworks)?;

        let elapsed = start_time.elapsed();
        tracing::info!(
            "Harvest complete: {} artists, {} artworks in {:?}",
            roster.len(),
            artworks.len(),
            elapsed
        );

        Ok(HarvestSummary {
            artist_count: roster.len(),
            artwork_count: artworks.len(),
            elapsed,
        })
    }

    /// Phase two: one crawl+extract task per artist
    ///
    /// Artists whose task failed are pruned from the roster; the surviving
    /// records are concatenated, ordered by artist, and given dense ids.
    async fn harvest_artworks(
        &self,
        mut roster: Vec<ArtistEntry>,
        prune_log: &mut PruneLog,
    ) -> Result<(Vec<ArtistEntry>, Vec<ArtworkRecord>)> {
        let tasks: Vec<_> = roster
            .iter()
            .map(|entry| {
                let client = self.client.clone();
                let artist = entry.artist.clone();
                let url = entry.url.clone();
                move || async move { harvest_artist(&client, &artist, &url).await }
            })
            .collect();

        let results = run_all(tasks, self.config.worker_count, self.config.task_timeout).await;

        let mut keep = vec![true; roster.len()];
        let mut artworks = Vec::new();
        for result in results {
            match result.outcome {
                Ok(records) => artworks.extend(records),
                Err(failure) => {
                    let entry = &roster[result.index];
                    tracing::warn!("Dropping artist {}: {}", entry.artist, failure);
                    prune_log.record(&entry.artist, &failure.to_string())?;
                    keep[result.index] = false;
                }
            }
        }
        apply_keep_mask(&mut roster, &keep);

        artworks.sort_by(|a, b| a.artist.cmp(&b.artist));
        for (id, record) in artworks.iter_mut().enumerate() {
            record.id = id as u64;
        }

        Ok((roster, artworks))
    }

    /// Phase three: one download task per artwork record
    ///
    /// Records whose download failed are pruned by their stable id, so the
    /// already-assigned image file names stay valid for the survivors.
    async fn download_images(
        &self,
        mut artworks: Vec<ArtworkRecord>,
        prune_log: &mut PruneLog,
    ) -> Result<Vec<ArtworkRecord>> {
        let artwork_dir = self.config.artwork_dir();
        let tasks: Vec<_> = artworks
            .iter()
            .map(|record| {
                let client = self.client.clone();
                let image_url = record.image_url.clone();
                let id = record.id;
                let path = artwork_dir.join(format!("{}.jpg", id));
                move || async move {
                    tracing::info!("Getting picture ID {}", id);
                    download_artwork(&client, &image_url, &path).await
                }
            })
            .collect();

        let results = run_all(tasks, self.config.worker_count, self.config.task_timeout).await;

        let mut failed_ids: HashSet<u64> = HashSet::new();
        for result in results {
            if let Err(failure) = result.outcome {
                let record = &artworks[result.index];
                tracing::warn!("Dropping artwork ID {}: {}", record.id, failure);
                prune_log.record(&format!("ID {}", record.id), &failure.to_string())?;
                failed_ids.insert(record.id);
            }
        }
        artworks.retain(|record| !failed_ids.contains(&record.id));

        Ok(artworks)
    }
}

/// One harvest task: crawl the artist's listing to its leaves and extract
/// every artwork record they carry
pub async fn harvest_artist(
    client: &Client,
    artist: &str,
    listing_url: &str,
) -> Result<Vec<ArtworkRecord>> {
    tracing::info!("Getting {}", artist);
    let root = Url::parse(listing_url).map_err(|source| HarvestError::InvalidUrl {
        url: listing_url.to_string(),
        source,
    })?;

    let leaves = crawl_leaves(client, &root).await?;
    tracing::debug!("{}: {} leaf pages", artist, leaves.len());

    let mut records = Vec::new();
    for leaf in &leaves {
        let body = fetch_text(client, leaf).await?;
        records.extend(extract_records(&body, leaf, artist)?);
    }
    Ok(records)
}

/// One download task: fetch the image, decode it, and persist it under the
/// record's id
async fn download_artwork(client: &Client, image_url: &str, path: &Path) -> Result<()> {
    let url = Url::parse(image_url).map_err(|source| HarvestError::InvalidUrl {
        url: image_url.to_string(),
        source,
    })?;
    let bytes = fetch_bytes(client, &url).await?;
    store_image(&bytes, image_url, path)
}

/// Drops the rows whose mask entry is false, preserving order
///
/// Pruning works on a mark-then-filter basis so removals can never shift the
/// indices that later results still need to be correlated against.
fn apply_keep_mask<T>(rows: &mut Vec<T>, keep: &[bool]) {
    let mut index = 0;
    rows.retain(|_| {
        let kept = keep[index];
        index += 1;
        kept
    });
}
