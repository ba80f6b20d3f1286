//! Artist roster retrieval
//!
//! Fetches the site's artist index page and turns its listing table into
//! clean roster rows: demographic columns split and normalized,
//! cross-reference rows dropped, duplicate URLs removed, the caller's
//! selections applied, and the result sorted by artist name. The harvest
//! pipeline trusts the roster to be deduplicated by URL.

mod demographics;

pub use demographics::{split_school, Demographics, DemonymTable};

use std::collections::HashSet;

use reqwest::Client;
use scraper::Html;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::config::{HarvestConfig, RosterFilter};
use crate::harvest::{fetch_text, parse_selector};
use crate::{HarvestError, Result};

/// Query that lists every artist on a single page
const ARTIST_INDEX_QUERY: &str =
    "/cgi-bin/artist.cgi?Profession=any&School=any&Period=any&Time-line=any&from=0&max=9999999&Sort=Name";

/// One row of the artist roster
///
/// `url` is the artist's listing URL and the row's identity; the roster is
/// deduplicated on it. Field order is the persisted CSV column order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArtistEntry {
    pub artist: String,
    pub period: String,
    pub school: String,
    pub url: String,
    pub base: String,
    pub nationality: String,
}

/// Builds the filtered artist roster
///
/// Any failure here is fatal to the run: without a roster there is nothing
/// to harvest.
pub async fn build_roster(
    client: &Client,
    config: &HarvestConfig,
    filter: &RosterFilter,
) -> Result<Vec<ArtistEntry>> {
    let index_url = config
        .base_url
        .join(ARTIST_INDEX_QUERY)
        .map_err(|source| HarvestError::InvalidUrl {
            url: ARTIST_INDEX_QUERY.to_string(),
            source,
        })?;

    let body = fetch_text(client, &index_url).await?;
    let demonyms = DemonymTable::fetch(client, &config.demonym_source).await?;

    let mut roster = parse_roster(&body, &index_url, &demonyms)?;

    roster.retain(|entry| {
        filter.period.matches(&entry.period)
            && filter.school.matches(&entry.school)
            && filter.base.matches(&entry.base)
            && filter.nationality.matches(&entry.nationality)
    });
    roster.sort_by(|a, b| a.artist.cmp(&b.artist));

    Ok(roster)
}

/// Parses the artist index page into raw roster rows
///
/// The listing table lives under `div.PAGENUM`; its header names the
/// `ARTIST`, `PERIOD` and `SCHOOL` columns, and each data row links to the
/// artist's listing page. Rows that are cross-references (`(see ...)`) or
/// duplicate an already-seen URL are skipped, first occurrence wins.
pub fn parse_roster(
    html: &str,
    index_url: &Url,
    demonyms: &DemonymTable,
) -> Result<Vec<ArtistEntry>> {
    let document = Html::parse_document(html);
    let table_selector = parse_selector("div.PAGENUM table", index_url)?;
    let row_selector = parse_selector("tr", index_url)?;
    let cell_selector = parse_selector("td, th", index_url)?;
    let anchor_selector = parse_selector("a[href]", index_url)?;

    let table = document
        .select(&table_selector)
        .next()
        .ok_or(HarvestError::MalformedRoster)?;

    let mut rows = table.select(&row_selector);
    let header = rows.next().ok_or(HarvestError::MalformedRoster)?;
    let headers: Vec<String> = header
        .select(&cell_selector)
        .map(|cell| cell.text().collect::<String>().trim().to_string())
        .collect();

    let artist_col = column_index(&headers, "ARTIST")?;
    let period_col = column_index(&headers, "PERIOD")?;
    let school_col = column_index(&headers, "SCHOOL")?;

    let mut seen_urls: HashSet<String> = HashSet::new();
    let mut roster = Vec::new();
    for row in rows {
        let cells: Vec<String> = row
            .select(&cell_selector)
            .map(|cell| cell.text().collect::<String>().trim().to_string())
            .collect();
        if cells.len() != headers.len() {
            continue;
        }

        let artist = cells[artist_col].clone();
        if artist.contains("(see ") {
            continue;
        }

        let href = match row
            .select(&anchor_selector)
            .next()
            .and_then(|anchor| anchor.value().attr("href"))
        {
            Some(href) => href,
            None => continue,
        };
        let url = match index_url.join(href) {
            Ok(url) => url.to_string(),
            Err(e) => {
                tracing::debug!("Skipping artist link {}: {}", href, e);
                continue;
            }
        };
        if !seen_urls.insert(url.clone()) {
            continue;
        }

        let demo = split_school(&cells[school_col]);
        roster.push(ArtistEntry {
            artist,
            period: cells[period_col].clone(),
            school: demo.school,
            url,
            base: demonyms.resolve(&demo.base),
            nationality: demo.nationality,
        });
    }

    Ok(roster)
}

fn column_index(headers: &[String], name: &str) -> Result<usize> {
    headers
        .iter()
        .position(|header| header.eq_ignore_ascii_case(name))
        .ok_or(HarvestError::MalformedRoster)
}
