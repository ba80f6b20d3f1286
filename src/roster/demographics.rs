//! Demographic normalization for roster rows
//!
//! The index page packs nationality, profession and home base into one
//! school string like `"Italian painter (Venice)"`. This module splits that
//! string and resolves demonyms ("Venetian") to place names ("Venice")
//! through an external two-column CSV.

use std::collections::HashMap;

use reqwest::Client;
use url::Url;

use crate::harvest::fetch_text;
use crate::Result;

/// The split parts of a roster school string
#[derive(Debug, Clone, PartialEq)]
pub struct Demographics {
    pub nationality: String,
    pub school: String,
    pub base: String,
}

/// Splits a raw school string into nationality, school and base
///
/// The base is the parenthesized tail when present, otherwise the first
/// word. The remainder's first word is the nationality and its second the
/// school; index rows always carry at least those two words.
pub fn split_school(raw: &str) -> Demographics {
    let mut parts: Vec<&str> = raw.split(" (").collect();

    let base_raw = if parts.len() > 1 {
        parts.pop().unwrap_or("")
    } else {
        raw.split(' ').next().unwrap_or("")
    };
    let base = base_raw.replace([' ', '(', ')'], "");

    let head = parts.first().copied().unwrap_or("");
    let mut tokens = head.split_whitespace();
    let nationality = tokens.next().unwrap_or("").to_string();
    let school = tokens.next().unwrap_or("").to_string();

    Demographics {
        nationality,
        school,
        base,
    }
}

/// Demonym-to-place lookup table
#[derive(Debug, Default)]
pub struct DemonymTable {
    places: HashMap<String, String>,
}

impl DemonymTable {
    /// Fetches and parses the demonym CSV from its source URL
    pub async fn fetch(client: &Client, source: &Url) -> Result<Self> {
        let body = fetch_text(client, source).await?;
        Self::from_csv(&body)
    }

    /// Parses a headerless two-column CSV of `demonym,place` rows
    pub fn from_csv(content: &str) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(content.as_bytes());

        let mut places = HashMap::new();
        for record in reader.records() {
            let record = record?;
            if let (Some(demonym), Some(place)) = (record.get(0), record.get(1)) {
                places.insert(demonym.trim().to_lowercase(), place.trim().to_string());
            }
        }
        Ok(Self { places })
    }

    /// Maps a demonym to its place name, case-insensitively
    ///
    /// Values without a mapping pass through unchanged.
    pub fn resolve(&self, value: &str) -> String {
        self.places
            .get(&value.to_lowercase())
            .cloned()
            .unwrap_or_else(|| value.to_string())
    }
}
