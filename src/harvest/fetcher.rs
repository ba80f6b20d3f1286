//! HTTP fetcher
//!
//! All outbound requests go through this module: building the shared HTTP
//! client and fetching page text or raw bytes. Transport failures and
//! non-success status codes surface as [`HarvestError::Fetch`].

use std::time::Duration;

use reqwest::Client;
use url::Url;

use crate::{HarvestError, Result};

const USER_AGENT: &str = concat!("gallery-harvest/", env!("CARGO_PKG_VERSION"));

/// Builds the HTTP client shared by every fetch in a run
pub fn build_http_client() -> std::result::Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(USER_AGENT)
        .timeout(Duration::from_secs(30))
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches a URL and returns the response body as text
pub async fn fetch_text(client: &Client, url: &Url) -> Result<String> {
    let response = send(client, url).await?;
    response.text().await.map_err(|source| HarvestError::Fetch {
        url: url.to_string(),
        source,
    })
}

/// Fetches a URL and returns the raw response bytes
pub async fn fetch_bytes(client: &Client, url: &Url) -> Result<Vec<u8>> {
    let response = send(client, url).await?;
    let bytes = response.bytes().await.map_err(|source| HarvestError::Fetch {
        url: url.to_string(),
        source,
    })?;
    Ok(bytes.to_vec())
}

async fn send(client: &Client, url: &Url) -> Result<reqwest::Response> {
    client
        .get(url.clone())
        .send()
        .await
        .and_then(|response| response.error_for_status())
        .map_err(|source| HarvestError::Fetch {
            url: url.to_string(),
            source,
        })
}
