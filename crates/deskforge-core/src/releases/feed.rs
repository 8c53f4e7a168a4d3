//! Release feed retrieval over HTTP

use crate::config;
use anyhow::{Context, Result};
use serde::Deserialize;
use url::Url;

/// One entry of the Electron release feed.
///
/// Only the fields the matcher needs are deserialized; everything else
/// carried by the feed (dates, Chromium versions, file lists) is ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct ReleaseEntry {
    /// Release version string as published (may carry a leading `v`).
    pub version: String,

    /// Version of the Node runtime bundled with this release.
    #[serde(default)]
    pub node: Option<String>,
}

/// Fetches the list of published releases from the configured endpoint.
pub struct ReleaseFeed {
    url: Url,
    client: reqwest::Client,
}

impl ReleaseFeed {
    /// Create a feed client for an explicit endpoint.
    pub fn new(url: Url, user_agent: &str) -> Self {
        Self {
            url,
            client: reqwest::Client::builder()
                .user_agent(user_agent)
                .build()
                .unwrap_or_else(|_| reqwest::Client::new()),
        }
    }

    /// Create a feed client from the configured endpoint, honoring the
    /// environment override and the mirror preference.
    pub fn from_env(use_mirror: bool, user_agent: &str) -> Result<Self> {
        let url = config::releases_url(use_mirror)?;
        Ok(Self::new(url, user_agent))
    }

    /// Endpoint this feed reads from.
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Fetch all release descriptors.
    ///
    /// A non-success status or a malformed body is an error; the caller
    /// treats any failure here as "feed unavailable" and falls back to
    /// manual version entry.
    pub async fn fetch(&self) -> Result<Vec<ReleaseEntry>> {
        let response = self
            .client
            .get(self.url.clone())
            .send()
            .await
            .with_context(|| format!("Failed to fetch release feed from {}", self.url))?;

        if !response.status().is_success() {
            anyhow::bail!(
                "Failed to fetch release feed from {}: HTTP {}",
                self.url,
                response.status()
            );
        }

        response
            .json::<Vec<ReleaseEntry>>()
            .await
            .context("Failed to parse release feed")
    }
}
