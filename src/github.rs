// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! GitHub API client for fetching release download statistics.

use crate::{
    error::SummaryError,
    http::Transport,
    link::next_link,
    release::ReleaseRecord,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::collections::HashSet;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

pub const GITHUB_API_BASE: &str = "https://api.github.com";

/// Upper bound on pages followed for a single repository.
pub const DEFAULT_MAX_PAGES: usize = 1000;

#[derive(Debug, Deserialize)]
pub struct RawRelease {
    pub name: Option<String>,
    pub tag_name: String,
    pub html_url: String,
    pub published_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub prerelease: bool,
    pub zipball_url: Option<String>,
    pub tarball_url: Option<String>,
    pub assets: Option<Vec<RawAsset>>,
}

#[derive(Debug, Deserialize)]
pub struct RawAsset {
    pub name: String,
    pub browser_download_url: String,
    #[serde(default)]
    pub size: u64,
    pub download_count: Option<u64>,
}

/// Result of walking a repository's releases.
#[derive(Debug, PartialEq)]
pub enum FetchOutcome {
    /// The repository exists; the list may still be empty.
    Found(Vec<ReleaseRecord>),
    /// GitHub answered 404 for the first page.
    NotFound,
}

/// Walks the paginated releases endpoint of a repository.
pub struct ReleaseAggregator<T> {
    transport: T,
    api_base: String,
    max_pages: usize,
}

impl<T: Transport> ReleaseAggregator<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            api_base: GITHUB_API_BASE.to_string(),
            max_pages: DEFAULT_MAX_PAGES,
        }
    }

    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_max_pages(mut self, max_pages: usize) -> Self {
        self.max_pages = max_pages;
        self
    }

    /// Fetch ALL releases of `owner/repo`, following `Link: rel="next"` headers.
    ///
    /// Pages are requested one at a time in server order. Any failure after the
    /// first page discards what was collected so far.
    #[tracing::instrument(skip(self, cancel))]
    pub async fn fetch_all_releases(
        &self,
        owner: &str,
        repo: &str,
        page_size: u32,
        cancel: &CancellationToken,
    ) -> Result<FetchOutcome, SummaryError> {
        if owner.trim().is_empty() || repo.trim().is_empty() {
            return Err(SummaryError::InvalidQuery(
                "owner and repository name must not be empty".to_string(),
            ));
        }
        if page_size == 0 {
            return Err(SummaryError::InvalidQuery(
                "page size must be positive".to_string(),
            ));
        }

        let mut url = format!(
            "{}/repos/{}/{}/releases?per_page={}",
            self.api_base, owner, repo, page_size
        );
        let mut requested = HashSet::new();
        let mut releases = Vec::new();
        let mut page = 0;

        loop {
            if cancel.is_cancelled() {
                return Err(SummaryError::Cancelled);
            }
            if page == self.max_pages {
                return Err(SummaryError::PageLimitExceeded {
                    max_pages: self.max_pages,
                });
            }
            page += 1;

            debug!(page, %url, "fetching releases page");
            let response = self
                .transport
                .get(&url)
                .await
                .map_err(|err| SummaryError::Fetch {
                    url: url.clone(),
                    message: err.to_string(),
                })?;

            if response.status == 404 && page == 1 {
                info!("repository {}/{} not found", owner, repo);
                return Ok(FetchOutcome::NotFound);
            }
            if !(200..300).contains(&response.status) {
                let body: String = response.body.chars().take(200).collect();
                return Err(SummaryError::Fetch {
                    url,
                    message: format!("HTTP status {}: {}", response.status, body),
                });
            }

            let parsed: Vec<RawRelease> =
                serde_json::from_str(&response.body).map_err(|err| SummaryError::Fetch {
                    url: url.clone(),
                    message: format!("failed to parse releases page {}: {}", page, err),
                })?;
            debug!(page, count = parsed.len(), "parsed releases page");
            releases.extend(parsed.into_iter().map(ReleaseRecord::from));

            let next = match response.link.as_deref() {
                Some(header) => next_link(header)?,
                None => None,
            };
            requested.insert(url);

            match next {
                Some(next) if requested.contains(&next) => {
                    return Err(SummaryError::Parse(format!(
                        "next link points to an already fetched page: {}",
                        next
                    )));
                }
                Some(next) => url = next,
                None => break,
            }
        }

        info!(pages = page, releases = releases.len(), "fetched all releases");
        Ok(FetchOutcome::Found(releases))
    }
}
