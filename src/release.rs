// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Normalized release records built from GitHub API responses.

use crate::github::{RawAsset, RawRelease};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// A single release with its per-asset download counts already totalled.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ReleaseRecord {
    pub name: String,
    pub tag_name: String,
    pub html_url: String,
    pub published_at: Option<DateTime<Utc>>,
    pub is_prerelease: bool,
    pub zipball_url: Option<String>,
    pub tarball_url: Option<String>,
    pub assets: Vec<Asset>,
    pub total_downloads: u64,
    /// False when no asset reported a download count, as opposed to zero downloads.
    pub has_download_data: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Asset {
    pub name: String,
    pub browser_download_url: String,
    pub size_bytes: u64,
    pub download_count: Option<u64>,
}

impl From<RawAsset> for Asset {
    fn from(raw: RawAsset) -> Self {
        Self {
            name: raw.name,
            browser_download_url: raw.browser_download_url,
            size_bytes: raw.size,
            download_count: raw.download_count,
        }
    }
}

impl From<RawRelease> for ReleaseRecord {
    fn from(raw: RawRelease) -> Self {
        let assets: Vec<Asset> = raw
            .assets
            .unwrap_or_default()
            .into_iter()
            .map(Asset::from)
            .collect();

        let mut total_downloads = 0u64;
        let mut has_download_data = false;
        for count in assets.iter().filter_map(|a| a.download_count) {
            total_downloads = total_downloads.saturating_add(count);
            has_download_data = true;
        }

        // Untitled releases show up with a null or empty name; GitHub displays the tag instead.
        let name = match raw.name {
            Some(name) if !name.trim().is_empty() => name,
            _ => raw.tag_name.clone(),
        };

        Self {
            name,
            tag_name: raw.tag_name,
            html_url: raw.html_url,
            published_at: raw.published_at,
            is_prerelease: raw.prerelease,
            zipball_url: raw.zipball_url,
            tarball_url: raw.tarball_url,
            assets,
            total_downloads,
            has_download_data,
        }
    }
}
