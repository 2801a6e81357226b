// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Repository-wide aggregation of release download statistics.

use crate::release::ReleaseRecord;

/// Aggregates over a repository's releases, in the order GitHub returned them.
///
/// Read-only once built by [`summarize`].
#[derive(Clone, Debug, PartialEq)]
pub struct RepositorySummary {
    releases: Vec<ReleaseRecord>,
    aggregate_downloads: Option<u64>,
}

impl RepositorySummary {
    pub fn releases(&self) -> &[ReleaseRecord] {
        &self.releases
    }

    pub fn release_count(&self) -> usize {
        self.releases.len()
    }

    /// `None` when no release carries any download data.
    pub fn aggregate_downloads(&self) -> Option<u64> {
        self.aggregate_downloads
    }

    /// The newest release, prerelease or not.
    pub fn latest_release(&self) -> Option<&ReleaseRecord> {
        self.releases.first()
    }

    /// The newest release not flagged as a prerelease.
    pub fn latest_stable_release(&self) -> Option<&ReleaseRecord> {
        self.releases.iter().find(|r| !r.is_prerelease)
    }
}

/// Summarize an already-fetched release list.
///
/// GitHub lists releases newest first, so the first entry is the latest
/// release. The list is not re-sorted.
pub fn summarize(releases: Vec<ReleaseRecord>) -> RepositorySummary {
    let aggregate_downloads = releases
        .iter()
        .filter(|r| r.has_download_data)
        .map(|r| r.total_downloads)
        .fold(None, |acc: Option<u64>, n| {
            Some(acc.unwrap_or(0).saturating_add(n))
        });

    RepositorySummary {
        releases,
        aggregate_downloads,
    }
}
