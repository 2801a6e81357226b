// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Text and JSON rendering of release summaries.

use crate::{aggregate::RepositorySummary, query::RepoQuery, release::ReleaseRecord};
use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Source of the timestamp stamped on JSON reports.
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Render a summary the way it is shown in the terminal.
pub fn render_text(query: &RepoQuery, summary: &RepositorySummary, show_all: bool) -> String {
    let mut out = format!(
        "Releases Summary\n{}\nUrl: {}\nNumber of Releases: {}\nTotal Downloads: {}\n",
        "=".repeat(30),
        query.releases_url(),
        summary.release_count(),
        format_downloads(summary.aggregate_downloads()),
    );

    if let Some(latest) = summary.latest_release() {
        out.push_str("\nLatest Release:\n");
        out.push_str(&release_block(latest));
    }
    if let Some(stable) = summary.latest_stable_release() {
        out.push_str("\nLatest Stable Release:\n");
        out.push_str(&release_block(stable));
    }

    if show_all && !summary.releases().is_empty() {
        out.push_str("\nAll Releases:\n");
        out.push_str(&render_release_table(summary.releases()));
    }

    out
}

fn release_block(release: &ReleaseRecord) -> String {
    format!(
        "  Url: {}\n  Name: {}\n  Tag: {}\n  Downloads: {}\n",
        release.html_url,
        release.name,
        release.tag_name,
        format_downloads(release_downloads(release)),
    )
}

/// One line per release: tag, publish date, downloads, prerelease marker.
pub fn render_release_table(releases: &[ReleaseRecord]) -> String {
    let tag_width = releases
        .iter()
        .map(|r| r.tag_name.len())
        .max()
        .unwrap_or(0)
        .max(3);

    let mut out = format!(
        "{:<tag_width$}  {:<10}  {:>12}\n{}\n",
        "Tag",
        "Published",
        "Downloads",
        "-".repeat(tag_width + 26)
    );
    for release in releases {
        let published = release
            .published_at
            .map(|t| t.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| "-".to_string());
        let marker = if release.is_prerelease {
            "  (prerelease)"
        } else {
            ""
        };
        out.push_str(&format!(
            "{:<tag_width$}  {:<10}  {:>12}{}\n",
            release.tag_name,
            published,
            format_downloads(release_downloads(release)),
            marker
        ));
    }
    out
}

fn release_downloads(release: &ReleaseRecord) -> Option<u64> {
    release
        .has_download_data
        .then_some(release.total_downloads)
}

#[derive(Serialize)]
struct JsonReport<'a> {
    repository: &'a RepoQuery,
    url: String,
    generated_at: DateTime<Utc>,
    release_count: usize,
    aggregate_downloads: Option<u64>,
    latest_release: Option<&'a ReleaseRecord>,
    latest_stable_release: Option<&'a ReleaseRecord>,
    releases: &'a [ReleaseRecord],
}

/// Render a summary as pretty-printed JSON.
pub fn render_json(
    query: &RepoQuery,
    summary: &RepositorySummary,
    clock: &dyn Clock,
) -> Result<String> {
    let report = JsonReport {
        repository: query,
        url: query.releases_url(),
        generated_at: clock.now(),
        release_count: summary.release_count(),
        aggregate_downloads: summary.aggregate_downloads(),
        latest_release: summary.latest_release(),
        latest_stable_release: summary.latest_stable_release(),
        releases: summary.releases(),
    };
    Ok(serde_json::to_string_pretty(&report)?)
}

fn format_downloads(downloads: Option<u64>) -> String {
    match downloads {
        Some(n) => format_number(n),
        None => "unknown".to_string(),
    }
}

/// Format a number with thousands separators.
pub fn format_number(n: u64) -> String {
    let s = n.to_string();
    let mut result = String::new();
    for (i, c) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }
    result.chars().rev().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::summarize;
    use chrono::TimeZone;

    struct FixedClock(DateTime<Utc>);

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            self.0
        }
    }

    fn release(tag: &str, prerelease: bool, downloads: Option<u64>) -> ReleaseRecord {
        ReleaseRecord {
            name: format!("Release {}", tag),
            tag_name: tag.to_string(),
            html_url: format!("https://github.com/o/r/releases/tag/{}", tag),
            published_at: Some(Utc.with_ymd_and_hms(2024, 5, 17, 8, 0, 0).unwrap()),
            is_prerelease: prerelease,
            zipball_url: None,
            tarball_url: None,
            assets: Vec::new(),
            total_downloads: downloads.unwrap_or(0),
            has_download_data: downloads.is_some(),
        }
    }

    fn query() -> RepoQuery {
        RepoQuery::new("o", "r").unwrap()
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(0), "0");
        assert_eq!(format_number(999), "999");
        assert_eq!(format_number(1000), "1,000");
        assert_eq!(format_number(1234567), "1,234,567");
    }

    #[test]
    fn test_render_text() {
        let summary = summarize(vec![
            release("v2.0.0-rc.1", true, Some(12)),
            release("v1.0.0", false, Some(1500)),
        ]);
        let text = render_text(&query(), &summary, false);

        assert!(text.starts_with("Releases Summary\n"));
        assert!(text.contains("Url: https://github.com/o/r/releases\n"));
        assert!(text.contains("Number of Releases: 2\n"));
        assert!(text.contains("Total Downloads: 1,512\n"));
        assert!(text.contains("Latest Release:\n  Url: https://github.com/o/r/releases/tag/v2.0.0-rc.1"));
        assert!(text.contains("Latest Stable Release:\n  Url: https://github.com/o/r/releases/tag/v1.0.0"));
        assert!(text.contains("  Downloads: 1,500\n"));
        assert!(!text.contains("All Releases:"));
    }

    #[test]
    fn test_render_text_all_releases() {
        let summary = summarize(vec![
            release("v2.0.0-rc.1", true, None),
            release("v1.0.0", false, Some(7)),
        ]);
        let text = render_text(&query(), &summary, true);

        assert!(text.contains("All Releases:"));
        assert!(text.contains("2024-05-17"));
        assert!(text.contains("(prerelease)"));
        assert!(text.contains("Total Downloads: 7\n"));
    }

    #[test]
    fn test_render_release_table_layout() {
        let table = render_release_table(&[
            release("v1.0.0", false, Some(1234)),
            release("v0.9.0-rc.1", true, None),
        ]);
        let lines: Vec<_> = table.lines().collect();

        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("Tag          Published"));
        assert_eq!(lines[1], "-".repeat(11 + 26));
        assert!(lines[2].starts_with("v1.0.0       2024-05-17"));
        assert!(lines[2].ends_with("1,234"));
        assert!(lines[3].ends_with("unknown  (prerelease)"));
    }

    #[test]
    fn test_render_text_unknown_downloads() {
        let summary = summarize(vec![release("v0.1.0-alpha", true, None)]);
        let text = render_text(&query(), &summary, false);

        assert!(text.contains("Total Downloads: unknown\n"));
        assert!(text.contains("Latest Release:"));
        assert!(!text.contains("Latest Stable Release:"));
    }

    #[test]
    fn test_render_json() {
        let summary = summarize(vec![
            release("v2.0.0-rc.1", true, Some(1)),
            release("v1.0.0", false, Some(2)),
        ]);
        let clock = FixedClock(Utc.with_ymd_and_hms(2025, 1, 2, 3, 4, 5).unwrap());
        let json = render_json(&query(), &summary, &clock).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["repository"]["owner"], "o");
        assert_eq!(value["url"], "https://github.com/o/r/releases");
        assert_eq!(value["generated_at"], "2025-01-02T03:04:05Z");
        assert_eq!(value["release_count"], 2);
        assert_eq!(value["aggregate_downloads"], 3);
        assert_eq!(value["latest_release"]["tag_name"], "v2.0.0-rc.1");
        assert_eq!(value["latest_stable_release"]["tag_name"], "v1.0.0");
        assert_eq!(value["releases"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_render_json_empty() {
        let summary = summarize(Vec::new());
        let clock = FixedClock(Utc.with_ymd_and_hms(2025, 1, 2, 3, 4, 5).unwrap());
        let value: serde_json::Value =
            serde_json::from_str(&render_json(&query(), &summary, &clock).unwrap()).unwrap();

        assert_eq!(value["release_count"], 0);
        assert!(value["aggregate_downloads"].is_null());
        assert!(value["latest_release"].is_null());
        assert!(value["latest_stable_release"].is_null());
    }
}
