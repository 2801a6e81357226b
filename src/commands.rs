// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Command implementations.

use crate::{
    aggregate::{RepositorySummary, summarize},
    config::Config,
    error::{FailureCategory, SummaryError},
    github::{FetchOutcome, ReleaseAggregator},
    http::{ReqwestTransport, Transport},
    query::RepoQuery,
    report::{self, Clock},
};
use anyhow::{Context, Result};
use camino::Utf8PathBuf;
use std::fs;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

pub struct SummaryOptions {
    pub per_page: u32,
    pub show_all: bool,
    pub format: OutputFormat,
    pub output: Option<Utf8PathBuf>,
}

/// Build the release aggregator described by `config`.
pub fn build_aggregator(config: &Config) -> Result<ReleaseAggregator<ReqwestTransport>> {
    let transport = ReqwestTransport::new(config.timeout(), config.token())
        .context("failed to create HTTP client")?;
    Ok(ReleaseAggregator::new(transport)
        .with_api_base(config.api_base.as_str())
        .with_max_pages(config.max_pages))
}

/// Fetch and summarize one repository. `Ok(None)` means GitHub has no such repository.
pub async fn summarize_repo<T: Transport>(
    aggregator: &ReleaseAggregator<T>,
    query: &RepoQuery,
    per_page: u32,
    cancel: &CancellationToken,
) -> Result<Option<RepositorySummary>, SummaryError> {
    match aggregator
        .fetch_all_releases(query.owner(), query.name(), per_page, cancel)
        .await?
    {
        FetchOutcome::Found(releases) => Ok(Some(summarize(releases))),
        FetchOutcome::NotFound => Ok(None),
    }
}

/// Run the summary command over each query in turn.
///
/// A failed query is reported and the next one still runs. Returns `false` if
/// any query failed.
pub async fn run_summary<T: Transport>(
    aggregator: &ReleaseAggregator<T>,
    queries: &[RepoQuery],
    options: &SummaryOptions,
    clock: &dyn Clock,
    cancel: &CancellationToken,
) -> Result<bool> {
    if options.output.is_some() && queries.len() > 1 {
        anyhow::bail!("--output can only be used with a single repository");
    }

    let mut all_ok = true;
    for query in queries {
        let summary = match summarize_repo(aggregator, query, options.per_page, cancel).await {
            Ok(Some(summary)) => summary,
            Ok(None) => {
                report_failure(query, FailureCategory::NoData);
                all_ok = false;
                continue;
            }
            Err(err) => {
                warn!(repo = %query, error = %err, "release query failed");
                report_failure(query, err.category());
                all_ok = false;
                if matches!(err, SummaryError::Cancelled) {
                    break;
                }
                continue;
            }
        };

        info!(
            repo = %query,
            releases = summary.release_count(),
            "summarized releases"
        );

        let rendered = match options.format {
            OutputFormat::Text => report::render_text(query, &summary, options.show_all),
            OutputFormat::Json => report::render_json(query, &summary, clock)?,
        };

        match &options.output {
            Some(path) => {
                fs::write(path.as_std_path(), &rendered)
                    .with_context(|| format!("failed to write report to {}", path))?;
                println!("Wrote summary for {} to {}.", query, path);
            }
            None => println!("{}", rendered),
        }
    }

    Ok(all_ok)
}

/// Run the releases command: print every release of one repository.
pub async fn run_releases<T: Transport>(
    aggregator: &ReleaseAggregator<T>,
    query: &RepoQuery,
    per_page: u32,
    cancel: &CancellationToken,
) -> Result<bool> {
    match summarize_repo(aggregator, query, per_page, cancel).await {
        Ok(Some(summary)) => {
            println!("{}", report::render_release_table(summary.releases()));
            Ok(true)
        }
        Ok(None) => {
            report_failure(query, FailureCategory::NoData);
            Ok(false)
        }
        Err(err) => {
            warn!(repo = %query, error = %err, "release query failed");
            report_failure(query, err.category());
            Ok(false)
        }
    }
}

fn report_failure(query: &RepoQuery, category: FailureCategory) {
    eprintln!("{}: {}", query, category.message());
}
