// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! CLI argument parsing and command dispatch.

use crate::{
    commands::{self, OutputFormat, SummaryOptions},
    config::Config,
    query::RepoQuery,
    report::SystemClock,
};
use anyhow::{Context, Result};
use camino::{Utf8Path, Utf8PathBuf};
use clap::{ArgAction, Parser};
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

const DEFAULT_CONFIG_PATH: &str = "release-summary.toml";

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the configuration file [default: release-summary.toml, if present]
    #[arg(short, long, global = true)]
    config: Option<Utf8PathBuf>,

    /// Increase log verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Parser, Debug)]
enum Command {
    /// Summarize the releases and download counts of a repository
    Summary {
        /// Repository as OWNER/NAME; defaults to every repository in the config
        repo: Option<String>,

        /// Repository owner (use with --name)
        #[arg(long, requires = "name", conflicts_with = "repo")]
        owner: Option<String>,

        /// Repository name (use with --owner)
        #[arg(long, requires = "owner", conflicts_with = "repo")]
        name: Option<String>,

        /// Releases requested per page (overrides the config)
        #[arg(long)]
        per_page: Option<u32>,

        /// Also list every release
        #[arg(short, long)]
        all: bool,

        /// Output format
        #[arg(short, long, value_enum, default_value_t)]
        format: OutputFormat,

        /// Write the summary to a file instead of stdout
        #[arg(short, long)]
        output: Option<Utf8PathBuf>,
    },

    /// List every release of a repository with its download count
    Releases {
        /// Repository as OWNER/NAME
        repo: String,

        /// Releases requested per page (overrides the config)
        #[arg(long)]
        per_page: Option<u32>,
    },
}

/// Parse arguments and dispatch to the appropriate command.
///
/// Returns `false` if any repository query failed.
pub async fn dispatch() -> Result<bool> {
    let args = Args::parse();
    init_logging(args.verbose);

    let config = match &args.config {
        Some(path) => Config::load(path),
        None => Config::load_or_default(Utf8Path::new(DEFAULT_CONFIG_PATH)),
    }
    .context("failed to load configuration")?;

    let cancel = CancellationToken::new();
    let ctrl_c_cancel = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("interrupted, stopping after the current request");
            ctrl_c_cancel.cancel();
        }
    });

    let aggregator = commands::build_aggregator(&config)?;

    match args.command {
        Command::Summary {
            repo,
            owner,
            name,
            per_page,
            all,
            format,
            output,
        } => {
            let queries = match (repo, owner, name) {
                (Some(repo), _, _) => vec![parse_query(&repo)?],
                (None, Some(owner), Some(name)) => vec![
                    RepoQuery::new(&owner, &name).map_err(|err| invalid_input(&err))?,
                ],
                _ => config.repo_queries()?,
            };
            anyhow::ensure!(
                !queries.is_empty(),
                "no repository given and none configured; pass OWNER/NAME"
            );

            let options = SummaryOptions {
                per_page: per_page.unwrap_or(config.per_page),
                show_all: all,
                format,
                output,
            };
            commands::run_summary(&aggregator, &queries, &options, &SystemClock, &cancel).await
        }
        Command::Releases { repo, per_page } => {
            let query = parse_query(&repo)?;
            commands::run_releases(
                &aggregator,
                &query,
                per_page.unwrap_or(config.per_page),
                &cancel,
            )
            .await
        }
    }
}

fn parse_query(repo: &str) -> Result<RepoQuery> {
    repo.parse::<RepoQuery>().map_err(|err| invalid_input(&err))
}

fn invalid_input(err: &crate::error::SummaryError) -> anyhow::Error {
    tracing::debug!(error = %err, "rejected repository query");
    anyhow::anyhow!("{} ({})", err.category().message(), err)
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
