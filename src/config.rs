// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration for release summaries.

use crate::{
    github::{DEFAULT_MAX_PAGES, GITHUB_API_BASE},
    query::RepoQuery,
};
use anyhow::{Context, Result};
use camino::Utf8Path;
use serde::{Deserialize, Serialize};
use std::{fs, time::Duration};

pub const DEFAULT_PER_PAGE: u32 = 50;

#[derive(Debug, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub api_base: String,
    pub per_page: u32,
    pub max_pages: usize,
    pub timeout_secs: u64,
    /// Environment variable holding an optional GitHub token.
    pub token_env: String,
    pub repo: Vec<RepoSource>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct RepoSource {
    pub owner: String,
    pub name: String,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: &Utf8Path) -> Result<Self> {
        let content = fs::read_to_string(path.as_std_path())
            .with_context(|| format!("failed to read config file at {}", path))?;

        Self::parse(&content).with_context(|| format!("failed to parse config file at {}", path))
    }

    /// Load configuration from `path`, falling back to defaults if the file doesn't exist.
    pub fn load_or_default(path: &Utf8Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            tracing::debug!("no config file at {}, using defaults", path);
            Ok(Self::default())
        }
    }

    fn parse(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        anyhow::ensure!(config.per_page > 0, "per_page must be greater than zero");
        anyhow::ensure!(config.max_pages > 0, "max_pages must be greater than zero");
        Ok(config)
    }

    /// Get all configured repositories, validated.
    pub fn repo_queries(&self) -> Result<Vec<RepoQuery>> {
        self.repo
            .iter()
            .map(|r| {
                RepoQuery::new(&r.owner, &r.name)
                    .with_context(|| format!("invalid repository in config: {:?}", r))
            })
            .collect()
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Read the token from the configured environment variable, ignoring empty values.
    pub fn token(&self) -> Option<String> {
        std::env::var(&self.token_env)
            .ok()
            .filter(|token| !token.trim().is_empty())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base: GITHUB_API_BASE.to_string(),
            per_page: DEFAULT_PER_PAGE,
            max_pages: DEFAULT_MAX_PAGES,
            timeout_secs: 30,
            token_env: "GITHUB_TOKEN".to_string(),
            repo: Vec::new(),
        }
    }
}
