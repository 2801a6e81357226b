// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Validated repository queries.

use crate::error::SummaryError;
use serde::Serialize;
use std::{fmt, str::FromStr};

/// An `owner/name` pair that has passed validation.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct RepoQuery {
    owner: String,
    name: String,
}

impl RepoQuery {
    pub fn new(owner: &str, name: &str) -> Result<Self, SummaryError> {
        let owner = owner.trim();
        let name = name.trim();
        if owner.is_empty() {
            return Err(SummaryError::InvalidQuery(
                "repository owner is empty".to_string(),
            ));
        }
        if name.is_empty() {
            return Err(SummaryError::InvalidQuery(
                "repository name is empty".to_string(),
            ));
        }
        if let Some(bad) = [owner, name]
            .into_iter()
            .find(|part| part.contains(['/', '?', '#']))
        {
            return Err(SummaryError::InvalidQuery(format!(
                "'{}' contains a character not allowed in an owner or repository name",
                bad
            )));
        }
        Ok(Self {
            owner: owner.to_string(),
            name: name.to_string(),
        })
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The repository's release page on github.com.
    pub fn releases_url(&self) -> String {
        format!("https://github.com/{}/{}/releases", self.owner, self.name)
    }
}

impl FromStr for RepoQuery {
    type Err = SummaryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().split_once('/') {
            Some((owner, name)) if !name.contains('/') => Self::new(owner, name),
            _ => Err(SummaryError::InvalidQuery(format!(
                "expected OWNER/NAME, got '{}'",
                s
            ))),
        }
    }
}

impl fmt::Display for RepoQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}
