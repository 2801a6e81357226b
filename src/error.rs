// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for release fetching and summarizing.

use thiserror::Error;

/// Errors produced while validating a query or fetching releases.
#[derive(Debug, Error)]
pub enum SummaryError {
    #[error("invalid query: {0}")]
    InvalidQuery(String),

    #[error("failed to fetch {url}: {message}")]
    Fetch { url: String, message: String },

    #[error("malformed pagination metadata: {0}")]
    Parse(String),

    #[error("gave up after {max_pages} pages of releases")]
    PageLimitExceeded { max_pages: usize },

    #[error("release fetch was cancelled")]
    Cancelled,
}

/// The coarse category shown to the user for a failed query.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum FailureCategory {
    InvalidInput,
    NoData,
    Error,
}

impl FailureCategory {
    pub fn message(self) -> &'static str {
        match self {
            FailureCategory::InvalidInput => "Invalid owner and/or repository name.",
            FailureCategory::NoData => {
                "Couldn't get any release data for the provided repository."
            }
            FailureCategory::Error => "Couldn't get any data, an error occurred.",
        }
    }
}

impl SummaryError {
    pub fn category(&self) -> FailureCategory {
        match self {
            SummaryError::InvalidQuery(_) => FailureCategory::InvalidInput,
            SummaryError::Fetch { .. }
            | SummaryError::Parse(_)
            | SummaryError::PageLimitExceeded { .. }
            | SummaryError::Cancelled => FailureCategory::Error,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_categories() {
        assert_eq!(
            SummaryError::InvalidQuery("owner is empty".to_string()).category(),
            FailureCategory::InvalidInput
        );
        assert_eq!(
            SummaryError::Parse("bad link".to_string()).category(),
            FailureCategory::Error
        );
        assert_eq!(SummaryError::Cancelled.category(), FailureCategory::Error);
    }
}
