// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP transport used to talk to the GitHub API.

use reqwest::header::{ACCEPT, AUTHORIZATION, LINK};
use std::{future::Future, time::Duration};
use thiserror::Error;

const USER_AGENT: &str = concat!("release-summary/", env!("CARGO_PKG_VERSION"));

/// The parts of an HTTP response the release fetcher looks at.
#[derive(Clone, Debug)]
pub struct TransportResponse {
    pub status: u16,
    /// Raw `Link` header, if the server sent one.
    pub link: Option<String>,
    pub body: String,
}

#[derive(Debug, Error)]
#[error("{0}")]
pub struct TransportError(pub String);

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        TransportError(err.to_string())
    }
}

/// Issues GET requests. Retries, timeouts and TLS are up to the implementation.
pub trait Transport: Send + Sync {
    fn get(
        &self,
        url: &str,
    ) -> impl Future<Output = Result<TransportResponse, TransportError>> + Send;
}

/// `reqwest`-backed transport with GitHub's recommended headers.
#[derive(Clone, Debug)]
pub struct ReqwestTransport {
    client: reqwest::Client,
    token: Option<String>,
}

impl ReqwestTransport {
    pub fn new(timeout: Duration, token: Option<String>) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()?;
        Ok(Self { client, token })
    }
}

impl Transport for ReqwestTransport {
    async fn get(&self, url: &str) -> Result<TransportResponse, TransportError> {
        let mut request = self
            .client
            .get(url)
            .header(ACCEPT, "application/vnd.github+json");
        if let Some(token) = &self.token {
            request = request.header(AUTHORIZATION, format!("Bearer {}", token));
        }

        let response = request.send().await?;
        let status = response.status().as_u16();
        let link = response
            .headers()
            .get(LINK)
            .and_then(|v| v.to_str().ok())
            .map(String::from);
        let body = response.text().await?;

        Ok(TransportResponse { status, link, body })
    }
}
