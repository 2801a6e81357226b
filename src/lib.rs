// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Release download summary for GitHub repositories.

pub mod aggregate;
pub mod commands;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod github;
pub mod http;
pub mod link;
pub mod query;
pub mod release;
pub mod report;
