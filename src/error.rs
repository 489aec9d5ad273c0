// File: error.rs
// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2025
// - Volker Schwaberow <volker@schwaberow.de>

use std::fmt;

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DateParseError {
    #[error("no date text left after removing non-ASCII characters")]
    Empty,

    #[error("unknown string format: {0}")]
    Unrecognized(String),
}

/// Why a single storefront check produced no reading.
///
/// Every variant carries the URL that was consulted so the failure listing
/// can point straight at the page.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("{url} - did not fetch any results.")]
    NoResults { url: String },

    #[error("{url} - Could not find the field containing the updated date.")]
    MissingDateField { url: String },

    #[error("{url} - Could not retrieve the date value!")]
    EmptyDateValue { url: String },

    #[error("{url} - Exception while trying to parse or decode the value: {source}")]
    Parse {
        url: String,
        #[source]
        source: DateParseError,
    },

    #[error("{url} - request failed: {reason}")]
    Transport { url: String, reason: String },
}

impl FetchError {
    pub fn url(&self) -> &str {
        match self {
            Self::NoResults { url }
            | Self::MissingDateField { url }
            | Self::EmptyDateValue { url }
            | Self::Parse { url, .. }
            | Self::Transport { url, .. } => url,
        }
    }

    pub fn transport(url: &str, error: reqwest::Error) -> Self {
        let reason = if error.is_timeout() {
            "timed out".to_string()
        } else {
            error.to_string()
        };
        Self::Transport {
            url: url.to_string(),
            reason,
        }
    }
}

/// A failed check, tagged with the application it belonged to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Failure {
    pub app: String,
    pub error: FetchError,
}

impl Failure {
    pub fn new(app: &str, error: FetchError) -> Self {
        Self {
            app: app.to_string(),
            error,
        }
    }
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "App={} - {}", self.app, self.error)
    }
}
