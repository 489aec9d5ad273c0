// File: http.rs
// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2023
// - Volker Schwaberow <volker@schwaberow.de>

use crate::error::FetchError;
use crate::httpinner::HttpInner;
use log::debug;
use std::time::Duration;

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Plain GET client shared by both storefront fetchers.
#[derive(Debug, Clone)]
pub struct Http {
    client: reqwest::Client,
    timeout: Duration,
}

impl Http {
    pub fn new(timeout_secs: u64) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Http {
            client,
            timeout: Duration::from_secs(timeout_secs),
        })
    }

    /// Any status code is a successful fetch here; only transport problems
    /// (refused connection, timeout, unreadable body) are errors.
    pub async fn get(&self, url: &str) -> Result<HttpInner, FetchError> {
        debug!("GET {}", url);
        let response = self
            .client
            .get(url)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| FetchError::transport(url, e))?;

        let status = response.status().as_u16();
        let final_url = response.url().to_string();
        let body = response
            .text()
            .await
            .map_err(|e| FetchError::transport(url, e))?;

        debug!("{} answered {} ({} bytes)", final_url, status, body.len());
        Ok(HttpInner::new_with_all(body, status, final_url))
    }
}
