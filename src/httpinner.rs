// File: httpinner.rs
// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2023
// - Volker Schwaberow <volker@schwaberow.de>

/// Snapshot of one fetched storefront page.
#[derive(Debug, Clone, Default)]
pub struct HttpInner {
    body: String,
    status: u16,
    url: String,
}

impl HttpInner {
    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn status(&self) -> u16 {
        self.status
    }

    pub fn success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn new() -> Self {
        Self::default()
    }

    pub fn new_with_all(body: String, status: u16, url: String) -> Self {
        HttpInner { body, status, url }
    }
}
