// File: playstore.rs
// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2025
// - Volker Schwaberow <volker@schwaberow.de>

use futures::future::{BoxFuture, FutureExt};
use log::debug;
use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};
use std::collections::HashMap;

use super::{element_text, StoreKind, Storefront};
use crate::config::render_url;
use crate::error::FetchError;
use crate::http::Http;
use crate::normalize::normalize_date;

static ANY_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("*").expect("Failed to parse wildcard selector"));

// Label text on the details page -> key in the details map.
const DETAIL_LABELS: &[(&str, &str)] = &[("updated", "updated"), ("updated on", "updated")];

/// Marketplace metadata keyed by package id. The returned map may or may not
/// hold an `updated` entry.
pub trait DetailsLookup: Send + Sync {
    fn details<'a>(
        &'a self,
        package_id: &'a str,
    ) -> BoxFuture<'a, Result<HashMap<String, String>, FetchError>>;

    /// Where a human would look the package up.
    fn details_url(&self, package_id: &str) -> String;
}

/// Scrapes Google Play's public details page.
pub struct PlayStoreScraper {
    http: Http,
    url_template: String,
}

impl PlayStoreScraper {
    pub fn new(http: Http, url_template: &str) -> Self {
        Self {
            http,
            url_template: url_template.to_string(),
        }
    }

    async fn lookup(&self, package_id: &str) -> Result<HashMap<String, String>, FetchError> {
        let url = self.details_url(package_id);
        let page = self.http.get(&url).await?;
        if !page.success() {
            debug!("{} returned status {}", url, page.status());
            return Ok(HashMap::new());
        }
        Ok(parse_details(page.body()))
    }
}

impl DetailsLookup for PlayStoreScraper {
    fn details<'a>(
        &'a self,
        package_id: &'a str,
    ) -> BoxFuture<'a, Result<HashMap<String, String>, FetchError>> {
        self.lookup(package_id).boxed()
    }

    fn details_url(&self, package_id: &str) -> String {
        render_url(&self.url_template, package_id, None)
    }
}

/// Pulls labelled fields out of a details page. A field's value is the first
/// element sibling following the element whose own text is the label.
pub fn parse_details(html: &str) -> HashMap<String, String> {
    let document = Html::parse_document(html);
    let mut details = HashMap::new();

    for element in document.select(&ANY_SELECTOR) {
        let label = own_text(element).to_lowercase();
        let Some((_, key)) = DETAIL_LABELS.iter().find(|(text, _)| *text == label) else {
            continue;
        };
        if details.contains_key(*key) {
            continue;
        }
        let value = element
            .next_siblings()
            .find_map(ElementRef::wrap)
            .map(element_text)
            .unwrap_or_default();
        if !value.is_empty() {
            details.insert(key.to_string(), value);
        }
    }

    details
}

fn own_text(element: ElementRef<'_>) -> String {
    element
        .children()
        .filter_map(|child| child.value().as_text().map(|t| t.trim().to_string()))
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

pub struct PlayStore<L: DetailsLookup = PlayStoreScraper> {
    lookup: L,
}

impl<L: DetailsLookup> PlayStore<L> {
    pub fn new(lookup: L) -> Self {
        Self { lookup }
    }

    async fn fetch(&self, package_id: &str) -> Result<String, FetchError> {
        let details = self.lookup.details(package_id).await?;
        let url = self.lookup.details_url(package_id);
        let raw = details
            .get("updated")
            .ok_or(FetchError::NoResults { url: url.clone() })?;
        normalize_date(raw).map_err(|source| FetchError::Parse { url, source })
    }
}

impl<L: DetailsLookup> Storefront for PlayStore<L> {
    fn kind(&self) -> StoreKind {
        StoreKind::PlayStore
    }

    fn check<'a>(
        &'a self,
        identifier: &'a str,
        _region: Option<&'a str>,
    ) -> BoxFuture<'a, Result<String, FetchError>> {
        self.fetch(identifier).boxed()
    }
}
