// File: mod.rs
// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2023-2025
// - Volker Schwaberow <volker@schwaberow.de>

pub mod appstore;
pub mod playstore;

use futures::future::BoxFuture;
use scraper::ElementRef;
use std::fmt;

use crate::config::{AppIds, Config};
use crate::error::FetchError;
use crate::http::Http;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StoreKind {
    PlayStore,
    AppStore,
}

impl StoreKind {
    /// The identifier this storefront looks an application up by.
    pub fn identifier<'a>(&self, ids: &'a AppIds) -> Option<&'a str> {
        match self {
            StoreKind::PlayStore => ids.play_store.as_deref(),
            StoreKind::AppStore => ids.app_store.as_deref(),
        }
    }

    /// Regional storefronts are checked once per configured region.
    pub fn is_regional(&self) -> bool {
        matches!(self, StoreKind::AppStore)
    }

    /// Key under which readings are stored: `play_store` or `app_store_<cc>`.
    /// A regional store has no key without a region.
    pub fn reading_key(&self, region: Option<&str>) -> Option<String> {
        match (self, region) {
            (StoreKind::PlayStore, _) => Some("play_store".to_string()),
            (StoreKind::AppStore, Some(cc)) => Some(format!("app_store_{}", cc)),
            (StoreKind::AppStore, None) => None,
        }
    }

    pub fn log_label(&self, region: Option<&str>) -> String {
        match (self, region) {
            (StoreKind::PlayStore, _) => "PLAY STORE".to_string(),
            (StoreKind::AppStore, Some(cc)) => format!("APP STORE-{}", cc.to_uppercase()),
            (StoreKind::AppStore, None) => "APP STORE".to_string(),
        }
    }
}

impl fmt::Display for StoreKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreKind::PlayStore => write!(f, "Google PlayStore"),
            StoreKind::AppStore => write!(f, "Apple iTunes"),
        }
    }
}

/// One storefront: given an identifier (and region, for regional stores),
/// produce the normalized last-updated date.
pub trait Storefront: Send + Sync {
    fn kind(&self) -> StoreKind;

    fn check<'a>(
        &'a self,
        identifier: &'a str,
        region: Option<&'a str>,
    ) -> BoxFuture<'a, Result<String, FetchError>>;
}

/// The production pair of storefronts, wired to the real marketplaces.
pub fn default_storefronts(config: &Config, http: &Http) -> Vec<Box<dyn Storefront>> {
    vec![
        Box::new(playstore::PlayStore::new(playstore::PlayStoreScraper::new(
            http.clone(),
            config.play_store_url(),
        ))),
        Box::new(appstore::AppStore::new(http.clone(), config.app_store_url())),
    ]
}

/// Text content of an element with runs of whitespace collapsed.
pub(crate) fn element_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .collect::<Vec<_>>()
        .join(" ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}
