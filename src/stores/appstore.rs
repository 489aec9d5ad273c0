// File: appstore.rs
// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2025
// - Volker Schwaberow <volker@schwaberow.de>

use futures::future::{BoxFuture, FutureExt};
use log::debug;
use once_cell::sync::Lazy;
use scraper::{Html, Selector};

use super::{element_text, StoreKind, Storefront};
use crate::config::render_url;
use crate::error::FetchError;
use crate::http::Http;
use crate::normalize::normalize_date;

static TIME_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("time").expect("Failed to parse time selector"));

/// Apple's regional detail page; the first `<time>` carries the last
/// release date.
pub struct AppStore {
    http: Http,
    url_template: String,
}

impl AppStore {
    pub fn new(http: Http, url_template: &str) -> Self {
        Self {
            http,
            url_template: url_template.to_string(),
        }
    }

    async fn fetch(&self, identifier: &str, region: Option<&str>) -> Result<String, FetchError> {
        let url = render_url(&self.url_template, identifier, region);
        let page = self.http.get(&url).await?;
        if !page.success() {
            debug!("{} returned status {}", url, page.status());
            return Err(FetchError::NoResults { url });
        }
        extract_updated_date(page.body(), &url)
    }
}

impl Storefront for AppStore {
    fn kind(&self) -> StoreKind {
        StoreKind::AppStore
    }

    fn check<'a>(
        &'a self,
        identifier: &'a str,
        region: Option<&'a str>,
    ) -> BoxFuture<'a, Result<String, FetchError>> {
        self.fetch(identifier, region).boxed()
    }
}

pub fn extract_updated_date(html: &str, url: &str) -> Result<String, FetchError> {
    let document = Html::parse_document(html);
    let time = document
        .select(&TIME_SELECTOR)
        .next()
        .ok_or_else(|| FetchError::MissingDateField {
            url: url.to_string(),
        })?;

    let text = element_text(time);
    if text.is_empty() {
        return Err(FetchError::EmptyDateValue {
            url: url.to_string(),
        });
    }

    normalize_date(&text).map_err(|source| FetchError::Parse {
        url: url.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DateParseError;

    const URL: &str = "http://itunes.apple.com/in/app/id1?mt=8";

    #[test]
    fn test_first_time_element_wins() {
        let html = r#"<html><body>
            <div class="version-history">
                <time datetime="2021-03-03T00:00:00.000Z" aria-label="March 3, 2021">Mar 3, 2021</time>
                <time datetime="2021-01-01T00:00:00.000Z">Jan 1, 2021</time>
            </div></body></html>"#;
        assert_eq!(extract_updated_date(html, URL).unwrap(), "3/3/2021");
    }

    #[test]
    fn test_encoded_characters_are_tolerated() {
        let html = "<html><body><time>\u{200f}03\u{a0}Mar\u{a0}2021</time></body></html>";
        assert_eq!(extract_updated_date(html, URL).unwrap(), "3/3/2021");
    }

    #[test]
    fn test_missing_time_element() {
        let html = "<html><body><p>No release notes</p></body></html>";
        assert_eq!(
            extract_updated_date(html, URL),
            Err(FetchError::MissingDateField {
                url: URL.to_string()
            })
        );
    }

    #[test]
    fn test_empty_time_element() {
        let html = "<html><body><time datetime=\"2021-03-03\"></time></body></html>";
        assert_eq!(
            extract_updated_date(html, URL),
            Err(FetchError::EmptyDateValue {
                url: URL.to_string()
            })
        );
    }

    #[test]
    fn test_unparseable_time_element() {
        let html = "<html><body><time>yesterday-ish</time></body></html>";
        match extract_updated_date(html, URL) {
            Err(FetchError::Parse { url, source }) => {
                assert_eq!(url, URL);
                assert_eq!(source, DateParseError::Unrecognized("yesterday-ish".into()));
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }
}
