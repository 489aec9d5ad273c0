// File: common/mod.rs
// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2025
// - Volker Schwaberow <volker@schwaberow.de>

#![allow(dead_code)]

use std::collections::BTreeMap;
use storewatch::config::{AppIds, Config};
use tempfile::TempDir;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub fn create_html_response(content: &str) -> ResponseTemplate {
    ResponseTemplate::new(200)
        .set_body_string(content)
        .append_header("content-type", "text/html")
}

pub fn play_store_page(updated: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head><title>Test App - Apps on Google Play</title></head>
<body>
    <h1 itemprop="name"><span>Test App</span></h1>
    <div class="hAyfc"><div class="BgcNfc">Updated</div>
        <span class="htlgb"><div class="IQ1z0d"><span class="htlgb">{}</span></div></span>
    </div>
</body>
</html>"#,
        updated
    )
}

pub fn app_store_page(time_text: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head><title>Test App on the App Store</title></head>
<body>
    <section class="whats-new">
        <time data-test-we-datetime datetime="2021-03-03T00:00:00.000Z" aria-label="March 3, 2021">{}</time>
    </section>
</body>
</html>"#,
        time_text
    )
}

pub async fn mount_play_store(server: &MockServer, package: &str, status: u16, body: String) {
    Mock::given(method("GET"))
        .and(path("/store/apps/details"))
        .and(query_param("id", package))
        .respond_with(
            ResponseTemplate::new(status)
                .set_body_string(body)
                .append_header("content-type", "text/html"),
        )
        .mount(server)
        .await;
}

pub async fn mount_app_store(server: &MockServer, region: &str, id: &str, status: u16, body: String) {
    Mock::given(method("GET"))
        .and(path(format!("/{}/app/{}", region, id)))
        .respond_with(
            ResponseTemplate::new(status)
                .set_body_string(body)
                .append_header("content-type", "text/html"),
        )
        .mount(server)
        .await;
}

/// Config pointing both storefronts at `server` and the state documents
/// into `dir`.
pub fn test_config(server: &MockServer, dir: &TempDir, apps: &[(&str, Option<&str>, Option<&str>)]) -> Config {
    let mut config = Config::new();
    config.set_play_store_url(&format!("{}/store/apps/details?id={{id}}", server.uri()));
    config.set_app_store_url(&format!("{}/{{cc}}/app/{{id}}?mt=8", server.uri()));
    config.set_regions(vec!["in".to_string(), "us".to_string()]);
    config.set_data_store(dir.path().join("data/apps_last_updated.json"));
    config.set_count_tracker(dir.path().join("data/updates_counter.json"));
    config.set_timeout(5);

    let catalog: BTreeMap<String, AppIds> = apps
        .iter()
        .map(|(name, play, apple)| (name.to_string(), AppIds::new(*play, *apple)))
        .collect();
    config.set_apps(catalog);
    config
}
