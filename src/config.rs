// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2023-2025
// - Volker Schwaberow <volker@schwaberow.de>

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

pub const DEFAULT_PLAY_STORE_URL: &str = "https://play.google.com/store/apps/details?id={id}";
pub const DEFAULT_APP_STORE_URL: &str = "http://itunes.apple.com/{cc}/app/{id}?mt=8";

/// Storefront identifiers of one application.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppIds {
    #[serde(default)]
    pub play_store: Option<String>,
    #[serde(default)]
    pub app_store: Option<String>,
}

impl AppIds {
    pub fn new(play_store: Option<&str>, app_store: Option<&str>) -> Self {
        Self {
            play_store: play_store.map(str::to_string),
            app_store: app_store.map(str::to_string),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    apps: BTreeMap<String, AppIds>,
    regions: Vec<String>,
    play_store_url: String,
    app_store_url: String,
    data_store: PathBuf,
    count_tracker: PathBuf,
    timeout: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

impl Config {
    pub fn new() -> Self {
        Self {
            apps: default_catalog(),
            regions: vec!["in".to_string(), "us".to_string()],
            play_store_url: DEFAULT_PLAY_STORE_URL.to_string(),
            app_store_url: DEFAULT_APP_STORE_URL.to_string(),
            data_store: PathBuf::from("data/apps_last_updated.json"),
            count_tracker: PathBuf::from("data/updates_counter.json"),
            timeout: 10,
        }
    }

    /// Reads a TOML file; any key it leaves out keeps its built-in default.
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_toml(&text)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    pub fn from_toml(text: &str) -> Result<Self> {
        let config: Config = toml::from_str(text)?;
        Ok(config)
    }

    pub fn apps(&self) -> &BTreeMap<String, AppIds> {
        &self.apps
    }

    pub fn set_apps(&mut self, apps: BTreeMap<String, AppIds>) {
        self.apps = apps;
    }

    pub fn app(&self, name: &str) -> Option<&AppIds> {
        self.apps.get(name)
    }

    pub fn regions(&self) -> &[String] {
        &self.regions
    }

    pub fn set_regions(&mut self, regions: Vec<String>) {
        self.regions = regions;
    }

    pub fn play_store_url(&self) -> &str {
        &self.play_store_url
    }

    pub fn set_play_store_url(&mut self, template: &str) {
        self.play_store_url = template.to_string();
    }

    pub fn app_store_url(&self) -> &str {
        &self.app_store_url
    }

    pub fn set_app_store_url(&mut self, template: &str) {
        self.app_store_url = template.to_string();
    }

    pub fn data_store(&self) -> &Path {
        &self.data_store
    }

    pub fn set_data_store(&mut self, path: PathBuf) {
        self.data_store = path;
    }

    pub fn count_tracker(&self) -> &Path {
        &self.count_tracker
    }

    pub fn set_count_tracker(&mut self, path: PathBuf) {
        self.count_tracker = path;
    }

    pub fn timeout(&self) -> u64 {
        self.timeout
    }

    pub fn set_timeout(&mut self, timeout: u64) {
        self.timeout = timeout;
    }

    /// Either the one named application or the whole catalog.
    pub fn working_set(&self, only: Option<&str>) -> Result<Vec<(String, AppIds)>> {
        match only {
            Some(name) => {
                let ids = self.app(name).with_context(|| {
                    format!(
                        "Unknown application '{}'. Known applications: {}",
                        name,
                        self.apps.keys().cloned().collect::<Vec<_>>().join(", ")
                    )
                })?;
                Ok(vec![(name.to_string(), ids.clone())])
            }
            None => Ok(self
                .apps
                .iter()
                .map(|(name, ids)| (name.clone(), ids.clone()))
                .collect()),
        }
    }
}

/// Expands `{id}` and `{cc}` placeholders of a storefront URL template.
pub fn render_url(template: &str, id: &str, region: Option<&str>) -> String {
    let url = template.replace("{id}", id);
    match region {
        Some(cc) => url.replace("{cc}", cc),
        None => url,
    }
}

fn default_catalog() -> BTreeMap<String, AppIds> {
    [
        ("youtube", "com.google.android.youtube&hl=en_IN", "id544007664"),
        ("facebook", "com.facebook.katana&hl=en_IN", "id284882215"),
        ("instagram", "com.instagram.android&hl=en_IN", "id389801252"),
        ("whatsapp", "com.whatsapp&hl=en_IN", "id310633997"),
        ("skype", "com.skype.raider&hl=en_IN", "id304878510"),
        ("google-maps", "com.google.android.apps.maps&hl=en_IN", "id585027354"),
        ("gmail", "com.google.android.gm&hl=en_IN", "id422689480"),
        ("netflix", "com.netflix.mediaclient&hl=en_IN", "id363590051"),
        ("amazon-prime-music", "com.amazon.mp3&hl=en_IN", "id510855668"),
        ("amazon-prime-video", "com.amazon.avod.thirdpartyclient&hl=en_IN", "id545519333"),
        ("tiktok", "com.zhiliaoapp.musically", "id835599320"),
        ("twitter", "com.twitter.android&hl=en_IN", "id333903271"),
        ("amazon", "com.amazon.avod.thirdpartyclient&hl=en_IN", "id545519333"),
        ("pubg", "com.tencent.ig&hl=en_IN", "id1330123889"),
    ]
    .into_iter()
    .map(|(name, play, apple)| (name.to_string(), AppIds::new(Some(play), Some(apple))))
    .collect()
}
