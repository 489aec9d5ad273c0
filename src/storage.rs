// File: storage.rs
// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2023-2025
// - Volker Schwaberow <volker@schwaberow.de>

use anyhow::{Context, Result};
use chrono::{Datelike, NaiveDate};
use log::{debug, info};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// app -> reading key -> value
pub type Nested<T> = BTreeMap<String, BTreeMap<String, T>>;

/// Last normalized date seen per app and reading key.
pub type LastKnownState = Nested<String>;

/// Updates observed per app and reading key since the last reset.
pub type MonthlyCounter = Nested<u32>;

#[derive(Debug, Clone)]
pub struct StateStore {
    data_store: PathBuf,
    count_tracker: PathBuf,
}

impl StateStore {
    pub fn new(data_store: impl Into<PathBuf>, count_tracker: impl Into<PathBuf>) -> Self {
        Self {
            data_store: data_store.into(),
            count_tracker: count_tracker.into(),
        }
    }

    pub fn data_store(&self) -> &Path {
        &self.data_store
    }

    pub fn count_tracker(&self) -> &Path {
        &self.count_tracker
    }

    /// Missing documents load as empty state; unreadable or malformed ones
    /// are errors.
    pub fn load(&self) -> Result<(LastKnownState, MonthlyCounter)> {
        let last_known = load_document(&self.data_store)?;
        let counter = load_document(&self.count_tracker)?;
        Ok((last_known, counter))
    }

    pub fn save(&self, last_known: &LastKnownState, counter: &MonthlyCounter) -> Result<()> {
        save_document(&self.data_store, last_known)?;
        save_document(&self.count_tracker, counter)?;
        info!(
            "Saved state to {} and {}",
            self.data_store.display(),
            self.count_tracker.display()
        );
        Ok(())
    }

    /// Deletes the counter document on the last day of the month so the next
    /// run counts from zero. Returns whether a reset happened.
    pub fn rollover(&self, today: NaiveDate) -> Result<bool> {
        if !is_last_day_of_month(today) {
            return Ok(false);
        }
        match std::fs::remove_file(&self.count_tracker) {
            Ok(()) => {
                info!(
                    "Last day of the month, removed {}",
                    self.count_tracker.display()
                );
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("No counter document to reset at {}", self.count_tracker.display());
            }
            Err(e) => {
                return Err(e).with_context(|| {
                    format!("Failed to remove {}", self.count_tracker.display())
                })
            }
        }
        Ok(true)
    }
}

pub fn is_last_day_of_month(date: NaiveDate) -> bool {
    date.succ_opt()
        .map_or(true, |next| next.month() != date.month())
}

fn load_document<T: DeserializeOwned>(path: &Path) -> Result<Nested<T>> {
    if !path.exists() {
        debug!("{} does not exist yet, starting empty", path.display());
        return Ok(BTreeMap::new());
    }
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let document = serde_json::from_str(&text)
        .with_context(|| format!("Failed to parse {}", path.display()))?;
    debug!("Loaded {}", path.display());
    Ok(document)
}

fn save_document<T: Serialize>(path: &Path, document: &Nested<T>) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }
    let json = serde_json::to_string_pretty(document)
        .with_context(|| format!("Failed to serialize {}", path.display()))?;
    std::fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn store_in(dir: &TempDir) -> StateStore {
        StateStore::new(
            dir.path().join("data/apps_last_updated.json"),
            dir.path().join("data/updates_counter.json"),
        )
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_missing_documents_load_empty() {
        let dir = TempDir::new().unwrap();
        let (last_known, counter) = store_in(&dir).load().unwrap();
        assert!(last_known.is_empty());
        assert!(counter.is_empty());
    }

    #[test]
    fn test_save_then_load_round_trips() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        let mut last_known = LastKnownState::new();
        last_known
            .entry("youtube".to_string())
            .or_default()
            .insert("play_store".to_string(), "3/3/2021".to_string());
        last_known
            .entry("youtube".to_string())
            .or_default()
            .insert("app_store_in".to_string(), "2/3/2021".to_string());
        let mut counter = MonthlyCounter::new();
        counter
            .entry("youtube".to_string())
            .or_default()
            .insert("play_store".to_string(), 2);

        store.save(&last_known, &counter).unwrap();
        let (loaded_known, loaded_counter) = store.load().unwrap();

        assert_eq!(loaded_known, last_known);
        assert_eq!(loaded_counter, counter);
    }

    #[test]
    fn test_loads_documents_written_elsewhere() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        std::fs::create_dir_all(dir.path().join("data")).unwrap();
        std::fs::write(
            store.data_store(),
            r#"{"app": {"play_store": "3/3/2021", "app_store_us": "1/3/2021"}}"#,
        )
        .unwrap();
        std::fs::write(store.count_tracker(), r#"{"app": {"play_store": 1}}"#).unwrap();

        let (last_known, counter) = store.load().unwrap();
        assert_eq!(last_known["app"]["app_store_us"], "1/3/2021");
        assert_eq!(counter["app"]["play_store"], 1);
    }

    #[test]
    fn test_malformed_document_is_an_error() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        std::fs::create_dir_all(dir.path().join("data")).unwrap();
        std::fs::write(store.data_store(), "{\"app\": \"flat\"}").unwrap();

        assert!(store.load().is_err());
    }

    #[test]
    fn test_is_last_day_of_month() {
        assert!(is_last_day_of_month(date(2024, 1, 31)));
        assert!(is_last_day_of_month(date(2024, 2, 29)));
        assert!(!is_last_day_of_month(date(2023, 2, 28) - chrono::Duration::days(1)));
        assert!(is_last_day_of_month(date(2023, 2, 28)));
        assert!(is_last_day_of_month(date(2024, 12, 31)));
        assert!(!is_last_day_of_month(date(2024, 4, 30) - chrono::Duration::days(1)));
        assert!(!is_last_day_of_month(date(2024, 2, 28)));
    }

    #[test]
    fn test_rollover_on_last_day_removes_counter() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        let mut counter = MonthlyCounter::new();
        counter
            .entry("app".to_string())
            .or_default()
            .insert("play_store".to_string(), 5);
        store.save(&LastKnownState::new(), &counter).unwrap();

        assert!(store.rollover(date(2024, 6, 30)).unwrap());
        assert!(!store.count_tracker().exists());
        assert!(store.data_store().exists());
    }

    #[test]
    fn test_rollover_mid_month_keeps_counter() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        store
            .save(&LastKnownState::new(), &MonthlyCounter::new())
            .unwrap();

        assert!(!store.rollover(date(2024, 6, 15)).unwrap());
        assert!(store.count_tracker().exists());
    }

    #[test]
    fn test_rollover_without_counter_document() {
        let dir = TempDir::new().unwrap();
        assert!(store_in(&dir).rollover(date(2024, 6, 30)).unwrap());
    }
}
