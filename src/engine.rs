// File: engine.rs
// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2025
// - Volker Schwaberow <volker@schwaberow.de>

use log::{error, info};

use crate::config::AppIds;
use crate::error::Failure;
use crate::getstate::GetState;
use crate::storage::{LastKnownState, MonthlyCounter, Nested};
use crate::stores::Storefront;

/// Everything one run reads and produces: the prior state it mutates plus the
/// per-run updates, failures and check tally.
#[derive(Debug, Clone, Default)]
pub struct RunContext {
    pub last_known: LastKnownState,
    pub counter: MonthlyCounter,
    pub updated: Nested<String>,
    pub failures: Vec<Failure>,
    pub stats: GetState,
}

impl RunContext {
    pub fn new(last_known: LastKnownState, counter: MonthlyCounter) -> Self {
        Self {
            last_known,
            counter,
            ..Default::default()
        }
    }

    pub fn has_updates(&self) -> bool {
        !self.updated.is_empty()
    }

    /// Stores `value` for `app`/`key` unless it is already the known value.
    /// A change (including the first sighting) bumps the monthly counter by
    /// one. Returns whether anything changed.
    pub fn record(&mut self, app: &str, key: &str, value: &str) -> bool {
        let known = self.last_known.get(app).and_then(|readings| readings.get(key));
        if known.map(String::as_str) == Some(value) {
            return false;
        }

        self.updated
            .entry(app.to_string())
            .or_default()
            .insert(key.to_string(), value.to_string());
        self.last_known
            .entry(app.to_string())
            .or_default()
            .insert(key.to_string(), value.to_string());
        *self
            .counter
            .entry(app.to_string())
            .or_default()
            .entry(key.to_string())
            .or_insert(0) += 1;
        true
    }
}

pub struct UpdateEngine {
    storefronts: Vec<Box<dyn Storefront>>,
    regions: Vec<String>,
}

impl UpdateEngine {
    pub fn new(storefronts: Vec<Box<dyn Storefront>>, regions: Vec<String>) -> Self {
        Self {
            storefronts,
            regions,
        }
    }

    pub fn regions(&self) -> &[String] {
        &self.regions
    }

    /// Checks every application in turn. A failed check is recorded and
    /// never stops the remaining ones.
    pub async fn run(&self, ctx: &mut RunContext, working_set: &[(String, AppIds)]) {
        ctx.stats.start();
        for (app, ids) in working_set {
            self.check_app(ctx, app, ids).await;
        }
        ctx.stats.finish();
    }

    pub async fn check_app(&self, ctx: &mut RunContext, app: &str, ids: &AppIds) {
        for store in &self.storefronts {
            let kind = store.kind();
            let Some(identifier) = kind.identifier(ids) else {
                continue;
            };

            let regions: Vec<Option<&str>> = if kind.is_regional() {
                self.regions.iter().map(|r| Some(r.as_str())).collect()
            } else {
                vec![None]
            };

            for region in regions {
                match store.check(identifier, region).await {
                    Ok(value) => {
                        info!("{}: {} - {}", kind.log_label(region), app, value);
                        ctx.stats.add_success();
                        if let Some(key) = kind.reading_key(region) {
                            ctx.record(app, &key, &value);
                        }
                    }
                    Err(e) => {
                        let failure = Failure::new(app, e);
                        error!("{}", failure);
                        ctx.stats.add_failure();
                        ctx.failures.push(failure);
                    }
                }
            }
        }
    }
}
