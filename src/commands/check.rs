// File: check.rs
// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2025
// - Volker Schwaberow <volker@schwaberow.de>

use anyhow::Result;
use chrono::{Local, NaiveDate};
use log::info;

use super::{print_info, print_success, print_warning};
use crate::cli::Cli;
use crate::config::{AppIds, Config};
use crate::engine::{RunContext, UpdateEngine};
use crate::http::Http;
use crate::report::render_report;
use crate::storage::StateStore;
use crate::stores::default_storefronts;

/// What persisting a finished run did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Persisted {
    pub saved: bool,
    pub counter_reset: bool,
}

pub struct Runner {
    store: StateStore,
    engine: UpdateEngine,
}

impl Runner {
    pub fn new(config: &Config) -> Result<Self> {
        let http = Http::new(config.timeout())?;
        let engine = UpdateEngine::new(
            default_storefronts(config, &http),
            config.regions().to_vec(),
        );
        Ok(Self::with_engine(
            StateStore::new(config.data_store(), config.count_tracker()),
            engine,
        ))
    }

    pub fn with_engine(store: StateStore, engine: UpdateEngine) -> Self {
        Self { store, engine }
    }

    pub fn store(&self) -> &StateStore {
        &self.store
    }

    pub fn regions(&self) -> &[String] {
        self.engine.regions()
    }

    /// Loads the stored state and checks every application of the working
    /// set against it.
    pub async fn check(&self, working_set: &[(String, AppIds)]) -> Result<RunContext> {
        let (last_known, counter) = self.store.load()?;
        let mut ctx = RunContext::new(last_known, counter);
        self.engine.run(&mut ctx, working_set).await;
        Ok(ctx)
    }

    /// Saves both documents when anything changed, then applies the
    /// month-end counter reset.
    pub fn persist(&self, ctx: &RunContext, today: NaiveDate) -> Result<Persisted> {
        let saved = if ctx.has_updates() {
            self.store.save(&ctx.last_known, &ctx.counter)?;
            true
        } else {
            false
        };
        let counter_reset = self.store.rollover(today)?;
        Ok(Persisted {
            saved,
            counter_reset,
        })
    }
}

pub async fn execute(cli: &Cli, config: &Config) -> Result<()> {
    if let Some(ref app) = cli.app {
        info!("Checking updates only for the application: {}", app);
    }
    let working_set = config.working_set(cli.app.as_deref())?;
    print_info(&format!("Checking {} application(s)", working_set.len()));

    let runner = Runner::new(config)?;
    let ctx = runner.check(&working_set).await?;

    print!("{}", render_report(&ctx, runner.regions()));

    let persisted = runner.persist(&ctx, Local::now().date_naive())?;
    if persisted.saved {
        print_success(&format!(
            "State saved to {}",
            runner.store().data_store().display()
        ));
    }
    if persisted.counter_reset {
        print_warning("Last day of the month, monthly update counter reset");
    }
    print_info(&ctx.stats.summary_line());

    Ok(())
}
