// File: cli.rs
// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2023-2025
// - Volker Schwaberow <volker@schwaberow.de>

use anyhow::Result;
use clap::Parser;
use log::LevelFilter;
use std::path::PathBuf;

use crate::config::Config;

#[derive(Parser, Debug)]
#[command(
    name = env!("CARGO_PKG_NAME"),
    version = env!("CARGO_PKG_VERSION"),
    author = env!("CARGO_PKG_AUTHORS"),
    about = env!("CARGO_PKG_DESCRIPTION"),
)]
pub struct Cli {
    #[arg(
        short = 'a',
        long = "app",
        help = "Check updates for a specific application"
    )]
    pub app: Option<String>,

    #[arg(short = 'c', long = "config", help = "TOML configuration file")]
    pub config: Option<PathBuf>,

    #[arg(
        short = 't',
        long = "timeout",
        help = "HTTP request timeout in seconds"
    )]
    pub timeout: Option<u64>,

    #[arg(long = "log-level", default_value = "info")]
    pub log_level: String,

    #[arg(long = "no-color", help = "Disable colored output")]
    pub no_color: bool,
}

impl Cli {
    /// Built-in defaults, then the config file, then command line overrides.
    pub fn load_config(&self) -> Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::from_file(path)?,
            None => Config::new(),
        };
        if let Some(timeout) = self.timeout {
            config.set_timeout(timeout);
        }
        Ok(config)
    }

    pub fn level_filter(&self) -> LevelFilter {
        self.log_level.parse().unwrap_or(LevelFilter::Info)
    }
}
