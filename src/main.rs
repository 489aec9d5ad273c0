// File: main.rs
// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2023-2025
// - Volker Schwaberow <volker@schwaberow.de>

use anyhow::Result;
use clap::Parser;
use simple_logger::SimpleLogger;

use storewatch::cli::Cli;
use storewatch::commands;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.no_color {
        colored::control::set_override(false);
    }

    SimpleLogger::new().with_level(cli.level_filter()).init()?;

    let config = cli.load_config()?;
    commands::handle_check_command(&cli, &config).await
}
