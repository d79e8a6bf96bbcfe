// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

use spendlens::config::Settings;
use spendlens::source::{FileSource, RecordSource};
use spendlens::{cli, commands};

fn main() -> Result<()> {
    let cli = cli::build_cli();
    let matches = cli.get_matches();
    let settings = Settings::from_matches(&matches)?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let load = || {
        let source = FileSource::new(&settings.data_file);
        source
            .snapshot()
            .with_context(|| format!("Load expenses from {}", source.path().display()))
    };

    match matches.subcommand() {
        Some(("stats", sub)) => commands::stats::handle(&load()?, &settings, sub)?,
        Some(("list", sub)) => commands::list::handle(&load()?, sub)?,
        Some(("dashboard", sub)) => commands::dashboard::handle(&load()?, &settings, sub)?,
        Some(("periods", sub)) => commands::periods::handle(sub)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
