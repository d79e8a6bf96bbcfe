// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::path::PathBuf;

use anyhow::Result;

use crate::source;
use crate::stats::{DEFAULT_RECENT, DEFAULT_TOP_N};

/// Log filter used when neither `RUST_LOG` nor `--log-level` is given.
pub const DEFAULT_LOG_LEVEL: &str = "warn";

/// Runtime settings, resolved from flags with `SPENDLENS_*` env fallbacks.
/// Unset values take the `DEFAULT_*` constants; the CLI declares no defaults.
#[derive(Debug, Clone)]
pub struct Settings {
    pub data_file: PathBuf,
    pub top_n: usize,
    pub recent: usize,
    pub log_level: String,
}

impl Settings {
    pub fn from_matches(m: &clap::ArgMatches) -> Result<Self> {
        let data_file = match m.get_one::<String>("file") {
            Some(p) => PathBuf::from(p.trim()),
            None => source::default_data_path()?,
        };
        Ok(Self {
            data_file,
            top_n: m.get_one::<usize>("top").copied().unwrap_or(DEFAULT_TOP_N),
            recent: m.get_one::<usize>("recent").copied().unwrap_or(DEFAULT_RECENT),
            log_level: m
                .get_one::<String>("log-level")
                .cloned()
                .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string()),
        })
    }
}
