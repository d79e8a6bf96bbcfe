// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Errors raised while reading a record snapshot.
//!
//! The statistics and filter functions never fail; only the record source
//! around them does.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SourceError {
    #[error("Could not read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Csv(#[from] csv::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error("Line {line}: {field} missing")]
    MissingField { line: u64, field: &'static str },
    #[error("Line {line}: invalid date '{value}', expected YYYY-MM-DD, YYYY-MM-DDTHH:MM:SS or epoch millis")]
    InvalidDate { line: u64, value: String },
    #[error("Line {line}: invalid amount '{value}'")]
    InvalidAmount { line: u64, value: String },
    #[error("Line {line}: invalid {field} '{value}'")]
    InvalidNumber {
        line: u64,
        field: &'static str,
        value: String,
    },
    #[error("Unsupported record file '{0}' (use .csv or .json)")]
    UnsupportedFormat(String),
    #[error("Could not determine platform-specific data dir")]
    NoDataDir,
}
