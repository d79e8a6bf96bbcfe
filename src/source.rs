// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDate, NaiveDateTime, TimeZone};
use csv::{ReaderBuilder, Trim};
use directories::ProjectDirs;
use once_cell::sync::Lazy;
use rust_decimal::Decimal;

use crate::error::SourceError;
use crate::models::ExpenseRecord;
use crate::period;

static APP: Lazy<(&str, &str, &str)> =
    Lazy::new(|| ("com.alphavelocity", "Spendlens", "spendlens"));

/// Anything that can hand out the current full list of expenses.
pub trait RecordSource {
    fn snapshot(&self) -> Result<Vec<ExpenseRecord>, SourceError>;
}

/// Records read from a `.csv` or `.json` file, dates in local time.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RecordSource for FileSource {
    fn snapshot(&self) -> Result<Vec<ExpenseRecord>, SourceError> {
        load_records(&self.path)
    }
}

#[derive(Debug, Clone, Default)]
pub struct MemorySource(pub Vec<ExpenseRecord>);

impl RecordSource for MemorySource {
    fn snapshot(&self) -> Result<Vec<ExpenseRecord>, SourceError> {
        Ok(self.0.clone())
    }
}

pub fn default_data_path() -> Result<PathBuf, SourceError> {
    let proj = ProjectDirs::from(APP.0, APP.1, APP.2).ok_or(SourceError::NoDataDir)?;
    Ok(proj.data_dir().join("records.csv"))
}

pub fn load_records(path: &Path) -> Result<Vec<ExpenseRecord>, SourceError> {
    load_records_in(path, &Local)
}

/// Like [`load_records`], reading date-only and wall-clock values in `tz`.
pub fn load_records_in<Tz: TimeZone>(
    path: &Path,
    tz: &Tz,
) -> Result<Vec<ExpenseRecord>, SourceError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();
    let open = || {
        File::open(path).map_err(|source| SourceError::Io {
            path: path.to_path_buf(),
            source,
        })
    };
    let records = match ext.as_str() {
        "csv" => read_csv(open()?, tz)?,
        "json" => read_json(open()?)?,
        _ => return Err(SourceError::UnsupportedFormat(path.display().to_string())),
    };
    tracing::info!(path = %path.display(), count = records.len(), "loaded expense snapshot");
    Ok(records)
}

/// Reads `id,date,amount,category_id,category,description` rows.
///
/// An empty `id` becomes the 1-based row number, an empty `category_id`
/// becomes 0 and an empty `category` leaves the record uncategorised.
pub fn read_csv<R: Read, Tz: TimeZone>(
    reader: R,
    tz: &Tz,
) -> Result<Vec<ExpenseRecord>, SourceError> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader);

    let mut out = Vec::new();
    for (idx, result) in rdr.records().enumerate() {
        let rec = result?;
        let line = rec.position().map(|p| p.line()).unwrap_or(idx as u64 + 2);
        let field = |i: usize| rec.get(i).filter(|s| !s.is_empty());

        let id = match field(0) {
            Some(raw) => parse_int(raw, line, "id")?,
            None => idx as i64 + 1,
        };
        let date_raw = field(1).ok_or(SourceError::MissingField {
            line,
            field: "date",
        })?;
        let timestamp_ms =
            parse_timestamp(date_raw, tz).ok_or_else(|| SourceError::InvalidDate {
                line,
                value: date_raw.to_string(),
            })?;
        let amount_raw = field(2).ok_or(SourceError::MissingField {
            line,
            field: "amount",
        })?;
        let amount = amount_raw
            .parse::<Decimal>()
            .map_err(|_| SourceError::InvalidAmount {
                line,
                value: amount_raw.to_string(),
            })?;
        let category_id = match field(3) {
            Some(raw) => parse_int(raw, line, "category_id")?,
            None => 0,
        };

        out.push(ExpenseRecord {
            id,
            amount,
            category_id,
            category_name: field(4).map(str::to_string),
            timestamp_ms,
            description: rec.get(5).unwrap_or("").to_string(),
        });
    }
    Ok(out)
}

pub fn read_json<R: Read>(reader: R) -> Result<Vec<ExpenseRecord>, SourceError> {
    Ok(serde_json::from_reader(BufReader::new(reader))?)
}

/// Epoch millis, a local `YYYY-MM-DD` (midnight) or a local
/// `YYYY-MM-DDTHH:MM:SS` / `YYYY-MM-DD HH:MM:SS`.
pub fn parse_timestamp<Tz: TimeZone>(raw: &str, tz: &Tz) -> Option<i64> {
    if let Ok(ms) = raw.parse::<i64>() {
        return Some(ms);
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(period::start_of_day_ms(tz, date));
    }
    ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .and_then(|naive| tz.from_local_datetime(&naive).earliest())
        .map(|dt| dt.timestamp_millis())
}

fn parse_int(raw: &str, line: u64, field: &'static str) -> Result<i64, SourceError> {
    raw.parse::<i64>().map_err(|_| SourceError::InvalidNumber {
        line,
        field,
        value: raw.to_string(),
    })
}
