// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use chrono::{NaiveDate, TimeZone};
use comfy_table::{presets::UTF8_FULL, Cell, Table};

use crate::models::DateRange;
use crate::period;

pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{}', expected YYYY-MM-DD", s))
}

/// Local midnight of a `YYYY-MM-DD` argument.
pub fn parse_date_ms<Tz: TimeZone>(s: &str, tz: &Tz) -> Result<i64> {
    Ok(period::start_of_day_ms(tz, parse_date(s)?))
}

/// `YYYY-MM-DD` of a timestamp in `tz`, or the raw millis when out of range.
pub fn fmt_day<Tz: TimeZone>(timestamp_ms: i64, tz: &Tz) -> String {
    period::local_date(tz, timestamp_ms)
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| timestamp_ms.to_string())
}

pub fn fmt_range<Tz: TimeZone>(range: &DateRange, tz: &Tz) -> String {
    format!("{} .. {}", fmt_day(range.start_ms, tz), fmt_day(range.end_ms, tz))
}

pub fn pretty_table(headers: &[&str], rows: Vec<Vec<String>>) -> Table {
    let mut t = Table::new();
    t.load_preset(UTF8_FULL);
    t.set_header(headers.iter().map(|h| Cell::new(*h)));
    for r in rows {
        t.add_row(r.into_iter().map(Cell::new));
    }
    t
}

pub fn maybe_print_json<T: serde::Serialize>(
    json_flag: bool,
    jsonl_flag: bool,
    v: &T,
) -> Result<bool> {
    if json_flag {
        println!("{}", serde_json::to_string_pretty(v)?);
        return Ok(true);
    }
    if jsonl_flag {
        // arrays stream one element per line
        let val = serde_json::to_value(v)?;
        if let Some(arr) = val.as_array() {
            for item in arr {
                println!("{}", serde_json::to_string(item)?);
            }
        } else {
            println!("{}", serde_json::to_string(&val)?);
        }
        return Ok(true);
    }
    Ok(false)
}
