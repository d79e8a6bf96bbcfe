// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use chrono::{DateTime, Local, TimeZone};
use serde::Serialize;

use crate::models::DateRange;
use crate::period::{self, Clock, Period, SystemClock};
use crate::utils::{fmt_range, maybe_print_json, pretty_table};

#[derive(Serialize)]
pub struct PeriodRow {
    pub period: Period,
    pub current: DateRange,
    pub previous: DateRange,
    pub days: u32,
}

pub fn handle(sub: &clap::ArgMatches) -> Result<()> {
    let now = SystemClock.now().with_timezone(&Local);
    let data = resolve_all(&now);
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|r| {
                vec![
                    r.period.to_string(),
                    fmt_range(&r.current, &Local),
                    fmt_range(&r.previous, &Local),
                    r.days.to_string(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Period", "Current", "Previous", "Days"], rows)
        );
    }
    Ok(())
}

pub fn resolve_all<Tz: TimeZone>(now: &DateTime<Tz>) -> Vec<PeriodRow> {
    Period::ALL
        .iter()
        .map(|&p| PeriodRow {
            period: p,
            current: period::resolve_range(p, now),
            previous: period::resolve_previous_range(p, now),
            days: p.day_count(now.date_naive()),
        })
        .collect()
}
