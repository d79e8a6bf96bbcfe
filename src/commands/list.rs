// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use chrono::{Local, TimeZone};

use crate::filter;
use crate::models::{ExpenseRecord, FilterSpec, SortKey};
use crate::utils::{fmt_day, maybe_print_json, parse_date_ms, pretty_table};

pub fn handle(records: &[ExpenseRecord], sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let data = query_rows(records, sub, &Local)?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|r| {
                vec![
                    fmt_day(r.timestamp_ms, &Local),
                    format!("{:.2}", r.amount),
                    r.category_label().to_string(),
                    r.description.clone(),
                    r.id.to_string(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Date", "Amount", "Category", "Description", "Id"], rows)
        );
    }
    Ok(())
}

pub fn filter_spec<Tz: TimeZone>(sub: &clap::ArgMatches, tz: &Tz) -> Result<FilterSpec> {
    let start_ms = sub
        .get_one::<String>("from")
        .map(|s| parse_date_ms(s, tz))
        .transpose()?;
    let end_ms = sub
        .get_one::<String>("to")
        .map(|s| parse_date_ms(s, tz))
        .transpose()?;
    let sort_key = match sub.get_one::<String>("sort") {
        Some(raw) => raw.parse::<SortKey>()?,
        None => SortKey::default(),
    };
    Ok(FilterSpec::cleared()
        .with_search(sub.get_one::<String>("search").cloned().unwrap_or_default())
        .with_category(sub.get_one::<String>("category").cloned())
        .with_date_range(start_ms, end_ms)
        .with_sort(sort_key))
}

pub fn query_rows<Tz: TimeZone>(
    records: &[ExpenseRecord],
    sub: &clap::ArgMatches,
    tz: &Tz,
) -> Result<Vec<ExpenseRecord>> {
    let spec = filter_spec(sub, tz)?;
    let mut rows = filter::apply(records, &spec, tz);
    if let Some(limit) = sub.get_one::<usize>("limit") {
        rows.truncate(*limit);
    }
    Ok(rows)
}
