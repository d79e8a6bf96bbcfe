// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use chrono::Local;

use crate::config::Settings;
use crate::models::ExpenseRecord;
use crate::period::{Clock, SystemClock};
use crate::utils::{fmt_day, fmt_range, maybe_print_json, pretty_table};

pub fn handle(
    records: &[ExpenseRecord],
    settings: &Settings,
    sub: &clap::ArgMatches,
) -> Result<()> {
    let now = SystemClock.now().with_timezone(&Local);
    let summary = crate::stats::dashboard(records, &now, settings.recent);
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &summary)? {
        return Ok(());
    }

    println!(
        "{}: {:.2} over {} expenses",
        fmt_range(&summary.month, &Local),
        summary.total_spent,
        summary.expense_count
    );
    let breakdown: Vec<Vec<String>> = summary
        .category_breakdown
        .iter()
        .map(|c| vec![c.category_name.clone(), format!("{:.2}", c.amount)])
        .collect();
    println!("{}", pretty_table(&["Category", "Spent"], breakdown));

    let recent: Vec<Vec<String>> = summary
        .recent
        .iter()
        .map(|r| {
            vec![
                fmt_day(r.timestamp_ms, &Local),
                format!("{:.2}", r.amount),
                r.category_label().to_string(),
                r.description.clone(),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(&["Date", "Amount", "Category", "Description"], recent)
    );
    Ok(())
}
