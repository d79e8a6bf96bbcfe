// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use chrono::{DateTime, Local, TimeZone};

use crate::config::Settings;
use crate::models::{ExpenseRecord, StatisticsResult};
use crate::period::{Clock, Period, SystemClock};
use crate::utils::{fmt_range, maybe_print_json, pretty_table};

pub fn handle(
    records: &[ExpenseRecord],
    settings: &Settings,
    sub: &clap::ArgMatches,
) -> Result<()> {
    let now = SystemClock.now().with_timezone(&Local);
    let (period, result) = compute(records, settings, sub, &now)?;
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &result)? {
        return Ok(());
    }

    let c = &result.comparison;
    let summary = vec![
        vec!["Period".into(), period.to_string()],
        vec!["Range".into(), fmt_range(&result.range, &Local)],
        vec!["Total".into(), format!("{:.2}", result.total_spent)],
        vec!["Expenses".into(), result.expense_count.to_string()],
        vec!["Average/day".into(), format!("{:.2}", result.average_per_day)],
        vec!["Previous".into(), format!("{:.2}", c.previous_amount)],
        vec!["Difference".into(), format!("{:.2}", c.difference)],
        vec!["Change %".into(), format!("{:.1}", c.percentage_change)],
    ];
    println!("{}", pretty_table(&["Statistic", "Value"], summary));

    let top: Vec<Vec<String>> = result
        .top_categories
        .iter()
        .map(|c| vec![c.category_name.clone(), format!("{:.2}", c.amount)])
        .collect();
    println!("{}", pretty_table(&["Top category", "Spent"], top));

    let trend: Vec<Vec<String>> = result
        .daily_trend
        .iter()
        .map(|d| vec![d.date.clone(), format!("{:.2}", d.amount)])
        .collect();
    println!("{}", pretty_table(&["Day", "Spent"], trend));
    Ok(())
}

pub fn compute<Tz: TimeZone>(
    records: &[ExpenseRecord],
    settings: &Settings,
    sub: &clap::ArgMatches,
    now: &DateTime<Tz>,
) -> Result<(Period, StatisticsResult)> {
    let period = match sub.get_one::<String>("period") {
        Some(raw) => raw.parse::<Period>()?,
        None => Period::ThisMonth,
    };
    let result = crate::stats::statistics(records, period, now, settings.top_n);
    Ok((period, result))
}
