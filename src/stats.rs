// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Aggregates over a snapshot of expense records.

use std::collections::BTreeMap;

use chrono::{DateTime, TimeZone};
use rust_decimal::Decimal;

use crate::models::{
    CategoryBreakdown, DailyAmount, DashboardSummary, DateRange, ExpenseRecord, PeriodComparison,
    StatisticsResult,
};
use crate::period::{self, Period};

pub const DEFAULT_TOP_N: usize = 5;
pub const DEFAULT_RECENT: usize = 3;

/// Statistics for the records whose timestamp falls inside `range`.
///
/// `average_per_day` divides by the number of local calendar days the range
/// touches. The comparison is made against a zero previous amount; fold in the
/// real previous period with [`StatisticsResult::with_previous`].
pub fn aggregate<Tz: TimeZone>(
    records: &[ExpenseRecord],
    range: DateRange,
    top_n: usize,
    tz: &Tz,
) -> StatisticsResult {
    let mut total_spent = Decimal::ZERO;
    let mut expense_count = 0usize;
    let mut category_breakdown = CategoryBreakdown::new();
    let mut daily: BTreeMap<String, Decimal> = BTreeMap::new();

    for r in records.iter().filter(|r| range.contains(r.timestamp_ms)) {
        total_spent += r.amount;
        expense_count += 1;
        category_breakdown.add(r.category_label(), r.amount);
        match period::local_date(tz, r.timestamp_ms) {
            Some(day) => {
                *daily
                    .entry(day.format("%Y-%m-%d").to_string())
                    .or_insert(Decimal::ZERO) += r.amount;
            }
            None => tracing::warn!(
                id = r.id,
                timestamp_ms = r.timestamp_ms,
                "expense timestamp out of calendar range, left out of daily trend"
            ),
        }
    }

    let daily_trend = daily
        .into_iter()
        .map(|(date, amount)| DailyAmount { date, amount })
        .collect();
    let top_categories = category_breakdown.top(top_n);
    let average_per_day = per_day(total_spent, range_day_count(tz, range));

    tracing::debug!(
        input = records.len(),
        matched = expense_count,
        categories = category_breakdown.len(),
        "aggregated expenses"
    );

    StatisticsResult {
        range,
        total_spent,
        expense_count,
        average_per_day,
        category_breakdown,
        daily_trend,
        top_categories,
        comparison: compare(Decimal::ZERO, total_spent),
    }
}

pub fn compare(previous: Decimal, current: Decimal) -> PeriodComparison {
    let difference = current - previous;
    let percentage_change = if previous > Decimal::ZERO {
        difference / previous * Decimal::ONE_HUNDRED
    } else {
        Decimal::ZERO
    };
    PeriodComparison {
        previous_amount: previous,
        current_amount: current,
        difference,
        percentage_change,
    }
}

impl StatisticsResult {
    /// Same statistics with the comparison taken against `previous`.
    pub fn with_previous(self, previous: &StatisticsResult) -> Self {
        let comparison = compare(previous.total_spent, self.total_spent);
        Self { comparison, ..self }
    }
}

/// Full statistics for `period` as seen from `now`: the current range is
/// aggregated, compared with the previous range, and averaged over the
/// period's calendar length.
pub fn statistics<Tz: TimeZone>(
    records: &[ExpenseRecord],
    period: Period,
    now: &DateTime<Tz>,
    top_n: usize,
) -> StatisticsResult {
    let tz = now.timezone();
    let current_range = period::resolve_range(period, now);
    let previous_range = period::resolve_previous_range(period, now);

    let previous = aggregate(records, previous_range, top_n, &tz);
    let current = aggregate(records, current_range, top_n, &tz).with_previous(&previous);
    let average_per_day = per_day(current.total_spent, period.day_count(now.date_naive()));

    StatisticsResult {
        average_per_day,
        ..current
    }
}

/// Current-month totals plus the `recent` newest records of the whole snapshot.
pub fn dashboard<Tz: TimeZone>(
    records: &[ExpenseRecord],
    now: &DateTime<Tz>,
    recent: usize,
) -> DashboardSummary {
    let month = period::resolve_range(Period::ThisMonth, now);
    let stats = aggregate(records, month, 0, &now.timezone());

    let mut newest: Vec<&ExpenseRecord> = records.iter().collect();
    newest.sort_by(|a, b| b.timestamp_ms.cmp(&a.timestamp_ms));

    DashboardSummary {
        month,
        total_spent: stats.total_spent,
        expense_count: stats.expense_count,
        category_breakdown: stats.category_breakdown,
        recent: newest.into_iter().take(recent).cloned().collect(),
    }
}

fn per_day(total: Decimal, days: u32) -> Decimal {
    if days == 0 {
        return Decimal::ZERO;
    }
    total / Decimal::from(days)
}

fn range_day_count<Tz: TimeZone>(tz: &Tz, range: DateRange) -> u32 {
    match (
        period::local_date(tz, range.start_ms),
        period::local_date(tz, range.end_ms),
    ) {
        (Some(first), Some(last)) => {
            let days = (last - first).num_days() + 1;
            u32::try_from(days).unwrap_or(0)
        }
        _ => 0,
    }
}
