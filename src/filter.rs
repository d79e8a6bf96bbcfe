// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::TimeZone;

use crate::models::{DateRange, ExpenseRecord, FilterSpec, SortKey};
use crate::period;

/// Filtered and ordered projection of `records` for list display.
///
/// Search, category and date filters narrow in that order, then a stable sort
/// is applied. Date bounds are widened to whole local days in `tz`.
pub fn apply<Tz: TimeZone>(
    records: &[ExpenseRecord],
    spec: &FilterSpec,
    tz: &Tz,
) -> Vec<ExpenseRecord> {
    let mut out: Vec<&ExpenseRecord> = records.iter().collect();

    let query = spec.search_query.trim();
    if !query.is_empty() {
        let needle = spec.search_query.to_lowercase();
        out.retain(|r| {
            r.description.to_lowercase().contains(&needle)
                || r.category_label().to_lowercase().contains(&needle)
        });
    }

    if let Some(category) = spec.category_name.as_deref() {
        out.retain(|r| r.category_label() == category);
    }

    if let Some(range) = normalized_range(spec, tz) {
        out.retain(|r| range.contains(r.timestamp_ms));
    }

    sort_records(&mut out, spec.sort_key);

    tracing::debug!(
        input = records.len(),
        output = out.len(),
        sort = spec.sort_key.as_str(),
        "filtered expenses"
    );

    out.into_iter().cloned().collect()
}

/// Date bounds of `spec` stretched to the start and end of their local days.
/// `None` unless both bounds are set. A bound outside the calendar range is
/// kept as given, so `i64::MAX` works as an open end.
pub fn normalized_range<Tz: TimeZone>(spec: &FilterSpec, tz: &Tz) -> Option<DateRange> {
    let (start, end) = (spec.start_ms?, spec.end_ms?);
    // an inverted range keeps its bounds and simply matches nothing
    Some(DateRange {
        start_ms: period::local_date(tz, start)
            .map_or(start, |first| period::start_of_day_ms(tz, first)),
        end_ms: period::local_date(tz, end).map_or(end, |last| period::end_of_day_ms(tz, last)),
    })
}

fn sort_records(records: &mut [&ExpenseRecord], key: SortKey) {
    match key {
        SortKey::DateDesc => records.sort_by(|a, b| b.timestamp_ms.cmp(&a.timestamp_ms)),
        SortKey::DateAsc => records.sort_by_key(|r| r.timestamp_ms),
        SortKey::AmountDesc => records.sort_by(|a, b| b.amount.cmp(&a.amount)),
        SortKey::AmountAsc => records.sort_by_key(|r| r.amount),
        SortKey::Category => records.sort_by(|a, b| a.category_label().cmp(b.category_label())),
    }
}
