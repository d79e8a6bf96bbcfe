// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{FixedOffset, TimeZone, Utc};
use rust_decimal::Decimal;
use spendlens::models::{CategoryAmount, DailyAmount, DateRange, ExpenseRecord};
use spendlens::period::{resolve_range, Period};
use spendlens::stats::{aggregate, compare, dashboard, statistics};

fn ms(y: i32, m: u32, d: u32, h: u32) -> i64 {
    Utc.with_ymd_and_hms(y, m, d, h, 0, 0)
        .unwrap()
        .timestamp_millis()
}

fn rec(id: i64, amount: i64, category: Option<&str>, ts: i64) -> ExpenseRecord {
    ExpenseRecord {
        id,
        amount: Decimal::from(amount),
        category_id: id,
        category_name: category.map(str::to_string),
        timestamp_ms: ts,
        description: format!("expense {}", id),
    }
}

fn october() -> DateRange {
    DateRange {
        start_ms: ms(2025, 10, 1, 0),
        end_ms: ms(2025, 11, 1, 0) - 1,
    }
}

#[test]
fn worked_example_totals_breakdown_and_trend() {
    let records = vec![
        rec(1, 100, Some("Food"), ms(2025, 10, 3, 9)),
        rec(2, 50, Some("Food"), ms(2025, 10, 4, 12)),
        rec(3, 25, Some("Transport"), ms(2025, 10, 3, 18)),
    ];
    let stats = aggregate(&records, october(), 5, &Utc);

    assert_eq!(stats.total_spent, Decimal::from(175));
    assert_eq!(stats.expense_count, 3);
    assert_eq!(stats.category_breakdown.get("Food"), Some(Decimal::from(150)));
    assert_eq!(stats.category_breakdown.get("Transport"), Some(Decimal::from(25)));
    assert_eq!(
        stats.top_categories,
        vec![
            CategoryAmount {
                category_name: "Food".into(),
                amount: Decimal::from(150)
            },
            CategoryAmount {
                category_name: "Transport".into(),
                amount: Decimal::from(25)
            },
        ]
    );
    assert_eq!(
        stats.daily_trend,
        vec![
            DailyAmount {
                date: "2025-10-03".into(),
                amount: Decimal::from(125)
            },
            DailyAmount {
                date: "2025-10-04".into(),
                amount: Decimal::from(50)
            },
        ]
    );
}

#[test]
fn records_outside_range_are_ignored_and_bounds_are_inclusive() {
    let range = october();
    let records = vec![
        rec(1, 10, Some("Food"), range.start_ms),
        rec(2, 20, Some("Food"), range.end_ms),
        rec(3, 40, Some("Food"), range.start_ms - 1),
        rec(4, 80, Some("Rent"), range.end_ms + 1),
    ];
    let stats = aggregate(&records, range, 5, &Utc);
    assert_eq!(stats.total_spent, Decimal::from(30));
    assert_eq!(stats.expense_count, 2);
    assert!(stats.category_breakdown.get("Rent").is_none());
}

#[test]
fn breakdown_sums_to_total() {
    let records: Vec<ExpenseRecord> = (0..40)
        .map(|i| {
            let cat = ["Food", "Fuel", "Rent", "Fun"][i as usize % 4];
            ExpenseRecord {
                amount: Decimal::new(1234 + i * 17, 2),
                ..rec(i, 0, Some(cat), ms(2025, 10, 1 + (i % 28) as u32, 8))
            }
        })
        .collect();
    let stats = aggregate(&records, october(), 5, &Utc);
    assert_eq!(stats.category_breakdown.total(), stats.total_spent);
    let trend_total: Decimal = stats.daily_trend.iter().map(|d| d.amount).sum();
    assert_eq!(trend_total, stats.total_spent);
}

#[test]
fn missing_category_groups_under_unknown() {
    let records = vec![
        rec(1, 5, None, ms(2025, 10, 2, 8)),
        rec(2, 7, None, ms(2025, 10, 2, 9)),
        rec(3, 1, Some("Food"), ms(2025, 10, 2, 9)),
    ];
    let stats = aggregate(&records, october(), 5, &Utc);
    assert_eq!(stats.category_breakdown.get("Unknown"), Some(Decimal::from(12)));
    assert_eq!(stats.top_categories[0].category_name, "Unknown");
}

#[test]
fn top_categories_ties_keep_first_seen_order_and_truncate() {
    let records = vec![
        rec(1, 10, Some("Books"), ms(2025, 10, 5, 8)),
        rec(2, 30, Some("Rent"), ms(2025, 10, 5, 8)),
        rec(3, 10, Some("Coffee"), ms(2025, 10, 5, 8)),
        rec(4, 10, Some("Games"), ms(2025, 10, 5, 8)),
    ];
    let stats = aggregate(&records, october(), 3, &Utc);
    let names: Vec<&str> = stats
        .top_categories
        .iter()
        .map(|c| c.category_name.as_str())
        .collect();
    assert_eq!(names, vec!["Rent", "Books", "Coffee"]);
}

#[test]
fn daily_trend_has_no_gaps_and_uses_local_days() {
    let ist = FixedOffset::east_opt(5 * 3600 + 1800).unwrap();
    // 20:00 UTC on the 3rd is already the 4th in IST
    let records = vec![
        rec(1, 10, Some("Food"), ms(2025, 10, 3, 20)),
        rec(2, 5, Some("Food"), ms(2025, 10, 10, 6)),
    ];
    let stats = aggregate(&records, october(), 5, &ist);
    let days: Vec<&str> = stats.daily_trend.iter().map(|d| d.date.as_str()).collect();
    assert_eq!(days, vec!["2025-10-04", "2025-10-10"]);
}

#[test]
fn empty_input_yields_zeroes() {
    let stats = aggregate(&[], october(), 5, &Utc);
    assert_eq!(stats.total_spent, Decimal::ZERO);
    assert_eq!(stats.expense_count, 0);
    assert!(stats.category_breakdown.is_empty());
    assert!(stats.daily_trend.is_empty());
    assert!(stats.top_categories.is_empty());
    assert_eq!(stats.average_per_day, Decimal::ZERO);
    assert_eq!(stats.comparison.percentage_change, Decimal::ZERO);
}

#[test]
fn percentage_change_is_zero_without_previous_spend() {
    let c = compare(Decimal::ZERO, Decimal::from(80));
    assert_eq!(c.difference, Decimal::from(80));
    assert_eq!(c.percentage_change, Decimal::ZERO);

    let c = compare(Decimal::from(-5), Decimal::from(80));
    assert_eq!(c.percentage_change, Decimal::ZERO);
}

#[test]
fn percentage_change_against_previous() {
    let c = compare(Decimal::from(200), Decimal::from(150));
    assert_eq!(c.previous_amount, Decimal::from(200));
    assert_eq!(c.current_amount, Decimal::from(150));
    assert_eq!(c.difference, Decimal::from(-50));
    assert_eq!(c.percentage_change, Decimal::from(-25));
}

#[test]
fn statistics_compares_with_previous_month() {
    let now = Utc.with_ymd_and_hms(2025, 10, 15, 12, 0, 0).unwrap();
    let records = vec![
        rec(1, 100, Some("Food"), ms(2025, 9, 20, 8)),
        rec(2, 150, Some("Food"), ms(2025, 10, 2, 8)),
        rec(3, 60, Some("Fuel"), ms(2025, 10, 14, 8)),
        rec(4, 999, Some("Rent"), ms(2025, 8, 1, 8)),
    ];
    let stats = statistics(&records, Period::ThisMonth, &now, 5);
    assert_eq!(stats.range, resolve_range(Period::ThisMonth, &now));
    assert_eq!(stats.total_spent, Decimal::from(210));
    assert_eq!(stats.comparison.previous_amount, Decimal::from(100));
    assert_eq!(stats.comparison.difference, Decimal::from(110));
    assert_eq!(stats.comparison.percentage_change, Decimal::from(110));
    // October has 31 days
    assert_eq!(stats.average_per_day, Decimal::from(210) / Decimal::from(31));
}

#[test]
fn statistics_week_average_divides_by_seven() {
    let now = Utc.with_ymd_and_hms(2025, 10, 15, 12, 0, 0).unwrap();
    let records = vec![
        rec(1, 70, Some("Food"), ms(2025, 10, 13, 8)),
        rec(2, 7, Some("Food"), ms(2025, 10, 19, 22)),
        rec(3, 35, Some("Food"), ms(2025, 10, 8, 8)),
    ];
    let stats = statistics(&records, Period::ThisWeek, &now, 5);
    assert_eq!(stats.total_spent, Decimal::from(77));
    assert_eq!(stats.average_per_day, Decimal::from(11));
    assert_eq!(stats.comparison.previous_amount, Decimal::from(35));
    assert_eq!(stats.comparison.percentage_change, Decimal::from(120));
}

#[test]
fn statistics_is_deterministic() {
    let now = Utc.with_ymd_and_hms(2025, 10, 15, 12, 0, 0).unwrap();
    let records = vec![
        rec(1, 12, Some("Food"), ms(2025, 10, 1, 8)),
        rec(2, 30, Some("Fuel"), ms(2025, 10, 9, 8)),
    ];
    let a = statistics(&records, Period::Last30Days, &now, 5);
    let b = statistics(&records, Period::Last30Days, &now, 5);
    assert_eq!(a, b);
}

#[test]
fn dashboard_reports_month_and_recent() {
    let now = Utc.with_ymd_and_hms(2025, 10, 15, 12, 0, 0).unwrap();
    let records = vec![
        rec(1, 10, Some("Food"), ms(2025, 10, 1, 8)),
        rec(2, 20, Some("Fuel"), ms(2025, 10, 12, 8)),
        rec(3, 40, Some("Food"), ms(2025, 9, 30, 8)),
        rec(4, 5, Some("Food"), ms(2025, 10, 14, 8)),
    ];
    let summary = dashboard(&records, &now, 3);
    assert_eq!(summary.total_spent, Decimal::from(35));
    assert_eq!(summary.expense_count, 3);
    assert_eq!(summary.category_breakdown.get("Food"), Some(Decimal::from(15)));
    let ids: Vec<i64> = summary.recent.iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![4, 2, 1]);
}

#[test]
fn breakdown_serializes_in_first_seen_order() {
    let records = vec![
        rec(1, 1, Some("Zoo"), ms(2025, 10, 1, 8)),
        rec(2, 2, Some("Apple"), ms(2025, 10, 1, 8)),
    ];
    let stats = aggregate(&records, october(), 5, &Utc);
    let json = serde_json::to_string(&stats.category_breakdown).unwrap();
    assert_eq!(json, r#"{"Zoo":"1","Apple":"2"}"#);
}
