// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::Decimal;
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

/// Label used for records whose category could not be resolved.
pub const UNKNOWN_CATEGORY: &str = "Unknown";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpenseRecord {
    pub id: i64,
    pub amount: Decimal,
    pub category_id: i64,
    #[serde(default)]
    pub category_name: Option<String>,
    pub timestamp_ms: i64,
    #[serde(default)]
    pub description: String,
}

impl ExpenseRecord {
    /// Category label, falling back to [`UNKNOWN_CATEGORY`].
    pub fn category_label(&self) -> &str {
        self.category_name.as_deref().unwrap_or(UNKNOWN_CATEGORY)
    }
}

/// Inclusive millisecond range, `start_ms <= end_ms`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateRange {
    pub start_ms: i64,
    pub end_ms: i64,
}

impl DateRange {
    pub fn new(start_ms: i64, end_ms: i64) -> Option<Self> {
        (start_ms <= end_ms).then_some(Self { start_ms, end_ms })
    }

    pub fn contains(&self, timestamp_ms: i64) -> bool {
        self.start_ms <= timestamp_ms && timestamp_ms <= self.end_ms
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryAmount {
    pub category_name: String,
    pub amount: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailyAmount {
    pub date: String, // YYYY-MM-DD, local time
    pub amount: Decimal,
}

/// Per-category sums in first-appearance order.
///
/// Serializes as a JSON object whose keys keep that order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryBreakdown {
    entries: Vec<CategoryAmount>,
}

impl CategoryBreakdown {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, category_name: &str, amount: Decimal) {
        match self
            .entries
            .iter_mut()
            .find(|e| e.category_name == category_name)
        {
            Some(entry) => entry.amount += amount,
            None => self.entries.push(CategoryAmount {
                category_name: category_name.to_string(),
                amount,
            }),
        }
    }

    pub fn get(&self, category_name: &str) -> Option<Decimal> {
        self.entries
            .iter()
            .find(|e| e.category_name == category_name)
            .map(|e| e.amount)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CategoryAmount> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn total(&self) -> Decimal {
        self.entries.iter().map(|e| e.amount).sum()
    }

    /// Entries sorted by descending amount, ties in first-appearance order,
    /// truncated to `limit`.
    pub fn top(&self, limit: usize) -> Vec<CategoryAmount> {
        let mut ranked = self.entries.clone();
        // sort_by is stable, so equal amounts keep insertion order
        ranked.sort_by(|a, b| b.amount.cmp(&a.amount));
        ranked.truncate(limit);
        ranked
    }
}

impl Serialize for CategoryBreakdown {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for e in &self.entries {
            map.serialize_entry(&e.category_name, &e.amount)?;
        }
        map.end()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PeriodComparison {
    pub previous_amount: Decimal,
    pub current_amount: Decimal,
    pub difference: Decimal,
    /// Zero when `previous_amount <= 0`.
    pub percentage_change: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatisticsResult {
    pub range: DateRange,
    pub total_spent: Decimal,
    pub expense_count: usize,
    pub average_per_day: Decimal,
    pub category_breakdown: CategoryBreakdown,
    pub daily_trend: Vec<DailyAmount>,
    pub top_categories: Vec<CategoryAmount>,
    pub comparison: PeriodComparison,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardSummary {
    pub month: DateRange,
    pub total_spent: Decimal,
    pub expense_count: usize,
    pub category_breakdown: CategoryBreakdown,
    pub recent: Vec<ExpenseRecord>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortKey {
    #[default]
    DateDesc,
    DateAsc,
    AmountDesc,
    AmountAsc,
    Category,
}

/// Sort control the user taps; see [`SortKey::toggle`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Date,
    Amount,
    Category,
}

impl SortKey {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::DateDesc => "date-desc",
            Self::DateAsc => "date-asc",
            Self::AmountDesc => "amount-desc",
            Self::AmountAsc => "amount-asc",
            Self::Category => "category",
        }
    }

    /// Next key after tapping `field` while `self` is active. Date and amount
    /// flip direction when already selected, otherwise start descending.
    pub fn toggle(self, field: SortField) -> Self {
        match field {
            SortField::Date if self == Self::DateDesc => Self::DateAsc,
            SortField::Date => Self::DateDesc,
            SortField::Amount if self == Self::AmountDesc => Self::AmountAsc,
            SortField::Amount => Self::AmountDesc,
            SortField::Category => Self::Category,
        }
    }
}

impl std::str::FromStr for SortKey {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "date-desc" | "date" => Ok(Self::DateDesc),
            "date-asc" => Ok(Self::DateAsc),
            "amount-desc" | "amount" => Ok(Self::AmountDesc),
            "amount-asc" => Ok(Self::AmountAsc),
            "category" => Ok(Self::Category),
            other => Err(anyhow::anyhow!(
                "Unknown sort key '{}' (use date-desc|date-asc|amount-desc|amount-asc|category)",
                other
            )),
        }
    }
}

/// Caller-held list filter state. Every change yields a fresh spec that is
/// re-applied to the full snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FilterSpec {
    pub search_query: String,
    pub category_name: Option<String>,
    pub start_ms: Option<i64>,
    pub end_ms: Option<i64>,
    pub sort_key: SortKey,
}

impl FilterSpec {
    pub fn cleared() -> Self {
        Self::default()
    }

    pub fn with_search(self, query: impl Into<String>) -> Self {
        Self {
            search_query: query.into(),
            ..self
        }
    }

    pub fn with_category(self, category_name: Option<String>) -> Self {
        Self {
            category_name,
            ..self
        }
    }

    pub fn with_date_range(self, start_ms: Option<i64>, end_ms: Option<i64>) -> Self {
        Self {
            start_ms,
            end_ms,
            ..self
        }
    }

    pub fn with_sort(self, sort_key: SortKey) -> Self {
        Self { sort_key, ..self }
    }

    pub fn has_date_range(&self) -> bool {
        self.start_ms.is_some() && self.end_ms.is_some()
    }
}
