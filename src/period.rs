// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Calendar periods and their millisecond ranges.
//!
//! Every range produced here starts at local `00:00:00.000` of its first day
//! and ends at local `23:59:59.999` of its last day, in the time zone of the
//! `now` value handed in. Nothing in this module reads the system clock; use
//! a [`Clock`] to obtain `now`.

use std::fmt;
use std::str::FromStr;

use anyhow::anyhow;
use chrono::{
    DateTime, Datelike, Duration, LocalResult, NaiveDate, NaiveDateTime, NaiveTime, Offset,
    TimeZone, Utc,
};
use serde::{Deserialize, Serialize};

use crate::models::DateRange;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Period {
    ThisWeek,
    ThisMonth,
    ThisYear,
    Last30Days,
}

impl Period {
    pub const ALL: [Period; 4] = [
        Period::ThisWeek,
        Period::ThisMonth,
        Period::ThisYear,
        Period::Last30Days,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::ThisWeek => "week",
            Self::ThisMonth => "month",
            Self::ThisYear => "year",
            Self::Last30Days => "30d",
        }
    }

    /// Divisor for the average-per-day figure of the period containing `today`.
    pub fn day_count(self, today: NaiveDate) -> u32 {
        match self {
            Self::ThisWeek => 7,
            Self::ThisMonth => days_in_month(today),
            Self::ThisYear => {
                if is_leap_year(today.year()) {
                    366
                } else {
                    365
                }
            }
            Self::Last30Days => 30,
        }
    }

    fn current_days(self, today: NaiveDate) -> (NaiveDate, NaiveDate) {
        match self {
            Self::ThisWeek => {
                let monday = today - Duration::days(today.weekday().num_days_from_monday() as i64);
                (monday, monday + Duration::days(6))
            }
            Self::ThisMonth => (first_of_month(today), last_of_month(today)),
            Self::ThisYear => (first_of_year(today), last_of_year(today)),
            Self::Last30Days => (today - Duration::days(29), today),
        }
    }

    fn previous_days(self, today: NaiveDate) -> (NaiveDate, NaiveDate) {
        let (first, _) = self.current_days(today);
        match self {
            Self::ThisWeek => (first - Duration::days(7), first - Duration::days(1)),
            Self::ThisMonth => {
                let last = first - Duration::days(1);
                (first_of_month(last), last)
            }
            Self::ThisYear => {
                let last = first - Duration::days(1);
                (first_of_year(last), last)
            }
            Self::Last30Days => (today - Duration::days(59), today - Duration::days(30)),
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Period {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "week" | "this-week" => Ok(Self::ThisWeek),
            "month" | "this-month" => Ok(Self::ThisMonth),
            "year" | "this-year" => Ok(Self::ThisYear),
            "30d" | "last-30-days" => Ok(Self::Last30Days),
            other => Err(anyhow!(
                "Unknown period '{}' (use week|month|year|30d)",
                other
            )),
        }
    }
}

/// Source of "now".
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock pinned to one instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl FixedClock {
    pub fn from_millis(ms: i64) -> Option<Self> {
        DateTime::from_timestamp_millis(ms).map(Self)
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

pub fn resolve_range<Tz: TimeZone>(period: Period, now: &DateTime<Tz>) -> DateRange {
    let (first, last) = period.current_days(now.date_naive());
    day_span(&now.timezone(), first, last)
}

/// The period immediately before the one containing `now`.
pub fn resolve_previous_range<Tz: TimeZone>(period: Period, now: &DateTime<Tz>) -> DateRange {
    let (first, last) = period.previous_days(now.date_naive());
    day_span(&now.timezone(), first, last)
}

pub fn is_leap_year(year: i32) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

pub fn days_in_month(date: NaiveDate) -> u32 {
    last_of_month(date).day()
}

/// Range from the start of `first` to the end of `last`, both local days.
pub fn day_span<Tz: TimeZone>(tz: &Tz, first: NaiveDate, last: NaiveDate) -> DateRange {
    DateRange {
        start_ms: start_of_day_ms(tz, first),
        end_ms: end_of_day_ms(tz, last),
    }
}

pub fn start_of_day_ms<Tz: TimeZone>(tz: &Tz, date: NaiveDate) -> i64 {
    local_millis(tz, date.and_time(NaiveTime::MIN), true)
}

/// `23:59:59.999` local time on `date`.
pub fn end_of_day_ms<Tz: TimeZone>(tz: &Tz, date: NaiveDate) -> i64 {
    let end = date
        .and_hms_milli_opt(23, 59, 59, 999)
        .unwrap_or_else(|| date.and_time(NaiveTime::MIN));
    local_millis(tz, end, false)
}

/// Calendar day of `timestamp_ms` in `tz`, `None` if chrono cannot represent it.
pub fn local_date<Tz: TimeZone>(tz: &Tz, timestamp_ms: i64) -> Option<NaiveDate> {
    let utc = DateTime::from_timestamp_millis(timestamp_ms)?.naive_utc();
    let offset = tz.offset_from_utc_datetime(&utc).fix();
    utc.checked_add_signed(Duration::seconds(offset.local_minus_utc() as i64))
        .map(|local| local.date())
}

fn local_millis<Tz: TimeZone>(tz: &Tz, naive: NaiveDateTime, earliest: bool) -> i64 {
    let offset = tz.offset_from_utc_datetime(&naive).fix();
    let shift = Duration::seconds(offset.local_minus_utc() as i64);
    // wall times whose UTC instant falls outside chrono's range saturate
    let Some(shifted) = naive.checked_sub_signed(shift) else {
        return if shift < Duration::zero() { i64::MAX } else { i64::MIN };
    };
    match tz.from_local_datetime(&naive) {
        LocalResult::Single(dt) => dt.timestamp_millis(),
        LocalResult::Ambiguous(first, second) => {
            if earliest {
                first.timestamp_millis()
            } else {
                second.timestamp_millis()
            }
        }
        // wall time skipped by a DST jump: shift by the offset in effect at that instant
        LocalResult::None => shifted.and_utc().timestamp_millis(),
    }
}

fn first_of_month(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.day0() as i64)
}

fn last_of_month(date: NaiveDate) -> NaiveDate {
    // 31 days past the 1st always lands in the following month
    let next = first_of_month(first_of_month(date) + Duration::days(31));
    next - Duration::days(1)
}

fn first_of_year(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.ordinal0() as i64)
}

fn last_of_year(date: NaiveDate) -> NaiveDate {
    let next = first_of_year(first_of_year(date) + Duration::days(366));
    next - Duration::days(1)
}
