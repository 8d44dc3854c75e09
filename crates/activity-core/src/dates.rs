// ABOUTME: Calendar-day utilities for insight aggregation
// ABOUTME: Inclusive day ranges, local day bounds as UTC instants, and date formatting
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::models::TimeRange;
use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};

/// Every calendar day from `start` to `end` inclusive, ascending
///
/// Empty when `start` is after `end`.
///
/// ```rust
/// use activity_core::dates::date_range;
/// use chrono::NaiveDate;
///
/// let start = NaiveDate::from_ymd_opt(2001, 1, 1).unwrap();
/// let end = NaiveDate::from_ymd_opt(2001, 1, 7).unwrap();
/// assert_eq!(date_range(start, end).len(), 7);
/// assert!(date_range(end, start).is_empty());
/// ```
#[must_use]
pub fn date_range(start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
    start.iter_days().take_while(|day| *day <= end).collect()
}

/// 00:00:00.000 to 23:59:59.999 of `day` in `tz`, as UTC instants
///
/// When midnight does not exist in `tz` (a DST gap) the first valid instant
/// after it is used; ambiguous times resolve to the earliest start and the
/// latest end.
#[must_use]
pub fn day_bounds<Tz: TimeZone>(day: NaiveDate, tz: &Tz) -> TimeRange {
    let start_local = day.and_time(NaiveTime::MIN);
    let end_local = start_local + Duration::days(1) - Duration::milliseconds(1);

    let start = resolve_local(start_local, tz, true);
    let end = resolve_local(end_local, tz, false);
    TimeRange { start, end }
}

fn resolve_local<Tz: TimeZone>(local: NaiveDateTime, tz: &Tz, earliest: bool) -> DateTime<Utc> {
    let mapped = tz.from_local_datetime(&local);
    let resolved = if earliest {
        mapped.earliest()
    } else {
        mapped.latest()
    };
    if let Some(instant) = resolved {
        return instant.with_timezone(&Utc);
    }
    // DST gaps are at most a few hours; step forward until the wall clock exists
    let mut candidate = local;
    for _ in 0..24 * 4 {
        candidate += Duration::minutes(15);
        if let Some(instant) = tz.from_local_datetime(&candidate).earliest() {
            return instant.with_timezone(&Utc);
        }
    }
    Utc.from_utc_datetime(&local)
}

/// Format a day as `YYYY-MM-DD`
#[must_use]
pub fn format_date(day: NaiveDate) -> String {
    day.format("%Y-%m-%d").to_string()
}
