// ABOUTME: Tests for the date-range utility and day-bound computation
// ABOUTME: Inclusive day counts, ordering, empty inverted ranges and local-day bounds
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use activity_monitor::dates::{date_range, day_bounds, format_date};
use chrono::{Duration, FixedOffset};
use common::{day, utc};

#[test]
fn test_range_length_is_day_difference_plus_one() {
    let cases = [
        (day(2001, 1, 1), day(2001, 1, 1), 1),
        (day(2001, 1, 1), day(2001, 1, 7), 7),
        (day(2000, 2, 27), day(2000, 3, 1), 4),
        (day(2000, 12, 31), day(2001, 1, 1), 2),
    ];
    for (start, end, expected) in cases {
        let days = date_range(start, end);
        assert_eq!(days.len(), expected, "{start}..={end}");
        assert_eq!(days.first(), Some(&start));
        assert_eq!(days.last(), Some(&end));
        assert!(days.windows(2).all(|w| w[1] - w[0] == Duration::days(1)));
    }
}

#[test]
fn test_single_day() {
    assert_eq!(date_range(day(2001, 1, 1), day(2001, 1, 1)), vec![day(2001, 1, 1)]);
}

#[test]
fn test_start_after_end_is_empty() {
    assert!(date_range(day(2001, 1, 2), day(2001, 1, 1)).is_empty());
}

#[test]
fn test_repeated_calls_are_equal() {
    let a = date_range(day(2001, 1, 1), day(2001, 1, 5));
    let b = date_range(day(2001, 1, 1), day(2001, 1, 5));
    assert_eq!(a, b);
}

#[test]
fn test_day_bounds_in_offset_zone() {
    let minus_three = FixedOffset::west_opt(3 * 3600).unwrap();

    let bounds = day_bounds(day(2001, 1, 1), &minus_three);

    assert_eq!(bounds.start, utc(2001, 1, 1, 3, 0));
    assert_eq!(bounds.end, utc(2001, 1, 2, 3, 0) - Duration::milliseconds(1));
    assert!(bounds.contains(utc(2001, 1, 2, 2, 59)));
}

#[test]
fn test_format_date() {
    assert_eq!(format_date(day(2001, 1, 9)), "2001-01-09");
}
