// ABOUTME: Calendar-day insight composition over any health provider
// ABOUTME: Daily steps/minutes joins and concurrent weekly fan-out with range validation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Insight Composition
//!
//! Free functions parameterized over [`HealthProvider`], so both adapters share
//! one implementation of the day bucketing.
//!
//! ## Concurrency
//!
//! A day issues its minutes and steps queries together and waits for both; a
//! range issues every day at once and waits for all of them. Any failure fails
//! the whole call and no partial result is returned. The fan-out is unbounded,
//! one join per day in the range.

use activity_core::dates::{date_range, day_bounds};
use activity_core::errors::{HealthError, HealthResult};
use activity_core::models::{DailyActivityInsight, DailyInsights, DailyStepsInsight, WeeklyInsights};
use activity_providers::HealthProvider;
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use futures_util::future::{try_join, try_join_all};
use tracing::debug;

/// Steps and exercise minutes for one calendar day in `tz`
///
/// Queries `00:00:00.000` through `23:59:59.999` of `day`.
///
/// # Errors
///
/// Returns the first provider failure of either query.
pub async fn daily_insights<P, Tz>(provider: &P, day: NaiveDate, tz: &Tz) -> HealthResult<DailyInsights>
where
    P: HealthProvider + ?Sized,
    Tz: TimeZone,
{
    let bounds = day_bounds(day, tz);
    debug!(
        provider = provider.kind().name(),
        %day,
        from = %bounds.start.to_rfc3339(),
        to = %bounds.end.to_rfc3339(),
        "Fetching daily insights"
    );

    let (minutes, steps) = try_join(
        provider.get_activity_minutes(bounds.start, bounds.end),
        provider.get_steps(bounds.start, bounds.end),
    )
    .await?;

    Ok(DailyInsights {
        activity: DailyActivityInsight { date: day, minutes },
        steps: DailyStepsInsight { date: day, steps },
    })
}

/// Daily insights for every calendar day from `start` to `end`, in order
///
/// Both instants are truncated to their calendar day in their own time zone,
/// and each day is bucketed in that zone.
///
/// # Errors
///
/// Returns `HealthError::InvalidRange` when `start >= end`, before any provider
/// call is made. Otherwise returns the first provider failure.
pub async fn weekly_insights<P, Tz>(
    provider: &P,
    start: DateTime<Tz>,
    end: DateTime<Tz>,
) -> HealthResult<WeeklyInsights>
where
    P: HealthProvider + ?Sized,
    Tz: TimeZone,
{
    if start >= end {
        return Err(HealthError::InvalidRange {
            start: start.with_timezone(&Utc),
            end: end.with_timezone(&Utc),
        });
    }

    let tz = start.timezone();
    let days = date_range(start.date_naive(), end.date_naive());
    if days.is_empty() {
        return Ok(WeeklyInsights::default());
    }

    debug!(
        provider = provider.kind().name(),
        days = days.len(),
        "Fetching weekly insights"
    );

    let daily = try_join_all(days.into_iter().map(|day| {
        let tz = tz.clone();
        async move { daily_insights(provider, day, &tz).await }
    }))
    .await?;

    Ok(WeeklyInsights::from_daily(daily))
}
