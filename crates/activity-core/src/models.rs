// ABOUTME: Domain models for daily and weekly health insights
// ABOUTME: Time ranges, insight records, goal settings, permission state and platform identifiers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::constants::{goals, platforms};
use crate::errors::{AppError, AppResult, HealthError, HealthResult};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::env::consts;
use std::fmt;
use std::str::FromStr;

/// A query window between two instants, `start <= end`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRange {
    /// Inclusive start
    pub start: DateTime<Utc>,
    /// Inclusive end
    pub end: DateTime<Utc>,
}

impl TimeRange {
    /// Create a range, rejecting `start > end`
    ///
    /// # Errors
    ///
    /// Returns `HealthError::InvalidRange` when `start` is after `end`.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> HealthResult<Self> {
        if start > end {
            return Err(HealthError::InvalidRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// Whether an instant falls inside the range (both ends inclusive)
    #[must_use]
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.start <= instant && instant <= self.end
    }

    /// Whether `[start, end]` overlaps this range
    #[must_use]
    pub fn overlaps(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> bool {
        start <= self.end && end >= self.start
    }
}

/// Step count for one calendar day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyStepsInsight {
    /// Calendar day
    pub date: NaiveDate,
    /// Steps recorded that day
    pub steps: u64,
}

/// Exercise minutes for one calendar day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyActivityInsight {
    /// Calendar day
    pub date: NaiveDate,
    /// Whole minutes of exercise that day
    pub minutes: u64,
}

/// Both insights for one calendar day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyInsights {
    /// Exercise minutes
    pub activity: DailyActivityInsight,
    /// Step count
    pub steps: DailyStepsInsight,
}

/// Per-day insights over a range of calendar days, chronologically ascending
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklyInsights {
    /// One activity insight per day
    pub daily_activity_insights: Vec<DailyActivityInsight>,
    /// One steps insight per day
    pub daily_step_insights: Vec<DailyStepsInsight>,
}

impl WeeklyInsights {
    /// Split per-day insights into the two ordered sequences
    #[must_use]
    pub fn from_daily(days: Vec<DailyInsights>) -> Self {
        let (daily_activity_insights, daily_step_insights) = days
            .into_iter()
            .map(|day| (day.activity, day.steps))
            .unzip();
        Self {
            daily_activity_insights,
            daily_step_insights,
        }
    }

    /// Number of days covered
    #[must_use]
    pub fn len(&self) -> usize {
        self.daily_step_insights.len()
    }

    /// Whether no days are covered
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.daily_step_insights.is_empty()
    }

    /// Total steps over the range
    #[must_use]
    pub fn total_steps(&self) -> u64 {
        self.daily_step_insights.iter().map(|d| d.steps).sum()
    }

    /// Total exercise minutes over the range
    #[must_use]
    pub fn total_minutes(&self) -> u64 {
        self.daily_activity_insights.iter().map(|d| d.minutes).sum()
    }
}

/// Whether access to health data is granted, as tracked by the UI state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PermissionState {
    /// No reload has completed yet
    #[default]
    Unknown,
    /// The last reload initialized successfully
    Granted,
    /// The last reload failed
    Denied,
}

/// User-configurable daily goals
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoalSettings {
    /// Daily steps goal
    pub steps_goal: u32,
    /// Daily activity minutes goal
    pub minutes_goal: u32,
}

impl Default for GoalSettings {
    fn default() -> Self {
        Self {
            steps_goal: goals::DEFAULT_STEPS_GOAL,
            minutes_goal: goals::DEFAULT_MINUTES_GOAL,
        }
    }
}

impl GoalSettings {
    /// Create validated goals
    ///
    /// # Errors
    ///
    /// Returns `ValueOutOfRange` when a goal is zero or above its limit.
    pub fn new(steps_goal: u32, minutes_goal: u32) -> AppResult<Self> {
        if steps_goal == 0 || steps_goal > goals::MAX_STEPS_GOAL {
            return Err(AppError::out_of_range(format!(
                "steps goal must be between 1 and {}, got {steps_goal}",
                goals::MAX_STEPS_GOAL
            )));
        }
        if minutes_goal == 0 || minutes_goal > goals::MAX_MINUTES_GOAL {
            return Err(AppError::out_of_range(format!(
                "minutes goal must be between 1 and {}, got {minutes_goal}",
                goals::MAX_MINUTES_GOAL
            )));
        }
        Ok(Self {
            steps_goal,
            minutes_goal,
        })
    }

    /// Parse goals typed by the user: up to 6 digits for steps, up to 4 for minutes
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` when either value is not a plain digit string of
    /// the allowed length, or `ValueOutOfRange` when it is zero.
    pub fn parse(steps: &str, minutes: &str) -> AppResult<Self> {
        let steps_goal = parse_digits(steps.trim(), 6, "steps goal")?;
        let minutes_goal = parse_digits(minutes.trim(), 4, "minutes goal")?;
        Self::new(steps_goal, minutes_goal)
    }
}

fn parse_digits(value: &str, max_len: usize, field: &str) -> AppResult<u32> {
    if value.is_empty() || value.len() > max_len || !value.bytes().all(|b| b.is_ascii_digit()) {
        return Err(AppError::invalid_input(format!(
            "{field} must be 1 to {max_len} digits, got '{value}'"
        )));
    }
    value
        .parse()
        .map_err(|e| AppError::invalid_input(format!("{field}: {e}")))
}

/// Runtime platform identifier used to pick the health provider adapter
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    /// Served by the HealthKit adapter
    Ios,
    /// Served by the Health Connect adapter
    Android,
    /// Any other platform; no adapter exists
    Other(String),
}

impl Platform {
    /// Platform of the running process, derived from the target OS
    #[must_use]
    pub fn current() -> Self {
        Self::from_identifier(consts::OS)
    }

    /// Parse a platform identifier case-insensitively
    #[must_use]
    pub fn from_identifier(identifier: &str) -> Self {
        let normalized = identifier.trim().to_lowercase();
        match normalized.as_str() {
            platforms::IOS => Self::Ios,
            platforms::ANDROID => Self::Android,
            _ => Self::Other(normalized),
        }
    }

    /// Identifier string
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Ios => platforms::IOS,
            Self::Android => platforms::ANDROID,
            Self::Other(name) => name,
        }
    }
}

impl FromStr for Platform {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_identifier(s))
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
