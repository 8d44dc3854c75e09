// ABOUTME: Reload cycle behind the today screen and goal progress computation
// ABOUTME: Initializes the provider, then fetches today's insights or records the failure
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Today Tracker
//!
//! Each reload re-runs `initialize` and re-derives the permission state; there
//! is no retry and no cached grant. A failed initialize leaves the metrics at
//! zero and issues no queries.

use crate::health::{HealthProviderHandle, HealthService};
use activity_core::models::{GoalSettings, PermissionState};
use activity_providers::{HealthProvider, InitializationOptions};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

/// What the today screen renders
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodayState {
    /// A reload is in flight
    pub loading: bool,
    /// Outcome of the last initialize
    pub permission: PermissionState,
    /// Message of the last failure
    pub error: Option<String>,
    /// Steps today
    pub steps: u64,
    /// Exercise minutes today
    pub minutes: u64,
}

impl TodayState {
    /// Whether the last reload was granted access
    #[must_use]
    pub fn is_granted(&self) -> bool {
        self.permission == PermissionState::Granted
    }
}

/// Owns the service and the state of the today screen
#[derive(Debug)]
pub struct TodayTracker<P = HealthProviderHandle> {
    service: HealthService<P>,
    state: TodayState,
}

impl<P: HealthProvider> TodayTracker<P> {
    /// Tracker in the initial `Unknown` state
    pub fn new(service: HealthService<P>) -> Self {
        Self {
            service,
            state: TodayState::default(),
        }
    }

    /// Current state
    pub const fn state(&self) -> &TodayState {
        &self.state
    }

    /// The wrapped service
    pub const fn service(&self) -> &HealthService<P> {
        &self.service
    }

    /// Initialize, then load `today`'s steps and minutes
    ///
    /// Failures are recorded in the state rather than returned.
    pub async fn reload(&mut self, request_permissions: bool, today: NaiveDate) -> &TodayState {
        self.state.loading = true;
        self.state.error = None;

        let options = InitializationOptions { request_permissions };
        let outcome = match self.service.initialize(options).await {
            Ok(()) => {
                self.state.permission = PermissionState::Granted;
                self.service.get_daily_insights(today).await
            }
            Err(e) => {
                self.state.permission = PermissionState::Denied;
                Err(e)
            }
        };

        match outcome {
            Ok(insights) => {
                self.state.steps = insights.steps.steps;
                self.state.minutes = insights.activity.minutes;
                info!(
                    %today,
                    steps = self.state.steps,
                    minutes = self.state.minutes,
                    "Today reloaded"
                );
            }
            Err(e) => {
                if e.is_permission_error() {
                    warn!(%today, error = %e, "Health data access not granted");
                } else {
                    error!(%today, error = %e, "Today reload failed");
                }
                self.state.permission = PermissionState::Denied;
                self.state.error = Some(e.to_string());
                self.state.steps = 0;
                self.state.minutes = 0;
            }
        }

        self.state.loading = false;
        &self.state
    }
}

/// Average of each metric's ratio to its goal, each ratio clamped to `[0, 1]`
///
/// A zero goal contributes nothing.
///
/// ```rust
/// use activity_monitor::models::GoalSettings;
/// use activity_monitor::tracker::goal_progress;
///
/// let goals = GoalSettings::default(); // 8000 steps, 30 minutes
/// assert!((goal_progress(4000, 30, goals) - 0.75).abs() < f64::EPSILON);
/// assert!((goal_progress(20_000, 90, goals) - 1.0).abs() < f64::EPSILON);
/// ```
#[must_use]
pub fn goal_progress(steps: u64, minutes: u64, goals: GoalSettings) -> f64 {
    let ratio = |value: u64, goal: u32| {
        if goal == 0 {
            0.0
        } else {
            (value as f64 / f64::from(goal)).clamp(0.0, 1.0)
        }
    };
    (ratio(steps, goals.steps_goal) + ratio(minutes, goals.minutes_goal)) / 2.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_goal_progress_zero_goal_contributes_nothing() {
        let goals = GoalSettings {
            steps_goal: 0,
            minutes_goal: 30,
        };
        assert!((goal_progress(10_000, 15, goals) - 0.25).abs() < f64::EPSILON);
    }

    #[test]
    fn test_default_state_is_unknown() {
        let state = TodayState::default();
        assert_eq!(state.permission, PermissionState::Unknown);
        assert!(!state.loading);
        assert!(!state.is_granted());
    }
}
