// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Provides logging setup, timestamp helpers, a scripted provider and granted synthetic stores
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(
    dead_code,
    clippy::wildcard_in_or_patterns,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::unwrap_used
)]
//! Shared test utilities for `activity_monitor`

use activity_monitor::constants::health_connect::{
    EXERCISE_SESSION_RECORD_TYPE, STEPS_RECORD_TYPE,
};
use activity_monitor::constants::health_kit::{STEP_COUNT_PERMISSION, WORKOUT_PERMISSION};
use activity_monitor::errors::{HealthError, HealthResult};
use activity_providers::{
    HealthProvider, InitializationOptions, ProviderKind, SyntheticHealthConnect,
    SyntheticHealthKit,
};
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, Once};

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        // Check for TEST_LOG environment variable to control test logging level
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            Ok("WARN" | "ERROR") | _ => tracing::Level::WARN, // Default to WARN for quiet tests
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

pub fn day(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

pub fn utc(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, minute, 0).unwrap()
}

/// HealthKit store with both read permissions already authorized
pub fn authorized_health_kit() -> SyntheticHealthKit {
    SyntheticHealthKit::authorized(&[STEP_COUNT_PERMISSION, WORKOUT_PERMISSION])
}

/// Health Connect client with both read permissions already granted
pub fn granted_health_connect() -> SyntheticHealthConnect {
    SyntheticHealthConnect::granted(&[STEPS_RECORD_TYPE, EXERCISE_SESSION_RECORD_TYPE])
}

/// Provider answering every query with fixed values and recording each call
#[derive(Debug, Default)]
pub struct ScriptedProvider {
    pub steps: u64,
    pub minutes: u64,
    pub fail_initialize: bool,
    pub fail_steps: bool,
    pub fail_minutes: bool,
    pub initialize_calls: AtomicUsize,
    pub query_calls: AtomicUsize,
    pub queried_ranges: Mutex<Vec<(DateTime<Utc>, DateTime<Utc>)>>,
}

impl ScriptedProvider {
    pub fn returning(steps: u64, minutes: u64) -> Self {
        Self {
            steps,
            minutes,
            ..Self::default()
        }
    }

    pub fn queries(&self) -> usize {
        self.query_calls.load(Ordering::SeqCst)
    }

    pub fn initializations(&self) -> usize {
        self.initialize_calls.load(Ordering::SeqCst)
    }

    fn record(&self, start: DateTime<Utc>, end: DateTime<Utc>) {
        self.query_calls.fetch_add(1, Ordering::SeqCst);
        self.queried_ranges.lock().unwrap().push((start, end));
    }
}

#[async_trait]
impl HealthProvider for ScriptedProvider {
    fn kind(&self) -> ProviderKind {
        ProviderKind::HealthConnect
    }

    async fn initialize(&self, _options: InitializationOptions) -> HealthResult<()> {
        self.initialize_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_initialize {
            return Err(HealthError::PermissionDenied {
                provider: "Scripted".to_owned(),
                missing: vec![STEPS_RECORD_TYPE.to_owned()],
            });
        }
        Ok(())
    }

    async fn get_steps(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> HealthResult<u64> {
        self.record(start, end);
        if self.fail_steps {
            return Err(HealthError::query_failed("Scripted", "steps", "boom"));
        }
        Ok(self.steps)
    }

    async fn get_activity_minutes(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> HealthResult<u64> {
        self.record(start, end);
        if self.fail_minutes {
            return Err(HealthError::query_failed("Scripted", "minutes", "boom"));
        }
        Ok(self.minutes)
    }
}
