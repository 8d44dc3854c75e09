// ABOUTME: Synthetic in-memory HealthKit and Health Connect backends for development and testing
// ABOUTME: Configurable samples, permissions and failures without a device or native SDK
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

// RwLock poisoning errors are converted to HealthError::ConfigurationError on the
// setter side and to NativeError on the SDK side

//! # Synthetic Native Backends
//!
//! In-memory stand-ins for the native SDKs. Unlike a real bridge they:
//!
//! - Need no device, entitlement or user prompt
//! - Accept injected samples, permission grants and failure toggles
//! - Count every native call so tests can assert what was (not) invoked
//! - Can seed a deterministic week of demo data
//!
//! ## Thread Safety
//!
//! State sits behind `RwLock`; counters are atomics. One instance can serve
//! concurrent queries from a cached adapter.

use crate::spi::{
    AccessType, AggregateRequest, AggregateResult, AppleWorkoutSample, AuthorizationStatus,
    ExerciseDuration, HealthConnectClient, HealthInputOptions, HealthKitClient,
    HealthKitPermissions, HealthValue, NativeError, NativeResult, Permission, PermissionStatus,
    TimeRangeFilter,
};
use activity_core::constants::health_connect::{EXERCISE_SESSION_RECORD_TYPE, STEPS_RECORD_TYPE};
use activity_core::constants::providers;
use activity_core::dates::{date_range, day_bounds};
use activity_core::errors::{HealthError, HealthResult};
use activity_core::models::TimeRange;
use async_trait::async_trait;
use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Snapshot of native calls made against a synthetic backend
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NativeCallCounts {
    /// Client start-up calls (`is_available` / `initialize`)
    pub initialize: usize,
    /// Prompting permission requests
    pub request_permissions: usize,
    /// Silent permission checks
    pub check_permissions: usize,
    /// Data queries (samples or aggregates)
    pub queries: usize,
}

#[derive(Debug, Default)]
struct CallCounter {
    initialize: AtomicUsize,
    request_permissions: AtomicUsize,
    check_permissions: AtomicUsize,
    queries: AtomicUsize,
}

impl CallCounter {
    fn snapshot(&self) -> NativeCallCounts {
        NativeCallCounts {
            initialize: self.initialize.load(Ordering::SeqCst),
            request_permissions: self.request_permissions.load(Ordering::SeqCst),
            check_permissions: self.check_permissions.load(Ordering::SeqCst),
            queries: self.queries.load(Ordering::SeqCst),
        }
    }

    fn bump(counter: &AtomicUsize) {
        counter.fetch_add(1, Ordering::SeqCst);
    }
}

/// One generated step reading
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DemoStepSample {
    /// Reading start
    pub start: DateTime<Utc>,
    /// Reading end
    pub end: DateTime<Utc>,
    /// Steps in the reading
    pub count: u64,
}

/// One generated workout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DemoWorkout {
    /// Workout start
    pub start: DateTime<Utc>,
    /// Workout end
    pub end: DateTime<Utc>,
}

/// Deterministic demo data for a run of days
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DemoData {
    /// Hourly step readings
    pub steps: Vec<DemoStepSample>,
    /// Workouts
    pub workouts: Vec<DemoWorkout>,
}

/// Generate a week of demo data ending on `today` (inclusive), seeded for reproducibility
#[must_use]
pub fn seed_demo_week<Tz: TimeZone>(today: NaiveDate, tz: &Tz, seed: u64) -> DemoData {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut data = DemoData::default();
    let first = today - Duration::days(6);

    for day in date_range(first, today) {
        let midnight = day_bounds(day, tz).start;
        for hour in 7..21 {
            let start = midnight + Duration::hours(hour);
            data.steps.push(DemoStepSample {
                start,
                end: start + Duration::minutes(59),
                count: rng.gen_range(100..900),
            });
        }
        let workouts: i64 = rng.gen_range(0..3);
        for slot in 0..workouts {
            let start = midnight + Duration::hours(7 + slot * 5);
            data.workouts.push(DemoWorkout {
                start,
                end: start + Duration::minutes(rng.gen_range(15..60)),
            });
        }
    }
    data
}

fn poisoned(lock: &str) -> NativeError {
    NativeError::new(format!("RwLock poisoned: {lock} lock"))
}

fn configuration_error(provider: &str, lock: &str) -> HealthError {
    HealthError::ConfigurationError {
        provider: provider.to_owned(),
        details: format!("RwLock poisoned: {lock} lock"),
    }
}

// ============================================================================
// HealthKit
// ============================================================================

#[derive(Debug, Clone)]
struct StepSample {
    value: HealthValue,
    manually_added: bool,
}

#[derive(Debug)]
struct HealthKitState {
    available: bool,
    grant_on_request: bool,
    authorized: HashSet<String>,
    step_samples: Vec<StepSample>,
    workouts: Vec<AppleWorkoutSample>,
    permission_failure: Option<String>,
    query_failure: Option<String>,
}

/// Synthetic HealthKit bridge
#[derive(Debug)]
pub struct SyntheticHealthKit {
    state: RwLock<HealthKitState>,
    calls: CallCounter,
}

impl Default for SyntheticHealthKit {
    fn default() -> Self {
        Self::new()
    }
}

impl SyntheticHealthKit {
    /// Available store, nothing authorized yet, prompts grant everything requested
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: RwLock::new(HealthKitState {
                available: true,
                grant_on_request: true,
                authorized: HashSet::new(),
                step_samples: Vec::new(),
                workouts: Vec::new(),
                permission_failure: None,
                query_failure: None,
            }),
            calls: CallCounter::default(),
        }
    }

    /// Store with the given permissions already authorized
    #[must_use]
    pub fn authorized(permissions: &[&str]) -> Self {
        let kit = Self::new();
        if let Ok(mut state) = kit.state.write() {
            state
                .authorized
                .extend(permissions.iter().map(|p| (*p).to_owned()));
        }
        kit
    }

    fn write_state(&self) -> HealthResult<RwLockWriteGuard<'_, HealthKitState>> {
        self.state
            .write()
            .map_err(|_| configuration_error(providers::APPLE_HEALTH, "health_kit_state"))
    }

    fn read_state(&self) -> NativeResult<RwLockReadGuard<'_, HealthKitState>> {
        self.state.read().map_err(|_| poisoned("health_kit_state"))
    }

    /// Toggle device availability
    ///
    /// # Errors
    ///
    /// Returns `HealthError::ConfigurationError` if the internal `RwLock` is poisoned.
    pub fn set_available(&self, available: bool) -> HealthResult<()> {
        self.write_state()?.available = available;
        Ok(())
    }

    /// Whether a prompt grants the requested permissions
    ///
    /// # Errors
    ///
    /// Returns `HealthError::ConfigurationError` if the internal `RwLock` is poisoned.
    pub fn set_grant_on_request(&self, grant: bool) -> HealthResult<()> {
        self.write_state()?.grant_on_request = grant;
        Ok(())
    }

    /// Revoke a permission, as the user would from the Settings app
    ///
    /// # Errors
    ///
    /// Returns `HealthError::ConfigurationError` if the internal `RwLock` is poisoned.
    pub fn revoke(&self, permission: &str) -> HealthResult<()> {
        self.write_state()?.authorized.remove(permission);
        Ok(())
    }

    /// Make authorization prompts and status checks fail with `message`
    /// (`None` restores them)
    ///
    /// # Errors
    ///
    /// Returns `HealthError::ConfigurationError` if the internal `RwLock` is poisoned.
    pub fn set_permission_failure(&self, message: Option<&str>) -> HealthResult<()> {
        self.write_state()?.permission_failure = message.map(str::to_owned);
        Ok(())
    }

    /// Make every data query fail with `message` (`None` restores normal reads)
    ///
    /// # Errors
    ///
    /// Returns `HealthError::ConfigurationError` if the internal `RwLock` is poisoned.
    pub fn set_query_failure(&self, message: Option<&str>) -> HealthResult<()> {
        self.write_state()?.query_failure = message.map(str::to_owned);
        Ok(())
    }

    /// Add one step-count sample recorded by a device
    ///
    /// # Errors
    ///
    /// Returns `HealthError::ConfigurationError` if the internal `RwLock` is poisoned.
    pub fn add_step_sample(&self, sample: HealthValue) -> HealthResult<()> {
        self.push_step_sample(sample, false)
    }

    /// Add one step-count sample entered by hand in the Health app
    ///
    /// Only returned to queries that set `include_manually_added`.
    ///
    /// # Errors
    ///
    /// Returns `HealthError::ConfigurationError` if the internal `RwLock` is poisoned.
    pub fn add_manual_step_sample(&self, sample: HealthValue) -> HealthResult<()> {
        self.push_step_sample(sample, true)
    }

    fn push_step_sample(&self, value: HealthValue, manually_added: bool) -> HealthResult<()> {
        self.write_state()?.step_samples.push(StepSample {
            value,
            manually_added,
        });
        Ok(())
    }

    /// Add one workout
    ///
    /// # Errors
    ///
    /// Returns `HealthError::ConfigurationError` if the internal `RwLock` is poisoned.
    pub fn add_workout(&self, workout: AppleWorkoutSample) -> HealthResult<()> {
        self.write_state()?.workouts.push(workout);
        Ok(())
    }

    /// Load generated demo data
    ///
    /// # Errors
    ///
    /// Returns `HealthError::ConfigurationError` if the internal `RwLock` is poisoned.
    pub fn load_demo(&self, data: &DemoData) -> HealthResult<()> {
        let mut state = self.write_state()?;
        state.step_samples.extend(data.steps.iter().map(|s| StepSample {
            value: HealthValue {
                value: s.count as f64,
                start_date: s.start,
                end_date: s.end,
            },
            manually_added: false,
        }));
        state
            .workouts
            .extend(data.workouts.iter().map(|w| AppleWorkoutSample {
                activity_name: "Walking".to_owned(),
                device: "Synthetic Watch".to_owned(),
                distance: 0.0,
                start: w.start,
                end: w.end,
                source_id: "synthetic".to_owned(),
                source_name: "Synthetic".to_owned(),
                tracked: true,
            }));
        drop(state);
        Ok(())
    }

    /// Native calls made so far
    #[must_use]
    pub fn calls(&self) -> NativeCallCounts {
        self.calls.snapshot()
    }
}

#[async_trait]
impl HealthKitClient for SyntheticHealthKit {
    async fn is_available(&self) -> NativeResult<bool> {
        CallCounter::bump(&self.calls.initialize);
        Ok(self.read_state()?.available)
    }

    async fn init_health_kit(&self, permissions: &HealthKitPermissions) -> NativeResult<()> {
        CallCounter::bump(&self.calls.request_permissions);
        let mut state = self
            .state
            .write()
            .map_err(|_| poisoned("health_kit_state"))?;
        if !state.available {
            return Err(NativeError::new("HealthKit is not available"));
        }
        if let Some(message) = &state.permission_failure {
            return Err(NativeError::new(message.clone()));
        }
        if state.grant_on_request {
            state.authorized.extend(permissions.read.iter().cloned());
        }
        drop(state);
        Ok(())
    }

    async fn get_auth_status(
        &self,
        permissions: &HealthKitPermissions,
    ) -> NativeResult<Vec<PermissionStatus>> {
        CallCounter::bump(&self.calls.check_permissions);
        let state = self.read_state()?;
        if let Some(message) = &state.permission_failure {
            return Err(NativeError::new(message.clone()));
        }
        Ok(permissions
            .read
            .iter()
            .map(|permission| PermissionStatus {
                permission: permission.clone(),
                status: if state.authorized.contains(permission) {
                    AuthorizationStatus::SharingAuthorized
                } else {
                    AuthorizationStatus::SharingDenied
                },
            })
            .collect())
    }

    async fn get_daily_step_count_samples(
        &self,
        options: &HealthInputOptions,
    ) -> NativeResult<Vec<HealthValue>> {
        CallCounter::bump(&self.calls.queries);
        let state = self.read_state()?;
        if let Some(message) = &state.query_failure {
            return Err(NativeError::new(message.clone()));
        }
        let range = TimeRange {
            start: options.start_date,
            end: options.end_date,
        };
        Ok(state
            .step_samples
            .iter()
            .filter(|s| options.include_manually_added || !s.manually_added)
            .filter(|s| range.contains(s.value.start_date))
            .map(|s| s.value.clone())
            .collect())
    }

    async fn get_samples(
        &self,
        options: &HealthInputOptions,
    ) -> NativeResult<Vec<AppleWorkoutSample>> {
        CallCounter::bump(&self.calls.queries);
        let state = self.read_state()?;
        if let Some(message) = &state.query_failure {
            return Err(NativeError::new(message.clone()));
        }
        let range = TimeRange {
            start: options.start_date,
            end: options.end_date,
        };
        Ok(state
            .workouts
            .iter()
            .filter(|w| range.overlaps(w.start, w.end))
            .cloned()
            .collect())
    }
}

// ============================================================================
// Health Connect
// ============================================================================

#[derive(Debug, Clone, Copy)]
struct StepsRecord {
    start_time: DateTime<Utc>,
    count: u64,
}

#[derive(Debug, Clone, Copy)]
struct ExerciseSessionRecord {
    start_time: DateTime<Utc>,
    end_time: DateTime<Utc>,
}

#[derive(Debug)]
struct HealthConnectState {
    available: bool,
    grant_on_request: bool,
    granted: HashSet<Permission>,
    steps: Vec<StepsRecord>,
    sessions: Vec<ExerciseSessionRecord>,
    permission_failure: Option<String>,
    query_failure: Option<String>,
}

/// Synthetic Health Connect bridge
#[derive(Debug)]
pub struct SyntheticHealthConnect {
    state: RwLock<HealthConnectState>,
    calls: CallCounter,
}

impl Default for SyntheticHealthConnect {
    fn default() -> Self {
        Self::new()
    }
}

impl SyntheticHealthConnect {
    /// Available client, nothing granted yet, prompts grant everything requested
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: RwLock::new(HealthConnectState {
                available: true,
                grant_on_request: true,
                granted: HashSet::new(),
                steps: Vec::new(),
                sessions: Vec::new(),
                permission_failure: None,
                query_failure: None,
            }),
            calls: CallCounter::default(),
        }
    }

    /// Client with read access already granted for the given record types
    #[must_use]
    pub fn granted(record_types: &[&str]) -> Self {
        let connect = Self::new();
        if let Ok(mut state) = connect.state.write() {
            state
                .granted
                .extend(record_types.iter().map(|r| Permission::read(*r)));
        }
        connect
    }

    fn write_state(&self) -> HealthResult<RwLockWriteGuard<'_, HealthConnectState>> {
        self.state
            .write()
            .map_err(|_| configuration_error(providers::HEALTH_CONNECT, "health_connect_state"))
    }

    fn read_state(&self) -> NativeResult<RwLockReadGuard<'_, HealthConnectState>> {
        self.state
            .read()
            .map_err(|_| poisoned("health_connect_state"))
    }

    /// Toggle whether the client starts
    ///
    /// # Errors
    ///
    /// Returns `HealthError::ConfigurationError` if the internal `RwLock` is poisoned.
    pub fn set_available(&self, available: bool) -> HealthResult<()> {
        self.write_state()?.available = available;
        Ok(())
    }

    /// Whether a prompt grants the requested permissions
    ///
    /// # Errors
    ///
    /// Returns `HealthError::ConfigurationError` if the internal `RwLock` is poisoned.
    pub fn set_grant_on_request(&self, grant: bool) -> HealthResult<()> {
        self.write_state()?.grant_on_request = grant;
        Ok(())
    }

    /// Revoke read access for a record type
    ///
    /// # Errors
    ///
    /// Returns `HealthError::ConfigurationError` if the internal `RwLock` is poisoned.
    pub fn revoke(&self, record_type: &str) -> HealthResult<()> {
        self.write_state()?
            .granted
            .retain(|p| p.record_type != record_type);
        Ok(())
    }

    /// Make permission requests and checks fail with `message` (`None` restores them)
    ///
    /// # Errors
    ///
    /// Returns `HealthError::ConfigurationError` if the internal `RwLock` is poisoned.
    pub fn set_permission_failure(&self, message: Option<&str>) -> HealthResult<()> {
        self.write_state()?.permission_failure = message.map(str::to_owned);
        Ok(())
    }

    /// Make every aggregate query fail with `message` (`None` restores normal reads)
    ///
    /// # Errors
    ///
    /// Returns `HealthError::ConfigurationError` if the internal `RwLock` is poisoned.
    pub fn set_query_failure(&self, message: Option<&str>) -> HealthResult<()> {
        self.write_state()?.query_failure = message.map(str::to_owned);
        Ok(())
    }

    /// Add a steps record
    ///
    /// # Errors
    ///
    /// Returns `HealthError::ConfigurationError` if the internal `RwLock` is poisoned.
    pub fn add_steps(&self, start_time: DateTime<Utc>, count: u64) -> HealthResult<()> {
        self.write_state()?
            .steps
            .push(StepsRecord { start_time, count });
        Ok(())
    }

    /// Add an exercise session
    ///
    /// # Errors
    ///
    /// Returns `HealthError::ConfigurationError` if the internal `RwLock` is poisoned.
    pub fn add_exercise_session(
        &self,
        start_time: DateTime<Utc>,
        end_time: DateTime<Utc>,
    ) -> HealthResult<()> {
        self.write_state()?.sessions.push(ExerciseSessionRecord {
            start_time,
            end_time,
        });
        Ok(())
    }

    /// Load generated demo data
    ///
    /// # Errors
    ///
    /// Returns `HealthError::ConfigurationError` if the internal `RwLock` is poisoned.
    pub fn load_demo(&self, data: &DemoData) -> HealthResult<()> {
        let mut state = self.write_state()?;
        state.steps.extend(data.steps.iter().map(|s| StepsRecord {
            start_time: s.start,
            count: s.count,
        }));
        state
            .sessions
            .extend(data.workouts.iter().map(|w| ExerciseSessionRecord {
                start_time: w.start,
                end_time: w.end,
            }));
        drop(state);
        Ok(())
    }

    /// Native calls made so far
    #[must_use]
    pub fn calls(&self) -> NativeCallCounts {
        self.calls.snapshot()
    }
}

/// Seconds of `[start, end]` that fall inside `range`
fn overlap_seconds(range: &TimeRange, start: DateTime<Utc>, end: DateTime<Utc>) -> f64 {
    let clipped_start = start.max(range.start);
    let clipped_end = end.min(range.end);
    if clipped_end <= clipped_start {
        return 0.0;
    }
    (clipped_end - clipped_start).num_milliseconds() as f64 / 1000.0
}

#[async_trait]
impl HealthConnectClient for SyntheticHealthConnect {
    async fn initialize(&self) -> NativeResult<bool> {
        CallCounter::bump(&self.calls.initialize);
        Ok(self.read_state()?.available)
    }

    async fn request_permission(&self, permissions: &[Permission]) -> NativeResult<Vec<Permission>> {
        CallCounter::bump(&self.calls.request_permissions);
        let mut state = self
            .state
            .write()
            .map_err(|_| poisoned("health_connect_state"))?;
        if let Some(message) = &state.permission_failure {
            return Err(NativeError::new(message.clone()));
        }
        if state.grant_on_request {
            state.granted.extend(permissions.iter().cloned());
        }
        let granted = state.granted.iter().cloned().collect();
        drop(state);
        Ok(granted)
    }

    async fn get_granted_permissions(&self) -> NativeResult<Vec<Permission>> {
        CallCounter::bump(&self.calls.check_permissions);
        let state = self.read_state()?;
        if let Some(message) = &state.permission_failure {
            return Err(NativeError::new(message.clone()));
        }
        Ok(state.granted.iter().cloned().collect())
    }

    async fn aggregate_record(&self, request: &AggregateRequest) -> NativeResult<AggregateResult> {
        CallCounter::bump(&self.calls.queries);
        let state = self.read_state()?;
        if let Some(message) = &state.query_failure {
            return Err(NativeError::new(message.clone()));
        }
        let readable = state.granted.iter().any(|p| {
            p.access_type == AccessType::Read && p.record_type == request.record_type
        });
        if !readable {
            return Err(NativeError::new(format!(
                "SecurityException: read permission for {} not granted",
                request.record_type
            )));
        }

        let TimeRangeFilter::Between {
            start_time,
            end_time,
        } = request.time_range_filter;
        let range = TimeRange {
            start: start_time,
            end: end_time,
        };

        match request.record_type.as_str() {
            STEPS_RECORD_TYPE => Ok(AggregateResult::Steps {
                count_total: state
                    .steps
                    .iter()
                    .filter(|r| range.contains(r.start_time))
                    .map(|r| r.count)
                    .sum(),
            }),
            EXERCISE_SESSION_RECORD_TYPE => Ok(AggregateResult::ExerciseSession {
                exercise_duration_total: ExerciseDuration {
                    in_seconds: state
                        .sessions
                        .iter()
                        .map(|s| overlap_seconds(&range, s.start_time, s.end_time))
                        .sum(),
                },
            }),
            other => Err(NativeError::new(format!("Unsupported record type {other}"))),
        }
    }
}
