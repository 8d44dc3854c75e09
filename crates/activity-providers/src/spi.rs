// ABOUTME: Service Provider Interface for the native platform health SDKs
// ABOUTME: Opaque async contracts and provider-native shapes normalized by the adapters
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Native Health SDK Interface
//!
//! The native SDKs (HealthKit on iOS, Health Connect on Android) live outside
//! this crate. A platform bridge implements [`HealthKitClient`] or
//! [`HealthConnectClient`]; the adapters translate between these shapes and
//! the [`HealthProvider`](crate::core::HealthProvider) contract.
//!
//! The shapes mirror what the SDKs return, including their naming quirks:
//! HealthKit workouts carry `start`/`end` rather than `startDate`/`endDate`,
//! and Health Connect aggregates report `COUNT_TOTAL` and
//! `EXERCISE_DURATION_TOTAL.inSeconds`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failure reported by a native SDK call
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{message}")]
pub struct NativeError {
    /// Message as reported by the SDK
    pub message: String,
}

impl NativeError {
    /// Wrap a native message
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Result of a native SDK call
pub type NativeResult<T> = Result<T, NativeError>;

// ============================================================================
// HealthKit
// ============================================================================

/// Permission set passed to `initHealthKit`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthKitPermissions {
    /// Read permissions (e.g. `StepCount`, `Workout`)
    pub read: Vec<String>,
    /// Write permissions
    pub write: Vec<String>,
}

/// Query options accepted by HealthKit sample reads
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthInputOptions {
    /// Range start
    pub start_date: DateTime<Utc>,
    /// Range end
    pub end_date: DateTime<Utc>,
    /// Include samples the user entered by hand
    pub include_manually_added: bool,
    /// Sample type for generic sample queries (e.g. `Workout`)
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub sample_type: Option<String>,
}

/// A single quantity sample
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthValue {
    /// Sample value (steps for step-count samples)
    pub value: f64,
    /// Sample start
    pub start_date: DateTime<Utc>,
    /// Sample end
    pub end_date: DateTime<Utc>,
}

/// Workout record as HealthKit returns it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppleWorkoutSample {
    /// Workout activity name (e.g. `Running`)
    pub activity_name: String,
    /// Recording device
    pub device: String,
    /// Distance covered
    pub distance: f64,
    /// Workout start
    pub start: DateTime<Utc>,
    /// Workout end
    pub end: DateTime<Utc>,
    /// Source identifier
    pub source_id: String,
    /// Source name
    pub source_name: String,
    /// Whether the workout was tracked by a device rather than entered by hand
    pub tracked: bool,
}

/// Authorization status of one HealthKit permission
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AuthorizationStatus {
    /// The user was never asked
    NotDetermined,
    /// The user declined
    SharingDenied,
    /// The user granted access
    SharingAuthorized,
}

/// Status of one requested permission
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionStatus {
    /// Permission name
    pub permission: String,
    /// Current status
    pub status: AuthorizationStatus,
}

/// Native HealthKit bridge
#[async_trait]
pub trait HealthKitClient: Send + Sync {
    /// Whether HealthKit exists on this device
    async fn is_available(&self) -> NativeResult<bool>;

    /// Initialize the store and prompt for the given permissions
    async fn init_health_kit(&self, permissions: &HealthKitPermissions) -> NativeResult<()>;

    /// Read permission status without prompting
    async fn get_auth_status(
        &self,
        permissions: &HealthKitPermissions,
    ) -> NativeResult<Vec<PermissionStatus>>;

    /// Step-count samples within the option range
    async fn get_daily_step_count_samples(
        &self,
        options: &HealthInputOptions,
    ) -> NativeResult<Vec<HealthValue>>;

    /// Workout samples within the option range
    async fn get_samples(&self, options: &HealthInputOptions)
        -> NativeResult<Vec<AppleWorkoutSample>>;
}

// ============================================================================
// Health Connect
// ============================================================================

/// Access type of a Health Connect permission
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccessType {
    /// Read access
    Read,
    /// Write access
    Write,
}

/// A Health Connect permission
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Permission {
    /// Access type
    pub access_type: AccessType,
    /// Record type (e.g. `Steps`, `ExerciseSession`)
    pub record_type: String,
}

impl Permission {
    /// Read permission for a record type
    pub fn read(record_type: impl Into<String>) -> Self {
        Self {
            access_type: AccessType::Read,
            record_type: record_type.into(),
        }
    }
}

/// Time filter for Health Connect queries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "operator", rename_all = "camelCase")]
pub enum TimeRangeFilter {
    /// Records between two instants
    #[serde(rename_all = "camelCase")]
    Between {
        /// Range start
        start_time: DateTime<Utc>,
        /// Range end
        end_time: DateTime<Utc>,
    },
}

/// Aggregate request for one record type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregateRequest {
    /// Record type to aggregate
    pub record_type: String,
    /// Time filter
    pub time_range_filter: TimeRangeFilter,
}

/// Aggregate result, keyed by record type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "recordType")]
pub enum AggregateResult {
    /// Step count total
    Steps {
        /// Total steps in range
        #[serde(rename = "COUNT_TOTAL")]
        count_total: u64,
    },
    /// Exercise session duration total
    ExerciseSession {
        /// Total exercise duration in seconds
        #[serde(rename = "EXERCISE_DURATION_TOTAL")]
        exercise_duration_total: ExerciseDuration,
    },
}

/// Duration wrapper as reported by Health Connect
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExerciseDuration {
    /// Duration in seconds
    pub in_seconds: f64,
}

/// Native Health Connect bridge
#[async_trait]
pub trait HealthConnectClient: Send + Sync {
    /// Start the client; `false` when Health Connect is unavailable
    async fn initialize(&self) -> NativeResult<bool>;

    /// Prompt for permissions, returning those granted
    async fn request_permission(&self, permissions: &[Permission]) -> NativeResult<Vec<Permission>>;

    /// Permissions already granted, without prompting
    async fn get_granted_permissions(&self) -> NativeResult<Vec<Permission>>;

    /// Provider-side aggregation for one record type
    async fn aggregate_record(&self, request: &AggregateRequest) -> NativeResult<AggregateResult>;
}
