// ABOUTME: Apple HealthKit provider adapter for step counts and workout minutes
// ABOUTME: Sums raw step samples and workout durations fetched through the HealthKit bridge
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Apple HealthKit Adapter
//!
//! HealthKit offers no aggregate query through the bridge, so this adapter does
//! the summing itself:
//!
//! - **Steps**: every step-count sample in range, manually entered ones included.
//! - **Minutes**: every workout in range, `end - start` per workout, totalled in
//!   seconds and rounded to the nearest whole minute.
//!
//! Read permission is checked through the authorization status of the
//! `StepCount` and `Workout` read permissions after (optionally) prompting.

use crate::core::{HealthProvider, InitializationOptions, ProviderKind};
use crate::spi::{
    AppleWorkoutSample, AuthorizationStatus, HealthInputOptions, HealthKitClient,
    HealthKitPermissions, NativeError, PermissionStatus,
};
use crate::utils::{conversions, seconds_to_minutes};
use activity_core::constants::health_kit;
use activity_core::errors::{HealthError, HealthResult};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::{debug, error, warn};

const PROVIDER: ProviderKind = ProviderKind::AppleHealth;

/// A workout normalized to start/end instants
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkoutInterval {
    /// Workout start
    pub start_date: DateTime<Utc>,
    /// Workout end
    pub end_date: DateTime<Utc>,
}

impl WorkoutInterval {
    /// Absolute workout length in seconds
    #[must_use]
    pub fn duration_seconds(&self) -> i64 {
        (self.end_date - self.start_date).num_seconds().abs()
    }
}

impl From<&AppleWorkoutSample> for WorkoutInterval {
    fn from(sample: &AppleWorkoutSample) -> Self {
        Self {
            start_date: sample.start,
            end_date: sample.end,
        }
    }
}

/// Total workout time in whole minutes, rounded to the nearest minute
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn total_workout_minutes(workouts: &[WorkoutInterval]) -> u64 {
    let seconds: i64 = workouts.iter().map(WorkoutInterval::duration_seconds).sum();
    seconds_to_minutes(seconds as f64)
}

/// HealthKit-backed provider (first platform)
pub struct AppleHealthProvider {
    client: Arc<dyn HealthKitClient>,
    permissions: HealthKitPermissions,
}

impl AppleHealthProvider {
    /// Create an adapter over a HealthKit bridge
    #[must_use]
    pub fn new(client: Arc<dyn HealthKitClient>) -> Self {
        Self {
            client,
            permissions: HealthKitPermissions {
                read: vec![
                    health_kit::STEP_COUNT_PERMISSION.to_owned(),
                    health_kit::WORKOUT_PERMISSION.to_owned(),
                ],
                write: Vec::new(),
            },
        }
    }

    /// Read permissions this adapter needs
    #[must_use]
    pub fn permissions(&self) -> &HealthKitPermissions {
        &self.permissions
    }

    fn missing_permissions(&self, statuses: &[PermissionStatus]) -> Vec<String> {
        self.permissions
            .read
            .iter()
            .filter(|required| {
                !statuses.iter().any(|s| {
                    &s.permission == *required && s.status == AuthorizationStatus::SharingAuthorized
                })
            })
            .cloned()
            .collect()
    }

    async fn get_workouts(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> HealthResult<Vec<WorkoutInterval>> {
        let options = HealthInputOptions {
            start_date: start,
            end_date: end,
            include_manually_added: true,
            sample_type: Some(health_kit::WORKOUT_SAMPLE_TYPE.to_owned()),
        };

        debug!(
            provider = PROVIDER.name(),
            from = %start.to_rfc3339(),
            to = %end.to_rfc3339(),
            "Retrieving workouts"
        );

        let samples = self
            .client
            .get_samples(&options)
            .await
            .map_err(|e| query_failed("workouts", &e))?;

        Ok(samples.iter().map(WorkoutInterval::from).collect())
    }
}

fn initialization_failed(details: impl Into<String>) -> HealthError {
    HealthError::InitializationFailed {
        provider: PROVIDER.name().to_owned(),
        details: details.into(),
    }
}

fn query_failed(query: &str, err: &NativeError) -> HealthError {
    error!(provider = PROVIDER.name(), query, error = %err, "HealthKit query failed");
    HealthError::query_failed(PROVIDER.name(), query, err.message.clone())
}

#[async_trait]
impl HealthProvider for AppleHealthProvider {
    fn kind(&self) -> ProviderKind {
        PROVIDER
    }

    async fn initialize(&self, options: InitializationOptions) -> HealthResult<()> {
        debug!(
            provider = PROVIDER.name(),
            request_permissions = options.request_permissions,
            "Initializing"
        );

        let available = self
            .client
            .is_available()
            .await
            .map_err(|e| initialization_failed(e.message))?;
        if !available {
            return Err(initialization_failed("HealthKit is not available on this device"));
        }

        if options.request_permissions {
            self.client
                .init_health_kit(&self.permissions)
                .await
                .map_err(|e| {
                    error!(provider = PROVIDER.name(), error = %e, "initHealthKit failed");
                    initialization_failed(e.message)
                })?;
        }

        let statuses = self
            .client
            .get_auth_status(&self.permissions)
            .await
            .map_err(|e| initialization_failed(e.message))?;

        let missing = self.missing_permissions(&statuses);
        if !missing.is_empty() {
            warn!(provider = PROVIDER.name(), ?missing, "Read permissions not granted");
            return Err(HealthError::PermissionDenied {
                provider: PROVIDER.name().to_owned(),
                missing,
            });
        }

        debug!(provider = PROVIDER.name(), "Initialization completed");
        Ok(())
    }

    async fn get_steps(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> HealthResult<u64> {
        let options = HealthInputOptions {
            start_date: start,
            end_date: end,
            include_manually_added: true,
            sample_type: None,
        };

        debug!(
            provider = PROVIDER.name(),
            from = %start.to_rfc3339(),
            to = %end.to_rfc3339(),
            "Retrieving step samples"
        );

        let samples = self
            .client
            .get_daily_step_count_samples(&options)
            .await
            .map_err(|e| query_failed("steps", &e))?;

        let total: f64 = samples.iter().map(|sample| sample.value).sum();
        Ok(conversions::round_to_u64(total))
    }

    async fn get_activity_minutes(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> HealthResult<u64> {
        let workouts = self.get_workouts(start, end).await?;
        Ok(total_workout_minutes(&workouts))
    }
}
