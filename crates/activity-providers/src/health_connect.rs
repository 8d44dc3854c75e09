// ABOUTME: Android Health Connect provider adapter for step counts and exercise minutes
// ABOUTME: Delegates summation to the native aggregate API and validates granted read permissions
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::core::{HealthProvider, InitializationOptions, ProviderKind};
use crate::spi::{
    AccessType, AggregateRequest, AggregateResult, HealthConnectClient, NativeError, Permission,
    TimeRangeFilter,
};
use crate::utils::seconds_to_minutes;
use activity_core::constants::health_connect::{EXERCISE_SESSION_RECORD_TYPE, STEPS_RECORD_TYPE};
use activity_core::errors::{HealthError, HealthResult};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::{debug, error, warn};

const PROVIDER: ProviderKind = ProviderKind::HealthConnect;

/// Health Connect-backed provider (second platform)
pub struct HealthConnectProvider {
    client: Arc<dyn HealthConnectClient>,
    permissions: Vec<Permission>,
}

impl HealthConnectProvider {
    /// Create an adapter over a Health Connect bridge
    #[must_use]
    pub fn new(client: Arc<dyn HealthConnectClient>) -> Self {
        Self {
            client,
            permissions: vec![
                Permission::read(STEPS_RECORD_TYPE),
                Permission::read(EXERCISE_SESSION_RECORD_TYPE),
            ],
        }
    }

    /// Read permissions this adapter needs
    #[must_use]
    pub fn permissions(&self) -> &[Permission] {
        &self.permissions
    }

    /// Required record types absent from `granted`
    fn missing_record_types(&self, granted: &[Permission]) -> Vec<String> {
        self.permissions
            .iter()
            .filter(|required| {
                !granted.iter().any(|p| {
                    p.access_type == AccessType::Read && p.record_type == required.record_type
                })
            })
            .map(|p| p.record_type.clone())
            .collect()
    }

    async fn aggregate(
        &self,
        record_type: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> HealthResult<AggregateResult> {
        let request = AggregateRequest {
            record_type: record_type.to_owned(),
            time_range_filter: TimeRangeFilter::Between {
                start_time: start,
                end_time: end,
            },
        };

        debug!(
            provider = PROVIDER.name(),
            record_type,
            from = %start.to_rfc3339(),
            to = %end.to_rfc3339(),
            "Aggregating records"
        );

        self.client
            .aggregate_record(&request)
            .await
            .map_err(|e| query_failed(record_type, &e))
    }
}

fn query_failed(record_type: &str, err: &NativeError) -> HealthError {
    error!(provider = PROVIDER.name(), record_type, error = %err, "Aggregate query failed");
    HealthError::query_failed(PROVIDER.name(), record_type, err.message.clone())
}

fn unexpected_aggregate(expected: &str, result: &AggregateResult) -> HealthError {
    HealthError::query_failed(
        PROVIDER.name(),
        expected,
        format!("unexpected aggregate result {result:?}"),
    )
}

#[async_trait]
impl HealthProvider for HealthConnectProvider {
    fn kind(&self) -> ProviderKind {
        PROVIDER
    }

    async fn initialize(&self, options: InitializationOptions) -> HealthResult<()> {
        debug!(
            provider = PROVIDER.name(),
            options = %serde_json::to_string(&options).unwrap_or_default(),
            "Initializing"
        );

        let started = self.client.initialize().await.map_err(|e| {
            HealthError::InitializationFailed {
                provider: PROVIDER.name().to_owned(),
                details: e.message,
            }
        })?;
        debug!(provider = PROVIDER.name(), started, "Client initialization finished");
        if !started {
            return Err(HealthError::InitializationFailed {
                provider: PROVIDER.name().to_owned(),
                details: "Health Connect client did not start".to_owned(),
            });
        }

        let granted = if options.request_permissions {
            debug!(provider = PROVIDER.name(), "Requesting permissions");
            self.client.request_permission(&self.permissions).await
        } else {
            debug!(provider = PROVIDER.name(), "Checking granted permissions");
            self.client.get_granted_permissions().await
        }
        .map_err(|e| {
            error!(provider = PROVIDER.name(), error = %e, "Permission lookup failed");
            HealthError::InitializationFailed {
                provider: PROVIDER.name().to_owned(),
                details: e.message,
            }
        })?;

        let missing = self.missing_record_types(&granted);
        debug!(
            provider = PROVIDER.name(),
            authorized = missing.is_empty(),
            "Permission validation finished"
        );
        if !missing.is_empty() {
            warn!(provider = PROVIDER.name(), ?missing, "Read permissions not granted");
            return Err(HealthError::PermissionDenied {
                provider: PROVIDER.name().to_owned(),
                missing,
            });
        }

        Ok(())
    }

    async fn get_steps(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> HealthResult<u64> {
        match self.aggregate(STEPS_RECORD_TYPE, start, end).await? {
            AggregateResult::Steps { count_total } => Ok(count_total),
            other => Err(unexpected_aggregate(STEPS_RECORD_TYPE, &other)),
        }
    }

    async fn get_activity_minutes(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> HealthResult<u64> {
        match self.aggregate(EXERCISE_SESSION_RECORD_TYPE, start, end).await? {
            AggregateResult::ExerciseSession {
                exercise_duration_total,
            } => Ok(seconds_to_minutes(exercise_duration_total.in_seconds)),
            other => Err(unexpected_aggregate(EXERCISE_SESSION_RECORD_TYPE, &other)),
        }
    }
}
