// ABOUTME: Structured error types for health provider operations
// ABOUTME: Covers platform resolution, initialization, permissions, range validation, and queries
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{DateTime, Utc};
use thiserror::Error;

/// Errors raised by the provider adapters, the registry and the insight facade
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum HealthError {
    /// No adapter exists for the runtime platform
    #[error("Invalid platform for health service: {platform}")]
    UnsupportedPlatform {
        /// Platform identifier that was requested
        platform: String,
    },

    /// The native provider failed to start
    #[error("Error initializing {provider} Service: {details}")]
    InitializationFailed {
        /// Provider display name
        provider: String,
        /// Failure details reported by the provider
        details: String,
    },

    /// Required read scopes are not granted after the check or request
    #[error("Error getting permissions for {provider} Service")]
    PermissionDenied {
        /// Provider display name
        provider: String,
        /// Record types or permissions still missing
        missing: Vec<String>,
    },

    /// Range start is the same instant as or after its end
    #[error("startDate cannot be the same or after endDate ({start} >= {end})")]
    InvalidRange {
        /// Requested start
        start: DateTime<Utc>,
        /// Requested end
        end: DateTime<Utc>,
    },

    /// A read against the native provider failed
    #[error("{provider} {query} query failed: {details}")]
    QueryFailed {
        /// Provider display name
        provider: String,
        /// Query that failed (e.g. "steps", "activity minutes")
        query: String,
        /// Failure details reported by the provider
        details: String,
    },

    /// Internal provider state is unusable (poisoned lock in a synthetic backend)
    #[error("{provider} configuration error: {details}")]
    ConfigurationError {
        /// Provider display name
        provider: String,
        /// Error details
        details: String,
    },
}

impl HealthError {
    /// Whether this failure means access to health data is not granted
    ///
    /// The UI surfaces these as a non-granted state plus a message; the user
    /// recovers by granting access externally and reloading.
    #[must_use]
    pub const fn is_permission_error(&self) -> bool {
        matches!(
            self,
            Self::InitializationFailed { .. } | Self::PermissionDenied { .. }
        )
    }

    /// Provider the error originated from, if any
    #[must_use]
    pub fn provider(&self) -> Option<&str> {
        match self {
            Self::InitializationFailed { provider, .. }
            | Self::PermissionDenied { provider, .. }
            | Self::QueryFailed { provider, .. }
            | Self::ConfigurationError { provider, .. } => Some(provider),
            Self::UnsupportedPlatform { .. } | Self::InvalidRange { .. } => None,
        }
    }

    /// Build a `QueryFailed` error
    #[must_use]
    pub fn query_failed(
        provider: impl Into<String>,
        query: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self::QueryFailed {
            provider: provider.into(),
            query: query.into(),
            details: details.into(),
        }
    }
}

/// Result type for provider operations
pub type HealthResult<T> = Result<T, HealthError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_permission_errors_are_classified() {
        let denied = HealthError::PermissionDenied {
            provider: "HealthConnect".to_owned(),
            missing: vec!["Steps".to_owned()],
        };
        assert!(denied.is_permission_error());
        assert_eq!(
            denied.to_string(),
            "Error getting permissions for HealthConnect Service"
        );

        let query = HealthError::query_failed("AppleHealth", "steps", "timeout");
        assert!(!query.is_permission_error());
        assert_eq!(query.provider(), Some("AppleHealth"));
    }

    #[test]
    fn test_unsupported_platform_message() {
        let err = HealthError::UnsupportedPlatform {
            platform: "macos".to_owned(),
        };
        assert!(err.to_string().starts_with("Invalid platform for health service"));
        assert_eq!(err.provider(), None);
    }
}
