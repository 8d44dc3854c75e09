// ABOUTME: Unified error handling with standard error codes for the activity monitor
// ABOUTME: Application-level AppError plus re-exported provider-level HealthError
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Unified Error Handling System
//!
//! Two layers of errors:
//!
//! - [`HealthError`]: failures of the health provider layer (platform resolution,
//!   initialization, permissions, range validation, native queries).
//! - [`AppError`]: application failures (goal storage, configuration, CLI), with a
//!   stable [`ErrorCode`]. Every `HealthError` converts into an `AppError`.

mod health;

pub use health::{HealthError, HealthResult};

use serde::{Deserialize, Serialize};
use std::error::Error as StdError;
use std::fmt;
use std::io;
use thiserror::Error;

/// Standard error codes used throughout the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Health data access is not granted
    PermissionDenied,
    /// The input is invalid
    InvalidInput,
    /// A value is outside its accepted range
    ValueOutOfRange,
    /// The runtime platform has no health provider
    UnsupportedPlatform,
    /// The native health provider could not be used
    ProviderUnavailable,
    /// A native health provider query failed
    ProviderQueryFailed,
    /// Configuration is invalid
    ConfigInvalid,
    /// Local storage failed
    StorageError,
    /// Serialization or deserialization failed
    SerializationError,
    /// Unexpected internal failure
    InternalError,
}

impl ErrorCode {
    /// Get a user-friendly description of this error
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::PermissionDenied => "Access to health data has not been granted",
            Self::InvalidInput => "The provided input is invalid",
            Self::ValueOutOfRange => "The provided value is outside the acceptable range",
            Self::UnsupportedPlatform => "This platform has no health data provider",
            Self::ProviderUnavailable => "The health data provider is unavailable",
            Self::ProviderQueryFailed => "Reading from the health data provider failed",
            Self::ConfigInvalid => "Configuration is invalid",
            Self::StorageError => "Storage operation failed",
            Self::SerializationError => "Data serialization/deserialization failed",
            Self::InternalError => "An internal error occurred",
        }
    }

    /// Whether the user can recover by acting outside the app and reloading
    #[must_use]
    pub const fn is_user_recoverable(self) -> bool {
        matches!(self, Self::PermissionDenied | Self::ProviderUnavailable)
    }
}

/// Unified application error type
#[derive(Debug, Error)]
pub struct AppError {
    /// Error code
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Source error for error chaining
    #[source]
    pub source: Option<Box<dyn StdError + Send + Sync>>,
}

impl AppError {
    /// Create a new `AppError` with the given code and message
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            source: None,
        }
    }

    /// Attach a source error for error chaining
    #[must_use]
    pub fn with_source(mut self, source: impl StdError + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Invalid input
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidInput, message)
    }

    /// Value outside its accepted range
    pub fn out_of_range(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ValueOutOfRange, message)
    }

    /// Configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ConfigInvalid, message)
    }

    /// Storage error
    pub fn storage(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::StorageError, message)
    }

    /// Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.description(), self.message)
    }
}

impl From<HealthError> for AppError {
    fn from(error: HealthError) -> Self {
        let code = match &error {
            HealthError::UnsupportedPlatform { .. } => ErrorCode::UnsupportedPlatform,
            HealthError::InitializationFailed { .. } => ErrorCode::ProviderUnavailable,
            HealthError::PermissionDenied { .. } => ErrorCode::PermissionDenied,
            HealthError::InvalidRange { .. } => ErrorCode::InvalidInput,
            HealthError::QueryFailed { .. } => ErrorCode::ProviderQueryFailed,
            HealthError::ConfigurationError { .. } => ErrorCode::InternalError,
        };
        Self::new(code, error.to_string()).with_source(error)
    }
}

impl From<io::Error> for AppError {
    fn from(error: io::Error) -> Self {
        Self::new(ErrorCode::StorageError, error.to_string()).with_source(error)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(error: serde_json::Error) -> Self {
        Self::new(ErrorCode::SerializationError, error.to_string()).with_source(error)
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;
