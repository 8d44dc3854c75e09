// ABOUTME: Core health provider trait shared by every platform adapter
// ABOUTME: Defines initialization options, provider kinds and the raw steps/minutes contract
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Health Provider Contract
//!
//! Every platform adapter implements [`HealthProvider`]: three operations over a
//! native health data store. The insight facade depends only on this trait and
//! never on adapter-specific detail.
//!
//! ## Request Side
//!
//! - **Initialization**: [`InitializationOptions`] decides between prompting for
//!   access and silently checking what is already granted.
//! - **Range queries**: a pair of UTC instants, both ends inclusive.
//!
//! ## Response Side
//!
//! - Steps as a non-negative integer sum.
//! - Exercise time in whole minutes.
//!
//! ## Error Handling
//!
//! All operations return `HealthResult<T>`. Native read failures always surface
//! as `HealthError::QueryFailed`; no adapter returns a partial sum.
//!
//! ## Thread Safety
//!
//! Implementations are `Send + Sync` and hold no mutable cross-call state, so a
//! single cached instance serves concurrent queries without extra locking.

use activity_core::constants::providers;
use activity_core::errors::HealthResult;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Options for [`HealthProvider::initialize`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InitializationOptions {
    /// Actively prompt for read access instead of only checking granted access
    pub request_permissions: bool,
}

impl InitializationOptions {
    /// Prompt the user for access
    #[must_use]
    pub const fn requesting() -> Self {
        Self {
            request_permissions: true,
        }
    }

    /// Only check access that is already granted
    #[must_use]
    pub const fn checking() -> Self {
        Self {
            request_permissions: false,
        }
    }
}

/// The closed set of provider adapters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProviderKind {
    /// Apple HealthKit (first platform)
    AppleHealth,
    /// Android Health Connect (second platform)
    HealthConnect,
}

impl ProviderKind {
    /// Display name used in logs and error messages
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::AppleHealth => providers::APPLE_HEALTH,
            Self::HealthConnect => providers::HEALTH_CONNECT,
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Capability interface every platform adapter implements
#[async_trait]
pub trait HealthProvider: Send + Sync {
    /// Which adapter this is
    fn kind(&self) -> ProviderKind;

    /// Negotiate read access to step-count and exercise data
    ///
    /// Repeated calls re-check (or re-request) every time; there is no
    /// "already initialized" short-circuit.
    ///
    /// # Errors
    ///
    /// - `InitializationFailed` when the native provider fails to start
    /// - `PermissionDenied` when the required read scopes are not granted
    async fn initialize(&self, options: InitializationOptions) -> HealthResult<()>;

    /// Total steps recorded between `start` and `end`
    ///
    /// # Errors
    ///
    /// Returns `QueryFailed` when the native read fails.
    async fn get_steps(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> HealthResult<u64>;

    /// Total exercise time, in whole minutes, for sessions within `start` and `end`
    ///
    /// # Errors
    ///
    /// Returns `QueryFailed` when the native read fails.
    async fn get_activity_minutes(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> HealthResult<u64>;
}
