// ABOUTME: Health service facade consumed by the UI layer
// ABOUTME: Forwards initialization and exposes daily and weekly insights over one resolved adapter
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::insights::{daily_insights, weekly_insights};
use super::registry::{HealthProviderHandle, HealthProviderRegistry};
use activity_core::errors::HealthResult;
use activity_core::models::{DailyInsights, Platform, WeeklyInsights};
use activity_providers::{HealthProvider, InitializationOptions};
use chrono::{DateTime, Local, NaiveDate, TimeZone};

/// Stateless coordinator over a single health provider
#[derive(Debug, Clone)]
pub struct HealthService<P = HealthProviderHandle> {
    provider: P,
}

impl HealthService<HealthProviderHandle> {
    /// Service over the registry's adapter for `platform`
    ///
    /// # Errors
    ///
    /// Returns `HealthError::UnsupportedPlatform` when no adapter exists for it.
    pub fn for_platform(registry: &HealthProviderRegistry, platform: &Platform) -> HealthResult<Self> {
        Ok(Self::new(registry.resolve(platform)?))
    }
}

impl<P: HealthProvider> HealthService<P> {
    /// Wrap a provider
    pub const fn new(provider: P) -> Self {
        Self { provider }
    }

    /// The wrapped provider
    pub const fn provider(&self) -> &P {
        &self.provider
    }

    /// Negotiate read access; see [`HealthProvider::initialize`]
    ///
    /// # Errors
    ///
    /// Returns `InitializationFailed` or `PermissionDenied` from the adapter.
    pub async fn initialize(&self, options: InitializationOptions) -> HealthResult<()> {
        self.provider.initialize(options).await
    }

    /// Steps and minutes for a calendar day in local time
    ///
    /// # Errors
    ///
    /// Fails as a whole when either underlying query fails.
    pub async fn get_daily_insights(&self, day: NaiveDate) -> HealthResult<DailyInsights> {
        daily_insights(&self.provider, day, &Local).await
    }

    /// Steps and minutes for a calendar day in `tz`
    ///
    /// # Errors
    ///
    /// Fails as a whole when either underlying query fails.
    pub async fn get_daily_insights_in<Tz: TimeZone>(
        &self,
        day: NaiveDate,
        tz: &Tz,
    ) -> HealthResult<DailyInsights> {
        daily_insights(&self.provider, day, tz).await
    }

    /// Per-day insights for every calendar day from `start` to `end`
    ///
    /// # Errors
    ///
    /// Returns `InvalidRange` when `start >= end` (without querying), or the
    /// first provider failure.
    pub async fn get_weekly_insights<Tz: TimeZone>(
        &self,
        start: DateTime<Tz>,
        end: DateTime<Tz>,
    ) -> HealthResult<WeeklyInsights> {
        weekly_insights(&self.provider, start, end).await
    }
}
