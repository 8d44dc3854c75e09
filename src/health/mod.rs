// ABOUTME: Health data layer: provider selection, insight composition and the service facade
// ABOUTME: Everything the UI needs to turn native health reads into calendar-day insights
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Daily and weekly insight composition over any provider
pub mod insights;
/// Process-wide adapter cache keyed by platform
pub mod registry;
/// Facade consumed by the UI layer
pub mod service;

pub use insights::{daily_insights, weekly_insights};
pub use registry::{
    global_registry, install_global_registry, HealthProviderHandle, HealthProviderRegistry,
    NativeBackends,
};
pub use service::HealthService;
