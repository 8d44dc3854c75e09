// ABOUTME: Health data provider implementations for Apple HealthKit and Android Health Connect
// ABOUTME: Core provider trait, native SDK interface, adapters and synthetic native backends
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Health data provider implementations and core abstractions.
//!
//! This crate provides the unified provider layer over the native health
//! stores: HealthKit on iOS and Health Connect on Android. Both adapters speak
//! the same three-operation [`HealthProvider`] contract.

// Re-export activity-core modules so callers can reach shared types through this crate
pub use activity_core::constants;
pub use activity_core::errors;
pub use activity_core::models;

/// Core provider trait and initialization options
pub mod core;
/// Service Provider Interface for the native SDK bridges
pub mod spi;
/// Provider utility functions (type and unit conversion)
pub mod utils;

/// Apple HealthKit adapter
pub mod apple_health;
/// Android Health Connect adapter
pub mod health_connect;
/// In-memory native backends for development and tests
pub mod synthetic;

// Re-export key types for convenience

pub use apple_health::AppleHealthProvider;
pub use core::{HealthProvider, InitializationOptions, ProviderKind};
pub use health_connect::HealthConnectProvider;
pub use spi::{HealthConnectClient, HealthKitClient, NativeError, NativeResult};
pub use synthetic::{seed_demo_week, DemoData, NativeCallCounts, SyntheticHealthConnect, SyntheticHealthKit};
