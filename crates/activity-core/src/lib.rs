// ABOUTME: Core types and date utilities for the activity monitor
// ABOUTME: Foundation crate with error handling, domain models, constants, and calendar-day helpers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Activity Core
//!
//! Foundation crate shared by the provider adapters and the application crate.
//! It changes rarely and carries no I/O.
//!
//! ## Modules
//!
//! - **errors**: `HealthError` for provider-level failures, `AppError` for everything else
//! - **models**: insight records, goal settings, permission state and platform identifiers
//! - **constants**: native record types, storage keys, defaults and environment variable names
//! - **dates**: the inclusive calendar-day range and day-bound computation

/// Unified error handling with provider-level and application-level error types
pub mod errors;

/// Constants organized by domain
pub mod constants;

/// Domain models (insights, goals, permission state, platform)
pub mod models;

/// Calendar-day utilities
pub mod dates;

pub use errors::{AppError, AppResult, ErrorCode, HealthError, HealthResult};
