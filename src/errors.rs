// ABOUTME: Unified error handling re-exported from activity-core
// ABOUTME: Provider-level HealthError plus the application-level AppError and ErrorCode
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Unified Error Handling
//!
//! Two layers:
//!
//! - [`HealthError`]: failures from provider selection, initialization and
//!   range queries.
//! - [`AppError`]: everything above the providers (storage, configuration,
//!   CLI), carrying an [`ErrorCode`]. Every `HealthError` converts into an
//!   `AppError` with a matching code.

pub use activity_core::errors::{AppError, AppResult, ErrorCode, HealthError, HealthResult};
