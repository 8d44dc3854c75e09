// ABOUTME: Main library entry point for the activity monitor
// ABOUTME: Provider selection, daily and weekly insights, goal storage and the today tracker
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Activity Monitor
//!
//! Reads daily step counts and exercise minutes from the platform health store
//! (HealthKit on iOS, Health Connect on Android) and tracks progress toward
//! user-configurable goals.
//!
//! ## Architecture
//!
//! - **Providers** (`activity-providers`): one adapter per native store behind
//!   the `HealthProvider` contract
//! - **Health**: the process-wide registry that picks the adapter for the
//!   running platform, and the facade that shapes raw range queries into
//!   calendar-day insights
//! - **Storage**: key-value persistence for the user's goals
//! - **Tracker**: the reload cycle behind the "today" screen
//! - **Config / Logging**: environment-driven settings and `tracing` setup
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use activity_monitor::health::{global_registry, HealthService};
//! use activity_monitor::models::Platform;
//! use activity_providers::InitializationOptions;
//! use chrono::Local;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let provider = global_registry().resolve(&Platform::Ios)?;
//!     let service = HealthService::new(provider);
//!     service.initialize(InitializationOptions::requesting()).await?;
//!
//!     let today = service.get_daily_insights(Local::now().date_naive()).await?;
//!     println!("{} steps, {} minutes", today.steps.steps, today.activity.minutes);
//!     Ok(())
//! }
//! ```

// Re-export activity-core modules so callers can keep `use activity_monitor::models::*` etc.
pub use activity_core::{constants, dates, models};

/// Environment-driven application configuration
pub mod config;

/// Unified error types
pub mod errors;

/// Provider registry, insight composition and the health service facade
pub mod health;

/// Structured logging setup
pub mod logging;

/// Key-value persistence for goal settings
pub mod storage;

/// Reload cycle and goal progress behind the today screen
pub mod tracker;
