// ABOUTME: Configuration management module for application settings
// ABOUTME: Environment-driven configuration; no config files are read
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Environment and application configuration
pub mod environment;

pub use environment::{default_goals_path, AppConfig, Environment};
