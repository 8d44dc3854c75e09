// ABOUTME: Tests for logging configuration built from the environment
// ABOUTME: Format selection, production defaults and per-crate filter directives
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use activity_monitor::logging::{LogFormat, LoggingConfig};
use serial_test::serial;
use std::env;

const VARS: [&str; 5] = [
    "RUST_LOG",
    "LOG_FORMAT",
    "ENVIRONMENT",
    "LOG_INCLUDE_LOCATION",
    "LOG_INCLUDE_THREAD",
];

fn clear_env() {
    for key in VARS {
        env::remove_var(key);
    }
}

#[test]
#[serial]
fn test_logging_config_from_env() {
    clear_env();
    env::set_var("RUST_LOG", "debug");
    env::set_var("LOG_FORMAT", "json");
    env::set_var("ENVIRONMENT", "production");

    let config = LoggingConfig::from_env();
    clear_env();

    assert_eq!(config.level, "debug");
    assert_eq!(config.format, LogFormat::Json);
    assert_eq!(config.environment, "production");
    assert!(config.include_location);
    assert!(config.include_thread);
}

#[test]
#[serial]
fn test_development_defaults_stay_quiet() {
    clear_env();

    let config = LoggingConfig::from_env();

    assert_eq!(config.level, "warn");
    assert_eq!(config.format, LogFormat::Compact);
    assert_eq!(config.environment, "development");
    assert!(!config.include_location);
    assert!(!config.include_thread);
}

#[test]
fn test_filter_names_every_workspace_crate() {
    let config = LoggingConfig {
        level: "debug".to_owned(),
        ..LoggingConfig::default()
    };

    let filter = config.env_filter().to_string().to_lowercase();

    for target in ["activity_monitor", "activity_providers", "activity_core"] {
        assert!(filter.contains(&format!("{target}=debug")), "{filter}");
    }
}

#[test]
fn test_default_service_identity() {
    let config = LoggingConfig::default();

    assert_eq!(config.service_name, "activity-monitor");
    assert_eq!(config.service_version, env!("CARGO_PKG_VERSION"));
}

#[test]
fn test_directive_list_is_kept_as_given() {
    let config = LoggingConfig {
        level: "info,hyper=warn".to_owned(),
        ..LoggingConfig::default()
    };

    let filter = config.env_filter().to_string().to_lowercase();

    assert!(filter.contains("hyper=warn"), "{filter}");
    assert!(filter.split(',').any(|d| d == "info"), "{filter}");
    assert!(!filter.contains("activity_monitor"), "{filter}");
}
