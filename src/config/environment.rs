// ABOUTME: Environment-based application configuration
// ABOUTME: Platform override, goals file location, demo seed and deployment environment
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::errors::{AppError, AppResult};
use activity_core::constants::{demo, env_config, paths};
use activity_core::models::Platform;
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::path::PathBuf;
use tracing::debug;

/// Deployment environment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Local development
    #[default]
    Development,
    /// Production
    Production,
    /// Test runs
    Testing,
}

impl Environment {
    /// Parse from string with fallback
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            "testing" | "test" => Self::Testing,
            _ => Self::Development,
        }
    }

    /// Check if this is a production environment
    #[must_use]
    pub const fn is_production(self) -> bool {
        matches!(self, Self::Production)
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
            Self::Testing => write!(f, "testing"),
        }
    }
}

/// Application configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Platform used to pick the health provider
    pub platform: Platform,
    /// Goals file location
    pub goals_path: PathBuf,
    /// Seed for synthetic demo data
    pub demo_seed: u64,
    /// Deployment environment
    pub environment: Environment,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            platform: Platform::current(),
            goals_path: default_goals_path(),
            demo_seed: demo::DEFAULT_SEED,
            environment: Environment::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns a `ConfigInvalid` error when `ACTIVITY_MONITOR_DEMO_SEED` is not
    /// an unsigned integer.
    pub fn from_env() -> AppResult<Self> {
        let platform = env::var(env_config::PLATFORM)
            .ok()
            .filter(|value| !value.trim().is_empty())
            .map_or_else(Platform::current, |value| Platform::from_identifier(&value));

        let goals_path = env::var_os(env_config::GOALS_PATH)
            .filter(|value| !value.is_empty())
            .map_or_else(default_goals_path, PathBuf::from);

        let demo_seed = match env::var(env_config::DEMO_SEED) {
            Ok(raw) => raw.trim().parse().map_err(|e| {
                AppError::config(format!(
                    "{} must be an unsigned integer, got '{raw}': {e}",
                    env_config::DEMO_SEED
                ))
            })?,
            Err(_) => demo::DEFAULT_SEED,
        };

        let environment = env::var(env_config::ENVIRONMENT)
            .map(|value| Environment::from_str_or_default(&value))
            .unwrap_or_default();

        let config = Self {
            platform,
            goals_path,
            demo_seed,
            environment,
        };
        debug!(
            platform = %config.platform,
            goals_path = %config.goals_path.display(),
            demo_seed = config.demo_seed,
            environment = %config.environment,
            "Configuration loaded"
        );
        Ok(config)
    }
}

/// `<user data dir>/activity-monitor/goals.json`, or relative to the working
/// directory when the platform has no data dir
#[must_use]
pub fn default_goals_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(paths::APP_DIR)
        .join(paths::GOALS_FILE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_environment_parsing_falls_back_to_development() {
        assert_eq!(Environment::from_str_or_default("PROD"), Environment::Production);
        assert_eq!(Environment::from_str_or_default("test"), Environment::Testing);
        assert_eq!(Environment::from_str_or_default("staging"), Environment::Development);
    }

    #[test]
    fn test_default_goals_path_ends_with_app_file() {
        let path = default_goals_path();
        assert!(path.ends_with("activity-monitor/goals.json"));
    }
}
