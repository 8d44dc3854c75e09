// ABOUTME: Application constants organized by domain
// ABOUTME: Native record types, provider names, goal defaults and limits, storage keys, env vars
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Provider display names used in logs and error messages
pub mod providers {
    /// Apple HealthKit adapter
    pub const APPLE_HEALTH: &str = "AppleHealth";
    /// Android Health Connect adapter
    pub const HEALTH_CONNECT: &str = "HealthConnect";
}

/// Runtime platform identifiers
pub mod platforms {
    /// Platform served by the HealthKit adapter
    pub const IOS: &str = "ios";
    /// Platform served by the Health Connect adapter
    pub const ANDROID: &str = "android";
}

/// Health Connect record types
pub mod health_connect {
    /// Step count records
    pub const STEPS_RECORD_TYPE: &str = "Steps";
    /// Exercise session records
    pub const EXERCISE_SESSION_RECORD_TYPE: &str = "ExerciseSession";
}

/// HealthKit read permissions and sample types
pub mod health_kit {
    /// Step count permission
    pub const STEP_COUNT_PERMISSION: &str = "StepCount";
    /// Workout permission
    pub const WORKOUT_PERMISSION: &str = "Workout";
    /// Sample type used to fetch workouts
    pub const WORKOUT_SAMPLE_TYPE: &str = "Workout";
}

/// Goal defaults and input limits
pub mod goals {
    /// Default daily steps goal
    pub const DEFAULT_STEPS_GOAL: u32 = 8_000;
    /// Default daily activity minutes goal
    pub const DEFAULT_MINUTES_GOAL: u32 = 30;
    /// Largest steps goal accepted (six digits)
    pub const MAX_STEPS_GOAL: u32 = 999_999;
    /// Largest minutes goal accepted (four digits)
    pub const MAX_MINUTES_GOAL: u32 = 9_999;
}

/// Local key-value storage keys
pub mod storage_keys {
    /// Steps goal, stored as a decimal string
    pub const STEPS_GOAL: &str = "goals.steps";
    /// Minutes goal, stored as a decimal string
    pub const MINUTES_GOAL: &str = "goals.minutes";
}

/// Environment variable names read by the configuration layer
pub mod env_config {
    /// Platform identifier override
    pub const PLATFORM: &str = "ACTIVITY_MONITOR_PLATFORM";
    /// Goals file location
    pub const GOALS_PATH: &str = "ACTIVITY_MONITOR_GOALS_PATH";
    /// Seed for synthetic demo data
    pub const DEMO_SEED: &str = "ACTIVITY_MONITOR_DEMO_SEED";
    /// Deployment environment
    pub const ENVIRONMENT: &str = "ENVIRONMENT";
}

/// Service identification for logging
pub mod service_names {
    /// Service name reported in startup logs
    pub const ACTIVITY_MONITOR: &str = "activity-monitor";
}

/// Time conversion factors
pub mod time {
    /// Seconds in one minute
    pub const SECONDS_PER_MINUTE: f64 = 60.0;
}

/// Synthetic demo data
pub mod demo {
    /// Seed used when `ACTIVITY_MONITOR_DEMO_SEED` is unset
    pub const DEFAULT_SEED: u64 = 42;
}

/// Local file locations
pub mod paths {
    /// Directory under the user data dir
    pub const APP_DIR: &str = "activity-monitor";
    /// Goals file name
    pub const GOALS_FILE: &str = "goals.json";
}
