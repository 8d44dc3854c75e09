// ABOUTME: Shared utilities for health provider implementations
// ABOUTME: Safe float-to-integer conversions and unit conversions for steps and minutes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use activity_core::constants::time::SECONDS_PER_MINUTE;

/// Type conversion utilities for safe float-to-integer conversions
pub mod conversions {
    /// Round an f64 to the nearest u64, clamping negatives and NaN to zero
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    #[must_use]
    pub fn round_to_u64(value: f64) -> u64 {
        if value.is_nan() {
            return 0;
        }
        value.round().max(0.0).min(u64::MAX as f64) as u64
    }
}

/// Whole minutes from a number of seconds, rounded to the nearest minute
///
/// ```rust
/// use activity_providers::utils::seconds_to_minutes;
///
/// assert_eq!(seconds_to_minutes(3600.0), 60);
/// assert_eq!(seconds_to_minutes(89.0), 1);
/// assert_eq!(seconds_to_minutes(90.0), 2);
/// ```
#[must_use]
pub fn seconds_to_minutes(seconds: f64) -> u64 {
    conversions::round_to_u64(seconds / SECONDS_PER_MINUTE)
}
