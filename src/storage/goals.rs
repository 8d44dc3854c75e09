// ABOUTME: Goal settings persistence over any key-value store
// ABOUTME: Goals are stored as decimal strings; absent or unreadable values fall back to defaults
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::KeyValueStore;
use crate::errors::AppResult;
use activity_core::constants::storage_keys::{MINUTES_GOAL, STEPS_GOAL};
use activity_core::models::GoalSettings;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, warn};

/// Goals as read back from storage; `None` means unset
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredGoals {
    /// Stored steps goal
    pub steps: Option<u32>,
    /// Stored minutes goal
    pub minutes: Option<u32>,
}

impl StoredGoals {
    /// Fill unset goals with the defaults
    #[must_use]
    pub fn or_defaults(self) -> GoalSettings {
        let defaults = GoalSettings::default();
        GoalSettings {
            steps_goal: self.steps.unwrap_or(defaults.steps_goal),
            minutes_goal: self.minutes.unwrap_or(defaults.minutes_goal),
        }
    }
}

/// Reads and writes the two goal keys
#[derive(Clone)]
pub struct GoalsStore {
    store: Arc<dyn KeyValueStore>,
}

impl GoalsStore {
    /// Goals persisted in `store`
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Persist both goals as decimal strings
    ///
    /// # Errors
    ///
    /// Returns a storage error if the backend cannot be written
    pub async fn save_goals(&self, goals: GoalSettings) -> AppResult<()> {
        let steps = goals.steps_goal.to_string();
        let minutes = goals.minutes_goal.to_string();
        self.store
            .multi_set(&[(STEPS_GOAL, steps.as_str()), (MINUTES_GOAL, minutes.as_str())])
            .await?;
        debug!(steps_goal = goals.steps_goal, minutes_goal = goals.minutes_goal, "Goals saved");
        Ok(())
    }

    /// Stored goals; unset or unparsable values come back as `None`
    ///
    /// # Errors
    ///
    /// Returns a storage error if the backend cannot be read
    pub async fn load_goals(&self) -> AppResult<StoredGoals> {
        let values = self.store.multi_get(&[STEPS_GOAL, MINUTES_GOAL]).await?;
        let mut goals = StoredGoals::default();
        for (key, value) in values {
            let parsed = value.as_deref().and_then(|raw| parse_goal(&key, raw));
            match key.as_str() {
                STEPS_GOAL => goals.steps = parsed,
                MINUTES_GOAL => goals.minutes = parsed,
                _ => {}
            }
        }
        Ok(goals)
    }

    /// Stored goals with defaults applied to unset values
    ///
    /// # Errors
    ///
    /// Returns a storage error if the backend cannot be read
    pub async fn load_or_default(&self) -> AppResult<GoalSettings> {
        Ok(self.load_goals().await?.or_defaults())
    }

    /// Remove both goals
    ///
    /// # Errors
    ///
    /// Returns a storage error if the backend cannot be written
    pub async fn clear_goals(&self) -> AppResult<()> {
        self.store.multi_remove(&[STEPS_GOAL, MINUTES_GOAL]).await
    }
}

fn parse_goal(key: &str, raw: &str) -> Option<u32> {
    match raw.trim().parse::<u32>() {
        Ok(value) if value > 0 => Some(value),
        Ok(_) | Err(_) => {
            warn!(key, value = raw, "Ignoring unreadable stored goal");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    #[tokio::test]
    async fn test_unset_goals_fall_back_to_defaults() {
        let store = GoalsStore::new(Arc::new(MemoryStore::new()));
        assert_eq!(store.load_goals().await.unwrap(), StoredGoals::default());
        assert_eq!(store.load_or_default().await.unwrap(), GoalSettings::default());
    }

    #[tokio::test]
    async fn test_goals_are_stored_as_decimal_strings() {
        let memory = MemoryStore::new();
        let store = GoalsStore::new(Arc::new(memory.clone()));
        store
            .save_goals(GoalSettings::new(12_000, 45).unwrap())
            .await
            .unwrap();

        assert_eq!(memory.get(STEPS_GOAL).await.unwrap().as_deref(), Some("12000"));
        assert_eq!(memory.get(MINUTES_GOAL).await.unwrap().as_deref(), Some("45"));
    }

    #[tokio::test]
    async fn test_garbage_value_reads_as_unset() {
        let memory = MemoryStore::new();
        memory.set(STEPS_GOAL, "lots").await.unwrap();
        memory.set(MINUTES_GOAL, "20").await.unwrap();
        let store = GoalsStore::new(Arc::new(memory));

        let goals = store.load_goals().await.unwrap();
        assert_eq!(goals.steps, None);
        assert_eq!(goals.minutes, Some(20));
        assert_eq!(goals.or_defaults().steps_goal, 8_000);
    }
}
