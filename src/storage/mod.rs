// ABOUTME: Local key-value storage abstraction used to persist goal settings
// ABOUTME: Pluggable backends (in-memory, JSON file) behind an async string-keyed trait
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// JSON file-backed store
pub mod file;
/// Goal settings persistence on top of a key-value store
pub mod goals;
/// In-memory store
pub mod memory;

use crate::errors::AppResult;
use async_trait::async_trait;

pub use file::FileStore;
pub use goals::{GoalsStore, StoredGoals};
pub use memory::MemoryStore;

/// Async string-keyed, string-valued store
///
/// # Examples
///
/// ```rust,no_run
/// use activity_monitor::storage::{KeyValueStore, MemoryStore};
/// # async fn example() -> activity_monitor::errors::AppResult<()> {
///
/// let store = MemoryStore::new();
/// store.set("goals.steps", "10000").await?;
/// assert_eq!(store.get("goals.steps").await?.as_deref(), Some("10000"));
///
/// store.remove("goals.steps").await?;
/// assert_eq!(store.get("goals.steps").await?, None);
/// # Ok(())
/// # }
/// ```
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Value stored under `key`, `None` when absent
    ///
    /// # Errors
    ///
    /// Returns a storage error if the backend cannot be read
    async fn get(&self, key: &str) -> AppResult<Option<String>>;

    /// Store `value` under `key`, replacing any previous value
    ///
    /// # Errors
    ///
    /// Returns a storage error if the backend cannot be written
    async fn set(&self, key: &str, value: &str) -> AppResult<()>;

    /// Remove `key`; removing an absent key is not an error
    ///
    /// # Errors
    ///
    /// Returns a storage error if the backend cannot be written
    async fn remove(&self, key: &str) -> AppResult<()>;

    /// Values for several keys, in the order requested
    ///
    /// # Errors
    ///
    /// Returns a storage error if the backend cannot be read
    async fn multi_get(&self, keys: &[&str]) -> AppResult<Vec<(String, Option<String>)>> {
        let mut values = Vec::with_capacity(keys.len());
        for key in keys {
            values.push(((*key).to_owned(), self.get(key).await?));
        }
        Ok(values)
    }

    /// Store several pairs
    ///
    /// # Errors
    ///
    /// Returns a storage error if the backend cannot be written
    async fn multi_set(&self, pairs: &[(&str, &str)]) -> AppResult<()> {
        for (key, value) in pairs {
            self.set(key, value).await?;
        }
        Ok(())
    }

    /// Remove several keys
    ///
    /// # Errors
    ///
    /// Returns a storage error if the backend cannot be written
    async fn multi_remove(&self, keys: &[&str]) -> AppResult<()> {
        for key in keys {
            self.remove(key).await?;
        }
        Ok(())
    }
}
