// ABOUTME: JSON file-backed key-value store persisting goals across runs
// ABOUTME: Whole-file read-modify-write under an async mutex; a missing file reads as empty
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::KeyValueStore;
use crate::errors::{AppError, AppResult};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::sync::Mutex;
use tracing::debug;

type Entries = BTreeMap<String, String>;

/// Store kept as one JSON object in a file
///
/// The file and its parent directories are created on first write.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileStore {
    /// Store backed by `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    /// Backing file location
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load(&self) -> AppResult<Entries> {
        match fs::read_to_string(&self.path).await {
            Ok(content) if content.trim().is_empty() => Ok(Entries::new()),
            Ok(content) => serde_json::from_str(&content).map_err(|e| {
                AppError::storage(format!(
                    "Corrupt store file {}: {e}",
                    self.path.display()
                ))
                .with_source(e)
            }),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Entries::new()),
            Err(e) => Err(AppError::storage(format!(
                "Failed to read {}: {e}",
                self.path.display()
            ))
            .with_source(e)),
        }
    }

    async fn save(&self, entries: &Entries) -> AppResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await?;
            }
        }
        let content = serde_json::to_string_pretty(entries)?;
        fs::write(&self.path, content).await.map_err(|e| {
            AppError::storage(format!("Failed to write {}: {e}", self.path.display()))
                .with_source(e)
        })?;
        debug!(path = %self.path.display(), keys = entries.len(), "Store file written");
        Ok(())
    }

    async fn update<F>(&self, apply: F) -> AppResult<()>
    where
        F: FnOnce(&mut Entries) + Send,
    {
        let _guard = self.lock.lock().await;
        let mut entries = self.load().await?;
        apply(&mut entries);
        self.save(&entries).await
    }
}

#[async_trait]
impl KeyValueStore for FileStore {
    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        let _guard = self.lock.lock().await;
        Ok(self.load().await?.remove(key))
    }

    async fn set(&self, key: &str, value: &str) -> AppResult<()> {
        self.update(|entries| {
            entries.insert(key.to_owned(), value.to_owned());
        })
        .await
    }

    async fn remove(&self, key: &str) -> AppResult<()> {
        self.update(|entries| {
            entries.remove(key);
        })
        .await
    }

    async fn multi_get(&self, keys: &[&str]) -> AppResult<Vec<(String, Option<String>)>> {
        let _guard = self.lock.lock().await;
        let entries = self.load().await?;
        Ok(keys
            .iter()
            .map(|key| ((*key).to_owned(), entries.get(*key).cloned()))
            .collect())
    }

    async fn multi_set(&self, pairs: &[(&str, &str)]) -> AppResult<()> {
        self.update(|entries| {
            for (key, value) in pairs {
                entries.insert((*key).to_owned(), (*value).to_owned());
            }
        })
        .await
    }

    async fn multi_remove(&self, keys: &[&str]) -> AppResult<()> {
        self.update(|entries| {
            for key in keys {
                entries.remove(*key);
            }
        })
        .await
    }
}
