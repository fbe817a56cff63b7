//! Local key store
//!
//! One JSON object file holding the user-supplied Gemini key under
//! `gemini_api_key`. Saving a non-empty key writes it, saving an empty key
//! removes the entry. Other entries in the file are left alone.

use serde_json::{Map, Value};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::sync::Mutex;

pub const API_KEY_ENTRY: &str = "gemini_api_key";

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Corrupt store file {path}: {source}")]
    Corrupt {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

pub struct CredentialStore {
    path: PathBuf,
    // Serializes read-modify-write cycles on the file
    lock: Mutex<()>,
}

impl CredentialStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into(), lock: Mutex::new(()) }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Stored key, `None` when the file or entry is missing or blank.
    pub async fn load(&self) -> Result<Option<String>, StoreError> {
        let _guard = self.lock.lock().await;
        let entries = self.read_entries().await?;
        Ok(entries
            .get(API_KEY_ENTRY)
            .and_then(Value::as_str)
            .filter(|k| !k.trim().is_empty())
            .map(str::to_string))
    }

    /// Trimmed non-empty key is written; anything else clears the entry.
    pub async fn save(&self, key: &str) -> Result<(), StoreError> {
        let key = key.trim();
        let _guard = self.lock.lock().await;
        let mut entries = self.read_entries().await?;

        if key.is_empty() {
            if entries.remove(API_KEY_ENTRY).is_none() {
                return Ok(());
            }
            tracing::info!("Removed stored API key from {}", self.path.display());
        } else {
            entries.insert(API_KEY_ENTRY.to_string(), Value::String(key.to_string()));
            tracing::info!("Saved API key to {}", self.path.display());
        }

        self.write_entries(&entries).await
    }

    pub async fn clear(&self) -> Result<(), StoreError> {
        self.save("").await
    }

    async fn read_entries(&self) -> Result<Map<String, Value>, StoreError> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Map::new()),
            Err(source) => return Err(self.io_error(source)),
        };

        if content.trim().is_empty() {
            return Ok(Map::new());
        }

        serde_json::from_str(&content).map_err(|source| StoreError::Corrupt {
            path: self.path.display().to_string(),
            source,
        })
    }

    async fn write_entries(&self, entries: &Map<String, Value>) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            tokio::fs::create_dir_all(parent).await.map_err(|e| self.io_error(e))?;
        }

        let content = serde_json::to_string_pretty(entries).map_err(|source| StoreError::Corrupt {
            path: self.path.display().to_string(),
            source,
        })?;

        tokio::fs::write(&self.path, content).await.map_err(|e| self.io_error(e))
    }

    fn io_error(&self, source: std::io::Error) -> StoreError {
        StoreError::Io { path: self.path.display().to_string(), source }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_store() -> CredentialStore {
        let path = std::env::temp_dir()
            .join(format!("lendon-store-{}", uuid::Uuid::new_v4()))
            .join("local_storage.json");
        CredentialStore::new(path)
    }

    #[tokio::test]
    async fn test_missing_file_reads_as_absent() {
        let store = temp_store();
        assert_eq!(store.load().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_save_and_load() {
        let store = temp_store();
        store.save("  AIzaSy-user  ").await.unwrap();
        assert_eq!(store.load().await.unwrap(), Some("AIzaSy-user".to_string()));

        store.save("AIzaSy-other").await.unwrap();
        assert_eq!(store.load().await.unwrap(), Some("AIzaSy-other".to_string()));
    }

    #[tokio::test]
    async fn test_empty_save_deletes_entry() {
        let store = temp_store();
        store.save("AIzaSy-user").await.unwrap();

        store.save("").await.unwrap();

        assert_eq!(store.load().await.unwrap(), None);
        let raw = tokio::fs::read_to_string(store.path()).await.unwrap();
        assert!(!raw.contains(API_KEY_ENTRY));
    }

    #[tokio::test]
    async fn test_clear_without_file_is_noop() {
        let store = temp_store();
        store.clear().await.unwrap();
        assert!(!store.path().exists());
    }

    #[tokio::test]
    async fn test_other_entries_survive() {
        let store = temp_store();
        tokio::fs::create_dir_all(store.path().parent().unwrap()).await.unwrap();
        tokio::fs::write(store.path(), r#"{"ui_lang":"en"}"#).await.unwrap();

        store.save("K").await.unwrap();
        store.clear().await.unwrap();

        let raw = tokio::fs::read_to_string(store.path()).await.unwrap();
        assert!(raw.contains("ui_lang"));
    }

    #[tokio::test]
    async fn test_corrupt_file_is_reported() {
        let store = temp_store();
        tokio::fs::create_dir_all(store.path().parent().unwrap()).await.unwrap();
        tokio::fs::write(store.path(), "not json").await.unwrap();

        assert!(matches!(store.load().await, Err(StoreError::Corrupt { .. })));
    }
}
