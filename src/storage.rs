//! Token Storage
//!
//! A single slot holding the bearer token issued at login. The slot is a
//! presence marker only: nothing here knows whether the token is still valid.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use thiserror::Error;

/// Persistence for the authentication token
pub trait TokenStore: Send + Sync {
    /// Read the stored token, if any
    fn read(&self) -> Result<Option<String>, StorageError>;

    /// Replace the stored token
    fn write(&self, token: &str) -> Result<(), StorageError>;

    /// Remove the stored token; removing an absent token succeeds
    fn delete(&self) -> Result<(), StorageError>;
}

/// On-disk layout of the token file
#[derive(Debug, Serialize, Deserialize)]
struct StoredToken {
    token: String,
    saved_at: DateTime<Utc>,
}

/// Token kept in a small JSON file
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// When the current token was written
    pub fn saved_at(&self) -> Result<Option<DateTime<Utc>>, StorageError> {
        Ok(self.load()?.map(|stored| stored.saved_at))
    }

    fn load(&self) -> Result<Option<StoredToken>, StorageError> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(StorageError::Io {
                    path: self.path.clone(),
                    error: e,
                })
            }
        };

        let stored = serde_json::from_str(&content).map_err(|e| StorageError::Corrupt {
            path: self.path.clone(),
            error: e.to_string(),
        })?;

        Ok(Some(stored))
    }
}

impl TokenStore for FileTokenStore {
    fn read(&self) -> Result<Option<String>, StorageError> {
        Ok(self.load()?.map(|stored| stored.token))
    }

    fn write(&self, token: &str) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| StorageError::Io {
                path: parent.to_path_buf(),
                error: e,
            })?;
        }

        let stored = StoredToken {
            token: token.to_string(),
            saved_at: Utc::now(),
        };
        let content = serde_json::to_string_pretty(&stored).map_err(|e| StorageError::Corrupt {
            path: self.path.clone(),
            error: e.to_string(),
        })?;

        std::fs::write(&self.path, content).map_err(|e| StorageError::Io {
            path: self.path.clone(),
            error: e,
        })?;

        tracing::debug!("Stored token in {:?}", self.path);
        Ok(())
    }

    fn delete(&self) -> Result<(), StorageError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => {
                tracing::debug!("Removed token file {:?}", self.path);
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StorageError::Io {
                path: self.path.clone(),
                error: e,
            }),
        }
    }
}

/// Process-local token slot
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    token: Mutex<Option<String>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: Mutex::new(Some(token.into())),
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn read(&self) -> Result<Option<String>, StorageError> {
        Ok(self.token.lock().map_err(|_| StorageError::Poisoned)?.clone())
    }

    fn write(&self, token: &str) -> Result<(), StorageError> {
        *self.token.lock().map_err(|_| StorageError::Poisoned)? = Some(token.to_string());
        Ok(())
    }

    fn delete(&self) -> Result<(), StorageError> {
        self.token.lock().map_err(|_| StorageError::Poisoned)?.take();
        Ok(())
    }
}

/// Token storage errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Failed to access token file {path:?}: {error}")]
    Io { path: PathBuf, error: std::io::Error },

    #[error("Token file {path:?} is unreadable: {error}")]
    Corrupt { path: PathBuf, error: String },

    #[error("Token slot lock poisoned")]
    Poisoned,
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_file_store_roundtrip() {
        let dir = tempdir().unwrap();
        let store = FileTokenStore::new(dir.path().join("nested").join("token.json"));

        assert_eq!(store.read().unwrap(), None);

        store.write("secret").unwrap();
        assert_eq!(store.read().unwrap().as_deref(), Some("secret"));
        assert!(store.saved_at().unwrap().is_some());

        store.write("rotated").unwrap();
        assert_eq!(store.read().unwrap().as_deref(), Some("rotated"));

        store.delete().unwrap();
        assert_eq!(store.read().unwrap(), None);
    }

    #[test]
    fn test_delete_missing_is_ok() {
        let dir = tempdir().unwrap();
        let store = FileTokenStore::new(dir.path().join("token.json"));
        assert!(store.delete().is_ok());
    }

    #[test]
    fn test_corrupt_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("token.json");
        std::fs::write(&path, "not json").unwrap();

        let store = FileTokenStore::new(&path);
        assert!(matches!(store.read(), Err(StorageError::Corrupt { .. })));
    }

    #[test]
    fn test_memory_store() {
        let store = MemoryTokenStore::new();
        assert_eq!(store.read().unwrap(), None);

        store.write("abc").unwrap();
        assert_eq!(store.read().unwrap().as_deref(), Some("abc"));

        store.delete().unwrap();
        store.delete().unwrap();
        assert_eq!(store.read().unwrap(), None);

        let seeded = MemoryTokenStore::with_token("seed");
        assert_eq!(seeded.read().unwrap().as_deref(), Some("seed"));
    }
}
