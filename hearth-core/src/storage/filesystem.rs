//! Filesystem implementation of the storage capability.
//!
//! Each key maps to one file under a data directory. Keys are sanitized to a
//! conservative character set before becoming file names, so callers may use
//! arbitrary strings as keys.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::debug;

use super::StorageService;
use crate::error::CoreError;

/// A [`StorageService`] that stores each value as a file in `data_dir`.
///
/// The directory is created on the first write. Reads of keys that have
/// never been written resolve to `Ok(None)`.
#[derive(Debug, Clone)]
pub struct FilesystemStorageService {
    data_dir: PathBuf,
}

impl FilesystemStorageService {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Creates a service rooted at the platform data directory for
    /// `app_name` (e.g. `~/.local/share/<app_name>` on Linux).
    pub fn with_default_data_dir(app_name: &str) -> Result<Self, CoreError> {
        let base = dirs::data_dir().ok_or_else(|| {
            CoreError::Internal("could not determine the user data directory".to_string())
        })?;
        Ok(Self::new(base.join(app_name)))
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    fn path_for_key(&self, key: &str) -> PathBuf {
        let sanitized: String = key
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        self.data_dir.join(format!("{sanitized}.json"))
    }
}

#[async_trait]
impl StorageService for FilesystemStorageService {
    async fn read_value(&self, key: &str) -> Result<Option<String>, CoreError> {
        let path = self.path_for_key(key);
        match tokio::fs::read_to_string(&path).await {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("no file for key '{}' at {:?}", key, path);
                Ok(None)
            }
            Err(e) => Err(CoreError::Storage {
                operation: "read".to_string(),
                key: key.to_string(),
                source: e,
            }),
        }
    }

    async fn write_value(&self, key: &str, value: &str) -> Result<(), CoreError> {
        tokio::fs::create_dir_all(&self.data_dir)
            .await
            .map_err(|e| CoreError::Filesystem {
                message: "failed to create data directory".to_string(),
                path: self.data_dir.clone(),
                source: e,
            })?;
        let path = self.path_for_key(key);
        tokio::fs::write(&path, value)
            .await
            .map_err(|e| CoreError::Storage {
                operation: "write".to_string(),
                key: key.to_string(),
                source: e,
            })
    }

    async fn remove_value(&self, key: &str) -> Result<(), CoreError> {
        let path = self.path_for_key(key);
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(CoreError::Storage {
                operation: "remove".to_string(),
                key: key.to_string(),
                source: e,
            }),
        }
    }
}
