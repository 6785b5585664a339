//! JSON-file gateway: one file per logical key under the app data directory.

use std::path::PathBuf;

use async_trait::async_trait;

use super::PersistenceGateway;
use crate::error::StorageError;

/// Default on-device persistence. Each key maps to `<root>/<key>.json`; the
/// root directory is created on first write.
pub struct FileGateway {
    root: PathBuf,
}

impl FileGateway {
    /// Gateway rooted at an explicit directory.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Gateway rooted at `~/.config/habitgrove[-dev]/` based on
    /// HABITGROVE_ENV. Set HABITGROVE_ENV=dev to use the development data
    /// directory.
    pub fn default_location() -> Self {
        let base = dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config");
        let env = std::env::var("HABITGROVE_ENV").unwrap_or_else(|_| "production".to_string());
        let dir = if env == "dev" {
            base.join("habitgrove-dev")
        } else {
            base.join("habitgrove")
        };
        Self::new(dir)
    }

    pub fn root(&self) -> &std::path::Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(format!("{key}.json"))
    }
}

#[async_trait]
impl PersistenceGateway for FileGateway {
    async fn load(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        match tokio::fs::read(self.path_for(key)).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(StorageError::LoadFailed {
                key: key.to_string(),
                message: err.to_string(),
            }),
        }
    }

    async fn save(&self, key: &str, bytes: &[u8]) -> Result<(), StorageError> {
        tokio::fs::create_dir_all(&self.root)
            .await
            .map_err(|err| StorageError::SaveFailed {
                key: key.to_string(),
                message: err.to_string(),
            })?;
        tokio::fs::write(self.path_for(key), bytes)
            .await
            .map_err(|err| StorageError::SaveFailed {
                key: key.to_string(),
                message: err.to_string(),
            })
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        match tokio::fs::remove_file(self.path_for(key)).await {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(StorageError::RemoveFailed {
                key: key.to_string(),
                message: err.to_string(),
            }),
        }
    }
}
