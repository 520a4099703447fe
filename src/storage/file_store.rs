use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use log::debug;

use super::storage_errors::StorageError;
use super::storage_model::AppState;
use super::storage_traits::StateStoreTrait;
use crate::constants::STORAGE_FILE_NAME;

/// JSON-file-backed state store, standing in for the platform key-value
/// storage: one document under a fixed name, overwritten on every save.
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Stores the state under [`STORAGE_FILE_NAME`] inside `dir`.
    pub fn new(dir: impl AsRef<Path>) -> Self {
        FileStore {
            path: dir.as_ref().join(STORAGE_FILE_NAME),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl StateStoreTrait for FileStore {
    async fn load(&self) -> Result<Option<AppState>, StorageError> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No persisted state at {}", self.path.display());
                return Ok(None);
            }
            Err(e) => return Err(StorageError::Io(e)),
        };
        let state = serde_json::from_slice(&bytes)?;
        Ok(Some(state))
    }

    async fn save(&self, state: &AppState) -> Result<(), StorageError> {
        let json = serde_json::to_vec_pretty(state)?;
        tokio::fs::write(&self.path, json).await?;
        debug!("Persisted state to {}", self.path.display());
        Ok(())
    }
}
