use async_trait::async_trait;

use super::storage_errors::StorageError;
use super::storage_model::AppState;

/// Key-value persistence boundary. The store holds one JSON-serializable
/// state snapshot under a fixed key and offers no transactions or history.
#[async_trait]
pub trait StateStoreTrait: Send + Sync {
    /// Returns the persisted state, or `None` on first run.
    async fn load(&self) -> Result<Option<AppState>, StorageError>;

    async fn save(&self, state: &AppState) -> Result<(), StorageError>;
}
