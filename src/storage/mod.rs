pub(crate) mod file_store;
pub(crate) mod storage_errors;
pub(crate) mod storage_model;
pub(crate) mod storage_traits;

pub use file_store::FileStore;
pub use storage_errors::StorageError;
pub use storage_model::AppState;
pub use storage_traits::StateStoreTrait;
