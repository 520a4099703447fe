use std::fmt::Display;
use std::future::Future;

use log::warn;

/// Runs a remote call and downgrades any failure to the local fallback,
/// logging the degradation. This is the single place the
/// try-remote/catch/fallback policy lives.
pub async fn with_remote_fallback<T, E, Fut, F>(operation: &str, remote: Fut, fallback: F) -> T
where
    E: Display,
    Fut: Future<Output = Result<T, E>>,
    F: FnOnce() -> T,
{
    match remote.await {
        Ok(value) => value,
        Err(e) => {
            warn!("{} failed, falling back to local data: {}", operation, e);
            fallback()
        }
    }
}
