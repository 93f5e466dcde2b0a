//! Timeout wrapper for async operations.

use hospeda_core::HospedaError;
use std::future::Future;
use std::time::Duration;

/// Runs `operation` with a deadline, mapping expiry to [`HospedaError::Timeout`].
pub async fn with_timeout<Fut, T>(
    duration: Duration,
    operation: &str,
    fut: Fut,
) -> Result<T, HospedaError>
where
    Fut: Future<Output = Result<T, HospedaError>>,
{
    tokio::time::timeout(duration, fut).await.map_err(|_| {
        HospedaError::Timeout(format!("{operation} timed out after {duration:?}"))
    })?
}
