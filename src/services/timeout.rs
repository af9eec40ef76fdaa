use std::future::Future;
use std::time::Duration;

use crate::domain::errors::{ClientError, ClientResult};

/// Race a backend call against a fixed deadline. Expiry is reported as
/// [`ClientError::Timeout`] and handled like any other transient failure.
pub async fn with_timeout<T, F>(limit: Duration, call: F) -> ClientResult<T>
where
    F: Future<Output = ClientResult<T>>,
{
    match tokio::time::timeout(limit, call).await {
        Ok(result) => result,
        Err(_) => {
            tracing::warn!("Backend call exceeded {:?}", limit);
            Err(ClientError::Timeout(limit))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_hanging_call_times_out() {
        let result: ClientResult<()> =
            with_timeout(Duration::from_secs(10), futures::future::pending()).await;
        assert_eq!(result, Err(ClientError::Timeout(Duration::from_secs(10))));
    }

    #[tokio::test]
    async fn test_fast_call_passes_through() {
        let result = with_timeout(Duration::from_secs(10), async { Ok::<_, ClientError>(5) }).await;
        assert_eq!(result, Ok(5));

        let err: ClientResult<()> =
            with_timeout(Duration::from_secs(10), async { Err(ClientError::Unauthorized) }).await;
        assert_eq!(err, Err(ClientError::Unauthorized));
    }
}
