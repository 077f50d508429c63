//! Upper bound for a single backend call

use std::future::Future;
use std::time::Duration;

/// Run `future`, giving up after `limit`.
///
/// Returns `None` when the limit elapsed first. Without a timer runtime (no
/// `ssr` or `hydrate` feature) the future runs unbounded.
#[cfg(feature = "ssr")]
pub async fn with_timeout<F: Future>(limit: Duration, future: F) -> Option<F::Output> {
    tokio::time::timeout(limit, future).await.ok()
}

#[cfg(all(feature = "hydrate", not(feature = "ssr")))]
pub async fn with_timeout<F: Future>(limit: Duration, future: F) -> Option<F::Output> {
    use futures::future::{Either, select};

    let sleep = gloo_timers::future::sleep(limit);
    futures::pin_mut!(future);
    futures::pin_mut!(sleep);

    match select(future, sleep).await {
        Either::Left((output, _)) => Some(output),
        Either::Right(_) => None,
    }
}

#[cfg(not(any(feature = "ssr", feature = "hydrate")))]
pub async fn with_timeout<F: Future>(_limit: Duration, future: F) -> Option<F::Output> {
    Some(future.await)
}

#[cfg(all(test, feature = "ssr"))]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_completes_within_limit() {
        let result = with_timeout(Duration::from_secs(1), async { 42 }).await;
        assert_eq!(result, Some(42));
    }

    #[tokio::test]
    async fn test_gives_up_after_limit() {
        let result = with_timeout(
            Duration::from_millis(10),
            std::future::pending::<u32>(),
        )
        .await;
        assert_eq!(result, None);
    }
}
