//! Async test helpers
//!
//! Polling helpers for tests that observe the store from a task while
//! another thread mutates it.

use std::time::Duration;
use tokio::time::{sleep, timeout, Instant};

/// Error returned when a condition did not become true in time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaitTimeout {
    pub waited: Duration,
}

impl std::fmt::Display for WaitTimeout {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "condition not met after {:?}", self.waited)
    }
}

impl std::error::Error for WaitTimeout {}

/// Poll `condition` every `interval` until it holds or `limit` elapses
pub async fn wait_until<F>(mut condition: F, interval: Duration, limit: Duration) -> Result<(), WaitTimeout>
where
    F: FnMut() -> bool,
{
    let start = Instant::now();
    let poll = async {
        while !condition() {
            sleep(interval).await;
        }
    };
    timeout(limit, poll).await.map_err(|_| WaitTimeout {
        waited: start.elapsed(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[tokio::test]
    async fn test_wait_until_succeeds() {
        let calls = AtomicU32::new(0);
        let result = wait_until(
            || calls.fetch_add(1, Ordering::SeqCst) >= 3,
            Duration::from_millis(1),
            Duration::from_secs(1),
        )
        .await;
        assert!(result.is_ok());
        assert!(calls.load(Ordering::SeqCst) >= 4);
    }

    #[tokio::test]
    async fn test_wait_until_times_out() {
        let result = wait_until(|| false, Duration::from_millis(5), Duration::from_millis(20)).await;
        let err = result.unwrap_err();
        assert!(err.waited >= Duration::from_millis(20));
    }
}
