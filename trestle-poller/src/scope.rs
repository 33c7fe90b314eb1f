//! Cancellation scope for a single poll
//!
//! The caller's token and an optional timeout bound the whole run. The
//! token is checked first, so a fired token always wins over a finished
//! timer or an in-flight query.

use std::future::Future;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use crate::error::{PollError, Result};

pub(crate) async fn run_scoped<T, F>(
    cancel: &CancellationToken,
    timeout: Option<Duration>,
    run: F,
) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    let bounded = async {
        match timeout {
            Some(limit) => match tokio::time::timeout(limit, run).await {
                Ok(result) => result,
                Err(_) => Err(PollError::TimedOut(limit)),
            },
            None => run.await,
        }
    };

    tokio::select! {
        biased;
        _ = cancel.cancelled() => Err(PollError::Cancelled),
        result = bounded => result,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_completes_without_limits() {
        let cancel = CancellationToken::new();
        let value = run_scoped(&cancel, None, async { Ok(7) }).await.unwrap();
        assert_eq!(value, 7);
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout_interrupts_run() {
        let cancel = CancellationToken::new();
        let result: Result<()> = run_scoped(&cancel, Some(Duration::from_secs(2)), async {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok(())
        })
        .await;
        assert!(matches!(result, Err(PollError::TimedOut(d)) if d == Duration::from_secs(2)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_takes_precedence() {
        let cancel = CancellationToken::new();
        cancel.cancel();
        let result = run_scoped(&cancel, Some(Duration::from_secs(2)), async { Ok(1) }).await;
        assert!(matches!(result, Err(PollError::Cancelled)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_wakes_sleeping_run() {
        let cancel = CancellationToken::new();
        let trigger = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_secs(3)).await;
            trigger.cancel();
        });

        let start = tokio::time::Instant::now();
        let result: Result<()> = run_scoped(&cancel, None, async {
            tokio::time::sleep(Duration::from_secs(3600)).await;
            Ok(())
        })
        .await;
        assert!(matches!(result, Err(PollError::Cancelled)));
        assert!(start.elapsed() < Duration::from_secs(3600));
    }
}
