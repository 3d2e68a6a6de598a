use std::time::Duration;

use crate::{CancellationToken, TaskError};

/// Async counterpart of [`crate::run_with_timeout`].
///
/// Runs `f` on tokio's blocking pool. If the deadline elapses, or the returned
/// future is dropped before completion, the token is cancelled so the blocking
/// work can wind down on its own.
pub async fn spawn_blocking_with_timeout<T, F>(
    timeout: Duration,
    cancel_token: CancellationToken,
    f: F,
) -> Result<T, TaskError>
where
    T: Send + 'static,
    F: FnOnce(CancellationToken) -> T + Send + 'static,
{
    if cancel_token.is_cancelled() {
        return Err(TaskError::Cancelled);
    }

    // Cancels the work when the caller abandons this future.
    let guard = cancel_token.clone().drop_guard();
    let token_for_task = cancel_token.clone();
    let handle = tokio::task::spawn_blocking(move || f(token_for_task));

    let outcome = tokio::select! {
        biased;
        _ = cancel_token.cancelled() => Err(TaskError::Cancelled),
        joined = tokio::time::timeout(timeout, handle) => match joined {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(err)) if err.is_cancelled() => Err(TaskError::Cancelled),
            Ok(Err(_)) => Err(TaskError::Panicked),
            Err(_elapsed) => {
                tracing::debug!(target: "typelens.scheduler", ?timeout, "query deadline exceeded");
                Err(TaskError::DeadlineExceeded(timeout))
            }
        },
    };

    match outcome {
        Ok(value) => {
            guard.disarm();
            Ok(value)
        }
        // Dropping the guard cancels the token for the still-running work.
        Err(err) => Err(err),
    }
}
