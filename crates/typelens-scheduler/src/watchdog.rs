use std::sync::mpsc;
use std::time::{Duration, Instant};

use crate::{CancellationToken, TaskError};

/// Bounds the latency of a synchronous query.
///
/// The work runs on a dedicated thread. If it exceeds the deadline the token
/// is cancelled and the caller gets [`TaskError::DeadlineExceeded`] right
/// away; the worker thread keeps running until it notices the cancellation,
/// so it never blocks the caller and never leaks past its next token check.
#[derive(Debug, Clone, Copy, Default)]
pub struct Watchdog;

impl Watchdog {
    pub fn new() -> Self {
        Self
    }

    pub fn run_with_deadline<F, T>(
        &self,
        deadline: Duration,
        cancel: CancellationToken,
        func: F,
    ) -> Result<T, TaskError>
    where
        F: FnOnce(CancellationToken) -> T + Send + 'static,
        T: Send + 'static,
    {
        run_with_timeout(deadline, cancel, func)
    }
}

/// Runs `f` on a dedicated worker thread and waits up to `timeout` for it to finish.
///
/// If the timeout elapses, `cancel_token` is cancelled before returning.
pub fn run_with_timeout<T, F>(
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

    let (tx, rx) = mpsc::channel::<Result<T, TaskError>>();
    let token_for_task = cancel_token.clone();
    let spawned = std::thread::Builder::new()
        .name("typelens-query".to_string())
        .spawn(move || {
            let result =
                std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| f(token_for_task)))
                    .map_err(|_| TaskError::Panicked);
            let _ = tx.send(result);
        });
    if let Err(err) = spawned {
        tracing::error!(target: "typelens.scheduler", error = %err, "failed to spawn query thread");
        return Err(TaskError::Panicked);
    }

    let deadline = Instant::now() + timeout;
    let poll_interval = Duration::from_millis(5);

    loop {
        if cancel_token.is_cancelled() {
            return Err(TaskError::Cancelled);
        }

        let remaining = deadline.saturating_duration_since(Instant::now());
        if remaining.is_zero() {
            cancel_token.cancel();
            tracing::debug!(target: "typelens.scheduler", ?timeout, "query deadline exceeded");
            return Err(TaskError::DeadlineExceeded(timeout));
        }

        match rx.recv_timeout(remaining.min(poll_interval)) {
            Ok(result) => return result,
            Err(mpsc::RecvTimeoutError::Timeout) => continue,
            Err(mpsc::RecvTimeoutError::Disconnected) => return Err(TaskError::Panicked),
        }
    }
}
