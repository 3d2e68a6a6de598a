//! Cancellation and deadlines for long-running queries.
//!
//! Queries are cooperative: they receive a [`CancellationToken`] and check it
//! between units of work. Bounded waits are provided by the watchdog helpers,
//! which run the work off the caller's thread and report an elapsed deadline
//! as [`TaskError::DeadlineExceeded`], distinct from any result the work
//! itself produces.

mod blocking;
mod watchdog;

use std::time::Duration;

pub use blocking::spawn_blocking_with_timeout;
pub use tokio_util::sync::CancellationToken;
pub use watchdog::{run_with_timeout, Watchdog};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TaskError {
    #[error("task was cancelled")]
    Cancelled,
    #[error("deadline of {0:?} exceeded")]
    DeadlineExceeded(Duration),
    #[error("task panicked")]
    Panicked,
}

/// Marker returned by cooperative work that observed a cancelled token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("cancelled")]
pub struct Cancelled;

/// Returns `Err(Cancelled)` once `token` has been cancelled.
#[inline]
pub fn check_cancelled(token: &CancellationToken) -> Result<(), Cancelled> {
    if token.is_cancelled() {
        Err(Cancelled)
    } else {
        Ok(())
    }
}

impl From<Cancelled> for TaskError {
    fn from(_: Cancelled) -> Self {
        TaskError::Cancelled
    }
}
