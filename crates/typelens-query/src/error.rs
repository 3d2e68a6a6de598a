use std::time::Duration;

use typelens_index::{EngineError, ScopeError};
use typelens_scheduler::{Cancelled, TaskError};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QueryError {
    #[error(transparent)]
    Scope(#[from] ScopeError),

    #[error("communication with the engine failed: {0}")]
    Communication(#[from] EngineError),

    #[error("query timed out after {0:?}")]
    Timeout(Duration),

    #[error("query was cancelled")]
    Cancelled,

    #[error("internal error: {0}")]
    Internal(String),
}

impl From<Cancelled> for QueryError {
    fn from(_: Cancelled) -> Self {
        QueryError::Cancelled
    }
}

impl From<TaskError> for QueryError {
    fn from(err: TaskError) -> Self {
        match err {
            TaskError::Cancelled => QueryError::Cancelled,
            TaskError::DeadlineExceeded(timeout) => QueryError::Timeout(timeout),
            TaskError::Panicked => QueryError::Internal("query task panicked".to_string()),
        }
    }
}
