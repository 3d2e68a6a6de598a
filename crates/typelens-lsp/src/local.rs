use std::time::Duration;

use serde_json::Value;
use typelens_scheduler::CancellationToken;

use crate::{RequestSender, TransportError, TypeLensServer};

/// Loopback transport: requests are handled by an in-process server.
#[derive(Debug, Clone)]
pub struct LocalSender {
    server: TypeLensServer,
}

impl LocalSender {
    pub fn new(server: TypeLensServer) -> Self {
        Self { server }
    }
}

impl RequestSender for LocalSender {
    fn send(&self, method: &str, params: Value, timeout: Duration) -> Result<Value, TransportError> {
        self.server
            .handle_request_cancelable(method, params, CancellationToken::new(), Some(timeout))
            .map_err(|err| TransportError::from(err.to_response_error()))
    }
}
