use std::time::{Duration, Instant};

use serde::de::DeserializeOwned;
use serde_json::Value;
use typelens_proto::protocol::{
    JAVADOC_HOVER_LINK_METHOD, JAVADOC_METHOD, JAVA_LOCATION_METHOD, JAVA_SUB_TYPES_METHOD,
    JAVA_SUPER_TYPES_METHOD, JAVA_TYPE_METHOD, SEARCH_JAVA_PACKAGES_METHOD,
    SEARCH_JAVA_TYPES_METHOD,
};
use typelens_proto::sanitize_serde_json_error;
use typelens_query::{QueryRequest, QueryResponse, QueryService};
use typelens_scheduler::CancellationToken;

use crate::{Result, TypeLensLspError};

/// Decode the params of a `typelens/*` request.
pub fn parse_request(method: &str, params: Value) -> Result<QueryRequest> {
    let request = match method {
        JAVA_TYPE_METHOD => QueryRequest::JavaType(parse_params(params)?),
        JAVADOC_METHOD => QueryRequest::Javadoc(parse_params(params)?),
        JAVADOC_HOVER_LINK_METHOD => QueryRequest::HoverLink(parse_params(params)?),
        JAVA_LOCATION_METHOD => QueryRequest::Location(parse_params(params)?),
        SEARCH_JAVA_TYPES_METHOD => QueryRequest::SearchTypes(parse_params(params)?),
        SEARCH_JAVA_PACKAGES_METHOD => QueryRequest::SearchPackages(parse_params(params)?),
        JAVA_SUB_TYPES_METHOD => QueryRequest::SubTypes(parse_params(params)?),
        JAVA_SUPER_TYPES_METHOD => QueryRequest::SuperTypes(parse_params(params)?),
        other => return Err(TypeLensLspError::MethodNotFound(other.to_string())),
    };
    Ok(request)
}

fn parse_params<T: DeserializeOwned>(params: Value) -> Result<T> {
    serde_json::from_value(params)
        .map_err(|err| TypeLensLspError::InvalidParams(sanitize_serde_json_error(&err)))
}

fn into_json(response: QueryResponse) -> Result<Value> {
    response
        .into_json()
        .map_err(|err| TypeLensLspError::Internal(err.to_string()))
}

/// Dispatches `typelens/*` requests onto a [`QueryService`].
#[derive(Debug, Clone)]
pub struct TypeLensServer {
    service: QueryService,
}

impl TypeLensServer {
    pub fn new(service: QueryService) -> Self {
        Self { service }
    }

    pub fn service(&self) -> &QueryService {
        &self.service
    }

    /// Handle a request with the configured default deadline.
    pub fn handle_request(&self, method: &str, params: Value) -> Result<Value> {
        self.handle_request_cancelable(method, params, CancellationToken::new(), None)
    }

    /// Handle a request with request-scoped cancellation.
    ///
    /// `timeout` overrides the configured deadline for this request only.
    pub fn handle_request_cancelable(
        &self,
        method: &str,
        params: Value,
        cancel: CancellationToken,
        timeout: Option<Duration>,
    ) -> Result<Value> {
        let started = Instant::now();
        let outcome = parse_request(method, params).and_then(|request| {
            let response = self.service.execute_with_token(request, timeout, cancel)?;
            into_json(response)
        });
        log_outcome(method, started, &outcome);
        outcome
    }

    /// Async variant of [`TypeLensServer::handle_request_cancelable`]; the
    /// query runs on tokio's blocking pool.
    pub async fn handle_request_async(
        &self,
        method: &str,
        params: Value,
        cancel: CancellationToken,
        timeout: Option<Duration>,
    ) -> Result<Value> {
        let started = Instant::now();
        let outcome = match parse_request(method, params) {
            Ok(request) => match self.service.execute_async(request, timeout, cancel).await {
                Ok(response) => into_json(response),
                Err(err) => Err(err.into()),
            },
            Err(err) => Err(err),
        };
        log_outcome(method, started, &outcome);
        outcome
    }
}

fn log_outcome(method: &str, started: Instant, outcome: &Result<Value>) {
    let elapsed_ms = started.elapsed().as_millis() as u64;
    match outcome {
        Ok(_) => {
            tracing::debug!(target: "typelens.lsp", method, elapsed_ms, "request handled");
        }
        Err(err) => {
            tracing::warn!(
                target: "typelens.lsp",
                method,
                elapsed_ms,
                code = err.code(),
                error = %err,
                "request failed"
            );
        }
    }
}
