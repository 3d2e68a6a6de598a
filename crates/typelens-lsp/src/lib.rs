//! JSON-RPC surface of the type model.
//!
//! The server half ([`TypeLensServer`]) decodes the params of the eight
//! `typelens/*` methods, runs them on a [`QueryService`] under a deadline and
//! maps failures onto JSON-RPC error codes. The client half
//! ([`TypeLensClient`]) sends the same requests through any
//! [`RequestSender`] and turns the responses back into snapshots and views.
//!
//! Framing and session management belong to the embedding transport;
//! [`LocalSender`] is an in-process loopback for tests and the CLI.

mod client;
mod javadoc;
mod local;
mod server;

use typelens_query::QueryError;

pub use client::{ClientError, RequestSender, TransportError, TypeLensClient};
pub use javadoc::RemoteJavadocProvider;
pub use local::LocalSender;
pub use lsp_server::ResponseError;
pub use server::{parse_request, TypeLensServer};
pub use typelens_proto::protocol::{
    ALL_METHODS, JAVADOC_HOVER_LINK_METHOD, JAVADOC_METHOD, JAVA_LOCATION_METHOD,
    JAVA_SUB_TYPES_METHOD, JAVA_SUPER_TYPES_METHOD, JAVA_TYPE_METHOD, SEARCH_JAVA_PACKAGES_METHOD,
    SEARCH_JAVA_TYPES_METHOD,
};
pub use typelens_query::QueryService;

/// JSON-RPC error codes used by the `typelens/*` methods.
pub mod codes {
    use lsp_server::ErrorCode;

    pub const METHOD_NOT_FOUND: i32 = ErrorCode::MethodNotFound as i32;
    pub const INVALID_PARAMS: i32 = ErrorCode::InvalidParams as i32;
    pub const INTERNAL_ERROR: i32 = ErrorCode::InternalError as i32;
    pub const REQUEST_CANCELLED: i32 = ErrorCode::RequestCanceled as i32;
    pub const SCOPE_ERROR: i32 = -32001;
    pub const TIMEOUT: i32 = -32002;
    pub const COMMUNICATION_ERROR: i32 = -32003;
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TypeLensLspError {
    #[error("invalid params: {0}")]
    InvalidParams(String),
    #[error("method not found: {0}")]
    MethodNotFound(String),
    #[error(transparent)]
    Query(#[from] QueryError),
    #[error("internal error: {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, TypeLensLspError>;

impl TypeLensLspError {
    pub fn code(&self) -> i32 {
        match self {
            TypeLensLspError::InvalidParams(_) => codes::INVALID_PARAMS,
            TypeLensLspError::MethodNotFound(_) => codes::METHOD_NOT_FOUND,
            TypeLensLspError::Query(QueryError::Scope(_)) => codes::SCOPE_ERROR,
            TypeLensLspError::Query(QueryError::Timeout(_)) => codes::TIMEOUT,
            TypeLensLspError::Query(QueryError::Cancelled) => codes::REQUEST_CANCELLED,
            TypeLensLspError::Query(QueryError::Communication(_)) => codes::COMMUNICATION_ERROR,
            TypeLensLspError::Query(QueryError::Internal(_)) | TypeLensLspError::Internal(_) => {
                codes::INTERNAL_ERROR
            }
        }
    }

    /// The JSON-RPC `error` object for this failure.
    pub fn to_response_error(&self) -> ResponseError {
        ResponseError {
            code: self.code(),
            message: self.to_string(),
            data: None,
        }
    }
}
