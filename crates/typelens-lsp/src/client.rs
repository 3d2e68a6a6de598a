use std::sync::Arc;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use typelens_proto::protocol::{
    JavaDataParams, JavaSearchParams, JavaTypeHierarchyParams, JAVADOC_HOVER_LINK_METHOD,
    JAVADOC_METHOD, JAVA_LOCATION_METHOD, JAVA_SUB_TYPES_METHOD, JAVA_SUPER_TYPES_METHOD,
    JAVA_TYPE_METHOD, SEARCH_JAVA_PACKAGES_METHOD, SEARCH_JAVA_TYPES_METHOD,
};
use typelens_proto::{
    decode_package_batch, decode_type_batch, sanitize_serde_json_error, DecodeError, Location,
    MarkupContent, TypeData,
};
use typelens_types::{wrap_type, DeclaringTypeSupplier, JavadocProvider, TypeView};

use crate::{codes, RemoteJavadocProvider, ResponseError};

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
const DEFAULT_SEARCH_TIMEOUT: Duration = Duration::from_secs(100);

/// Sends one request and waits for its result.
///
/// Framing, ids and `$/cancelRequest` are the implementation's business.
pub trait RequestSender: Send + Sync {
    fn send(&self, method: &str, params: Value, timeout: Duration) -> Result<Value, TransportError>;
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    #[error("no response within {0:?}")]
    Timeout(Duration),
    #[error("request was cancelled")]
    Cancelled,
    #[error("server error {code}: {message}")]
    Server { code: i32, message: String },
    #[error("connection failed: {0}")]
    Connection(String),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClientError {
    #[error("request timed out after {0:?}")]
    Timeout(Duration),
    #[error("request was cancelled")]
    Cancelled,
    #[error("invalid project scope: {0}")]
    Scope(String),
    #[error(transparent)]
    Transport(TransportError),
    #[error("malformed response: {0}")]
    Decode(#[from] DecodeError),
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

impl From<ResponseError> for TransportError {
    fn from(err: ResponseError) -> Self {
        TransportError::Server {
            code: err.code,
            message: err.message,
        }
    }
}

impl ClientError {
    fn from_transport(err: TransportError, timeout: Duration) -> Self {
        match err {
            TransportError::Timeout(elapsed) => ClientError::Timeout(elapsed),
            TransportError::Cancelled => ClientError::Cancelled,
            TransportError::Server { code, message } => match code {
                codes::SCOPE_ERROR => ClientError::Scope(message),
                codes::TIMEOUT => ClientError::Timeout(timeout),
                codes::REQUEST_CANCELLED => ClientError::Cancelled,
                _ => ClientError::Transport(TransportError::Server { code, message }),
            },
            other => ClientError::Transport(other),
        }
    }
}

fn decode_optional<T: DeserializeOwned>(value: Value) -> Result<Option<T>, ClientError> {
    if value.is_null() {
        return Ok(None);
    }
    serde_json::from_value(value)
        .map(Some)
        .map_err(|err| DecodeError::Malformed(sanitize_serde_json_error(&err)).into())
}

/// Typed façade over the `typelens/*` methods for one project.
///
/// Malformed items in list results are dropped (see
/// [`decode_type_batch`]); a malformed single result is a
/// [`ClientError::Decode`].
#[derive(Clone)]
pub struct TypeLensClient {
    sender: Arc<dyn RequestSender>,
    project_uri: String,
    timeout: Duration,
    search_timeout: Duration,
}

impl std::fmt::Debug for TypeLensClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TypeLensClient")
            .field("project_uri", &self.project_uri)
            .field("timeout", &self.timeout)
            .field("search_timeout", &self.search_timeout)
            .finish_non_exhaustive()
    }
}

impl TypeLensClient {
    pub fn new(sender: Arc<dyn RequestSender>, project_uri: impl Into<String>) -> Self {
        Self {
            sender,
            project_uri: project_uri.into(),
            timeout: DEFAULT_TIMEOUT,
            search_timeout: DEFAULT_SEARCH_TIMEOUT,
        }
    }

    #[must_use]
    pub fn with_timeouts(mut self, timeout: Duration, search_timeout: Duration) -> Self {
        self.timeout = timeout;
        self.search_timeout = search_timeout;
        self
    }

    pub fn project_uri(&self) -> &str {
        &self.project_uri
    }

    fn request(
        &self,
        method: &str,
        params: impl Serialize,
        timeout: Duration,
    ) -> Result<Value, ClientError> {
        let params = serde_json::to_value(params)
            .map_err(|err| ClientError::InvalidRequest(err.to_string()))?;
        self.sender
            .send(method, params, timeout)
            .map_err(|err| ClientError::from_transport(err, timeout))
    }

    fn data_params(&self, binding_key: &str, resolve_details: bool) -> JavaDataParams {
        JavaDataParams {
            project_uri: self.project_uri.clone(),
            binding_key: binding_key.to_string(),
            resolve_details,
        }
    }

    fn search_params(
        &self,
        term: &str,
        camel_case_allowed: bool,
        include_system_libraries: bool,
    ) -> JavaSearchParams {
        JavaSearchParams {
            project_uri: self.project_uri.clone(),
            term: term.to_string(),
            camel_case_allowed,
            include_system_libraries,
        }
    }

    fn hierarchy_params(&self, fq_name: &str) -> JavaTypeHierarchyParams {
        JavaTypeHierarchyParams {
            project_uri: self.project_uri.clone(),
            fq_name: fq_name.to_string(),
        }
    }

    pub fn java_type(
        &self,
        binding_key: &str,
        resolve_details: bool,
    ) -> Result<Option<TypeData>, ClientError> {
        let value = self.request(
            JAVA_TYPE_METHOD,
            self.data_params(binding_key, resolve_details),
            self.timeout,
        )?;
        if value.is_null() {
            return Ok(None);
        }
        Ok(Some(TypeData::decode(value)?))
    }

    /// Fetch a type with its members and wrap it.
    pub fn type_view(&self, binding_key: &str) -> Result<Option<TypeView>, ClientError> {
        Ok(self.java_type(binding_key, true)?.map(|data| self.view(data)))
    }

    /// Wrap a snapshot obtained from this client. Javadoc and the enclosing
    /// type of nested types are fetched on demand.
    pub fn view(&self, data: TypeData) -> TypeView {
        let declaring = self.declaring_type_supplier(&data.fq_name);
        wrap_type(data, declaring, self.javadoc_provider())
    }

    pub fn javadoc_provider(&self) -> Arc<dyn JavadocProvider> {
        Arc::new(RemoteJavadocProvider::new(self.clone()))
    }

    fn declaring_type_supplier(&self, fq_name: &str) -> DeclaringTypeSupplier {
        let Some(split) = fq_name.rfind('$') else {
            return Box::new(|| None);
        };
        let outer = fq_name[..split].to_string();
        let client = self.clone();
        Box::new(move || match client.type_view(&outer) {
            Ok(view) => view,
            Err(err) => {
                tracing::warn!(
                    target: "typelens.lsp",
                    outer = %outer,
                    error = %err,
                    "failed to load declaring type"
                );
                None
            }
        })
    }

    pub fn javadoc(&self, binding_key: &str) -> Result<Option<MarkupContent>, ClientError> {
        let value = self.request(
            JAVADOC_METHOD,
            self.data_params(binding_key, false),
            self.timeout,
        )?;
        decode_optional(value)
    }

    pub fn hover_link(&self, binding_key: &str) -> Result<Option<String>, ClientError> {
        let value = self.request(
            JAVADOC_HOVER_LINK_METHOD,
            self.data_params(binding_key, false),
            self.timeout,
        )?;
        decode_optional(value)
    }

    pub fn location(&self, binding_key: &str) -> Result<Option<Location>, ClientError> {
        let value = self.request(
            JAVA_LOCATION_METHOD,
            self.data_params(binding_key, false),
            self.timeout,
        )?;
        decode_optional(value)
    }

    pub fn search_types(
        &self,
        term: &str,
        camel_case_allowed: bool,
        include_system_libraries: bool,
    ) -> Result<Vec<TypeData>, ClientError> {
        let value = self.request(
            SEARCH_JAVA_TYPES_METHOD,
            self.search_params(term, camel_case_allowed, include_system_libraries),
            self.search_timeout,
        )?;
        Ok(decode_type_batch(value))
    }

    pub fn search_packages(
        &self,
        term: &str,
        camel_case_allowed: bool,
        include_system_libraries: bool,
    ) -> Result<Vec<String>, ClientError> {
        let value = self.request(
            SEARCH_JAVA_PACKAGES_METHOD,
            self.search_params(term, camel_case_allowed, include_system_libraries),
            self.search_timeout,
        )?;
        Ok(decode_package_batch(value))
    }

    pub fn sub_types(&self, fq_name: &str) -> Result<Vec<TypeData>, ClientError> {
        let value = self.request(
            JAVA_SUB_TYPES_METHOD,
            self.hierarchy_params(fq_name),
            self.timeout,
        )?;
        Ok(decode_type_batch(value))
    }

    pub fn super_types(&self, fq_name: &str) -> Result<Vec<TypeData>, ClientError> {
        let value = self.request(
            JAVA_SUPER_TYPES_METHOD,
            self.hierarchy_params(fq_name),
            self.timeout,
        )?;
        Ok(decode_type_batch(value))
    }
}
