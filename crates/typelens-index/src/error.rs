/// The engine could not answer.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    #[error("engine unavailable: {0}")]
    Unavailable(String),

    #[error("engine request failed: {0}")]
    Failed(String),
}

/// The project scope of a request could not be established.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScopeError {
    #[error("invalid project URI `{uri}`: {message}")]
    InvalidUri { uri: String, message: String },

    #[error("unknown project `{uri}`")]
    UnknownProject { uri: String },
}

#[derive(Debug, thiserror::Error)]
pub enum DumpError {
    #[error("failed to read index dump {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid index dump {path}: {message}")]
    Json { path: String, message: String },
}
