//! Configuration for typelens (`typelens.toml`).
//!
//! Every key is optional; a missing file yields [`TypeLensConfig::default`].
//! Unknown keys are rejected so typos surface as errors instead of silently
//! falling back to defaults.

mod logging;
mod system;

use std::path::{Path, PathBuf};
use std::time::Duration;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use logging::{init_tracing, LoggingConfig};
pub use system::{SystemLibrariesConfig, SystemLibraryFilter};

/// Environment variable overriding config discovery.
pub const TYPELENS_CONFIG_ENV_VAR: &str = "TYPELENS_CONFIG";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse toml config: {0}")]
    Toml(String),
    #[error("invalid system library pattern `{pattern}`: {message}")]
    InvalidGlob { pattern: String, message: String },
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::Toml(err.message().to_string())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct QueryConfig {
    /// Deadline for point lookups and hierarchy queries (milliseconds).
    #[serde(default = "QueryConfig::default_timeout_ms")]
    #[schemars(range(min = 1))]
    pub timeout_ms: u64,

    /// Deadline for fuzzy type/package searches (milliseconds).
    #[serde(default = "QueryConfig::default_search_timeout_ms")]
    #[schemars(range(min = 1))]
    pub search_timeout_ms: u64,

    /// Upper bound on the number of snapshots returned by a type search.
    #[serde(default = "QueryConfig::default_max_search_results")]
    #[schemars(range(min = 1))]
    pub max_search_results: usize,
}

impl QueryConfig {
    fn default_timeout_ms() -> u64 {
        10_000
    }

    fn default_search_timeout_ms() -> u64 {
        100_000
    }

    fn default_max_search_results() -> usize {
        10_000
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms.max(1))
    }

    pub fn search_timeout(&self) -> Duration {
        Duration::from_millis(self.search_timeout_ms.max(1))
    }
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            timeout_ms: Self::default_timeout_ms(),
            search_timeout_ms: Self::default_search_timeout_ms(),
            max_search_results: Self::default_max_search_results(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct TypeLensConfig {
    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub query: QueryConfig,

    /// Classifies classpath entries as the platform's own runtime libraries.
    #[serde(default)]
    pub system_libraries: SystemLibrariesConfig,
}

impl TypeLensConfig {
    pub fn load_from_str(text: &str) -> Result<Self, ConfigError> {
        let config: TypeLensConfig = toml::from_str(text)?;
        // Surface bad globs at load time rather than on the first query.
        config.system_libraries.compile()?;
        Ok(config)
    }

    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::load_from_str(&text)
    }
}

/// Locate the config file for `workspace_root`.
///
/// `TYPELENS_CONFIG` wins when set (relative paths are resolved against the
/// workspace root); otherwise the first existing candidate file is used.
pub fn discover_config_path(workspace_root: &Path) -> Option<PathBuf> {
    if let Some(value) = std::env::var_os(TYPELENS_CONFIG_ENV_VAR) {
        let candidate = PathBuf::from(value);
        let path = if candidate.is_absolute() {
            candidate
        } else {
            workspace_root.join(candidate)
        };
        return Some(path);
    }

    ["typelens.toml", ".typelens.toml", ".typelens/config.toml"]
        .into_iter()
        .map(|name| workspace_root.join(name))
        .find(|path| path.is_file())
}

/// Load the configuration for a workspace root.
///
/// If no config is present, returns [`TypeLensConfig::default`] and `None`.
pub fn load_for_workspace(
    workspace_root: &Path,
) -> Result<(TypeLensConfig, Option<PathBuf>), ConfigError> {
    let Some(path) = discover_config_path(workspace_root) else {
        return Ok((TypeLensConfig::default(), None));
    };
    let config = TypeLensConfig::load_from_path(&path)?;
    Ok((config, Some(path)))
}

/// JSON schema for `typelens.toml`, for editor tooling and CI validation.
#[must_use]
pub fn json_schema() -> schemars::schema::RootSchema {
    schemars::schema_for!(TypeLensConfig)
}
