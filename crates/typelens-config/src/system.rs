use globset::{Glob, GlobSet, GlobSetBuilder};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Rules identifying the platform's own runtime libraries.
///
/// An entry the engine already flags as `system` is always a system library;
/// these rules additionally catch entries from engines that do not set the
/// flag.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct SystemLibrariesConfig {
    /// Module-name prefixes (`java.` matches `java.base`).
    #[serde(default = "SystemLibrariesConfig::default_modules")]
    pub modules: Vec<String>,

    /// Globs over the binary location of a classpath entry.
    #[serde(default = "SystemLibrariesConfig::default_paths")]
    pub paths: Vec<String>,
}

impl SystemLibrariesConfig {
    fn default_modules() -> Vec<String> {
        vec!["java.".to_owned(), "jdk.".to_owned()]
    }

    fn default_paths() -> Vec<String> {
        vec![
            "**/jre/lib/*.jar".to_owned(),
            "**/jmods/*.jmod".to_owned(),
            "**/lib/modules".to_owned(),
            "**/lib/ct.sym".to_owned(),
        ]
    }

    pub fn compile(&self) -> Result<SystemLibraryFilter, ConfigError> {
        let mut builder = GlobSetBuilder::new();
        for pattern in &self.paths {
            let glob = Glob::new(pattern).map_err(|err| ConfigError::InvalidGlob {
                pattern: pattern.clone(),
                message: err.kind().to_string(),
            })?;
            builder.add(glob);
        }
        let paths = builder.build().map_err(|err| ConfigError::InvalidGlob {
            pattern: self.paths.join(", "),
            message: err.kind().to_string(),
        })?;
        Ok(SystemLibraryFilter {
            modules: self.modules.clone(),
            paths,
        })
    }
}

impl Default for SystemLibrariesConfig {
    fn default() -> Self {
        Self {
            modules: Self::default_modules(),
            paths: Self::default_paths(),
        }
    }
}

/// Compiled form of [`SystemLibrariesConfig`].
#[derive(Clone, Debug)]
pub struct SystemLibraryFilter {
    modules: Vec<String>,
    paths: GlobSet,
}

impl SystemLibraryFilter {
    pub fn matches(&self, module: Option<&str>, binary_location: Option<&str>) -> bool {
        if let Some(module) = module {
            if self.modules.iter().any(|prefix| module.starts_with(prefix.as_str())) {
                return true;
            }
        }
        binary_location.is_some_and(|location| self.paths.is_match(location))
    }
}

impl Default for SystemLibraryFilter {
    /// The compiled [`SystemLibrariesConfig::default`] rules.
    fn default() -> Self {
        SystemLibrariesConfig::default()
            .compile()
            .unwrap_or_else(|err| {
                tracing::error!(target: "typelens.config", error = %err, "default system library globs failed to compile");
                Self {
                    modules: SystemLibrariesConfig::default_modules(),
                    paths: GlobSet::empty(),
                }
            })
    }
}
