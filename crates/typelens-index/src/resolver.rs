use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use url::Url;

use crate::{JavaIndex, ScopeError};

/// Maps a request's project URI to the index handle for that project.
pub trait ProjectResolver: Send + Sync {
    fn resolve(&self, project_uri: &str) -> Result<Arc<dyn JavaIndex>, ScopeError>;
}

/// Parse and canonicalise a project URI.
///
/// `file:///work/app/` and `file:///work/app` name the same project.
pub fn normalize_project_uri(project_uri: &str) -> Result<String, ScopeError> {
    let url = Url::parse(project_uri.trim()).map_err(|err| ScopeError::InvalidUri {
        uri: project_uri.to_string(),
        message: err.to_string(),
    })?;
    if url.cannot_be_a_base() {
        return Err(ScopeError::InvalidUri {
            uri: project_uri.to_string(),
            message: "expected a hierarchical URI".to_string(),
        });
    }
    let mut normalized = url.to_string();
    while normalized.ends_with('/') && !normalized.ends_with(":///") {
        normalized.pop();
    }
    Ok(normalized)
}

/// Resolver backed by an explicit table of registered projects.
#[derive(Default)]
pub struct ProjectRegistry {
    projects: RwLock<HashMap<String, Arc<dyn JavaIndex>>>,
}

impl ProjectRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(
        &self,
        project_uri: &str,
        index: Arc<dyn JavaIndex>,
    ) -> Result<(), ScopeError> {
        let key = normalize_project_uri(project_uri)?;
        tracing::debug!(target: "typelens.index", project = %key, "registered project");
        self.projects.write().insert(key, index);
        Ok(())
    }

    pub fn unregister(&self, project_uri: &str) -> Result<bool, ScopeError> {
        let key = normalize_project_uri(project_uri)?;
        Ok(self.projects.write().remove(&key).is_some())
    }

    pub fn len(&self) -> usize {
        self.projects.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.projects.read().is_empty()
    }
}

impl ProjectResolver for ProjectRegistry {
    fn resolve(&self, project_uri: &str) -> Result<Arc<dyn JavaIndex>, ScopeError> {
        let key = normalize_project_uri(project_uri)?;
        self.projects
            .read()
            .get(&key)
            .cloned()
            .ok_or(ScopeError::UnknownProject { uri: key })
    }
}
