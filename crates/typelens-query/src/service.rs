use std::sync::Arc;
use std::time::Duration;

use typelens_config::{QueryConfig, SystemLibraryFilter};
use typelens_index::{JavaIndex, ProjectResolver};
use typelens_proto::names::type_name_of_binding_key;
use typelens_proto::{hover_link, Location, MarkupContent, TypeData};
use typelens_scheduler::{
    check_cancelled, run_with_timeout, spawn_blocking_with_timeout, CancellationToken,
};

use crate::aggregate::{pick_instance, retain_valid};
use crate::hierarchy;
use crate::search::{self, SearchOptions};
use crate::{QueryError, QueryRequest, QueryResponse};

/// Read-only queries over the type index of a project.
///
/// Cheap to clone; clones share the resolver and the system-library filter.
#[derive(Clone)]
pub struct QueryService {
    resolver: Arc<dyn ProjectResolver>,
    config: QueryConfig,
    system_libraries: Arc<SystemLibraryFilter>,
}

impl std::fmt::Debug for QueryService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueryService")
            .field("config", &self.config)
            .field("system_libraries", &self.system_libraries)
            .finish_non_exhaustive()
    }
}

impl QueryService {
    pub fn new(resolver: Arc<dyn ProjectResolver>, config: QueryConfig) -> Self {
        Self {
            resolver,
            config,
            system_libraries: Arc::new(SystemLibraryFilter::default()),
        }
    }

    /// Replaces the default JDK module rules used to classify system types.
    #[must_use]
    pub fn with_system_libraries(mut self, filter: SystemLibraryFilter) -> Self {
        self.system_libraries = Arc::new(filter);
        self
    }

    pub fn config(&self) -> &QueryConfig {
        &self.config
    }

    fn index(&self, project_uri: &str) -> Result<Arc<dyn JavaIndex>, QueryError> {
        Ok(self.resolver.resolve(project_uri)?)
    }

    fn search_options<'a>(
        &self,
        query: &'a str,
        camel_case_allowed: bool,
        include_system_libraries: bool,
    ) -> SearchOptions<'a> {
        SearchOptions {
            query,
            camel_case_allowed,
            include_system_libraries,
            limit: self.config.max_search_results,
        }
    }

    /// Point lookup by descriptor (`Ljava/util/Map;`), internal (`java/util/Map`)
    /// or dotted name.
    ///
    /// Without `resolve_details` the snapshot is shallow.
    pub fn type_by_binary_name(
        &self,
        project_uri: &str,
        binary_name: &str,
        resolve_details: bool,
        cancel: &CancellationToken,
    ) -> Result<Option<TypeData>, QueryError> {
        let index = self.index(project_uri)?;
        check_cancelled(cancel)?;
        let fq_name = type_name_of_binding_key(binary_name);
        if fq_name.is_empty() {
            return Ok(None);
        }
        let found = pick_instance(retain_valid(index.find_types(&fq_name)?));
        tracing::trace!(
            target: "typelens.query",
            fq_name = %fq_name,
            found = found.is_some(),
            resolve_details,
            "type lookup"
        );
        Ok(found.map(|ty| if resolve_details { ty } else { ty.shallow() }))
    }

    pub fn search_types(
        &self,
        project_uri: &str,
        query: &str,
        camel_case_allowed: bool,
        include_system_libraries: bool,
        cancel: &CancellationToken,
    ) -> Result<Vec<TypeData>, QueryError> {
        let index = self.index(project_uri)?;
        let options = self.search_options(query, camel_case_allowed, include_system_libraries);
        search::search_types(index.as_ref(), &self.system_libraries, &options, cancel)
    }

    pub fn search_packages(
        &self,
        project_uri: &str,
        query: &str,
        camel_case_allowed: bool,
        include_system_libraries: bool,
        cancel: &CancellationToken,
    ) -> Result<Vec<String>, QueryError> {
        let index = self.index(project_uri)?;
        let options = self.search_options(query, camel_case_allowed, include_system_libraries);
        search::search_packages(index.as_ref(), &self.system_libraries, &options, cancel)
    }

    pub fn super_types(
        &self,
        project_uri: &str,
        fq_name: &str,
        cancel: &CancellationToken,
    ) -> Result<Vec<TypeData>, QueryError> {
        let index = self.index(project_uri)?;
        hierarchy::super_types(index.as_ref(), &type_name_of_binding_key(fq_name), cancel)
    }

    pub fn sub_types(
        &self,
        project_uri: &str,
        fq_name: &str,
        cancel: &CancellationToken,
    ) -> Result<Vec<TypeData>, QueryError> {
        let index = self.index(project_uri)?;
        hierarchy::sub_types(index.as_ref(), &type_name_of_binding_key(fq_name), cancel)
    }

    pub fn javadoc(
        &self,
        project_uri: &str,
        binding_key: &str,
        cancel: &CancellationToken,
    ) -> Result<Option<MarkupContent>, QueryError> {
        let index = self.index(project_uri)?;
        check_cancelled(cancel)?;
        Ok(index.javadoc(binding_key.trim())?)
    }

    pub fn location(
        &self,
        project_uri: &str,
        binding_key: &str,
        cancel: &CancellationToken,
    ) -> Result<Option<Location>, QueryError> {
        let index = self.index(project_uri)?;
        check_cancelled(cancel)?;
        Ok(index.location(binding_key.trim())?)
    }

    /// Link target for a hover: the source location as `uri#L<line>`, or the
    /// element's label when the element has no source.
    pub fn hover_link(
        &self,
        project_uri: &str,
        binding_key: &str,
        cancel: &CancellationToken,
    ) -> Result<Option<String>, QueryError> {
        let index = self.index(project_uri)?;
        check_cancelled(cancel)?;
        let key = binding_key.trim();
        if let Some(location) = index.location(key)? {
            return Ok(Some(hover_link(&location)));
        }
        Ok(index.element_label(key)?)
    }

    /// Runs `request` to completion on the calling thread.
    pub fn run(
        &self,
        request: QueryRequest,
        cancel: &CancellationToken,
    ) -> Result<QueryResponse, QueryError> {
        tracing::debug!(target: "typelens.query", method = request.method(), "running query");
        let response = match request {
            QueryRequest::JavaType(params) => QueryResponse::Type(self.type_by_binary_name(
                &params.project_uri,
                &params.binding_key,
                params.resolve_details,
                cancel,
            )?),
            QueryRequest::Javadoc(params) => QueryResponse::Javadoc(self.javadoc(
                &params.project_uri,
                &params.binding_key,
                cancel,
            )?),
            QueryRequest::HoverLink(params) => QueryResponse::HoverLink(self.hover_link(
                &params.project_uri,
                &params.binding_key,
                cancel,
            )?),
            QueryRequest::Location(params) => QueryResponse::Location(self.location(
                &params.project_uri,
                &params.binding_key,
                cancel,
            )?),
            QueryRequest::SearchTypes(params) => QueryResponse::Types(self.search_types(
                &params.project_uri,
                &params.term,
                params.camel_case_allowed,
                params.include_system_libraries,
                cancel,
            )?),
            QueryRequest::SearchPackages(params) => QueryResponse::Packages(self.search_packages(
                &params.project_uri,
                &params.term,
                params.camel_case_allowed,
                params.include_system_libraries,
                cancel,
            )?),
            QueryRequest::SubTypes(params) => QueryResponse::Types(self.sub_types(
                &params.project_uri,
                &params.fq_name,
                cancel,
            )?),
            QueryRequest::SuperTypes(params) => QueryResponse::Types(self.super_types(
                &params.project_uri,
                &params.fq_name,
                cancel,
            )?),
        };
        Ok(response)
    }

    /// Deadline applied when the caller does not pass one.
    pub fn default_timeout(&self, request: &QueryRequest) -> Duration {
        if request.is_search() {
            self.config.search_timeout()
        } else {
            self.config.timeout()
        }
    }

    /// Runs `request` on a watchdog thread, failing with
    /// [`QueryError::Timeout`] once `timeout` (or the configured default)
    /// elapses.
    pub fn execute(
        &self,
        request: QueryRequest,
        timeout: Option<Duration>,
    ) -> Result<QueryResponse, QueryError> {
        self.execute_with_token(request, timeout, CancellationToken::new())
    }

    pub fn execute_with_token(
        &self,
        request: QueryRequest,
        timeout: Option<Duration>,
        cancel: CancellationToken,
    ) -> Result<QueryResponse, QueryError> {
        let timeout = timeout.unwrap_or_else(|| self.default_timeout(&request));
        let service = self.clone();
        run_with_timeout(timeout, cancel, move |token| service.run(request, &token))?
    }

    /// Async form of [`QueryService::execute_with_token`]. The work runs on
    /// tokio's blocking pool; dropping the future cancels it.
    pub async fn execute_async(
        &self,
        request: QueryRequest,
        timeout: Option<Duration>,
        cancel: CancellationToken,
    ) -> Result<QueryResponse, QueryError> {
        let timeout = timeout.unwrap_or_else(|| self.default_timeout(&request));
        let service = self.clone();
        spawn_blocking_with_timeout(timeout, cancel, move |token| service.run(request, &token))
            .await?
    }
}
