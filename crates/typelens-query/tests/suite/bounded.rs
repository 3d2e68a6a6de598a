use std::ops::ControlFlow;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use pretty_assertions::assert_eq;
use typelens_index::{EngineError, JavaIndex};
use typelens_proto::protocol::{JavaDataParams, JavaSearchParams, JavaTypeHierarchyParams};
use typelens_proto::{Location, MarkupContent, TypeData};
use typelens_query::{CancellationToken, QueryError, QueryRequest, QueryResponse};
use typelens_test_utils::PROJECT_URI;

use crate::suite::{fixture_service, service_over};

/// Streams the same type forever, pausing between items.
struct SlowIndex {
    visited: Arc<AtomicUsize>,
}

impl JavaIndex for SlowIndex {
    fn find_types(&self, _fq_name: &str) -> Result<Vec<TypeData>, EngineError> {
        Ok(Vec::new())
    }

    fn for_each_type(
        &self,
        visit: &mut dyn FnMut(&TypeData) -> ControlFlow<()>,
    ) -> Result<(), EngineError> {
        let ty = TypeData::synthetic_class("slow.Type");
        loop {
            self.visited.fetch_add(1, Ordering::SeqCst);
            if visit(&ty).is_break() {
                return Ok(());
            }
            std::thread::sleep(Duration::from_millis(2));
        }
    }

    fn direct_subtypes(&self, _fq_name: &str) -> Result<Vec<String>, EngineError> {
        Ok(Vec::new())
    }

    fn javadoc(&self, _binding_key: &str) -> Result<Option<MarkupContent>, EngineError> {
        Ok(None)
    }

    fn location(&self, _binding_key: &str) -> Result<Option<Location>, EngineError> {
        Ok(None)
    }

    fn element_label(&self, _binding_key: &str) -> Result<Option<String>, EngineError> {
        Ok(None)
    }
}

struct FailingIndex;

impl JavaIndex for FailingIndex {
    fn find_types(&self, _fq_name: &str) -> Result<Vec<TypeData>, EngineError> {
        Err(EngineError::Unavailable("connection reset".to_string()))
    }

    fn for_each_type(
        &self,
        _visit: &mut dyn FnMut(&TypeData) -> ControlFlow<()>,
    ) -> Result<(), EngineError> {
        Err(EngineError::Unavailable("connection reset".to_string()))
    }

    fn direct_subtypes(&self, _fq_name: &str) -> Result<Vec<String>, EngineError> {
        Err(EngineError::Unavailable("connection reset".to_string()))
    }

    fn javadoc(&self, _binding_key: &str) -> Result<Option<MarkupContent>, EngineError> {
        Err(EngineError::Failed("javadoc unavailable".to_string()))
    }

    fn location(&self, _binding_key: &str) -> Result<Option<Location>, EngineError> {
        Err(EngineError::Failed("location unavailable".to_string()))
    }

    fn element_label(&self, _binding_key: &str) -> Result<Option<String>, EngineError> {
        Err(EngineError::Failed("label unavailable".to_string()))
    }
}

fn slow_search() -> (QueryRequest, Arc<AtomicUsize>, typelens_query::QueryService) {
    let visited = Arc::new(AtomicUsize::new(0));
    let service = service_over(
        "file:///slow",
        SlowIndex {
            visited: Arc::clone(&visited),
        },
    );
    let request = QueryRequest::SearchTypes(JavaSearchParams {
        project_uri: "file:///slow".to_string(),
        term: "Type".to_string(),
        camel_case_allowed: true,
        include_system_libraries: true,
    });
    (request, visited, service)
}

#[test]
fn deadline_is_reported_as_timeout() {
    let (request, visited, service) = slow_search();
    let started = Instant::now();
    let err = service
        .execute(request, Some(Duration::from_millis(50)))
        .unwrap_err();
    assert_eq!(err, QueryError::Timeout(Duration::from_millis(50)));
    assert!(started.elapsed() < Duration::from_secs(5));

    // The scan notices the cancelled token and stops.
    std::thread::sleep(Duration::from_millis(50));
    let settled = visited.load(Ordering::SeqCst);
    std::thread::sleep(Duration::from_millis(50));
    assert_eq!(visited.load(Ordering::SeqCst), settled);
}

#[test]
fn cancelled_token_is_reported_as_cancelled() {
    let (request, _visited, service) = slow_search();
    let token = CancellationToken::new();
    token.cancel();
    let err = service
        .execute_with_token(request, Some(Duration::from_secs(5)), token)
        .unwrap_err();
    assert_eq!(err, QueryError::Cancelled);
}

#[test]
fn direct_calls_observe_cancellation() {
    let service = fixture_service();
    let token = CancellationToken::new();
    token.cancel();
    assert_eq!(
        service
            .search_types(PROJECT_URI, "Map", true, true, &token)
            .unwrap_err(),
        QueryError::Cancelled
    );
    assert_eq!(
        service
            .super_types(PROJECT_URI, "java.util.ArrayList", &token)
            .unwrap_err(),
        QueryError::Cancelled
    );
}

#[test]
fn engine_failures_are_not_empty_results() {
    let service = service_over("file:///down", FailingIndex);
    let token = CancellationToken::new();

    let err = service
        .search_types("file:///down", "Map", true, true, &token)
        .unwrap_err();
    assert_eq!(
        err,
        QueryError::Communication(EngineError::Unavailable("connection reset".to_string()))
    );
    assert!(matches!(
        service.type_by_binary_name("file:///down", "Ljava/util/Map;", false, &token),
        Err(QueryError::Communication(_))
    ));
    assert!(matches!(
        service.hover_link("file:///down", "Ljava/util/Map;", &token),
        Err(QueryError::Communication(_))
    ));
}

#[test]
fn execute_dispatches_every_request_kind() {
    let service = fixture_service();
    let data = |key: &str| JavaDataParams {
        project_uri: PROJECT_URI.to_string(),
        binding_key: key.to_string(),
        resolve_details: false,
    };
    let hierarchy = JavaTypeHierarchyParams {
        project_uri: PROJECT_URI.to_string(),
        fq_name: "org.test.QuoteService".to_string(),
    };

    let response = service
        .execute(QueryRequest::JavaType(data("Lorg/test/Quote;")), None)
        .unwrap();
    let quote = match response {
        QueryResponse::Type(Some(quote)) => quote,
        other => panic!("unexpected response {other:?}"),
    };
    assert_eq!(quote.fq_name, "org.test.Quote");

    let response = service
        .execute(QueryRequest::HoverLink(data("Lorg/test/Quote;")), None)
        .unwrap();
    assert_eq!(
        response,
        QueryResponse::HoverLink(Some(
            "file:///work/demo/src/main/java/org/test/Quote.java#L7".to_string()
        ))
    );

    let response = service
        .execute(QueryRequest::SubTypes(hierarchy.clone()), None)
        .unwrap();
    assert_eq!(response.len(), 1);

    let response = service
        .execute(QueryRequest::SuperTypes(hierarchy), None)
        .unwrap()
        .into_json()
        .unwrap();
    assert_eq!(response[0]["fqName"], "java.lang.Object");

    let response = service
        .execute(QueryRequest::Javadoc(data("Lcom/example/Missing;")), None)
        .unwrap();
    assert!(response.is_empty());
    assert_eq!(response.into_json().unwrap(), serde_json::Value::Null);
}

#[tokio::test(flavor = "multi_thread")]
async fn async_execution_times_out() {
    let (request, _visited, service) = slow_search();
    let err = service
        .execute_async(
            request,
            Some(Duration::from_millis(50)),
            CancellationToken::new(),
        )
        .await
        .unwrap_err();
    assert_eq!(err, QueryError::Timeout(Duration::from_millis(50)));
}

#[tokio::test(flavor = "multi_thread")]
async fn async_execution_returns_results() {
    let service = fixture_service();
    let request = QueryRequest::SearchPackages(JavaSearchParams {
        project_uri: PROJECT_URI.to_string(),
        term: "org.test".to_string(),
        camel_case_allowed: true,
        include_system_libraries: false,
    });
    let response = service
        .execute_async(request, None, CancellationToken::new())
        .await
        .unwrap();
    assert_eq!(
        response,
        QueryResponse::Packages(vec!["org.test".to_string(), "org.test.config".to_string()])
    );
}
