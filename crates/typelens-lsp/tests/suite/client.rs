use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use typelens_lsp::{
    ClientError, LocalSender, RequestSender, TransportError, TypeLensClient, JAVADOC_METHOD,
};
use typelens_proto::{JavaTypeData, TypeKind};
use typelens_types::{wrap, JavaElement};
use typelens_test_utils::PROJECT_URI;

use crate::suite::{fixture_client, fixture_server};

/// Counts requests per method before forwarding them.
struct Counting {
    inner: LocalSender,
    javadoc_calls: AtomicUsize,
}

impl RequestSender for Counting {
    fn send(&self, method: &str, params: Value, timeout: Duration) -> Result<Value, TransportError> {
        if method == JAVADOC_METHOD {
            self.javadoc_calls.fetch_add(1, Ordering::SeqCst);
        }
        self.inner.send(method, params, timeout)
    }
}

/// Replies to every request with a canned value.
struct Canned(Result<Value, TransportError>);

impl RequestSender for Canned {
    fn send(&self, _method: &str, _params: Value, _timeout: Duration) -> Result<Value, TransportError> {
        self.0.clone()
    }
}

fn canned(reply: Result<Value, TransportError>) -> TypeLensClient {
    TypeLensClient::new(Arc::new(Canned(reply)), PROJECT_URI)
}

#[test]
fn type_view_navigates_members() {
    let client = fixture_client();
    let quote = client.type_view("Lorg/test/Quote;").unwrap().unwrap();
    assert_eq!(quote.fully_qualified_name(), "org.test.Quote");
    assert!(quote.declaring_type().is_none());

    let string = wrap(&JavaTypeData::new(TypeKind::Class, "Ljava/lang/String;")).unwrap();
    let constructor = quote.get_method("Quote", &[string]).unwrap();
    assert!(constructor.is_constructor());
    assert_eq!(constructor.declaring_type(), Some(quote.clone()));
    assert!(quote.get_method("Quote", &[]).is_none());

    let text = quote.get_field("text").unwrap();
    assert_eq!(text.signature(), "String text");
    assert!(quote.get_field("missing").is_none());

    let audited = &quote.annotations()[0];
    assert_eq!(audited.fq_name(), "org.test.Audited");
}

#[test]
fn nested_types_load_their_declaring_type_lazily() {
    let client = fixture_client();
    let state = client.type_view("Ljava/lang/Thread$State;").unwrap().unwrap();
    assert!(state.is_enum());
    let thread = state.declaring_type().unwrap();
    assert_eq!(thread.fully_qualified_name(), "java.lang.Thread");
    assert_eq!(state.declaring_type(), Some(thread));
}

#[test]
fn javadoc_is_fetched_on_every_access() {
    let counting = Arc::new(Counting {
        inner: LocalSender::new(fixture_server()),
        javadoc_calls: AtomicUsize::new(0),
    });
    let client = TypeLensClient::new(counting.clone(), PROJECT_URI);
    let map = client.type_view("java.util.Map").unwrap().unwrap();

    let doc = map.javadoc().unwrap();
    assert!(doc.value.contains("maps keys to values"));
    assert!(map.javadoc().is_some());
    assert_eq!(counting.javadoc_calls.load(Ordering::SeqCst), 2);

    let size = map.get_method("size", &[]).unwrap();
    assert_eq!(size.javadoc(), None);
    assert_eq!(counting.javadoc_calls.load(Ordering::SeqCst), 3);
}

#[test]
fn hierarchy_and_search_round_trip_through_the_wire() {
    let client = fixture_client();

    let supers: Vec<String> = client
        .super_types("org.springframework.scheduling.config.TaskExecutorFactoryBean")
        .unwrap()
        .into_iter()
        .map(|ty| ty.fq_name)
        .collect();
    assert_eq!(supers.len(), 6);
    assert!(supers.contains(&"org.springframework.beans.factory.Aware".to_string()));

    let subs = client.sub_types("org.test.QuoteService").unwrap();
    assert_eq!(subs[0].fq_name, "org.test.DefaultQuoteService");

    let hits = client.search_types("util.Map", true, true).unwrap();
    assert_eq!(hits[0].fq_name, "java.util.Map");
    let packages = client.search_packages("java.lang", true, false).unwrap();
    assert_eq!(packages, vec!["org.javalite.lang".to_string()]);

    assert_eq!(
        client.hover_link("Lorg/test/Quote;").unwrap().as_deref(),
        Some("file:///work/demo/src/main/java/org/test/Quote.java#L7")
    );
    assert_eq!(client.location("Ljava/util/Map;").unwrap(), None);
}

#[test]
fn malformed_items_are_dropped_from_lists() {
    let client = canned(Ok(json!([
        {"fqName": "a.Good", "bindingKey": "La/Good;", "clazz": true},
        {"fqName": "a.NoKey"},
        {"fqName": "a.Both", "bindingKey": "La/Both;", "clazz": true, "interface": true},
        17,
    ])));
    let types = client.sub_types("a.Base").unwrap();
    let names: Vec<_> = types.iter().map(|ty| ty.fq_name.as_str()).collect();
    assert_eq!(names, vec!["a.Good"]);

    let packages = canned(Ok(json!(["a", 3, "b", "a"])))
        .search_packages("a", true, true)
        .unwrap();
    assert_eq!(packages, vec!["a".to_string(), "b".to_string()]);
}

#[test]
fn malformed_single_result_is_a_decode_error() {
    let client = canned(Ok(json!({"fqName": "a.NoKey"})));
    assert!(matches!(
        client.java_type("La/NoKey;", false),
        Err(ClientError::Decode(_))
    ));
}

#[test]
fn transport_failures_surface_as_errors() {
    let client = canned(Err(TransportError::Connection("broken pipe".into())));
    assert_eq!(
        client.search_types("Map", true, true).unwrap_err(),
        ClientError::Transport(TransportError::Connection("broken pipe".into()))
    );

    let client = canned(Err(TransportError::Timeout(Duration::from_millis(10))));
    assert_eq!(
        client.sub_types("a.Base").unwrap_err(),
        ClientError::Timeout(Duration::from_millis(10))
    );
}

#[test]
fn javadoc_failures_read_as_missing_docs() {
    let client = canned(Err(TransportError::Connection("broken pipe".into())));
    let view = client.view(typelens_proto::TypeData::synthetic_class("a.B"));
    assert_eq!(view.javadoc(), None);
}

#[test]
fn unknown_project_is_a_scope_error() {
    let client = TypeLensClient::new(
        Arc::new(LocalSender::new(fixture_server())),
        "file:///nowhere",
    );
    assert!(matches!(
        client.java_type("Ljava/util/Map;", false),
        Err(ClientError::Scope(_))
    ));
}
