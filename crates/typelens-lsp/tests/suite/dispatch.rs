use std::time::Duration;

use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use typelens_lsp::{
    codes, TypeLensLspError, ALL_METHODS, JAVADOC_HOVER_LINK_METHOD, JAVADOC_METHOD,
    JAVA_LOCATION_METHOD, JAVA_SUPER_TYPES_METHOD, JAVA_TYPE_METHOD, SEARCH_JAVA_PACKAGES_METHOD,
    SEARCH_JAVA_TYPES_METHOD,
};
use typelens_scheduler::CancellationToken;
use typelens_test_utils::PROJECT_URI;

use crate::suite::fixture_server;

#[test]
fn java_type_returns_the_snapshot_json() {
    let server = fixture_server();
    let value = server
        .handle_request(
            JAVA_TYPE_METHOD,
            json!({"projectUri": PROJECT_URI, "bindingKey": "Lorg/test/Quote;", "resolveDetails": true}),
        )
        .unwrap();
    assert_eq!(value["fqName"], "org.test.Quote");
    assert_eq!(value["bindingKey"], "Lorg/test/Quote;");
    assert_eq!(value["classpathEntry"]["cpe"]["own"], true);
    assert_eq!(value["methods"].as_array().map(Vec::len), Some(2));
    assert_eq!(value["fields"][0]["type"]["kind"], "CLASS");
}

#[test]
fn absent_results_are_null() {
    let server = fixture_server();
    for method in [JAVA_TYPE_METHOD, JAVADOC_METHOD, JAVA_LOCATION_METHOD, JAVADOC_HOVER_LINK_METHOD] {
        let value = server
            .handle_request(
                method,
                json!({"projectUri": PROJECT_URI, "bindingKey": "Lcom/example/Missing;"}),
            )
            .unwrap();
        assert_eq!(value, Value::Null, "{method}");
    }
}

#[test]
fn search_results_are_lists() {
    let server = fixture_server();
    let types = server
        .handle_request(
            SEARCH_JAVA_TYPES_METHOD,
            json!({"projectUri": PROJECT_URI, "term": "util.Map", "includeSystemLibraries": false}),
        )
        .unwrap();
    assert_eq!(types[0]["fqName"], "io.netty.util.Mapping");

    let packages = server
        .handle_request(
            SEARCH_JAVA_PACKAGES_METHOD,
            json!({"projectUri": PROJECT_URI, "term": "org.test", "includeSystemLibraries": false}),
        )
        .unwrap();
    assert_eq!(packages, json!(["org.test", "org.test.config"]));
}

#[test]
fn location_and_hover_link() {
    let server = fixture_server();
    let params = json!({"projectUri": PROJECT_URI, "bindingKey": "Lorg/test/Quote;"});
    let location = server
        .handle_request(JAVA_LOCATION_METHOD, params.clone())
        .unwrap();
    assert_eq!(location["range"]["start"], json!({"line": 6, "character": 13}));
    let link = server
        .handle_request(JAVADOC_HOVER_LINK_METHOD, params)
        .unwrap();
    assert_eq!(link, json!("file:///work/demo/src/main/java/org/test/Quote.java#L7"));
}

#[test]
fn every_method_is_dispatched() {
    let server = fixture_server();
    for method in ALL_METHODS {
        let params = json!({
            "projectUri": PROJECT_URI,
            "bindingKey": "Ljava/util/Map;",
            "term": "Map",
            "fqName": "java.util.Map",
        });
        let result = server.handle_request(method, params);
        assert!(result.is_ok(), "{method}: {result:?}");
    }
}

#[test]
fn error_codes() {
    let server = fixture_server();

    let err = server
        .handle_request("typelens/bogus", Value::Null)
        .unwrap_err();
    assert_eq!(err.code(), codes::METHOD_NOT_FOUND);

    let err = server
        .handle_request(JAVA_TYPE_METHOD, json!({"bindingKey": "Ljava/util/Map;"}))
        .unwrap_err();
    assert!(matches!(err, TypeLensLspError::InvalidParams(_)));
    assert_eq!(err.code(), codes::INVALID_PARAMS);

    let err = server
        .handle_request(
            JAVA_SUPER_TYPES_METHOD,
            json!({"projectUri": "file:///unknown", "fqName": "java.util.Map"}),
        )
        .unwrap_err();
    assert_eq!(err.code(), codes::SCOPE_ERROR);

    let token = CancellationToken::new();
    token.cancel();
    let err = server
        .handle_request_cancelable(
            JAVA_TYPE_METHOD,
            json!({"projectUri": PROJECT_URI, "bindingKey": "Ljava/util/Map;"}),
            token,
            None,
        )
        .unwrap_err();
    assert_eq!(err.code(), codes::REQUEST_CANCELLED);
}

#[tokio::test(flavor = "multi_thread")]
async fn async_dispatch_matches_sync() {
    let server = fixture_server();
    let params = json!({"projectUri": PROJECT_URI, "fqName": "java.util.ArrayList"});
    let sync = server
        .handle_request(JAVA_SUPER_TYPES_METHOD, params.clone())
        .unwrap();
    let async_result = server
        .handle_request_async(
            JAVA_SUPER_TYPES_METHOD,
            params,
            CancellationToken::new(),
            Some(Duration::from_secs(30)),
        )
        .await
        .unwrap();
    assert_eq!(sync, async_result);
}
