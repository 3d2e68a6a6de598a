use pretty_assertions::assert_eq;
use typelens_index::ScopeError;
use typelens_query::{CancellationToken, QueryError};
use typelens_test_utils::PROJECT_URI;

use crate::suite::fixture_service;

#[test]
fn binary_and_dotted_names_find_the_same_type() {
    let service = fixture_service();
    let token = CancellationToken::new();

    let by_binary = service
        .type_by_binary_name(PROJECT_URI, "Ljava/util/Map;", false, &token)
        .unwrap()
        .unwrap();
    let by_dotted = service
        .type_by_binary_name(PROJECT_URI, "java.util.Map", false, &token)
        .unwrap()
        .unwrap();

    let by_internal = service
        .type_by_binary_name(PROJECT_URI, "java/util/Map", false, &token)
        .unwrap()
        .unwrap();

    assert_eq!(by_binary, by_dotted);
    assert_eq!(by_binary, by_internal);
    assert_eq!(by_binary.fq_name, "java.util.Map");
    assert!(by_binary.interfaze);
}

#[test]
fn nested_internal_names_resolve() {
    let service = fixture_service();
    let token = CancellationToken::new();
    let state = service
        .type_by_binary_name(PROJECT_URI, "java/lang/Thread$State", false, &token)
        .unwrap()
        .unwrap();
    assert_eq!(state.fq_name, "java.lang.Thread$State");
}

#[test]
fn details_are_only_sent_when_requested() {
    let service = fixture_service();
    let token = CancellationToken::new();

    let shallow = service
        .type_by_binary_name(PROJECT_URI, "Ljava/util/Map;", false, &token)
        .unwrap()
        .unwrap();
    assert!(shallow.is_shallow());

    let detailed = service
        .type_by_binary_name(PROJECT_URI, "Ljava/util/Map;", true, &token)
        .unwrap()
        .unwrap();
    let methods: Vec<_> = detailed.methods.iter().map(|m| m.member.name.as_str()).collect();
    assert_eq!(methods, vec!["size", "get", "put"]);
    assert_eq!(detailed.shallow(), shallow);
}

#[test]
fn point_lookup_is_idempotent() {
    let service = fixture_service();
    let token = CancellationToken::new();
    let first = service
        .type_by_binary_name(PROJECT_URI, "Lorg/test/Quote;", true, &token)
        .unwrap();
    let second = service
        .type_by_binary_name(PROJECT_URI, "Lorg/test/Quote;", true, &token)
        .unwrap();
    assert!(first.is_some());
    assert_eq!(first, second);
}

#[test]
fn member_keys_resolve_to_the_declaring_type() {
    let service = fixture_service();
    let found = service
        .type_by_binary_name(
            PROJECT_URI,
            "Ljava/util/Map;.size()I",
            false,
            &CancellationToken::new(),
        )
        .unwrap()
        .unwrap();
    assert_eq!(found.fq_name, "java.util.Map");
}

#[test]
fn unknown_type_is_absent_not_an_error() {
    let service = fixture_service();
    let found = service
        .type_by_binary_name(
            PROJECT_URI,
            "Lcom/example/Missing;",
            true,
            &CancellationToken::new(),
        )
        .unwrap();
    assert_eq!(found, None);
}

#[test]
fn unknown_project_is_a_scope_error() {
    let service = fixture_service();
    let err = service
        .type_by_binary_name(
            "file:///elsewhere",
            "Ljava/util/Map;",
            false,
            &CancellationToken::new(),
        )
        .unwrap_err();
    assert_eq!(
        err,
        QueryError::Scope(ScopeError::UnknownProject {
            uri: "file:///elsewhere".to_string()
        })
    );
}

#[test]
fn invalid_project_uri_is_a_scope_error() {
    let service = fixture_service();
    let err = service
        .search_types("not a uri", "Map", true, true, &CancellationToken::new())
        .unwrap_err();
    assert!(matches!(err, QueryError::Scope(ScopeError::InvalidUri { .. })));
}

#[test]
fn project_uri_trailing_slash_is_ignored() {
    let service = fixture_service();
    let found = service
        .type_by_binary_name(
            "file:///work/demo/",
            "Lorg/test/Quote;",
            false,
            &CancellationToken::new(),
        )
        .unwrap();
    assert!(found.is_some());
}

#[test]
fn javadoc_and_location_pass_through() {
    let service = fixture_service();
    let token = CancellationToken::new();

    let doc = service
        .javadoc(PROJECT_URI, "Ljava/util/Map;", &token)
        .unwrap()
        .unwrap();
    assert!(doc.value.starts_with("An object that maps keys to values."));

    let location = service
        .location(PROJECT_URI, "Lorg/test/Quote;", &token)
        .unwrap()
        .unwrap();
    assert_eq!(
        location.uri.as_str(),
        "file:///work/demo/src/main/java/org/test/Quote.java"
    );
    assert_eq!(
        service.javadoc(PROJECT_URI, "Ljava/util/List;", &token).unwrap(),
        None
    );
}

#[test]
fn hover_link_prefers_source_location_then_label() {
    let service = fixture_service();
    let token = CancellationToken::new();

    assert_eq!(
        service
            .hover_link(PROJECT_URI, "Lorg/test/Quote;", &token)
            .unwrap()
            .as_deref(),
        Some("file:///work/demo/src/main/java/org/test/Quote.java#L7")
    );
    assert_eq!(
        service
            .hover_link(PROJECT_URI, "Ljava/util/Map;.size()I", &token)
            .unwrap()
            .as_deref(),
        Some("int size()")
    );
    assert_eq!(
        service
            .hover_link(PROJECT_URI, "Lcom/example/Missing;", &token)
            .unwrap(),
        None
    );
}
