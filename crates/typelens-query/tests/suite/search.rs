use pretty_assertions::assert_eq;
use typelens_config::{QueryConfig, SystemLibraryFilter};
use typelens_fuzzy::contains_ignore_ascii_case;
use typelens_query::aggregate::is_system_library;
use typelens_query::{CancellationToken, QueryService};
use typelens_test_utils::{fixture_resolver, fixture_types, PROJECT_URI};

use crate::suite::{fixture_service, names, service_over};

fn search(include_system: bool, query: &str) -> Vec<typelens_proto::TypeData> {
    fixture_service()
        .search_types(
            PROJECT_URI,
            query,
            true,
            include_system,
            &CancellationToken::new(),
        )
        .unwrap()
}

#[test]
fn util_map_with_system_libraries() {
    let hits = search(true, "util.Map");
    assert!(hits.len() > 20, "expected a broad result, got {}", hits.len());

    let maps = hits.iter().filter(|ty| ty.fq_name == "java.util.Map").count();
    assert_eq!(maps, 1);
    assert_eq!(hits[0].fq_name, "java.util.Map");
    assert!(hits.iter().all(|ty| ty.is_shallow()));
}

#[test]
fn util_map_without_system_libraries() {
    let with_system = search(true, "util.Map");
    let hits = search(false, "util.Map");

    assert!(!hits.is_empty());
    assert!(hits.len() < with_system.len());
    assert_eq!(hits[0].fq_name, "io.netty.util.Mapping");
    assert!(!names(&hits).contains(&"java.util.Map"));

    let filter = SystemLibraryFilter::default();
    assert!(hits.iter().all(|ty| !is_system_library(ty, &filter)));
}

#[test]
fn every_literal_occurrence_is_returned() {
    let filter = SystemLibraryFilter::default();
    for (include_system, query) in [(true, "util.Map"), (false, "util.Map"), (true, "Factory")] {
        let hits = search(include_system, query);
        let returned = names(&hits);
        for ty in fixture_types() {
            if !include_system && is_system_library(&ty, &filter) {
                continue;
            }
            if contains_ignore_ascii_case(&ty.fq_name, query) {
                assert!(
                    returned.contains(&ty.fq_name.as_str()),
                    "{} missing for {query}",
                    ty.fq_name
                );
            }
        }
    }
}

#[test]
fn results_are_unique_by_name() {
    let hits = search(true, "Map");
    let mut unique = names(&hits);
    unique.sort_unstable();
    unique.dedup();
    assert_eq!(unique.len(), hits.len());
}

#[test]
fn strict_search_only_returns_literal_matches() {
    let hits = fixture_service()
        .search_types(PROJECT_URI, "util.Map", false, true, &CancellationToken::new())
        .unwrap();
    assert_eq!(names(&hits), vec!["java.util.Map", "io.netty.util.Mapping"]);
}

#[test]
fn camel_case_query_finds_abbreviated_types() {
    let hits = search(false, "TEFB");
    assert!(names(&hits).contains(&"org.springframework.scheduling.config.TaskExecutorFactoryBean"));
}

#[test]
fn cap_keeps_literal_hits() {
    let config = QueryConfig {
        max_search_results: 1,
        ..QueryConfig::default()
    };
    let service = QueryService::new(fixture_resolver(), config);
    let hits = service
        .search_types(PROJECT_URI, "util.Map", true, true, &CancellationToken::new())
        .unwrap();
    assert_eq!(names(&hits), vec!["java.util.Map", "io.netty.util.Mapping"]);

    let fuzzy_only = service
        .search_types(PROJECT_URI, "QtCtrl", true, true, &CancellationToken::new())
        .unwrap();
    assert_eq!(names(&fuzzy_only), vec!["org.test.QuoteController"]);
}

#[test]
fn empty_query_matches_nothing() {
    assert!(search(true, "   ").is_empty());
}

#[test]
fn java_lang_packages() {
    let service = fixture_service();
    let token = CancellationToken::new();

    let with_system = service
        .search_packages(PROJECT_URI, "java.lang", true, true, &token)
        .unwrap();
    assert!(with_system.len() > 15, "got {with_system:?}");
    assert_eq!(with_system[0], "java.lang");
    for expected in ["java.lang.reflect", "java.lang.invoke", "org.javalite.lang"] {
        assert!(with_system.iter().any(|p| p == expected), "{expected} missing");
    }

    let without_system = service
        .search_packages(PROJECT_URI, "java.lang", true, false, &token)
        .unwrap();
    assert_eq!(without_system, vec!["org.javalite.lang".to_string()]);
}

#[test]
fn project_packages() {
    let packages = fixture_service()
        .search_packages(PROJECT_URI, "org.test", true, false, &CancellationToken::new())
        .unwrap();
    assert_eq!(packages, vec!["org.test".to_string(), "org.test.config".to_string()]);
}

#[test]
fn custom_system_rules_change_the_filter() {
    let filter = typelens_config::SystemLibrariesConfig {
        modules: Vec::new(),
        paths: vec!["**/netty-*.jar".to_string()],
    }
    .compile()
    .unwrap();
    let service = fixture_service().with_system_libraries(filter);
    let hits = service
        .search_types(PROJECT_URI, "util.Mapping", false, false, &CancellationToken::new())
        .unwrap();
    assert!(hits.is_empty());
}

#[test]
fn default_rules_exclude_unflagged_jdk_jars() {
    let mut unsafe_type = typelens_test_utils::class("sun.misc.Unsafe", None, &[]);
    unsafe_type.classpath_entry = Some(typelens_proto::ClasspathEntryData {
        module: None,
        cpe: typelens_proto::CpeData::binary("/usr/lib/jvm/java-8/jre/lib/rt.jar"),
    });
    let mut project_type = typelens_test_utils::class("org.app.UnsafeOps", None, &[]);
    project_type.classpath_entry = Some(typelens_proto::ClasspathEntryData {
        module: None,
        cpe: typelens_proto::CpeData::source("/work/app/src", "/work/app/target/classes"),
    });
    let service = service_over(
        "file:///work/app",
        typelens_index::MemoryIndex::from_types([unsafe_type, project_type]),
    );
    let token = CancellationToken::new();

    let without = service
        .search_types("file:///work/app", "Unsafe", true, false, &token)
        .unwrap();
    assert_eq!(names(&without), vec!["org.app.UnsafeOps"]);

    let with = service
        .search_types("file:///work/app", "Unsafe", true, true, &token)
        .unwrap();
    assert_eq!(names(&with), vec!["sun.misc.Unsafe", "org.app.UnsafeOps"]);
}
