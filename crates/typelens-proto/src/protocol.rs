//! Request/response shapes for the type-model RPC surface.

use serde::{Deserialize, Serialize};

pub const JAVA_TYPE_METHOD: &str = "typelens/javaType";
pub const JAVADOC_METHOD: &str = "typelens/javadoc";
pub const JAVADOC_HOVER_LINK_METHOD: &str = "typelens/javadocHoverLink";
pub const JAVA_LOCATION_METHOD: &str = "typelens/javaLocation";
pub const SEARCH_JAVA_TYPES_METHOD: &str = "typelens/searchJavaTypes";
pub const SEARCH_JAVA_PACKAGES_METHOD: &str = "typelens/searchJavaPackages";
pub const JAVA_SUB_TYPES_METHOD: &str = "typelens/javaSubTypes";
pub const JAVA_SUPER_TYPES_METHOD: &str = "typelens/javaSuperTypes";

pub const ALL_METHODS: [&str; 8] = [
    JAVA_TYPE_METHOD,
    JAVADOC_METHOD,
    JAVADOC_HOVER_LINK_METHOD,
    JAVA_LOCATION_METHOD,
    SEARCH_JAVA_TYPES_METHOD,
    SEARCH_JAVA_PACKAGES_METHOD,
    JAVA_SUB_TYPES_METHOD,
    JAVA_SUPER_TYPES_METHOD,
];

/// Point lookup of a type or member by binding key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JavaDataParams {
    pub project_uri: String,
    pub binding_key: String,
    #[serde(default)]
    pub resolve_details: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JavaSearchParams {
    pub project_uri: String,
    pub term: String,
    #[serde(default = "default_true")]
    pub camel_case_allowed: bool,
    #[serde(default = "default_true")]
    pub include_system_libraries: bool,
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JavaTypeHierarchyParams {
    pub project_uri: String,
    pub fq_name: String,
}

pub use lsp_types::{Location, MarkupContent, MarkupKind, Position, Range, Uri};

pub fn markdown(value: impl Into<String>) -> MarkupContent {
    MarkupContent {
        kind: MarkupKind::Markdown,
        value: value.into(),
    }
}

pub fn plain_text(value: impl Into<String>) -> MarkupContent {
    MarkupContent {
        kind: MarkupKind::PlainText,
        value: value.into(),
    }
}

/// `uri#L<line>` with a one-based line number.
pub fn hover_link(location: &Location) -> String {
    format!(
        "{}#L{}",
        location.uri.as_str(),
        location.range.start.line.saturating_add(1)
    )
}
