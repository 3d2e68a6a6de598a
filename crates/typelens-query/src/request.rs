use serde_json::Value;
use typelens_proto::protocol::{
    JavaDataParams, JavaSearchParams, JavaTypeHierarchyParams, JAVADOC_HOVER_LINK_METHOD,
    JAVADOC_METHOD, JAVA_LOCATION_METHOD, JAVA_SUB_TYPES_METHOD, JAVA_SUPER_TYPES_METHOD,
    JAVA_TYPE_METHOD, SEARCH_JAVA_PACKAGES_METHOD, SEARCH_JAVA_TYPES_METHOD,
};
use typelens_proto::{Location, MarkupContent, TypeData};

/// One query, as carried by an RPC request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryRequest {
    JavaType(JavaDataParams),
    Javadoc(JavaDataParams),
    HoverLink(JavaDataParams),
    Location(JavaDataParams),
    SearchTypes(JavaSearchParams),
    SearchPackages(JavaSearchParams),
    SubTypes(JavaTypeHierarchyParams),
    SuperTypes(JavaTypeHierarchyParams),
}

impl QueryRequest {
    /// RPC method name this request is sent under.
    pub fn method(&self) -> &'static str {
        match self {
            QueryRequest::JavaType(_) => JAVA_TYPE_METHOD,
            QueryRequest::Javadoc(_) => JAVADOC_METHOD,
            QueryRequest::HoverLink(_) => JAVADOC_HOVER_LINK_METHOD,
            QueryRequest::Location(_) => JAVA_LOCATION_METHOD,
            QueryRequest::SearchTypes(_) => SEARCH_JAVA_TYPES_METHOD,
            QueryRequest::SearchPackages(_) => SEARCH_JAVA_PACKAGES_METHOD,
            QueryRequest::SubTypes(_) => JAVA_SUB_TYPES_METHOD,
            QueryRequest::SuperTypes(_) => JAVA_SUPER_TYPES_METHOD,
        }
    }

    pub fn project_uri(&self) -> &str {
        match self {
            QueryRequest::JavaType(params)
            | QueryRequest::Javadoc(params)
            | QueryRequest::HoverLink(params)
            | QueryRequest::Location(params) => &params.project_uri,
            QueryRequest::SearchTypes(params) | QueryRequest::SearchPackages(params) => {
                &params.project_uri
            }
            QueryRequest::SubTypes(params) | QueryRequest::SuperTypes(params) => {
                &params.project_uri
            }
        }
    }

    /// Fuzzy searches scan the whole index and get the longer deadline.
    pub fn is_search(&self) -> bool {
        matches!(
            self,
            QueryRequest::SearchTypes(_) | QueryRequest::SearchPackages(_)
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum QueryResponse {
    Type(Option<TypeData>),
    Javadoc(Option<MarkupContent>),
    HoverLink(Option<String>),
    Location(Option<Location>),
    Types(Vec<TypeData>),
    Packages(Vec<String>),
}

impl QueryResponse {
    /// Wire form of the result; absent results become `null`.
    pub fn into_json(self) -> serde_json::Result<Value> {
        match self {
            QueryResponse::Type(ty) => serde_json::to_value(ty),
            QueryResponse::Javadoc(doc) => serde_json::to_value(doc),
            QueryResponse::HoverLink(link) => serde_json::to_value(link),
            QueryResponse::Location(location) => serde_json::to_value(location),
            QueryResponse::Types(types) => serde_json::to_value(types),
            QueryResponse::Packages(packages) => serde_json::to_value(packages),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            QueryResponse::Type(ty) => usize::from(ty.is_some()),
            QueryResponse::Javadoc(doc) => usize::from(doc.is_some()),
            QueryResponse::HoverLink(link) => usize::from(link.is_some()),
            QueryResponse::Location(location) => usize::from(location.is_some()),
            QueryResponse::Types(types) => types.len(),
            QueryResponse::Packages(packages) => packages.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
