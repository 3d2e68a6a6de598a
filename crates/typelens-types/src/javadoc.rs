use std::fmt;

use typelens_proto::MarkupContent;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    Type,
    Field,
    Method,
    Annotation,
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ElementKind::Type => "type",
            ElementKind::Field => "field",
            ElementKind::Method => "method",
            ElementKind::Annotation => "annotation",
        })
    }
}

/// The element whose documentation is requested.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct JavadocTarget {
    pub kind: ElementKind,
    pub binding_key: String,
    pub name: String,
}

/// Source of rendered javadoc for wrapped elements.
///
/// Views call this on every `javadoc()` access; implementations decide
/// whether to cache.
pub trait JavadocProvider: Send + Sync {
    fn javadoc(&self, target: &JavadocTarget) -> Option<MarkupContent>;
}

/// Provider that never has documentation.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoJavadoc;

impl JavadocProvider for NoJavadoc {
    fn javadoc(&self, _target: &JavadocTarget) -> Option<MarkupContent> {
        None
    }
}

impl<F> JavadocProvider for F
where
    F: Fn(&JavadocTarget) -> Option<MarkupContent> + Send + Sync,
{
    fn javadoc(&self, target: &JavadocTarget) -> Option<MarkupContent> {
        self(target)
    }
}
