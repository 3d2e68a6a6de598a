use std::fmt;
use std::sync::Arc;

use typelens_proto::{AnnotationData, AnnotationValue, MarkupContent};

use crate::{ElementKind, JavaElement, JavadocProvider};

/// An annotation occurrence on a type or member.
#[derive(Clone)]
pub struct AnnotationView {
    data: Arc<AnnotationData>,
    provider: Arc<dyn JavadocProvider>,
}

pub fn wrap_annotation(data: AnnotationData, provider: Arc<dyn JavadocProvider>) -> AnnotationView {
    AnnotationView {
        data: Arc::new(data),
        provider,
    }
}

/// Value of an annotation member, with nested annotations wrapped.
#[derive(Debug, Clone, PartialEq)]
pub enum MemberValue {
    Boolean(bool),
    Number(serde_json::Number),
    String(String),
    Annotation(AnnotationView),
    Array(Vec<MemberValue>),
}

impl MemberValue {
    fn wrap(value: &AnnotationValue, provider: &Arc<dyn JavadocProvider>) -> MemberValue {
        match value {
            AnnotationValue::Boolean(b) => MemberValue::Boolean(*b),
            AnnotationValue::Number(n) => MemberValue::Number(n.clone()),
            AnnotationValue::String(s) => MemberValue::String(s.clone()),
            AnnotationValue::Annotation(nested) => {
                MemberValue::Annotation(wrap_annotation(nested.clone(), Arc::clone(provider)))
            }
            AnnotationValue::Array(items) => MemberValue::Array(
                items
                    .iter()
                    .map(|item| MemberValue::wrap(item, provider))
                    .collect(),
            ),
        }
    }
}

impl AnnotationView {
    pub fn fq_name(&self) -> &str {
        &self.data.fq_name
    }

    /// Annotations handed to us by the engine are always resolved.
    pub fn exists(&self) -> bool {
        true
    }

    /// Member/value pairs in declaration order, wrapped as they are iterated.
    pub fn member_value_pairs(&self) -> impl Iterator<Item = (&str, MemberValue)> + '_ {
        self.data
            .value_pairs
            .iter()
            .map(|(name, value)| (name.as_str(), MemberValue::wrap(value, &self.provider)))
    }

    pub fn value(&self, member: &str) -> Option<MemberValue> {
        self.data
            .value_pairs
            .get(member)
            .map(|value| MemberValue::wrap(value, &self.provider))
    }

    pub fn data(&self) -> &AnnotationData {
        &self.data
    }
}

impl JavaElement for AnnotationView {
    /// Annotations are named by their fully-qualified type name.
    fn element_name(&self) -> &str {
        &self.data.fq_name
    }

    fn binding_key(&self) -> String {
        self.data.binding_key()
    }

    fn element_kind(&self) -> ElementKind {
        ElementKind::Annotation
    }

    fn javadoc(&self) -> Option<MarkupContent> {
        self.provider.javadoc(&self.javadoc_target())
    }
}

impl PartialEq for AnnotationView {
    fn eq(&self, other: &Self) -> bool {
        self.data.fq_name == other.data.fq_name
    }
}

impl fmt::Debug for AnnotationView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnnotationView")
            .field("fq_name", &self.data.fq_name)
            .field("value_pairs", &self.data.value_pairs.len())
            .finish()
    }
}
