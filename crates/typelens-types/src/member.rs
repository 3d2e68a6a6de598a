use std::fmt;
use std::sync::{Arc, Weak};

use typelens_proto::{flags, DecodeError, FieldData, MarkupContent, MemberData, MethodData};

use crate::java_type::wrap;
use crate::type_view::{TypeInner, TypeView};
use crate::{wrap_annotation, AnnotationView, ElementKind, JavaElement, JavaType, JavadocProvider};

/// State shared by field and method views.
#[derive(Clone)]
struct MemberCore {
    declaring: Weak<TypeInner>,
    provider: Arc<dyn JavadocProvider>,
}

impl MemberCore {
    fn new(declaring: &TypeView, provider: Arc<dyn JavadocProvider>) -> Self {
        Self {
            declaring: declaring.downgrade(),
            provider,
        }
    }

    fn declaring_type(&self) -> Option<TypeView> {
        self.declaring.upgrade().map(TypeView::from_inner)
    }

    fn annotations(&self, member: &MemberData) -> Vec<AnnotationView> {
        member
            .annotations
            .iter()
            .map(|a| wrap_annotation(a.clone(), Arc::clone(&self.provider)))
            .collect()
    }
}

#[derive(Clone)]
pub struct FieldView {
    data: Arc<FieldData>,
    core: MemberCore,
}

/// Wrap a field. The view holds its declaring type weakly.
pub fn wrap_field(
    data: FieldData,
    declaring: &TypeView,
    provider: Arc<dyn JavadocProvider>,
) -> FieldView {
    FieldView {
        data: Arc::new(data),
        core: MemberCore::new(declaring, provider),
    }
}

impl FieldView {
    /// `None` once the declaring type view has been dropped.
    pub fn declaring_type(&self) -> Option<TypeView> {
        self.core.declaring_type()
    }

    pub fn flags(&self) -> u32 {
        self.data.member.flags
    }

    pub fn is_static(&self) -> bool {
        self.flags() & flags::STATIC != 0
    }

    pub fn signature(&self) -> &str {
        &self.data.member.label
    }

    pub fn field_type(&self) -> Result<JavaType, DecodeError> {
        wrap(&self.data.field_type)
    }

    pub fn is_enum_constant(&self) -> bool {
        self.data.enum_constant
    }

    pub fn annotations(&self) -> Vec<AnnotationView> {
        self.core.annotations(&self.data.member)
    }

    pub fn data(&self) -> &FieldData {
        &self.data
    }
}

impl JavaElement for FieldView {
    fn element_name(&self) -> &str {
        &self.data.member.name
    }

    fn binding_key(&self) -> String {
        self.data.member.binding_key.clone()
    }

    fn element_kind(&self) -> ElementKind {
        ElementKind::Field
    }

    fn javadoc(&self) -> Option<MarkupContent> {
        self.core.provider.javadoc(&self.javadoc_target())
    }
}

impl PartialEq for FieldView {
    fn eq(&self, other: &Self) -> bool {
        self.data.member.binding_key == other.data.member.binding_key
    }
}

impl Eq for FieldView {}

impl fmt::Debug for FieldView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldView")
            .field("binding_key", &self.data.member.binding_key)
            .finish()
    }
}

#[derive(Clone)]
pub struct MethodView {
    data: Arc<MethodData>,
    core: MemberCore,
}

/// Wrap a method. The view holds its declaring type weakly.
pub fn wrap_method(
    data: MethodData,
    declaring: &TypeView,
    provider: Arc<dyn JavadocProvider>,
) -> MethodView {
    MethodView {
        data: Arc::new(data),
        core: MemberCore::new(declaring, provider),
    }
}

impl MethodView {
    pub fn declaring_type(&self) -> Option<TypeView> {
        self.core.declaring_type()
    }

    pub fn flags(&self) -> u32 {
        self.data.member.flags
    }

    pub fn is_static(&self) -> bool {
        self.flags() & flags::STATIC != 0
    }

    pub fn signature(&self) -> &str {
        &self.data.member.label
    }

    pub fn is_constructor(&self) -> bool {
        self.data.constructor
    }

    pub fn return_type(&self) -> Result<JavaType, DecodeError> {
        wrap(&self.data.return_type)
    }

    pub fn parameters(&self) -> Result<Vec<JavaType>, DecodeError> {
        self.data.parameters.iter().map(wrap).collect()
    }

    /// Whether the declared parameter types equal `params` by name.
    ///
    /// A parameter that fails to decode never matches.
    pub fn has_parameters(&self, params: &[JavaType]) -> bool {
        self.data.parameters.len() == params.len()
            && self
                .data
                .parameters
                .iter()
                .zip(params)
                .all(|(declared, wanted)| wrap(declared).is_ok_and(|t| t == *wanted))
    }

    pub fn annotations(&self) -> Vec<AnnotationView> {
        self.core.annotations(&self.data.member)
    }

    pub fn data(&self) -> &MethodData {
        &self.data
    }
}

impl JavaElement for MethodView {
    fn element_name(&self) -> &str {
        &self.data.member.name
    }

    fn binding_key(&self) -> String {
        self.data.member.binding_key.clone()
    }

    fn element_kind(&self) -> ElementKind {
        ElementKind::Method
    }

    fn javadoc(&self) -> Option<MarkupContent> {
        self.core.provider.javadoc(&self.javadoc_target())
    }
}

impl PartialEq for MethodView {
    fn eq(&self, other: &Self) -> bool {
        self.data.member.binding_key == other.data.member.binding_key
    }
}

impl Eq for MethodView {}

impl fmt::Debug for MethodView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MethodView")
            .field("binding_key", &self.data.member.binding_key)
            .finish()
    }
}
