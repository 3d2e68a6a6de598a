use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::{Arc, OnceLock, Weak};

use parking_lot::Mutex;
use typelens_proto::{flags, ClasspathEntryData, MarkupContent, TypeData};

use crate::{
    wrap_annotation, wrap_field, wrap_method, AnnotationView, ElementKind, FieldView, JavaElement,
    JavaType, JavadocProvider, MethodView,
};

/// Deferred lookup of a type's enclosing type. Evaluated at most once.
pub type DeclaringTypeSupplier = Box<dyn FnOnce() -> Option<TypeView> + Send>;

pub(crate) struct TypeInner {
    data: TypeData,
    declaring: OnceLock<Option<TypeView>>,
    supplier: Mutex<Option<DeclaringTypeSupplier>>,
    provider: Arc<dyn JavadocProvider>,
}

/// A wrapped type declaration.
///
/// Cheap to clone. Members created from this view refer back to it weakly, so
/// they outlive it only as detached values.
#[derive(Clone)]
pub struct TypeView(Arc<TypeInner>);

pub fn wrap_type(
    data: TypeData,
    declaring: DeclaringTypeSupplier,
    provider: Arc<dyn JavadocProvider>,
) -> TypeView {
    TypeView(Arc::new(TypeInner {
        data,
        declaring: OnceLock::new(),
        supplier: Mutex::new(Some(declaring)),
        provider,
    }))
}

/// Where a type was loaded from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClasspathContainer<'a> {
    pub module: Option<&'a str>,
    pub binary_location: Option<&'a str>,
    pub system: bool,
    pub own: bool,
}

impl<'a> From<&'a ClasspathEntryData> for ClasspathContainer<'a> {
    fn from(entry: &'a ClasspathEntryData) -> Self {
        Self {
            module: entry.module.as_deref(),
            binary_location: entry.binary_location(),
            system: entry.cpe.system,
            own: entry.cpe.own,
        }
    }
}

impl TypeView {
    /// Wrap a type that has no enclosing type.
    pub fn top_level(data: TypeData, provider: Arc<dyn JavadocProvider>) -> TypeView {
        wrap_type(data, Box::new(|| None), provider)
    }

    pub(crate) fn from_inner(inner: Arc<TypeInner>) -> TypeView {
        TypeView(inner)
    }

    pub(crate) fn downgrade(&self) -> Weak<TypeInner> {
        Arc::downgrade(&self.0)
    }

    pub fn data(&self) -> &TypeData {
        &self.0.data
    }

    pub fn fully_qualified_name(&self) -> &str {
        &self.0.data.fq_name
    }

    pub fn label(&self) -> &str {
        &self.0.data.label
    }

    pub fn flags(&self) -> u32 {
        self.0.data.flags
    }

    pub fn is_class(&self) -> bool {
        self.0.data.clazz
    }

    pub fn is_interface(&self) -> bool {
        self.0.data.interfaze
    }

    pub fn is_enum(&self) -> bool {
        self.0.data.enumeration
    }

    pub fn is_annotation(&self) -> bool {
        self.0.data.annotation
    }

    pub fn is_abstract(&self) -> bool {
        self.flags() & flags::ABSTRACT != 0
    }

    /// Enclosing type, resolved through the supplier on first access.
    pub fn declaring_type(&self) -> Option<TypeView> {
        self.0
            .declaring
            .get_or_init(|| {
                let supplier = self.0.supplier.lock().take();
                let declaring = supplier.and_then(|supply| supply());
                tracing::trace!(
                    target: "typelens.types",
                    ty = %self.0.data.fq_name,
                    found = declaring.is_some(),
                    "resolved declaring type"
                );
                declaring
            })
            .clone()
    }

    pub fn classpath_container(&self) -> Option<ClasspathContainer<'_>> {
        self.0.data.classpath_entry.as_ref().map(ClasspathContainer::from)
    }

    pub fn superclass_name(&self) -> Option<&str> {
        self.0.data.super_class_name.as_deref()
    }

    pub fn super_interface_names(&self) -> &[String] {
        &self.0.data.super_interface_names
    }

    pub fn annotations(&self) -> Vec<AnnotationView> {
        self.0
            .data
            .annotations
            .iter()
            .map(|a| wrap_annotation(a.clone(), Arc::clone(&self.0.provider)))
            .collect()
    }

    pub fn fields(&self) -> Vec<FieldView> {
        self.0
            .data
            .fields
            .iter()
            .map(|f| wrap_field(f.clone(), self, Arc::clone(&self.0.provider)))
            .collect()
    }

    pub fn methods(&self) -> Vec<MethodView> {
        self.0
            .data
            .methods
            .iter()
            .map(|m| wrap_method(m.clone(), self, Arc::clone(&self.0.provider)))
            .collect()
    }

    pub fn get_field(&self, name: &str) -> Option<FieldView> {
        self.0
            .data
            .fields
            .iter()
            .find(|f| f.member.name == name)
            .map(|f| wrap_field(f.clone(), self, Arc::clone(&self.0.provider)))
    }

    /// First method named `name` whose parameter types equal `params`.
    pub fn get_method(&self, name: &str, params: &[JavaType]) -> Option<MethodView> {
        self.0
            .data
            .methods
            .iter()
            .filter(|m| m.member.name == name)
            .map(|m| wrap_method(m.clone(), self, Arc::clone(&self.0.provider)))
            .find(|m| m.has_parameters(params))
    }
}

impl JavaElement for TypeView {
    fn element_name(&self) -> &str {
        self.0.data.simple_name()
    }

    fn binding_key(&self) -> String {
        self.0.data.binding_key.clone()
    }

    fn element_kind(&self) -> ElementKind {
        ElementKind::Type
    }

    fn javadoc(&self) -> Option<MarkupContent> {
        self.0.provider.javadoc(&self.javadoc_target())
    }
}

impl PartialEq for TypeView {
    fn eq(&self, other: &Self) -> bool {
        self.0.data.fq_name == other.0.data.fq_name
    }
}

impl Eq for TypeView {}

impl Hash for TypeView {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.data.fq_name.hash(state);
    }
}

impl fmt::Debug for TypeView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("TypeView").field(&self.0.data.fq_name).finish()
    }
}
