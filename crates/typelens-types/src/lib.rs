//! Navigable views over Java type snapshots.
//!
//! Snapshots arrive as plain data ([`typelens_proto::TypeData`] and friends).
//! This crate wraps them into views that decode their nested parts only when
//! asked: an array's component, a parameterized type's arguments, a member's
//! declared types. Accessors are pure apart from javadoc, which is fetched
//! through a [`JavadocProvider`] on every call.
//!
//! Equality of every view is name-based: type views compare by kind and
//! binary name, [`TypeView`]s by fully-qualified name, member views by binding
//! key.

mod annotation;
mod java_type;
mod javadoc;
mod member;
mod type_view;

pub use annotation::{wrap_annotation, AnnotationView, MemberValue};
pub use java_type::{wrap, ArrayType, ClassType, JavaType, NamedType, ParameterizedType};
pub use javadoc::{ElementKind, JavadocProvider, JavadocTarget, NoJavadoc};
pub use member::{wrap_field, wrap_method, FieldView, MethodView};
pub use type_view::{wrap_type, ClasspathContainer, DeclaringTypeSupplier, TypeView};

pub use typelens_proto::{DecodeError, MarkupContent};

/// Common surface of declarations that have a name, a binding key and docs.
pub trait JavaElement {
    fn element_name(&self) -> &str;

    fn binding_key(&self) -> String;

    fn element_kind(&self) -> ElementKind;

    /// Fetched from the provider on every call.
    fn javadoc(&self) -> Option<MarkupContent>;

    fn javadoc_target(&self) -> JavadocTarget {
        JavadocTarget {
            kind: self.element_kind(),
            binding_key: self.binding_key(),
            name: self.element_name().to_string(),
        }
    }
}
