use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use typelens_proto::names::binary_to_fq_name;
use typelens_proto::{DecodeError, JavaTypeData, PrimitiveKind, TypeKind};

/// A wrapped type usage site.
///
/// Primitive and `void` variants carry no data. The other variants keep the
/// raw wire value and decode nested parts on access.
#[derive(Debug, Clone)]
pub enum JavaType {
    Primitive(PrimitiveKind),
    Void,
    Class(ClassType),
    Array(ArrayType),
    Parameterized(ParameterizedType),
    TypeVariable(NamedType),
    Wildcard(NamedType),
    Unresolved(NamedType),
}

/// Wrap a wire type reference.
///
/// Fails only on an unknown kind tag; nested parts are not looked at until
/// requested.
pub fn wrap(data: &JavaTypeData) -> Result<JavaType, DecodeError> {
    wrap_owned(data.clone())
}

pub(crate) fn wrap_owned(data: JavaTypeData) -> Result<JavaType, DecodeError> {
    Ok(match data.kind()? {
        TypeKind::Primitive(kind) => JavaType::Primitive(kind),
        TypeKind::Void => JavaType::Void,
        TypeKind::Class => JavaType::Class(ClassType(Arc::new(data))),
        TypeKind::Array => JavaType::Array(ArrayType(Arc::new(data))),
        TypeKind::Parameterized => JavaType::Parameterized(ParameterizedType(Arc::new(data))),
        TypeKind::TypeVariable => JavaType::TypeVariable(NamedType(Arc::new(data))),
        TypeKind::Wildcard => JavaType::Wildcard(NamedType(Arc::new(data))),
        TypeKind::Unresolved => JavaType::Unresolved(NamedType(Arc::new(data))),
    })
}

impl JavaType {
    pub const INT: JavaType = JavaType::Primitive(PrimitiveKind::Int);
    pub const BOOLEAN: JavaType = JavaType::Primitive(PrimitiveKind::Boolean);
    pub const LONG: JavaType = JavaType::Primitive(PrimitiveKind::Long);
    pub const VOID: JavaType = JavaType::Void;

    pub fn kind(&self) -> TypeKind {
        match self {
            JavaType::Primitive(kind) => TypeKind::Primitive(*kind),
            JavaType::Void => TypeKind::Void,
            JavaType::Class(_) => TypeKind::Class,
            JavaType::Array(_) => TypeKind::Array,
            JavaType::Parameterized(_) => TypeKind::Parameterized,
            JavaType::TypeVariable(_) => TypeKind::TypeVariable,
            JavaType::Wildcard(_) => TypeKind::Wildcard,
            JavaType::Unresolved(_) => TypeKind::Unresolved,
        }
    }

    /// Binary name; descriptor character for primitives and `void`.
    pub fn name(&self) -> &str {
        match self {
            JavaType::Primitive(kind) => kind.descriptor(),
            JavaType::Void => "V",
            JavaType::Class(t) => t.name(),
            JavaType::Array(t) => t.name(),
            JavaType::Parameterized(t) => t.name(),
            JavaType::TypeVariable(t) | JavaType::Wildcard(t) | JavaType::Unresolved(t) => {
                t.name()
            }
        }
    }

    /// Wire form of this view.
    pub fn to_data(&self) -> JavaTypeData {
        match self {
            JavaType::Primitive(_) | JavaType::Void => JavaTypeData::new(self.kind(), self.name()),
            JavaType::Class(t) => t.0.as_ref().clone(),
            JavaType::Array(t) => t.0.as_ref().clone(),
            JavaType::Parameterized(t) => t.0.as_ref().clone(),
            JavaType::TypeVariable(t) | JavaType::Wildcard(t) | JavaType::Unresolved(t) => {
                t.0.as_ref().clone()
            }
        }
    }

    pub fn is_primitive(&self) -> bool {
        matches!(self, JavaType::Primitive(_))
    }

    pub fn as_class(&self) -> Option<&ClassType> {
        match self {
            JavaType::Class(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&ArrayType> {
        match self {
            JavaType::Array(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_parameterized(&self) -> Option<&ParameterizedType> {
        match self {
            JavaType::Parameterized(t) => Some(t),
            _ => None,
        }
    }
}

impl PartialEq for JavaType {
    fn eq(&self, other: &Self) -> bool {
        self.kind() == other.kind() && self.name() == other.name()
    }
}

impl Eq for JavaType {}

impl Hash for JavaType {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.kind().hash(state);
        self.name().hash(state);
    }
}

impl fmt::Display for JavaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JavaType::Primitive(kind) => write!(f, "{kind}"),
            JavaType::Void => f.write_str("void"),
            JavaType::Class(t) => f.write_str(&t.fq_name()),
            other => f.write_str(other.name()),
        }
    }
}

/// Generates the name-based equality shared by the composite views.
macro_rules! name_identity {
    ($ty:ident) => {
        impl $ty {
            pub fn name(&self) -> &str {
                &self.0.name
            }

            pub fn data(&self) -> &JavaTypeData {
                &self.0
            }
        }

        impl PartialEq for $ty {
            fn eq(&self, other: &Self) -> bool {
                self.0.name == other.0.name
            }
        }

        impl Eq for $ty {}

        impl Hash for $ty {
            fn hash<H: Hasher>(&self, state: &mut H) {
                self.0.name.hash(state);
            }
        }
    };
}

#[derive(Debug, Clone)]
pub struct ClassType(Arc<JavaTypeData>);

name_identity!(ClassType);

impl ClassType {
    /// `java.util.Map` for `Ljava/util/Map;`.
    pub fn fq_name(&self) -> String {
        binary_to_fq_name(self.name())
    }
}

#[derive(Debug, Clone)]
pub struct ArrayType(Arc<JavaTypeData>);

name_identity!(ArrayType);

impl ArrayType {
    pub fn dimensions(&self) -> Result<u32, DecodeError> {
        self.0.dimensions()
    }

    /// Element type; `Ok(None)` when the engine did not send it.
    pub fn component(&self) -> Result<Option<JavaType>, DecodeError> {
        self.0.component()?.map(wrap_owned).transpose()
    }
}

#[derive(Debug, Clone)]
pub struct ParameterizedType(Arc<JavaTypeData>);

name_identity!(ParameterizedType);

impl ParameterizedType {
    pub fn owner(&self) -> Result<Option<JavaType>, DecodeError> {
        self.0.owner()?.map(wrap_owned).transpose()
    }

    /// Type arguments in order; `Ok(None)` when the engine did not send them.
    pub fn arguments(&self) -> Result<Option<Vec<JavaType>>, DecodeError> {
        match self.0.arguments()? {
            Some(args) => args
                .into_iter()
                .map(wrap_owned)
                .collect::<Result<Vec<_>, _>>()
                .map(Some),
            None => Ok(None),
        }
    }
}

/// Type variable, wildcard or unresolved type: a name and nothing else.
#[derive(Debug, Clone)]
pub struct NamedType(Arc<JavaTypeData>);

name_identity!(NamedType);
