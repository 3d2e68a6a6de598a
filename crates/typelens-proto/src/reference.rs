use std::hash::{Hash, Hasher};

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::{DecodeError, PrimitiveKind, TypeKind};

/// Open key/value bag attached to a type reference.
pub type Extras = serde_json::Map<String, Value>;

const DIMENSIONS: &str = "dimensions";
const COMPONENT: &str = "component";
const OWNER: &str = "owner";
const ARGUMENTS: &str = "arguments";

/// One type usage site, exactly as it appears on the wire.
///
/// `kind` stays a raw string here so that an unknown tag is reported when the
/// reference is interpreted rather than when the surrounding document is
/// parsed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JavaTypeData {
    pub kind: String,
    pub name: String,
    #[serde(
        default,
        deserialize_with = "null_as_empty",
        skip_serializing_if = "serde_json::Map::is_empty"
    )]
    pub extras: Extras,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Extras, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Extras>::deserialize(deserializer)?.unwrap_or_default())
}

impl JavaTypeData {
    pub fn new(kind: TypeKind, name: impl Into<String>) -> Self {
        Self {
            kind: kind.as_str().to_string(),
            name: name.into(),
            extras: Extras::new(),
        }
    }

    pub fn with_extra(mut self, key: &str, value: Value) -> Self {
        self.extras.insert(key.to_string(), value);
        self
    }

    pub fn from_value(value: Value) -> Result<Self, DecodeError> {
        serde_json::from_value(value).map_err(|err| DecodeError::from_serde(&err))
    }

    pub fn to_value(&self) -> Value {
        // A struct of strings and JSON values always serializes.
        serde_json::to_value(self).unwrap_or(Value::Null)
    }

    pub fn kind(&self) -> Result<TypeKind, DecodeError> {
        TypeKind::parse(&self.kind)
    }

    /// Array dimension count.
    ///
    /// Falls back to the number of leading `[` in the name when the bag
    /// does not carry it. Zero is never a valid array.
    pub fn dimensions(&self) -> Result<u32, DecodeError> {
        let dims = match self.extras.get(DIMENSIONS) {
            None | Some(Value::Null) => self.name.chars().take_while(|&c| c == '[').count() as u64,
            Some(Value::Number(n)) => n.as_u64().ok_or_else(|| {
                DecodeError::invalid(DIMENSIONS, format!("expected a positive integer, got {n}"))
            })?,
            Some(_) => return Err(DecodeError::invalid(DIMENSIONS, "expected an integer")),
        };
        match u32::try_from(dims) {
            Ok(0) => Err(DecodeError::MissingField { field: DIMENSIONS }),
            Ok(dims) => Ok(dims),
            Err(_) => Err(DecodeError::invalid(DIMENSIONS, "dimension count out of range")),
        }
    }

    /// Raw array component, `None` when the bag does not carry one.
    pub fn component(&self) -> Result<Option<JavaTypeData>, DecodeError> {
        self.nested(COMPONENT)
    }

    /// Raw enclosing type of a parameterized type.
    pub fn owner(&self) -> Result<Option<JavaTypeData>, DecodeError> {
        self.nested(OWNER)
    }

    /// Raw type arguments of a parameterized type, in declaration order.
    pub fn arguments(&self) -> Result<Option<Vec<JavaTypeData>>, DecodeError> {
        match self.extras.get(ARGUMENTS) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::Array(items)) => items
                .iter()
                .map(|item| nested_from(ARGUMENTS, item))
                .collect::<Result<Vec<_>, _>>()
                .map(Some),
            Some(_) => Err(DecodeError::invalid(ARGUMENTS, "expected an array")),
        }
    }

    fn nested(&self, key: &'static str) -> Result<Option<JavaTypeData>, DecodeError> {
        match self.extras.get(key) {
            None | Some(Value::Null) => Ok(None),
            Some(value) => nested_from(key, value).map(Some),
        }
    }
}

fn nested_from(field: &'static str, value: &Value) -> Result<JavaTypeData, DecodeError> {
    JavaTypeData::deserialize(value).map_err(|err| {
        DecodeError::invalid(field, crate::sanitize_serde_json_error(&err))
    })
}

/// Decoded form of [`JavaTypeData`].
///
/// Equality and hashing compare the variant and the binary name only (type
/// erasure level): `List<String>` and `List<Integer>` share the binary name
/// `Ljava/util/List;` and are equal, while `Ljava/util/List;` as a plain
/// class and as a parameterized type are not. Use
/// [`TypeReference::structurally_eq`] to compare the full tree.
#[derive(Debug, Clone)]
pub enum TypeReference {
    Primitive(PrimitiveKind),
    Void,
    Class {
        name: String,
    },
    Array {
        name: String,
        dimensions: u32,
        /// Whether the wire form carried `dimensions` rather than leaving it
        /// to the name.
        explicit_dimensions: bool,
        component: Option<Box<TypeReference>>,
    },
    Parameterized {
        name: String,
        owner: Option<Box<TypeReference>>,
        arguments: Option<Vec<TypeReference>>,
    },
    TypeVariable {
        name: String,
    },
    Wildcard {
        name: String,
    },
    Unresolved {
        name: String,
    },
}

impl TypeReference {
    pub fn class(name: impl Into<String>) -> Self {
        TypeReference::Class { name: name.into() }
    }

    pub fn kind(&self) -> TypeKind {
        match self {
            TypeReference::Primitive(kind) => TypeKind::Primitive(*kind),
            TypeReference::Void => TypeKind::Void,
            TypeReference::Class { .. } => TypeKind::Class,
            TypeReference::Array { .. } => TypeKind::Array,
            TypeReference::Parameterized { .. } => TypeKind::Parameterized,
            TypeReference::TypeVariable { .. } => TypeKind::TypeVariable,
            TypeReference::Wildcard { .. } => TypeKind::Wildcard,
            TypeReference::Unresolved { .. } => TypeKind::Unresolved,
        }
    }

    /// Binary name. Primitives and `void` use their descriptor character.
    pub fn name(&self) -> &str {
        match self {
            TypeReference::Primitive(kind) => kind.descriptor(),
            TypeReference::Void => "V",
            TypeReference::Class { name }
            | TypeReference::Array { name, .. }
            | TypeReference::Parameterized { name, .. }
            | TypeReference::TypeVariable { name }
            | TypeReference::Wildcard { name }
            | TypeReference::Unresolved { name } => name,
        }
    }

    pub fn decode(data: &JavaTypeData) -> Result<Self, DecodeError> {
        let kind = data.kind()?;
        let name = || -> Result<String, DecodeError> {
            if data.name.is_empty() {
                Err(DecodeError::MissingField { field: "name" })
            } else {
                Ok(data.name.clone())
            }
        };
        Ok(match kind {
            TypeKind::Primitive(kind) => TypeReference::Primitive(kind),
            TypeKind::Void => TypeReference::Void,
            TypeKind::Class => TypeReference::Class { name: name()? },
            TypeKind::Array => TypeReference::Array {
                name: name()?,
                dimensions: data.dimensions()?,
                explicit_dimensions: !matches!(data.extras.get(DIMENSIONS), None | Some(Value::Null)),
                component: data
                    .component()?
                    .map(|component| TypeReference::decode(&component).map(Box::new))
                    .transpose()?,
            },
            TypeKind::Parameterized => TypeReference::Parameterized {
                name: name()?,
                owner: data
                    .owner()?
                    .map(|owner| TypeReference::decode(&owner).map(Box::new))
                    .transpose()?,
                arguments: data
                    .arguments()?
                    .map(|args| {
                        args.iter()
                            .map(TypeReference::decode)
                            .collect::<Result<Vec<_>, _>>()
                    })
                    .transpose()?,
            },
            TypeKind::TypeVariable => TypeReference::TypeVariable { name: name()? },
            TypeKind::Wildcard => TypeReference::Wildcard { name: name()? },
            TypeKind::Unresolved => TypeReference::Unresolved { name: name()? },
        })
    }

    pub fn from_value(value: Value) -> Result<Self, DecodeError> {
        TypeReference::decode(&JavaTypeData::from_value(value)?)
    }

    pub fn encode(&self) -> JavaTypeData {
        let data = JavaTypeData::new(self.kind(), self.name());
        match self {
            TypeReference::Array {
                dimensions,
                explicit_dimensions,
                component,
                ..
            } => {
                let leading = self.name().chars().take_while(|&c| c == '[').count();
                let data = if *explicit_dimensions || leading != *dimensions as usize {
                    data.with_extra(DIMENSIONS, Value::from(*dimensions))
                } else {
                    data
                };
                match component {
                    Some(component) => data.with_extra(COMPONENT, component.encode().to_value()),
                    None => data,
                }
            }
            TypeReference::Parameterized {
                owner, arguments, ..
            } => {
                let mut data = data;
                if let Some(owner) = owner {
                    data = data.with_extra(OWNER, owner.encode().to_value());
                }
                if let Some(arguments) = arguments {
                    let args = arguments.iter().map(|arg| arg.encode().to_value()).collect();
                    data = data.with_extra(ARGUMENTS, Value::Array(args));
                }
                data
            }
            _ => data,
        }
    }

    /// Full-tree comparison, including components, owners and arguments.
    pub fn structurally_eq(&self, other: &TypeReference) -> bool {
        fn boxed_eq(a: &Option<Box<TypeReference>>, b: &Option<Box<TypeReference>>) -> bool {
            match (a, b) {
                (Some(a), Some(b)) => a.structurally_eq(b),
                (None, None) => true,
                _ => false,
            }
        }

        if self != other {
            return false;
        }
        match (self, other) {
            (
                TypeReference::Array {
                    dimensions: da,
                    component: ca,
                    ..
                },
                TypeReference::Array {
                    dimensions: db,
                    component: cb,
                    ..
                },
            ) => da == db && boxed_eq(ca, cb),
            (
                TypeReference::Parameterized {
                    owner: oa,
                    arguments: aa,
                    ..
                },
                TypeReference::Parameterized {
                    owner: ob,
                    arguments: ab,
                    ..
                },
            ) => {
                boxed_eq(oa, ob)
                    && match (aa, ab) {
                        (Some(aa), Some(ab)) => {
                            aa.len() == ab.len()
                                && aa.iter().zip(ab).all(|(a, b)| a.structurally_eq(b))
                        }
                        (None, None) => true,
                        _ => false,
                    }
            }
            _ => true,
        }
    }
}

impl PartialEq for TypeReference {
    fn eq(&self, other: &Self) -> bool {
        self.kind() == other.kind() && self.name() == other.name()
    }
}

impl Eq for TypeReference {}

impl Hash for TypeReference {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.kind().hash(state);
        self.name().hash(state);
    }
}
