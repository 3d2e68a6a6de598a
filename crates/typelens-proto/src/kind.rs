use std::fmt;

use crate::DecodeError;

/// The eight JVM primitive types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PrimitiveKind {
    Int,
    Char,
    Boolean,
    Float,
    Byte,
    Double,
    Long,
    Short,
}

impl PrimitiveKind {
    pub const ALL: [PrimitiveKind; 8] = [
        PrimitiveKind::Int,
        PrimitiveKind::Char,
        PrimitiveKind::Boolean,
        PrimitiveKind::Float,
        PrimitiveKind::Byte,
        PrimitiveKind::Double,
        PrimitiveKind::Long,
        PrimitiveKind::Short,
    ];

    /// JVM descriptor character (`I`, `C`, `Z`, ...), used as the binary name.
    pub fn descriptor(self) -> &'static str {
        match self {
            PrimitiveKind::Int => "I",
            PrimitiveKind::Char => "C",
            PrimitiveKind::Boolean => "Z",
            PrimitiveKind::Float => "F",
            PrimitiveKind::Byte => "B",
            PrimitiveKind::Double => "D",
            PrimitiveKind::Long => "J",
            PrimitiveKind::Short => "S",
        }
    }

    /// Java keyword for the type.
    pub fn keyword(self) -> &'static str {
        match self {
            PrimitiveKind::Int => "int",
            PrimitiveKind::Char => "char",
            PrimitiveKind::Boolean => "boolean",
            PrimitiveKind::Float => "float",
            PrimitiveKind::Byte => "byte",
            PrimitiveKind::Double => "double",
            PrimitiveKind::Long => "long",
            PrimitiveKind::Short => "short",
        }
    }
}

impl fmt::Display for PrimitiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// Kind tag carried by every [`crate::JavaTypeData`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeKind {
    Primitive(PrimitiveKind),
    Void,
    Class,
    Array,
    Parameterized,
    TypeVariable,
    Wildcard,
    Unresolved,
}

impl TypeKind {
    pub fn as_str(self) -> &'static str {
        match self {
            TypeKind::Primitive(PrimitiveKind::Int) => "INT",
            TypeKind::Primitive(PrimitiveKind::Char) => "CHAR",
            TypeKind::Primitive(PrimitiveKind::Boolean) => "BOOLEAN",
            TypeKind::Primitive(PrimitiveKind::Float) => "FLOAT",
            TypeKind::Primitive(PrimitiveKind::Byte) => "BYTE",
            TypeKind::Primitive(PrimitiveKind::Double) => "DOUBLE",
            TypeKind::Primitive(PrimitiveKind::Long) => "LONG",
            TypeKind::Primitive(PrimitiveKind::Short) => "SHORT",
            TypeKind::Void => "VOID",
            TypeKind::Class => "CLASS",
            TypeKind::Array => "ARRAY",
            TypeKind::Parameterized => "PARAMETERIZED",
            TypeKind::TypeVariable => "TYPE_VARIABLE",
            TypeKind::Wildcard => "WILDCARD",
            TypeKind::Unresolved => "UNRESOLVED",
        }
    }

    /// Parse a wire tag. Unknown tags are an error, never a silent `Unresolved`.
    pub fn parse(tag: &str) -> Result<TypeKind, DecodeError> {
        Ok(match tag {
            "INT" => TypeKind::Primitive(PrimitiveKind::Int),
            "CHAR" => TypeKind::Primitive(PrimitiveKind::Char),
            "BOOLEAN" => TypeKind::Primitive(PrimitiveKind::Boolean),
            "FLOAT" => TypeKind::Primitive(PrimitiveKind::Float),
            "BYTE" => TypeKind::Primitive(PrimitiveKind::Byte),
            "DOUBLE" => TypeKind::Primitive(PrimitiveKind::Double),
            "LONG" => TypeKind::Primitive(PrimitiveKind::Long),
            "SHORT" => TypeKind::Primitive(PrimitiveKind::Short),
            "VOID" => TypeKind::Void,
            "CLASS" => TypeKind::Class,
            "ARRAY" => TypeKind::Array,
            "PARAMETERIZED" => TypeKind::Parameterized,
            "TYPE_VARIABLE" => TypeKind::TypeVariable,
            "WILDCARD" => TypeKind::Wildcard,
            "UNRESOLVED" => TypeKind::Unresolved,
            other => {
                return Err(DecodeError::UnknownKind {
                    kind: other.to_string(),
                })
            }
        })
    }
}

impl fmt::Display for TypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
