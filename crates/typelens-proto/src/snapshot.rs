use std::collections::HashSet;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{names, DecodeError, JavaTypeData};

/// JVM access flags (`ACC_*`) as carried in `flags` bitmasks.
pub mod flags {
    pub const PUBLIC: u32 = 0x0001;
    pub const PRIVATE: u32 = 0x0002;
    pub const PROTECTED: u32 = 0x0004;
    pub const STATIC: u32 = 0x0008;
    pub const FINAL: u32 = 0x0010;
    pub const SYNCHRONIZED: u32 = 0x0020;
    pub const VOLATILE: u32 = 0x0040;
    pub const TRANSIENT: u32 = 0x0080;
    pub const NATIVE: u32 = 0x0100;
    pub const INTERFACE: u32 = 0x0200;
    pub const ABSTRACT: u32 = 0x0400;
    pub const SYNTHETIC: u32 = 0x1000;
    pub const ANNOTATION: u32 = 0x2000;
    pub const ENUM: u32 = 0x4000;
}

/// Annotation member value. Untagged on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnnotationValue {
    Boolean(bool),
    Number(serde_json::Number),
    String(String),
    Array(Vec<AnnotationValue>),
    Annotation(AnnotationData),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnotationData {
    pub fq_name: String,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub value_pairs: IndexMap<String, AnnotationValue>,
}

impl AnnotationData {
    pub fn new(fq_name: impl Into<String>) -> Self {
        Self {
            fq_name: fq_name.into(),
            value_pairs: IndexMap::new(),
        }
    }

    /// `com.example.Marker` -> `Lcom/example/Marker;`.
    pub fn binding_key(&self) -> String {
        names::fq_to_binary_name(&self.fq_name)
    }
}

/// Part shared by fields and methods.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct MemberData {
    pub name: String,
    #[serde(default)]
    pub flags: u32,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub binding_key: String,
    /// Binding key of the declaring type. Informational only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub declaring_type: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub annotations: Vec<AnnotationData>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldData {
    #[serde(flatten)]
    pub member: MemberData,
    #[serde(rename = "type")]
    pub field_type: JavaTypeData,
    #[serde(default)]
    pub enum_constant: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MethodData {
    #[serde(flatten)]
    pub member: MemberData,
    pub return_type: JavaTypeData,
    #[serde(default)]
    pub parameters: Vec<JavaTypeData>,
    #[serde(default)]
    pub constructor: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CpeKind {
    Binary,
    Source,
}

/// A classpath entry as the engine reports it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CpeData {
    pub kind: CpeKind,
    pub path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_folder: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_container_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub javadoc_container_url: Option<String>,
    #[serde(default)]
    pub system: bool,
    #[serde(default)]
    pub own: bool,
    #[serde(default)]
    pub test: bool,
}

impl CpeData {
    pub fn binary(path: impl Into<String>) -> Self {
        Self {
            kind: CpeKind::Binary,
            path: path.into(),
            output_folder: None,
            source_container_url: None,
            javadoc_container_url: None,
            system: false,
            own: false,
            test: false,
        }
    }

    pub fn source(path: impl Into<String>, output_folder: impl Into<String>) -> Self {
        Self {
            kind: CpeKind::Source,
            output_folder: Some(output_folder.into()),
            own: true,
            ..Self::binary(path)
        }
    }

    /// Where compiled classes for this entry live.
    pub fn binary_location(&self) -> Option<&str> {
        match self.kind {
            CpeKind::Binary => Some(self.path.as_str()),
            CpeKind::Source => self.output_folder.as_deref(),
        }
    }
}

/// Classpath origin of a type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClasspathEntryData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub module: Option<String>,
    pub cpe: CpeData,
}

impl ClasspathEntryData {
    pub fn binary_location(&self) -> Option<&str> {
        self.cpe.binary_location()
    }
}

/// Snapshot of one type declaration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct TypeData {
    #[serde(default)]
    pub flags: u32,
    #[serde(default)]
    pub name: String,
    pub fq_name: String,
    #[serde(default)]
    pub label: String,
    pub binding_key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub classpath_entry: Option<ClasspathEntryData>,
    #[serde(default)]
    pub clazz: bool,
    #[serde(default, rename = "interface")]
    pub interfaze: bool,
    #[serde(default, rename = "enum")]
    pub enumeration: bool,
    #[serde(default)]
    pub annotation: bool,
    #[serde(default)]
    pub annotations: Vec<AnnotationData>,
    #[serde(default)]
    pub fields: Vec<FieldData>,
    #[serde(default)]
    pub methods: Vec<MethodData>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub super_class_name: Option<String>,
    #[serde(default)]
    pub super_interface_names: Vec<String>,
}

impl TypeData {
    /// Parse and validate a single snapshot.
    pub fn decode(value: Value) -> Result<TypeData, DecodeError> {
        let data: TypeData =
            serde_json::from_value(value).map_err(|err| DecodeError::from_serde(&err))?;
        data.validate()?;
        Ok(data)
    }

    pub fn to_value(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }

    pub fn validate(&self) -> Result<(), DecodeError> {
        if self.fq_name.is_empty() {
            return Err(DecodeError::MissingField { field: "fqName" });
        }
        if self.binding_key.is_empty() {
            return Err(DecodeError::MissingField {
                field: "bindingKey",
            });
        }

        let kinds = [self.clazz, self.interfaze, self.enumeration, self.annotation]
            .into_iter()
            .filter(|flag| *flag)
            .count();
        if kinds > 1 {
            return Err(DecodeError::invalid(
                "clazz",
                "kind flags clazz/interface/enum/annotation are mutually exclusive",
            ));
        }

        let mut seen = HashSet::with_capacity(self.fields.len());
        for field in &self.fields {
            if !seen.insert(field.member.name.as_str()) {
                return Err(DecodeError::invalid(
                    "fields",
                    format!("duplicate field `{}`", field.member.name),
                ));
            }
        }
        Ok(())
    }

    /// Same snapshot without members and annotations.
    pub fn shallow(&self) -> TypeData {
        TypeData {
            annotations: Vec::new(),
            fields: Vec::new(),
            methods: Vec::new(),
            ..self.clone()
        }
    }

    pub fn is_shallow(&self) -> bool {
        self.annotations.is_empty() && self.fields.is_empty() && self.methods.is_empty()
    }

    pub fn package_name(&self) -> &str {
        names::package_of(&self.fq_name)
    }

    /// Simple name, derived from the fq name when `name` was not sent.
    pub fn simple_name(&self) -> &str {
        if self.name.is_empty() {
            names::simple_name_of(&self.fq_name)
        } else {
            &self.name
        }
    }

    /// Direct supertypes in declaration order: superclass first.
    pub fn direct_supertype_names(&self) -> impl Iterator<Item = &str> {
        self.super_class_name
            .as_deref()
            .into_iter()
            .chain(self.super_interface_names.iter().map(String::as_str))
    }

    /// Minimal class snapshot, used for synthesised entries.
    pub fn synthetic_class(fq_name: &str) -> TypeData {
        TypeData {
            flags: flags::PUBLIC,
            name: names::simple_name_of(fq_name).to_string(),
            fq_name: fq_name.to_string(),
            label: fq_name.to_string(),
            binding_key: names::fq_to_binary_name(fq_name),
            clazz: true,
            ..TypeData::default()
        }
    }
}
