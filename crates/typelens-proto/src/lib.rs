//! Wire model for Java type snapshots.
//!
//! The engine describes every type usage site as a [`JavaTypeData`]: a kind
//! tag, a binary name, and an open-ended `extras` bag carrying the recursive
//! parts (array component, parameterized owner and arguments). Keeping the
//! recursive parts in the bag lets the format grow without breaking older
//! readers: unknown keys are ignored and missing keys decode to "absent".
//!
//! [`TypeReference`] is the decoded, exhaustively matchable form of the same
//! data. Per-declaration snapshots ([`TypeData`]) carry fields, methods,
//! annotations, supertypes and the classpath origin of a type.
//!
//! The RPC request/response shapes and method names live in [`protocol`].

mod batch;
mod error;
mod kind;
pub mod names;
pub mod protocol;
mod reference;
mod snapshot;

pub use batch::{decode_package_batch, decode_type_batch};
pub use error::{sanitize_json_error_message, sanitize_serde_json_error, DecodeError};
pub use kind::{PrimitiveKind, TypeKind};
pub use protocol::{
    hover_link, markdown, plain_text, Location, MarkupContent, MarkupKind, Position, Range, Uri,
};
pub use reference::{Extras, JavaTypeData, TypeReference};
pub use snapshot::{
    flags, AnnotationData, AnnotationValue, ClasspathEntryData, CpeData, CpeKind, FieldData,
    MemberData, MethodData, TypeData,
};

/// Fully-qualified name of the hierarchy root.
pub const OBJECT_FQ_NAME: &str = "java.lang.Object";
