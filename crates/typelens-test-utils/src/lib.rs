//! Utilities shared by typelens tests.
//!
//! The fixture index (`fixtures/index.txt`) models a small Spring/Netty
//! project on a JDK: a few hundred platform types flagged as system library
//! types, a handful of third-party jars, and the project's own sources under
//! `org.test`.

use std::sync::Arc;

use serde_json::json;
use typelens_index::{IndexDump, MemoryIndex, ProjectRegistry};
use typelens_proto::names::fq_to_binary_name;
use typelens_proto::{
    flags, markdown, ClasspathEntryData, CpeData, FieldData, JavaTypeData, Location, MemberData,
    MethodData, Position, PrimitiveKind, Range, TypeData, TypeKind, OBJECT_FQ_NAME,
};

mod builders;

pub use builders::{class, interface};

/// Project URI the fixture index is registered under.
pub const PROJECT_URI: &str = "file:///work/demo";

const FIXTURE: &str = include_str!("../fixtures/index.txt");

/// All snapshots of the fixture index, in file order.
pub fn fixture_types() -> Vec<TypeData> {
    let mut types = parse_fixture(FIXTURE);
    for ty in &mut types {
        add_members(ty);
    }
    types
}

pub fn fixture_index() -> MemoryIndex {
    fixture_dump().into_index()
}

/// Registry with the fixture index registered under [`PROJECT_URI`].
pub fn fixture_resolver() -> Arc<ProjectRegistry> {
    let registry = ProjectRegistry::new();
    if let Err(err) = registry.register(PROJECT_URI, Arc::new(fixture_index())) {
        panic!("fixture project URI must be valid: {err}");
    }
    Arc::new(registry)
}

/// The fixture as a JSON index dump, including docs and source locations.
pub fn fixture_dump() -> IndexDump {
    let types = fixture_types();
    let mut dump = IndexDump::from_types(&types);
    dump.javadoc.insert(
        "Ljava/util/Map;".to_string(),
        markdown(
            "An object that maps keys to values. A map cannot contain duplicate keys.",
        ),
    );
    dump.javadoc.insert(
        "Lorg/test/Quote;".to_string(),
        markdown("A quote served by the demo application."),
    );
    dump.locations.insert(
        "Lorg/test/Quote;".to_string(),
        Location {
            uri: "file:///work/demo/src/main/java/org/test/Quote.java"
                .parse()
                .expect("fixture uri"),
            range: Range {
                start: Position {
                    line: 6,
                    character: 13,
                },
                end: Position {
                    line: 6,
                    character: 18,
                },
            },
        },
    );
    dump
}

/// Parse the fixture table format described at the top of `index.txt`.
///
/// Panics on malformed lines; fixtures are checked in.
pub fn parse_fixture(text: &str) -> Vec<TypeData> {
    let mut origin: Option<ClasspathEntryData> = None;
    let mut out = Vec::new();

    for (line_no, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if let Some(section) = line.strip_prefix('[').and_then(|l| l.strip_suffix(']')) {
            origin = Some(parse_section(section, line_no + 1));
            continue;
        }

        let mut tokens = line.split_whitespace();
        let (Some(kind), Some(fq_name)) = (tokens.next(), tokens.next()) else {
            panic!("line {}: expected `<kind> <fq name>`", line_no + 1);
        };
        let mut ty = match kind {
            "class" => class(fq_name, None, &[]),
            "interface" | "annotation" => interface(fq_name, &[]),
            "enum" => class(fq_name, Some("java.lang.Enum"), &[]),
            other => panic!("line {}: unknown kind `{other}`", line_no + 1),
        };
        match kind {
            "annotation" => {
                ty.interfaze = false;
                ty.annotation = true;
                ty.flags |= flags::ANNOTATION;
                ty.super_interface_names = vec!["java.lang.annotation.Annotation".to_string()];
            }
            "enum" => {
                ty.clazz = false;
                ty.enumeration = true;
                ty.flags |= flags::ENUM | flags::FINAL;
            }
            _ => {}
        }

        while let Some(keyword) = tokens.next() {
            let Some(list) = tokens.next() else {
                panic!("line {}: `{keyword}` without names", line_no + 1);
            };
            let names = list.split(',').map(str::to_string);
            match (keyword, kind) {
                ("extends", "interface") => ty.super_interface_names.extend(names),
                ("extends", _) => ty.super_class_name = Some(list.to_string()),
                ("implements", _) => ty.super_interface_names.extend(names),
                (other, _) => panic!("line {}: unexpected `{other}`", line_no + 1),
            }
        }

        ty.classpath_entry = origin.clone();
        out.push(ty);
    }
    out
}

fn parse_section(section: &str, line_no: usize) -> ClasspathEntryData {
    let parts: Vec<&str> = section.split_whitespace().collect();
    match parts.as_slice() {
        ["system", module, path] => ClasspathEntryData {
            module: Some(module.to_string()),
            cpe: CpeData {
                system: true,
                ..CpeData::binary(*path)
            },
        },
        ["library", path] => ClasspathEntryData {
            module: None,
            cpe: CpeData::binary(*path),
        },
        ["project", source, output] => ClasspathEntryData {
            module: None,
            cpe: CpeData::source(*source, *output),
        },
        _ => panic!("line {line_no}: malformed section `[{section}]`"),
    }
}

fn reference(kind: TypeKind, name: &str) -> JavaTypeData {
    JavaTypeData::new(kind, name)
}

fn method(owner: &TypeData, name: &str, descriptor: &str, label: &str) -> MemberData {
    MemberData {
        name: name.to_string(),
        flags: flags::PUBLIC,
        label: label.to_string(),
        binding_key: format!("{}.{name}{descriptor}", owner.binding_key),
        declaring_type: Some(owner.binding_key.clone()),
        annotations: Vec::new(),
    }
}

/// Members for the types that point-lookup tests look at.
fn add_members(ty: &mut TypeData) {
    let object = reference(TypeKind::Class, &fq_to_binary_name(OBJECT_FQ_NAME));
    match ty.fq_name.as_str() {
        "java.util.Map" => {
            let key = reference(TypeKind::TypeVariable, "TK;");
            let value = reference(TypeKind::TypeVariable, "TV;");
            ty.methods = vec![
                MethodData {
                    member: MemberData {
                        flags: flags::PUBLIC | flags::ABSTRACT,
                        ..method(ty, "size", "()I", "int size()")
                    },
                    return_type: reference(TypeKind::Primitive(PrimitiveKind::Int), "I"),
                    parameters: Vec::new(),
                    constructor: false,
                },
                MethodData {
                    member: MemberData {
                        flags: flags::PUBLIC | flags::ABSTRACT,
                        ..method(ty, "get", "(Ljava/lang/Object;)TV;", "V get(Object)")
                    },
                    return_type: value.clone(),
                    parameters: vec![object],
                    constructor: false,
                },
                MethodData {
                    member: MemberData {
                        flags: flags::PUBLIC | flags::ABSTRACT,
                        ..method(ty, "put", "(TK;TV;)TV;", "V put(K, V)")
                    },
                    return_type: value.clone(),
                    parameters: vec![key, value],
                    constructor: false,
                },
            ];
        }
        "org.test.Quote" => {
            let string = reference(TypeKind::Class, "Ljava/lang/String;");
            ty.annotations = vec![serde_json::from_value(json!({
                "fqName": "org.test.Audited",
                "valuePairs": {"level": "FULL", "retain": true}
            }))
            .unwrap_or_else(|err| panic!("fixture annotation: {err}"))];
            ty.fields = vec![FieldData {
                member: MemberData {
                    flags: flags::PRIVATE,
                    binding_key: format!("{}.text)Ljava/lang/String;", ty.binding_key),
                    ..method(ty, "text", "", "String text")
                },
                field_type: string.clone(),
                enum_constant: false,
            }];
            ty.methods = vec![
                MethodData {
                    member: method(ty, "Quote", "(Ljava/lang/String;)V", "Quote(String)"),
                    return_type: reference(TypeKind::Void, "V"),
                    parameters: vec![string.clone()],
                    constructor: true,
                },
                MethodData {
                    member: method(ty, "getText", "()Ljava/lang/String;", "String getText()"),
                    return_type: string,
                    parameters: Vec::new(),
                    constructor: false,
                },
            ];
        }
        _ => {}
    }
}
