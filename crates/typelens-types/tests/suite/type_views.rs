use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use pretty_assertions::assert_eq;
use serde_json::json;
use typelens_proto::{JavaTypeData, TypeData};
use typelens_types::{
    wrap, wrap_type, ElementKind, JavaElement, JavaType, JavadocProvider, JavadocTarget,
    MarkupContent, NoJavadoc, TypeView,
};

fn list_snapshot() -> TypeData {
    TypeData::decode(json!({
        "flags": 1537,
        "name": "List",
        "fqName": "java.util.List",
        "label": "java.util.List<E>",
        "bindingKey": "Ljava/util/List;",
        "classpathEntry": {
            "module": "java.base",
            "cpe": {"kind": "binary", "path": "/jdk/jmods/java.base.jmod", "system": true}
        },
        "interface": true,
        "fields": [],
        "methods": [
            {
                "name": "add",
                "flags": 1025,
                "label": "boolean add(E)",
                "bindingKey": "Ljava/util/List;.add(TE;)Z",
                "returnType": {"kind": "BOOLEAN", "name": "Z"},
                "parameters": [{"kind": "TYPE_VARIABLE", "name": "TE;"}]
            },
            {
                "name": "add",
                "flags": 1025,
                "label": "void add(int, E)",
                "bindingKey": "Ljava/util/List;.add(ITE;)V",
                "returnType": {"kind": "VOID", "name": "V"},
                "parameters": [
                    {"kind": "INT", "name": "I"},
                    {"kind": "TYPE_VARIABLE", "name": "TE;"}
                ]
            },
            {
                "name": "toArray",
                "flags": 1025,
                "label": "Object[] toArray()",
                "bindingKey": "Ljava/util/List;.toArray()[Ljava/lang/Object;",
                "returnType": {
                    "kind": "ARRAY",
                    "name": "[Ljava/lang/Object;",
                    "extras": {"dimensions": 1, "component": {"kind": "CLASS", "name": "Ljava/lang/Object;"}}
                }
            }
        ],
        "superInterfaceNames": ["java.util.Collection", "java.util.SequencedCollection"]
    }))
    .unwrap()
}

fn entry_snapshot() -> TypeData {
    TypeData::decode(json!({
        "name": "Entry",
        "fqName": "java.util.Map$Entry",
        "bindingKey": "Ljava/util/Map$Entry;",
        "interface": true,
        "fields": [{
            "name": "MARKER",
            "flags": 25,
            "label": "int MARKER",
            "bindingKey": "Ljava/util/Map$Entry;.MARKER)I",
            "type": {"kind": "INT", "name": "I"}
        }]
    }))
    .unwrap()
}

fn type_var(name: &str) -> JavaType {
    wrap(&JavaTypeData::from_value(json!({"kind": "TYPE_VARIABLE", "name": name})).unwrap())
        .unwrap()
}

#[test]
fn get_method_picks_the_overload_by_parameter_names() {
    let list = TypeView::top_level(list_snapshot(), Arc::new(NoJavadoc));

    let single = list.get_method("add", &[type_var("TE;")]).unwrap();
    assert_eq!(single.signature(), "boolean add(E)");
    assert_eq!(single.return_type().unwrap(), JavaType::BOOLEAN);

    let indexed = list
        .get_method("add", &[JavaType::INT, type_var("TE;")])
        .unwrap();
    assert_eq!(indexed.signature(), "void add(int, E)");
    assert_eq!(indexed.return_type().unwrap(), JavaType::VOID);

    assert!(list.get_method("add", &[JavaType::LONG]).is_none());
    assert!(list.get_method("remove", &[]).is_none());
}

#[test]
fn method_return_types_decode_lazily() {
    let list = TypeView::top_level(list_snapshot(), Arc::new(NoJavadoc));
    let to_array = list.get_method("toArray", &[]).unwrap();
    let JavaType::Array(array) = to_array.return_type().unwrap() else {
        panic!("expected an array return type");
    };
    let component = array.component().unwrap().unwrap();
    assert_eq!(component.as_class().unwrap().fq_name(), "java.lang.Object");
    assert!(to_array.parameters().unwrap().is_empty());
}

#[test]
fn members_refer_back_weakly() {
    let list = TypeView::top_level(list_snapshot(), Arc::new(NoJavadoc));
    let methods = list.methods();
    assert_eq!(methods.len(), 3);
    assert_eq!(methods[0].declaring_type(), Some(list.clone()));

    drop(list);
    assert_eq!(methods[0].declaring_type(), None);
    // The detached view still answers from its own data.
    assert_eq!(methods[0].element_name(), "add");
}

#[test]
fn declaring_type_supplier_runs_once() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let map = TypeView::top_level(
        TypeData::synthetic_class("java.util.Map"),
        Arc::new(NoJavadoc),
    );
    let outer = map.clone();
    let entry = wrap_type(
        entry_snapshot(),
        Box::new(move || {
            counter.fetch_add(1, Ordering::SeqCst);
            Some(outer)
        }),
        Arc::new(NoJavadoc),
    );

    assert_eq!(calls.load(Ordering::SeqCst), 0);
    assert_eq!(entry.declaring_type(), Some(map.clone()));
    assert_eq!(entry.declaring_type(), Some(map));
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn fields_are_found_by_name() {
    let entry = TypeView::top_level(entry_snapshot(), Arc::new(NoJavadoc));
    let marker = entry.get_field("MARKER").unwrap();
    assert!(marker.is_static());
    assert!(!marker.is_enum_constant());
    assert_eq!(marker.field_type().unwrap(), JavaType::INT);
    assert!(entry.get_field("missing").is_none());
    assert_eq!(entry.element_name(), "Entry");
}

#[test]
fn type_equality_is_by_fully_qualified_name() {
    let full = TypeView::top_level(list_snapshot(), Arc::new(NoJavadoc));
    let mut other = list_snapshot().shallow();
    other.flags = 0;
    other.label = "something else".to_string();
    let shallow = TypeView::top_level(other, Arc::new(NoJavadoc));
    assert_eq!(full, shallow);

    let entry = TypeView::top_level(entry_snapshot(), Arc::new(NoJavadoc));
    assert_ne!(full, entry);
}

#[test]
fn classpath_container_reports_module_and_location() {
    let list = TypeView::top_level(list_snapshot(), Arc::new(NoJavadoc));
    let container = list.classpath_container().unwrap();
    assert_eq!(container.module, Some("java.base"));
    assert_eq!(container.binary_location, Some("/jdk/jmods/java.base.jmod"));
    assert!(container.system);

    let entry = TypeView::top_level(entry_snapshot(), Arc::new(NoJavadoc));
    assert!(entry.classpath_container().is_none());
}

#[derive(Default)]
struct Recording(Mutex<Vec<JavadocTarget>>);

impl JavadocProvider for Recording {
    fn javadoc(&self, target: &JavadocTarget) -> Option<MarkupContent> {
        self.0.lock().unwrap().push(target.clone());
        (target.kind == ElementKind::Method).then(|| typelens_proto::markdown("Adds an element."))
    }
}

#[test]
fn javadoc_targets_carry_kind_and_binding_key() {
    let provider = Arc::new(Recording::default());
    let list = TypeView::top_level(list_snapshot(), provider.clone());

    assert_eq!(list.javadoc(), None);
    let add = list.get_method("add", &[type_var("TE;")]).unwrap();
    assert_eq!(
        add.javadoc(),
        Some(typelens_proto::markdown("Adds an element."))
    );

    let seen = provider.0.lock().unwrap();
    assert_eq!(seen.len(), 2);
    assert_eq!(seen[0].kind, ElementKind::Type);
    assert_eq!(seen[0].binding_key, "Ljava/util/List;");
    assert_eq!(seen[1].kind, ElementKind::Method);
    assert_eq!(seen[1].binding_key, "Ljava/util/List;.add(TE;)Z");
}
