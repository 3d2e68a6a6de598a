use typelens_proto::TypeData;

fn kind_of(ty: &TypeData) -> &'static str {
    if ty.interfaze {
        "interface"
    } else if ty.enumeration {
        "enum"
    } else if ty.annotation {
        "@interface"
    } else {
        "class"
    }
}

fn origin_of(ty: &TypeData) -> Option<&str> {
    let entry = ty.classpath_entry.as_ref()?;
    entry.module.as_deref().or_else(|| entry.binary_location())
}

pub(crate) fn print_type(ty: &TypeData) {
    println!("{} {}", kind_of(ty), ty.fq_name);
    if let Some(origin) = origin_of(ty) {
        println!("  from: {origin}");
    }
    if let Some(superclass) = &ty.super_class_name {
        println!("  extends: {superclass}");
    }
    if !ty.super_interface_names.is_empty() {
        println!("  implements: {}", ty.super_interface_names.join(", "));
    }
    for annotation in &ty.annotations {
        println!("  @{}", annotation.fq_name);
    }
    for field in &ty.fields {
        println!("  field {}", field.member.label);
    }
    for method in &ty.methods {
        println!("  method {}", method.member.label);
    }
}

pub(crate) fn print_type_list(types: &[TypeData]) {
    for ty in types {
        match origin_of(ty) {
            Some(origin) => println!("{:<10} {}  [{origin}]", kind_of(ty), ty.fq_name),
            None => println!("{:<10} {}", kind_of(ty), ty.fq_name),
        }
    }
}
