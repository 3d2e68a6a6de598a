use typelens_proto::names::{fq_to_binary_name, simple_name_of};
use typelens_proto::{flags, TypeData, OBJECT_FQ_NAME};

/// Public class with the given supertypes. `java.lang.Object` is the default
/// superclass of everything except itself.
pub fn class(fq_name: &str, superclass: Option<&str>, interfaces: &[&str]) -> TypeData {
    let super_class_name = match superclass {
        Some(name) => Some(name.to_string()),
        None if fq_name == OBJECT_FQ_NAME => None,
        None => Some(OBJECT_FQ_NAME.to_string()),
    };
    TypeData {
        flags: flags::PUBLIC,
        name: simple_name_of(fq_name).to_string(),
        fq_name: fq_name.to_string(),
        label: fq_name.to_string(),
        binding_key: fq_to_binary_name(fq_name),
        clazz: true,
        super_class_name,
        super_interface_names: interfaces.iter().map(|s| s.to_string()).collect(),
        ..TypeData::default()
    }
}

pub fn interface(fq_name: &str, extends: &[&str]) -> TypeData {
    TypeData {
        flags: flags::PUBLIC | flags::INTERFACE | flags::ABSTRACT,
        name: simple_name_of(fq_name).to_string(),
        fq_name: fq_name.to_string(),
        label: fq_name.to_string(),
        binding_key: fq_to_binary_name(fq_name),
        interfaze: true,
        super_interface_names: extends.iter().map(|s| s.to_string()).collect(),
        ..TypeData::default()
    }
}
