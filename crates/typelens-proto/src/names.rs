//! Conversions between JVM binary names, binding keys and dotted names.
//!
//! Binary names use the descriptor form `Ljava/util/Map$Entry;`. Dotted
//! names keep `$` for nested types (`java.util.Map$Entry`), matching the
//! fully-qualified names the engine reports for declarations.

/// `Ljava/util/Map;` -> `java.util.Map`.
///
/// Generic arguments are erased
/// (`Ljava/util/List<Ljava/lang/String;>;` -> `java.util.List`). Names that
/// are not in descriptor form, such as internal names (`java/util/Map`), are
/// returned with `/` replaced by `.`.
pub fn binary_to_fq_name(binary: &str) -> String {
    let erased = match binary.find('<') {
        Some(idx) => &binary[..idx],
        None => binary,
    };
    let inner = if looks_like_binary_name(binary) {
        let body = erased.strip_prefix('L').unwrap_or(erased);
        body.strip_suffix(';').unwrap_or(body)
    } else {
        erased
    };
    inner.replace('/', ".")
}

/// `java.util.Map` -> `Ljava/util/Map;`.
pub fn fq_to_binary_name(fq_name: &str) -> String {
    format!("L{};", fq_name.replace('.', "/"))
}

/// Accept a descriptor, an internal (`java/util/Map`) or a dotted name and
/// return the dotted form.
pub fn normalize_type_name(name: &str) -> String {
    binary_to_fq_name(name.trim())
}

/// Dotted name of the type a binding key refers to.
///
/// Member keys (`Ljava/util/Map;.size()I`) resolve to their declaring type.
pub fn type_name_of_binding_key(key: &str) -> String {
    let key = key.trim();
    if key.starts_with('L') {
        if let Some(cut) = key.find(['<', ';']) {
            return binary_to_fq_name(&format!("{};", &key[..cut]));
        }
    }
    normalize_type_name(key)
}

pub fn looks_like_binary_name(name: &str) -> bool {
    name.starts_with('L') && name.ends_with(';')
}

/// Package portion of a dotted name; empty for the default package.
///
/// Nested types (`a.b.Outer$Inner`) live in the package of their outermost
/// type.
pub fn package_of(fq_name: &str) -> &str {
    let outer = match fq_name.find('$') {
        Some(idx) => &fq_name[..idx],
        None => fq_name,
    };
    match outer.rfind('.') {
        Some(idx) => &outer[..idx],
        None => "",
    }
}

/// Simple name of a dotted name (`java.util.Map$Entry` -> `Entry`).
pub fn simple_name_of(fq_name: &str) -> &str {
    let start = fq_name
        .rfind(['.', '$'])
        .map(|idx| idx + 1)
        .unwrap_or(0);
    &fq_name[start..]
}
