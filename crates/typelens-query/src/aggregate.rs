//! Merging the per-instance answers of the index into one result list.
//!
//! The index can report several instances of one fully-qualified name: the
//! project's own source type and a same-named type from one of its libraries.
//! Results carry each name once, preferring the project's instance.

use std::collections::HashMap;

use typelens_config::SystemLibraryFilter;
use typelens_proto::{CpeKind, TypeData};

/// Whether the type belongs to the project itself rather than a library.
///
/// Own entries, source entries and snapshots without an origin all count.
pub fn is_project_instance(ty: &TypeData) -> bool {
    match ty.classpath_entry.as_ref() {
        None => true,
        Some(entry) => entry.cpe.own || entry.cpe.kind == CpeKind::Source,
    }
}

/// Whether the type belongs to a JDK or runtime library.
///
/// Entries flagged `system` by the engine always count; otherwise the module
/// name and binary location are checked against `filter`. Types without a
/// classpath entry are treated as project types.
pub fn is_system_library(ty: &TypeData, filter: &SystemLibraryFilter) -> bool {
    let Some(entry) = ty.classpath_entry.as_ref() else {
        return false;
    };
    if entry.cpe.own {
        return false;
    }
    entry.cpe.system || filter.matches(entry.module.as_deref(), entry.binary_location())
}

/// The instance a single-type answer should report.
pub fn pick_instance(instances: Vec<TypeData>) -> Option<TypeData> {
    let mut chosen: Option<TypeData> = None;
    for instance in instances {
        match &chosen {
            Some(current) if is_project_instance(current) || !is_project_instance(&instance) => {}
            _ => chosen = Some(instance),
        }
    }
    chosen
}

/// One entry per fq name, keeping first-seen order.
pub fn dedup_by_fq_name(types: Vec<TypeData>) -> Vec<TypeData> {
    dedup_with(types, |ty| ty)
}

pub(crate) fn dedup_with<T>(items: Vec<T>, snapshot: impl Fn(&T) -> &TypeData) -> Vec<T> {
    let mut slots: HashMap<String, usize> = HashMap::with_capacity(items.len());
    let mut out: Vec<T> = Vec::with_capacity(items.len());
    for item in items {
        let ty = snapshot(&item);
        match slots.get(&ty.fq_name) {
            Some(&slot) => {
                if is_project_instance(ty) && !is_project_instance(snapshot(&out[slot])) {
                    out[slot] = item;
                }
            }
            None => {
                slots.insert(ty.fq_name.clone(), out.len());
                out.push(item);
            }
        }
    }
    out
}

/// Drops snapshots that fail validation, logging each one.
pub(crate) fn retain_valid(types: Vec<TypeData>) -> Vec<TypeData> {
    types
        .into_iter()
        .filter(|ty| match ty.validate() {
            Ok(()) => true,
            Err(err) => {
                tracing::warn!(
                    target: "typelens.query",
                    fq_name = %ty.fq_name,
                    error = %err,
                    "dropping invalid type snapshot"
                );
                false
            }
        })
        .collect()
}
