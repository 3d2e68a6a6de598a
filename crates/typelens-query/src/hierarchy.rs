//! Transitive supertype and subtype closures.
//!
//! Both walks are breadth-first with a visited set seeded with the queried
//! type, so cyclic or self-referential inheritance data terminates and the
//! queried type never shows up in its own result.

use std::collections::{HashSet, VecDeque};

use typelens_index::JavaIndex;
use typelens_proto::{TypeData, OBJECT_FQ_NAME};
use typelens_scheduler::{check_cancelled, CancellationToken};

use crate::aggregate::{pick_instance, retain_valid};
use crate::QueryError;

/// Looks up the instance of `fq_name` a hierarchy answer should report.
fn lookup(index: &dyn JavaIndex, fq_name: &str) -> Result<Option<TypeData>, QueryError> {
    Ok(pick_instance(retain_valid(index.find_types(fq_name)?)))
}

pub(crate) fn super_types(
    index: &dyn JavaIndex,
    fq_name: &str,
    cancel: &CancellationToken,
) -> Result<Vec<TypeData>, QueryError> {
    let Some(root) = lookup(index, fq_name)? else {
        return Ok(Vec::new());
    };

    let mut visited: HashSet<String> = HashSet::from([root.fq_name.clone()]);
    let mut queue: VecDeque<String> = root.direct_supertype_names().map(str::to_string).collect();
    let mut out = Vec::new();
    let mut unresolved = 0usize;

    while let Some(name) = queue.pop_front() {
        check_cancelled(cancel)?;
        if !visited.insert(name.clone()) {
            continue;
        }
        match lookup(index, &name)? {
            Some(ty) => {
                queue.extend(ty.direct_supertype_names().map(str::to_string));
                out.push(ty.shallow());
            }
            None => unresolved += 1,
        }
    }

    if root.fq_name != OBJECT_FQ_NAME && !out.iter().any(|ty| ty.fq_name == OBJECT_FQ_NAME) {
        out.push(TypeData::synthetic_class(OBJECT_FQ_NAME));
    }

    tracing::debug!(
        target: "typelens.query",
        fq_name = %root.fq_name,
        supertypes = out.len(),
        unresolved,
        "supertype closure computed"
    );
    Ok(out)
}

pub(crate) fn sub_types(
    index: &dyn JavaIndex,
    fq_name: &str,
    cancel: &CancellationToken,
) -> Result<Vec<TypeData>, QueryError> {
    let Some(root) = lookup(index, fq_name)? else {
        return Ok(Vec::new());
    };

    let mut visited: HashSet<String> = HashSet::from([root.fq_name.clone()]);
    // (subtype, the supertype it was reached from)
    let mut queue: VecDeque<(String, String)> = index
        .direct_subtypes(&root.fq_name)?
        .into_iter()
        .map(|child| (child, root.fq_name.clone()))
        .collect();
    let mut out = Vec::new();

    while let Some((name, parent)) = queue.pop_front() {
        check_cancelled(cancel)?;
        if visited.contains(&name) {
            continue;
        }
        match lookup(index, &name)? {
            // The edge came from another instance of `name` than the one reported.
            Some(ty) if !ty.direct_supertype_names().any(|sup| sup == parent) => continue,
            Some(ty) => out.push(ty.shallow()),
            None => {}
        }
        visited.insert(name.clone());
        let children = index.direct_subtypes(&name)?;
        queue.extend(children.into_iter().map(|child| (child, name.clone())));
    }

    tracing::debug!(
        target: "typelens.query",
        fq_name = %root.fq_name,
        subtypes = out.len(),
        "subtype closure computed"
    );
    Ok(out)
}
