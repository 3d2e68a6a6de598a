use std::collections::HashSet;
use std::ops::ControlFlow;

use typelens_config::SystemLibraryFilter;
use typelens_fuzzy::{MatchOptions, NameMatcher, RankKey};
use typelens_index::JavaIndex;
use typelens_proto::TypeData;
use typelens_scheduler::CancellationToken;

use crate::aggregate::{dedup_with, is_system_library};
use crate::QueryError;

/// Matching and filtering options shared by type and package search.
#[derive(Debug, Clone, Copy)]
pub(crate) struct SearchOptions<'a> {
    pub query: &'a str,
    pub camel_case_allowed: bool,
    pub include_system_libraries: bool,
    pub limit: usize,
}

impl SearchOptions<'_> {
    fn matcher(&self) -> NameMatcher {
        NameMatcher::new(
            self.query,
            MatchOptions {
                camel_case: self.camel_case_allowed,
            },
        )
    }

    fn admits(&self, ty: &TypeData, filter: &SystemLibraryFilter) -> bool {
        self.include_system_libraries || !is_system_library(ty, filter)
    }
}

struct Hit<T> {
    key: RankKey,
    literal: bool,
    item: T,
}

/// Sorts best-first and applies the cap. Literal hits rank above every
/// camel-case or fuzzy hit, so keeping at least all of them never drops a
/// literal hit in favour of a fuzzy one.
fn rank_and_cap<T>(hits: &mut Vec<Hit<T>>, name: impl Fn(&T) -> &str, limit: usize) {
    hits.sort_by(|a, b| {
        b.key
            .cmp(&a.key)
            .then_with(|| name(&a.item).cmp(name(&b.item)))
    });
    let literal = hits.iter().filter(|hit| hit.literal).count();
    hits.truncate(limit.max(literal));
}

/// Runs `visit` over every type, stopping early once `cancel` fires.
fn scan(
    index: &dyn JavaIndex,
    cancel: &CancellationToken,
    mut visit: impl FnMut(&TypeData),
) -> Result<usize, QueryError> {
    let mut scanned = 0usize;
    let mut cancelled = false;
    index.for_each_type(&mut |ty| {
        if cancel.is_cancelled() {
            cancelled = true;
            return ControlFlow::Break(());
        }
        scanned += 1;
        visit(ty);
        ControlFlow::Continue(())
    })?;
    if cancelled {
        return Err(QueryError::Cancelled);
    }
    Ok(scanned)
}

pub(crate) fn search_types(
    index: &dyn JavaIndex,
    filter: &SystemLibraryFilter,
    options: &SearchOptions<'_>,
    cancel: &CancellationToken,
) -> Result<Vec<TypeData>, QueryError> {
    if options.query.trim().is_empty() {
        return Ok(Vec::new());
    }

    let mut matcher = options.matcher();
    let mut hits = Vec::new();
    let mut dropped = 0usize;
    let scanned = scan(index, cancel, |ty| {
        if !options.admits(ty, filter) {
            return;
        }
        let Some(score) = matcher.score_type(ty.simple_name(), &ty.fq_name) else {
            return;
        };
        if let Err(err) = ty.validate() {
            dropped += 1;
            tracing::warn!(
                target: "typelens.query",
                fq_name = %ty.fq_name,
                error = %err,
                "dropping invalid search hit"
            );
            return;
        }
        hits.push(Hit {
            key: score.rank_key(),
            literal: score.kind.is_literal(),
            item: ty.shallow(),
        });
    })?;

    let mut hits = dedup_with(hits, |hit| &hit.item);
    let matched = hits.len();
    rank_and_cap(&mut hits, |ty| ty.fq_name.as_str(), options.limit);
    tracing::debug!(
        target: "typelens.query",
        query = options.query,
        scanned,
        matched,
        dropped,
        returned = hits.len(),
        "type search finished"
    );
    Ok(hits.into_iter().map(|hit| hit.item).collect())
}

pub(crate) fn search_packages(
    index: &dyn JavaIndex,
    filter: &SystemLibraryFilter,
    options: &SearchOptions<'_>,
    cancel: &CancellationToken,
) -> Result<Vec<String>, QueryError> {
    if options.query.trim().is_empty() {
        return Ok(Vec::new());
    }

    let mut matcher = options.matcher();
    let mut seen: HashSet<String> = HashSet::new();
    let mut hits = Vec::new();
    let scanned = scan(index, cancel, |ty| {
        if !options.admits(ty, filter) {
            return;
        }
        let package = ty.package_name();
        if package.is_empty() || seen.contains(package) {
            return;
        }
        seen.insert(package.to_string());
        if let Some(score) = matcher.score(package) {
            hits.push(Hit {
                key: score.rank_key(),
                literal: score.kind.is_literal(),
                item: package.to_string(),
            });
        }
    })?;

    let matched = hits.len();
    rank_and_cap(&mut hits, String::as_str, options.limit);
    tracing::debug!(
        target: "typelens.query",
        query = options.query,
        scanned,
        packages = seen.len(),
        matched,
        returned = hits.len(),
        "package search finished"
    );
    Ok(hits.into_iter().map(|hit| hit.item).collect())
}
