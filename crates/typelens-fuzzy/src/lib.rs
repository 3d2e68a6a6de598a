//! Name matching used by type and package search.
//!
//! Candidates are matched against a query with a ladder of increasingly
//! lenient strategies:
//!
//! - **exact**: the candidate equals the query (ASCII case-insensitive)
//! - **prefix**: the candidate starts with the query
//! - **substring**: the candidate contains the query
//! - **camel case**: `HMap` matches `HashMap`, `NPE` matches `NullPointerException`
//! - **fuzzy**: the query is a subsequence of the candidate, scored so that
//!   word starts and consecutive runs rank higher
//!
//! Camel-case and fuzzy matching are only attempted when the matcher is built
//! with [`MatchOptions::camel_case`]; the strict ladder (exact, prefix,
//! substring) always applies. Every literal substring hit is therefore also a
//! hit of the lenient matcher, which lets callers narrow a lenient result set
//! by substring filtering without losing anything.

#![forbid(unsafe_code)]

mod camel;
mod scoring;

pub use camel::camel_case_match;
pub use scoring::{fuzzy_match, MatchKind, MatchOptions, MatchScore, NameMatcher, RankKey};

/// ASCII case-insensitive substring test.
pub fn contains_ignore_ascii_case(haystack: &str, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    let h = haystack.as_bytes();
    let n = needle.as_bytes();
    if n.len() > h.len() {
        return false;
    }
    h.windows(n.len()).any(|w| w.eq_ignore_ascii_case(n))
}
