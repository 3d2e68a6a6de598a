use std::cmp::Ordering;

use crate::camel::camel_case_match;

/// The kind of match that was produced, from strictest to most lenient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatchKind {
    /// `candidate` equals `query` (ASCII case-insensitive).
    Exact,
    /// `candidate` starts with `query`.
    Prefix,
    /// `candidate` contains `query`.
    Substring,
    /// `query` is a camel-case abbreviation of `candidate`.
    CamelCase,
    /// General fuzzy subsequence match.
    Fuzzy,
}

impl MatchKind {
    fn rank(self) -> i32 {
        match self {
            MatchKind::Exact => 5,
            MatchKind::Prefix => 4,
            MatchKind::Substring => 3,
            MatchKind::CamelCase => 2,
            MatchKind::Fuzzy => 1,
        }
    }

    /// Whether the match is a literal occurrence of the query in the candidate.
    pub fn is_literal(self) -> bool {
        matches!(self, MatchKind::Exact | MatchKind::Prefix | MatchKind::Substring)
    }
}

/// Score returned by [`NameMatcher::score`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchScore {
    pub kind: MatchKind,
    pub score: i32,
}

/// A key that defines stable ordering for matches; larger is better.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RankKey {
    kind_rank: i32,
    score: i32,
}

impl MatchScore {
    pub fn rank_key(self) -> RankKey {
        RankKey {
            kind_rank: self.kind.rank(),
            score: self.score,
        }
    }
}

impl Ord for RankKey {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.kind_rank, self.score).cmp(&(other.kind_rank, other.score))
    }
}

impl PartialOrd for RankKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchOptions {
    /// Enables camel-case and fuzzy subsequence matching.
    pub camel_case: bool,
}

impl Default for MatchOptions {
    fn default() -> Self {
        Self { camel_case: true }
    }
}

#[inline]
fn fold_byte(b: u8) -> u8 {
    b.to_ascii_lowercase()
}

#[inline]
fn is_separator(b: u8) -> bool {
    matches!(
        b,
        b'_' | b'-' | b' ' | b'/' | b'\\' | b'.' | b'$' | b':' | b'<' | b'>' | b'[' | b']'
    )
}

fn find_folded(candidate: &[u8], query_folded: &[u8]) -> Option<usize> {
    if query_folded.len() > candidate.len() {
        return None;
    }
    candidate
        .windows(query_folded.len())
        .position(|w| w.iter().zip(query_folded).all(|(&c, &q)| fold_byte(c) == q))
}

const MIN_SCORE: i32 = i32::MIN / 4;
const LITERAL_BASE: i32 = 1_000_000;

/// Reusable matcher that avoids per-candidate allocations.
#[derive(Debug, Clone)]
pub struct NameMatcher {
    query: Vec<u8>,
    query_folded: Vec<u8>,
    options: MatchOptions,
    dp_prev: Vec<i32>,
    dp_cur: Vec<i32>,
    word_starts: Vec<bool>,
}

impl NameMatcher {
    pub fn new(query: &str, options: MatchOptions) -> Self {
        let query_bytes = query.trim().as_bytes().to_vec();
        let query_folded = query_bytes.iter().copied().map(fold_byte).collect();
        Self {
            query: query_bytes,
            query_folded,
            options,
            dp_prev: Vec::new(),
            dp_cur: Vec::new(),
            word_starts: Vec::new(),
        }
    }

    pub fn query(&self) -> &str {
        std::str::from_utf8(&self.query).unwrap_or("")
    }

    pub fn options(&self) -> MatchOptions {
        self.options
    }

    /// Whether the query names a qualified element (contains a `.`).
    pub fn is_qualified_query(&self) -> bool {
        self.query.contains(&b'.')
    }

    pub fn score(&mut self, candidate: &str) -> Option<MatchScore> {
        let c = candidate.as_bytes();
        let len_penalty = candidate.len().min(LITERAL_BASE as usize / 4) as i32;

        if self.query.is_empty() {
            return Some(MatchScore {
                kind: MatchKind::Prefix,
                score: -len_penalty,
            });
        }

        if c.len() == self.query.len() && c.eq_ignore_ascii_case(&self.query) {
            return Some(MatchScore {
                kind: MatchKind::Exact,
                score: LITERAL_BASE + i32::from(c == self.query.as_slice()),
            });
        }

        if let Some(pos) = find_folded(c, &self.query_folded) {
            // Shorter candidates and earlier occurrences rank higher.
            let kind = if pos == 0 {
                MatchKind::Prefix
            } else {
                MatchKind::Substring
            };
            return Some(MatchScore {
                kind,
                score: LITERAL_BASE - len_penalty - pos as i32,
            });
        }

        if !self.options.camel_case {
            return None;
        }

        if let Ok(query) = std::str::from_utf8(&self.query) {
            if camel_case_match(query, candidate) {
                return Some(MatchScore {
                    kind: MatchKind::CamelCase,
                    score: LITERAL_BASE - len_penalty,
                });
            }
        }

        self.subsequence_score(c).map(|score| MatchScore {
            kind: MatchKind::Fuzzy,
            score,
        })
    }

    /// Scores a type by its simple and fully-qualified name.
    ///
    /// Qualified queries (`util.Map`) are only matched against the qualified
    /// name; simple queries take the better of both.
    pub fn score_type(&mut self, simple_name: &str, qualified_name: &str) -> Option<MatchScore> {
        if self.is_qualified_query() {
            return self.score(qualified_name);
        }
        let simple = self.score(simple_name);
        let qualified = self.score(qualified_name);
        match (simple, qualified) {
            (Some(a), Some(b)) => Some(if a.rank_key() >= b.rank_key() { a } else { b }),
            (a, b) => a.or(b),
        }
    }

    fn subsequence_score(&mut self, candidate: &[u8]) -> Option<i32> {
        if self.query.len() > candidate.len() {
            return None;
        }

        const BASE_MATCH: i32 = 10;
        const BONUS_WORD_START: i32 = 15;
        const BONUS_CONSECUTIVE: i32 = 5;
        const GAP_PENALTY: i32 = 1;
        const LEADING_PENALTY: i32 = 1;
        const TRAILING_PENALTY: i32 = 1;

        let n = candidate.len();
        self.dp_prev.resize(n, MIN_SCORE);
        self.dp_cur.resize(n, MIN_SCORE);
        self.word_starts.resize(n, false);

        for (i, &b) in candidate.iter().enumerate() {
            if i == 0 {
                self.word_starts[i] = true;
                continue;
            }
            let prev = candidate[i - 1];
            self.word_starts[i] = is_separator(prev)
                || (prev.is_ascii_lowercase() && b.is_ascii_uppercase())
                || (prev.is_ascii_alphabetic() && b.is_ascii_digit());
        }

        self.dp_prev.fill(MIN_SCORE);

        let q0 = self.query[0];
        let q0_folded = self.query_folded[0];
        for (j, &c) in candidate.iter().enumerate() {
            if fold_byte(c) != q0_folded {
                continue;
            }
            let mut score = BASE_MATCH;
            if self.word_starts[j] {
                score += BONUS_WORD_START;
            }
            if q0 == c {
                score += 2;
            }
            score -= LEADING_PENALTY * (j as i32);
            self.dp_prev[j] = score;
        }

        for i in 1..self.query.len() {
            self.dp_cur.fill(MIN_SCORE);
            let q = self.query[i];
            let q_folded = self.query_folded[i];

            // running_max = max_{k<j} dp_prev[k] + GAP_PENALTY*(k+1)
            let mut running_max = MIN_SCORE;
            for (j, &c) in candidate.iter().enumerate() {
                if j > 0 {
                    let prev = self.dp_prev[j - 1];
                    if prev > MIN_SCORE / 2 {
                        running_max = running_max.max(prev + GAP_PENALTY * (j as i32));
                    }
                }

                if fold_byte(c) != q_folded {
                    continue;
                }

                let prev_non_consecutive = if running_max > MIN_SCORE / 2 {
                    running_max - GAP_PENALTY * (j as i32)
                } else {
                    MIN_SCORE
                };
                let prev_consecutive = if j > 0 {
                    self.dp_prev[j - 1] + BONUS_CONSECUTIVE
                } else {
                    MIN_SCORE
                };
                let prev_best = prev_non_consecutive.max(prev_consecutive);
                if prev_best <= MIN_SCORE / 2 {
                    continue;
                }

                let mut score = prev_best + BASE_MATCH;
                if self.word_starts[j] {
                    score += BONUS_WORD_START;
                }
                if q == c {
                    score += 2;
                }
                self.dp_cur[j] = score;
            }

            std::mem::swap(&mut self.dp_prev, &mut self.dp_cur);
        }

        let mut best = MIN_SCORE;
        for (j, &score) in self.dp_prev.iter().enumerate() {
            if score <= MIN_SCORE / 2 {
                continue;
            }
            let trailing = (candidate.len() - 1 - j) as i32;
            best = best.max(score - TRAILING_PENALTY * trailing);
        }

        (best > MIN_SCORE / 2).then_some(best)
    }
}

/// One-shot match of `query` against `candidate` with default (lenient) options.
pub fn fuzzy_match(query: &str, candidate: &str) -> Option<MatchScore> {
    NameMatcher::new(query, MatchOptions::default()).score(candidate)
}
