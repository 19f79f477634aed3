//! Matcher: first-occurrence substring scoring over the loaded index.
//!
//! A title hit always outranks a body hit: the lowest possible title score
//! (`TITLE_BASE` minus the match position) stays above the highest body
//! score (`BODY_BASE`) for any title shorter than ~900 chars. That bound is
//! part of the contract, documented here as a constant relationship.

use crate::models::Document;

/// Base score for a match found in the title; earlier positions score higher.
pub(crate) const TITLE_BASE: i64 = 1000;
/// Base score for a match found in the body.
pub(crate) const BODY_BASE: i64 = 100;
/// Body positions past this depth all floor to the same minimum score.
pub(crate) const BODY_POSITION_CUTOFF: usize = 100;
/// Score sentinel for documents without any occurrence.
const NO_MATCH: i64 = -1;

/// Default number of hits surfaced by the dropdown.
pub const DEFAULT_LIMIT: usize = 5;

/// Lower-case a query for comparison. The empty string means "no query".
pub(crate) fn normalize(query: &str) -> String {
    query.to_lowercase()
}

/// A document paired with its score for the duration of one match pass.
struct ScoredCandidate<'a> {
    doc: &'a Document,
    score: i64,
}

/// Rank `docs` against `query`, returning at most `limit` documents in
/// descending score order. Ties keep index order (stable sort). An empty
/// query short-circuits to no results.
pub fn find_matches<'a>(query: &str, docs: &'a [Document], limit: usize) -> Vec<&'a Document> {
    let needle = normalize(query);
    if needle.is_empty() {
        return Vec::new();
    }

    let mut scored: Vec<ScoredCandidate<'_>> = docs
        .iter()
        .map(|doc| ScoredCandidate {
            doc,
            score: score_document(doc, &needle),
        })
        .filter(|candidate| candidate.score >= 0)
        .collect();

    scored.sort_by(|a, b| b.score.cmp(&a.score));
    scored.truncate(limit);
    scored.into_iter().map(|candidate| candidate.doc).collect()
}

/// First-occurrence score: title hit at char position `ti` scores
/// `TITLE_BASE - ti`, else body hit at `bi` scores `BODY_BASE -
/// min(bi, BODY_POSITION_CUTOFF)`, else `NO_MATCH`. A title hit past
/// position `TITLE_BASE` goes negative and is excluded by the caller.
fn score_document(doc: &Document, needle: &str) -> i64 {
    if let Some(ti) = char_position(doc.title_lower(), needle) {
        return TITLE_BASE - ti as i64;
    }
    if let Some(bi) = char_position(doc.body_lower(), needle) {
        return BODY_BASE - bi.min(BODY_POSITION_CUTOFF) as i64;
    }
    NO_MATCH
}

/// Char index of the first occurrence of `needle` in `haystack`.
fn char_position(haystack: &str, needle: &str) -> Option<usize> {
    haystack
        .find(needle)
        .map(|byte_idx| haystack[..byte_idx].chars().count())
}
