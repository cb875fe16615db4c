// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Result ranking: how candidates get sorted and cut.
//!
//! Both query modes end the same way: a score per candidate, highest first,
//! and a hard limit. Equal scores are common (every autocomplete hit under a
//! uniform scorer ties) so the doc id breaks ties, ascending. Dictionary
//! order is usually meaningful to whoever built it, and it makes results
//! reproducible across runs and merge algorithms.

use std::cmp::Ordering;

use crate::index::DocId;

/// One ranked result.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate {
    pub doc_id: DocId,
    pub score: f64,
}

/// External relevance for autocomplete hits. Higher ranks first.
///
/// Any `Fn(DocId) -> f64` is a scorer, so popularity tables and the like
/// plug in as closures.
pub trait Scorer {
    fn score(&self, doc_id: DocId) -> f64;
}

impl<F> Scorer for F
where
    F: Fn(DocId) -> f64,
{
    fn score(&self, doc_id: DocId) -> f64 {
        self(doc_id)
    }
}

/// Scores every document the same, leaving dictionary order.
pub fn uniform(_: DocId) -> f64 {
    0.0
}

/// Compare two candidates for ranking.
///
/// Sort order:
/// 1. **Score** - descending, NaN last
/// 2. **Doc ID** - ascending tiebreaker for determinism
pub fn compare_candidates(a: &Candidate, b: &Candidate) -> Ordering {
    match (a.score.is_nan(), b.score.is_nan()) {
        (false, true) => return Ordering::Less,
        (true, false) => return Ordering::Greater,
        _ => {}
    }
    match b.score.partial_cmp(&a.score) {
        Some(ord) if ord != Ordering::Equal => ord,
        _ => a.doc_id.cmp(&b.doc_id),
    }
}

/// Sort `candidates` into rank order and keep the first `limit`.
pub fn rank(candidates: &mut Vec<Candidate>, limit: usize) {
    candidates.sort_by(compare_candidates);
    candidates.truncate(limit);
}
