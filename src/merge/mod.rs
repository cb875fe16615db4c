// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Threshold merges: which documents appear in at least `t` of `n` lists?
//!
//! This is the T-occurrence problem from approximate string matching. A
//! query's n-grams each have a posting list, and a document is a candidate
//! when enough of those lists contain it. Intersecting all of them is too
//! strict (one typo kills the match) and unioning them is too loose (every
//! document sharing "$ni" shows up), so we count.
//!
//! Three algorithms, one contract:
//!
//! - **MergeSkip**: heap over cursor heads, binary-search skips when a pivot
//!   falls short of the threshold
//! - **DivideSkip**: set the `t - 1` longest lists aside, MergeSkip the rest
//!   with threshold 1, verify each hit against the long lists
//! - **CPMerge**: count over the `n - t + 1` shortest lists, verify against
//!   the `t - 1` longest ones by binary search
//!
//! All three emit the same `(doc_id, overlap)` pairs in the same strictly
//! ascending order. Which one is fastest depends on list length skew; the
//! choice is never observable in results.
//!
//! # References
//!
//! - Li, Lu & Lu (2008): "Efficient Merging and Filtering Algorithms for
//!   Approximate String Searches", ICDE. (MergeSkip, DivideSkip)
//! - Okazaki & Tsujii (2010): "Simple and Efficient Algorithm for Approximate
//!   Dictionary Matching", COLING. (CPMerge)
//!
//! # INVARIANTS (DO NOT VIOLATE)
//!
//! 1. **ASCENDING_EMISSION**: candidates reach the collector in strictly
//!    ascending doc_id order, each at most once
//! 2. **EXACT_OVERLAP**: `overlap` is the number of lists containing the doc,
//!    never an estimate
//! 3. **EARLY_STOP**: `ControlFlow::Break` ends the merge with `Ok(())`

mod cp_merge;
mod divide_skip;
mod skip;

use std::fmt;
use std::ops::ControlFlow;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};
use crate::index::{Cursor, DocId};

/// A document that met the threshold, with how many lists contained it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MergeCandidate {
    pub doc_id: DocId,
    pub overlap: usize,
}

/// Receives merge output.
///
/// Return `ControlFlow::Break(())` to stop the merge early. That is a normal
/// outcome, not an error. An `Err` aborts the merge and is passed through.
pub trait Collector {
    fn collect(&mut self, candidate: MergeCandidate) -> Result<ControlFlow<()>>;
}

/// Keeps every candidate.
#[derive(Debug, Clone, Default)]
pub struct VecCollector {
    candidates: Vec<MergeCandidate>,
}

impl VecCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn candidates(&self) -> &[MergeCandidate] {
        &self.candidates
    }

    pub fn into_candidates(self) -> Vec<MergeCandidate> {
        self.candidates
    }
}

impl Collector for VecCollector {
    fn collect(&mut self, candidate: MergeCandidate) -> Result<ControlFlow<()>> {
        self.candidates.push(candidate);
        Ok(ControlFlow::Continue(()))
    }
}

/// Keeps the first `limit` candidates, then stops the merge.
#[derive(Debug, Clone)]
pub struct FirstKCollector {
    limit: usize,
    candidates: Vec<MergeCandidate>,
}

impl FirstKCollector {
    pub fn new(limit: usize) -> Self {
        Self {
            limit,
            candidates: Vec::with_capacity(limit.min(1024)),
        }
    }

    pub fn into_candidates(self) -> Vec<MergeCandidate> {
        self.candidates
    }
}

impl Collector for FirstKCollector {
    fn collect(&mut self, candidate: MergeCandidate) -> Result<ControlFlow<()>> {
        if self.candidates.len() < self.limit {
            self.candidates.push(candidate);
        }
        if self.candidates.len() >= self.limit {
            Ok(ControlFlow::Break(()))
        } else {
            Ok(ControlFlow::Continue(()))
        }
    }
}

/// Threshold merge over a set of cursors.
pub trait ListMerger: Send + Sync + fmt::Debug {
    /// Emit every doc present in at least `threshold` lists.
    ///
    /// Cursors are consumed. A threshold above the number of cursors
    /// yields nothing.
    fn merge(
        &self,
        cursors: &mut [Cursor<'_>],
        threshold: usize,
        collector: &mut dyn Collector,
    ) -> Result<()>;
}

/// The built-in merge algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MergeAlgorithm {
    #[default]
    MergeSkip,
    DivideSkip,
    CpMerge,
}

impl MergeAlgorithm {
    pub const ALL: [MergeAlgorithm; 3] = [
        MergeAlgorithm::MergeSkip,
        MergeAlgorithm::DivideSkip,
        MergeAlgorithm::CpMerge,
    ];

    pub fn name(self) -> &'static str {
        match self {
            MergeAlgorithm::MergeSkip => "merge-skip",
            MergeAlgorithm::DivideSkip => "divide-skip",
            MergeAlgorithm::CpMerge => "cp-merge",
        }
    }
}

impl fmt::Display for MergeAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for MergeAlgorithm {
    type Err = ConfigError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        MergeAlgorithm::ALL
            .into_iter()
            .find(|algorithm| algorithm.name() == s)
            .ok_or_else(|| ConfigError::UnknownMerger(s.to_string()))
    }
}

impl ListMerger for MergeAlgorithm {
    fn merge(
        &self,
        cursors: &mut [Cursor<'_>],
        threshold: usize,
        collector: &mut dyn Collector,
    ) -> Result<()> {
        let threshold = threshold.max(1);
        if threshold > cursors.len() {
            return Ok(());
        }

        match self {
            MergeAlgorithm::MergeSkip => skip::merge_skip(cursors, threshold, collector),
            MergeAlgorithm::DivideSkip => divide_skip::divide_skip(cursors, threshold, collector),
            MergeAlgorithm::CpMerge => cp_merge::cp_merge(cursors, threshold, collector),
        }
    }
}

/// Advance `long` cursors to `doc_id` and count hits on top of `count`.
///
/// Returns `None` as soon as the remaining cursors can no longer lift the
/// count to `threshold`. Candidates must arrive in ascending order: each
/// cursor only ever moves forward.
pub(crate) fn verify(
    long: &mut [Cursor<'_>],
    doc_id: DocId,
    mut count: usize,
    threshold: usize,
) -> Option<usize> {
    let total = long.len();
    for (checked, cursor) in long.iter_mut().enumerate() {
        if count + (total - checked) < threshold {
            return None;
        }
        if cursor.lower_bound(doc_id) == Ok(doc_id) {
            count += 1;
        }
    }
    (count >= threshold).then_some(count)
}
