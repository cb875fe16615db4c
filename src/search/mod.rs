// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! From query terms to merge candidates.
//!
//! The searcher sits between the orchestrator and the merge. It knows about
//! the index (which terms exist, how to get their lists) and about cursors
//! (where to get them, when to give them back). It knows nothing about
//! similarity: a threshold comes in, candidates go out.
//!
//! Before touching a single posting list it counts the query terms the index
//! has never seen. A document can only match terms that exist, so with
//! `missing` terms absent at most `n - missing` lists can contain it. Once
//! that drops below the threshold there is nothing to find.

use std::fmt;
use std::sync::Arc;

use tracing::debug;

use crate::error::Result;
use crate::generator::Term;
use crate::index::{CursorPool, InvertedIndex};
use crate::merge::{Collector, ListMerger, MergeAlgorithm, MergeCandidate, VecCollector};

/// Runs threshold merges against an index.
pub struct Searcher {
    merger: Arc<dyn ListMerger>,
    pool: CursorPool,
}

impl fmt::Debug for Searcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Searcher")
            .field("merger", &self.merger)
            .field("outstanding", &self.pool.outstanding())
            .finish()
    }
}

impl Default for Searcher {
    fn default() -> Self {
        Self::new(MergeAlgorithm::default())
    }
}

impl Searcher {
    pub fn new(merger: impl ListMerger + 'static) -> Self {
        Self::with_merger(Arc::new(merger))
    }

    pub fn with_merger(merger: Arc<dyn ListMerger>) -> Self {
        Self {
            merger,
            pool: CursorPool::new(),
        }
    }

    pub fn merger(&self) -> &dyn ListMerger {
        &*self.merger
    }

    pub fn pool(&self) -> &CursorPool {
        &self.pool
    }

    /// Every document containing at least `threshold` of `terms`.
    ///
    /// `terms` must be distinct; `TermGenerator` output always is.
    pub fn search(
        &self,
        index: &dyn InvertedIndex,
        terms: &[Term],
        threshold: usize,
    ) -> Result<Vec<MergeCandidate>> {
        let mut collector = VecCollector::new();
        self.search_with(index, terms, threshold, &mut collector)?;
        Ok(collector.into_candidates())
    }

    /// Like `search`, but candidates go to `collector` as the merge finds them.
    pub fn search_with(
        &self,
        index: &dyn InvertedIndex,
        terms: &[Term],
        threshold: usize,
        collector: &mut dyn Collector,
    ) -> Result<()> {
        let threshold = threshold.max(1);
        if threshold > terms.len() {
            debug!(
                terms = terms.len(),
                threshold, "threshold exceeds query terms"
            );
            return Ok(());
        }

        // n - t + 1 absent terms leave fewer than t lists
        let allowed_skips = terms.len() - threshold + 1;
        let missing = terms.iter().filter(|term| !index.has(term)).count();
        if missing >= allowed_skips {
            debug!(
                terms = terms.len(),
                missing, threshold, "too many terms missing from index"
            );
            return Ok(());
        }

        let mut cursors = self.pool.checkout();
        for term in terms {
            match index.get(term)? {
                Some(list) if !list.is_empty() => cursors.bind(list)?,
                _ => {}
            }
        }

        debug!(
            terms = terms.len(),
            lists = cursors.len(),
            threshold,
            merger = ?self.merger,
            "merging"
        );
        self.merger
            .merge(cursors.cursors_mut(), threshold, collector)
    }
}
