// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The public query surface: `suggest` and `autocomplete`.
//!
//! A `SearchIndex` bundles everything one dictionary needs at query time:
//! the config that prepares strings, the inverted index, the dictionary
//! itself and each entry's term count. It is immutable, `Send + Sync`, and
//! meant to sit behind an `Arc` shared by every query thread.
//!
//! # Suggest
//!
//! ```text
//! "Nissan ma"
//!    │ wrap + generate
//!    ▼
//! [$ni, nis, iss, ssa, san, an$, n$m, $ma, ma$]
//!    │ metric: candidate term counts + minimum overlap
//!    ▼
//! Searcher (missing-term check, cursors, merge)
//!    │ per candidate: exact threshold for its term count, then score
//!    ▼
//! rank by score, ties by doc id, cut to top_k
//! ```
//!
//! The merge runs with the smallest threshold any admissible candidate could
//! need. Candidates with more terms need more overlap, so each one is
//! rechecked against the threshold for its own term count before scoring.
//!
//! # Autocomplete
//!
//! The prefix is wrapped on the left only and every one of its terms must
//! be present. Ranking comes from an external `Scorer`.

use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use tracing::debug;

use crate::config::{IndexConfig, SearchConfig};
use crate::dictionary::Dictionary;
use crate::error::{Error, Result, StorageError};
use crate::generator::{Term, TermGenerator};
use crate::index::{DocId, InvertedIndex};
use crate::merge::{Collector, ListMerger};
use crate::metric::{Overlap, QueryProfile};
use crate::ranking::{rank, Candidate, Scorer};
use crate::search::Searcher;
use crate::util::Cleaner;

const SCORE_EPSILON: f64 = 1e-9;

/// One dictionary, ready to query.
pub struct SearchIndex {
    config: IndexConfig,
    cleaner: Cleaner,
    generator: TermGenerator,
    inverted: Arc<dyn InvertedIndex>,
    dictionary: Arc<dyn Dictionary>,
    term_counts: Vec<u32>,
    max_term_count: usize,
    searcher: Searcher,
}

impl fmt::Debug for SearchIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SearchIndex")
            .field("ngram_size", &self.config.ngram_size())
            .field("entries", &self.term_counts.len())
            .field("terms", &self.inverted.num_terms())
            .field("searcher", &self.searcher)
            .finish()
    }
}

impl SearchIndex {
    /// Assemble an index. `term_counts[i]` is the number of distinct terms
    /// entry `i` was indexed under.
    pub fn new(
        config: IndexConfig,
        inverted: Arc<dyn InvertedIndex>,
        dictionary: Arc<dyn Dictionary>,
        term_counts: Vec<u32>,
    ) -> Result<Self, StorageError> {
        if term_counts.len() != dictionary.len() {
            return Err(StorageError::corrupt(format!(
                "{} term counts for {} dictionary entries",
                term_counts.len(),
                dictionary.len()
            )));
        }

        let max_term_count = term_counts.iter().copied().max().unwrap_or(0) as usize;
        Ok(Self {
            cleaner: config.cleaner(),
            generator: TermGenerator::new(config.ngram_size()),
            config,
            inverted,
            dictionary,
            term_counts,
            max_term_count,
            searcher: Searcher::default(),
        })
    }

    /// Swap the merge algorithm. Results are identical; speed may not be.
    pub fn with_merger(mut self, merger: impl ListMerger + 'static) -> Self {
        self.searcher = Searcher::new(merger);
        self
    }

    pub fn config(&self) -> &IndexConfig {
        &self.config
    }

    pub fn inverted(&self) -> &dyn InvertedIndex {
        &*self.inverted
    }

    pub fn dictionary(&self) -> &dyn Dictionary {
        &*self.dictionary
    }

    pub fn searcher(&self) -> &Searcher {
        &self.searcher
    }

    pub fn term_counts(&self) -> &[u32] {
        &self.term_counts
    }

    pub fn term_count(&self, doc_id: DocId) -> Option<usize> {
        self.term_counts.get(doc_id as usize).map(|&n| n as usize)
    }

    /// Original dictionary string for a result.
    pub fn entry(&self, doc_id: DocId) -> Option<&str> {
        self.dictionary.get(doc_id)
    }

    pub fn len(&self) -> usize {
        self.term_counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.term_counts.is_empty()
    }

    /// Terms a dictionary entry or fuzzy query is indexed under.
    pub fn terms(&self, text: &str) -> Vec<Term> {
        self.generator.generate(&self.cleaner.wrap(text))
    }

    /// Terms an autocomplete prefix must contain.
    pub fn prefix_terms(&self, prefix: &str) -> Vec<Term> {
        self.generator.generate(&self.cleaner.left_wrap(prefix))
    }

    /// Raw threshold search with a caller-supplied collector.
    pub fn search_with(
        &self,
        terms: &[Term],
        threshold: usize,
        collector: &mut dyn Collector,
    ) -> Result<()> {
        self.searcher
            .search_with(&*self.inverted, terms, threshold, collector)
    }

    /// Entries most similar to the query under the configured metric.
    ///
    /// Results are sorted by descending score, ties by ascending doc id, and
    /// never score below the requested similarity.
    pub fn suggest(&self, search: &SearchConfig) -> Result<Vec<Candidate>> {
        let prepared = self.cleaner.wrap(search.query());
        let terms = self.generator.generate(&prepared);
        if terms.is_empty() || search.top_k() == 0 {
            return Ok(Vec::new());
        }

        let alpha = search.similarity();
        let metric = search.metric().metric();
        let query = QueryProfile {
            terms: terms.len(),
            chars: prepared.chars().count(),
            ngram_size: self.config.ngram_size(),
        };

        let range = metric.candidate_range(&query, alpha);
        let (low, high) = (*range.start(), (*range.end()).min(self.max_term_count));
        let threshold = (low..=high)
            .map(|b| metric.threshold(&query, b, alpha))
            .min();
        let Some(threshold) = threshold else {
            debug!(query = search.query(), low, high, "nothing admissible");
            return Ok(Vec::new());
        };

        check_deadline(search.deadline())?;
        let found = self.searcher.search(&*self.inverted, &terms, threshold)?;

        let mut results = Vec::new();
        for candidate in &found {
            let Some(b) = self.term_count(candidate.doc_id) else {
                continue;
            };
            if b < low || b > high || candidate.overlap < metric.threshold(&query, b, alpha) {
                continue;
            }
            let Some(entry) = self.dictionary.get(candidate.doc_id) else {
                continue;
            };

            let prepared_entry = self.cleaner.wrap(entry);
            let score = metric.score(&Overlap {
                shared: candidate.overlap,
                query_terms: terms.len(),
                candidate_terms: b,
                query: &prepared,
                candidate: &prepared_entry,
                ngram_size: self.config.ngram_size(),
            });
            if score + SCORE_EPSILON >= alpha {
                results.push(Candidate {
                    doc_id: candidate.doc_id,
                    score,
                });
            }
        }

        debug!(
            query = search.query(),
            metric = %search.metric(),
            terms = terms.len(),
            threshold,
            merged = found.len(),
            kept = results.len(),
            "suggest"
        );

        rank(&mut results, search.top_k());
        Ok(results)
    }

    /// Entries containing every term of `prefix`, ranked by `scorer`.
    pub fn autocomplete(
        &self,
        prefix: &str,
        limit: usize,
        scorer: &dyn Scorer,
    ) -> Result<Vec<Candidate>> {
        let terms = self.prefix_terms(prefix);
        if terms.is_empty() || limit == 0 {
            return Ok(Vec::new());
        }

        let found = self.searcher.search(&*self.inverted, &terms, terms.len())?;
        let mut results: Vec<Candidate> = found
            .iter()
            .map(|candidate| Candidate {
                doc_id: candidate.doc_id,
                score: scorer.score(candidate.doc_id),
            })
            .collect();

        debug!(
            prefix,
            terms = terms.len(),
            merged = results.len(),
            "autocomplete"
        );

        rank(&mut results, limit);
        Ok(results)
    }
}

fn check_deadline(deadline: Option<Instant>) -> Result<()> {
    match deadline {
        Some(deadline) if Instant::now() > deadline => Err(Error::DeadlineExceeded),
        _ => Ok(()),
    }
}
