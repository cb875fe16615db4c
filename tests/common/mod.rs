//! Shared test utilities and fixtures.

#![allow(dead_code, unused_imports)]

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Path, PathBuf};

use ngram_suggest::merge::VecCollector;
use ngram_suggest::metric::Overlap;
use ngram_suggest::{
    Candidate, Cursor, DocId, ListMerger, MergeAlgorithm, MetricKind, SearchIndex,
};

// Re-export canonical fixtures from ngram_suggest::testing
pub use ngram_suggest::testing::{
    build_cars_index, build_index_of, cars_config, config_with_ngram, CARS,
};

// ============================================================================
// RESULT HELPERS
// ============================================================================

pub fn ids(results: &[Candidate]) -> Vec<DocId> {
    results.iter().map(|c| c.doc_id).collect()
}

/// Results must be ranked: descending score, ties by ascending doc id.
pub fn assert_ranked(results: &[Candidate]) {
    for pair in results.windows(2) {
        let (a, b) = (&pair[0], &pair[1]);
        assert!(
            a.score > b.score || (a.score == b.score && a.doc_id < b.doc_id),
            "out of order: {:?} before {:?}",
            a,
            b
        );
    }
}

// ============================================================================
// MERGE ORACLE
// ============================================================================

/// Run one merge algorithm over owned lists, returning `(doc_id, overlap)` by id.
pub fn run_merge(
    algorithm: MergeAlgorithm,
    lists: &[Vec<DocId>],
    threshold: usize,
) -> Vec<(DocId, usize)> {
    let mut cursors: Vec<Cursor<'_>> = lists.iter().map(|l| Cursor::new(l)).collect();
    let mut collector = VecCollector::new();
    algorithm
        .merge(&mut cursors, threshold, &mut collector)
        .expect("in-memory merge cannot fail");
    let mut found: Vec<(DocId, usize)> = collector
        .into_candidates()
        .into_iter()
        .map(|c| (c.doc_id, c.overlap))
        .collect();
    found.sort_unstable();
    found
}

/// Count occurrences across lists and keep the docs seen at least `threshold` times.
pub fn oracle_merge(lists: &[Vec<DocId>], threshold: usize) -> Vec<(DocId, usize)> {
    let threshold = threshold.max(1);
    if threshold > lists.len() {
        return Vec::new();
    }
    let mut counts: BTreeMap<DocId, usize> = BTreeMap::new();
    for list in lists {
        for &id in list {
            *counts.entry(id).or_default() += 1;
        }
    }
    counts
        .into_iter()
        .filter(|&(_, c)| c >= threshold)
        .collect()
}

// ============================================================================
// SUGGEST ORACLE
// ============================================================================

/// Score every entry against the query without using the index.
///
/// Only entries sharing at least one term qualify, which is what any
/// n-gram index can find. Returns the ids scoring at least `similarity`.
pub fn brute_force_suggest(
    index: &SearchIndex,
    query: &str,
    metric: MetricKind,
    similarity: f64,
) -> BTreeSet<DocId> {
    let cleaner = index.config().cleaner();
    let prepared = cleaner.wrap(query);
    let query_terms: BTreeSet<String> = index.terms(query).into_iter().collect();
    if query_terms.is_empty() {
        return BTreeSet::new();
    }
    let ngram_size = index.config().ngram_size();

    let mut found = BTreeSet::new();
    for doc_id in 0..index.len() as DocId {
        let entry = index.entry(doc_id).expect("dense ids");
        let entry_terms: BTreeSet<String> = index.terms(entry).into_iter().collect();
        let shared = query_terms.intersection(&entry_terms).count();
        if shared == 0 {
            continue;
        }
        let prepared_entry = cleaner.wrap(entry);
        let score = metric.metric().score(&Overlap {
            shared,
            query_terms: query_terms.len(),
            candidate_terms: entry_terms.len(),
            query: &prepared,
            candidate: &prepared_entry,
            ngram_size,
        });
        if score + 1e-9 >= similarity {
            found.insert(doc_id);
        }
    }
    found
}

// ============================================================================
// FILES
// ============================================================================

/// Write `entries` as a newline-delimited dictionary file.
pub fn write_dictionary(dir: &Path, name: &str, entries: &[&str]) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, entries.join("\n")).expect("write dictionary");
    path
}

/// JSON description of a trigram index over `source`, written to `output`.
pub fn description_json(name: &str, source: &str, output: &str) -> String {
    format!(
        r#"{{
            "name": "{}",
            "ngramSize": 3,
            "source": "{}",
            "output": "{}",
            "alphabet": ["english", "russian", "numbers", "$"],
            "pad": "$",
            "wrap": ["$", "$"]
        }}"#,
        name, source, output
    )
}
