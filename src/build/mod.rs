// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Index construction: dictionary in, `SearchIndex` out.
//!
//! Two passes. First every entry is cleaned, wrapped and split into terms;
//! entries are independent, so with the `parallel` feature this runs on
//! rayon. Then the term lists are folded into posting lists in doc id order,
//! which is what keeps every list strictly ascending without a sort.

mod parallel;

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use tracing::info;

use crate::binary::MAX_DOC_COUNT;
use crate::config::IndexConfig;
use crate::dictionary::Dictionary;
use crate::error::StorageError;
use crate::generator::{Term, TermGenerator};
use crate::index::{DocId, MemoryIndex};
use crate::suggest::SearchIndex;

use parallel::generate_all;

/// Build an in-memory index over `dictionary`.
pub fn build_index<D>(config: &IndexConfig, dictionary: D) -> Result<SearchIndex, StorageError>
where
    D: Dictionary + 'static,
{
    let started = Instant::now();
    let doc_count = dictionary.len();
    if doc_count > MAX_DOC_COUNT as usize {
        return Err(StorageError::corrupt(format!(
            "dictionary of {} entries exceeds limit {}",
            doc_count, MAX_DOC_COUNT
        )));
    }

    let cleaner = config.cleaner();
    let generator = TermGenerator::new(config.ngram_size());
    let terms_of = |entry: &str| generator.generate(&cleaner.wrap(entry));
    let per_doc = generate_all(&dictionary, terms_of);

    let mut postings: HashMap<Term, Vec<DocId>> = HashMap::new();
    let mut term_counts = Vec::with_capacity(doc_count);
    for (doc_id, terms) in per_doc.into_iter().enumerate() {
        term_counts.push(terms.len() as u32);
        for term in terms {
            postings.entry(term).or_default().push(doc_id as DocId);
        }
    }

    info!(
        entries = doc_count,
        terms = postings.len(),
        ngram_size = config.ngram_size(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "built index"
    );

    SearchIndex::new(
        config.clone(),
        Arc::new(MemoryIndex::from_sorted(postings)),
        Arc::new(dictionary),
        term_counts,
    )
}
