// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! N-gram term generation.
//!
//! A term is a window of `k` code points. Terms are deduplicated in order of
//! first occurrence, so the same word always yields the same sequence and
//! a document's term count is the size of its term *set*.
//!
//! ```text
//! generate("$nissan$", 3) = ["$ni", "nis", "iss", "ssa", "san", "an$"]
//! ```
//!
//! A word shorter than `k` produces no terms at all. Callers must read that
//! as "cannot search", never as "matches everything".

use std::collections::HashSet;

/// An n-gram extracted from a prepared string.
pub type Term = String;

/// Splits prepared strings into deduplicated n-gram terms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TermGenerator {
    ngram_size: usize,
}

impl TermGenerator {
    pub fn new(ngram_size: usize) -> Self {
        Self { ngram_size }
    }

    pub fn ngram_size(&self) -> usize {
        self.ngram_size
    }

    pub fn generate(&self, word: &str) -> Vec<Term> {
        generate(word, self.ngram_size)
    }
}

/// Deduplicated, order-preserving n-grams of `word`.
pub fn generate(word: &str, k: usize) -> Vec<Term> {
    let grams = split_into_ngrams(word, k);
    let mut seen = HashSet::with_capacity(grams.len());
    grams
        .into_iter()
        .filter(|gram| seen.insert(gram.clone()))
        .collect()
}

/// Every n-gram of `word`, repeats included.
pub fn split_into_ngrams(word: &str, k: usize) -> Vec<Term> {
    if k == 0 {
        return Vec::new();
    }
    let chars: Vec<char> = word.chars().collect();
    chars
        .windows(k)
        .map(|window| window.iter().collect())
        .collect()
}
