// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! N-gram profile distances.
//!
//! # References
//!
//! - Ukkonen (1992): "Approximate string-matching with q-grams and maximal
//!   matches", Theoretical Computer Science 92(1).

use std::collections::{HashMap, HashSet};

use crate::generator::split_into_ngrams;

/// Frequency of every k-gram in `word`.
fn profile(word: &str, k: usize) -> HashMap<String, usize> {
    let mut counts = HashMap::new();
    for gram in split_into_ngrams(word, k) {
        *counts.entry(gram).or_insert(0) += 1;
    }
    counts
}

/// Sum over the union of both profiles of `|freq_a - freq_b|`.
///
/// O(len(a) + len(b)).
pub fn ngram_distance(a: &str, b: &str, k: usize) -> usize {
    let profile_a = profile(a, k);
    let profile_b = profile(b, k);

    let only_b: usize = profile_b
        .iter()
        .filter(|(gram, _)| !profile_a.contains_key(*gram))
        .map(|(_, &freq)| freq)
        .sum();

    profile_a
        .iter()
        .map(|(gram, &freq_a)| freq_a.abs_diff(profile_b.get(gram).copied().unwrap_or(0)))
        .sum::<usize>()
        + only_b
}

/// `1 - |A ∩ B| / |A ∪ B|` over k-gram sets.
///
/// Identical strings are at distance 0 without building anything. Two
/// different strings with no k-grams at all share nothing, so they are at 1.
pub fn jaccard_distance(a: &str, b: &str, k: usize) -> f64 {
    if a == b {
        return 0.0;
    }

    let set_a: HashSet<String> = split_into_ngrams(a, k).into_iter().collect();
    let set_b: HashSet<String> = split_into_ngrams(b, k).into_iter().collect();
    let union = set_a.union(&set_b).count();
    if union == 0 {
        return 1.0;
    }
    let inter = set_a.intersection(&set_b).count();

    1.0 - inter as f64 / union as f64
}
