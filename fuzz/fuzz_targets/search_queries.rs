// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Arbitrary query text against the car fixture.
//!
//! Emoji, combining marks, control characters and very long input must all
//! come back as a ranked, bounded result list.

#![no_main]

use std::sync::OnceLock;

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use ngram_suggest::ranking::uniform;
use ngram_suggest::testing::build_cars_index;
use ngram_suggest::{MetricKind, SearchConfig, SearchIndex};

#[derive(Debug, Arbitrary)]
struct QueryInput {
    query: String,
    top_k: u8,
    metric: u8,
    /// Similarity in hundredths, mapped into (0, 1]
    similarity: u8,
}

fuzz_target!(|input: QueryInput| {
    static INDEX: OnceLock<SearchIndex> = OnceLock::new();
    let index = INDEX.get_or_init(build_cars_index);

    let query: String = input.query.chars().take(200).collect();
    let metric = MetricKind::ALL[usize::from(input.metric) % MetricKind::ALL.len()];
    let similarity = f64::from(input.similarity % 100 + 1) / 100.0;
    let top_k = usize::from(input.top_k % 16);

    let search =
        SearchConfig::new(query.as_str(), top_k, metric, similarity).expect("valid similarity");
    let results = index.suggest(&search).expect("search cannot fail");

    assert!(results.len() <= top_k);
    for pair in results.windows(2) {
        assert!(pair[0].score >= pair[1].score, "unranked: {:?}", pair);
    }
    for result in &results {
        assert!(result.score + 1e-9 >= similarity);
        assert!(result.score <= 1.0 + 1e-9);
    }

    let completions = index
        .autocomplete(&query, top_k, &uniform)
        .expect("search cannot fail");
    assert!(completions.len() <= top_k);
    assert_eq!(index.searcher().pool().outstanding(), 0);
});
