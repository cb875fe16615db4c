// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The three merge algorithms must agree on arbitrary posting lists.

#![no_main]

use std::collections::BTreeSet;

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use ngram_suggest::merge::VecCollector;
use ngram_suggest::{Cursor, DocId, ListMerger, MergeAlgorithm};

#[derive(Debug, Arbitrary)]
struct MergeInput {
    lists: Vec<Vec<u16>>,
    threshold: u8,
}

fn run(algorithm: MergeAlgorithm, lists: &[Vec<DocId>], threshold: usize) -> Vec<(DocId, usize)> {
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

fuzz_target!(|input: MergeInput| {
    // Posting lists are sorted and duplicate-free
    let lists: Vec<Vec<DocId>> = input
        .lists
        .into_iter()
        .take(16)
        .map(|list| {
            let set: BTreeSet<DocId> = list.into_iter().map(DocId::from).collect();
            set.into_iter().collect()
        })
        .collect();
    let threshold = usize::from(input.threshold % 18);

    let baseline = run(MergeAlgorithm::MergeSkip, &lists, threshold);
    for algorithm in [MergeAlgorithm::DivideSkip, MergeAlgorithm::CpMerge] {
        assert_eq!(run(algorithm, &lists, threshold), baseline, "{}", algorithm);
    }
});
