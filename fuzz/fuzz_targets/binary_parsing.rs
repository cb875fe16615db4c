// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Index file parsing under adversarial input.
//!
//! A crafted or damaged `.ngix` file must produce an error, never a panic or
//! an allocation sized by a lying header.

#![no_main]

use libfuzzer_sys::fuzz_target;
use ngram_suggest::testing::cars_config;
use ngram_suggest::{load_index, DocId, MetricKind, SearchConfig};

fuzz_target!(|data: &[u8]| {
    let Ok(index) = load_index(&cars_config(), data) else {
        return;
    };

    // Anything that loads must be internally consistent
    assert_eq!(index.term_counts().len(), index.len());
    for doc_id in 0..index.len() as DocId {
        assert!(index.entry(doc_id).is_some(), "entry {} missing", doc_id);
    }

    index.inverted().visit(&mut |term, list| {
        let mut ids = Vec::new();
        list.decode_into(&mut ids).expect("loaded lists decode");
        assert!(
            ids.windows(2).all(|w| w[0] < w[1]),
            "list for {:?} not sorted",
            term
        );
        assert!(
            ids.iter().all(|&id| (id as usize) < index.len()),
            "list for {:?} out of range",
            term
        );
    });

    // And it must answer queries
    let search =
        SearchConfig::new("nissan", 5, MetricKind::Jaccard, 0.5).expect("valid similarity");
    let _ = index.suggest(&search);
});
