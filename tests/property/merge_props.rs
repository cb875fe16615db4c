//! The three merge algorithms against a counting oracle.

use std::collections::BTreeSet;
use std::ops::ControlFlow;

use crate::common::{oracle_merge, run_merge};
use ngram_suggest::merge::{FirstKCollector, MergeCandidate};
use ngram_suggest::{Collector, Cursor, DocId, ListMerger, MergeAlgorithm};
use proptest::prelude::*;

/// Sorted, duplicate-free posting lists over a small id space so lists overlap.
fn lists_strategy() -> impl Strategy<Value = Vec<Vec<DocId>>> {
    prop::collection::vec(
        prop::collection::btree_set(0u32..64, 0..24)
            .prop_map(|set: BTreeSet<DocId>| set.into_iter().collect()),
        0..8,
    )
}

/// Records emission order so monotonicity can be checked.
struct Recorder(Vec<MergeCandidate>);

impl Collector for Recorder {
    fn collect(&mut self, candidate: MergeCandidate) -> ngram_suggest::Result<ControlFlow<()>> {
        self.0.push(candidate);
        Ok(ControlFlow::Continue(()))
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// Every algorithm emits exactly the oracle's docs with exact overlaps.
    #[test]
    fn algorithms_match_oracle(lists in lists_strategy(), threshold in 0usize..10) {
        let expected = oracle_merge(&lists, threshold);
        for algorithm in MergeAlgorithm::ALL {
            let found = run_merge(algorithm, &lists, threshold);
            prop_assert_eq!(
                &found, &expected,
                "{} disagrees at threshold {}", algorithm, threshold
            );
        }
    }

    /// A threshold above the list count can never be met.
    #[test]
    fn threshold_above_list_count_is_empty(lists in lists_strategy(), extra in 1usize..4) {
        let threshold = lists.len() + extra;
        for algorithm in MergeAlgorithm::ALL {
            prop_assert!(run_merge(algorithm, &lists, threshold).is_empty());
        }
    }

    /// Candidates reach the collector once each, in ascending doc order.
    #[test]
    fn emission_is_ascending_and_unique(lists in lists_strategy(), threshold in 1usize..5) {
        for algorithm in MergeAlgorithm::ALL {
            let mut cursors: Vec<Cursor<'_>> = lists.iter().map(|l| Cursor::new(l)).collect();
            let mut recorder = Recorder(Vec::new());
            algorithm.merge(&mut cursors, threshold, &mut recorder).unwrap();
            for pair in recorder.0.windows(2) {
                prop_assert!(
                    pair[0].doc_id < pair[1].doc_id,
                    "{} emitted {} then {}", algorithm, pair[0].doc_id, pair[1].doc_id
                );
            }
        }
    }

    /// Stopping early yields a prefix of the full result.
    #[test]
    fn early_stop_is_a_prefix(
        lists in lists_strategy(),
        threshold in 1usize..4,
        limit in 1usize..6,
    ) {
        let expected = oracle_merge(&lists, threshold);
        for algorithm in MergeAlgorithm::ALL {
            let mut cursors: Vec<Cursor<'_>> = lists.iter().map(|l| Cursor::new(l)).collect();
            let mut collector = FirstKCollector::new(limit);
            algorithm.merge(&mut cursors, threshold, &mut collector).unwrap();
            let found: Vec<(DocId, usize)> = collector
                .into_candidates()
                .into_iter()
                .map(|c| (c.doc_id, c.overlap))
                .collect();
            let want = &expected[..expected.len().min(limit)];
            prop_assert_eq!(found.as_slice(), want, "{} early stop", algorithm);
        }
    }
}
