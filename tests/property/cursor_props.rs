//! Cursor positioning against a linear scan.

use std::collections::BTreeSet;

use ngram_suggest::index::lower_bound_search;
use ngram_suggest::{Cursor, DocId};
use proptest::prelude::*;

fn oracle_lower_bound(list: &[DocId], from: usize, value: DocId) -> Option<usize> {
    (from..list.len()).find(|&i| list[i] >= value)
}

fn sorted_list() -> impl Strategy<Value = Vec<DocId>> {
    prop::collection::btree_set(0u32..500, 0..60)
        .prop_map(|set: BTreeSet<DocId>| set.into_iter().collect())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(1000))]

    #[test]
    fn lower_bound_matches_linear_scan(
        list in sorted_list(),
        from in 0usize..70,
        value in 0u32..520,
    ) {
        prop_assert_eq!(
            lower_bound_search(&list, from, value),
            oracle_lower_bound(&list, from, value)
        );
    }

    /// Repeated lower_bound calls land on the first id at or above the
    /// largest target so far, and never move backwards.
    #[test]
    fn cursor_is_monotone(
        list in sorted_list(),
        targets in prop::collection::vec(0u32..520, 1..12),
    ) {
        let mut cursor = Cursor::new(&list);
        let mut floor = 0;
        let mut consumed = 0;
        for target in targets {
            floor = floor.max(target);
            let expected = list.iter().copied().find(|&id| id >= floor);
            prop_assert_eq!(cursor.lower_bound(target).ok(), expected);
            prop_assert!(list.len() - cursor.remaining_len() >= consumed);
            consumed = list.len() - cursor.remaining_len();
        }
    }
}
