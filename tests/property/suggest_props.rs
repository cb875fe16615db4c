//! Index-backed search against brute force over the whole dictionary.

use std::collections::BTreeSet;

use crate::common::{brute_force_suggest, config_with_ngram};
use ngram_suggest::ranking::uniform;
use ngram_suggest::{
    build_index, DocId, InMemoryDictionary, MergeAlgorithm, MetricKind, SearchConfig, SearchIndex,
};
use proptest::prelude::*;

fn entries_strategy() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(
        prop::string::string_regex("[a-f]{2,6}( [a-f]{2,5})?").unwrap(),
        1..30,
    )
}

/// Either a dictionary entry with one character replaced, or fresh text.
fn query_for(entries: &[String], pick: usize, fresh: &str) -> String {
    if pick % 3 == 0 {
        return fresh.to_string();
    }
    let entry = &entries[pick % entries.len()];
    let mut chars: Vec<char> = entry.chars().collect();
    let at = pick % chars.len();
    chars[at] = if chars[at] == 'a' { 'b' } else { 'a' };
    chars.into_iter().collect()
}

fn build(entries: &[String], ngram_size: usize) -> SearchIndex {
    let dictionary: InMemoryDictionary = entries.iter().cloned().collect();
    build_index(&config_with_ngram(ngram_size), dictionary).unwrap()
}

fn suggest_ids(index: &SearchIndex, search: &SearchConfig) -> BTreeSet<DocId> {
    index
        .suggest(search)
        .unwrap()
        .into_iter()
        .map(|c| c.doc_id)
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Pruning by candidate size, overlap threshold and missing lists never
    /// drops an entry that brute force would accept.
    #[test]
    fn suggest_has_no_false_negatives(
        entries in entries_strategy(),
        pick in 0usize..1000,
        fresh in prop::string::string_regex("[a-f ]{1,8}").unwrap(),
        ngram_size in 2usize..5,
        metric in prop::sample::select(MetricKind::ALL.to_vec()),
        similarity in 0.2f64..1.0,
    ) {
        let index = build(&entries, ngram_size);
        let query = query_for(&entries, pick, &fresh);
        let search = SearchConfig::new(query.as_str(), entries.len(), metric, similarity).unwrap();

        let expected = brute_force_suggest(&index, &query, metric, similarity);
        prop_assert_eq!(
            suggest_ids(&index, &search), expected,
            "{} at {:.3} for {:?}", metric, similarity, query
        );
    }

    /// The merge algorithm is a performance choice only.
    #[test]
    fn mergers_agree_on_suggest(
        entries in entries_strategy(),
        pick in 0usize..1000,
        metric in prop::sample::select(MetricKind::ALL.to_vec()),
        similarity in 0.2f64..1.0,
    ) {
        let query = query_for(&entries, pick, "abc");
        let search = SearchConfig::new(query, 10, metric, similarity).unwrap();

        let baseline = build(&entries, 3).suggest(&search).unwrap();
        for algorithm in MergeAlgorithm::ALL {
            let index = build(&entries, 3).with_merger(algorithm);
            prop_assert_eq!(&index.suggest(&search).unwrap(), &baseline, "{}", algorithm);
        }
    }

    /// Results are ranked, within top_k, and at or above the similarity floor.
    #[test]
    fn suggest_output_shape(
        entries in entries_strategy(),
        pick in 0usize..1000,
        top_k in 0usize..6,
        similarity in 0.2f64..1.0,
    ) {
        let index = build(&entries, 3);
        let query = query_for(&entries, pick, "fab");
        let search = SearchConfig::new(query, top_k, MetricKind::Jaccard, similarity).unwrap();

        let results = index.suggest(&search).unwrap();
        prop_assert!(results.len() <= top_k);
        for candidate in &results {
            prop_assert!(candidate.score + 1e-9 >= similarity);
            prop_assert!(candidate.score <= 1.0);
        }
        crate::common::assert_ranked(&results);
        prop_assert_eq!(index.searcher().pool().outstanding(), 0);
    }

    /// Autocomplete returns exactly the entries holding every prefix term.
    #[test]
    fn autocomplete_matches_term_containment(
        entries in entries_strategy(),
        pick in 0usize..1000,
        cut in 1usize..6,
    ) {
        let index = build(&entries, 3);
        let entry = &entries[pick % entries.len()];
        let prefix: String = entry.chars().take(cut).collect();

        let wanted: BTreeSet<String> = index.prefix_terms(&prefix).into_iter().collect();
        let expected: BTreeSet<DocId> = if wanted.is_empty() {
            BTreeSet::new()
        } else {
            (0..entries.len() as DocId)
                .filter(|&id| {
                    let terms: BTreeSet<String> =
                        index.terms(index.entry(id).unwrap()).into_iter().collect();
                    wanted.is_subset(&terms)
                })
                .collect()
        };

        let found: BTreeSet<DocId> = index
            .autocomplete(&prefix, entries.len(), &uniform)
            .unwrap()
            .into_iter()
            .map(|c| c.doc_id)
            .collect();
        prop_assert_eq!(found, expected);
    }
}
