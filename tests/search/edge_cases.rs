//! Inputs at the edges: empty, unknown characters, deadlines, raw searches.

use std::time::{Duration, Instant};

use crate::common::{build_cars_index, build_index_of, ids};
use ngram_suggest::merge::FirstKCollector;
use ngram_suggest::ranking::uniform;
use ngram_suggest::{ConfigError, Error, MetricKind, SearchConfig};

#[test]
fn similarity_outside_unit_interval_is_rejected() {
    for bad in [0.0, -0.5, 1.5, f64::NAN] {
        assert!(matches!(
            SearchConfig::new("x", 5, MetricKind::Jaccard, bad),
            Err(ConfigError::Similarity(_))
        ));
    }
    assert!(SearchConfig::new("x", 5, MetricKind::Jaccard, 1.0).is_ok());
}

#[test]
fn characters_outside_the_alphabet_act_as_separators() {
    let index = build_cars_index();
    let plain = SearchConfig::new("nissan maxima", 3, MetricKind::Jaccard, 0.5).unwrap();
    let noisy = plain.clone().with_query("Nissan!!  --Maxima??");
    assert_eq!(
        index.suggest(&plain).unwrap(),
        index.suggest(&noisy).unwrap()
    );
}

#[test]
fn query_of_only_unknown_characters_is_empty() {
    let index = build_cars_index();
    let search = SearchConfig::new("!!!", 5, MetricKind::Dice, 0.1).unwrap();
    assert!(index.suggest(&search).unwrap().is_empty());
}

#[test]
fn future_deadline_lets_the_search_run() {
    let index = build_cars_index();
    let search = SearchConfig::new("Nissan ma", 2, MetricKind::Jaccard, 0.5)
        .unwrap()
        .with_deadline(Instant::now() + Duration::from_secs(60));
    assert_eq!(ids(&index.suggest(&search).unwrap()), vec![2, 0]);
}

#[test]
fn passed_deadline_is_an_error() {
    let index = build_cars_index();
    let search = SearchConfig::new("Nissan ma", 2, MetricKind::Jaccard, 0.5)
        .unwrap()
        .with_deadline(Instant::now() - Duration::from_millis(1));
    assert!(matches!(
        index.suggest(&search),
        Err(Error::DeadlineExceeded)
    ));
}

#[test]
fn raw_search_with_an_early_stop() {
    let index = build_cars_index();
    let terms = index.terms("Nissan");
    let mut collector = FirstKCollector::new(2);
    index
        .search_with(&terms, terms.len(), &mut collector)
        .unwrap();
    let found: Vec<u32> = collector
        .into_candidates()
        .iter()
        .map(|c| c.doc_id)
        .collect();
    assert_eq!(found, vec![0, 1]);
    assert_eq!(index.searcher().pool().outstanding(), 0);
}

#[test]
fn repeated_grams_count_once() {
    // "$aaaa$" has terms $aa, aaa, aa$
    let index = build_index_of(&["aaaa", "aaaaaaaa"]);
    assert_eq!(index.term_count(0), Some(3));
    assert_eq!(index.term_count(1), Some(3));

    let search = SearchConfig::new("aaaaa", 5, MetricKind::Jaccard, 1.0).unwrap();
    assert_eq!(ids(&index.suggest(&search).unwrap()), vec![0, 1]);
}

#[test]
fn empty_dictionary_answers_nothing() {
    let index = build_index_of::<&str>(&[]);
    assert!(index.is_empty());
    let search = SearchConfig::new("Nissan", 5, MetricKind::Cosine, 0.5).unwrap();
    assert!(index.suggest(&search).unwrap().is_empty());
    let results = index.autocomplete("Nissan", 5, &uniform).unwrap();
    assert!(results.is_empty());
}
