//! Prefix completion on the car fixture.

use crate::common::{build_cars_index, ids};
use ngram_suggest::ranking::uniform;
use ngram_suggest::DocId;

#[test]
fn completes_a_started_word() {
    let index = build_cars_index();
    let results = index.autocomplete("Nissan M", 10, &uniform).unwrap();
    assert_eq!(ids(&results), vec![0, 2, 3]);
}

#[test]
fn finished_word_matches_every_entry_starting_with_it() {
    let index = build_cars_index();
    let results = index.autocomplete("Toyota ", 10, &uniform).unwrap();
    assert_eq!(ids(&results), vec![5, 6, 7]);
}

#[test]
fn prefix_is_case_insensitive() {
    let index = build_cars_index();
    assert_eq!(
        index.autocomplete("TOYOTA CORO", 10, &uniform).unwrap(),
        index.autocomplete("toyota coro", 10, &uniform).unwrap()
    );
}

#[test]
fn popularity_orders_the_completions() {
    let index = build_cars_index();
    let popularity = [3.0, 10.0, 7.0, 1.0, 7.0];
    let scorer = |id: DocId| popularity.get(id as usize).copied().unwrap_or(0.0);

    let results = index.autocomplete("Nissan", 3, &scorer).unwrap();
    // 2 and 4 tie on popularity, lower id first
    assert_eq!(ids(&results), vec![1, 2, 4]);
    assert_eq!(results[0].score, 10.0);
}

#[test]
fn unknown_prefix_finds_nothing() {
    let index = build_cars_index();
    assert!(index.autocomplete("Lada", 10, &uniform).unwrap().is_empty());
    assert_eq!(index.searcher().pool().outstanding(), 0);
}

#[test]
fn zero_limit_is_empty() {
    let index = build_cars_index();
    let results = index.autocomplete("Nissan", 0, &uniform).unwrap();
    assert!(results.is_empty());
}
