//! Test utilities shared across unit and integration tests.
//!
//! This module is always compiled but hidden from documentation.
//! It provides the canonical fixture so every test agrees on doc ids.

#![doc(hidden)]

use crate::build::build_index;
use crate::config::IndexConfig;
use crate::dictionary::InMemoryDictionary;
use crate::suggest::SearchIndex;
use crate::util::Alphabet;

/// Eight car models. Doc ids are positions: 0–4 Nissan, 5–7 Toyota.
pub const CARS: [&str; 8] = [
    "Nissan March",
    "Nissan Juke",
    "Nissan Maxima",
    "Nissan Murano",
    "Nissan Note",
    "Toyota Mark II",
    "Toyota Corolla",
    "Toyota Corona",
];

/// Trigrams over english, russian and digits, `$` as pad and both wrap markers.
pub fn cars_config() -> IndexConfig {
    config_with_ngram(3)
}

pub fn config_with_ngram(ngram_size: usize) -> IndexConfig {
    IndexConfig::new(
        ngram_size,
        Alphabet::from_names(["english", "russian", "numbers", "$"]),
        ("$", "$"),
        "$",
    )
    .expect("fixture config is valid")
}

pub fn cars_dictionary() -> InMemoryDictionary {
    CARS.iter().copied().collect()
}

/// `CARS` built in memory with `cars_config`.
pub fn build_cars_index() -> SearchIndex {
    build_index(&cars_config(), cars_dictionary()).expect("fixture builds")
}

/// Any dictionary built in memory with `cars_config`.
pub fn build_index_of<S: AsRef<str>>(entries: &[S]) -> SearchIndex {
    let dictionary: InMemoryDictionary = entries.iter().map(|s| s.as_ref()).collect();
    build_index(&cars_config(), dictionary).expect("fixture builds")
}
