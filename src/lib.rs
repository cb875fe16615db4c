// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Typo-tolerant autocomplete over a closed vocabulary.
//!
//! Give it a dictionary (product names, cities, brands) and it answers two
//! kinds of questions:
//!
//! - **suggest**: which entries look most like this possibly misspelled
//!   query, ranked by a similarity metric
//! - **autocomplete**: which entries contain everything typed so far,
//!   ranked by an external score
//!
//! Both run on the same machinery. Strings are cleaned, wrapped and split into
//! n-grams; an inverted index maps each n-gram to the entries containing it;
//! a threshold merge finds entries sharing enough n-grams with the query.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌──────────────┐     ┌──────────────┐
//! │ util        │────▶│ generator    │────▶│ build        │
//! │ (Cleaner,   │     │ (n-gram      │     │ (MemoryIndex │
//! │  Alphabet)  │     │  terms)      │     │  + counts)   │
//! └─────────────┘     └──────────────┘     └──────────────┘
//!                                                 │
//!        ┌────────────────────────────────────────┤
//!        ▼                                        ▼
//! ┌──────────────┐     ┌──────────────┐     ┌──────────────┐
//! │ binary       │────▶│ index        │────▶│ search       │
//! │ (NGIX codec, │     │ (cursors,    │     │ (Searcher)   │
//! │  BinaryIndex)│     │  CursorPool) │     │              │
//! └──────────────┘     └──────────────┘     └──────────────┘
//!                                                 │
//!        ┌────────────────────────────────────────┤
//!        ▼                                        ▼
//! ┌──────────────┐     ┌──────────────┐     ┌──────────────┐
//! │ merge        │     │ metric       │────▶│ suggest      │
//! │ (MergeSkip,  │     │ (thresholds, │     │ (SearchIndex)│
//! │  DivideSkip, │     │  scores)     │     │              │
//! │  CPMerge)    │     │              │     │              │
//! └──────────────┘     └──────────────┘     └──────────────┘
//!                                                 │
//!                                                 ▼
//!                                          ┌──────────────┐
//!                                          │ service      │
//!                                          │ (named,      │
//!                                          │  swappable)  │
//!                                          └──────────────┘
//! ```
//!
//! # Usage
//!
//! ```ignore
//! use ngram_suggest::{build_index, IndexConfig, SearchConfig, MetricKind};
//! use ngram_suggest::util::Alphabet;
//! use ngram_suggest::dictionary::InMemoryDictionary;
//!
//! let config = IndexConfig::new(3, Alphabet::from_names(["english", "$"]), ("$", "$"), "$")?;
//! let dictionary: InMemoryDictionary = ["Nissan March", "Nissan Maxima"].into_iter().collect();
//! let index = build_index(&config, dictionary)?;
//!
//! let search = SearchConfig::new("nisan maxma", 5, MetricKind::Jaccard, 0.4)?;
//! for candidate in index.suggest(&search)? {
//!     println!("{} {:.2}", index.entry(candidate.doc_id).unwrap(), candidate.score);
//! }
//! ```

pub mod binary;
pub mod build;
pub mod config;
pub mod dictionary;
pub mod error;
pub mod generator;
pub mod index;
pub mod merge;
pub mod metric;
pub mod ranking;
pub mod search;
pub mod service;
pub mod suggest;
pub mod util;

#[doc(hidden)]
pub mod testing;

// Re-exports for public API
pub use binary::{encode_index, load_index, open_index, write_index, BinaryIndex};
pub use build::build_index;
pub use config::{IndexConfig, IndexDescription, SearchConfig};
pub use dictionary::{Dictionary, InMemoryDictionary};
pub use error::{ConfigError, Error, NotDereferencable, Result, StorageError};
pub use generator::{Term, TermGenerator};
pub use index::{Cursor, CursorPool, DocId, InvertedIndex, MemoryIndex, PostingList};
pub use merge::{Collector, ListMerger, MergeAlgorithm, MergeCandidate};
pub use metric::{Metric, MetricKind};
pub use ranking::{Candidate, Scorer};
pub use search::Searcher;
pub use service::SuggestService;
pub use suggest::SearchIndex;
