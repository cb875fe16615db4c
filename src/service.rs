// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Named indexes behind an atomic swap.
//!
//! A process usually serves several dictionaries (cars, cities, brands) and
//! rebuilds them now and then. Each name maps to an `Arc<SearchIndex>`.
//! A query clones the `Arc` under a read lock and releases the lock before
//! doing any work, so it runs against one index from start to finish even if
//! a reindex replaces that name halfway through. The write lock is held only
//! for the `HashMap` insert.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{info, warn};

use crate::build::build_index;
use crate::config::{IndexDescription, SearchConfig};
use crate::dictionary::InMemoryDictionary;
use crate::error::{Error, Result, StorageError};
use crate::ranking::{Candidate, Scorer};
use crate::suggest::SearchIndex;

/// Outcome of reindexing one description.
#[derive(Debug)]
pub struct ReindexReport {
    pub name: String,
    pub result: Result<usize>,
}

/// Process-wide table of named indexes.
#[derive(Debug, Default)]
pub struct SuggestService {
    indexes: RwLock<HashMap<String, Arc<SearchIndex>>>,
}

impl SuggestService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Publish `index` under `name`, replacing whatever was there.
    ///
    /// Returns the previous index. Queries already holding it finish on it.
    pub fn insert(&self, name: impl Into<String>, index: SearchIndex) -> Option<Arc<SearchIndex>> {
        let name = name.into();
        let entries = index.len();
        let previous = self.indexes.write().insert(name.clone(), Arc::new(index));
        info!(name = %name, entries, replaced = previous.is_some(), "published index");
        previous
    }

    pub fn remove(&self, name: &str) -> Option<Arc<SearchIndex>> {
        self.indexes.write().remove(name)
    }

    /// Snapshot of the current index for `name`.
    pub fn get(&self, name: &str) -> Result<Arc<SearchIndex>> {
        self.indexes
            .read()
            .get(name)
            .cloned()
            .ok_or_else(|| Error::UnknownDictionary(name.to_string()))
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.indexes.read().keys().cloned().collect();
        names.sort();
        names
    }

    pub fn suggest(&self, name: &str, search: &SearchConfig) -> Result<Vec<Candidate>> {
        self.get(name)?.suggest(search)
    }

    pub fn autocomplete(
        &self,
        name: &str,
        prefix: &str,
        limit: usize,
        scorer: &dyn Scorer,
    ) -> Result<Vec<Candidate>> {
        self.get(name)?.autocomplete(prefix, limit, scorer)
    }

    /// Build every description and swap each one in as soon as it is ready.
    ///
    /// A failure leaves that name serving its old index (if any) and does not
    /// stop the rest. Each report carries the new entry count or the error.
    pub fn reindex(&self, descriptions: &[IndexDescription]) -> Vec<ReindexReport> {
        descriptions
            .iter()
            .map(|description| {
                let result = load_description(description).map(|index| {
                    let entries = index.len();
                    self.insert(description.name.clone(), index);
                    entries
                });
                if let Err(err) = &result {
                    warn!(name = %description.name, error = %err, "reindex failed");
                }
                ReindexReport {
                    name: description.name.clone(),
                    result,
                }
            })
            .collect()
    }
}

/// Build the index a description points at from its dictionary source.
pub fn load_description(description: &IndexDescription) -> Result<SearchIndex> {
    let config = description.config()?;
    let dictionary =
        InMemoryDictionary::from_file(&description.source).map_err(StorageError::from)?;
    Ok(build_index(&config, dictionary)?)
}
