// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! In-memory inverted index.

use std::collections::HashMap;

use super::{DocId, InvertedIndex, PostingList};
use crate::error::StorageError;
use crate::generator::Term;

/// Term → posting list, fully materialized.
#[derive(Debug, Clone, Default)]
pub struct MemoryIndex {
    postings: HashMap<Term, Vec<DocId>>,
}

impl MemoryIndex {
    /// Wrap posting lists, checking that each one is strictly ascending.
    pub fn from_postings(postings: HashMap<Term, Vec<DocId>>) -> Result<Self, StorageError> {
        for (term, ids) in &postings {
            if let Some(position) = ids.windows(2).position(|pair| pair[0] >= pair[1]) {
                return Err(StorageError::corrupt(format!(
                    "posting list for '{}' not strictly ascending at position {}",
                    term,
                    position + 1
                )));
            }
        }
        Ok(Self { postings })
    }

    /// Caller guarantees every list is strictly ascending (the builder does).
    pub(crate) fn from_sorted(postings: HashMap<Term, Vec<DocId>>) -> Self {
        debug_assert!(postings
            .values()
            .all(|ids| ids.windows(2).all(|pair| pair[0] < pair[1])));
        Self { postings }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[DocId])> {
        self.postings
            .iter()
            .map(|(term, ids)| (term.as_str(), ids.as_slice()))
    }
}

impl InvertedIndex for MemoryIndex {
    fn has(&self, term: &str) -> bool {
        self.postings.contains_key(term)
    }

    fn get(&self, term: &str) -> Result<Option<PostingList<'_>>, StorageError> {
        Ok(self
            .postings
            .get(term)
            .map(|ids| PostingList::Slice(ids.as_slice())))
    }

    fn num_terms(&self) -> usize {
        self.postings.len()
    }

    fn visit(&self, visitor: &mut dyn FnMut(&str, PostingList<'_>)) {
        for (term, ids) in &self.postings {
            visitor(term, PostingList::Slice(ids));
        }
    }
}
