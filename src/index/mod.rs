// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The inverted index contract: terms to posting lists, and cursors over them.
//!
//! Two providers implement it:
//! - **MemoryIndex**: posting lists held as `Vec<DocId>`, built in-process
//! - **BinaryIndex** (in `crate::binary`): posting lists left encoded in a
//!   byte buffer and decoded only when a cursor is bound
//!
//! The query path never cares which one it talks to. It asks `has` to count
//! missing terms, then `get` for a `PostingList` handle, then binds a cursor
//! from the `CursorPool`.
//!
//! # INVARIANTS (DO NOT VIOLATE)
//!
//! 1. **POSTING_LIST_SORTED**: every posting list is strictly ascending
//! 2. **IMMUTABLE**: a built index never changes; reindexing builds a new one

mod cursor;
mod memory;
mod pool;

pub use cursor::{lower_bound_search, Cursor};
pub use memory::MemoryIndex;
pub use pool::{CursorPool, CursorSet};

use crate::binary::postings::decode_postings_into;
use crate::error::StorageError;

/// Dense, zero-based position of an entry in the dictionary.
pub type DocId = u32;

/// Handle to one term's posting list, borrowed from the index that owns it.
#[derive(Debug, Clone, Copy)]
pub enum PostingList<'a> {
    /// Already-decoded document ids.
    Slice(&'a [DocId]),
    /// Delta+varint bytes, starting at the doc_freq prefix.
    Encoded { len: usize, bytes: &'a [u8] },
}

impl<'a> PostingList<'a> {
    pub fn len(&self) -> usize {
        match self {
            PostingList::Slice(ids) => ids.len(),
            PostingList::Encoded { len, .. } => *len,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Materialize the list into `buf`, validating order on the way.
    pub fn decode_into(&self, buf: &mut Vec<DocId>) -> Result<(), StorageError> {
        buf.clear();
        match self {
            PostingList::Slice(ids) => buf.extend_from_slice(ids),
            PostingList::Encoded { len, bytes } => {
                decode_postings_into(bytes, buf)?;
                if buf.len() != *len {
                    return Err(StorageError::corrupt(format!(
                        "posting list declares {} entries but holds {}",
                        len,
                        buf.len()
                    )));
                }
            }
        }
        Ok(())
    }
}

/// Read-only term → posting list mapping.
///
/// Implementations must be safe to query from many threads at once without
/// locking: the index is shared by every in-flight query.
pub trait InvertedIndex: Send + Sync {
    /// Was `term` ever indexed? Must not materialize anything.
    fn has(&self, term: &str) -> bool;

    /// The posting list for `term`, or `None` if it was never indexed.
    fn get(&self, term: &str) -> Result<Option<PostingList<'_>>, StorageError>;

    /// Number of distinct terms.
    fn num_terms(&self) -> usize;

    /// Call `visitor` once per term, in no particular order.
    fn visit(&self, visitor: &mut dyn FnMut(&str, PostingList<'_>));
}
