// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Posting list cursors and the lower-bound search they share with the mergers.
//!
//! A cursor is a position in one posting list. It starts on the first element,
//! only moves forward, and reports `NotDereferencable` once it runs off the
//! end. Cursors are single-threaded and single-use: one per query term, for
//! exactly one merge.

use super::DocId;
use crate::error::NotDereferencable;

/// Smallest `j >= from` with `list[j] >= value`, or `None`.
///
/// This is the primitive that every skip in the mergers is built on, so its
/// boundaries are pinned down exactly:
///
/// | Case                           | Result         |
/// |--------------------------------|----------------|
/// | `from >= list.len()`           | `None`         |
/// | `value <= list[from]`          | `Some(from)`   |
/// | `value > list[last]`           | `None`         |
/// | `list[j] == value`, `j >= from`| `Some(j)`      |
///
/// Binary search over `list[from..]`, O(log(len - from)).
#[inline]
pub fn lower_bound_search(list: &[DocId], from: usize, value: DocId) -> Option<usize> {
    let rest = list.get(from..)?;
    let offset = rest.partition_point(|&id| id < value);
    (offset < rest.len()).then_some(from + offset)
}

#[derive(Debug)]
enum Ids<'a> {
    Borrowed(&'a [DocId]),
    Owned(Vec<DocId>),
}

/// Forward-only position in a posting list.
#[derive(Debug)]
pub struct Cursor<'a> {
    ids: Ids<'a>,
    pos: usize,
}

impl<'a> Cursor<'a> {
    /// Cursor over a list borrowed from an in-memory index.
    pub fn new(ids: &'a [DocId]) -> Self {
        Self {
            ids: Ids::Borrowed(ids),
            pos: 0,
        }
    }

    /// Cursor over a decoded buffer. The buffer goes back to the pool on release.
    pub fn owned(ids: Vec<DocId>) -> Self {
        Self {
            ids: Ids::Owned(ids),
            pos: 0,
        }
    }

    #[inline]
    fn ids(&self) -> &[DocId] {
        match &self.ids {
            Ids::Borrowed(ids) => ids,
            Ids::Owned(ids) => ids,
        }
    }

    /// Total list length, consumed elements included.
    pub fn len(&self) -> usize {
        self.ids().len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids().is_empty()
    }

    /// Value at the current position.
    #[inline]
    pub fn current(&self) -> Result<DocId, NotDereferencable> {
        self.ids().get(self.pos).copied().ok_or(NotDereferencable)
    }

    /// Is there an element after the current one?
    #[inline]
    pub fn has_next(&self) -> bool {
        self.pos + 1 < self.len()
    }

    /// Step forward and return the new current value.
    #[inline]
    pub fn advance(&mut self) -> Result<DocId, NotDereferencable> {
        if self.pos < self.len() {
            self.pos += 1;
        }
        self.current()
    }

    /// Elements not yet consumed, the current one included.
    #[inline]
    pub fn remaining_len(&self) -> usize {
        self.len() - self.pos
    }

    pub fn is_exhausted(&self) -> bool {
        self.pos >= self.len()
    }

    /// Jump to the first remaining value `>= target`.
    ///
    /// Leaves the cursor exhausted and fails if there is none. Never moves
    /// backwards: a target at or below the current value is a no-op.
    #[inline]
    pub fn lower_bound(&mut self, target: DocId) -> Result<DocId, NotDereferencable> {
        match lower_bound_search(self.ids(), self.pos, target) {
            Some(j) => {
                self.pos = j;
                self.current()
            }
            None => {
                self.pos = self.len();
                Err(NotDereferencable)
            }
        }
    }

    /// Hand back the decode buffer, if this cursor owns one.
    pub(crate) fn into_buffer(self) -> Option<Vec<DocId>> {
        match self.ids {
            Ids::Borrowed(_) => None,
            Ids::Owned(ids) => Some(ids),
        }
    }
}
