// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Cursor pool with scoped checkout.
//!
//! Decoding a posting list needs a buffer, and allocating one per term per
//! query adds up. The pool keeps emptied buffers around for the next query.
//!
//! Checkout is scoped: `CursorPool::checkout` hands out a `CursorSet`, and
//! dropping the set returns every buffer. That covers the normal path, early
//! `?` returns and collector termination alike, because they all go through
//! `Drop`.

use std::sync::atomic::{AtomicUsize, Ordering};

use parking_lot::Mutex;

use super::{Cursor, DocId, PostingList};
use crate::error::StorageError;

/// Idle buffers kept by default.
const DEFAULT_MAX_IDLE: usize = 64;

/// Reusable decode buffers shared by all queries against one index.
#[derive(Debug)]
pub struct CursorPool {
    idle: Mutex<Vec<Vec<DocId>>>,
    max_idle: usize,
    outstanding: AtomicUsize,
}

impl Default for CursorPool {
    fn default() -> Self {
        Self::new()
    }
}

impl CursorPool {
    pub fn new() -> Self {
        Self::with_max_idle(DEFAULT_MAX_IDLE)
    }

    pub fn with_max_idle(max_idle: usize) -> Self {
        Self {
            idle: Mutex::new(Vec::new()),
            max_idle,
            outstanding: AtomicUsize::new(0),
        }
    }

    /// Start a scoped cursor set. Everything bound into it is released on drop.
    pub fn checkout<'a>(&self) -> CursorSet<'_, 'a> {
        CursorSet {
            pool: self,
            cursors: Vec::new(),
        }
    }

    /// Cursors currently bound and not yet released.
    pub fn outstanding(&self) -> usize {
        self.outstanding.load(Ordering::Acquire)
    }

    /// Buffers waiting for reuse.
    pub fn idle(&self) -> usize {
        self.idle.lock().len()
    }

    fn take_buffer(&self) -> Vec<DocId> {
        self.idle.lock().pop().unwrap_or_default()
    }

    fn give_back(&self, mut buffer: Vec<DocId>) {
        buffer.clear();
        let mut idle = self.idle.lock();
        if idle.len() < self.max_idle {
            idle.push(buffer);
        }
    }
}

/// Cursors checked out for one merge.
#[derive(Debug)]
pub struct CursorSet<'p, 'a> {
    pool: &'p CursorPool,
    cursors: Vec<Cursor<'a>>,
}

impl<'p, 'a> CursorSet<'p, 'a> {
    /// Bind a cursor to `list` and add it to the set.
    ///
    /// Slices are borrowed as-is. Encoded lists are decoded into a pooled
    /// buffer; if decoding fails the buffer goes straight back and nothing
    /// is added.
    pub fn bind(&mut self, list: PostingList<'a>) -> Result<(), StorageError> {
        let cursor = match list {
            PostingList::Slice(ids) => Cursor::new(ids),
            encoded @ PostingList::Encoded { .. } => {
                let mut buffer = self.pool.take_buffer();
                if let Err(err) = encoded.decode_into(&mut buffer) {
                    self.pool.give_back(buffer);
                    return Err(err);
                }
                Cursor::owned(buffer)
            }
        };

        self.pool.outstanding.fetch_add(1, Ordering::AcqRel);
        self.cursors.push(cursor);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.cursors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cursors.is_empty()
    }

    pub fn cursors_mut(&mut self) -> &mut [Cursor<'a>] {
        &mut self.cursors
    }
}

impl Drop for CursorSet<'_, '_> {
    fn drop(&mut self) {
        let released = self.cursors.len();
        for cursor in self.cursors.drain(..) {
            if let Some(buffer) = cursor.into_buffer() {
                self.pool.give_back(buffer);
            }
        }
        self.pool.outstanding.fetch_sub(released, Ordering::AcqRel);
    }
}
