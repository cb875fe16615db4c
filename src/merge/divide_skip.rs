// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! DivideSkip: MergeSkip on the short lists, binary search on the long ones.
//!
//! A doc that reaches `t` must appear in at least one list outside the `t - 1`
//! longest. So the short lists are merged with threshold 1 and every doc they
//! produce is looked up in the long lists. Since MergeSkip emits in ascending
//! order, the long-list cursors only ever move forward.

use std::cmp::Reverse;
use std::ops::ControlFlow;

use super::skip::merge_skip;
use super::{verify, Collector, MergeCandidate};
use crate::error::Result;
use crate::index::Cursor;

struct Verifying<'v, 'c, 'a> {
    long: &'v mut [Cursor<'a>],
    threshold: usize,
    inner: &'c mut dyn Collector,
}

impl Collector for Verifying<'_, '_, '_> {
    fn collect(&mut self, candidate: MergeCandidate) -> Result<ControlFlow<()>> {
        let MergeCandidate { doc_id, overlap } = candidate;
        match verify(self.long, doc_id, overlap, self.threshold) {
            Some(overlap) => self.inner.collect(MergeCandidate { doc_id, overlap }),
            None => Ok(ControlFlow::Continue(())),
        }
    }
}

pub(super) fn divide_skip(
    cursors: &mut [Cursor<'_>],
    threshold: usize,
    collector: &mut dyn Collector,
) -> Result<()> {
    cursors.sort_by_key(|cursor| Reverse(cursor.remaining_len()));
    let (long, short) = cursors.split_at_mut(threshold - 1);

    let mut verifying = Verifying {
        long,
        threshold,
        inner: collector,
    };
    merge_skip(short, 1, &mut verifying)
}
