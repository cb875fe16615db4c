// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! MergeSkip: heap merge that skips instead of stepping.
//!
//! The heap holds `(current doc_id, cursor index)` for every live cursor.
//! Pop everything equal to the minimum. If that group reaches the threshold,
//! emit it and step each popped cursor once. If it doesn't, pop until `t - 1`
//! cursors are out; the new heap minimum `p` is then the smallest doc that
//! could still reach `t`, because anything below it lives in at most the
//! `t - 1` popped lists. Jump every popped cursor straight to `p`.
//!
//! The jump is a binary search per cursor, which is where the win comes from
//! when one n-gram (like "$ni") has a huge list and the rest are short.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use super::{Collector, MergeCandidate};
use crate::error::Result;
use crate::index::{Cursor, DocId};

pub(super) fn merge_skip(
    cursors: &mut [Cursor<'_>],
    threshold: usize,
    collector: &mut dyn Collector,
) -> Result<()> {
    let mut heap: BinaryHeap<Reverse<(DocId, usize)>> = cursors
        .iter()
        .enumerate()
        .filter_map(|(i, cursor)| Some(Reverse((cursor.current().ok()?, i))))
        .collect();
    let mut popped: Vec<usize> = Vec::with_capacity(cursors.len());

    while let Some(&Reverse((pivot, _))) = heap.peek() {
        popped.clear();
        while let Some(&Reverse((id, i))) = heap.peek() {
            if id != pivot {
                break;
            }
            heap.pop();
            popped.push(i);
        }

        let hits = popped.len();
        if hits >= threshold {
            let flow = collector.collect(MergeCandidate {
                doc_id: pivot,
                overlap: hits,
            })?;
            if flow.is_break() {
                return Ok(());
            }
            for &i in &popped {
                if let Ok(next) = cursors[i].advance() {
                    heap.push(Reverse((next, i)));
                }
            }
            continue;
        }

        // Pivot fell short: take out t - 1 cursors in total
        for _ in hits..threshold - 1 {
            match heap.pop() {
                Some(Reverse((_, i))) => popped.push(i),
                None => break,
            }
        }

        // Fewer than t lists left with anything in them
        let Some(&Reverse((target, _))) = heap.peek() else {
            break;
        };

        for &i in &popped {
            if let Ok(next) = cursors[i].lower_bound(target) {
                heap.push(Reverse((next, i)));
            }
        }
    }

    Ok(())
}
