// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! CPMerge: count the short lists, verify against the long ones.
//!
//! Sort lists by length. With `n` lists and threshold `t`, a doc in `t` lists
//! must show up in at least one of the `n - t + 1` shortest (pigeonhole: the
//! other `t - 1` can't hold all `t` hits). Scan those exhaustively into a
//! count table, then binary-search the `t - 1` longest lists for each
//! surviving candidate. Candidates that can't reach `t` even if every
//! remaining long list hits are dropped without further searching.

use std::collections::BTreeMap;

use super::{verify, Collector, MergeCandidate};
use crate::error::Result;
use crate::index::{Cursor, DocId};

pub(super) fn cp_merge(
    cursors: &mut [Cursor<'_>],
    threshold: usize,
    collector: &mut dyn Collector,
) -> Result<()> {
    cursors.sort_by_key(|cursor| cursor.remaining_len());
    let short_count = cursors.len() - threshold + 1;
    let (short, long) = cursors.split_at_mut(short_count);

    let mut counts: BTreeMap<DocId, usize> = BTreeMap::new();
    for cursor in short.iter_mut() {
        let mut next = cursor.current();
        while let Ok(id) = next {
            *counts.entry(id).or_insert(0) += 1;
            next = cursor.advance();
        }
    }

    for (doc_id, count) in counts {
        if let Some(overlap) = verify(long, doc_id, count, threshold) {
            let flow = collector.collect(MergeCandidate { doc_id, overlap })?;
            if flow.is_break() {
                break;
            }
        }
    }

    Ok(())
}
