// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Postings list encoding/decoding.
//!
//! Delta encoding is the obvious optimization since posting lists are sorted.
//! If documents 100, 102, 105, 110 all contain "iss", we store
//! [100, 2, 3, 5] instead of [100, 102, 105, 110]. Small deltas make small varints.
//!
//! # References
//!
//! - **Delta Encoding for Postings**: Zobel & Moffat (2006): "Inverted Files
//!   for Text Search Engines", ACM Computing Surveys.

use super::encoding::{decode_varint, encode_varint};
use super::header::MAX_POSTING_SIZE;
use crate::error::StorageError;
use crate::index::DocId;

/// Encode a strictly ascending posting list.
///
/// Format:
/// - doc_freq: varint
/// - For each doc_id: delta from the previous one (first from 0), varint
pub fn encode_postings(ids: &[DocId], buf: &mut Vec<u8>) {
    encode_varint(ids.len() as u64, buf);

    let mut prev = 0u32;
    for &id in ids {
        debug_assert!(id >= prev, "posting list must be ascending");
        encode_varint(u64::from(id - prev), buf);
        prev = id;
    }
}

/// Decode a posting list into `out`, returning bytes consumed.
///
/// Rejects lists that are not strictly ascending, overflow `u32`, or claim
/// more entries than the buffer could possibly hold.
pub fn decode_postings_into(bytes: &[u8], out: &mut Vec<DocId>) -> Result<usize, StorageError> {
    let (doc_freq, mut pos) = decode_varint(bytes)?;
    let doc_freq = doc_freq as usize;

    // Every entry takes at least one byte
    let remaining = bytes.len() - pos;
    if doc_freq > MAX_POSTING_SIZE || doc_freq > remaining {
        return Err(StorageError::corrupt(format!(
            "posting list too large: {} entries, {} bytes left",
            doc_freq, remaining
        )));
    }

    out.reserve(doc_freq);
    let mut prev: u64 = 0;

    for i in 0..doc_freq {
        let (delta, consumed) = decode_varint(&bytes[pos..])?;
        pos += consumed;

        if i > 0 && delta == 0 {
            return Err(StorageError::corrupt(format!(
                "duplicate doc_id {} in posting list",
                prev
            )));
        }

        let id = prev + delta;
        if id > u64::from(DocId::MAX) {
            return Err(StorageError::corrupt("doc_id overflows u32"));
        }
        out.push(id as DocId);
        prev = id;
    }

    Ok(pos)
}
