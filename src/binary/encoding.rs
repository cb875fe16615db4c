// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Binary encoding primitives: varints and length-prefixed strings.
//!
//! # References
//!
//! - **Varint (LEB128)**: Little-endian base-128 variable-length integer encoding.
//!   Originally from DWARF debugging format (1992+), popularized by Protocol Buffers.
//!   See: <https://protobuf.dev/programming-guides/encoding/>

use super::header::MAX_VARINT_BYTES;
use crate::error::StorageError;

// ============================================================================
// VARINT ENCODING
// ============================================================================

/// Encode a varint to bytes
pub fn encode_varint(mut value: u64, buf: &mut Vec<u8>) {
    loop {
        let byte = (value & 0x7F) as u8;
        value >>= 7;
        if value == 0 {
            buf.push(byte);
            break;
        } else {
            buf.push(byte | 0x80);
        }
    }
}

/// Decode a varint from bytes, returning (value, bytes_consumed)
///
/// Returns an error if:
/// - Buffer is empty
/// - Varint exceeds MAX_VARINT_BYTES (malformed/malicious input)
pub fn decode_varint(bytes: &[u8]) -> Result<(u64, usize), StorageError> {
    if bytes.is_empty() {
        return Err(StorageError::corrupt("empty buffer for varint"));
    }

    let mut result: u64 = 0;
    let mut shift = 0;
    let mut i = 0;

    while i < bytes.len() && i < MAX_VARINT_BYTES {
        let byte = bytes[i];
        result |= ((byte & 0x7F) as u64) << shift;
        i += 1;
        if byte & 0x80 == 0 {
            return Ok((result, i));
        }
        shift += 7;
    }

    if i >= MAX_VARINT_BYTES {
        Err(StorageError::corrupt(
            "varint exceeds maximum length (possible corruption)",
        ))
    } else {
        Err(StorageError::corrupt("incomplete varint"))
    }
}

// ============================================================================
// CURSOR-STYLE READER
// ============================================================================

/// Sequential reader over one section. Every read is bounds-checked.
#[derive(Debug)]
pub struct SectionReader<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> SectionReader<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }

    pub fn is_at_end(&self) -> bool {
        self.pos >= self.bytes.len()
    }

    pub fn varint(&mut self) -> Result<u64, StorageError> {
        let (value, consumed) = decode_varint(&self.bytes[self.pos.min(self.bytes.len())..])?;
        self.pos += consumed;
        Ok(value)
    }

    /// A varint that must fit in `usize` and not exceed `max`.
    pub fn bounded(&mut self, max: usize, what: &str) -> Result<usize, StorageError> {
        let value = self.varint()?;
        if value > max as u64 {
            return Err(StorageError::corrupt(format!(
                "{} {} exceeds limit {}",
                what, value, max
            )));
        }
        Ok(value as usize)
    }

    /// Next `len` raw bytes.
    pub fn take(&mut self, len: usize) -> Result<&'a [u8], StorageError> {
        let end = self
            .pos
            .checked_add(len)
            .filter(|&end| end <= self.bytes.len())
            .ok_or_else(|| {
                StorageError::corrupt(format!("{} bytes requested past end of section", len))
            })?;
        let raw = &self.bytes[self.pos..end];
        self.pos = end;
        Ok(raw)
    }

    /// A varint length prefix followed by that many bytes.
    pub fn prefixed(&mut self) -> Result<&'a [u8], StorageError> {
        let remaining = self.bytes.len().saturating_sub(self.pos);
        let len = self.bounded(remaining, "length prefix")?;
        self.take(len)
    }

    pub fn str(&mut self) -> Result<&'a str, StorageError> {
        let raw = self.prefixed()?;
        std::str::from_utf8(raw).map_err(|e| StorageError::corrupt(format!("invalid UTF-8: {}", e)))
    }
}

/// Length-prefixed UTF-8 string.
pub fn encode_str(value: &str, buf: &mut Vec<u8>) {
    encode_varint(value.len() as u64, buf);
    buf.extend_from_slice(value.as_bytes());
}
