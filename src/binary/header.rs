// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Binary format header and footer structures.
//!
//! The header is 28 bytes of fixed-size fields, parsed in one read before
//! anything else. It tells you where every section lives.
//!
//! The footer is 8 bytes: a CRC32 checksum over everything before it, plus a
//! magic number ("XIGN", the header magic reversed). If the footer is wrong,
//! something got corrupted or truncated. Don't trust the data.
//!
//! `SectionOffsets` is the single source of truth for the file layout. Every
//! piece of code that reads or writes sections MUST use it.

use crc32fast::Hasher as Crc32Hasher;

use crate::error::StorageError;

// ============================================================================
// CONSTANTS
// ============================================================================

/// Magic bytes: "NGIX" in ASCII (header)
pub const MAGIC: [u8; 4] = *b"NGIX";

/// Footer magic: "XIGN" (reversed, marks valid file end)
pub const FOOTER_MAGIC: [u8; 4] = *b"XIGN";

/// Current format version
pub const VERSION: u8 = 1;

// ============================================================================
// SECURITY LIMITS (prevent resource exhaustion from malicious input)
// ============================================================================

/// Maximum file size: 1 GB
pub const MAX_FILE_SIZE: usize = 1024 * 1024 * 1024;

/// Maximum number of dictionary entries
pub const MAX_DOC_COUNT: u32 = 100_000_000;

/// Maximum number of distinct terms
pub const MAX_TERM_COUNT: u32 = 100_000_000;

/// Maximum posting list size per term
pub const MAX_POSTING_SIZE: usize = MAX_DOC_COUNT as usize;

/// Maximum varint bytes (u64 needs at most 10 bytes)
pub const MAX_VARINT_BYTES: usize = 10;

// ============================================================================
// HEADER
// ============================================================================

/// Binary format header (28 bytes fixed size)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexHeader {
    pub version: u8,
    pub ngram_size: u8,
    pub doc_count: u32,
    pub term_count: u32,
    pub dictionary_len: u32,
    pub vocab_len: u32,
    pub postings_len: u32,
}

impl IndexHeader {
    // 4 (magic) + 1 (version) + 1 (ngram_size) + 2 (reserved) + 5*4 (u32s) = 28
    pub const SIZE: usize = 28;

    pub fn section_offsets(&self) -> SectionOffsets {
        SectionOffsets::from_header(self)
    }

    pub fn write(&self, buf: &mut Vec<u8>) {
        buf.extend_from_slice(&MAGIC);
        buf.push(self.version);
        buf.push(self.ngram_size);
        buf.extend_from_slice(&[0u8; 2]); // reserved
        buf.extend_from_slice(&self.doc_count.to_le_bytes());
        buf.extend_from_slice(&self.term_count.to_le_bytes());
        buf.extend_from_slice(&self.dictionary_len.to_le_bytes());
        buf.extend_from_slice(&self.vocab_len.to_le_bytes());
        buf.extend_from_slice(&self.postings_len.to_le_bytes());
    }

    pub fn read(bytes: &[u8]) -> Result<Self, StorageError> {
        let header = bytes
            .get(..Self::SIZE)
            .ok_or_else(|| StorageError::corrupt("file too short for header"))?;

        if header[..4] != MAGIC {
            return Err(StorageError::corrupt(format!(
                "invalid magic: expected NGIX, got {:?}",
                &header[..4]
            )));
        }

        let version = header[4];
        if version != VERSION {
            return Err(StorageError::UnsupportedVersion {
                found: version,
                expected: VERSION,
            });
        }

        let u32_at = |at: usize| {
            u32::from_le_bytes([
                header[at],
                header[at + 1],
                header[at + 2],
                header[at + 3],
            ])
        };

        let parsed = Self {
            version,
            ngram_size: header[5],
            // header[6..8] is reserved
            doc_count: u32_at(8),
            term_count: u32_at(12),
            dictionary_len: u32_at(16),
            vocab_len: u32_at(20),
            postings_len: u32_at(24),
        };

        if parsed.doc_count > MAX_DOC_COUNT {
            return Err(StorageError::corrupt(format!(
                "doc_count {} exceeds maximum {}",
                parsed.doc_count, MAX_DOC_COUNT
            )));
        }
        if parsed.term_count > MAX_TERM_COUNT {
            return Err(StorageError::corrupt(format!(
                "term_count {} exceeds maximum {}",
                parsed.term_count, MAX_TERM_COUNT
            )));
        }

        Ok(parsed)
    }
}

// ============================================================================
// SECTION OFFSETS
// ============================================================================

/// Section byte ranges.
///
/// Layout:
/// 1. HEADER      [28B]
/// 2. DICTIONARY  [dictionary_len] - entries and their term counts
/// 3. VOCABULARY  [vocab_len]      - sorted terms with postings offsets
/// 4. POSTINGS    [postings_len]   - delta+varint lists
/// 5. FOOTER      [8B]             - CRC32 validation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionOffsets {
    pub dictionary: (usize, usize),
    pub vocabulary: (usize, usize),
    pub postings: (usize, usize),
    pub footer: (usize, usize),
}

impl SectionOffsets {
    pub fn from_header(h: &IndexHeader) -> Self {
        let mut pos = IndexHeader::SIZE;

        let dictionary_start = pos;
        pos += h.dictionary_len as usize;
        let dictionary_end = pos;

        let vocab_start = pos;
        pos += h.vocab_len as usize;
        let vocab_end = pos;

        let postings_start = pos;
        pos += h.postings_len as usize;
        let postings_end = pos;

        Self {
            dictionary: (dictionary_start, dictionary_end),
            vocabulary: (vocab_start, vocab_end),
            postings: (postings_start, postings_end),
            footer: (pos, pos + IndexFooter::SIZE),
        }
    }

    /// Expected content size (everything before footer)
    pub fn content_size(&self) -> usize {
        self.footer.0
    }

    /// Total file size including footer
    pub fn total_size(&self) -> usize {
        self.footer.1
    }
}

// ============================================================================
// FOOTER (8 bytes)
// ============================================================================

/// Footer with CRC32 checksum and magic number
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexFooter {
    /// CRC32 of header + all sections (everything before footer)
    pub crc32: u32,
}

impl IndexFooter {
    pub const SIZE: usize = 8; // 4 bytes CRC32 + 4 bytes magic

    pub fn write(&self, buf: &mut Vec<u8>) {
        buf.extend_from_slice(&self.crc32.to_le_bytes());
        buf.extend_from_slice(&FOOTER_MAGIC);
    }

    pub fn read(bytes: &[u8]) -> Result<Self, StorageError> {
        if bytes.len() < Self::SIZE {
            return Err(StorageError::corrupt("file too short for footer"));
        }

        let footer_start = bytes.len() - Self::SIZE;
        let magic = &bytes[footer_start + 4..];
        if magic != FOOTER_MAGIC {
            return Err(StorageError::corrupt(format!(
                "invalid footer magic: expected XIGN, got {:?}",
                magic
            )));
        }

        let crc32 = u32::from_le_bytes([
            bytes[footer_start],
            bytes[footer_start + 1],
            bytes[footer_start + 2],
            bytes[footer_start + 3],
        ]);

        Ok(Self { crc32 })
    }

    /// Compute CRC32 over the given bytes
    pub fn compute_crc32(data: &[u8]) -> u32 {
        let mut hasher = Crc32Hasher::new();
        hasher.update(data);
        hasher.finalize()
    }
}
