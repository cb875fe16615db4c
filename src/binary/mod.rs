// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Binary format for persisted suggest indexes.
//!
//! Building an index means cleaning and n-gramming every dictionary entry.
//! That is cheap for a few thousand product names and annoying for a few
//! million, so a built index can be written out once and loaded on startup.
//!
//! Loading is a single validated pass. Posting lists stay delta+varint encoded
//! in one buffer and are decoded only when a query binds a cursor to them, so
//! a loaded index costs roughly its file size in memory.
//!
//! # Security Considerations
//!
//! Index files are parsed as untrusted input:
//! - All size fields are validated against MAX_* constants
//! - Bounds checking prevents buffer overreads
//! - CRC32 footer detects corruption/truncation
//! - Varint decoder has maximum iteration limits
//! - Posting lists are re-validated for strict ascent at decode time
//!
//! # Format Overview (v1)
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────┐
//! │ HEADER (28 bytes)                                          │
//! │   magic: [u8; 4] = "NGIX"                                  │
//! │   version: u8 = 1                                          │
//! │   ngram_size: u8                                           │
//! │   reserved: [u8; 2]                                        │
//! │   doc_count: u32, term_count: u32                          │
//! │   dictionary_len: u32, vocab_len: u32, postings_len: u32   │
//! ├────────────────────────────────────────────────────────────┤
//! │ 1. DICTIONARY: per entry, varint term count + string       │
//! ├────────────────────────────────────────────────────────────┤
//! │ 2. VOCABULARY: sorted, front-compressed terms, each with   │
//! │    a varint offset into POSTINGS                           │
//! ├────────────────────────────────────────────────────────────┤
//! │ 3. POSTINGS: per term, varint doc_freq + delta varints     │
//! ├────────────────────────────────────────────────────────────┤
//! │ FOOTER (8 bytes): crc32 + magic "XIGN"                     │
//! └────────────────────────────────────────────────────────────┘
//! ```

mod encoding;
mod header;
pub(crate) mod postings;

pub use encoding::{decode_varint, encode_varint};
pub use header::{
    IndexFooter, IndexHeader, SectionOffsets, FOOTER_MAGIC, MAGIC, MAX_DOC_COUNT, MAX_FILE_SIZE,
    MAX_POSTING_SIZE, MAX_TERM_COUNT, MAX_VARINT_BYTES, VERSION,
};
pub use postings::{decode_postings_into, encode_postings};

use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::Arc;

use tracing::info;

use crate::config::IndexConfig;
use crate::dictionary::InMemoryDictionary;
use crate::error::StorageError;
use crate::generator::Term;
use crate::index::{DocId, InvertedIndex, PostingList};
use crate::suggest::SearchIndex;
use encoding::{encode_str, SectionReader};

// ============================================================================
// BINARY-BACKED INDEX
// ============================================================================

/// Inverted index whose posting lists stay encoded until a cursor needs them.
#[derive(Debug, Clone)]
pub struct BinaryIndex {
    postings: Vec<u8>,
    /// term → (offset into `postings`, doc_freq)
    terms: HashMap<Term, (usize, usize)>,
}

impl BinaryIndex {
    fn list_at(&self, offset: usize, len: usize) -> PostingList<'_> {
        PostingList::Encoded {
            len,
            bytes: &self.postings[offset..],
        }
    }

    /// Size of the encoded postings buffer.
    pub fn postings_bytes(&self) -> usize {
        self.postings.len()
    }
}

impl InvertedIndex for BinaryIndex {
    fn has(&self, term: &str) -> bool {
        self.terms.contains_key(term)
    }

    fn get(&self, term: &str) -> Result<Option<PostingList<'_>>, StorageError> {
        Ok(self
            .terms
            .get(term)
            .map(|&(offset, len)| self.list_at(offset, len)))
    }

    fn num_terms(&self) -> usize {
        self.terms.len()
    }

    fn visit(&self, visitor: &mut dyn FnMut(&str, PostingList<'_>)) {
        for (term, &(offset, len)) in &self.terms {
            visitor(term, self.list_at(offset, len));
        }
    }
}

// ============================================================================
// ENCODING
// ============================================================================

fn section_len(len: usize, what: &str) -> Result<u32, StorageError> {
    let Ok(len32) = u32::try_from(len) else {
        return Err(StorageError::corrupt(format!(
            "{} section too large to encode: {} bytes",
            what, len
        )));
    };
    Ok(len32)
}

fn common_prefix_len(a: &[u8], b: &[u8]) -> usize {
    a.iter().zip(b).take_while(|(x, y)| x == y).count()
}

/// Serialize a search index.
///
/// Works for any backing index: lists are decoded through the same path a
/// query uses, so a corrupt list fails the encode instead of being copied.
pub fn encode_index(index: &SearchIndex) -> Result<Vec<u8>, StorageError> {
    let dictionary = index.dictionary();
    let term_counts = index.term_counts();

    // Dictionary section
    let mut dictionary_bytes = Vec::new();
    for id in 0..dictionary.len() {
        let entry = dictionary
            .get(id as DocId)
            .ok_or_else(|| StorageError::corrupt(format!("dictionary has no entry {}", id)))?;
        encode_varint(u64::from(term_counts[id]), &mut dictionary_bytes);
        encode_str(entry, &mut dictionary_bytes);
    }

    // Collect every list, decoded, then sort by term for front compression
    let mut lists: Vec<(String, Vec<DocId>)> = Vec::with_capacity(index.inverted().num_terms());
    let mut first_error = None;
    index.inverted().visit(&mut |term, list| {
        if first_error.is_some() {
            return;
        }
        let mut ids = Vec::with_capacity(list.len());
        match list.decode_into(&mut ids) {
            Ok(()) => lists.push((term.to_string(), ids)),
            Err(err) => first_error = Some(err),
        }
    });
    if let Some(err) = first_error {
        return Err(err);
    }
    lists.sort_unstable_by(|a, b| a.0.cmp(&b.0));

    let mut vocab_bytes = Vec::new();
    let mut postings_bytes = Vec::new();
    let mut prev: &[u8] = &[];
    for (term, ids) in &lists {
        let bytes = term.as_bytes();
        let shared = common_prefix_len(prev, bytes);
        encode_varint(shared as u64, &mut vocab_bytes);
        encode_varint((bytes.len() - shared) as u64, &mut vocab_bytes);
        vocab_bytes.extend_from_slice(&bytes[shared..]);
        encode_varint(postings_bytes.len() as u64, &mut vocab_bytes);
        encode_postings(ids, &mut postings_bytes);
        prev = bytes;
    }

    let header = IndexHeader {
        version: VERSION,
        ngram_size: index.config().ngram_size() as u8,
        doc_count: section_len(dictionary.len(), "dictionary")?,
        term_count: section_len(lists.len(), "vocabulary")?,
        dictionary_len: section_len(dictionary_bytes.len(), "dictionary")?,
        vocab_len: section_len(vocab_bytes.len(), "vocabulary")?,
        postings_len: section_len(postings_bytes.len(), "postings")?,
    };

    let total = header.section_offsets().total_size();
    let mut buf = Vec::with_capacity(total);
    header.write(&mut buf);
    buf.extend_from_slice(&dictionary_bytes);
    buf.extend_from_slice(&vocab_bytes);
    buf.extend_from_slice(&postings_bytes);
    IndexFooter {
        crc32: IndexFooter::compute_crc32(&buf),
    }
    .write(&mut buf);
    debug_assert_eq!(buf.len(), total);

    Ok(buf)
}

/// Encode and write to `path`.
pub fn write_index(index: &SearchIndex, path: &Path) -> Result<usize, StorageError> {
    let bytes = encode_index(index)?;
    fs::write(path, &bytes)?;
    info!(
        path = %path.display(),
        bytes = bytes.len(),
        entries = index.len(),
        "wrote index"
    );
    Ok(bytes.len())
}

// ============================================================================
// DECODING
// ============================================================================

/// Validate framing (size, header, footer, checksum) and return the header.
pub fn read_header(bytes: &[u8]) -> Result<IndexHeader, StorageError> {
    if bytes.len() > MAX_FILE_SIZE {
        return Err(StorageError::corrupt(format!(
            "file size {} exceeds maximum {}",
            bytes.len(),
            MAX_FILE_SIZE
        )));
    }

    let header = IndexHeader::read(bytes)?;
    let offsets = header.section_offsets();
    if offsets.total_size() != bytes.len() {
        return Err(StorageError::corrupt(format!(
            "header describes {} bytes, file has {}",
            offsets.total_size(),
            bytes.len()
        )));
    }

    let footer = IndexFooter::read(bytes)?;
    let computed = IndexFooter::compute_crc32(&bytes[..offsets.content_size()]);
    if footer.crc32 != computed {
        return Err(StorageError::ChecksumMismatch {
            stored: footer.crc32,
            computed,
        });
    }

    Ok(header)
}

fn section<'a>(
    bytes: &'a [u8],
    range: (usize, usize),
    what: &str,
) -> Result<&'a [u8], StorageError> {
    bytes
        .get(range.0..range.1)
        .ok_or_else(|| StorageError::corrupt(format!("{} section out of bounds", what)))
}

fn decode_dictionary(
    bytes: &[u8],
    doc_count: usize,
) -> Result<(Vec<String>, Vec<u32>), StorageError> {
    // Each entry takes at least two bytes
    if doc_count > bytes.len() / 2 {
        return Err(StorageError::corrupt(format!(
            "{} entries cannot fit in {} dictionary bytes",
            doc_count,
            bytes.len()
        )));
    }

    let mut reader = SectionReader::new(bytes);
    let mut entries = Vec::with_capacity(doc_count);
    let mut term_counts = Vec::with_capacity(doc_count);
    for _ in 0..doc_count {
        let count = reader.bounded(u32::MAX as usize, "term count")?;
        term_counts.push(count as u32);
        entries.push(reader.str()?.to_string());
    }
    if !reader.is_at_end() {
        return Err(StorageError::corrupt("trailing bytes after dictionary"));
    }
    Ok((entries, term_counts))
}

fn decode_vocabulary(
    bytes: &[u8],
    term_count: usize,
    postings: &[u8],
    doc_count: usize,
) -> Result<HashMap<Term, (usize, usize)>, StorageError> {
    // Each term takes at least three bytes
    if term_count > bytes.len() / 3 {
        return Err(StorageError::corrupt(format!(
            "{} terms cannot fit in {} vocabulary bytes",
            term_count,
            bytes.len()
        )));
    }

    let mut reader = SectionReader::new(bytes);
    let mut terms = HashMap::with_capacity(term_count);
    let mut prev: Vec<u8> = Vec::new();
    let mut scratch: Vec<DocId> = Vec::new();

    for i in 0..term_count {
        let shared = reader.bounded(prev.len(), "shared prefix")?;
        let suffix = reader.prefixed()?;

        prev.truncate(shared);
        prev.extend_from_slice(suffix);
        let term = std::str::from_utf8(&prev)
            .map_err(|e| StorageError::corrupt(format!("term {} is not UTF-8: {}", i, e)))?
            .to_string();

        let last_offset = postings.len().saturating_sub(1);
        let offset = reader.bounded(last_offset, "postings offset")?;
        let (doc_freq, _) = decode_varint(&postings[offset..])?;
        if doc_freq as usize > doc_count {
            return Err(StorageError::corrupt(format!(
                "term {:?} claims {} documents, index has {}",
                term, doc_freq, doc_count
            )));
        }

        // Lists decode lazily at query time, so check them all once here
        scratch.clear();
        decode_postings_into(&postings[offset..], &mut scratch)?;
        if scratch.last().is_some_and(|&id| id as usize >= doc_count) {
            return Err(StorageError::corrupt(format!(
                "term {:?} points past the last document",
                term
            )));
        }

        if terms.insert(term, (offset, doc_freq as usize)).is_some() {
            return Err(StorageError::corrupt(format!(
                "duplicate term at position {}",
                i
            )));
        }
    }

    if !reader.is_at_end() {
        return Err(StorageError::corrupt("trailing bytes after vocabulary"));
    }
    Ok(terms)
}

/// Decode an index written by `encode_index`.
///
/// `config` supplies the alphabet and wrap markers, which are not stored.
/// Its ngram size must match the one the index was built with.
pub fn load_index(config: &IndexConfig, bytes: &[u8]) -> Result<SearchIndex, StorageError> {
    let header = read_header(bytes)?;
    if usize::from(header.ngram_size) != config.ngram_size() {
        return Err(StorageError::NGramSizeMismatch {
            found: usize::from(header.ngram_size),
            expected: config.ngram_size(),
        });
    }

    let offsets = header.section_offsets();
    let doc_count = header.doc_count as usize;
    let (entries, term_counts) =
        decode_dictionary(section(bytes, offsets.dictionary, "dictionary")?, doc_count)?;
    let postings = section(bytes, offsets.postings, "postings")?.to_vec();
    let terms = decode_vocabulary(
        section(bytes, offsets.vocabulary, "vocabulary")?,
        header.term_count as usize,
        &postings,
        doc_count,
    )?;

    info!(
        entries = doc_count,
        terms = terms.len(),
        bytes = bytes.len(),
        "loaded index"
    );

    SearchIndex::new(
        config.clone(),
        Arc::new(BinaryIndex { postings, terms }),
        Arc::new(InMemoryDictionary::new(entries)),
        term_counts,
    )
}

/// Read and decode an index file.
pub fn open_index(config: &IndexConfig, path: &Path) -> Result<SearchIndex, StorageError> {
    let bytes = fs::read(path)?;
    load_index(config, &bytes)
}
