// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Error types.
//!
//! Three layers, three types. `ConfigError` is raised while building configs
//! and never during a query. `StorageError` comes out of index providers when
//! a posting list can't be read. `NotDereferencable` is what a cursor says
//! when it has nothing to point at, which is routine rather than a fault.
//! `Error` wraps all of them at the query boundary.

use std::io;

use thiserror::Error;

/// Invalid index or search configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("ngram size {size} is outside [{min}, {max}]")]
    NGramSize { size: usize, min: usize, max: usize },

    #[error("alphabet must not be empty")]
    EmptyAlphabet,

    #[error("pad must be exactly one character, got {0:?}")]
    Pad(String),

    #[error("similarity {0} is outside (0.0, 1.0]")]
    Similarity(f64),

    #[error("unknown metric `{0}`")]
    UnknownMetric(String),

    #[error("unknown merge algorithm `{0}`")]
    UnknownMerger(String),

    #[error("malformed index description: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to read configuration: {0}")]
    Io(#[from] io::Error),
}

/// A cursor has no current element: it is exhausted, or its list is empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("cursor is not dereferencable")]
pub struct NotDereferencable;

/// Failure reading index data from its backing storage.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("i/o error: {0}")]
    Io(#[from] io::Error),

    #[error("corrupt index data: {0}")]
    Corrupt(String),

    #[error("checksum mismatch: stored {stored:#010x}, computed {computed:#010x}")]
    ChecksumMismatch { stored: u32, computed: u32 },

    #[error("unsupported index format version {found} (expected {expected})")]
    UnsupportedVersion { found: u8, expected: u8 },

    #[error("index was built with ngram size {found}, config expects {expected}")]
    NGramSizeMismatch { found: usize, expected: usize },
}

impl StorageError {
    pub(crate) fn corrupt(reason: impl Into<String>) -> Self {
        StorageError::Corrupt(reason.into())
    }
}

/// Query-level error.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    NotDereferencable(#[from] NotDereferencable),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("unknown dictionary `{0}`")]
    UnknownDictionary(String),

    #[error("search deadline exceeded")]
    DeadlineExceeded,
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
