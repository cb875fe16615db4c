// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The dictionary: the indexed strings, addressed by `DocId`.

use std::fs::File;
use std::io::{self, BufRead, BufReader, Read};
use std::path::Path;

use crate::index::DocId;

/// Read-only `DocId → entry` lookup.
pub trait Dictionary: Send + Sync {
    fn len(&self) -> usize;

    fn get(&self, id: DocId) -> Option<&str>;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Entries held in a `Vec`; a `DocId` is the position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InMemoryDictionary {
    entries: Vec<String>,
}

impl InMemoryDictionary {
    pub fn new(entries: Vec<String>) -> Self {
        Self { entries }
    }

    /// One entry per line. Blank lines are skipped and do not consume an id.
    pub fn from_reader<R: Read>(reader: R) -> io::Result<Self> {
        let mut entries = Vec::new();
        for line in BufReader::new(reader).lines() {
            let line = line?;
            let entry = line.trim();
            if !entry.is_empty() {
                entries.push(entry.to_string());
            }
        }
        Ok(Self { entries })
    }

    pub fn from_file(path: &Path) -> io::Result<Self> {
        Self::from_reader(File::open(path)?)
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }
}

impl Dictionary for InMemoryDictionary {
    fn len(&self) -> usize {
        self.entries.len()
    }

    fn get(&self, id: DocId) -> Option<&str> {
        self.entries.get(id as usize).map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for InMemoryDictionary {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter.into_iter().map(Into::into).collect())
    }
}
