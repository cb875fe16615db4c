// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Index and search configuration.
//!
//! Everything here is validated at construction. Once you hold an
//! `IndexConfig` or a `SearchConfig`, the query path can trust it and never
//! needs to report a configuration problem mid-search.
//!
//! Index descriptions are read from JSON, one entry per named dictionary:
//!
//! ```json
//! [{
//!   "name": "cars",
//!   "ngramSize": 3,
//!   "source": "cars.dict",
//!   "output": "cars.ngix",
//!   "alphabet": ["english", "russian", "numbers", "$"],
//!   "pad": "$",
//!   "wrap": ["$", "$"]
//! }]
//! ```

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};
use std::time::Instant;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::metric::MetricKind;
use crate::util::{Alphabet, Cleaner};

/// Smallest supported n-gram size.
pub const MIN_NGRAM_SIZE: usize = 2;

/// Largest supported n-gram size.
pub const MAX_NGRAM_SIZE: usize = 4;

/// How dictionary entries and queries are turned into terms.
#[derive(Debug, Clone)]
pub struct IndexConfig {
    ngram_size: usize,
    alphabet: Alphabet,
    pad: char,
    left_wrap: String,
    right_wrap: String,
}

impl IndexConfig {
    pub fn new(
        ngram_size: usize,
        alphabet: Alphabet,
        wrap: (&str, &str),
        pad: &str,
    ) -> Result<Self, ConfigError> {
        if !(MIN_NGRAM_SIZE..=MAX_NGRAM_SIZE).contains(&ngram_size) {
            return Err(ConfigError::NGramSize {
                size: ngram_size,
                min: MIN_NGRAM_SIZE,
                max: MAX_NGRAM_SIZE,
            });
        }

        if alphabet.is_empty() {
            return Err(ConfigError::EmptyAlphabet);
        }

        let mut pad_chars = pad.chars();
        let pad_char = match (pad_chars.next(), pad_chars.next()) {
            (Some(c), None) => c,
            _ => return Err(ConfigError::Pad(pad.to_string())),
        };

        Ok(Self {
            ngram_size,
            alphabet,
            pad: pad_char,
            left_wrap: wrap.0.to_string(),
            right_wrap: wrap.1.to_string(),
        })
    }

    pub fn ngram_size(&self) -> usize {
        self.ngram_size
    }

    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    pub fn pad(&self) -> char {
        self.pad
    }

    pub fn cleaner(&self) -> Cleaner {
        Cleaner::new(
            self.alphabet.clone(),
            self.pad,
            &self.left_wrap,
            &self.right_wrap,
        )
    }
}

/// Parameters of one `suggest` call.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    query: String,
    top_k: usize,
    metric: MetricKind,
    similarity: f64,
    deadline: Option<Instant>,
}

impl SearchConfig {
    pub fn new(
        query: impl Into<String>,
        top_k: usize,
        metric: MetricKind,
        similarity: f64,
    ) -> Result<Self, ConfigError> {
        // NaN fails both comparisons, so it is rejected too
        if !(similarity > 0.0 && similarity <= 1.0) {
            return Err(ConfigError::Similarity(similarity));
        }

        Ok(Self {
            query: query.into(),
            top_k,
            metric,
            similarity,
            deadline: None,
        })
    }

    /// Fail the search with `DeadlineExceeded` if it starts after `deadline`.
    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Same parameters, different query.
    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = query.into();
        self
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn top_k(&self) -> usize {
        self.top_k
    }

    pub fn metric(&self) -> MetricKind {
        self.metric
    }

    pub fn similarity(&self) -> f64 {
        self.similarity
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }
}

/// One named dictionary as described in the JSON config file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexDescription {
    pub name: String,
    pub ngram_size: usize,
    /// Newline-delimited dictionary file.
    pub source: PathBuf,
    /// Where the binary index is written and loaded from.
    #[serde(default)]
    pub output: Option<PathBuf>,
    pub alphabet: Vec<String>,
    pub pad: String,
    pub wrap: [String; 2],
}

impl IndexDescription {
    pub fn config(&self) -> Result<IndexConfig, ConfigError> {
        IndexConfig::new(
            self.ngram_size,
            Alphabet::from_names(&self.alphabet),
            (&self.wrap[0], &self.wrap[1]),
            &self.pad,
        )
    }

    /// Resolve `source` and `output` against `base` when they are relative.
    pub fn resolve_paths(mut self, base: &Path) -> Self {
        if self.source.is_relative() {
            self.source = base.join(&self.source);
        }
        if let Some(output) = self.output.as_mut() {
            if output.is_relative() {
                *output = base.join(&*output);
            }
        }
        self
    }
}

/// Parse a JSON array of index descriptions.
pub fn read_descriptions<R: Read>(reader: R) -> Result<Vec<IndexDescription>, ConfigError> {
    let descriptions: Vec<IndexDescription> = serde_json::from_reader(reader)?;
    for description in &descriptions {
        description.config()?;
    }
    Ok(descriptions)
}

/// Read descriptions from a file; relative paths inside resolve against its directory.
pub fn read_descriptions_file(path: &Path) -> Result<Vec<IndexDescription>, ConfigError> {
    let file = File::open(path)?;
    let base = path.parent().unwrap_or_else(|| Path::new("."));
    Ok(read_descriptions(BufReader::new(file))?
        .into_iter()
        .map(|description| description.resolve_paths(base))
        .collect())
}
