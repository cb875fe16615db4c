// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! CLI definitions for the ngram-suggest command-line interface.
//!
//! Four subcommands: `build` to turn index descriptions into binary index
//! files, `suggest` and `autocomplete` to query one of them, and `inspect`
//! to look inside an index file without loading it.

pub mod display;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use ngram_suggest::{MergeAlgorithm, MetricKind};

#[derive(Parser)]
#[command(
    name = "ngram-suggest",
    about = "Typo-tolerant autocomplete over n-gram indexes",
    version
)]
pub struct Cli {
    /// Log debug events (search thresholds, merge sizes) to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build binary indexes for every description in a config file
    Build {
        /// JSON array of index descriptions
        #[arg(short, long)]
        config: PathBuf,

        /// Only build the description with this name
        #[arg(short, long)]
        name: Option<String>,
    },

    /// Fuzzy suggestions for a query
    Suggest {
        /// JSON array of index descriptions
        #[arg(short, long)]
        config: PathBuf,

        /// Description name to query
        #[arg(short, long)]
        name: String,

        /// Query text
        query: String,

        /// Maximum number of results
        #[arg(short = 'k', long, default_value = "10")]
        top_k: usize,

        /// Similarity metric
        #[arg(short, long, default_value = "jaccard")]
        metric: MetricKind,

        /// Minimum similarity in (0, 1]
        #[arg(short, long, default_value = "0.5")]
        similarity: f64,

        /// Merge algorithm (results are identical, timings are not)
        #[arg(long, default_value = "merge-skip")]
        merger: MergeAlgorithm,
    },

    /// Entries containing every n-gram of a prefix
    Autocomplete {
        /// JSON array of index descriptions
        #[arg(short, long)]
        config: PathBuf,

        /// Description name to query
        #[arg(short, long)]
        name: String,

        /// Prefix typed so far
        prefix: String,

        /// Maximum number of results
        #[arg(short, long, default_value = "10")]
        limit: usize,
    },

    /// Inspect a binary index file
    Inspect {
        /// Path to index file
        file: PathBuf,
    },
}
