// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Similarity metrics: merge thresholds before the search, scores after it.
//!
//! Every metric answers three questions about a query with `a` terms:
//!
//! 1. **Which candidates are worth looking at?** `candidate_range` bounds the
//!    term count `b` of any entry that could reach the minimum similarity.
//! 2. **How many shared terms does such a candidate need?** `threshold` is a
//!    lower bound on the overlap `c` for a candidate with `b` terms. It must
//!    never be too high, or true matches are lost in the merge.
//! 3. **How similar is it really?** `score` maps a candidate to `[0, 1]`,
//!    higher is better.
//!
//! # Threshold Derivations
//!
//! `α` is the minimum similarity, `q` the ngram size, `c ≤ min(a, b)`.
//!
//! | Metric      | score                 | c ≥                  | b ∈                          |
//! |-------------|-----------------------|----------------------|------------------------------|
//! | Jaccard     | c / (a + b - c)       | α(a + b) / (1 + α)   | [αa, a/α]                    |
//! | Cosine      | c / √(ab)             | α√(ab)               | [α²a, a/α²]                  |
//! | Dice        | 2c / (a + b)          | α(a + b) / 2         | [αa/(2-α), (2-α)a/α]         |
//! | NGram       | 1 - D / (a + b)       | α(a + b) / 2         | same as Dice                 |
//! | Levenshtein | 1 - ed / max(len)     | max(a, b) - q·dmax   | [a - q·dmax, len/α - q + 1]  |
//!
//! NGram: `D` counts every k-gram the two profiles disagree on, so
//! `D ≥ a + b - 2c`, which gives the Dice bound.
//!
//! Levenshtein: one edit touches at most `q` windows, so at least
//! `max(a, b) - q·ed` distinct terms survive. A score of `α` allows
//! `ed ≤ (1 - α)·max(len)` and forces `max(len) ≤ len/α`, so
//! `dmax = ⌊(1 - α)·len/α⌋`. When that bound drops to zero or below the
//! threshold is clamped to 1: only candidates sharing at least one term are
//! ever reached through the index.
//!
//! Real-valued bounds go through `ceil_eps`/`floor_eps` so that `0.5 * 4`
//! computed as `1.9999999` still rounds to 2.

mod levenshtein;
mod profile;

pub use levenshtein::{levenshtein, levenshtein_within};
pub use profile::{jaccard_distance, ngram_distance};

use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

const EPSILON: f64 = 1e-9;

#[inline]
fn ceil_eps(x: f64) -> usize {
    (x - EPSILON).ceil().max(0.0) as usize
}

#[inline]
fn floor_eps(x: f64) -> usize {
    (x + EPSILON).floor().max(0.0) as usize
}

/// What the metric knows about the query before any candidate is seen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryProfile {
    /// Distinct terms generated from the prepared query.
    pub terms: usize,
    /// Code points in the prepared query.
    pub chars: usize,
    pub ngram_size: usize,
}

/// One query/candidate pair after the merge.
#[derive(Debug, Clone, Copy)]
pub struct Overlap<'a> {
    /// Query terms found in the candidate's postings.
    pub shared: usize,
    pub query_terms: usize,
    pub candidate_terms: usize,
    /// Prepared (cleaned and wrapped) query.
    pub query: &'a str,
    /// Prepared candidate.
    pub candidate: &'a str,
    pub ngram_size: usize,
}

/// Threshold and scoring strategy for one similarity measure.
pub trait Metric: Send + Sync + fmt::Debug {
    fn kind(&self) -> MetricKind;

    /// Term counts a candidate can have and still reach `min_similarity`.
    fn candidate_range(&self, query: &QueryProfile, min_similarity: f64) -> RangeInclusive<usize>;

    /// Minimum overlap for a candidate with `candidate_terms` terms. Never below 1.
    fn threshold(
        &self,
        query: &QueryProfile,
        candidate_terms: usize,
        min_similarity: f64,
    ) -> usize;

    /// Similarity in `[0, 1]`.
    fn score(&self, overlap: &Overlap<'_>) -> f64;
}

/// The closed set of metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MetricKind {
    Levenshtein,
    NGram,
    Jaccard,
    Cosine,
    Dice,
}

impl MetricKind {
    pub const ALL: [MetricKind; 5] = [
        MetricKind::Levenshtein,
        MetricKind::NGram,
        MetricKind::Jaccard,
        MetricKind::Cosine,
        MetricKind::Dice,
    ];

    pub fn metric(self) -> &'static dyn Metric {
        match self {
            MetricKind::Levenshtein => &LevenshteinMetric,
            MetricKind::NGram => &NGramMetric,
            MetricKind::Jaccard => &JaccardMetric,
            MetricKind::Cosine => &CosineMetric,
            MetricKind::Dice => &DiceMetric,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            MetricKind::Levenshtein => "levenshtein",
            MetricKind::NGram => "ngram",
            MetricKind::Jaccard => "jaccard",
            MetricKind::Cosine => "cosine",
            MetricKind::Dice => "dice",
        }
    }
}

impl fmt::Display for MetricKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for MetricKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_ascii_lowercase();
        MetricKind::ALL
            .into_iter()
            .find(|kind| kind.name() == lower)
            .ok_or_else(|| ConfigError::UnknownMetric(s.to_string()))
    }
}

// ============================================================================
// SET METRICS
// ============================================================================

#[derive(Debug, Clone, Copy)]
struct JaccardMetric;

impl Metric for JaccardMetric {
    fn kind(&self) -> MetricKind {
        MetricKind::Jaccard
    }

    fn candidate_range(&self, query: &QueryProfile, alpha: f64) -> RangeInclusive<usize> {
        let a = query.terms as f64;
        ceil_eps(alpha * a).max(1)..=floor_eps(a / alpha)
    }

    fn threshold(&self, query: &QueryProfile, b: usize, alpha: f64) -> usize {
        let sum = (query.terms + b) as f64;
        ceil_eps(alpha * sum / (1.0 + alpha)).max(1)
    }

    fn score(&self, o: &Overlap<'_>) -> f64 {
        let union = o.query_terms + o.candidate_terms - o.shared;
        if union == 0 {
            return 0.0;
        }
        o.shared as f64 / union as f64
    }
}

#[derive(Debug, Clone, Copy)]
struct CosineMetric;

impl Metric for CosineMetric {
    fn kind(&self) -> MetricKind {
        MetricKind::Cosine
    }

    fn candidate_range(&self, query: &QueryProfile, alpha: f64) -> RangeInclusive<usize> {
        let a = query.terms as f64;
        let alpha2 = alpha * alpha;
        ceil_eps(alpha2 * a).max(1)..=floor_eps(a / alpha2)
    }

    fn threshold(&self, query: &QueryProfile, b: usize, alpha: f64) -> usize {
        let product = (query.terms * b) as f64;
        ceil_eps(alpha * product.sqrt()).max(1)
    }

    fn score(&self, o: &Overlap<'_>) -> f64 {
        let product = (o.query_terms * o.candidate_terms) as f64;
        if product == 0.0 {
            return 0.0;
        }
        o.shared as f64 / product.sqrt()
    }
}

fn dice_range(query: &QueryProfile, alpha: f64) -> RangeInclusive<usize> {
    let a = query.terms as f64;
    ceil_eps(alpha * a / (2.0 - alpha)).max(1)..=floor_eps((2.0 - alpha) * a / alpha)
}

fn dice_threshold(query: &QueryProfile, b: usize, alpha: f64) -> usize {
    ceil_eps(alpha * (query.terms + b) as f64 / 2.0).max(1)
}

#[derive(Debug, Clone, Copy)]
struct DiceMetric;

impl Metric for DiceMetric {
    fn kind(&self) -> MetricKind {
        MetricKind::Dice
    }

    fn candidate_range(&self, query: &QueryProfile, alpha: f64) -> RangeInclusive<usize> {
        dice_range(query, alpha)
    }

    fn threshold(&self, query: &QueryProfile, b: usize, alpha: f64) -> usize {
        dice_threshold(query, b, alpha)
    }

    fn score(&self, o: &Overlap<'_>) -> f64 {
        let sum = o.query_terms + o.candidate_terms;
        if sum == 0 {
            return 0.0;
        }
        2.0 * o.shared as f64 / sum as f64
    }
}

// ============================================================================
// STRING METRICS
// ============================================================================

#[derive(Debug, Clone, Copy)]
struct NGramMetric;

impl Metric for NGramMetric {
    fn kind(&self) -> MetricKind {
        MetricKind::NGram
    }

    fn candidate_range(&self, query: &QueryProfile, alpha: f64) -> RangeInclusive<usize> {
        dice_range(query, alpha)
    }

    fn threshold(&self, query: &QueryProfile, b: usize, alpha: f64) -> usize {
        dice_threshold(query, b, alpha)
    }

    fn score(&self, o: &Overlap<'_>) -> f64 {
        let sum = o.query_terms + o.candidate_terms;
        if sum == 0 {
            return 0.0;
        }
        let distance = ngram_distance(o.query, o.candidate, o.ngram_size);
        (1.0 - distance as f64 / sum as f64).max(0.0)
    }
}

#[derive(Debug, Clone, Copy)]
struct LevenshteinMetric;

impl LevenshteinMetric {
    fn max_edits(query: &QueryProfile, alpha: f64) -> usize {
        floor_eps((1.0 - alpha) * query.chars as f64 / alpha)
    }
}

impl Metric for LevenshteinMetric {
    fn kind(&self) -> MetricKind {
        MetricKind::Levenshtein
    }

    fn candidate_range(&self, query: &QueryProfile, alpha: f64) -> RangeInclusive<usize> {
        let edits = Self::max_edits(query, alpha);
        let lost = query.ngram_size.saturating_mul(edits);
        let low = query.terms.saturating_sub(lost).max(1);
        let longest = floor_eps(query.chars as f64 / alpha);
        let high = (longest + 1).saturating_sub(query.ngram_size);
        low..=high
    }

    fn threshold(&self, query: &QueryProfile, b: usize, alpha: f64) -> usize {
        let edits = Self::max_edits(query, alpha);
        let lost = query.ngram_size.saturating_mul(edits);
        query.terms.max(b).saturating_sub(lost).max(1)
    }

    fn score(&self, o: &Overlap<'_>) -> f64 {
        let longest = o.query.chars().count().max(o.candidate.chars().count());
        if longest == 0 {
            return 1.0;
        }
        1.0 - levenshtein(o.query, o.candidate) as f64 / longest as f64
    }
}
