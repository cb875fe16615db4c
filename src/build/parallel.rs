// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Per-entry term generation, parallel when the feature allows.
//!
//! Output order always matches doc id order: rayon's indexed `collect`
//! preserves it, so the posting lists built from it come out sorted.

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::dictionary::Dictionary;
use crate::generator::Term;
use crate::index::DocId;

#[cfg(feature = "parallel")]
pub(super) fn generate_all<D, F>(dictionary: &D, terms_of: F) -> Vec<Vec<Term>>
where
    D: Dictionary,
    F: Fn(&str) -> Vec<Term> + Sync,
{
    (0..dictionary.len())
        .into_par_iter()
        .map(|id| dictionary.get(id as DocId).map(&terms_of))
        .map(Option::unwrap_or_default)
        .collect()
}

#[cfg(not(feature = "parallel"))]
pub(super) fn generate_all<D, F>(dictionary: &D, terms_of: F) -> Vec<Vec<Term>>
where
    D: Dictionary,
    F: Fn(&str) -> Vec<Term> + Sync,
{
    (0..dictionary.len())
        .map(|id| dictionary.get(id as DocId).map(&terms_of))
        .map(Option::unwrap_or_default)
        .collect()
}
