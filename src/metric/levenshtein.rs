// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Edit distance over code points.
//!
//! The key insight for the bounded variant: `|len(a) - len(b)|` is a lower
//! bound on edit distance. If two strings differ in length by more than the
//! bound, skip the O(nm) DP entirely.

/// Classic Levenshtein distance: unit cost for substitution, insertion and
/// deletion. Single rolling row, O(len(a) · len(b)) time, O(len(b)) space.
pub fn levenshtein(a: &str, b: &str) -> usize {
    let b_chars: Vec<char> = b.chars().collect();
    if a.is_empty() {
        return b_chars.len();
    }
    if b_chars.is_empty() {
        return a.chars().count();
    }

    let mut row: Vec<usize> = (0..=b_chars.len()).collect();
    for (i, ac) in a.chars().enumerate() {
        let mut diagonal = row[0];
        row[0] = i + 1;
        for (j, &bc) in b_chars.iter().enumerate() {
            let above = row[j + 1];
            let cost = usize::from(ac != bc);
            row[j + 1] = (above + 1).min(row[j] + 1).min(diagonal + cost);
            diagonal = above;
        }
    }

    row[b_chars.len()]
}

/// Are these strings within `max` edits of each other?
///
/// Two early exits, both sound:
/// 1. If the length difference exceeds `max`, return false immediately
/// 2. If the minimum of a DP row exceeds `max`, abandon the DP
pub fn levenshtein_within(a: &str, b: &str, max: usize) -> bool {
    let a_len = a.chars().count();
    let b_chars: Vec<char> = b.chars().collect();

    if a_len.abs_diff(b_chars.len()) > max {
        return false;
    }

    let mut row: Vec<usize> = (0..=b_chars.len()).collect();
    for (i, ac) in a.chars().enumerate() {
        let mut diagonal = row[0];
        row[0] = i + 1;
        let mut row_min = row[0];

        for (j, &bc) in b_chars.iter().enumerate() {
            let above = row[j + 1];
            let cost = usize::from(ac != bc);
            row[j + 1] = (above + 1).min(row[j] + 1).min(diagonal + cost);
            diagonal = above;
            row_min = row_min.min(row[j + 1]);
        }

        // Row minima never decrease, so nothing below can come back under max
        if row_min > max {
            return false;
        }
    }

    row[b_chars.len()] <= max
}
