// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Text preparation: alphabets and the cleaner that maps strings onto them.
//!
//! Every string goes through the same pipeline before term generation, both at
//! index time and at query time. If the two sides disagree on a single
//! character, the n-grams stop lining up and recall quietly drops, so the
//! cleaner is the only place that knows how to do it.
//!
//! The pipeline:
//!
//! 1. Strip diacritics (NFD, drop combining marks) with the
//!    `unicode-normalization` feature, so "Citroën" meets "citroen"
//! 2. Lowercase
//! 3. Replace every character outside the alphabet with the pad character
//! 4. Collapse runs of pad into one
//! 5. Trim pads and add the wrap markers
//!
//! ```text
//! "Nissan  March!"  →  "nissan$march$"  →  "$nissan$march$"
//! ```

use std::collections::BTreeSet;

#[cfg(feature = "unicode-normalization")]
use unicode_normalization::UnicodeNormalization;

/// Characters that survive cleaning.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Alphabet {
    chars: BTreeSet<char>,
}

impl Alphabet {
    /// Build an alphabet from explicit characters.
    pub fn new(chars: impl IntoIterator<Item = char>) -> Self {
        Self {
            chars: chars.into_iter().collect(),
        }
    }

    /// Build an alphabet from preset names and literal strings.
    ///
    /// Known presets are `english`, `russian` and `numbers`. Anything else is
    /// taken literally and each of its characters joins the alphabet, which is
    /// how wrap markers like `"$"` get in.
    ///
    /// ```ignore
    /// let alphabet = Alphabet::from_names(["english", "numbers", "$"]);
    /// assert!(alphabet.contains('q') && alphabet.contains('$'));
    /// ```
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut chars = BTreeSet::new();
        for name in names {
            match name.as_ref() {
                "english" => chars.extend('a'..='z'),
                "russian" => {
                    chars.extend('а'..='я');
                    chars.insert('ё');
                }
                "numbers" => chars.extend('0'..='9'),
                literal => chars.extend(literal.chars()),
            }
        }
        Self { chars }
    }

    #[inline]
    pub fn contains(&self, c: char) -> bool {
        self.chars.contains(&c)
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    pub fn chars(&self) -> impl Iterator<Item = char> + '_ {
        self.chars.iter().copied()
    }
}

/// Maps raw strings onto an alphabet and adds wrap markers.
#[derive(Debug, Clone)]
pub struct Cleaner {
    alphabet: Alphabet,
    pad: char,
    left_wrap: String,
    right_wrap: String,
}

impl Cleaner {
    pub fn new(alphabet: Alphabet, pad: char, left_wrap: &str, right_wrap: &str) -> Self {
        Self {
            alphabet,
            pad,
            left_wrap: left_wrap.to_string(),
            right_wrap: right_wrap.to_string(),
        }
    }

    pub fn pad(&self) -> char {
        self.pad
    }

    /// Normalize, lowercase and pad out unknown characters.
    ///
    /// Runs of pad collapse to one, so "nissan  march" and "nissan march"
    /// produce the same terms. Leading and trailing pads are kept here;
    /// the wrap functions decide what to do with them.
    pub fn clean(&self, word: &str) -> String {
        let mut out = String::with_capacity(word.len());
        let mut last_was_pad = false;

        for c in normalize(word).chars() {
            let is_pad = c == self.pad || !self.alphabet.contains(c);
            if is_pad && last_was_pad {
                continue;
            }
            last_was_pad = is_pad;
            out.push(if is_pad { self.pad } else { c });
        }

        out
    }

    /// Clean and wrap on both sides. Used for dictionary entries and fuzzy queries.
    pub fn wrap(&self, word: &str) -> String {
        let cleaned = self.clean(word);
        let core = cleaned.trim_matches(self.pad);
        let len = self.left_wrap.len() + core.len() + self.right_wrap.len();
        let mut out = String::with_capacity(len);
        out.push_str(&self.left_wrap);
        out.push_str(core);
        out.push_str(&self.right_wrap);
        out
    }

    /// Clean and wrap on the left only. Used for autocomplete prefixes.
    ///
    /// A prefix hasn't ended yet, so its last term must not carry the right
    /// marker: "$nis" should match "$nissan$", and "is$" never would.
    /// A trailing pad is kept because it means the user finished a word.
    pub fn left_wrap(&self, word: &str) -> String {
        let cleaned = self.clean(word);
        let core = cleaned.trim_start_matches(self.pad);
        let mut out = String::with_capacity(self.left_wrap.len() + core.len());
        out.push_str(&self.left_wrap);
        out.push_str(core);
        out
    }
}

/// Strip diacritics and lowercase.
///
/// # Algorithm (with unicode-normalization feature)
///
/// 1. NFD normalize (decompose characters into base + combining marks)
/// 2. Filter out combining marks
/// 3. Lowercase
///
/// Without the feature only step 3 runs; input is assumed pre-normalized.
#[cfg(feature = "unicode-normalization")]
pub fn normalize(value: &str) -> String {
    value
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .to_lowercase()
}

#[cfg(not(feature = "unicode-normalization"))]
pub fn normalize(value: &str) -> String {
    value.to_lowercase()
}

/// Combining marks (Unicode category Mn) in the blocks product names hit.
#[cfg(feature = "unicode-normalization")]
fn is_combining_mark(c: char) -> bool {
    matches!(c,
        '\u{0300}'..='\u{036F}' |  // Combining Diacritical Marks
        '\u{1DC0}'..='\u{1DFF}' |  // Combining Diacritical Marks Supplement
        '\u{20D0}'..='\u{20FF}' |  // Combining Diacritical Marks for Symbols
        '\u{FE20}'..='\u{FE2F}'    // Combining Half Marks
    )
}
