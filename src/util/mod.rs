// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! String preparation helpers shared by the builder and the query path.

pub mod normalize;

pub use normalize::{normalize, Alphabet, Cleaner};
