// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Tokenization shared by the index builder and the query engine.
//!
//! Both sides fold case and split on whitespace. Nothing else: no stemming,
//! no stop words, no punctuation stripping. They differ only in the minimum
//! token length:
//!
//! | Side  | Keeps tokens with | Constant                 |
//! |-------|-------------------|--------------------------|
//! | Index | > 2 chars         | [`INDEX_MIN_TOKEN_CHARS`] |
//! | Query | > 1 char          | [`QUERY_MIN_TOKEN_CHARS`] |
//!
//! A two-character query token has no bucket of its own, so it can only match
//! through the prefix scan. Lengths count Unicode scalar values, not bytes.

#[cfg(feature = "fold-diacritics")]
use unicode_normalization::UnicodeNormalization;

/// Shortest token the index builder keeps.
pub const INDEX_MIN_TOKEN_CHARS: usize = 3;

/// Shortest token the query side keeps.
pub const QUERY_MIN_TOKEN_CHARS: usize = 2;

/// Fold a string for matching.
///
/// Lowercase only. With the `fold-diacritics` feature, combining marks are also
/// stripped after NFD decomposition ("Médecin" → "medecin").
#[cfg(not(feature = "fold-diacritics"))]
pub fn fold(value: &str) -> String {
    value.to_lowercase()
}

#[cfg(feature = "fold-diacritics")]
pub fn fold(value: &str) -> String {
    value
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .to_lowercase()
}

/// Combining marks removed by diacritic folding.
#[cfg(feature = "fold-diacritics")]
fn is_combining_mark(c: char) -> bool {
    matches!(c,
        '\u{0300}'..='\u{036F}' |  // Combining Diacritical Marks
        '\u{1DC0}'..='\u{1DFF}' |  // Combining Diacritical Marks Supplement
        '\u{20D0}'..='\u{20FF}' |  // Combining Diacritical Marks for Symbols
        '\u{FE20}'..='\u{FE2F}'    // Combining Half Marks
    )
}

/// Split folded text into whitespace tokens of at least `min_chars` chars.
pub fn tokens_with_min(text: &str, min_chars: usize) -> Vec<String> {
    fold(text)
        .split_whitespace()
        .filter(|token| token.chars().count() >= min_chars)
        .map(str::to_string)
        .collect()
}

/// Tokens a record field contributes to the index.
///
/// ```
/// assert_eq!(dalil::tokenize("Clinique de Carthage"), vec!["clinique", "carthage"]);
/// ```
pub fn tokenize(text: &str) -> Vec<String> {
    tokens_with_min(text, INDEX_MIN_TOKEN_CHARS)
}

/// Tokens a query looks up. Looser than [`tokenize`].
pub fn tokenize_query(query: &str) -> Vec<String> {
    tokens_with_min(query, QUERY_MIN_TOKEN_CHARS)
}

/// Case-insensitive substring test used for label suggestions.
pub fn contains_folded(haystack: &str, folded_needle: &str) -> bool {
    fold(haystack).contains(folded_needle)
}
