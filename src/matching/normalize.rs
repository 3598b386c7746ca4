// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Text normalization for title comparison.
//!
//! Reduces arbitrary text to a canonical comparable form so that
//! "Don't Stop Believin'" and "dont stop believin" grade as equal.

/// Normalize text to lowercase letters and spaces.
///
/// Lowercases the input, drops every character that is not a lowercase
/// ASCII letter or a space, and trims leading/trailing spaces. Total over
/// all input (the empty string normalizes to the empty string) and
/// idempotent: `normalize(normalize(x)) == normalize(x)`.
pub fn normalize(text: &str) -> String {
    text.chars()
        .flat_map(|c| c.to_lowercase())
        .filter(|c| matches!(c, 'a'..='z' | ' '))
        .collect::<String>()
        .trim()
        .to_string()
}
