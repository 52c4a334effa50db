// src/utils/text.rs

//! Text cleanup and number extraction.

use std::sync::LazyLock;

use regex::Regex;

static DIGIT_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+").expect("digit pattern is valid"));

static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s{2,}").expect("whitespace pattern is valid"));

/// Replace every run of two or more whitespace characters with one space.
///
/// Single whitespace characters are left as they are, so a lone newline
/// survives. Applying this twice gives the same result as applying it once.
pub fn collapse_whitespace(text: &str) -> String {
    WHITESPACE_RUN.replace_all(text, " ").into_owned()
}

/// All runs of digits in `text`, in order.
pub fn digit_runs(text: &str) -> Vec<&str> {
    DIGIT_RUN.find_iter(text).map(|m| m.as_str()).collect()
}

/// The first run of digits in `text` parsed as a count.
pub fn first_number(text: &str) -> Option<u32> {
    DIGIT_RUN
        .find(text)
        .and_then(|m| m.as_str().parse().ok())
}

/// Trim and drop empty results.
pub fn non_empty(text: &str) -> Option<String> {
    let trimmed = text.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
