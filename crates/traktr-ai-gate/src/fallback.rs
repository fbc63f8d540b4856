// SPDX-FileCopyrightText: 2026 Traktr Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Local rewrite used when the AI gate is unavailable.
//!
//! Regex passes only: expand common field shorthand, collapse whitespace,
//! capitalise the first letter and make sure the text ends with
//! punctuation. Non-empty input never produces empty output.

use std::sync::LazyLock;

use regex::Regex;

/// Shown instead of a preview when the draft is blank.
pub const EMPTY_PLACEHOLDER: &str = "No update entered.";

/// Shorthand expansions, applied in order (`w/o` before `w/`).
static SHORTHAND: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    vec![
        (Regex::new(r"(?i)\bw/o\b").unwrap(), "without"),
        (Regex::new(r"(?i)\bw/\s*").unwrap(), "with "),
        (Regex::new(r"(?i)\bb/c\b").unwrap(), "because"),
        (Regex::new(r"(?i)\b(?:pls|plz)\b").unwrap(), "please"),
        (Regex::new(r"(?i)\b(?:tmrw|tmw|tmr)\b").unwrap(), "tomorrow"),
        (Regex::new(r"(?i)\basap\b").unwrap(), "as soon as possible"),
        (Regex::new(r"(?i)\bapprox\b\.?").unwrap(), "approximately"),
    ]
});

static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Space before punctuation: "done , thanks" -> "done, thanks".
static SPACE_BEFORE_PUNCT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+([,.;:!?])").unwrap());

/// Rewrites `input` into a tidy sentence without any network call.
pub fn local_rewrite(input: &str) -> String {
    let mut text = input.to_string();
    for (pattern, replacement) in SHORTHAND.iter() {
        text = pattern.replace_all(&text, *replacement).into_owned();
    }
    text = WHITESPACE.replace_all(&text, " ").into_owned();
    text = SPACE_BEFORE_PUNCT.replace_all(&text, "$1").into_owned();

    let text = text.trim();
    if text.is_empty() {
        return EMPTY_PLACEHOLDER.to_string();
    }

    let mut chars = text.chars();
    let mut out: String = match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => return EMPTY_PLACEHOLDER.to_string(),
    };
    if !out.ends_with(['.', '!', '?']) {
        out.push('.');
    }
    out
}
