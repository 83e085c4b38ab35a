//! Word tokenization shared by every document format.

use regex::Regex;
use std::sync::LazyLock;

/// A word is a maximal run of Unicode alphanumerics or underscores.
static WORD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\w+").unwrap());

static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Non-greedy so adjacent tags are removed one at a time; `(?s)` lets a tag span lines.
static MARKUP_TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)<.*?>").unwrap());

/// Lowercase `text` and split it into word tokens.
///
/// Punctuation and whitespace are delimiters and never appear in the output.
pub fn words(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    WORD.find_iter(&lowered)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Collapse whitespace runs (non-breaking spaces included) to one space and trim.
///
/// Used on OCR output, where `<` and `>` are ordinary characters.
pub fn collapse_whitespace(text: &str) -> String {
    WHITESPACE.replace_all(text, " ").trim().to_string()
}

/// Collapse whitespace runs, strip markup tags and trim.
///
/// Used on PDF text-layer output before measuring or tokenizing it.
pub fn clean_markup(text: &str) -> String {
    let collapsed = WHITESPACE.replace_all(text, " ");
    let stripped = MARKUP_TAG.replace_all(&collapsed, "");
    stripped.trim().to_string()
}
