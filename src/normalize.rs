//! Text canonicalization applied to every block before classification.

use std::sync::LazyLock;

use regex::Regex;

static HORIZONTAL_WS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\S\n]+").expect("valid horizontal whitespace regex"));

static BLANK_LINES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n{3,}").expect("valid blank line regex"));

/// Canonicalize extracted text.
///
/// Non-breaking spaces become plain spaces, runs of horizontal whitespace
/// collapse to one space, three or more newlines collapse to a blank line,
/// and the result is trimmed.
///
/// ```rust
/// use bilah::normalize;
///
/// assert_eq!(normalize("  Amati\u{a0}\u{a0}gambar\t berikut. \n\n\n\nLalu "), "Amati gambar berikut. \n\nLalu");
/// assert_eq!(normalize(&normalize(" a \n\n\n b ")), normalize(" a \n\n\n b "));
/// ```
#[must_use]
pub fn normalize(text: &str) -> String {
    let text = text.replace('\u{a0}', " ");
    let text = HORIZONTAL_WS.replace_all(&text, " ");
    let text = BLANK_LINES.replace_all(&text, "\n\n");
    text.trim().to_string()
}
