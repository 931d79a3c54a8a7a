//! Line wrapping and indentation for paragraph re-flow.

use textwrap::{Options, WordSeparator, WordSplitter, WrapAlgorithm};

/// Wrap `text` into lines no wider than `width` display columns.
///
/// Words are split on any whitespace, so existing line breaks are
/// re-flowed. Words are never broken or hyphenated; a word wider than
/// `width` occupies a line of its own. Empty or blank input yields an empty
/// string.
///
/// # Examples
///
/// ```
/// use canonmd_renderer::wrap;
///
/// assert_eq!(wrap("a  b\nc", 80), "a b c");
/// assert_eq!(wrap("", 80), "");
/// ```
#[must_use]
pub fn wrap(text: &str, width: usize) -> String {
    let words: Vec<&str> = text.split_whitespace().collect();
    if words.is_empty() {
        return String::new();
    }
    let joined = words.join(" ");
    let options = Options::new(width.max(1))
        .break_words(false)
        .word_separator(WordSeparator::AsciiSpace)
        .word_splitter(WordSplitter::NoHyphenation)
        .wrap_algorithm(WrapAlgorithm::new_optimal_fit());
    textwrap::wrap(&joined, options).join("\n")
}

/// Prefix every non-empty line of `text` with `width` spaces.
///
/// # Examples
///
/// ```
/// use canonmd_renderer::indent;
///
/// assert_eq!(indent("a\n\nb", 2), "  a\n\n  b");
/// ```
#[must_use]
pub fn indent(text: &str, width: usize) -> String {
    if width == 0 {
        return text.to_owned();
    }
    let prefix = " ".repeat(width);
    let mut out = String::with_capacity(text.len() + prefix.len());
    let mut at_line_start = true;
    for c in text.chars() {
        if at_line_start && c != '\n' {
            out.push_str(&prefix);
        }
        out.push(c);
        at_line_start = c == '\n';
    }
    out
}
