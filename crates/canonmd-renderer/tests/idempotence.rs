//! Render → parse → render must be a fixed point.

use canonmd_renderer::{MarkdownRenderer, RenderResult};
use pretty_assertions::assert_eq;

const SAMPLES: &[(&str, usize)] = &[
    (
        "# Title\n\nA paragraph with *emphasis* and **strong** text that is long enough to wrap \
         across several lines at forty columns.\n\n- first item\n- second item with `code`\n\n\
         1. one\n2. two\n\n***\n\nClosing paragraph.",
        40,
    ),
    (
        "- outer item\n  - inner item that is fairly long and will need wrapping at this width\n\
         - another",
        30,
    ),
    (
        "## Setup\nSome text\nthat was hard wrapped\nat odd places by hand.\n\nSecond   paragraph,\n\
         spaced   oddly.\n",
        24,
    ),
    (
        "1. ordered\n\n   continued paragraph that should wrap under the marker column\n",
        28,
    ),
    (
        "Intro with a [link](https://example.com) and ~~struck~~ words.\n\n> quoted\n",
        50,
    ),
    ("Line one ends here  \nline two\\\nline three", 20),
];

fn render(markdown: &str, width: usize) -> RenderResult {
    MarkdownRenderer::new()
        .with_text_width(width)
        .render_markdown(markdown)
        .unwrap()
}

fn canonical(markdown: &str, width: usize) -> String {
    render(markdown, width).markdown
}

/// Alphanumeric words in order. Bare numbers are list markers and
/// renumbering them is allowed.
fn words(text: &str) -> Vec<&str> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|word| !word.is_empty() && !word.chars().all(|c| c.is_ascii_digit()))
        .collect()
}

#[test]
fn test_rendering_is_idempotent() {
    for &(source, width) in SAMPLES {
        let first = canonical(source, width);
        let second = canonical(&first, width);
        assert_eq!(first, second, "source: {source:?}");
    }
}

#[test]
fn test_output_never_has_triple_newlines() {
    for &(source, width) in SAMPLES {
        let out = canonical(source, width);
        assert!(!out.contains("\n\n\n"), "output: {out:?}");
    }
}

#[test]
fn test_lines_fit_text_width() {
    for &(source, width) in SAMPLES {
        let out = canonical(source, width);
        for line in out.lines() {
            assert!(
                line.chars().count() <= width,
                "line {line:?} exceeds {width} columns"
            );
        }
    }
}

#[test]
fn test_words_survive_unless_markup_is_reported() {
    for &(source, width) in SAMPLES {
        let result = render(source, width);
        if result.skipped.is_empty() {
            assert_eq!(words(&result.markdown), words(source), "source: {source:?}");
        }
    }
}

#[test]
fn test_lost_link_destination_is_reported() {
    let result = render(SAMPLES[4].0, SAMPLES[4].1);
    assert_ne!(words(&result.markdown), words(SAMPLES[4].0));
    assert_eq!(result.skipped, vec!["blockquote", "link", "strikethrough"]);
}

#[test]
fn test_hard_breaks_keep_words_apart() {
    assert_eq!(
        canonical(SAMPLES[5].0, SAMPLES[5].1),
        "Line one ends here\nline two line three"
    );
    assert_eq!(canonical("alpha  \nbeta\\\ngamma", 80), "alpha beta gamma");
}

#[test]
fn test_nested_list_layout() {
    let out = canonical(SAMPLES[1].0, SAMPLES[1].1);
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines[0], "*  outer item");
    assert_eq!(lines[1], "");
    assert!(lines[2].starts_with("   *  inner"));
    assert!(lines[3].starts_with("      ") && !lines[3].starts_with("       "));
    assert!(out.ends_with("*  another\n\n"));
}

#[test]
fn test_hard_wrapped_source_is_reflowed() {
    let out = canonical(SAMPLES[2].0, SAMPLES[2].1);
    assert!(out.starts_with("## Setup\n\nSome text that was hard\n"));
    assert!(out.ends_with("Second paragraph, spaced\noddly."));
}
