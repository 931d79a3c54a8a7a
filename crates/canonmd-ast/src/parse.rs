//! Builds a [`Document`] from CommonMark text via pulldown-cmark.
//!
//! The adapter normalizes a few event-stream details so that the renderer
//! sees the same tree shape for equivalent sources:
//!
//! - Soft breaks become `"\n"` inside the surrounding text literal.
//! - Inline content directly inside a list item (tight lists) is wrapped in
//!   an implicit paragraph, so tight and loose items re-flow alike.
//! - Text inside code blocks, HTML blocks and metadata blocks is collected
//!   into the block's literal instead of becoming text nodes.

use pulldown_cmark::{CodeBlockKind, Event, HeadingLevel, MetadataBlockKind, Options, Parser, Tag};

use crate::builder::DocumentBuilder;
use crate::error::AstError;
use crate::node::NodeKind;
use crate::tree::Document;

/// Parser options used by [`parse`].
#[must_use]
pub fn parser_options() -> Options {
    Options::ENABLE_TABLES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TASKLISTS
        | Options::ENABLE_GFM
}

/// Parse CommonMark text with [`parser_options`].
pub fn parse(markdown: &str) -> Result<Document, AstError> {
    parse_with_options(markdown, parser_options())
}

/// Parse CommonMark text with explicit pulldown-cmark options.
pub fn parse_with_options(markdown: &str, options: Options) -> Result<Document, AstError> {
    let mut sink = TreeSink::default();
    for event in Parser::new_ext(markdown, options) {
        sink.process_event(event)?;
    }
    sink.builder.finish()
}

#[derive(Default)]
struct TreeSink {
    builder: DocumentBuilder,
    /// Ordering flag of each open list.
    lists: Vec<bool>,
    /// One entry per open node; `true` for implicit paragraphs.
    open: Vec<bool>,
}

impl TreeSink {
    fn process_event(&mut self, event: Event<'_>) -> Result<(), AstError> {
        match event {
            Event::Start(tag) => self.start_tag(tag)?,
            Event::End(_) => {
                self.close_implicit_paragraph()?;
                if let NodeKind::List { .. } = self.builder.current_kind() {
                    self.lists.pop();
                }
                self.builder.close()?;
                self.open.pop();
            }
            Event::Text(text) => {
                if let Some(literal) = self.builder.current_kind_mut().literal_mut() {
                    literal.push_str(&text);
                } else {
                    self.ensure_paragraph();
                    self.builder.text(&text);
                }
            }
            // Both breaks become whitespace in the text so re-flow keeps
            // the words apart.
            Event::SoftBreak | Event::HardBreak => self.line_break(),
            Event::Code(code) => self.inline(NodeKind::Code(code.into_string())),
            Event::InlineMath(math) => self.inline(NodeKind::Math(math.into_string())),
            Event::DisplayMath(math) => self.inline(NodeKind::MathBlock(math.into_string())),
            Event::InlineHtml(html) => self.inline(NodeKind::HtmlSpan(html.into_string())),
            Event::FootnoteReference(label) => {
                self.inline(NodeKind::CrossReference(label.into_string()));
            }
            Event::Html(html) => {
                if let Some(literal) = self.builder.current_kind_mut().literal_mut() {
                    literal.push_str(&html);
                } else {
                    self.close_implicit_paragraph()?;
                    self.builder.leaf(NodeKind::HtmlBlock(html.into_string()));
                }
            }
            Event::Rule => {
                self.close_implicit_paragraph()?;
                self.builder.leaf(NodeKind::HorizontalRule);
            }
            // Checkbox state has no canonical form; the item text is kept.
            Event::TaskListMarker(_) => {}
        }
        Ok(())
    }

    fn start_tag(&mut self, tag: Tag<'_>) -> Result<(), AstError> {
        let inline = matches!(
            tag,
            Tag::Emphasis
                | Tag::Strong
                | Tag::Strikethrough
                | Tag::Superscript
                | Tag::Subscript
                | Tag::Link { .. }
                | Tag::Image { .. }
        );
        if inline {
            self.ensure_paragraph();
        } else {
            self.close_implicit_paragraph()?;
        }

        let kind = match tag {
            Tag::Paragraph => NodeKind::Paragraph,
            Tag::Heading { level, .. } => NodeKind::Heading {
                level: heading_level_to_num(level),
            },
            Tag::BlockQuote(_) => NodeKind::BlockQuote,
            Tag::CodeBlock(kind) => NodeKind::CodeBlock {
                info: match kind {
                    CodeBlockKind::Fenced(info) => info.into_string(),
                    CodeBlockKind::Indented => String::new(),
                },
                literal: String::new(),
            },
            Tag::HtmlBlock => NodeKind::HtmlBlock(String::new()),
            Tag::List(start) => {
                self.lists.push(start.is_some());
                NodeKind::List {
                    ordered: start.is_some(),
                }
            }
            Tag::Item => NodeKind::ListItem {
                ordered: self.lists.last().copied().unwrap_or(false),
            },
            Tag::FootnoteDefinition(_)
            | Tag::DefinitionList
            | Tag::DefinitionListTitle
            | Tag::DefinitionListDefinition => NodeKind::Aside,
            Tag::Table(_) => NodeKind::Table,
            Tag::TableHead => NodeKind::TableHeader,
            Tag::TableRow => NodeKind::TableRow,
            Tag::TableCell => NodeKind::TableCell,
            Tag::Emphasis => NodeKind::Emph,
            Tag::Strong => NodeKind::Strong,
            Tag::Strikethrough => NodeKind::Del,
            Tag::Superscript => NodeKind::Superscript,
            Tag::Subscript => NodeKind::Subscript,
            Tag::Link {
                dest_url, title, ..
            } => NodeKind::Link {
                destination: dest_url.into_string(),
                title: title.into_string(),
            },
            Tag::Image {
                dest_url, title, ..
            } => NodeKind::Image {
                destination: dest_url.into_string(),
                title: title.into_string(),
            },
            Tag::MetadataBlock(kind) => NodeKind::CodeBlock {
                info: match kind {
                    MetadataBlockKind::YamlStyle => "yaml".to_owned(),
                    MetadataBlockKind::PlusesStyle => "toml".to_owned(),
                },
                literal: String::new(),
            },
        };
        self.builder.open(kind);
        self.open.push(false);
        Ok(())
    }

    fn inline(&mut self, kind: NodeKind) {
        self.ensure_paragraph();
        self.builder.leaf(kind);
    }

    fn line_break(&mut self) {
        self.ensure_paragraph();
        // Headings are written on a single line.
        let separator = if let NodeKind::Heading { .. } = self.builder.current_kind() {
            " "
        } else {
            "\n"
        };
        self.builder.text(separator);
    }

    /// Open an implicit paragraph when inline content lands directly in a
    /// list item.
    fn ensure_paragraph(&mut self) {
        if let NodeKind::ListItem { .. } = self.builder.current_kind() {
            self.builder.open(NodeKind::Paragraph);
            self.open.push(true);
        }
    }

    fn close_implicit_paragraph(&mut self) -> Result<(), AstError> {
        if self.open.last() == Some(&true) {
            self.builder.close()?;
            self.open.pop();
        }
        Ok(())
    }
}

/// Convert heading level enum to number (1-6).
fn heading_level_to_num(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}
