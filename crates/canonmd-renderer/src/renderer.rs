//! Node dispatch and paragraph re-flow.

use std::collections::BTreeSet;

use canonmd_ast::{Document, IndexEntry, Matter, NodeKind, NodeRef, WalkStatus, parse};

use crate::error::RenderError;
use crate::hook::{HookOutcome, RenderHook};
use crate::options::RendererOptions;
use crate::sink::Sink;
use crate::state::RenderState;
use crate::wrap::{indent, wrap};

/// Horizontal rule token.
const RULE: &str = "******";

/// Diagnostics collected during a render pass.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Diagnostics {
    /// Malformed input that was tolerated (e.g. unbalanced lists).
    pub warnings: Vec<String>,
    /// Names of node kinds without a canonical form. Their own markup was
    /// dropped; their children, if any, were still rendered.
    pub skipped: Vec<&'static str>,
}

/// Result of rendering into an owned buffer.
#[derive(Clone, Debug)]
pub struct RenderResult {
    /// Canonical markdown.
    pub markdown: String,
    /// Malformed input that was tolerated.
    pub warnings: Vec<String>,
    /// Node kinds rendered without their own markup.
    pub skipped: Vec<&'static str>,
}

/// Renders a document tree as canonical markdown.
///
/// The renderer itself only holds configuration and the optional
/// [`RenderHook`]; all traversal state lives in a [`RenderPass`] created per
/// document, so one renderer can format any number of documents one after
/// another.
///
/// # Example
///
/// ```
/// use canonmd_renderer::MarkdownRenderer;
///
/// let result = MarkdownRenderer::new()
///     .with_text_width(20)
///     .render_markdown("# Hello\n\n- one two three four five six")?;
/// assert_eq!(result.markdown, "# Hello\n\n*  one two three\n   four five six\n\n");
/// # Ok::<(), canonmd_renderer::RenderError>(())
/// ```
pub struct MarkdownRenderer {
    options: RendererOptions,
    hook: Option<Box<dyn RenderHook>>,
}

impl MarkdownRenderer {
    /// Create a renderer with default options.
    #[must_use]
    pub fn new() -> Self {
        Self {
            options: RendererOptions::default(),
            hook: None,
        }
    }

    /// Replace all options.
    #[must_use]
    pub fn with_options(mut self, options: RendererOptions) -> Self {
        self.options = options;
        self
    }

    /// Set the paragraph wrap width.
    #[must_use]
    pub fn with_text_width(mut self, text_width: usize) -> Self {
        self.options.text_width = text_width;
        self
    }

    /// Install an override hook consulted before every node.
    #[must_use]
    pub fn with_hook<H: RenderHook + 'static>(mut self, hook: H) -> Self {
        self.hook = Some(Box::new(hook));
        self
    }

    /// Current options.
    #[must_use]
    pub fn options(&self) -> &RendererOptions {
        &self.options
    }

    /// Start a pass for an externally driven traversal.
    ///
    /// Callers that walk the tree themselves feed every enter/exit event to
    /// [`RenderPass::render_node`], bracketed by
    /// [`RenderPass::render_header`] and [`RenderPass::render_footer`].
    pub fn pass(&mut self) -> RenderPass<'_> {
        RenderPass {
            options: &self.options,
            hook: &mut self.hook,
            state: RenderState::default(),
            skipped: BTreeSet::new(),
            passthrough_logged: false,
        }
    }

    /// Render a whole document into `sink`.
    pub fn render(
        &mut self,
        doc: &Document,
        sink: &mut dyn Sink,
    ) -> Result<Diagnostics, RenderError> {
        tracing::debug!(
            text_width = self.options.text_width(),
            nodes = doc.len(),
            "Rendering document"
        );
        let mut pass = self.pass();
        pass.render_header(sink, doc)?;
        doc.walk(|node, entering| pass.render_node(sink, node, entering))?;
        pass.render_footer(sink, doc)?;
        sink.flush()?;
        Ok(pass.finish())
    }

    /// Render a whole document into a new string.
    pub fn render_to_string(&mut self, doc: &Document) -> Result<RenderResult, RenderError> {
        let mut markdown = String::with_capacity(4096);
        let diagnostics = self.render(doc, &mut markdown)?;
        Ok(RenderResult {
            markdown,
            warnings: diagnostics.warnings,
            skipped: diagnostics.skipped,
        })
    }

    /// Parse CommonMark text and render it canonically.
    pub fn render_markdown(&mut self, markdown: &str) -> Result<RenderResult, RenderError> {
        let doc = parse(markdown)?;
        self.render_to_string(&doc)
    }
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// State of one render pass over one document.
///
/// Created by [`MarkdownRenderer::pass`] and discarded afterwards; nothing
/// carries over between documents.
pub struct RenderPass<'r> {
    options: &'r RendererOptions,
    hook: &'r mut Option<Box<dyn RenderHook>>,
    state: RenderState,
    skipped: BTreeSet<&'static str>,
    passthrough_logged: bool,
}

impl RenderPass<'_> {
    /// Current left margin in columns.
    #[must_use]
    pub fn indent(&self) -> usize {
        self.state.indent()
    }

    /// Current list nesting depth.
    #[must_use]
    pub fn list_level(&self) -> usize {
        self.state.list_level()
    }

    /// Document-start extension point.
    pub fn render_header(&mut self, sink: &mut dyn Sink, doc: &Document) -> Result<(), RenderError> {
        match self.hook.as_mut() {
            Some(hook) => hook.render_header(sink, doc),
            None => Ok(()),
        }
    }

    /// Document-end extension point.
    pub fn render_footer(&mut self, sink: &mut dyn Sink, doc: &Document) -> Result<(), RenderError> {
        match self.hook.as_mut() {
            Some(hook) => hook.render_footer(sink, doc),
            None => Ok(()),
        }
    }

    /// Handle one enter or exit event.
    pub fn render_node(
        &mut self,
        sink: &mut dyn Sink,
        node: NodeRef<'_>,
        entering: bool,
    ) -> Result<WalkStatus, RenderError> {
        if let Some(hook) = self.hook.as_mut()
            && let HookOutcome::Handled(status) = hook.render_node(sink, node, entering)?
        {
            return Ok(status);
        }

        match node.kind() {
            NodeKind::Document | NodeKind::Softbreak | NodeKind::Hardbreak => {}
            NodeKind::Text(literal) => {
                // Literal text is written unescaped.
                if entering {
                    sink.write_str(literal)?;
                }
            }
            NodeKind::Callout => one_of(sink, entering, "<<", ">>")?,
            NodeKind::Emph => one_of(sink, entering, "*", "*")?,
            NodeKind::Strong => one_of(sink, entering, "**", "**")?,
            NodeKind::DocumentMatter(matter) => matter_marker(sink, *matter, entering)?,
            NodeKind::Heading { level } => heading(sink, *level, entering)?,
            NodeKind::HorizontalRule => {
                if entering {
                    sink.emit_newline()?;
                    sink.write_str(RULE)?;
                    sink.emit_newline()?;
                }
            }
            NodeKind::Paragraph => self.paragraph(sink, node, entering)?,
            NodeKind::List { .. } => {
                if entering {
                    self.state.enter_list();
                } else {
                    self.state.exit_list();
                }
            }
            NodeKind::ListItem { ordered } => self.list_item(sink, *ordered, entering)?,
            NodeKind::Index(entry) => {
                if entering {
                    index_entry(sink, entry)?;
                }
            }
            NodeKind::Code(literal) => {
                if entering {
                    sink.write_str("`")?;
                    sink.write_str(literal)?;
                    sink.write_str("`")?;
                }
            }
            kind @ (NodeKind::Title
            | NodeKind::Bibliography
            | NodeKind::BibliographyItem
            | NodeKind::DocumentIndex
            | NodeKind::IndexLetter
            | NodeKind::IndexItem
            | NodeKind::IndexSubItem
            | NodeKind::IndexLink
            | NodeKind::Del
            | NodeKind::Citation(_)
            | NodeKind::HtmlSpan(_)
            | NodeKind::HtmlBlock(_)
            | NodeKind::CodeBlock { .. }
            | NodeKind::Caption
            | NodeKind::CaptionFigure
            | NodeKind::Table
            | NodeKind::TableCell
            | NodeKind::TableHeader
            | NodeKind::TableBody
            | NodeKind::TableRow
            | NodeKind::TableFooter
            | NodeKind::BlockQuote
            | NodeKind::Aside
            | NodeKind::CrossReference(_)
            | NodeKind::Link { .. }
            | NodeKind::Math(_)
            | NodeKind::Image { .. }
            | NodeKind::MathBlock(_)
            | NodeKind::Subscript
            | NodeKind::Superscript) => {
                if entering {
                    self.skipped.insert(kind.name());
                }
            }
        }
        Ok(WalkStatus::GoToNext)
    }

    /// Consume the pass and return its diagnostics.
    #[must_use]
    pub fn finish(mut self) -> Diagnostics {
        Diagnostics {
            warnings: self.state.take_warnings(),
            skipped: self.skipped.into_iter().collect(),
        }
    }

    /// Buffer paragraph content on enter, re-flow it on exit.
    fn paragraph(
        &mut self,
        sink: &mut dyn Sink,
        node: NodeRef<'_>,
        entering: bool,
    ) -> Result<(), RenderError> {
        if entering {
            let start = sink.as_markable().map(|buffer| buffer.mark());
            if start.is_none() && !self.passthrough_logged {
                tracing::warn!("Sink is not markable, paragraphs pass through without re-flow");
                self.passthrough_logged = true;
            }
            self.state.open_paragraph(start);
            return Ok(());
        }

        let Some(start) = self.state.close_paragraph() else {
            return Ok(());
        };
        let Some(buffer) = sink.as_markable() else {
            return Ok(());
        };
        let span = buffer.take_since(start);

        let margin = self.state.indent();
        let wrapped = wrap(&span, self.state.wrap_width(self.options.text_width()));
        let indented = indent(&wrapped, margin);

        // The list marker already occupies the first line's margin. Later
        // paragraphs of the item keep their margin, otherwise a re-parse
        // would lift them out of the item.
        if follows_list_marker(node) {
            sink.write_str(indented.get(margin..).unwrap_or_default())?;
        } else {
            sink.write_str(&indented)?;
        }

        if node.next_sibling().is_some() {
            sink.emit_newline()?;
            sink.emit_newline()?;
        }
        Ok(())
    }

    fn list_item(
        &mut self,
        sink: &mut dyn Sink,
        ordered: bool,
        entering: bool,
    ) -> Result<(), RenderError> {
        if !entering {
            sink.emit_newline()?;
            sink.emit_newline()?;
            return Ok(());
        }
        sink.write_str(&" ".repeat(self.state.marker_indent()))?;
        sink.write_str(if ordered { "1. " } else { "*  " })?;
        Ok(())
    }
}

/// Whether `node` opens a list item, so its first line continues the marker.
fn follows_list_marker(node: NodeRef<'_>) -> bool {
    node.parent().is_some_and(|parent| {
        matches!(parent.kind(), NodeKind::ListItem { .. })
            && parent.children().next().map(NodeRef::id) == Some(node.id())
    })
}

/// Write `enter` on enter and `exit` on exit.
fn one_of(sink: &mut dyn Sink, entering: bool, enter: &str, exit: &str) -> Result<(), RenderError> {
    sink.write_str(if entering { enter } else { exit })?;
    Ok(())
}

fn matter_marker(sink: &mut dyn Sink, matter: Matter, entering: bool) -> Result<(), RenderError> {
    if !entering {
        return Ok(());
    }
    sink.write_str(match matter {
        Matter::Front => "{frontmatter}\n",
        Matter::Main => "{mainmatter}\n",
        Matter::Back => "{backmatter}\n",
    })?;
    Ok(())
}

fn heading(sink: &mut dyn Sink, level: u8, entering: bool) -> Result<(), RenderError> {
    if !entering {
        sink.emit_newline()?;
        sink.emit_newline()?;
        return Ok(());
    }
    sink.write_str(&"#".repeat(usize::from(level)))?;
    sink.write_str(" ")?;
    Ok(())
}

fn index_entry(sink: &mut dyn Sink, entry: &IndexEntry) -> Result<(), RenderError> {
    sink.write_str("(!")?;
    if entry.primary {
        sink.write_str("!")?;
    }
    sink.write_str(&entry.item)?;
    if let Some(subitem) = entry.subitem.as_deref().filter(|s| !s.is_empty()) {
        sink.write_str(", ")?;
        sink.write_str(subitem)?;
    }
    sink.write_str(")")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::StreamSink;
    use canonmd_ast::DocumentBuilder;
    use pretty_assertions::assert_eq;

    fn text(s: &str) -> NodeKind {
        NodeKind::Text(s.to_owned())
    }

    fn render(doc: &Document, width: usize) -> String {
        MarkdownRenderer::new()
            .with_text_width(width)
            .render_to_string(doc)
            .unwrap()
            .markdown
    }

    fn list_with_item(builder: &mut DocumentBuilder, ordered: bool, body: &str) {
        builder
            .open(NodeKind::List { ordered })
            .open(NodeKind::ListItem { ordered })
            .open(NodeKind::Paragraph)
            .text(body);
        builder.close().unwrap().close().unwrap().close().unwrap();
    }

    #[test]
    fn test_top_level_paragraph_wraps() {
        let mut builder = DocumentBuilder::new();
        builder.open(NodeKind::Paragraph).text("one two three four five");
        builder.close().unwrap();
        let out = render(&builder.finish().unwrap(), 20);

        let lines: Vec<&str> = out.split('\n').collect();
        assert_eq!(lines.len(), 2);
        assert!(lines.iter().all(|line| !line.is_empty() && line.len() <= 20));
        assert_eq!(out.split_whitespace().count(), 5);
    }

    #[test]
    fn test_paragraph_separated_only_when_followed() {
        let mut builder = DocumentBuilder::new();
        builder.open(NodeKind::Paragraph).text("alpha");
        builder.close().unwrap();
        builder.open(NodeKind::Paragraph).text("beta");
        builder.close().unwrap();
        assert_eq!(render(&builder.finish().unwrap(), 20), "alpha\n\nbeta");
    }

    #[test]
    fn test_unordered_item_strips_first_line_indent() {
        let mut builder = DocumentBuilder::new();
        list_with_item(&mut builder, false, "text");
        assert_eq!(render(&builder.finish().unwrap(), 20), "*  text\n\n");
    }

    #[test]
    fn test_ordered_item_marker() {
        let mut builder = DocumentBuilder::new();
        list_with_item(&mut builder, true, "first");
        assert_eq!(render(&builder.finish().unwrap(), 20), "1. first\n\n");
    }

    #[test]
    fn test_nested_list_indents_marker_and_continuation() {
        let mut builder = DocumentBuilder::new();
        builder
            .open(NodeKind::List { ordered: false })
            .open(NodeKind::ListItem { ordered: false })
            .open(NodeKind::Paragraph)
            .text("outer");
        builder.close().unwrap();
        list_with_item(&mut builder, false, "alpha beta gamma");
        builder.close().unwrap().close().unwrap();

        assert_eq!(
            render(&builder.finish().unwrap(), 20),
            "*  outer\n\n   *  alpha beta\n      gamma\n\n"
        );
    }

    #[test]
    fn test_later_paragraphs_in_item_keep_margin() {
        let mut builder = DocumentBuilder::new();
        builder
            .open(NodeKind::List { ordered: true })
            .open(NodeKind::ListItem { ordered: true })
            .open(NodeKind::Paragraph)
            .text("first");
        builder.close().unwrap();
        builder.open(NodeKind::Paragraph).text("second one");
        builder.close().unwrap().close().unwrap().close().unwrap();

        assert_eq!(
            render(&builder.finish().unwrap(), 9),
            "1. first\n\n   second\n   one\n\n"
        );
    }

    #[test]
    fn test_frontmatter_and_heading() {
        let mut builder = DocumentBuilder::new();
        builder.open(NodeKind::DocumentMatter(Matter::Front));
        builder.close().unwrap();
        builder.open(NodeKind::Heading { level: 2 }).leaf(text("Title"));
        builder.close().unwrap();
        assert_eq!(
            render(&builder.finish().unwrap(), 20),
            "{frontmatter}\n## Title\n\n"
        );
    }

    #[test]
    fn test_all_matter_markers() {
        let mut builder = DocumentBuilder::new();
        for matter in [Matter::Front, Matter::Main, Matter::Back] {
            builder.open(NodeKind::DocumentMatter(matter));
            builder.close().unwrap();
        }
        assert_eq!(
            render(&builder.finish().unwrap(), 20),
            "{frontmatter}\n{mainmatter}\n{backmatter}\n"
        );
    }

    #[test]
    fn test_consecutive_rules_collapse_blank_lines() {
        let mut builder = DocumentBuilder::new();
        builder.leaf(NodeKind::HorizontalRule).leaf(NodeKind::HorizontalRule);
        assert_eq!(
            render(&builder.finish().unwrap(), 20),
            "\n******\n\n******\n"
        );
    }

    #[test]
    fn test_inline_code_verbatim() {
        let mut builder = DocumentBuilder::new();
        builder
            .open(NodeKind::Paragraph)
            .text("see ")
            .leaf(NodeKind::Code("x".to_owned()))
            .text(" now");
        builder.close().unwrap();
        assert_eq!(render(&builder.finish().unwrap(), 20), "see `x` now");
    }

    #[test]
    fn test_inline_delimiters() {
        let mut builder = DocumentBuilder::new();
        builder.open(NodeKind::Paragraph);
        builder.open(NodeKind::Emph).text("a");
        builder.close().unwrap();
        builder.text(" ");
        builder.open(NodeKind::Strong).text("b");
        builder.close().unwrap();
        builder.text(" ");
        builder.open(NodeKind::Callout).text("1");
        builder.close().unwrap().close().unwrap();
        assert_eq!(render(&builder.finish().unwrap(), 80), "*a* **b** <<1>>");
    }

    #[test]
    fn test_index_entries() {
        let mut builder = DocumentBuilder::new();
        builder
            .leaf(NodeKind::Index(IndexEntry {
                primary: true,
                item: "Rust".to_owned(),
                subitem: Some("ownership".to_owned()),
            }))
            .leaf(NodeKind::Index(IndexEntry {
                primary: false,
                item: "Go".to_owned(),
                subitem: Some(String::new()),
            }));
        assert_eq!(
            render(&builder.finish().unwrap(), 80),
            "(!!Rust, ownership)(!Go)"
        );
    }

    #[test]
    fn test_empty_paragraph_renders_nothing() {
        let mut builder = DocumentBuilder::new();
        builder.open(NodeKind::Paragraph);
        builder.close().unwrap();
        assert_eq!(render(&builder.finish().unwrap(), 20), "");
    }

    #[test]
    fn test_empty_paragraph_in_list_item() {
        let mut builder = DocumentBuilder::new();
        list_with_item(&mut builder, false, "");
        assert_eq!(render(&builder.finish().unwrap(), 20), "*  \n\n");
    }

    #[test]
    fn test_no_op_kinds_are_reported() {
        let mut builder = DocumentBuilder::new();
        builder.leaf(NodeKind::CodeBlock {
            info: "rust".to_owned(),
            literal: "fn main() {}".to_owned(),
        });
        builder.open(NodeKind::BlockQuote).open(NodeKind::Paragraph).text("quoted");
        builder.close().unwrap().close().unwrap();
        let result = MarkdownRenderer::new()
            .render_to_string(&builder.finish().unwrap())
            .unwrap();
        assert_eq!(result.markdown, "quoted");
        assert_eq!(result.skipped, vec!["blockquote", "code block"]);
    }

    #[test]
    fn test_unbalanced_list_exit_is_clamped() {
        let mut builder = DocumentBuilder::new();
        builder.open(NodeKind::List { ordered: false });
        builder.close().unwrap();
        let doc = builder.finish().unwrap();
        let list = doc.root().children().next().unwrap();

        let mut renderer = MarkdownRenderer::new();
        let mut pass = renderer.pass();
        let mut out = String::new();
        pass.render_node(&mut out, list, false).unwrap();
        assert_eq!(pass.indent(), 0);
        pass.render_node(&mut out, list, true).unwrap();
        assert_eq!(pass.indent(), 3);
        assert_eq!(pass.list_level(), 1);
        pass.render_node(&mut out, list, false).unwrap();
        assert_eq!(pass.indent(), 0);

        let diagnostics = pass.finish();
        assert_eq!(diagnostics.warnings.len(), 1);
    }

    #[test]
    fn test_stream_sink_passes_paragraphs_through() {
        let mut builder = DocumentBuilder::new();
        builder.open(NodeKind::Paragraph).text("one   two");
        builder.close().unwrap();
        builder.open(NodeKind::Heading { level: 1 }).text("H");
        builder.close().unwrap();
        let doc = builder.finish().unwrap();

        let mut sink = StreamSink::new(Vec::new());
        MarkdownRenderer::new()
            .with_text_width(5)
            .render(&doc, &mut sink)
            .unwrap();
        assert_eq!(
            String::from_utf8(sink.into_inner()).unwrap(),
            "one   two# H\n\n"
        );
    }

    #[test]
    fn test_state_does_not_leak_between_documents() {
        let mut builder = DocumentBuilder::new();
        list_with_item(&mut builder, false, "a");
        let doc = builder.finish().unwrap();

        let mut renderer = MarkdownRenderer::new().with_text_width(20);
        let first = renderer.render_to_string(&doc).unwrap().markdown;
        let second = renderer.render_to_string(&doc).unwrap().markdown;
        assert_eq!(first, second);
    }

    struct Upper;

    impl RenderHook for Upper {
        fn render_node(
            &mut self,
            sink: &mut dyn Sink,
            node: NodeRef<'_>,
            entering: bool,
        ) -> Result<HookOutcome, RenderError> {
            match node.kind() {
                NodeKind::Text(literal) if entering => {
                    sink.write_str(&literal.to_uppercase())?;
                    Ok(HookOutcome::Handled(WalkStatus::GoToNext))
                }
                _ => Ok(HookOutcome::PassThrough),
            }
        }

        fn render_header(&mut self, sink: &mut dyn Sink, doc: &Document) -> Result<(), RenderError> {
            sink.write_str(&format!("<!-- {} nodes -->\n", doc.len()))?;
            Ok(())
        }

        fn render_footer(&mut self, sink: &mut dyn Sink, _doc: &Document) -> Result<(), RenderError> {
            sink.emit_newline()?;
            sink.write_str("<!-- end -->")?;
            Ok(())
        }
    }

    #[test]
    fn test_hook_overrides_and_lifecycle() {
        let mut builder = DocumentBuilder::new();
        builder.open(NodeKind::Heading { level: 1 }).text("shout");
        builder.close().unwrap();
        let doc = builder.finish().unwrap();

        let result = MarkdownRenderer::new()
            .with_hook(Upper)
            .render_to_string(&doc)
            .unwrap();
        assert_eq!(result.markdown, "<!-- 3 nodes -->\n# SHOUT\n\n<!-- end -->");
    }

    struct SkipLists;

    impl RenderHook for SkipLists {
        fn render_node(
            &mut self,
            _sink: &mut dyn Sink,
            node: NodeRef<'_>,
            entering: bool,
        ) -> Result<HookOutcome, RenderError> {
            match node.kind() {
                NodeKind::List { .. } if entering => {
                    Ok(HookOutcome::Handled(WalkStatus::SkipChildren))
                }
                NodeKind::List { .. } => Ok(HookOutcome::Handled(WalkStatus::GoToNext)),
                _ => Ok(HookOutcome::PassThrough),
            }
        }
    }

    #[test]
    fn test_hook_status_reaches_walker() {
        let mut builder = DocumentBuilder::new();
        list_with_item(&mut builder, false, "hidden");
        builder.open(NodeKind::Paragraph).text("shown");
        builder.close().unwrap();

        let result = MarkdownRenderer::new()
            .with_hook(SkipLists)
            .render_to_string(&builder.finish().unwrap())
            .unwrap();
        assert_eq!(result.markdown, "shown");
        assert!(result.warnings.is_empty());
    }
}
