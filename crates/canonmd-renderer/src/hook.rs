//! Caller-supplied rendering overrides.

use canonmd_ast::{Document, NodeRef, WalkStatus};

use crate::error::RenderError;
use crate::sink::Sink;

/// Result of offering a node to a [`RenderHook`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HookOutcome {
    /// The hook did not handle the node; the renderer's own handling runs.
    PassThrough,
    /// The hook rendered the node; the renderer skips it for this event and
    /// returns the given status to the walker.
    Handled(WalkStatus),
}

/// Override strategy consulted before the renderer's own dispatch.
///
/// Hooks are offered every enter and exit event and may claim any of them.
/// The header and footer methods run once per document, before the first and
/// after the last node, and are where collaborators such as a table of
/// contents emitter plug in.
///
/// # Example
///
/// ```
/// use canonmd_ast::{NodeKind, NodeRef, WalkStatus};
/// use canonmd_renderer::{HookOutcome, MarkdownRenderer, RenderError, RenderHook, Sink};
///
/// /// Writes code spans as `<code>` elements.
/// struct HtmlCode;
///
/// impl RenderHook for HtmlCode {
///     fn render_node(
///         &mut self,
///         sink: &mut dyn Sink,
///         node: NodeRef<'_>,
///         _entering: bool,
///     ) -> Result<HookOutcome, RenderError> {
///         let NodeKind::Code(code) = node.kind() else {
///             return Ok(HookOutcome::PassThrough);
///         };
///         sink.write_str(&format!("<code>{code}</code>"))?;
///         Ok(HookOutcome::Handled(WalkStatus::GoToNext))
///     }
/// }
///
/// let result = MarkdownRenderer::new()
///     .with_hook(HtmlCode)
///     .render_markdown("use `x` here")?;
/// assert_eq!(result.markdown, "use <code>x</code> here");
/// # Ok::<(), RenderError>(())
/// ```
pub trait RenderHook {
    /// Offer a node event to the hook.
    fn render_node(
        &mut self,
        sink: &mut dyn Sink,
        node: NodeRef<'_>,
        entering: bool,
    ) -> Result<HookOutcome, RenderError>;

    /// Called once before the first node of a document.
    fn render_header(&mut self, _sink: &mut dyn Sink, _doc: &Document) -> Result<(), RenderError> {
        Ok(())
    }

    /// Called once after the last node of a document.
    fn render_footer(&mut self, _sink: &mut dyn Sink, _doc: &Document) -> Result<(), RenderError> {
        Ok(())
    }
}
