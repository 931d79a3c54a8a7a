//! Canonical markdown renderer.
//!
//! This crate turns a [`canonmd_ast::Document`] back into normalized
//! markdown. Rendering the output again after re-parsing it yields the same
//! text.
//!
//! # Architecture
//!
//! - [`MarkdownRenderer`] holds configuration and an optional [`RenderHook`].
//!   Each document gets a fresh [`RenderPass`] that tracks indentation, list
//!   depth and the paragraph being buffered.
//! - Output goes to a [`Sink`]. Every line break request goes through
//!   [`Sink::emit_newline`], which never produces more than one blank line.
//! - Paragraphs are written unformatted first, then read back from the sink,
//!   wrapped with [`wrap`] at `text_width - indent`, indented with
//!   [`indent`] and written again. This needs a [`Markable`] sink such as
//!   `String`; on other sinks (e.g. [`StreamSink`]) paragraph text passes
//!   through unchanged.
//!
//! # Example
//!
//! ```
//! use canonmd_renderer::{MarkdownRenderer, RendererOptions};
//!
//! let mut renderer = MarkdownRenderer::new().with_options(RendererOptions::with_text_width(30));
//! let result = renderer.render_markdown("Some *emphasis*\nand `code`.\n\n1. first\n2. second")?;
//! assert_eq!(
//!     result.markdown,
//!     "Some *emphasis* and `code`.\n\n1. first\n\n1. second\n\n"
//! );
//! # Ok::<(), canonmd_renderer::RenderError>(())
//! ```

mod error;
mod hook;
mod options;
mod renderer;
mod sink;
mod state;
mod wrap;

pub use error::RenderError;
pub use hook::{HookOutcome, RenderHook};
pub use options::{DEFAULT_TEXT_WIDTH, Flags, INDENT_STEP, NARROW_TEXT_WIDTH, RendererOptions};
pub use renderer::{Diagnostics, MarkdownRenderer, RenderPass, RenderResult};
pub use sink::{Mark, Markable, Sink, StreamSink};
pub use wrap::{indent, wrap};
