//! Document tree consumed by the canonical markdown renderer.
//!
//! The tree is an arena of [`NodeKind`] values with parent and sibling links.
//! It is built either by hand through [`DocumentBuilder`] or from CommonMark
//! text through [`parse`], and is traversed depth-first with
//! [`Document::walk`], which reports every container twice (enter and exit)
//! and every leaf once.
//!
//! # Example
//!
//! ```
//! use canonmd_ast::{DocumentBuilder, NodeKind, WalkStatus};
//!
//! let mut builder = DocumentBuilder::new();
//! builder
//!     .open(NodeKind::Heading { level: 2 })
//!     .leaf(NodeKind::Text("Title".to_owned()));
//! builder.close()?;
//! let doc = builder.finish()?;
//!
//! let mut events = Vec::new();
//! doc.walk(|node, entering| {
//!     events.push((node.kind().name(), entering));
//!     Ok::<_, std::convert::Infallible>(WalkStatus::GoToNext)
//! })
//! .unwrap();
//!
//! assert_eq!(events.len(), 5);
//! # Ok::<(), canonmd_ast::AstError>(())
//! ```

mod builder;
mod error;
mod node;
mod parse;
mod tree;
mod walk;

pub use builder::DocumentBuilder;
pub use error::AstError;
pub use node::{IndexEntry, Matter, NodeKind};
pub use parse::{parse, parse_with_options, parser_options};
pub use tree::{Document, NodeId, NodeRef};
pub use walk::WalkStatus;
