//! Incremental construction of a [`Document`].

use crate::error::AstError;
use crate::node::NodeKind;
use crate::tree::{Document, NodeData, NodeId};

/// Builds a [`Document`] top-down with an explicit open/close stack.
///
/// ```
/// use canonmd_ast::{DocumentBuilder, NodeKind};
///
/// let mut builder = DocumentBuilder::new();
/// builder.open(NodeKind::List { ordered: false });
/// builder.open(NodeKind::ListItem { ordered: false });
/// builder.open(NodeKind::Paragraph).text("item");
/// builder.close()?.close()?.close()?;
/// let doc = builder.finish()?;
/// assert_eq!(doc.len(), 5);
/// # Ok::<(), canonmd_ast::AstError>(())
/// ```
#[derive(Debug)]
pub struct DocumentBuilder {
    nodes: Vec<NodeData>,
    stack: Vec<NodeId>,
}

impl DocumentBuilder {
    /// Start a document containing only its root.
    #[must_use]
    pub fn new() -> Self {
        Self {
            nodes: vec![NodeData {
                kind: NodeKind::Document,
                parent: None,
                index: 0,
                children: Vec::new(),
            }],
            stack: vec![NodeId::ROOT],
        }
    }

    /// Append a node under the current one and descend into it.
    pub fn open(&mut self, kind: NodeKind) -> &mut Self {
        let id = self.push(kind);
        self.stack.push(id);
        self
    }

    /// Append a node under the current one without descending.
    pub fn leaf(&mut self, kind: NodeKind) -> &mut Self {
        self.push(kind);
        self
    }

    /// Append text under the current node, merging with a directly
    /// preceding text node.
    pub fn text(&mut self, text: &str) -> &mut Self {
        let current = self.current();
        if let Some(&last) = self.nodes[current.0].children.last()
            && let NodeKind::Text(literal) = &mut self.nodes[last.0].kind
        {
            literal.push_str(text);
            return self;
        }
        self.leaf(NodeKind::Text(text.to_owned()))
    }

    /// Return to the parent of the current node.
    pub fn close(&mut self) -> Result<&mut Self, AstError> {
        if self.stack.len() <= 1 {
            return Err(AstError::UnbalancedClose);
        }
        self.stack.pop();
        Ok(self)
    }

    /// Kind of the node new children are appended to.
    #[must_use]
    pub fn current_kind(&self) -> &NodeKind {
        &self.nodes[self.current().0].kind
    }

    pub(crate) fn current_kind_mut(&mut self) -> &mut NodeKind {
        let current = self.current();
        &mut self.nodes[current.0].kind
    }

    /// Number of open nodes, not counting the root.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.stack.len() - 1
    }

    /// Finish the tree. Every opened node must have been closed.
    pub fn finish(self) -> Result<Document, AstError> {
        match self.depth() {
            0 => Ok(Document { nodes: self.nodes }),
            open => Err(AstError::Unclosed(open)),
        }
    }

    fn current(&self) -> NodeId {
        self.stack.last().copied().unwrap_or(NodeId::ROOT)
    }

    fn push(&mut self, kind: NodeKind) -> NodeId {
        let parent = self.current();
        let id = NodeId(self.nodes.len());
        let index = self.nodes[parent.0].children.len();
        self.nodes.push(NodeData {
            kind,
            parent: Some(parent),
            index,
            children: Vec::new(),
        });
        self.nodes[parent.0].children.push(id);
        id
    }
}

impl Default for DocumentBuilder {
    fn default() -> Self {
        Self::new()
    }
}
