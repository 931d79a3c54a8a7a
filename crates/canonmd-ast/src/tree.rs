//! Arena-backed document tree with read-only node handles.

use crate::node::NodeKind;

/// Index of a node inside its [`Document`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    /// Id of the root [`NodeKind::Document`] node.
    pub const ROOT: Self = Self(0);
}

/// Storage for a single node.
#[derive(Debug, Clone)]
pub(crate) struct NodeData {
    pub(crate) kind: NodeKind,
    pub(crate) parent: Option<NodeId>,
    /// Position among the parent's children.
    pub(crate) index: usize,
    pub(crate) children: Vec<NodeId>,
}

/// A parsed document tree.
///
/// Nodes are never mutated once the document is finished; consumers only
/// read kinds and follow parent/child/sibling links.
#[derive(Debug, Clone)]
pub struct Document {
    pub(crate) nodes: Vec<NodeData>,
}

impl Document {
    /// Root node of the tree.
    #[must_use]
    pub fn root(&self) -> NodeRef<'_> {
        NodeRef {
            doc: self,
            id: NodeId::ROOT,
        }
    }

    /// Look up a node by id.
    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<NodeRef<'_>> {
        (id.0 < self.nodes.len()).then_some(NodeRef { doc: self, id })
    }

    /// Number of nodes, including the root.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the document holds nothing but its root.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.len() <= 1
    }

    fn data(&self, id: NodeId) -> &NodeData {
        &self.nodes[id.0]
    }
}

/// Borrowed handle to a node, used for context queries during rendering.
#[derive(Clone, Copy, Debug)]
pub struct NodeRef<'a> {
    doc: &'a Document,
    id: NodeId,
}

impl<'a> NodeRef<'a> {
    /// Id of this node.
    #[must_use]
    pub fn id(self) -> NodeId {
        self.id
    }

    /// Kind and payload of this node.
    #[must_use]
    pub fn kind(self) -> &'a NodeKind {
        &self.doc.data(self.id).kind
    }

    /// Parent node, `None` for the root.
    #[must_use]
    pub fn parent(self) -> Option<Self> {
        self.doc.data(self.id).parent.map(|id| self.with_id(id))
    }

    /// The sibling directly after this node, if any.
    #[must_use]
    pub fn next_sibling(self) -> Option<Self> {
        let data = self.doc.data(self.id);
        let parent = self.doc.data(data.parent?);
        parent
            .children
            .get(data.index + 1)
            .map(|&id| self.with_id(id))
    }

    /// Children in document order.
    pub fn children(self) -> impl DoubleEndedIterator<Item = NodeRef<'a>> + 'a {
        let doc = self.doc;
        doc.data(self.id)
            .children
            .iter()
            .map(move |&id| NodeRef { doc, id })
    }

    /// Whether this node has at least one child.
    #[must_use]
    pub fn has_children(self) -> bool {
        !self.doc.data(self.id).children.is_empty()
    }

    fn with_id(self, id: NodeId) -> Self {
        Self { doc: self.doc, id }
    }
}
