//! Depth-first traversal with enter/exit events.

use crate::tree::{Document, NodeRef};

/// What the walker should do after a visit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WalkStatus {
    /// Continue with the next node.
    GoToNext,
    /// Do not descend into this node's children. Its exit event still fires.
    SkipChildren,
    /// Stop the traversal.
    Terminate,
}

impl Document {
    /// Visit every node depth-first.
    ///
    /// Containers are visited with `entering == true` before their children
    /// and `entering == false` after them, even when they have no children.
    /// Leaves are visited once with `entering == true`. A visitor error aborts
    /// the walk and is returned unchanged.
    pub fn walk<E, F>(&self, mut visitor: F) -> Result<WalkStatus, E>
    where
        F: FnMut(NodeRef<'_>, bool) -> Result<WalkStatus, E>,
    {
        walk_node(self.root(), &mut visitor)
    }
}

fn walk_node<E, F>(node: NodeRef<'_>, visitor: &mut F) -> Result<WalkStatus, E>
where
    F: FnMut(NodeRef<'_>, bool) -> Result<WalkStatus, E>,
{
    let status = visitor(node, true)?;
    if status == WalkStatus::Terminate {
        return Ok(status);
    }
    if !node.kind().is_container() {
        return Ok(status);
    }
    if status != WalkStatus::SkipChildren {
        for child in node.children() {
            if walk_node(child, visitor)? == WalkStatus::Terminate {
                return Ok(WalkStatus::Terminate);
            }
        }
    }
    visitor(node, false)
}
