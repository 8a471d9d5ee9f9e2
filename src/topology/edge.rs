use crate::geometry::{BoundingBox, LineString};

use super::node::NodeId;

slotmap::new_key_type! {
    /// Unique identifier for an edge in a [`Graph`](super::Graph).
    pub struct EdgeId;
}

/// Data associated with a graph edge.
///
/// The line runs from the `from` node to the `to` node. Its end points sit
/// exactly on the node locations.
#[derive(Debug, Clone)]
pub struct EdgeData {
    pub from: NodeId,
    pub to: NodeId,
    pub line: LineString,
    /// Set when the edge is removed. Removed edges are never revived.
    pub removed: bool,
    /// Hierarchical insertion index. Top-level edges get `[n]`; the pieces
    /// of a split edge get the parent index with the piece number appended.
    pub index: Vec<usize>,
    pub(crate) bbox: BoundingBox,
}

impl EdgeData {
    #[must_use]
    pub fn new(from: NodeId, to: NodeId, line: LineString, index: Vec<usize>) -> Self {
        let bbox = line.bounding_box();
        Self {
            from,
            to,
            line,
            removed: false,
            index,
            bbox,
        }
    }

    /// Returns `true` if the edge starts or ends at `node`.
    #[must_use]
    pub fn is_incident(&self, node: NodeId) -> bool {
        self.from == node || self.to == node
    }

    /// Returns `true` if the edge starts and ends at the same node.
    #[must_use]
    pub fn is_loop(&self) -> bool {
        self.from == self.to
    }

    /// Returns the node at the other end from `node`, or `None` if the
    /// edge does not touch `node`.
    #[must_use]
    pub fn opposite(&self, node: NodeId) -> Option<NodeId> {
        if self.from == node {
            Some(self.to)
        } else if self.to == node {
            Some(self.from)
        } else {
            None
        }
    }

    #[must_use]
    pub fn bounding_box(&self) -> &BoundingBox {
        &self.bbox
    }
}

/// One end of an edge as seen from a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EdgeEnd {
    pub edge: EdgeId,
    pub node: NodeId,
    /// `true` if `node` is the edge's `from` node, so leaving `node` along
    /// the edge follows the line's own direction.
    pub forward: bool,
}

/// An edge paired with a traversal direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrientedEdge {
    pub edge: EdgeId,
    pub forward: bool,
}

impl OrientedEdge {
    #[must_use]
    pub fn new(edge: EdgeId, forward: bool) -> Self {
        Self { edge, forward }
    }

    /// Returns the edge's line in traversal order.
    #[must_use]
    pub fn oriented_line(&self, data: &EdgeData) -> LineString {
        if self.forward {
            data.line.clone()
        } else {
            data.line.reversed()
        }
    }
}
