use crate::math::Point3;

use super::edge::EdgeId;

slotmap::new_key_type! {
    /// Unique identifier for a node in a [`Graph`](super::Graph).
    pub struct NodeId;
}

/// Data associated with a graph node.
///
/// `edges` lists every live edge that starts or ends here. A closed edge
/// that starts and ends at this node is listed twice, so it counts two
/// towards the degree.
#[derive(Debug, Clone)]
pub struct NodeData {
    /// Location of the node. Only `x` and `y` identify it.
    pub point: Point3,
    /// Incident live edges, one entry per edge end.
    pub edges: Vec<EdgeId>,
    /// Set once the last incident edge is removed.
    pub removed: bool,
}

impl NodeData {
    /// Creates an isolated node at the given point.
    #[must_use]
    pub fn new(point: Point3) -> Self {
        Self {
            point,
            edges: Vec::new(),
            removed: false,
        }
    }

    /// Number of live edge ends at this node.
    #[must_use]
    pub fn degree(&self) -> usize {
        self.edges.len()
    }
}
