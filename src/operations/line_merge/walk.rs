use std::collections::HashSet;

use crate::error::TopologyError;
use crate::topology::{EdgeId, Graph, NodeId, OrientedEdge};

/// A run of edges visited from one node.
#[derive(Debug, Default)]
pub struct Chain {
    pub edges: Vec<OrientedEdge>,
    /// Length of the edges walked along their own direction.
    pub forwards_length: f64,
    /// Length of the edges walked against their own direction.
    pub reverse_length: f64,
}

impl Chain {
    /// The merged line runs the way the walk went unless more of the chain
    /// was walked backwards. Ties go forwards.
    pub fn is_forwards(&self) -> bool {
        self.forwards_length >= self.reverse_length
    }
}

/// Walks from `start` along `first`, then through every node of degree 2,
/// until it reaches a node of another degree, a removed node, or a node
/// whose other edge is already consumed or already in the chain.
pub fn walk(
    graph: &Graph,
    start: NodeId,
    first: EdgeId,
    consumed: &HashSet<EdgeId>,
) -> Result<Chain, TopologyError> {
    let mut chain = Chain::default();
    let mut node = start;
    let mut edge_id = first;
    loop {
        let edge = graph.live_edge(edge_id)?;
        let forward = edge.from == node;
        let length = edge.line.length();
        if forward {
            chain.forwards_length += length;
        } else {
            chain.reverse_length += length;
        }
        chain.edges.push(OrientedEdge::new(edge_id, forward));
        node = if forward { edge.to } else { edge.from };

        let data = graph.node(node)?;
        if data.removed || data.degree() != 2 {
            break;
        }
        let next = data.edges.iter().copied().find(|&e| {
            e != edge_id && !consumed.contains(&e) && !chain.edges.iter().any(|o| o.edge == e)
        });
        match next {
            Some(next) => edge_id = next,
            None => break,
        }
    }
    Ok(chain)
}
