pub mod edge;
pub mod node;
mod split;

pub use edge::{EdgeData, EdgeEnd, EdgeId, OrientedEdge};
pub use node::{NodeData, NodeId};

use std::fmt;

use rstar::primitives::{GeomWithData, Rectangle};
use rstar::RTree;
use slotmap::SlotMap;
use tracing::trace;

use crate::config::GraphConfig;
use crate::error::{ConfigError, TopologyError};
use crate::geometry::{BoundingBox, LineString};
use crate::math::distance_2d::{distance_2d, points_equal_2d};
use crate::math::Point3;

type NodeEntry = GeomWithData<[f64; 2], NodeId>;
type EdgeEntry = GeomWithData<Rectangle<[f64; 2]>, EdgeId>;

/// Planar graph of line strings.
///
/// Nodes and edges live in slot-map arenas and refer to each other through
/// typed keys. Nothing is ever deleted from the arenas: removing an edge
/// flags it and detaches it from its nodes, and a node whose last edge
/// goes away is flagged too. Two R-trees index the live node locations and
/// the live edge bounding boxes.
pub struct Graph {
    nodes: SlotMap<NodeId, NodeData>,
    edges: SlotMap<EdgeId, EdgeData>,
    node_index: RTree<NodeEntry>,
    edge_index: RTree<EdgeEntry>,
    next_index: usize,
    tolerance: f64,
}

impl Default for Graph {
    fn default() -> Self {
        Self {
            nodes: SlotMap::with_key(),
            edges: SlotMap::with_key(),
            node_index: RTree::new(),
            edge_index: RTree::new(),
            next_index: 0,
            tolerance: 0.0,
        }
    }
}

impl fmt::Debug for Graph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Graph")
            .field("nodes", &self.node_count())
            .field("edges", &self.edge_count())
            .field("tolerance", &self.tolerance)
            .finish_non_exhaustive()
    }
}

impl Graph {
    /// Creates an empty graph with exact node matching.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty graph that matches nodes within the configured
    /// node tolerance.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration holds an invalid tolerance.
    pub fn with_config(config: &GraphConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            tolerance: config.node_tolerance,
            ..Self::default()
        })
    }

    /// Distance within which two coordinates resolve to the same node.
    #[must_use]
    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    // --- Lookup ---

    /// Returns the node data, removed or not.
    ///
    /// # Errors
    ///
    /// Returns an error if the node is not in the graph.
    pub fn node(&self, id: NodeId) -> Result<&NodeData, TopologyError> {
        self.nodes
            .get(id)
            .ok_or(TopologyError::EntityNotFound("node"))
    }

    /// Returns the edge data, removed or not.
    ///
    /// # Errors
    ///
    /// Returns an error if the edge is not in the graph.
    pub fn edge(&self, id: EdgeId) -> Result<&EdgeData, TopologyError> {
        self.edges
            .get(id)
            .ok_or(TopologyError::EntityNotFound("edge"))
    }

    /// Returns the data of an edge that has not been removed.
    ///
    /// # Errors
    ///
    /// Returns an error if the edge is missing or removed.
    pub fn live_edge(&self, id: EdgeId) -> Result<&EdgeData, TopologyError> {
        let edge = self.edge(id)?;
        if edge.removed {
            return Err(TopologyError::RemovedEntity("edge"));
        }
        Ok(edge)
    }

    /// Number of live edge ends at `node`.
    ///
    /// # Errors
    ///
    /// Returns an error if the node is not in the graph.
    pub fn degree(&self, node: NodeId) -> Result<usize, TopologyError> {
        Ok(self.node(node)?.degree())
    }

    /// Returns the live node at `point` within the graph's node tolerance.
    #[must_use]
    pub fn node_at(&self, point: &Point3) -> Option<NodeId> {
        self.node_near(point, self.tolerance)
    }

    /// Returns the nearest live node within `tolerance` of `point`. Equal
    /// distances go to the node created first.
    #[must_use]
    pub fn node_near(&self, point: &Point3, tolerance: f64) -> Option<NodeId> {
        let query = [point.x, point.y];
        self.node_index
            .locate_within_distance(query, tolerance * tolerance)
            .map(|entry| entry.data)
            .filter_map(|id| {
                let node = self.nodes.get(id)?;
                points_equal_2d(&node.point, point, tolerance)
                    .then(|| (distance_2d(&node.point, point), id))
            })
            .min_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)))
            .map(|(_, id)| id)
    }

    /// Describes the end of `edge` that sits at `node`.
    ///
    /// For a closed edge the `from` end is reported.
    ///
    /// # Errors
    ///
    /// Returns an error if the edge is missing or does not touch `node`.
    pub fn edge_end(&self, edge: EdgeId, node: NodeId) -> Result<EdgeEnd, TopologyError> {
        let data = self.edge(edge)?;
        if data.from == node {
            Ok(EdgeEnd {
                edge,
                node,
                forward: true,
            })
        } else if data.to == node {
            Ok(EdgeEnd {
                edge,
                node,
                forward: false,
            })
        } else {
            Err(TopologyError::InvalidTopology(
                "edge does not touch the given node".into(),
            ))
        }
    }

    /// Returns the node at the other end of `edge` from `node`.
    ///
    /// # Errors
    ///
    /// Returns an error if the edge is missing or does not touch `node`.
    pub fn opposite(&self, edge: EdgeId, node: NodeId) -> Result<NodeId, TopologyError> {
        self.edge(edge)?.opposite(node).ok_or_else(|| {
            TopologyError::InvalidTopology("edge does not touch the given node".into())
        })
    }

    // --- Insertion ---

    /// Adds `line` as a new top-level edge.
    ///
    /// Returns `None` without changing the graph if the line has no length
    /// or if a two-point line would start and end at the same node. If a
    /// live edge between the same nodes already has this geometry, in
    /// either direction, that edge is returned instead of a new one.
    pub fn add_edge(&mut self, line: LineString) -> Option<EdgeId> {
        let index = vec![self.next_index];
        let id = self.insert_edge(line, index)?;
        self.next_index += 1;
        Some(id)
    }

    /// Adds an edge from raw points, keeping their elevations.
    pub fn add_points(&mut self, points: &[Point3]) -> Option<EdgeId> {
        match LineString::new_3d(points.to_vec()) {
            Ok(line) => self.add_edge(line),
            Err(err) => {
                trace!(%err, "ignoring line");
                None
            }
        }
    }

    /// Adds a 2D edge from `(x, y)` pairs.
    pub fn add_line_string(&mut self, coords: &[(f64, f64)]) -> Option<EdgeId> {
        match LineString::from_xy(coords) {
            Ok(line) => self.add_edge(line),
            Err(err) => {
                trace!(%err, "ignoring line");
                None
            }
        }
    }

    pub(crate) fn insert_edge(&mut self, line: LineString, index: Vec<usize>) -> Option<EdgeId> {
        if line.is_zero_length() {
            trace!(%line, "ignoring zero-length line");
            return None;
        }
        let existing_from = self.node_at(line.start());
        let collapsed = line.vertex_count() == 2
            && (points_equal_2d(line.start(), line.end(), self.tolerance)
                || (existing_from.is_some() && existing_from == self.node_at(line.end())));
        if collapsed {
            trace!(%line, "ignoring line shorter than node tolerance");
            return None;
        }

        let from = self.node_or_insert(line.start());
        let to = self.node_or_insert(line.end());
        let line = line.with_end_points(&self.nodes[from].point, &self.nodes[to].point);

        if let Some(existing) = self.find_duplicate(from, to, &line) {
            trace!(%line, "reusing existing edge");
            return Some(existing);
        }

        let data = EdgeData::new(from, to, line, index);
        let envelope = edge_envelope(&data.bbox);
        let id = self.edges.insert(data);
        self.edge_index.insert(GeomWithData::new(envelope, id));
        self.nodes[from].edges.push(id);
        self.nodes[to].edges.push(id);
        Some(id)
    }

    fn node_or_insert(&mut self, point: &Point3) -> NodeId {
        if let Some(id) = self.node_at(point) {
            return id;
        }
        let id = self.nodes.insert(NodeData::new(*point));
        self.node_index.insert(GeomWithData::new([point.x, point.y], id));
        id
    }

    fn find_duplicate(&self, from: NodeId, to: NodeId, line: &LineString) -> Option<EdgeId> {
        self.nodes[from].edges.iter().copied().find(|&id| {
            let edge = &self.edges[id];
            !edge.removed
                && ((edge.from == from && edge.to == to) || (edge.from == to && edge.to == from))
                && edge.line.equals_either_direction(line, self.tolerance)
        })
    }

    // --- Removal ---

    /// Removes an edge and detaches it from its nodes. Nodes left without
    /// edges are removed as well.
    ///
    /// Returns `false` if the edge is unknown or already removed.
    pub fn remove_edge(&mut self, id: EdgeId) -> bool {
        let Some(edge) = self.edges.get_mut(id) else {
            return false;
        };
        if edge.removed {
            return false;
        }
        edge.removed = true;
        let (from, to) = (edge.from, edge.to);
        let envelope = edge_envelope(&edge.bbox);
        self.edge_index.remove(&GeomWithData::new(envelope, id));
        self.detach(from, id);
        if to != from {
            self.detach(to, id);
        }
        true
    }

    fn detach(&mut self, node_id: NodeId, edge: EdgeId) {
        let Some(node) = self.nodes.get_mut(node_id) else {
            return;
        };
        node.edges.retain(|&e| e != edge);
        if node.edges.is_empty() && !node.removed {
            node.removed = true;
            let point = [node.point.x, node.point.y];
            self.node_index.remove(&GeomWithData::new(point, node_id));
        }
    }

    /// Removes the live edge whose geometry equals `line` in either
    /// direction. Only edges at the node under `line.start()` are checked.
    pub fn remove_line(&mut self, line: &LineString) -> bool {
        let Some(node) = self.node_at(line.start()) else {
            return false;
        };
        let found = self.nodes[node].edges.iter().copied().find(|&id| {
            self.edges[id]
                .line
                .equals_either_direction(line, self.tolerance)
        });
        found.is_some_and(|id| self.remove_edge(id))
    }

    /// Removes each line in turn and returns how many were found.
    pub fn remove_lines(&mut self, lines: &[LineString]) -> usize {
        lines.iter().filter(|line| self.remove_line(line)).count()
    }

    // --- Queries ---

    /// Snapshot of the nodes accepted by `predicate`, in creation order.
    /// Removed nodes are offered to the predicate too.
    pub fn nodes_matching(&self, predicate: impl Fn(&NodeData) -> bool) -> Vec<NodeId> {
        self.nodes
            .iter()
            .filter(|(_, node)| predicate(node))
            .map(|(id, _)| id)
            .collect()
    }

    /// Live nodes in creation order.
    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &NodeData)> {
        self.nodes.iter().filter(|(_, node)| !node.removed)
    }

    /// Live edges in creation order.
    pub fn edges(&self) -> impl Iterator<Item = (EdgeId, &EdgeData)> {
        self.edges.iter().filter(|(_, edge)| !edge.removed)
    }

    /// Live edge ids ordered by hierarchical index.
    #[must_use]
    pub fn edges_sorted(&self) -> Vec<EdgeId> {
        let mut ids: Vec<EdgeId> = self.edges().map(|(id, _)| id).collect();
        self.sort_by_index(&mut ids);
        ids
    }

    fn sort_by_index(&self, ids: &mut [EdgeId]) {
        ids.sort_by(|&a, &b| {
            self.edges[a]
                .index
                .cmp(&self.edges[b].index)
                .then(a.cmp(&b))
        });
    }

    /// Geometries of the live edges, ordered by hierarchical index.
    #[must_use]
    pub fn lines(&self) -> Vec<LineString> {
        self.edges_sorted()
            .into_iter()
            .map(|id| self.edges[id].line.clone())
            .collect()
    }

    /// Live edges within `distance` of `point`, ordered by index.
    #[must_use]
    pub fn edges_near(&self, point: &Point3, distance: f64) -> Vec<EdgeId> {
        let mut ids: Vec<EdgeId> = self
            .edges_intersecting(&BoundingBox::around(point, distance))
            .into_iter()
            .filter(|&id| self.edges[id].line.distance_to(point) <= distance)
            .collect();
        self.sort_by_index(&mut ids);
        ids
    }

    /// Live edges whose bounding box meets `bbox`, ordered by index.
    #[must_use]
    pub fn edges_intersecting(&self, bbox: &BoundingBox) -> Vec<EdgeId> {
        let mut ids: Vec<EdgeId> = self
            .edge_index
            .locate_in_envelope_intersecting(&bbox.to_aabb())
            .map(|entry| entry.data)
            .filter(|&id| self.edges.get(id).is_some_and(|e| !e.removed))
            .collect();
        self.sort_by_index(&mut ids);
        ids
    }

    /// Live nodes inside `bbox`, in creation order.
    #[must_use]
    pub fn nodes_intersecting(&self, bbox: &BoundingBox) -> Vec<NodeId> {
        let mut ids: Vec<NodeId> = self
            .node_index
            .locate_in_envelope(&bbox.to_aabb())
            .map(|entry| entry.data)
            .filter(|&id| self.nodes.get(id).is_some_and(|n| !n.removed))
            .collect();
        ids.sort();
        ids
    }

    /// Number of edge slots ever allocated, removed edges included. It only
    /// grows, and grows exactly when a new edge is inserted.
    pub(crate) fn edge_slots(&self) -> usize {
        self.edges.len()
    }

    /// Number of live nodes.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes().count()
    }

    /// Number of live edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges().count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.edge_count() == 0
    }

    /// Checks the node/edge bookkeeping.
    ///
    /// # Errors
    ///
    /// Returns [`TopologyError::InvalidTopology`] describing the first
    /// inconsistency found.
    pub fn validate(&self) -> Result<(), TopologyError> {
        for (id, edge) in self.edges() {
            for (end, node_id, point) in [
                ("from", edge.from, edge.line.start()),
                ("to", edge.to, edge.line.end()),
            ] {
                let node = self.node(node_id)?;
                if node.removed {
                    return Err(invalid(format!("edge {id:?} {end} node is removed")));
                }
                if !points_equal_2d(&node.point, point, self.tolerance) {
                    return Err(invalid(format!("edge {id:?} {end} point is off its node")));
                }
                let listed = node.edges.iter().filter(|&&e| e == id).count();
                let expected = if edge.is_loop() { 2 } else { 1 };
                if listed != expected {
                    return Err(invalid(format!(
                        "node {node_id:?} lists edge {id:?} {listed} times"
                    )));
                }
            }
            if let Some(dup) = self.find_duplicate_other(id, edge) {
                return Err(invalid(format!("edges {id:?} and {dup:?} are duplicates")));
            }
        }
        for (node_id, node) in &self.nodes {
            if node.removed != node.edges.is_empty() {
                return Err(invalid(format!(
                    "node {node_id:?} removed flag disagrees with its {} edges",
                    node.edges.len()
                )));
            }
            for &edge_id in &node.edges {
                let edge = self.edge(edge_id)?;
                if edge.removed || !edge.is_incident(node_id) {
                    return Err(invalid(format!(
                        "node {node_id:?} lists foreign edge {edge_id:?}"
                    )));
                }
            }
        }
        Ok(())
    }

    fn find_duplicate_other(&self, id: EdgeId, edge: &EdgeData) -> Option<EdgeId> {
        self.nodes[edge.from].edges.iter().copied().find(|&other| {
            other != id && {
                let o = &self.edges[other];
                o.opposite(edge.from) == Some(edge.to)
                    && o.line.equals_either_direction(&edge.line, self.tolerance)
            }
        })
    }
}

fn edge_envelope(bbox: &BoundingBox) -> Rectangle<[f64; 2]> {
    Rectangle::from_corners([bbox.min_x, bbox.min_y], [bbox.max_x, bbox.max_y])
}

fn invalid(message: String) -> TopologyError {
    TopologyError::InvalidTopology(message)
}
