use std::collections::VecDeque;

use tracing::{debug, trace};

use crate::error::Result;
use crate::geometry::LineString;
use crate::math::distance_2d::{
    distance_2d, interpolate_z, point_to_segment_dist, points_equal_2d, projection_factor,
};
use crate::math::{Point3, TOLERANCE};

use super::{EdgeId, Graph};

/// Where a split point lands on an edge's line.
#[derive(Debug, Clone, Copy)]
struct SplitPoint {
    /// Segment the point lies on. A vertex hit uses the segment that
    /// starts at that vertex.
    segment: usize,
    factor: f64,
    point: Point3,
    /// The point replaces the vertex at `segment` instead of being inserted.
    on_vertex: bool,
}

fn locate(line: &LineString, point: &Point3, tolerance: f64) -> Option<SplitPoint> {
    let pts = line.points();
    if points_equal_2d(point, line.start(), tolerance) || points_equal_2d(point, line.end(), tolerance) {
        return None;
    }
    if let Some(i) = (1..pts.len() - 1).find(|&i| points_equal_2d(point, &pts[i], tolerance)) {
        return Some(SplitPoint {
            segment: i,
            factor: 0.0,
            point: Point3::new(point.x, point.y, pts[i].z),
            on_vertex: true,
        });
    }
    let (segment, _) = line
        .segments()
        .map(|(a, b)| point_to_segment_dist(point, a, b))
        .enumerate()
        .min_by(|a, b| a.1.total_cmp(&b.1))?;
    let (a, b) = (&pts[segment], &pts[segment + 1]);
    let factor = projection_factor(point, a, b).clamp(0.0, 1.0);
    let z = if line.has_z() { interpolate_z(a, b, factor) } else { 0.0 };
    Some(SplitPoint {
        segment,
        factor,
        point: Point3::new(point.x, point.y, z),
        on_vertex: false,
    })
}

/// Cuts the vertex list at each split point. Split points must be sorted
/// along the line.
fn cut(pts: &[Point3], splits: &[SplitPoint]) -> Vec<Vec<Point3>> {
    let mut pieces = Vec::with_capacity(splits.len() + 1);
    let mut current = vec![pts[0]];
    let mut next_vertex = 1;
    for split in splits {
        while next_vertex <= split.segment {
            current.push(pts[next_vertex]);
            next_vertex += 1;
        }
        if split.on_vertex {
            current.pop();
        }
        current.push(split.point);
        pieces.push(std::mem::replace(&mut current, vec![split.point]));
    }
    current.extend_from_slice(&pts[next_vertex..]);
    pieces.push(current);
    pieces
}

impl Graph {
    /// Splits `edge` at each of `points` and replaces it with the pieces.
    ///
    /// A point within `tolerance` of an interior vertex replaces that
    /// vertex. Any other point is inserted on the nearest segment at its own
    /// coordinate. Points within `tolerance` of the edge's end points are
    /// ignored. Piece `i` gets the parent's index with `i` appended.
    ///
    /// Returns the pieces in line order, or `vec![edge]` if nothing was
    /// split.
    ///
    /// # Errors
    ///
    /// Returns an error if the edge is missing or already removed.
    pub fn split_edge(
        &mut self,
        edge: EdgeId,
        points: &[Point3],
        tolerance: f64,
    ) -> Result<Vec<EdgeId>> {
        let data = self.live_edge(edge)?;
        let line = data.line.clone();
        let index = data.index.clone();

        let mut splits: Vec<SplitPoint> = points
            .iter()
            .filter_map(|p| locate(&line, p, tolerance))
            .collect();
        splits.sort_by(|a, b| {
            a.segment
                .cmp(&b.segment)
                .then(a.factor.total_cmp(&b.factor))
        });
        splits.dedup_by(|b, a| points_equal_2d(&a.point, &b.point, tolerance));
        if splits.is_empty() {
            return Ok(vec![edge]);
        }

        let mut children = Vec::with_capacity(splits.len() + 1);
        for (i, piece) in cut(line.points(), &splits).into_iter().enumerate() {
            let piece = LineString::with_dimension(piece, line.has_z())?;
            let mut child_index = index.clone();
            child_index.push(i);
            if let Some(id) = self.insert_edge(piece, child_index) {
                if !children.contains(&id) {
                    children.push(id);
                }
            }
        }
        self.remove_edge(edge);
        trace!(?index, pieces = children.len(), "split edge");
        Ok(children)
    }

    /// Splits every edge that passes within `tolerance` of a node it does
    /// not end at. The split happens at the node's exact coordinate, so the
    /// edge ends up connected to that node.
    ///
    /// Returns the number of edges split.
    ///
    /// # Errors
    ///
    /// Returns an error if the graph bookkeeping is inconsistent.
    pub fn split_edges_close_to_nodes(&mut self, tolerance: f64) -> Result<usize> {
        let mut split = 0;
        for node_id in self.nodes_matching(|n| !n.removed) {
            let node = self.node(node_id)?;
            if node.removed {
                continue;
            }
            let point = node.point;
            for edge_id in self.edges_near(&point, tolerance) {
                let edge = self.edge(edge_id)?;
                if edge.removed
                    || edge.is_incident(node_id)
                    || !edge.line.is_point_on_interior(&point, tolerance)
                {
                    continue;
                }
                self.split_edge(edge_id, &[point], tolerance)?;
                split += 1;
            }
        }
        debug!(split, tolerance, "split edges close to nodes");
        debug_assert!(self.validate().is_ok());
        Ok(split)
    }

    /// Finds the nodes of `other` that lie within `tolerance` of the
    /// interior of this graph's edges.
    ///
    /// Edges come back in index order, each with its points ordered by
    /// distance from the edge's start. Edges with no such node are left out.
    #[must_use]
    pub fn points_on_edges(&self, other: &Graph, tolerance: f64) -> Vec<(EdgeId, Vec<Point3>)> {
        let mut found = Vec::new();
        for id in self.edges_sorted() {
            let line = &self.edges[id].line;
            let mut points: Vec<Point3> = other
                .nodes_intersecting(&line.bounding_box().expanded(tolerance))
                .into_iter()
                .map(|node| other.nodes[node].point)
                .filter(|p| line.is_point_on_interior(p, tolerance))
                .collect();
            if points.is_empty() {
                continue;
            }
            let start = *line.start();
            points.sort_by(|a, b| distance_2d(&start, a).total_cmp(&distance_2d(&start, b)));
            found.push((id, points));
        }
        found
    }

    /// Splits each listed edge at its points, as found by
    /// [`points_on_edges`](Graph::points_on_edges). Edges that have been
    /// removed since are skipped.
    ///
    /// Returns the number of edges split.
    ///
    /// # Errors
    ///
    /// Returns an error if the graph bookkeeping is inconsistent.
    pub fn split_edges(&mut self, points: &[(EdgeId, Vec<Point3>)], tolerance: f64) -> Result<usize> {
        let mut split = 0;
        for (id, at) in points {
            if !self.edge(*id).is_ok_and(|edge| !edge.removed) {
                continue;
            }
            if self.split_edge(*id, at, tolerance)? != [*id] {
                split += 1;
            }
        }
        debug!(split, tolerance, "split edges at points");
        debug_assert!(self.validate().is_ok());
        Ok(split)
    }

    /// Splits every pair of edges that cross at a point inside both of
    /// them. The two edges are cut at the same coordinate and so share one
    /// new node. Touches and collinear overlaps are left alone.
    ///
    /// Returns the number of crossing points found.
    ///
    /// # Errors
    ///
    /// Returns an error if the graph bookkeeping is inconsistent.
    pub fn split_crossing_edges(&mut self) -> Result<usize> {
        let mut queue: VecDeque<EdgeId> = self.edges_sorted().into();
        let mut crossings = 0;
        while let Some(edge_id) = queue.pop_front() {
            let edge = self.edge(edge_id)?;
            if edge.removed {
                continue;
            }
            let line = edge.line.clone();

            let mut points: Vec<Point3> = Vec::new();
            for other_id in self.edges_intersecting(&line.bounding_box()) {
                if other_id == edge_id {
                    continue;
                }
                let found = line.crossings(&self.live_edge(other_id)?.line);
                if found.is_empty() {
                    continue;
                }
                crossings += found.len();
                let pieces = self.split_edge(other_id, &found, TOLERANCE)?;
                queue.extend(pieces.into_iter().filter(|&id| id != other_id));
                points.extend(found);
            }
            if !points.is_empty() {
                self.split_edge(edge_id, &points, TOLERANCE)?;
            }
        }
        debug!(crossings, "split crossing edges");
        debug_assert!(self.validate().is_ok());
        Ok(crossings)
    }
}
