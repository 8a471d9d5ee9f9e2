mod chain;
mod intersects;

use std::collections::HashSet;

use tracing::debug;

use crate::config::GraphConfig;
use crate::error::Result;
use crate::geometry::{BoundingBox, LineString};
use crate::math::distance_2d::points_equal_2d;
use crate::math::intersect_2d::{segment_intersection, SegmentIntersection};
use crate::math::{Point3, TOLERANCE};
use crate::topology::{EdgeId, Graph, NodeId};

use intersects::Touch;

/// Topology of a single line string.
///
/// Each segment of the source line becomes an edge. Retraced segments fold
/// onto the edge already there, so the graph holds one edge per distinct
/// piece of geometry. The split passes then connect nodes that sit on
/// other edges and cut edges where they cross, after which [`lines`]
/// reads the cleaned pieces back out.
///
/// [`lines`]: LineStringGraph::lines
#[derive(Debug)]
pub struct LineStringGraph {
    graph: Graph,
    config: GraphConfig,
    source: LineString,
    envelope: BoundingBox,
    retraced: bool,
}

impl LineStringGraph {
    /// Builds the graph of `line` with default tolerances.
    #[must_use]
    pub fn new(line: &LineString) -> Self {
        Self::build(line, Graph::new(), GraphConfig::default())
    }

    /// Builds the graph of `line` with the given tolerances.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration holds an invalid tolerance.
    pub fn with_config(line: &LineString, config: GraphConfig) -> Result<Self> {
        let graph = Graph::with_config(&config)?;
        Ok(Self::build(line, graph, config))
    }

    fn build(line: &LineString, mut graph: Graph, config: GraphConfig) -> Self {
        let mut retraced = false;
        for (a, b) in line.segments() {
            let slots = graph.edge_slots();
            if graph
                .add_edge(LineString::segment(*a, *b, line.has_z()))
                .is_some()
                && graph.edge_slots() == slots
            {
                retraced = true;
            }
        }
        debug!(
            segments = line.vertex_count() - 1,
            edges = graph.edge_count(),
            "built line string graph"
        );
        Self {
            graph,
            config,
            source: line.clone(),
            envelope: line.bounding_box(),
            retraced,
        }
    }

    #[must_use]
    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    #[must_use]
    pub fn config(&self) -> &GraphConfig {
        &self.config
    }

    /// The line the graph was built from.
    #[must_use]
    pub fn source(&self) -> &LineString {
        &self.source
    }

    /// Splits edges that pass within the snap tolerance of a node, so
    /// near-coincident points end up on one node.
    ///
    /// Returns the number of edges split.
    ///
    /// # Errors
    ///
    /// Returns an error if the graph bookkeeping is inconsistent.
    pub fn split_edges_close_to_nodes(&mut self) -> Result<usize> {
        self.graph
            .split_edges_close_to_nodes(self.config.snap_tolerance)
    }

    /// Splits edges where they cross each other.
    ///
    /// Returns the number of crossing points.
    ///
    /// # Errors
    ///
    /// Returns an error if the graph bookkeeping is inconsistent.
    pub fn split_crossing_edges(&mut self) -> Result<usize> {
        self.graph.split_crossing_edges()
    }

    /// The cleaned lines: runs of edges between nodes whose degree is not
    /// 2, in the order the source line first visits them.
    #[must_use]
    pub fn lines(&self) -> Vec<LineString> {
        chain::chain_edges(&self.graph)
    }

    /// Rebuilds a single line by walking from the source's start point,
    /// always leaving a node along the unvisited outgoing edge with the
    /// lowest index. The walk stops at a node with no such edge or when it
    /// gets back to the start.
    ///
    /// Returns `None` if the graph is empty.
    #[must_use]
    pub fn line(&self) -> Option<LineString> {
        let start = self.graph.node_at(self.source.start())?;
        let mut visited = HashSet::new();
        let mut points: Vec<Point3> = Vec::new();
        let mut node = start;
        loop {
            let next = self
                .graph
                .node(node)
                .ok()?
                .edges
                .iter()
                .filter(|id| !visited.contains(*id))
                .filter_map(|&id| self.graph.edge(id).ok().map(|edge| (id, edge)))
                .filter(|(_, edge)| edge.from == node)
                .min_by(|a, b| a.1.index.cmp(&b.1.index));
            let Some((id, edge)) = next else {
                break;
            };
            visited.insert(id);
            let skip = usize::from(!points.is_empty());
            points.extend_from_slice(&edge.line.points()[skip..]);
            node = edge.to;
            if node == start {
                break;
            }
        }
        LineString::with_dimension(points, self.source.has_z()).ok()
    }

    /// Returns `true` if `line` meets the graph anywhere other than by
    /// joining it end to end.
    ///
    /// A touch at one of `line`'s ends is a join when the graph node there
    /// has a single edge, or two edges at the graph's own start point.
    /// Every other touch or overlap within the snap tolerance is an
    /// intersection.
    #[must_use]
    pub fn intersects(&self, line: &LineString) -> bool {
        let tolerance = self.config.snap_tolerance;
        if !self
            .envelope
            .expanded(tolerance)
            .intersects(&line.bounding_box())
        {
            return false;
        }
        intersects::touches(&self.graph, line, tolerance)
            .into_iter()
            .any(|touch| match touch {
                Touch::Overlap => true,
                Touch::Point(point) => !intersects::is_end_join(
                    &self.graph,
                    self.source.start(),
                    line,
                    &point,
                    tolerance,
                ),
            })
    }

    /// Returns `true` if the source line never meets itself except at a
    /// shared start and end.
    #[must_use]
    pub fn is_simple(&self) -> bool {
        if self.retraced || self.graph.nodes().any(|(_, node)| node.degree() > 2) {
            return false;
        }
        for (id, edge) in self.graph.edges() {
            for other_id in self.graph.edges_intersecting(edge.bounding_box()) {
                if other_id <= id {
                    continue;
                }
                let Ok(other) = self.graph.edge(other_id) else {
                    continue;
                };
                for (a0, a1) in edge.line.segments() {
                    for (b0, b1) in other.line.segments() {
                        match segment_intersection(a0, a1, b0, b1) {
                            None => {}
                            Some(SegmentIntersection::Overlap(..)) => return false,
                            Some(SegmentIntersection::Point(p)) => {
                                let at_shared_node = [edge.from, edge.to]
                                    .into_iter()
                                    .filter(|&n| other.is_incident(n))
                                    .any(|n| {
                                        self.graph
                                            .node(n)
                                            .is_ok_and(|node| points_equal_2d(&node.point, &p, TOLERANCE))
                                    });
                                if !at_shared_node {
                                    return false;
                                }
                            }
                        }
                    }
                }
            }
        }
        true
    }

    /// Points where the line meets itself: nodes with more than two edge
    /// ends, nodes lying inside another edge, and crossings between edges
    /// that have not been split yet.
    #[must_use]
    pub fn self_intersections(&self) -> Vec<Point3> {
        let mut points: Vec<Point3> = self
            .graph
            .nodes()
            .filter(|&(id, node)| node.degree() > 2 || self.touches_edge_interior(id, &node.point))
            .map(|(_, node)| node.point)
            .collect();
        for (id, edge) in self.graph.edges() {
            for other_id in self.graph.edges_intersecting(edge.bounding_box()) {
                if other_id <= id {
                    continue;
                }
                if let Ok(other) = self.graph.edge(other_id) {
                    points.extend(edge.line.crossings(&other.line));
                }
            }
        }
        intersects::dedup_points(points)
    }

    /// Elevation at `point`: the z of the node there, or the z interpolated
    /// along an edge passing within the snap tolerance.
    ///
    /// Returns `None` for a 2D source line or a point off the graph.
    #[must_use]
    pub fn z_at(&self, point: &Point3) -> Option<f64> {
        if !self.source.has_z() {
            return None;
        }
        if let Some(node) = self.graph.node_at(point) {
            return self.graph.node(node).ok().map(|node| node.point.z);
        }
        let tolerance = self.config.snap_tolerance;
        self.graph
            .edges_near(point, tolerance)
            .into_iter()
            .filter_map(|id| self.graph.edge(id).ok())
            .find(|edge| edge.line.is_point_on_interior(point, tolerance))
            .and_then(|edge| edge.line.z_at(point))
    }

    /// Nodes of `other` lying inside this graph's edges, grouped by edge.
    /// See [`Graph::points_on_edges`].
    #[must_use]
    pub fn points_on_edges(&self, other: &Graph, tolerance: f64) -> Vec<(EdgeId, Vec<Point3>)> {
        self.graph.points_on_edges(other, tolerance)
    }

    /// Splits edges at points found by [`points_on_edges`], using the snap
    /// tolerance.
    ///
    /// Returns the number of edges split.
    ///
    /// # Errors
    ///
    /// Returns an error if the graph bookkeeping is inconsistent.
    ///
    /// [`points_on_edges`]: LineStringGraph::points_on_edges
    pub fn split_edges(&mut self, points: &[(EdgeId, Vec<Point3>)]) -> Result<usize> {
        self.graph.split_edges(points, self.config.snap_tolerance)
    }

    fn touches_edge_interior(&self, node: NodeId, point: &Point3) -> bool {
        let tolerance = self.config.snap_tolerance;
        self.graph
            .edges_near(point, tolerance)
            .into_iter()
            .filter_map(|id| self.graph.edge(id).ok())
            .any(|edge| !edge.is_incident(node) && edge.line.is_point_on_interior(point, tolerance))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    fn wkt(text: &str) -> LineString {
        text.parse().unwrap()
    }

    fn check_lines(actual: &[LineString], expected: &[&str]) {
        assert_eq!(actual.len(), expected.len(), "number of lines: {actual:?}");
        for (actual, expected) in actual.iter().zip(expected) {
            assert_eq!(actual, &wkt(expected), "line not equal");
        }
    }

    fn graph_of(text: &str) -> LineStringGraph {
        LineStringGraph::new(&wkt(text))
    }

    // --- Cleanup ---

    #[test]
    fn end_of_segment_overlap() {
        let graph = graph_of(
            "LINESTRING(844000 1343000,844010 1343000,844020 1343000,844010 1343000)",
        );
        check_lines(
            &graph.lines(),
            &["LINESTRING(844000 1343000,844010 1343000,844020 1343000)"],
        );
        assert!(graph.graph().validate().is_ok());
    }

    #[test]
    fn whole_segment_overlap() {
        let graph = graph_of("LINESTRING(844000 1343000,844100 1343000,844000 1343000)");
        check_lines(&graph.lines(), &["LINESTRING(844000 1343000,844100 1343000)"]);
    }

    #[test]
    fn mid_segment_overlap() {
        let graph = graph_of(
            "LINESTRING(844000 1343000,844010 1343000,844020 1343000,844010 1343000,844020 1343000,844030 1343000)",
        );
        check_lines(
            &graph.lines(),
            &["LINESTRING(844000 1343000,844010 1343000,844020 1343000,844030 1343000)"],
        );
    }

    #[test]
    fn spike_is_kept() {
        let graph = graph_of(
            "LINESTRING(844000 1343000,844010 1343000,844010 1343010,844010 1343000,844100 1343000)",
        );
        check_lines(
            &graph.lines(),
            &[
                "LINESTRING(844000 1343000,844010 1343000)",
                "LINESTRING(844010 1343000,844010 1343010)",
                "LINESTRING(844010 1343000,844100 1343000)",
            ],
        );
    }

    #[test]
    fn loop_segment_overlap() {
        let graph = graph_of(
            "LINESTRING(844000 1343000,844010 1343000,844020 1343000,844020 1343010,844010 1343010,844010 1343000,844020 1343000,844030 1343000)",
        );
        check_lines(
            &graph.lines(),
            &[
                "LINESTRING(844000 1343000,844010 1343000)",
                "LINESTRING(844010 1343000,844020 1343000)",
                "LINESTRING(844020 1343000,844020 1343010,844010 1343010,844010 1343000)",
                "LINESTRING(844020 1343000,844030 1343000)",
            ],
        );
    }

    #[test]
    fn figure_eight_with_overlap() {
        let mut graph = graph_of(
            "LINESTRING(844000 1343000,844100 1343000,844200 1343000,844300 1343000,844300 1343100,844200 1343100,844200 1343000,844100 1343000,844100 1343100,844000 1343100,844000 1343000)",
        );
        graph.split_edges_close_to_nodes().unwrap();
        check_lines(
            &graph.lines(),
            &[
                "LINESTRING(844000 1343000,844100 1343000)",
                "LINESTRING(844100 1343000,844200 1343000)",
                "LINESTRING(844200 1343000,844300 1343000,844300 1343100,844200 1343100,844200 1343000)",
                "LINESTRING(844100 1343000,844100 1343100,844000 1343100,844000 1343000)",
            ],
        );
    }

    #[test]
    fn p_overlap_not_at_start() {
        let mut graph = graph_of(
            "LINESTRING(844100 1343000,844000 1343000,844100 1343000,844200 1343000,844200 1343100,844100 1343100,844100 1343000)",
        );
        graph.split_edges_close_to_nodes().unwrap();
        graph.split_crossing_edges().unwrap();
        check_lines(
            &graph.lines(),
            &[
                "LINESTRING(844100 1343000,844000 1343000)",
                "LINESTRING(844100 1343000,844200 1343000,844200 1343100,844100 1343100,844100 1343000)",
            ],
        );
    }

    #[test]
    fn start_overlap_with_p_shape_at_end() {
        let mut graph = graph_of(
            "LINESTRING(844000 1343000,844100 1343000,844200 1343000,844200 1343100,844100 1343100,844100 1343000)",
        );
        graph.split_edges_close_to_nodes().unwrap();
        check_lines(
            &graph.lines(),
            &[
                "LINESTRING(844000 1343000,844100 1343000)",
                "LINESTRING(844100 1343000,844200 1343000,844200 1343100,844100 1343100,844100 1343000)",
            ],
        );
    }

    #[test]
    fn crossing_in_the_middle() {
        let mut graph = graph_of(
            "LINESTRING(844000 1343000,844100 1343100,844000 1343100,844100 1343000)",
        );
        assert_eq!(graph.split_crossing_edges().unwrap(), 1);
        check_lines(
            &graph.lines(),
            &[
                "LINESTRING(844000 1343000,844050 1343050)",
                "LINESTRING(844050 1343050,844100 1343100,844000 1343100,844050 1343050)",
                "LINESTRING(844050 1343050,844100 1343000)",
            ],
        );
        assert!(graph.graph().validate().is_ok());
    }

    #[test]
    fn near_node_is_snapped() {
        let mut graph = graph_of(
            "LINESTRING(844000 1343000.001,844100 1343000,844100 1343010,844050 1343000.001)",
        );
        assert_eq!(graph.split_edges_close_to_nodes().unwrap(), 1);
        check_lines(
            &graph.lines(),
            &[
                "LINESTRING(844000 1343000.001,844050 1343000.001)",
                "LINESTRING(844050 1343000.001,844100 1343000,844100 1343010,844050 1343000.001)",
            ],
        );
    }

    #[test]
    fn snapping_respects_configured_tolerance() {
        let line = wkt(
            "LINESTRING(844000 1343000.001,844100 1343000,844100 1343010,844050 1343000.001)",
        );
        let config = GraphConfig::new().with_snap_tolerance(0.0001);
        let mut graph = LineStringGraph::with_config(&line, config).unwrap();
        assert_eq!(graph.split_edges_close_to_nodes().unwrap(), 0);
        assert_eq!(graph.lines().len(), 1);
    }

    #[test]
    fn invalid_config_is_rejected() {
        let line = wkt("LINESTRING(0 0,1 1)");
        let config = GraphConfig::new().with_snap_tolerance(f64::INFINITY);
        assert!(LineStringGraph::with_config(&line, config).is_err());
    }

    #[test]
    fn passes_leave_no_duplicates() {
        let mut graph = graph_of(
            "LINESTRING(0 0,10 0,10 10,5 -5,5 5,0 0,10 0)",
        );
        graph.split_edges_close_to_nodes().unwrap();
        graph.split_crossing_edges().unwrap();
        assert!(graph.graph().validate().is_ok());
    }

    #[test]
    fn zero_length_segments_are_skipped() {
        let graph = graph_of("LINESTRING(0 0,0 0,10 0,10 0,20 0)");
        check_lines(&graph.lines(), &["LINESTRING(0 0,10 0,20 0)"]);
    }

    #[test]
    fn z_survives_cleanup() {
        let graph = graph_of("LINESTRING Z(0 0 1,10 0 2,20 0 3)");
        check_lines(&graph.lines(), &["LINESTRING Z(0 0 1,10 0 2,20 0 3)"]);
    }

    // --- Rebuilding one line ---

    #[test]
    fn line_walks_from_start() {
        let mut graph = graph_of(
            "LINESTRING(844000 1343000.001,844100 1343000,844100 1343010,844050 1343000.001)",
        );
        graph.split_edges_close_to_nodes().unwrap();
        assert_eq!(
            graph.line().unwrap(),
            wkt("LINESTRING(844000 1343000.001,844050 1343000.001,844100 1343000,844100 1343010,844050 1343000.001)")
        );
    }

    #[test]
    fn line_drops_retraced_tail() {
        let graph = graph_of("LINESTRING(0 0,10 0,20 0,10 0)");
        assert_eq!(graph.line().unwrap(), wkt("LINESTRING(0 0,10 0,20 0)"));
    }

    #[test]
    fn line_stops_at_closed_start() {
        let graph = graph_of("LINESTRING(0 0,10 0,10 10,0 0)");
        assert_eq!(graph.line().unwrap(), wkt("LINESTRING(0 0,10 0,10 10,0 0)"));
    }

    // --- Simplicity ---

    #[test]
    fn simple_lines() {
        assert!(graph_of("LINESTRING(0 0,10 0,10 10)").is_simple());
        assert!(graph_of("LINESTRING(0 0,10 0,10 10,0 0)").is_simple());
    }

    #[test]
    fn non_simple_lines() {
        assert!(!graph_of("LINESTRING(0 0,10 10,0 10,10 0)").is_simple());
        assert!(!graph_of("LINESTRING(0 0,10 0,0 0)").is_simple());
        assert!(!graph_of("LINESTRING(0 0,10 0,10 5,5 5,5 0)").is_simple());
        assert!(!graph_of("LINESTRING(0 0,10 0,10 5,5 5,5 -5)").is_simple());
    }

    #[test]
    fn self_intersection_points() {
        let graph = graph_of("LINESTRING(0 0,10 10,0 10,10 0)");
        assert_eq!(graph.self_intersections(), vec![Point3::new(5.0, 5.0, 0.0)]);

        let graph = graph_of("LINESTRING(0 0,10 0,20 0,20 10,10 10,10 0)");
        assert_eq!(graph.self_intersections(), vec![Point3::new(10.0, 0.0, 0.0)]);

        assert!(graph_of("LINESTRING(0 0,10 0,10 10)")
            .self_intersections()
            .is_empty());
    }

    #[test]
    fn node_touching_an_edge_is_a_self_intersection() {
        let graph = graph_of("LINESTRING(0 0,10 0,10 5,5 5,5 0)");
        assert!(!graph.is_simple());
        assert_eq!(graph.self_intersections(), vec![Point3::new(5.0, 0.0, 0.0)]);
    }

    // --- Elevation ---

    #[test]
    fn z_at_nodes_and_along_edges() {
        let graph = graph_of("LINESTRING Z(0 0 0,10 0 10,10 10 20)");
        assert_relative_eq!(graph.z_at(&Point3::new(10.0, 0.0, 0.0)).unwrap(), 10.0);
        assert_relative_eq!(graph.z_at(&Point3::new(5.0, 0.0, 0.0)).unwrap(), 5.0);
        assert_relative_eq!(graph.z_at(&Point3::new(10.0, 2.5, 0.0)).unwrap(), 12.5);
        assert_relative_eq!(graph.z_at(&Point3::new(5.0, 0.0005, 0.0)).unwrap(), 5.0);
        assert_eq!(graph.z_at(&Point3::new(5.0, 3.0, 0.0)), None);
    }

    #[test]
    fn z_at_on_a_flat_line_is_none() {
        let graph = graph_of("LINESTRING(0 0,10 0)");
        assert_eq!(graph.z_at(&Point3::new(0.0, 0.0, 0.0)), None);
    }

    // --- Splitting at another graph's nodes ---

    #[test]
    fn split_at_nodes_of_another_graph() {
        let mut graph = graph_of("LINESTRING(0 0,10 0)");
        let other = graph_of("LINESTRING(3 5,3 0,7 0.0005,7 5)");

        let points = graph.points_on_edges(other.graph(), 0.001);
        assert_eq!(points.len(), 1);
        assert_eq!(
            points[0].1,
            vec![Point3::new(3.0, 0.0, 0.0), Point3::new(7.0, 0.0005, 0.0)]
        );

        assert_eq!(graph.split_edges(&points).unwrap(), 1);
        check_lines(&graph.lines(), &["LINESTRING(0 0,3 0,7 0.0005,10 0)"]);
        assert_eq!(graph.graph().edge_count(), 3);
        assert!(graph.graph().validate().is_ok());
    }

    #[test]
    fn nodes_at_edge_ends_are_not_split_points() {
        let graph = graph_of("LINESTRING(0 0,10 0)");
        let other = graph_of("LINESTRING(0 0,0 5,10 5,10 0)");
        assert!(graph.points_on_edges(other.graph(), 0.001).is_empty());
    }

    // --- Intersection with another line ---

    fn intersects(graph_line: &str, other: &str) -> bool {
        graph_of(graph_line).intersects(&wkt(other))
    }

    #[test]
    fn intersection_false_end_end() {
        assert!(!intersects(
            "LINESTRING(844000 1343000,844100 1343000,844200 1343000)",
            "LINESTRING(844400 1343000,844300 1343000,844200 1343000)",
        ));
    }

    #[test]
    fn intersection_false_end_start() {
        assert!(!intersects(
            "LINESTRING(844000 1343000,844100 1343000,844200 1343000)",
            "LINESTRING(844200 1343000,844300 1343000,844400 1343000)",
        ));
    }

    #[test]
    fn intersection_false_loop_end_loop() {
        assert!(!intersects(
            "LINESTRING(1190705.094 390263.56,1190787.013 390248.01,1190811.675 390258.037,1190810.052 390224.994,1190801.125 390198.639,1190799.709 390184.59,1190796.247 390171.454,1190786.65 390161.059,1190772.755 390157.479,1190737.214 390156.946)",
            "LINESTRING(1190737.214 390156.946,1190735.656 390156.923,1190734.175 390153.953,1190737.214 390156.946)",
        ));
    }

    #[test]
    fn intersection_false_start_end() {
        assert!(!intersects(
            "LINESTRING(844200 1343000,844300 1343000,844400 1343000)",
            "LINESTRING(844000 1343000,844100 1343000,844200 1343000)",
        ));
    }

    #[test]
    fn intersection_false_start_end_end_start() {
        assert!(!intersects(
            "LINESTRING(800000 1000000,800010 1000000,800010 1000010)",
            "LINESTRING(800010 1000010,800000 1000010,800000 1000000)",
        ));
    }

    #[test]
    fn intersection_false_start_loop() {
        assert!(!intersects(
            "LINESTRING(800000 1000010,800010 1000010,800010 1000020,800000 1000020,800000 1000010)",
            "LINESTRING(800000 1000010,800000 1000000)",
        ));
    }

    #[test]
    fn intersection_false_start_loop_survey_coordinates() {
        assert!(!intersects(
            "LINESTRING(1189556.287 388686.558,1189562.632 388678.83,1189600.858 388676.435,1189628.151 388671.584,1189641.422 388666.145,1189652.815 388657.629,1189661.246 388647.99,1189673.352 388622.518,1189682.078 388581.915,1189682.664 388567.95,1189676.365 388550.699,1189664.681 388542.216,1189651.787 388538.678,1189609.68 388537.912,1189596.534 388540.359,1189585.183 388547.877,1189574.749 388557.432,1189566.276 388568.068,1189554.171 388593.541,1189552.039 388620.431,1189556.918 388647.614,1189556.58 388679.576,1189556.287 388686.558)",
            "LINESTRING(1189556.287 388686.558,1189555.995 388693.54,1189555.182 388694.284)",
        ));
    }

    #[test]
    fn intersection_false_start_start() {
        assert!(!intersects(
            "LINESTRING(844000 1343000,844100 1343000,844200 1343000)",
            "LINESTRING(844000 1343000,843900 1343000,843800 1343000)",
        ));
    }

    #[test]
    fn intersection_true_end_middle() {
        assert!(intersects(
            "LINESTRING(800020 1000010,800010 1000010,800000 1000010)",
            "LINESTRING(800000 1000000,800000 1000010,800000 1000020)",
        ));
    }

    #[test]
    fn intersection_true_middle_end() {
        assert!(intersects(
            "LINESTRING(800000 1000000,800000 1000010,800000 1000020)",
            "LINESTRING(800020 1000010,800010 1000010,800000 1000010)",
        ));
    }

    #[test]
    fn intersection_true_middle_middle() {
        assert!(intersects(
            "LINESTRING(800000 1000020,800010 1000010,800020 1000020)",
            "LINESTRING(800000 1000000,800010 1000010,800020 1000000)",
        ));
    }

    #[test]
    fn intersection_true_middle_start() {
        assert!(intersects(
            "LINESTRING(800000 1000000,800000 1000010,800000 1000020)",
            "LINESTRING(800000 1000010,800010 1000010,800020 1000010)",
        ));
    }

    #[test]
    fn intersection_true_start_middle() {
        assert!(intersects(
            "LINESTRING(800000 1000010,800010 1000010,800020 1000010)",
            "LINESTRING(800000 1000000,800000 1000010,800000 1000020)",
        ));
    }

    #[test]
    fn intersection_true_overlap() {
        assert!(intersects(
            "LINESTRING(0 0,10 0,20 0)",
            "LINESTRING(20 0,5 0)",
        ));
    }

    #[test]
    fn distant_lines_do_not_intersect() {
        assert!(!intersects(
            "LINESTRING(0 0,10 0)",
            "LINESTRING(100 100,200 200)",
        ));
    }
}
