use crate::geometry::{BoundingBox, LineString};
use crate::math::distance_2d::{point_to_segment_dist, points_equal_2d};
use crate::math::intersect_2d::{segment_intersection, SegmentIntersection};
use crate::math::{Point3, TOLERANCE};
use crate::topology::Graph;

/// Ways a probe line can meet the graph.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Touch {
    /// The lines meet at a single point.
    Point(Point3),
    /// The lines share a collinear stretch.
    Overlap,
}

/// Collects every place where `line` comes within `tolerance` of a graph
/// edge: segment intersections plus vertices lying on the other line.
pub fn touches(graph: &Graph, line: &LineString, tolerance: f64) -> Vec<Touch> {
    let mut found = Vec::new();
    for (a0, a1) in line.segments() {
        let Some(bbox) = BoundingBox::from_points([a0, a1]) else {
            continue;
        };
        for id in graph.edges_intersecting(&bbox.expanded(tolerance)) {
            let Ok(edge) = graph.edge(id) else {
                continue;
            };
            for (b0, b1) in edge.line.segments() {
                match segment_intersection(a0, a1, b0, b1) {
                    Some(SegmentIntersection::Point(p)) => found.push(Touch::Point(p)),
                    Some(SegmentIntersection::Overlap(..)) => found.push(Touch::Overlap),
                    None => {}
                }
                for v in [a0, a1] {
                    if point_to_segment_dist(v, b0, b1) <= tolerance {
                        found.push(Touch::Point(*v));
                    }
                }
                for v in [b0, b1] {
                    if point_to_segment_dist(v, a0, a1) <= tolerance {
                        found.push(Touch::Point(*v));
                    }
                }
            }
        }
    }
    found
}

/// Returns `true` if a touch at `point` is only `line` joining the graph
/// end to end.
///
/// The touch must be at one of `line`'s ends, on a graph node with a single
/// edge. At `graph_start` two edges are allowed so a closed graph can be
/// joined at its start.
pub fn is_end_join(
    graph: &Graph,
    graph_start: &Point3,
    line: &LineString,
    point: &Point3,
    tolerance: f64,
) -> bool {
    let at_line_end =
        points_equal_2d(point, line.start(), tolerance) || points_equal_2d(point, line.end(), tolerance);
    if !at_line_end {
        return false;
    }
    let Some(node) = graph.node_near(point, tolerance) else {
        return false;
    };
    let limit = if points_equal_2d(point, graph_start, tolerance) {
        2
    } else {
        1
    };
    graph.degree(node).is_ok_and(|degree| degree <= limit)
}

/// Removes points within [`TOLERANCE`] of an earlier point.
pub fn dedup_points(points: Vec<Point3>) -> Vec<Point3> {
    let mut unique: Vec<Point3> = Vec::with_capacity(points.len());
    for p in points {
        if !unique.iter().any(|q| points_equal_2d(q, &p, TOLERANCE)) {
            unique.push(p);
        }
    }
    unique
}
