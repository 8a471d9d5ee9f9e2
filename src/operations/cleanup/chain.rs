use crate::geometry::LineString;
use crate::math::Point3;
use crate::topology::{Graph, NodeId};

/// Joins the graph's edges into lines, taking edges in index order.
///
/// An edge extends the current line when it starts where the previous edge
/// ended. A line ends at any node whose degree is not 2, and whenever the
/// next edge does not continue it. Zero-length edges are skipped.
pub fn chain_edges(graph: &Graph) -> Vec<LineString> {
    let mut lines = Vec::new();
    let mut points: Vec<Point3> = Vec::new();
    let mut previous: Option<NodeId> = None;
    let mut has_z = false;

    for id in graph.edges_sorted() {
        let Ok(edge) = graph.edge(id) else {
            continue;
        };
        if edge.line.is_zero_length() {
            continue;
        }
        if previous == Some(edge.from) && !points.is_empty() {
            points.extend_from_slice(&edge.line.points()[1..]);
        } else {
            flush(&mut lines, &mut points, has_z);
            points.extend_from_slice(edge.line.points());
        }
        has_z = edge.line.has_z();
        previous = Some(edge.to);

        if !matches!(graph.degree(edge.to), Ok(2)) {
            flush(&mut lines, &mut points, has_z);
            points.push(*edge.line.end());
        }
    }
    flush(&mut lines, &mut points, has_z);
    lines
}

fn flush(lines: &mut Vec<LineString>, points: &mut Vec<Point3>, has_z: bool) {
    let taken = std::mem::take(points);
    if taken.len() > 1 {
        if let Ok(line) = LineString::with_dimension(taken, has_z) {
            lines.push(line);
        }
    }
}
