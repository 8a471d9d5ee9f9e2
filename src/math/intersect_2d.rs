use super::distance_2d::{interpolate_z, points_equal_2d, projection_factor};
use super::{Point3, TOLERANCE};

/// Result of intersecting two bounded segments in the plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SegmentIntersection {
    /// The segments meet in a single point.
    Point(Point3),
    /// The segments are collinear and share the sub-segment between the
    /// two points.
    Overlap(Point3, Point3),
}

/// Returns `true` if the cross product of the two segment directions is
/// negligible relative to their lengths.
fn is_parallel(cross: f64, len_a: f64, len_b: f64) -> bool {
    cross.abs() <= TOLERANCE * len_a * len_b
}

/// Bounded segment-segment intersection in 2D, including endpoint touches
/// and collinear overlaps.
///
/// The `z` of a returned point is interpolated along segment `a`.
#[must_use]
pub fn segment_intersection(
    a0: &Point3,
    a1: &Point3,
    b0: &Point3,
    b1: &Point3,
) -> Option<SegmentIntersection> {
    let da = a1.xy() - a0.xy();
    let db = b1.xy() - b0.xy();
    let len_a = da.norm();
    let len_b = db.norm();

    let cross = da.x * db.y - da.y * db.x;
    if is_parallel(cross, len_a, len_b) {
        return collinear_intersection(a0, a1, b0, b1);
    }

    let dx = b0.x - a0.x;
    let dy = b0.y - a0.y;
    let t = (dx * db.y - dy * db.x) / cross;
    let u = (dx * da.y - dy * da.x) / cross;

    // Use a small epsilon to include endpoints.
    let eps = TOLERANCE;
    if t >= -eps && t <= 1.0 + eps && u >= -eps && u <= 1.0 + eps {
        let t = t.clamp(0.0, 1.0);
        Some(SegmentIntersection::Point(point_at(a0, a1, t)))
    } else {
        None
    }
}

/// Intersection of two parallel segments: empty unless they lie on the
/// same line and their extents touch.
fn collinear_intersection(
    a0: &Point3,
    a1: &Point3,
    b0: &Point3,
    b1: &Point3,
) -> Option<SegmentIntersection> {
    let da = a1.xy() - a0.xy();
    let len_a = da.norm();
    if len_a < TOLERANCE {
        return degenerate_intersection(a0, b0, b1);
    }
    let to_b0 = b0.xy() - a0.xy();
    let offset = (da.x * to_b0.y - da.y * to_b0.x).abs() / len_a;
    if offset > TOLERANCE * len_a.max(1.0) {
        return None;
    }

    let tb0 = projection_factor(b0, a0, a1);
    let tb1 = projection_factor(b1, a0, a1);
    let lo = tb0.min(tb1).max(0.0);
    let hi = tb0.max(tb1).min(1.0);
    let eps = TOLERANCE;
    if lo > hi + eps {
        None
    } else if (hi - lo) * len_a <= eps {
        Some(SegmentIntersection::Point(point_at(a0, a1, lo)))
    } else {
        Some(SegmentIntersection::Overlap(
            point_at(a0, a1, lo),
            point_at(a0, a1, hi),
        ))
    }
}

fn degenerate_intersection(a: &Point3, b0: &Point3, b1: &Point3) -> Option<SegmentIntersection> {
    let t = projection_factor(a, b0, b1).clamp(0.0, 1.0);
    let foot = point_at(b0, b1, t);
    points_equal_2d(a, &foot, TOLERANCE).then_some(SegmentIntersection::Point(*a))
}

/// Returns the point where two segments cross properly: the segments are
/// not parallel, the crossing lies strictly inside both of them, and it is
/// not at any of the four endpoints.
#[must_use]
pub fn proper_crossing(a0: &Point3, a1: &Point3, b0: &Point3, b1: &Point3) -> Option<Point3> {
    let da = a1.xy() - a0.xy();
    let db = b1.xy() - b0.xy();
    let cross = da.x * db.y - da.y * db.x;
    if is_parallel(cross, da.norm(), db.norm()) {
        return None;
    }

    let dx = b0.x - a0.x;
    let dy = b0.y - a0.y;
    let t = (dx * db.y - dy * db.x) / cross;
    let u = (dx * da.y - dy * da.x) / cross;

    let eps = TOLERANCE;
    if t <= eps || t >= 1.0 - eps || u <= eps || u >= 1.0 - eps {
        return None;
    }
    let point = point_at(a0, a1, t);
    let at_endpoint = [a0, a1, b0, b1]
        .iter()
        .any(|end| points_equal_2d(&point, end, TOLERANCE));
    (!at_endpoint).then_some(point)
}

/// Linear interpolation along `a`→`b` at factor `t`, including `z`.
#[must_use]
pub fn point_at(a: &Point3, b: &Point3, t: f64) -> Point3 {
    Point3::new(
        a.x + (b.x - a.x) * t,
        a.y + (b.y - a.y) * t,
        interpolate_z(a, b, t),
    )
}
