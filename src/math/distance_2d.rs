use super::{Point3, Vector2};

/// Returns the planar distance between two points, ignoring `z`.
#[must_use]
pub fn distance_2d(a: &Point3, b: &Point3) -> f64 {
    (b.xy() - a.xy()).norm()
}

/// Returns `true` if `a` and `b` are within `tolerance` of each other in
/// the plane. The boundary is inclusive; a zero tolerance means exact
/// `x`/`y` equality.
#[must_use]
#[allow(clippy::float_cmp)]
pub fn points_equal_2d(a: &Point3, b: &Point3, tolerance: f64) -> bool {
    if tolerance == 0.0 {
        a.x == b.x && a.y == b.y
    } else {
        distance_2d(a, b) <= tolerance
    }
}

/// Returns the projection factor of `p` onto the infinite line through
/// `a` and `b`: `0` at `a`, `1` at `b`. A zero-length segment yields `0`.
#[must_use]
pub fn projection_factor(p: &Point3, a: &Point3, b: &Point3) -> f64 {
    let d: Vector2 = b.xy() - a.xy();
    let len_sq = d.norm_squared();
    if len_sq < 1e-20 {
        return 0.0;
    }
    (p.xy() - a.xy()).dot(&d) / len_sq
}

/// Returns the minimum planar distance from `p` to the segment `a`→`b`.
#[must_use]
pub fn point_to_segment_dist(p: &Point3, a: &Point3, b: &Point3) -> f64 {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    let len_sq = dx * dx + dy * dy;

    if len_sq < 1e-20 {
        // Degenerate segment (zero length).
        return distance_2d(p, a);
    }

    // Project point onto the infinite line, clamp to [0, 1].
    let t = ((p.x - a.x) * dx + (p.y - a.y) * dy) / len_sq;
    let t = t.clamp(0.0, 1.0);

    let closest_x = a.x + t * dx;
    let closest_y = a.y + t * dy;

    ((p.x - closest_x).powi(2) + (p.y - closest_y).powi(2)).sqrt()
}

/// Linearly interpolates the elevation of segment `a`→`b` at factor `t`.
#[must_use]
pub fn interpolate_z(a: &Point3, b: &Point3, t: f64) -> f64 {
    a.z + (b.z - a.z) * t
}
