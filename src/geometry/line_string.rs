use crate::error::GeometryError;
use crate::math::distance_2d::{
    distance_2d, interpolate_z, point_to_segment_dist, points_equal_2d, projection_factor,
};
use crate::math::intersect_2d::proper_crossing;
use crate::math::Point3;

use super::bounding_box::BoundingBox;

/// An ordered, immutable sequence of at least two points.
///
/// Topology works in the plane: lengths, distances and equality only look
/// at `x` and `y`. When `has_z` is `false` every `z` is `0.0`.
#[derive(Debug, Clone, PartialEq)]
pub struct LineString {
    points: Vec<Point3>,
    has_z: bool,
}

impl LineString {
    /// Creates a 2D line from `points`, dropping any `z` values.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::Degenerate`] if fewer than 2 points are given.
    pub fn new(points: Vec<Point3>) -> Result<Self, GeometryError> {
        let points = points
            .into_iter()
            .map(|p| Point3::new(p.x, p.y, 0.0))
            .collect();
        Self::with_dimension(points, false)
    }

    /// Creates a line that keeps the `z` of each point.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::Degenerate`] if fewer than 2 points are given.
    pub fn new_3d(points: Vec<Point3>) -> Result<Self, GeometryError> {
        Self::with_dimension(points, true)
    }

    /// Creates a 2D line from `(x, y)` pairs.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::Degenerate`] if fewer than 2 pairs are given.
    pub fn from_xy(coords: &[(f64, f64)]) -> Result<Self, GeometryError> {
        Self::with_dimension(
            coords.iter().map(|&(x, y)| Point3::new(x, y, 0.0)).collect(),
            false,
        )
    }

    pub(crate) fn with_dimension(points: Vec<Point3>, has_z: bool) -> Result<Self, GeometryError> {
        if points.len() < 2 {
            return Err(GeometryError::Degenerate(format!(
                "line string needs at least 2 points, got {}",
                points.len()
            )));
        }
        Ok(Self { points, has_z })
    }

    /// Two-point line between `a` and `b`.
    #[must_use]
    pub fn segment(a: Point3, b: Point3, has_z: bool) -> Self {
        Self {
            points: vec![a, b],
            has_z,
        }
    }

    #[must_use]
    pub fn points(&self) -> &[Point3] {
        &self.points
    }

    #[must_use]
    pub fn has_z(&self) -> bool {
        self.has_z
    }

    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.points.len()
    }

    #[must_use]
    pub fn start(&self) -> &Point3 {
        &self.points[0]
    }

    #[must_use]
    pub fn end(&self) -> &Point3 {
        &self.points[self.points.len() - 1]
    }

    /// Iterates over consecutive vertex pairs.
    pub fn segments(&self) -> impl Iterator<Item = (&Point3, &Point3)> + '_ {
        self.points.windows(2).map(|w| (&w[0], &w[1]))
    }

    /// Planar length of the line.
    #[must_use]
    pub fn length(&self) -> f64 {
        self.segments().map(|(a, b)| distance_2d(a, b)).sum()
    }

    /// Returns `true` if every vertex is at the same location.
    #[must_use]
    pub fn is_zero_length(&self) -> bool {
        self.length() <= 0.0
    }

    /// Returns `true` if the line starts where it ends.
    #[must_use]
    pub fn is_closed(&self, tolerance: f64) -> bool {
        points_equal_2d(self.start(), self.end(), tolerance)
    }

    /// Returns a new line with the vertices in reverse order.
    #[must_use]
    pub fn reversed(&self) -> Self {
        Self {
            points: self.points.iter().rev().copied().collect(),
            has_z: self.has_z,
        }
    }

    /// Concatenates `other` onto the end of this line. The shared joint
    /// appears once in the result, taken from `self`.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::Disjoint`] if `self` does not end where
    /// `other` starts.
    pub fn merge(&self, other: &Self, tolerance: f64) -> Result<Self, GeometryError> {
        if !points_equal_2d(self.end(), other.start(), tolerance) {
            return Err(GeometryError::Disjoint);
        }
        let mut points = Vec::with_capacity(self.points.len() + other.points.len() - 1);
        points.extend_from_slice(&self.points);
        points.extend_from_slice(&other.points[1..]);
        Ok(Self {
            points,
            has_z: self.has_z && other.has_z,
        })
    }

    /// Returns a copy whose first and last vertices are moved onto
    /// `start` and `end` in the plane. Elevations are kept.
    #[must_use]
    pub fn with_end_points(&self, start: &Point3, end: &Point3) -> Self {
        let mut points = self.points.clone();
        let last = points.len() - 1;
        points[0].x = start.x;
        points[0].y = start.y;
        points[last].x = end.x;
        points[last].y = end.y;
        Self {
            points,
            has_z: self.has_z,
        }
    }

    /// Vertex-by-vertex planar equality.
    #[must_use]
    pub fn equals(&self, other: &Self, tolerance: f64) -> bool {
        self.points.len() == other.points.len()
            && self
                .points
                .iter()
                .zip(&other.points)
                .all(|(a, b)| points_equal_2d(a, b, tolerance))
    }

    /// Equality that also accepts `other` running the opposite way.
    #[must_use]
    pub fn equals_either_direction(&self, other: &Self, tolerance: f64) -> bool {
        self.points.len() == other.points.len()
            && (self.equals(other, tolerance)
                || self
                    .points
                    .iter()
                    .zip(other.points.iter().rev())
                    .all(|(a, b)| points_equal_2d(a, b, tolerance)))
    }

    /// Planar distance from `point` to the nearest segment.
    #[must_use]
    pub fn distance_to(&self, point: &Point3) -> f64 {
        self.segments()
            .map(|(a, b)| point_to_segment_dist(point, a, b))
            .fold(f64::INFINITY, f64::min)
    }

    /// Elevation of the line at the point on it nearest to `point`,
    /// interpolated along the closest segment. `None` for a 2D line.
    #[must_use]
    pub fn z_at(&self, point: &Point3) -> Option<f64> {
        if !self.has_z {
            return None;
        }
        let (a, b) = self.segments().min_by(|s, t| {
            point_to_segment_dist(point, s.0, s.1).total_cmp(&point_to_segment_dist(point, t.0, t.1))
        })?;
        Some(interpolate_z(a, b, projection_factor(point, a, b).clamp(0.0, 1.0)))
    }

    /// Returns `true` if `point` is within `tolerance` of the line but not
    /// within `tolerance` of either end.
    #[must_use]
    pub fn is_point_on_interior(&self, point: &Point3, tolerance: f64) -> bool {
        self.distance_to(point) <= tolerance
            && !points_equal_2d(point, self.start(), tolerance)
            && !points_equal_2d(point, self.end(), tolerance)
    }

    /// Points where a segment of this line properly crosses a segment of
    /// `other`. Touches and collinear overlaps are not crossings.
    #[must_use]
    pub fn crossings(&self, other: &Self) -> Vec<Point3> {
        let mut points: Vec<Point3> = Vec::new();
        for (a0, a1) in self.segments() {
            for (b0, b1) in other.segments() {
                if let Some(mut p) = proper_crossing(a0, a1, b0, b1) {
                    if !self.has_z {
                        p.z = 0.0;
                    }
                    if !points.iter().any(|q| points_equal_2d(q, &p, 0.0)) {
                        points.push(p);
                    }
                }
            }
        }
        points
    }

    #[must_use]
    pub fn bounding_box(&self) -> BoundingBox {
        let first = self.start();
        self.points.iter().fold(
            BoundingBox {
                min_x: first.x,
                min_y: first.y,
                max_x: first.x,
                max_y: first.y,
            },
            |b, p| BoundingBox {
                min_x: b.min_x.min(p.x),
                min_y: b.min_y.min(p.y),
                max_x: b.max_x.max(p.x),
                max_y: b.max_y.max(p.y),
            },
        )
    }
}
