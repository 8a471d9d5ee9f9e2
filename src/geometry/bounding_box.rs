use rstar::AABB;

use crate::math::Point3;

/// Axis-aligned planar bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl BoundingBox {
    /// Returns the smallest box containing all `points`, or `None` if the
    /// iterator is empty.
    pub fn from_points<'a>(points: impl IntoIterator<Item = &'a Point3>) -> Option<Self> {
        points.into_iter().fold(None, |bbox, p| {
            Some(match bbox {
                None => Self {
                    min_x: p.x,
                    min_y: p.y,
                    max_x: p.x,
                    max_y: p.y,
                },
                Some(b) => Self {
                    min_x: b.min_x.min(p.x),
                    min_y: b.min_y.min(p.y),
                    max_x: b.max_x.max(p.x),
                    max_y: b.max_y.max(p.y),
                },
            })
        })
    }

    /// Returns a box around a single point, grown by `distance` on every side.
    #[must_use]
    pub fn around(point: &Point3, distance: f64) -> Self {
        Self {
            min_x: point.x - distance,
            min_y: point.y - distance,
            max_x: point.x + distance,
            max_y: point.y + distance,
        }
    }

    /// Returns this box grown by `distance` on every side.
    #[must_use]
    pub fn expanded(&self, distance: f64) -> Self {
        Self {
            min_x: self.min_x - distance,
            min_y: self.min_y - distance,
            max_x: self.max_x + distance,
            max_y: self.max_y + distance,
        }
    }

    /// Returns `true` if the two boxes overlap or touch.
    #[must_use]
    pub fn intersects(&self, other: &Self) -> bool {
        self.min_x <= other.max_x
            && other.min_x <= self.max_x
            && self.min_y <= other.max_y
            && other.min_y <= self.max_y
    }

    /// Converts to an R-tree envelope.
    #[must_use]
    pub fn to_aabb(&self) -> AABB<[f64; 2]> {
        AABB::from_corners([self.min_x, self.min_y], [self.max_x, self.max_y])
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn from_points_covers_all() {
        let pts = [
            Point3::new(1.0, 5.0, 0.0),
            Point3::new(-2.0, 3.0, 0.0),
            Point3::new(4.0, -1.0, 0.0),
        ];
        let bbox = BoundingBox::from_points(&pts).unwrap();
        assert_eq!(
            bbox,
            BoundingBox {
                min_x: -2.0,
                min_y: -1.0,
                max_x: 4.0,
                max_y: 5.0
            }
        );
    }

    #[test]
    fn empty_has_no_box() {
        assert!(BoundingBox::from_points(&[]).is_none());
    }

    #[test]
    fn touching_boxes_intersect() {
        let a = BoundingBox::around(&Point3::new(0.0, 0.0, 0.0), 1.0);
        let b = BoundingBox::around(&Point3::new(2.0, 0.0, 0.0), 1.0);
        let c = BoundingBox::around(&Point3::new(2.5, 0.0, 0.0), 1.0);
        assert!(a.intersects(&b));
        assert!(!a.intersects(&c));
        assert!(a.expanded(0.5).intersects(&c));
    }
}
