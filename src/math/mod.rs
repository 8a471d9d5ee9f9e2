pub mod distance_2d;
pub mod intersect_2d;

/// Point type used for line vertices. Topology only looks at `x` and `y`;
/// `z` is carried along when a line has elevations.
pub type Point3 = nalgebra::Point3<f64>;

/// 2D vector type.
pub type Vector2 = nalgebra::Vector2<f64>;

/// Global geometric tolerance for floating-point comparisons.
pub const TOLERANCE: f64 = 1e-10;
