pub mod bounding_box;
pub mod line_string;
pub mod wkt;

pub use bounding_box::BoundingBox;
pub use line_string::LineString;
