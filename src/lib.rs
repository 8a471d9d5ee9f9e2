pub mod config;
pub mod error;
pub mod geometry;
pub mod math;
pub mod operations;
pub mod topology;

pub use config::GraphConfig;
pub use error::{LinegraphError, Result};
pub use geometry::LineString;
pub use operations::{LineMerger, LineStringGraph};
pub use topology::Graph;
