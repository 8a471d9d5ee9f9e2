pub mod cleanup;
pub mod line_merge;

pub use cleanup::LineStringGraph;
pub use line_merge::LineMerger;
