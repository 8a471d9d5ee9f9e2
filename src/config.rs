use crate::error::ConfigError;

/// Default distance used to snap nodes onto nearby edges.
///
/// Equivalent to a precision model with a scale factor of 1000.
pub const DEFAULT_SNAP_TOLERANCE: f64 = 0.001;

/// Tolerances used by a [`Graph`](crate::topology::Graph) and the
/// operations built on top of it.
///
/// All distance comparisons are inclusive: two points exactly
/// `tolerance` apart are treated as the same point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GraphConfig {
    /// Maximum distance for two coordinates to resolve to the same node.
    /// `0.0` means exact coordinate matching.
    pub node_tolerance: f64,
    /// Maximum distance between a node and an edge for the edge to be
    /// split at the node.
    pub snap_tolerance: f64,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            node_tolerance: 0.0,
            snap_tolerance: DEFAULT_SNAP_TOLERANCE,
        }
    }
}

impl GraphConfig {
    /// Creates a configuration with default tolerances.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style setter for the node matching tolerance.
    #[must_use]
    pub fn with_node_tolerance(mut self, tolerance: f64) -> Self {
        self.node_tolerance = tolerance;
        self
    }

    /// Builder-style setter for the node-to-edge snapping tolerance.
    #[must_use]
    pub fn with_snap_tolerance(mut self, tolerance: f64) -> Self {
        self.snap_tolerance = tolerance;
        self
    }

    /// Checks that both tolerances are finite and non-negative.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidTolerance`] naming the first bad value.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_tolerance("node_tolerance", self.node_tolerance)?;
        check_tolerance("snap_tolerance", self.snap_tolerance)
    }
}

fn check_tolerance(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidTolerance { name, value })
    }
}
