use thiserror::Error;

/// Top-level error type for the linegraph crate.
#[derive(Debug, Error)]
pub enum LinegraphError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Topology(#[from] TopologyError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// Errors related to line geometry.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("degenerate geometry: {0}")]
    Degenerate(String),

    #[error("lines cannot be merged: end of first line does not touch start of second")]
    Disjoint,
}

/// Errors related to the node/edge graph.
#[derive(Debug, Error)]
pub enum TopologyError {
    #[error("entity not found: {0}")]
    EntityNotFound(&'static str),

    #[error("entity has been removed: {0}")]
    RemovedEntity(&'static str),

    #[error("invalid topology: {0}")]
    InvalidTopology(String),
}

/// Errors related to graph configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{name} must be finite and non-negative, got {value}")]
    InvalidTolerance { name: &'static str, value: f64 },
}

/// Errors raised while reading geometry text.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("invalid WKT: {0}")]
    Wkt(String),
}

/// Convenience type alias for results using [`LinegraphError`].
pub type Result<T> = std::result::Result<T, LinegraphError>;
