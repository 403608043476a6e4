//! Error types for map generation

use thiserror::Error;

/// Errors raised by geometric constructions that cannot degrade gracefully
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryError {
    /// The perpendicular bisectors of a triangle did not meet in a single point
    #[error("failed to calculate circumcenter of triangle {0}")]
    CircumcenterFailed(String),
    /// A triangle collapsed into a line where a proper triangle was required
    #[error("degenerate triangle {0}")]
    DegenerateTriangle(String),
}

/// Errors that can occur during map generation or queries
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MapError {
    /// Configuration validation failed
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    /// Generation failed for a reason other than geometry
    #[error("generation failed: {0}")]
    GenerationFailed(String),
    /// Generation was aborted by a geometric failure
    #[error("geometry failure: {0}")]
    Geometry(#[from] GeometryError),
    /// Requested tile index does not exist
    #[error("tile not found: {0}")]
    TileNotFound(usize),
    /// Requested node index does not exist
    #[error("node not found: {0}")]
    NodeNotFound(usize),
}

/// Result type alias for map operations
pub type Result<T> = std::result::Result<T, MapError>;
