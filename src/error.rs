use thiserror::Error;

/// Top-level error type for the Euler kernel.
#[derive(Debug, Error)]
pub enum KernelError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Topology(#[from] TopologyError),

    #[error(transparent)]
    Operation(#[from] OperationError),
}

/// Errors related to curve payload construction.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("degenerate geometry: {0}")]
    Degenerate(String),

    #[error("zero-length vector")]
    ZeroVector,
}

/// Errors related to topological operations.
#[derive(Debug, Error)]
pub enum TopologyError {
    #[error("entity not found: {0}")]
    EntityNotFound(&'static str),

    #[error("vertex has no coedge in the given loop")]
    VertexNotOnLoop,

    #[error("coedge does not use the given edge")]
    EdgeMismatch,

    #[error("inconsistent loop: {0}")]
    InconsistentLoop(String),

    /// Two edges meeting at a vertex cannot be fused into one.
    ///
    /// This is an ordinary "not allowed" outcome of
    /// [`MergeEdgesOnVertex`](crate::operations::euler::MergeEdgesOnVertex),
    /// not a sign of corruption.
    #[error("edges cannot be merged: {0}")]
    IncompatibleMerge(MergeConflict),

    #[error("invalid topology: {0}")]
    InvalidTopology(String),
}

/// Why two edges sharing a vertex were refused a merge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MergeConflict {
    #[error("split/inner flags differ")]
    FlagMismatch,

    #[error("curve kinds differ")]
    CurveKind,

    #[error("lines are not coincident")]
    NotCoincident,

    #[error("arcs do not share center and radius")]
    NotConcentric,

    #[error("merged edge would start and end at the same vertex")]
    WouldCollapse,
}

/// Errors related to malformed operator arguments.
#[derive(Debug, Error)]
pub enum OperationError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

/// Convenience type alias for results using [`KernelError`].
pub type Result<T> = std::result::Result<T, KernelError>;
