//! BasisError: Unified error type for refelem-basis public APIs
//!
//! Basis construction is a configuration-time activity: every error here
//! means the requested element cannot be built, and none of them is retried.

use thiserror::Error;

/// Unified error type for basis construction and evaluation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BasisError {
    /// The degrees of freedom do not determine a unique polynomial.
    #[error(
        "while computing basis `{functionals}` on topology `{topology}` (order {order}) a singular matrix was constructed"
    )]
    SingularSystem {
        functionals: String,
        topology: String,
        order: u32,
    },
    /// Gauss-Jordan elimination found no usable pivot in column `pivot`.
    #[error("matrix is singular: pivot column {pivot} vanishes")]
    SingularMatrix { pivot: usize },
    /// Inversion requested on a rectangular matrix.
    #[error("cannot invert a {rows}x{cols} matrix (must be square)")]
    NonSquareMatrix { rows: usize, cols: usize },
    /// Caller-provided buffer does not match the required size.
    #[error("buffer size mismatch: expected {expected}, found {found}")]
    CapacityMismatch { expected: usize, found: usize },
    /// A point has the wrong number of coordinates for the cell.
    #[error("point has {found} coordinates, cell dimension is {expected}")]
    DimensionMismatch { expected: usize, found: usize },
    /// Topology name, id or cell type cannot be mapped to a reference cell.
    #[error("invalid topology: {0}")]
    InvalidTopology(String),
    /// An interpolation collaborator produced inconsistent data.
    #[error("invalid interpolation: {0}")]
    InvalidInterpolation(String),
    /// Evaluation past the order a basis was built for.
    #[error("order {requested} exceeds the maximal order {max} of this basis")]
    OrderOutOfRange { requested: u32, max: u32 },
    /// A table violated its structural invariants.
    #[error("invariant violated: {0}")]
    InvariantViolation(String),
}
