//! Dense linear algebra for change-of-basis systems.

pub mod dense;

pub use dense::{DEFAULT_PIVOT_TOLERANCE, DenseMatrix, DenseVector, ExactMatrix};
