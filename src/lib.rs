#![cfg_attr(docsrs, feature(doc_cfg))]
//! # refelem-basis
//!
//! refelem-basis builds the local shape functions of finite elements on
//! recursively constructed reference cells. Every cell is a point wrapped in
//! a chain of prism and pyramid constructors, which covers simplices, cubes,
//! prisms and pyramids of any dimension with a single recursion.
//!
//! ## Features
//! - Graded monomial bases with exact size tables, evaluation and cell integrals
//! - Dense matrices with in-place Gauss–Jordan inversion over `f64` or exact rationals
//! - Change of basis from any pre-basis and set of functionals (Lagrange, Raviart–Thomas, …)
//! - L²-orthonormal bases computed by exact Gram–Schmidt
//! - Symbolic evaluation with exponent vectors for diagnostic listings
//!
//! ## Usage
//!
//! ```
//! use refelem_basis::prelude::*;
//!
//! let monomials = MonomialBasis::new(Topology::triangle());
//! let pre_basis = MonomialEvaluator::new(&monomials, 1);
//! let nodes = PointInterpolation::new(vec![vec![0.0, 0.0], vec![1.0, 0.0], vec![0.0, 1.0]]);
//! let matrix = BasisMatrix::new(&pre_basis, &nodes)?;
//! let p1 = PolynomialBasis::from_basis_matrix(pre_basis, &matrix)?;
//!
//! let mut values = [0.0; 3];
//! p1.evaluate(&[0.25, 0.5], &mut values);
//! assert!((values[0] - 0.25).abs() < 1e-12);
//! # Ok::<(), BasisError>(())
//! ```
//!
//! ## Determinism
//!
//! All computations are deterministic. Randomized tests draw from `SmallRng`
//! with fixed seeds.

pub mod basis;
pub mod basis_error;
pub mod config;
pub mod debug_invariants;
pub mod field;
pub mod interpolation;
pub mod linalg;
pub mod provider;
pub mod topology;

pub use debug_invariants::DebugInvariants;

/// A convenient prelude to import the most-used traits & types:
pub mod prelude {
    pub use crate::basis::{
        BasisMatrix, Blocks, CoeffMatrix, CoefficientSource, GradedSizes, MonomialBasis,
        MonomialEvaluator, OrthonormalBasis, OrthonormalCoefficients, PolynomialBasis, PreBasis,
        RaviartThomasEvaluator, VectorMonomialEvaluator,
    };
    pub use crate::basis_error::BasisError;
    pub use crate::config::BasisOptions;
    pub use crate::debug_invariants::DebugInvariants;
    pub use crate::field::{EvaluationField, ExactField, Field, MultiIndex};
    pub use crate::interpolation::{
        Interpolation, LocalInterpolation, NormalFluxInterpolation, PointInterpolation,
        PowerInterpolation,
    };
    pub use crate::linalg::{DenseMatrix, DenseVector, ExactMatrix};
    pub use crate::provider::BasisProvider;
    pub use crate::topology::{CellType, Constructor, Topology, TopologyKey};
}
