//! Monomial bases, pre-basis evaluators and change-of-basis machinery.

pub mod basis_matrix;
pub mod coeff_matrix;
pub mod evaluator;
pub mod monomial;
pub mod orthonormal;
pub mod polynomial;
pub mod print;
pub mod raviart_thomas;
pub mod sizes;

pub use basis_matrix::BasisMatrix;
pub use coeff_matrix::{CoeffMatrix, CoefficientSource};
pub use evaluator::{Blocks, MonomialEvaluator, PreBasis, VectorMonomialEvaluator};
pub use monomial::MonomialBasis;
pub use orthonormal::{OrthonormalBasis, OrthonormalCoefficients};
pub use polynomial::PolynomialBasis;
pub use print::{symbolic_monomials, write_polynomials};
pub use raviart_thomas::RaviartThomasEvaluator;
pub use sizes::GradedSizes;
