//! Composed evaluator: coefficient matrix applied to a pre-basis.

use super::coeff_matrix::{CoeffMatrix, CoefficientSource};
use super::evaluator::PreBasis;
use super::print::write_polynomials;
use super::sizes::GradedSizes;
use crate::basis_error::BasisError;
use crate::field::{Field, MultiIndex};
use crate::topology::Topology;
use std::fmt;

/// Target basis expressed over the functions of a pre-basis `E`.
#[derive(Clone, Debug)]
pub struct PolynomialBasis<E, F> {
    pre_basis: E,
    matrix: CoeffMatrix<F>,
}

impl<E, F> PolynomialBasis<E, F>
where
    E: PreBasis<F>,
    F: Field,
{
    /// Fill the coefficient table from `source`; every row must refer to
    /// functions of `pre_basis`.
    pub fn new(pre_basis: E, source: &impl CoefficientSource<F>) -> Result<Self, BasisError> {
        let base_size = pre_basis.size();
        if let Some(row) = (0..source.row_count()).find(|&r| source.col_count(r) > base_size) {
            return Err(BasisError::CapacityMismatch {
                expected: base_size,
                found: source.col_count(row),
            });
        }
        let matrix = CoeffMatrix::fill(source, base_size, pre_basis.dim_range());
        Ok(Self { pre_basis, matrix })
    }

    /// Build the basis described by a change-of-basis matrix whose
    /// coefficients refer to `pre_basis`.
    pub fn from_basis_matrix(
        pre_basis: E,
        basis_matrix: &impl CoefficientSource<F>,
    ) -> Result<Self, BasisError> {
        Self::new(pre_basis, basis_matrix)
    }

    pub fn matrix(&self) -> &CoeffMatrix<F> {
        &self.matrix
    }

    pub fn pre_basis(&self) -> &E {
        &self.pre_basis
    }

    /// Write every basis function, one per line, in terms of `labels`
    /// (one label per pre-basis function).
    pub fn print(&self, w: &mut impl fmt::Write, labels: &[MultiIndex]) -> fmt::Result {
        let as_f64 = CoeffMatrix::fill(
            &Converted(&self.matrix),
            self.matrix.base_size(),
            self.matrix.dim_range(),
        );
        write_polynomials(w, &as_f64, labels)
    }
}

struct Converted<'m, F>(&'m CoeffMatrix<F>);

impl<F: Field> CoefficientSource<f64> for Converted<'_, F> {
    fn row_count(&self) -> usize {
        self.0.size()
    }

    fn col_count(&self, _row: usize) -> usize {
        self.0.base_size()
    }

    fn coefficient(&self, row: usize, col: usize) -> f64 {
        self.0
            .row(row)
            .iter()
            .find(|(c, _)| *c == col)
            .map_or(0.0, |(_, v)| v.to_f64())
    }
}

impl<E, F> PreBasis<F> for PolynomialBasis<E, F>
where
    E: PreBasis<F>,
    F: Field,
{
    fn size(&self) -> usize {
        self.matrix.size()
    }

    fn dim_range(&self) -> usize {
        self.pre_basis.dim_range()
    }

    fn topology(&self) -> &Topology {
        self.pre_basis.topology()
    }

    fn order(&self) -> u32 {
        self.pre_basis.order()
    }

    fn sizes(&self) -> GradedSizes {
        self.pre_basis.sizes()
    }

    fn evaluate(&self, x: &[F], out: &mut [F]) {
        let base = self.pre_basis.evaluate_blocks(x);
        self.matrix.mult(base.as_slice(), out);
    }

    fn describe(&self) -> String {
        format!("composed basis over {}", self.pre_basis.describe())
    }

    fn composition(&self) -> Option<&CoeffMatrix<F>> {
        Some(&self.matrix)
    }
}
