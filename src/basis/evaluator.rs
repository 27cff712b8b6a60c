//! Pre-bases: function families a target basis is expressed in.
//!
//! A pre-basis evaluates `size()` functions at a point, each a block of
//! `dim_range()` components, written function-major into one flat buffer.

use super::coeff_matrix::CoeffMatrix;
use super::monomial::MonomialBasis;
use super::sizes::GradedSizes;
use crate::field::{EvaluationField, Field};
use crate::topology::Topology;

/// A family of (possibly vector-valued) functions on a reference cell.
pub trait PreBasis<F: EvaluationField> {
    /// Number of functions.
    fn size(&self) -> usize;

    /// Number of components of every function.
    fn dim_range(&self) -> usize;

    fn topology(&self) -> &Topology;

    /// Dimension of the domain.
    fn dimension(&self) -> usize {
        self.topology().dimension() as usize
    }

    fn order(&self) -> u32;

    /// Size table of the underlying monomials.
    fn sizes(&self) -> GradedSizes;

    /// Writes `size() * dim_range()` values, function-major.
    fn evaluate(&self, x: &[F], out: &mut [F]);

    fn evaluate_blocks(&self, x: &[F]) -> Blocks<F> {
        let mut values = vec![F::zero(); self.size() * self.dim_range()];
        self.evaluate(x, &mut values);
        Blocks::new(values, self.dim_range())
    }

    /// Diagnostic label used in error messages.
    fn describe(&self) -> String {
        format!("pre-basis on `{}` of order {}", self.topology().name(), self.order())
    }

    /// Coefficients of this pre-basis over its own inner monomials, when it
    /// is itself a composed basis.
    fn composition(&self) -> Option<&CoeffMatrix<F>> {
        None
    }
}

/// Evaluated pre-basis values grouped into one block per function.
#[derive(Clone, Debug, PartialEq)]
pub struct Blocks<F> {
    values: Vec<F>,
    block_size: usize,
}

impl<F> Blocks<F> {
    pub fn new(values: Vec<F>, block_size: usize) -> Self {
        assert!(block_size > 0, "block size must be positive");
        assert_eq!(values.len() % block_size, 0, "values do not split into blocks");
        Self { values, block_size }
    }

    /// Number of blocks.
    pub fn len(&self) -> usize {
        self.values.len() / self.block_size
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn block_size(&self) -> usize {
        self.block_size
    }

    pub fn block(&self, i: usize) -> &[F] {
        &self.values[i * self.block_size..(i + 1) * self.block_size]
    }

    pub fn iter(&self) -> std::slice::ChunksExact<'_, F> {
        self.values.chunks_exact(self.block_size)
    }

    pub fn as_slice(&self) -> &[F] {
        &self.values
    }

    pub fn into_vec(self) -> Vec<F> {
        self.values
    }
}

impl<'b, F> IntoIterator for &'b Blocks<F> {
    type Item = &'b [F];
    type IntoIter = std::slice::ChunksExact<'b, F>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Scalar monomials of degree at most `order`.
#[derive(Clone, Copy, Debug)]
pub struct MonomialEvaluator<'a> {
    basis: &'a MonomialBasis,
    order: u32,
}

impl<'a> MonomialEvaluator<'a> {
    pub fn new(basis: &'a MonomialBasis, order: u32) -> Self {
        Self { basis, order }
    }

    pub fn basis(&self) -> &'a MonomialBasis {
        self.basis
    }
}

impl<F: EvaluationField> PreBasis<F> for MonomialEvaluator<'_> {
    fn size(&self) -> usize {
        self.basis.size(self.order)
    }

    fn dim_range(&self) -> usize {
        1
    }

    fn topology(&self) -> &Topology {
        self.basis.topology()
    }

    fn order(&self) -> u32 {
        self.order
    }

    fn sizes(&self) -> GradedSizes {
        self.basis.sizes(self.order)
    }

    fn evaluate(&self, x: &[F], out: &mut [F]) {
        self.basis.evaluate(self.order, x, out);
    }

    fn describe(&self) -> String {
        format!(
            "monomials on `{}` of order {}",
            self.basis.topology().name(),
            self.order
        )
    }
}

/// `dim_range` copies of the scalar monomials, one per component.
///
/// Function `c * n + i` is the `i`-th monomial in component `c`, zero in all
/// other components. Needs a [`Field`] for those zeros, so it cannot be
/// evaluated symbolically.
#[derive(Clone, Copy, Debug)]
pub struct VectorMonomialEvaluator<'a> {
    basis: &'a MonomialBasis,
    order: u32,
    dim_range: usize,
}

impl<'a> VectorMonomialEvaluator<'a> {
    pub fn new(basis: &'a MonomialBasis, order: u32, dim_range: usize) -> Self {
        Self {
            basis,
            order,
            dim_range,
        }
    }
}

impl<F: Field> PreBasis<F> for VectorMonomialEvaluator<'_> {
    fn size(&self) -> usize {
        self.dim_range * self.basis.size(self.order)
    }

    fn dim_range(&self) -> usize {
        self.dim_range
    }

    fn topology(&self) -> &Topology {
        self.basis.topology()
    }

    fn order(&self) -> u32 {
        self.order
    }

    fn sizes(&self) -> GradedSizes {
        self.basis.sizes(self.order)
    }

    fn evaluate(&self, x: &[F], out: &mut [F]) {
        let n = self.basis.size(self.order);
        let r = self.dim_range;
        assert!(out.len() >= n * r * r, "value buffer too small");
        let scalar = self.basis.evaluate_vec(self.order, x);
        for c in 0..r {
            for (i, m) in scalar.iter().enumerate() {
                let block = &mut out[(c * n + i) * r..(c * n + i + 1) * r];
                for (k, v) in block.iter_mut().enumerate() {
                    *v = if k == c { m.clone() } else { F::zero() };
                }
            }
        }
    }

    fn describe(&self) -> String {
        format!(
            "{}-component monomials on `{}` of order {}",
            self.dim_range,
            self.basis.topology().name(),
            self.order
        )
    }
}
