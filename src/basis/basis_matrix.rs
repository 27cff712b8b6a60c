//! Change of basis: from a pre-basis and a set of functionals to the dual
//! basis of those functionals.

use super::coeff_matrix::CoefficientSource;
use super::evaluator::PreBasis;
use crate::basis_error::BasisError;
use crate::config::BasisOptions;
use crate::field::Field;
use crate::interpolation::Interpolation;
use crate::linalg::DenseMatrix;

/// Coefficients of the basis `{φ_r}` with `L_i(φ_r) = δ_ir`.
///
/// With `M[i][j] = L_i(p_j)` for the pre-basis `{p_j}`, the coefficients of
/// `φ_r` over `p_j` are column `r` of `M⁻¹`. When the pre-basis is itself
/// composed, the coefficients are pushed through its own matrix so that
/// they refer to the innermost functions.
#[derive(Clone, Debug)]
pub struct BasisMatrix<F> {
    coefficients: DenseMatrix<F>,
}

impl<F: Field> BasisMatrix<F> {
    pub fn new<P, I>(pre_basis: &P, interpolation: &I) -> Result<Self, BasisError>
    where
        P: PreBasis<F>,
        I: Interpolation<F>,
    {
        Self::with_options(pre_basis, interpolation, &BasisOptions::default())
    }

    pub fn with_options<P, I>(
        pre_basis: &P,
        interpolation: &I,
        options: &BasisOptions,
    ) -> Result<Self, BasisError>
    where
        P: PreBasis<F>,
        I: Interpolation<F>,
    {
        let n = pre_basis.size();
        log::debug!(
            "assembling basis matrix of `{}` over {}",
            interpolation.name(),
            pre_basis.describe()
        );
        let mut matrix = DenseMatrix::new(0, 0);
        interpolation.interpolate(pre_basis, &mut matrix)?;
        if matrix.rows() != n || matrix.cols() != n {
            return Err(BasisError::InvalidInterpolation(format!(
                "`{}` produced a {}x{} matrix for {} functions",
                interpolation.name(),
                matrix.rows(),
                matrix.cols(),
                n
            )));
        }
        let singular = |_| {
            log::error!(
                "singular basis matrix for `{}` on `{}`",
                interpolation.name(),
                pre_basis.topology().name()
            );
            BasisError::SingularSystem {
                functionals: interpolation.name(),
                topology: pre_basis.topology().name(),
                order: pre_basis.order(),
            }
        };
        matrix
            .invert_with_tolerance(options.pivot_tolerance)
            .map_err(singular)?;

        let coefficients = match pre_basis.composition() {
            None => matrix.transpose(),
            Some(inner) => {
                let mut coefficients = DenseMatrix::new(n, inner.base_size());
                for r in 0..n {
                    let out = coefficients.row_mut(r);
                    for j in 0..n {
                        inner.add_row(j, &matrix[(j, r)], out);
                    }
                }
                coefficients
            }
        };
        Ok(Self { coefficients })
    }

    /// Number of target functions.
    pub fn rows(&self) -> usize {
        self.coefficients.rows()
    }

    /// Number of innermost functions the coefficients refer to.
    pub fn cols(&self) -> usize {
        self.coefficients.cols()
    }

    /// Coefficients of target function `r`.
    pub fn row(&self, r: usize, out: &mut [F]) {
        out[..self.cols()].clone_from_slice(self.coefficients.row(r));
    }
}

impl<F: Field> CoefficientSource<F> for BasisMatrix<F> {
    fn row_count(&self) -> usize {
        self.rows()
    }

    fn col_count(&self, _row: usize) -> usize {
        self.cols()
    }

    fn coefficient(&self, row: usize, col: usize) -> F {
        self.coefficients[(row, col)].clone()
    }
}
