//! L²-orthonormal bases obtained by exact Gram–Schmidt over monomials.
//!
//! The pre-basis is always the total-degree monomial basis of the cell's
//! dimension, so the first `size(k)` functions span `P_k` on every cell.
//! Orthogonalization runs in exact rational arithmetic; only the final
//! normalization by `sqrt(‖u_i‖²)` happens in `f64`.

use super::coeff_matrix::{CoeffMatrix, CoefficientSource};
use super::monomial::MonomialBasis;
use super::print::{symbolic_monomials, write_polynomials};
use crate::basis_error::BasisError;
use crate::field::{Field, MultiIndex, field_cast};
use crate::topology::Topology;
use num_rational::BigRational;
use num_traits::{Signed, Zero};
use std::fmt;

/// Lower-triangular coefficients of the orthonormal functions over the
/// standard monomials. Row `i` holds `i + 1` entries.
#[derive(Clone, Debug, PartialEq)]
pub struct OrthonormalCoefficients {
    rows: Vec<Vec<f64>>,
    topology: Topology,
    max_order: u32,
}

impl OrthonormalCoefficients {
    pub fn compute(topology: &Topology, max_order: u32) -> Result<Self, BasisError> {
        let dim = topology.dimension() as usize;
        let monomials = MonomialBasis::standard(dim as u32);
        let exponents = symbolic_monomials(&monomials, max_order)
            .iter()
            .map(|m| {
                m.polynomial_exponents(dim).ok_or_else(|| {
                    BasisError::InvariantViolation(format!("`{m}` is not a monomial"))
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        let n = exponents.len();
        log::debug!(
            "orthonormalizing {n} monomials on `{}` up to order {max_order}",
            topology.name()
        );

        let mut gram = vec![vec![BigRational::zero(); n]; n];
        for i in 0..n {
            for j in 0..=i {
                let sum: Vec<u32> = exponents[i]
                    .iter()
                    .zip(&exponents[j])
                    .map(|(a, b)| a + b)
                    .collect();
                let value = topology.monomial_integral(&sum);
                gram[j][i] = value.clone();
                gram[i][j] = value;
            }
        }

        let singular = || BasisError::SingularSystem {
            functionals: "Gram matrix".to_string(),
            topology: topology.name(),
            order: max_order,
        };

        // u_i = m_i - sum_{j<i} <m_i, u_j>/<u_j, u_j> u_j
        let mut basis: Vec<Vec<BigRational>> = Vec::with_capacity(n);
        let mut norms: Vec<BigRational> = Vec::with_capacity(n);
        for i in 0..n {
            let mut u = vec![BigRational::zero(); i + 1];
            u[i] = <BigRational as num_traits::One>::one();
            for (uj, nj) in basis.iter().zip(&norms) {
                let projection: BigRational = uj
                    .iter()
                    .enumerate()
                    .map(|(k, c)| c * &gram[i][k])
                    .sum();
                let factor = projection / nj;
                for (k, c) in uj.iter().enumerate() {
                    u[k] -= &factor * c;
                }
            }
            // u_i is orthogonal to all earlier u_j, so <u_i, u_i> = <m_i, u_i>
            let norm: BigRational = u.iter().enumerate().map(|(k, c)| c * &gram[i][k]).sum();
            if !norm.is_positive() {
                log::error!("Gram matrix of `{}` is not positive definite", topology.name());
                return Err(singular());
            }
            basis.push(u);
            norms.push(norm);
        }

        let rows = basis
            .iter()
            .zip(&norms)
            .map(|(u, norm)| {
                let scale = Field::to_f64(norm).sqrt();
                u.iter().map(|c| Field::to_f64(c) / scale).collect()
            })
            .collect();
        Ok(Self {
            rows,
            topology: topology.clone(),
            max_order,
        })
    }

    pub fn topology(&self) -> &Topology {
        &self.topology
    }

    pub fn max_order(&self) -> u32 {
        self.max_order
    }

    /// Number of coefficients in row `i`.
    pub fn col_size(&self, i: usize) -> usize {
        i + 1
    }

    pub fn size(&self) -> usize {
        self.rows.len()
    }
}

impl CoefficientSource<f64> for OrthonormalCoefficients {
    fn row_count(&self) -> usize {
        self.rows.len()
    }

    fn col_count(&self, row: usize) -> usize {
        self.col_size(row)
    }

    fn coefficient(&self, row: usize, col: usize) -> f64 {
        self.rows[row][col]
    }
}

/// Orthonormal polynomials on a reference cell, graded by order.
#[derive(Debug)]
pub struct OrthonormalBasis {
    monomials: MonomialBasis,
    matrix: CoeffMatrix<f64>,
    topology: Topology,
    max_order: u32,
}

static_assertions::assert_impl_all!(OrthonormalBasis: Send, Sync);

impl OrthonormalBasis {
    pub fn new(topology: Topology, max_order: u32) -> Result<Self, BasisError> {
        let coefficients = OrthonormalCoefficients::compute(&topology, max_order)?;
        let monomials = MonomialBasis::standard(topology.dimension());
        let matrix = CoeffMatrix::fill(&coefficients, coefficients.size(), 1);
        Ok(Self {
            monomials,
            matrix,
            topology,
            max_order,
        })
    }

    pub fn topology(&self) -> &Topology {
        &self.topology
    }

    pub fn max_order(&self) -> u32 {
        self.max_order
    }

    /// Number of orthonormal functions of degree at most `order`.
    pub fn size(&self, order: u32) -> usize {
        self.monomials.size(order)
    }

    pub fn coefficients(&self) -> &CoeffMatrix<f64> {
        &self.matrix
    }

    /// Evaluate the first `size(order)` orthonormal functions at `x`.
    ///
    /// Works in any [`Field`]; the `f64` coefficients are cast into it.
    pub fn evaluate<F: Field>(&self, order: u32, x: &[F], out: &mut [F]) -> Result<(), BasisError> {
        if order > self.max_order {
            return Err(BasisError::OrderOutOfRange {
                requested: order,
                max: self.max_order,
            });
        }
        let n = self.size(order);
        if out.len() < n {
            return Err(BasisError::CapacityMismatch {
                expected: n,
                found: out.len(),
            });
        }
        let values = self.monomials.evaluate_vec(order, x);
        for (i, o) in out[..n].iter_mut().enumerate() {
            *o = self
                .matrix
                .row(i)
                .iter()
                .fold(F::zero(), |acc, (c, v)| {
                    acc + field_cast::<f64, F>(v) * values[*c].clone()
                });
        }
        Ok(())
    }

    /// One orthonormal function per line in terms of the monomials.
    pub fn print(&self, w: &mut impl fmt::Write) -> fmt::Result {
        let labels: Vec<MultiIndex> = symbolic_monomials(&self.monomials, self.max_order);
        write_polynomials(w, &self.matrix, &labels)
    }
}
