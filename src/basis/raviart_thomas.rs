//! Vector-valued pre-basis spanning the Raviart–Thomas space.

use super::evaluator::PreBasis;
use super::monomial::MonomialBasis;
use super::sizes::GradedSizes;
use crate::field::Field;
use crate::topology::Topology;

/// `(P_k)^d + x·P̃_k` over the monomials of a [`MonomialBasis`].
///
/// Every monomial `m` of degree below `k` contributes the `d` functions
/// `e_r m`; every monomial of degree exactly `k` contributes `e_r m`
/// followed by `x m`. Order 0 gives the lowest-order space `e_r, x`.
/// Off-component entries are field zeros, so a [`Field`] is required.
#[derive(Clone, Copy, Debug)]
pub struct RaviartThomasEvaluator<'a> {
    basis: &'a MonomialBasis,
    order: u32,
}

impl<'a> RaviartThomasEvaluator<'a> {
    pub fn new(basis: &'a MonomialBasis, order: u32) -> Self {
        Self { basis, order }
    }

    /// Number of monomials of degree below `order`.
    fn inhomogeneous(&self) -> usize {
        if self.order == 0 {
            0
        } else {
            self.basis.size(self.order - 1)
        }
    }
}

impl<F: Field> PreBasis<F> for RaviartThomasEvaluator<'_> {
    fn size(&self) -> usize {
        let d = self.basis.dimension() as usize;
        let lower = self.inhomogeneous();
        let homogeneous = self.basis.size(self.order) - lower;
        d * lower + (d + 1) * homogeneous
    }

    fn dim_range(&self) -> usize {
        self.basis.dimension() as usize
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
        let d = self.basis.dimension() as usize;
        let needed = PreBasis::<F>::size(self) * d;
        assert!(out.len() >= needed, "value buffer too small");
        let monomials = self.basis.evaluate_vec(self.order, x);
        let lower = self.inhomogeneous();
        let mut it = out.iter_mut();
        for (i, m) in monomials.iter().enumerate() {
            for r1 in 0..d {
                for r2 in 0..d {
                    if let Some(v) = it.next() {
                        *v = if r1 == r2 { m.clone() } else { F::zero() };
                    }
                }
            }
            if i >= lower {
                for xr in &x[..d] {
                    if let Some(v) = it.next() {
                        *v = xr.clone() * m.clone();
                    }
                }
            }
        }
    }

    fn describe(&self) -> String {
        format!(
            "Raviart-Thomas pre-basis on `{}` of order {}",
            self.basis.topology().name(),
            self.order
        )
    }
}
