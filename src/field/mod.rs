//! Scalar capability sets used by the basis algorithms.
//!
//! The monomial recursion only ever multiplies, forms `1 - z` and takes
//! reciprocals, so it is written against [`EvaluationField`]. Integration
//! and linear algebra additionally need the full [`Field`] operations.
//! Three scalars plug into these traits:
//!
//! - `f64` for ordinary evaluation,
//! - [`BigRational`] as the arbitrary-precision backend,
//! - [`MultiIndex`] for symbolic evaluation (evaluation only).

pub mod multi_index;

use num_rational::BigRational;
use num_traits::{Signed, ToPrimitive};
use std::fmt::Debug;
use std::ops::{Add, Div, Mul, Neg, Sub};

pub use multi_index::MultiIndex;

/// Exact scalar used wherever floating precision is insufficient.
pub type ExactField = BigRational;

/// Operations needed to evaluate the graded monomial recursion.
pub trait EvaluationField: Clone + Debug + Mul<Output = Self> {
    /// Multiplicative identity.
    fn one() -> Self;
    /// Additive identity.
    ///
    /// Symbolic fields without an additive identity return a placeholder.
    /// The monomial recursion never consumes it because
    /// [`is_positive`](Self::is_positive) always holds for them; anything
    /// that writes explicit zeros, such as vector-valued pre-bases, must be
    /// bounded on [`Field`] instead.
    fn zero() -> Self;
    /// Order relation against the additive identity: `self > 0`, where
    /// floating fields treat values up to `tolerance` as zero.
    fn is_positive(&self, tolerance: f64) -> bool;
    /// `1 - self`.
    fn one_minus(&self) -> Self;
    /// `1 / self`.
    fn recip(&self) -> Self;
}

/// Full field arithmetic for integrals, matrices and coefficient tables.
pub trait Field:
    EvaluationField
    + Add<Output = Self>
    + Sub<Output = Self>
    + Div<Output = Self>
    + Neg<Output = Self>
    + PartialOrd
{
    fn from_usize(n: usize) -> Self;

    /// `num / den` computed in the field.
    fn from_ratio(num: usize, den: usize) -> Self {
        Self::from_usize(num) / Self::from_usize(den)
    }

    fn from_f64(value: f64) -> Self;

    fn to_f64(&self) -> f64;

    /// Absolute value.
    fn magnitude(&self) -> Self;

    /// Whether `self` (a magnitude) is indistinguishable from zero relative
    /// to `scale`. Exact fields ignore both `scale` and `tolerance`.
    fn is_negligible(&self, scale: &Self, tolerance: f64) -> bool;
}

impl EvaluationField for f64 {
    #[inline]
    fn one() -> Self {
        1.0
    }

    #[inline]
    fn zero() -> Self {
        0.0
    }

    #[inline]
    fn is_positive(&self, tolerance: f64) -> bool {
        *self > tolerance
    }

    #[inline]
    fn one_minus(&self) -> Self {
        1.0 - *self
    }

    #[inline]
    fn recip(&self) -> Self {
        1.0 / *self
    }
}

impl Field for f64 {
    #[inline]
    fn from_usize(n: usize) -> Self {
        n as f64
    }

    #[inline]
    fn from_f64(value: f64) -> Self {
        value
    }

    #[inline]
    fn to_f64(&self) -> f64 {
        *self
    }

    #[inline]
    fn magnitude(&self) -> Self {
        self.abs()
    }

    #[inline]
    fn is_negligible(&self, scale: &Self, tolerance: f64) -> bool {
        *self == 0.0 || *self <= tolerance * *scale
    }
}

impl EvaluationField for BigRational {
    fn one() -> Self {
        <BigRational as num_traits::One>::one()
    }

    fn zero() -> Self {
        <BigRational as num_traits::Zero>::zero()
    }

    fn is_positive(&self, _tolerance: f64) -> bool {
        Signed::is_positive(self)
    }

    fn one_minus(&self) -> Self {
        <BigRational as EvaluationField>::one() - self
    }

    fn recip(&self) -> Self {
        BigRational::recip(self)
    }
}

impl Field for BigRational {
    fn from_usize(n: usize) -> Self {
        BigRational::from_integer(n.into())
    }

    fn from_ratio(num: usize, den: usize) -> Self {
        BigRational::new(num.into(), den.into())
    }

    /// Exact conversion; non-finite input maps to zero.
    fn from_f64(value: f64) -> Self {
        BigRational::from_float(value).unwrap_or_else(<BigRational as EvaluationField>::zero)
    }

    fn to_f64(&self) -> f64 {
        ToPrimitive::to_f64(self).unwrap_or(f64::NAN)
    }

    fn magnitude(&self) -> Self {
        Signed::abs(self)
    }

    fn is_negligible(&self, _scale: &Self, _tolerance: f64) -> bool {
        num_traits::Zero::is_zero(self)
    }
}

/// Convert between fields through the `f64` bridge.
pub fn field_cast<F: Field, G: Field>(value: &F) -> G {
    G::from_f64(value.to_f64())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rational_ratio_is_exact() {
        let third = <BigRational as Field>::from_ratio(1, 3);
        let sum = third.clone() + third.clone() + third;
        assert_eq!(sum, <BigRational as EvaluationField>::one());
    }

    #[test]
    fn float_positivity_respects_tolerance() {
        assert!(!EvaluationField::is_positive(&1e-13_f64, 1e-12));
        assert!(EvaluationField::is_positive(&1e-11_f64, 1e-12));
        assert!(!EvaluationField::is_positive(&0.0_f64, 0.0));
    }

    #[test]
    fn negligible_pivots() {
        assert!(0.0_f64.is_negligible(&1.0, 1e-12));
        assert!(1e-15_f64.is_negligible(&10.0, 1e-12));
        assert!(!1e-3_f64.is_negligible(&10.0, 1e-12));
        let tiny = <BigRational as Field>::from_ratio(1, 1_000_000_000);
        assert!(!tiny.is_negligible(&tiny, 1.0));
    }

    #[test]
    fn cast_through_f64() {
        let half: BigRational = field_cast(&0.5_f64);
        assert_eq!(half, <BigRational as Field>::from_ratio(1, 2));
        let back: f64 = field_cast(&half);
        assert_eq!(back, 0.5);
    }
}
