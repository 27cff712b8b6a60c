//! Exponent vectors used as a symbolic scalar.
//!
//! Evaluating the monomial recursion with [`MultiIndex`] in place of a
//! number yields, for every basis function, the exponents of the monomial
//! it represents. That is all the printing and the exact Gram-matrix
//! computations need; no polynomial addition is ever performed.

use super::EvaluationField;
use itertools::Itertools;
use std::fmt;
use std::ops::{Div, DivAssign, Mul, MulAssign};

/// A monomial `x_0^{z_0} … x_n^{z_n} · (1-x_0)^{w_0} … (1-x_n)^{w_n}`.
///
/// Exponent vectors are stored without trailing zeros, so indices of
/// different declared dimensions compare equal when they describe the same
/// monomial.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct MultiIndex {
    z: Vec<i32>,
    omz: Vec<i32>,
}

impl MultiIndex {
    /// The constant monomial `1`.
    pub fn one() -> Self {
        Self::default()
    }

    /// The coordinate function `x_d`.
    pub fn variable(d: usize) -> Self {
        let mut z = vec![0; d + 1];
        z[d] = 1;
        Self { z, omz: Vec::new() }
    }

    /// Symbolic point `(x_0, …, x_{dim-1})`.
    pub fn coordinates(dim: usize) -> Vec<Self> {
        (0..dim).map(Self::variable).collect()
    }

    /// Exponent of `x_d`.
    pub fn exponent(&self, d: usize) -> i32 {
        self.z.get(d).copied().unwrap_or(0)
    }

    /// Exponent of `(1 - x_d)`.
    pub fn omz_exponent(&self, d: usize) -> i32 {
        self.omz.get(d).copied().unwrap_or(0)
    }

    /// Sum of the coordinate exponents.
    pub fn total_degree(&self) -> i32 {
        self.z.iter().sum()
    }

    /// Sum of the absolute `(1 - x_d)` exponents.
    pub fn omz_degree(&self) -> i32 {
        self.omz.iter().map(|e| e.abs()).sum()
    }

    /// Non-negative coordinate exponents padded to `dim`, or `None` when the
    /// index is not a plain polynomial monomial in `dim` variables.
    pub fn polynomial_exponents(&self, dim: usize) -> Option<Vec<u32>> {
        if !self.omz.is_empty() || self.z.len() > dim {
            return None;
        }
        (0..dim)
            .map(|d| u32::try_from(self.exponent(d)).ok())
            .collect()
    }

    fn combine(a: &[i32], b: &[i32], op: impl Fn(i32, i32) -> i32) -> Vec<i32> {
        let len = a.len().max(b.len());
        let mut out: Vec<i32> = (0..len)
            .map(|i| op(a.get(i).copied().unwrap_or(0), b.get(i).copied().unwrap_or(0)))
            .collect();
        while out.last() == Some(&0) {
            out.pop();
        }
        out
    }
}

impl MulAssign<&MultiIndex> for MultiIndex {
    fn mul_assign(&mut self, other: &MultiIndex) {
        self.z = Self::combine(&self.z, &other.z, |a, b| a + b);
        self.omz = Self::combine(&self.omz, &other.omz, |a, b| a + b);
    }
}

impl DivAssign<&MultiIndex> for MultiIndex {
    fn div_assign(&mut self, other: &MultiIndex) {
        self.z = Self::combine(&self.z, &other.z, |a, b| a - b);
        self.omz = Self::combine(&self.omz, &other.omz, |a, b| a - b);
    }
}

impl Mul for MultiIndex {
    type Output = MultiIndex;

    fn mul(mut self, other: MultiIndex) -> MultiIndex {
        self *= &other;
        self
    }
}

impl Div for MultiIndex {
    type Output = MultiIndex;

    fn div(mut self, other: MultiIndex) -> MultiIndex {
        self /= &other;
        self
    }
}

impl EvaluationField for MultiIndex {
    fn one() -> Self {
        MultiIndex::one()
    }

    fn zero() -> Self {
        MultiIndex::one()
    }

    fn is_positive(&self, _tolerance: f64) -> bool {
        true
    }

    /// `1 - x_d` for a single coordinate: the `z` and `1-z` exponents swap.
    fn one_minus(&self) -> Self {
        Self {
            z: self.omz.clone(),
            omz: self.z.clone(),
        }
    }

    fn recip(&self) -> Self {
        MultiIndex::one() / self.clone()
    }
}

fn variable_name(d: usize) -> char {
    char::from(b'a' + (d % 26) as u8)
}

fn power(base: String, exponent: i32) -> String {
    if exponent == 1 {
        base
    } else {
        format!("{base}**({exponent})")
    }
}

impl fmt::Display for MultiIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let coords = self
            .z
            .iter()
            .enumerate()
            .filter(|(_, e)| **e != 0)
            .map(|(d, e)| power(variable_name(d).to_string(), *e));
        let shifted = self
            .omz
            .iter()
            .enumerate()
            .filter(|(_, e)| **e != 0)
            .map(|(d, e)| power(format!("(1-{})", variable_name(d)), *e));
        let factors = coords.chain(shifted).join("*");
        if factors.is_empty() {
            write!(f, "1")
        } else {
            write!(f, "{factors}")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn products_add_exponents() {
        let a = MultiIndex::variable(0);
        let b = MultiIndex::variable(1);
        let m = a.clone() * a * b;
        assert_eq!(m.exponent(0), 2);
        assert_eq!(m.exponent(1), 1);
        assert_eq!(m.total_degree(), 3);
        assert_eq!(m.to_string(), "a**(2)*b");
    }

    #[test]
    fn quotient_cancels_to_one() {
        let a = MultiIndex::variable(2);
        assert_eq!(a.clone() / a, MultiIndex::one());
        assert_eq!(MultiIndex::one().to_string(), "1");
    }

    #[test]
    fn one_minus_and_reciprocal() {
        let c = MultiIndex::variable(2);
        let omc = EvaluationField::one_minus(&c);
        assert_eq!(omc.omz_exponent(2), 1);
        assert_eq!(omc.total_degree(), 0);
        assert_eq!(omc.to_string(), "(1-c)");
        let inv = EvaluationField::recip(&omc);
        assert_eq!(inv.omz_exponent(2), -1);
        assert_eq!(inv.to_string(), "(1-c)**(-1)");
    }

    #[test]
    fn polynomial_exponents_pad_and_reject() {
        let m = MultiIndex::variable(1);
        assert_eq!(m.polynomial_exponents(3), Some(vec![0, 1, 0]));
        assert_eq!(m.polynomial_exponents(1), None);
        let r = EvaluationField::recip(&m);
        assert_eq!(r.polynomial_exponents(2), None);
    }
}
