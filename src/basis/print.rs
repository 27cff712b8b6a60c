//! Human-readable listings of generated bases.

use super::coeff_matrix::CoeffMatrix;
use super::monomial::MonomialBasis;
use crate::field::MultiIndex;
use itertools::Itertools;
use std::fmt;

/// Monomials of a basis up to `order`, as exponent vectors.
pub fn symbolic_monomials(basis: &MonomialBasis, order: u32) -> Vec<MultiIndex> {
    let x = MultiIndex::coordinates(basis.dimension() as usize);
    basis.evaluate_vec(order, &x)
}

/// One line per row of `coefficients`: `c0*m0 + c1*m1 + …`, skipping zero
/// coefficients. Rows without any term print as `0`.
pub fn write_polynomials(
    w: &mut impl fmt::Write,
    coefficients: &CoeffMatrix<f64>,
    monomials: &[MultiIndex],
) -> fmt::Result {
    for i in 0..coefficients.size() {
        let terms = coefficients
            .row(i)
            .iter()
            .filter(|(_, c)| *c != 0.0)
            .map(|(col, c)| match monomials.get(*col) {
                Some(m) => format!("{c}*{m}"),
                None => format!("{c}*#{col}"),
            })
            .join(" + ");
        if terms.is_empty() {
            writeln!(w, "0")?;
        } else {
            writeln!(w, "{terms}")?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::topology::Topology;

    #[test]
    fn square_monomials_are_named() {
        let basis = MonomialBasis::new(Topology::quadrilateral());
        let names: Vec<String> = symbolic_monomials(&basis, 1)
            .iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(names, vec!["1", "a", "a*b", "b"]);
    }
}
