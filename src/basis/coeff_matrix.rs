//! Sparse coefficient tables mapping pre-basis values to target functions.

use crate::field::Field;

/// Anything that can hand out a table of coefficients row by row.
///
/// Row `r` lists the coefficients of target function `r` over the base
/// functions `0..col_count(r)`.
pub trait CoefficientSource<F> {
    fn row_count(&self) -> usize;
    fn col_count(&self, row: usize) -> usize;
    fn coefficient(&self, row: usize, col: usize) -> F;
}

/// Row-sparse coefficient matrix with `dim_range`-component base blocks.
///
/// Exact zeros are dropped when filling, so lower-triangular sources keep
/// only their populated part.
#[derive(Clone, Debug, PartialEq)]
pub struct CoeffMatrix<F> {
    rows: Vec<Vec<(usize, F)>>,
    base_size: usize,
    dim_range: usize,
}

impl<F: Field> CoeffMatrix<F> {
    pub fn fill(source: &impl CoefficientSource<F>, base_size: usize, dim_range: usize) -> Self {
        let zero = F::zero();
        let rows = (0..source.row_count())
            .map(|r| {
                let cols = source.col_count(r);
                assert!(
                    cols <= base_size,
                    "row {r} has {cols} coefficients for {base_size} base functions"
                );
                (0..cols)
                    .map(|c| (c, source.coefficient(r, c)))
                    .filter(|(_, v)| *v != zero)
                    .collect()
            })
            .collect();
        Self {
            rows,
            base_size,
            dim_range,
        }
    }

    /// Number of base functions the rows refer to.
    pub fn base_size(&self) -> usize {
        self.base_size
    }

    /// Number of target functions.
    pub fn size(&self) -> usize {
        self.rows.len()
    }

    pub fn dim_range(&self) -> usize {
        self.dim_range
    }

    /// Non-zero `(column, coefficient)` pairs of row `i`.
    pub fn row(&self, i: usize) -> &[(usize, F)] {
        &self.rows[i]
    }

    /// `out += coefficient * row(i)`, with `out` indexed by base function.
    pub fn add_row(&self, i: usize, coefficient: &F, out: &mut [F]) {
        debug_assert!(out.len() >= self.base_size);
        for (c, v) in &self.rows[i] {
            out[*c] = out[*c].clone() + coefficient.clone() * v.clone();
        }
    }

    /// Combine evaluated base blocks into all target functions.
    pub fn mult(&self, base_values: &[F], out: &mut [F]) {
        assert!(base_values.len() >= self.base_size * self.dim_range, "base buffer too small");
        self.mult_truncated(self.rows.len(), base_values, out);
    }

    /// Like [`mult`](Self::mult) for the first `n` target functions only.
    ///
    /// `base_values` only has to cover the columns those rows refer to, so a
    /// lower-triangular matrix can be applied to a lower-order evaluation.
    pub fn mult_truncated(&self, n: usize, base_values: &[F], out: &mut [F]) {
        let r = self.dim_range;
        assert!(n <= self.rows.len(), "only {} rows available", self.rows.len());
        assert!(out.len() >= n * r, "output buffer too small");
        for (row, block) in self.rows[..n].iter().zip(out.chunks_exact_mut(r)) {
            block.iter_mut().for_each(|v| *v = F::zero());
            for (c, coefficient) in row {
                let base = &base_values[c * r..(c + 1) * r];
                for (v, b) in block.iter_mut().zip(base) {
                    *v = v.clone() + coefficient.clone() * b.clone();
                }
            }
        }
    }
}
