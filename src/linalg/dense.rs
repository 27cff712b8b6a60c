//! Dense vector and matrix containers with in-place Gauss-Jordan inversion.
//!
//! Storage is row-major and contiguous, so [`DenseMatrix::row`] hands out a
//! plain slice. The element type is any [`Field`]; instantiating with
//! [`BigRational`](num_rational::BigRational) gives the exact backend with
//! the same contract.

use crate::basis_error::BasisError;
use crate::debug_invariants::DebugInvariants;
use crate::field::{ExactField, Field};
use std::fmt;
use std::ops::{Index, IndexMut};

/// Default relative pivot threshold for floating fields.
pub const DEFAULT_PIVOT_TOLERANCE: f64 = 1e-12;

/// Owned, resizable vector of field values.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DenseVector<F> {
    data: Vec<F>,
}

impl<F: Field> DenseVector<F> {
    /// Zero vector of length `size`.
    pub fn new(size: usize) -> Self {
        Self {
            data: vec![F::zero(); size],
        }
    }

    pub fn from_vec(data: Vec<F>) -> Self {
        Self { data }
    }

    pub fn size(&self) -> usize {
        self.data.len()
    }

    /// Resize to `size`, zero-filling new entries.
    pub fn resize(&mut self, size: usize) {
        self.data.resize(size, F::zero());
    }

    pub fn as_slice(&self) -> &[F] {
        &self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [F] {
        &mut self.data
    }

    pub fn iter(&self) -> std::slice::Iter<'_, F> {
        self.data.iter()
    }

    pub fn into_vec(self) -> Vec<F> {
        self.data
    }
}

impl<F> Index<usize> for DenseVector<F> {
    type Output = F;

    fn index(&self, i: usize) -> &F {
        &self.data[i]
    }
}

impl<F> IndexMut<usize> for DenseVector<F> {
    fn index_mut(&mut self, i: usize) -> &mut F {
        &mut self.data[i]
    }
}

/// Row-major dense matrix.
///
/// # Invariants
///
/// - `data.len() == rows * cols`.
/// - Row `r` occupies `data[r * cols .. (r + 1) * cols]`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DenseMatrix<F> {
    data: Vec<F>,
    rows: usize,
    cols: usize,
}

/// Dense matrix over the arbitrary-precision field.
pub type ExactMatrix = DenseMatrix<ExactField>;

impl<F: Field> DenseMatrix<F> {
    /// Zero matrix of shape `rows × cols`.
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            data: vec![F::zero(); rows * cols],
            rows,
            cols,
        }
    }

    pub fn identity(n: usize) -> Self {
        let mut m = Self::new(n, n);
        for i in 0..n {
            m[(i, i)] = F::one();
        }
        m
    }

    /// Build from explicit rows; all rows must share one length.
    pub fn from_rows(rows: Vec<Vec<F>>) -> Result<Self, BasisError> {
        let cols = rows.first().map(Vec::len).unwrap_or(0);
        let n_rows = rows.len();
        let mut data = Vec::with_capacity(n_rows * cols);
        for row in rows {
            if row.len() != cols {
                return Err(BasisError::CapacityMismatch {
                    expected: cols,
                    found: row.len(),
                });
            }
            data.extend(row);
        }
        Ok(Self {
            data,
            rows: n_rows,
            cols,
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn is_square(&self) -> bool {
        self.rows == self.cols
    }

    /// Contiguous slice of row `row`.
    pub fn row(&self, row: usize) -> &[F] {
        assert!(row < self.rows, "row {row} out of bounds ({})", self.rows);
        &self.data[row * self.cols..(row + 1) * self.cols]
    }

    pub fn row_mut(&mut self, row: usize) -> &mut [F] {
        assert!(row < self.rows, "row {row} out of bounds ({})", self.rows);
        let cols = self.cols;
        &mut self.data[row * cols..(row + 1) * cols]
    }

    pub fn get(&self, row: usize, col: usize) -> Option<&F> {
        if row < self.rows && col < self.cols {
            self.data.get(row * self.cols + col)
        } else {
            None
        }
    }

    /// Reallocate as a zero `rows × cols` matrix. Previous contents and
    /// indices are invalidated.
    pub fn resize(&mut self, rows: usize, cols: usize) {
        self.data.clear();
        self.data.resize(rows * cols, F::zero());
        self.rows = rows;
        self.cols = cols;
    }

    pub fn transpose(&self) -> Self {
        let mut t = Self::new(self.cols, self.rows);
        for r in 0..self.rows {
            for c in 0..self.cols {
                t[(c, r)] = self[(r, c)].clone();
            }
        }
        t
    }

    /// Matrix product `self * other`.
    pub fn mul(&self, other: &Self) -> Result<Self, BasisError> {
        if self.cols != other.rows {
            return Err(BasisError::CapacityMismatch {
                expected: self.cols,
                found: other.rows,
            });
        }
        let mut out = Self::new(self.rows, other.cols);
        for r in 0..self.rows {
            for k in 0..self.cols {
                let a = self[(r, k)].clone();
                for c in 0..other.cols {
                    let v = out[(r, c)].clone() + a.clone() * other[(k, c)].clone();
                    out[(r, c)] = v;
                }
            }
        }
        Ok(out)
    }

    /// `out = self * x`.
    pub fn mul_vec(&self, x: &[F], out: &mut [F]) {
        assert_eq!(x.len(), self.cols, "input length must equal column count");
        assert_eq!(out.len(), self.rows, "output length must equal row count");
        for (r, o) in out.iter_mut().enumerate() {
            *o = self
                .row(r)
                .iter()
                .zip(x)
                .fold(F::zero(), |acc, (a, b)| acc + a.clone() * b.clone());
        }
    }

    /// Largest entry magnitude, zero for an empty matrix.
    pub fn max_magnitude(&self) -> F {
        max_of(self.data.iter())
    }

    /// Largest entry magnitude of every row.
    pub fn row_magnitudes(&self) -> Vec<F> {
        (0..self.rows).map(|r| max_of(self.row(r).iter())).collect()
    }

    /// Entry-wise conversion into another field.
    pub fn cast<G: Field>(&self) -> DenseMatrix<G> {
        DenseMatrix {
            data: self.data.iter().map(crate::field::field_cast).collect(),
            rows: self.rows,
            cols: self.cols,
        }
    }

    fn swap_rows(&mut self, a: usize, b: usize) {
        if a == b {
            return;
        }
        let cols = self.cols;
        let (lo, hi) = (a.min(b), a.max(b));
        let (head, tail) = self.data.split_at_mut(hi * cols);
        head[lo * cols..(lo + 1) * cols].swap_with_slice(&mut tail[..cols]);
    }

    /// Replace the matrix by its inverse using the default pivot tolerance.
    pub fn invert(&mut self) -> Result<(), BasisError> {
        self.invert_with_tolerance(DEFAULT_PIVOT_TOLERANCE)
    }

    /// Gauss-Jordan inversion in place.
    ///
    /// Each step moves the largest-magnitude entry of the pivot column (on or
    /// below the diagonal) into the pivot row, eliminates the column while
    /// building the inverse in the same storage, and finally undoes the
    /// recorded row swaps as a column permutation.
    ///
    /// # Errors
    /// `NonSquareMatrix` for rectangular input and `SingularMatrix` when a
    /// pivot is negligible relative to the largest entry of the input row it
    /// came from. On error the matrix contents are unspecified.
    pub fn invert_with_tolerance(&mut self, tolerance: f64) -> Result<(), BasisError> {
        if !self.is_square() {
            return Err(BasisError::NonSquareMatrix {
                rows: self.rows,
                cols: self.cols,
            });
        }
        self.debug_assert_invariants();
        let n = self.rows;
        // row scales travel with their rows through the swaps
        let mut scale = self.row_magnitudes();
        let mut perm: Vec<usize> = (0..n).collect();

        for j in 0..n {
            // pivot search
            let mut r = j;
            let mut max = self[(j, j)].magnitude();
            for i in j + 1..n {
                let candidate = self[(i, j)].magnitude();
                if candidate > max {
                    max = candidate;
                    r = i;
                }
            }
            if max.is_negligible(&scale[r], tolerance) {
                log::debug!("pivot column {j} of {n}x{n} matrix vanishes");
                return Err(BasisError::SingularMatrix { pivot: j });
            }
            if max.is_negligible(&scale[r], tolerance * 1e3) {
                log::warn!("near-singular pivot in column {j}: {:e}", max.to_f64());
            }
            if r > j {
                log::trace!("pivot swap rows {j} <-> {r}");
                self.swap_rows(j, r);
                scale.swap(j, r);
                perm.swap(j, r);
            }

            // transformation
            let hr = self[(j, j)].recip();
            for i in 0..n {
                let v = self[(i, j)].clone() * hr.clone();
                self[(i, j)] = v;
            }
            self[(j, j)] = hr.clone();
            for k in 0..n {
                if k == j {
                    continue;
                }
                let pivot_entry = self[(j, k)].clone();
                for i in 0..n {
                    if i == j {
                        continue;
                    }
                    let v = self[(i, k)].clone() - self[(i, j)].clone() * pivot_entry.clone();
                    self[(i, k)] = v;
                }
                self[(j, k)] = -(pivot_entry * hr.clone());
            }
        }

        // column exchange
        let mut hv = vec![F::zero(); n];
        for i in 0..n {
            for (k, &p) in perm.iter().enumerate() {
                hv[p] = self[(i, k)].clone();
            }
            self.row_mut(i).clone_from_slice(&hv);
        }
        Ok(())
    }
}

fn max_of<'a, F: Field + 'a>(values: impl Iterator<Item = &'a F>) -> F {
    values
        .map(Field::magnitude)
        .fold(F::zero(), |m, v| if v > m { v } else { m })
}

impl<F> Index<(usize, usize)> for DenseMatrix<F> {
    type Output = F;

    fn index(&self, (row, col): (usize, usize)) -> &F {
        assert!(
            row < self.rows && col < self.cols,
            "index ({row}, {col}) out of bounds for {}x{} matrix",
            self.rows,
            self.cols
        );
        &self.data[row * self.cols + col]
    }
}

impl<F> IndexMut<(usize, usize)> for DenseMatrix<F> {
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut F {
        assert!(
            row < self.rows && col < self.cols,
            "index ({row}, {col}) out of bounds for {}x{} matrix",
            self.rows,
            self.cols
        );
        &mut self.data[row * self.cols + col]
    }
}

impl<F: Field> DebugInvariants for DenseMatrix<F> {
    fn validate_invariants(&self) -> Result<(), BasisError> {
        if self.data.len() != self.rows * self.cols {
            return Err(BasisError::CapacityMismatch {
                expected: self.rows * self.cols,
                found: self.data.len(),
            });
        }
        Ok(())
    }
}

impl<F: Field> fmt::Display for DenseMatrix<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for r in 0..self.rows {
            let line = self
                .row(r)
                .iter()
                .map(|v| v.to_f64().to_string())
                .collect::<Vec<_>>()
                .join(" , ");
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_rational::BigRational;

    fn approx_eq(a: &DenseMatrix<f64>, b: &DenseMatrix<f64>, tol: f64) -> bool {
        a.rows() == b.rows()
            && a.cols() == b.cols()
            && (0..a.rows()).all(|r| (0..a.cols()).all(|c| (a[(r, c)] - b[(r, c)]).abs() < tol))
    }

    #[test]
    fn invert_needs_pivoting() {
        // zero on the diagonal forces a row swap
        let mut m = DenseMatrix::from_rows(vec![vec![0.0, 1.0], vec![2.0, 0.0]]).unwrap();
        let original = m.clone();
        m.invert().unwrap();
        let expected = DenseMatrix::from_rows(vec![vec![0.0, 0.5], vec![1.0, 0.0]]).unwrap();
        assert!(approx_eq(&m, &expected, 1e-14));
        let product = original.mul(&m).unwrap();
        assert!(approx_eq(&product, &DenseMatrix::identity(2), 1e-14));
    }

    #[test]
    fn invert_three_by_three_with_swaps() {
        let rows = vec![
            vec![1.0, 2.0, 3.0],
            vec![4.0, 5.0, 6.0],
            vec![7.0, 8.0, 10.0],
        ];
        let original = DenseMatrix::from_rows(rows).unwrap();
        let mut m = original.clone();
        m.invert().unwrap();
        let product = m.mul(&original).unwrap();
        assert!(approx_eq(&product, &DenseMatrix::identity(3), 1e-12));
    }

    #[test]
    fn zero_column_is_singular() {
        let mut m =
            DenseMatrix::from_rows(vec![vec![1.0, 0.0], vec![3.0, 0.0]]).unwrap();
        assert_eq!(m.invert(), Err(BasisError::SingularMatrix { pivot: 1 }));
    }

    #[test]
    fn rows_of_different_scale_are_invertible() {
        let mut m = DenseMatrix::from_rows(vec![vec![1e13, 0.0], vec![0.0, 1.0]]).unwrap();
        m.invert().unwrap();
        assert!((m[(0, 0)] * 1e13 - 1.0).abs() < 1e-15);
        assert_eq!(m[(1, 1)], 1.0);

        let original = DenseMatrix::from_rows(vec![vec![1e13, 2e13], vec![3.0, 4.0]]).unwrap();
        assert_eq!(original.row_magnitudes(), vec![2e13, 4.0]);
        let mut m = original.clone();
        m.invert().unwrap();
        let expected = [[-2e-13, 1.0], [1.5e-13, -0.5]];
        for (r, row) in expected.iter().enumerate() {
            for (c, e) in row.iter().enumerate() {
                assert!((m[(r, c)] - e).abs() <= 1e-12 * e.abs(), "({r}, {c})");
            }
        }
    }

    #[test]
    fn rectangular_is_rejected() {
        let mut m = DenseMatrix::<f64>::new(2, 3);
        assert_eq!(
            m.invert(),
            Err(BasisError::NonSquareMatrix { rows: 2, cols: 3 })
        );
    }

    #[test]
    fn exact_backend_inverts_hilbert() {
        let n = 5;
        let hilbert: Vec<Vec<BigRational>> = (0..n)
            .map(|i| {
                (0..n)
                    .map(|j| <BigRational as Field>::from_ratio(1, i + j + 1))
                    .collect()
            })
            .collect();
        let original = ExactMatrix::from_rows(hilbert).unwrap();
        let mut inv = original.clone();
        inv.invert().unwrap();
        assert_eq!(inv.mul(&original).unwrap(), ExactMatrix::identity(n));
        // known integer entry of the 5x5 inverse Hilbert matrix
        assert_eq!(inv[(0, 0)], <BigRational as Field>::from_usize(25));
    }

    #[test]
    fn resize_zeroes_and_rows_are_contiguous() {
        let mut m = DenseMatrix::<f64>::identity(3);
        m.resize(2, 4);
        assert_eq!(m.rows(), 2);
        assert_eq!(m.cols(), 4);
        assert!(m.row(1).iter().all(|v| *v == 0.0));
        m.row_mut(1)[3] = 7.0;
        assert_eq!(m[(1, 3)], 7.0);
        assert_eq!(m.get(2, 0), None);
        m.validate_invariants().unwrap();
    }

    #[test]
    #[should_panic]
    fn out_of_bounds_access_panics() {
        let m = DenseMatrix::<f64>::new(2, 2);
        let _ = m[(0, 2)];
    }

    #[test]
    fn display_uses_comma_separation() {
        let m = DenseMatrix::from_rows(vec![vec![1.0, 0.5]]).unwrap();
        assert_eq!(m.to_string(), "1 , 0.5\n");
    }
}
