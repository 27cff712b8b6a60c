//! Sets of degree-of-freedom functionals.
//!
//! An [`Interpolation`] applies its functionals to every function of a
//! pre-basis and stores the results as the rows of the basis matrix. A
//! [`LocalInterpolation`] applies the same functionals to an arbitrary
//! function to obtain its coefficients in the dual basis.

use crate::basis::PreBasis;
use crate::basis_error::BasisError;
use crate::field::Field;
use crate::linalg::DenseMatrix;

/// Functionals `L_0, …, L_{n-1}` evaluated on a pre-basis.
pub trait Interpolation<F: Field> {
    /// Name used in diagnostics and error messages.
    fn name(&self) -> String;

    /// Number of functionals.
    fn size(&self) -> usize;

    /// Resize `matrix` to `size() × pre_basis.size()` and set
    /// `matrix[(i, j)] = L_i(p_j)`.
    fn interpolate<P: PreBasis<F>>(
        &self,
        pre_basis: &P,
        matrix: &mut DenseMatrix<F>,
    ) -> Result<(), BasisError>;
}

/// Coefficients of a function with respect to the dual basis of a set of
/// functionals.
pub trait LocalInterpolation {
    /// Number of components of the interpolated functions.
    fn dim_range(&self) -> usize;

    /// `f(x, y)` must write the function value at `x` into `y`
    /// (`dim_range()` entries). `out` is cleared and refilled.
    fn interpolate_function<G>(&self, f: G, out: &mut Vec<f64>)
    where
        G: Fn(&[f64], &mut [f64]);
}

fn check_point<F>(point: &[F], dimension: usize, what: &str) -> Result<(), BasisError> {
    if point.len() != dimension {
        return Err(BasisError::InvalidInterpolation(format!(
            "{what} has {} coordinates on a {dimension}-dimensional cell",
            point.len()
        )));
    }
    Ok(())
}

/// Point evaluation: one functional per point and component.
///
/// Rows are ordered component-major; row `c * points + p` evaluates
/// component `c` at point `p`. Coefficients from
/// [`LocalInterpolation::interpolate_function`] use the same order, as does
/// [`PowerInterpolation`] over a scalar point set, so either pairs with a
/// basis built from these rows.
#[derive(Clone, Debug, PartialEq)]
pub struct PointInterpolation<F> {
    points: Vec<Vec<F>>,
    dim_range: usize,
}

impl<F: Field> PointInterpolation<F> {
    pub fn new(points: Vec<Vec<F>>) -> Self {
        Self::with_range(points, 1)
    }

    pub fn with_range(points: Vec<Vec<F>>, dim_range: usize) -> Self {
        Self { points, dim_range }
    }

    pub fn points(&self) -> &[Vec<F>] {
        &self.points
    }
}

impl<F: Field> Interpolation<F> for PointInterpolation<F> {
    fn name(&self) -> String {
        format!("point evaluation at {} points", self.points.len())
    }

    fn size(&self) -> usize {
        self.points.len() * self.dim_range
    }

    fn interpolate<P: PreBasis<F>>(
        &self,
        pre_basis: &P,
        matrix: &mut DenseMatrix<F>,
    ) -> Result<(), BasisError> {
        if pre_basis.dim_range() != self.dim_range {
            return Err(BasisError::InvalidInterpolation(format!(
                "{}-component functionals applied to {}",
                self.dim_range,
                pre_basis.describe()
            )));
        }
        let dimension = pre_basis.dimension();
        let points = self.points.len();
        matrix.resize(self.size(), pre_basis.size());
        for (p, point) in self.points.iter().enumerate() {
            check_point(point, dimension, "interpolation point")?;
            let blocks = pre_basis.evaluate_blocks(point);
            for (col, block) in blocks.iter().enumerate() {
                for (c, value) in block.iter().enumerate() {
                    matrix[(c * points + p, col)] = value.clone();
                }
            }
        }
        Ok(())
    }
}

impl LocalInterpolation for PointInterpolation<f64> {
    fn dim_range(&self) -> usize {
        self.dim_range
    }

    fn interpolate_function<G>(&self, f: G, out: &mut Vec<f64>)
    where
        G: Fn(&[f64], &mut [f64]),
    {
        let points = self.points.len();
        out.clear();
        out.resize(points * self.dim_range, 0.0);
        let mut y = vec![0.0; self.dim_range];
        for (p, point) in self.points.iter().enumerate() {
            f(point, &mut y);
            for (c, v) in y.iter().enumerate() {
                out[c * points + p] = *v;
            }
        }
    }
}

/// Normal-flux functionals followed by interior point values.
///
/// Each boundary functional evaluates `v(x) · n` at a caller-supplied point
/// with a caller-supplied normal; each interior point contributes one
/// functional per component. The pre-basis must be vector valued with one
/// component per dimension.
#[derive(Clone, Debug, PartialEq)]
pub struct NormalFluxInterpolation<F> {
    boundary: Vec<(Vec<F>, Vec<F>)>,
    interior: Vec<Vec<F>>,
}

impl<F: Field> NormalFluxInterpolation<F> {
    pub fn new(boundary: Vec<(Vec<F>, Vec<F>)>, interior: Vec<Vec<F>>) -> Self {
        Self { boundary, interior }
    }
}

impl<F: Field> Interpolation<F> for NormalFluxInterpolation<F> {
    fn name(&self) -> String {
        format!(
            "normal flux at {} boundary points, {} interior points",
            self.boundary.len(),
            self.interior.len()
        )
    }

    fn size(&self) -> usize {
        let dimension = self
            .boundary
            .first()
            .map(|(p, _)| p.len())
            .or_else(|| self.interior.first().map(Vec::len))
            .unwrap_or(0);
        self.boundary.len() + self.interior.len() * dimension
    }

    fn interpolate<P: PreBasis<F>>(
        &self,
        pre_basis: &P,
        matrix: &mut DenseMatrix<F>,
    ) -> Result<(), BasisError> {
        let dimension = pre_basis.dimension();
        if pre_basis.dim_range() != dimension {
            return Err(BasisError::InvalidInterpolation(format!(
                "normal flux needs {dimension} components, {} has {}",
                pre_basis.describe(),
                pre_basis.dim_range()
            )));
        }
        let rows = self.boundary.len() + self.interior.len() * dimension;
        matrix.resize(rows, pre_basis.size());
        let mut row = 0;
        for (point, normal) in &self.boundary {
            check_point(point, dimension, "boundary point")?;
            check_point(normal, dimension, "normal")?;
            let blocks = pre_basis.evaluate_blocks(point);
            for (col, block) in blocks.iter().enumerate() {
                matrix[(row, col)] = block
                    .iter()
                    .zip(normal)
                    .fold(F::zero(), |acc, (v, n)| acc + v.clone() * n.clone());
            }
            row += 1;
        }
        for point in &self.interior {
            check_point(point, dimension, "interior point")?;
            let blocks = pre_basis.evaluate_blocks(point);
            for (col, block) in blocks.iter().enumerate() {
                for (d, value) in block.iter().enumerate() {
                    matrix[(row + d, col)] = value.clone();
                }
            }
            row += dimension;
        }
        Ok(())
    }
}

/// Vector-valued interpolation built from a scalar one, component by
/// component. Coefficients are component-major: all coefficients of
/// component 0 come first, matching the rows of
/// [`PointInterpolation::with_range`] and the functions of
/// [`VectorMonomialEvaluator`](crate::basis::VectorMonomialEvaluator).
#[derive(Clone, Debug)]
pub struct PowerInterpolation<B> {
    backend: B,
    dim_range: usize,
}

impl<B: LocalInterpolation> PowerInterpolation<B> {
    pub fn new(backend: B, dim_range: usize) -> Result<Self, BasisError> {
        if backend.dim_range() != 1 {
            return Err(BasisError::InvalidInterpolation(format!(
                "power interpolation needs a scalar backend, got {} components",
                backend.dim_range()
            )));
        }
        Ok(Self { backend, dim_range })
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }
}

impl<B: LocalInterpolation> LocalInterpolation for PowerInterpolation<B> {
    fn dim_range(&self) -> usize {
        self.dim_range
    }

    fn interpolate_function<G>(&self, f: G, out: &mut Vec<f64>)
    where
        G: Fn(&[f64], &mut [f64]),
    {
        out.clear();
        let mut component = Vec::new();
        for d in 0..self.dim_range {
            let f = &f;
            self.backend.interpolate_function(
                |x: &[f64], y: &mut [f64]| {
                    let mut fy = vec![0.0; self.dim_range];
                    f(x, &mut fy);
                    y[0] = fy[d];
                },
                &mut component,
            );
            if d == 0 {
                out.reserve(component.len() * self.dim_range);
            }
            debug_assert!(d == 0 || out.len() == d * component.len());
            out.extend_from_slice(&component);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::basis::{MonomialBasis, MonomialEvaluator, VectorMonomialEvaluator};
    use crate::topology::Topology;

    #[test]
    fn point_rows_hold_monomial_values() {
        let basis = MonomialBasis::new(Topology::line());
        let eval = MonomialEvaluator::new(&basis, 1);
        let interp = PointInterpolation::new(vec![vec![0.0], vec![1.0]]);
        let mut m = DenseMatrix::new(0, 0);
        interp.interpolate(&eval, &mut m).unwrap();
        assert_eq!(m.row(0), &[1.0, 0.0]);
        assert_eq!(m.row(1), &[1.0, 1.0]);
    }

    #[test]
    fn component_mismatch_is_rejected() {
        let basis = MonomialBasis::new(Topology::line());
        let eval = VectorMonomialEvaluator::new(&basis, 1, 2);
        let interp = PointInterpolation::new(vec![vec![0.0], vec![1.0]]);
        let mut m = DenseMatrix::new(0, 0);
        assert!(matches!(
            interp.interpolate(&eval, &mut m),
            Err(BasisError::InvalidInterpolation(_))
        ));
    }

    #[test]
    fn wrong_point_dimension_is_rejected() {
        let basis = MonomialBasis::new(Topology::triangle());
        let eval = MonomialEvaluator::new(&basis, 0);
        let interp = PointInterpolation::new(vec![vec![0.0]]);
        let mut m = DenseMatrix::new(0, 0);
        assert!(interp.interpolate(&eval, &mut m).is_err());
    }

    #[test]
    fn power_interpolation_is_component_major() {
        let scalar = PointInterpolation::new(vec![vec![0.0], vec![0.5], vec![1.0]]);
        let power = PowerInterpolation::new(scalar, 2).unwrap();
        let mut out = Vec::new();
        power.interpolate_function(
            |x, y| {
                y[0] = x[0];
                y[1] = 10.0 + x[0];
            },
            &mut out,
        );
        assert_eq!(out, vec![0.0, 0.5, 1.0, 10.0, 10.5, 11.0]);
    }

    #[test]
    fn vector_points_and_power_agree_on_coefficient_order() {
        let points = vec![vec![0.0], vec![0.5], vec![1.0]];
        let f = |x: &[f64], y: &mut [f64]| {
            y[0] = x[0];
            y[1] = 10.0 + x[0];
        };
        let mut direct = Vec::new();
        PointInterpolation::with_range(points.clone(), 2).interpolate_function(f, &mut direct);
        let mut power = Vec::new();
        PowerInterpolation::new(PointInterpolation::new(points), 2)
            .unwrap()
            .interpolate_function(f, &mut power);
        assert_eq!(direct, power);
    }

    #[test]
    fn vector_rows_are_component_major() {
        let basis = MonomialBasis::new(Topology::line());
        let eval = VectorMonomialEvaluator::new(&basis, 0, 2);
        let interp = PointInterpolation::with_range(vec![vec![0.25]], 2);
        let mut m = DenseMatrix::new(0, 0);
        interp.interpolate(&eval, &mut m).unwrap();
        assert_eq!(m.row(0), &[1.0, 0.0]);
        assert_eq!(m.row(1), &[0.0, 1.0]);
    }

    #[test]
    fn power_needs_a_scalar_backend() {
        let vector = PointInterpolation::with_range(vec![vec![0.0]], 2);
        assert!(PowerInterpolation::new(vector, 2).is_err());
    }
}
