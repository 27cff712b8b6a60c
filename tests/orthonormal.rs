use refelem_basis::basis::symbolic_monomials;
use refelem_basis::prelude::*;

/// Gram matrix of the orthonormal functions, `C G C^T`, with the exact
/// monomial Gram matrix `G` converted to `f64`.
fn onb_gram(topology: &Topology, order: u32) -> Vec<Vec<f64>> {
    let dim = topology.dimension() as usize;
    let onb = OrthonormalBasis::new(topology.clone(), order).unwrap();
    let monomials = MonomialBasis::standard(dim as u32);
    let exponents: Vec<Vec<u32>> = symbolic_monomials(&monomials, order)
        .iter()
        .map(|m| m.polynomial_exponents(dim).unwrap())
        .collect();
    let n = exponents.len();
    let mut gram = vec![vec![0.0; n]; n];
    for i in 0..n {
        for j in 0..n {
            let sum: Vec<u32> = exponents[i].iter().zip(&exponents[j]).map(|(a, b)| a + b).collect();
            gram[i][j] = Field::to_f64(&topology.monomial_integral(&sum));
        }
    }
    let c = onb.coefficients();
    assert_eq!(c.size(), n);
    let mut out = vec![vec![0.0; n]; n];
    for (a, row_a) in out.iter_mut().enumerate() {
        for (b, value) in row_a.iter_mut().enumerate() {
            for (k, ca) in c.row(a) {
                for (l, cb) in c.row(b) {
                    *value += ca * gram[*k][*l] * cb;
                }
            }
        }
    }
    out
}

#[test]
fn gram_matrix_is_identity() {
    for topology in [Topology::triangle(), Topology::tetrahedron(), Topology::prism()] {
        for order in 0..=4 {
            let gram = onb_gram(&topology, order);
            for (i, row) in gram.iter().enumerate() {
                for (j, v) in row.iter().enumerate() {
                    let expected = if i == j { 1.0 } else { 0.0 };
                    assert!(
                        (v - expected).abs() < 1e-8,
                        "{topology} order {order}: G[{i}][{j}] = {v}"
                    );
                }
            }
        }
    }
}

#[test]
fn constant_function_normalizes_the_volume() {
    let onb = OrthonormalBasis::new(Topology::tetrahedron(), 0).unwrap();
    let mut out = [0.0; 1];
    onb.evaluate(0, &[0.1, 0.2, 0.3], &mut out).unwrap();
    // 1 / sqrt(1/6)
    assert!((out[0] - 6f64.sqrt()).abs() < 1e-12);
}

#[test]
fn sizes_follow_the_total_degree_space() {
    let onb = OrthonormalBasis::new(Topology::hexahedron(), 3).unwrap();
    assert_eq!(onb.size(3), 20);
    assert_eq!(onb.coefficients().size(), 20);
    assert_eq!(onb.max_order(), 3);
}

#[test]
fn short_buffers_are_reported() {
    let onb = OrthonormalBasis::new(Topology::triangle(), 2).unwrap();
    let mut out = [0.0; 2];
    assert_eq!(
        onb.evaluate(2, &[0.2, 0.2], &mut out),
        Err(BasisError::CapacityMismatch {
            expected: 6,
            found: 2
        })
    );
}
