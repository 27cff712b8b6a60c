use num_rational::BigRational;
use proptest::prelude::*;
use refelem_basis::prelude::*;

fn binomial(n: usize, k: usize) -> usize {
    (0..k).fold(1, |acc, i| acc * (n - i) / (i + 1))
}

#[test]
fn named_cells_match_closed_forms() {
    for order in 0..8u32 {
        let n = order as usize;
        assert_eq!(MonomialBasis::new(Topology::triangle()).size(order), binomial(n + 2, 2));
        assert_eq!(MonomialBasis::new(Topology::tetrahedron()).size(order), binomial(n + 3, 3));
        assert_eq!(MonomialBasis::new(Topology::hexahedron()).size(order), (n + 1).pow(3));
        assert_eq!(
            MonomialBasis::new(Topology::prism()).size(order),
            binomial(n + 2, 2) * (n + 1)
        );
        assert_eq!(
            MonomialBasis::new(Topology::pyramid()).size(order),
            (n + 1) * (n + 2) * (2 * n + 3) / 6
        );
    }
}

#[test]
fn standard_bases() {
    assert_eq!(MonomialBasis::standard(4).size(2), binomial(6, 4));
    assert_eq!(MonomialBasis::standard_bi(4).size(2), 81);
    assert!(MonomialBasis::standard(3).topology().is_simplex());
    assert!(MonomialBasis::standard_bi(3).topology().is_cube());
}

#[test]
fn interval_moments() {
    let basis = MonomialBasis::new(Topology::line());
    let integrals: Vec<BigRational> = basis.integral_vec(10);
    for (k, value) in integrals.iter().enumerate() {
        assert_eq!(*value, <BigRational as Field>::from_ratio(1, k + 1));
    }
}

#[test]
fn constant_is_one_at_the_pyramid_apex() {
    let basis = MonomialBasis::new(Topology::pyramid());
    let values = basis.evaluate_vec(3, &[0.0, 0.0, 1.0]);
    assert_eq!(values[0], 1.0);
    assert!(values.iter().all(|v| v.is_finite()));

    let exact: Vec<BigRational> = basis.evaluate_vec(
        2,
        &[
            <BigRational as EvaluationField>::zero(),
            <BigRational as EvaluationField>::zero(),
            <BigRational as EvaluationField>::one(),
        ],
    );
    assert_eq!(exact[0], <BigRational as EvaluationField>::one());
}

/// Gauss-Legendre nodes and weights on `[0, 1]`.
fn gauss_legendre(n: usize) -> Vec<(f64, f64)> {
    (0..n)
        .map(|i| {
            let mut x = (std::f64::consts::PI * (i as f64 + 0.75) / (n as f64 + 0.5)).cos();
            let mut dp = 0.0;
            for _ in 0..100 {
                let (mut p0, mut p1) = (1.0, x);
                for k in 2..=n {
                    let k = k as f64;
                    let p2 = ((2.0 * k - 1.0) * x * p1 - (k - 1.0) * p0) / k;
                    p0 = p1;
                    p1 = p2;
                }
                dp = n as f64 * (x * p1 - p0) / (x * x - 1.0);
                let step = p1 / dp;
                x -= step;
                if step.abs() < 1e-16 {
                    break;
                }
            }
            ((1.0 + x) / 2.0, 1.0 / ((1.0 - x * x) * dp * dp))
        })
        .collect()
}

/// Integrates the monomials of a pyramid over a `d`-cube with a tensor
/// Gauss rule on the collapsed cube `x' = u (1 - z)`, `|J| = (1 - z)^d`.
fn collapsed_cube_integrals(d: usize, order: u32) -> Vec<f64> {
    let basis = MonomialBasis::new(Topology::pyramid_over(Topology::cube(d as u32)));
    let rule = gauss_legendre(order as usize + d);
    let mut sums = vec![0.0; basis.size(order)];
    let mut index = vec![0usize; d + 1];
    loop {
        let (z, wz) = rule[index[d]];
        let mut weight = wz * (1.0 - z).powi(d as i32);
        let mut x = vec![0.0; d + 1];
        for k in 0..d {
            let (u, wu) = rule[index[k]];
            x[k] = u * (1.0 - z);
            weight *= wu;
        }
        x[d] = z;
        for (s, v) in sums.iter_mut().zip(basis.evaluate_vec(order, &x)) {
            *s += weight * v;
        }
        // next tensor index
        let mut k = 0;
        while k <= d {
            index[k] += 1;
            if index[k] < rule.len() {
                break;
            }
            index[k] = 0;
            k += 1;
        }
        if k > d {
            return sums;
        }
    }
}

#[test]
fn gauss_rule_integrates_polynomials() {
    let rule = gauss_legendre(4);
    let weights: f64 = rule.iter().map(|(_, w)| w).sum();
    assert!((weights - 1.0).abs() < 1e-14);
    let x7: f64 = rule.iter().map(|(x, w)| w * x.powi(7)).sum();
    assert!((x7 - 0.125).abs() < 1e-14);
}

#[test]
fn square_pyramid_integrals_match_collapsed_quadrature() {
    let basis = MonomialBasis::new(Topology::pyramid());
    let exact: Vec<f64> = basis.integral_vec(4);
    assert_eq!(exact.len(), 55);
    let quadrature = collapsed_cube_integrals(2, 4);
    for (i, (a, b)) in exact.iter().zip(&quadrature).enumerate() {
        assert!((a - b).abs() < 1e-12, "function {i}: {a} vs {b}");
    }
}

#[test]
fn pyramid_over_a_cube_integrals_match_collapsed_quadrature() {
    let basis = MonomialBasis::new(Topology::pyramid_over(Topology::hexahedron()));
    let exact: Vec<BigRational> = basis.integral_vec(3);
    let quadrature = collapsed_cube_integrals(3, 3);
    assert_eq!(exact.len(), quadrature.len());
    for (i, (a, b)) in exact.iter().zip(&quadrature).enumerate() {
        assert!((Field::to_f64(a) - b).abs() < 1e-12, "function {i}: {a} vs {b}");
    }
}

#[test]
fn degree_blocks_hold_exact_degree() {
    let basis = MonomialBasis::new(Topology::tetrahedron());
    let sizes = basis.sizes(4);
    let monomials = refelem_basis::basis::symbolic_monomials(&basis, 4);
    for k in 0..=4u32 {
        for m in &monomials[sizes.block_start(k)..sizes.cumulative(k)] {
            assert_eq!(m.total_degree(), k as i32, "{m} in block {k}");
        }
    }
}

fn topology_strategy() -> impl Strategy<Value = Topology> {
    (0u32..5).prop_flat_map(|dim| {
        (0u32..(1 << dim)).prop_map(move |id| Topology::from_id(id, dim).unwrap())
    })
}

proptest! {
    #[test]
    fn simplex_and_cube_sizes(dim in 0u32..5, order in 0u32..7) {
        let n = order as usize;
        let d = dim as usize;
        prop_assert_eq!(MonomialBasis::standard(dim).size(order), binomial(n + d, d));
        prop_assert_eq!(MonomialBasis::standard_bi(dim).size(order), (n + 1).pow(dim));
    }

    #[test]
    fn constant_is_one_everywhere(
        topology in topology_strategy(),
        coords in proptest::collection::vec(0.0f64..1.0, 4),
    ) {
        let dim = topology.dimension() as usize;
        let basis = MonomialBasis::new(topology);
        let values = basis.evaluate_vec(3, &coords[..dim]);
        prop_assert_eq!(values.len(), basis.size(3));
        prop_assert_eq!(values[0], 1.0);
    }

    #[test]
    fn tables_are_cumulative(topology in topology_strategy(), order in 0u32..6) {
        let sizes = MonomialBasis::new(topology).sizes(order);
        prop_assert!(sizes.max_order() >= order);
        prop_assert_eq!(sizes.cumulative(0), 1);
        for k in 1..=order {
            prop_assert_eq!(sizes.cumulative(k), sizes.cumulative(k - 1) + sizes.size(k));
        }
    }
}
