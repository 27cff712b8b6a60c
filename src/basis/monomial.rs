//! Graded monomial bases driven by the recursive topology.
//!
//! Every level of the topology owns a [`GradedSizes`] table. Evaluation
//! walks the levels from the point outwards; each level fills its degree
//! blocks in place, starting at the block offsets of the *outermost* table,
//! so the base level's functions form a prefix of every block.
//!
//! Block layout of degree `k` for the constructor at level `d`
//! (`z = x_{d-1}`):
//!
//! - `Point`: `[1]` (degree 0 only).
//! - `Prism(B)`: `[B_k, z B_k, …, z^k B_k, z · tail_{k-1}]`, where
//!   `tail_{k-1}` starts at the `z^{k-1} B_{k-1}` column of block `k-1`.
//! - `Pyramid(B)`, `B` a simplex: `[B_k, z · block_{k-1}]`.
//! - `Pyramid(B)` otherwise: `[(1-z)^k B_k(x'/(1-z)), z · block_{k-1}]`.

use super::sizes::GradedSizes;
use crate::basis_error::BasisError;
use crate::config::BasisOptions;
use crate::field::{EvaluationField, Field};
use crate::topology::{Constructor, Topology};
use parking_lot::{RwLock, RwLockUpgradableReadGuard};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Level {
    Point,
    Prism,
    /// `simplex` is set when the pyramid's base is a simplex, in which case
    /// the monomials are homogeneous and no projection is needed.
    Pyramid { simplex: bool },
}

/// Monomial basis of a reference topology, graded by order.
///
/// Size tables are cached and grow on demand: asking for an order beyond
/// the cached maximum recomputes every level's table, smaller requests
/// reuse the cache.
#[derive(Debug)]
pub struct MonomialBasis {
    topology: Topology,
    levels: Vec<Level>,
    tables: RwLock<Vec<GradedSizes>>,
    apex_tolerance: f64,
}

static_assertions::assert_impl_all!(MonomialBasis: Send, Sync);

impl MonomialBasis {
    pub fn new(topology: Topology) -> Self {
        Self::with_options(topology, &BasisOptions::default())
    }

    pub fn with_options(topology: Topology, options: &BasisOptions) -> Self {
        let mut levels = Vec::with_capacity(topology.dimension() as usize + 1);
        let mut current = Some(&topology);
        while let Some(t) = current {
            levels.push(match t.constructor() {
                Constructor::Point => Level::Point,
                Constructor::Prism => Level::Prism,
                Constructor::Pyramid => Level::Pyramid {
                    simplex: t.is_simplex(),
                },
            });
            current = t.base();
        }
        levels.reverse();
        let tables = compute_tables(&levels, options.initial_order);
        Self {
            topology,
            levels,
            tables: RwLock::new(tables),
            apex_tolerance: options.apex_tolerance,
        }
    }

    /// Total-degree monomials in `dim` variables (pyramid tower).
    pub fn standard(dim: u32) -> Self {
        Self::new(Topology::simplex(dim))
    }

    /// Tensor-degree monomials in `dim` variables (prism tower).
    pub fn standard_bi(dim: u32) -> Self {
        Self::new(Topology::cube(dim))
    }

    pub fn topology(&self) -> &Topology {
        &self.topology
    }

    pub fn dimension(&self) -> u32 {
        self.topology.dimension()
    }

    /// Highest order the cached tables cover.
    pub fn max_order(&self) -> u32 {
        self.tables
            .read()
            .last()
            .map(GradedSizes::max_order)
            .unwrap_or(0)
    }

    /// Size table of the full topology, grown to `order` if necessary.
    pub fn sizes(&self, order: u32) -> GradedSizes {
        self.ensure_order(order);
        let tables = self.tables.read();
        tables[tables.len() - 1].clone()
    }

    /// Number of monomials of degree at most `order`.
    pub fn size(&self, order: u32) -> usize {
        self.ensure_order(order);
        let tables = self.tables.read();
        tables[tables.len() - 1].cumulative(order)
    }

    fn ensure_order(&self, order: u32) {
        let tables = self.tables.upgradable_read();
        if tables.last().is_some_and(|t| t.max_order() >= order) {
            return;
        }
        let mut tables = RwLockUpgradableReadGuard::upgrade(tables);
        log::debug!(
            "growing monomial size tables of `{}` to order {order}",
            self.topology.name()
        );
        *tables = compute_tables(&self.levels, order);
    }

    /// Evaluate every monomial of degree at most `order` at `x`.
    ///
    /// # Panics
    /// If `x` has fewer coordinates than the cell dimension or `values` is
    /// shorter than [`size(order)`](Self::size).
    pub fn evaluate<F: EvaluationField>(&self, order: u32, x: &[F], values: &mut [F]) {
        self.ensure_order(order);
        let tables = self.tables.read();
        let top = &tables[tables.len() - 1];
        assert!(
            x.len() >= self.levels.len() - 1,
            "point has {} coordinates, cell dimension is {}",
            x.len(),
            self.levels.len() - 1
        );
        assert!(
            values.len() >= top.cumulative(order),
            "value buffer holds {} entries, {} required",
            values.len(),
            top.cumulative(order)
        );
        self.evaluate_level(&tables, self.levels.len() - 1, order, x, top, values);
    }

    /// Checked variant of [`evaluate`](Self::evaluate) requiring an exactly
    /// sized buffer and a point with exactly `dimension()` coordinates.
    pub fn try_evaluate<F: EvaluationField>(
        &self,
        order: u32,
        x: &[F],
        values: &mut [F],
    ) -> Result<(), BasisError> {
        let dim = self.dimension() as usize;
        if x.len() != dim {
            return Err(BasisError::DimensionMismatch {
                expected: dim,
                found: x.len(),
            });
        }
        let expected = self.size(order);
        if values.len() != expected {
            return Err(BasisError::CapacityMismatch {
                expected,
                found: values.len(),
            });
        }
        self.evaluate(order, x, values);
        Ok(())
    }

    pub fn evaluate_vec<F: EvaluationField>(&self, order: u32, x: &[F]) -> Vec<F> {
        let mut values = vec![F::one(); self.size(order)];
        self.evaluate(order, x, &mut values);
        values
    }

    /// Exact cell integral of every monomial of degree at most `order`.
    pub fn integral<F: Field>(&self, order: u32, values: &mut [F]) {
        self.ensure_order(order);
        let tables = self.tables.read();
        let top = &tables[tables.len() - 1];
        assert!(
            values.len() >= top.cumulative(order),
            "value buffer holds {} entries, {} required",
            values.len(),
            top.cumulative(order)
        );
        self.integral_level(&tables, self.levels.len() - 1, order, top, values);
    }

    pub fn integral_vec<F: Field>(&self, order: u32) -> Vec<F> {
        let mut values = vec![F::zero(); self.size(order)];
        self.integral(order, &mut values);
        values
    }

    fn evaluate_level<F: EvaluationField>(
        &self,
        tables: &[GradedSizes],
        level: usize,
        order: u32,
        x: &[F],
        top: &GradedSizes,
        values: &mut [F],
    ) {
        match self.levels[level] {
            Level::Point => values[0] = F::one(),
            Level::Prism => {
                let z = &x[level - 1];
                self.evaluate_level(tables, level - 1, order, x, top, values);
                let base = &tables[level - 1];
                let own = &tables[level];
                let mut row0 = 0;
                for k in 1..=order {
                    let row1_begin = top.block_start(k);
                    let colk_end = row1_begin + (k as usize + 1) * base.size(k);
                    let row1_end = row1_begin + own.size(k);
                    debug_assert!(colk_end <= top.cumulative(k));
                    debug_assert!(row1_end <= top.cumulative(k));
                    let mut row1 = row1_begin;
                    let mut it = row1_begin + base.size(k);
                    while it < colk_end {
                        values[it] = z.clone() * values[row1].clone();
                        row1 += 1;
                        it += 1;
                    }
                    while it < row1_end {
                        values[it] = z.clone() * values[row0].clone();
                        row0 += 1;
                        it += 1;
                    }
                    row0 = row1;
                }
            }
            Level::Pyramid { simplex: true } => {
                let z = &x[level - 1];
                self.evaluate_level(tables, level - 1, order, x, top, values);
                let base = &tables[level - 1];
                let own = &tables[level];
                let mut row0 = 0;
                for k in 1..=order {
                    let row1 = top.block_start(k);
                    let row1_end = row1 + own.size(k);
                    debug_assert!(row1_end <= top.cumulative(k));
                    for it in row1 + base.size(k)..row1_end {
                        values[it] = z.clone() * values[row0].clone();
                        row0 += 1;
                    }
                    row0 = row1;
                }
            }
            Level::Pyramid { simplex: false } => {
                let z = &x[level - 1];
                let mut omz = z.one_minus();
                if omz.is_positive(self.apex_tolerance) {
                    let inv = omz.recip();
                    let y: Vec<F> = x[..level - 1]
                        .iter()
                        .map(|xi| xi.clone() * inv.clone())
                        .collect();
                    self.evaluate_level(tables, level - 1, order, &y, top, values);
                } else {
                    // apex: the projected point is undefined, use the origin
                    log::trace!("pyramid apex reached on `{}`", self.topology.name());
                    let y = vec![F::zero(); level - 1];
                    self.evaluate_level(tables, level - 1, order, &y, top, values);
                    omz = F::zero();
                }
                let base = &tables[level - 1];
                let own = &tables[level];
                let mut row0 = 0;
                let mut omzk = omz.clone();
                for k in 1..=order {
                    let row1 = top.block_start(k);
                    let row1_end = row1 + own.size(k);
                    let col0_end = row1 + base.size(k);
                    debug_assert!(row1_end <= top.cumulative(k));
                    for it in row1..col0_end {
                        values[it] = values[it].clone() * omzk.clone();
                    }
                    for it in col0_end..row1_end {
                        values[it] = z.clone() * values[row0].clone();
                        row0 += 1;
                    }
                    row0 = row1;
                    omzk = omzk * omz.clone();
                }
            }
        }
    }

    fn integral_level<F: Field>(
        &self,
        tables: &[GradedSizes],
        level: usize,
        order: u32,
        top: &GradedSizes,
        values: &mut [F],
    ) {
        match self.levels[level] {
            Level::Point => values[0] = F::one(),
            Level::Prism => {
                self.integral_level(tables, level - 1, order, top, values);
                let base = &tables[level - 1];
                let own = &tables[level];
                let mut row0 = 0;
                for k in 1..=order {
                    let row1_begin = top.block_start(k);
                    let row1_end = row1_begin + own.size(k);
                    debug_assert!(row1_end <= top.cumulative(k));
                    let mut row1 = row1_begin;
                    let mut it = row1_begin + base.size(k);
                    // column of z-power j integrates to j/(j+1) of column j-1
                    for j in 1..=k as usize {
                        let factor = F::from_ratio(j, j + 1);
                        for _ in 0..base.size(k) {
                            values[it] = factor.clone() * values[row1].clone();
                            row1 += 1;
                            it += 1;
                        }
                    }
                    let factor = F::from_ratio(k as usize, k as usize + 1);
                    while it < row1_end {
                        values[it] = factor.clone() * values[row0].clone();
                        row0 += 1;
                        it += 1;
                    }
                    row0 = row1;
                }
            }
            Level::Pyramid { .. } => {
                self.integral_level(tables, level - 1, order, top, values);
                let base = &tables[level - 1];
                let dim = level;
                let mut row0 = 0;
                for k in 0..=order {
                    let k_us = k as usize;
                    let row1 = top.block_start(k);
                    let col0_end = row1 + base.size(k);
                    let factor = F::from_ratio(1, k_us + dim);
                    for it in row1..col0_end {
                        values[it] = factor.clone() * values[it].clone();
                    }
                    // group i holds z^(i+1) times base functions of degree k-1-i
                    let mut it = col0_end;
                    for i in 0..k_us {
                        let scale = F::from_ratio(i + 1, k_us + dim);
                        for _ in 0..base.size((k_us - 1 - i) as u32) {
                            values[it] = scale.clone() * values[row0].clone();
                            row0 += 1;
                            it += 1;
                        }
                    }
                    debug_assert!(it <= top.cumulative(k));
                    row0 = row1;
                }
            }
        }
    }
}

fn compute_tables(levels: &[Level], order: u32) -> Vec<GradedSizes> {
    let mut tables: Vec<GradedSizes> = Vec::with_capacity(levels.len());
    for level in levels {
        let table = match (level, tables.last()) {
            (Level::Prism, Some(base)) => GradedSizes::prism(base, order),
            (Level::Pyramid { .. }, Some(base)) => GradedSizes::pyramid(base, order),
            _ => GradedSizes::point(order),
        };
        tables.push(table);
    }
    tables
}
