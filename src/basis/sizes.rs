//! Per-degree size tables of graded monomial bases.

use crate::basis_error::BasisError;
use crate::debug_invariants::DebugInvariants;

/// `sizes[k]` counts basis functions of exact degree `k`, `cumulative[k]`
/// those of degree at most `k`.
///
/// # Invariants
///
/// - Both tables have `max_order + 1` entries.
/// - `sizes[0] == cumulative[0] == 1` (the constant function).
/// - `cumulative[k] == cumulative[k-1] + sizes[k]`, hence non-decreasing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GradedSizes {
    sizes: Vec<usize>,
    cumulative: Vec<usize>,
}

impl GradedSizes {
    /// Table of the point: only the constant.
    pub fn point(order: u32) -> Self {
        let n = order as usize + 1;
        let mut sizes = vec![0; n];
        sizes[0] = 1;
        Self::from_sizes(sizes)
    }

    /// Table of `Prism(base)`; `base` must reach at least `order`.
    pub fn prism(base: &GradedSizes, order: u32) -> Self {
        debug_assert!(base.max_order() >= order);
        let sizes = (0..=order as usize)
            .map(|k| {
                if k == 0 {
                    1
                } else {
                    base.cumulative[k] + k * base.sizes[k]
                }
            })
            .collect();
        Self::from_sizes(sizes)
    }

    /// Table of `Pyramid(base)`; `base` must reach at least `order`.
    pub fn pyramid(base: &GradedSizes, order: u32) -> Self {
        debug_assert!(base.max_order() >= order);
        let sizes = (0..=order as usize)
            .map(|k| if k == 0 { 1 } else { base.cumulative[k] })
            .collect();
        Self::from_sizes(sizes)
    }

    fn from_sizes(sizes: Vec<usize>) -> Self {
        let cumulative = sizes
            .iter()
            .scan(0, |acc, s| {
                *acc += s;
                Some(*acc)
            })
            .collect();
        let table = Self { sizes, cumulative };
        table.debug_assert_invariants();
        table
    }

    /// Highest degree covered by the table.
    pub fn max_order(&self) -> u32 {
        (self.sizes.len() - 1) as u32
    }

    /// Number of functions of exact degree `k`.
    pub fn size(&self, k: u32) -> usize {
        self.sizes[k as usize]
    }

    /// Number of functions of degree at most `k`.
    pub fn cumulative(&self, k: u32) -> usize {
        self.cumulative[k as usize]
    }

    /// Offset of the degree-`k` block in an evaluation buffer.
    pub fn block_start(&self, k: u32) -> usize {
        if k == 0 { 0 } else { self.cumulative[k as usize - 1] }
    }

    /// Number of functions up to `max_order`.
    pub fn total(&self) -> usize {
        self.cumulative.last().copied().unwrap_or(0)
    }

    pub fn sizes(&self) -> &[usize] {
        &self.sizes
    }

    pub fn cumulative_sizes(&self) -> &[usize] {
        &self.cumulative
    }
}

impl DebugInvariants for GradedSizes {
    fn validate_invariants(&self) -> Result<(), BasisError> {
        if self.sizes.is_empty() || self.sizes.len() != self.cumulative.len() {
            return Err(BasisError::InvariantViolation(format!(
                "table lengths {} and {} differ or are empty",
                self.sizes.len(),
                self.cumulative.len()
            )));
        }
        if self.sizes[0] != 1 || self.cumulative[0] != 1 {
            return Err(BasisError::InvariantViolation(
                "degree 0 must hold exactly the constant".to_string(),
            ));
        }
        for k in 1..self.sizes.len() {
            if self.cumulative[k] != self.cumulative[k - 1] + self.sizes[k] {
                return Err(BasisError::InvariantViolation(format!(
                    "cumulative[{k}] is not the running sum"
                )));
            }
        }
        Ok(())
    }
}
