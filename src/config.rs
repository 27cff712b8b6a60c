//! Construction options shared by the basis builders.

use serde::{Deserialize, Serialize};

/// Tunables for monomial tables, inversion and pyramid projection.
///
/// The defaults reproduce the classic behavior: size tables are built
/// eagerly up to order 2, and both the pivot test and the apex test use a
/// `1e-12` threshold.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BasisOptions {
    /// Order up to which size tables are computed on construction.
    pub initial_order: u32,
    /// Relative threshold below which a floating pivot counts as zero.
    pub pivot_tolerance: f64,
    /// Distance from `z = 1` below which a pyramid point is the apex.
    pub apex_tolerance: f64,
}

impl Default for BasisOptions {
    fn default() -> Self {
        Self {
            initial_order: 2,
            pivot_tolerance: 1e-12,
            apex_tolerance: 1e-12,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let opts: BasisOptions = serde_json::from_str(r#"{ "initial_order": 5 }"#).unwrap();
        assert_eq!(opts.initial_order, 5);
        assert_eq!(opts.pivot_tolerance, 1e-12);
        assert_eq!(opts.apex_tolerance, 1e-12);
    }
}
