//! Structural self-checks for size tables and matrices.
//!
//! Checks are compiled in for debug builds and whenever the
//! `strict-invariants` or `check-invariants` feature is enabled.

use crate::basis_error::BasisError;

pub trait DebugInvariants {
    /// Check every structural invariant and report the first violation.
    fn validate_invariants(&self) -> Result<(), BasisError>;

    /// Panic on a violation when invariant checking is compiled in.
    fn debug_assert_invariants(&self) {
        crate::debug_invariants!(self.validate_invariants(), std::any::type_name::<Self>());
    }
}

/// Run a fallible check and panic with `context` on error when invariant
/// checking is compiled in; expands to nothing otherwise.
#[macro_export]
macro_rules! debug_invariants {
    ($check:expr, $context:expr) => {
        #[cfg(any(debug_assertions, feature = "strict-invariants", feature = "check-invariants"))]
        if let Err(e) = $check {
            panic!("[invariants] {}: {}", $context, e);
        }
    };
}
