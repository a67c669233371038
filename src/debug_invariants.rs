//! Invariant-checking hooks shared by the crate's data structures.
//!
//! Structural invariants (boundary arity, coboundary reciprocity, dense-slot
//! bijection) are validated after every mutating operation in debug builds
//! and whenever the `check-invariants` feature is enabled; release builds
//! skip the checks unless asked.

use crate::error::CellComplexError;

/// Trait for validating data structure invariants.
pub trait DebugInvariants {
    /// Assert invariants in debug builds or when invariant checking is
    /// enabled; a no-op otherwise.
    fn debug_assert_invariants(&self);

    /// Validate invariants and return the first violation encountered.
    fn validate_invariants(&self) -> Result<(), CellComplexError>;
}
