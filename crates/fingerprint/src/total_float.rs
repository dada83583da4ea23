// Standard Library Imports
use std::{
    cmp::Ordering,
    hash::{Hash, Hasher},
};

// External Crate Imports
use derive_more::{Display, From, Into};

// Public API ==========================================================================================================

/// An `f64` that is totally ordered (via [`f64::total_cmp`]), and can therefore be used as a key in sorted or hashed
/// collections
#[derive(Copy, Clone, Debug, Display, From, Into)]
pub struct TotalFloat(f64);

impl TotalFloat {
    #[must_use]
    pub const fn get(self) -> f64 {
        self.0
    }
}

// Implementing Ord for TotalFloat =====================================================================================

impl Ord for TotalFloat {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl PartialOrd for TotalFloat {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for TotalFloat {
    fn eq(&self, other: &Self) -> bool {
        // NOTE: This is *not* equivalent to `self.0 == other.0`! The `.total_cmp()` used in the `Ord` implementation
        // differs from the default `PartialEq` implementation for floats, and it's vital that the `Ord` and
        // `PartialEq` implementations agree on which values are equal.
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for TotalFloat {}

// Implementing Hash for TotalFloat ====================================================================================

impl Hash for TotalFloat {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // NOTE: `.total_cmp()` only reports two floats as equal when their bit patterns are identical, so hashing the
        // bits keeps `Hash` consistent with `Eq`
        self.0.to_bits().hash(state);
    }
}

// Module Tests ========================================================================================================
