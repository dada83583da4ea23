// Local Crate Imports
use crate::{DEFAULT_MAX_MASS, DEFAULT_MIN_MASS, Error, MassWindow, Result};

// Public API ==========================================================================================================

impl MassWindow {
    pub fn new(min: f64, max: f64) -> Result<Self> {
        if !(min.is_finite() && max.is_finite()) {
            return Err(Error::NonFiniteMassWindow { min, max });
        }
        if min > max {
            return Err(Error::InvertedMassWindow { min, max });
        }

        Ok(Self {
            min: min.into(),
            max: max.into(),
        })
    }

    #[must_use]
    pub const fn min(&self) -> f64 {
        self.min.get()
    }

    #[must_use]
    pub const fn max(&self) -> f64 {
        self.max.get()
    }

    /// Both bounds are inclusive
    #[must_use]
    pub fn contains(&self, mass: f64) -> bool {
        (self.min()..=self.max()).contains(&mass)
    }
}

impl Default for MassWindow {
    fn default() -> Self {
        Self {
            min: DEFAULT_MIN_MASS.into(),
            max: DEFAULT_MAX_MASS.into(),
        }
    }
}

// Module Tests ========================================================================================================
