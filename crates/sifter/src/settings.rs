// Standard Library Imports
use std::path::Path;

// External Crate Imports
use fingerprint::MassWindow;

// Local Crate Imports
use crate::{MassTolerance, Matcher, Multiplicity, Result, Settings, Tolerance};

// Constants ===========================================================================================================

/// The folder of theoretical peptide files searched when none is given
pub const DEFAULT_DATABASE: &str = "theoretical_peptides_outputs/filtered_peptides";
/// The match tolerance used when none is given
pub const DEFAULT_TOLERANCE: Tolerance = Tolerance::Da(0.2);
/// The number of ranked species reported when no other limit is given
pub const DEFAULT_TOP_N: usize = 20;

// Public API ==========================================================================================================

impl Settings {
    /// Validates an analysis configuration: `tolerance` must be positive and finite, and `database` must be an existing
    /// folder
    pub fn new(
        database: impl AsRef<Path>,
        window: MassWindow,
        tolerance: Tolerance,
    ) -> Result<Self> {
        let database = database.as_ref();
        if !database.exists() {
            return Err(fingerprint::Error::MissingDirectory {
                path: database.to_owned(),
            }
            .into());
        }
        if !database.is_dir() {
            return Err(fingerprint::Error::NotADirectory {
                path: database.to_owned(),
            }
            .into());
        }

        Ok(Self {
            database: database.to_owned(),
            window,
            tolerance: tolerance.validate()?,
            multiplicity: Multiplicity::default(),
        })
    }

    #[must_use]
    pub fn with_multiplicity(mut self, multiplicity: Multiplicity) -> Self {
        self.multiplicity = multiplicity;
        self
    }

    #[must_use]
    pub fn database(&self) -> &Path {
        &self.database
    }

    #[must_use]
    pub const fn window(&self) -> MassWindow {
        self.window
    }

    #[must_use]
    pub const fn tolerance(&self) -> Tolerance {
        self.tolerance
    }

    #[must_use]
    pub const fn multiplicity(&self) -> Multiplicity {
        self.multiplicity
    }

    #[must_use]
    pub fn matcher(&self) -> Matcher {
        Matcher::new(self.tolerance).with_multiplicity(self.multiplicity)
    }
}

// Module Tests ========================================================================================================
