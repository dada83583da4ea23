// Standard Library Imports
use std::path::PathBuf;

// External Crate Imports
use fingerprint::MassWindow;
use miette::Diagnostic;
use polars::prelude::PolarsError;
use thiserror::Error;

// Local Crate Imports
use crate::Tolerance;

// Public API ==========================================================================================================

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Diagnostic, Error)]
pub enum Error {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Fingerprint(#[from] fingerprint::Error),

    #[error("the match tolerance must be positive and finite, but got {tolerance:?}")]
    #[diagnostic(help("tolerances are given in Daltons (e.g. 0.2 or 0.2da) or parts-per-million (e.g. 10ppm)"))]
    NonPositiveTolerance { tolerance: Tolerance },

    #[error("{input:?} is not a valid match tolerance")]
    #[diagnostic(help("tolerances are given in Daltons (e.g. 0.2 or 0.2da) or parts-per-million (e.g. 10ppm)"))]
    InvalidTolerance { input: String },

    #[error("no usable theoretical peptide files were found in {} ({skipped} skipped)", path.display())]
    #[diagnostic(help("each species needs a file containing a column of numeric theoretical peptide masses"))]
    NoDatabase { path: PathBuf, skipped: usize },

    #[error("the experimental peaks were filtered to {peaks}, but the analysis was configured for {settings}")]
    MismatchedWindows {
        peaks: MassWindow,
        settings: MassWindow,
    },

    #[error("failed to build the table of species matches")]
    Table(#[from] PolarsError),
}

// Module Tests ========================================================================================================
