// Standard Library Imports
use std::{io, path::PathBuf};

// External Crate Imports
use miette::Diagnostic;
use thiserror::Error;

// Public API ==========================================================================================================

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Diagnostic, Error)]
pub enum Error {
    #[error("the mass window bounds must be finite, but got {min} and {max}")]
    NonFiniteMassWindow { min: f64, max: f64 },

    #[error("the minimum mass ({min}) of the mass window is greater than its maximum mass ({max})")]
    #[diagnostic(help("the mass window is inclusive, so the minimum can equal, but never exceed, the maximum"))]
    InvertedMassWindow { min: f64, max: f64 },

    #[error("the theoretical peptide database {} could not be found", path.display())]
    #[diagnostic(help("expected a folder containing one file of theoretical peptide masses per species"))]
    MissingDirectory { path: PathBuf },

    #[error("the theoretical peptide database {} is not a folder", path.display())]
    NotADirectory { path: PathBuf },

    #[error("failed to list the contents of the theoretical peptide database {}", path.display())]
    ReadDirectory {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to open the experimental peak list {}", path.display())]
    OpenPeakList {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to read the experimental peak list")]
    ReadPeakList(#[source] csv::Error),

    #[error("the experimental peak list contained no parseable (mass, intensity) rows (rows read: {rows})")]
    NoParseableRows {
        rows: usize,
        first_rejected_line: Option<u64>,
        #[help]
        help: String,
    },
}

impl Error {
    pub(crate) fn no_parseable_rows(rows: usize, first_rejected_line: Option<u64>) -> Self {
        let location = first_rejected_line
            .map(|line| format!(" (see line {line})"))
            .unwrap_or_default();
        let help = format!(
            "each data row must contain a numeric mass and a numeric intensity, separated by a tab{location}"
        );

        Self::NoParseableRows {
            rows,
            first_rejected_line,
            help,
        }
    }
}

// Module Tests ========================================================================================================
