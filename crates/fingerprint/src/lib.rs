//! Loads the two sides of a peptide mass fingerprint comparison: a database of theoretical collagen peptide masses
//! (one file per species) and an experimentally measured, peak-reduced, list of (mass, intensity) peaks

mod errors;
mod experimental;
mod mass_window;
mod theoretical;
mod total_float;

// Standard Library Imports
use std::path::PathBuf;

// External Crate Imports
use derive_more::Display;

// Local Crate Imports
pub use errors::{Error, Result};
pub use theoretical::load_theoretical_database;
pub use total_float::TotalFloat;

// Public API ==========================================================================================================

/// The lower bound of the default [`MassWindow`], in Daltons
pub const DEFAULT_MIN_MASS: f64 = 800.0;
/// The upper bound of the default [`MassWindow`], in Daltons
pub const DEFAULT_MAX_MASS: f64 = 3500.0;

/// An inclusive range of masses used to restrict both theoretical and experimental masses to the biologically
/// relevant region of a spectrum. Always satisfies `min <= max`
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Display)]
#[display("[{min}, {max}] Da")]
pub struct MassWindow {
    min: TotalFloat,
    max: TotalFloat,
}

/// The theoretical peptide masses of a single species. Masses are kept sorted in ascending order
#[derive(Clone, PartialEq, Debug)]
pub struct TheoreticalEntry {
    species: String,
    masses: Vec<f64>,
}

/// Every species loaded from a folder of reference files, along with any files that had to be skipped
#[derive(Clone, PartialEq, Debug)]
pub struct TheoreticalDatabase {
    window: MassWindow,
    entries: Vec<TheoreticalEntry>,
    skipped: Vec<SkippedFile>,
}

/// Reads a folder of reference files into a [`TheoreticalDatabase`]
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct DatabaseLoader {
    extension: String,
    species_suffix: String,
    mass_column: Option<String>,
}

#[derive(Clone, Eq, PartialEq, Debug, Display)]
#[display("{}: {reason}", path.display())]
pub struct SkippedFile {
    path: PathBuf,
    reason: SkipReason,
}

#[derive(Clone, Eq, PartialEq, Debug, Display)]
pub enum SkipReason {
    #[display("unreadable ({_0})")]
    Unreadable(String),
    #[display("no mass column named {_0:?}")]
    MissingColumn(String),
    #[display("no numeric masses")]
    NoMasses,
}

#[derive(Copy, Clone, PartialEq, Debug)]
pub struct ExperimentalPeak {
    mass: f64,
    intensity: f64,
}

/// An experimental peak list, restricted to a [`MassWindow`]
#[derive(Clone, PartialEq, Debug)]
pub struct ExperimentalPeaks {
    window: MassWindow,
    peaks: Vec<ExperimentalPeak>,
    parsed_rows: usize,
    dropped_rows: usize,
}
