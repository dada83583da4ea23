//! Sifts a database of theoretical collagen peptide masses for the species that best explains an experimental peptide
//! mass fingerprint

mod database_cache;
mod errors;
mod identify;
mod matcher;
mod result_table;
mod settings;
mod tolerance;

// Standard Library Imports
use std::{path::PathBuf, sync::Arc};

// External Crate Imports
use ahash::HashMap;
use derive_more::Display;
use fingerprint::{DatabaseLoader, MassWindow, TheoreticalDatabase};
use once_cell::sync::OnceCell;
use parking_lot::Mutex;

// Local Crate Imports
pub use errors::{Error, Result};
pub use identify::identify_species;
pub use settings::{DEFAULT_DATABASE, DEFAULT_TOLERANCE, DEFAULT_TOP_N};
pub use tolerance::{MassTolerance, parse_tolerance};

// Re-exports so that users of `sifter` don't need to depend on these crates directly
pub use fingerprint;
pub use mzpeaks::Tolerance;

// Public API ==========================================================================================================

/// How experimental peaks and theoretical masses are paired up when counting matches
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default, Display)]
pub enum Multiplicity {
    /// Every experimental peak with at least one theoretical mass within tolerance counts once, even if several
    /// experimental peaks fall near the same theoretical mass
    #[default]
    #[display("per-peak")]
    PerPeak,
    /// Each theoretical mass can account for at most one experimental peak; the count is the largest possible number
    /// of such one-to-one pairings
    #[display("one-to-one")]
    OneToOne,
}

/// Counts and ranks species matches for a fixed tolerance and [`Multiplicity`]
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct Matcher {
    tolerance: Tolerance,
    multiplicity: Multiplicity,
}

/// The number of experimental peaks attributed to a single species
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct MatchResult {
    species: String,
    matches: usize,
    total_peaks: usize,
}

/// One [`MatchResult`] per species, ordered by descending match count. Species with the same number of matches keep
/// the order they were loaded in
#[derive(Clone, Eq, PartialEq, Hash, Debug, Default)]
pub struct ResultTable(Vec<MatchResult>);

/// The validated configuration of an analysis
#[derive(Clone, PartialEq, Debug)]
pub struct Settings {
    database: PathBuf,
    window: MassWindow,
    tolerance: Tolerance,
    multiplicity: Multiplicity,
}

/// The outcome of [`identify_species`]
#[derive(Clone, PartialEq, Debug)]
pub struct Identification {
    table: ResultTable,
    peaks_in_range: usize,
    skipped_files: usize,
}

/// A read-through cache of loaded theoretical databases, keyed by folder and mass window. Each database is loaded at
/// most once per key, and can be shared between concurrent analyses
#[derive(Debug, Default)]
pub struct DatabaseCache {
    loader: DatabaseLoader,
    state: Mutex<CacheState>,
}

// Private Types =======================================================================================================

#[derive(Debug, Default)]
struct CacheState {
    path: Option<PathBuf>,
    slots: HashMap<CacheKey, CacheSlot>,
}

#[derive(Clone, Eq, PartialEq, Hash, Debug)]
struct CacheKey {
    path: PathBuf,
    window: MassWindow,
}

// NOTE: Failed loads leave the cell empty, so they aren't cached and are retried by the next caller
type CacheSlot = Arc<OnceCell<Arc<TheoreticalDatabase>>>;
