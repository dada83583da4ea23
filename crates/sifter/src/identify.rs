// External Crate Imports
use fingerprint::ExperimentalPeaks;
use itertools::Itertools;
use log::info;

// Local Crate Imports
use crate::{DatabaseCache, Error, Identification, Result, ResultTable, Settings};

// Constants ===========================================================================================================

const LOGGED_SPECIES: usize = 3;

// Public API ==========================================================================================================

/// Ranks every species in the database named by `settings` against an experimental peak list. The database is loaded
/// through `cache`, so repeated analyses against the same folder and mass window only read it from disk once.
///
/// `peaks` must have been filtered to the same mass window as `settings`
pub fn identify_species(
    cache: &DatabaseCache,
    settings: &Settings,
    peaks: &ExperimentalPeaks,
) -> Result<Identification> {
    if peaks.window() != settings.window() {
        return Err(Error::MismatchedWindows {
            peaks: peaks.window(),
            settings: settings.window(),
        });
    }

    let database = cache.get_or_load(settings.database(), settings.window())?;
    if database.is_empty() {
        return Err(Error::NoDatabase {
            path: settings.database().to_owned(),
            skipped: database.skipped().len(),
        });
    }

    let peaks_in_range = peaks.len();
    let table = settings
        .matcher()
        .rank_species(database.entries(), peaks.peaks(), peaks_in_range);

    info!(
        "matched {peaks_in_range} peaks against {} species with a tolerance of {:?} ({}); best: {}",
        table.len(),
        settings.tolerance(),
        settings.multiplicity(),
        table
            .iter()
            .take(LOGGED_SPECIES)
            .map(|result| format!("{} ({})", result.species(), result.matches()))
            .join(", ")
    );

    Ok(Identification {
        table,
        peaks_in_range,
        skipped_files: database.skipped().len(),
    })
}

impl Identification {
    #[must_use]
    pub const fn table(&self) -> &ResultTable {
        &self.table
    }

    #[must_use]
    pub fn into_table(self) -> ResultTable {
        self.table
    }

    /// The number of experimental peaks left after filtering to the mass window
    #[must_use]
    pub const fn peaks_in_range(&self) -> usize {
        self.peaks_in_range
    }

    /// The number of reference files that couldn't be loaded as species
    #[must_use]
    pub const fn skipped_files(&self) -> usize {
        self.skipped_files
    }
}

// Module Tests ========================================================================================================
