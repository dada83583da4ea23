// Standard Library Imports
use std::{
    fs,
    path::{Path, PathBuf},
};

// External Crate Imports
use csv::{ReaderBuilder, StringRecord, Trim};
use log::{debug, info, warn};

// Local Crate Imports
use crate::{
    DatabaseLoader, Error, MassWindow, Result, SkipReason, SkippedFile, TheoreticalDatabase,
    TheoreticalEntry,
};

// Constants ===========================================================================================================

const DEFAULT_EXTENSION: &str = "csv";
const DEFAULT_SPECIES_SUFFIX: &str = "_peptides";

// NOTE: Compared case-insensitively against the (trimmed) cells of a reference file's first row
const MASS_COLUMN_NAMES: [&str; 6] = [
    "mass",
    "mass1",
    "m/z",
    "mz",
    "theoretical mass",
    "monoisotopic mass",
];

// Public API ==========================================================================================================

impl TheoreticalEntry {
    pub fn new(species: impl Into<String>, masses: impl IntoIterator<Item = f64>) -> Self {
        let species = species.into();
        let mut masses: Vec<_> = masses.into_iter().collect();
        masses.sort_by(f64::total_cmp);

        Self { species, masses }
    }

    #[must_use]
    pub fn species(&self) -> &str {
        &self.species
    }

    /// Sorted in ascending order
    #[must_use]
    pub fn masses(&self) -> &[f64] {
        &self.masses
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.masses.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.masses.is_empty()
    }
}

impl TheoreticalDatabase {
    #[must_use]
    pub const fn new(window: MassWindow, entries: Vec<TheoreticalEntry>) -> Self {
        let skipped = Vec::new();
        Self {
            window,
            entries,
            skipped,
        }
    }

    #[must_use]
    pub const fn window(&self) -> MassWindow {
        self.window
    }

    #[must_use]
    pub fn entries(&self) -> &[TheoreticalEntry] {
        &self.entries
    }

    #[must_use]
    pub fn skipped(&self) -> &[SkippedFile] {
        &self.skipped
    }

    /// An empty database means that no usable reference files were found, which callers should treat as "no database
    /// available" rather than as a database that matches nothing
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn get(&self, species: &str) -> Option<&TheoreticalEntry> {
        self.entries.iter().find(|entry| entry.species() == species)
    }
}

impl SkippedFile {
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub const fn reason(&self) -> &SkipReason {
        &self.reason
    }
}

impl Default for DatabaseLoader {
    fn default() -> Self {
        Self {
            extension: DEFAULT_EXTENSION.to_owned(),
            species_suffix: DEFAULT_SPECIES_SUFFIX.to_owned(),
            mass_column: None,
        }
    }
}

impl DatabaseLoader {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Only files with this extension (compared case-insensitively, and without the leading `.`) are loaded
    #[must_use]
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    /// Stripped from the end of each file stem to give the species identifier
    #[must_use]
    pub fn with_species_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.species_suffix = suffix.into();
        self
    }

    /// Overrides mass column discovery: every file must then have a header row naming this column
    #[must_use]
    pub fn with_mass_column(mut self, name: impl Into<String>) -> Self {
        self.mass_column = Some(name.into());
        self
    }

    pub fn load(&self, dir: impl AsRef<Path>, window: MassWindow) -> Result<TheoreticalDatabase> {
        let dir = dir.as_ref();
        let files = self.reference_files(dir)?;
        let total_files = files.len();

        let mut entries = Vec::with_capacity(total_files);
        let mut skipped = Vec::new();
        for path in files {
            match self.load_file(&path, window) {
                Ok(entry) => {
                    debug!(
                        "loaded {} theoretical masses for {} from {}",
                        entry.len(),
                        entry.species(),
                        path.display()
                    );
                    entries.push(entry);
                }
                Err(reason) => {
                    debug!("skipping {}: {reason}", path.display());
                    skipped.push(SkippedFile { path, reason });
                }
            }
        }

        if !skipped.is_empty() {
            warn!(
                "skipped {} of {total_files} reference files in {}",
                skipped.len(),
                dir.display()
            );
        }
        info!(
            "loaded {} species from {} within {window}",
            entries.len(),
            dir.display()
        );

        Ok(TheoreticalDatabase {
            window,
            entries,
            skipped,
        })
    }

    #[must_use]
    pub fn species_name(&self, path: &Path) -> String {
        let stem = path
            .file_stem()
            .map(|stem| stem.to_string_lossy())
            .unwrap_or_default();
        if let Some(species) = stem.strip_suffix(self.species_suffix.as_str()) {
            if !species.is_empty() {
                return species.to_owned();
            }
        }
        stem.into_owned()
    }
}

/// Loads every reference file in `dir` using the default [`DatabaseLoader`] settings
pub fn load_theoretical_database(
    dir: impl AsRef<Path>,
    window: MassWindow,
) -> Result<TheoreticalDatabase> {
    DatabaseLoader::default().load(dir, window)
}

// Private Functions ===================================================================================================

impl DatabaseLoader {
    // NOTE: Sorted by path so that species are always loaded (and therefore ranked) in the same order, whatever order
    // the filesystem lists them in
    fn reference_files(&self, dir: &Path) -> Result<Vec<PathBuf>> {
        if !dir.exists() {
            return Err(Error::MissingDirectory {
                path: dir.to_owned(),
            });
        }
        if !dir.is_dir() {
            return Err(Error::NotADirectory {
                path: dir.to_owned(),
            });
        }

        let read_dir_error = |source| Error::ReadDirectory {
            path: dir.to_owned(),
            source,
        };
        let mut files = Vec::new();
        for entry in fs::read_dir(dir).map_err(read_dir_error)? {
            let path = entry.map_err(read_dir_error)?.path();
            // NOTE: Anything with the reference extension that isn't a folder is kept, so files that can't be opened
            // (like broken links) are skipped as unreadable instead of being silently ignored
            if self.has_reference_extension(&path) && !path.is_dir() {
                files.push(path);
            }
        }
        files.sort_unstable();

        Ok(files)
    }

    fn has_reference_extension(&self, path: &Path) -> bool {
        path.extension()
            .is_some_and(|extension| extension.eq_ignore_ascii_case(self.extension.as_str()))
    }

    fn load_file(&self, path: &Path, window: MassWindow) -> Result<TheoreticalEntry, SkipReason> {
        let unreadable = |error: csv::Error| SkipReason::Unreadable(error.to_string());
        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .trim(Trim::All)
            .from_path(path)
            .map_err(unreadable)?;

        let mut mass_column = None;
        let mut first_row = true;
        let mut numeric_masses = 0_usize;
        let mut masses = Vec::new();
        for record in reader.records() {
            let record = match record {
                Ok(record) => record,
                Err(error) if error.is_io_error() => return Err(unreadable(error)),
                // NOTE: Rows that aren't valid UTF-8 are just malformed rows, and are dropped like any other
                Err(_) => continue,
            };
            if is_blank(&record) {
                continue;
            }

            let column = if let Some(column) = mass_column {
                column
            } else {
                let is_header = first_row;
                first_row = false;
                match self.find_mass_column(&record, is_header)? {
                    MassColumn::Header(column) => {
                        mass_column = Some(column);
                        continue;
                    }
                    MassColumn::Data(column) => {
                        mass_column = Some(column);
                        column
                    }
                    MassColumn::Undetermined => continue,
                }
            };

            if let Some(mass) = record.get(column).and_then(parse_finite) {
                numeric_masses += 1;
                if window.contains(mass) {
                    masses.push(mass);
                }
            }
        }

        if numeric_masses == 0 {
            return Err(SkipReason::NoMasses);
        }

        Ok(TheoreticalEntry::new(self.species_name(path), masses))
    }

    fn find_mass_column(
        &self,
        record: &StringRecord,
        is_header: bool,
    ) -> Result<MassColumn, SkipReason> {
        if let Some(ref name) = self.mass_column {
            let column = record
                .iter()
                .position(|cell| cell.eq_ignore_ascii_case(name))
                .filter(|_| is_header)
                .ok_or_else(|| SkipReason::MissingColumn(name.clone()))?;
            return Ok(MassColumn::Header(column));
        }

        if is_header {
            let named_column = record.iter().position(|cell| {
                MASS_COLUMN_NAMES
                    .iter()
                    .any(|name| cell.eq_ignore_ascii_case(name))
            });
            if let Some(column) = named_column {
                return Ok(MassColumn::Header(column));
            }
        }

        Ok(record
            .iter()
            .position(|cell| parse_finite(cell).is_some())
            .map_or(MassColumn::Undetermined, MassColumn::Data))
    }
}

enum MassColumn {
    Header(usize),
    Data(usize),
    Undetermined,
}

pub(crate) fn parse_finite(cell: &str) -> Option<f64> {
    cell.parse().ok().filter(|value: &f64| value.is_finite())
}

pub(crate) fn is_blank(record: &StringRecord) -> bool {
    record.iter().all(str::is_empty)
}

// Module Tests ========================================================================================================
