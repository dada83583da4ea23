// Standard Library Imports
use std::{fs::File, io::Read, path::Path};

// External Crate Imports
use csv::{ReaderBuilder, Trim};
use log::debug;

// Local Crate Imports
use crate::{
    Error, ExperimentalPeak, ExperimentalPeaks, MassWindow, Result,
    theoretical::{is_blank, parse_finite},
};

// Public API ==========================================================================================================

impl ExperimentalPeak {
    #[must_use]
    pub const fn new(mass: f64, intensity: f64) -> Self {
        Self { mass, intensity }
    }

    #[must_use]
    pub const fn mass(&self) -> f64 {
        self.mass
    }

    #[must_use]
    pub const fn intensity(&self) -> f64 {
        self.intensity
    }
}

impl ExperimentalPeaks {
    /// Builds a peak table from peaks that have already been parsed, keeping only those inside `window`
    pub fn new(window: MassWindow, peaks: impl IntoIterator<Item = ExperimentalPeak>) -> Self {
        let mut parsed_rows = 0;
        let peaks = peaks
            .into_iter()
            .inspect(|_| parsed_rows += 1)
            .filter(|peak| window.contains(peak.mass))
            .collect();

        Self {
            window,
            peaks,
            parsed_rows,
            dropped_rows: 0,
        }
    }

    /// Parses a tab-separated list of (mass, intensity) peaks. A header row, surrounding whitespace, and any columns
    /// after the second are all tolerated; rows without a numeric mass and intensity are dropped. A stream without a
    /// single parseable row is an error, so that it can't be mistaken for a spectrum with no peaks in `window`
    pub fn from_reader(reader: impl Read, window: MassWindow) -> Result<Self> {
        let mut reader = ReaderBuilder::new()
            .delimiter(b'\t')
            .has_headers(false)
            .flexible(true)
            .trim(Trim::All)
            .comment(Some(b'#'))
            .from_reader(reader);

        let mut rows = 0;
        let mut first_rejected_line = None;
        let mut parsed = Vec::new();
        for record in reader.records() {
            let record = match record {
                Ok(record) if is_blank(&record) => continue,
                Ok(record) => record,
                Err(error) if error.is_io_error() => return Err(Error::ReadPeakList(error)),
                Err(error) => {
                    rows += 1;
                    first_rejected_line =
                        first_rejected_line.or_else(|| error.position().map(csv::Position::line));
                    continue;
                }
            };
            rows += 1;

            let field = |i| record.get(i).and_then(parse_finite);
            if let (Some(mass), Some(intensity)) = (field(0), field(1)) {
                parsed.push(ExperimentalPeak::new(mass, intensity));
            } else {
                first_rejected_line =
                    first_rejected_line.or_else(|| record.position().map(csv::Position::line));
            }
        }

        if parsed.is_empty() {
            return Err(Error::no_parseable_rows(rows, first_rejected_line));
        }

        let mut peaks = Self::new(window, parsed);
        peaks.dropped_rows = rows - peaks.parsed_rows;
        debug!(
            "read {} experimental peaks within {window} ({} rows parsed, {} dropped)",
            peaks.len(),
            peaks.parsed_rows,
            peaks.dropped_rows
        );

        Ok(peaks)
    }

    pub fn from_path(path: impl AsRef<Path>, window: MassWindow) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| Error::OpenPeakList {
            path: path.to_owned(),
            source,
        })?;

        Self::from_reader(file, window)
    }

    #[must_use]
    pub const fn window(&self) -> MassWindow {
        self.window
    }

    #[must_use]
    pub fn peaks(&self) -> &[ExperimentalPeak] {
        &self.peaks
    }

    pub fn masses(&self) -> impl Iterator<Item = f64> + '_ {
        self.peaks.iter().map(ExperimentalPeak::mass)
    }

    /// The number of peaks inside the mass window
    #[must_use]
    pub fn len(&self) -> usize {
        self.peaks.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.peaks.is_empty()
    }

    /// The number of rows that held a valid peak, whether or not that peak was inside the mass window
    #[must_use]
    pub const fn parsed_rows(&self) -> usize {
        self.parsed_rows
    }

    /// The number of rows that couldn't be parsed as a peak (including any header row)
    #[must_use]
    pub const fn dropped_rows(&self) -> usize {
        self.dropped_rows
    }
}

// Module Tests ========================================================================================================

#[cfg(test)]
mod tests {
    use assert_float_eq::assert_float_absolute_eq;
    use indoc::indoc;

    use super::*;

    const PMF: &str = indoc! {"
        m/z\tintensity
        750.3\t1200
        836.44\t5400.5
        1105.58\t12000
        1427.69\t\t
        not a peak\t10
        1550.81\t830.25\textra
         2883.39 \t 410
        3600.1\t90
    "};

    fn window() -> MassWindow {
        MassWindow::new(800.0, 3_500.0).unwrap()
    }

    #[test]
    fn experimental_peak_getters() {
        let peak = ExperimentalPeak::new(1_105.58, 12_000.0);
        assert_float_absolute_eq!(peak.mass(), 1_105.58);
        assert_float_absolute_eq!(peak.intensity(), 12_000.0);
    }

    #[test]
    fn from_reader() {
        let peaks = ExperimentalPeaks::from_reader(PMF.as_bytes(), window()).unwrap();
        let masses: Vec<_> = peaks.masses().collect();
        assert_eq!(masses, [836.44, 1_105.58, 1_550.81, 2_883.39]);
        assert_eq!(peaks.len(), 4);
        assert_eq!(peaks.parsed_rows(), 6);
        assert_eq!(peaks.dropped_rows(), 3);
        assert_eq!(peaks.window(), window());

        let intensities: Vec<_> = peaks.peaks().iter().map(ExperimentalPeak::intensity).collect();
        assert_eq!(intensities, [5_400.5, 12_000.0, 830.25, 410.0]);
    }

    #[test]
    fn from_reader_without_header() {
        let pmf = "1000.0\t1\n1500.05\t2\n2000.0\t3\n";
        let peaks = ExperimentalPeaks::from_reader(pmf.as_bytes(), window()).unwrap();
        assert_eq!(peaks.len(), 3);
        assert_eq!(peaks.parsed_rows(), 3);
        assert_eq!(peaks.dropped_rows(), 0);
    }

    #[test]
    fn from_reader_masses_within_window() {
        let window = MassWindow::new(1_000.0, 1_600.0).unwrap();
        let peaks = ExperimentalPeaks::from_reader(PMF.as_bytes(), window).unwrap();
        assert!(peaks.masses().all(|mass| window.contains(mass)));
        assert_eq!(peaks.masses().collect::<Vec<_>>(), [1_105.58, 1_550.81]);
    }

    #[test]
    fn from_reader_header_only() {
        let error =
            ExperimentalPeaks::from_reader("m/z\tintensity\n".as_bytes(), window()).unwrap_err();
        assert!(matches!(
            error,
            Error::NoParseableRows {
                rows: 1,
                first_rejected_line: Some(1),
                ..
            }
        ));
    }

    #[test]
    fn from_reader_empty() {
        let error = ExperimentalPeaks::from_reader("".as_bytes(), window()).unwrap_err();
        assert!(matches!(
            error,
            Error::NoParseableRows {
                rows: 0,
                first_rejected_line: None,
                ..
            }
        ));
    }

    #[test]
    fn from_reader_nothing_in_window() {
        // Parseable, but entirely outside of the mass window, so this is an empty spectrum rather than an error
        let pmf = "m/z\tintensity\n500.0\t1\n4000.0\t2\n";
        let peaks = ExperimentalPeaks::from_reader(pmf.as_bytes(), window()).unwrap();
        assert!(peaks.is_empty());
        assert_eq!(peaks.parsed_rows(), 2);
        assert_eq!(peaks.dropped_rows(), 1);
    }

    #[test]
    fn from_reader_non_finite() {
        let pmf = "NaN\t1\n1000.0\tinf\n1200.0\t-4\n";
        let peaks = ExperimentalPeaks::from_reader(pmf.as_bytes(), window()).unwrap();
        assert_eq!(peaks.peaks(), [ExperimentalPeak::new(1_200.0, -4.0)]);
        assert_eq!(peaks.dropped_rows(), 2);
    }

    #[test]
    fn from_path() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/data/bone_sample.txt");
        let peaks = ExperimentalPeaks::from_path(path, window()).unwrap();
        assert_eq!(peaks.len(), 5);
        assert_eq!(peaks.dropped_rows(), 1);

        let missing = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/data/missing.txt");
        assert!(matches!(
            ExperimentalPeaks::from_path(missing, window()),
            Err(Error::OpenPeakList { .. })
        ));
    }

    #[test]
    fn new_filters_to_window() {
        let peaks = ExperimentalPeaks::new(
            window(),
            [
                ExperimentalPeak::new(799.9, 1.0),
                ExperimentalPeak::new(800.0, 1.0),
                ExperimentalPeak::new(3_500.0, 1.0),
                ExperimentalPeak::new(3_500.1, 1.0),
            ],
        );
        assert_eq!(peaks.len(), 2);
        assert_eq!(peaks.parsed_rows(), 4);
    }
}
