// Standard Library Imports
use std::{cmp::Reverse, io::Write, slice};

// External Crate Imports
use polars::prelude::*;

// Local Crate Imports
use crate::{MatchResult, Result, ResultTable};

// Constants ===========================================================================================================

struct OutputColumns;
impl OutputColumns {
    const SPECIES: &str = "Species";
    const MATCH: &str = "Match";
    const PEAKS: &str = "Peaks";
    const SCORE: &str = "Score";
}

// Public API ==========================================================================================================

impl MatchResult {
    pub fn new(species: impl Into<String>, matches: usize, total_peaks: usize) -> Self {
        let species = species.into();
        Self {
            species,
            matches,
            total_peaks,
        }
    }

    #[must_use]
    pub fn species(&self) -> &str {
        &self.species
    }

    #[must_use]
    pub fn matches(&self) -> usize {
        self.matches
    }

    #[must_use]
    pub fn total_peaks(&self) -> usize {
        self.total_peaks
    }

    /// The fraction of experimental peaks matched by this species, or zero when there were no peaks at all
    #[must_use]
    pub fn score(&self) -> f64 {
        if self.total_peaks == 0 {
            0.0
        } else {
            self.matches as f64 / self.total_peaks as f64
        }
    }
}

impl ResultTable {
    /// Ranks `results` by descending match count. The sort is stable, so tied species keep their relative order
    #[must_use]
    pub fn new(mut results: Vec<MatchResult>) -> Self {
        results.sort_by_key(|result| Reverse(result.matches));
        Self(results)
    }

    #[must_use]
    pub fn results(&self) -> &[MatchResult] {
        &self.0
    }

    pub fn iter(&self) -> slice::Iter<'_, MatchResult> {
        self.0.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn best(&self) -> Option<&MatchResult> {
        self.0.first()
    }

    /// The `n` best-ranked species (or every species, if there are fewer than `n`)
    #[must_use]
    pub fn top(&self, n: usize) -> &[MatchResult] {
        &self.0[..n.min(self.len())]
    }

    pub fn to_data_frame(&self) -> Result<DataFrame> {
        let species: Vec<_> = self.iter().map(MatchResult::species).collect();
        let matches: Vec<_> = self.iter().map(|r| r.matches() as u64).collect();
        let peaks: Vec<_> = self.iter().map(|r| r.total_peaks() as u64).collect();
        let scores: Vec<_> = self.iter().map(MatchResult::score).collect();

        Ok(df!(
            OutputColumns::SPECIES => species,
            OutputColumns::MATCH => matches,
            OutputColumns::PEAKS => peaks,
            OutputColumns::SCORE => scores
        )?)
    }

    pub fn write_csv(&self, mut writer: impl Write) -> Result<()> {
        CsvWriter::new(&mut writer).finish(&mut self.to_data_frame()?)?;
        Ok(())
    }

    pub fn to_csv(&self) -> Result<String> {
        let mut result = Vec::new();
        self.write_csv(&mut result)?;
        // NOTE: The `CsvWriter` only ever writes valid UTF-8, so nothing is lost here
        Ok(String::from_utf8_lossy(&result).into_owned())
    }
}

impl<'t> IntoIterator for &'t ResultTable {
    type Item = &'t MatchResult;
    type IntoIter = slice::Iter<'t, MatchResult>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

// Module Tests ========================================================================================================
