// External Crate Imports
use fingerprint::{ExperimentalPeak, TheoreticalEntry};
use rayon::prelude::*;

// Local Crate Imports
use crate::{MassTolerance, MatchResult, Matcher, Multiplicity, ResultTable, Tolerance};

// Public API ==========================================================================================================

impl Matcher {
    #[must_use]
    pub fn new(tolerance: Tolerance) -> Self {
        let multiplicity = Multiplicity::default();
        Self {
            tolerance,
            multiplicity,
        }
    }

    #[must_use]
    pub const fn with_multiplicity(mut self, multiplicity: Multiplicity) -> Self {
        self.multiplicity = multiplicity;
        self
    }

    #[must_use]
    pub const fn tolerance(&self) -> Tolerance {
        self.tolerance
    }

    #[must_use]
    pub const fn multiplicity(&self) -> Multiplicity {
        self.multiplicity
    }

    /// Counts the experimental peaks attributable to a single species. The count doesn't depend on the order of
    /// `peaks`, or on the order the species' masses were loaded in
    #[must_use]
    pub fn count_matches(&self, entry: &TheoreticalEntry, peaks: &[ExperimentalPeak]) -> usize {
        self.count_sorted(entry.masses(), &sorted_masses(peaks))
    }

    /// Scores every species against the same experimental peaks, returning a [`ResultTable`] with one row per species
    /// (even those with no matches), ranked by descending match count. `total_peaks` is carried into each
    /// [`MatchResult`] as the denominator of its [`score`](MatchResult::score)
    #[must_use]
    pub fn rank_species(
        &self,
        entries: &[TheoreticalEntry],
        peaks: &[ExperimentalPeak],
        total_peaks: usize,
    ) -> ResultTable {
        let observed = sorted_masses(peaks);
        // NOTE: `.collect()` on an indexed parallel iterator keeps the input order, so the stable ranking below still
        // breaks ties by load order
        let results: Vec<_> = entries
            .par_iter()
            .map(|entry| {
                let matches = self.count_sorted(entry.masses(), &observed);
                MatchResult::new(entry.species(), matches, total_peaks)
            })
            .collect();

        ResultTable::new(results)
    }
}

// Private Functions ===================================================================================================

impl Matcher {
    // NOTE: Both `theoretical` and `observed` must be sorted in ascending order
    fn count_sorted(&self, theoretical: &[f64], observed: &[f64]) -> usize {
        match self.multiplicity {
            Multiplicity::PerPeak => observed
                .iter()
                .filter(|&&mass| {
                    let candidate = self.first_candidate(theoretical, mass);
                    self.matches(theoretical.get(candidate), mass)
                })
                .count(),
            Multiplicity::OneToOne => {
                // NOTE: Every theoretical mass before `next` has either been claimed already, or is too light to
                // match this (or any heavier) peak. Taking the lightest unclaimed candidate for each peak, in order
                // of increasing mass, gives the largest possible number of one-to-one pairings
                let mut next = 0;
                let mut matches = 0;
                for &mass in observed {
                    next += self.first_candidate(&theoretical[next..], mass);
                    if self.matches(theoretical.get(next), mass) {
                        matches += 1;
                        next += 1;
                    }
                }
                matches
            }
        }
    }

    // NOTE: Binary searches for the lightest theoretical mass that isn't too light to match `mass`. If any theoretical
    // mass matches, this one does
    fn first_candidate(&self, theoretical: &[f64], mass: f64) -> usize {
        theoretical.partition_point(|&t| t < mass && !self.tolerance.within(mass, t))
    }

    fn matches(&self, candidate: Option<&f64>, mass: f64) -> bool {
        candidate.is_some_and(|&t| self.tolerance.within(mass, t))
    }
}

fn sorted_masses(peaks: &[ExperimentalPeak]) -> Vec<f64> {
    let mut masses: Vec<_> = peaks.iter().map(ExperimentalPeak::mass).collect();
    masses.sort_by(f64::total_cmp);
    masses
}

// Module Tests ========================================================================================================
