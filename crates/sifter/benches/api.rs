use divan::{AllocProfiler, Bencher, black_box};
use once_cell::sync::Lazy;
use sifter::{
    Matcher, Multiplicity, Tolerance,
    fingerprint::{ExperimentalPeak, TheoreticalEntry},
};

#[global_allocator]
static ALLOC: AllocProfiler = AllocProfiler::system();

const SPECIES: usize = 200;
const MASSES_PER_SPECIES: usize = 400;
const PEAKS: usize = 150;

// NOTE: A cheap, deterministic spread of masses across the default 800-3500 Da window
fn synthetic_mass(seed: usize) -> f64 {
    800.0 + (seed.wrapping_mul(7_919) % 2_700_000) as f64 / 1_000.0
}

static ENTRIES: Lazy<Vec<TheoreticalEntry>> = Lazy::new(|| {
    (0..SPECIES)
        .map(|species| {
            let masses = (0..MASSES_PER_SPECIES)
                .map(|i| synthetic_mass(species * MASSES_PER_SPECIES + i));
            TheoreticalEntry::new(format!("Species {species}"), masses)
        })
        .collect()
});

static PEAK_LIST: Lazy<Vec<ExperimentalPeak>> = Lazy::new(|| {
    (0..PEAKS)
        .map(|i| ExperimentalPeak::new(synthetic_mass(i * 31 + 17), 100.0))
        .collect()
});

fn main() {
    Lazy::force(&ENTRIES);
    Lazy::force(&PEAK_LIST);
    divan::main();
}

mod matcher {
    use super::*;

    #[divan::bench(args = [Multiplicity::PerPeak, Multiplicity::OneToOne])]
    fn count_matches(bencher: Bencher, multiplicity: Multiplicity) {
        let matcher = Matcher::new(Tolerance::Da(0.2)).with_multiplicity(multiplicity);
        bencher.bench_local(|| {
            for entry in ENTRIES.iter() {
                black_box(matcher.count_matches(entry, &PEAK_LIST));
            }
        });
    }

    #[divan::bench]
    fn rank_species_da(bencher: Bencher) {
        let matcher = Matcher::new(Tolerance::Da(0.2));
        bencher.bench_local(|| {
            black_box(matcher.rank_species(&ENTRIES, &PEAK_LIST, PEAK_LIST.len()))
        });
    }

    #[divan::bench]
    fn rank_species_ppm(bencher: Bencher) {
        let matcher = Matcher::new(Tolerance::PPM(10.0));
        bencher.bench_local(|| {
            black_box(matcher.rank_species(&ENTRIES, &PEAK_LIST, PEAK_LIST.len()))
        });
    }
}
