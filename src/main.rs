// Standard Library Imports
use std::{
    fs::File,
    io::{BufWriter, Write},
    path::PathBuf,
};

// External Crate Imports
use clap::Parser;
use log::info;
use miette::{IntoDiagnostic, Result};
use sifter::{
    DEFAULT_DATABASE, DEFAULT_TOP_N, DatabaseCache, Multiplicity, Settings, Tolerance,
    identify_species,
    fingerprint::{DEFAULT_MAX_MASS, DEFAULT_MIN_MASS, ExperimentalPeaks, MassWindow},
    parse_tolerance,
};

/// Identifies the species of a bone or skin sample by matching its collagen peptide mass fingerprint against a
/// database of theoretical peptide masses
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// A tab-separated list of (mass, intensity) peaks; a header row is optional
    pmf: PathBuf,
    /// A folder containing one file of theoretical peptide masses per species
    #[arg(short, long, default_value = DEFAULT_DATABASE)]
    database: PathBuf,
    /// The lightest mass (in Daltons) considered by the analysis
    #[arg(long, default_value_t = DEFAULT_MIN_MASS)]
    min_mass: f64,
    /// The heaviest mass (in Daltons) considered by the analysis
    #[arg(long, default_value_t = DEFAULT_MAX_MASS)]
    max_mass: f64,
    /// How far apart two masses can be while still counting as the same peak (e.g. 0.2, 0.2da, or 10ppm)
    #[arg(short, long, default_value = "0.2", value_parser = parse_tolerance)]
    tolerance: Tolerance,
    /// Let each theoretical mass account for at most one experimental peak
    #[arg(long)]
    one_to_one: bool,
    /// The number of best-matching species to print
    #[arg(short = 'n', long, default_value_t = DEFAULT_TOP_N)]
    top: usize,
    /// Write the full table of species matches to this CSV file
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let args = Args::parse();

    let window = MassWindow::new(args.min_mass, args.max_mass)?;
    let multiplicity = if args.one_to_one {
        Multiplicity::OneToOne
    } else {
        Multiplicity::PerPeak
    };
    let settings =
        Settings::new(&args.database, window, args.tolerance)?.with_multiplicity(multiplicity);

    let peaks = ExperimentalPeaks::from_path(&args.pmf, window)?;
    let cache = DatabaseCache::default();
    let identification = identify_species(&cache, &settings, &peaks)?;
    let table = identification.table();

    println!("Detected Peaks in Range: {}", identification.peaks_in_range());
    println!("{}", table.to_data_frame()?.head(Some(args.top)));
    if identification.skipped_files() > 0 {
        println!(
            "Skipped {} unusable reference files in {}",
            identification.skipped_files(),
            settings.database().display()
        );
    }

    if let Some(output) = args.output {
        let mut writer = BufWriter::new(File::create(&output).into_diagnostic()?);
        table.write_csv(&mut writer)?;
        writer.flush().into_diagnostic()?;
        info!("wrote {} species matches to {}", table.len(), output.display());
    }

    Ok(())
}
