// src/main.rs
mod utils;
mod bibliography;
mod extractors;
mod storage;

use std::io::BufRead;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use bibliography::Bibliography;
use extractors::address::extract_address_from_booktitle;
use storage::StorageManager;
use utils::AppError;

/// Infer venue addresses for inproceedings entries from their booktitle
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Print per-segment classification decisions
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Extract the address from booktitles given as arguments (or one per stdin line)
    Extract {
        booktitles: Vec<String>,
    },

    /// Add addresses to a JSON bibliography
    Enrich {
        /// Input bibliography (JSON)
        infile: PathBuf,

        /// Output file. If no output file is given, the input file will be overwritten.
        #[arg(short, long)]
        out: Option<PathBuf>,

        /// Also save a JSON report with the counts next to the output
        #[arg(long)]
        report: bool,
    },
}

fn main() -> Result<(), AppError> {
    // 1. Parse CLI Arguments
    let args = Args::parse();

    // 2. Setup Logging (reads RUST_LOG env var)
    utils::logging::setup_logging(args.verbose);
    tracing::debug!("Starting processing for args: {:?}", args);

    match args.command {
        Command::Extract { booktitles } => run_extract(booktitles),
        Command::Enrich { infile, out, report } => run_enrich(infile, out, report),
    }
}

fn run_extract(booktitles: Vec<String>) -> Result<(), AppError> {
    let booktitles = if booktitles.is_empty() {
        tracing::debug!("No booktitles given, reading stdin");
        let mut lines = Vec::new();
        for line in std::io::stdin().lock().lines() {
            let line = line?;
            if !line.trim().is_empty() {
                lines.push(line);
            }
        }
        lines
    } else {
        booktitles
    };

    if booktitles.is_empty() {
        return Err(AppError::Config("No booktitles to process".to_string()));
    }

    for booktitle in &booktitles {
        let line = match extract_address_from_booktitle(booktitle) {
            Ok(found) => serde_json::json!({
                "booktitle": booktitle,
                "address": found.address,
                "cleaned_booktitle": found.booktitle,
                "path": found.path,
            }),
            Err(e) => serde_json::json!({
                "booktitle": booktitle,
                "address": null,
                "cleaned_booktitle": null,
                "unresolved": e.kind(),
            }),
        };
        println!("{}", line);
    }

    Ok(())
}

fn run_enrich(infile: PathBuf, out: Option<PathBuf>, save_report: bool) -> Result<(), AppError> {
    let outfile = out.unwrap_or_else(|| infile.clone());

    // 3. Load the bibliography
    let content = std::fs::read_to_string(&infile)?;
    let mut bib = Bibliography::from_json(&content)?;
    tracing::info!("Loaded {} entries from {}", bib.len(), infile.display());

    // 4. Enrich entries
    let report = bibliography::add_address(&mut bib);
    report.log_summary();

    // 5. Save results
    let storage = StorageManager::new(&outfile)?;
    storage.save_bibliography(&bib)?;

    if save_report {
        storage.save_report(&report, &infile)?;
    }

    Ok(())
}
