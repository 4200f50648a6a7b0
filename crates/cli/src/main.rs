//! CLI tool for generating fill-in-the-middle training datasets.
//!
//! This tool walks a source tree, splits each file into line windows,
//! carves randomized (prefix, middle, suffix) examples out of them, and
//! writes a sampled subset to a `|`-delimited output file.

use std::path::PathBuf;

use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;

use fim_dataset_core::{generate, GenerateConfig};

/// Generate a sampled FIM dataset from a directory of source files.
#[derive(Parser, Debug)]
#[command(name = "fim-dataset-gen")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Root directory containing source files
    #[arg(long)]
    directory: PathBuf,

    /// Output path for the generated dataset
    #[arg(long)]
    save_path: PathBuf,

    /// File extension selecting source files
    #[arg(long, default_value = "py")]
    extension: String,

    /// Character budget per line window
    #[arg(long, default_value = "256")]
    max_chars: usize,

    /// Number of examples sampled into the output
    #[arg(long, default_value = "40")]
    num_examples: usize,

    /// Random seed for a reproducible run
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let config = GenerateConfig {
        directory: args.directory.clone(),
        extension: args.extension.clone(),
        max_chars: args.max_chars,
        num_examples: args.num_examples,
    };

    println!("Generating dataset from {:?}...", args.directory);
    let report = generate(&config, &args.save_path, &mut rng)?;

    println!("\n[summary]");
    println!("  Files discovered: {}", report.files_discovered);
    println!("  Files skipped: {}", report.files_skipped);
    println!("  Examples generated: {}", report.examples_generated);
    println!("  Examples written: {}", report.examples_written);
    if report.output_written {
        println!("  Output: {:?}", args.save_path);
    } else {
        println!("  No output file written.");
    }

    Ok(())
}
