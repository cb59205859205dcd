//! CLI argument definitions using clap.

use clap::{Parser, Subcommand};
use scrubber::{MissingStrategy, OutlierAction};
use std::path::PathBuf;

/// Scrubber: cleaning pipeline for delimited tabular data
#[derive(Parser)]
#[command(name = "scrubber")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Clean a delimited file and write the result as CSV
    Clean {
        /// Path to the data file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Missing-value handling: impute or drop
        #[arg(long)]
        missing: Option<MissingStrategy>,

        /// Outlier handling: remove, replace, or keep
        #[arg(long)]
        outliers: Option<OutlierAction>,

        /// Column to convert to dates (repeatable, normalized name)
        #[arg(long = "date-column", value_name = "NAME")]
        date_columns: Vec<String>,

        /// JSON file with cleaning parameters; flags override its values
        #[arg(long, value_name = "FILE.json")]
        params: Option<PathBuf>,

        /// Output path (default: <file>_cleaned.csv)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Print the cleaning report as JSON
        #[arg(long)]
        report: bool,
    },

    /// Show how a file loads: encoding, delimiter, columns and types
    Inspect {
        /// Path to the data file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}
