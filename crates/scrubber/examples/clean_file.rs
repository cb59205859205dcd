//! Example: Clean a delimited file with Scrubber.
//!
//! Usage:
//!   cargo run --example clean_file -- <file_path> [date_column ...]

use std::env;
use std::fs;

use scrubber::{CleaningParameters, MissingStrategy, OutlierAction, Scrubber};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: cargo run --example clean_file -- <file_path> [date_column ...]");
        std::process::exit(1);
    }

    let bytes = fs::read(&args[1])?;
    let scrubber = Scrubber::new();

    let preview = scrubber.preview(&bytes)?;
    println!(
        "Loaded {} rows as {} ({})",
        preview.source.row_count, preview.source.format, preview.source.encoding
    );
    for (name, ty) in &preview.columns {
        println!("  {:<24} {}", name, ty);
    }

    let params = CleaningParameters::new()
        .with_missing_strategy(MissingStrategy::Impute)
        .with_outlier_action(OutlierAction::Replace)
        .with_date_columns(args[2..].iter().cloned());

    let result = scrubber.clean_bytes(&bytes, &params)?;

    println!("\nStages:");
    for stage in &result.report.stages {
        println!(
            "  {:<16} rows {} -> {}, {} cell(s) changed",
            stage.stage.to_string(),
            stage.rows_before,
            stage.rows_after,
            stage.cells_changed
        );
        for note in &stage.notes {
            println!("      {}", note);
        }
    }
    for warning in result.report.warnings() {
        println!("Warning: {}", warning);
    }

    if let Some(output) = result.output {
        println!("\n{}", String::from_utf8_lossy(&output));
    }

    Ok(())
}
