//! Clean command - run the pipeline and write the cleaned CSV.

use std::fs;
use std::path::{Path, PathBuf};

use colored::Colorize;
use scrubber::{CleaningParameters, MissingStrategy, OutlierAction, Scrubber};

pub struct CleanArgs {
    pub file: PathBuf,
    pub missing: Option<MissingStrategy>,
    pub outliers: Option<OutlierAction>,
    pub date_columns: Vec<String>,
    pub params: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub report: bool,
}

pub fn run(args: CleanArgs) -> Result<(), Box<dyn std::error::Error>> {
    if !args.file.exists() {
        return Err(format!("File not found: {}", args.file.display()).into());
    }

    let params = build_params(&args)?;
    tracing::debug!(?params, "cleaning parameters");
    let bytes = fs::read(&args.file)?;

    let scrubber = Scrubber::new();
    let (table, source) = scrubber.load(&bytes)?;

    println!(
        "{} {} ({} rows, {} columns, {}, delimiter {:?})",
        "Loaded".cyan().bold(),
        args.file.display().to_string().white(),
        source.row_count,
        source.column_count,
        source.encoding,
        source.delimiter
    );

    let result = scrubber.clean(table, &params)?;

    for stage in &result.report.stages {
        let removed = stage.rows_removed();
        let mut line = format!("  {:<16}", stage.stage.to_string());
        if removed > 0 {
            line.push_str(&format!(" -{} rows", removed).red().to_string());
        }
        if !stage.columns_removed.is_empty() {
            line.push_str(
                &format!(" -{} columns", stage.columns_removed.len())
                    .red()
                    .to_string(),
            );
        }
        if stage.cells_changed > 0 {
            line.push_str(&format!(" ~{} cells", stage.cells_changed).yellow().to_string());
        }
        println!("{}", line);
    }

    for warning in result.report.warnings() {
        println!("{} {}", "Warning:".yellow().bold(), warning);
    }

    let output_path = args
        .output
        .clone()
        .unwrap_or_else(|| default_output_path(&args.file));
    let output = result.output.unwrap_or_default();
    fs::write(&output_path, &output)?;

    println!(
        "{} {} rows to {}",
        "Wrote".green().bold(),
        result.table.row_count(),
        output_path.display().to_string().cyan()
    );

    if args.report {
        println!("{}", result.report.to_json()?);
    }

    Ok(())
}

/// Parameters from `--params`, overridden by explicit flags.
fn build_params(args: &CleanArgs) -> Result<CleaningParameters, Box<dyn std::error::Error>> {
    let mut params = match &args.params {
        Some(path) => CleaningParameters::from_json(&fs::read_to_string(path)?)?,
        None => CleaningParameters::default(),
    };

    if let Some(missing) = args.missing {
        params.missing_strategy = missing;
    }
    if let Some(outliers) = args.outliers {
        params.outlier_action = outliers;
    }
    if !args.date_columns.is_empty() {
        params.date_columns = Some(args.date_columns.clone());
    }

    Ok(params)
}

fn default_output_path(file: &Path) -> PathBuf {
    let stem = file.file_stem().unwrap_or_default().to_string_lossy();
    file.with_file_name(format!("{}_cleaned.csv", stem))
}
