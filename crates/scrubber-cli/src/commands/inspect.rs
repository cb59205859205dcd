//! Inspect command - show how a file loads before cleaning it.

use std::fs;
use std::path::PathBuf;

use colored::Colorize;
use scrubber::Scrubber;

pub fn run(file: PathBuf, json_output: bool) -> Result<(), Box<dyn std::error::Error>> {
    if !file.exists() {
        return Err(format!("File not found: {}", file.display()).into());
    }

    let bytes = fs::read(&file)?;
    let preview = Scrubber::new().preview(&bytes)?;

    if json_output {
        println!("{}", serde_json::to_string_pretty(&preview)?);
        return Ok(());
    }

    let source = &preview.source;
    println!(
        "{} {}",
        "Source:".cyan().bold(),
        file.display().to_string().white()
    );
    println!("  Hash:      {}", source.hash.dimmed());
    println!("  Size:      {} bytes", source.size_bytes);
    println!("  Encoding:  {}", source.encoding);
    println!(
        "  Format:    {} (delimiter {:?}{})",
        source.format,
        source.delimiter,
        if source.sniffed { ", sniffed" } else { "" }
    );
    println!("  Rows:      {}", source.row_count);
    println!();

    println!("{}", "Columns:".yellow().bold());
    for (name, ty) in &preview.columns {
        println!("  {:<24} {}", name.white(), ty.blue());
    }

    Ok(())
}
