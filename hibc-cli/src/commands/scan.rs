use anyhow::{Context, Result};
use colored::*;
use hibc_core::{
    constants::DecodeOptions,
    linker::{link_labels, LinkReport, LinkStats},
    scanner::{decoded_records, scan_lines_with_stats, ScanStats},
    DecodeError,
};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{self, Read};
use tracing::{info, warn};

#[derive(Debug, Serialize, Deserialize)]
pub struct FailedLine {
    pub line: usize,
    pub raw: String,
    pub code: u8,
    pub error: DecodeError,
}

/// Everything written to the `--output` file
#[derive(Debug, Serialize, Deserialize)]
pub struct ScanReport {
    pub scan: ScanStats,
    pub link: LinkStats,
    pub failures: Vec<FailedLine>,
    pub labels: LinkReport,
}

fn read_input(input: &str) -> Result<String> {
    if input == "-" {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .with_context(|| "Failed to read payloads from stdin")?;
        Ok(buf)
    } else {
        fs::read_to_string(input).with_context(|| format!("Failed to read input file: {}", input))
    }
}

/// Decode and link every payload in `text`
pub fn scan_text(text: &str, options: &DecodeOptions) -> ScanReport {
    let (lines, stats) = scan_lines_with_stats(text, options);

    let failures = lines
        .iter()
        .filter_map(|l| {
            l.result.as_ref().err().map(|failure| FailedLine {
                line: l.line,
                raw: failure.raw.clone(),
                code: failure.error.code(),
                error: failure.error,
            })
        })
        .collect();

    let labels = link_labels(decoded_records(lines));

    ScanReport {
        scan: stats,
        link: labels.stats(),
        failures,
        labels,
    }
}

pub fn execute(
    input: &str,
    output: Option<&str>,
    stats_only: bool,
    options: &DecodeOptions,
) -> Result<()> {
    info!("Scanning payloads from: {}", input);

    let text = read_input(input)?;
    let report = scan_text(&text, options);
    let stats = &report.scan;

    // Print statistics
    println!("\n=== Scan Results ===");
    println!("Lines scanned:     {}", stats.lines_scanned);
    println!("Decoded:           {}", stats.decoded);
    println!("  Primary:         {}", stats.primary);
    println!("  Secondary:       {}", stats.secondary);
    println!("  Concatenated:    {}", stats.concatenated);
    println!("Failures:          {}", stats.failures);
    println!("Success rate:      {:.2}%", stats.success_rate());

    let link = &report.link;
    println!("\n=== Link Results ===");
    println!("Merged labels:     {}", link.merged);
    println!("Concatenated:      {}", link.concatenated);
    println!("Unpaired segments: {}", link.unpaired);
    if link.ignored > 0 {
        println!("Ignored (merged):  {}", link.ignored.to_string().yellow());
    }
    println!("Pairing rate:      {:.2}%", link.pairing_rate);
    println!();

    if stats_only {
        return Ok(());
    }

    if let Some(output_path) = output {
        let json = serde_json::to_string_pretty(&report)
            .with_context(|| "Failed to serialize scan report")?;

        fs::write(output_path, json)
            .with_context(|| format!("Failed to write output file: {}", output_path))?;

        info!("Scan report written to: {}", output_path);
    } else {
        println!("=== Labels ===");
        for merged in &report.labels.merged {
            println!(
                "{} {} {} (linked by {:?})",
                "✓".green(),
                merged.labeler_id(),
                merged.product_number(),
                merged.link_character
            );
        }
        for record in &report.labels.concatenated {
            println!(
                "{} {} {}",
                "✓".green(),
                record.labeler_id().unwrap_or_default(),
                record.product_number().unwrap_or_default()
            );
        }
        for record in report
            .labels
            .unpaired_primaries
            .iter()
            .chain(&report.labels.unpaired_secondaries)
        {
            warn!("Unpaired {} segment: {:?}", record.kind, record.raw);
        }
        for failure in &report.failures {
            println!(
                "{} line {}: {:?} ({}, code {})",
                "✗".red(),
                failure.line,
                failure.raw,
                failure.error,
                failure.code
            );
        }
    }

    Ok(())
}
