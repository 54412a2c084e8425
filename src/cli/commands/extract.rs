//! Extract command implementation for the OMR extractor CLI
//!
//! This module contains the complete extraction workflow: argument
//! validation, recovery-table loading, batch decoding, output writing and
//! report generation.

use super::shared::{ProcessingStats, create_spinner, load_registry, setup_logging};
use crate::app::services::report_writer;
use crate::app::services::sheet_decoder::SheetParser;
use crate::cli::args::{ExtractArgs, OutputFormat};
use crate::{Error, Result};
use colored::*;
use indicatif::HumanDuration;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Extract command runner
///
/// This function orchestrates the extraction workflow:
/// 1. Set up logging and validate arguments
/// 2. Load the questionnaire-id recovery table
/// 3. Decode the scan export with per-row error isolation
/// 4. Write decoded records to the output CSV
/// 5. Generate a summary report
pub fn run_extract(args: ExtractArgs) -> Result<ProcessingStats> {
    let start_time = Instant::now();

    // Set up logging
    setup_logging(args.get_log_level(), args.quiet)?;

    info!("Starting OMR extraction");
    debug!("Command line arguments: {:?}", args);

    // Validate arguments
    args.validate()?;

    let schema = args.schema.to_schema();
    schema.validate()?;

    if args.output_path.exists() && !args.force_overwrite {
        return Err(Error::configuration(format!(
            "Output file already exists: {} (pass --force to overwrite)",
            args.output_path.display()
        )));
    }

    // Load the recovery table for this batch
    let registry = load_registry(&args.qids_path)?;
    let qids_loaded = registry.len();

    // Decode the export
    let spinner = if args.show_progress() {
        Some(create_spinner(&format!(
            "Decoding {}...",
            args.input_path.display()
        )))
    } else {
        None
    };

    let parser = SheetParser::new(registry, schema.clone());
    let parse_result = parser.parse_file(&args.input_path);

    if let Some(pb) = &spinner {
        pb.finish_and_clear();
    }

    let result = parse_result?;

    if result.records.is_empty() {
        warn!("No sheets decoded from input: {}", args.input_path.display());
    }

    // Write the decoded records
    let write_stats = report_writer::write_records(&args.output_path, &result.records, &schema)?;
    debug!(
        "Output holds {} columns per record",
        write_stats.columns
    );

    let mut output_size = 0;
    if let Ok(metadata) = std::fs::metadata(&args.output_path) {
        output_size = metadata.len();
    }

    let output_name = args
        .output_path
        .file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| args.output_path.display().to_string());

    let stats = ProcessingStats {
        rows_read: result.stats.total_rows,
        rows_decoded: result.stats.rows_decoded,
        rows_skipped: result.stats.rows_skipped,
        qids_loaded,
        errors: result.stats.errors,
        processing_time: start_time.elapsed(),
        output_size: Some((output_name, output_size)),
    };

    // Generate final report
    generate_final_report(&args.output_format, &stats)?;

    Ok(stats)
}

/// Generate the final extraction report
fn generate_final_report(format: &OutputFormat, stats: &ProcessingStats) -> Result<()> {
    info!("Generating final report");

    match format {
        OutputFormat::Human => generate_human_report(stats),
        OutputFormat::Json => generate_json_report(stats),
        OutputFormat::Csv => generate_csv_report(stats),
    }
}

/// Generate human-readable report
fn generate_human_report(stats: &ProcessingStats) -> Result<()> {
    let duration = HumanDuration(stats.processing_time);

    println!("\n{}", "Extraction complete".bright_green().bold());
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("  {} {}", "Rows read:".bright_cyan(), stats.rows_read);
    println!("  {} {}", "Sheets decoded:".bright_cyan(), stats.rows_decoded);
    println!("  {} {}", "Rows skipped:".bright_cyan(), stats.rows_skipped);
    println!("  {} {}", "Recovery entries:".bright_cyan(), stats.qids_loaded);
    println!(
        "  {} {:.1}%",
        "Success rate:".bright_cyan(),
        stats.success_rate()
    );
    println!("  {} {}", "Elapsed:".bright_cyan(), duration);

    if let Some((name, size)) = &stats.output_size {
        println!(
            "  {} {} ({})",
            "Output:".bright_cyan(),
            name,
            ProcessingStats::format_size(*size)
        );
    }

    if !stats.errors.is_empty() {
        println!(
            "\n{} {} row(s) failed validation:",
            "Warning:".bright_yellow().bold(),
            stats.errors.len()
        );
        for error in stats.errors.iter().take(5) {
            println!("  - {}", error);
        }
        if stats.errors.len() > 5 {
            println!("  ... and {} more (rerun with -v for details)", stats.errors.len() - 5);
        }
    }

    println!();
    Ok(())
}

/// Generate JSON report for machine consumption
fn generate_json_report(stats: &ProcessingStats) -> Result<()> {
    let json_stats = serde_json::json!({
        "rows_read": stats.rows_read,
        "rows_decoded": stats.rows_decoded,
        "rows_skipped": stats.rows_skipped,
        "qids_loaded": stats.qids_loaded,
        "success_rate": stats.success_rate(),
        "processing_time_seconds": stats.processing_time.as_secs_f64(),
        "output_file": stats.output_size.as_ref().map(|(name, size)| {
            serde_json::json!({
                "filename": name,
                "size_bytes": size
            })
        }),
        "errors": stats.errors,
    });

    println!(
        "{}",
        serde_json::to_string_pretty(&json_stats)
            .map_err(|e| Error::configuration(format!("Failed to render JSON report: {}", e)))?
    );
    Ok(())
}

/// Generate CSV report for data analysis
fn generate_csv_report(stats: &ProcessingStats) -> Result<()> {
    println!("metric,value");
    println!("rows_read,{}", stats.rows_read);
    println!("rows_decoded,{}", stats.rows_decoded);
    println!("rows_skipped,{}", stats.rows_skipped);
    println!("qids_loaded,{}", stats.qids_loaded);
    println!("success_rate,{:.1}", stats.success_rate());
    println!(
        "processing_time_seconds,{}",
        stats.processing_time.as_secs_f64()
    );
    if let Some((_, size)) = &stats.output_size {
        println!("output_size_bytes,{}", size);
    }

    Ok(())
}
