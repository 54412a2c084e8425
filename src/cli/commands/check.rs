//! Check command implementation for the OMR extractor CLI
//!
//! Runs the same decode pass as `extract` without writing any output, so a
//! batch can be validated before the extracted responses are committed to a
//! file. Exits with an error when any row failed validation.

use super::shared::{ProcessingStats, load_registry, setup_logging};
use crate::app::services::sheet_decoder::SheetParser;
use crate::cli::args::{CheckArgs, OutputFormat};
use crate::{Error, Result};
use colored::*;
use std::time::Instant;
use tracing::{debug, info};

/// Check command runner: decode-only validation of a scan export
pub fn run_check(args: CheckArgs) -> Result<ProcessingStats> {
    let start_time = Instant::now();

    setup_logging(args.get_log_level(), false)?;

    info!("Validating scan export: {}", args.input_path.display());
    debug!("Command line arguments: {:?}", args);

    args.validate()?;

    let schema = args.schema.to_schema();
    schema.validate()?;

    let registry = load_registry(&args.qids_path)?;
    let qids_loaded = registry.len();

    let parser = SheetParser::new(registry, schema);
    let result = parser.parse_file(&args.input_path)?;

    let stats = ProcessingStats {
        rows_read: result.stats.total_rows,
        rows_decoded: result.stats.rows_decoded,
        rows_skipped: result.stats.rows_skipped,
        qids_loaded,
        errors: result.stats.errors,
        processing_time: start_time.elapsed(),
        output_size: None,
    };

    generate_check_report(&args.output_format, &stats)?;

    if stats.rows_skipped > 0 {
        return Err(Error::ValidationFailed {
            failed: stats.rows_skipped,
            total: stats.rows_read,
        });
    }

    Ok(stats)
}

/// Generate the validation report
fn generate_check_report(format: &OutputFormat, stats: &ProcessingStats) -> Result<()> {
    match format {
        OutputFormat::Human => generate_human_report(stats),
        OutputFormat::Json => generate_json_report(stats),
        OutputFormat::Csv => generate_csv_report(stats),
    }
}

fn generate_human_report(stats: &ProcessingStats) -> Result<()> {
    if stats.rows_skipped == 0 {
        println!(
            "\n{} {} row(s) checked, all valid",
            "OK:".bright_green().bold(),
            stats.rows_read
        );
    } else {
        println!(
            "\n{} {} of {} row(s) failed validation:",
            "FAILED:".bright_red().bold(),
            stats.rows_skipped,
            stats.rows_read
        );
        for error in &stats.errors {
            println!("  - {}", error);
        }
    }

    println!();
    Ok(())
}

fn generate_json_report(stats: &ProcessingStats) -> Result<()> {
    let json_stats = serde_json::json!({
        "rows_read": stats.rows_read,
        "rows_decoded": stats.rows_decoded,
        "rows_skipped": stats.rows_skipped,
        "qids_loaded": stats.qids_loaded,
        "valid": stats.rows_skipped == 0,
        "errors": stats.errors,
    });

    println!(
        "{}",
        serde_json::to_string_pretty(&json_stats)
            .map_err(|e| Error::configuration(format!("Failed to render JSON report: {}", e)))?
    );
    Ok(())
}

fn generate_csv_report(stats: &ProcessingStats) -> Result<()> {
    println!("metric,value");
    println!("rows_read,{}", stats.rows_read);
    println!("rows_decoded,{}", stats.rows_decoded);
    println!("rows_skipped,{}", stats.rows_skipped);
    println!("qids_loaded,{}", stats.qids_loaded);
    println!("valid,{}", stats.rows_skipped == 0);

    Ok(())
}
