//! Command-line argument definitions for the OMR extractor
//!
//! This module defines the complete CLI interface using the clap derive API.

use crate::config::SheetSchema;
use crate::{Error, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// CLI arguments for the OMR response extractor
///
/// Extracts structured exam responses from the raw CSV export of an
/// optical-mark-recognition scanning pipeline.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "omr-extractor",
    version,
    about = "Extract structured exam responses from raw OMR scan exports",
    long_about = "Decodes the per-bubble indicator fields of a scanned answer-sheet export \
                  into student registration ids, 30 multiple-choice answers and 2 survey \
                  responses, validating that every bubble group has exactly one mark. Rows \
                  violating a constraint are reported and skipped; the batch always runs to \
                  completion."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands for the OMR extractor
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Decode a scan export and write the extracted responses (main command)
    Extract(ExtractArgs),
    /// Validate a scan export without writing output
    Check(CheckArgs),
}

/// Arguments for the extract command (main extraction)
#[derive(Debug, Clone, Parser)]
pub struct ExtractArgs {
    /// Input path to the raw scan export CSV
    ///
    /// The export produced by the scanning pipeline: one row per sheet,
    /// first two columns holding the questionnaire id and global scan id,
    /// all further columns holding 0/1 bubble indicators.
    #[arg(
        short = 'i',
        long = "input",
        value_name = "FILE",
        help = "Input path to the raw scan export CSV"
    )]
    pub input_path: PathBuf,

    /// Output path for the extracted responses CSV
    #[arg(
        short = 'o',
        long = "output",
        value_name = "FILE",
        help = "Output path for the extracted responses CSV"
    )]
    pub output_path: PathBuf,

    /// Path to a questionnaire-id recovery table
    ///
    /// A CSV file with `q,qid` columns mapping row sequence numbers to
    /// manually assigned questionnaire ids, used when the scanner failed to
    /// read the id printed on a sheet.
    #[arg(
        long = "qids",
        value_name = "FILE",
        help = "Path to a questionnaire-id recovery table (q,qid columns)"
    )]
    pub qids_path: Option<PathBuf>,

    /// Sheet layout the export was scanned from
    ///
    /// The full layout carries a roll number, 30 answers and 2 survey
    /// questions; the minimal layout carries the identity block only.
    #[arg(
        long = "schema",
        value_enum,
        default_value = "full",
        help = "Sheet layout of the export"
    )]
    pub schema: SchemaArg,

    /// Force overwrite of an existing output file
    #[arg(long = "force", help = "Force overwrite of an existing output file")]
    pub force_overwrite: bool,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Suppress output (quiet mode)
    #[arg(
        short = 'q',
        long = "quiet",
        help = "Suppress output except errors",
        conflicts_with = "verbose"
    )]
    pub quiet: bool,

    /// Output format for the summary report
    #[arg(
        long = "output-format",
        value_enum,
        default_value = "human",
        help = "Output format for the summary report"
    )]
    pub output_format: OutputFormat,
}

/// Arguments for the check command (validation without output)
#[derive(Debug, Clone, Parser)]
pub struct CheckArgs {
    /// Input path to the raw scan export CSV
    #[arg(
        short = 'i',
        long = "input",
        value_name = "FILE",
        help = "Input path to the raw scan export CSV"
    )]
    pub input_path: PathBuf,

    /// Path to a questionnaire-id recovery table
    #[arg(
        long = "qids",
        value_name = "FILE",
        help = "Path to a questionnaire-id recovery table (q,qid columns)"
    )]
    pub qids_path: Option<PathBuf>,

    /// Sheet layout the export was scanned from
    #[arg(
        long = "schema",
        value_enum,
        default_value = "full",
        help = "Sheet layout of the export"
    )]
    pub schema: SchemaArg,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Output format for the validation report
    #[arg(
        long = "output-format",
        value_enum,
        default_value = "human",
        help = "Output format for the validation report"
    )]
    pub output_format: OutputFormat,
}

/// Output format options for summary reports
#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON format for scripting
    Json,
    /// CSV format for data analysis
    Csv,
}

/// Sheet layout selection on the command line
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum SchemaArg {
    /// Identity block, roll number, answers and surveys
    Full,
    /// Identity block only (semester and year)
    Minimal,
}

impl SchemaArg {
    /// Build the decoding schema for this layout
    pub fn to_schema(self) -> SheetSchema {
        match self {
            SchemaArg::Full => SheetSchema::full(),
            SchemaArg::Minimal => SheetSchema::minimal(),
        }
    }
}

impl Args {
    /// Get the command if one was specified
    pub fn get_command(&self) -> Commands {
        self.command
            .clone()
            .expect("Command should be present when get_command() is called")
    }
}

impl ExtractArgs {
    /// Validate the extract command arguments for consistency
    pub fn validate(&self) -> Result<()> {
        validate_input_file(&self.input_path)?;

        if let Some(qids_path) = &self.qids_path {
            validate_input_file(qids_path)?;
        }

        if self.output_path == self.input_path {
            return Err(Error::configuration(
                "Output path cannot be the same as the input path".to_string(),
            ));
        }

        if let Some(parent) = self.output_path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                return Err(Error::configuration(format!(
                    "Output directory does not exist: {}",
                    parent.display()
                )));
            }
        }

        Ok(())
    }

    /// Determine the appropriate log level based on verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else {
            match self.verbose {
                0 => "warn",
                1 => "info",
                2 => "debug",
                _ => "trace",
            }
        }
    }

    /// Check if we should show progress indicators (not in quiet mode)
    pub fn show_progress(&self) -> bool {
        !self.quiet
    }
}

impl CheckArgs {
    /// Validate the check command arguments for consistency
    pub fn validate(&self) -> Result<()> {
        validate_input_file(&self.input_path)?;

        if let Some(qids_path) = &self.qids_path {
            validate_input_file(qids_path)?;
        }

        Ok(())
    }

    /// Determine the appropriate log level based on verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}

fn validate_input_file(path: &PathBuf) -> Result<()> {
    if !path.exists() {
        return Err(Error::configuration(format!(
            "Input file does not exist: {}",
            path.display()
        )));
    }

    if !path.is_file() {
        return Err(Error::configuration(format!(
            "Input path is not a file: {}",
            path.display()
        )));
    }

    Ok(())
}
