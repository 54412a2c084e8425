//! Batch parsing of a scanner CSV export
//!
//! This module provides the batch orchestration: reading the raw export,
//! handing each row to a fresh decode invocation, and isolating per-row
//! validation failures so one bad sheet never aborts the batch. Fatal
//! conditions (I/O, an input that does not match the sheet layout at all)
//! do abort, since every subsequent row would fail the same way.

use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info, warn};

use super::raw_sheet::RawSheet;
use super::row_decoder::decode_sheet;
use super::stats::{ExtractResult, ExtractStats};
use crate::app::services::qid_registry::QidRegistry;
use crate::config::SheetSchema;
use crate::constants::QUESTIONNAIRE_ID_COLUMN;
use crate::{Error, Result};

/// Batch parser for raw OMR scan exports
///
/// The parser owns the batch collaborators: the read-only questionnaire-id
/// recovery table and the sheet schema. Each row is decoded independently
/// with no state shared between rows.
#[derive(Debug)]
pub struct SheetParser {
    registry: QidRegistry,
    schema: SheetSchema,
}

impl SheetParser {
    /// Create a new parser with its recovery table and schema
    pub fn new(registry: QidRegistry, schema: SheetSchema) -> Self {
        Self { registry, schema }
    }

    /// The schema this parser decodes against
    pub fn schema(&self) -> &SheetSchema {
        &self.schema
    }

    /// Parse a raw scan export file and return decoded records with statistics
    pub fn parse_file(&self, file_path: &Path) -> Result<ExtractResult> {
        info!("Parsing scan export: {}", file_path.display());

        let file = File::open(file_path).map_err(|e| {
            Error::io(
                format!("Failed to open file {}", file_path.display()),
                e,
            )
        })?;

        self.parse_reader(file, &file_path.display().to_string())
    }

    /// Parse a raw scan export from any reader.
    ///
    /// `source` labels the input in diagnostics (normally the file path).
    pub fn parse_reader<R: Read>(&self, reader: R, source: &str) -> Result<ExtractResult> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_reader(reader);

        let headers = csv_reader
            .headers()
            .map_err(|e| Error::csv_parsing(source, "Failed to read CSV headers", Some(e)))?
            .clone();

        if headers.get(0) != Some(QUESTIONNAIRE_ID_COLUMN) {
            warn!(
                "First column is '{}', expected '{}'; treating it as the questionnaire id anyway",
                headers.get(0).unwrap_or(""),
                QUESTIONNAIRE_ID_COLUMN
            );
        }

        debug!("Input carries {} columns", headers.len());

        let mut stats = ExtractStats::new();
        let mut records = Vec::new();

        for result in csv_reader.records() {
            stats.total_rows += 1;
            let row = stats.total_rows;

            let record = match result {
                Ok(record) => record,
                Err(e) => {
                    stats.rows_skipped += 1;
                    stats
                        .errors
                        .push(format!("CSV parse error at row {}: {}", row, e));
                    debug!("Skipped malformed CSV row {}: {}", row, e);
                    continue;
                }
            };

            let sheet = RawSheet::from_record(&headers, &record);

            match decode_sheet(row, &sheet, &self.registry, &self.schema) {
                Ok(decoded) => {
                    records.push(decoded);
                    stats.rows_decoded += 1;
                }
                Err(e) if e.is_row_validation() => {
                    stats.rows_skipped += 1;
                    stats.errors.push(e.to_string());
                    warn!("Skipped row {}: {}", row, e);
                }
                Err(e) => {
                    // Schema mismatch or I/O failure: every following row
                    // would fail the same way, abort the batch.
                    return Err(e);
                }
            }
        }

        info!(
            "Decoded {} sheets from {} rows ({} skipped)",
            stats.rows_decoded, stats.total_rows, stats.rows_skipped
        );

        Ok(ExtractResult { records, stats })
    }
}
