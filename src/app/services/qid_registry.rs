//! Questionnaire-id recovery table
//!
//! The scanner occasionally fails to read the questionnaire id printed on a
//! sheet. Those ids are assigned by hand and supplied as a small CSV file
//! mapping the row sequence number to the id. This module loads that file
//! once per batch and provides O(1) lookups; the table is read-only for the
//! duration of the batch.

use crate::{Error, Result};
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, info};

/// Column holding the 1-based row sequence number in a recovery file
const ROW_COLUMN: &str = "q";

/// Column holding the manually assigned questionnaire id
const QID_COLUMN: &str = "qid";

/// Read-only mapping from row sequence number to questionnaire id
#[derive(Debug, Clone, Default)]
pub struct QidRegistry {
    entries: HashMap<usize, String>,
}

impl QidRegistry {
    /// Create an empty registry (no recovery file supplied)
    pub fn empty() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Build a registry from explicit entries
    pub fn from_entries(entries: impl IntoIterator<Item = (usize, String)>) -> Self {
        Self {
            entries: entries.into_iter().collect(),
        }
    }

    /// Load a recovery table from a CSV file with `q,qid` columns
    pub fn load(file_path: &Path) -> Result<Self> {
        info!("Loading qid recovery table: {}", file_path.display());

        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_path(file_path)
            .map_err(|e| {
                Error::csv_parsing(
                    file_path.display().to_string(),
                    "Failed to open recovery table",
                    Some(e),
                )
            })?;

        let headers = csv_reader
            .headers()
            .map_err(|e| {
                Error::csv_parsing(
                    file_path.display().to_string(),
                    "Failed to read recovery table headers",
                    Some(e),
                )
            })?
            .clone();

        let row_index = column_index(&headers, ROW_COLUMN, file_path)?;
        let qid_index = column_index(&headers, QID_COLUMN, file_path)?;

        let mut entries = HashMap::new();
        for (line, result) in csv_reader.records().enumerate() {
            let record = result.map_err(|e| {
                Error::csv_parsing(
                    file_path.display().to_string(),
                    format!("Malformed recovery table entry at line {}", line + 2),
                    Some(e),
                )
            })?;

            let row_value = record.get(row_index).unwrap_or("").trim();
            let row: usize = row_value.parse().map_err(|_| {
                Error::configuration(format!(
                    "Recovery table '{}' holds non-numeric row number '{}'",
                    file_path.display(),
                    row_value
                ))
            })?;

            let qid = record.get(qid_index).unwrap_or("").trim();
            if qid.is_empty() {
                return Err(Error::configuration(format!(
                    "Recovery table '{}' holds an empty qid for row {}",
                    file_path.display(),
                    row
                )));
            }

            debug!("Recovery entry: row {} -> qid {}", row, qid);
            entries.insert(row, qid.to_string());
        }

        info!("Loaded {} recovery entries", entries.len());
        Ok(Self { entries })
    }

    /// Get the manually assigned id for a row sequence number (O(1) lookup)
    pub fn get(&self, row: usize) -> Option<&str> {
        self.entries.get(&row).map(String::as_str)
    }

    /// Number of entries in the registry
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the registry holds no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn column_index(headers: &csv::StringRecord, name: &str, file_path: &Path) -> Result<usize> {
    headers.iter().position(|h| h.trim() == name).ok_or_else(|| {
        Error::configuration(format!(
            "Recovery table '{}' is missing required column '{}'",
            file_path.display(),
            name
        ))
    })
}
