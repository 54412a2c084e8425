//! Raw row capture and indicator normalization
//!
//! One CSV line of the scanner export becomes a [`RawSheet`]: the ordered
//! field list exactly as read. Decoding first normalizes it into
//! [`Indicators`] by dropping the two leading bookkeeping fields
//! (questionnaire id and global scan id) and coercing every remaining value
//! to an integer. Both an absent field key and a non-integer indicator mean
//! the input does not match the export format and abort the batch.

use crate::constants::{BOOKKEEPING_COLUMNS, UNREAD_QID_MARKER};
use crate::{Error, Result};
use csv::StringRecord;
use std::collections::HashMap;

/// One raw scan row: ordered (field-key, value) pairs as read from the CSV
#[derive(Debug, Clone)]
pub struct RawSheet {
    fields: Vec<(String, String)>,
}

impl RawSheet {
    /// Capture a CSV record against its header row.
    ///
    /// Shorter records yield fewer fields; the missing keys surface later as
    /// schema mismatches when the decoder asks for them.
    pub fn from_record(headers: &StringRecord, record: &StringRecord) -> Self {
        let fields = headers
            .iter()
            .zip(record.iter())
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();

        Self { fields }
    }

    /// Build a sheet from explicit (key, value) pairs
    pub fn from_fields(fields: Vec<(String, String)>) -> Self {
        Self { fields }
    }

    /// The scanner-read questionnaire id (first field), or `None` when the
    /// scanner could not read it (empty or the literal `None` marker).
    pub fn questionnaire_id(&self) -> Option<&str> {
        self.fields
            .first()
            .map(|(_, value)| value.trim())
            .filter(|value| !value.is_empty() && *value != UNREAD_QID_MARKER)
    }

    /// Number of captured fields
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the sheet captured no fields at all
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Normalize into the indicator set: drop the two leading bookkeeping
    /// fields and coerce every remaining value to an integer.
    pub fn normalize(&self, row: usize) -> Result<Indicators> {
        let mut values = HashMap::with_capacity(self.fields.len().saturating_sub(2));

        for (key, value) in self.fields.iter().skip(BOOKKEEPING_COLUMNS) {
            let parsed = value
                .trim()
                .parse::<i64>()
                .map_err(|_| Error::invalid_indicator(row, key.clone(), value.clone()))?;
            values.insert(key.clone(), parsed);
        }

        Ok(Indicators { row, values })
    }
}

/// Normalized indicator fields of one row, addressed by field key
#[derive(Debug)]
pub struct Indicators {
    row: usize,
    values: HashMap<String, i64>,
}

impl Indicators {
    /// Look up one indicator. An absent key is a fatal schema mismatch, not
    /// a per-row validation failure.
    pub fn get(&self, key: &str) -> Result<i64> {
        self.values
            .get(key)
            .copied()
            .ok_or_else(|| Error::schema_mismatch(self.row, key))
    }

    /// Whether the bubble behind `key` is filled
    pub fn is_set(&self, key: &str) -> Result<bool> {
        Ok(self.get(key)? != 0)
    }

    /// Number of indicator fields
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the row carried no indicator fields
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
