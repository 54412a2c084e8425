//! Extraction statistics and result structures
//!
//! This module provides types for tracking decode success rates and
//! organizing decoded records for downstream writing.

use crate::app::models::DecodedRecord;

/// Extraction result with decoded records and basic statistics
#[derive(Debug, Clone)]
pub struct ExtractResult {
    /// Successfully decoded sheet records
    pub records: Vec<DecodedRecord>,

    /// Basic extraction statistics
    pub stats: ExtractStats,
}

/// Simple extraction statistics
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct ExtractStats {
    /// Total number of data rows encountered
    pub total_rows: usize,

    /// Number of rows successfully decoded
    pub rows_decoded: usize,

    /// Number of rows skipped due to validation failures
    pub rows_skipped: usize,

    /// List of per-row validation errors for reporting
    pub errors: Vec<String>,
}

impl ExtractStats {
    /// Create new empty statistics
    pub fn new() -> Self {
        Self {
            total_rows: 0,
            rows_decoded: 0,
            rows_skipped: 0,
            errors: Vec::new(),
        }
    }

    /// Calculate success rate as a percentage
    pub fn success_rate(&self) -> f64 {
        if self.total_rows == 0 {
            0.0
        } else {
            (self.rows_decoded as f64 / self.total_rows as f64) * 100.0
        }
    }

    /// Check if extraction was mostly successful (>90% success rate)
    pub fn is_successful(&self) -> bool {
        self.success_rate() > 90.0
    }
}

impl Default for ExtractStats {
    fn default() -> Self {
        Self::new()
    }
}
