//! Answer-sheet decoder for raw OMR scan exports
//!
//! This module turns one raw scan row (a flat mapping of per-bubble 0/1
//! indicators) into a decoded record, enforcing the exactly-one-selected
//! constraint on every bubble group along the way.
//!
//! ## Architecture
//!
//! The decoder is organized into logical components:
//! - [`parser`] - Batch orchestration over a CSV file and per-row error isolation
//! - [`row_decoder`] - Decoding of one raw row into a [`DecodedRecord`](crate::DecodedRecord)
//! - [`selector`] - The exactly-one accumulator driven over each bubble group
//! - [`raw_sheet`] - Raw row capture and indicator normalization
//! - [`keys`] - Field-key construction for the fixed sheet layout
//! - [`stats`] - Extraction statistics and result structures
//!
//! ## Usage
//!
//! ```rust
//! use omr_extractor::app::services::sheet_decoder::SheetParser;
//! use omr_extractor::app::services::qid_registry::QidRegistry;
//! use omr_extractor::config::SheetSchema;
//!
//! # fn example() -> omr_extractor::Result<()> {
//! let parser = SheetParser::new(QidRegistry::empty(), SheetSchema::full());
//! let result = parser.parse_file(std::path::Path::new("scans.csv"))?;
//!
//! println!("Decoded {} sheets from {} rows",
//!          result.stats.rows_decoded,
//!          result.stats.total_rows);
//! # Ok(())
//! # }
//! ```

pub mod keys;
pub mod parser;
pub mod raw_sheet;
pub mod row_decoder;
pub mod selector;
pub mod stats;

#[cfg(test)]
pub mod tests;

// Re-export main types for easy access
pub use parser::SheetParser;
pub use raw_sheet::{Indicators, RawSheet};
pub use selector::{Selector, SelectorError};
pub use stats::{ExtractResult, ExtractStats};
