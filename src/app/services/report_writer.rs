//! CSV output writer for decoded records
//!
//! Serializes decoded records to the fixed-column output layout
//! (`id,qid,rid` plus, on the full sheet, `1..30,s1,s2`). Records are
//! written in batch order; column layout comes from the schema so both
//! sheet generations share one writer.

use crate::app::models::DecodedRecord;
use crate::config::SheetSchema;
use crate::{Error, Result};
use std::fs::File;
use std::io::Write;
use std::path::Path;
use tracing::info;

/// Statistics from one write pass
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct WriteStats {
    /// Number of records written
    pub records_written: usize,

    /// Number of output columns per record
    pub columns: usize,
}

/// Write decoded records to a CSV file
pub fn write_records(
    output_path: &Path,
    records: &[DecodedRecord],
    schema: &SheetSchema,
) -> Result<WriteStats> {
    let file = File::create(output_path).map_err(|e| {
        Error::io(
            format!("Failed to create output file {}", output_path.display()),
            e,
        )
    })?;

    let stats = write_records_to(file, records, schema)?;

    info!(
        "Wrote {} records to {}",
        stats.records_written,
        output_path.display()
    );

    Ok(stats)
}

/// Write decoded records to any writer
pub fn write_records_to<W: Write>(
    writer: W,
    records: &[DecodedRecord],
    schema: &SheetSchema,
) -> Result<WriteStats> {
    let headers = schema.output_headers();
    let mut csv_writer = csv::Writer::from_writer(writer);

    csv_writer.write_record(&headers)?;

    for record in records {
        csv_writer.write_record(record.output_fields(schema))?;
    }

    csv_writer.flush().map_err(|e| Error::io(
        "Failed to flush output file".to_string(),
        e,
    ))?;

    Ok(WriteStats {
        records_written: records.len(),
        columns: headers.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::models::Answer;
    use crate::constants::{NUM_QUESTIONS, NUM_SURVEYS};

    fn sample_record(id: usize) -> DecodedRecord {
        DecodedRecord {
            id,
            qid: "042".to_string(),
            rid: "BCS-SP15307-".to_string(),
            answers: vec![Some(Answer::B); NUM_QUESTIONS],
            surveys: vec![5; NUM_SURVEYS],
        }
    }

    #[test]
    fn test_write_full_layout() {
        let mut out = Vec::new();
        let stats = write_records_to(&mut out, &[sample_record(1)], &SheetSchema::full()).unwrap();

        assert_eq!(stats.records_written, 1);
        assert_eq!(stats.columns, 35);

        let text = String::from_utf8(out).unwrap();
        let mut lines = text.lines();
        let header = lines.next().unwrap();
        assert!(header.starts_with("id,qid,rid,1,2,"));
        assert!(header.ends_with("29,30,s1,s2"));

        let row = lines.next().unwrap();
        assert!(row.starts_with("1,042,BCS-SP15307-,B,B,"));
        assert!(row.ends_with("B,B,5,5"));
    }

    #[test]
    fn test_write_minimal_layout() {
        let record = DecodedRecord {
            id: 2,
            qid: "101".to_string(),
            rid: "BCS-FA09-XXX".to_string(),
            answers: vec![],
            surveys: vec![],
        };

        let mut out = Vec::new();
        let stats = write_records_to(&mut out, &[record], &SheetSchema::minimal()).unwrap();
        assert_eq!(stats.columns, 3);

        let text = String::from_utf8(out).unwrap();
        assert_eq!(text, "id,qid,rid\n2,101,BCS-FA09-XXX\n");
    }

    #[test]
    fn test_unanswered_question_writes_empty_cell() {
        let mut record = sample_record(1);
        record.answers[0] = None;

        let mut out = Vec::new();
        write_records_to(&mut out, &[record], &SheetSchema::full()).unwrap();

        let text = String::from_utf8(out).unwrap();
        let row = text.lines().nth(1).unwrap();
        assert!(row.starts_with("1,042,BCS-SP15307-,,B,"));
    }

    #[test]
    fn test_write_no_records() {
        let mut out = Vec::new();
        let stats = write_records_to(&mut out, &[], &SheetSchema::full()).unwrap();
        assert_eq!(stats.records_written, 0);

        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.lines().count(), 1);
    }
}
