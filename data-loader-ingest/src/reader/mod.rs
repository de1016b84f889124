//! Reader module for the data loader ingest.
//!
//! Splits `;`-delimited input into header-keyed records.

mod record;

pub use record::RawRecord;

use std::io::Read;
use std::sync::Arc;

use csv::{ByteRecord, Reader, ReaderBuilder};
use tracing::debug;

use crate::errors::{IngestError, TransformError};

/// Field delimiter of the input format.
pub const DELIMITER: u8 = b';';

/// One data row as read from the input.
#[derive(Debug, Clone, PartialEq)]
pub enum ReadRow {
    /// A row with one value per header column.
    Record(RawRecord),
    /// A row that cannot be keyed by the header.
    Malformed {
        /// 1-based line number of the row.
        line: u64,
        /// The raw row content, lossily decoded.
        content: String,
        /// Why the row was refused.
        error: TransformError,
    },
}

/// Reads header-keyed records from a `;`-delimited UTF-8 stream.
///
/// The first row is the header. Blank lines are skipped. Rows whose field
/// count does not match the header, or that are not valid UTF-8, are yielded
/// as [`ReadRow::Malformed`] so the caller can count them and carry on; only
/// I/O failures end the iteration with an error.
pub struct CsvRecordReader<R: Read> {
    reader: Reader<R>,
    headers: Arc<[String]>,
    record: ByteRecord,
    failed: bool,
}

impl<R: Read> CsvRecordReader<R> {
    /// Create a reader and consume the header row.
    ///
    /// # Returns
    ///
    /// * `Ok(CsvRecordReader)` - Ready to yield data rows
    /// * `Err(IngestError::ReadError)` - The header could not be read or decoded
    pub fn new(input: R) -> Result<Self, IngestError> {
        let mut reader = ReaderBuilder::new()
            .delimiter(DELIMITER)
            .has_headers(true)
            .flexible(true)
            .from_reader(input);

        let headers = reader
            .byte_headers()?
            .iter()
            .map(|h| {
                std::str::from_utf8(h)
                    .map(str::to_string)
                    .map_err(|e| IngestError::read(format!("header is not valid UTF-8: {}", e)))
            })
            .collect::<Result<Vec<_>, _>>()?;

        debug!(column_count = headers.len(), "Read header row");

        Ok(Self {
            reader,
            headers: headers.into(),
            record: ByteRecord::new(),
            failed: false,
        })
    }

    /// Column names from the header row, in source order.
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    fn line(&self) -> u64 {
        self.record.position().map(|p| p.line()).unwrap_or_default()
    }

    fn decode(&self) -> ReadRow {
        let line = self.line();

        if self.record.len() != self.headers.len() {
            return ReadRow::Malformed {
                line,
                content: self.lossy_content(),
                error: TransformError::FieldCount {
                    expected: self.headers.len(),
                    found: self.record.len(),
                },
            };
        }

        let mut values = Vec::with_capacity(self.record.len());
        for (column, field) in self.record.iter().enumerate() {
            match std::str::from_utf8(field) {
                Ok(value) => values.push(value.to_string()),
                Err(_) => {
                    return ReadRow::Malformed {
                        line,
                        content: self.lossy_content(),
                        error: TransformError::InvalidEncoding { column },
                    }
                }
            }
        }

        ReadRow::Record(RawRecord::new(line, Arc::clone(&self.headers), values))
    }

    fn lossy_content(&self) -> String {
        self.record
            .iter()
            .map(String::from_utf8_lossy)
            .collect::<Vec<_>>()
            .join(";")
    }
}

impl<R: Read> Iterator for CsvRecordReader<R> {
    type Item = Result<ReadRow, IngestError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }

        match self.reader.read_byte_record(&mut self.record) {
            Ok(true) => Some(Ok(self.decode())),
            Ok(false) => None,
            Err(e) => {
                self.failed = true;
                Some(Err(e.into()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read_all(input: &[u8]) -> Vec<ReadRow> {
        CsvRecordReader::new(input)
            .unwrap()
            .collect::<Result<Vec<_>, _>>()
            .unwrap()
    }

    #[test]
    fn test_reads_headers_and_records() {
        let input = b"ID;title;helix\n1;First;Health, Vascular\n2;Second;Health\n";
        let reader = CsvRecordReader::new(&input[..]).unwrap();

        assert_eq!(reader.headers(), ["ID", "title", "helix"]);

        let rows = reader.collect::<Result<Vec<_>, _>>().unwrap();
        assert_eq!(rows.len(), 2);
        match &rows[0] {
            ReadRow::Record(record) => {
                assert_eq!(record.line(), 2);
                assert_eq!(record.get("ID"), Some("1"));
                assert_eq!(record.get("helix"), Some("Health, Vascular"));
            }
            other => panic!("unexpected row: {:?}", other),
        }
    }

    #[test]
    fn test_header_only_input_has_no_rows() {
        assert!(read_all(b"ID;title;helix\n").is_empty());
    }

    #[test]
    fn test_empty_input_has_no_rows() {
        let reader = CsvRecordReader::new(&b""[..]).unwrap();
        assert!(reader.headers().is_empty());
        assert_eq!(reader.count(), 0);
    }

    #[test]
    fn test_quoted_values_keep_delimiters() {
        let rows = read_all(b"ID;description\n1;\"Semi; colon\"\n");

        match &rows[0] {
            ReadRow::Record(record) => assert_eq!(record.get("description"), Some("Semi; colon")),
            other => panic!("unexpected row: {:?}", other),
        }
    }

    #[test]
    fn test_field_count_mismatch_is_malformed() {
        let rows = read_all(b"ID;title\n1\n2;Second;extra\n3;Third\n");

        assert_eq!(rows.len(), 3);
        assert!(matches!(
            rows[0],
            ReadRow::Malformed {
                error: TransformError::FieldCount { expected: 2, found: 1 },
                ..
            }
        ));
        assert!(matches!(
            rows[1],
            ReadRow::Malformed {
                error: TransformError::FieldCount { expected: 2, found: 3 },
                ..
            }
        ));
        assert!(matches!(rows[2], ReadRow::Record(_)));
    }

    #[test]
    fn test_invalid_utf8_is_malformed() {
        let rows = read_all(b"ID;title\n1;\xff\xfe\n2;ok\n");

        match &rows[0] {
            ReadRow::Malformed { line, error, .. } => {
                assert_eq!(*line, 2);
                assert_eq!(*error, TransformError::InvalidEncoding { column: 1 });
            }
            other => panic!("unexpected row: {:?}", other),
        }
        assert!(matches!(rows[1], ReadRow::Record(_)));
    }

    #[test]
    fn test_invalid_utf8_header_is_fatal() {
        let result = CsvRecordReader::new(&b"I\xffD;title\n1;x\n"[..]);
        assert!(matches!(result, Err(IngestError::ReadError(_))));
    }
}
