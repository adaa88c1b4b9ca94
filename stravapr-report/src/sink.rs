//! Buffered CSV output.
//!
//! Rows are written into memory and handed to stdout as one block when the
//! report ends. Quoting follows RFC 4180 via the `csv` crate and the output is
//! always UTF-8, whatever the names contain.

use crate::error::ReportError;
use crate::row::CsvRecord;
use std::io::Write;

pub struct CsvSink {
    writer: csv::Writer<Vec<u8>>,
    rows: usize,
}

impl Default for CsvSink {
    fn default() -> Self {
        Self::new()
    }
}

impl CsvSink {
    pub fn new() -> Self {
        Self {
            writer: csv::Writer::from_writer(vec![]),
            rows: 0,
        }
    }

    pub fn write_header(&mut self, columns: &[&str]) -> Result<(), ReportError> {
        self.writer.write_record(columns)?;
        Ok(())
    }

    pub fn write_row<I, T>(&mut self, values: I) -> Result<(), ReportError>
    where
        I: IntoIterator<Item = T>,
        T: AsRef<[u8]>,
    {
        self.writer.write_record(values)?;
        self.rows += 1;
        Ok(())
    }

    pub fn write_record<R: CsvRecord>(&mut self, row: &R) -> Result<(), ReportError> {
        let fields = row.record()?;
        self.write_row(&fields)
    }

    /// Data rows written so far, not counting the header.
    pub fn rows_written(&self) -> usize {
        self.rows
    }

    /// Flush and return the buffered CSV text.
    pub fn finish(self) -> Result<String, ReportError> {
        let data = self
            .writer
            .into_inner()
            .map_err(|e| ReportError::Io(e.into_error()))?;
        Ok(String::from_utf8(data)?)
    }
}

/// Write a finished report to `out`, then return the report's outcome.
///
/// A failed report still prints the rows it got through. If it failed before
/// any data row, nothing is printed.
pub fn flush_report<W: Write>(
    sink: CsvSink,
    outcome: Result<(), ReportError>,
    out: &mut W,
) -> Result<(), ReportError> {
    if outcome.is_ok() || sink.rows_written() > 0 {
        let text = sink.finish()?;
        writeln!(out, "{}", text.trim_end())?;
        out.flush()?;
    }
    outcome
}
