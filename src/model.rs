use std::path::{Path, PathBuf};

/// One line of a controller log, split into fields.
///
/// The first field is the millisecond Unix timestamp; the rest are passed
/// through untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct LogRecord {
    fields: Vec<String>,
    line: u64,
}

impl LogRecord {
    pub fn new(fields: Vec<String>, line: u64) -> Self {
        Self { fields, line }
    }

    pub fn timestamp_field(&self) -> Option<&str> {
        self.fields.first().map(String::as_str)
    }

    pub fn values(&self) -> &[String] {
        self.fields.get(1..).unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// 1-based line number in the source file
    pub fn line(&self) -> u64 {
        self.line
    }
}

/// Header plus converted rows, ready for display and export
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedTable {
    source: PathBuf,
    header: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl ParsedTable {
    pub fn new(source: impl Into<PathBuf>, header: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self {
            source: source.into(),
            header,
            rows,
        }
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn header(&self) -> &[String] {
        &self.header
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.header.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Header names as shown in the viewers: underscores become spaces
    pub fn display_headings(&self) -> Vec<String> {
        self.header.iter().map(|h| h.replace('_', " ")).collect()
    }

    /// Rows whose field count differs from the header
    pub fn ragged_rows(&self) -> usize {
        self.rows
            .iter()
            .filter(|row| row.len() != self.header.len())
            .count()
    }
}
