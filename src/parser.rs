use chrono::{Local, TimeZone};
use std::path::Path;
use tracing::{debug, info, warn};

use crate::config::{delimiter_byte, InputConfig};
use crate::error::{LogParserError, LogResult};
use crate::logging::PerformanceTimer;
use crate::model::{LogRecord, ParsedTable};

const READABLE_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";

/// Reads underscore-delimited controller logs into a [`ParsedTable`]
pub struct LogParser {
    config: InputConfig,
}

impl LogParser {
    pub fn new(config: InputConfig) -> Self {
        Self { config }
    }

    pub fn parse_file(&self, path: &Path) -> LogResult<ParsedTable> {
        let timer = PerformanceTimer::start(format!("parse {}", path.display()));
        info!(file = %path.display(), "Reading controller log");

        let content = std::fs::read_to_string(path)
            .map_err(|e| LogParserError::file_io(path.display().to_string(), e))?;
        timer.checkpoint("read");

        self.parse_str(&content, path)
    }

    /// Parse log text; `source` is only recorded on the resulting table.
    pub fn parse_str(&self, content: &str, source: &Path) -> LogResult<ParsedTable> {
        // csv skips blank lines, so an empty first line has to be caught here
        let first_line = content.lines().next().map(|l| l.trim_end_matches('\r'));
        if first_line.map_or(true, str::is_empty) {
            warn!(file = %source.display(), "Log has no header line");
            return Err(LogParserError::EmptyHeader {
                path: source.display().to_string(),
            });
        }

        let mut reader = csv::ReaderBuilder::new()
            .delimiter(delimiter_byte(self.config.delimiter)?)
            .has_headers(false)
            .flexible(true)
            .from_reader(content.as_bytes());

        let mut records = reader.records();

        let header = match records.next() {
            Some(result) => result.map_err(|e| malformed(e, 1))?,
            None => {
                return Err(LogParserError::EmptyHeader {
                    path: source.display().to_string(),
                })
            }
        };
        let header = self.build_header(header.iter().map(str::to_string).collect());
        debug!(columns = header.len(), "Header detected");

        let mut origin_ms: Option<i64> = None;
        let mut rows = Vec::new();

        for result in records {
            let record = result.map_err(|e| {
                let line = e.position().map(|p| p.line()).unwrap_or(0);
                malformed(e, line)
            })?;
            let line = record.position().map(|p| p.line()).unwrap_or(0);
            let record = LogRecord::new(record.iter().map(str::to_string).collect(), line);

            if record.is_empty() {
                continue;
            }

            rows.push(self.convert_record(&record, &mut origin_ms)?);
        }

        info!(rows = rows.len(), columns = header.len(), "Parsed controller log");

        let table = ParsedTable::new(source, header, rows);
        let ragged = table.ragged_rows();
        if ragged > 0 {
            warn!(ragged = ragged, "Rows with a field count different from the header");
        }

        Ok(table)
    }

    fn build_header(&self, mut header: Vec<String>) -> Vec<String> {
        match header.first_mut() {
            Some(first) => *first = self.config.timestamp_column.clone(),
            None => header.push(self.config.timestamp_column.clone()),
        }
        header.insert(1, self.config.cumulative_column.clone());
        header
    }

    fn convert_record(&self, record: &LogRecord, origin_ms: &mut Option<i64>) -> LogResult<Vec<String>> {
        let raw = record.timestamp_field().unwrap_or_default();
        let timestamp_ms: i64 = raw.trim().parse().map_err(|e| LogParserError::InvalidTimestamp {
            line: record.line(),
            value: raw.to_string(),
            source: e,
        })?;

        let origin = *origin_ms.get_or_insert(timestamp_ms);

        let readable = format_local_timestamp(timestamp_ms).ok_or(
            LogParserError::TimestampOutOfRange {
                line: record.line(),
                millis: timestamp_ms,
            },
        )?;
        let cumulative = format_cumulative(timestamp_ms.saturating_sub(origin));

        let mut row = Vec::with_capacity(record.len() + 1);
        row.push(readable);
        row.push(cumulative);
        row.extend(record.values().iter().cloned());
        Ok(row)
    }
}

fn malformed(source: csv::Error, line: u64) -> LogParserError {
    LogParserError::MalformedRecord { line, source }
}

/// Render a millisecond Unix timestamp as local `YYYY-MM-DD HH:MM:SS.mmm`
pub fn format_local_timestamp(millis: i64) -> Option<String> {
    Local
        .timestamp_millis_opt(millis)
        .single()
        .map(|dt| dt.format(READABLE_FORMAT).to_string())
}

/// Seconds with three decimals, computed from whole milliseconds
pub fn format_cumulative(delta_ms: i64) -> String {
    let sign = if delta_ms < 0 { "-" } else { "" };
    let abs = delta_ms.unsigned_abs();
    format!("{}{}.{:03}", sign, abs / 1000, abs % 1000)
}
