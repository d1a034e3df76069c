use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::info;

use crate::config::{delimiter_byte, OutputConfig};
use crate::error::{LogParserError, LogResult};
use crate::model::ParsedTable;

/// What a successful export produced
#[derive(Debug, Clone, PartialEq)]
pub struct WriteSummary {
    pub path: PathBuf,
    pub rows_written: usize,
}

/// Writes a [`ParsedTable`] as tab-separated text
pub struct TableWriter {
    config: OutputConfig,
}

impl TableWriter {
    pub fn new(config: OutputConfig) -> Self {
        Self { config }
    }

    /// `<dir>/<stem><suffix>` next to the source log
    pub fn output_path_for(&self, source: &Path) -> PathBuf {
        let stem = source
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        source.with_file_name(format!("{}{}", stem, self.config.suffix))
    }

    pub fn save(&self, table: &ParsedTable, path: &Path) -> LogResult<WriteSummary> {
        info!(output = %path.display(), rows = table.row_count(), "Saving tab-separated copy");

        let file = File::create(path)
            .map_err(|e| LogParserError::write(path.display().to_string(), e))?;

        self.write_to(table, BufWriter::new(file))
            .map_err(|e| LogParserError::write(path.display().to_string(), e))?;

        Ok(WriteSummary {
            path: path.to_path_buf(),
            rows_written: table.row_count(),
        })
    }

    /// Header first, then every row with decimal commas normalized
    pub fn write_to<W: Write>(&self, table: &ParsedTable, sink: W) -> io::Result<()> {
        let delimiter = delimiter_byte(self.config.delimiter)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e.to_string()))?;
        let terminator = if self.config.crlf {
            csv::Terminator::CRLF
        } else {
            csv::Terminator::Any(b'\n')
        };

        let mut writer = csv::WriterBuilder::new()
            .delimiter(delimiter)
            .terminator(terminator)
            .flexible(true)
            .from_writer(sink);

        writer.write_record(table.header())?;

        for row in table.rows() {
            if self.config.normalize_decimals {
                writer.write_record(row.iter().map(|field| normalize_decimal(field)))?;
            } else {
                writer.write_record(row)?;
            }
        }

        writer.flush()
    }
}

/// Replace decimal commas with periods
pub fn normalize_decimal(field: &str) -> String {
    field.replace(',', ".")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    fn sample_table() -> ParsedTable {
        ParsedTable::new(
            "run.csv",
            strings(&["Timestamp", "Cumulative_Time_s", "A,B"]),
            vec![
                strings(&["2024-01-01 00:00:00.000", "0.000", "3,14"]),
                strings(&["2024-01-01 00:00:01.500", "1.500", "42"]),
            ],
        )
    }

    fn lf_writer() -> TableWriter {
        TableWriter::new(OutputConfig {
            crlf: false,
            ..OutputConfig::default()
        })
    }

    #[test]
    fn test_normalize_decimal() {
        assert_eq!(normalize_decimal("3,14"), "3.14");
        assert_eq!(normalize_decimal("42"), "42");
        assert_eq!(normalize_decimal("1,2,3"), "1.2.3");
    }

    #[test]
    fn test_output_path() {
        let writer = TableWriter::new(OutputConfig::default());
        assert_eq!(
            writer.output_path_for(Path::new("/dir/run.csv")),
            PathBuf::from("/dir/run_parsed.txt")
        );
        assert_eq!(
            writer.output_path_for(Path::new("SliderData_20240101.log.txt")),
            PathBuf::from("SliderData_20240101.log_parsed.txt")
        );
    }

    #[test]
    fn test_tab_separated_output() {
        let mut buffer = Vec::new();
        lf_writer().write_to(&sample_table(), &mut buffer).unwrap();
        let text = String::from_utf8(buffer).unwrap();

        assert_eq!(
            text,
            "Timestamp\tCumulative_Time_s\tA,B\n\
             2024-01-01 00:00:00.000\t0.000\t3.14\n\
             2024-01-01 00:00:01.500\t1.500\t42\n"
        );
    }

    #[test]
    fn test_crlf_default() {
        let mut buffer = Vec::new();
        TableWriter::new(OutputConfig::default())
            .write_to(&sample_table(), &mut buffer)
            .unwrap();
        let text = String::from_utf8(buffer).unwrap();
        assert!(text.starts_with("Timestamp\tCumulative_Time_s\tA,B\r\n"));
        assert_eq!(text.matches("\r\n").count(), 3);
    }

    #[test]
    fn test_normalization_can_be_disabled() {
        let writer = TableWriter::new(OutputConfig {
            normalize_decimals: false,
            crlf: false,
            ..OutputConfig::default()
        });
        let mut buffer = Vec::new();
        writer.write_to(&sample_table(), &mut buffer).unwrap();
        assert!(String::from_utf8(buffer).unwrap().contains("\t3,14\n"));
    }

    #[test]
    fn test_header_only_table() {
        let table = ParsedTable::new("run.csv", strings(&["Timestamp", "Cumulative_Time_s", "A"]), Vec::new());
        let mut buffer = Vec::new();
        lf_writer().write_to(&table, &mut buffer).unwrap();
        assert_eq!(String::from_utf8(buffer).unwrap(), "Timestamp\tCumulative_Time_s\tA\n");
    }

    #[test]
    fn test_save_to_disk() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("run_parsed.txt");

        let summary = lf_writer().save(&sample_table(), &path).unwrap();
        assert_eq!(summary.rows_written, 2);
        assert_eq!(summary.path, path);
        assert_eq!(std::fs::read_to_string(&path).unwrap().lines().count(), 3);
    }

    #[test]
    fn test_save_into_missing_dir_fails() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing").join("out.txt");
        let err = lf_writer().save(&sample_table(), &path).unwrap_err();
        assert!(matches!(err, LogParserError::Write { .. }));
    }
}
