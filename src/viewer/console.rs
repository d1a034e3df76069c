use std::io::{self, Write};

use super::TableViewer;
use crate::config::ViewerConfig;
use crate::error::{LogParserError, LogResult};
use crate::model::ParsedTable;

/// Prints the table as fixed-width, centered columns
pub struct ConsoleViewer<W: Write> {
    out: W,
    title: String,
    width: usize,
}

impl ConsoleViewer<io::Stdout> {
    pub fn stdout(config: &ViewerConfig) -> Self {
        Self::new(io::stdout(), config)
    }
}

impl<W: Write> ConsoleViewer<W> {
    pub fn new(out: W, config: &ViewerConfig) -> Self {
        Self {
            out,
            title: config.title.clone(),
            width: config.column_cells() as usize,
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn render(&mut self, table: &ParsedTable) -> io::Result<()> {
        let headings = table.display_headings();
        let rule = "-".repeat((self.width + 1) * headings.len().max(1));

        writeln!(self.out, "{}", self.title)?;
        writeln!(self.out, "{}", rule)?;
        self.write_line(&headings)?;
        writeln!(self.out, "{}", rule)?;
        for row in table.rows() {
            self.write_line(row)?;
        }
        writeln!(self.out, "{}", rule)?;
        writeln!(self.out, "{} rows", table.row_count())?;
        self.out.flush()
    }

    fn write_line(&mut self, cells: &[String]) -> io::Result<()> {
        let line = cells
            .iter()
            .map(|cell| format!("{:^width$}", fit(cell, self.width), width = self.width))
            .collect::<Vec<_>>()
            .join(" ");
        writeln!(self.out, "{}", line.trim_end())
    }
}

impl<W: Write> TableViewer for ConsoleViewer<W> {
    fn show(&mut self, table: &ParsedTable) -> LogResult<()> {
        self.render(table)
            .map_err(|e| LogParserError::viewer(format!("console output failed: {}", e)))
    }
}

/// Cut a cell to `width` characters, marking the cut with `~`
pub(crate) fn fit(cell: &str, width: usize) -> String {
    if cell.chars().count() <= width {
        cell.to_string()
    } else {
        let mut cut: String = cell.chars().take(width.saturating_sub(1)).collect();
        cut.push('~');
        cut
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    fn render(table: &ParsedTable) -> String {
        let config = ViewerConfig {
            column_width: 80,
            ..ViewerConfig::default()
        };
        let mut viewer = ConsoleViewer::new(Vec::new(), &config);
        viewer.show(table).unwrap();
        String::from_utf8(viewer.into_inner()).unwrap()
    }

    #[test]
    fn test_centered_columns() {
        let table = ParsedTable::new(
            "run.csv",
            strings(&["Timestamp", "J1_Pos"]),
            vec![strings(&["t0", "1,5"])],
        );
        let text = render(&table);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "KUKA Log Data Viewer");
        assert_eq!(lines[2], format!("Timestamp{}J1 Pos", " ".repeat(4)));
        assert_eq!(lines[4], format!("    t0{}1,5", " ".repeat(8)));
        assert_eq!(lines.last().copied(), Some("1 rows"));
    }

    #[test]
    fn test_header_only_shows_zero_rows() {
        let table = ParsedTable::new("run.csv", strings(&["Timestamp", "A"]), Vec::new());
        let text = render(&table);
        assert!(text.ends_with("0 rows\n"));
        assert_eq!(text.lines().count(), 6);
    }

    #[test]
    fn test_fit_truncates() {
        assert_eq!(fit("abcdef", 4), "abc~");
        assert_eq!(fit("abcd", 4), "abcd");
    }
}
