use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::config::ParserConfig;
use crate::log_error;
use crate::model::ParsedTable;
use crate::notify::Notifier;
use crate::parser::LogParser;
use crate::viewer::TableViewer;
use crate::writer::{TableWriter, WriteSummary};

/// How a single run ended
#[derive(Debug, Clone, PartialEq)]
pub enum RunOutcome {
    /// Parsed, shown and saved
    Saved(WriteSummary),
    /// Parsed and shown, but the copy could not be written
    SaveFailed { path: PathBuf },
    /// Nothing was shown or saved
    ParseFailed,
}

/// parse -> display -> save, once per input file
pub struct Pipeline<'a> {
    config: &'a ParserConfig,
    viewer: &'a mut dyn TableViewer,
    notifier: &'a dyn Notifier,
}

impl<'a> Pipeline<'a> {
    pub fn new(
        config: &'a ParserConfig,
        viewer: &'a mut dyn TableViewer,
        notifier: &'a dyn Notifier,
    ) -> Self {
        Self {
            config,
            viewer,
            notifier,
        }
    }

    /// Run all three steps; `output` overrides the derived `_parsed.txt` path.
    pub fn run(&mut self, input: &Path, output: Option<PathBuf>) -> RunOutcome {
        let table = match self.parse(input) {
            Some(table) => table,
            None => return RunOutcome::ParseFailed,
        };

        self.display(&table);

        let writer = TableWriter::new(self.config.output.clone());
        let output = output.unwrap_or_else(|| writer.output_path_for(table.source()));
        self.save(&writer, &table, output)
    }

    fn parse(&self, input: &Path) -> Option<ParsedTable> {
        match LogParser::new(self.config.input.clone()).parse_file(input) {
            Ok(table) => Some(table),
            Err(err) => {
                log_error!(err, "parse");
                if err.is_reported() {
                    self.notifier.error("File Error", &err.user_message());
                }
                None
            }
        }
    }

    fn display(&mut self, table: &ParsedTable) {
        // A broken viewer should not cost the user the exported file
        if let Err(err) = self.viewer.show(table) {
            warn!(error = %err, "Viewer failed, continuing to save");
        }
    }

    fn save(&self, writer: &TableWriter, table: &ParsedTable, output: PathBuf) -> RunOutcome {
        match writer.save(table, &output) {
            Ok(summary) => {
                info!(
                    output = %summary.path.display(),
                    rows = summary.rows_written,
                    "Saved tab-separated copy"
                );
                self.notifier.info(
                    "Success",
                    &format!("Successfully created data file at:\n{}", summary.path.display()),
                );
                RunOutcome::Saved(summary)
            }
            Err(err) => {
                log_error!(err, "save");
                self.notifier.error("Save Error", &err.user_message());
                RunOutcome::SaveFailed { path: output }
            }
        }
    }
}
