// Table viewers - one trait, a backend per surface

pub mod console;
#[cfg(feature = "gui")]
pub mod gui;
#[cfg(feature = "tui")]
pub mod tui;

use clap::ValueEnum;

use crate::config::ViewerConfig;
use crate::error::{LogParserError, LogResult};
use crate::model::ParsedTable;

pub use console::ConsoleViewer;

/// Shows a parsed table and returns once the user has closed it
pub trait TableViewer {
    fn show(&mut self, table: &ParsedTable) -> LogResult<()>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ViewerKind {
    /// Scrollable table in the terminal
    Tui,
    /// Desktop window
    Gui,
    /// Print the table to stdout
    Console,
    /// Skip display and go straight to saving
    None,
}

impl Default for ViewerKind {
    fn default() -> Self {
        if cfg!(feature = "gui") {
            ViewerKind::Gui
        } else if cfg!(feature = "tui") {
            ViewerKind::Tui
        } else {
            ViewerKind::Console
        }
    }
}

/// Skips display entirely
#[derive(Debug, Default)]
pub struct NoViewer;

impl TableViewer for NoViewer {
    fn show(&mut self, _table: &ParsedTable) -> LogResult<()> {
        Ok(())
    }
}

/// Build the viewer for `kind`, failing if its feature was not compiled in
pub fn build(kind: ViewerKind, config: &ViewerConfig) -> LogResult<Box<dyn TableViewer>> {
    match kind {
        ViewerKind::Console => Ok(Box::new(ConsoleViewer::stdout(config))),
        ViewerKind::None => Ok(Box::new(NoViewer)),
        #[cfg(feature = "tui")]
        ViewerKind::Tui => Ok(Box::new(tui::TerminalViewer::new(config))),
        #[cfg(feature = "gui")]
        ViewerKind::Gui => Ok(Box::new(gui::WindowViewer::new(config))),
        #[allow(unreachable_patterns)]
        other => Err(LogParserError::configuration(format!(
            "viewer {:?} is not available in this build",
            other
        ))),
    }
}
