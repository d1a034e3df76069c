// Public module exports for the binary crate
pub mod app;
pub mod cli;
pub mod config;
pub mod error;
pub mod file_dialog;
pub mod logging;
pub mod model;
pub mod notify;
pub mod parser;
pub mod viewer;
pub mod writer;

pub use app::{Pipeline, RunOutcome};
pub use config::ParserConfig;
pub use error::{LogParserError, LogResult};
pub use model::{LogRecord, ParsedTable};
pub use parser::LogParser;
pub use writer::{TableWriter, WriteSummary};
