use clap::Parser;
use std::path::PathBuf;

use crate::config::ParserConfig;
use crate::error::LogResult;
use crate::logging::LoggingConfig;
use crate::viewer::ViewerKind;

#[derive(Debug, Parser)]
#[command(name = "kuka-log")]
#[command(about = "Convert KUKA controller logs: readable timestamps, elapsed time, tab-separated copy")]
#[command(version)]
pub struct Cli {
    /// Controller log to parse; opens a file dialog when omitted
    #[cfg_attr(not(feature = "gui"), arg(required = true))]
    pub input: Option<PathBuf>,

    /// Output file (optional, defaults to <input>_parsed.txt)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// How to show the parsed table
    #[arg(long, value_enum, default_value_t = ViewerKind::default())]
    pub viewer: ViewerKind,

    /// TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Field separator of the input log
    #[arg(long)]
    pub delimiter: Option<char>,

    /// Keep decimal commas in the output
    #[arg(long)]
    pub keep_commas: bool,

    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// Directory for rolling log files
    #[arg(long)]
    pub log_dir: Option<PathBuf>,
}

impl Cli {
    /// Configuration from file and environment, with CLI flags on top
    pub fn parser_config(&self) -> LogResult<ParserConfig> {
        let mut config = ParserConfig::load(self.config.as_deref())?;

        if let Some(delimiter) = self.delimiter {
            config.input.delimiter = delimiter;
        }
        if self.keep_commas {
            config.output.normalize_decimals = false;
        }

        config.validate()?;
        Ok(config)
    }

    pub fn logging_config(&self) -> LoggingConfig {
        LoggingConfig {
            level: self.log_level.clone(),
            log_dir: self.log_dir.clone(),
        }
    }
}
