use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{LogParserError, LogResult};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ParserConfig {
    pub input: InputConfig,
    pub output: OutputConfig,
    pub viewer: ViewerConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Field separator of the controller log
    pub delimiter: char,

    /// Name given to the first header column
    pub timestamp_column: String,

    /// Name of the synthetic elapsed-seconds column
    pub cumulative_column: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Appended to the input file stem to build the output file name
    pub suffix: String,

    pub delimiter: char,

    /// Replace decimal commas with periods in data fields
    pub normalize_decimals: bool,

    /// Terminate lines with CRLF instead of LF
    pub crlf: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    pub title: String,

    /// Column width in pixels for the desktop window
    pub column_width: u16,

    pub window_width: f32,
    pub window_height: f32,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            delimiter: '_',
            timestamp_column: "Timestamp".to_string(),
            cumulative_column: "Cumulative_Time_s".to_string(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            suffix: "_parsed.txt".to_string(),
            delimiter: '\t',
            normalize_decimals: true,
            crlf: true,
        }
    }
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            title: "KUKA Log Data Viewer".to_string(),
            column_width: 150,
            window_width: 1200.0,
            window_height: 700.0,
        }
    }
}

impl ViewerConfig {
    /// Column width in terminal cells, roughly one cell per 8 pixels
    pub fn column_cells(&self) -> u16 {
        (self.column_width / 8).max(4)
    }
}

impl ParserConfig {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> LogResult<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            LogParserError::configuration(format!("Failed to read config file: {}", e))
        })?;

        toml::from_str(&content).map_err(|e| {
            LogParserError::configuration(format!("Failed to parse config file: {}", e))
        })
    }

    /// Defaults or the given file, then environment overrides, then validation.
    pub fn load(path: Option<&Path>) -> LogResult<Self> {
        let config = match path {
            Some(path) => Self::load_from_file(path)?,
            None => Self::default(),
        };

        let config = config.apply_env(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Override fields from `KUKA_LOG_*` variables looked up through `lookup`
    pub fn apply_env<F>(mut self, lookup: F) -> LogResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(delimiter) = lookup("KUKA_LOG_INPUT_DELIMITER") {
            let mut chars = delimiter.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => self.input.delimiter = c,
                _ => {
                    return Err(LogParserError::configuration(format!(
                        "KUKA_LOG_INPUT_DELIMITER must be a single character, got {:?}",
                        delimiter
                    )))
                }
            }
        }

        if let Some(suffix) = lookup("KUKA_LOG_OUTPUT_SUFFIX") {
            self.output.suffix = suffix;
        }

        if let Some(normalize) = lookup("KUKA_LOG_NORMALIZE_DECIMALS") {
            self.output.normalize_decimals = parse_flag(&normalize).ok_or_else(|| {
                LogParserError::configuration(format!(
                    "KUKA_LOG_NORMALIZE_DECIMALS must be true or false, got {:?}",
                    normalize
                ))
            })?;
        }

        Ok(self)
    }

    pub fn validate(&self) -> LogResult<()> {
        delimiter_byte(self.input.delimiter)?;
        delimiter_byte(self.output.delimiter)?;

        if self.input.delimiter == self.output.delimiter {
            return Err(LogParserError::configuration(
                "input and output delimiters must differ",
            ));
        }

        if self.output.suffix.is_empty() {
            return Err(LogParserError::configuration("output suffix is empty"));
        }

        Ok(())
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Delimiters must be single-byte for the csv reader and writer
pub fn delimiter_byte(delimiter: char) -> LogResult<u8> {
    if delimiter.is_ascii() && delimiter != '"' && delimiter != '\n' && delimiter != '\r' {
        Ok(delimiter as u8)
    } else {
        Err(LogParserError::configuration(format!(
            "unsupported delimiter {:?}",
            delimiter
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = ParserConfig::default();
        assert_eq!(config.input.delimiter, '_');
        assert_eq!(config.input.timestamp_column, "Timestamp");
        assert_eq!(config.input.cumulative_column, "Cumulative_Time_s");
        assert_eq!(config.output.suffix, "_parsed.txt");
        assert_eq!(config.output.delimiter, '\t');
        assert!(config.output.normalize_decimals);
        assert_eq!(config.viewer.column_cells(), 18);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_serialization() {
        let mut config = ParserConfig::default();
        config.output.suffix = "_clean.tsv".to_string();
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("config.toml");

        std::fs::write(&config_path, toml::to_string_pretty(&config).unwrap()).unwrap();

        let loaded = ParserConfig::load_from_file(&config_path).unwrap();
        assert_eq!(loaded.output.suffix, "_clean.tsv");
        assert_eq!(loaded.input.delimiter, '_');
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("config.toml");
        std::fs::write(&config_path, "[output]\nnormalize_decimals = false\n").unwrap();

        let loaded = ParserConfig::load_from_file(&config_path).unwrap();
        assert!(!loaded.output.normalize_decimals);
        assert_eq!(loaded.output.suffix, "_parsed.txt");
        assert_eq!(loaded.viewer.title, "KUKA Log Data Viewer");
    }

    #[test]
    fn test_env_overrides() {
        let vars: HashMap<&str, &str> = [
            ("KUKA_LOG_INPUT_DELIMITER", ";"),
            ("KUKA_LOG_OUTPUT_SUFFIX", "_out.txt"),
            ("KUKA_LOG_NORMALIZE_DECIMALS", "FALSE"),
        ]
        .into_iter()
        .collect();

        let config = ParserConfig::default()
            .apply_env(|key| vars.get(key).map(|v| v.to_string()))
            .unwrap();
        assert_eq!(config.input.delimiter, ';');
        assert_eq!(config.output.suffix, "_out.txt");
        assert!(!config.output.normalize_decimals);
    }

    #[test]
    fn test_multi_char_env_delimiter_rejected() {
        let err = ParserConfig::default()
            .apply_env(|key| (key == "KUKA_LOG_INPUT_DELIMITER").then(|| "::".to_string()))
            .unwrap_err();
        assert!(matches!(err, LogParserError::Configuration { .. }));
        assert!(err.to_string().contains("KUKA_LOG_INPUT_DELIMITER"));
    }

    #[test]
    fn test_env_normalize_flag_values() {
        let with = |value: &'static str| {
            ParserConfig::default().apply_env(move |key| {
                (key == "KUKA_LOG_NORMALIZE_DECIMALS").then(|| value.to_string())
            })
        };

        assert!(!with("0").unwrap().output.normalize_decimals);
        assert!(!with("no").unwrap().output.normalize_decimals);
        assert!(with("Yes").unwrap().output.normalize_decimals);
        assert!(matches!(
            with("flase"),
            Err(LogParserError::Configuration { .. })
        ));
    }

    #[test]
    fn test_empty_env_suffix_fails_validation() {
        let config = ParserConfig::default()
            .apply_env(|key| (key == "KUKA_LOG_OUTPUT_SUFFIX").then(String::new))
            .unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_bad_delimiters() {
        let mut config = ParserConfig::default();
        config.output.delimiter = '_';
        assert!(config.validate().is_err());

        let mut config = ParserConfig::default();
        config.input.delimiter = 'é';
        assert!(matches!(
            config.validate(),
            Err(LogParserError::Configuration { .. })
        ));
    }
}
