use thiserror::Error;

/// Main error type for the KUKA log parser
#[derive(Error, Debug)]
pub enum LogParserError {
    #[error("File I/O error: {path}")]
    FileIO {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("No header line in {path}")]
    EmptyHeader { path: String },

    #[error("Invalid timestamp {value:?} on line {line}")]
    InvalidTimestamp {
        line: u64,
        value: String,
        #[source]
        source: std::num::ParseIntError,
    },

    #[error("Timestamp {millis}ms on line {line} is outside the local time range")]
    TimestampOutOfRange { line: u64, millis: i64 },

    #[error("Malformed record on line {line}")]
    MalformedRecord {
        line: u64,
        #[source]
        source: csv::Error,
    },

    #[error("Could not write {path}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Viewer error: {message}")]
    Viewer { message: String },
}

impl LogParserError {
    /// Create a file I/O error
    pub fn file_io(path: impl Into<String>, source: std::io::Error) -> Self {
        Self::FileIO {
            path: path.into(),
            source,
        }
    }

    /// Create a write error
    pub fn write(path: impl Into<String>, source: std::io::Error) -> Self {
        Self::Write {
            path: path.into(),
            source,
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub fn viewer(message: impl Into<String>) -> Self {
        Self::Viewer {
            message: message.into(),
        }
    }

    /// Whether the user should see a notification for this error.
    ///
    /// A file without a header ends the run silently.
    pub fn is_reported(&self) -> bool {
        !matches!(self, LogParserError::EmptyHeader { .. })
    }

    /// Whether this error came from reading or parsing the input file
    pub fn is_read_failure(&self) -> bool {
        matches!(
            self,
            LogParserError::FileIO { .. }
                | LogParserError::EmptyHeader { .. }
                | LogParserError::InvalidTimestamp { .. }
                | LogParserError::TimestampOutOfRange { .. }
                | LogParserError::MalformedRecord { .. }
        )
    }

    /// Get user-friendly error message for dialogs
    pub fn user_message(&self) -> String {
        match self {
            LogParserError::Write { source, .. } => {
                format!("Could not save the file.\n\nError: {}", source)
            }
            LogParserError::FileIO { source, .. } => {
                format!("Could not read or parse the file.\n\nError: {}", source)
            }
            LogParserError::Configuration { message } => {
                format!("Invalid configuration.\n\nError: {}", message)
            }
            err if err.is_read_failure() => {
                format!("Could not read or parse the file.\n\nError: {}", err)
            }
            err => format!("Something went wrong.\n\nError: {}", err),
        }
    }
}

/// Result type alias for convenience
pub type LogResult<T> = Result<T, LogParserError>;
