use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::info;
use tracing_subscriber::{
    filter::DynFilterFn, fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer,
    Registry,
};

use crate::error::{LogParserError, LogResult};

/// Logging configuration for the log parser
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub level: String,
    pub log_dir: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            log_dir: None,
        }
    }
}

/// Keeps the non-blocking file writer alive until the process exits
#[must_use]
pub struct LoggingGuard {
    #[cfg(feature = "advanced_logging")]
    _file_guard: Option<tracing_appender::non_blocking::WorkerGuard>,
}

pub fn env_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("kuka_log_parser={},{}", level, level)))
}

/// Initialize the logging system
pub fn init_logging(config: &LoggingConfig) -> LogResult<LoggingGuard> {
    let registry = Registry::default().with(env_filter(&config.level));

    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .compact()
        // Evaluated per event, never cached per callsite
        .with_filter(DynFilterFn::new(|_, _| !console_paused()))
        .boxed();

    #[cfg(feature = "advanced_logging")]
    let guard = {
        let (file_layer, file_guard) = match &config.log_dir {
            Some(dir) => {
                std::fs::create_dir_all(dir)
                    .map_err(|e| LogParserError::file_io(dir.display().to_string(), e))?;
                let file_appender = tracing_appender::rolling::daily(dir, "kuka-log.log");
                let (file_writer, file_guard) = tracing_appender::non_blocking(file_appender);
                let layer = fmt::layer()
                    .with_writer(file_writer)
                    .with_ansi(false)
                    .boxed();
                (Some(layer), Some(file_guard))
            }
            None => (None, None),
        };

        registry
            .with(console_layer)
            .with(file_layer)
            .try_init()
            .map_err(|e| LogParserError::configuration(format!("logging init failed: {}", e)))?;

        LoggingGuard {
            _file_guard: file_guard,
        }
    };

    #[cfg(not(feature = "advanced_logging"))]
    let guard = {
        if let Some(dir) = &config.log_dir {
            eprintln!(
                "File logging to {} needs the advanced_logging feature; using console only",
                dir.display()
            );
        }

        registry
            .with(console_layer)
            .try_init()
            .map_err(|e| LogParserError::configuration(format!("logging init failed: {}", e)))?;

        LoggingGuard {}
    };

    info!("Logging initialized");
    info!("Log level: {}", config.level);

    Ok(guard)
}

static CONSOLE_PAUSED: AtomicBool = AtomicBool::new(false);

pub fn console_paused() -> bool {
    CONSOLE_PAUSED.load(Ordering::Relaxed)
}

/// Silences the stderr layer until dropped; the file layer keeps recording.
///
/// Held while the terminal viewer owns the screen.
#[must_use]
pub struct ConsolePause {
    previous: bool,
}

impl ConsolePause {
    pub fn start() -> Self {
        Self {
            previous: CONSOLE_PAUSED.swap(true, Ordering::Relaxed),
        }
    }
}

impl Drop for ConsolePause {
    fn drop(&mut self) {
        CONSOLE_PAUSED.store(self.previous, Ordering::Relaxed);
    }
}

/// Log build and platform information for debugging
pub fn log_system_info() {
    info!(
        "{} v{} on {} {}",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION"),
        std::env::consts::OS,
        std::env::consts::ARCH
    );

    if let Ok(cwd) = std::env::current_dir() {
        info!("Working directory: {}", cwd.display());
    }
}

/// Performance logging utilities
pub struct PerformanceTimer {
    start: std::time::Instant,
    operation: String,
}

impl PerformanceTimer {
    pub fn start(operation: impl Into<String>) -> Self {
        let operation = operation.into();
        info!("Starting: {}", operation);
        Self {
            start: std::time::Instant::now(),
            operation,
        }
    }

    pub fn checkpoint(&self, checkpoint: &str) {
        let elapsed = self.start.elapsed();
        info!("{} - {}: {}ms", self.operation, checkpoint, elapsed.as_millis());
    }
}

impl Drop for PerformanceTimer {
    fn drop(&mut self) {
        let elapsed = self.start.elapsed();
        info!("Completed {}: {}ms", self.operation, elapsed.as_millis());
    }
}

/// Macro for logging an error with context
#[macro_export]
macro_rules! log_error {
    ($error:expr, $context:expr) => {
        tracing::error!(
            error = %$error,
            context = $context,
            reported = $error.is_reported(),
            "Log parser error occurred"
        );
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = LoggingConfig::default();
        assert_eq!(config.level, "info");
        assert!(config.log_dir.is_none());
    }

    #[test]
    fn test_console_pause_is_scoped() {
        assert!(!console_paused());
        {
            let _outer = ConsolePause::start();
            assert!(console_paused());
            {
                let _inner = ConsolePause::start();
                assert!(console_paused());
            }
            // Nested pause restores the outer state, not "unpaused"
            assert!(console_paused());
        }
        assert!(!console_paused());
    }
}
