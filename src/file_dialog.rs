use std::path::{Path, PathBuf};
use tracing::{info, warn};

pub const LOG_EXTENSIONS: [&str; 2] = ["csv", "txt"];

/// Whether the path carries one of the extensions the controller writes
pub fn is_log_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map_or(false, |ext| {
            LOG_EXTENSIONS
                .iter()
                .any(|known| ext.eq_ignore_ascii_case(known))
        })
}

/// Use the path from the command line, or ask with a native dialog.
///
/// `None` means the user cancelled.
pub fn get_log_path(arg: Option<PathBuf>) -> Option<PathBuf> {
    let path = match arg {
        Some(path) => path,
        None => pick_log_file()?,
    };

    if !is_log_file(&path) {
        warn!(file = %path.display(), "File does not look like a controller log");
    }
    info!(file = %path.display(), "Selected log file");
    Some(path)
}

/// Filters offered by the file dialog.
///
/// rfd turns each extension into a `*.ext` pattern. Only on Windows does
/// `*.*` also match names without an extension, so elsewhere the catch-all
/// entry is left out rather than hiding those files.
#[cfg(any(feature = "gui", test))]
fn dialog_filters() -> Vec<(&'static str, &'static [&'static str])> {
    let logs: &'static [&'static str] = &LOG_EXTENSIONS;
    let all: &'static [&'static str] = &["*"];

    let mut filters = vec![("Log files", logs)];
    if cfg!(target_os = "windows") {
        filters.push(("All files", all));
    }
    filters
}

#[cfg(feature = "gui")]
fn pick_log_file() -> Option<PathBuf> {
    dialog_filters()
        .into_iter()
        .fold(
            rfd::FileDialog::new().set_title("Select a KUKA Log File"),
            |dialog, (name, extensions)| dialog.add_filter(name, extensions),
        )
        .pick_file()
}

#[cfg(not(feature = "gui"))]
fn pick_log_file() -> Option<PathBuf> {
    warn!("No input file given and this build has no file dialog (enable the gui feature)");
    None
}
