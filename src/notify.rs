//! User-facing notifications for the end of each pipeline step.

use std::cell::RefCell;
use std::io::{self, Write};
#[cfg(feature = "gui")]
use tracing::{error, info};

/// Where "File Error", "Save Error" and "Success" messages go
pub trait Notifier {
    fn error(&self, title: &str, message: &str);
    fn info(&self, title: &str, message: &str);
}

/// Prints each notification once as `Title: message`.
///
/// The pipeline already logs every outcome, so nothing is sent to `tracing` here.
#[derive(Debug)]
pub struct ConsoleNotifier<W: Write = io::Stderr> {
    out: RefCell<W>,
}

impl ConsoleNotifier {
    pub fn stderr() -> Self {
        Self::new(io::stderr())
    }
}

impl<W: Write> ConsoleNotifier<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: RefCell::new(out),
        }
    }

    pub fn into_inner(self) -> W {
        self.out.into_inner()
    }

    fn print(&self, title: &str, message: &str) {
        // Nowhere left to report a failed stderr write
        let _ = writeln!(self.out.borrow_mut(), "{}: {}", title, message);
    }
}

impl<W: Write> Notifier for ConsoleNotifier<W> {
    fn error(&self, title: &str, message: &str) {
        self.print(title, message);
    }

    fn info(&self, title: &str, message: &str) {
        self.print(title, message);
    }
}

/// Native message boxes
#[cfg(feature = "gui")]
#[derive(Debug, Default)]
pub struct DialogNotifier;

#[cfg(feature = "gui")]
impl DialogNotifier {
    fn show(&self, level: rfd::MessageLevel, title: &str, message: &str) {
        rfd::MessageDialog::new()
            .set_level(level)
            .set_title(title)
            .set_description(message)
            .set_buttons(rfd::MessageButtons::Ok)
            .show();
    }
}

#[cfg(feature = "gui")]
impl Notifier for DialogNotifier {
    fn error(&self, title: &str, message: &str) {
        error!(title = title, "{}", message.replace('\n', " "));
        self.show(rfd::MessageLevel::Error, title, message);
    }

    fn info(&self, title: &str, message: &str) {
        info!(title = title, "{}", message.replace('\n', " "));
        self.show(rfd::MessageLevel::Info, title, message);
    }
}
