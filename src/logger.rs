//! Release log output.
//!
//! The publish step reports progress through a [Logger] taking pre-formatted
//! arguments, so callers write `logger.log(format_args!("Add {} ...", file))`.
//! Debug diagnostics go through the `log` facade instead.

use std::fmt;
use std::sync::Mutex;

use crate::ui;

/// Sink for user-facing progress lines
pub trait Logger: Send + Sync {
    fn log(&self, args: fmt::Arguments<'_>);
}

/// Prints progress lines to stdout as status messages
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleLogger;

impl Logger for ConsoleLogger {
    fn log(&self, args: fmt::Arguments<'_>) {
        ui::display_status(&args.to_string());
    }
}

/// Collects progress lines in memory
#[derive(Debug, Default)]
pub struct RecordingLogger {
    lines: Mutex<Vec<String>>,
}

impl RecordingLogger {
    pub fn new() -> Self {
        Self::default()
    }

    /// All lines logged so far, oldest first
    pub fn lines(&self) -> Vec<String> {
        self.lines
            .lock()
            .map(|lines| lines.clone())
            .unwrap_or_default()
    }
}

impl Logger for RecordingLogger {
    fn log(&self, args: fmt::Arguments<'_>) {
        if let Ok(mut lines) = self.lines.lock() {
            lines.push(args.to_string());
        }
    }
}
