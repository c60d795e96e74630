//! Console status display.

use std::time::Duration;

use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use crate::bridge::StatusSink;

/// Status sink rendering pipeline messages on a spinner line.
pub struct ConsoleStatus {
    spinner: ProgressBar,
}

impl ConsoleStatus {
    pub fn new() -> Self {
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::with_template("{spinner:.cyan} {msg}")
                .expect("valid spinner template"),
        );
        spinner.enable_steady_tick(Duration::from_millis(120));
        Self { spinner }
    }

    /// Stop ticking and leave the last message on screen.
    pub fn finish(&self) {
        self.spinner.finish();
    }
}

impl Default for ConsoleStatus {
    fn default() -> Self {
        Self::new()
    }
}

impl StatusSink for ConsoleStatus {
    fn set_status(&self, message: &str, is_error: bool) {
        if is_error {
            self.spinner
                .println(format!("{} {message}", style("!").yellow()));
        }
        self.spinner.set_message(message.to_string());
    }
}
