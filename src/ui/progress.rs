//! Progress indicators for downloads and installer runs.

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

use super::theme::RigupTheme;

/// A spinner shown while a step works (installer run, pip install).
pub struct StepSpinner {
    bar: ProgressBar,
}

impl StepSpinner {
    /// Create a new spinner with a message.
    pub fn new(message: &str) -> Self {
        let bar = ProgressBar::new_spinner();
        bar.set_style(
            ProgressStyle::default_spinner()
                .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏")
                .template("{spinner:.cyan} {msg}")
                .unwrap(),
        );
        bar.set_message(message.to_string());
        bar.enable_steady_tick(Duration::from_millis(80));

        Self { bar }
    }

    /// Create a spinner that doesn't show (for quiet mode).
    pub fn hidden() -> Self {
        Self {
            bar: ProgressBar::hidden(),
        }
    }

    /// Update the message.
    pub fn set_message(&self, msg: &str) {
        self.bar.set_message(msg.to_string());
    }

    /// Finish with a success line.
    pub fn finish_success(self, msg: &str) {
        let theme = RigupTheme::new();
        self.bar
            .set_style(ProgressStyle::default_spinner().template("{msg}").unwrap());
        self.bar.finish_with_message(theme.format_success(msg));
    }

    /// Finish with an error line.
    pub fn finish_error(self, msg: &str) {
        let theme = RigupTheme::new();
        self.bar
            .set_style(ProgressStyle::default_spinner().template("{msg}").unwrap());
        self.bar.finish_with_message(theme.format_error(msg));
    }

    /// Finish with a skipped line.
    pub fn finish_skipped(self, msg: &str) {
        let theme = RigupTheme::new();
        self.bar
            .set_style(ProgressStyle::default_spinner().template("{msg}").unwrap());
        self.bar.finish_with_message(theme.format_skipped(msg));
    }

    /// Remove the spinner without a summary line.
    pub fn finish_clear(self) {
        self.bar.finish_and_clear();
    }
}

/// A byte-count progress bar for installer downloads.
pub struct DownloadProgress {
    bar: ProgressBar,
}

impl DownloadProgress {
    /// Create a download progress display.
    ///
    /// Starts as a spinner and switches to a bar once the total size
    /// is known from the response headers.
    pub fn new(message: &str, enabled: bool) -> Self {
        let bar = if enabled {
            let bar = ProgressBar::new_spinner();
            bar.set_style(
                ProgressStyle::default_spinner()
                    .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏")
                    .template("{spinner:.cyan} {msg} {bytes}")
                    .unwrap(),
            );
            bar.set_message(message.to_string());
            bar.enable_steady_tick(Duration::from_millis(80));
            bar
        } else {
            ProgressBar::hidden()
        };

        Self { bar }
    }

    /// Report progress; switches to a percentage bar when total is known.
    pub fn update(&self, written: u64, total: Option<u64>) {
        if let Some(total) = total {
            if self.bar.length() != Some(total) {
                self.bar.set_length(total);
                self.bar.set_style(
                    ProgressStyle::default_bar()
                        .template("{msg} [{bar:30.cyan/dim}] {bytes}/{total_bytes}")
                        .unwrap()
                        .progress_chars("=> "),
                );
            }
        }
        self.bar.set_position(written);
    }

    /// Remove the progress display.
    pub fn finish(self) {
        self.bar.finish_and_clear();
    }
}
