//! Output mode and writer.

use std::str::FromStr;

use super::icons::StatusKind;
use super::theme::RigupTheme;

/// Output verbosity mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Show all output including subprocess output.
    Verbose,
    /// Show progress and status only.
    #[default]
    Normal,
    /// Show nothing except errors.
    Quiet,
}

impl FromStr for OutputMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "verbose" => Ok(Self::Verbose),
            "normal" => Ok(Self::Normal),
            "quiet" => Ok(Self::Quiet),
            _ => Err(format!("unknown output mode: {}", s)),
        }
    }
}

impl OutputMode {
    /// Check if this mode shows progress indicators.
    pub fn shows_progress(&self) -> bool {
        matches!(self, Self::Verbose | Self::Normal)
    }

    /// Check if this mode shows status messages.
    pub fn shows_status(&self) -> bool {
        !matches!(self, Self::Quiet)
    }
}

/// Output writer that respects the output mode.
#[derive(Debug)]
pub struct Output {
    mode: OutputMode,
    theme: RigupTheme,
}

impl Output {
    /// Create a new output writer.
    pub fn new(mode: OutputMode) -> Self {
        Self {
            mode,
            theme: RigupTheme::new(),
        }
    }

    /// Get the output mode.
    pub fn mode(&self) -> OutputMode {
        self.mode
    }

    /// Get the theme.
    pub fn theme(&self) -> &RigupTheme {
        &self.theme
    }

    /// Write a line if the mode allows status messages.
    pub fn println(&self, msg: &str) {
        if self.mode.shows_status() {
            println!("{}", msg);
        }
    }

    /// Write a status line with an icon.
    pub fn status_line(&self, kind: StatusKind, msg: &str) {
        if self.mode.shows_status() {
            println!("{} {}", kind.styled(&self.theme), msg);
        }
    }

    /// Write a warning. Shown in every mode except quiet.
    pub fn warning(&self, msg: &str) {
        if self.mode.shows_status() {
            eprintln!(
                "{} {}",
                StatusKind::Warning.styled(&self.theme),
                self.theme.warning.apply_to(msg)
            );
        }
    }

    /// Write an error. Always shown.
    pub fn error(&self, msg: &str) {
        eprintln!("{}", self.theme.format_error(msg));
    }
}
