//! Unified status vocabulary for consistent CLI output.
//!
//! `StatusKind` provides a single canonical set of status icons used
//! across the run and status commands.

use super::theme::RigupTheme;

/// Canonical status kinds used across rigup output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusKind {
    /// Artifact installed, or step completed successfully.
    Success,
    /// Step failed.
    Failed,
    /// Step skipped (already satisfied).
    Skipped,
    /// Artifact missing, install pending.
    Pending,
    /// Non-fatal warning.
    Warning,
}

impl StatusKind {
    /// Unicode icon for TTY output.
    pub fn icon(self) -> &'static str {
        match self {
            Self::Success => "✓",
            Self::Failed => "✗",
            Self::Skipped => "○",
            Self::Pending => "◌",
            Self::Warning => "⚠",
        }
    }

    /// Bracketed text for non-TTY output.
    pub fn bracketed(self) -> &'static str {
        match self {
            Self::Success => "[ok]",
            Self::Failed => "[FAIL]",
            Self::Skipped => "[skip]",
            Self::Pending => "[pending]",
            Self::Warning => "[warn]",
        }
    }

    /// Icon styled with the theme's color for this kind.
    pub fn styled(self, theme: &RigupTheme) -> String {
        let style = match self {
            Self::Success => &theme.success,
            Self::Failed => &theme.error,
            Self::Skipped => &theme.dim,
            Self::Pending => &theme.dim,
            Self::Warning => &theme.warning,
        };
        style.apply_to(self.icon()).to_string()
    }
}
