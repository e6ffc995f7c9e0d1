//! Provisioning steps.
//!
//! Each step is an idempotent check-then-act unit: probe for the target
//! artifact, install it if absent, verify by re-probing. Steps run
//! strictly in sequence (terminal, then python, then packages); the run
//! stops at the first failure.
//!
//! - [`ensure`] - the generic probe/install/verify engine
//! - [`terminal`] - MetaTrader 5 terminal under wine
//! - [`python`] - Windows Python runtime under wine
//! - [`packages`] - fingerprinted pip install of the requirements manifest
//! - [`runner`] - sequential execution and outcome reporting

pub mod ensure;
pub mod packages;
pub mod python;
pub mod runner;
pub mod terminal;

use crate::error::{Result, RigupError};
use std::path::PathBuf;

pub use ensure::{ensure_installed, Disposition, ProvisioningStep};
pub use packages::{install_if_changed, PipContext};
pub use python::PythonStep;
pub use runner::{ProbeReport, Runner, StepOutcome};
pub use terminal::TerminalStep;

/// The provisioning steps, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepKind {
    Terminal,
    Python,
    Packages,
}

impl StepKind {
    /// All steps in canonical execution order.
    pub const ALL: [StepKind; 3] = [StepKind::Terminal, StepKind::Python, StepKind::Packages];

    /// The step's CLI name.
    pub fn name(self) -> &'static str {
        match self {
            StepKind::Terminal => "terminal",
            StepKind::Python => "python",
            StepKind::Packages => "packages",
        }
    }

    /// Short human description.
    pub fn description(self) -> &'static str {
        match self {
            StepKind::Terminal => "MetaTrader 5 terminal",
            StepKind::Python => "Windows Python runtime",
            StepKind::Packages => "Python dependencies",
        }
    }

    /// Look a step up by CLI name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|k| k.name() == name)
    }
}

impl std::fmt::Display for StepKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Resolve `--only`/`--skip` selections into an ordered step list.
///
/// Selection never reorders: steps always run in canonical order because
/// later steps depend on earlier ones (pip needs python, python needs the
/// prefix the terminal installer created). Unknown names are an error.
pub fn select_steps(only: &[String], skip: &[String]) -> Result<Vec<StepKind>> {
    for name in only.iter().chain(skip.iter()) {
        if StepKind::from_name(name).is_none() {
            return Err(RigupError::UnknownStep { name: name.clone() });
        }
    }

    let selected = StepKind::ALL
        .into_iter()
        .filter(|kind| only.is_empty() || only.iter().any(|n| n == kind.name()))
        .filter(|kind| !skip.iter().any(|n| n == kind.name()))
        .collect();

    Ok(selected)
}

/// Where a downloaded installer lands before it runs.
///
/// Uses the last URL path segment as the file name, so failed cleanups
/// are at least recognizable in the temp directory.
pub fn installer_cache_path(url: &str, fallback: &str) -> PathBuf {
    let name = url
        .rsplit('/')
        .next()
        .filter(|s| !s.is_empty() && !s.contains('?'))
        .unwrap_or(fallback);
    std::env::temp_dir().join(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_names_round_trip() {
        for kind in StepKind::ALL {
            assert_eq!(StepKind::from_name(kind.name()), Some(kind));
        }
        assert_eq!(StepKind::from_name("nonsense"), None);
    }

    #[test]
    fn select_defaults_to_all_in_order() {
        let steps = select_steps(&[], &[]).unwrap();
        assert_eq!(
            steps,
            vec![StepKind::Terminal, StepKind::Python, StepKind::Packages]
        );
    }

    #[test]
    fn select_only_filters() {
        let steps = select_steps(&["packages".to_string()], &[]).unwrap();
        assert_eq!(steps, vec![StepKind::Packages]);
    }

    #[test]
    fn select_only_preserves_canonical_order() {
        let steps = select_steps(
            &["packages".to_string(), "terminal".to_string()],
            &[],
        )
        .unwrap();
        assert_eq!(steps, vec![StepKind::Terminal, StepKind::Packages]);
    }

    #[test]
    fn select_skip_removes() {
        let steps = select_steps(&[], &["python".to_string()]).unwrap();
        assert_eq!(steps, vec![StepKind::Terminal, StepKind::Packages]);
    }

    #[test]
    fn select_unknown_name_is_an_error() {
        let result = select_steps(&["terminull".to_string()], &[]);
        assert!(matches!(result, Err(RigupError::UnknownStep { .. })));

        let result = select_steps(&[], &["pyton".to_string()]);
        assert!(matches!(result, Err(RigupError::UnknownStep { .. })));
    }

    #[test]
    fn installer_path_uses_url_segment() {
        let path = installer_cache_path(
            "https://download.mql5.com/cdn/web/metaquotes.software.corp/mt5/mt5setup.exe",
            "installer.exe",
        );
        assert_eq!(path.file_name().unwrap(), "mt5setup.exe");
    }

    #[test]
    fn installer_path_falls_back_on_odd_urls() {
        let path = installer_cache_path("https://example.com/get?id=7", "installer.exe");
        assert_eq!(path.file_name().unwrap(), "installer.exe");
    }
}
