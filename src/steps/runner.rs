//! Sequential step execution and outcome reporting.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::Path;
use std::time::{Duration, Instant};

use crate::config::RigupConfig;
use crate::error::Result;
use crate::fetch::Downloader;
use crate::shell::Wine;
use crate::state::fingerprint::{manifest_status, ManifestStatus};
use crate::steps::ensure::{ensure_installed, Disposition, ProvisioningStep};
use crate::steps::packages::{self, install_if_changed, PipContext};
use crate::steps::{PythonStep, StepKind, TerminalStep};
use crate::ui::{Output, StatusKind};

/// Result of running one provisioning step.
#[derive(Debug)]
pub struct StepOutcome {
    /// Step name.
    pub step: String,

    /// How the step concluded, if it did.
    pub disposition: Option<Disposition>,

    /// Error message, if the step failed.
    pub error: Option<String>,

    /// How long the step took.
    pub duration: Duration,

    /// When the step finished.
    pub finished_at: DateTime<Utc>,
}

impl StepOutcome {
    /// Whether this step concluded without error.
    pub fn succeeded(&self) -> bool {
        self.error.is_none()
    }
}

/// Probe result for the status command; no installs happen.
#[derive(Debug, Clone, Serialize)]
pub struct ProbeReport {
    /// Step name.
    pub step: String,

    /// Whether the probe found the artifact satisfied.
    pub satisfied: bool,

    /// Human-readable probe detail.
    pub detail: String,
}

/// Executes provisioning steps strictly in sequence.
///
/// The run stops at the first failure; later steps depend on earlier
/// ones, so continuing past a failure only produces noise.
pub struct Runner<'a> {
    config: &'a RigupConfig,
    output: &'a Output,
    wine: Wine,
    downloader: Downloader,
}

impl<'a> Runner<'a> {
    /// Create a runner for a resolved configuration.
    pub fn new(config: &'a RigupConfig, output: &'a Output) -> Self {
        let wine = Wine::new(config.wine.binary.clone(), config.wine_prefix());
        Self {
            config,
            output,
            wine,
            downloader: Downloader::new(),
        }
    }

    /// Run the given steps in order, stopping at the first failure.
    pub fn run(&self, kinds: &[StepKind]) -> Vec<StepOutcome> {
        let mut outcomes = Vec::new();

        for &kind in kinds {
            let start = Instant::now();
            match self.run_step(kind) {
                Ok(disposition) => {
                    let (status, msg) = match disposition {
                        Disposition::Satisfied => (
                            StatusKind::Skipped,
                            format!("{} already installed", kind.description()),
                        ),
                        Disposition::Installed => (
                            StatusKind::Success,
                            format!("{} installed", kind.description()),
                        ),
                    };
                    self.output.status_line(status, &msg);
                    outcomes.push(StepOutcome {
                        step: kind.name().to_string(),
                        disposition: Some(disposition),
                        error: None,
                        duration: start.elapsed(),
                        finished_at: Utc::now(),
                    });
                }
                Err(e) => {
                    tracing::error!("Step '{}' failed: {}", kind.name(), e);
                    self.output
                        .error(&format!("{} failed: {}", kind.description(), e));
                    outcomes.push(StepOutcome {
                        step: kind.name().to_string(),
                        disposition: None,
                        error: Some(e.to_string()),
                        duration: start.elapsed(),
                        finished_at: Utc::now(),
                    });
                    break;
                }
            }
        }

        outcomes
    }

    fn run_step(&self, kind: StepKind) -> Result<Disposition> {
        match kind {
            StepKind::Terminal => ensure_installed(&TerminalStep::new(
                self.config,
                &self.wine,
                &self.downloader,
                self.output,
            )),
            StepKind::Python => ensure_installed(&PythonStep::new(
                self.config,
                &self.wine,
                &self.downloader,
                self.output,
            )),
            StepKind::Packages => {
                let python_exe = self.config.python_exe();
                let upgrade = || packages::upgrade_pip(&self.wine, &python_exe);
                let install =
                    |manifest: &Path| packages::pip_install_manifest(&self.wine, &python_exe, manifest);
                install_if_changed(
                    &self.config.packages.manifest,
                    &self.config.packages.marker,
                    &PipContext {
                        upgrade_pip: &upgrade,
                        install_manifest: &install,
                    },
                )
            }
        }
    }

    /// Probe each step without installing anything.
    pub fn probe_all(&self, kinds: &[StepKind]) -> Vec<ProbeReport> {
        kinds.iter().map(|&kind| self.probe_step(kind)).collect()
    }

    fn probe_step(&self, kind: StepKind) -> ProbeReport {
        match kind {
            StepKind::Terminal => {
                let step =
                    TerminalStep::new(self.config, &self.wine, &self.downloader, self.output);
                let satisfied = step.probe();
                let detail = if satisfied {
                    format!("found {}", self.config.terminal_exe().display())
                } else {
                    "not installed".to_string()
                };
                ProbeReport {
                    step: kind.name().to_string(),
                    satisfied,
                    detail,
                }
            }
            StepKind::Python => {
                let step = PythonStep::new(self.config, &self.wine, &self.downloader, self.output);
                let satisfied = step.probe();
                let detail = if satisfied {
                    format!("Python {} present", self.config.python.version)
                } else {
                    "not installed or wrong version".to_string()
                };
                ProbeReport {
                    step: kind.name().to_string(),
                    satisfied,
                    detail,
                }
            }
            StepKind::Packages => {
                let (satisfied, detail) = match manifest_status(
                    &self.config.packages.manifest,
                    &self.config.packages.marker,
                ) {
                    Ok(ManifestStatus::Unchanged { .. }) => {
                        (true, "requirements up to date".to_string())
                    }
                    Ok(ManifestStatus::Changed { stored: Some(_), .. }) => {
                        (false, "requirements changed, install pending".to_string())
                    }
                    Ok(ManifestStatus::Changed { stored: None, .. }) => {
                        (false, "never installed".to_string())
                    }
                    Err(_) => (
                        false,
                        format!(
                            "manifest missing: {}",
                            self.config.packages.manifest.display()
                        ),
                    ),
                };
                ProbeReport {
                    step: kind.name().to_string(),
                    satisfied,
                    detail,
                }
            }
        }
    }
}
