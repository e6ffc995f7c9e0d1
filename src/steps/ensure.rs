//! The probe/install/verify engine.
//!
//! Installer exit codes under the compatibility layer are unreliable, so
//! success is decided by re-running the probe after the install action,
//! never by what the installer reported.

use crate::error::{Result, RigupError};

/// Disposition of a completed step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    /// Probe succeeded up front; nothing was downloaded or installed.
    Satisfied,

    /// The install action ran and the re-probe confirmed it.
    Installed,
}

/// A single idempotent provisioning step.
pub trait ProvisioningStep {
    /// CLI name of the step.
    fn name(&self) -> &str;

    /// Short human description.
    fn description(&self) -> &str;

    /// Side-effect-free presence check. "Cannot invoke" counts as absent.
    fn probe(&self) -> bool;

    /// Fetch and install the artifact. Must not decide success itself;
    /// the engine re-probes afterwards.
    fn install(&self) -> Result<()>;
}

/// Run a step's check-then-act sequence.
///
/// Present → no-op. Absent → install, then re-probe; a still-failing
/// probe is an [`RigupError::InstallVerification`].
pub fn ensure_installed(step: &dyn ProvisioningStep) -> Result<Disposition> {
    if step.probe() {
        tracing::info!("{} already installed", step.description());
        return Ok(Disposition::Satisfied);
    }

    tracing::info!("{} not found, installing", step.description());
    step.install()?;

    if step.probe() {
        tracing::info!("{} installed", step.description());
        Ok(Disposition::Installed)
    } else {
        Err(RigupError::InstallVerification {
            step: step.name().to_string(),
            message: format!("{} still absent after install", step.description()),
        })
    }
}
