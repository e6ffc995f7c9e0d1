//! Fingerprinted install of the Python dependency manifest.
//!
//! pip inside the emulated runtime is slow enough that re-running it on
//! every container start is painful; the manifest fingerprint makes the
//! unchanged case a pure no-op.

use crate::error::{Result, RigupError};
use crate::shell::command::CommandResult;
use crate::shell::{to_windows_path, Wine};
use crate::state::fingerprint::{manifest_status, write_marker, ManifestStatus};
use crate::steps::ensure::Disposition;
use std::path::Path;

/// Mockable pip operations for [`install_if_changed`].
pub struct PipContext<'a> {
    /// Upgrade pip itself inside the emulated runtime.
    pub upgrade_pip: &'a dyn Fn() -> Result<CommandResult>,

    /// Install every entry of the manifest.
    pub install_manifest: &'a dyn Fn(&Path) -> Result<CommandResult>,
}

/// Install the manifest's packages unless its fingerprint matches the marker.
///
/// The marker is rewritten only after a successful install, so a failed
/// run re-installs next time. A missing manifest is a fatal precondition
/// failure.
pub fn install_if_changed(
    manifest: &Path,
    marker: &Path,
    ctx: &PipContext<'_>,
) -> Result<Disposition> {
    match manifest_status(manifest, marker)? {
        ManifestStatus::Unchanged { hash } => {
            tracing::info!(
                "Skipping installation, requirements unchanged ({})",
                &hash[..12.min(hash.len())]
            );
            Ok(Disposition::Satisfied)
        }
        ManifestStatus::Changed { stored, current } => {
            match &stored {
                Some(old) => tracing::info!(
                    "Requirements changed ({} -> {}), installing",
                    &old[..12.min(old.len())],
                    &current[..12.min(current.len())]
                ),
                None => tracing::info!("No requirements fingerprint found, installing"),
            }

            let result = (ctx.upgrade_pip)()?;
            if !result.success {
                return Err(pip_failure("pip upgrade", &result));
            }

            let result = (ctx.install_manifest)(manifest)?;
            if !result.success {
                return Err(pip_failure("requirements install", &result));
            }

            write_marker(marker, &current)?;
            tracing::info!("Requirements installed, fingerprint updated");
            Ok(Disposition::Installed)
        }
    }
}

/// Upgrade pip inside the wine Python.
pub fn upgrade_pip(wine: &Wine, python_exe: &Path) -> Result<CommandResult> {
    wine.run(
        &python_exe.to_string_lossy(),
        &["-m", "pip", "install", "--upgrade", "pip"],
    )
}

/// Run `pip install -r` on the manifest inside the wine Python.
///
/// The manifest path crosses the host/emulation boundary, so it is
/// translated to its `Z:` drive form.
pub fn pip_install_manifest(
    wine: &Wine,
    python_exe: &Path,
    manifest: &Path,
) -> Result<CommandResult> {
    let windows_manifest = to_windows_path(manifest);
    wine.run(
        &python_exe.to_string_lossy(),
        &["-m", "pip", "install", "-r", &windows_manifest],
    )
}

fn pip_failure(action: &str, result: &CommandResult) -> RigupError {
    let detail = result
        .stderr
        .lines()
        .rev()
        .find(|l| !l.trim().is_empty())
        .unwrap_or("no output")
        .trim();
    RigupError::DependencyInstall {
        message: format!(
            "{} exited with code {:?}: {}",
            action, result.exit_code, detail
        ),
    }
}
