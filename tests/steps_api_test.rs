//! Integration tests for the provisioning step API.

use rigup::error::{Result, RigupError};
use rigup::shell::command::CommandResult;
use rigup::state::{compute_fingerprint, read_marker};
use rigup::steps::{ensure_installed, install_if_changed, Disposition, PipContext, ProvisioningStep};
use std::cell::Cell;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tempfile::TempDir;

/// A step whose artifact is a plain file, like the terminal probe.
struct FileArtifactStep {
    artifact: PathBuf,
    installs: Cell<u32>,
    install_creates_artifact: bool,
}

impl FileArtifactStep {
    fn new(artifact: PathBuf, install_creates_artifact: bool) -> Self {
        Self {
            artifact,
            installs: Cell::new(0),
            install_creates_artifact,
        }
    }
}

impl ProvisioningStep for FileArtifactStep {
    fn name(&self) -> &str {
        "artifact"
    }

    fn description(&self) -> &str {
        "test artifact"
    }

    fn probe(&self) -> bool {
        self.artifact.is_file()
    }

    fn install(&self) -> Result<()> {
        self.installs.set(self.installs.get() + 1);
        if self.install_creates_artifact {
            fs::write(&self.artifact, "installed")?;
        }
        Ok(())
    }
}

#[test]
fn ensure_installed_is_idempotent() {
    let temp = TempDir::new().unwrap();
    let step = FileArtifactStep::new(temp.path().join("terminal64.exe"), true);

    assert_eq!(ensure_installed(&step).unwrap(), Disposition::Installed);
    assert_eq!(ensure_installed(&step).unwrap(), Disposition::Satisfied);
    assert_eq!(ensure_installed(&step).unwrap(), Disposition::Satisfied);

    // Install ran exactly once across the three runs
    assert_eq!(step.installs.get(), 1);
}

#[test]
fn ensure_installed_detects_ineffective_installer() {
    let temp = TempDir::new().unwrap();
    let step = FileArtifactStep::new(temp.path().join("terminal64.exe"), false);

    let result = ensure_installed(&step);
    assert!(matches!(
        result,
        Err(RigupError::InstallVerification { .. })
    ));
}

fn ok_result() -> CommandResult {
    CommandResult::success(String::new(), String::new(), Duration::ZERO)
}

#[test]
fn manifest_change_reinstalls_once_and_tracks_hashes() {
    let temp = TempDir::new().unwrap();
    let manifest = temp.path().join("requirements.txt");
    let marker = temp.path().join(".requirements.sha256");

    let installs = Cell::new(0u32);
    let upgrade = || Ok(ok_result());
    let install = |_: &Path| {
        installs.set(installs.get() + 1);
        Ok(ok_result())
    };
    let ctx = PipContext {
        upgrade_pip: &upgrade,
        install_manifest: &install,
    };

    // First manifest version installs and records its fingerprint
    fs::write(&manifest, "MetaTrader5==5.0.45\n").unwrap();
    assert_eq!(
        install_if_changed(&manifest, &marker, &ctx).unwrap(),
        Disposition::Installed
    );
    let first_hash = read_marker(&marker).unwrap();
    assert_eq!(first_hash, compute_fingerprint(&manifest).unwrap());

    // Unchanged rerun does nothing
    assert_eq!(
        install_if_changed(&manifest, &marker, &ctx).unwrap(),
        Disposition::Satisfied
    );
    assert_eq!(installs.get(), 1);

    // Edit reinstalls and moves the marker to the new fingerprint
    fs::write(&manifest, "MetaTrader5==5.0.47\nnumpy==1.26.4\n").unwrap();
    assert_eq!(
        install_if_changed(&manifest, &marker, &ctx).unwrap(),
        Disposition::Installed
    );
    assert_eq!(installs.get(), 2);
    let second_hash = read_marker(&marker).unwrap();
    assert_ne!(second_hash, first_hash);
    assert_eq!(second_hash, compute_fingerprint(&manifest).unwrap());
}

#[test]
fn failed_pip_leaves_old_fingerprint_in_place() {
    let temp = TempDir::new().unwrap();
    let manifest = temp.path().join("requirements.txt");
    let marker = temp.path().join(".requirements.sha256");

    let good_upgrade = || Ok(ok_result());
    let good_install = |_: &Path| Ok(ok_result());
    fs::write(&manifest, "MetaTrader5==5.0.45\n").unwrap();
    install_if_changed(
        &manifest,
        &marker,
        &PipContext {
            upgrade_pip: &good_upgrade,
            install_manifest: &good_install,
        },
    )
    .unwrap();
    let old_hash = read_marker(&marker).unwrap();

    // Change the manifest, then fail the install
    fs::write(&manifest, "MetaTrader5==5.0.47\n").unwrap();
    let failing_install = |_: &Path| {
        Ok(CommandResult::failure(
            Some(1),
            String::new(),
            "ERROR: network unreachable".to_string(),
            Duration::ZERO,
        ))
    };
    let result = install_if_changed(
        &manifest,
        &marker,
        &PipContext {
            upgrade_pip: &good_upgrade,
            install_manifest: &failing_install,
        },
    );

    assert!(matches!(result, Err(RigupError::DependencyInstall { .. })));
    assert_eq!(read_marker(&marker), Some(old_hash));
}
