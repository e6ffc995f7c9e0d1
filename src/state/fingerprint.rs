//! Requirements manifest fingerprinting.
//!
//! The dependency install is skipped when the manifest's SHA-256 matches
//! the hash persisted in a one-line marker file. The marker is only
//! rewritten after a successful install, so a failed install always
//! re-runs on the next attempt.

use crate::error::{Result, RigupError};
use sha2::{Digest, Sha256};
use std::fs;
use std::path::Path;

/// Comparison between the manifest's current fingerprint and the marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ManifestStatus {
    /// Stored fingerprint matches; the install can be skipped.
    Unchanged { hash: String },

    /// No marker, or the stored fingerprint differs.
    Changed {
        stored: Option<String>,
        current: String,
    },
}

impl ManifestStatus {
    /// The manifest's current fingerprint, whichever variant.
    pub fn current(&self) -> &str {
        match self {
            ManifestStatus::Unchanged { hash } => hash,
            ManifestStatus::Changed { current, .. } => current,
        }
    }
}

/// Compute the SHA-256 fingerprint of a manifest file.
///
/// A missing manifest is a fatal precondition failure, never a silent skip.
pub fn compute_fingerprint(manifest: &Path) -> Result<String> {
    if !manifest.is_file() {
        return Err(RigupError::Precondition {
            path: manifest.to_path_buf(),
        });
    }

    let content = fs::read(manifest)?;
    let mut hasher = Sha256::new();
    hasher.update(&content);
    Ok(hex::encode(hasher.finalize()))
}

/// Read the stored fingerprint from a marker file.
///
/// Returns `None` for a missing or empty marker; only the first line
/// counts, trailing whitespace ignored.
pub fn read_marker(marker: &Path) -> Option<String> {
    let content = fs::read_to_string(marker).ok()?;
    let line = content.lines().next()?.trim();
    if line.is_empty() {
        None
    } else {
        Some(line.to_string())
    }
}

/// Persist a fingerprint to the marker file.
pub fn write_marker(marker: &Path, hash: &str) -> Result<()> {
    if let Some(parent) = marker.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(marker, format!("{}\n", hash))?;
    Ok(())
}

/// Compare the manifest's fingerprint against the marker.
pub fn manifest_status(manifest: &Path, marker: &Path) -> Result<ManifestStatus> {
    let current = compute_fingerprint(manifest)?;
    match read_marker(marker) {
        Some(stored) if stored == current => Ok(ManifestStatus::Unchanged { hash: current }),
        stored => Ok(ManifestStatus::Changed { stored, current }),
    }
}
