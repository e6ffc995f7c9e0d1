//! rigup - Provisioning automation for Wine-hosted trading environments.
//!
//! rigup replaces the ad-hoc shell scripts that set up a MetaTrader 5
//! terminal and a Windows Python runtime inside a wine prefix, then
//! install the Python trading dependencies. Every step is idempotent:
//! probe first, install only when absent, verify by re-probing.
//!
//! # Modules
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Configuration loading and schema
//! - [`error`] - Error types and result aliases
//! - [`fetch`] - Installer downloads
//! - [`shell`] - Subprocess execution and wine invocation
//! - [`state`] - Requirements fingerprint persistence
//! - [`steps`] - Provisioning steps and the sequential runner
//! - [`ui`] - Terminal output and progress indicators
//!
//! # Example
//!
//! ```
//! use rigup::state::{compute_fingerprint, manifest_status, ManifestStatus};
//! use tempfile::TempDir;
//! use std::fs;
//!
//! let temp = TempDir::new().unwrap();
//! let manifest = temp.path().join("requirements.txt");
//! fs::write(&manifest, "MetaTrader5==5.0.45\n").unwrap();
//!
//! // No marker yet: the manifest counts as changed
//! let status = manifest_status(&manifest, &temp.path().join("marker")).unwrap();
//! assert!(matches!(status, ManifestStatus::Changed { stored: None, .. }));
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod fetch;
pub mod shell;
pub mod state;
pub mod steps;
pub mod ui;

pub use error::{Result, RigupError};
