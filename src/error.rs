//! Error types for rigup operations.
//!
//! This module defines [`RigupError`], the primary error type used throughout
//! the application, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Use `RigupError` for domain-specific errors that need distinct handling
//! - Use `anyhow::Error` (via `RigupError::Other`) for unexpected errors
//! - Every failure is fatal to the current provisioning step: no retry,
//!   no rollback, log and exit non-zero

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for rigup operations.
#[derive(Debug, Error)]
pub enum RigupError {
    /// Installer download failed (network or transfer error).
    #[error("Download failed for {url}: {message}")]
    Download { url: String, message: String },

    /// Post-install probe still reports the artifact as absent.
    #[error("Verification failed for '{step}': {message}")]
    InstallVerification { step: String, message: String },

    /// Package manager returned failure while installing the manifest.
    #[error("Dependency install failed: {message}")]
    DependencyInstall { message: String },

    /// A required input file is missing.
    #[error("Missing required file: {path}")]
    Precondition { path: PathBuf },

    /// Subprocess could not be spawned or was killed.
    #[error("Command failed with exit code {code:?}: {command}")]
    CommandFailed { command: String, code: Option<i32> },

    /// Configuration file not found at an explicitly given location.
    #[error("Configuration not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Failed to parse configuration file.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParse { path: PathBuf, message: String },

    /// A step name given on the command line does not exist.
    #[error("Unknown step: {name}")]
    UnknownStep { name: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for rigup operations.
pub type Result<T> = std::result::Result<T, RigupError>;
