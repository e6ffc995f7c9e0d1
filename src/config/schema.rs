//! Configuration schema definitions for rigup.
//!
//! This module contains the struct definitions that map to the YAML
//! configuration file format. All values have defaults mirroring the
//! standard MetaTrader-under-Wine container layout, so a config file is
//! only needed to deviate from it.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Root configuration structure for rigup.yml.
///
/// Constructed once at startup and passed by reference into each
/// provisioning step; never mutated afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RigupConfig {
    /// Wine compatibility layer settings.
    pub wine: WineSettings,

    /// Trading terminal settings.
    pub terminal: TerminalSettings,

    /// Windows Python runtime settings.
    pub python: PythonSettings,

    /// Python dependency settings.
    pub packages: PackagesSettings,

    /// Port the downstream terminal bridge listens on.
    /// Overridden by `MT5_API_PORT`.
    #[serde(default = "default_api_port")]
    pub api_port: u16,

    /// Log file appended to in addition to stderr output.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_path: Option<PathBuf>,
}

impl Default for RigupConfig {
    fn default() -> Self {
        Self {
            wine: WineSettings::default(),
            terminal: TerminalSettings::default(),
            python: PythonSettings::default(),
            packages: PackagesSettings::default(),
            api_port: default_api_port(),
            log_path: None,
        }
    }
}

impl RigupConfig {
    /// Wine prefix directory. The loader guarantees this is populated
    /// (from the file, `WINEPREFIX`, or `$HOME/.wine`); the fallback here
    /// only covers hand-built configs in tests.
    pub fn wine_prefix(&self) -> &Path {
        self.wine
            .prefix
            .as_deref()
            .unwrap_or_else(|| Path::new(".wine"))
    }

    /// Absolute path of the terminal executable inside the prefix.
    pub fn terminal_exe(&self) -> PathBuf {
        self.wine_prefix().join(&self.terminal.exe_path)
    }

    /// Absolute path of the Windows Python executable inside the prefix.
    pub fn python_exe(&self) -> PathBuf {
        self.wine_prefix().join(&self.python.exe_path)
    }
}

/// Wine compatibility layer settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WineSettings {
    /// Wine executable name or path.
    #[serde(default = "default_wine_binary")]
    pub binary: String,

    /// Wine prefix directory. Populated by the loader when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prefix: Option<PathBuf>,
}

impl Default for WineSettings {
    fn default() -> Self {
        Self {
            binary: default_wine_binary(),
            prefix: None,
        }
    }
}

/// Trading terminal settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TerminalSettings {
    /// Terminal executable path, relative to the wine prefix.
    #[serde(default = "default_terminal_exe")]
    pub exe_path: PathBuf,

    /// Installer download URL.
    #[serde(default = "default_terminal_installer_url")]
    pub installer_url: String,

    /// Arguments for the silent installer run.
    #[serde(default = "default_terminal_installer_args")]
    pub installer_args: Vec<String>,
}

impl Default for TerminalSettings {
    fn default() -> Self {
        Self {
            exe_path: default_terminal_exe(),
            installer_url: default_terminal_installer_url(),
            installer_args: default_terminal_installer_args(),
        }
    }
}

/// Windows Python runtime settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PythonSettings {
    /// Version the installed runtime must report.
    #[serde(default = "default_python_version")]
    pub version: String,

    /// Python executable path, relative to the wine prefix.
    #[serde(default = "default_python_exe")]
    pub exe_path: PathBuf,

    /// Installer download URL.
    #[serde(default = "default_python_installer_url")]
    pub installer_url: String,

    /// Arguments for the silent installer run.
    #[serde(default = "default_python_installer_args")]
    pub installer_args: Vec<String>,
}

impl Default for PythonSettings {
    fn default() -> Self {
        Self {
            version: default_python_version(),
            exe_path: default_python_exe(),
            installer_url: default_python_installer_url(),
            installer_args: default_python_installer_args(),
        }
    }
}

/// Python dependency settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PackagesSettings {
    /// Requirements manifest consumed by pip.
    #[serde(default = "default_manifest")]
    pub manifest: PathBuf,

    /// Marker file holding the fingerprint of the last installed manifest.
    #[serde(default = "default_marker")]
    pub marker: PathBuf,
}

impl Default for PackagesSettings {
    fn default() -> Self {
        Self {
            manifest: default_manifest(),
            marker: default_marker(),
        }
    }
}

fn default_wine_binary() -> String {
    "wine".to_string()
}

fn default_terminal_exe() -> PathBuf {
    PathBuf::from("drive_c/Program Files/MetaTrader 5/terminal64.exe")
}

fn default_terminal_installer_url() -> String {
    "https://download.mql5.com/cdn/web/metaquotes.software.corp/mt5/mt5setup.exe".to_string()
}

fn default_terminal_installer_args() -> Vec<String> {
    vec!["/auto".to_string()]
}

fn default_python_version() -> String {
    "3.11.9".to_string()
}

fn default_python_exe() -> PathBuf {
    PathBuf::from("drive_c/Program Files/Python311/python.exe")
}

fn default_python_installer_url() -> String {
    "https://www.python.org/ftp/python/3.11.9/python-3.11.9-amd64.exe".to_string()
}

fn default_python_installer_args() -> Vec<String> {
    vec![
        "/quiet".to_string(),
        "InstallAllUsers=1".to_string(),
        "PrependPath=1".to_string(),
    ]
}

fn default_manifest() -> PathBuf {
    PathBuf::from("requirements.txt")
}

fn default_marker() -> PathBuf {
    PathBuf::from(".requirements.sha256")
}

fn default_api_port() -> u16 {
    5001
}
