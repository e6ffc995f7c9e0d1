//! Configuration loading and schema for rigup.
//!
//! - Schema definitions in [`schema`]
//! - File discovery, env overrides, and path resolution in [`loader`]
//!
//! # Example
//!
//! ```
//! use rigup::config::load_config;
//! use tempfile::TempDir;
//! use std::fs;
//!
//! let temp = TempDir::new().unwrap();
//! fs::write(temp.path().join("rigup.yml"), "wine:\n  binary: wine64").unwrap();
//!
//! let config = load_config(None, temp.path()).unwrap();
//! assert_eq!(config.wine.binary, "wine64");
//! ```

pub mod loader;
pub mod schema;

pub use loader::{load_config, load_config_with_env, parse_config_file, CONFIG_FILE};
pub use schema::{PackagesSettings, PythonSettings, RigupConfig, TerminalSettings, WineSettings};
