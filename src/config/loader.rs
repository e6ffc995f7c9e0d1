//! Configuration file discovery and loading.
//!
//! Configuration is resolved once at process entry:
//!
//! 1. Start from built-in defaults.
//! 2. Merge `rigup.yml` from the project root (or an explicit `--config`
//!    path, which must exist).
//! 3. Apply environment overrides (`WINEPREFIX`, `MT5_API_PORT`).
//! 4. Fill the wine prefix from `$HOME/.wine` if still unset.
//!
//! Relative manifest, marker, and log paths are resolved against the
//! project root so steps can run from any working directory.

use crate::config::schema::RigupConfig;
use crate::error::{Result, RigupError};
use std::fs;
use std::path::{Path, PathBuf};

/// Default config file name looked up in the project root.
pub const CONFIG_FILE: &str = "rigup.yml";

/// Load and finalize configuration for a project root.
///
/// `explicit` is the `--config` path; pointing it at a missing file is an
/// error, while the absence of `rigup.yml` in the root just means defaults.
pub fn load_config(explicit: Option<&Path>, root: &Path) -> Result<RigupConfig> {
    load_config_with_env(explicit, root, |key| std::env::var(key))
}

/// Load configuration with a custom env var lookup function.
///
/// This allows testing overrides without mutating the process environment.
pub fn load_config_with_env<F>(
    explicit: Option<&Path>,
    root: &Path,
    env_fn: F,
) -> Result<RigupConfig>
where
    F: Fn(&str) -> std::result::Result<String, std::env::VarError>,
{
    let mut config = match config_path(explicit, root)? {
        Some(path) => parse_config_file(&path)?,
        None => RigupConfig::default(),
    };

    apply_env_overrides(&mut config, &env_fn);
    resolve_paths(&mut config, root);

    Ok(config)
}

/// Parse a single YAML config file.
pub fn parse_config_file(path: &Path) -> Result<RigupConfig> {
    let content = fs::read_to_string(path)?;
    serde_yaml::from_str(&content).map_err(|e| RigupError::ConfigParse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Resolve which config file to read, if any.
fn config_path(explicit: Option<&Path>, root: &Path) -> Result<Option<PathBuf>> {
    if let Some(path) = explicit {
        if !path.exists() {
            return Err(RigupError::ConfigNotFound {
                path: path.to_path_buf(),
            });
        }
        return Ok(Some(path.to_path_buf()));
    }

    let default = root.join(CONFIG_FILE);
    if default.exists() {
        Ok(Some(default))
    } else {
        Ok(None)
    }
}

fn apply_env_overrides<F>(config: &mut RigupConfig, env_fn: &F)
where
    F: Fn(&str) -> std::result::Result<String, std::env::VarError>,
{
    if config.wine.prefix.is_none() {
        if let Ok(prefix) = env_fn("WINEPREFIX") {
            config.wine.prefix = Some(PathBuf::from(prefix));
        }
    }

    if config.wine.prefix.is_none() {
        if let Ok(home) = env_fn("HOME") {
            config.wine.prefix = Some(PathBuf::from(home).join(".wine"));
        }
    }

    if let Ok(port) = env_fn("MT5_API_PORT") {
        match port.parse::<u16>() {
            Ok(port) => config.api_port = port,
            Err(_) => {
                tracing::warn!("Ignoring non-numeric MT5_API_PORT value: {}", port);
            }
        }
    }
}

/// Anchor relative host-side paths at the project root.
fn resolve_paths(config: &mut RigupConfig, root: &Path) {
    if config.packages.manifest.is_relative() {
        config.packages.manifest = root.join(&config.packages.manifest);
    }
    if config.packages.marker.is_relative() {
        config.packages.marker = root.join(&config.packages.marker);
    }
    if let Some(log_path) = &config.log_path {
        if log_path.is_relative() {
            config.log_path = Some(root.join(log_path));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env::VarError;
    use tempfile::TempDir;

    fn no_env(_: &str) -> std::result::Result<String, VarError> {
        Err(VarError::NotPresent)
    }

    #[test]
    fn missing_default_config_yields_defaults() {
        let temp = TempDir::new().unwrap();
        let config = load_config_with_env(None, temp.path(), no_env).unwrap();
        assert_eq!(config.api_port, 5001);
        assert_eq!(config.wine.binary, "wine");
    }

    #[test]
    fn explicit_missing_config_is_an_error() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("nope.yml");
        let result = load_config_with_env(Some(&missing), temp.path(), no_env);
        assert!(matches!(result, Err(RigupError::ConfigNotFound { .. })));
    }

    #[test]
    fn config_file_in_root_is_picked_up() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(CONFIG_FILE), "api_port: 7001\n").unwrap();

        let config = load_config_with_env(None, temp.path(), no_env).unwrap();
        assert_eq!(config.api_port, 7001);
    }

    #[test]
    fn invalid_yaml_reports_parse_error() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(CONFIG_FILE), "api_port: [not a port\n").unwrap();

        let result = load_config_with_env(None, temp.path(), no_env);
        assert!(matches!(result, Err(RigupError::ConfigParse { .. })));
    }

    #[test]
    fn wineprefix_env_fills_missing_prefix() {
        let temp = TempDir::new().unwrap();
        let config = load_config_with_env(None, temp.path(), |key| {
            if key == "WINEPREFIX" {
                Ok("/srv/prefix".to_string())
            } else {
                Err(VarError::NotPresent)
            }
        })
        .unwrap();

        assert_eq!(config.wine.prefix, Some(PathBuf::from("/srv/prefix")));
    }

    #[test]
    fn file_prefix_wins_over_env() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join(CONFIG_FILE),
            "wine:\n  prefix: /from/file\n",
        )
        .unwrap();

        let config = load_config_with_env(None, temp.path(), |key| {
            if key == "WINEPREFIX" {
                Ok("/from/env".to_string())
            } else {
                Err(VarError::NotPresent)
            }
        })
        .unwrap();

        assert_eq!(config.wine.prefix, Some(PathBuf::from("/from/file")));
    }

    #[test]
    fn home_fallback_used_when_no_prefix_anywhere() {
        let temp = TempDir::new().unwrap();
        let config = load_config_with_env(None, temp.path(), |key| {
            if key == "HOME" {
                Ok("/home/trader".to_string())
            } else {
                Err(VarError::NotPresent)
            }
        })
        .unwrap();

        assert_eq!(config.wine.prefix, Some(PathBuf::from("/home/trader/.wine")));
    }

    #[test]
    fn api_port_env_override() {
        let temp = TempDir::new().unwrap();
        let config = load_config_with_env(None, temp.path(), |key| {
            if key == "MT5_API_PORT" {
                Ok("6001".to_string())
            } else {
                Err(VarError::NotPresent)
            }
        })
        .unwrap();

        assert_eq!(config.api_port, 6001);
    }

    #[test]
    fn bad_api_port_env_is_ignored() {
        let temp = TempDir::new().unwrap();
        let config = load_config_with_env(None, temp.path(), |key| {
            if key == "MT5_API_PORT" {
                Ok("not-a-port".to_string())
            } else {
                Err(VarError::NotPresent)
            }
        })
        .unwrap();

        assert_eq!(config.api_port, 5001);
    }

    #[test]
    fn relative_manifest_and_marker_anchor_at_root() {
        let temp = TempDir::new().unwrap();
        let config = load_config_with_env(None, temp.path(), no_env).unwrap();

        assert_eq!(
            config.packages.manifest,
            temp.path().join("requirements.txt")
        );
        assert_eq!(
            config.packages.marker,
            temp.path().join(".requirements.sha256")
        );
    }

    #[test]
    fn absolute_manifest_left_untouched() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join(CONFIG_FILE),
            "packages:\n  manifest: /app/requirements.txt\n",
        )
        .unwrap();

        let config = load_config_with_env(None, temp.path(), no_env).unwrap();
        assert_eq!(
            config.packages.manifest,
            PathBuf::from("/app/requirements.txt")
        );
    }
}
