//! Wine compatibility layer invocation.
//!
//! Every Windows-side program runs through [`Wine::run`], which pins
//! `WINEPREFIX` and suppresses wine's own diagnostics via `WINEDEBUG=-all`
//! (respecting an explicit `WINEDEBUG` already in the environment).
//! Wine's exit status for installers is notoriously unreliable, so callers
//! treat it as advisory and verify results by probing the prefix instead.

use crate::error::Result;
use crate::shell::command::{run, CommandOptions, CommandResult};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Handle for invoking programs inside a wine prefix.
#[derive(Debug, Clone)]
pub struct Wine {
    binary: String,
    prefix: PathBuf,
}

impl Wine {
    /// Create a handle for a wine binary and prefix directory.
    pub fn new(binary: impl Into<String>, prefix: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
            prefix: prefix.into(),
        }
    }

    /// The prefix directory this handle targets.
    pub fn prefix(&self) -> &Path {
        &self.prefix
    }

    /// Run a Windows program under wine, capturing output.
    pub fn run(&self, program: &str, args: &[&str]) -> Result<CommandResult> {
        let mut full_args = vec![program];
        full_args.extend_from_slice(args);

        let options = CommandOptions {
            env: self.env(),
            capture_stdout: true,
            capture_stderr: true,
            ..Default::default()
        };

        run(&self.binary, &full_args, &options)
    }

    fn env(&self) -> HashMap<String, String> {
        let mut env = HashMap::new();
        env.insert(
            "WINEPREFIX".to_string(),
            self.prefix.to_string_lossy().to_string(),
        );
        env.insert(
            "WINEDEBUG".to_string(),
            std::env::var("WINEDEBUG").unwrap_or_else(|_| "-all".to_string()),
        );
        env
    }
}

/// Translate a host path into the Windows form wine exposes it under.
///
/// Wine maps the host root to the `Z:` drive, so `/tmp/requirements.txt`
/// becomes `Z:\tmp\requirements.txt`. Windows-side programs (pip in
/// particular) cannot open unix-style paths.
pub fn to_windows_path(path: &Path) -> String {
    let mut result = String::from("Z:");
    for component in path.to_string_lossy().split('/') {
        if component.is_empty() {
            continue;
        }
        result.push('\\');
        result.push_str(component);
    }
    result
}
