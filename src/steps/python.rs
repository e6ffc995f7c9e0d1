//! Windows Python runtime installation.

use crate::config::RigupConfig;
use crate::error::Result;
use crate::fetch::Downloader;
use crate::shell::Wine;
use crate::steps::ensure::ProvisioningStep;
use crate::steps::installer_cache_path;
use crate::ui::{DownloadProgress, Output, StepSpinner};
use regex::Regex;
use std::fs;
use std::sync::OnceLock;

/// Installs the Windows Python runtime into the wine prefix.
///
/// Unlike the terminal, presence alone is not enough: the runtime must
/// report the configured version, since the trading library pins its
/// supported interpreter range.
pub struct PythonStep<'a> {
    config: &'a RigupConfig,
    wine: &'a Wine,
    downloader: &'a Downloader,
    output: &'a Output,
}

impl<'a> PythonStep<'a> {
    /// Create the python step.
    pub fn new(
        config: &'a RigupConfig,
        wine: &'a Wine,
        downloader: &'a Downloader,
        output: &'a Output,
    ) -> Self {
        Self {
            config,
            wine,
            downloader,
            output,
        }
    }
}

impl ProvisioningStep for PythonStep<'_> {
    fn name(&self) -> &str {
        "python"
    }

    fn description(&self) -> &str {
        "Windows Python runtime"
    }

    fn probe(&self) -> bool {
        let exe = self.config.python_exe();
        if !exe.is_file() {
            return false;
        }

        // Depending on the release, Windows Python prints its version on
        // stdout or stderr; check both.
        match self.wine.run(&exe.to_string_lossy(), &["--version"]) {
            Ok(result) if result.success => {
                let combined = format!("{}{}", result.stdout, result.stderr);
                match extract_version(&combined) {
                    Some(version) if version == self.config.python.version => true,
                    Some(version) => {
                        tracing::debug!(
                            "Found Python {} but {} is required",
                            version,
                            self.config.python.version
                        );
                        false
                    }
                    None => false,
                }
            }
            Ok(_) => false,
            Err(e) => {
                tracing::debug!("Python probe could not run: {}", e);
                false
            }
        }
    }

    fn install(&self) -> Result<()> {
        let url = &self.config.python.installer_url;
        let installer = installer_cache_path(url, "python-setup.exe");

        let progress = DownloadProgress::new(
            "Downloading Python installer",
            self.output.mode().shows_progress(),
        );
        self.downloader.download_to(url, &installer, Some(&|written, total| {
            progress.update(written, total);
        }))?;
        progress.finish();

        let args: Vec<&str> = self
            .config
            .python
            .installer_args
            .iter()
            .map(String::as_str)
            .collect();

        let spinner = if self.output.mode().shows_progress() {
            StepSpinner::new("Running Python installer")
        } else {
            StepSpinner::hidden()
        };
        let result = match self.wine.run(&installer.to_string_lossy(), &args) {
            Ok(result) => {
                spinner.finish_success("Python installer finished");
                result
            }
            Err(e) => {
                spinner.finish_error("Python installer could not run");
                return Err(e);
            }
        };

        tracing::debug!(
            "Python installer exited with code {:?} (ignored)",
            result.exit_code
        );

        if let Err(e) = fs::remove_file(&installer) {
            tracing::warn!(
                "Could not remove installer {}: {}",
                installer.display(),
                e
            );
        }

        Ok(())
    }
}

/// Pull a `major.minor.patch` version out of `python --version` output.
pub fn extract_version(output: &str) -> Option<String> {
    static VERSION_RE: OnceLock<Regex> = OnceLock::new();
    let re = VERSION_RE
        .get_or_init(|| Regex::new(r"Python (\d+\.\d+\.\d+)").expect("valid version regex"));
    re.captures(output)
        .map(|caps| caps[1].to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::OutputMode;
    use tempfile::TempDir;

    #[test]
    fn extracts_version_from_stdout_format() {
        assert_eq!(
            extract_version("Python 3.11.9\r\n"),
            Some("3.11.9".to_string())
        );
    }

    #[test]
    fn extracts_version_amid_wine_noise() {
        let noisy = "wine: created the configuration directory\nPython 3.11.9\n";
        assert_eq!(extract_version(noisy), Some("3.11.9".to_string()));
    }

    #[test]
    fn no_version_in_garbage() {
        assert_eq!(extract_version("command not found"), None);
        assert_eq!(extract_version(""), None);
    }

    #[test]
    fn probe_false_when_exe_missing() {
        let temp = TempDir::new().unwrap();
        let mut config = RigupConfig::default();
        config.wine.prefix = Some(temp.path().to_path_buf());

        let wine = Wine::new("wine", temp.path());
        let downloader = Downloader::new();
        let output = Output::new(OutputMode::Quiet);

        let step = PythonStep::new(&config, &wine, &downloader, &output);
        assert!(!step.probe());
    }

    #[test]
    fn probe_false_when_wine_cannot_run() {
        let temp = TempDir::new().unwrap();
        let mut config = RigupConfig::default();
        config.wine.prefix = Some(temp.path().to_path_buf());

        // Executable file exists, but the "wine" binary does not
        let exe = config.python_exe();
        fs::create_dir_all(exe.parent().unwrap()).unwrap();
        fs::write(&exe, "MZ").unwrap();

        let wine = Wine::new("rigup-no-such-wine", temp.path());
        let downloader = Downloader::new();
        let output = Output::new(OutputMode::Quiet);

        let step = PythonStep::new(&config, &wine, &downloader, &output);
        assert!(!step.probe());
    }
}
