//! MetaTrader 5 terminal installation.

use crate::config::RigupConfig;
use crate::error::Result;
use crate::fetch::Downloader;
use crate::shell::Wine;
use crate::steps::ensure::ProvisioningStep;
use crate::steps::installer_cache_path;
use crate::ui::{DownloadProgress, Output, StepSpinner};
use std::fs;

/// Installs the trading terminal into the wine prefix.
pub struct TerminalStep<'a> {
    config: &'a RigupConfig,
    wine: &'a Wine,
    downloader: &'a Downloader,
    output: &'a Output,
}

impl<'a> TerminalStep<'a> {
    /// Create the terminal step.
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

impl ProvisioningStep for TerminalStep<'_> {
    fn name(&self) -> &str {
        "terminal"
    }

    fn description(&self) -> &str {
        "MetaTrader 5 terminal"
    }

    fn probe(&self) -> bool {
        self.config.terminal_exe().is_file()
    }

    fn install(&self) -> Result<()> {
        let url = &self.config.terminal.installer_url;
        let installer = installer_cache_path(url, "mt5setup.exe");

        let progress = DownloadProgress::new(
            "Downloading terminal installer",
            self.output.mode().shows_progress(),
        );
        self.downloader.download_to(url, &installer, Some(&|written, total| {
            progress.update(written, total);
        }))?;
        progress.finish();

        let args: Vec<&str> = self
            .config
            .terminal
            .installer_args
            .iter()
            .map(String::as_str)
            .collect();

        let spinner = if self.output.mode().shows_progress() {
            StepSpinner::new("Running terminal installer")
        } else {
            StepSpinner::hidden()
        };
        let result = match self.wine.run(&installer.to_string_lossy(), &args) {
            Ok(result) => {
                spinner.finish_success("Terminal installer finished");
                result
            }
            Err(e) => {
                spinner.finish_error("Terminal installer could not run");
                return Err(e);
            }
        };

        // The installer's exit status under wine is advisory at best;
        // the presence probe decides. Keep the code around for diagnosis.
        tracing::debug!(
            "Terminal installer exited with code {:?} (ignored)",
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::OutputMode;
    use tempfile::TempDir;

    fn test_config(prefix: &std::path::Path) -> RigupConfig {
        let mut config = RigupConfig::default();
        config.wine.prefix = Some(prefix.to_path_buf());
        config
    }

    #[test]
    fn probe_false_for_empty_prefix() {
        let temp = TempDir::new().unwrap();
        let config = test_config(temp.path());
        let wine = Wine::new("wine", temp.path());
        let downloader = Downloader::new();
        let output = Output::new(OutputMode::Quiet);

        let step = TerminalStep::new(&config, &wine, &downloader, &output);
        assert!(!step.probe());
    }

    #[test]
    fn probe_true_when_exe_present() {
        let temp = TempDir::new().unwrap();
        let config = test_config(temp.path());

        let exe = config.terminal_exe();
        fs::create_dir_all(exe.parent().unwrap()).unwrap();
        fs::write(&exe, "MZ").unwrap();

        let wine = Wine::new("wine", temp.path());
        let downloader = Downloader::new();
        let output = Output::new(OutputMode::Quiet);

        let step = TerminalStep::new(&config, &wine, &downloader, &output);
        assert!(step.probe());
    }

    #[test]
    fn failed_download_leaves_no_installer() {
        let temp = TempDir::new().unwrap();
        let mut config = test_config(temp.path());
        config.terminal.installer_url = "http://127.0.0.1:9/mt5setup.exe".to_string();

        let wine = Wine::new("wine", temp.path());
        let downloader = Downloader::new();
        let output = Output::new(OutputMode::Quiet);

        let step = TerminalStep::new(&config, &wine, &downloader, &output);
        assert!(step.install().is_err());
        assert!(!installer_cache_path(&config.terminal.installer_url, "mt5setup.exe").exists());
        // Nothing was installed either
        assert!(!step.probe());
    }
}
