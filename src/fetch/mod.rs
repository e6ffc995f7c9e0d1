//! Installer downloads.
//!
//! Provides a blocking fetch-to-file client for installer binaries.
//! A failed transfer never leaves a partial file behind: the destination
//! is removed before the error propagates.

use crate::error::{Result, RigupError};
use reqwest::blocking::Client;
use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::Path;
use std::time::Duration;

/// Progress callback: bytes downloaded so far, total if known.
pub type ProgressFn<'a> = &'a dyn Fn(u64, Option<u64>);

/// Downloads installer binaries over HTTP/HTTPS.
pub struct Downloader {
    client: Client,
}

impl Downloader {
    /// Create a downloader with a 30-second connect timeout and no
    /// overall deadline (installers are tens of megabytes).
    pub fn new() -> Self {
        Self {
            client: Client::builder()
                .user_agent("rigup")
                .connect_timeout(Duration::from_secs(30))
                .timeout(None)
                .build()
                .expect("Failed to build HTTP client"),
        }
    }

    /// Download a URL to a file, reporting progress along the way.
    ///
    /// Returns the number of bytes written.
    pub fn download_to(
        &self,
        url: &str,
        dest: &Path,
        progress: Option<ProgressFn>,
    ) -> Result<u64> {
        let result = self.try_download(url, dest, progress);
        if result.is_err() {
            // No partial artifact may survive a failed transfer
            let _ = fs::remove_file(dest);
        }
        result
    }

    fn try_download(
        &self,
        url: &str,
        dest: &Path,
        progress: Option<ProgressFn>,
    ) -> Result<u64> {
        let mut response = self
            .client
            .get(url)
            .send()
            .map_err(|e| RigupError::Download {
                url: url.to_string(),
                message: e.to_string(),
            })?;

        if !response.status().is_success() {
            return Err(RigupError::Download {
                url: url.to_string(),
                message: format!("HTTP {}", response.status()),
            });
        }

        let total = response.content_length();
        let mut file = File::create(dest)?;
        let mut buffer = [0u8; 64 * 1024];
        let mut written: u64 = 0;

        loop {
            let n = response.read(&mut buffer).map_err(|e| RigupError::Download {
                url: url.to_string(),
                message: e.to_string(),
            })?;
            if n == 0 {
                break;
            }
            file.write_all(&buffer[..n])?;
            written += n as u64;
            if let Some(progress) = progress {
                progress(written, total);
            }
        }

        file.flush()?;
        tracing::debug!("Downloaded {} bytes from {}", written, url);
        Ok(written)
    }
}

impl Default for Downloader {
    fn default() -> Self {
        Self::new()
    }
}
