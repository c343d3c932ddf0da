use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use tracing::{debug, info, warn};

use super::resolver::Resolver;
use super::types::RawExtraction;

/// Resolver backed by the yt-dlp binary. Runs a metadata-only extraction and
/// never downloads media.
pub struct YtDlpResolver {
    timeout: Duration,
}

impl YtDlpResolver {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    pub async fn test_availability() -> bool {
        match tokio::process::Command::new("yt-dlp")
            .arg("--version")
            .output()
            .await
        {
            Ok(output) => {
                if output.status.success() {
                    let version = String::from_utf8_lossy(&output.stdout);
                    info!("yt-dlp is available, version: {}", version.trim());
                    true
                } else {
                    warn!("yt-dlp command failed");
                    false
                }
            }
            Err(e) => {
                warn!("yt-dlp not found: {}", e);
                false
            }
        }
    }
}

#[async_trait]
impl Resolver for YtDlpResolver {
    fn name(&self) -> &'static str {
        "yt-dlp"
    }

    async fn resolve(&self, url: &str) -> Result<RawExtraction> {
        debug!("Resolving formats with yt-dlp for: {}", url);

        let output = tokio::time::timeout(
            self.timeout,
            tokio::process::Command::new("yt-dlp")
                .arg("--dump-json")
                .arg("--no-download")
                .arg("--no-warnings")
                .arg(url)
                .output(),
        )
        .await
        .context("Format resolution timed out")?
        .context("Failed to run yt-dlp")?;

        if !output.status.success() {
            let error = String::from_utf8_lossy(&output.stderr);
            return Err(anyhow::anyhow!(
                "Format resolution failed: {}",
                error.trim()
            ));
        }

        let json_str = String::from_utf8_lossy(&output.stdout);
        let extraction: RawExtraction =
            serde_json::from_str(&json_str).context("Failed to parse yt-dlp output")?;

        debug!(
            "yt-dlp returned {} formats for: {}",
            extraction.formats.len(),
            url
        );

        Ok(extraction)
    }
}
