use super::url::ReleaseUrl;
use anyhow::{Context, Result};
use futures_util::StreamExt;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;
use tokio::io::AsyncWriteExt;

/// Downloads release archives. The production implementation streams
/// over HTTPS; tests substitute a local fixture and count calls.
#[async_trait::async_trait]
pub trait ReleaseFetcher {
    async fn download(&self, url: &ReleaseUrl, dest: &Path) -> Result<()>;
}

pub struct HttpFetcher;

#[async_trait::async_trait]
impl ReleaseFetcher for HttpFetcher {
    async fn download(&self, url: &ReleaseUrl, dest: &Path) -> Result<()> {
        let response = reqwest::get(url.as_url().clone())
            .await
            .context("Failed to initiate download")?
            .error_for_status()
            .context("Download request failed, file not found")?;

        let total = response.content_length().unwrap_or(0);
        let pb = ProgressBar::new(total);
        pb.set_style(ProgressStyle::with_template(
            "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {bytes}/{total_bytes} ({eta})",
        )?);

        let mut file = tokio::fs::File::create(dest)
            .await
            .with_context(|| format!("Failed to create {}", dest.display()))?;
        let mut stream = response.bytes_stream();

        while let Some(chunk) = stream.next().await {
            let chunk = chunk?;
            file.write_all(&chunk).await?;
            pb.inc(chunk.len() as u64);
        }
        file.flush().await?;

        pb.finish_with_message("Download complete");
        Ok(())
    }
}
