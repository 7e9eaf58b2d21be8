mod fetch;
mod url;

pub use fetch::{HttpFetcher, ReleaseFetcher};
pub use url::ReleaseUrl;

use crate::cache::ToolCache;
use crate::config::RunnerConfig;
use crate::constants::TOOL_NAME;
use crate::otp::RuntimeProbe;
use crate::platform::Platform;
use crate::types::{CacheVersion, RawVersion};
use crate::utils::{print_message, print_status, TagColor};
use anyhow::{bail, Context, Result};
use flate2::read::GzDecoder;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::process::Command;
use tar::Archive;

/// Drives the install pipeline: cache lookup, download-and-extract on a
/// miss, publish to the per-run directory, then a version check of the
/// installed binary. Strictly sequential; the first error aborts the run.
pub struct Installer<'a> {
    pub config: &'a RunnerConfig,
    pub platform: Platform,
    pub cache: ToolCache,
    pub fetcher: &'a dyn ReleaseFetcher,
    pub probe: &'a dyn RuntimeProbe,
}

impl Installer<'_> {
    /// Returns the published directory, now first on the search path for
    /// the rest of the run.
    pub async fn run(&self) -> Result<PathBuf> {
        let raw = &self.config.elp_version;
        let cache_version = CacheVersion::from_raw(raw)?;

        let cache_path = match self.cache.find(TOOL_NAME, &cache_version) {
            Some(path) => {
                tracing::debug!("ELP {raw} (cache version: '{cache_version}') is cached as a tool");
                path
            }
            None => {
                tracing::debug!(
                    "ELP {raw} (cache version: '{cache_version}') is not cached as a tool"
                );
                self.fetch_and_cache(raw, &cache_version).await?
            }
        };

        let published = crate::publish::publish(&cache_path, self.config)?;
        self.report_installed_version(&published)?;
        Ok(published)
    }

    async fn fetch_and_cache(
        &self,
        raw: &RawVersion,
        cache_version: &CacheVersion,
    ) -> Result<PathBuf> {
        let otp = self.probe.otp_major_minor()?;
        let url = ReleaseUrl::elp_release(raw, &self.platform, &otp)?;
        print_message("DOWNLOADING", &url.to_string(), TagColor::Blue);

        std::fs::create_dir_all(&self.config.temp_root)?;
        let scratch = tempfile::tempdir_in(&self.config.temp_root)
            .context("Failed to create a scratch directory under the runner temp root")?;
        let archive_path = scratch.path().join("elp.tar.gz");
        self.fetcher.download(&url, &archive_path).await?;

        let extract_dir = scratch.path().join("extracted");
        extract_tarball(&archive_path, &extract_dir)?;

        self.cache
            .cache_dir(&extract_dir, TOOL_NAME, cache_version)
    }

    /// Invokes `elp version` against the freshly published binary as a
    /// smoke check. A failure here fails the run.
    fn report_installed_version(&self, published: &Path) -> Result<()> {
        let path_env = crate::publish::path_env_with(published)?;
        let output = Command::new(TOOL_NAME)
            .arg("version")
            .env("PATH", &path_env)
            .output()
            .context("Failed to run `elp version`")?;
        if !output.status.success() {
            bail!(
                "`elp version` exited with {}: {}",
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            );
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let version = stdout.strip_suffix('\n').unwrap_or(&stdout);
        tracing::debug!("ELP installed version is '{version}'");
        print_status("INSTALLED", TOOL_NAME, version, TagColor::Green);
        Ok(())
    }
}

fn extract_tarball(archive_path: &Path, dest: &Path) -> Result<()> {
    std::fs::create_dir_all(dest)?;
    let file = File::open(archive_path)
        .with_context(|| format!("Failed to open archive {}", archive_path.display()))?;
    let mut archive = Archive::new(GzDecoder::new(file));
    archive
        .unpack(dest)
        .with_context(|| format!("Failed to extract archive to {}", dest.display()))?;

    print_message("EXTRACTING", &format!("Output: {}", dest.display()), TagColor::Blue);
    Ok(())
}
