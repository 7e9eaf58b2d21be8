use crate::config::RunnerConfig;
use crate::constants::{PUBLISH_SUBDIR, TOOL_NAME};
use crate::fs::{copy_dir_all, recreate_dir};
use anyhow::{Context, Result};
use std::ffi::OsString;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Copies the resolved cache entry into the deterministic per-run
/// location `<temp_root>/.setup-elp/elp` and exports it for later
/// workflow steps. The fixed path (rather than the cache path itself)
/// keeps tooling predictable on self-hosted, long-lived runners where
/// the cache location varies.
pub fn publish(cache_path: &Path, config: &RunnerConfig) -> Result<PathBuf> {
    let publish_dir = config.temp_root.join(PUBLISH_SUBDIR).join(TOOL_NAME);
    recreate_dir(&publish_dir)?;
    copy_dir_all(cache_path, &publish_dir)
        .with_context(|| format!("Failed to publish {TOOL_NAME} to {}", publish_dir.display()))?;

    if let Some(github_path) = &config.github_path {
        add_path(github_path, &publish_dir)?;
    }
    tracing::debug!("published {TOOL_NAME} at {}", publish_dir.display());
    Ok(publish_dir)
}

/// Appends `dir` to the `GITHUB_PATH` file, which prepends it to the
/// executable search path of every subsequent workflow step.
fn add_path(github_path: &Path, dir: &Path) -> Result<()> {
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(github_path)
        .with_context(|| format!("Failed to open {}", github_path.display()))?;
    writeln!(file, "{}", dir.display())?;
    Ok(())
}

/// Builds a `PATH` value with `dir` prepended, for subprocesses spawned
/// by the remainder of this run.
pub fn path_env_with(dir: &Path) -> Result<OsString> {
    let mut paths = vec![dir.to_path_buf()];
    if let Some(current) = std::env::var_os("PATH") {
        paths.extend(std::env::split_paths(&current));
    }
    std::env::join_paths(paths).context("Failed to build PATH")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::RawVersion;
    use std::fs;
    use tempfile::TempDir;

    fn config(temp_root: &Path, github_path: Option<PathBuf>) -> RunnerConfig {
        RunnerConfig {
            elp_version: RawVersion::new("1-2-3-4"),
            tool_cache_root: temp_root.join("cache"),
            temp_root: temp_root.to_path_buf(),
            github_path,
        }
    }

    #[test]
    fn publishes_to_the_deterministic_dir() -> Result<()> {
        let scratch = TempDir::new()?;
        let cached = TempDir::new()?;
        fs::write(cached.path().join("elp"), "binary")?;

        let published = publish(cached.path(), &config(scratch.path(), None))?;
        assert_eq!(published, scratch.path().join(".setup-elp").join("elp"));
        assert!(published.join("elp").is_file());
        Ok(())
    }

    #[test]
    fn republishing_overwrites_prior_contents() -> Result<()> {
        let scratch = TempDir::new()?;
        let config = config(scratch.path(), None);

        let stale = scratch.path().join(".setup-elp").join("elp");
        fs::create_dir_all(&stale)?;
        fs::write(stale.join("leftover"), "old")?;

        let cached = TempDir::new()?;
        fs::write(cached.path().join("elp"), "binary")?;
        let published = publish(cached.path(), &config)?;

        assert!(published.join("elp").is_file());
        assert!(!published.join("leftover").exists());
        Ok(())
    }

    #[test]
    fn records_publish_dir_in_github_path() -> Result<()> {
        let scratch = TempDir::new()?;
        let path_file = scratch.path().join("github_path");
        let cached = TempDir::new()?;
        fs::write(cached.path().join("elp"), "binary")?;

        let published = publish(cached.path(), &config(scratch.path(), Some(path_file.clone())))?;

        let recorded = fs::read_to_string(&path_file)?;
        assert_eq!(recorded.trim(), published.display().to_string());
        Ok(())
    }

    #[test]
    fn path_env_puts_dir_first() -> Result<()> {
        let dir = TempDir::new()?;
        let path = path_env_with(dir.path())?;
        let first = std::env::split_paths(&path).next().unwrap();
        assert_eq!(first, dir.path());
        Ok(())
    }
}
