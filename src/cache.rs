use crate::fs::copy_dir_all;
use crate::types::CacheVersion;
use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

/// Persistent, cross-run store of extracted tool installations, keyed by
/// (tool name, cache version). Layout mirrors the hosted-runner tool
/// cache: `<root>/<tool>/<version>/` holds the entry and a sibling
/// `<version>.complete` marker, written last, distinguishes a finished
/// registration from a torn one. Entries are never evicted.
#[derive(Debug)]
pub struct ToolCache {
    root: PathBuf,
}

impl ToolCache {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// Looks up a previously cached installation. Side-effect free: a hit
    /// requires both the entry directory and its completion marker.
    pub fn find(&self, tool: &str, version: &CacheVersion) -> Option<PathBuf> {
        let entry = self.entry_dir(tool, version);
        let complete = self.marker_path(tool, version);
        (entry.is_dir() && complete.is_file()).then_some(entry)
    }

    /// Copies `source` into the cache under (tool, version) and marks the
    /// entry complete. Re-registering an existing key replaces it, so the
    /// operation is idempotent from the caller's perspective.
    pub fn cache_dir(
        &self,
        source: &std::path::Path,
        tool: &str,
        version: &CacheVersion,
    ) -> Result<PathBuf> {
        // Marker goes first: if the copy below dies midway, the entry
        // must read as a miss, not a hit on a torn installation.
        let marker = self.marker_path(tool, version);
        if marker.exists() {
            fs::remove_file(&marker)
                .with_context(|| format!("Failed to clear stale cache marker {}", marker.display()))?;
        }

        let entry = self.entry_dir(tool, version);
        if entry.exists() {
            fs::remove_dir_all(&entry)
                .with_context(|| format!("Failed to clear stale cache entry {}", entry.display()))?;
        }
        copy_dir_all(source, &entry)
            .with_context(|| format!("Failed to register {tool} {version} in the tool cache"))?;

        fs::write(&marker, "")
            .with_context(|| format!("Failed to write cache marker {}", marker.display()))?;
        tracing::debug!("cached {tool} {version} at {}", entry.display());
        Ok(entry)
    }

    fn entry_dir(&self, tool: &str, version: &CacheVersion) -> PathBuf {
        self.root.join(tool).join(version.to_string())
    }

    fn marker_path(&self, tool: &str, version: &CacheVersion) -> PathBuf {
        self.root.join(tool).join(format!("{version}.complete"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::RawVersion;
    use tempfile::TempDir;

    fn version(raw: &str) -> CacheVersion {
        CacheVersion::from_raw(&RawVersion::new(raw)).unwrap()
    }

    #[test]
    fn find_misses_on_empty_cache() {
        let root = TempDir::new().unwrap();
        let cache = ToolCache::new(root.path().to_path_buf());
        assert!(cache.find("elp", &version("1-2-3-4")).is_none());
    }

    #[test]
    fn cache_dir_then_find_round_trips() -> Result<()> {
        let root = TempDir::new()?;
        let cache = ToolCache::new(root.path().to_path_buf());
        let source = TempDir::new()?;
        fs::write(source.path().join("elp"), "binary")?;

        let stored = cache.cache_dir(source.path(), "elp", &version("1-2-3-4"))?;
        assert!(stored.join("elp").is_file());

        let found = cache.find("elp", &version("1-2-3-4")).unwrap();
        assert_eq!(found, stored);
        Ok(())
    }

    #[test]
    fn find_requires_completion_marker() -> Result<()> {
        let root = TempDir::new()?;
        let cache = ToolCache::new(root.path().to_path_buf());

        // Entry dir present but no marker: a torn registration.
        let entry = root.path().join("elp").join("1.2.3+4");
        fs::create_dir_all(&entry)?;
        assert!(cache.find("elp", &version("1-2-3-4")).is_none());
        Ok(())
    }

    #[test]
    fn reregistration_replaces_the_entry() -> Result<()> {
        let root = TempDir::new()?;
        let cache = ToolCache::new(root.path().to_path_buf());

        let first = TempDir::new()?;
        fs::write(first.path().join("elp"), "v1")?;
        cache.cache_dir(first.path(), "elp", &version("1-2-3-4"))?;

        let second = TempDir::new()?;
        fs::write(second.path().join("elp"), "v2")?;
        let stored = cache.cache_dir(second.path(), "elp", &version("1-2-3-4"))?;

        assert_eq!(fs::read_to_string(stored.join("elp"))?, "v2");
        Ok(())
    }

    #[test]
    fn failed_registration_clears_the_stale_marker() -> Result<()> {
        let root = TempDir::new()?;
        let cache = ToolCache::new(root.path().to_path_buf());

        // Marker left behind after an external prune of the entry dir.
        fs::create_dir_all(root.path().join("elp"))?;
        fs::write(root.path().join("elp").join("1.2.3+4.complete"), "")?;

        // Registration from a nonexistent source fails partway through.
        let missing_source = root.path().join("no-such-dir");
        assert!(cache
            .cache_dir(&missing_source, "elp", &version("1-2-3-4"))
            .is_err());

        // The stale marker must not resurrect the torn entry as a hit.
        assert!(cache.find("elp", &version("1-2-3-4")).is_none());
        Ok(())
    }

    #[test]
    fn distinct_versions_do_not_collide() -> Result<()> {
        let root = TempDir::new()?;
        let cache = ToolCache::new(root.path().to_path_buf());
        let source = TempDir::new()?;
        fs::write(source.path().join("elp"), "binary")?;

        cache.cache_dir(source.path(), "elp", &version("1-2-3-4"))?;
        assert!(cache.find("elp", &version("1-2-3-5")).is_none());
        Ok(())
    }
}
