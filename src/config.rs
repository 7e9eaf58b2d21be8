use crate::constants::{
    DEFAULT_RUNNER_ROOT, ELP_VERSION_INPUT, GITHUB_PATH_VAR, RUNNER_TEMP_VAR,
    RUNNER_TOOL_CACHE_VAR,
};
use crate::error::InstallError;
use crate::types::RawVersion;
use std::path::PathBuf;

/// Everything the pipeline reads from the invoking environment, resolved
/// once up front. Later steps take this context explicitly instead of
/// consulting ambient environment state.
#[derive(Debug)]
pub struct RunnerConfig {
    pub elp_version: RawVersion,
    /// Root of the shared, cross-run tool cache (`RUNNER_TOOL_CACHE`).
    pub tool_cache_root: PathBuf,
    /// Per-run scratch root (`RUNNER_TEMP`); also hosts the publish dir.
    pub temp_root: PathBuf,
    /// The Actions path-export file, when running under a workflow.
    pub github_path: Option<PathBuf>,
}

impl RunnerConfig {
    /// Resolves the configuration from the CLI argument and the runner
    /// environment. The version is required; the two runner roots default
    /// to `/tmp` when unset.
    pub fn resolve(cli_version: Option<String>) -> Result<Self, InstallError> {
        let elp_version = cli_version
            .filter(|version| !version.trim().is_empty())
            .or_else(|| action_input(ELP_VERSION_INPUT))
            .map(RawVersion::new)
            .ok_or(InstallError::MissingInput(ELP_VERSION_INPUT))?;
        tracing::debug!("input {ELP_VERSION_INPUT} (required: true) is '{elp_version}'");

        Ok(Self {
            elp_version,
            tool_cache_root: runner_root(RUNNER_TOOL_CACHE_VAR),
            temp_root: runner_root(RUNNER_TEMP_VAR),
            github_path: std::env::var_os(GITHUB_PATH_VAR).map(PathBuf::from),
        })
    }
}

/// Reads a workflow input the way the Actions toolkit does: `INPUT_` plus
/// the input name with spaces replaced by underscores, uppercased.
fn action_input(name: &str) -> Option<String> {
    let var = format!("INPUT_{}", name.replace(' ', "_").to_uppercase());
    std::env::var(var)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn runner_root(var: &str) -> PathBuf {
    std::env::var_os(var)
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_RUNNER_ROOT))
}
