use thiserror::Error;

/// Failure kinds that deserve their own shape instead of a generic
/// `anyhow` chain. Everything here is fatal; the run aborts on the
/// first one raised.
#[derive(Debug, Error)]
pub enum InstallError {
    #[error("Input required and not supplied: {0}")]
    MissingInput(&'static str),

    #[error("Unknown <arch>:<platform> '{observed}'. Must be one of [{supported}]")]
    UnsupportedPlatform { observed: String, supported: String },

    #[error("Unparseable ELP version '{raw}': {reason}")]
    UnparseableVersion { raw: String, reason: String },

    #[error("Unparseable output from `{command}`: '{output}'")]
    UnparseableToolOutput { command: &'static str, output: String },
}
