use crate::error::InstallError;
use clap::Parser;
use std::fmt::{self, Display, Formatter};

#[derive(Parser, Debug)]
#[command(name = "setup-elp", version, about = "Installs the WhatsApp ELP binary")]
pub struct SetupElpCli {
    /// The ELP release to install, e.g. "2025-05-05-1".
    /// Falls back to the `elp-version` action input when omitted.
    pub elp_version: Option<String>,
}

/// The version string exactly as the user supplied it. This is the only
/// form that ever reaches the download URL.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawVersion(String);

impl RawVersion {
    pub fn new(version: impl Into<String>) -> Self {
        Self(version.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for RawVersion {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Normalized `{major}.{minor}.{patch}+{build}` form, derived from a
/// [`RawVersion`]. Used exclusively as the tool-cache key. The tool cache
/// only likes semver, hence the translation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CacheVersion {
    major: u64,
    minor: u64,
    patch: u64,
    build: u64,
}

impl CacheVersion {
    /// ELP release names are four delimited tokens, e.g. `2025-05-05-1`
    /// or `1.2.3-4`. Splits on `-`, `_`, or `.`. The first three tokens
    /// must be numeric; the build token defaults to 1 when missing or
    /// zero. Tokens past the fourth are ignored.
    pub fn from_raw(raw: &RawVersion) -> Result<Self, InstallError> {
        let mut tokens = raw.as_str().split(['-', '_', '.']);

        let major = numeric_token(raw, tokens.next(), "major")?;
        let minor = numeric_token(raw, tokens.next(), "minor")?;
        let patch = numeric_token(raw, tokens.next(), "patch")?;
        let build = tokens
            .next()
            .and_then(|token| token.parse::<u64>().ok())
            .filter(|build| *build != 0)
            .unwrap_or(1);

        Ok(Self {
            major,
            minor,
            patch,
            build,
        })
    }
}

fn numeric_token(
    raw: &RawVersion,
    token: Option<&str>,
    name: &'static str,
) -> Result<u64, InstallError> {
    token
        .and_then(|token| token.parse().ok())
        .ok_or_else(|| InstallError::UnparseableVersion {
            raw: raw.as_str().to_string(),
            reason: format!("{name} segment is missing or not a non-negative integer"),
        })
}

impl Display for CacheVersion {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{}.{}+{}",
            self.major, self.minor, self.patch, self.build
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("1-2-3-4", "1.2.3+4")]
    #[case("1_2_3_4", "1.2.3+4")]
    #[case("1.2.3-4", "1.2.3+4")]
    #[case("2025-05-05-1", "2025.5.5+1")]
    #[case("1-2-3", "1.2.3+1")]
    #[case("1.2.3", "1.2.3+1")]
    #[case("1-2-3-0", "1.2.3+1")]
    #[case("1-2-3-4-5", "1.2.3+4")]
    #[case("0-0-0", "0.0.0+1")]
    fn normalizes_release_names(#[case] raw: &str, #[case] expected: &str) {
        let cache_version = CacheVersion::from_raw(&RawVersion::new(raw)).unwrap();
        assert_eq!(cache_version.to_string(), expected);
    }

    #[rstest]
    #[case("")]
    #[case("1-2")]
    #[case("one-2-3-4")]
    #[case("1-2-three-4")]
    fn rejects_non_numeric_segments(#[case] raw: &str) {
        let err = CacheVersion::from_raw(&RawVersion::new(raw)).unwrap_err();
        assert!(matches!(err, InstallError::UnparseableVersion { .. }));
    }

    #[test]
    fn non_numeric_build_falls_back_to_one() {
        let cache_version = CacheVersion::from_raw(&RawVersion::new("1-2-3-rc")).unwrap();
        assert_eq!(cache_version.to_string(), "1.2.3+1");
    }
}
