use crate::constants::ELP_REPO_URL;
use crate::otp::OtpVersion;
use crate::platform::Platform;
use crate::types::RawVersion;
use anyhow::Result;
use std::fmt::{self, Display, Formatter};
use url::Url;

/// Download URL for one ELP release artifact. The path segment carries
/// the raw, user-supplied version; the normalized cache form never
/// appears in a URL.
pub struct ReleaseUrl(Url);

impl ReleaseUrl {
    pub fn elp_release(
        version: &RawVersion,
        platform: &Platform,
        otp: &OtpVersion,
    ) -> Result<Self> {
        let filename = release_filename(platform, otp);
        tracing::debug!("ELP .tar.gz is '{filename}'");

        let url = format!(
            "{ELP_REPO_URL}/releases/download/{}/{filename}",
            version.as_str()
        );
        tracing::debug!("ELP download URL is '{url}'");
        Ok(Self(url.parse()?))
    }

    pub fn as_url(&self) -> &Url {
        &self.0
    }
}

impl Display for ReleaseUrl {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.0.as_str())
    }
}

fn release_filename(platform: &Platform, otp: &OtpVersion) -> String {
    format!(
        "elp-{}-{}-{}-otp-{otp}.tar.gz",
        platform.os.elp_os(),
        platform.arch.elp_arch(),
        platform.os.elp_suffix(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::{Arch, Os};

    #[test]
    fn linux_x64_release_url() {
        let url = ReleaseUrl::elp_release(
            &RawVersion::new("1.2.3-4"),
            &Platform {
                arch: Arch::X64,
                os: Os::Linux,
            },
            &OtpVersion {
                major: 25,
                minor: 0,
            },
        )
        .unwrap();
        assert_eq!(
            url.to_string(),
            "https://github.com/WhatsApp/erlang-language-platform/releases/download/1.2.3-4/elp-linux-x86_64-unknown-linux-gnu-otp-25.0.tar.gz"
        );
    }

    #[test]
    fn darwin_arm64_release_url() {
        let url = ReleaseUrl::elp_release(
            &RawVersion::new("2025-05-05-1"),
            &Platform {
                arch: Arch::Arm64,
                os: Os::Darwin,
            },
            &OtpVersion {
                major: 27,
                minor: 2,
            },
        )
        .unwrap();
        assert_eq!(
            url.to_string(),
            "https://github.com/WhatsApp/erlang-language-platform/releases/download/2025-05-05-1/elp-macos-aarch64-apple-darwin-otp-27.2.tar.gz"
        );
    }
}
