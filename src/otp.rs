use crate::error::InstallError;
use anyhow::{bail, Context, Result};
use std::fmt::{self, Display, Formatter};
use std::process::Command;

/// Reads the installed OTP version out of the release metadata shipped
/// with the runtime, e.g. `<root>/releases/27/OTP_VERSION`.
const OTP_VERSION_EVAL: &str = r#"
    Root = code:root_dir(),
    OTPRelease = erlang:system_info(otp_release),
    OTPVersionFile = filename:join([Root, "releases", OTPRelease, "OTP_VERSION"]),
    {ok, Version} = file:read_file(OTPVersionFile),
    io:fwrite(Version),
    halt().
    "#;

/// The `major.minor` fingerprint of the Erlang/OTP runtime installed on
/// the host. ELP release binaries are built per OTP series, so this
/// selects the download artifact.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OtpVersion {
    pub major: u32,
    pub minor: u32,
}

impl OtpVersion {
    /// Parses the contents of an `OTP_VERSION` file, e.g. `"25.0.1"`.
    /// Fields past the minor are ignored.
    pub fn parse(output: &str) -> Result<Self, InstallError> {
        let mut fields = output.trim().split('.');
        let major = fields.next().and_then(|field| field.parse().ok());
        let minor = fields.next().and_then(|field| field.parse().ok());
        match (major, minor) {
            (Some(major), Some(minor)) => Ok(Self { major, minor }),
            _ => Err(InstallError::UnparseableToolOutput {
                command: "erl",
                output: output.trim().to_string(),
            }),
        }
    }
}

impl Display for OtpVersion {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

/// Source of the OTP fingerprint. The production implementation shells
/// out to `erl`; tests substitute a fixed version.
pub trait RuntimeProbe {
    fn otp_major_minor(&self) -> Result<OtpVersion>;
}

pub struct ErlProbe;

impl RuntimeProbe for ErlProbe {
    fn otp_major_minor(&self) -> Result<OtpVersion> {
        let output = Command::new("erl")
            .args(["-eval", OTP_VERSION_EVAL, "-noshell"])
            .output()
            .context("Failed to run `erl` to determine the installed OTP version")?;
        if !output.status.success() {
            bail!(
                "`erl` exited with {}: {}",
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            );
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let otp = OtpVersion::parse(&stdout)?;
        tracing::debug!("Erlang/OTP <major>.<minor> is '{otp}'");
        Ok(otp)
    }
}
