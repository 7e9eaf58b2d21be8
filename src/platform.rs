use crate::error::InstallError;

/// The four runner platforms ELP publishes release binaries for.
const KNOWN_ARCHS_PLATFORMS: [(&str, &str); 4] = [
    ("arm64", "darwin"),
    ("x64", "darwin"),
    ("arm64", "linux"),
    ("x64", "linux"),
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Arch {
    Arm64,
    X64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Os {
    Darwin,
    Linux,
}

impl Arch {
    /// The architecture token used in ELP release filenames.
    pub fn elp_arch(self) -> &'static str {
        match self {
            Arch::Arm64 => "aarch64",
            Arch::X64 => "x86_64",
        }
    }
}

impl Os {
    /// The OS token used in ELP release filenames.
    pub fn elp_os(self) -> &'static str {
        match self {
            Os::Darwin => "macos",
            Os::Linux => "linux",
        }
    }

    /// The target-triple suffix used in ELP release filenames.
    pub fn elp_suffix(self) -> &'static str {
        match self {
            Os::Darwin => "apple-darwin",
            Os::Linux => "unknown-linux-gnu",
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct Platform {
    pub arch: Arch,
    pub os: Os,
}

impl Platform {
    /// Detects the machine this process is running on and rejects
    /// anything outside the supported set. Runs before any network or
    /// filesystem activity.
    pub fn detect() -> Result<Self, InstallError> {
        Self::from_raw(std::env::consts::ARCH, std::env::consts::OS)
    }

    /// Validates an (architecture, OS) pair given in `std::env::consts`
    /// vocabulary, translating to the runner vocabulary for the error.
    pub fn from_raw(raw_arch: &str, raw_os: &str) -> Result<Self, InstallError> {
        let arch_name = match raw_arch {
            "aarch64" => "arm64",
            "x86_64" => "x64",
            other => other,
        };
        let os_name = match raw_os {
            "macos" => "darwin",
            other => other,
        };

        if !KNOWN_ARCHS_PLATFORMS.contains(&(arch_name, os_name)) {
            let supported = KNOWN_ARCHS_PLATFORMS
                .iter()
                .map(|(arch, os)| format!("'{arch}:{os}'"))
                .collect::<Vec<_>>()
                .join(", ");
            return Err(InstallError::UnsupportedPlatform {
                observed: format!("{arch_name}:{os_name}"),
                supported,
            });
        }
        tracing::debug!("<arch>:<platform> is '{arch_name}:{os_name}'");

        let arch = match arch_name {
            "arm64" => Arch::Arm64,
            _ => Arch::X64,
        };
        let os = match os_name {
            "darwin" => Os::Darwin,
            _ => Os::Linux,
        };
        Ok(Self { arch, os })
    }
}
