pub const TOOL_NAME: &str = "elp";

pub const ELP_REPO_URL: &str = "https://github.com/WhatsApp/erlang-language-platform";

pub const ELP_VERSION_INPUT: &str = "elp-version";

pub const RUNNER_TOOL_CACHE_VAR: &str = "RUNNER_TOOL_CACHE";
pub const RUNNER_TEMP_VAR: &str = "RUNNER_TEMP";
pub const GITHUB_PATH_VAR: &str = "GITHUB_PATH";

pub const DEFAULT_RUNNER_ROOT: &str = "/tmp";

pub const PUBLISH_SUBDIR: &str = ".setup-elp";
