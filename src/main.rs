use clap::Parser;
use setup_elp::cache::ToolCache;
use setup_elp::config::RunnerConfig;
use setup_elp::installer::{HttpFetcher, Installer};
use setup_elp::logging::setup_logging;
use setup_elp::otp::ErlProbe;
use setup_elp::platform::Platform;
use setup_elp::types::SetupElpCli;
use setup_elp::utils::{print_message, TagColor};

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("{err:#}");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    setup_logging()?;
    let cli = SetupElpCli::parse();

    // Fail-fast preconditions: required input, then the platform
    // allow-list, both before any network or filesystem activity.
    let config = RunnerConfig::resolve(cli.elp_version)?;
    let platform = Platform::detect()?;

    let installer = Installer {
        config: &config,
        platform,
        cache: ToolCache::new(config.tool_cache_root.clone()),
        fetcher: &HttpFetcher,
        probe: &ErlProbe,
    };
    let published = installer.run().await?;

    print_message(
        "SUCCESS",
        &format!("elp available on PATH at {}", published.display()),
        TagColor::Green,
    );
    Ok(())
}
