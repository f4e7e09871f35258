//! openvscode-deb - Debian packager for OpenVSCode Server

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use openvscode_deb::core::config::BuildRequest;
use openvscode_deb::core::paths::Layout;

mod cmd;

#[derive(Parser)]
#[command(name = "openvscode-deb")]
#[command(about = "Packages OpenVSCode Server releases into Debian packages")]
struct Cli {
    /// Target architecture (amd64, arm64)
    #[arg(long, default_value = "")]
    arch: String,

    /// OpenVSCode Server version to package
    #[arg(long, default_value = "")]
    version: String,

    /// Clean up build artifacts instead of building ("true" or "false")
    #[arg(
        long,
        default_value = "false",
        num_args = 0..=1,
        default_missing_value = "true"
    )]
    clean: String,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let request = BuildRequest::from_flags(&cli.arch, &cli.version, &cli.clean)?;
    let layout = Layout::default();

    match request {
        BuildRequest::Clean => cmd::clean::clean(&layout),
        BuildRequest::Package { arch, version } => cmd::build::build(&layout, arch, &version),
    }
}
