//! AGH CLI - growing-season metrics for Alaska communities.

use agh_core::loader::{LoaderConfig, DEFAULT_DATA_URL};
use clap::Parser;

#[derive(Parser)]
#[command(
    name = "agh-cli",
    version,
    about = "Alaska Garden Helper: growing season, degree days and hardiness from daily temperature series"
)]
struct Cli {
    /// Base URL or local directory holding the `min/` and `mean/` series
    #[arg(long, global = true, default_value = DEFAULT_DATA_URL)]
    data_url: String,

    #[command(subcommand)]
    command: agh_cmd::Command,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let config = LoaderConfig::new(cli.data_url);
    log::debug!("Using data from {}", config.data_url);
    agh_cmd::run(cli.command, config).await
}
