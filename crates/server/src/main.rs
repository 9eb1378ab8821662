use clap::Parser;

use recap_server::app_config::load_config;
use recap_server::cli::{self, Cli};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .with_level(true)
        .init();

    let args = Cli::parse();
    let config = load_config();

    cli::dispatch(config, args.command).await
}
