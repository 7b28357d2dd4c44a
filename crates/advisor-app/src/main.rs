use anyhow::Result;
use clap::Parser;

use advisor::{init_logging, run_repl_mode, Cli, ClientConfig};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file if it exists
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = ClientConfig::from_cli(&cli)?;
    log::debug!("Using backend {}", config.api.base_url);

    run_repl_mode(&cli, config).await
}
