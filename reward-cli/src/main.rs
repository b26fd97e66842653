//! Reward Regroup Entry Point
//!
//! Configuration is loaded from environment variables (via .env file).
//! Command-line arguments override environment variables.
//!
//! Usage:
//!   reward-regroup run --variant single|dual      - Regroup and commit
//!   reward-regroup preview --variant single|dual  - Regroup without committing

use clap::Parser;
use reward_cli::{handler, logging, Cli};
use tracing::error;

#[tokio::main]
async fn main() {
    // Load .env file (ignore if not found)
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    if let Err(e) = logging::init_logging(cli.verbose, cli.log_format) {
        eprintln!("Failed to initialize logging: {}", e);
    }

    if let Err(e) = handler::run(cli).await {
        error!(error = %e, "Regroup failed");
        println!("{}", e.annotation());
        std::process::exit(e.exit_code());
    }
}
