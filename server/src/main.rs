// server/src/main.rs

// Entry point of the `healthify` binary; argument parsing and service
// start-up live in the cli module.

use anyhow::Result;
use healthify_server::cli::start_cli;

#[tokio::main]
async fn main() -> Result<()> {
    start_cli().await
}
