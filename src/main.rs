use anyhow::Result;
use clap::Parser;

mod bootstrap;
mod cli;
mod config;
mod error;
mod handlers;
mod logging;
mod router;
mod schemas;
mod tests;

use cli::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    cli.run().await?;

    Ok(())
}
