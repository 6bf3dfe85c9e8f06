//! regprune - Delete container image tags according to retention rules.

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod prompt;

use commands::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing on stderr
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "regprune=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    commands::clean::execute(&cli.clean).await
}
