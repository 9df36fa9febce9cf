//! Sahaay - Emergency relief chat assistant CLI
//!
#![doc = "Sahaay - Emergency relief chat assistant CLI"]
#![doc = "Main entry point for the Sahaay application."]

use anyhow::Result;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use sahaay::cli::{Cli, Commands};
use sahaay::commands;
use sahaay::config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    init_tracing();

    // Parse command line arguments
    let cli = Cli::parse_args();

    // Load configuration
    let config_path = cli.config.as_deref().unwrap_or("config/config.yaml");
    let config = Config::load(config_path, &cli)?;

    // Validate configuration
    config.validate()?;

    // Execute command
    match cli.command {
        Commands::Chat { backend, model } => {
            tracing::info!("Starting interactive relief chat");
            if let Some(b) = &backend {
                tracing::debug!("Using backend override: {}", b);
            }
            if let Some(m) = &model {
                tracing::debug!("Using model override: {}", m);
            }

            // Delegate to the chat command handler
            // Moves `config` into the handler (match arms are exclusive)
            commands::chat::run_chat(config, backend, model).await?;
            Ok(())
        }
        Commands::Ask { message } => {
            tracing::info!("Starting one-shot ask mode");
            commands::ask::run_ask(config, message).await?;
            Ok(())
        }
    }
}

/// Initialize tracing subscriber with environment filter
fn init_tracing() {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("sahaay=info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}
