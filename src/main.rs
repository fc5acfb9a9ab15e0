//! mariner-baremetal - Mariner Baremetal Installer Image Tool
//!
//! Creates, lists, shows and deletes Mariner baremetal installer image
//! resources through the Azure provisioning API.

use clap::Parser;
use tracing::{debug, error};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use mariner_baremetal::cli::Cli;
use mariner_baremetal::config::{self, Config};
use mariner_baremetal::error::{MarinerError, Result};

#[tokio::main]
async fn main() {
    // Parse command-line arguments
    let cli = Cli::parse();

    let config = match config::load_config().await {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    // Initialize logging
    init_logging(cli.debug || config.debug);

    // Execute the command
    match run(cli, config).await {
        Ok(()) => {}
        Err(MarinerError::ApiError { .. }) => {
            // Already logged when the response was reported
            std::process::exit(1);
        }
        Err(e) => {
            error!("Error: {}", e);
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

async fn run(cli: Cli, config: Config) -> Result<()> {
    debug!("Starting mariner-baremetal");
    cli.execute(config).await
}

fn init_logging(debug: bool) {
    let default_filter = if debug {
        "mariner_baremetal=debug"
    } else {
        "mariner_baremetal=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
