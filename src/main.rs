//! Mockimg - mock image annotation service.

mod cli;
mod config;
mod draw;
mod error;
mod font;
mod model;
mod server;
mod synth;
mod validate;

use std::process;
use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::cli::Cli;
use crate::config::Config;
use crate::error::ApiError;
use crate::server::AppState;
use crate::synth::Synthesizer;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), ApiError> {
    init_tracing(cli.verbose);

    // Load config, then apply CLI overrides
    let config_path = config::discover_config_path(cli.config.as_deref());
    let mut config = Config::load(&config_path).map_err(ApiError::Config)?;
    if let Some(host) = cli.host {
        config.server.host = host;
    }
    if let Some(port) = cli.port {
        config.server.port = port;
    }

    let synthesizer = Synthesizer::new(config.canvas.clone());
    let app = server::router(Arc::new(AppState { synthesizer }));

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(addr = %listener.local_addr()?, "listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize the tracing subscriber. `RUST_LOG` wins over the defaults.
fn init_tracing(verbose: bool) {
    let default = if verbose { "mockimg=debug" } else { "mockimg=info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}
