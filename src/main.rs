//! frontpage binary: serve the page controller or inspect its route table.

mod cli;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Command};
use frontpage::{App, AppConfig, page_registry, router};
use std::path::Path;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Command::Serve { port, host, config } => serve(host, port, &config).await,
        Command::Routes { config } => print_routes(&config),
    }
}

/// Run the HTTP server.
async fn serve(host: Option<String>, port: Option<u16>, config_path: &Path) -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let mut config = AppConfig::load(config_path)?;
    if let Some(host) = host {
        config = config.with_host(host);
    }
    if let Some(port) = port {
        config = config.with_port(port);
    }

    // A registration fault here is a page authoring bug; refuse to start.
    let registry = page_registry(config.base_namespace())?;
    let app = Arc::new(App::new(&config, registry));

    let listener =
        tokio::net::TcpListener::bind((config.host().as_str(), *config.port())).await?;
    info!(host = %config.host(), port = config.port(), "frontpage listening");
    axum::serve(listener, router(app)).await?;

    Ok(())
}

/// Print the (page, action) table the registry would serve.
fn print_routes(config_path: &Path) -> Result<()> {
    let config = AppConfig::load(config_path)?;
    let registry = page_registry(config.base_namespace())?;

    for (id, page) in registry.entries() {
        println!("{}", id);
        for action in page.action_names() {
            println!("  action={}", action);
        }
    }
    Ok(())
}
