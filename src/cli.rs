//! Command-line interface for frontpage.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// frontpage - minimal page-controller web server
#[derive(Parser, Debug)]
#[command(name = "frontpage")]
#[command(about = "Page-controller web server with per-session game state", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the HTTP server
    Serve {
        /// Port to bind to (overrides config)
        #[arg(short, long)]
        port: Option<u16>,

        /// Host to bind to (overrides config)
        #[arg(long)]
        host: Option<String>,

        /// Path to the configuration file
        #[arg(short, long, default_value = "frontpage.toml")]
        config: PathBuf,
    },

    /// Print the registered page and action table
    Routes {
        /// Path to the configuration file
        #[arg(short, long, default_value = "frontpage.toml")]
        config: PathBuf,
    },
}
