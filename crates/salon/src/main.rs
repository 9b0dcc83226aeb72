// SPDX-FileCopyrightText: 2026 Salon Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Salon - booking back end for a nail salon.
//!
//! This is the binary entry point: the HTTP server plus a few admin commands.

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

mod config_cmd;
mod serve;
mod shutdown;
mod stats;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use salon_config::{ConfigError, SalonConfig};

/// Salon - booking back end for a nail salon.
#[derive(Parser, Debug)]
#[command(name = "salon", version, about, long_about = None)]
struct Cli {
    /// Read configuration from this file instead of the XDG hierarchy.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the HTTP server.
    Serve,
    /// Print appointment statistics from the database.
    Stats {
        /// Output JSON instead of a table.
        #[arg(long)]
        json: bool,
    },
    /// Validate and print the effective configuration.
    Config,
}

fn load(path: Option<&PathBuf>) -> Result<SalonConfig, Vec<ConfigError>> {
    match path {
        Some(path) => salon_config::load_and_validate_path(path),
        None => salon_config::load_and_validate(),
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Load and validate configuration at startup
    let config = match load(cli.config.as_ref()) {
        Ok(config) => config,
        Err(errors) => {
            salon_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    let result = match cli.command {
        Some(Commands::Serve) => serve::run_serve(config).await,
        Some(Commands::Stats { json }) => stats::run_stats(&config, json).await,
        Some(Commands::Config) => config_cmd::run_config(&config),
        None => {
            println!("salon: use --help for available commands");
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
