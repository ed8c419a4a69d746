//! bluecore - Entry Point
//!
//! | Command | Description |
//! |---------|-------------|
//! | `bluecore run` (default) | Start the module stack until Ctrl-C |
//! | `bluecore modules` | Print registered modules and their start order |
//! | `bluecore call --service S --method M` | One facade call against a fresh stack |

use anyhow::{Context, Result};
use bluecore::bootstrap::load_config;
use bluecore::commands;
use bluecore_infrastructure::logging::init_logging;
use clap::{Parser, Subcommand};
use serde_json::Value;
use std::path::PathBuf;

/// Command line interface for bluecore
#[derive(Parser, Debug)]
#[command(name = "bluecore")]
#[command(about = "bluecore - module lifecycle core with facade hosting")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start every module and run until interrupted
    Run,
    /// Print the registered modules and their start order
    Modules,
    /// Call a facade method and print the reply
    Call {
        /// Fully qualified service name
        #[arg(long)]
        service: String,
        /// Method name
        #[arg(long)]
        method: String,
        /// JSON request payload
        #[arg(long, default_value = "{}")]
        request: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;
    init_logging(&config.logging)?;

    match cli.command.unwrap_or(Command::Run) {
        Command::Run => commands::run(&config).await,
        Command::Modules => print_json(&commands::plan(&config)?),
        Command::Call {
            service,
            method,
            request,
        } => {
            let request: Value =
                serde_json::from_str(&request).context("--request is not valid JSON")?;
            let reply = commands::call(&config, &service, &method, request).await?;
            print_json(&reply)
        }
    }
}

fn print_json(value: &Value) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
