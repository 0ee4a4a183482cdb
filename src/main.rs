//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `link_redirect` library that handles:
//! - Command-line argument parsing
//! - Environment variable loading (.env file)
//! - Logger initialization
//! - Choosing between a one-shot batch and the view server
//!
//! All core functionality is implemented in the library crate.

use anyhow::{Context, Result};
use clap::Parser;
use std::process;

use link_redirect::initialization::init_logger_with;
use link_redirect::{run_batch, run_server, Config};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env from the current directory, then from next to the executable
    if dotenvy::dotenv().is_err() {
        if let Ok(exe_path) = std::env::current_exe() {
            if let Some(exe_dir) = exe_path.parent() {
                let env_path = exe_dir.join(".env");
                if env_path.exists() {
                    let _ = dotenvy::from_path(&env_path);
                }
            }
        }
    }

    let config = Config::parse();

    let log_level = config.log_level.clone();
    let log_format = config.log_format.clone();
    init_logger_with(log_level.into(), log_format).context("Failed to initialize logger")?;

    let outcome = match config.serve_port() {
        Some(port) => run_server(config, port).await,
        None => run_batch(config).await.map(|_| ()),
    };

    if let Err(e) = outcome {
        eprintln!("link_redirect error: {:#}", e);
        process::exit(1);
    }
    Ok(())
}
