//! Noughts - unified CLI.

#![warn(missing_docs)]

mod cli;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Command};
use noughts::{Settings, init_stderr_logging, run_tui, suggest};
use std::path::PathBuf;
use tracing::instrument;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Command::Play {
            mode,
            think_ms,
            config,
            log_file,
        } => run_play(mode.map(Into::into), think_ms, config, log_file).await,
        Command::Suggest { board, seed } => run_suggest(&board, seed),
    }
}

/// Loads settings and runs the terminal UI.
async fn run_play(
    mode: Option<noughts_core::GameMode>,
    think_ms: Option<u64>,
    config: Option<PathBuf>,
    log_file: Option<PathBuf>,
) -> Result<()> {
    let settings = Settings::load(config.as_deref())?.with_overrides(mode, think_ms, log_file);
    run_tui(settings).await
}

/// Prints the computer's move for a board.
#[instrument]
fn run_suggest(board: &str, seed: Option<u64>) -> Result<()> {
    init_stderr_logging();
    let suggestion = suggest(board, seed)?;
    println!("{}", suggestion);
    Ok(())
}
