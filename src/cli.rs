//! Command-line interface for noughts.

use clap::{Parser, Subcommand, ValueEnum};
use noughts_core::GameMode;
use std::path::PathBuf;

/// Noughts - tic-tac-toe in the terminal
#[derive(Parser, Debug)]
#[command(name = "noughts")]
#[command(about = "Tic-tac-toe against a friend or the computer", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play in the terminal UI
    Play {
        /// Skip the mode selector and start in this mode
        #[arg(short, long, value_enum)]
        mode: Option<ModeArg>,

        /// Computer think delay in milliseconds
        #[arg(long)]
        think_ms: Option<u64>,

        /// Path to a TOML settings file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Log file path
        #[arg(long)]
        log_file: Option<PathBuf>,
    },

    /// Print the computer's move for a board like "OX.XO...."
    Suggest {
        /// Nine squares in row order: O, X, and . _ or - for empty
        board: String,

        /// Seed for the corner/side choice
        #[arg(long)]
        seed: Option<u64>,
    },
}

/// Mode names accepted on the command line.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeArg {
    /// Two players at one keyboard
    Friend,
    /// Play O against the computer
    Computer,
}

impl From<ModeArg> for GameMode {
    fn from(arg: ModeArg) -> Self {
        match arg {
            ModeArg::Friend => GameMode::TwoPlayer,
            ModeArg::Computer => GameMode::VsComputer,
        }
    }
}
