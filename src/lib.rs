//! Noughts - terminal tic-tac-toe.
//!
//! # Architecture
//!
//! - **Core**: board, rules, [`GameState`](noughts_core::GameState) and the
//!   computer heuristic live in `noughts_core`
//! - **Controller**: a single task owning the game state; the UI sends
//!   [`Command`]s and renders [`GameEvent`]s
//! - **TUI**: ratatui front end with a mode selector and the board
//!
//! # Example
//!
//! ```no_run
//! use noughts::{GameController, GameEvent};
//! use noughts_core::{ComputerPlayer, GameMode};
//! use std::time::Duration;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let (handle, mut events, _task) =
//!     GameController::spawn(ComputerPlayer::new(), Duration::from_millis(500));
//!
//! handle.request_reset(GameMode::VsComputer)?;
//! handle.human_click(0)?;
//!
//! while let Some(event) = events.recv().await {
//!     if let GameEvent::GameEnded { banner, .. } = event {
//!         println!("{}", banner);
//!         break;
//!     }
//! }
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod config;
mod controller;
mod events;
mod logging;
mod suggest;
mod tui;

// Crate-level exports - Configuration
pub use config::{ConfigError, Settings};

// Crate-level exports - Orchestration
pub use controller::{ControllerHandle, GameController};
pub use events::{Command, GameEvent, result_banner, status_text};

// Crate-level exports - Front ends
pub use logging::init_stderr as init_stderr_logging;
pub use suggest::{Suggestion, suggest};
pub use tui::run_tui;
