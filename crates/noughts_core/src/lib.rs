//! Tic-tac-toe game logic with no I/O.
//!
//! # Architecture
//!
//! - **Board**: nine squares in row-major order, addressed by [`Position`]
//! - **Rules**: win patterns and first-match win detection ([`rules`])
//! - **GameState**: the turn/count/phase state machine, mutated only through
//!   [`GameState::apply_move`] and [`GameState::reset`]
//! - **ComputerPlayer**: the win > block > center > corner > side heuristic
//!
//! # Example
//!
//! ```
//! use noughts_core::{GameMode, GameState, Mark, MoveResult};
//!
//! let mut game = GameState::new();
//! game.reset(GameMode::TwoPlayer);
//!
//! let result = game.apply_move(4);
//! assert_eq!(result, MoveResult::Continue { next_turn: Mark::X });
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod computer;
mod game;
pub mod invariants;
mod position;
pub mod rules;
mod types;

pub use computer::{ComputerPlayer, completing_move, select_move};
pub use game::{GameMode, GameState, MoveResult, Outcome, Phase, Rejection};
pub use position::Position;
pub use types::{Board, BoardParseError, Mark, Square};
