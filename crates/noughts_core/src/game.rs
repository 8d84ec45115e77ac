//! The game state machine.
//!
//! A [`GameState`] starts in [`Phase::NotStarted`], enters
//! [`Phase::InProgress`] on [`GameState::reset`], and moves to
//! [`Phase::Ended`] when [`GameState::apply_move`] completes a pattern or
//! fills the board. Only `reset` leaves `Ended`.

use crate::invariants;
use crate::rules::{self, WinPattern};
use crate::{Board, Mark, Position, Square};
use derive_more::Display;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Who plays X.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumIter,
)]
#[serde(rename_all = "snake_case")]
pub enum GameMode {
    /// Two humans share the board.
    #[default]
    #[strum(to_string = "vs Friend")]
    TwoPlayer,
    /// X is driven by the computer player.
    #[strum(to_string = "vs Computer")]
    VsComputer,
}

/// Terminal result of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum Outcome {
    /// A player completed a pattern.
    #[display("{_0} wins")]
    Win(Mark),
    /// The board filled with no winner.
    #[display("Draw")]
    Draw,
}

/// Lifecycle phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Phase {
    /// No game has been started (or the session was ended for a mode change).
    #[default]
    NotStarted,
    /// Moves are accepted.
    InProgress,
    /// The game finished; only a reset restarts play.
    Ended(Outcome),
}

/// Why a move was ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Rejection {
    /// No game in progress.
    #[display("no game in progress")]
    NotActive,
    /// Index outside 0-8.
    #[display("index {_0} is off the board")]
    OutOfBounds(usize),
    /// The square already holds a mark.
    #[display("{_0} is already occupied")]
    Occupied(Position),
}

/// Result of [`GameState::apply_move`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveResult {
    /// The move was placed and play passes to `next_turn`.
    Continue {
        /// Mark now eligible to move.
        next_turn: Mark,
    },
    /// The move completed `pattern`.
    Win {
        /// The mover.
        winner: Mark,
        /// The completed pattern.
        pattern: WinPattern,
    },
    /// The move filled the board without a winner.
    Draw,
    /// The move was ignored; the state is unchanged.
    Rejected(Rejection),
}

impl MoveResult {
    /// True unless the move was rejected.
    pub fn is_accepted(&self) -> bool {
        !matches!(self, MoveResult::Rejected(_))
    }
}

/// Complete game state.
///
/// Only [`new`](Self::new), [`reset`](Self::reset),
/// [`end_session`](Self::end_session) and [`apply_move`](Self::apply_move)
/// produce or change a state, so the move count always matches the board.
/// There is no way to build one from serialized data:
///
/// ```compile_fail
/// fn from_data<T: serde::de::DeserializeOwned>() {}
/// from_data::<noughts_core::GameState>();
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    board: Board,
    turn: Mark,
    count: u8,
    phase: Phase,
    mode: GameMode,
    /// Bumped on every reset and session end; tags deferred work.
    generation: u64,
}

impl GameState {
    /// Creates a state that accepts no moves until [`reset`](Self::reset).
    #[instrument]
    pub fn new() -> Self {
        Self {
            board: Board::new(),
            turn: Mark::O,
            count: 0,
            phase: Phase::NotStarted,
            mode: GameMode::default(),
            generation: 0,
        }
    }

    /// Starts a fresh game in `mode`. O moves first.
    #[instrument(skip(self), fields(generation = self.generation))]
    pub fn reset(&mut self, mode: GameMode) {
        *self = Self {
            board: Board::new(),
            turn: Mark::O,
            count: 0,
            phase: Phase::InProgress,
            mode,
            generation: self.generation.wrapping_add(1),
        };
        debug!(generation = self.generation, %mode, "Game reset");
    }

    /// Abandons the current game and returns to [`Phase::NotStarted`].
    #[instrument(skip(self), fields(generation = self.generation))]
    pub fn end_session(&mut self) {
        *self = Self {
            mode: self.mode,
            generation: self.generation.wrapping_add(1),
            ..Self::new()
        };
    }

    /// Places the current turn's mark at `index`.
    ///
    /// Invalid input (no active game, off-board index, occupied square) is
    /// reported as [`MoveResult::Rejected`] and leaves the state untouched.
    #[instrument(skip(self), fields(turn = %self.turn, count = self.count))]
    pub fn apply_move(&mut self, index: usize) -> MoveResult {
        if self.phase != Phase::InProgress {
            return MoveResult::Rejected(Rejection::NotActive);
        }
        let Some(pos) = Position::from_index(index) else {
            return MoveResult::Rejected(Rejection::OutOfBounds(index));
        };
        if !self.board.is_empty(pos) {
            return MoveResult::Rejected(Rejection::Occupied(pos));
        }

        let mover = self.turn;
        self.board.set(pos, Square::Occupied(mover));
        self.count += 1;

        let result = if let Some((winner, pattern)) = rules::find_win(&self.board) {
            self.phase = Phase::Ended(Outcome::Win(winner));
            MoveResult::Win { winner, pattern }
        } else if self.count == 9 {
            self.phase = Phase::Ended(Outcome::Draw);
            MoveResult::Draw
        } else {
            self.turn = mover.opponent();
            MoveResult::Continue {
                next_turn: self.turn,
            }
        };

        debug_assert!(
            invariants::check_all(self).is_ok(),
            "invariant violated after move at {pos}: {:?}",
            invariants::check_all(self)
        );
        debug!(position = %pos, mark = %mover, ?result, "Move applied");
        result
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Mark eligible to move next (the last mover once the game has ended).
    pub fn turn(&self) -> Mark {
        self.turn
    }

    /// Moves played since the last reset.
    pub fn count(&self) -> u8 {
        self.count
    }

    /// Lifecycle phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Mode stored by the last reset.
    pub fn mode(&self) -> GameMode {
        self.mode
    }

    /// Reset token.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// True while moves are accepted.
    pub fn is_active(&self) -> bool {
        self.phase == Phase::InProgress
    }

    /// Outcome once the game has ended.
    pub fn outcome(&self) -> Option<Outcome> {
        match self.phase {
            Phase::Ended(outcome) => Some(outcome),
            _ => None,
        }
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}
