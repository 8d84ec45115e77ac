//! The computer opponent.
//!
//! Looks one ply ahead for a win or a block and otherwise falls back to a
//! static preference: center, then a random corner, then a random side. It
//! does not see forks, so a human can beat it.

use crate::rules::WIN_PATTERNS;
use crate::{Board, Mark, Position, Square};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use tracing::{debug, instrument};

/// Finds the first pattern (in scan order) where `mark` holds two squares and
/// the third is empty, returning the empty square.
#[instrument(skip(board))]
pub fn completing_move(board: &Board, mark: Mark) -> Option<Position> {
    WIN_PATTERNS.iter().find_map(|pattern| {
        let owned = pattern
            .iter()
            .filter(|&&p| board.get(p) == Square::Occupied(mark))
            .count();
        let mut empty = pattern.iter().copied().filter(|&p| board.is_empty(p));
        match (owned, empty.next(), empty.next()) {
            (2, Some(pos), None) => Some(pos),
            _ => None,
        }
    })
}

/// Picks X's move. Returns `None` only for a full board.
#[instrument(skip(board, rng), fields(board = %board.to_compact()))]
pub fn select_move<R: Rng + ?Sized>(board: &Board, rng: &mut R) -> Option<Position> {
    if let Some(pos) = completing_move(board, Mark::X) {
        debug!(position = %pos, "Taking winning square");
        return Some(pos);
    }

    if let Some(pos) = completing_move(board, Mark::O) {
        debug!(position = %pos, "Blocking opponent");
        return Some(pos);
    }

    if board.is_empty(Position::Center) {
        return Some(Position::Center);
    }

    let open = Position::valid_moves(board);
    random_among(&open, &Position::CORNERS, rng)
        .or_else(|| random_among(&open, &Position::SIDES, rng))
}

fn random_among<R: Rng + ?Sized>(
    open: &[Position],
    candidates: &[Position],
    rng: &mut R,
) -> Option<Position> {
    let available: Vec<Position> = candidates
        .iter()
        .copied()
        .filter(|p| open.contains(p))
        .collect();
    available.choose(rng).copied()
}

/// Computer player owning its random source.
#[derive(Debug, Clone)]
pub struct ComputerPlayer {
    rng: StdRng,
}

impl ComputerPlayer {
    /// Creates a player seeded from the operating system.
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Creates a player with reproducible corner/side choices.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Picks X's move on `board`. See [`select_move`].
    pub fn select_move(&mut self, board: &Board) -> Option<Position> {
        select_move(board, &mut self.rng)
    }
}

impl Default for ComputerPlayer {
    fn default() -> Self {
        Self::new()
    }
}
