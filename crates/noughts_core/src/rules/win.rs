//! Win detection.

use crate::{Board, Mark, Position};
use tracing::instrument;

/// Three positions forming a row, column or diagonal.
pub type WinPattern = [Position; 3];

/// The eight winning patterns, in the fixed scan order used for both win
/// detection and the computer's win/block search.
pub const WIN_PATTERNS: [WinPattern; 8] = [
    [Position::TopLeft, Position::TopCenter, Position::TopRight],
    [Position::TopLeft, Position::MiddleLeft, Position::BottomLeft],
    [Position::TopLeft, Position::Center, Position::BottomRight],
    [Position::TopCenter, Position::Center, Position::BottomCenter],
    [Position::TopRight, Position::MiddleRight, Position::BottomRight],
    [Position::TopRight, Position::Center, Position::BottomLeft],
    [Position::MiddleLeft, Position::Center, Position::MiddleRight],
    [Position::BottomLeft, Position::BottomCenter, Position::BottomRight],
];

/// Returns the first completed pattern and its owner.
#[instrument(skip(board))]
pub fn find_win(board: &Board) -> Option<(Mark, WinPattern)> {
    WIN_PATTERNS.iter().find_map(|&pattern| {
        let [a, b, c] = pattern;
        let mark = board.get(a).mark()?;
        (board.get(b).mark() == Some(mark) && board.get(c).mark() == Some(mark))
            .then_some((mark, pattern))
    })
}
