//! Core domain types for tic-tac-toe.

use crate::position::Position;
use derive_more::{Display, Error};
use std::str::FromStr;
use tracing::instrument;

/// A player's symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum Mark {
    /// Player O (always moves first).
    #[display("O")]
    O,
    /// Player X (the computer in vs-computer mode).
    #[display("X")]
    X,
}

impl Mark {
    /// Returns the other mark.
    pub fn opponent(self) -> Self {
        match self {
            Mark::O => Mark::X,
            Mark::X => Mark::O,
        }
    }
}

/// A square on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Square {
    /// Empty square.
    #[default]
    Empty,
    /// Square holding a mark.
    Occupied(Mark),
}

impl Square {
    /// Returns the mark in this square, if any.
    pub fn mark(self) -> Option<Mark> {
        match self {
            Square::Empty => None,
            Square::Occupied(mark) => Some(mark),
        }
    }
}

/// 3x3 board.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Board {
    /// Squares in row-major order (0-8).
    squares: [Square; 9],
}

impl Board {
    /// Creates an empty board.
    pub fn new() -> Self {
        Self::default()
    }

    /// Gets the square at a position.
    pub fn get(&self, pos: Position) -> Square {
        self.squares[pos.to_index()]
    }

    /// Sets the square at a position.
    pub fn set(&mut self, pos: Position, square: Square) {
        self.squares[pos.to_index()] = square;
    }

    /// Checks if a square is empty.
    pub fn is_empty(&self, pos: Position) -> bool {
        self.get(pos) == Square::Empty
    }

    /// Returns all squares in row-major order.
    pub fn squares(&self) -> &[Square; 9] {
        &self.squares
    }

    /// Number of non-empty squares.
    pub fn occupied_count(&self) -> usize {
        self.squares.iter().filter(|s| **s != Square::Empty).count()
    }

    /// Number of squares holding `mark`.
    pub fn count_of(&self, mark: Mark) -> usize {
        self.squares
            .iter()
            .filter(|s| **s == Square::Occupied(mark))
            .count()
    }

    /// Formats the board as three rows, empty squares shown as their 1-9 key.
    pub fn display(&self) -> String {
        let mut result = String::new();
        for (idx, square) in self.squares.iter().enumerate() {
            if idx > 0 && idx % 3 == 0 {
                result.push_str("\n-+-+-\n");
            } else if idx % 3 != 0 {
                result.push('|');
            }
            match square {
                Square::Empty => result.push_str(&(idx + 1).to_string()),
                Square::Occupied(mark) => result.push_str(&mark.to_string()),
            }
        }
        result
    }

    /// Compact nine-character form: `O`, `X`, and `.` for empty.
    pub fn to_compact(&self) -> String {
        self.squares
            .iter()
            .map(|s| match s {
                Square::Empty => '.',
                Square::Occupied(Mark::O) => 'O',
                Square::Occupied(Mark::X) => 'X',
            })
            .collect()
    }
}

impl FromStr for Board {
    type Err = BoardParseError;

    /// Parses the compact form. Whitespace and `|`/`/` separators are
    /// ignored; `.`, `_` and `-` mark empty squares.
    #[instrument]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let cells: Vec<char> = s
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '|' && *c != '/')
            .collect();

        if cells.len() != 9 {
            return Err(BoardParseError::new(format!(
                "expected 9 squares, found {}",
                cells.len()
            )));
        }

        let mut board = Board::new();
        for (idx, c) in cells.into_iter().enumerate() {
            let square = match c.to_ascii_uppercase() {
                'O' => Square::Occupied(Mark::O),
                'X' => Square::Occupied(Mark::X),
                '.' | '_' | '-' => Square::Empty,
                other => {
                    return Err(BoardParseError::new(format!(
                        "invalid square '{}' at index {}",
                        other, idx
                    )));
                }
            };
            board.squares[idx] = square;
        }
        Ok(board)
    }
}

/// Error parsing a board from its compact form.
#[derive(Debug, Clone, Display, Error)]
#[display("Board parse error: {} at {}:{}", message, file, line)]
pub struct BoardParseError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl BoardParseError {
    /// Creates a new parse error with caller location tracking.
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_compact_board() {
        let board: Board = "XX.OO....".parse().unwrap();
        assert_eq!(board.get(Position::TopLeft), Square::Occupied(Mark::X));
        assert_eq!(board.get(Position::MiddleLeft), Square::Occupied(Mark::O));
        assert!(board.is_empty(Position::TopRight));
        assert_eq!(board.occupied_count(), 4);
        assert_eq!(board.to_compact(), "XX.OO....");
    }

    #[test]
    fn test_parse_with_separators() {
        let board: Board = "o_x/___/x_o".parse().unwrap();
        assert_eq!(board.count_of(Mark::O), 2);
        assert_eq!(board.count_of(Mark::X), 2);
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert!("XX".parse::<Board>().is_err());
        let err = "XXQ......".parse::<Board>().unwrap_err();
        assert!(err.message.contains("'Q'"));
    }

    #[test]
    fn test_display_shows_keys_for_empty_squares() {
        let mut board = Board::new();
        board.set(Position::Center, Square::Occupied(Mark::O));
        assert_eq!(board.display(), "1|2|3\n-+-+-\n4|O|6\n-+-+-\n7|8|9");
    }

    #[test]
    fn test_opponent() {
        assert_eq!(Mark::O.opponent(), Mark::X);
        assert_eq!(Mark::X.opponent(), Mark::O);
    }
}
