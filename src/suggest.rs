//! One-shot move suggestion for the `suggest` subcommand.

use noughts_core::{Board, BoardParseError, ComputerPlayer, Position};
use tracing::{info, instrument};

/// A parsed board and the computer's answer for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Suggestion {
    /// The board as parsed.
    pub board: Board,
    /// X's move, `None` for a full board.
    pub choice: Option<Position>,
}

impl std::fmt::Display for Suggestion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{}", self.board.display())?;
        writeln!(f)?;
        write!(f, "{}", describe(self.choice))
    }
}

/// Parses `board` and asks the computer player for X's move.
#[instrument(skip(board))]
pub fn suggest(board: &str, seed: Option<u64>) -> Result<Suggestion, BoardParseError> {
    let board: Board = board.parse()?;
    let mut computer = match seed {
        Some(seed) => ComputerPlayer::seeded(seed),
        None => ComputerPlayer::new(),
    };
    let choice = computer.select_move(&board);
    info!(board = %board.to_compact(), choice = ?choice, "Suggested move");
    Ok(Suggestion { board, choice })
}

/// One-line rendering of a suggestion: index, 1-9 key, and label.
pub fn describe(choice: Option<Position>) -> String {
    match choice {
        Some(position) => format!(
            "{} (key {}) {}",
            position.to_index(),
            position.to_index() + 1,
            position.label()
        ),
        None => "no move: board is full".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_suggest_blocks() {
        let suggestion = suggest("OO.|X..|...", None).unwrap();
        assert_eq!(suggestion.choice, Some(Position::TopRight));
        assert_eq!(suggestion.board.to_compact(), "OO.X.....");
    }

    #[test]
    fn test_suggest_seeded_is_repeatable() {
        let first = suggest("....O....", Some(9)).unwrap().choice;
        assert_eq!(suggest("....o....", Some(9)).unwrap().choice, first);
        assert!(Position::CORNERS.contains(&first.unwrap()));
    }

    #[test]
    fn test_suggest_rejects_bad_board() {
        assert!(suggest("OOX", None).is_err());
        assert!(suggest("OOXQ.....", None).is_err());
    }

    #[test]
    fn test_describe() {
        assert_eq!(describe(Some(Position::Center)), "4 (key 5) Center");
        assert_eq!(describe(None), "no move: board is full");
    }

    #[test]
    fn test_output_shows_board_then_move() {
        let suggestion = suggest("OO.X.....", None).unwrap();
        assert_eq!(
            suggestion.to_string(),
            "O|O|3\n-+-+-\nX|5|6\n-+-+-\n7|8|9\n\n2 (key 3) Top-right"
        );
    }
}
