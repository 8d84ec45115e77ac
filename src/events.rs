//! Messages crossing the boundary between the controller and the UI.

use noughts_core::{GameMode, Mark, Outcome, Position};

/// Requests sent to the [`GameController`](crate::GameController).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// A human clicked/pressed the square at this index.
    HumanClick(usize),
    /// Start a fresh game in the given mode.
    RequestReset(GameMode),
    /// Start a fresh game in the current mode.
    NewGame,
    /// Abandon the game and go back to mode selection.
    RequestModeChange,
    /// The think delay elapsed for the computer move scheduled at `generation`.
    ComputerTurn {
        /// Reset token captured when the move was scheduled.
        generation: u64,
    },
    /// Stop the controller loop.
    Shutdown,
}

/// Notifications the UI renders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    /// A square now shows `mark`.
    CellUpdated {
        /// Square that changed.
        position: Position,
        /// Mark placed there.
        mark: Mark,
    },
    /// Whose turn it is, as display text.
    StatusChanged(String),
    /// The game finished.
    GameEnded {
        /// Win or draw.
        outcome: Outcome,
        /// Display text for the result banner.
        banner: String,
    },
    /// The board was cleared for a new game.
    BoardCleared {
        /// Mode of the new game.
        mode: GameMode,
    },
    /// The computer's move is scheduled.
    ComputerThinking,
    /// The UI should show the mode selector.
    ModeSelection,
}

/// Status line text for the mark about to move.
pub fn status_text(mode: GameMode, turn: Mark) -> String {
    match (mode, turn) {
        (GameMode::VsComputer, Mark::X) => "Computer's turn (X)".to_string(),
        (_, mark) => format!("Player {}'s turn", mark),
    }
}

/// Result banner text.
pub fn result_banner(mode: GameMode, outcome: Outcome) -> String {
    match outcome {
        Outcome::Win(Mark::X) if mode == GameMode::VsComputer => {
            "Congratulations, Computer wins!".to_string()
        }
        Outcome::Win(mark) => format!("Congratulations, Player {} wins!", mark),
        Outcome::Draw => "Game was a Draw.".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_text() {
        assert_eq!(status_text(GameMode::TwoPlayer, Mark::O), "Player O's turn");
        assert_eq!(status_text(GameMode::TwoPlayer, Mark::X), "Player X's turn");
        assert_eq!(
            status_text(GameMode::VsComputer, Mark::O),
            "Player O's turn"
        );
        assert_eq!(
            status_text(GameMode::VsComputer, Mark::X),
            "Computer's turn (X)"
        );
    }

    #[test]
    fn test_result_banner() {
        assert_eq!(
            result_banner(GameMode::VsComputer, Outcome::Win(Mark::X)),
            "Congratulations, Computer wins!"
        );
        assert_eq!(
            result_banner(GameMode::TwoPlayer, Outcome::Win(Mark::X)),
            "Congratulations, Player X wins!"
        );
        assert_eq!(
            result_banner(GameMode::VsComputer, Outcome::Win(Mark::O)),
            "Congratulations, Player O wins!"
        );
        assert_eq!(
            result_banner(GameMode::TwoPlayer, Outcome::Draw),
            "Game was a Draw."
        );
    }
}
