//! Checkable properties of a [`GameState`].
//!
//! Every accepted move is followed by [`check_all`] in debug builds. The
//! individual invariants are public so tests can check them directly.

use crate::game::{GameState, Phase};
use crate::rules::WIN_PATTERNS;
use crate::{Mark, Square};

/// A logical property that must hold for a given state.
pub trait Invariant<S> {
    /// Checks if the invariant holds for the given state.
    fn holds(state: &S) -> bool;

    /// Human-readable description of the invariant.
    fn description() -> &'static str;
}

/// Violation of an invariant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub description: String,
}

impl InvariantViolation {
    /// Creates a new invariant violation.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }
}

/// A set of invariants checked together.
pub trait InvariantSet<S> {
    /// Checks all invariants in the set, collecting every violation.
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>>;
}

impl<S, I1, I2, I3> InvariantSet<S> for (I1, I2, I3)
where
    I1: Invariant<S>,
    I2: Invariant<S>,
    I3: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        let violations: Vec<_> = [
            (I1::holds(state), I1::description()),
            (I2::holds(state), I2::description()),
            (I3::holds(state), I3::description()),
        ]
        .into_iter()
        .filter(|(holds, _)| !holds)
        .map(|(_, description)| InvariantViolation::new(description))
        .collect();

        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}

/// The number of occupied squares equals the move count.
pub struct CountMatchesBoard;

impl Invariant<GameState> for CountMatchesBoard {
    fn holds(state: &GameState) -> bool {
        state.board().occupied_count() == usize::from(state.count())
    }

    fn description() -> &'static str {
        "Occupied squares equal the move count"
    }
}

/// O moves on even counts, X on odd counts, and the marks on the board
/// reflect that alternation.
pub struct TurnParity;

impl Invariant<GameState> for TurnParity {
    fn holds(state: &GameState) -> bool {
        let board = state.board();
        let o = board.count_of(Mark::O);
        let x = board.count_of(Mark::X);
        if o != x && o != x + 1 {
            return false;
        }
        if state.phase() != Phase::InProgress {
            return true;
        }
        let expected = if state.count() % 2 == 0 { Mark::O } else { Mark::X };
        state.turn() == expected
    }

    fn description() -> &'static str {
        "Turns alternate O, X, O, ... starting with O"
    }
}

/// At most one mark owns a completed pattern.
pub struct SingleWinner;

impl Invariant<GameState> for SingleWinner {
    fn holds(state: &GameState) -> bool {
        let board = state.board();
        let owns_line = |mark: Mark| {
            WIN_PATTERNS
                .iter()
                .any(|pattern| pattern.iter().all(|&p| board.get(p) == Square::Occupied(mark)))
        };
        !(owns_line(Mark::O) && owns_line(Mark::X))
    }

    fn description() -> &'static str {
        "At most one player has three in a row"
    }
}

/// All game invariants as a composable set.
pub type GameInvariants = (CountMatchesBoard, TurnParity, SingleWinner);

/// Checks every game invariant.
pub fn check_all(state: &GameState) -> Result<(), Vec<InvariantViolation>> {
    <GameInvariants as InvariantSet<GameState>>::check_all(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GameMode;

    #[test]
    fn test_fresh_state_holds() {
        let mut game = GameState::new();
        assert!(check_all(&game).is_ok());
        game.reset(GameMode::TwoPlayer);
        assert!(check_all(&game).is_ok());
    }

    #[test]
    fn test_holds_through_a_game() {
        let mut game = GameState::new();
        game.reset(GameMode::TwoPlayer);
        for idx in [4, 0, 8, 2, 1, 7, 6, 3, 5] {
            game.apply_move(idx);
            assert!(CountMatchesBoard::holds(&game));
            assert!(TurnParity::holds(&game));
            assert!(SingleWinner::holds(&game));
        }
    }

    #[test]
    fn test_violation_descriptions_are_distinct() {
        let descriptions = [
            CountMatchesBoard::description(),
            TurnParity::description(),
            SingleWinner::description(),
        ];
        assert_ne!(descriptions[0], descriptions[1]);
        assert_ne!(descriptions[1], descriptions[2]);
    }
}
