//! Cursor movement for keyboard navigation.

use crossterm::event::KeyCode;
use noughts_core::Position;

/// Moves the cursor one square with the arrow keys, stopping at the edges.
pub fn move_cursor(cursor: Position, key: KeyCode) -> Position {
    let (row, col) = (cursor.row(), cursor.col());

    let target = match key {
        KeyCode::Up => row.checked_sub(1).map(|r| (r, col)),
        KeyCode::Down => Some((row + 1, col)),
        KeyCode::Left => col.checked_sub(1).map(|c| (row, c)),
        KeyCode::Right => Some((row, col + 1)),
        _ => None,
    };

    target
        .and_then(|(r, c)| Position::from_coords(r, c))
        .unwrap_or(cursor)
}

/// Board index for a 1-9 digit key.
pub fn digit_square(key: KeyCode) -> Option<usize> {
    match key {
        KeyCode::Char(c @ '1'..='9') => c.to_digit(10).map(|d| d as usize - 1),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_moves_within_grid() {
        assert_eq!(
            move_cursor(Position::Center, KeyCode::Up),
            Position::TopCenter
        );
        assert_eq!(
            move_cursor(Position::Center, KeyCode::Down),
            Position::BottomCenter
        );
        assert_eq!(
            move_cursor(Position::Center, KeyCode::Left),
            Position::MiddleLeft
        );
        assert_eq!(
            move_cursor(Position::Center, KeyCode::Right),
            Position::MiddleRight
        );
    }

    #[test]
    fn test_stops_at_edges() {
        assert_eq!(
            move_cursor(Position::TopLeft, KeyCode::Up),
            Position::TopLeft
        );
        assert_eq!(
            move_cursor(Position::TopLeft, KeyCode::Left),
            Position::TopLeft
        );
        assert_eq!(
            move_cursor(Position::BottomRight, KeyCode::Down),
            Position::BottomRight
        );
        assert_eq!(
            move_cursor(Position::BottomRight, KeyCode::Right),
            Position::BottomRight
        );
        assert_eq!(
            move_cursor(Position::MiddleRight, KeyCode::Right),
            Position::MiddleRight
        );
    }

    #[test]
    fn test_other_keys_leave_cursor() {
        assert_eq!(
            move_cursor(Position::Center, KeyCode::Enter),
            Position::Center
        );
    }

    #[test]
    fn test_digit_square() {
        assert_eq!(digit_square(KeyCode::Char('1')), Some(0));
        assert_eq!(digit_square(KeyCode::Char('9')), Some(8));
        assert_eq!(digit_square(KeyCode::Char('0')), None);
        assert_eq!(digit_square(KeyCode::Char('a')), None);
    }
}
