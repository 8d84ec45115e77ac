//! Pure rule functions over a [`Board`](crate::Board).
//!
//! Rules are kept apart from [`GameState`](crate::GameState) so the computer
//! player and the invariant checks can evaluate boards without a game.

pub mod win;

pub use win::{WIN_PATTERNS, WinPattern, find_win};
