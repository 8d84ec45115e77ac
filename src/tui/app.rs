//! Application state and key handling.

use crossterm::event::KeyCode;
use noughts_core::{Board, GameMode, Position, Square};
use strum::IntoEnumIterator;
use tracing::debug;

use super::input::{digit_square, move_cursor};
use crate::events::GameEvent;

/// Which screen is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    /// Choosing "vs Friend" or "vs Computer".
    ModeSelect,
    /// The board.
    Playing,
}

/// What a key press asks the controller to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Nothing to send.
    None,
    /// Leave the program.
    Quit,
    /// Play the square at this index.
    Click(usize),
    /// Start a game in this mode.
    Start(GameMode),
    /// Restart in the current mode.
    NewGame,
    /// Back to the mode selector.
    ChangeMode,
}

/// Main application state. A view of the controller's events, never the
/// source of truth for the game.
#[derive(Debug)]
pub struct App {
    screen: Screen,
    board: Board,
    mode: GameMode,
    status: String,
    banner: Option<String>,
    thinking: bool,
    cursor: Position,
    selected_mode: usize,
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

impl App {
    /// Creates the app on the mode selector.
    pub fn new() -> Self {
        Self {
            screen: Screen::ModeSelect,
            board: Board::new(),
            mode: GameMode::default(),
            status: "Choose a mode".to_string(),
            banner: None,
            thinking: false,
            cursor: Position::Center,
            selected_mode: 0,
        }
    }

    /// Current screen.
    pub fn screen(&self) -> Screen {
        self.screen
    }

    /// Board as last reported by the controller.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Mode of the current game.
    pub fn mode(&self) -> GameMode {
        self.mode
    }

    /// Status line text.
    pub fn status(&self) -> &str {
        &self.status
    }

    /// Result banner, once the game has ended.
    pub fn banner(&self) -> Option<&str> {
        self.banner.as_deref()
    }

    /// True between scheduling and playing the computer's move.
    pub fn thinking(&self) -> bool {
        self.thinking
    }

    /// Highlighted square.
    pub fn cursor(&self) -> Position {
        self.cursor
    }

    /// Index into [`GameMode::iter`] highlighted on the mode selector.
    pub fn selected_mode(&self) -> usize {
        self.selected_mode
    }

    /// Applies a controller event.
    pub fn handle_event(&mut self, event: GameEvent) {
        debug!(?event, "Handling game event");

        match event {
            GameEvent::CellUpdated { position, mark } => {
                self.board.set(position, Square::Occupied(mark));
            }
            GameEvent::StatusChanged(status) => {
                self.status = status;
                self.thinking = false;
            }
            GameEvent::ComputerThinking => {
                self.thinking = true;
            }
            GameEvent::GameEnded { banner, .. } => {
                self.banner = Some(banner);
                self.thinking = false;
            }
            GameEvent::BoardCleared { mode } => {
                self.screen = Screen::Playing;
                self.board = Board::new();
                self.mode = mode;
                self.banner = None;
                self.thinking = false;
                self.cursor = Position::Center;
            }
            GameEvent::ModeSelection => {
                self.screen = Screen::ModeSelect;
                self.board = Board::new();
                self.banner = None;
                self.thinking = false;
                self.status = "Choose a mode".to_string();
            }
        }
    }

    /// Maps a key press to an action, moving local cursors as needed.
    pub fn handle_key(&mut self, key: KeyCode) -> Action {
        if matches!(key, KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc) {
            return Action::Quit;
        }

        match self.screen {
            Screen::ModeSelect => self.handle_mode_key(key),
            Screen::Playing => self.handle_board_key(key),
        }
    }

    fn handle_mode_key(&mut self, key: KeyCode) -> Action {
        let count = GameMode::iter().count();
        match key {
            KeyCode::Up => {
                self.selected_mode = (self.selected_mode + count - 1) % count;
                Action::None
            }
            KeyCode::Down => {
                self.selected_mode = (self.selected_mode + 1) % count;
                Action::None
            }
            KeyCode::Enter => GameMode::iter()
                .nth(self.selected_mode)
                .map_or(Action::None, Action::Start),
            KeyCode::Char(c) => c
                .to_digit(10)
                .and_then(|d| (d as usize).checked_sub(1))
                .and_then(|i| GameMode::iter().nth(i))
                .map_or(Action::None, Action::Start),
            _ => Action::None,
        }
    }

    fn handle_board_key(&mut self, key: KeyCode) -> Action {
        if let Some(index) = digit_square(key) {
            return Action::Click(index);
        }

        match key {
            KeyCode::Up | KeyCode::Down | KeyCode::Left | KeyCode::Right => {
                self.cursor = move_cursor(self.cursor, key);
                Action::None
            }
            KeyCode::Enter | KeyCode::Char(' ') => Action::Click(self.cursor.to_index()),
            KeyCode::Char('n') | KeyCode::Char('r') => Action::NewGame,
            KeyCode::Char('m') => Action::ChangeMode,
            _ => Action::None,
        }
    }
}
