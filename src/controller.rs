//! Game orchestration: the single owner of the [`GameState`].
//!
//! The controller runs as one task and handles [`Command`]s one at a time.
//! A computer move is deferred by the think delay as a separate task that
//! posts [`Command::ComputerTurn`] back to the controller, tagged with the
//! generation it was scheduled under. Resets abort the pending task, and a
//! turn that still arrives for an older generation is dropped.

use crate::events::{Command, GameEvent, result_banner, status_text};
use anyhow::Result;
use noughts_core::{ComputerPlayer, GameMode, GameState, Mark, MoveResult, Outcome, Position};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, instrument, warn};

/// Cloneable sender the UI uses to drive the controller.
#[derive(Debug, Clone)]
pub struct ControllerHandle {
    tx: mpsc::UnboundedSender<Command>,
}

impl ControllerHandle {
    /// Sends a raw command.
    pub fn send(&self, command: Command) -> Result<()> {
        self.tx.send(command)?;
        Ok(())
    }

    /// Forwards a human move.
    pub fn human_click(&self, index: usize) -> Result<()> {
        self.send(Command::HumanClick(index))
    }

    /// Starts a fresh game in `mode`.
    pub fn request_reset(&self, mode: GameMode) -> Result<()> {
        self.send(Command::RequestReset(mode))
    }

    /// Starts a fresh game in the current mode.
    pub fn new_game(&self) -> Result<()> {
        self.send(Command::NewGame)
    }

    /// Abandons the game and asks the UI for a mode.
    pub fn request_mode_change(&self) -> Result<()> {
        self.send(Command::RequestModeChange)
    }

    /// Stops the controller loop.
    pub fn shutdown(&self) -> Result<()> {
        self.send(Command::Shutdown)
    }
}

/// Owns the game state and turns commands into events.
#[derive(Debug)]
pub struct GameController {
    state: GameState,
    computer: ComputerPlayer,
    think_delay: Duration,
    command_tx: mpsc::UnboundedSender<Command>,
    event_tx: mpsc::UnboundedSender<GameEvent>,
    pending: Option<JoinHandle<()>>,
}

impl GameController {
    /// Creates a controller. `command_tx` must feed the receiver passed to
    /// [`run`](Self::run); deferred computer turns are posted through it.
    pub fn new(
        computer: ComputerPlayer,
        think_delay: Duration,
        command_tx: mpsc::UnboundedSender<Command>,
        event_tx: mpsc::UnboundedSender<GameEvent>,
    ) -> Self {
        Self {
            state: GameState::new(),
            computer,
            think_delay,
            command_tx,
            event_tx,
            pending: None,
        }
    }

    /// Spawns a controller task and returns its handle, event stream, and
    /// join handle.
    #[instrument(skip(computer))]
    pub fn spawn(
        computer: ComputerPlayer,
        think_delay: Duration,
    ) -> (
        ControllerHandle,
        mpsc::UnboundedReceiver<GameEvent>,
        JoinHandle<Result<()>>,
    ) {
        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let (event_tx, event_rx) = mpsc::unbounded_channel();

        let controller = Self::new(computer, think_delay, command_tx.clone(), event_tx);
        let task = tokio::spawn(controller.run(command_rx));

        (ControllerHandle { tx: command_tx }, event_rx, task)
    }

    /// Processes commands until [`Command::Shutdown`] or the channel closes.
    pub async fn run(mut self, mut commands: mpsc::UnboundedReceiver<Command>) -> Result<()> {
        info!("Starting game controller");

        while let Some(command) = commands.recv().await {
            if command == Command::Shutdown {
                break;
            }
            self.handle(command)?;
        }

        info!("Game controller stopped");
        Ok(())
    }

    /// Handles a single command to completion.
    #[instrument(skip(self), fields(generation = self.state.generation()))]
    pub fn handle(&mut self, command: Command) -> Result<()> {
        match command {
            Command::HumanClick(index) => self.human_click(index),
            Command::RequestReset(mode) => self.request_reset(mode),
            Command::NewGame => self.request_reset(self.state.mode()),
            Command::RequestModeChange => self.request_mode_change(),
            Command::ComputerTurn { generation } => self.computer_turn(generation),
            Command::Shutdown => Ok(()),
        }
    }

    /// Current game state.
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// True while a computer turn is scheduled.
    pub fn has_pending_turn(&self) -> bool {
        self.pending.is_some()
    }

    fn human_click(&mut self, index: usize) -> Result<()> {
        if self.state.mode() == GameMode::VsComputer && self.state.turn() == Mark::X {
            debug!(index, "Ignoring click during computer's turn");
            return Ok(());
        }
        self.play(index)
    }

    fn computer_turn(&mut self, generation: u64) -> Result<()> {
        if generation != self.state.generation() {
            debug!(
                scheduled = generation,
                current = self.state.generation(),
                "Discarding stale computer turn"
            );
            return Ok(());
        }
        self.pending = None;

        if !self.state.is_active()
            || self.state.mode() != GameMode::VsComputer
            || self.state.turn() != Mark::X
        {
            debug!("Computer turn no longer applies");
            return Ok(());
        }

        match self.computer.select_move(self.state.board()) {
            Some(position) => {
                debug!(position = %position, "Computer chose position");
                self.play(position.to_index())
            }
            None => {
                warn!("Computer turn on a full board");
                Ok(())
            }
        }
    }

    fn request_reset(&mut self, mode: GameMode) -> Result<()> {
        self.cancel_pending();
        self.state.reset(mode);
        info!(%mode, generation = self.state.generation(), "New game");

        self.emit(GameEvent::BoardCleared { mode })?;
        self.emit(GameEvent::StatusChanged(status_text(mode, self.state.turn())))
    }

    fn request_mode_change(&mut self) -> Result<()> {
        self.cancel_pending();
        self.state.end_session();
        info!("Returning to mode selection");
        self.emit(GameEvent::ModeSelection)
    }

    fn play(&mut self, index: usize) -> Result<()> {
        let Some(position) = Position::from_index(index) else {
            debug!(index, "Ignoring off-board square");
            return Ok(());
        };
        let mover = self.state.turn();
        let mode = self.state.mode();

        let result = self.state.apply_move(index);
        if let MoveResult::Rejected(reason) = result {
            debug!(position = %position, %reason, "Move rejected");
            return Ok(());
        }

        self.emit(GameEvent::CellUpdated {
            position,
            mark: mover,
        })?;

        match result {
            MoveResult::Continue { next_turn } => {
                self.emit(GameEvent::StatusChanged(status_text(mode, next_turn)))?;
                if mode == GameMode::VsComputer && next_turn == Mark::X {
                    self.schedule_computer_turn()?;
                }
                Ok(())
            }
            MoveResult::Win { winner, pattern } => {
                info!(%winner, ?pattern, "Game won");
                self.finish(mode, Outcome::Win(winner))
            }
            MoveResult::Draw => {
                info!("Game drawn");
                self.finish(mode, Outcome::Draw)
            }
            MoveResult::Rejected(_) => Ok(()),
        }
    }

    fn finish(&mut self, mode: GameMode, outcome: Outcome) -> Result<()> {
        self.emit(GameEvent::GameEnded {
            outcome,
            banner: result_banner(mode, outcome),
        })
    }

    fn schedule_computer_turn(&mut self) -> Result<()> {
        self.cancel_pending();

        let generation = self.state.generation();
        let delay = self.think_delay;
        let commands = self.command_tx.clone();
        debug!(generation, delay_ms = delay.as_millis() as u64, "Scheduling computer turn");

        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if commands.send(Command::ComputerTurn { generation }).is_err() {
                debug!(generation, "Controller gone before computer turn fired");
            }
        }));

        self.emit(GameEvent::ComputerThinking)
    }

    fn cancel_pending(&mut self) {
        if let Some(task) = self.pending.take() {
            task.abort();
            debug!("Cancelled pending computer turn");
        }
    }

    fn emit(&self, event: GameEvent) -> Result<()> {
        self.event_tx.send(event)?;
        Ok(())
    }
}

impl Drop for GameController {
    fn drop(&mut self) {
        self.cancel_pending();
    }
}
