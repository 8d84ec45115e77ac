//! Terminal UI for noughts.

mod app;
mod input;
mod ui;

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use noughts_core::ComputerPlayer;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{self, Stdout};
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{error, info, instrument};

use crate::config::Settings;
use crate::controller::{ControllerHandle, GameController};
use crate::events::GameEvent;
use crate::logging;
use app::{Action, App};

type Term = Terminal<CrosstermBackend<Stdout>>;

/// Runs the terminal game until the player quits.
#[instrument(
    skip(settings),
    fields(think_ms = settings.think_ms(), mode = ?settings.default_mode())
)]
pub async fn run_tui(settings: Settings) -> Result<()> {
    logging::init_file(settings.log_file())?;
    info!("Starting noughts TUI");

    let (handle, mut events, controller_task) =
        GameController::spawn(ComputerPlayer::new(), settings.think_delay());

    if let Some(mode) = settings.default_mode() {
        handle.request_reset(*mode)?;
    }

    let mut terminal = setup_terminal()?;

    let res = run_app(&mut terminal, App::new(), &handle, &mut events).await;

    // The controller may already be gone if it failed.
    let _ = handle.shutdown();

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    match controller_task.await {
        Ok(Ok(())) => {}
        Ok(Err(e)) => error!(error = %e, "Controller error"),
        Err(e) => error!(error = %e, "Controller task failed"),
    }

    if let Err(err) = &res {
        error!(error = ?err, "Game loop error");
    }
    res
}

/// Enters raw mode and the alternate screen, undoing both if any step fails.
fn setup_terminal() -> Result<Term> {
    enable_raw_mode()?;
    undo_on_error(enter_screen(), restore_terminal)
}

/// Runs `undo` when a setup step failed, passing the result through.
fn undo_on_error<T>(step: Result<T>, undo: impl FnOnce()) -> Result<T> {
    step.inspect_err(|_| undo())
}

fn enter_screen() -> Result<Term> {
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    Ok(Terminal::new(CrosstermBackend::new(stdout))?)
}

/// Best-effort return to cooked mode after a failed setup.
fn restore_terminal() {
    if let Err(e) = disable_raw_mode() {
        error!(error = %e, "Failed to disable raw mode");
    }
    if let Err(e) = execute!(io::stdout(), LeaveAlternateScreen) {
        error!(error = %e, "Failed to leave alternate screen");
    }
}

async fn run_app(
    terminal: &mut Term,
    mut app: App,
    handle: &ControllerHandle,
    events: &mut mpsc::UnboundedReceiver<GameEvent>,
) -> Result<()> {
    loop {
        while let Ok(event) = events.try_recv() {
            app.handle_event(event);
        }

        terminal.draw(|f| ui::draw(f, &app))?;

        if !event::poll(Duration::from_millis(50))? {
            tokio::task::yield_now().await;
            continue;
        }

        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        match app.handle_key(key.code) {
            Action::None => {}
            Action::Quit => {
                info!("User quit");
                return Ok(());
            }
            Action::Click(index) => handle.human_click(index)?,
            Action::Start(mode) => handle.request_reset(mode)?,
            Action::NewGame => handle.new_game()?,
            Action::ChangeMode => handle.request_mode_change()?,
        }
    }
}
