//! End-to-end tests driving a spawned controller through its handle.

use noughts::{ControllerHandle, GameController, GameEvent};
use noughts_core::{ComputerPlayer, GameMode, Mark, Outcome, Position};
use std::time::Duration;
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::time::timeout;

const THINK: Duration = Duration::from_millis(500);

fn spawn() -> (ControllerHandle, UnboundedReceiver<GameEvent>) {
    let (handle, events, _task) = GameController::spawn(ComputerPlayer::seeded(5), THINK);
    (handle, events)
}

/// Next event, or `None` if nothing arrives within a few think delays.
async fn next(events: &mut UnboundedReceiver<GameEvent>) -> Option<GameEvent> {
    timeout(THINK * 4, events.recv()).await.ok().flatten()
}

fn cell(index: usize, mark: Mark) -> GameEvent {
    GameEvent::CellUpdated {
        position: Position::from_index(index).unwrap(),
        mark,
    }
}

fn status(text: &str) -> GameEvent {
    GameEvent::StatusChanged(text.to_string())
}

#[tokio::test(start_paused = true)]
async fn test_two_player_game_to_draw() {
    let (handle, mut events) = spawn();
    handle.request_reset(GameMode::TwoPlayer).unwrap();
    assert_eq!(
        next(&mut events).await,
        Some(GameEvent::BoardCleared {
            mode: GameMode::TwoPlayer
        })
    );
    assert_eq!(next(&mut events).await, Some(status("Player O's turn")));

    let moves = [1, 0, 3, 2, 5, 4, 6, 7, 8];
    for (i, &index) in moves.iter().enumerate() {
        handle.human_click(index).unwrap();
        let mark = if i % 2 == 0 { Mark::O } else { Mark::X };
        assert_eq!(next(&mut events).await, Some(cell(index, mark)));
        if i + 1 < moves.len() {
            let text = format!("Player {}'s turn", mark.opponent());
            assert_eq!(next(&mut events).await, Some(status(&text)));
        }
    }

    assert_eq!(
        next(&mut events).await,
        Some(GameEvent::GameEnded {
            outcome: Outcome::Draw,
            banner: "Game was a Draw.".to_string(),
        })
    );

    // Board is full and the game is over.
    handle.human_click(4).unwrap();
    assert_eq!(next(&mut events).await, None);
}

#[tokio::test(start_paused = true)]
async fn test_player_o_wins_in_two_player() {
    let (handle, mut events) = spawn();
    handle.request_reset(GameMode::TwoPlayer).unwrap();
    for index in [0, 3, 1, 4, 2] {
        handle.human_click(index).unwrap();
    }

    let mut last = None;
    while let Some(event) = next(&mut events).await {
        last = Some(event);
    }
    assert_eq!(
        last,
        Some(GameEvent::GameEnded {
            outcome: Outcome::Win(Mark::O),
            banner: "Congratulations, Player O wins!".to_string(),
        })
    );
}

#[tokio::test(start_paused = true)]
async fn test_computer_replies_after_think_delay() {
    let (handle, mut events) = spawn();
    handle.request_reset(GameMode::VsComputer).unwrap();
    next(&mut events).await;
    next(&mut events).await;

    handle.human_click(0).unwrap();
    assert_eq!(next(&mut events).await, Some(cell(0, Mark::O)));
    assert_eq!(next(&mut events).await, Some(status("Computer's turn (X)")));
    assert_eq!(next(&mut events).await, Some(GameEvent::ComputerThinking));

    let start = tokio::time::Instant::now();
    assert_eq!(next(&mut events).await, Some(cell(4, Mark::X)));
    assert!(start.elapsed() >= THINK);
    assert_eq!(next(&mut events).await, Some(status("Player O's turn")));
}

#[tokio::test(start_paused = true)]
async fn test_clicks_during_computer_turn_are_ignored() {
    let (handle, mut events) = spawn();
    handle.request_reset(GameMode::VsComputer).unwrap();
    handle.human_click(0).unwrap();
    handle.human_click(1).unwrap();
    handle.human_click(2).unwrap();

    let mut seen = Vec::new();
    while let Some(event) = next(&mut events).await {
        seen.push(event);
    }

    assert!(!seen.contains(&cell(1, Mark::O)));
    assert!(!seen.contains(&cell(1, Mark::X)));
    assert!(!seen.contains(&cell(2, Mark::O)));
    assert_eq!(seen.last(), Some(&status("Player O's turn")));
}

#[tokio::test(start_paused = true)]
async fn test_reset_during_think_delay_discards_move() {
    let (handle, mut events) = spawn();
    handle.request_reset(GameMode::VsComputer).unwrap();
    handle.human_click(0).unwrap();
    handle.request_reset(GameMode::VsComputer).unwrap();

    let expected = vec![
        GameEvent::BoardCleared {
            mode: GameMode::VsComputer,
        },
        status("Player O's turn"),
        cell(0, Mark::O),
        status("Computer's turn (X)"),
        GameEvent::ComputerThinking,
        GameEvent::BoardCleared {
            mode: GameMode::VsComputer,
        },
        status("Player O's turn"),
    ];
    for event in expected {
        assert_eq!(next(&mut events).await, Some(event));
    }

    // No stale X move lands on the new board.
    assert_eq!(next(&mut events).await, None);
}

#[tokio::test(start_paused = true)]
async fn test_reset_to_two_player_discards_move() {
    let (handle, mut events) = spawn();
    handle.request_reset(GameMode::VsComputer).unwrap();
    handle.human_click(4).unwrap();
    tokio::time::sleep(THINK / 2).await;
    handle.request_reset(GameMode::TwoPlayer).unwrap();

    let mut seen = Vec::new();
    while let Some(event) = next(&mut events).await {
        seen.push(event);
    }
    assert!(seen.iter().all(|e| !matches!(e, GameEvent::CellUpdated { mark: Mark::X, .. })));
    assert_eq!(seen.last(), Some(&status("Player O's turn")));
}

#[tokio::test(start_paused = true)]
async fn test_mode_change_then_new_game() {
    let (handle, mut events) = spawn();
    handle.request_reset(GameMode::TwoPlayer).unwrap();
    handle.human_click(0).unwrap();
    handle.request_mode_change().unwrap();
    handle.human_click(1).unwrap();

    let mut seen = Vec::new();
    while let Some(event) = next(&mut events).await {
        seen.push(event);
    }
    assert_eq!(seen.last(), Some(&GameEvent::ModeSelection));

    handle.request_reset(GameMode::VsComputer).unwrap();
    assert_eq!(
        next(&mut events).await,
        Some(GameEvent::BoardCleared {
            mode: GameMode::VsComputer
        })
    );
}

#[tokio::test(start_paused = true)]
async fn test_shutdown_ends_controller() {
    let (handle, mut events, task) = GameController::spawn(ComputerPlayer::seeded(1), THINK);
    handle.shutdown().unwrap();
    task.await.unwrap().unwrap();
    assert_eq!(events.recv().await, None);
    assert!(handle.new_game().is_err());
}
