use crate::{AppCommand, HoldHandler, PressState};

use std::time::Duration;

use tokio::sync::mpsc;
use uuid::Uuid;

const TEST_HOTKEY_ID: u32 = 7;

fn session_of(cmd: &AppCommand) -> Option<Uuid> {
    match cmd {
        AppCommand::StartRecording { session_id } | AppCommand::StopRecording { session_id } => {
            Some(*session_id)
        }
        _ => None,
    }
}

/// WHAT: Press stays Released when the command channel is closed
/// WHY: The handler must never claim a session the app never heard about
#[tokio::test]
async fn given_closed_channel_when_press_begins_then_state_stays_released() {
    // Given: A handler whose command channel is closed
    let (command_tx, command_rx) = mpsc::channel(1);
    drop(command_rx);
    let handler = HoldHandler::new(TEST_HOTKEY_ID, command_tx);

    // When: The press begins
    let result = handler.handle_press_begin().await;

    // Then: The send fails and the press is not tracked
    assert!(result.is_err());
    assert_eq!(handler.press_state().await, PressState::Released);
}

/// WHAT: A press/release pair produces start and stop for one session
/// WHY: The stop must target exactly the session the press started
#[tokio::test]
async fn given_press_and_release_when_handled_then_start_and_stop_share_session() {
    // Given: A handler with an open command channel
    let (command_tx, mut command_rx) = mpsc::channel(32);
    let handler = HoldHandler::new(TEST_HOTKEY_ID, command_tx);

    // When: Press begins and ends
    handler.handle_press_begin().await.unwrap();
    assert!(matches!(
        handler.press_state().await,
        PressState::Held { .. }
    ));
    handler.handle_press_end().await.unwrap();

    // Then: StartRecording then StopRecording arrive for the same session
    let start = command_rx.recv().await.unwrap();
    assert!(matches!(start, AppCommand::StartRecording { .. }));
    let stop = command_rx.recv().await.unwrap();
    assert!(matches!(stop, AppCommand::StopRecording { .. }));
    assert_eq!(session_of(&start), session_of(&stop));

    // And the press is released again
    assert_eq!(handler.press_state().await, PressState::Released);
}

/// WHAT: Auto-repeat press events while held are ignored
/// WHY: One physical hold is one session, not one per key repeat
#[tokio::test]
async fn given_held_press_when_pressed_again_then_repeat_ignored() {
    // Given: A handler already tracking a held press
    let (command_tx, mut command_rx) = mpsc::channel(32);
    let handler = HoldHandler::new(TEST_HOTKEY_ID, command_tx);
    handler.handle_press_begin().await.unwrap();

    // When: A repeat press event arrives, then the release
    handler.handle_press_begin().await.unwrap();
    handler.handle_press_end().await.unwrap();

    // Then: Exactly one start and one stop were sent
    assert!(matches!(
        command_rx.try_recv().unwrap(),
        AppCommand::StartRecording { .. }
    ));
    assert!(matches!(
        command_rx.try_recv().unwrap(),
        AppCommand::StopRecording { .. }
    ));
    assert!(command_rx.try_recv().is_err());
}

/// WHAT: A release without a tracked press sends nothing
/// WHY: Spurious release events must not produce stop commands
#[tokio::test]
async fn given_released_state_when_release_arrives_then_no_command_sent() {
    // Given: A handler with no press in flight
    let (command_tx, mut command_rx) = mpsc::channel(32);
    let handler = HoldHandler::new(TEST_HOTKEY_ID, command_tx);

    // When: A release event arrives
    handler.handle_press_end().await.unwrap();

    // Then: Nothing was sent and the state is unchanged
    assert!(command_rx.try_recv().is_err());
    assert_eq!(handler.press_state().await, PressState::Released);
}

/// WHAT: The press timer runs while held and freezes on release
/// WHY: Press duration is tracked per hold for diagnostics
#[tokio::test(start_paused = true)]
async fn given_held_press_when_time_passes_then_timer_tracks_duration() {
    // Given: A handler with a press in flight
    let (command_tx, _command_rx) = mpsc::channel(32);
    let handler = HoldHandler::new(TEST_HOTKEY_ID, command_tx);
    handler.handle_press_begin().await.unwrap();

    // When: 500ms pass before the release
    tokio::time::sleep(Duration::from_millis(500)).await;
    handler.handle_press_end().await.unwrap();

    // Then: The frozen elapsed is ~0.5s within one tick
    let elapsed = handler.press_elapsed().await;
    assert!(
        elapsed >= Duration::from_millis(400) && elapsed <= Duration::from_millis(500),
        "Expected ~500ms, got {:?}",
        elapsed
    );
}
