//! Press-and-hold gesture handler built on the global hotkey.
//!
//! Key-down starts the press timer and a recording session; key-up stops
//! both and hands the session to transcription. Uses async channels to
//! communicate with the main application.

use crate::{AppCommand, AppError, AppResult, PressState, PressTimer};

use std::{
    panic::Location,
    sync::Arc,
    time::{Duration, Instant},
};

use error_location::ErrorLocation;
use global_hotkey::{
    GlobalHotKeyEvent, GlobalHotKeyManager, HotKeyState,
    hotkey::{Code, HotKey, Modifiers},
};
use tokio::sync::{Mutex, mpsc, watch};
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

/// Minimum engagement for a press to count as a long press.
///
/// One timer tick, matching the press-timer cadence. Shorter presses still
/// complete a full stop/transcribe cycle; they are merely logged as
/// sub-threshold.
pub(crate) const MIN_ENGAGEMENT: Duration = Duration::from_millis(100);

struct HoldState {
    press: PressState,
    timer: PressTimer,
}

/// Hold-to-record gesture handler.
pub struct HoldHandler {
    hotkey_id: u32,
    state: Arc<Mutex<HoldState>>,
    command_tx: mpsc::Sender<AppCommand>,
}

impl HoldHandler {
    /// Register CTRL+SHIFT+Space as the hold-to-record key.
    ///
    /// Must be called on a thread with a message pump (e.g. the main thread
    /// running a `tao` event loop) so that `WM_HOTKEY` messages are
    /// dispatched on Windows. The returned [`GlobalHotKeyManager`] must be
    /// kept alive on that thread for the hotkey to remain registered.
    #[track_caller]
    #[instrument]
    pub fn register_hotkey() -> AppResult<(GlobalHotKeyManager, u32)> {
        let manager =
            GlobalHotKeyManager::new().map_err(|e| AppError::HotkeyRegistrationFailed {
                reason: format!("Failed to create manager: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        let hotkey = HotKey::new(Some(Modifiers::CONTROL | Modifiers::SHIFT), Code::Space);

        manager
            .register(hotkey)
            .map_err(|e| AppError::HotkeyRegistrationFailed {
                reason: format!("Failed to register CTRL+SHIFT+Space: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        info!(hotkey = "CTRL+SHIFT+Space", "Hold-to-record key registered");

        Ok((manager, hotkey.id()))
    }

    /// Create a handler for a previously registered hotkey.
    ///
    /// The `hotkey_id` should come from [`register_hotkey`]. This struct is
    /// `Send` and can live on any thread; it only listens on the global
    /// [`GlobalHotKeyEvent`] channel.
    pub fn new(hotkey_id: u32, command_tx: mpsc::Sender<AppCommand>) -> Self {
        Self {
            hotkey_id,
            state: Arc::new(Mutex::new(HoldState {
                press: PressState::Released,
                timer: PressTimer::new(),
            })),
            command_tx,
        }
    }

    /// Run the gesture event loop.
    ///
    /// This method blocks until a shutdown signal is received.
    #[instrument(skip(self))]
    pub async fn run(&self, mut shutdown_rx: watch::Receiver<bool>) -> AppResult<()> {
        let receiver = GlobalHotKeyEvent::receiver().clone();
        let (event_tx, mut event_rx) = mpsc::channel(32);

        // Single persistent blocking task that forwards hotkey events.
        // GlobalHotKeyEvent::receiver() returns a crossbeam_channel::Receiver
        // which has blocking recv() -- zero polling, instant response, one thread.
        //
        // Shutdown: when event_rx is dropped (loop breaks), the next
        // event_tx.blocking_send() fails, breaking the blocking loop.
        // The JoinHandle is awaited with a timeout after the main loop exits.
        let handle = tokio::task::spawn_blocking(move || {
            while let Ok(event) = receiver.recv() {
                if event_tx.blocking_send(event).is_err() {
                    break;
                }
            }
        });

        loop {
            tokio::select! {
                _ = shutdown_rx.changed() => {
                    info!("Hold handler shutting down");
                    break;
                }
                Some(event) = event_rx.recv() => {
                    if event.id == self.hotkey_id {
                        match event.state {
                            HotKeyState::Pressed => self.handle_press_begin().await?,
                            HotKeyState::Released => self.handle_press_end().await?,
                        }
                    }
                }
            }
        }

        // Drop event_rx to unblock the blocking task's next blocking_send().
        drop(event_rx);

        // Best-effort join: the blocking task may be stuck in recv() if no
        // hotkey event arrives after shutdown. Use a timeout to avoid hanging.
        match tokio::time::timeout(Duration::from_secs(1), handle).await {
            Ok(Ok(())) => debug!("Hotkey event forwarder stopped cleanly"),
            Ok(Err(e)) => warn!(error = ?e, "Hotkey event forwarder task panicked"),
            Err(_) => debug!(
                "Hotkey event forwarder did not stop within timeout, \
                   will be cleaned up on exit"
            ),
        }

        Ok(())
    }

    #[instrument(skip(self))]
    pub(crate) async fn handle_press_begin(&self) -> AppResult<()> {
        let mut state = self.state.lock().await;

        if let PressState::Held { session_id, .. } = state.press {
            // Key auto-repeat delivers extra Pressed events while held.
            debug!(session_id = %session_id, "Repeat press ignored, already held");
            return Ok(());
        }

        let session_id = Uuid::new_v4();

        // Send command FIRST -- if this fails, the press stays Released and
        // no timer runs, so the handler never claims a session the app
        // never heard about.
        self.command_tx
            .send(AppCommand::StartRecording { session_id })
            .await
            .map_err(|e| AppError::ChannelSendFailed {
                message: format!("Failed to send StartRecording: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        state.timer.start();
        state.press = PressState::Held {
            pressed_at: Instant::now(),
            session_id,
        };

        info!(session_id = %session_id, "Press began, recording requested");

        Ok(())
    }

    #[instrument(skip(self))]
    pub(crate) async fn handle_press_end(&self) -> AppResult<()> {
        let mut state = self.state.lock().await;

        let PressState::Held {
            pressed_at,
            session_id,
        } = state.press
        else {
            debug!("Release without a tracked press, ignoring");
            return Ok(());
        };

        state.timer.stop();
        let held = pressed_at.elapsed();

        if held >= MIN_ENGAGEMENT {
            info!(
                session_id = %session_id,
                duration_ms = held.as_millis(),
                elapsed_ms = state.timer.elapsed().as_millis(),
                "Long press completed"
            );
        } else {
            debug!(
                session_id = %session_id,
                duration_ms = held.as_millis(),
                "Press released below engagement threshold"
            );
        }

        // The press is over regardless of whether the command gets through;
        // an orphaned session is recovered by the controller's implicit stop
        // on the next start.
        state.press = PressState::Released;

        self.command_tx
            .send(AppCommand::StopRecording { session_id })
            .await
            .map_err(|e| AppError::ChannelSendFailed {
                message: format!("Failed to send StopRecording: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        Ok(())
    }

    #[cfg(test)]
    pub(crate) async fn press_state(&self) -> PressState {
        self.state.lock().await.press
    }

    #[cfg(test)]
    pub(crate) async fn press_elapsed(&self) -> Duration {
        self.state.lock().await.timer.elapsed()
    }
}
