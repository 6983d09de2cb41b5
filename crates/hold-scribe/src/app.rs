use crate::{
    AppCommand, AppResult, DisplayModel, DisplaySnapshot, RecognitionOutcome, SurfaceCommand,
    config::Config,
};

use std::sync::Arc;

use hold_scribe_core::{
    AuthorizationStatus, CpalRecorder, RecognitionService, RecordingController, RodioPlayer,
    WhisperRecognizer,
};
use tao::event_loop::EventLoopProxy;
use tokio::sync::{Mutex, mpsc, watch};
use tracing::{debug, error, info, instrument, warn};
use tray_icon::menu::MenuEvent;
use uuid::Uuid;

pub(crate) type Controller = RecordingController<CpalRecorder, RodioPlayer>;

/// Main application state.
///
/// Runs on the async runtime thread and serializes every display mutation.
/// Tray updates are forwarded to the main thread via `surface_proxy` because
/// `TrayIcon` is `!Send` and must remain on the UI thread.
pub struct App {
    pub(crate) controller: Arc<Mutex<Controller>>,
    pub(crate) recognizer: Arc<Mutex<WhisperRecognizer>>,
    pub(crate) display: DisplayModel,
    pub(crate) display_rx: watch::Receiver<DisplaySnapshot>,
    pub(crate) surface_proxy: EventLoopProxy<SurfaceCommand>,
    pub(crate) config: Arc<Mutex<Config>>,
    pub(crate) command_tx: mpsc::Sender<AppCommand>,
    pub(crate) command_rx: mpsc::Receiver<AppCommand>,
    pub(crate) outcome_tx: mpsc::Sender<RecognitionOutcome>,
    pub(crate) outcome_rx: mpsc::Receiver<RecognitionOutcome>,
    pub(crate) shutdown_tx: watch::Sender<bool>,
    pub(crate) play_menu_id: tray_icon::menu::MenuId,
    pub(crate) exit_menu_id: tray_icon::menu::MenuId,
}

impl App {
    /// Run the main application event loop.
    #[instrument(skip(self))]
    pub(crate) async fn run(mut self) -> AppResult<()> {
        info!("Hold-Scribe starting");

        self.request_recognition_authorization().await;

        // Forward display snapshots to the tray on the main thread. The
        // display model is the single source of truth; the tray is just a
        // subscriber rendering whatever the snapshot says.
        let mut display_rx = self.display_rx.clone();
        let render_proxy = self.surface_proxy.clone();
        let render_handle = tokio::spawn(async move {
            while display_rx.changed().await.is_ok() {
                let snapshot = display_rx.borrow_and_update().clone();
                if render_proxy.send_event(SurfaceCommand::Render(snapshot)).is_err() {
                    break;
                }
            }
        });

        // Tray event forwarding via single persistent blocking task.
        //
        // MenuEvent::receiver() returns a crossbeam_channel::Receiver which
        // HAS blocking recv() -- zero polling, instant response, one thread.
        //
        // Shutdown: when tray_event_rx is dropped (main loop breaks),
        // tray_event_tx.blocking_send() fails, breaking the blocking loop.
        let (tray_event_tx, mut tray_event_rx) = mpsc::channel(32);
        let tray_handle = tokio::task::spawn_blocking(move || {
            let receiver = MenuEvent::receiver();
            while let Ok(event) = receiver.recv() {
                if tray_event_tx.blocking_send(event).is_err() {
                    break;
                }
            }
        });

        loop {
            tokio::select! {
                Some(event) = tray_event_rx.recv() => {
                    if let Err(e) = self.handle_tray_event(event).await {
                        error!(error = ?e, "Failed to handle tray event");
                    }
                }

                Some(cmd) = self.command_rx.recv() => {
                    match cmd {
                        AppCommand::StartRecording { session_id } => {
                            if let Err(e) = self.start_recording(session_id).await {
                                error!(session_id = %session_id, error = ?e, "Failed to start recording");
                                self.display.report_error("Recording failed to start");
                            }
                        }
                        AppCommand::StopRecording { session_id } => {
                            self.stop_and_recognize(session_id).await;
                        }
                        AppCommand::PlayRecording => {
                            self.play_recording().await;
                        }
                        AppCommand::Shutdown => {
                            info!("Shutdown requested");
                            break;
                        }
                    }
                }

                Some(outcome) = self.outcome_rx.recv() => {
                    self.display.apply_transcript(outcome.session_id, outcome.text);
                }

                else => {
                    info!("All channels closed, shutting down");
                    break;
                }
            }
        }

        drop(tray_event_rx);
        render_handle.abort();

        match tokio::time::timeout(std::time::Duration::from_secs(1), tray_handle).await {
            Ok(Ok(())) => info!("Tray event forwarder stopped cleanly"),
            Ok(Err(e)) => error!(error = ?e, "Tray event forwarder task panicked"),
            Err(_) => info!(
                "Tray event forwarder did not stop within timeout, \
                     will be cleaned up on exit"
            ),
        }

        let _ = self.shutdown_tx.send(true);
        info!("Hold-Scribe shut down successfully");

        Ok(())
    }

    /// One-time startup pass over the recognition authorization outcome.
    ///
    /// The status set is closed; every outcome is handled, none aborts.
    async fn request_recognition_authorization(&self) {
        let status = {
            let mut recognizer = self.recognizer.lock().await;
            recognizer.request_authorization()
        };
        match status {
            AuthorizationStatus::Authorized => info!("Speech recognition authorized"),
            AuthorizationStatus::Denied => warn!("Speech recognition denied"),
            AuthorizationStatus::Restricted => warn!("Speech recognition restricted"),
            AuthorizationStatus::Undetermined => {
                info!("Speech recognition authorization not determined")
            }
        }
    }

    /// Start a recording session.
    #[instrument(skip(self))]
    async fn start_recording(&mut self, session_id: Uuid) -> AppResult<()> {
        {
            let cfg = self.config.lock().await;
            cfg.validate_model_path()?;
        }

        {
            let mut controller = self.controller.lock().await;
            controller.start_recording(session_id)?;
        }

        self.display.begin_recording();
        info!(session_id = %session_id, "Recording started");

        Ok(())
    }

    /// Stop recording and start transcription in the background.
    ///
    /// Exactly one [`RecognitionOutcome`] is sent back per completed stop,
    /// whether recognition succeeds or fails; the outcome is tagged with the
    /// session ID so a stale result can never overwrite a newer cycle.
    #[instrument(skip(self))]
    async fn stop_and_recognize(&mut self, session_id: Uuid) {
        let completed = {
            let mut controller = self.controller.lock().await;
            match controller.stop_recording() {
                Ok(done) => done,
                Err(e) => {
                    error!(session_id = %session_id, error = ?e, "Failed to stop recording");
                    self.display.report_error("Recording failed");
                    return;
                }
            }
        };

        let Some(completed) = completed else {
            debug!(session_id = %session_id, "No active session to stop");
            return;
        };

        self.display.expect_transcript(completed.session_id);

        let (path, language) = {
            let controller = self.controller.lock().await;
            let cfg = self.config.lock().await;
            (
                controller.recording_path().to_path_buf(),
                cfg.recognition.language.clone(),
            )
        };

        let recognizer = Arc::clone(&self.recognizer);
        let outcome_tx = self.outcome_tx.clone();
        let session_id = completed.session_id;

        tokio::task::spawn(async move {
            let start = std::time::Instant::now();

            let text = {
                let mut recognizer = recognizer.lock().await;
                match recognizer.transcribe(&path, &language) {
                    Ok(text) => Some(text),
                    Err(e) => {
                        error!(session_id = %session_id, error = ?e, "Transcription failed");
                        None
                    }
                }
            };

            info!(
                session_id = %session_id,
                duration_ms = start.elapsed().as_millis(),
                succeeded = text.is_some(),
                "Recognition finished"
            );

            // Exactly one outcome per stop-event, success or failure alike.
            if outcome_tx
                .send(RecognitionOutcome { session_id, text })
                .await
                .is_err()
            {
                warn!(session_id = %session_id, "App loop gone, dropping recognition outcome");
            }
        });
    }

    /// Play back the last recording, surfacing failures on the display.
    #[instrument(skip(self))]
    async fn play_recording(&mut self) {
        let result = {
            let mut controller = self.controller.lock().await;
            controller.play_recording()
        };

        if let Err(e) = result {
            error!(error = ?e, "Failed to play recording");
            self.display.report_error("Playback failed");
        }
    }

    /// Handle tray menu events.
    #[instrument(skip(self))]
    async fn handle_tray_event(&mut self, event: MenuEvent) -> AppResult<()> {
        let event_id = &event.id;

        if *event_id == self.play_menu_id {
            info!("Play requested from tray menu");
            if let Err(e) = self.command_tx.send(AppCommand::PlayRecording).await {
                error!(error = ?e, "Failed to send play command");
            }
        } else if *event_id == self.exit_menu_id {
            info!("Exit requested from tray menu");
            let _ = self.surface_proxy.send_event(SurfaceCommand::Shutdown);
            if let Err(e) = self.command_tx.send(AppCommand::Shutdown).await {
                error!(error = ?e, "Failed to send shutdown command");
            }
        }

        Ok(())
    }
}
