//! Observable display state for the recording surface.
//!
//! Plain value-plus-notification state (a tokio `watch` channel), decoupled
//! from any rendering framework; the tray renderer and tests are just
//! subscribers.

use tokio::sync::watch;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Text shown before any recording has completed.
pub const PLACEHOLDER_TEXT: &str = "Recorded text will appear here";
/// Text shown when recognition returns no result.
pub const RECOGNITION_FAILED_TEXT: &str = "Recognition failed";

/// Surface states corresponding to the record/transcribe workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceStatus {
    /// Ready to record.
    Idle,
    /// Currently recording audio.
    Recording,
    /// Waiting for the transcription of the last recording.
    Transcribing,
    /// A capture or playback operation failed.
    Error,
}

/// What the surface currently shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplaySnapshot {
    /// Workflow state.
    pub status: SurfaceStatus,
    /// Most recent transcription result (or a placeholder).
    pub transcript: String,
    /// Last reported capture/playback failure, if any.
    pub last_error: Option<String>,
}

impl Default for DisplaySnapshot {
    fn default() -> Self {
        Self {
            status: SurfaceStatus::Idle,
            transcript: PLACEHOLDER_TEXT.to_string(),
            last_error: None,
        }
    }
}

/// Owner of the display state; all mutations go through the app loop.
///
/// Tracks which session the next transcript must come from, so a late
/// result from a superseded recording cycle can never overwrite the display.
pub struct DisplayModel {
    tx: watch::Sender<DisplaySnapshot>,
    expected_session: Option<Uuid>,
}

impl DisplayModel {
    /// Create the model and a receiver for renderers/tests to observe.
    pub fn new() -> (Self, watch::Receiver<DisplaySnapshot>) {
        let (tx, rx) = watch::channel(DisplaySnapshot::default());
        (
            Self {
                tx,
                expected_session: None,
            },
            rx,
        )
    }

    /// A recording session started: show the recording state and clear any
    /// stale error from a previous cycle.
    pub fn begin_recording(&mut self) {
        self.tx.send_modify(|snap| {
            snap.status = SurfaceStatus::Recording;
            snap.last_error = None;
        });
    }

    /// A session stopped; only a transcript for `session_id` may update the
    /// display from now on.
    pub fn expect_transcript(&mut self, session_id: Uuid) {
        self.expected_session = Some(session_id);
        self.tx
            .send_modify(|snap| snap.status = SurfaceStatus::Transcribing);
    }

    /// Apply a recognition outcome.
    ///
    /// Returns `false` when the outcome is stale (not the session the
    /// display is waiting on) and was discarded.
    pub fn apply_transcript(&mut self, session_id: Uuid, text: Option<String>) -> bool {
        if self.expected_session != Some(session_id) {
            warn!(
                session_id = %session_id,
                "Discarding stale transcription result"
            );
            return false;
        }
        self.expected_session = None;

        let transcript = match text {
            Some(t) => {
                info!(session_id = %session_id, text_len = t.len(), "Transcript displayed");
                t
            }
            None => {
                debug!(session_id = %session_id, "Recognition failed, showing placeholder");
                RECOGNITION_FAILED_TEXT.to_string()
            }
        };

        self.tx.send_modify(|snap| {
            snap.status = SurfaceStatus::Idle;
            snap.transcript = transcript;
        });
        true
    }

    /// Surface a capture/playback failure.
    pub fn report_error(&mut self, message: impl Into<String>) {
        let message = message.into();
        self.tx.send_modify(|snap| {
            snap.status = SurfaceStatus::Error;
            snap.last_error = Some(message);
        });
    }

    /// Current snapshot.
    pub fn snapshot(&self) -> DisplaySnapshot {
        self.tx.borrow().clone()
    }
}
