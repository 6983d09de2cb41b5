use uuid::Uuid;

/// Commands sent from the press handler and tray to the main application.
#[derive(Debug, Clone)]
pub enum AppCommand {
    /// Begin a new recording session (press-begin).
    StartRecording {
        /// Unique session ID for this recording.
        session_id: Uuid,
    },
    /// End the current recording session and transcribe it (press-end).
    StopRecording {
        /// Session ID of the recording to stop.
        session_id: Uuid,
    },
    /// Play back the last recording.
    PlayRecording,
    /// Request application shutdown.
    Shutdown,
}

/// Result of one recognition pass, marshaled back onto the app loop.
///
/// Exactly one outcome is produced per stop-event; `text` is `None` when
/// recognition failed.
#[derive(Debug, Clone)]
pub struct RecognitionOutcome {
    /// Session the transcription belongs to. Outcomes whose session no
    /// longer matches the one the display expects are discarded as stale.
    pub session_id: Uuid,
    /// Best transcription, or `None` on failure.
    pub text: Option<String>,
}
