use std::time::{Duration, Instant};

use uuid::Uuid;

/// Recording session state owned by the controller.
///
/// At most one session is ever active; starting a new one while recording
/// implicitly stops the prior session first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// No active session.
    Idle,
    /// A session is capturing audio.
    Recording {
        /// When capture started.
        started_at: Instant,
        /// Unique session ID, used to match transcription results back to
        /// the recording cycle that produced them.
        session_id: Uuid,
    },
}

/// A finished record cycle, handed to the recognition step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompletedSession {
    /// ID of the session that just ended.
    pub session_id: Uuid,
    /// How long the capture ran.
    pub duration: Duration,
}
