use std::time::Instant;

use uuid::Uuid;

/// Press-and-hold gesture state for the hold handler.
///
/// Transient UI state only: reset on press-begin, frozen on press-end,
/// never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PressState {
    /// The record control is not pressed.
    Released,
    /// The record control is held down.
    Held {
        /// When the press began.
        pressed_at: Instant,
        /// Session ID the press started, used to stop the same session.
        session_id: Uuid,
    },
}
