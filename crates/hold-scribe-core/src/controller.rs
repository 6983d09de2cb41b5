use crate::{
    AudioError, CompletedSession, CoreResult, SessionState,
    audio::{CaptureService, PlaybackService, RecordingFormat},
};

use std::{
    panic::Location,
    path::{Path, PathBuf},
    time::Instant,
};

use error_location::ErrorLocation;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

/// Drives the press-and-hold record/playback cycle over the fixed file.
///
/// Owns the capture and playback collaborators plus the session state
/// machine (`Idle ↔ Recording`). Transcription is a side process of the
/// `Recording → Idle` transition, dispatched by the caller from the
/// [`CompletedSession`] this controller returns; it is not a controller
/// state.
///
/// # Thread Safety
///
/// The controller is NOT internally synchronized. It is designed to be
/// owned by a single event loop (or wrapped in a lock) so that all state
/// transitions are serialized.
pub struct RecordingController<C, P> {
    capture: C,
    playback: P,
    recording_path: PathBuf,
    format: RecordingFormat,
    state: SessionState,
    permission_granted: bool,
}

impl<C: CaptureService, P: PlaybackService> RecordingController<C, P> {
    /// Create a controller over the given collaborators and fixed file path.
    ///
    /// [`configure`](Self::configure) must run before the first recording.
    pub fn new(capture: C, playback: P, recording_path: PathBuf, format: RecordingFormat) -> Self {
        Self {
            capture,
            playback,
            recording_path,
            format,
            state: SessionState::Idle,
            permission_granted: false,
        }
    }

    /// Configure the capture backend and request record permission.
    ///
    /// A refusal is remembered and surfaces as `PermissionDenied` on the
    /// next [`start_recording`](Self::start_recording); it is not fatal here
    /// so the app can come up and show its surface regardless.
    #[track_caller]
    #[instrument(skip(self))]
    pub fn configure(&mut self) -> CoreResult<()> {
        self.capture.configure(&self.format)?;
        self.permission_granted = self.capture.request_permission()?;

        if self.permission_granted {
            info!("Recording controller configured");
        } else {
            warn!("Record permission not granted; recording will be refused");
        }

        Ok(())
    }

    /// Begin capturing to the fixed file, overwriting any prior recording.
    ///
    /// If a session is already active it is stopped implicitly first; there
    /// is no queuing. On any failure the controller is left `Idle` with no
    /// active session.
    #[track_caller]
    #[instrument(skip(self))]
    pub fn start_recording(&mut self, session_id: Uuid) -> CoreResult<()> {
        if !self.permission_granted {
            return Err(AudioError::PermissionDenied {
                subsystem: "capture".to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        if let SessionState::Recording {
            session_id: prior, ..
        } = self.state
        {
            warn!(prior_session = %prior, "Session already active, stopping it first");
            self.state = SessionState::Idle;
            self.capture.stop()?;
        }

        self.capture.start(&self.recording_path)?;

        self.state = SessionState::Recording {
            started_at: Instant::now(),
            session_id,
        };

        info!(session_id = %session_id, path = ?self.recording_path, "Recording started");

        Ok(())
    }

    /// End the active session and finalize the file on disk.
    ///
    /// A stop with no active session is a no-op, not an error. Even when
    /// finalization fails the controller ends up `Idle`; the next press is
    /// the recovery path.
    #[track_caller]
    #[instrument(skip(self))]
    pub fn stop_recording(&mut self) -> CoreResult<Option<CompletedSession>> {
        match self.state {
            SessionState::Idle => {
                debug!("Stop requested with no active session");
                Ok(None)
            }
            SessionState::Recording {
                started_at,
                session_id,
            } => {
                self.state = SessionState::Idle;
                self.capture.stop()?;

                let duration = started_at.elapsed();
                info!(
                    session_id = %session_id,
                    duration_ms = duration.as_millis(),
                    "Recording stopped"
                );

                Ok(Some(CompletedSession {
                    session_id,
                    duration,
                }))
            }
        }
    }

    /// Play back the fixed recording file, fire-and-forget.
    #[track_caller]
    #[instrument(skip(self))]
    pub fn play_recording(&mut self) -> CoreResult<()> {
        self.playback.play(&self.recording_path)
    }

    /// Current session state.
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// The fixed path the recording is written to and read from.
    pub fn recording_path(&self) -> &Path {
        &self.recording_path
    }
}
