//! Hold-scribe Core Library
//!
//! Press-and-hold voice-note pipeline: capture to a single fixed WAV file,
//! replay it, and transcribe it with a local speech model. Built on CPAL,
//! hound, rodio, Rubato, and Whisper.
//!
//! # Example
//!
//! ```no_run
//! use hold_scribe_core::{
//!     CoreResult, CpalRecorder, RECORDING_FILE_NAME, RecordingController, RecordingFormat,
//!     RodioPlayer,
//! };
//!
//! use std::{thread::sleep, time::Duration};
//!
//! fn main() -> CoreResult<()> {
//!     let path = std::env::temp_dir().join(RECORDING_FILE_NAME);
//!     let mut controller = RecordingController::new(
//!         CpalRecorder::new(),
//!         RodioPlayer::new(),
//!         path,
//!         RecordingFormat::default(),
//!     );
//!     controller.configure()?;
//!
//!     controller.start_recording(uuid::Uuid::new_v4())?;
//!     sleep(Duration::from_secs(3));
//!     let completed = controller.stop_recording()?;
//!
//!     println!("Recorded: {:?}", completed);
//!     controller.play_recording()?;
//!     Ok(())
//! }
//! ```

mod audio;
mod controller;
mod error;
mod session;

pub use {
    audio::{
        AuthorizationStatus, CaptureService, CpalRecorder, MonoResampler, PlaybackService,
        RecognitionService, RecordingFormat, RodioPlayer, SpeechModel, WhisperRecognizer,
    },
    controller::RecordingController,
    error::{AudioError, Result as CoreResult},
    session::{CompletedSession, SessionState},
};

/// Constant name of the single overwritable recording file.
pub const RECORDING_FILE_NAME: &str = "recording.wav";

#[cfg(test)]
mod tests;
