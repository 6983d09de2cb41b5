mod capture;
mod engine;
mod format;
mod playback;
mod recognition;
mod resampler;

pub use {
    capture::{CaptureService, CpalRecorder},
    engine::SpeechModel,
    format::RecordingFormat,
    playback::{PlaybackService, RodioPlayer},
    recognition::{AuthorizationStatus, RecognitionService, WhisperRecognizer},
    resampler::MonoResampler,
};
