use error_location::ErrorLocation;
use thiserror::Error;

/// Audio pipeline errors with source location tracking.
///
/// Every collaborator failure is reported through one of these variants and
/// leaves the controller in its previous state; none of them are fatal.
#[derive(Error, Debug)]
pub enum AudioError {
    /// Recording or recognition permission was refused.
    #[error("Permission denied for {subsystem} {location}")]
    PermissionDenied {
        /// Which subsystem refused ("capture" or "recognition").
        subsystem: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// Audio backend configuration failed (no device, bad stream config).
    #[error("Audio session configuration failed: {reason} {location}")]
    SessionConfiguration {
        /// Description of the configuration failure.
        reason: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// Could not create the recorder for the fixed recording file.
    #[error("Recorder creation failed: {reason} {location}")]
    RecorderCreation {
        /// Description of the recorder failure.
        reason: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// An active capture stream failed mid-session or while finalizing.
    #[error("Capture failed: {reason} {location}")]
    Capture {
        /// Description of the capture failure.
        reason: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// Could not create a player for the recording file (missing or corrupt).
    #[error("Player creation failed: {reason} {location}")]
    PlayerCreation {
        /// Description of the playback failure.
        reason: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// The recognition service returned a failure or no result.
    #[error("Recognition failed: {source} {location}")]
    Recognition {
        /// Underlying error from the recognition backend.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// Speech model file not found at the configured path.
    #[error("Model not found at path: {path:?} {location}")]
    ModelNotFound {
        /// Path to the missing model file.
        path: std::path::PathBuf,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// Audio resampling failed.
    #[error("Resampling error: {reason} {location}")]
    Resampling {
        /// Description of the resampling error.
        reason: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// The recording file contained no audio.
    #[error("No audio captured {location}")]
    NoAudioCaptured {
        /// Source location where error occurred.
        location: ErrorLocation,
    },
}

/// Result type alias using [`AudioError`].
pub type Result<T> = std::result::Result<T, AudioError>;
