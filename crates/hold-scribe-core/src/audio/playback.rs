use crate::{AudioError, CoreResult};

use std::{fs::File, io::BufReader, panic::Location, path::Path};

use error_location::ErrorLocation;
use rodio::{Decoder, OutputStream, Sink};
use tracing::{error, info, instrument};

/// Playback collaborator: plays the fixed recording file, fire-and-forget.
pub trait PlaybackService: Send {
    /// Start playing `path`. Returns once playback has been handed off;
    /// no completion callback is provided.
    fn play(&mut self, path: &Path) -> CoreResult<()>;
}

/// Rodio-backed playback.
///
/// The file is opened and decoded on the calling thread, so a missing or
/// corrupt recording surfaces as `PlayerCreation` synchronously. The audio
/// output itself runs on a detached thread because the rodio output stream
/// must outlive the sound and is not `Send`.
pub struct RodioPlayer;

impl RodioPlayer {
    /// Create a playback service.
    pub fn new() -> Self {
        Self
    }
}

impl Default for RodioPlayer {
    fn default() -> Self {
        Self::new()
    }
}

impl PlaybackService for RodioPlayer {
    #[instrument(skip(self))]
    fn play(&mut self, path: &Path) -> CoreResult<()> {
        let file = File::open(path).map_err(|e| AudioError::PlayerCreation {
            reason: format!("Failed to open recording {:?}: {}", path, e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        let source = Decoder::new(BufReader::new(file)).map_err(|e| AudioError::PlayerCreation {
            reason: format!("Failed to decode recording {:?}: {}", path, e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        std::thread::Builder::new()
            .name("playback".to_string())
            .spawn(move || {
                let (_stream, handle) = match OutputStream::try_default() {
                    Ok(pair) => pair,
                    Err(e) => {
                        error!("Failed to open audio output: {}", e);
                        return;
                    }
                };
                match Sink::try_new(&handle) {
                    Ok(sink) => {
                        sink.append(source);
                        // Keeps _stream alive until the recording finishes.
                        sink.sleep_until_end();
                    }
                    Err(e) => error!("Failed to create playback sink: {}", e),
                }
            })
            .map_err(|e| AudioError::PlayerCreation {
                reason: format!("Failed to spawn playback thread: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        info!(path = ?path, "Playback started");

        Ok(())
    }
}
