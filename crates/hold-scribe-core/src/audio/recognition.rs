use crate::{
    AudioError, CoreResult,
    audio::{MonoResampler, SpeechModel},
};

use std::{panic::Location, path::Path};

use error_location::ErrorLocation;
use tracing::{debug, info, instrument, warn};

/// Sample rate the speech model consumes.
const MODEL_SAMPLE_RATE: u32 = 16_000;

/// Outcome of a recognition authorization request.
///
/// A closed set: every caller matches exhaustively, so an unrepresentable
/// status cannot exist and there is no panic path in the handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthorizationStatus {
    /// Recognition may be used.
    Authorized,
    /// The user refused recognition.
    Denied,
    /// Recognition is blocked by system policy.
    Restricted,
    /// The user has not been asked yet.
    Undetermined,
}

/// Recognition collaborator: transcribes the fixed recording file.
pub trait RecognitionService: Send {
    /// Ask the backend whether recognition may be used.
    fn request_authorization(&mut self) -> AuthorizationStatus;

    /// Transcribe the audio file at `path` in `language`.
    ///
    /// Synchronous and potentially slow; callers are expected to run it off
    /// the UI context and marshal the result back.
    fn transcribe(&mut self, path: &Path, language: &str) -> CoreResult<String>;
}

/// Whisper-backed recognition over the recording file.
///
/// Reads the WAV, downmixes to mono, resamples to the model rate, and runs
/// the loaded model. The resampler is cached per input rate since the fixed
/// recording format rarely changes between cycles.
pub struct WhisperRecognizer {
    model: SpeechModel,
    resampler: Option<(u32, MonoResampler)>,
}

impl WhisperRecognizer {
    /// Load the model at `model_path`.
    #[track_caller]
    pub fn new<P: AsRef<Path>>(model_path: P, use_gpu: bool) -> CoreResult<Self> {
        Ok(Self {
            model: SpeechModel::new(model_path, use_gpu)?,
            resampler: None,
        })
    }

    /// Read `path` into mono f32 samples plus the source sample rate.
    #[track_caller]
    fn read_mono(path: &Path) -> CoreResult<(Vec<f32>, u32)> {
        let mut reader = hound::WavReader::open(path).map_err(|e| AudioError::Recognition {
            source: Box::new(e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        let spec = reader.spec();
        let channels = usize::from(spec.channels.max(1));

        let interleaved: Vec<f32> = match spec.sample_format {
            hound::SampleFormat::Float => reader
                .samples::<f32>()
                .collect::<Result<_, _>>()
                .map_err(|e| AudioError::Recognition {
                    source: Box::new(e),
                    location: ErrorLocation::from(Location::caller()),
                })?,
            hound::SampleFormat::Int => {
                let scale = f32::from(i16::MAX);
                reader
                    .samples::<i16>()
                    .map(|s| s.map(|v| f32::from(v) / scale))
                    .collect::<Result<_, _>>()
                    .map_err(|e| AudioError::Recognition {
                        source: Box::new(e),
                        location: ErrorLocation::from(Location::caller()),
                    })?
            }
        };

        let mono: Vec<f32> = interleaved
            .chunks(channels)
            .map(|frame| frame.iter().sum::<f32>() / frame.len() as f32)
            .collect();

        debug!(
            frames = mono.len(),
            channels = spec.channels,
            sample_rate = spec.sample_rate,
            "Recording file loaded"
        );

        Ok((mono, spec.sample_rate))
    }
}

impl RecognitionService for WhisperRecognizer {
    /// Local models need no user consent; the closed-set contract is kept so
    /// backends that do prompt (cloud services) slot in behind the same seam.
    #[instrument(skip(self))]
    fn request_authorization(&mut self) -> AuthorizationStatus {
        info!("Recognition authorized (local model)");
        AuthorizationStatus::Authorized
    }

    #[instrument(skip(self))]
    fn transcribe(&mut self, path: &Path, language: &str) -> CoreResult<String> {
        let (mono, source_rate) = Self::read_mono(path)?;

        if mono.is_empty() {
            return Err(AudioError::NoAudioCaptured {
                location: ErrorLocation::from(Location::caller()),
            });
        }

        let samples = if source_rate == MODEL_SAMPLE_RATE {
            mono
        } else {
            if self.resampler.as_ref().map(|(rate, _)| *rate) != Some(source_rate) {
                if self.resampler.is_some() {
                    warn!(source_rate, "Recording rate changed, rebuilding resampler");
                }
                self.resampler =
                    Some((source_rate, MonoResampler::new(source_rate, MODEL_SAMPLE_RATE)?));
            }
            match self.resampler.as_mut() {
                Some((_, resampler)) => resampler.resample(&mono)?,
                None => mono, // unreachable by construction, kept non-panicking
            }
        };

        let start = std::time::Instant::now();
        let transcription = self.model.transcribe(language, &samples)?;

        info!(
            duration_ms = start.elapsed().as_millis(),
            text_len = transcription.len(),
            "Transcription complete"
        );

        Ok(transcription)
    }
}
