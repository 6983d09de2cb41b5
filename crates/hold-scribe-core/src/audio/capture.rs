use crate::{AudioError, CoreResult, audio::RecordingFormat};

use std::{
    fs::File,
    io::BufWriter,
    panic::Location,
    path::Path,
    sync::{
        Arc, Mutex,
        atomic::{AtomicBool, Ordering},
    },
};

use cpal::{
    BufferSize, Device, Stream, StreamConfig,
    traits::{DeviceTrait, HostTrait, StreamTrait},
};
use error_location::ErrorLocation;
use hound::{SampleFormat, WavSpec, WavWriter};
use tracing::{debug, error, info, instrument, warn};

type FileWriter = WavWriter<BufWriter<File>>;
type SharedWriter = Arc<Mutex<Option<FileWriter>>>;

/// Capture collaborator: configures the input backend, answers the
/// record-permission question, and writes one session at a time to a file.
///
/// Each `start` truncates the target file, so at most one recording exists
/// on disk and it always holds the most recent capture window.
pub trait CaptureService: Send {
    /// Prepare the capture backend for the requested format.
    fn configure(&mut self, format: &RecordingFormat) -> CoreResult<()>;

    /// Whether recording is permitted on this system.
    fn request_permission(&mut self) -> CoreResult<bool>;

    /// Begin capturing to `path`, overwriting any prior content.
    fn start(&mut self, path: &Path) -> CoreResult<()>;

    /// Stop capturing and finalize the file on disk.
    fn stop(&mut self) -> CoreResult<()>;
}

/// CPAL-backed capture writing 16-bit PCM WAV through hound.
pub struct CpalRecorder {
    preferred_device: Option<String>,
    device: Option<Device>,
    config: Option<StreamConfig>,
    stream: Option<Stream>,
    writer: SharedWriter,
    /// Signals the audio callback to stop writing. Set to `true` before
    /// dropping the stream so no in-flight callback writes after the writer
    /// is taken for finalization in `stop()`.
    shutdown: Arc<AtomicBool>,
}

impl CpalRecorder {
    /// Create an unconfigured recorder using the default input device.
    /// `configure` must run before `start`.
    pub fn new() -> Self {
        Self::with_device(None)
    }

    /// Create a recorder preferring the named input device, falling back to
    /// the default device when the name does not resolve.
    pub fn with_device(preferred_device: Option<String>) -> Self {
        Self {
            preferred_device,
            device: None,
            config: None,
            stream: None,
            writer: Arc::new(Mutex::new(None)),
            shutdown: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Resolve the input device, honoring the configured preference.
    #[track_caller]
    fn select_device(&self) -> CoreResult<Device> {
        let host = cpal::default_host();

        if let Some(name) = &self.preferred_device {
            let found = host
                .input_devices()
                .map_err(|e| AudioError::SessionConfiguration {
                    reason: format!("Failed to enumerate input devices: {}", e),
                    location: ErrorLocation::from(Location::caller()),
                })?
                .find(|d| d.name().map(|n| &n == name).unwrap_or(false));

            match found {
                Some(device) => return Ok(device),
                None => warn!(device = %name, "Configured input device not found, using default"),
            }
        }

        host.default_input_device()
            .ok_or(AudioError::SessionConfiguration {
                reason: "No input device available".to_string(),
                location: ErrorLocation::from(Location::caller()),
            })
    }

    /// Pick a stream config for `device`, preferring the requested format.
    ///
    /// The preferred config is probed with a throwaway stream; if the device
    /// rejects it, the device's default input configuration is used instead.
    /// The WAV header always reflects what was actually captured.
    #[track_caller]
    fn select_config(device: &Device, format: &RecordingFormat) -> CoreResult<StreamConfig> {
        let preferred = StreamConfig {
            channels: format.channels,
            sample_rate: format.sample_rate,
            buffer_size: BufferSize::Default,
        };

        let probe = device.build_input_stream(
            &preferred,
            |_: &[f32], _: &cpal::InputCallbackInfo| {},
            |_| {},
            None,
        );
        if probe.is_ok() {
            return Ok(preferred);
        }

        let fallback = device
            .default_input_config()
            .map_err(|e| AudioError::SessionConfiguration {
                reason: format!("Failed to get default input config: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        warn!(
            requested_rate = format.sample_rate,
            requested_channels = format.channels,
            actual_rate = fallback.sample_rate(),
            actual_channels = fallback.channels(),
            "Requested format unsupported, using device default"
        );

        Ok(fallback.into())
    }
}

impl Default for CpalRecorder {
    fn default() -> Self {
        Self::new()
    }
}

impl CaptureService for CpalRecorder {
    #[instrument(skip(self))]
    fn configure(&mut self, format: &RecordingFormat) -> CoreResult<()> {
        let device = self.select_device()?;
        let config = Self::select_config(&device, format)?;

        info!(
            device_id = ?device.id(),
            sample_rate = config.sample_rate,
            channels = config.channels,
            "Capture backend configured"
        );

        self.device = Some(device);
        self.config = Some(config);

        Ok(())
    }

    /// The desktop capture stack has no OS permission prompt to drive, so
    /// permission is reported as the presence of a usable input device. The
    /// trait seam exists so tests and other platforms can exercise denial.
    #[instrument(skip(self))]
    fn request_permission(&mut self) -> CoreResult<bool> {
        let granted = self.device.is_some() || cpal::default_host().default_input_device().is_some();
        if !granted {
            warn!("Record permission unavailable: no input device");
        }
        Ok(granted)
    }

    #[instrument(skip(self))]
    fn start(&mut self, path: &Path) -> CoreResult<()> {
        let (device, config) = match (&self.device, &self.config) {
            (Some(d), Some(c)) => (d, c.clone()),
            _ => {
                return Err(AudioError::SessionConfiguration {
                    reason: "Capture backend not configured".to_string(),
                    location: ErrorLocation::from(Location::caller()),
                });
            }
        };

        let spec = WavSpec {
            channels: config.channels,
            sample_rate: config.sample_rate,
            bits_per_sample: 16,
            sample_format: SampleFormat::Int,
        };

        // WavWriter::create truncates, which is what enforces the
        // one-recording-on-disk invariant.
        let file_writer =
            WavWriter::create(path, spec).map_err(|e| AudioError::RecorderCreation {
                reason: format!("Failed to create recording file {:?}: {}", path, e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        self.shutdown.store(false, Ordering::Release);
        *self
            .writer
            .lock()
            .unwrap_or_else(|e| e.into_inner()) = Some(file_writer);

        let writer = Arc::clone(&self.writer);
        let shutdown = Arc::clone(&self.shutdown);
        let shutdown_on_error = Arc::clone(&self.shutdown);

        let stream = device
            .build_input_stream(
                &config,
                move |data: &[f32], _: &cpal::InputCallbackInfo| {
                    // Once stop() sets this flag no further samples are
                    // written, even if CPAL fires one more callback before
                    // the stream is dropped.
                    if shutdown.load(Ordering::Acquire) {
                        return;
                    }
                    // Recover from lock poison rather than dropping audio;
                    // a poisoned mutex still holds a valid writer.
                    let mut guard = writer.lock().unwrap_or_else(|e| {
                        error!("Recorder lock poisoned, recovering: {}", e);
                        e.into_inner()
                    });
                    if let Some(w) = guard.as_mut() {
                        for &sample in data {
                            let pcm = (sample.clamp(-1.0, 1.0) * f32::from(i16::MAX)) as i16;
                            if let Err(e) = w.write_sample(pcm) {
                                error!("Failed to write sample, aborting capture: {}", e);
                                shutdown.store(true, Ordering::Release);
                                return;
                            }
                        }
                    }
                },
                move |err| {
                    error!("Audio stream error: {}", err);
                    shutdown_on_error.store(true, Ordering::Release);
                },
                None,
            )
            .map_err(|e| AudioError::RecorderCreation {
                reason: format!("Failed to build input stream: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        stream.play().map_err(|e| AudioError::RecorderCreation {
            reason: format!("Failed to start input stream: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        self.stream = Some(stream);
        info!(path = ?path, "Audio capture started");

        Ok(())
    }

    #[instrument(skip(self))]
    fn stop(&mut self) -> CoreResult<()> {
        // Signal the callback to stop writing BEFORE dropping the stream, so
        // the writer can be taken for finalization without a racing write.
        self.shutdown.store(true, Ordering::Release);

        if let Some(stream) = self.stream.take() {
            drop(stream);
            // Brief yield so any in-flight callback observes the shutdown
            // flag; most CPAL backends join the audio thread in drop(), but
            // not all document it.
            std::thread::sleep(std::time::Duration::from_millis(5));
        }

        let writer = self
            .writer
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .take();

        match writer {
            Some(w) => {
                let written = w.len();
                w.finalize().map_err(|e| AudioError::Capture {
                    reason: format!("Failed to finalize recording file: {}", e),
                    location: ErrorLocation::from(Location::caller()),
                })?;
                debug!(sample_count = written, "Recording file finalized");
                info!("Audio capture stopped");
                Ok(())
            }
            None => {
                debug!("Stop requested with no open recording file");
                Ok(())
            }
        }
    }
}
