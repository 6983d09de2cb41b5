use crate::{AudioError, CoreResult};

use std::panic::Location;

use audioadapter_buffers::direct::InterleavedSlice;
use error_location::ErrorLocation;
use rubato::{Fft, FixedSync, Resampler as RubatoResampler};
use tracing::{debug, instrument};

/// Frames consumed per FFT pass.
const CHUNK_FRAMES: usize = 1024;
/// Sub-chunk count for the FFT resampler.
const SUB_CHUNKS: usize = 2;

/// Mono sample-rate converter for feeding the speech model.
///
/// Wraps a fixed-input FFT resampler; the trailing partial chunk is
/// zero-padded and the output trimmed back to the rate-exact length.
pub struct MonoResampler {
    inner: Fft<f32>,
    ratio: f64,
    input_rate: u32,
    output_rate: u32,
    in_scratch: Vec<f32>,
    out_scratch: Vec<f32>,
}

impl MonoResampler {
    /// Create a converter from `input_rate` to `output_rate` Hz.
    #[track_caller]
    #[instrument]
    pub fn new(input_rate: u32, output_rate: u32) -> CoreResult<Self> {
        let inner = Fft::<f32>::new(
            input_rate as usize,
            output_rate as usize,
            CHUNK_FRAMES,
            SUB_CHUNKS,
            1, // mono
            FixedSync::Input,
        )
        .map_err(|e| AudioError::Resampling {
            reason: format!("Failed to create resampler: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        let out_scratch = vec![0.0f32; inner.output_frames_max()];

        debug!(input_rate, output_rate, chunk = CHUNK_FRAMES, "Resampler ready");

        Ok(Self {
            inner,
            ratio: f64::from(output_rate) / f64::from(input_rate),
            input_rate,
            output_rate,
            in_scratch: vec![0.0f32; CHUNK_FRAMES],
            out_scratch,
        })
    }

    /// Convert `samples` to the output rate.
    #[track_caller]
    #[instrument(skip(self, samples))]
    pub fn resample(&mut self, samples: &[f32]) -> CoreResult<Vec<f32>> {
        if samples.is_empty() {
            return Ok(Vec::new());
        }

        let expected_len = (samples.len() as f64 * self.ratio).round() as usize;
        let mut output = Vec::with_capacity(expected_len + CHUNK_FRAMES);

        for chunk in samples.chunks(CHUNK_FRAMES) {
            self.in_scratch[..chunk.len()].copy_from_slice(chunk);
            self.in_scratch[chunk.len()..].fill(0.0);

            let input = InterleavedSlice::new(&self.in_scratch, 1, CHUNK_FRAMES).map_err(|e| {
                AudioError::Resampling {
                    reason: format!("Failed to adapt input chunk: {}", e),
                    location: ErrorLocation::from(Location::caller()),
                }
            })?;

            let out_frames = self.out_scratch.len();
            let mut sink = InterleavedSlice::new_mut(&mut self.out_scratch, 1, out_frames)
                .map_err(|e| AudioError::Resampling {
                    reason: format!("Failed to adapt output chunk: {}", e),
                    location: ErrorLocation::from(Location::caller()),
                })?;

            let (_consumed, written) = self
                .inner
                .process_into_buffer(&input, &mut sink, None)
                .map_err(|e| AudioError::Resampling {
                    reason: format!("Resampling failed: {}", e),
                    location: ErrorLocation::from(Location::caller()),
                })?;

            output.extend_from_slice(&self.out_scratch[..written]);
        }

        // Drop the tail produced by zero-padding the final chunk.
        output.truncate(expected_len);

        debug!(
            input_len = samples.len(),
            output_len = output.len(),
            input_rate = self.input_rate,
            output_rate = self.output_rate,
            "Audio resampled"
        );

        Ok(output)
    }
}
