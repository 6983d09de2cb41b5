/// Fixed recording format for the single recording file.
///
/// Treated as configuration, not protocol: the capture backend requests this
/// format from the device and falls back to the device's native configuration
/// when the request is not supported. Samples are persisted as 16-bit PCM WAV.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordingFormat {
    /// Requested sample rate in Hz.
    pub sample_rate: u32,
    /// Requested channel count.
    pub channels: u16,
}

impl RecordingFormat {
    /// Default sample rate (44.1 kHz).
    pub const DEFAULT_SAMPLE_RATE: u32 = 44_100;
    /// Default channel count (stereo).
    pub const DEFAULT_CHANNELS: u16 = 2;
}

impl Default for RecordingFormat {
    fn default() -> Self {
        Self {
            sample_rate: Self::DEFAULT_SAMPLE_RATE,
            channels: Self::DEFAULT_CHANNELS,
        }
    }
}
