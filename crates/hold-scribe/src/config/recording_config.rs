use crate::config::{default_channels, default_sample_rate};

use hold_scribe_core::RecordingFormat;
use serde::{Deserialize, Serialize};

/// Audio capture configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordingConfig {
    /// Selected audio input device name (None = default device).
    #[serde(default)]
    pub selected_device: Option<String>,

    /// Requested capture sample rate in Hz.
    #[serde(default = "default_sample_rate")]
    pub sample_rate: u32,

    /// Requested capture channel count.
    #[serde(default = "default_channels")]
    pub channels: u16,
}

impl RecordingConfig {
    /// The capture format this configuration requests.
    pub fn format(&self) -> RecordingFormat {
        RecordingFormat {
            sample_rate: self.sample_rate,
            channels: self.channels,
        }
    }
}
