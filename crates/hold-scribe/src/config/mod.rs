mod config;
mod recognition_config;
mod recording_config;

pub(crate) use {
    config::Config, recognition_config::RecognitionConfig, recording_config::RecordingConfig,
};

pub(crate) const DEFAULT_LANGUAGE: &str = "en";
pub(crate) const DEFAULT_USE_GPU: bool = true;

pub(crate) fn default_language() -> String {
    DEFAULT_LANGUAGE.to_string()
}

pub(crate) fn default_use_gpu() -> bool {
    DEFAULT_USE_GPU
}

pub(crate) fn default_sample_rate() -> u32 {
    hold_scribe_core::RecordingFormat::DEFAULT_SAMPLE_RATE
}

pub(crate) fn default_channels() -> u16 {
    hold_scribe_core::RecordingFormat::DEFAULT_CHANNELS
}
