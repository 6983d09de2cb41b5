mod engine;
mod format;
mod playback;
mod recognition;
mod resampler;
