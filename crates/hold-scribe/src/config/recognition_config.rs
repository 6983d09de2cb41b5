use crate::config::{default_language, default_use_gpu};

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Speech recognition configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecognitionConfig {
    /// Path to the speech model file (e.g., ggml-base.en.bin).
    pub model_path: PathBuf,

    /// Single fixed language recognition runs in (ISO 639-1 code).
    #[serde(default = "default_language")]
    pub language: String,

    /// Use GPU for inference if a GPU backend was compiled in (Metal/Vulkan).
    #[serde(default = "default_use_gpu")]
    pub use_gpu: bool,
}
