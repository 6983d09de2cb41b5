use crate::{AudioError, audio::SpeechModel};

use std::path::PathBuf;

/// WHAT: SpeechModel rejects a non-existent model path
/// WHY: Early validation prevents runtime failures
#[test]
fn given_invalid_model_path_when_loading_model_then_model_not_found_error() {
    // Given: Path to a non-existent model file
    let invalid_path = PathBuf::from("/nonexistent/model.bin");

    // When: Attempting to load the model
    let result = SpeechModel::new(&invalid_path, false);

    // Then: Returns ModelNotFound error
    assert!(matches!(result, Err(AudioError::ModelNotFound { .. })));
}

/// WHAT: Empty samples cause NoAudioCaptured error
/// WHY: The model should never run on empty audio
#[test]
#[cfg_attr(not(feature = "integration-tests"), ignore)]
fn given_empty_samples_when_transcribing_then_no_audio_captured_error() {
    // Given: A loaded model
    let model_path = std::env::var("TEST_WHISPER_MODEL_PATH")
        .unwrap_or_else(|_| "models/ggml-base.en.bin".to_string());
    let mut model = SpeechModel::new(&model_path, false).unwrap();
    let empty_samples: Vec<f32> = vec![];

    // When: Attempting to transcribe empty samples
    let result = model.transcribe("en", &empty_samples);

    // Then: Returns NoAudioCaptured error
    assert!(matches!(result, Err(AudioError::NoAudioCaptured { .. })));
}
