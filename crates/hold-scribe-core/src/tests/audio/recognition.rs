use crate::{AudioError, audio::WhisperRecognizer};

use std::path::PathBuf;

/// WHAT: Recognizer construction fails cleanly without a model file
/// WHY: A missing model is a reported configuration problem, not a crash
#[test]
fn given_invalid_model_path_when_creating_recognizer_then_model_not_found_error() {
    // Given: Path to a non-existent model file
    let invalid_path = PathBuf::from("/nonexistent/model.bin");

    // When: Attempting to create the recognizer
    let result = WhisperRecognizer::new(&invalid_path, false);

    // Then: Returns ModelNotFound error
    assert!(matches!(result, Err(AudioError::ModelNotFound { .. })));
}

/// WHAT: Transcribing a missing recording reports Recognition failure
/// WHY: The callback contract maps any recognition failure to None
#[test]
#[cfg_attr(not(feature = "integration-tests"), ignore)]
fn given_missing_recording_when_transcribing_then_recognition_error() {
    use crate::audio::RecognitionService;

    // Given: A recognizer with a valid model and no recording on disk
    let model_path = std::env::var("TEST_WHISPER_MODEL_PATH")
        .unwrap_or_else(|_| "models/ggml-base.en.bin".to_string());
    let mut recognizer = WhisperRecognizer::new(&model_path, false).unwrap();
    let missing = std::env::temp_dir().join("hold-scribe-missing.wav");

    // When: Attempting transcription
    let result = recognizer.transcribe(&missing, "en");

    // Then: Returns Recognition error
    assert!(matches!(result, Err(AudioError::Recognition { .. })));
}
