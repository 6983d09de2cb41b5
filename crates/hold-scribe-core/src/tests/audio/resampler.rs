use crate::audio::MonoResampler;

// Test constants
const INPUT_SAMPLE_RATE: u32 = 44_100;
const OUTPUT_SAMPLE_RATE: u32 = 16_000;
const ONE_SECOND_INPUT_SAMPLES: usize = INPUT_SAMPLE_RATE as usize;
const ONE_SECOND_OUTPUT_SAMPLES: usize = OUTPUT_SAMPLE_RATE as usize;
const LENGTH_TOLERANCE: u64 = 100;
const TEST_SIGNAL_AMPLITUDE: f32 = 0.5;
const MAX_AMPLITUDE: f32 = 1.5;

/// WHAT: Resampler converts the recording rate to the model rate
/// WHY: The speech model requires 16kHz input
#[test]
fn given_44khz_audio_when_resampling_to_16khz_then_output_length_approximately_correct() {
    // Given: Resampler configured for 44.1kHz -> 16kHz
    let mut resampler = MonoResampler::new(INPUT_SAMPLE_RATE, OUTPUT_SAMPLE_RATE).unwrap();
    let input = vec![TEST_SIGNAL_AMPLITUDE; ONE_SECOND_INPUT_SAMPLES];

    // When: Resampling one second of audio
    let output = resampler.resample(&input).unwrap();

    // Then: Output is approximately one second at 16kHz
    assert!(
        (output.len() as i64 - ONE_SECOND_OUTPUT_SAMPLES as i64).unsigned_abs() < LENGTH_TOLERANCE,
        "Expected ~{} samples, got {}",
        ONE_SECOND_OUTPUT_SAMPLES,
        output.len()
    );
    assert!(output.iter().all(|&s| s.is_finite()));
}

/// WHAT: Empty samples return empty output
/// WHY: Edge case handling for zero-length input
#[test]
fn given_empty_samples_when_resampling_then_empty_output() {
    // Given: Resampler and empty input
    let mut resampler = MonoResampler::new(INPUT_SAMPLE_RATE, OUTPUT_SAMPLE_RATE).unwrap();
    let empty: Vec<f32> = vec![];

    // When: Resampling empty data
    let output = resampler.resample(&empty).unwrap();

    // Then: Output is also empty
    assert!(output.is_empty());
}

/// WHAT: A tone survives resampling with bounded amplitude
/// WHY: Validates signal integrity through the FFT path
#[test]
fn given_tone_signal_when_resampling_then_output_preserves_characteristics() {
    // Given: Resampler and a short sine tone
    let mut resampler = MonoResampler::new(INPUT_SAMPLE_RATE, OUTPUT_SAMPLE_RATE).unwrap();
    let input: Vec<f32> = (0..4410).map(|i| (i as f32 * 0.1).sin()).collect();
    let expected = (input.len() as f64 * f64::from(OUTPUT_SAMPLE_RATE)
        / f64::from(INPUT_SAMPLE_RATE))
    .round() as i64;

    // When: Resampling the tone
    let output = resampler.resample(&input).unwrap();

    // Then: Length matches the rate ratio and no sample blew up
    assert!(
        (output.len() as i64 - expected).unsigned_abs() < LENGTH_TOLERANCE,
        "Expected ~{} samples, got {}",
        expected,
        output.len()
    );
    assert!(
        output
            .iter()
            .all(|&s| s.is_finite() && s.abs() <= MAX_AMPLITUDE)
    );
}

/// WHAT: Repeated use of one resampler stays rate-exact
/// WHY: The recognizer caches the resampler across record cycles
#[test]
fn given_reused_resampler_when_resampling_twice_then_both_outputs_sized_correctly() {
    // Given: One resampler used for two consecutive cycles
    let mut resampler = MonoResampler::new(INPUT_SAMPLE_RATE, OUTPUT_SAMPLE_RATE).unwrap();
    let input = vec![TEST_SIGNAL_AMPLITUDE; ONE_SECOND_INPUT_SAMPLES / 2];

    // When: Resampling the same input twice
    let first = resampler.resample(&input).unwrap();
    let second = resampler.resample(&input).unwrap();

    // Then: Both outputs have the same rate-exact length
    assert_eq!(first.len(), second.len());
}
