use crate::audio::RecordingFormat;

/// WHAT: Default format matches the fixed recording configuration
/// WHY: 44.1kHz stereo is the configured capture format, not a protocol
#[test]
fn given_default_format_when_inspecting_then_cd_quality_stereo() {
    // Given/When: The default recording format
    let format = RecordingFormat::default();

    // Then: 44.1kHz, 2 channels
    assert_eq!(format.sample_rate, 44_100);
    assert_eq!(format.channels, 2);
}
