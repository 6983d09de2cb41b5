use crate::{
    AudioError,
    audio::{PlaybackService, RodioPlayer},
    tests::mocks::ScratchFile,
};

/// WHAT: Playing before any recording exists fails with PlayerCreation
/// WHY: The play control must report a missing file, not crash
#[test]
fn given_no_recording_when_playing_then_player_creation_error() {
    // Given: A player and a path where nothing was ever recorded
    let scratch = ScratchFile::new();
    let mut player = RodioPlayer::new();

    // When: Attempting playback
    let result = player.play(&scratch.0);

    // Then: PlayerCreation is reported synchronously
    assert!(matches!(result, Err(AudioError::PlayerCreation { .. })));
}

/// WHAT: An undecodable file fails with PlayerCreation
/// WHY: Corrupt recordings must be reported, not crash the player
#[test]
fn given_corrupt_recording_when_playing_then_player_creation_error() {
    // Given: A file that is not valid audio
    let scratch = ScratchFile::new();
    std::fs::write(&scratch.0, b"not a wav file").unwrap();
    let mut player = RodioPlayer::new();

    // When: Attempting playback
    let result = player.play(&scratch.0);

    // Then: The decode failure surfaces as PlayerCreation
    assert!(matches!(result, Err(AudioError::PlayerCreation { .. })));
}
