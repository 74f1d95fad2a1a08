use super::*;
use crate::audio::ChannelLayout;
use crate::error::{Error, InvalidRangeError};
use crate::export::TagOutcome;
use crate::tags::{self, TagState};
use crate::test_support::{mp3, sample_tag, tone, tone_then_silence, with_tag};

const RATE: u32 = 44_100;

#[test]
fn clip_bytes_clamps_and_exports() {
    let pcm = tone(2 * RATE as usize, ChannelLayout::Mono, RATE, 8_000.0);
    let input = with_tag(&sample_tag(), &mp3(&pcm, ChannelLayout::Mono, RATE, 128));

    let exported = clip_bytes(&input, -1.0, 0.5, &Settings::default()).unwrap();
    assert_eq!(exported.tags, TagOutcome::Copied { frames: 3, id3v1: false });
    assert_eq!(tags::scan(&exported.bytes).state, TagState::Present(sample_tag()));

    let clip = audio::decode(&exported.bytes).unwrap();
    assert_eq!(clip.bitrate_bps(), 128_000);
    assert!(clip.duration_ms() < 1_000);
}

#[test]
fn clip_bytes_reports_the_failing_stage() {
    let err = clip_bytes(b"", 0.0, 1.0, &Settings::default()).unwrap_err();
    assert_eq!(err.stage(), "decode");
    assert_eq!(err.exit_code(), 2);

    let pcm = tone(RATE as usize, ChannelLayout::Mono, RATE, 8_000.0);
    let input = mp3(&pcm, ChannelLayout::Mono, RATE, 128);
    let err = clip_bytes(&input, 6.0, 4.0, &Settings::default()).unwrap_err();
    assert!(matches!(err, Error::InvalidRange(InvalidRangeError::EmptyAfterClamp { .. })));
    assert_eq!(err.stage(), "select");
    assert!(err.to_string().contains("after clamping"));
}

#[test]
fn trailing_silence_is_trimmed() {
    let pcm = tone_then_silence(4_000, 1_500, ChannelLayout::Stereo, RATE);
    let input = mp3(&pcm, ChannelLayout::Stereo, RATE, 128);
    let source = audio::decode(&input).unwrap();

    let exported = trim_trailing_silence(&input, &Settings::default()).unwrap();
    let trimmed = audio::decode(&exported.bytes).unwrap();
    assert!(trimmed.duration_ms() < source.duration_ms() - 1_000);
    assert_eq!(exported.tags, TagOutcome::NoSourceTags);
}

#[test]
fn silent_input_cannot_be_trimmed() {
    let input = mp3(&vec![0i16; RATE as usize], ChannelLayout::Mono, RATE, 128);
    let err = trim_trailing_silence(&input, &Settings::default()).unwrap_err();
    assert!(matches!(err, Error::InvalidRange(InvalidRangeError::SilentTrack)));
    assert_eq!(err.exit_code(), 4);
}
