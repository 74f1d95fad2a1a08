use std::time::Duration;

use rodio::Source;

use super::*;
use crate::audio::ChannelLayout;
use crate::tags::TagState;

fn stereo_ramp() -> AudioTrack {
    let samples: Vec<i16> = (0..2_000).map(|i| (i * 16 - 16_000) as i16).collect();
    AudioTrack::new(samples, ChannelLayout::Stereo, 1_000, 32_000, TagState::Absent).unwrap()
}

#[test]
fn source_covers_only_the_selection() {
    let track = stereo_ramp();
    let range = ClipRange::new(250, 750, track.duration_ms()).unwrap();
    let source = preview_source(&track, &range).unwrap();

    assert_eq!(source.channels(), 2);
    assert_eq!(source.sample_rate(), 1_000);
    assert_eq!(source.total_duration(), Some(Duration::from_millis(500)));

    let samples: Vec<f32> = source.collect();
    assert_eq!(samples.len(), 1_000);
    assert_eq!(samples[0], (500 * 16 - 16_000) as f32 / 32768.0);
}

#[test]
fn samples_stay_within_unit_range() {
    let track = AudioTrack::new(
        vec![i16::MIN, i16::MAX],
        ChannelLayout::Mono,
        1_000,
        32_000,
        TagState::Absent,
    )
    .unwrap();
    let range = ClipRange::full(track.duration_ms()).unwrap();
    let samples: Vec<f32> = preview_source(&track, &range).unwrap().collect();
    assert_eq!(samples[0], -1.0);
    assert!(samples[1] < 1.0);
}

#[test]
fn empty_span_is_rejected() {
    let track =
        AudioTrack::new(vec![0; 500], ChannelLayout::Mono, 500, 32_000, TagState::Absent).unwrap();
    let range = ClipRange::new(0, 1, track.duration_ms()).unwrap();
    assert!(matches!(
        preview_source(&track, &range),
        Err(PreviewError::EmptyRange { .. })
    ));
}
