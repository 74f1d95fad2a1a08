//! Fixture builders shared by unit tests. MP3 inputs are synthesised with the
//! crate's own encoder so no binary fixtures are needed.

use crate::audio::ChannelLayout;
use crate::config::EncoderQuality;
use crate::export::{EncodeParams, encode_pcm};
use crate::tags::{Id3Version, Id3v2Tag, TagFrame};

/// Interleaved sine tone; every channel carries the same signal.
pub fn tone(frames: usize, channels: ChannelLayout, rate: u32, amplitude: f64) -> Vec<i16> {
    let mut out = Vec::with_capacity(frames * channels.count());
    for i in 0..frames {
        let t = i as f64 / f64::from(rate);
        let v = (amplitude * (2.0 * std::f64::consts::PI * 440.0 * t).sin()) as i16;
        for _ in 0..channels.count() {
            out.push(v);
        }
    }
    out
}

/// `loud_ms` of tone followed by digital silence, `total_ms` in all.
pub fn tone_then_silence(total_ms: u64, loud_ms: u64, channels: ChannelLayout, rate: u32) -> Vec<i16> {
    let frames = (total_ms * u64::from(rate) / 1000) as usize;
    let loud = (loud_ms * u64::from(rate) / 1000) as usize;
    let mut samples = tone(loud, channels, rate, 12_000.0);
    samples.resize(frames * channels.count(), 0);
    samples
}

pub fn mp3(samples: &[i16], channels: ChannelLayout, rate: u32, kbps: u32) -> Vec<u8> {
    let params = EncodeParams {
        sample_rate: rate,
        channels,
        bitrate_bps: kbps * 1000,
        quality: EncoderQuality::Good,
    };
    encode_pcm(samples, &params).expect("fixture encodes")
}

pub fn text_frame(id: &str, encoding: u8, text: &str) -> TagFrame {
    let mut payload = vec![encoding];
    payload.extend_from_slice(text.as_bytes());
    TagFrame::new(id, [0, 0], payload)
}

/// A v2.4 tag with title, artist and an opaque private frame.
pub fn sample_tag() -> Id3v2Tag {
    Id3v2Tag::new(
        Id3Version {
            major: 4,
            revision: 0,
        },
        vec![
            text_frame("TIT2", 3, "Morning Take"),
            text_frame("TPE1", 3, "The Clippers"),
            TagFrame::new("PRIV", [0, 0], b"owner\0\x01\x02\xFF\x00".to_vec()),
        ],
    )
}

pub fn with_tag(tag: &Id3v2Tag, audio: &[u8]) -> Vec<u8> {
    let mut bytes = tag.to_bytes().expect("fixture tag fits");
    bytes.extend_from_slice(audio);
    bytes
}

/// A 128-byte ID3v1.1 trailer with `title` and track number 3.
pub fn id3v1_trailer(title: &str) -> Vec<u8> {
    let mut out = b"TAG".to_vec();
    out.extend_from_slice(title.as_bytes());
    out.resize(126, 0);
    out.push(3);
    out.push(12); // genre
    out
}
