use std::borrow::Cow;
use std::io::{Cursor, Read};

use lofty::prelude::*;
use lofty::probe::Probe;
use symphonia::core::audio::SampleBuffer;
use symphonia::core::codecs::{CODEC_TYPE_NULL, DecoderOptions};
use symphonia::core::errors::Error as SymphoniaError;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;

use crate::error::DecodeError;
use crate::tags;

use super::stream;
use super::track::{AudioTrack, ChannelLayout, TrackSummary};

/// Read a whole MP3 stream and decode it. See [`decode`].
pub fn decode_reader<R: Read>(mut reader: R) -> Result<AudioTrack, DecodeError> {
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;
    decode(&bytes)
}

/// Decode an in-memory MP3 stream into an [`AudioTrack`].
///
/// Tags are split off first. Encoding parameters come from lofty's
/// stream-level properties and PCM from symphonia.
pub fn decode(bytes: &[u8]) -> Result<AudioTrack, DecodeError> {
    if bytes.is_empty() {
        return Err(DecodeError::EmptyInput);
    }

    let tag_scan = tags::scan(bytes);
    let audio = &bytes[tag_scan.audio(bytes.len())];
    let stream = stream::probe_stream(audio)?;
    let pcm = decode_pcm(audio)?;

    if pcm.sample_rate != stream.sample_rate {
        return Err(DecodeError::SampleRateMismatch {
            header: stream.sample_rate,
            decoded: pcm.sample_rate,
        });
    }
    let channels = ChannelLayout::from_count(pcm.channels)
        .ok_or(DecodeError::UnsupportedChannels(pcm.channels))?;

    let track = AudioTrack::new(
        pcm.samples,
        channels,
        pcm.sample_rate,
        stream.bitrate_bps,
        tag_scan.state,
    )?
    .with_id3v1(tag_scan.id3v1)
    .with_summary(read_summary(bytes));

    tracing::info!(
        duration_ms = track.duration_ms(),
        sample_rate = track.sample_rate_hz(),
        channels = track.channel_count(),
        bitrate_bps = track.bitrate_bps(),
        tag_frames = track.tags().frame_count(),
        id3v1 = track.id3v1().is_some(),
        "decoded MP3"
    );

    Ok(track)
}

struct Pcm {
    samples: Vec<i16>,
    sample_rate: u32,
    channels: usize,
}

fn decode_pcm(audio: &[u8]) -> Result<Pcm, DecodeError> {
    let mss = MediaSourceStream::new(Box::new(Cursor::new(audio.to_vec())), Default::default());

    let mut hint = Hint::new();
    hint.with_extension("mp3").mime_type("audio/mpeg");

    let probed = symphonia::default::get_probe()
        .format(&hint, mss, &FormatOptions::default(), &MetadataOptions::default())
        .map_err(map_symphonia_error)?;
    let mut format = probed.format;

    let track = format
        .tracks()
        .iter()
        .find(|t| t.codec_params.codec != CODEC_TYPE_NULL)
        .ok_or_else(|| DecodeError::Unsupported("no decodable audio track".to_string()))?;
    let track_id = track.id;

    let mut decoder = symphonia::default::get_codecs()
        .make(&track.codec_params, &DecoderOptions::default())
        .map_err(map_symphonia_error)?;

    let mut samples: Vec<i16> = Vec::new();
    let mut sample_rate = track.codec_params.sample_rate;
    let mut channels = track.codec_params.channels.map(|c| c.count());
    let mut sample_buf: Option<SampleBuffer<i16>> = None;
    let mut skipped = 0usize;

    loop {
        let packet = match format.next_packet() {
            Ok(packet) => packet,
            Err(SymphoniaError::IoError(e)) if e.kind() == std::io::ErrorKind::UnexpectedEof => {
                break;
            }
            Err(e) => return Err(map_symphonia_error(e)),
        };

        if packet.track_id() != track_id {
            continue;
        }

        let decoded = match decoder.decode(&packet) {
            Ok(decoded) => decoded,
            Err(SymphoniaError::DecodeError(reason)) => {
                skipped += 1;
                tracing::warn!(reason, packet_ts = packet.ts(), "skipping corrupt MP3 frame");
                continue;
            }
            Err(e) => return Err(map_symphonia_error(e)),
        };

        let spec = *decoded.spec();
        let frame_channels = spec.channels.count();
        if *channels.get_or_insert(frame_channels) != frame_channels {
            return Err(DecodeError::Unsupported(
                "channel count changes mid-stream".to_string(),
            ));
        }
        sample_rate.get_or_insert(spec.rate);

        let needed = decoded.capacity() * frame_channels;
        if sample_buf.as_ref().map_or(true, |b| b.capacity() < needed) {
            sample_buf = Some(SampleBuffer::<i16>::new(decoded.capacity() as u64, spec));
        }
        if let Some(buf) = sample_buf.as_mut() {
            buf.copy_interleaved_ref(decoded);
            samples.extend_from_slice(buf.samples());
        }
    }

    if skipped > 0 {
        tracing::warn!(skipped, "some MP3 frames could not be decoded");
    }
    if samples.is_empty() {
        return Err(DecodeError::NoSamples);
    }

    let sample_rate = sample_rate
        .ok_or_else(|| DecodeError::Malformed("sample rate unknown".to_string()))?;
    let channels =
        channels.ok_or_else(|| DecodeError::Malformed("channel count unknown".to_string()))?;

    Ok(Pcm {
        samples,
        sample_rate,
        channels,
    })
}

fn map_symphonia_error(err: SymphoniaError) -> DecodeError {
    match err {
        SymphoniaError::IoError(e) => DecodeError::Io(e),
        SymphoniaError::Unsupported(what) => DecodeError::Unsupported(what.to_string()),
        SymphoniaError::ResetRequired => {
            DecodeError::Unsupported("stream parameters change mid-stream".to_string())
        }
        other => DecodeError::Malformed(other.to_string()),
    }
}

/// Title/artist/album for display. Absent or unreadable tags give an empty summary.
fn read_summary(bytes: &[u8]) -> TrackSummary {
    let tagged = match Probe::new(Cursor::new(bytes))
        .guess_file_type()
        .map_err(lofty::error::LoftyError::from)
        .and_then(|probe| probe.read())
    {
        Ok(tagged) => tagged,
        Err(e) => {
            tracing::debug!(error = %e, "no readable tag summary");
            return TrackSummary::default();
        }
    };

    let Some(tag) = tagged.primary_tag().or_else(|| tagged.first_tag()) else {
        return TrackSummary::default();
    };

    TrackSummary {
        title: non_empty(tag.title()),
        artist: non_empty(tag.artist()),
        album: non_empty(tag.album()),
    }
}

fn non_empty(value: Option<Cow<'_, str>>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
