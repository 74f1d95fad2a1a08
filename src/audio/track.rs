use std::ops::Range;

use crate::error::DecodeError;
use crate::selection::ClipRange;
use crate::tags::{Id3v1Trailer, TagState};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ChannelLayout {
    Mono,
    Stereo,
}

impl ChannelLayout {
    pub fn from_count(count: usize) -> Option<Self> {
        match count {
            1 => Some(Self::Mono),
            2 => Some(Self::Stereo),
            _ => None,
        }
    }

    pub fn count(self) -> usize {
        match self {
            Self::Mono => 1,
            Self::Stereo => 2,
        }
    }
}

/// Human-readable metadata for display. Not used for tag transplanting.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrackSummary {
    pub title: Option<String>,
    pub artist: Option<String>,
    pub album: Option<String>,
}

/// One decoded input file.
///
/// `samples` are interleaved signed 16-bit PCM in the source channel layout
/// and sample rate; their length is always a multiple of the channel count.
#[derive(Debug, Clone)]
pub struct AudioTrack {
    samples: Vec<i16>,
    channels: ChannelLayout,
    sample_rate_hz: u32,
    bitrate_bps: u32,
    tags: TagState,
    id3v1: Option<Id3v1Trailer>,
    summary: TrackSummary,
}

impl AudioTrack {
    pub fn new(
        samples: Vec<i16>,
        channels: ChannelLayout,
        sample_rate_hz: u32,
        bitrate_bps: u32,
        tags: TagState,
    ) -> Result<Self, DecodeError> {
        if sample_rate_hz == 0 {
            return Err(DecodeError::Unsupported("sample rate of 0 Hz".to_string()));
        }
        if samples.len() % channels.count() != 0 {
            return Err(DecodeError::Malformed(format!(
                "{} samples do not divide into {} channels",
                samples.len(),
                channels.count()
            )));
        }

        Ok(Self {
            samples,
            channels,
            sample_rate_hz,
            bitrate_bps,
            tags,
            id3v1: None,
            summary: TrackSummary::default(),
        })
    }

    pub fn with_id3v1(mut self, trailer: Option<Id3v1Trailer>) -> Self {
        self.id3v1 = trailer;
        self
    }

    pub(super) fn with_summary(mut self, summary: TrackSummary) -> Self {
        self.summary = summary;
        self
    }

    pub fn samples(&self) -> &[i16] {
        &self.samples
    }

    pub fn channels(&self) -> ChannelLayout {
        self.channels
    }

    pub fn channel_count(&self) -> usize {
        self.channels.count()
    }

    pub fn sample_rate_hz(&self) -> u32 {
        self.sample_rate_hz
    }

    /// Bits per second of the source encoding (average for VBR streams).
    pub fn bitrate_bps(&self) -> u32 {
        self.bitrate_bps
    }

    pub fn tags(&self) -> &TagState {
        &self.tags
    }

    pub fn id3v1(&self) -> Option<&Id3v1Trailer> {
        self.id3v1.as_ref()
    }

    pub fn summary(&self) -> &TrackSummary {
        &self.summary
    }

    /// Number of sample frames (one sample per channel).
    pub fn frame_count(&self) -> usize {
        self.samples.len() / self.channels.count()
    }

    pub fn duration_ms(&self) -> u64 {
        self.frame_count() as u64 * 1000 / u64::from(self.sample_rate_hz)
    }

    pub fn duration_secs(&self) -> f64 {
        self.frame_count() as f64 / f64::from(self.sample_rate_hz)
    }

    /// Frame index at `ms`, rounded down and capped at the end of the track.
    pub fn frame_at_ms(&self, ms: u64) -> usize {
        let frame = ms * u64::from(self.sample_rate_hz) / 1000;
        usize::try_from(frame).map_or(self.frame_count(), |f| f.min(self.frame_count()))
    }

    /// Interleaved sample indices covered by `range`.
    pub fn sample_span(&self, range: &ClipRange) -> Range<usize> {
        let ch = self.channels.count();
        self.frame_at_ms(range.start_ms()) * ch..self.frame_at_ms(range.end_ms()) * ch
    }
}
