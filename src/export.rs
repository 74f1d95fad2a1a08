//! Clip export: slice the source PCM, re-encode it at the source bitrate and
//! put the source ID3v2 frames back in front of the new audio. An ID3v1
//! trailer goes back at the end.

mod encode;

pub use encode::{EncodeParams, encode_pcm, lame_bitrate};

use crate::audio::AudioTrack;
use crate::config::ExportSettings;
use crate::error::{ExportError, TagCopyError};
use crate::selection::ClipRange;
use crate::tags::{Id3v1Trailer, TagState};

/// What happened to the source tags during an export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagOutcome {
    Copied { frames: usize, id3v1: bool },
    /// The source had no tags, or only an empty ID3v2 header.
    NoSourceTags,
    /// Tag copying is turned off in the export settings.
    Disabled,
    /// The ID3v2 frames were left out. An ID3v1 trailer is still copied.
    Skipped(TagCopyError),
}

/// A finished export: the full output file and how the tags fared.
#[derive(Debug, Clone)]
pub struct Exported {
    pub bytes: Vec<u8>,
    pub tags: TagOutcome,
}

impl Exported {
    /// The non-fatal tag warning, if any.
    pub fn warning(&self) -> Option<&TagCopyError> {
        match &self.tags {
            TagOutcome::Skipped(err) => Some(err),
            _ => None,
        }
    }
}

/// Re-encode `range` of `track` and transplant its tags.
///
/// Fails only if the audio cannot be produced. Tag problems are reported in
/// [`Exported::tags`] alongside the encoded audio.
pub fn export(
    track: &AudioTrack,
    range: &ClipRange,
    settings: &ExportSettings,
) -> Result<Exported, ExportError> {
    let duration_ms = track.duration_ms();
    if range.end_ms() > duration_ms {
        return Err(ExportError::RangeOutOfBounds {
            end_ms: range.end_ms(),
            duration_ms,
        });
    }

    let span = track.sample_span(range);
    if span.is_empty() {
        return Err(ExportError::EmptyRange {
            start_ms: range.start_ms(),
            end_ms: range.end_ms(),
        });
    }

    let params = EncodeParams {
        sample_rate: track.sample_rate_hz(),
        channels: track.channels(),
        bitrate_bps: track.bitrate_bps(),
        quality: settings.quality,
    };
    let audio = encode_pcm(&track.samples()[span], &params)?;

    let (tag_bytes, trailer, tags) = if settings.copy_tags {
        let trailer = track.id3v1().map(Id3v1Trailer::as_bytes).unwrap_or_default();
        let (tag_bytes, tags) = transplant(track.tags(), !trailer.is_empty());
        (tag_bytes, trailer, tags)
    } else {
        (Vec::new(), &[][..], TagOutcome::Disabled)
    };
    if let TagOutcome::Skipped(err) = &tags {
        tracing::warn!(error = %err, "exporting without ID3v2 tags");
    }

    let mut bytes = Vec::with_capacity(tag_bytes.len() + audio.len() + trailer.len());
    bytes.extend_from_slice(&tag_bytes);
    bytes.extend_from_slice(&audio);
    bytes.extend_from_slice(trailer);

    tracing::info!(
        start_ms = range.start_ms(),
        end_ms = range.end_ms(),
        bitrate_bps = params.bitrate_bps,
        bytes = bytes.len(),
        tags = ?tags,
        "exported clip"
    );

    Ok(Exported { bytes, tags })
}

fn transplant(state: &TagState, id3v1: bool) -> (Vec<u8>, TagOutcome) {
    let copied = |frames: usize| match (frames, id3v1) {
        (0, false) => TagOutcome::NoSourceTags,
        _ => TagOutcome::Copied { frames, id3v1 },
    };
    match state {
        TagState::Absent => (Vec::new(), copied(0)),
        TagState::Present(tag) if tag.is_empty() => (Vec::new(), copied(0)),
        TagState::Present(tag) => match tag.to_bytes() {
            Ok(bytes) => (bytes, copied(tag.len())),
            Err(err) => (Vec::new(), TagOutcome::Skipped(err)),
        },
        TagState::Unreadable(reason) => (
            Vec::new(),
            TagOutcome::Skipped(TagCopyError::SourceUnreadable(reason.clone())),
        ),
    }
}
