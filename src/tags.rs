//! Source tag detection.
//!
//! `scan` looks for an ID3v2 tag at the start of an MP3 stream and an ID3v1
//! trailer at its end, and reports where the audio lies between them.

mod id3v1;
mod id3v2;

pub use id3v1::Id3v1Trailer;
pub use id3v2::{Id3Version, Id3v2Tag, TagFrame};

use id3v2::HeaderProbe;

/// What the source stream carries in the way of tags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagState {
    /// No ID3v2 header at all. A valid state, not an error.
    Absent,
    Present(Id3v2Tag),
    /// A header exists but the frames could not be recovered.
    Unreadable(String),
}

impl TagState {
    pub fn tag(&self) -> Option<&Id3v2Tag> {
        match self {
            TagState::Present(tag) => Some(tag),
            _ => None,
        }
    }

    pub fn frame_count(&self) -> usize {
        self.tag().map_or(0, Id3v2Tag::len)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagScan {
    pub state: TagState,
    /// Byte offset of the first byte after the tag (0 when there is none).
    pub audio_offset: usize,
    pub id3v1: Option<Id3v1Trailer>,
}

impl TagScan {
    /// Byte range of the audio between the leading tag and the trailer.
    pub fn audio(&self, len: usize) -> std::ops::Range<usize> {
        let end = match self.id3v1 {
            Some(_) => len.saturating_sub(id3v1::TRAILER_LEN),
            None => len,
        };
        self.audio_offset.min(end)..end
    }
}

/// Detect and split the tags of `bytes`.
pub fn scan(bytes: &[u8]) -> TagScan {
    let (state, audio_offset) = scan_id3v2(bytes);
    let id3v1 = id3v1::find(bytes, audio_offset);
    if id3v1.is_some() {
        tracing::debug!("found ID3v1 trailer");
    }
    TagScan {
        state,
        audio_offset,
        id3v1,
    }
}

fn scan_id3v2(bytes: &[u8]) -> (TagState, usize) {
    let header = match id3v2::probe_header(bytes) {
        HeaderProbe::Missing => return (TagState::Absent, 0),
        HeaderProbe::Corrupt(reason) => {
            tracing::warn!(%reason, "ID3v2 header is corrupt");
            // Only the fixed header can be skipped.
            return (
                TagState::Unreadable(reason),
                id3v2::HEADER_LEN.min(bytes.len()),
            );
        }
        HeaderProbe::Found(header) => header,
    };

    let audio_offset = header.total_len().min(bytes.len());
    let state = match id3v2::parse_frames(&header, bytes) {
        Ok(tag) => {
            tracing::debug!(
                major = header.version.major,
                revision = header.version.revision,
                frames = tag.len(),
                "read ID3v2 tag"
            );
            TagState::Present(tag)
        }
        Err(reason) => {
            tracing::warn!(%reason, "ID3v2 tag present but unreadable");
            TagState::Unreadable(reason)
        }
    };

    (state, audio_offset)
}
