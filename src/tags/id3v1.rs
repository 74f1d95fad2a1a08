//! The fixed-size ID3v1 tag at the end of a stream.
//!
//! Carried as its 128 raw bytes and appended to the output unchanged.

pub const TRAILER_LEN: usize = 128;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Id3v1Trailer {
    bytes: Box<[u8; TRAILER_LEN]>,
}

impl Id3v1Trailer {
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..]
    }
}

/// The trailer of `bytes`, if one starts at or after `audio_offset`.
pub(crate) fn find(bytes: &[u8], audio_offset: usize) -> Option<Id3v1Trailer> {
    let start = bytes.len().checked_sub(TRAILER_LEN)?;
    if start < audio_offset {
        return None;
    }
    let raw: &[u8; TRAILER_LEN] = bytes[start..].try_into().ok()?;
    if !raw.starts_with(b"TAG") {
        return None;
    }
    Some(Id3v1Trailer {
        bytes: Box::new(*raw),
    })
}
