//! Minimal ID3v2 container codec.
//!
//! Frames are kept opaque: the codec only splits the tag into
//! `(id, flags, payload)` records and writes them back verbatim. Nothing here
//! interprets frame contents.

use std::io::Read;

use lofty::id3::v2::util::synchsafe::{SynchsafeInteger, UnsynchronizedStream};

use crate::error::TagCopyError;

pub const HEADER_LEN: usize = 10;
const FOOTER_LEN: usize = 10;

const FLAG_UNSYNC: u8 = 0x80;
const FLAG_EXTENDED: u8 = 0x40;
const FLAG_V22_COMPRESSED: u8 = 0x40;
const FLAG_FOOTER: u8 = 0x10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Id3Version {
    pub major: u8,
    pub revision: u8,
}

impl Id3Version {
    fn id_len(self) -> usize {
        if self.major == 2 { 3 } else { 4 }
    }

    fn frame_header_len(self) -> usize {
        if self.major == 2 { 6 } else { 10 }
    }
}

/// One tag frame, carried byte-for-byte.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagFrame {
    id: String,
    flags: [u8; 2],
    payload: Vec<u8>,
}

impl TagFrame {
    pub fn new(id: impl Into<String>, flags: [u8; 2], payload: Vec<u8>) -> Self {
        Self {
            id: id.into(),
            flags,
            payload,
        }
    }

    /// Frame identifier, e.g. `TIT2` (or `TT2` for ID3v2.2).
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Raw frame status/format flags. Always zero for ID3v2.2.
    pub fn flags(&self) -> [u8; 2] {
        self.flags
    }

    pub fn payload(&self) -> &[u8] {
        &self.payload
    }
}

/// A parsed ID3v2 tag: its version and frames in source order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Id3v2Tag {
    version: Id3Version,
    frames: Vec<TagFrame>,
}

impl Id3v2Tag {
    pub fn new(version: Id3Version, frames: Vec<TagFrame>) -> Self {
        Self { version, frames }
    }

    pub fn version(&self) -> Id3Version {
        self.version
    }

    pub fn frames(&self) -> &[TagFrame] {
        &self.frames
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Serialize as a standalone tag (header + frames, no padding).
    pub fn to_bytes(&self) -> Result<Vec<u8>, TagCopyError> {
        let version = self.version;
        let mut body = Vec::new();

        for frame in &self.frames {
            let len = frame.payload.len();
            let too_large = || TagCopyError::FrameTooLarge {
                id: frame.id.clone(),
                len,
                major: version.major,
            };

            body.extend_from_slice(frame.id.as_bytes());
            match version.major {
                2 => {
                    if len >= 1 << 24 {
                        return Err(too_large());
                    }
                    body.extend_from_slice(&(len as u32).to_be_bytes()[1..]);
                }
                3 => {
                    let len = u32::try_from(len).map_err(|_| too_large())?;
                    body.extend_from_slice(&len.to_be_bytes());
                }
                _ => {
                    let size = u32::try_from(len)
                        .ok()
                        .and_then(encode_synchsafe)
                        .ok_or_else(too_large)?;
                    body.extend_from_slice(&size);
                }
            }
            if version.major > 2 {
                body.extend_from_slice(&frame.flags);
            }
            body.extend_from_slice(&frame.payload);
        }

        let size = u32::try_from(body.len())
            .ok()
            .and_then(encode_synchsafe)
            .ok_or(TagCopyError::TagTooLarge { len: body.len() })?;

        let mut out = Vec::with_capacity(HEADER_LEN + body.len());
        out.extend_from_slice(b"ID3");
        out.push(version.major);
        out.push(version.revision);
        out.push(0);
        out.extend_from_slice(&size);
        out.extend_from_slice(&body);
        Ok(out)
    }
}

/// Fixed tag header as found at the start of the stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Header {
    pub version: Id3Version,
    pub flags: u8,
    pub size: usize,
}

impl Header {
    /// Bytes occupied by the whole tag, including header and optional footer.
    pub fn total_len(&self) -> usize {
        let footer = if self.version.major == 4 && self.flags & FLAG_FOOTER != 0 {
            FOOTER_LEN
        } else {
            0
        };
        HEADER_LEN + self.size + footer
    }
}

/// Outcome of looking for a header at the start of `bytes`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum HeaderProbe {
    /// No `ID3` magic: the stream carries no ID3v2 tag.
    Missing,
    /// Magic present but the header itself is corrupt; its extent is unknown.
    Corrupt(String),
    Found(Header),
}

pub(crate) fn probe_header(bytes: &[u8]) -> HeaderProbe {
    if bytes.len() < 3 || &bytes[..3] != b"ID3" {
        return HeaderProbe::Missing;
    }
    if bytes.len() < HEADER_LEN {
        return HeaderProbe::Corrupt(format!(
            "header truncated at {} bytes",
            bytes.len()
        ));
    }

    let version = Id3Version {
        major: bytes[3],
        revision: bytes[4],
    };
    let Some(size) = decode_synchsafe(&bytes[6..10]) else {
        return HeaderProbe::Corrupt("tag size is not synchsafe".to_string());
    };

    HeaderProbe::Found(Header {
        version,
        flags: bytes[5],
        size: size as usize,
    })
}

/// Split the tag body into frames.
///
/// `tag` must hold the complete tag, starting at the `ID3` magic.
pub(crate) fn parse_frames(header: &Header, tag: &[u8]) -> Result<Id3v2Tag, String> {
    let version = header.version;
    if !(2..=4).contains(&version.major) {
        return Err(format!("unsupported version 2.{}", version.major));
    }
    if version.major == 2 && header.flags & FLAG_V22_COMPRESSED != 0 {
        return Err("compressed ID3v2.2 tags are not supported".to_string());
    }

    let end = HEADER_LEN + header.size;
    if tag.len() < end {
        return Err(format!(
            "tag claims {} bytes but only {} are present",
            end,
            tag.len()
        ));
    }

    let mut body = tag[HEADER_LEN..end].to_vec();
    // ID3v2.4 unsynchronises per frame; the frame flags travel with the payload.
    if header.flags & FLAG_UNSYNC != 0 && version.major < 4 {
        body = resynchronise(&body)?;
    }

    let mut pos = 0;
    if version.major > 2 && header.flags & FLAG_EXTENDED != 0 {
        pos = extended_header_len(version, &body)?;
    }

    let id_len = version.id_len();
    let header_len = version.frame_header_len();
    let mut frames = Vec::new();

    while body.len().saturating_sub(pos) >= header_len {
        if body[pos] == 0 {
            break; // padding
        }

        let id_bytes = &body[pos..pos + id_len];
        if !id_bytes
            .iter()
            .all(|b| b.is_ascii_uppercase() || b.is_ascii_digit())
        {
            return Err(format!("invalid frame id at byte {pos}"));
        }
        let id = String::from_utf8_lossy(id_bytes).into_owned();

        let size_len = if version.major == 2 { 3 } else { 4 };
        let size_bytes = &body[pos + id_len..pos + id_len + size_len];
        let size: u32 = match version.major {
            2 => u32::from_be_bytes([0, size_bytes[0], size_bytes[1], size_bytes[2]]),
            3 => u32::from_be_bytes([size_bytes[0], size_bytes[1], size_bytes[2], size_bytes[3]]),
            _ => decode_synchsafe(size_bytes)
                .ok_or_else(|| format!("frame {id} has a non-synchsafe size"))?,
        };
        let size = size as usize;

        let flags = if version.major == 2 {
            [0, 0]
        } else {
            [body[pos + 8], body[pos + 9]]
        };

        let start = pos + header_len;
        let Some(payload) = body.get(start..start + size) else {
            return Err(format!("frame {id} overruns the tag ({size} bytes)"));
        };

        frames.push(TagFrame::new(id, flags, payload.to_vec()));
        pos = start + size;
    }

    Ok(Id3v2Tag::new(version, frames))
}

fn extended_header_len(version: Id3Version, body: &[u8]) -> Result<usize, String> {
    if body.len() < 4 {
        return Err("extended header truncated".to_string());
    }
    let len = if version.major == 3 {
        // v2.3 size excludes the size field itself
        u32::from_be_bytes([body[0], body[1], body[2], body[3]]) as usize + 4
    } else {
        decode_synchsafe(&body[..4])
            .ok_or_else(|| "extended header size is not synchsafe".to_string())? as usize
    };
    if len > body.len() {
        return Err("extended header overruns the tag".to_string());
    }
    Ok(len)
}

/// Undo the unsynchronisation scheme: every `FF 00` becomes `FF`.
fn resynchronise(data: &[u8]) -> Result<Vec<u8>, String> {
    let mut out = Vec::with_capacity(data.len());
    UnsynchronizedStream::new(data)
        .read_to_end(&mut out)
        .map_err(|e| format!("cannot resynchronise tag body: {e}"))?;
    Ok(out)
}

/// A 4-byte synchsafe integer. Any byte with its high bit set is rejected.
pub(crate) fn decode_synchsafe(bytes: &[u8]) -> Option<u32> {
    let word: [u8; 4] = bytes.try_into().ok()?;
    if word.iter().any(|b| b & 0x80 != 0) {
        return None;
    }
    Some(u32::from_be_bytes(word).unsynch())
}

/// `None` when `value` needs more than 28 bits.
pub(crate) fn encode_synchsafe(value: u32) -> Option<[u8; 4]> {
    value.synch().ok().map(u32::to_be_bytes)
}
