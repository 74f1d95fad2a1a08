//! Stream-level encoding parameters, read through lofty's MPEG properties.

use std::io::Cursor;

use lofty::config::ParseOptions;
use lofty::mpeg::{Layer, MpegFile};
use lofty::prelude::*;

pub use lofty::mpeg::MpegVersion;

use crate::error::DecodeError;

const BITRATES_V1_KBPS: [u32; 14] = [32, 40, 48, 56, 64, 80, 96, 112, 128, 160, 192, 224, 256, 320];
const BITRATES_V2_KBPS: [u32; 14] = [8, 16, 24, 32, 40, 48, 56, 64, 80, 96, 112, 128, 144, 160];

/// Layer III bitrates a frame header can declare for `version`.
pub fn standard_bitrates(version: MpegVersion) -> &'static [u32] {
    match version {
        MpegVersion::V1 => &BITRATES_V1_KBPS,
        _ => &BITRATES_V2_KBPS,
    }
}

/// MPEG version whose sample-rate table contains `rate`.
pub fn version_for_sample_rate(rate: u32) -> Option<MpegVersion> {
    match rate {
        44_100 | 48_000 | 32_000 => Some(MpegVersion::V1),
        22_050 | 24_000 | 16_000 => Some(MpegVersion::V2),
        11_025 | 12_000 | 8_000 => Some(MpegVersion::V2_5),
        _ => None,
    }
}

/// Encoding parameters of a whole stream.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct StreamInfo {
    pub version: MpegVersion,
    pub sample_rate: u32,
    pub channels: u8,
    /// Average for `Xing`/`VBRI` streams, the frame rate otherwise.
    pub bitrate_bps: u32,
}

/// Read the stream-level parameters of an MP3 byte stream.
///
/// Tags are skipped, not parsed; their contents are handled by
/// [`crate::tags`].
pub fn probe_stream(bytes: &[u8]) -> Result<StreamInfo, DecodeError> {
    let options = ParseOptions::new().read_tags(false);
    let file = MpegFile::read_from(&mut Cursor::new(bytes), options)?;
    let properties = file.properties();

    if *properties.layer() != Layer::Layer3 {
        return Err(DecodeError::Unsupported(format!(
            "MPEG {:?} audio is not Layer III",
            properties.layer()
        )));
    }
    let version = *properties.version();
    let kbps = nominal_kbps(version, properties.audio_bitrate());
    if kbps == 0 {
        return Err(DecodeError::Malformed("stream bitrate is unknown".to_string()));
    }

    let info = StreamInfo {
        version,
        sample_rate: properties.sample_rate(),
        channels: properties.channels(),
        bitrate_bps: kbps * 1000,
    };
    tracing::debug!(
        version = ?info.version,
        sample_rate = info.sample_rate,
        channels = info.channels,
        bitrate_bps = info.bitrate_bps,
        "read MPEG stream properties"
    );
    Ok(info)
}

/// lofty derives averages from whole milliseconds, so a constant-rate stream
/// with an `Info` header can come back one kbps under its frame rate.
fn nominal_kbps(version: MpegVersion, kbps: u32) -> u32 {
    standard_bitrates(version)
        .iter()
        .copied()
        .find(|&rate| rate == kbps || rate == kbps + 1)
        .unwrap_or(kbps)
}
