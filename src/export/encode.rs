use mp3lame_encoder::{Bitrate, Builder, FlushNoGap, InterleavedPcm, MonoPcm, Quality};

use crate::audio::{ChannelLayout, probe_stream, standard_bitrates, version_for_sample_rate};
use crate::config::EncoderQuality;
use crate::error::ExportError;

/// Worst-case size of a LAME flush.
const FLUSH_RESERVE: usize = 7200;

/// Encoder parameters for one export. Mirrors the source stream.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct EncodeParams {
    pub sample_rate: u32,
    pub channels: ChannelLayout,
    pub bitrate_bps: u32,
    pub quality: EncoderQuality,
}

/// Map an exact bitrate to the LAME CBR setting, or refuse.
///
/// The rate must be one a frame header can declare at `sample_rate`
/// (32..=320 kbps for MPEG-1, 8..=160 kbps for MPEG-2/2.5) and one LAME exposes.
pub fn lame_bitrate(bitrate_bps: u32, sample_rate: u32) -> Result<Bitrate, ExportError> {
    let version =
        version_for_sample_rate(sample_rate).ok_or(ExportError::UnsupportedSampleRate(sample_rate))?;
    let unsupported = ExportError::UnsupportedBitrate {
        bitrate_bps,
        sample_rate,
    };
    if bitrate_bps % 1000 != 0 {
        return Err(unsupported);
    }

    let kbps = bitrate_bps / 1000;
    if !standard_bitrates(version).contains(&kbps) {
        return Err(unsupported);
    }

    let bitrate = match kbps {
        8 => Bitrate::Kbps8,
        16 => Bitrate::Kbps16,
        24 => Bitrate::Kbps24,
        32 => Bitrate::Kbps32,
        40 => Bitrate::Kbps40,
        48 => Bitrate::Kbps48,
        64 => Bitrate::Kbps64,
        80 => Bitrate::Kbps80,
        96 => Bitrate::Kbps96,
        112 => Bitrate::Kbps112,
        128 => Bitrate::Kbps128,
        160 => Bitrate::Kbps160,
        192 => Bitrate::Kbps192,
        224 => Bitrate::Kbps224,
        256 => Bitrate::Kbps256,
        320 => Bitrate::Kbps320,
        _ => return Err(unsupported),
    };
    Ok(bitrate)
}

fn lame_quality(quality: EncoderQuality) -> Quality {
    match quality {
        EncoderQuality::Best => Quality::Best,
        EncoderQuality::Good => Quality::Good,
        EncoderQuality::Fast => Quality::Decent,
    }
}

/// Encode interleaved PCM to a bare MP3 stream (no tags) at exactly `params.bitrate_bps`.
pub fn encode_pcm(samples: &[i16], params: &EncodeParams) -> Result<Vec<u8>, ExportError> {
    let bitrate = lame_bitrate(params.bitrate_bps, params.sample_rate)?;
    let channels = params.channels.count();
    let frames = samples.len() / channels;
    if frames == 0 {
        return Err(ExportError::Encode("no samples to encode".to_string()));
    }

    let mut builder = Builder::new()
        .ok_or_else(|| ExportError::Config("failed to allocate LAME encoder".to_string()))?;
    builder
        .set_num_channels(channels as u8)
        .map_err(|e| ExportError::Config(format!("channel count {channels}: {e:?}")))?;
    builder
        .set_sample_rate(params.sample_rate)
        .map_err(|e| ExportError::Config(format!("sample rate {}: {e:?}", params.sample_rate)))?;
    builder
        .set_brate(bitrate)
        .map_err(|e| ExportError::Config(format!("bitrate {}: {e:?}", params.bitrate_bps)))?;
    builder
        .set_quality(lame_quality(params.quality))
        .map_err(|e| ExportError::Config(format!("quality: {e:?}")))?;
    let mut encoder = builder
        .build()
        .map_err(|e| ExportError::Config(format!("{e:?}")))?;

    let mut out = Vec::with_capacity(mp3lame_encoder::max_required_buffer_size(frames));
    let encoded = match params.channels {
        ChannelLayout::Mono => encoder.encode_to_vec(MonoPcm(samples), &mut out),
        ChannelLayout::Stereo => encoder.encode_to_vec(InterleavedPcm(samples), &mut out),
    }
    .map_err(|e| ExportError::Encode(format!("{e:?}")))?;

    out.reserve(FLUSH_RESERVE);
    let flushed = encoder
        .flush_to_vec::<FlushNoGap>(&mut out)
        .map_err(|e| ExportError::Encode(format!("flush: {e:?}")))?;

    tracing::debug!(
        frames,
        encoded_bytes = encoded,
        flushed_bytes = flushed,
        bitrate_bps = params.bitrate_bps,
        "encoded PCM"
    );

    verify_output(&out, params)?;
    Ok(out)
}

/// LAME may pick its own output rate for low bitrates; refuse rather than drift.
fn verify_output(stream: &[u8], params: &EncodeParams) -> Result<(), ExportError> {
    let info = probe_stream(stream)
        .map_err(|e| ExportError::Encode(format!("encoder output is not MPEG audio: {e}")))?;
    let actual_bps = info.bitrate_bps;
    let actual_rate = info.sample_rate;
    if actual_bps != params.bitrate_bps || actual_rate != params.sample_rate {
        return Err(ExportError::OutputMismatch {
            bitrate_bps: params.bitrate_bps,
            sample_rate: params.sample_rate,
            actual_bps,
            actual_rate,
        });
    }
    Ok(())
}
