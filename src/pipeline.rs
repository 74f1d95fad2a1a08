//! One-shot helpers: input bytes in, clipped MP3 bytes out.

use crate::analysis::SilenceScanner;
use crate::audio;
use crate::config::Settings;
use crate::error::Result;
use crate::export::{self, Exported};
use crate::selection::ClipSelector;

/// Decode `input`, clip it to `[start_sec, end_sec)` (clamped to the track)
/// and re-encode.
pub fn clip_bytes(
    input: &[u8],
    start_sec: f64,
    end_sec: f64,
    settings: &Settings,
) -> Result<Exported> {
    let track = audio::decode(input)?;
    let range = ClipSelector::for_track(&track).select(start_sec, end_sec)?;
    Ok(export::export(&track, &range, &settings.export)?)
}

/// Decode `input` and keep `[0, boundary)`, where the boundary is the end of
/// the audible part plus padding. A silent input is an error.
pub fn trim_trailing_silence(input: &[u8], settings: &Settings) -> Result<Exported> {
    let track = audio::decode(input)?;
    let mixed = audio::mixdown(track.samples(), track.channels());
    let range = ClipSelector::for_track(&track).auto_detect(
        0.0,
        &SilenceScanner::new(&settings.silence),
        &mixed,
        track.sample_rate_hz(),
    )?;
    tracing::info!(
        end_ms = range.end_ms(),
        duration_ms = track.duration_ms(),
        "trimming trailing silence"
    );
    Ok(export::export(&track, &range, &settings.export)?)
}

#[cfg(test)]
mod tests;
