//! Audition a selection on the default output device.

use rodio::buffer::SamplesBuffer;
use rodio::{OutputStreamBuilder, Sink};

use crate::audio::{AudioTrack, FULL_SCALE};
use crate::error::PreviewError;
use crate::selection::ClipRange;

/// Build a playable source for `range` of `track`. Needs no audio device.
pub fn preview_source(track: &AudioTrack, range: &ClipRange) -> Result<SamplesBuffer, PreviewError> {
    let span = track.sample_span(range);
    if span.is_empty() {
        return Err(PreviewError::EmptyRange {
            start_ms: range.start_ms(),
            end_ms: range.end_ms(),
        });
    }

    let samples: Vec<f32> = track.samples()[span]
        .iter()
        .map(|&s| (f64::from(s) / FULL_SCALE) as f32)
        .collect();
    Ok(SamplesBuffer::new(
        track.channel_count() as u16,
        track.sample_rate_hz(),
        samples,
    ))
}

/// Play `range` of `track` and block until it finishes.
pub fn play(track: &AudioTrack, range: &ClipRange) -> Result<(), PreviewError> {
    let source = preview_source(track, range)?;

    let mut stream = OutputStreamBuilder::open_default_stream()?;
    // rodio prints to stderr when the stream is dropped
    stream.log_on_drop(false);

    let sink = Sink::connect_new(stream.mixer());
    sink.append(source);
    tracing::info!(
        start_ms = range.start_ms(),
        end_ms = range.end_ms(),
        "playing selection"
    );
    sink.sleep_until_end();
    Ok(())
}

#[cfg(test)]
mod tests;
