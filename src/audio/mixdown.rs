use super::track::ChannelLayout;

/// Average interleaved channels into one analysis channel.
///
/// Output has one value per sample frame. Accumulation is done in `f64`, so
/// stereo pairs at the extremes of the i16 range neither overflow nor round.
/// Mono input passes through unchanged (apart from widening to `f64`).
pub fn mixdown(samples: &[i16], channels: ChannelLayout) -> Vec<f64> {
    match channels {
        ChannelLayout::Mono => samples.iter().map(|&s| f64::from(s)).collect(),
        ChannelLayout::Stereo => samples
            .chunks_exact(2)
            .map(|frame| (f64::from(frame[0]) + f64::from(frame[1])) / 2.0)
            .collect(),
    }
}
