use std::borrow::Cow;

/// One plotted point.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct WaveformSample {
    pub time_sec: f64,
    pub amplitude: f64,
}

/// Block-average `samples` down to at most `max_points` values.
///
/// Input at or under the budget is borrowed back untouched. Otherwise the
/// block size is `len / max_points` rounded up, every output value is the
/// mean of one block, and the trailing remainder (less than a block) is
/// dropped.
pub fn downsample(samples: &[f64], max_points: usize) -> Cow<'_, [f64]> {
    if max_points == 0 {
        return Cow::Owned(Vec::new());
    }
    if samples.len() <= max_points {
        return Cow::Borrowed(samples);
    }

    let block = samples.len().div_ceil(max_points);
    let points = samples
        .chunks_exact(block)
        .map(|b| b.iter().sum::<f64>() / block as f64)
        .collect();
    Cow::Owned(points)
}

/// Downsample and pair each point with an evenly spaced timestamp over `[0, duration)`.
pub fn waveform(samples: &[f64], duration_secs: f64, max_points: usize) -> Vec<WaveformSample> {
    let points = downsample(samples, max_points);
    let n = points.len();
    points
        .iter()
        .enumerate()
        .map(|(i, &amplitude)| WaveformSample {
            time_sec: i as f64 / n as f64 * duration_secs,
            amplitude,
        })
        .collect()
}
