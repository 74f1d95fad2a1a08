use crate::analysis::SilenceScanner;
use crate::audio::AudioTrack;
use crate::error::{Error, InvalidRangeError};

use super::range::ClipRange;

/// Turns proposed `(start, end)` seconds into a [`ClipRange`] for one track.
///
/// Policy: both bounds are clamped into `[0, duration]`; if the result is
/// empty or inverted the proposal is rejected. Bounds are never swapped.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ClipSelector {
    duration_ms: u64,
}

impl ClipSelector {
    pub fn new(duration_ms: u64) -> Self {
        Self { duration_ms }
    }

    pub fn from_secs(duration_sec: f64) -> Self {
        Self::new(secs_to_ms(duration_sec.max(0.0)))
    }

    pub fn for_track(track: &AudioTrack) -> Self {
        Self::new(track.duration_ms())
    }

    pub fn duration_ms(&self) -> u64 {
        self.duration_ms
    }

    pub fn duration_secs(&self) -> f64 {
        self.duration_ms as f64 / 1000.0
    }

    /// Clamp and validate a proposed range given in seconds.
    pub fn select(&self, start_sec: f64, end_sec: f64) -> Result<ClipRange, InvalidRangeError> {
        if !start_sec.is_finite() || !end_sec.is_finite() {
            return Err(InvalidRangeError::NotFinite {
                start: start_sec,
                end: end_sec,
            });
        }

        let start_ms = self.clamp_ms(start_sec);
        let end_ms = self.clamp_ms(end_sec);
        if start_ms >= end_ms {
            return Err(InvalidRangeError::EmptyAfterClamp { start_ms, end_ms });
        }

        ClipRange::new(start_ms, end_ms, self.duration_ms)
    }

    /// Keep `start_sec` (clamped) and end the clip at a scanner boundary.
    ///
    /// A boundary of 0 means the scanner found nothing above threshold.
    pub fn with_end_boundary(
        &self,
        start_sec: f64,
        boundary_ms: u64,
    ) -> Result<ClipRange, InvalidRangeError> {
        if boundary_ms == 0 {
            return Err(InvalidRangeError::SilentTrack);
        }
        if !start_sec.is_finite() {
            return Err(InvalidRangeError::NotFinite {
                start: start_sec,
                end: boundary_ms as f64 / 1000.0,
            });
        }

        let start_ms = self.clamp_ms(start_sec);
        let end_ms = boundary_ms.min(self.duration_ms);
        if start_ms >= end_ms {
            return Err(InvalidRangeError::EmptyAfterClamp { start_ms, end_ms });
        }

        ClipRange::new(start_ms, end_ms, self.duration_ms)
    }

    /// Auto-detect the end of the clip from trailing silence; the start is kept.
    pub fn auto_detect(
        &self,
        start_sec: f64,
        scanner: &SilenceScanner,
        mixed: &[f64],
        sample_rate_hz: u32,
    ) -> Result<ClipRange, Error> {
        let boundary_ms = scanner.scan(mixed, sample_rate_hz)?;
        Ok(self.with_end_boundary(start_sec, boundary_ms)?)
    }

    fn clamp_ms(&self, secs: f64) -> u64 {
        secs_to_ms(secs.clamp(0.0, self.duration_secs())).min(self.duration_ms)
    }
}

fn secs_to_ms(secs: f64) -> u64 {
    (secs * 1000.0).round() as u64
}
