use crate::error::InvalidRangeError;

/// A validated `[start_ms, end_ms)` span within a track.
///
/// Invariant: `start_ms < end_ms <= duration_ms` of the track it was built for.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct ClipRange {
    start_ms: u64,
    end_ms: u64,
}

impl ClipRange {
    /// Validate a span against `duration_ms`. Nothing is clamped here.
    pub fn new(start_ms: u64, end_ms: u64, duration_ms: u64) -> Result<Self, InvalidRangeError> {
        if start_ms >= end_ms {
            return Err(InvalidRangeError::Inverted { start_ms, end_ms });
        }
        if end_ms > duration_ms {
            return Err(InvalidRangeError::OutOfBounds {
                end_ms,
                duration_ms,
            });
        }
        Ok(Self { start_ms, end_ms })
    }

    /// The whole track, `[0, duration_ms)`.
    pub fn full(duration_ms: u64) -> Result<Self, InvalidRangeError> {
        Self::new(0, duration_ms, duration_ms)
    }

    pub fn start_ms(&self) -> u64 {
        self.start_ms
    }

    pub fn end_ms(&self) -> u64 {
        self.end_ms
    }

    pub fn len_ms(&self) -> u64 {
        self.end_ms - self.start_ms
    }

    pub fn start_secs(&self) -> f64 {
        self.start_ms as f64 / 1000.0
    }

    pub fn end_secs(&self) -> f64 {
        self.end_ms as f64 / 1000.0
    }
}
