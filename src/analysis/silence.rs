use crate::audio::FULL_SCALE;
use crate::config::SilenceSettings;
use crate::error::InvalidInputError;

/// RMS level of `chunk` in dBFS. An all-zero (or empty) chunk is `-inf`.
pub fn chunk_dbfs(chunk: &[f64]) -> f64 {
    if chunk.is_empty() {
        return f64::NEG_INFINITY;
    }
    let mean_square = chunk.iter().map(|s| s * s).sum::<f64>() / chunk.len() as f64;
    let rms = mean_square.sqrt();
    if rms == 0.0 {
        return f64::NEG_INFINITY;
    }
    20.0 * (rms / FULL_SCALE).log10()
}

/// Backward chunked scan for the end of the audible part of a track.
#[derive(Debug, Clone, PartialEq)]
pub struct SilenceScanner {
    threshold_dbfs: f64,
    chunk_ms: u64,
    padding_ms: u64,
}

impl SilenceScanner {
    pub fn new(settings: &SilenceSettings) -> Self {
        Self {
            threshold_dbfs: settings.threshold_dbfs,
            chunk_ms: settings.chunk_ms,
            padding_ms: settings.padding_ms,
        }
    }

    pub fn threshold_dbfs(&self) -> f64 {
        self.threshold_dbfs
    }

    pub fn chunk_ms(&self) -> u64 {
        self.chunk_ms
    }

    pub fn padding_ms(&self) -> u64 {
        self.padding_ms
    }

    /// Chunk length in samples at `sample_rate_hz`; never less than one.
    pub fn chunk_len(&self, sample_rate_hz: u32) -> usize {
        let len = u64::from(sample_rate_hz) * self.chunk_ms / 1000;
        usize::try_from(len).unwrap_or(usize::MAX).max(1)
    }

    /// Milliseconds to keep from the start of the track: the end of the last
    /// chunk above threshold plus padding, capped at the track duration.
    ///
    /// Chunks tile the track from the end backwards, so only the first one
    /// (at the very start) may be shorter than `chunk_ms`. Returns 0 when no
    /// chunk is above threshold.
    pub fn scan(&self, mixed: &[f64], sample_rate_hz: u32) -> Result<u64, InvalidInputError> {
        if sample_rate_hz == 0 {
            return Err(InvalidInputError::ZeroSampleRate);
        }
        if self.chunk_ms == 0 {
            return Err(InvalidInputError::ZeroChunk);
        }
        if mixed.is_empty() {
            return Err(InvalidInputError::ZeroLengthTrack);
        }

        let rate = u64::from(sample_rate_hz);
        let duration_ms = mixed.len() as u64 * 1000 / rate;
        let chunk_len = self.chunk_len(sample_rate_hz);

        let mut end = mixed.len();
        let mut chunks = 0usize;
        while end > 0 {
            let start = end.saturating_sub(chunk_len);
            chunks += 1;
            let level = chunk_dbfs(&mixed[start..end]);
            if level > self.threshold_dbfs {
                let chunk_end_ms = end as u64 * 1000 / rate;
                let boundary = (chunk_end_ms + self.padding_ms).min(duration_ms);
                tracing::debug!(
                    chunk_end_ms,
                    level_dbfs = level,
                    chunks_scanned = chunks,
                    boundary_ms = boundary,
                    "found last loud chunk"
                );
                return Ok(boundary);
            }
            end = start;
        }

        tracing::debug!(chunks_scanned = chunks, "track is silent throughout");
        Ok(0)
    }
}

impl Default for SilenceScanner {
    fn default() -> Self {
        Self::new(&SilenceSettings::default())
    }
}
