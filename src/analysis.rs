//! Analysis over the mixed-down channel: trailing-silence detection and
//! waveform reduction. Both are read-only consumers of the same buffer.

mod silence;
mod waveform;

pub use silence::{SilenceScanner, chunk_dbfs};
pub use waveform::{WaveformSample, downsample, waveform};

#[cfg(test)]
mod tests;
