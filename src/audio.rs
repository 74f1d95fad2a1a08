//! Audio module: decoded track model, MP3 decoding and analysis mixdown.
//!
//! `decode` turns an MP3 byte stream into an immutable [`AudioTrack`];
//! `mixdown` derives the single analysis channel that the silence scanner and
//! waveform reducer read. The track's own samples are never replaced by the
//! mixdown and are what the exporter re-encodes.

mod decode;
mod mixdown;
mod stream;
mod track;

pub use decode::{decode, decode_reader};
pub use mixdown::mixdown;
pub use stream::{MpegVersion, StreamInfo, probe_stream, standard_bitrates, version_for_sample_rate};
pub use track::{AudioTrack, ChannelLayout, TrackSummary};

/// Largest magnitude of a signed 16-bit sample; 0 dBFS.
pub const FULL_SCALE: f64 = 32768.0;
