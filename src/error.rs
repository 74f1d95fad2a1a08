//! Error taxonomy for the clip pipeline.
//!
//! Each stage has its own error type so callers can tell *where* a run failed
//! and *why*. [`Error`] wraps the fatal ones. [`TagCopyError`] is not among
//! them: it travels with the exported audio as a warning.

use thiserror::Error;

/// The input could not be turned into an [`AudioTrack`](crate::audio::AudioTrack).
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("input stream is empty")]
    EmptyInput,

    #[error("no readable MPEG audio stream: {0}")]
    Stream(#[from] lofty::error::LoftyError),

    #[error("unsupported stream: {0}")]
    Unsupported(String),

    #[error("malformed stream: {0}")]
    Malformed(String),

    #[error("unsupported channel count {0} (only mono and stereo are handled)")]
    UnsupportedChannels(usize),

    #[error("stream header reports {header} Hz but decoder produced {decoded} Hz")]
    SampleRateMismatch { header: u32, decoded: u32 },

    #[error("stream decoded to zero samples")]
    NoSamples,

    #[error("failed to read input: {0}")]
    Io(#[from] std::io::Error),
}

/// Degenerate input handed to the silence scanner.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidInputError {
    #[error("zero-length track")]
    ZeroLengthTrack,

    #[error("sample rate is zero")]
    ZeroSampleRate,

    #[error("chunk duration must be at least 1 ms")]
    ZeroChunk,
}

/// A requested selection that cannot form a valid clip.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InvalidRangeError {
    #[error("range bound is not a finite number (start {start}, end {end})")]
    NotFinite { start: f64, end: f64 },

    #[error("range is empty or inverted after clamping ({start_ms} ms .. {end_ms} ms)")]
    EmptyAfterClamp { start_ms: u64, end_ms: u64 },

    #[error("range {start_ms} ms .. {end_ms} ms is empty or inverted")]
    Inverted { start_ms: u64, end_ms: u64 },

    #[error("range end {end_ms} ms exceeds track duration {duration_ms} ms")]
    OutOfBounds { end_ms: u64, duration_ms: u64 },

    #[error("track is silent throughout; nothing to keep")]
    SilentTrack,
}

/// Re-encoding failed; no output was produced.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("selected range {start_ms} ms .. {end_ms} ms contains no samples")]
    EmptyRange { start_ms: u64, end_ms: u64 },

    #[error("range end {end_ms} ms exceeds track duration {duration_ms} ms")]
    RangeOutOfBounds { end_ms: u64, duration_ms: u64 },

    #[error("encoder cannot produce {bitrate_bps} bps at {sample_rate} Hz")]
    UnsupportedBitrate { bitrate_bps: u32, sample_rate: u32 },

    #[error("encoder does not accept sample rate {0} Hz")]
    UnsupportedSampleRate(u32),

    #[error(
        "encoder produced {actual_bps} bps at {actual_rate} Hz instead of {bitrate_bps} bps at {sample_rate} Hz"
    )]
    OutputMismatch {
        bitrate_bps: u32,
        sample_rate: u32,
        actual_bps: u32,
        actual_rate: u32,
    },

    #[error("encoder rejected configuration: {0}")]
    Config(String),

    #[error("encoding failed: {0}")]
    Encode(String),
}

/// Tag transplant failed after a successful encode. Never fatal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TagCopyError {
    #[error("source has an ID3v2 header but its frames are unreadable: {0}")]
    SourceUnreadable(String),

    #[error("frame {id} payload of {len} bytes does not fit an ID3v2.{major} size field")]
    FrameTooLarge { id: String, len: usize, major: u8 },

    #[error("tag body of {len} bytes exceeds the ID3v2 size limit")]
    TagTooLarge { len: usize },
}

/// Playback of a selection failed. Only the preview command produces this.
#[derive(Debug, Error)]
pub enum PreviewError {
    #[error("selected range {start_ms} ms .. {end_ms} ms contains no samples")]
    EmptyRange { start_ms: u64, end_ms: u64 },

    #[error("cannot open audio output device: {0}")]
    Device(#[from] rodio::StreamError),
}

/// Any fatal pipeline failure, labelled with the stage that produced it.
#[derive(Debug, Error)]
pub enum Error {
    #[error("decode failed: {0}")]
    Decode(#[from] DecodeError),

    #[error("silence scan rejected input: {0}")]
    InvalidInput(#[from] InvalidInputError),

    #[error("selection rejected: {0}")]
    InvalidRange(#[from] InvalidRangeError),

    #[error("export failed: {0}")]
    Export(#[from] ExportError),
}

impl Error {
    /// Short name of the stage that failed.
    pub fn stage(&self) -> &'static str {
        match self {
            Error::Decode(_) => "decode",
            Error::InvalidInput(_) => "scan",
            Error::InvalidRange(_) => "select",
            Error::Export(_) => "export",
        }
    }

    /// Process exit code a command-line front end should use for this failure.
    pub fn exit_code(&self) -> u8 {
        match self {
            Error::Decode(_) => 2,
            Error::InvalidInput(_) => 3,
            Error::InvalidRange(_) => 4,
            Error::Export(_) => 5,
        }
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
