//! mp3clip: decode an MP3, find where the audio ends, plot it, and export a
//! trimmed copy at the source bitrate with the source ID3v2 frames.
//!
//! Pipeline: [`audio::decode`] → [`audio::mixdown`] → [`analysis`] →
//! [`selection::ClipSelector`] → [`export::export`]. [`session::Session`]
//! ties the stages together for interactive callers; [`pipeline`] has the
//! one-shot byte-to-byte helpers.

pub mod analysis;
pub mod audio;
pub mod config;
pub mod error;
pub mod export;
pub mod pipeline;
pub mod preview;
pub mod selection;
pub mod session;
pub mod tags;

pub use error::{Error, Result};

#[cfg(test)]
mod test_support;
