//! Caller-owned editing session for one source file.
//!
//! A session holds the decoded track, its cached mixdown and the current
//! selection. Whether an incoming upload is the same source is decided by the
//! caller comparing [`SourceKey`]s.

use sha2::{Digest, Sha256};

use crate::analysis::{self, SilenceScanner, WaveformSample};
use crate::audio::{self, AudioTrack};
use crate::config::Settings;
use crate::error::{ExportError, InvalidInputError, InvalidRangeError, Result};
use crate::export::{self, Exported};
use crate::selection::{ClipRange, ClipSelector};

/// Identity of a source upload: name, size and content digest.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SourceKey {
    name: String,
    len: u64,
    sha256: String,
}

impl SourceKey {
    pub fn new(name: impl Into<String>, bytes: &[u8]) -> Self {
        Self {
            name: name.into(),
            len: bytes.len() as u64,
            sha256: format!("{:x}", Sha256::digest(bytes)),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn len(&self) -> u64 {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Lower-case hex SHA-256 of the source bytes.
    pub fn sha256(&self) -> &str {
        &self.sha256
    }
}

#[derive(Debug, Clone)]
pub struct Session {
    key: SourceKey,
    track: AudioTrack,
    mixed: Vec<f64>,
    range: ClipRange,
    settings: Settings,
}

impl Session {
    /// Decode `bytes` and start with the whole track selected.
    pub fn open(name: impl Into<String>, bytes: &[u8], settings: Settings) -> Result<Self> {
        let key = SourceKey::new(name, bytes);
        let track = audio::decode(bytes)?;
        let mixed = audio::mixdown(track.samples(), track.channels());
        let range = ClipRange::full(track.duration_ms())?;

        tracing::debug!(source = key.name(), sha256 = key.sha256(), "opened session");

        Ok(Self {
            key,
            track,
            mixed,
            range,
            settings,
        })
    }

    pub fn key(&self) -> &SourceKey {
        &self.key
    }

    /// Whether `key` names the source this session was opened from.
    pub fn is_source(&self, key: &SourceKey) -> bool {
        &self.key == key
    }

    pub fn track(&self) -> &AudioTrack {
        &self.track
    }

    /// The analysis channel; never used for export.
    pub fn mixed(&self) -> &[f64] {
        &self.mixed
    }

    pub fn range(&self) -> ClipRange {
        self.range
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn selector(&self) -> ClipSelector {
        ClipSelector::for_track(&self.track)
    }

    pub fn scanner(&self) -> SilenceScanner {
        SilenceScanner::new(&self.settings.silence)
    }

    /// Replace the selection. On error the previous selection stays.
    pub fn select(&mut self, start_sec: f64, end_sec: f64) -> Result<ClipRange, InvalidRangeError> {
        let range = self.selector().select(start_sec, end_sec)?;
        self.range = range;
        Ok(range)
    }

    pub fn silence_boundary_ms(&self) -> Result<u64, InvalidInputError> {
        self.scanner().scan(&self.mixed, self.track.sample_rate_hz())
    }

    /// End the selection at the trailing-silence boundary, keeping its start.
    pub fn auto_trim(&mut self) -> Result<ClipRange> {
        let range = self.selector().auto_detect(
            self.range.start_secs(),
            &self.scanner(),
            &self.mixed,
            self.track.sample_rate_hz(),
        )?;
        self.range = range;
        Ok(range)
    }

    pub fn waveform(&self) -> Vec<WaveformSample> {
        analysis::waveform(
            &self.mixed,
            self.track.duration_secs(),
            self.settings.waveform.max_points,
        )
    }

    pub fn export(&self) -> Result<Exported, ExportError> {
        export::export(&self.track, &self.range, &self.settings.export)
    }
}
