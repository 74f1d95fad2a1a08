use serde::{Deserialize, Serialize};

/// Top-level settings loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/mp3clip/config.toml` or `~/.config/mp3clip/config.toml`
///
/// Precedence (highest wins):
/// 1) Environment variables (prefix `MP3CLIP__`, `__` as nested separator)
/// 2) Config file (if present)
/// 3) Struct defaults
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    pub silence: SilenceSettings,
    pub waveform: WaveformSettings,
    pub export: ExportSettings,
}

/// Trailing-silence scanner parameters.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct SilenceSettings {
    /// Chunks at or below this level (dBFS) count as silent.
    pub threshold_dbfs: f64,
    /// Duration of one scan chunk (milliseconds).
    pub chunk_ms: u64,
    /// Extra audio kept after the last loud chunk (milliseconds).
    pub padding_ms: u64,
}

impl Default for SilenceSettings {
    fn default() -> Self {
        Self {
            threshold_dbfs: -50.0,
            chunk_ms: 100,
            padding_ms: 250,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct WaveformSettings {
    /// Upper bound on the number of plotted points.
    pub max_points: usize,
}

impl Default for WaveformSettings {
    fn default() -> Self {
        Self { max_points: 10_000 }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ExportSettings {
    /// LAME algorithm quality. Fixed per run so repeated exports are byte-identical.
    pub quality: EncoderQuality,
    /// Whether to transplant the source ID3v2 frames onto the output.
    pub copy_tags: bool,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            quality: EncoderQuality::Good,
            copy_tags: true,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum EncoderQuality {
    #[serde(alias = "high")]
    Best,
    #[serde(alias = "standard", alias = "default")]
    Good,
    #[serde(alias = "quick", alias = "low")]
    Fast,
}
