use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use mp3clip::config::SilenceSettings;

/// Trim MP3 recordings without losing their bitrate or tags.
#[derive(Debug, Parser)]
#[command(name = "mp3clip", version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show stream parameters, tags and where the trailing silence starts
    Info { input: PathBuf },

    /// Cut the trailing silence off a recording
    Trim {
        input: PathBuf,
        output: PathBuf,
        #[command(flatten)]
        silence: SilenceArgs,
    },

    /// Export a time range (seconds, clamped to the track)
    Clip {
        input: PathBuf,
        output: PathBuf,
        #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
        start: f64,
        #[arg(
            long,
            allow_negative_numbers = true,
            required_unless_present = "auto_end",
            conflicts_with = "auto_end"
        )]
        end: Option<f64>,
        /// End the clip where the trailing silence starts
        #[arg(long)]
        auto_end: bool,
        #[command(flatten)]
        silence: SilenceArgs,
    },

    /// Print the downsampled waveform as `time_sec,amplitude` CSV
    Waveform {
        input: PathBuf,
        #[arg(long)]
        max_points: Option<usize>,
    },

    /// Play a range on the default output device
    Preview {
        input: PathBuf,
        #[arg(long, allow_negative_numbers = true)]
        start: Option<f64>,
        #[arg(long, allow_negative_numbers = true)]
        end: Option<f64>,
    },

    /// Print the effective settings as TOML
    Config,
}

/// Per-run overrides of the `[silence]` settings.
#[derive(Debug, Clone, Default, Args)]
pub struct SilenceArgs {
    /// Chunks at or below this level (dBFS) are silent
    #[arg(long, allow_negative_numbers = true)]
    pub threshold_db: Option<f64>,
    #[arg(long)]
    pub chunk_ms: Option<u64>,
    #[arg(long)]
    pub padding_ms: Option<u64>,
}

impl SilenceArgs {
    pub fn apply(&self, settings: &mut SilenceSettings) {
        if let Some(v) = self.threshold_db {
            settings.threshold_dbfs = v;
        }
        if let Some(v) = self.chunk_ms {
            settings.chunk_ms = v;
        }
        if let Some(v) = self.padding_ms {
            settings.padding_ms = v;
        }
    }
}
