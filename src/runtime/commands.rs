use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;

use mp3clip::config::Settings;
use mp3clip::error::PreviewError;
use mp3clip::export::Exported;
use mp3clip::session::Session;
use mp3clip::tags::TagState;
use mp3clip::{Error, pipeline, preview};

use super::cli::Command;

#[derive(Debug, Error)]
pub enum CommandError {
    #[error(transparent)]
    Pipeline(#[from] Error),

    #[error("{}: {source}", path.display())]
    Io { path: PathBuf, source: io::Error },

    #[error("failed to write output: {0}")]
    Output(#[from] io::Error),

    #[error("preview failed: {0}")]
    Preview(#[from] PreviewError),

    #[error("invalid settings: {0}")]
    Settings(String),

    #[error("cannot render settings: {0}")]
    Render(#[from] toml::ser::Error),
}

impl CommandError {
    pub fn exit_code(&self) -> u8 {
        match self {
            CommandError::Pipeline(e) => e.exit_code(),
            _ => 1,
        }
    }
}

type CommandResult = Result<(), CommandError>;

/// Run one subcommand. Machine-readable output goes to `out`.
pub fn dispatch(command: Command, mut settings: Settings, out: &mut impl Write) -> CommandResult {
    match command {
        Command::Info { input } => info(&input, settings, out),
        Command::Trim {
            input,
            output,
            silence,
        } => {
            silence.apply(&mut settings.silence);
            trim(&input, &output, &settings)
        }
        Command::Clip {
            input,
            output,
            start,
            end,
            auto_end,
            silence,
        } => {
            silence.apply(&mut settings.silence);
            clip(&input, &output, start, end.filter(|_| !auto_end), settings)
        }
        Command::Waveform { input, max_points } => {
            if let Some(n) = max_points {
                settings.waveform.max_points = n;
            }
            waveform(&input, settings, out)
        }
        Command::Preview { input, start, end } => play_preview(&input, start, end, settings),
        Command::Config => {
            out.write_all(settings.to_toml()?.as_bytes())?;
            Ok(())
        }
    }
}

fn read_input(path: &Path) -> Result<Vec<u8>, CommandError> {
    fs::read(path).map_err(|source| CommandError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn open_session(path: &Path, settings: Settings) -> Result<Session, CommandError> {
    settings.validate().map_err(CommandError::Settings)?;
    let bytes = read_input(path)?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    Ok(Session::open(name, &bytes, settings)?)
}

fn write_export(path: &Path, exported: &Exported) -> CommandResult {
    fs::write(path, &exported.bytes).map_err(|source| CommandError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn info(input: &Path, settings: Settings, out: &mut impl Write) -> CommandResult {
    let session = open_session(input, settings)?;
    let track = session.track();

    writeln!(out, "file:      {}", input.display())?;
    writeln!(
        out,
        "duration:  {:.3} s ({} ms)",
        track.duration_secs(),
        track.duration_ms()
    )?;
    writeln!(
        out,
        "stream:    {} Hz, {} channel(s), {} kbps",
        track.sample_rate_hz(),
        track.channel_count(),
        track.bitrate_bps() / 1000
    )?;
    match track.tags() {
        TagState::Absent => writeln!(out, "tags:      none")?,
        TagState::Present(tag) => {
            let ids: Vec<&str> = tag.frames().iter().map(|f| f.id()).collect();
            writeln!(
                out,
                "tags:      ID3v2.{} with {} frame(s): {}",
                tag.version().major,
                tag.len(),
                ids.join(", ")
            )?;
        }
        TagState::Unreadable(reason) => writeln!(out, "tags:      unreadable ({reason})")?,
    }
    if track.id3v1().is_some() {
        writeln!(out, "           ID3v1 trailer")?;
    }

    let summary = track.summary();
    for (label, value) in [
        ("title:", &summary.title),
        ("artist:", &summary.artist),
        ("album:", &summary.album),
    ] {
        if let Some(value) = value {
            writeln!(out, "{label:<11}{value}")?;
        }
    }

    match session.silence_boundary_ms() {
        Ok(0) => writeln!(out, "audio end: silent throughout")?,
        Ok(ms) => writeln!(out, "audio end: {ms} ms (incl. padding)")?,
        Err(e) => writeln!(out, "audio end: n/a ({e})")?,
    }
    Ok(())
}

fn trim(input: &Path, output: &Path, settings: &Settings) -> CommandResult {
    settings.validate().map_err(CommandError::Settings)?;
    let bytes = read_input(input)?;
    let exported = pipeline::trim_trailing_silence(&bytes, settings)?;
    write_export(output, &exported)
}

fn clip(
    input: &Path,
    output: &Path,
    start: f64,
    end: Option<f64>,
    settings: Settings,
) -> CommandResult {
    let exported = match end {
        Some(end) => {
            settings.validate().map_err(CommandError::Settings)?;
            pipeline::clip_bytes(&read_input(input)?, start, end, &settings)?
        }
        None => {
            let mut session = open_session(input, settings)?;
            let duration = session.track().duration_secs();
            session.select(start, duration).map_err(Error::from)?;
            session.auto_trim()?;
            session.export().map_err(Error::from)?
        }
    };
    write_export(output, &exported)
}

fn waveform(input: &Path, settings: Settings, out: &mut impl Write) -> CommandResult {
    let session = open_session(input, settings)?;
    writeln!(out, "time_sec,amplitude")?;
    for point in session.waveform() {
        writeln!(out, "{:.6},{:.3}", point.time_sec, point.amplitude)?;
    }
    Ok(())
}

fn play_preview(
    input: &Path,
    start: Option<f64>,
    end: Option<f64>,
    settings: Settings,
) -> CommandResult {
    let mut session = open_session(input, settings)?;
    if start.is_some() || end.is_some() {
        let duration = session.track().duration_secs();
        session
            .select(start.unwrap_or(0.0), end.unwrap_or(duration))
            .map_err(Error::from)?;
    }
    preview::play(session.track(), &session.range())?;
    Ok(())
}
