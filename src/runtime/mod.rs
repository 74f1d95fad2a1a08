use std::io::Write;
use std::process::ExitCode;

mod cli;
mod commands;
mod settings;

pub use cli::Cli;

pub fn run(cli: Cli) -> ExitCode {
    let settings = settings::load_settings();
    let mut stdout = std::io::stdout().lock();

    let result = commands::dispatch(cli.command, settings, &mut stdout);
    let _ = stdout.flush();

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("mp3clip: {err}");
            ExitCode::from(err.exit_code())
        }
    }
}
