mod app;
mod cli;
mod clock;
mod config;
mod consts;
mod game;
mod geometry;
mod input;
mod logging;
mod surface;
mod timer;
mod util;
use crate::app::{App, Summary};
use crate::cli::{Arguments, Command};
use crate::clock::MonotonicClock;
use crate::config::{Config, ConfigError};
use crate::game::Game;
use crate::geometry::Bounds;
use crate::input::TerminalInput;
use crate::surface::TerminalSurface;
use anyhow::Context;
use rand::{rngs::StdRng, SeedableRng};
use ratatui::DefaultTerminal;
use std::io::{self, ErrorKind, Write};
use std::process::ExitCode;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) if is_broken_pipe(&e) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("slither: {e:?}");
            ExitCode::from(2)
        }
    }
}

fn run() -> anyhow::Result<()> {
    let args = match Command::from_parser(lexopt::Parser::from_env())? {
        Command::Run(args) => args,
        Command::Help => {
            io::stdout().write_all(cli::USAGE.as_bytes())?;
            return Ok(());
        }
        Command::Version => {
            writeln!(io::stdout(), "slither {}", env!("CARGO_PKG_VERSION"))?;
            return Ok(());
        }
    };
    let mut config = load_config(&args)?;
    if let Some(path) = args.log_file {
        config.log.file = Some(path);
    }
    logging::init(&config.log).context("failed to set up logging")?;

    let seed = args.seed.unwrap_or_else(rand::random);
    let plane = Bounds::new(config.game.plane_width, config.game.plane_height);
    tracing::info!(
        seed,
        width = plane.width,
        height = plane.height,
        "Starting session"
    );
    let game = Game::new(&config, StdRng::seed_from_u64(seed));
    let app = App::new(game, &config.timing, MonotonicClock);

    let terminal = ratatui::try_init().context("failed to initialize terminal")?;
    let r = play(app, terminal, plane);
    ratatui::restore();
    let summary = r.context("error while running game")?;

    tracing::info!(
        score = summary.score,
        elapsed = summary.elapsed.as_secs_f64(),
        "Session ended"
    );
    let mut out = io::stdout().lock();
    write!(
        out,
        "Score: {:.1}  Time: {:.1}s",
        summary.score,
        summary.elapsed.as_secs_f64()
    )?;
    if let Some(reason) = summary.stop_reason {
        write!(out, "  (the snake {reason})")?;
    }
    writeln!(out)?;
    Ok(())
}

/// Load the configuration file named on the command line, or else the default
/// configuration file if there is one
fn load_config(args: &Arguments) -> anyhow::Result<Config> {
    let config = match args.config {
        Some(ref path) => Config::load(path, false),
        None => match Config::default_path() {
            Ok(path) => Config::load(&path, true),
            Err(ConfigError::NoPath) => Ok(Config::default()),
            Err(e) => Err(e),
        },
    };
    config.context("failed to load configuration")
}

/// Set up terminal input & output and run the game.  Release reporting is
/// switched back off even if the game fails.
fn play(app: App, terminal: DefaultTerminal, plane: Bounds) -> io::Result<Summary> {
    let release_reporting = input::enable_release_reporting()?;
    let r = TerminalSurface::new(terminal, plane).and_then(|mut surface| {
        let mut input = TerminalInput::new(release_reporting);
        app.run(&mut input, &mut surface)
    });
    if release_reporting {
        input::disable_release_reporting()?;
    }
    r
}

fn is_broken_pipe(e: &anyhow::Error) -> bool {
    e.downcast_ref::<io::Error>()
        .is_some_and(|e| e.kind() == ErrorKind::BrokenPipe)
}
