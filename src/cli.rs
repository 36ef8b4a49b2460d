//! Command-line parsing
use lexopt::{Arg, Parser, ValueExt};
use std::path::PathBuf;

/// What the program was asked to do
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) enum Command {
    Run(Arguments),
    Help,
    Version,
}

/// Options for a game session
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub(crate) struct Arguments {
    /// Configuration file to use instead of the default one.  Unlike the
    /// default file, this one must exist.
    pub(crate) config: Option<PathBuf>,

    /// Seed for the random number generator, for reproducible food placement
    pub(crate) seed: Option<u64>,

    /// File to write diagnostic logs to, overriding the configuration file
    pub(crate) log_file: Option<PathBuf>,
}

impl Command {
    pub(crate) fn from_parser(mut parser: Parser) -> Result<Command, lexopt::Error> {
        let mut args = Arguments::default();
        while let Some(arg) = parser.next()? {
            match arg {
                Arg::Short('h') | Arg::Long("help") => return Ok(Command::Help),
                Arg::Short('V') | Arg::Long("version") => return Ok(Command::Version),
                Arg::Long("config") => args.config = Some(PathBuf::from(parser.value()?)),
                Arg::Long("seed") => args.seed = Some(parser.value()?.parse()?),
                Arg::Long("log-file") => args.log_file = Some(PathBuf::from(parser.value()?)),
                _ => return Err(arg.unexpected()),
            }
        }
        Ok(Command::Run(args))
    }
}

pub(crate) const USAGE: &str = "\
Usage: slither [<options>]

Steer a growing snake around the terminal.  Eat food to grow; don't run into
yourself or off the edge.

Controls:
  a / d         Steer left / right (hold)
  Space         Cycle the snake's colors
  Esc, Ctrl-C   Quit

Options:
  --config <path>     Read configuration from the given file
  --seed <int>        Seed the random number generator
  --log-file <path>   Write diagnostic logs to the given file
  -h, --help          Display this help message and exit
  -V, --version       Show the program version and exit
";
