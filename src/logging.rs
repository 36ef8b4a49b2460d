//! Diagnostic logging to a file
use crate::config::LogConfig;
use crate::consts;
use std::path::Path;
use std::sync::Mutex;
use thiserror::Error;
use tracing_subscriber::filter::{EnvFilter, ParseError};

/// Install a global subscriber writing to the configured log file.  Returns
/// `false` without doing anything if no log file is configured.
///
/// Logs never go to the terminal, as they would corrupt the game display.
pub(crate) fn init(config: &LogConfig) -> Result<bool, LogError> {
    let Some(path) = &config.file else {
        return Ok(false);
    };
    let env = std::env::var(consts::LOG_ENV_VAR).ok();
    let filter = build_filter(env.as_deref(), &config.level)?;
    let file = open_log(path)?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(LogError::Install)?;
    Ok(true)
}

/// Build the log filter from the environment variable's value if set &
/// non-empty, or else from the configured level
fn build_filter(env: Option<&str>, level: &str) -> Result<EnvFilter, ParseError> {
    match env {
        Some(directives) if !directives.trim().is_empty() => EnvFilter::try_new(directives),
        _ => EnvFilter::try_new(level),
    }
}

fn open_log(path: &Path) -> std::io::Result<fs_err::File> {
    fs_err::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
}

#[derive(Debug, Error)]
pub(crate) enum LogError {
    #[error("failed to open log file")]
    Open(#[from] std::io::Error),
    #[error("invalid log filter")]
    Filter(#[from] ParseError),
    #[error("failed to install log subscriber")]
    Install(#[source] Box<dyn std::error::Error + Send + Sync>),
}
