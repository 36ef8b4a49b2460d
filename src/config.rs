use crate::consts;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Program configuration read from a configuration file
#[derive(Clone, Deserialize, Debug, Default, PartialEq)]
#[serde(default)]
pub(crate) struct Config {
    /// The play field & the snake
    pub(crate) game: GameConfig,

    /// Food spawning
    pub(crate) food: FoodConfig,

    /// Logic & render rates
    pub(crate) timing: TimingConfig,

    /// Diagnostic logging
    pub(crate) log: LogConfig,
}

impl Config {
    /// Return the default configuration file path
    pub(crate) fn default_path() -> Result<PathBuf, ConfigError> {
        dirs::config_local_dir()
            .map(|p| p.join("slither").join("config.toml"))
            .ok_or(ConfigError::NoPath)
    }

    /// Read configuration from a file on disk.  If the file does not exist and
    /// `allow_missing` is true, a default `Config` value is returned.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the file could not be read, if the file's contents
    /// could not be deserialized, or if a setting is out of range.
    pub(crate) fn load(path: &Path, allow_missing: bool) -> Result<Config, ConfigError> {
        let content = match fs_err::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound && allow_missing => {
                return Ok(Config::default())
            }
            Err(e) => return Err(ConfigError::Read(e)),
        };
        let config = toml::from_str::<Config>(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        let GameConfig {
            plane_width,
            plane_height,
            start_x,
            start_y,
            speed,
            turn_rate,
            initial_length,
            self_collision_skip,
            left_key,
            right_key,
        } = self.game;
        positive("game.plane-width", plane_width)?;
        positive("game.plane-height", plane_height)?;
        positive("game.speed", speed)?;
        positive("game.initial-length", initial_length)?;
        if !turn_rate.is_finite() {
            return Err(ConfigError::invalid("game.turn-rate", "must be a finite number"));
        }
        if !(start_x > 0.0 && start_x < plane_width && start_y > 0.0 && start_y < plane_height) {
            return Err(ConfigError::invalid(
                "game.start-x/start-y",
                "must lie strictly inside the plane",
            ));
        }
        if self_collision_skip < 2 {
            return Err(ConfigError::invalid(
                "game.self-collision-skip",
                "must be at least 2 so that adjacent segments are never tested",
            ));
        }
        if left_key == right_key {
            return Err(ConfigError::invalid(
                "game.left-key/right-key",
                "must be different keys",
            ));
        }
        positive("food.radius", self.food.radius)?;
        positive("food.spawn-interval", self.food.spawn_interval)?;
        if Duration::try_from_secs_f64(self.food.spawn_interval).is_err() {
            return Err(ConfigError::invalid("food.spawn-interval", "is too large"));
        }
        rate("timing.logic-hz", self.timing.logic_hz)?;
        rate("timing.render-hz", self.timing.render_hz)?;
        Ok(())
    }
}

/// Check that `hz` is positive and that its period is a nonzero `Duration`
fn rate(field: &'static str, hz: f64) -> Result<(), ConfigError> {
    positive(field, hz)?;
    if period(hz).is_none() {
        return Err(ConfigError::invalid(
            field,
            "must give a step between one nanosecond and the longest representable duration",
        ));
    }
    Ok(())
}

fn positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::invalid(field, "must be a positive number"))
    }
}

#[derive(Clone, Copy, Deserialize, Debug, PartialEq)]
#[serde(default, rename_all = "kebab-case")]
pub(crate) struct GameConfig {
    pub(crate) plane_width: f64,
    pub(crate) plane_height: f64,
    pub(crate) start_x: f64,
    pub(crate) start_y: f64,
    pub(crate) speed: f64,
    /// Degrees per logic step
    pub(crate) turn_rate: f64,
    pub(crate) initial_length: f64,
    pub(crate) self_collision_skip: usize,
    pub(crate) left_key: char,
    pub(crate) right_key: char,
}

impl Default for GameConfig {
    fn default() -> GameConfig {
        GameConfig {
            plane_width: consts::PLANE_WIDTH,
            plane_height: consts::PLANE_HEIGHT,
            start_x: consts::SNAKE_START.0,
            start_y: consts::SNAKE_START.1,
            speed: consts::SNAKE_SPEED,
            turn_rate: consts::SNAKE_TURN_RATE,
            initial_length: consts::INITIAL_SNAKE_LENGTH,
            self_collision_skip: consts::SELF_COLLISION_SKIP,
            left_key: consts::LEFT_KEY,
            right_key: consts::RIGHT_KEY,
        }
    }
}

#[derive(Clone, Copy, Deserialize, Debug, PartialEq)]
#[serde(default, rename_all = "kebab-case")]
pub(crate) struct FoodConfig {
    pub(crate) radius: f64,
    /// Seconds
    pub(crate) spawn_interval: f64,
    pub(crate) max_count: usize,
    pub(crate) spawn_attempts: u32,
}

impl FoodConfig {
    pub(crate) fn spawn_interval(&self) -> Duration {
        Duration::try_from_secs_f64(self.spawn_interval).unwrap_or(Duration::MAX)
    }
}

impl Default for FoodConfig {
    fn default() -> FoodConfig {
        FoodConfig {
            radius: consts::FOOD_RADIUS,
            spawn_interval: consts::FOOD_SPAWN_INTERVAL,
            max_count: consts::MAX_FOOD,
            spawn_attempts: consts::FOOD_SPAWN_ATTEMPTS,
        }
    }
}

#[derive(Clone, Copy, Deserialize, Debug, PartialEq)]
#[serde(default, rename_all = "kebab-case")]
pub(crate) struct TimingConfig {
    pub(crate) logic_hz: f64,
    pub(crate) render_hz: f64,
}

impl TimingConfig {
    /// Duration of one logic step.  Never zero; rates without a usable
    /// period are rejected by [`Config::validate()`] and fall back to the
    /// default rate here.
    pub(crate) fn logic_step(&self) -> Duration {
        period(self.logic_hz).unwrap_or(DEFAULT_STEP)
    }

    /// Duration of one render step.  Never zero.
    pub(crate) fn render_step(&self) -> Duration {
        period(self.render_hz).unwrap_or(DEFAULT_STEP)
    }
}

impl Default for TimingConfig {
    fn default() -> TimingConfig {
        TimingConfig {
            logic_hz: consts::LOGIC_HZ,
            render_hz: consts::RENDER_HZ,
        }
    }
}

/// Step length at the default rate of 60 Hz, rounded to whole nanoseconds
const DEFAULT_STEP: Duration = Duration::from_nanos(16_666_667);

/// The period of a rate, or `None` if it rounds to zero or is too long for a
/// `Duration`
fn period(hz: f64) -> Option<Duration> {
    Duration::try_from_secs_f64(hz.recip())
        .ok()
        .filter(|d| !d.is_zero())
}

#[derive(Clone, Deserialize, Debug, Eq, PartialEq)]
#[serde(default, rename_all = "kebab-case")]
pub(crate) struct LogConfig {
    /// File to write logs to; logging is off when unset
    pub(crate) file: Option<PathBuf>,

    /// Default filter directive, overridden by the `SLITHER_LOG` environment
    /// variable
    pub(crate) level: String,
}

impl Default for LogConfig {
    fn default() -> LogConfig {
        LogConfig {
            file: None,
            level: String::from("info"),
        }
    }
}

#[derive(Debug, Error)]
pub(crate) enum ConfigError {
    #[error("failed to determine path to local configuration directory")]
    NoPath,
    #[error("failed to read configuration file")]
    Read(#[from] std::io::Error),
    #[error("failed to parse configuration file")]
    Parse(#[from] toml::de::Error),
    #[error("invalid value for {field}: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

impl ConfigError {
    fn invalid(field: &'static str, reason: &'static str) -> ConfigError {
        ConfigError::Invalid { field, reason }
    }
}
