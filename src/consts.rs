//! Assorted constants & default configuration
use ratatui::style::Color;

/// Default width of the play field, in plane units
pub(crate) const PLANE_WIDTH: f64 = 800.0;

/// Default height of the play field, in plane units
pub(crate) const PLANE_HEIGHT: f64 = 800.0;

/// Where the snake's head starts
pub(crate) const SNAKE_START: (f64, f64) = (100.0, 100.0);

/// Direction the snake starts out moving in (not normalized)
pub(crate) const SNAKE_START_HEADING: (f64, f64) = (1.0, 0.5);

/// Distance the snake's head moves each logic step
pub(crate) const SNAKE_SPEED: f64 = 2.0;

/// Degrees the snake's heading rotates per logic step while a steering key is
/// held
pub(crate) const SNAKE_TURN_RATE: f64 = 3.5;

/// Trail length budget before any food has been eaten
pub(crate) const INITIAL_SNAKE_LENGTH: f64 = 100.0;

/// A new head point is only recorded if it is farther than this from the
/// current head
pub(crate) const MIN_POINT_SPACING: f64 = 1.0;

/// Index of the first trail segment tested against the head segment for
/// self-intersection.  Segments closer to the head than this are skipped, as
/// they are adjacent to the head segment or bent by at most a few turn steps.
///
/// This has to be re-derived if the speed or turn rate changes much: the
/// skipped segments must span more than the arc the head can sweep in that
/// many steps.
pub(crate) const SELF_COLLISION_SKIP: usize = 4;

/// Default key for steering counterclockwise
pub(crate) const LEFT_KEY: char = 'a';

/// Default key for steering clockwise
pub(crate) const RIGHT_KEY: char = 'd';

/// Key that cycles the snake's colors
pub(crate) const THEME_KEY: char = ' ';

/// Radius of a snake trail point when drawn
pub(crate) const SNAKE_POINT_RADIUS: f64 = 5.0;

/// Colors cycled through along the snake's trail
pub(crate) const SNAKE_PALETTE: [Color; 6] = [
    Color::Green,
    Color::Yellow,
    Color::LightRed,
    Color::Red,
    Color::Magenta,
    Color::Blue,
];

/// Radius of a food item
pub(crate) const FOOD_RADIUS: f64 = 6.0;

/// Color of food items
pub(crate) const FOOD_COLOR: Color = Color::White;

/// Seconds between food spawns
pub(crate) const FOOD_SPAWN_INTERVAL: f64 = 5.0;

/// The maximum number of food items that can be present at one time
pub(crate) const MAX_FOOD: usize = 20;

/// How many random positions to try before giving up on a spawn
pub(crate) const FOOD_SPAWN_ATTEMPTS: u32 = 64;

/// Logic steps per second
pub(crate) const LOGIC_HZ: f64 = 60.0;

/// Redraws per second; this also sets the sleep at the end of each loop
/// iteration
pub(crate) const RENDER_HZ: f64 = 60.0;

/// Nominal text size for the score & time displays
pub(crate) const DISPLAY_TEXT_SIZE: u16 = 24;

/// Gap between the time display and the bottom edge of the plane
pub(crate) const TIME_DISPLAY_MARGIN: f64 = 10.0;

/// Color of the score & time displays
pub(crate) const DISPLAY_COLOR: Color = Color::White;

/// Color of the "GAME OVER" banner
pub(crate) const GAME_OVER_COLOR: Color = Color::LightRed;

/// Color of the hint shown under the "GAME OVER" banner
pub(crate) const HINT_COLOR: Color = Color::Gray;

/// Environment variable overriding the configured log filter
pub(crate) const LOG_ENV_VAR: &str = "SLITHER_LOG";
