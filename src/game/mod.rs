mod display;
mod ecosystem;
mod entity;
mod snake;
use self::display::NumberDisplay;
use self::ecosystem::Ecosystem;
use self::entity::Entity;
use self::snake::Snake;
use crate::clock::{Clock, MonotonicClock};
use crate::config::Config;
use crate::consts;
use crate::geometry::{Bounds, Point};
use crate::input::{InputEvent, KeyState};
use crate::surface::Surface;
use crate::timer::Timer;
use crossterm::event::KeyCode;
use rand::{rngs::StdRng, Rng};
use ratatui::style::Color;
use std::fmt;
use std::io;
use std::time::Duration;

/// A single session of play
#[derive(Clone, Debug)]
pub(crate) struct Game<R = StdRng, C = MonotonicClock> {
    snake: Snake,
    ecosystem: Ecosystem<R, C>,
    /// Time spent running, frozen once the game stops
    session_timer: Timer<C>,
    time_display: NumberDisplay,
    score_display: NumberDisplay,
    state: GameState,
    bounds: Bounds,
    close_requested: bool,
}

impl<R: Rng> Game<R, MonotonicClock> {
    pub(crate) fn new(config: &Config, rng: R) -> Self {
        Game::new_with_clock(config, rng, MonotonicClock)
    }
}

impl<R: Rng, C: Clock + Clone> Game<R, C> {
    pub(crate) fn new_with_clock(config: &Config, rng: R, clock: C) -> Game<R, C> {
        let bounds = Bounds::new(config.game.plane_width, config.game.plane_height);
        let text_size = consts::DISPLAY_TEXT_SIZE;
        let time_display = NumberDisplay::new(
            Point::new(
                bounds.width / 2.0,
                bounds.height - f64::from(text_size) - consts::TIME_DISPLAY_MARGIN,
            ),
            "",
            text_size,
            consts::DISPLAY_COLOR,
        )
        .centered();
        let score_display =
            NumberDisplay::new(Point::ORIGIN, "Score: ", text_size, consts::DISPLAY_COLOR);
        Game {
            snake: Snake::new(&config.game),
            ecosystem: Ecosystem::new(&config.food, bounds, rng, clock.clone()),
            session_timer: Timer::with_clock(clock),
            time_display,
            score_display,
            state: GameState::Running,
            bounds,
            close_requested: false,
        }
    }
}

impl<R: Rng, C: Clock> Game<R, C> {
    /// Run one fixed logic step.  Does nothing once the game has stopped.
    pub(crate) fn step(&mut self, keys: &dyn KeyState) {
        if !self.running() {
            return;
        }
        self.time_display.update(keys);
        self.score_display.update(keys);
        self.snake.update(keys);
        self.ecosystem.update(keys);
        self.session_timer.update(keys);
        self.time_display.amount = self.session_timer.elapsed().as_secs_f64();
        let eaten = self.ecosystem.check_eaten(self.snake.head());
        if eaten > 0.0 {
            self.snake.grow(eaten);
            tracing::debug!(
                area = eaten,
                max_length = self.snake.max_length,
                remaining = self.ecosystem.count(),
                "Snake ate food"
            );
        }
        self.score_display.amount = self.snake.length();
        if let Some(reason) = self.stop_reason() {
            self.session_timer.pause();
            self.state = GameState::Stopped(reason);
            tracing::info!(
                %reason,
                score = self.score_display.amount,
                elapsed = self.time_display.amount,
                "Game over"
            );
        }
    }

    /// The game's elapsed running time
    pub(crate) fn elapsed(&mut self) -> Duration {
        self.session_timer.elapsed()
    }

    fn stop_reason(&self) -> Option<StopReason> {
        if !self.bounds.contains(self.snake.head()) {
            Some(StopReason::LeftPlane)
        } else if self.snake.overlaps() {
            Some(StopReason::SelfCollision)
        } else {
            None
        }
    }

    /// Route an input event.  Closing is honoured in any state; everything
    /// else only reaches the entities while the game is running.
    pub(crate) fn handle_event(&mut self, event: &InputEvent) {
        if matches!(event, InputEvent::Close | InputEvent::KeyUp(KeyCode::Esc)) {
            self.close_requested = true;
        }
        if self.running() {
            self.time_display.handle(event);
            self.score_display.handle(event);
            self.snake.handle(event);
            self.ecosystem.handle(event);
        }
    }

    /// Redraw everything, with later entities on top of earlier ones
    pub(crate) fn draw(&self, surface: &mut dyn Surface) -> io::Result<()> {
        surface.clear();
        self.time_display.draw(surface);
        self.score_display.draw(surface);
        self.snake.draw(surface);
        self.ecosystem.draw(surface);
        if !self.running() {
            let center = surface.dimensions().center();
            draw_centered(surface, "GAME OVER", center, consts::GAME_OVER_COLOR);
            draw_centered(
                surface,
                "Press Esc to quit",
                center + Point::new(0.0, f64::from(consts::DISPLAY_TEXT_SIZE)),
                consts::HINT_COLOR,
            );
        }
        surface.present()
    }

    pub(crate) fn running(&self) -> bool {
        self.state == GameState::Running
    }

    pub(crate) fn close_requested(&self) -> bool {
        self.close_requested
    }

    /// The current score: the length of the snake's trail
    pub(crate) fn score(&self) -> f64 {
        self.score_display.amount
    }

    pub(crate) fn state(&self) -> GameState {
        self.state
    }
}

fn draw_centered(surface: &mut dyn Surface, text: &str, position: Point, color: Color) {
    let size = consts::DISPLAY_TEXT_SIZE;
    let x = position.x - surface.text_width(text, size) / 2.0;
    surface.draw_text(text, Point::new(x, position.y), size, color);
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum GameState {
    Running,
    /// The game has ended for good.  Nothing moves, but the window can still
    /// be closed.
    Stopped(StopReason),
}

/// Why a game stopped
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum StopReason {
    /// The snake's head left the plane
    LeftPlane,
    /// The snake's head segment crossed its own trail
    SelfCollision,
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StopReason::LeftPlane => write!(f, "left the plane"),
            StopReason::SelfCollision => write!(f, "ran into itself"),
        }
    }
}
