use crate::clock::{Clock, MonotonicClock};
use crate::config::TimingConfig;
use crate::game::{Game, GameState, StopReason};
use crate::input::Input;
use crate::surface::Surface;
use crate::timer::Timer;
use rand::{rngs::StdRng, Rng};
use std::io;
use std::time::Duration;

/// The main loop: fixed-size logic steps paced by one timer, redraws paced
/// by another
#[derive(Clone, Debug)]
pub(crate) struct App<R = StdRng, C = MonotonicClock> {
    game: Game<R, C>,
    logic_timer: Timer<C>,
    render_timer: Timer<C>,
    logic_step: Duration,
    render_step: Duration,
}

impl<R: Rng, C: Clock + Clone> App<R, C> {
    pub(crate) fn new(game: Game<R, C>, timing: &TimingConfig, clock: C) -> App<R, C> {
        App {
            game,
            logic_timer: Timer::with_clock(clock.clone()),
            render_timer: Timer::with_clock(clock),
            logic_step: timing.logic_step(),
            render_step: timing.render_step(),
        }
    }
}

impl<R: Rng, C: Clock> App<R, C> {
    /// Run until the player closes the game, sleeping for one render step
    /// after each iteration
    pub(crate) fn run<I: Input, S: Surface>(
        mut self,
        input: &mut I,
        surface: &mut S,
    ) -> io::Result<Summary> {
        while !self.game.close_requested() {
            self.iterate(input, surface)?;
            std::thread::sleep(self.render_step);
        }
        Ok(self.summary())
    }

    /// One pass of the loop: handle at most one input event, catch the logic
    /// up in whole steps, and redraw if a render step has passed
    pub(crate) fn iterate<I: Input, S: Surface>(
        &mut self,
        input: &mut I,
        surface: &mut S,
    ) -> io::Result<()> {
        if let Some(event) = input.poll_event()? {
            self.game.handle_event(&event);
        }
        let mut steps = 0u32;
        while self.logic_timer.elapsed() > self.logic_step {
            self.game.step(&*input);
            self.logic_timer.consume(self.logic_step);
            steps += 1;
        }
        if steps > 1 {
            tracing::trace!(steps, "Logic fell behind; caught up");
        }
        if self.render_timer.elapsed() > self.render_step {
            self.render_timer.clear(self.render_step);
            self.game.draw(surface)?;
        }
        Ok(())
    }

    pub(crate) fn summary(&mut self) -> Summary {
        Summary {
            score: self.game.score(),
            elapsed: self.game.elapsed(),
            stop_reason: match self.game.state() {
                GameState::Running => None,
                GameState::Stopped(reason) => Some(reason),
            },
        }
    }
}

/// How a session ended
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Summary {
    pub(crate) score: f64,
    pub(crate) elapsed: Duration,
    /// `None` if the player quit while the game was still running
    pub(crate) stop_reason: Option<StopReason>,
}
