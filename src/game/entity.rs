use crate::clock::Clock;
use crate::input::{InputEvent, KeyState};
use crate::surface::Surface;
use crate::timer::Timer;

/// Anything that takes part in the game's logic, render, and event ticks.
/// Every tick is a no-op unless overridden.
pub(super) trait Entity {
    /// Logic tick, run once per fixed logic step
    fn update(&mut self, _keys: &dyn KeyState) {}

    /// Render tick
    fn draw(&self, _surface: &mut dyn Surface) {}

    /// Event tick, run for each input event while the game is running
    fn handle(&mut self, _event: &InputEvent) {}
}

impl<C: Clock> Entity for Timer<C> {
    fn update(&mut self, _keys: &dyn KeyState) {
        self.elapsed();
    }
}
