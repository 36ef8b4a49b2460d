use super::entity::Entity;
use crate::clock::{Clock, MonotonicClock};
use crate::config::FoodConfig;
use crate::consts;
use crate::geometry::{Bounds, Point};
use crate::input::KeyState;
use crate::surface::Surface;
use crate::timer::Timer;
use rand::{rngs::StdRng, Rng};
use std::collections::{hash_map::Entry, HashMap};
use std::f64::consts::PI;
use std::time::Duration;

/// A piece of food lying on the plane
#[derive(Clone, Copy, Debug, PartialEq)]
pub(super) struct Food {
    pub(super) position: Point,
    pub(super) radius: f64,
}

impl Food {
    /// Test whether `p` is close enough to the food to eat it
    pub(super) fn contains(&self, p: Point) -> bool {
        self.position.distance_to(p) <= self.radius
    }

    pub(super) fn area(&self) -> f64 {
        PI * self.radius * self.radius
    }
}

impl Entity for Food {
    fn draw(&self, surface: &mut dyn Surface) {
        surface.draw_circle(self.position, self.radius, consts::FOOD_COLOR);
    }
}

/// Grid cell occupied by a food item
type Cell = (i32, i32);

/// The food supply.  New food appears at random whole-numbered positions on
/// a fixed cadence, with at most one item per position.
#[derive(Clone, Debug)]
pub(super) struct Ecosystem<R = StdRng, C = MonotonicClock> {
    rng: R,
    /// Largest x & y coordinates a food item can be spawned at
    limits: Cell,
    spawn_interval: Duration,
    max_food: usize,
    food_radius: f64,
    spawn_attempts: u32,
    spawn_timer: Timer<C>,
    foods: HashMap<Cell, Food>,
}

impl<R: Rng, C: Clock> Ecosystem<R, C> {
    /// Create an ecosystem holding a single food item
    pub(super) fn new(config: &FoodConfig, bounds: Bounds, rng: R, clock: C) -> Self {
        let mut eco = Ecosystem {
            rng,
            limits: (whole(bounds.width), whole(bounds.height)),
            spawn_interval: config.spawn_interval(),
            max_food: config.max_count,
            food_radius: config.radius,
            spawn_attempts: config.spawn_attempts,
            spawn_timer: Timer::with_clock(clock),
            foods: HashMap::new(),
        };
        eco.spawn();
        eco
    }

    /// Add a food item at a random unoccupied position and return where it
    /// was placed.  Does nothing if the ecosystem is full or if no free
    /// position turned up within the configured number of attempts.
    pub(super) fn spawn(&mut self) -> Option<Point> {
        if self.foods.len() >= self.max_food {
            return None;
        }
        let (max_x, max_y) = self.limits;
        for _ in 0..self.spawn_attempts {
            let cell = (
                self.rng.random_range(0..=max_x),
                self.rng.random_range(0..=max_y),
            );
            if let Entry::Vacant(e) = self.foods.entry(cell) {
                let position = Point::new(f64::from(cell.0), f64::from(cell.1));
                e.insert(Food {
                    position,
                    radius: self.food_radius,
                });
                tracing::debug!(
                    x = cell.0,
                    y = cell.1,
                    count = self.foods.len(),
                    "Spawned food"
                );
                return Some(position);
            }
        }
        tracing::debug!(
            attempts = self.spawn_attempts,
            count = self.foods.len(),
            "Could not find a free position for food; skipping spawn"
        );
        None
    }
}

impl<R, C> Ecosystem<R, C> {
    /// Remove every food item that `head` is touching and return their total
    /// area
    pub(super) fn check_eaten(&mut self, head: Point) -> f64 {
        let mut eaten = 0.0;
        self.foods.retain(|_, food| {
            if food.contains(head) {
                eaten += food.area();
                false
            } else {
                true
            }
        });
        eaten
    }

    pub(super) fn foods(&self) -> impl Iterator<Item = &Food> + '_ {
        self.foods.values()
    }

    pub(super) fn count(&self) -> usize {
        self.foods.len()
    }
}

impl<R: Rng, C: Clock> Entity for Ecosystem<R, C> {
    fn update(&mut self, _keys: &dyn KeyState) {
        if self.spawn_timer.elapsed() > self.spawn_interval {
            self.spawn_timer.consume(self.spawn_interval);
            self.spawn();
        }
    }

    fn draw(&self, surface: &mut dyn Surface) {
        for food in self.foods() {
            food.draw(surface);
        }
    }
}

/// Truncate a plane extent to a whole number of units
// The clamped value is within range of `i32`, and NaN casts to 0.
#[allow(clippy::cast_possible_truncation)]
fn whole(extent: f64) -> i32 {
    extent.clamp(0.0, f64::from(i32::MAX)) as i32
}
