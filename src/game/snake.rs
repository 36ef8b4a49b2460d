use super::entity::Entity;
use crate::config::GameConfig;
use crate::consts;
use crate::geometry::{segments_intersect, Point};
use crate::input::{InputEvent, KeyState};
use crate::surface::Surface;
use crossterm::event::KeyCode;
use std::collections::VecDeque;

/// Snake state
///
/// The snake's body is a polyline of trail points.  Its size is governed by a
/// length budget rather than a point count: points are added at the head as
/// the snake moves and dropped from the tail while the trail is at or over
/// budget.
#[derive(Clone, Debug, PartialEq)]
pub(super) struct Snake {
    /// Trail points, with the head (most recent) at the front
    pub(super) trail: VecDeque<Point>,

    /// Where the snake's head is heading from
    pub(super) position: Point,

    /// Displacement per logic step
    pub(super) velocity: Point,

    /// Length budget for the trail
    pub(super) max_length: f64,

    /// Degrees to rotate per logic step while steering
    turn_rate: f64,

    /// Index of the first trail segment tested against the head segment for
    /// self-intersection
    self_collision_skip: usize,

    left_key: KeyCode,
    right_key: KeyCode,

    /// Rotation of the trail's color palette
    palette_offset: usize,
}

impl Snake {
    pub(super) fn new(config: &GameConfig) -> Snake {
        let position = Point::new(config.start_x, config.start_y);
        let (hx, hy) = consts::SNAKE_START_HEADING;
        Snake {
            trail: VecDeque::from([position]),
            position,
            velocity: Point::new(hx, hy).scaled_to(config.speed),
            max_length: config.initial_length,
            turn_rate: config.turn_rate,
            self_collision_skip: config.self_collision_skip,
            left_key: KeyCode::Char(config.left_key),
            right_key: KeyCode::Char(config.right_key),
            palette_offset: 0,
        }
    }

    /// Return the position of the snake's head
    pub(super) fn head(&self) -> Point {
        self.trail.front().copied().unwrap_or(self.position)
    }

    /// Total length of the trail polyline
    pub(super) fn length(&self) -> f64 {
        self.segments().map(|(p, q)| p.distance_to(q)).sum()
    }

    /// Steer according to which keys are held, then move forwards one step.
    /// Holding both steering keys (or neither) goes straight.
    pub(super) fn advance(&mut self, left: bool, right: bool) {
        let offset = f64::from(i8::from(right) - i8::from(left));
        self.velocity = self.velocity.rotated(self.turn_rate * offset);
        let next = self.position + self.velocity;
        if self.head().distance_to(next) > consts::MIN_POINT_SPACING {
            self.trail.push_front(next);
        }
        if self.length() >= self.max_length && self.trail.len() > 1 {
            let _ = self.trail.pop_back();
        }
        self.position += self.velocity;
    }

    /// Extend the length budget by `amount`.  The budget never shrinks.
    pub(super) fn grow(&mut self, amount: f64) {
        if amount > 0.0 {
            self.max_length += amount;
        }
    }

    /// Test whether the head segment crosses any earlier part of the trail
    pub(super) fn overlaps(&self) -> bool {
        if self.trail.len() <= self.self_collision_skip + 1 {
            return false;
        }
        let (Some(&a), Some(&b)) = (self.trail.front(), self.trail.get(1)) else {
            return false;
        };
        self.segments()
            .skip(self.self_collision_skip)
            .any(|(p, q)| segments_intersect(a, b, p, q))
    }

    /// Consecutive pairs of trail points, starting at the head
    fn segments(&self) -> impl Iterator<Item = (Point, Point)> + '_ {
        self.trail.iter().copied().zip(self.trail.iter().copied().skip(1))
    }
}

impl Entity for Snake {
    fn update(&mut self, keys: &dyn KeyState) {
        self.advance(
            keys.is_key_pressed(self.left_key),
            keys.is_key_pressed(self.right_key),
        );
    }

    fn draw(&self, surface: &mut dyn Surface) {
        let palette = &consts::SNAKE_PALETTE;
        // The tail point is left undrawn so that the snake doesn't visibly
        // flicker as it is trimmed.
        let shown = self.trail.len().saturating_sub(1);
        for (i, &p) in self.trail.iter().take(shown).enumerate() {
            let color = palette[(i + self.palette_offset) % palette.len()];
            surface.draw_circle(p, consts::SNAKE_POINT_RADIUS, color);
        }
    }

    fn handle(&mut self, event: &InputEvent) {
        if *event == InputEvent::KeyUp(KeyCode::Char(consts::THEME_KEY)) {
            self.palette_offset = (self.palette_offset + 1) % consts::SNAKE_PALETTE.len();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Bounds;
    use crate::surface::{DrawOp, RecordingSurface};
    use pretty_assertions::assert_eq;
    use ratatui::style::Color;
    use std::collections::HashSet;

    const TOLERANCE: f64 = 1e-6;

    #[derive(Debug, Default)]
    struct Held(HashSet<KeyCode>);

    impl KeyState for Held {
        fn is_key_pressed(&self, key: KeyCode) -> bool {
            self.0.contains(&key)
        }
    }

    fn straight_config() -> GameConfig {
        GameConfig {
            start_x: 10.0,
            start_y: 10.0,
            ..GameConfig::default()
        }
    }

    #[test]
    fn new_snake() {
        let snake = Snake::new(&GameConfig::default());
        assert_eq!(snake.head(), Point::new(100.0, 100.0));
        assert_eq!(snake.trail.len(), 1);
        assert!((snake.velocity.length() - 2.0).abs() < TOLERANCE);
        assert!((snake.velocity.y * 2.0 - snake.velocity.x).abs() < TOLERANCE);
        assert_eq!(snake.length(), 0.0);
    }

    #[test]
    fn length_sums_displacements_below_budget() {
        let mut snake = Snake::new(&straight_config());
        for _ in 0..30 {
            snake.advance(false, false);
        }
        // 30 steps of 2 units each, with no trimming below 100
        assert_eq!(snake.trail.len(), 31);
        assert!((snake.length() - 60.0).abs() < TOLERANCE);
        assert_eq!(snake.head(), snake.position);
    }

    #[test]
    fn length_stabilizes_at_budget() {
        let mut snake = Snake::new(&straight_config());
        for _ in 0..300 {
            snake.advance(false, false);
            assert!(snake.length() <= snake.max_length + 2.0 + TOLERANCE);
        }
        assert!(snake.length() >= snake.max_length - 2.0 - TOLERANCE);
        assert!(snake.length() <= snake.max_length + TOLERANCE);
    }

    #[test]
    fn steering_rotates_heading() {
        let mut snake = Snake::new(&straight_config());
        let before = snake.velocity;
        snake.advance(false, true);
        assert_eq!(snake.velocity, before.rotated(3.5));
        snake.advance(true, false);
        snake.advance(true, false);
        assert!((snake.velocity.x - before.rotated(-3.5).x).abs() < TOLERANCE);
        assert!((snake.velocity.y - before.rotated(-3.5).y).abs() < TOLERANCE);
        assert!((snake.velocity.length() - 2.0).abs() < TOLERANCE);
    }

    #[test]
    fn both_keys_cancel() {
        let mut snake = Snake::new(&straight_config());
        let before = snake.velocity;
        snake.advance(true, true);
        assert_eq!(snake.velocity, before);
    }

    #[test]
    fn update_reads_held_keys() {
        let mut snake = Snake::new(&straight_config());
        let before = snake.velocity;
        let keys = Held(HashSet::from([KeyCode::Char('d')]));
        snake.update(&keys);
        assert_eq!(snake.velocity, before.rotated(3.5));
        snake.update(&Held::default());
        assert_eq!(snake.velocity, before.rotated(3.5));
    }

    #[test]
    fn close_points_are_not_recorded() {
        let mut snake = Snake::new(&GameConfig {
            speed: 0.4,
            ..straight_config()
        });
        snake.advance(false, false);
        assert_eq!(snake.trail.len(), 1);
        snake.advance(false, false);
        assert_eq!(snake.trail.len(), 1);
        snake.advance(false, false);
        assert_eq!(snake.trail.len(), 2);
    }

    #[test]
    fn growth_only_increases() {
        let mut snake = Snake::new(&GameConfig::default());
        snake.grow(std::f64::consts::PI * 36.0);
        assert!((snake.max_length - 100.0 - std::f64::consts::PI * 36.0).abs() < TOLERANCE);
        let grown = snake.max_length;
        snake.grow(0.0);
        snake.grow(-50.0);
        snake.grow(f64::NAN);
        assert_eq!(snake.max_length, grown);
    }

    #[test]
    fn straight_line_never_overlaps() {
        let mut snake = Snake::new(&GameConfig {
            initial_length: 400.0,
            ..straight_config()
        });
        for _ in 0..500 {
            snake.advance(false, false);
            assert!(!snake.overlaps());
        }
    }

    #[test]
    fn steady_turn_does_not_overlap_itself_at_the_head() {
        let mut snake = Snake::new(&GameConfig {
            initial_length: 30.0,
            ..GameConfig::default()
        });
        for _ in 0..200 {
            snake.advance(false, true);
            assert!(!snake.overlaps());
        }
    }

    #[test]
    fn circling_into_own_trail_overlaps() {
        // A full turn takes 360 / 3.5 ≈ 103 steps, ~206 units of trail, so a
        // 400-unit snake circling in place runs into its own tail.
        let mut snake = Snake::new(&GameConfig {
            start_x: 400.0,
            start_y: 400.0,
            initial_length: 400.0,
            ..GameConfig::default()
        });
        let overlapped = (0..200).any(|_| {
            snake.advance(true, false);
            snake.overlaps()
        });
        assert!(overlapped);
    }

    #[test]
    fn short_trails_never_overlap() {
        let mut snake = Snake::new(&straight_config());
        snake.trail = VecDeque::from([
            Point::new(0.0, 0.0),
            Point::new(4.0, 4.0),
            Point::new(4.0, 0.0),
            Point::new(0.0, 4.0),
            Point::new(2.0, -3.0),
        ]);
        assert!(!snake.overlaps());
    }

    #[test]
    fn crossing_beyond_skipped_segments_overlaps() {
        let mut snake = Snake::new(&straight_config());
        snake.trail = VecDeque::from([
            Point::new(5.0, 0.0),
            Point::new(5.0, 10.0),
            Point::new(6.0, 11.0),
            Point::new(7.0, 11.0),
            Point::new(10.0, 5.0),
            Point::new(0.0, 5.0),
        ]);
        assert!(snake.overlaps());
    }

    #[test]
    fn crossing_within_skipped_segments_is_ignored() {
        let mut snake = Snake::new(&straight_config());
        snake.trail = VecDeque::from([
            Point::new(5.0, 0.0),
            Point::new(5.0, 10.0),
            Point::new(6.0, 11.0),
            Point::new(10.0, 5.0),
            Point::new(0.0, 5.0),
            Point::new(0.0, 20.0),
        ]);
        assert!(!snake.overlaps());
    }

    #[test]
    fn draw_skips_tail_and_cycles_palette() {
        let mut snake = Snake::new(&straight_config());
        snake.trail = (0..9_u8)
            .map(|i| Point::new(f64::from(i) * 2.0, 10.0))
            .collect();
        let mut surface = RecordingSurface::new(Bounds::new(800.0, 800.0));
        snake.draw(&mut surface);
        let colors = surface
            .ops
            .iter()
            .map(|op| match op {
                DrawOp::Circle { color, .. } => *color,
                other => panic!("unexpected draw op: {other:?}"),
            })
            .collect::<Vec<_>>();
        assert_eq!(
            colors,
            vec![
                Color::Green,
                Color::Yellow,
                Color::LightRed,
                Color::Red,
                Color::Magenta,
                Color::Blue,
                Color::Green,
                Color::Yellow,
            ]
        );
    }

    #[test]
    fn theme_key_rotates_palette() {
        let mut snake = Snake::new(&straight_config());
        snake.trail = VecDeque::from([Point::new(2.0, 2.0), Point::new(1.0, 1.0)]);
        snake.handle(&InputEvent::KeyDown(KeyCode::Char(' ')));
        snake.handle(&InputEvent::KeyUp(KeyCode::Char(' ')));
        snake.handle(&InputEvent::KeyUp(KeyCode::Char('x')));
        let mut surface = RecordingSurface::new(Bounds::new(800.0, 800.0));
        snake.draw(&mut surface);
        assert_eq!(
            surface.ops,
            vec![DrawOp::Circle {
                center: Point::new(2.0, 2.0),
                radius: consts::SNAKE_POINT_RADIUS,
                color: Color::Yellow,
            }]
        );
    }
}
