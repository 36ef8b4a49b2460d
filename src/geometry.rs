//! Points, vectors & segment tests on the play field
use std::ops::{Add, AddAssign, Mul, Sub};

/// Cross products with an absolute value at or below this are treated as
/// zero, i.e., the three points are collinear.
const COLLINEAR_EPSILON: f64 = 1e-9;

/// A position or displacement on the plane.  The plane's origin is its
/// top-left corner, with y increasing downwards.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub(crate) struct Point {
    pub(crate) x: f64,
    pub(crate) y: f64,
}

impl Point {
    pub(crate) const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    pub(crate) const fn new(x: f64, y: f64) -> Point {
        Point { x, y }
    }

    pub(crate) fn length(self) -> f64 {
        self.x.hypot(self.y)
    }

    pub(crate) fn distance_to(self, other: Point) -> f64 {
        (other - self).length()
    }

    /// Return a vector in the same direction with length `length`.  The zero
    /// vector is returned unchanged.
    pub(crate) fn scaled_to(self, length: f64) -> Point {
        let current = self.length();
        if current == 0.0 {
            self
        } else {
            self * (length / current)
        }
    }

    /// Rotate by `degrees`.  Positive angles turn clockwise on screen, as y
    /// points down.
    pub(crate) fn rotated(self, degrees: f64) -> Point {
        let (sin, cos) = degrees.to_radians().sin_cos();
        Point {
            x: self.x.mul_add(cos, -(self.y * sin)),
            y: self.x.mul_add(sin, self.y * cos),
        }
    }

    fn cross(self, other: Point) -> f64 {
        self.x.mul_add(other.y, -(self.y * other.x))
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, other: Point) -> Point {
        Point::new(self.x + other.x, self.y + other.y)
    }
}

impl AddAssign for Point {
    fn add_assign(&mut self, other: Point) {
        self.x += other.x;
        self.y += other.y;
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, other: Point) -> Point {
        Point::new(self.x - other.x, self.y - other.y)
    }
}

impl Mul<f64> for Point {
    type Output = Point;

    fn mul(self, k: f64) -> Point {
        Point::new(self.x * k, self.y * k)
    }
}

/// The extent of the play field, which spans from the origin to
/// `(width, height)`
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Bounds {
    pub(crate) width: f64,
    pub(crate) height: f64,
}

impl Bounds {
    pub(crate) const fn new(width: f64, height: f64) -> Bounds {
        Bounds { width, height }
    }

    /// Test whether `p` lies strictly inside the bounds; points on an edge
    /// are outside.
    pub(crate) fn contains(self, p: Point) -> bool {
        0.0 < p.x && p.x < self.width && 0.0 < p.y && p.y < self.height
    }

    pub(crate) fn center(self) -> Point {
        Point::new(self.width / 2.0, self.height / 2.0)
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Orientation {
    Clockwise,
    Counterclockwise,
    Collinear,
}

/// Which way the path `a` → `b` → `c` turns
fn orientation(a: Point, b: Point, c: Point) -> Orientation {
    let cross = (b - a).cross(c - a);
    if cross.abs() <= COLLINEAR_EPSILON {
        Orientation::Collinear
    } else if cross > 0.0 {
        Orientation::Clockwise
    } else {
        Orientation::Counterclockwise
    }
}

/// Given that `p` is collinear with `a`–`b`, test whether it lies within the
/// segment's bounding box.
fn within_box(a: Point, b: Point, p: Point) -> bool {
    p.x >= a.x.min(b.x) - COLLINEAR_EPSILON
        && p.x <= a.x.max(b.x) + COLLINEAR_EPSILON
        && p.y >= a.y.min(b.y) - COLLINEAR_EPSILON
        && p.y <= a.y.max(b.y) + COLLINEAR_EPSILON
}

/// Test whether the closed segments `p1`–`p2` and `p3`–`p4` share at least
/// one point.  Touching endpoints and collinear overlaps count.  A segment of
/// zero length is treated as a single point.
pub(crate) fn segments_intersect(p1: Point, p2: Point, p3: Point, p4: Point) -> bool {
    let o1 = orientation(p1, p2, p3);
    let o2 = orientation(p1, p2, p4);
    let o3 = orientation(p3, p4, p1);
    let o4 = orientation(p3, p4, p2);
    if o1 != o2
        && o3 != o4
        && ![o1, o2, o3, o4].contains(&Orientation::Collinear)
    {
        return true;
    }
    (o1 == Orientation::Collinear && within_box(p1, p2, p3))
        || (o2 == Orientation::Collinear && within_box(p1, p2, p4))
        || (o3 == Orientation::Collinear && within_box(p3, p4, p1))
        || (o4 == Orientation::Collinear && within_box(p3, p4, p2))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const TOLERANCE: f64 = 1e-9;

    fn pt(x: f64, y: f64) -> Point {
        Point::new(x, y)
    }

    #[rstest]
    #[case::crossing_interior(pt(0.0, 0.0), pt(4.0, 4.0), pt(0.0, 4.0), pt(4.0, 0.0), true)]
    #[case::collinear_overlap(pt(0.0, 0.0), pt(4.0, 0.0), pt(2.0, 0.0), pt(6.0, 0.0), true)]
    #[case::collinear_contained(pt(0.0, 0.0), pt(6.0, 6.0), pt(2.0, 2.0), pt(3.0, 3.0), true)]
    #[case::collinear_disjoint(pt(0.0, 0.0), pt(1.0, 0.0), pt(2.0, 0.0), pt(3.0, 0.0), false)]
    #[case::parallel(pt(0.0, 0.0), pt(4.0, 0.0), pt(0.0, 1.0), pt(4.0, 1.0), false)]
    #[case::shared_endpoint(pt(0.0, 0.0), pt(2.0, 2.0), pt(2.0, 2.0), pt(4.0, 0.0), true)]
    #[case::t_junction(pt(0.0, 0.0), pt(4.0, 0.0), pt(2.0, 0.0), pt(2.0, 3.0), true)]
    #[case::near_miss(pt(0.0, 0.0), pt(4.0, 0.0), pt(2.0, 0.5), pt(2.0, 3.0), false)]
    #[case::lines_cross_beyond_segments(
        pt(0.0, 0.0),
        pt(1.0, 1.0),
        pt(3.0, 0.0),
        pt(4.0, -1.0),
        false
    )]
    #[case::point_on_segment(pt(1.0, 1.0), pt(1.0, 1.0), pt(0.0, 0.0), pt(2.0, 2.0), true)]
    #[case::point_off_segment(pt(1.0, 2.0), pt(1.0, 2.0), pt(0.0, 0.0), pt(2.0, 2.0), false)]
    #[case::point_beyond_collinear(pt(3.0, 3.0), pt(3.0, 3.0), pt(0.0, 0.0), pt(2.0, 2.0), false)]
    #[case::same_point(pt(5.0, 5.0), pt(5.0, 5.0), pt(5.0, 5.0), pt(5.0, 5.0), true)]
    #[case::different_points(pt(5.0, 5.0), pt(5.0, 5.0), pt(6.0, 5.0), pt(6.0, 5.0), false)]
    fn test_segments_intersect(
        #[case] p1: Point,
        #[case] p2: Point,
        #[case] p3: Point,
        #[case] p4: Point,
        #[case] expected: bool,
    ) {
        assert_eq!(segments_intersect(p1, p2, p3, p4), expected);
        assert_eq!(segments_intersect(p3, p4, p1, p2), expected);
        assert_eq!(segments_intersect(p2, p1, p4, p3), expected);
    }

    #[test]
    fn rotation_preserves_length() {
        let v = pt(1.0, 0.5).scaled_to(2.0);
        let mut w = v;
        for _ in 0..100 {
            w = w.rotated(3.5);
        }
        assert!((w.length() - 2.0).abs() < TOLERANCE);
    }

    #[test]
    fn quarter_turn_is_clockwise_on_screen() {
        let v = pt(1.0, 0.0).rotated(90.0);
        assert!(v.x.abs() < TOLERANCE);
        assert!((v.y - 1.0).abs() < TOLERANCE);
    }

    #[test]
    fn scaling_zero_vector() {
        assert_eq!(Point::ORIGIN.scaled_to(3.0), Point::ORIGIN);
    }

    #[rstest]
    #[case(pt(400.0, 400.0), true)]
    #[case(pt(0.5, 799.5), true)]
    #[case(pt(0.0, 400.0), false)]
    #[case(pt(400.0, 800.0), false)]
    #[case(pt(-3.0, 400.0), false)]
    #[case(pt(400.0, 812.0), false)]
    fn test_bounds_contains(#[case] p: Point, #[case] inside: bool) {
        assert_eq!(Bounds::new(800.0, 800.0).contains(p), inside);
    }

    #[test]
    fn distance() {
        assert!((pt(1.0, 1.0).distance_to(pt(4.0, 5.0)) - 5.0).abs() < TOLERANCE);
    }
}
