//! Geometry module - pure point and angle helpers for the dial
//!
//! All points are view-local with the Y axis growing downward, the way touch
//! coordinates arrive from the host. Polar angles returned here follow the
//! screen convention: positive rotation is counter-clockwise on screen.

use std::f64::consts::{PI, TAU};

/// A point in view-local coordinates (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Translate this point so that `origin` becomes (0, 0)
    pub fn relative_to(self, origin: Point) -> Point {
        Point::new(self.x - origin.x, self.y - origin.y)
    }
}

/// Screen quadrant of a point relative to the origin
///
/// Numbered counter-clockwise as seen on screen, starting at the upper right.
/// Points lying on an axis fall into `UpperRight` unless `x < 0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quadrant {
    /// x > 0, y < 0
    UpperRight,
    /// x < 0, y < 0
    UpperLeft,
    /// x < 0, y > 0
    LowerLeft,
    /// x > 0, y > 0
    LowerRight,
}

/// Classify a point into its screen quadrant
pub fn quadrant(p: Point) -> Quadrant {
    if p.x > 0.0 && p.y < 0.0 {
        Quadrant::UpperRight
    } else if p.x < 0.0 && p.y < 0.0 {
        Quadrant::UpperLeft
    } else if p.x < 0.0 && p.y > 0.0 {
        Quadrant::LowerLeft
    } else if p.x > 0.0 && p.y > 0.0 {
        Quadrant::LowerRight
    } else {
        Quadrant::UpperRight
    }
}

/// Sign of a number as -1, 0 or 1
pub fn sign(n: f64) -> i32 {
    if n == 0.0 {
        0
    } else if n > 0.0 {
        1
    } else {
        -1
    }
}

/// Polar angle of `p` around the origin, in radians
///
/// The result lies in [0, 2π). The origin itself maps to 0.
pub fn angle_from_origin(p: Point) -> f64 {
    // atan() is undefined on the vertical axis
    if p.x == 0.0 {
        return match sign(p.y) {
            -1 => PI / 2.0,
            1 => 3.0 * PI / 2.0,
            _ => 0.0,
        };
    }

    // '-' because screen ordinates grow downward
    let angle = (-p.y / p.x).atan();

    // atan() covers (-π/2, π/2); lift it into [0, 2π)
    let lifted = if p.x < 0.0 {
        angle + PI
    } else if quadrant(p) == Quadrant::LowerRight {
        angle + TAU
    } else {
        angle
    };

    // -0.0 from atan on the positive x axis
    if lifted == 0.0 {
        0.0
    } else {
        lifted
    }
}

/// Signed rotation from `p1` to `p2` around `center`, in radians
///
/// This is an incremental rotation, not an absolute angle: the result is the
/// difference of the two polar angles and lies in (-2π, 2π).
pub fn angle_between(p1: Point, p2: Point, center: Point) -> f64 {
    let first = angle_from_origin(p1.relative_to(center));
    let second = angle_from_origin(p2.relative_to(center));
    second - first
}

/// Euclidean distance between two points
pub fn distance(a: Point, b: Point) -> f64 {
    (b.x - a.x).hypot(b.y - a.y)
}

pub fn degrees_to_radians(degrees: f64) -> f64 {
    PI * degrees / 180.0
}

pub fn radians_to_degrees(radians: f64) -> f64 {
    radians * 180.0 / PI
}

/// Place a point on a dial at `dial_deg` degrees
///
/// Dial angles start at 12 o'clock and grow clockwise on screen, so the
/// placement is offset by -90° from the screen's polar zero at 3 o'clock.
pub fn dial_point(center: Point, radius: f64, dial_deg: f64) -> Point {
    let theta = degrees_to_radians(dial_deg - 90.0);
    Point::new(
        center.x + theta.cos() * radius,
        center.y + theta.sin() * radius,
    )
}
