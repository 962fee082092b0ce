//! Rotation gesture tracker - single-touch drag recognizer
//!
//! Follows one touch from press to release and reports how far it has
//! rotated around a fixed center. The tracker only measures; deciding what
//! the rotation means is left to the dial.

use crate::geometry::{angle_between, Point};

/// Recognizer state for the tracked touch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GestureState {
    /// No touch has been seen since construction
    #[default]
    Idle,
    Began,
    Changed,
    Ended,
    Cancelled,
}

/// Notification emitted for each accepted touch event
///
/// Rotations are in radians, positive counter-clockwise on screen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureEvent {
    Began { point: Point },
    Changed { rotation: f64 },
    Ended { rotation: f64 },
    Cancelled,
}

/// Tracks the rotation of a single touch around `center`
#[derive(Debug, Clone)]
pub struct RotationGestureTracker {
    /// Rotation center in view-local coordinates
    center: Point,
    state: GestureState,
    /// Rotation of the gesture in progress
    current_rotation: f64,
    /// Rotation carried over from an earlier segment of the same interaction
    previous_rotation: f64,
    starting_point: Point,
    end_point: Option<Point>,
}

impl RotationGestureTracker {
    pub fn new(center: Point) -> Self {
        Self {
            center,
            state: GestureState::Idle,
            current_rotation: 0.0,
            previous_rotation: 0.0,
            starting_point: Point::default(),
            end_point: None,
        }
    }

    pub fn center(&self) -> Point {
        self.center
    }

    pub fn set_center(&mut self, center: Point) {
        self.center = center;
    }

    pub fn state(&self) -> GestureState {
        self.state
    }

    /// Whether a touch is currently down
    pub fn is_active(&self) -> bool {
        matches!(self.state, GestureState::Began | GestureState::Changed)
    }

    /// Total rotation offset in radians (counter-clockwise positive)
    pub fn rotation(&self) -> f64 {
        self.current_rotation + self.previous_rotation
    }

    /// Where the tracked touch went down
    pub fn begin_point(&self) -> Point {
        self.starting_point
    }

    /// Where the tracked touch was released, once it has been
    pub fn end_point(&self) -> Option<Point> {
        self.end_point
    }

    /// Clear accumulated rotation
    ///
    /// Called automatically when a new touch begins, so rotation never leaks
    /// from one gesture into the next.
    pub fn reset(&mut self) {
        self.current_rotation = 0.0;
        self.previous_rotation = 0.0;
        self.end_point = None;
    }

    /// A touch went down. Only the first touch of the set is tracked.
    pub fn touches_began(&mut self, touches: &[Point]) -> Option<GestureEvent> {
        if self.is_active() {
            tracing::trace!("ignoring additional touch while a gesture is active");
            return None;
        }
        let point = *touches.first()?;

        self.reset();
        self.starting_point = point;
        self.state = GestureState::Began;
        tracing::debug!(x = point.x, y = point.y, "rotation gesture began");
        Some(GestureEvent::Began { point })
    }

    /// The tracked touch moved
    pub fn touches_moved(&mut self, touches: &[Point]) -> Option<GestureEvent> {
        if !self.is_active() {
            tracing::warn!("touch moved without an active gesture, dropping");
            return None;
        }
        let point = *touches.first()?;

        self.current_rotation = angle_between(self.starting_point, point, self.center);
        self.state = GestureState::Changed;
        tracing::trace!(rotation = self.rotation(), "rotation gesture changed");
        Some(GestureEvent::Changed {
            rotation: self.rotation(),
        })
    }

    /// The tracked touch was released
    pub fn touches_ended(&mut self, touches: &[Point]) -> Option<GestureEvent> {
        if !self.is_active() {
            tracing::warn!("touch ended without an active gesture, dropping");
            return None;
        }
        let point = *touches.first()?;

        self.end_point = Some(point);
        self.current_rotation = angle_between(self.starting_point, point, self.center);
        self.state = GestureState::Ended;
        tracing::debug!(rotation = self.rotation(), "rotation gesture ended");
        Some(GestureEvent::Ended {
            rotation: self.rotation(),
        })
    }

    /// The touch was interrupted; rotation is left as last reported
    pub fn touches_cancelled(&mut self) -> Option<GestureEvent> {
        if !self.is_active() {
            tracing::warn!("touch cancelled without an active gesture, dropping");
            return None;
        }

        self.state = GestureState::Cancelled;
        tracing::debug!("rotation gesture cancelled");
        Some(GestureEvent::Cancelled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    const EPS: f64 = 1e-9;

    fn tracker() -> RotationGestureTracker {
        RotationGestureTracker::new(Point::new(100.0, 100.0))
    }

    #[test]
    fn test_full_gesture_cycle() {
        let mut t = tracker();
        assert_eq!(t.state(), GestureState::Idle);

        let began = t.touches_began(&[Point::new(150.0, 100.0)]);
        assert_eq!(
            began,
            Some(GestureEvent::Began {
                point: Point::new(150.0, 100.0)
            })
        );
        assert!(t.is_active());

        // Quarter turn counter-clockwise: from 3 o'clock up to 12 o'clock
        match t.touches_moved(&[Point::new(150.0, 50.0)]) {
            Some(GestureEvent::Changed { rotation }) => assert!((rotation - PI / 4.0).abs() < EPS),
            other => panic!("unexpected event {:?}", other),
        }

        match t.touches_ended(&[Point::new(100.0 + 50.0, 100.0 + 50.0)]) {
            Some(GestureEvent::Ended { rotation }) => {
                // 7π/4 - 0: a clockwise eighth turn reads as a large positive angle
                assert!((rotation - 7.0 * PI / 4.0).abs() < EPS)
            }
            other => panic!("unexpected event {:?}", other),
        }
        assert_eq!(t.state(), GestureState::Ended);
        assert_eq!(t.end_point(), Some(Point::new(150.0, 150.0)));
        assert!(!t.is_active());
    }

    #[test]
    fn test_new_gesture_starts_from_zero_rotation() {
        let mut t = tracker();
        t.touches_began(&[Point::new(150.0, 100.0)]);
        t.touches_moved(&[Point::new(150.0, 50.0)]);
        t.touches_ended(&[Point::new(150.0, 50.0)]);
        assert!(t.rotation() > 0.0);

        // No explicit reset between gestures
        t.touches_began(&[Point::new(50.0, 100.0)]);
        assert_eq!(t.rotation(), 0.0);
        assert_eq!(t.end_point(), None);
    }

    #[test]
    fn test_only_first_touch_is_tracked() {
        let mut t = tracker();
        t.touches_began(&[Point::new(150.0, 100.0), Point::new(100.0, 50.0)]);
        assert_eq!(t.begin_point(), Point::new(150.0, 100.0));

        // A second touch while active does not restart the gesture
        assert_eq!(t.touches_began(&[Point::new(60.0, 60.0)]), None);
        assert_eq!(t.begin_point(), Point::new(150.0, 100.0));
    }

    #[test]
    fn test_out_of_order_events_are_dropped() {
        let mut t = tracker();
        assert_eq!(t.touches_moved(&[Point::new(1.0, 1.0)]), None);
        assert_eq!(t.touches_ended(&[Point::new(1.0, 1.0)]), None);
        assert_eq!(t.touches_cancelled(), None);
        assert_eq!(t.touches_began(&[]), None);
        assert_eq!(t.state(), GestureState::Idle);
    }

    #[test]
    fn test_cancel_keeps_last_rotation() {
        let mut t = tracker();
        t.touches_began(&[Point::new(150.0, 100.0)]);
        t.touches_moved(&[Point::new(150.0, 50.0)]);
        let before = t.rotation();

        assert_eq!(t.touches_cancelled(), Some(GestureEvent::Cancelled));
        assert_eq!(t.rotation(), before);
        assert_eq!(t.state(), GestureState::Cancelled);
    }
}
