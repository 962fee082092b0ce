//! Dial state machine - the two draggable handles of the bedtime ring
//!
//! Owns the bedtime (start) and wake (end) angles, decides on touch-down which
//! handle a touch grabbed, and turns rotation reported by the gesture tracker
//! into new angles. Every angle change ends in [`AlarmDial::recompute`], which
//! refreshes the arc descriptor and the time strings and notifies the host.
//!
//! Angles are degrees on the dial face: 0° at 12 o'clock, growing clockwise.

use crate::geometry::{dial_point, distance, radians_to_degrees, Point};
use crate::gesture::{GestureEvent, GestureState, RotationGestureTracker};
use crate::time_codec::{
    angle_to_time, format_clock, format_duration, normalize_degrees, span_to_time, ClockTime,
};

/// Default width of a handle icon, in view units
pub const DEFAULT_ICON_WIDTH: f64 = 40.0;

/// Largest rotation applied from a single gesture, in degrees
const MAX_GESTURE_ROTATION: f64 = 360.0;

/// Error type for dial construction
#[derive(Debug, Clone, PartialEq)]
pub enum DialError {
    /// An angle was NaN or infinite
    NonFiniteAngle { which: &'static str, value: f64 },
    /// Radius or icon width cannot describe a ring
    InvalidGeometry { radius: f64, icon_width: f64 },
}

impl std::fmt::Display for DialError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DialError::NonFiniteAngle { which, value } => {
                write!(f, "{} angle must be finite, got {}", which, value)
            }
            DialError::InvalidGeometry { radius, icon_width } => write!(
                f,
                "Invalid dial geometry: radius {} with icon width {}",
                radius, icon_width
            ),
        }
    }
}

impl std::error::Error for DialError {}

/// Size and placement of the dial in view-local coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DialGeometry {
    /// Center of the ring
    pub center: Point,
    /// Outer radius of the ring
    pub radius: f64,
    /// Diameter of a handle icon; also the width of the touch band
    pub icon_width: f64,
}

impl DialGeometry {
    /// Dial filling a square view of side `2 * radius`
    pub fn new(radius: f64) -> Self {
        Self {
            center: Point::new(radius, radius),
            radius,
            icon_width: DEFAULT_ICON_WIDTH,
        }
    }

    pub fn with_icon_width(mut self, icon_width: f64) -> Self {
        self.icon_width = icon_width;
        self
    }

    pub fn with_center(mut self, center: Point) -> Self {
        self.center = center;
        self
    }

    /// Radius of the circle the handle centers travel on
    pub fn handle_track_radius(&self) -> f64 {
        self.radius - self.icon_width / 2.0
    }

    /// Whether `point` lies on the ring band `[radius - icon_width, radius]`
    pub fn band_contains(&self, point: Point) -> bool {
        let d = distance(self.center, point);
        d >= self.radius - self.icon_width && d <= self.radius
    }

    fn validate(&self) -> Result<(), DialError> {
        let valid = self.radius.is_finite()
            && self.icon_width.is_finite()
            && self.center.x.is_finite()
            && self.center.y.is_finite()
            && self.icon_width > 0.0
            && self.icon_width <= self.radius;
        if valid {
            Ok(())
        } else {
            Err(DialError::InvalidGeometry {
                radius: self.radius,
                icon_width: self.icon_width,
            })
        }
    }
}

/// What the current gesture is moving
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragTarget {
    #[default]
    None,
    /// The bedtime handle
    Start,
    /// The wake handle
    End,
    /// Both handles together, keeping the span
    WholeRing,
}

/// Behavior switches for the dial
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DialOptions {
    /// Touching the ring band away from both handles drags the whole ring
    pub drag_ring_on_band_touch: bool,
}

/// Filled sector between the two handles, handed to the host for rendering
///
/// Angles are the raw (unwrapped) values of the last recompute, measured in
/// the ring's own frame; the host draws it pre-rotated by -90° so that 0° sits
/// at 12 o'clock. The path runs clockwise and closes back through the center.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcPath {
    pub center: Point,
    pub radius: f64,
    pub start_angle_deg: f64,
    pub end_angle_deg: f64,
    pub clockwise: bool,
}

impl ArcPath {
    /// Clockwise sweep from start to end, in [0, 360)
    pub fn sweep_deg(&self) -> f64 {
        normalize_degrees(self.end_angle_deg - self.start_angle_deg)
    }
}

/// Where a handle icon sits and how it is turned
///
/// The icon revolves around the dial with its angle and spins the opposite
/// way so it stays upright.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HandlePose {
    pub center: Point,
    pub revolution_deg: f64,
    pub spin_deg: f64,
}

/// Receives the formatted bedtime and wake time after every recompute
pub trait TimesListener {
    fn times_changed(&mut self, bed_time: &str, wake_time: &str);
}

impl<F> TimesListener for F
where
    F: FnMut(&str, &str),
{
    fn times_changed(&mut self, bed_time: &str, wake_time: &str) {
        self(bed_time, wake_time)
    }
}

/// Bedtime/wake dial control
pub struct AlarmDial {
    geometry: DialGeometry,
    options: DialOptions,
    /// Committed bedtime angle
    start_angle: f64,
    /// Committed wake angle
    end_angle: f64,
    /// Raw angles of the last recompute, including an uncommitted drag
    pending_start: f64,
    pending_end: f64,
    /// Normalized angles of the last recompute
    current_start_angle: f64,
    current_end_angle: f64,
    drag_target: DragTarget,
    tracker: RotationGestureTracker,
    bed_time: String,
    wake_time: String,
    duration_label: String,
    arc: ArcPath,
    listener: Option<Box<dyn TimesListener>>,
}

impl std::fmt::Debug for AlarmDial {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AlarmDial")
            .field("geometry", &self.geometry)
            .field("start_angle", &self.start_angle)
            .field("end_angle", &self.end_angle)
            .field("current_start_angle", &self.current_start_angle)
            .field("current_end_angle", &self.current_end_angle)
            .field("drag_target", &self.drag_target)
            .field("bed_time", &self.bed_time)
            .field("wake_time", &self.wake_time)
            .finish_non_exhaustive()
    }
}

impl AlarmDial {
    /// Create a dial with the given initial angles in degrees
    pub fn new(start_angle: f64, end_angle: f64, geometry: DialGeometry) -> Result<Self, DialError> {
        if !start_angle.is_finite() {
            return Err(DialError::NonFiniteAngle {
                which: "start",
                value: start_angle,
            });
        }
        if !end_angle.is_finite() {
            return Err(DialError::NonFiniteAngle {
                which: "end",
                value: end_angle,
            });
        }
        geometry.validate()?;

        let mut dial = Self {
            geometry,
            options: DialOptions::default(),
            start_angle,
            end_angle,
            pending_start: start_angle,
            pending_end: end_angle,
            current_start_angle: 0.0,
            current_end_angle: 0.0,
            drag_target: DragTarget::None,
            tracker: RotationGestureTracker::new(geometry.center),
            bed_time: String::new(),
            wake_time: String::new(),
            duration_label: String::new(),
            arc: ArcPath {
                center: geometry.center,
                radius: geometry.radius,
                start_angle_deg: start_angle,
                end_angle_deg: end_angle,
                clockwise: true,
            },
            listener: None,
        };
        dial.recompute(start_angle, end_angle);
        Ok(dial)
    }

    /// Create a dial and report its initial times to `listener` once
    pub fn with_listener(
        start_angle: f64,
        end_angle: f64,
        geometry: DialGeometry,
        listener: impl TimesListener + 'static,
    ) -> Result<Self, DialError> {
        let mut dial = Self::new(start_angle, end_angle, geometry)?;
        dial.set_listener(listener);
        dial.notify();
        Ok(dial)
    }

    pub fn with_options(mut self, options: DialOptions) -> Self {
        self.options = options;
        self
    }

    /// Replace the listener; it hears about the next change, not the current state
    pub fn set_listener(&mut self, listener: impl TimesListener + 'static) {
        self.listener = Some(Box::new(listener));
    }

    pub fn set_options(&mut self, options: DialOptions) {
        self.options = options;
    }

    /// Resize or move the dial, e.g. when the host view changes size
    pub fn set_geometry(&mut self, geometry: DialGeometry) -> Result<(), DialError> {
        geometry.validate()?;
        self.geometry = geometry;
        self.tracker.set_center(geometry.center);
        self.recompute(self.pending_start, self.pending_end);
        Ok(())
    }

    // ------------------------------------------------------------------
    // Touch input
    // ------------------------------------------------------------------

    pub fn on_touch_down(&mut self, point: Point) {
        if let Some(event) = self.tracker.touches_began(&[point]) {
            self.handle_gesture(event);
        }
    }

    pub fn on_touch_move(&mut self, point: Point) {
        if let Some(event) = self.tracker.touches_moved(&[point]) {
            self.handle_gesture(event);
        }
    }

    pub fn on_touch_up(&mut self, point: Point) {
        if let Some(event) = self.tracker.touches_ended(&[point]) {
            self.handle_gesture(event);
        }
    }

    pub fn on_touch_cancel(&mut self) {
        if let Some(event) = self.tracker.touches_cancelled() {
            self.handle_gesture(event);
        }
    }

    /// React to one event from the gesture tracker
    pub fn handle_gesture(&mut self, event: GestureEvent) {
        match event {
            GestureEvent::Began { point } => {
                self.drag_target = self.hit_test(point);
                tracing::debug!(drag_target = ?self.drag_target, "drag target selected");
            }
            GestureEvent::Changed { rotation } => self.apply_rotation(rotation),
            GestureEvent::Ended { rotation } => {
                self.apply_rotation(rotation);
                self.commit();
            }
            GestureEvent::Cancelled => self.commit(),
        }
    }

    /// Drag the whole selection for the rest of the active gesture
    ///
    /// Returns false when no touch is down.
    pub fn grab_whole_ring(&mut self) -> bool {
        if !self.tracker.is_active() {
            return false;
        }
        self.drag_target = DragTarget::WholeRing;
        tracing::debug!("whole ring grabbed");
        true
    }

    // ------------------------------------------------------------------
    // Hit testing and rotation
    // ------------------------------------------------------------------

    /// Decide which handle, if any, a touch at `point` grabs
    ///
    /// The bedtime handle wins when both are in reach.
    pub fn hit_test(&self, point: Point) -> DragTarget {
        if !self.geometry.band_contains(point) {
            return DragTarget::None;
        }

        let reach = self.geometry.icon_width / 2.0;
        if distance(self.handle_center(self.current_start_angle), point) < reach {
            DragTarget::Start
        } else if distance(self.handle_center(self.current_end_angle), point) < reach {
            DragTarget::End
        } else if self.options.drag_ring_on_band_touch {
            DragTarget::WholeRing
        } else {
            DragTarget::None
        }
    }

    /// Apply a tracker rotation (radians, counter-clockwise positive)
    pub fn apply_rotation(&mut self, rotation: f64) {
        // The dial turns clockwise-positive
        let delta = (-radians_to_degrees(rotation)).clamp(-MAX_GESTURE_ROTATION, MAX_GESTURE_ROTATION);
        tracing::trace!(delta, drag_target = ?self.drag_target, "applying rotation");

        match self.drag_target {
            DragTarget::Start => self.rotate_start(delta),
            DragTarget::End => self.rotate_end(delta),
            DragTarget::WholeRing => self.rotate_ring(delta),
            DragTarget::None => {}
        }
    }

    fn rotate_start(&mut self, delta: f64) {
        let candidate = wrap_candidate(self.end_angle - self.start_angle, delta);
        self.recompute(self.start_angle + candidate, self.end_angle);
    }

    fn rotate_end(&mut self, delta: f64) {
        let candidate = wrap_candidate(self.start_angle - self.end_angle, delta);
        self.recompute(self.start_angle, self.end_angle + candidate);
    }

    fn rotate_ring(&mut self, delta: f64) {
        self.recompute(self.start_angle + delta, self.end_angle + delta);
    }

    /// Finish a drag: clear the target and snap stored angles to their
    /// normalized values
    pub fn commit(&mut self) {
        self.drag_target = DragTarget::None;
        self.start_angle = self.current_start_angle;
        self.end_angle = self.current_end_angle;
        self.pending_start = self.current_start_angle;
        self.pending_end = self.current_end_angle;
        tracing::debug!(
            start = self.start_angle,
            end = self.end_angle,
            "dial committed"
        );
    }

    /// Refresh arc, angles and time strings from raw angles, then notify
    pub fn recompute(&mut self, start: f64, end: f64) {
        self.pending_start = start;
        self.pending_end = end;
        self.arc = ArcPath {
            center: self.geometry.center,
            radius: self.geometry.radius,
            start_angle_deg: start,
            end_angle_deg: end,
            clockwise: true,
        };

        self.current_start_angle = normalize_degrees(start);
        self.current_end_angle = normalize_degrees(end);

        self.duration_label = format_duration(self.span());
        self.bed_time = format_clock(angle_to_time(self.current_start_angle));
        self.wake_time = format_clock(angle_to_time(self.current_end_angle));
        tracing::trace!(
            bed_time = %self.bed_time,
            wake_time = %self.wake_time,
            duration = %self.duration_label,
            "dial recomputed"
        );

        self.notify();
    }

    fn notify(&mut self) {
        if let Some(listener) = self.listener.as_mut() {
            listener.times_changed(&self.bed_time, &self.wake_time);
        }
    }

    fn handle_center(&self, angle: f64) -> Point {
        dial_point(
            self.geometry.center,
            self.geometry.handle_track_radius(),
            angle,
        )
    }

    fn handle_pose(&self, angle: f64) -> HandlePose {
        HandlePose {
            center: self.handle_center(angle),
            revolution_deg: angle,
            spin_deg: -angle,
        }
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    /// Committed bedtime angle in degrees
    pub fn start_angle(&self) -> f64 {
        self.start_angle
    }

    /// Committed wake angle in degrees
    pub fn end_angle(&self) -> f64 {
        self.end_angle
    }

    /// Bedtime angle of the last recompute, in [0, 360)
    pub fn current_start_angle(&self) -> f64 {
        self.current_start_angle
    }

    /// Wake angle of the last recompute, in [0, 360)
    pub fn current_end_angle(&self) -> f64 {
        self.current_end_angle
    }

    pub fn drag_target(&self) -> DragTarget {
        self.drag_target
    }

    pub fn gesture_state(&self) -> GestureState {
        self.tracker.state()
    }

    pub fn geometry(&self) -> DialGeometry {
        self.geometry
    }

    pub fn options(&self) -> DialOptions {
        self.options
    }

    /// Bedtime as "HH:MM"
    pub fn bed_time(&self) -> &str {
        &self.bed_time
    }

    /// Wake time as "HH:MM"
    pub fn wake_time(&self) -> &str {
        &self.wake_time
    }

    /// Span between the handles, e.g. "8 HR 30 MIN"
    pub fn duration_label(&self) -> &str {
        &self.duration_label
    }

    pub fn bed_clock_time(&self) -> ClockTime {
        angle_to_time(self.current_start_angle)
    }

    pub fn wake_clock_time(&self) -> ClockTime {
        angle_to_time(self.current_end_angle)
    }

    /// Clockwise span from bedtime to wake time
    pub fn span(&self) -> ClockTime {
        span_to_time(self.current_start_angle, self.current_end_angle)
    }

    pub fn current_arc_path(&self) -> ArcPath {
        self.arc
    }

    pub fn start_handle(&self) -> HandlePose {
        self.handle_pose(self.pending_start)
    }

    pub fn end_handle(&self) -> HandlePose {
        self.handle_pose(self.pending_end)
    }
}

/// Undo a full-turn jump in a handle's drag delta
///
/// `gap` is the other handle's angle minus the dragged handle's angle. When
/// the delta would put the handles more than one revolution apart it came
/// from the tracker's angle wrapping, and is shifted back by 360°.
fn wrap_candidate(gap: f64, delta: f64) -> f64 {
    if (gap - delta).abs() > 360.0 {
        if delta > 0.0 {
            delta - 360.0
        } else {
            delta + 360.0
        }
    } else {
        delta
    }
}
