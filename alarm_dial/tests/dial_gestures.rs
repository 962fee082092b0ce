//! End-to-end drag scenarios: touches in, angles and times out.

use std::cell::RefCell;
use std::rc::Rc;

use alarm_dial::{dial_point, AlarmDial, DialGeometry, DialOptions, DragTarget, GestureState, Point};

const EPS: f64 = 1e-6;
const RADIUS: f64 = 175.0;

type Log = Rc<RefCell<Vec<(String, String)>>>;

fn recording_dial(start: f64, end: f64) -> (AlarmDial, Log) {
    let log: Log = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&log);
    let dial = AlarmDial::with_listener(start, end, DialGeometry::new(RADIUS), move |bed: &str, wake: &str| {
        sink.borrow_mut().push((bed.to_string(), wake.to_string()));
    })
    .unwrap();
    (dial, log)
}

/// Point on the handle track at a dial angle
fn on_track(dial: &AlarmDial, angle: f64) -> Point {
    let g = dial.geometry();
    dial_point(g.center, g.handle_track_radius(), angle)
}

#[test]
fn initial_times_reported_once() {
    let (dial, log) = recording_dial(45.0, 90.0);
    assert_eq!(dial.bed_time(), "01:30");
    assert_eq!(dial.wake_time(), "03:00");
    assert_eq!(
        *log.borrow(),
        vec![("01:30".to_string(), "03:00".to_string())]
    );
}

#[test]
fn dragging_start_handle_updates_arc_and_times() {
    let (mut dial, log) = recording_dial(45.0, 90.0);

    dial.on_touch_down(on_track(&dial, 45.0));
    assert_eq!(dial.drag_target(), DragTarget::Start);

    dial.on_touch_move(on_track(&dial, 55.0));
    let arc = dial.current_arc_path();
    assert!((arc.start_angle_deg - 55.0).abs() < EPS);
    assert!((arc.end_angle_deg - 90.0).abs() < EPS);
    assert_eq!(dial.bed_time(), "01:50");
    assert_eq!(dial.duration_label(), "1 HR 10 MIN");
    // Not committed until release
    assert_eq!(dial.start_angle(), 45.0);

    dial.on_touch_up(on_track(&dial, 60.0));
    assert_eq!(dial.drag_target(), DragTarget::None);
    assert!((dial.start_angle() - 60.0).abs() < EPS);
    assert_eq!(dial.bed_time(), "02:00");
    assert_eq!(dial.wake_time(), "03:00");

    // Construction, move and release each reported
    assert_eq!(log.borrow().len(), 3);
    assert_eq!(log.borrow()[1], ("01:50".to_string(), "03:00".to_string()));
}

#[test]
fn dragging_end_handle_leaves_start_alone() {
    let (mut dial, _log) = recording_dial(45.0, 180.0);

    dial.on_touch_down(on_track(&dial, 180.0));
    assert_eq!(dial.drag_target(), DragTarget::End);
    dial.on_touch_move(on_track(&dial, 210.0));
    dial.on_touch_up(on_track(&dial, 210.0));

    assert!((dial.start_angle() - 45.0).abs() < EPS);
    assert!((dial.end_angle() - 210.0).abs() < EPS);
    assert_eq!(dial.wake_time(), "07:00");
    assert_eq!(dial.duration_label(), "5 HR 30 MIN");
}

#[test]
fn touch_off_the_handles_moves_nothing() {
    let (mut dial, log) = recording_dial(45.0, 90.0);

    dial.on_touch_down(dial.geometry().center);
    assert_eq!(dial.drag_target(), DragTarget::None);
    dial.on_touch_move(Point::new(10.0, 10.0));
    dial.on_touch_up(Point::new(10.0, 10.0));

    assert_eq!(dial.start_angle(), 45.0);
    assert_eq!(dial.end_angle(), 90.0);
    assert_eq!(log.borrow().len(), 1);
}

#[test]
fn start_handle_crossing_twelve_wraps_to_small_angle() {
    let (mut dial, _log) = recording_dial(350.0, 10.0);

    // A 15° drag: no full-turn correction needed
    dial.on_touch_down(on_track(&dial, 350.0));
    dial.on_touch_move(on_track(&dial, 5.0));
    assert!((dial.current_arc_path().start_angle_deg - 365.0).abs() < EPS);
    assert!((dial.current_start_angle() - 5.0).abs() < EPS);
    assert_eq!(dial.duration_label(), "0 HR 10 MIN");

    // A 30° drag would leave the handles 370° apart, so it is shifted back a turn
    dial.on_touch_move(on_track(&dial, 20.0));
    assert!((dial.current_arc_path().start_angle_deg - 20.0).abs() < EPS);
    assert!((dial.current_start_angle() - 20.0).abs() < EPS);

    dial.on_touch_up(on_track(&dial, 20.0));
    assert!((dial.start_angle() - 20.0).abs() < EPS);
    assert_eq!(dial.bed_time(), "00:40");
}

#[test]
fn crossing_three_oclock_is_corrected() {
    // The tracker's polar angle jumps by a full turn at 3 o'clock
    let (mut dial, _log) = recording_dial(80.0, 120.0);

    dial.on_touch_down(on_track(&dial, 80.0));
    dial.on_touch_move(on_track(&dial, 100.0));

    assert!((dial.current_arc_path().start_angle_deg - 100.0).abs() < EPS);
    assert!((dial.start_handle().revolution_deg - 100.0).abs() < EPS);
    assert!((dial.start_handle().spin_deg + 100.0).abs() < EPS);
}

#[test]
fn cancel_commits_last_position() {
    let (mut dial, _log) = recording_dial(45.0, 180.0);

    dial.on_touch_down(on_track(&dial, 180.0));
    dial.on_touch_move(on_track(&dial, 240.0));
    dial.on_touch_cancel();

    assert_eq!(dial.drag_target(), DragTarget::None);
    assert_eq!(dial.gesture_state(), GestureState::Cancelled);
    assert!((dial.end_angle() - 240.0).abs() < EPS);
}

#[test]
fn second_gesture_starts_from_committed_angles() {
    let (mut dial, _log) = recording_dial(45.0, 180.0);

    dial.on_touch_down(on_track(&dial, 45.0));
    dial.on_touch_up(on_track(&dial, 75.0));
    assert!((dial.start_angle() - 75.0).abs() < EPS);

    // The handle now sits at 75°; grabbing it there works without any reset
    dial.on_touch_down(on_track(&dial, 75.0));
    assert_eq!(dial.drag_target(), DragTarget::Start);
    dial.on_touch_move(on_track(&dial, 85.0));
    assert!((dial.current_start_angle() - 85.0).abs() < EPS);
    dial.on_touch_up(on_track(&dial, 85.0));
    assert!((dial.start_angle() - 85.0).abs() < EPS);
}

#[test]
fn whole_ring_drag_keeps_span() {
    let (mut dial, _log) = recording_dial(45.0, 180.0);

    // Touch the band away from both handles, then grab the ring explicitly
    dial.on_touch_down(on_track(&dial, 300.0));
    assert_eq!(dial.drag_target(), DragTarget::None);
    assert!(dial.grab_whole_ring());

    dial.on_touch_move(on_track(&dial, 330.0));
    dial.on_touch_up(on_track(&dial, 330.0));

    assert!((dial.start_angle() - 75.0).abs() < EPS);
    assert!((dial.end_angle() - 210.0).abs() < EPS);
    assert_eq!(dial.duration_label(), "4 HR 30 MIN");
    assert!(!dial.grab_whole_ring());
}

#[test]
fn band_touch_grabs_ring_when_enabled() {
    let (dial, _log) = recording_dial(45.0, 180.0);
    let mut dial = dial.with_options(DialOptions {
        drag_ring_on_band_touch: true,
    });

    dial.on_touch_down(on_track(&dial, 300.0));
    assert_eq!(dial.drag_target(), DragTarget::WholeRing);
    dial.on_touch_move(on_track(&dial, 270.0));
    dial.on_touch_up(on_track(&dial, 270.0));

    assert!((dial.start_angle() - 15.0).abs() < EPS);
    assert!((dial.end_angle() - 150.0).abs() < EPS);
}

#[test]
fn moves_without_touch_down_are_ignored() {
    let (mut dial, log) = recording_dial(45.0, 90.0);
    dial.on_touch_move(on_track(&dial, 200.0));
    dial.on_touch_up(on_track(&dial, 200.0));
    dial.on_touch_cancel();

    assert_eq!(dial.start_angle(), 45.0);
    assert_eq!(log.borrow().len(), 1);
}
