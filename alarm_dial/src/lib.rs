//! Alarm dial core
//!
//! The angle, gesture and time computations behind a circular bedtime/wake
//! dial. A host feeds touch points in view-local coordinates and receives
//! updated angles, an arc descriptor for the filled sector, and formatted
//! times. Drawing is left to the host.

pub mod config;
pub mod dial;
pub mod geometry;
pub mod gesture;
pub mod time_codec;

pub use config::{
    config_dir, config_path, delete_config, load_config, load_config_from, load_settings,
    save_config, save_config_to, ConfigError, DialSettings,
};
pub use dial::{
    AlarmDial, ArcPath, DialError, DialGeometry, DialOptions, DragTarget, HandlePose,
    TimesListener, DEFAULT_ICON_WIDTH,
};
pub use geometry::{
    angle_between, angle_from_origin, degrees_to_radians, dial_point, distance, quadrant,
    radians_to_degrees, sign, Point, Quadrant,
};
pub use gesture::{GestureEvent, GestureState, RotationGestureTracker};
pub use time_codec::{
    angle_to_time, format_clock, format_duration, normalize_degrees, span_to_time, ClockTime,
    Meridiem, DEGREES_PER_HOUR,
};
