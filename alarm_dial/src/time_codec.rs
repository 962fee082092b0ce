//! Time codec - converts dial angles into clock times and display strings
//!
//! One revolution of the dial is twelve hours, so 30° is one hour and 0.5° is
//! one minute. The same conversion serves both clock positions (bedtime, wake)
//! and the span between them (sleep duration).

use chrono::{Duration, NaiveTime};
use serde::{Deserialize, Serialize};

/// Degrees of dial rotation per hour
pub const DEGREES_PER_HOUR: f64 = 30.0;

/// AM/PM indicator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Meridiem {
    AM,
    PM,
}

impl Meridiem {
    pub fn toggled(self) -> Self {
        match self {
            Meridiem::AM => Meridiem::PM,
            Meridiem::PM => Meridiem::AM,
        }
    }
}

impl std::fmt::Display for Meridiem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Meridiem::AM => write!(f, "AM"),
            Meridiem::PM => write!(f, "PM"),
        }
    }
}

/// A position on the 12-hour dial
///
/// Derived on demand from an angle; hour is in [0, 12) and minute in [0, 60).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ClockTime {
    pub hour: u32,
    pub minute: u32,
}

impl ClockTime {
    pub const fn new(hour: u32, minute: u32) -> Self {
        Self { hour, minute }
    }

    /// Minutes past the dial's 12 o'clock mark
    pub fn total_minutes(&self) -> u32 {
        self.hour * 60 + self.minute
    }

    /// Resolve the dial position to a wall-clock time
    pub fn to_naive_time(&self, meridiem: Meridiem) -> Option<NaiveTime> {
        let hour24 = match meridiem {
            Meridiem::AM => self.hour,
            Meridiem::PM => self.hour + 12,
        };
        NaiveTime::from_hms_opt(hour24, self.minute, 0)
    }

    /// Interpret this value as a span rather than a position
    pub fn as_duration(&self) -> Duration {
        Duration::minutes(i64::from(self.total_minutes()))
    }
}

impl std::fmt::Display for ClockTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

/// Normalize an angle into [0, 360)
pub fn normalize_degrees(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(360.0);
    // rem_euclid rounds tiny negative inputs up to exactly 360.0
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}

/// Convert a dial angle in degrees into an hour and minute
///
/// Minutes are rounded to the nearest whole minute; a minute that rounds up
/// to 60 carries into the hour.
pub fn angle_to_time(angle: f64) -> ClockTime {
    let angle = normalize_degrees(angle);

    let (hour, minute) = if angle.abs() < DEGREES_PER_HOUR {
        (0_i64, (angle / DEGREES_PER_HOUR * 60.0).round() as i64)
    } else {
        (
            (angle / DEGREES_PER_HOUR).floor() as i64,
            ((angle % DEGREES_PER_HOUR) / DEGREES_PER_HOUR * 60.0).round() as i64,
        )
    };

    let hour = (hour + minute.div_euclid(60)).rem_euclid(12);
    let minute = minute.rem_euclid(60);

    ClockTime::new(hour as u32, minute as u32)
}

/// Clockwise span from `start` to `end`, as a duration on the dial
pub fn span_to_time(start: f64, end: f64) -> ClockTime {
    angle_to_time(end - start)
}

/// Format a dial position as zero-padded "HH:MM"
pub fn format_clock(time: ClockTime) -> String {
    time.to_string()
}

/// Format a span as "H HR M MIN"
pub fn format_duration(time: ClockTime) -> String {
    format!("{} HR {} MIN", time.hour, time.minute)
}
