//! Drawing module - ring, sleep sector and handle rendering
//!
//! Converts the dial core's view-local (y-down) coordinates into nannou's
//! centered y-up space and paints them with nannou's Draw API.

use alarm_dial::{dial_point, AlarmDial, DialGeometry, DialSettings, DragTarget, HandlePose, Point};
use nannou::prelude::*;

/// Color palette for the bedtime dial theme
#[allow(dead_code)]
pub mod colors {
    use nannou::prelude::*;

    pub const BACKGROUND: Srgb<u8> = Srgb {
        red: 0,
        green: 0,
        blue: 0,
        standard: std::marker::PhantomData,
    };
    /// Unselected ring track
    pub const RING: Srgb<u8> = Srgb {
        red: 18,
        green: 18,
        blue: 18,
        standard: std::marker::PhantomData,
    };
    /// Sleep sector fill
    pub const SECTOR: Srgb<u8> = Srgb {
        red: 254,
        green: 170,
        blue: 44,
        standard: std::marker::PhantomData,
    };
    /// Face inside the ring
    pub const FACE: Srgb<u8> = Srgb {
        red: 28,
        green: 28,
        blue: 30,
        standard: std::marker::PhantomData,
    };
    pub const TICK: Srgb<u8> = Srgb {
        red: 110,
        green: 110,
        blue: 115,
        standard: std::marker::PhantomData,
    };
    pub const HANDLE: Srgb<u8> = Srgb {
        red: 40,
        green: 40,
        blue: 42,
        standard: std::marker::PhantomData,
    };
    pub const HANDLE_ACTIVE: Srgb<u8> = Srgb {
        red: 255,
        green: 220,
        blue: 120,
        standard: std::marker::PhantomData,
    };
    pub const TEXT_PRIMARY: Srgb<u8> = Srgb {
        red: 240,
        green: 240,
        blue: 240,
        standard: std::marker::PhantomData,
    };
    pub const TEXT_SECONDARY: Srgb<u8> = Srgb {
        red: 150,
        green: 150,
        blue: 155,
        standard: std::marker::PhantomData,
    };
}

/// Where the dial sits in the window
#[derive(Debug, Clone, Copy)]
pub struct DialLayout {
    /// Dial center in window coordinates
    pub center: Point2,
    /// Geometry handed to the dial core (view-local)
    pub geometry: DialGeometry,
}

impl DialLayout {
    pub fn calculate(window_rect: Rect, settings: &DialSettings) -> Self {
        let min_dim = window_rect.w().min(window_rect.h()) as f64;
        // Leave room for the readout under the dial
        let center = pt2(window_rect.x(), window_rect.y() + 30.0);
        Self {
            center,
            geometry: settings.geometry_for(min_dim),
        }
    }

    fn radius(&self) -> f32 {
        self.geometry.radius as f32
    }

    /// Window position to the dial's view-local coordinates
    pub fn to_local(&self, p: Point2) -> Point {
        let r = self.radius();
        Point::new(
            (p.x - (self.center.x - r)) as f64,
            ((self.center.y + r) - p.y) as f64,
        )
    }

    /// View-local position back to window coordinates
    pub fn to_window(&self, p: Point) -> Point2 {
        let r = self.radius();
        pt2(
            p.x as f32 + self.center.x - r,
            self.center.y + r - p.y as f32,
        )
    }
}

/// Draw the ring, the filled sleep sector, the hour ticks and both handles
pub fn draw_dial(draw: &Draw, layout: &DialLayout, dial: &AlarmDial, dragging: bool) {
    let radius = layout.radius();
    let icon_width = layout.geometry.icon_width as f32;

    // Ring track
    draw.ellipse()
        .xy(layout.center)
        .radius(radius)
        .color(colors::RING);

    draw_sector(draw, layout, dial);

    // Face covers the sector's inner part so only the band shows
    draw.ellipse()
        .xy(layout.center)
        .radius(radius - icon_width)
        .color(colors::FACE);

    draw_hour_ticks(draw, layout, radius - icon_width);

    let active = if dragging { Some(dial.drag_target()) } else { None };
    draw_handle(
        draw,
        layout,
        &dial.start_handle(),
        icon_width,
        active == Some(DragTarget::Start),
        "Z",
    );
    draw_handle(
        draw,
        layout,
        &dial.end_handle(),
        icon_width,
        active == Some(DragTarget::End),
        "!",
    );
}

/// Fill the arc descriptor as a pie slice
fn draw_sector(draw: &Draw, layout: &DialLayout, dial: &AlarmDial) {
    let arc = dial.current_arc_path();
    let sweep = arc.sweep_deg();
    if sweep <= 0.0 {
        return;
    }

    let segments = ((sweep / 2.0).ceil() as usize).max(2);
    let mut points = Vec::with_capacity(segments + 2);
    points.push(layout.to_window(arc.center));
    for i in 0..=segments {
        let angle = arc.start_angle_deg + sweep * i as f64 / segments as f64;
        points.push(layout.to_window(dial_point(arc.center, arc.radius, angle)));
    }

    draw.polygon().color(colors::SECTOR).points(points);
}

/// Twelve hour ticks, majors at 12, 3, 6 and 9
fn draw_hour_ticks(draw: &Draw, layout: &DialLayout, face_radius: f32) {
    let center = layout.center;
    for i in 0..12 {
        // Start at 12 o'clock (PI/2) and go clockwise (subtract angle)
        let angle = PI / 2.0 - (i as f32 / 12.0) * TAU;
        let is_major = i % 3 == 0;
        let length = if is_major { 14.0 } else { 7.0 };
        let dir = vec2(angle.cos(), angle.sin());

        draw.line()
            .start(center + dir * (face_radius - 6.0 - length))
            .end(center + dir * (face_radius - 6.0))
            .color(colors::TICK)
            .weight(if is_major { 2.0 } else { 1.0 });

        if is_major {
            let label = if i == 0 { 12 } else { i };
            draw.text(&label.to_string())
                .xy(center + dir * (face_radius - 36.0))
                .color(colors::TEXT_SECONDARY)
                .font_size(16)
                .w(40.0);
        }
    }
}

/// Draw one handle icon, kept upright by its counter-spin
fn draw_handle(
    draw: &Draw,
    layout: &DialLayout,
    pose: &HandlePose,
    icon_width: f32,
    active: bool,
    glyph: &str,
) {
    let pos = layout.to_window(pose.center);
    let tilt = (pose.revolution_deg + pose.spin_deg) as f32;
    let color = if active {
        colors::HANDLE_ACTIVE
    } else {
        colors::HANDLE
    };

    draw.ellipse()
        .xy(pos)
        .radius(icon_width / 2.0 - 2.0)
        .color(color);

    draw.translate(vec3(pos.x, pos.y, 0.0))
        .rotate(-tilt.to_radians())
        .text(glyph)
        .color(colors::SECTOR)
        .font_size((icon_width * 0.45) as u32)
        .w(icon_width);
}

/// Duration readout in the middle of the face
pub fn draw_duration(draw: &Draw, layout: &DialLayout, label: &str) {
    draw.text(label)
        .xy(layout.center)
        .color(colors::TEXT_PRIMARY)
        .font_size(22)
        .w(layout.radius() * 1.5);
}

/// Bedtime and wake readout under the dial
pub fn draw_times(draw: &Draw, layout: &DialLayout, bed: &str, wake: &str) {
    let y = layout.center.y - layout.radius() - 40.0;
    let offset = layout.radius() * 0.6;

    draw.text("BEDTIME")
        .xy(pt2(layout.center.x - offset, y + 18.0))
        .color(colors::TEXT_SECONDARY)
        .font_size(12)
        .w(160.0);
    draw.text(bed)
        .xy(pt2(layout.center.x - offset, y - 8.0))
        .color(colors::TEXT_PRIMARY)
        .font_size(28)
        .w(160.0);

    draw.text("WAKE")
        .xy(pt2(layout.center.x + offset, y + 18.0))
        .color(colors::TEXT_SECONDARY)
        .font_size(12)
        .w(160.0);
    draw.text(wake)
        .xy(pt2(layout.center.x + offset, y - 8.0))
        .color(colors::TEXT_PRIMARY)
        .font_size(28)
        .w(160.0);
}
