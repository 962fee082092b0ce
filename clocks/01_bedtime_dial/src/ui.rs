//! UI module for the Bedtime Dial
//!
//! Provides the schedule panel (resolved wall-clock times, AM/PM choice) and
//! the dial settings panel using egui.

use alarm_dial::{ClockTime, DialSettings, Meridiem};
use nannou_egui::egui;

/// Values the schedule panel displays
pub struct ScheduleView<'a> {
    pub bed: ClockTime,
    pub wake: ClockTime,
    pub duration_label: &'a str,
}

/// Result of panel interactions
#[derive(Default)]
pub struct PanelResult {
    /// A persisted setting changed
    pub settings_changed: bool,
    /// Handle size changed; dial geometry needs rebuilding
    pub geometry_changed: bool,
    /// Ring-drag option changed
    pub options_changed: bool,
    /// Put both handles back at their configured defaults
    pub reset_dial: bool,
}

/// Format a dial position as a wall-clock time, e.g. "10:30 PM"
pub fn wall_clock(time: ClockTime, meridiem: Meridiem) -> String {
    match time.to_naive_time(meridiem) {
        Some(t) => t.format("%I:%M %p").to_string(),
        None => format!("{} {}", time, meridiem),
    }
}

/// Draw the schedule panel (top left)
pub fn draw_schedule_panel(
    ctx: &egui::Context,
    view: &ScheduleView<'_>,
    settings: &mut DialSettings,
) -> PanelResult {
    let mut result = PanelResult::default();

    egui::Window::new("Schedule")
        .collapsible(true)
        .resizable(false)
        .default_width(220.0)
        .anchor(egui::Align2::LEFT_TOP, [10.0, 10.0])
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label("Bedtime:");
                ui.label(
                    egui::RichText::new(wall_clock(view.bed, settings.bed_meridiem))
                        .size(16.0)
                        .strong(),
                );
                if ui.small_button(settings.bed_meridiem.toggled().to_string()).clicked() {
                    settings.bed_meridiem = settings.bed_meridiem.toggled();
                    result.settings_changed = true;
                }
            });

            ui.horizontal(|ui| {
                ui.label("Wake:");
                ui.label(
                    egui::RichText::new(wall_clock(view.wake, settings.wake_meridiem))
                        .size(16.0)
                        .strong(),
                );
                if ui.small_button(settings.wake_meridiem.toggled().to_string()).clicked() {
                    settings.wake_meridiem = settings.wake_meridiem.toggled();
                    result.settings_changed = true;
                }
            });

            ui.separator();
            ui.label(
                egui::RichText::new(view.duration_label)
                    .color(egui::Color32::from_rgb(254, 170, 44)),
            );
        });

    result
}

/// Draw the settings panel (bottom right)
pub fn draw_settings_panel(ctx: &egui::Context, settings: &mut DialSettings) -> PanelResult {
    let mut result = PanelResult::default();

    egui::Window::new("Settings")
        .collapsible(true)
        .resizable(false)
        .default_width(220.0)
        .anchor(egui::Align2::RIGHT_BOTTOM, [-10.0, -10.0])
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label("Handle size:");
                let old_width = settings.icon_width;
                ui.add(egui::Slider::new(&mut settings.icon_width, 24.0..=64.0).show_value(true))
                    .on_hover_text("Diameter of the bedtime and wake handles");
                if (settings.icon_width - old_width).abs() > 0.01 {
                    result.geometry_changed = true;
                    result.settings_changed = true;
                }
            });

            let ring_response = ui
                .checkbox(&mut settings.drag_ring_on_band_touch, "Drag ring from band (R)")
                .on_hover_text("Touching the ring away from a handle moves both handles");
            if ring_response.changed() {
                result.options_changed = true;
                result.settings_changed = true;
            }
            ui.label("Shift+drag always moves the whole ring");

            ui.separator();
            if ui.button("Reset handles").clicked() {
                result.reset_dial = true;
            }
        });

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wall_clock_resolves_meridiem() {
        assert_eq!(wall_clock(ClockTime::new(10, 30), Meridiem::PM), "10:30 PM");
        assert_eq!(wall_clock(ClockTime::new(7, 5), Meridiem::AM), "07:05 AM");
        // Dial midnight position reads as twelve
        assert_eq!(wall_clock(ClockTime::new(0, 0), Meridiem::AM), "12:00 AM");
    }
}
