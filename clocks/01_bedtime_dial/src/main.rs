//! Bedtime Dial
//!
//! A sleep schedule picker: drag the bedtime and wake handles around a
//! twelve-hour ring and read off both times and the sleep duration. The dial
//! core does the angle work; this app only feeds it pointer input and paints
//! what it reports.

mod drawing;
mod ui;

use std::sync::mpsc::{self, Receiver, Sender};

use alarm_dial::{AlarmDial, DialSettings};
use nannou::prelude::*;
use nannou_egui::{self, Egui};
use tracing_subscriber::EnvFilter;

use crate::drawing::{colors, draw_dial, draw_duration, draw_times, DialLayout};
use crate::ui::{draw_schedule_panel, draw_settings_panel, ScheduleView};

const CLOCK_NAME: &str = "bedtime_dial";

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    nannou::app(model).update(update).run();
}

/// Application state
struct Model {
    /// The dial core
    dial: AlarmDial,
    /// Persisted preferences
    settings: DialSettings,
    /// Current placement of the dial in the window
    layout: DialLayout,
    /// Times reported by the dial's listener
    times_tx: Sender<(String, String)>,
    times_rx: Receiver<(String, String)>,
    bed_time: String,
    wake_time: String,
    /// Whether the primary pointer is down on the window
    is_pointer_down: bool,
    /// egui integration
    egui: Egui,
}

impl Model {
    /// Rebuild the dial at the configured default angles
    fn reset_dial(&mut self) {
        match build_dial(&self.settings, &self.layout, self.times_tx.clone()) {
            Ok(dial) => self.dial = dial,
            Err(e) => tracing::warn!("Failed to reset dial: {}", e),
        }
    }

    /// Pick up the latest times the dial reported
    fn drain_times(&mut self) {
        while let Ok((bed, wake)) = self.times_rx.try_recv() {
            self.bed_time = bed;
            self.wake_time = wake;
        }
    }

    /// Keep the dial geometry in step with the window
    fn relayout(&mut self, window_rect: Rect) {
        let layout = DialLayout::calculate(window_rect, &self.settings);
        self.layout = layout;
        if layout.geometry != self.dial.geometry() {
            if let Err(e) = self.dial.set_geometry(layout.geometry) {
                tracing::warn!("Dial geometry rejected: {}", e);
            }
        }
    }

    fn pointer_down(&mut self, pos: Point2, whole_ring: bool) {
        self.is_pointer_down = true;
        self.dial.on_touch_down(self.layout.to_local(pos));
        if whole_ring {
            self.dial.grab_whole_ring();
        }
    }

    fn pointer_moved(&mut self, pos: Point2) {
        if self.is_pointer_down {
            self.dial.on_touch_move(self.layout.to_local(pos));
        }
    }

    fn pointer_up(&mut self, pos: Point2) {
        if self.is_pointer_down {
            self.is_pointer_down = false;
            self.dial.on_touch_up(self.layout.to_local(pos));
        }
    }

    fn pointer_cancelled(&mut self) {
        if self.is_pointer_down {
            self.is_pointer_down = false;
            self.dial.on_touch_cancel();
        }
    }
}

fn build_dial(
    settings: &DialSettings,
    layout: &DialLayout,
    times_tx: Sender<(String, String)>,
) -> Result<AlarmDial, alarm_dial::DialError> {
    let dial = AlarmDial::with_listener(
        settings.default_bed_angle,
        settings.default_wake_angle,
        layout.geometry,
        move |bed: &str, wake: &str| {
            // Receiver lives as long as the model
            let _ = times_tx.send((bed.to_string(), wake.to_string()));
        },
    )?;
    Ok(dial.with_options(settings.options()))
}

fn save_settings(settings: &DialSettings) {
    if let Err(e) = alarm_dial::save_config(CLOCK_NAME, settings) {
        tracing::warn!("Failed to save config: {}", e);
    }
}

fn model(app: &App) -> Model {
    // Create window
    let window_id = app
        .new_window()
        .title("Bedtime Dial")
        .size(700, 800)
        .min_size(420, 520)
        .view(view)
        .key_pressed(key_pressed)
        .mouse_pressed(mouse_pressed)
        .mouse_released(mouse_released)
        .mouse_moved(mouse_moved)
        .raw_event(raw_window_event)
        .build()
        .unwrap();

    let window = app.window(window_id).unwrap();
    let egui = Egui::from_window(&window);

    // Load configuration
    let settings = alarm_dial::load_settings(CLOCK_NAME).unwrap_or_else(|e| {
        tracing::warn!("Using default settings: {}", e);
        DialSettings::default()
    });

    let layout = DialLayout::calculate(app.window_rect(), &settings);
    let (times_tx, times_rx) = mpsc::channel();
    let dial = build_dial(&settings, &layout, times_tx.clone())
        .expect("validated settings always build a dial");

    let mut model = Model {
        dial,
        settings,
        layout,
        times_tx,
        times_rx,
        bed_time: String::new(),
        wake_time: String::new(),
        is_pointer_down: false,
        egui,
    };
    model.drain_times();
    tracing::info!(bed = %model.bed_time, wake = %model.wake_time, "bedtime dial ready");
    model
}

fn update(app: &App, model: &mut Model, update: Update) {
    model.relayout(app.window_rect());
    model.drain_times();

    // Begin egui frame
    model.egui.set_elapsed_time(update.since_start);
    let ctx = model.egui.begin_frame();

    let schedule = ScheduleView {
        bed: model.dial.bed_clock_time(),
        wake: model.dial.wake_clock_time(),
        duration_label: model.dial.duration_label(),
    };
    let schedule_result = draw_schedule_panel(&ctx, &schedule, &mut model.settings);
    let settings_result = draw_settings_panel(&ctx, &mut model.settings);

    drop(ctx);

    // Apply UI results
    if settings_result.geometry_changed {
        model.relayout(app.window_rect());
    }
    if settings_result.options_changed {
        model.dial.set_options(model.settings.options());
    }
    if settings_result.reset_dial {
        model.reset_dial();
    }
    if schedule_result.settings_changed || settings_result.settings_changed {
        save_settings(&model.settings);
    }
    model.drain_times();
}

fn view(app: &App, model: &Model, frame: Frame) {
    let draw = app.draw();
    let window_rect = app.window_rect();

    draw.background().color(colors::BACKGROUND);

    draw_dial(&draw, &model.layout, &model.dial, model.is_pointer_down);
    draw_duration(&draw, &model.layout, model.dial.duration_label());
    draw_times(&draw, &model.layout, &model.bed_time, &model.wake_time);

    // Draw title
    draw.text("BEDTIME DIAL")
        .x_y(0.0, window_rect.top() - 25.0)
        .color(colors::TEXT_PRIMARY)
        .font_size(18)
        .w(300.0);

    // Render to frame
    draw.to_frame(app, &frame).unwrap();

    // Render egui on top
    model.egui.draw_to_frame(&frame).unwrap();
}

fn key_pressed(_app: &App, model: &mut Model, key: Key) {
    match key {
        // R toggles dragging the ring from the band
        Key::R => {
            model.settings.drag_ring_on_band_touch = !model.settings.drag_ring_on_band_touch;
            model.dial.set_options(model.settings.options());
            save_settings(&model.settings);
        }
        // Escape abandons the drag in progress, keeping where it got to
        Key::Escape => model.pointer_cancelled(),
        _ => {}
    }
}

fn mouse_pressed(app: &App, model: &mut Model, button: MouseButton) {
    if button == MouseButton::Left {
        model.pointer_down(app.mouse.position(), app.keys.mods.shift());
    }
}

fn mouse_released(app: &App, model: &mut Model, button: MouseButton) {
    if button == MouseButton::Left {
        model.pointer_up(app.mouse.position());
    }
}

fn mouse_moved(_app: &App, model: &mut Model, pos: Point2) {
    model.pointer_moved(pos);
}

fn raw_window_event(app: &App, model: &mut Model, event: &nannou::winit::event::WindowEvent) {
    model.egui.handle_raw_event(event);

    // Handle touch events (map to mouse-like behavior)
    if let nannou::winit::event::WindowEvent::Touch(touch) = event {
        let window_rect = app.window_rect();

        // Convert touch position to nannou coordinates
        let pos = pt2(
            touch.location.x as f32 - window_rect.w() / 2.0,
            window_rect.h() / 2.0 - touch.location.y as f32,
        );

        match touch.phase {
            nannou::winit::event::TouchPhase::Started => model.pointer_down(pos, false),
            nannou::winit::event::TouchPhase::Moved => model.pointer_moved(pos),
            nannou::winit::event::TouchPhase::Ended => model.pointer_up(pos),
            nannou::winit::event::TouchPhase::Cancelled => model.pointer_cancelled(),
        }
    }
}
