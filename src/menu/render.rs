//! Screen rendering.
//!
//! Draws one full frame for the current session through a [`Surface`].
//! Item rows come from the screen tables; values are formatted from the
//! records borrowed in a [`View`].

use core::fmt::Write;

use embedded_graphics::pixelcolor::RgbColor;
use heapless::String;

use super::screen::{Field, ItemKind, MenuItem, Readout, Screen, Toggle};
use crate::config::{RailConfig, StackPlan, SystemSettings};
use crate::display::{Rgb565, Surface, CANVAS_WIDTH};

/// Left margin of list rows and status lines.
const MARGIN_X: i32 = 5;
/// Rule under the title.
const RULE_Y: i32 = 15;

type Line = String<32>;

/// Everything a frame depends on.
#[derive(Debug, Clone, Copy)]
pub struct View<'a> {
    /// Screen to draw.
    pub screen: Screen,
    /// Highlighted row.
    pub selection: usize,
    /// Whether the highlighted row is being edited.
    pub edit_mode: bool,
    /// Rail record.
    pub rail: &'a RailConfig,
    /// Stack plan, including live progress while a stack runs.
    pub plan: &'a StackPlan,
    /// System settings.
    pub settings: &'a SystemSettings,
    /// Pending go-to target on the manual screen.
    pub move_target_mm: f32,
}

/// Draw a complete frame for `view`.
pub fn render_screen<S: Surface>(surface: &mut S, view: &View<'_>) {
    let spec = view.screen.spec();

    surface.clear(Rgb565::BLACK);
    surface.draw_text(spec.title_x, 5, spec.title, Rgb565::WHITE, Rgb565::BLACK);
    surface.draw_line(0, RULE_Y, CANVAS_WIDTH as i32, RULE_Y, Rgb565::WHITE);

    if view.screen == Screen::StackProgress {
        render_progress(surface, view);
        return;
    }

    for (index, item) in spec.items.iter().enumerate() {
        let selected = index == view.selection;
        let y = spec.first_row_y + spec.row_pitch * index as i32;
        let line = item_line(item, selected, selected && view.edit_mode, view);
        let (fg, bg) = row_colors(item, selected);
        surface.draw_text(MARGIN_X, y, &line, fg, bg);
    }

    render_status(surface, view);
}

fn row_colors(item: &MenuItem, selected: bool) -> (Rgb565, Rgb565) {
    match (item.accent, selected) {
        (true, true) => (Rgb565::BLACK, Rgb565::GREEN),
        (true, false) => (Rgb565::GREEN, Rgb565::BLACK),
        (false, true) => (Rgb565::YELLOW, Rgb565::BLUE),
        (false, false) => (Rgb565::WHITE, Rgb565::BLACK),
    }
}

fn item_line(item: &MenuItem, selected: bool, editing: bool, view: &View<'_>) -> Line {
    let mut line = Line::new();
    let prefix = if editing {
        "* "
    } else if selected {
        "> "
    } else {
        "  "
    };
    let _ = line.push_str(prefix);
    let _ = line.push_str(item.label);

    match item.kind {
        ItemKind::Edit(field) => {
            let _ = line.push_str(": ");
            let _ = write_field(&mut line, field, view);
        }
        ItemKind::Toggle(toggle) => {
            let on = match toggle {
                Toggle::Beep => view.settings.beep_enabled,
                Toggle::ReverseDirection => view.plan.reverse_direction,
                Toggle::ReturnToStart => view.plan.return_to_start,
            };
            let _ = line.push_str(if on { ": ON" } else { ": OFF" });
        }
        ItemKind::Readout(Readout::TotalShots) => {
            let _ = write!(line, ": {}", view.plan.total_shots());
        }
        ItemKind::Nav(_) | ItemKind::Action(_) => {}
    }
    line
}

fn write_field(line: &mut Line, field: Field, view: &View<'_>) -> core::fmt::Result {
    let rail = view.rail;
    let plan = view.plan;
    let settings = view.settings;
    match field {
        Field::Jog => write!(line, "{:.3}mm", rail.current_position_mm),
        Field::MoveTarget => write!(line, "{:.3}mm", view.move_target_mm),
        Field::RailStepSize => write!(line, "{:.2}um", rail.step_size_microns),
        Field::StackStart => write!(line, "{:.3}mm", plan.start_mm()),
        Field::StackEnd => write!(line, "{:.3}mm", plan.end_mm()),
        Field::StackStep => write!(line, "{:.1}um", plan.step_microns()),
        Field::StackDelay => write!(line, "{}ms", plan.delay_ms),
        Field::Brightness => write!(line, "{}%", settings.brightness),
        Field::TriggerDuration => write!(line, "{}ms", settings.trigger_duration_ms),
        Field::SettlingTime => write!(line, "{}ms", settings.settling_time_ms),
        Field::Backlash => write!(line, "{:.1}um", settings.backlash_microns),
        Field::Sensitivity => write!(line, "{}x", settings.encoder_sensitivity),
        Field::StepsPerMm => write!(line, "{}", rail.steps_per_mm),
        Field::MaxTravel => write!(line, "{:.1}mm", rail.max_travel_mm),
    }
}

fn render_status<S: Surface>(surface: &mut S, view: &View<'_>) {
    let mut line = Line::new();
    match view.screen {
        Screen::Main => {
            let homed = if view.rail.homed { "HOMED" } else { "NOT HOMED" };
            let _ = write!(line, "Pos: {:.3}mm {}", view.rail.current_position_mm, homed);
            surface.draw_text(MARGIN_X, 145, &line, Rgb565::GREEN, Rgb565::BLACK);
        }
        Screen::ManualControl => {
            let _ = write!(line, "{:.3} mm", view.rail.current_position_mm);
            surface.draw_text(25, 25, &line, Rgb565::CYAN, Rgb565::BLACK);
            surface.draw_text(MARGIN_X, 125, "Rotate: Move/Adjust", Rgb565::GREEN, Rgb565::BLACK);
            surface.draw_text(MARGIN_X, 135, "Press: Select/Execute", Rgb565::GREEN, Rgb565::BLACK);
        }
        Screen::AutoStack => {
            let _ = write!(line, "Distance: {:.3}mm", view.plan.distance().0);
            surface.draw_text(MARGIN_X, 145, &line, Rgb565::CYAN, Rgb565::BLACK);
        }
        Screen::Calibration => {
            let _ = write!(line, "Pos: {:.3}mm", view.rail.current_position_mm);
            surface.draw_text(MARGIN_X, 140, &line, Rgb565::GREEN, Rgb565::BLACK);
        }
        Screen::Advanced => {
            surface.draw_text(MARGIN_X, 140, "Under Development", Rgb565::CYAN, Rgb565::BLACK);
        }
        Screen::Settings | Screen::StackProgress => {}
    }
}

fn render_progress<S: Surface>(surface: &mut S, view: &View<'_>) {
    let plan = view.plan;
    let total = plan.total_shots();
    let taken = plan.shots_taken.min(total);

    surface.draw_rect(10, 30, 108, 20, Rgb565::WHITE);
    if total > 0 {
        let width = taken * 100 / total;
        surface.fill_rect(12, 32, width, 16, Rgb565::GREEN);
    }

    let mut line = Line::new();
    let _ = write!(line, "{} / {} shots", taken, total);
    surface.draw_text(25, 60, &line, Rgb565::CYAN, Rgb565::BLACK);

    line.clear();
    let _ = write!(line, "Position: {:.3}mm", view.rail.current_position_mm);
    surface.draw_text(15, 80, &line, Rgb565::WHITE, Rgb565::BLACK);

    let eta_s = plan.remaining_shots() as u64 * plan.delay_ms as u64 / 1000;
    line.clear();
    let _ = write!(line, "ETA: {}:{:02}", eta_s / 60, eta_s % 60);
    surface.draw_text(30, 100, &line, Rgb565::YELLOW, Rgb565::BLACK);

    surface.draw_text(15, 130, "Press to STOP", Rgb565::RED, Rgb565::BLACK);
}
