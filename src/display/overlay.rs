//! Boxed notices and full-screen prompts.

use core::fmt::Write;

use embedded_graphics::pixelcolor::{Rgb565, RgbColor};
use heapless::String;

use super::surface::Surface;

/// A short message drawn over the current screen and held for a fixed time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Notice {
    /// Motion refused because the rail is not homed.
    NotHomed,
    /// Stack plan yields no shots.
    InvalidStack,
    /// The rig is out with the stack sequencer.
    Busy,
    /// Settings record written.
    Saved,
    /// Settings record could not be written.
    SaveFailed,
    /// Homing confirmed.
    Homed,
    /// Stop request acknowledged.
    Stopping,
    /// Factory defaults applied.
    DefaultsRestored,
    /// A motion or trigger operation failed.
    Fault,
}

struct Layout {
    x: i32,
    y: i32,
    w: u32,
    h: u32,
    fg: Rgb565,
    bg: Rgb565,
    lines: Lines,
    hold_ms: u32,
}

type Lines = &'static [(i32, i32, &'static str)];

fn warning(lines: Lines, hold_ms: u32) -> Layout {
    Layout {
        x: 10,
        y: 60,
        w: 108,
        h: 40,
        fg: Rgb565::WHITE,
        bg: Rgb565::RED,
        lines,
        hold_ms,
    }
}

fn confirmation(lines: Lines, hold_ms: u32) -> Layout {
    Layout {
        x: 20,
        y: 60,
        w: 88,
        h: 25,
        fg: Rgb565::BLACK,
        bg: Rgb565::GREEN,
        lines,
        hold_ms,
    }
}

impl Notice {
    fn layout(self) -> Layout {
        match self {
            Notice::NotHomed => warning(&[(15, 70, "RAIL NOT HOMED!"), (20, 85, "Home first")], 2000),
            Notice::InvalidStack => warning(&[(15, 70, "INVALID STACK"), (20, 85, "Check settings")], 2000),
            Notice::Busy => warning(&[(15, 70, "RAIL BUSY"), (20, 85, "Stack running")], 1000),
            Notice::SaveFailed => warning(&[(15, 70, "SAVE FAILED"), (20, 85, "Check storage")], 2000),
            Notice::Fault => warning(&[(15, 70, "MOTION FAULT"), (20, 85, "See log")], 2000),
            Notice::Saved => confirmation(&[(30, 64, "SETTINGS"), (35, 74, "SAVED!")], 1500),
            Notice::DefaultsRestored => confirmation(&[(30, 64, "DEFAULTS"), (30, 74, "RESTORED")], 1500),
            Notice::Homed => Layout {
                y: 110,
                h: 15,
                lines: &[(35, 114, "HOMED!")],
                ..confirmation(&[], 1500)
            },
            Notice::Stopping => Layout {
                x: 20,
                w: 88,
                lines: &[(35, 70, "STOPPING..."), (30, 85, "Please wait")],
                ..warning(&[], 1000)
            },
        }
    }

    /// How long the notice stays up.
    pub fn hold_ms(self) -> u32 {
        self.layout().hold_ms
    }

    /// Draw the notice box over whatever is on screen.
    pub fn draw<S: Surface>(self, surface: &mut S) {
        let layout = self.layout();
        surface.fill_rect(layout.x, layout.y, layout.w, layout.h, layout.bg);
        for &(x, y, text) in layout.lines {
            surface.draw_text(x, y, text, layout.fg, layout.bg);
        }
    }
}

/// Box shown while the shutter is held.
pub fn draw_trigger_indicator<S: Surface>(surface: &mut S) {
    surface.fill_rect(30, 70, 68, 20, Rgb565::GREEN);
    surface.draw_text(40, 76, "TRIGGER!", Rgb565::BLACK, Rgb565::GREEN);
}

/// Full-screen homing instructions.
pub fn draw_homing_prompt<S: Surface>(surface: &mut S) {
    surface.clear(Rgb565::BLACK);
    surface.draw_text(30, 60, "HOMING...", Rgb565::YELLOW, Rgb565::BLACK);
    surface.draw_text(10, 80, "Move to position 0", Rgb565::WHITE, Rgb565::BLACK);
    surface.draw_text(16, 95, "Press when ready", Rgb565::WHITE, Rgb565::BLACK);
}

/// Full-screen stack start confirmation.
pub fn draw_confirm_prompt<S: Surface>(surface: &mut S, shots: u32, range_mm: f32, timeout_ms: u32) {
    surface.clear(Rgb565::BLACK);
    surface.draw_text(28, 40, "START STACK?", Rgb565::YELLOW, Rgb565::BLACK);

    let mut line: String<32> = String::new();
    let _ = write!(line, "{} shots", shots);
    surface.draw_text(34, 60, &line, Rgb565::WHITE, Rgb565::BLACK);

    line.clear();
    let _ = write!(line, "{:.2}mm range", range_mm);
    surface.draw_text(28, 75, &line, Rgb565::WHITE, Rgb565::BLACK);

    surface.draw_text(15, 100, "Press: Start", Rgb565::GREEN, Rgb565::BLACK);
    line.clear();
    let _ = write!(line, "Wait {}s: Cancel", timeout_ms / 1000);
    surface.draw_text(15, 115, &line, Rgb565::RED, Rgb565::BLACK);
}

/// Full-screen stack completion, waiting for acknowledgment.
pub fn draw_complete_prompt<S: Surface>(surface: &mut S, shots: u32) {
    surface.clear(Rgb565::BLACK);
    surface.draw_text(20, 60, "STACK COMPLETE!", Rgb565::GREEN, Rgb565::BLACK);

    let mut line: String<32> = String::new();
    let _ = write!(line, "{} shots taken", shots);
    surface.draw_text(20, 80, &line, Rgb565::WHITE, Rgb565::BLACK);

    surface.draw_text(14, 100, "Press to continue", Rgb565::CYAN, Rgb565::BLACK);
}

#[cfg(all(test, feature = "std"))]
mod tests {
    use super::*;
    use crate::sim::RecordingSurface;

    #[test]
    fn test_hold_times() {
        assert_eq!(Notice::NotHomed.hold_ms(), 2000);
        assert_eq!(Notice::Saved.hold_ms(), 1500);
        assert_eq!(Notice::Stopping.hold_ms(), 1000);
        assert_eq!(Notice::Homed.hold_ms(), 1500);
    }

    #[test]
    fn test_notice_draws_box_and_text() {
        let mut surface = RecordingSurface::new();
        Notice::NotHomed.draw(&mut surface);
        assert_eq!(surface.shapes(), 1);
        assert_eq!(surface.texts(), vec!["RAIL NOT HOMED!", "Home first"]);
    }

    #[test]
    fn test_confirm_prompt_shows_plan() {
        let mut surface = RecordingSurface::new();
        draw_confirm_prompt(&mut surface, 201, 10.0, 10_000);
        assert!(surface.shows("201 shots"));
        assert!(surface.shows("10.00mm range"));
        assert!(surface.shows("Wait 10s"));
    }
}
