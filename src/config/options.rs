//! Runtime tuning for the input path and menu task.

use serde::Deserialize;

/// Menu task timing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct MenuOptions {
    /// Menu loop period; also the progress refresh rate.
    pub tick_ms: u32,
    /// Presses closer than this to the last accepted press are ignored.
    pub press_debounce_ms: u32,
    /// How long the stack confirmation prompt waits for a press.
    pub confirm_timeout_ms: u32,
    /// Merge bursts of same-direction rotation into one event.
    pub coalesce_rotation: bool,
    /// Quiet period that closes a rotation burst.
    pub coalesce_window_ms: u32,
}

impl Default for MenuOptions {
    fn default() -> Self {
        Self {
            tick_ms: 50,
            press_debounce_ms: 200,
            confirm_timeout_ms: 10_000,
            coalesce_rotation: false,
            coalesce_window_ms: 150,
        }
    }
}

/// Encoder decoding parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DecoderOptions {
    /// Valid quadrature transitions per mechanical detent.
    pub transitions_per_detent: u8,
    /// Minimum spacing between accepted button edges.
    pub button_refractory_ms: u32,
}

impl Default for DecoderOptions {
    fn default() -> Self {
        Self {
            transitions_per_detent: 4,
            button_refractory_ms: 50,
        }
    }
}
