//! Quadrature decoding.
//!
//! The two channel levels form a 2-bit state `(A << 1) | B`. The previous
//! and current states index a 16-entry transition table yielding the
//! direction of a single transition.

/// Direction of every `(previous << 2) | current` transition.
///
/// Identical consecutive states and double steps (both channels changing
/// at once) are invalid and yield 0.
pub const TRANSITIONS: [i8; 16] = [
    0, -1, 1, 0, //
    1, 0, 0, -1, //
    -1, 0, 0, 1, //
    0, 1, -1, 0,
];

/// Pack two channel levels into a 2-bit state.
#[inline]
pub fn channel_state(a: bool, b: bool) -> u8 {
    ((a as u8) << 1) | (b as u8)
}

/// Direction of the transition `previous -> current`.
#[inline]
pub fn transition(previous: u8, current: u8) -> i8 {
    TRANSITIONS[(((previous & 0b11) << 2) | (current & 0b11)) as usize]
}

/// Accumulates single transitions into whole detents.
#[derive(Debug, Clone)]
pub struct QuadratureDecoder {
    state: u8,
    accumulator: i8,
    per_detent: i8,
}

impl QuadratureDecoder {
    /// Create a decoder resting at `A = B = high` (pull-ups, detent position).
    pub fn new(transitions_per_detent: u8) -> Self {
        Self::with_state(transitions_per_detent, true, true)
    }

    /// Create a decoder starting from the given channel levels.
    pub fn with_state(transitions_per_detent: u8, a: bool, b: bool) -> Self {
        Self {
            state: channel_state(a, b),
            accumulator: 0,
            per_detent: transitions_per_detent.clamp(1, 4) as i8,
        }
    }

    /// Feed the current channel levels.
    ///
    /// Returns `Some(±1)` when a full detent has been accumulated.
    pub fn update(&mut self, a: bool, b: bool) -> Option<i8> {
        let current = channel_state(a, b);
        let step = transition(self.state, current);
        self.state = current;

        if step == 0 {
            return None;
        }

        // A reversal mid-detent restarts the count in the new direction
        if self.accumulator != 0 && self.accumulator.signum() != step {
            self.accumulator = 0;
        }
        self.accumulator += step;

        if self.accumulator.abs() >= self.per_detent {
            let direction = self.accumulator.signum();
            self.accumulator = 0;
            Some(direction)
        } else {
            None
        }
    }
}
