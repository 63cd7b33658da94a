//! Rail geometry and logical position.

use super::units::Millimeters;

/// Focus rail configuration and logical position.
///
/// Travels with the axis: whoever holds the axis is the only writer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RailConfig {
    /// Jog distance per encoder detent in microns.
    pub step_size_microns: f32,
    /// Usable travel in millimeters.
    pub max_travel_mm: f32,
    /// Logical carriage position, always within `[0, max_travel_mm]`.
    pub current_position_mm: f32,
    /// Cumulative signed count of requested steps.
    pub total_steps: i32,
    /// Motor steps per millimeter of carriage travel.
    pub steps_per_mm: i32,
    /// Whether a zero reference has been established.
    pub homed: bool,
}

impl Default for RailConfig {
    fn default() -> Self {
        Self {
            step_size_microns: 0.625,
            max_travel_mm: 100.0,
            current_position_mm: 0.0,
            total_steps: 0,
            // 1.6mm lead screw, 1/10 microstepping
            steps_per_mm: 1600,
            homed: false,
        }
    }
}

impl RailConfig {
    /// Current logical position.
    #[inline]
    pub fn position(&self) -> Millimeters {
        Millimeters(self.current_position_mm)
    }

    /// Clamp a position into the rail's travel.
    #[inline]
    pub fn clamp_position(&self, position: Millimeters) -> Millimeters {
        position.clamp(0.0, self.max_travel_mm)
    }

    /// Re-clamp the logical position after the travel changed.
    pub fn reclamp(&mut self) {
        self.current_position_mm = self.clamp_position(self.position()).0;
    }
}
