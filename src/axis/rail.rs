//! Logical rail: an axis bound to its geometry and position.

use crate::config::units::{Millimeters, Steps};
use crate::config::{RailConfig, SystemSettings};
use crate::error::{RejectReason, Result};

use super::driver::{AxisDrive, AxisTuning};

/// Focus rail carriage.
///
/// Owns the axis together with the [`RailConfig`] it moves, so the holder
/// of the rail is the single writer of the logical position.
#[derive(Debug)]
pub struct Rail<A: AxisDrive> {
    axis: A,
    config: RailConfig,
}

impl<A: AxisDrive> Rail<A> {
    /// Bind an axis to a rail configuration.
    pub fn new(axis: A, config: RailConfig) -> Self {
        Self { axis, config }
    }

    /// Rail geometry and logical position.
    #[inline]
    pub fn config(&self) -> &RailConfig {
        &self.config
    }

    /// Mutable access for calibration edits.
    #[inline]
    pub fn config_mut(&mut self) -> &mut RailConfig {
        &mut self.config
    }

    /// Logical carriage position.
    #[inline]
    pub fn position(&self) -> Millimeters {
        self.config.position()
    }

    /// Whether a zero reference has been established.
    #[inline]
    pub fn is_homed(&self) -> bool {
        self.config.homed
    }

    /// The underlying axis.
    #[inline]
    pub fn axis(&self) -> &A {
        &self.axis
    }

    /// Move by a signed distance.
    ///
    /// The logical position is clamped into the travel afterwards without
    /// any corrective motion, so hitting a bound leaves the carriage and
    /// the logical position apart.
    ///
    /// # Errors
    ///
    /// `RejectReason::NotHomed` for a non-zero move on an un-homed rail,
    /// with nothing changed; `AxisError` if the pulse train fails.
    pub fn move_relative(&mut self, distance: Millimeters, settings: &SystemSettings) -> Result<()> {
        if !self.config.homed && distance.0 != 0.0 {
            warn!("move of {} mm refused: rail not homed", distance.0);
            return Err(RejectReason::NotHomed.into());
        }

        let steps = distance.to_steps(self.config.steps_per_mm);
        let tuning = AxisTuning::from_settings(settings, self.config.steps_per_mm);
        self.axis.move_steps(steps, &tuning)?;

        self.config.total_steps = self.config.total_steps.wrapping_add(steps.0 as i32);
        self.config.current_position_mm = self
            .config
            .clamp_position(self.position() + distance)
            .0;
        trace!(
            "rail at {} mm, {} steps",
            self.config.current_position_mm,
            self.config.total_steps
        );
        Ok(())
    }

    /// Move to an absolute position inside the travel.
    pub fn move_to(&mut self, target: Millimeters, settings: &SystemSettings) -> Result<()> {
        let target = self.config.clamp_position(target);
        self.move_relative(target - self.position(), settings)
    }

    /// Declare the current carriage position to be zero.
    pub fn home(&mut self) {
        self.config.current_position_mm = 0.0;
        self.config.total_steps = 0;
        self.config.homed = true;
        self.axis.reset_position();
        info!("rail homed");
    }

    /// Forget the zero reference.
    pub fn reset_calibration(&mut self) {
        self.config.current_position_mm = 0.0;
        self.config.total_steps = 0;
        self.config.homed = false;
        self.axis.reset_position();
        info!("rail calibration reset");
    }

    /// Change the usable travel, re-clamping the logical position.
    pub fn set_max_travel(&mut self, max_travel_mm: f32) {
        self.config.max_travel_mm = max_travel_mm;
        self.config.reclamp();
    }

    /// Steps issued by the axis since the last home or reset.
    #[inline]
    pub fn axis_steps(&self) -> Steps {
        self.axis.position_steps()
    }

    /// Energize or release the motor.
    pub fn enable(&mut self, enabled: bool) -> Result<()> {
        self.axis.enable(enabled)
    }

    /// Split into axis and configuration.
    pub fn release(self) -> (A, RailConfig) {
        (self.axis, self.config)
    }
}
