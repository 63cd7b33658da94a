//! Camera shutter trigger.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

use crate::error::{AxisError, HardwareError, Result};

/// Pause after each shutter pulse before the rig moves on.
pub const TRIGGER_HOLD_MS: u32 = 500;

/// Something that can fire the camera.
pub trait Shutter {
    /// Hold the trigger for `duration_ms`, then release it.
    fn trigger(&mut self, duration_ms: u32) -> Result<()>;
}

/// Active-high trigger line (opto-isolator or remote release).
pub struct CameraTrigger<PIN, DELAY>
where
    PIN: OutputPin,
    DELAY: DelayNs,
{
    pin: PIN,
    delay: DELAY,
    shots: u32,
}

impl<PIN, DELAY> CameraTrigger<PIN, DELAY>
where
    PIN: OutputPin,
    DELAY: DelayNs,
{
    /// Take the trigger line and drive it to its released (low) level.
    ///
    /// # Errors
    ///
    /// Returns `HardwareError::InitFailed` if the line cannot be driven.
    pub fn new(mut pin: PIN, delay: DELAY) -> Result<Self> {
        pin.set_low().map_err(|_| HardwareError::InitFailed("camera trigger"))?;
        Ok(Self { pin, delay, shots: 0 })
    }

    /// Trigger pulses issued since creation.
    #[inline]
    pub fn shots(&self) -> u32 {
        self.shots
    }

    /// Release the pin and delay provider.
    pub fn release(self) -> (PIN, DELAY) {
        (self.pin, self.delay)
    }
}

impl<PIN, DELAY> Shutter for CameraTrigger<PIN, DELAY>
where
    PIN: OutputPin,
    DELAY: DelayNs,
{
    fn trigger(&mut self, duration_ms: u32) -> Result<()> {
        self.pin.set_high().map_err(|_| AxisError::TriggerError)?;
        self.delay.delay_ms(duration_ms);
        self.pin.set_low().map_err(|_| AxisError::TriggerError)?;
        self.shots = self.shots.wrapping_add(1);
        debug!("shutter released, {} ms", duration_ms);
        Ok(())
    }
}
