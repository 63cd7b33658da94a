//! Builder pattern for StepperAxis.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

use crate::error::{Error, HardwareError, Result};

use super::driver::StepperAxis;

/// Builder for creating StepperAxis instances.
///
/// `build` drives the pins to their idle state (STEP low, DIR low, motor
/// enabled), so a wiring or GPIO fault surfaces at boot.
pub struct StepperAxisBuilder<STEP, DIR, EN, DELAY>
where
    STEP: OutputPin,
    DIR: OutputPin,
    EN: OutputPin,
    DELAY: DelayNs,
{
    step_pin: Option<STEP>,
    dir_pin: Option<DIR>,
    enable_pin: Option<EN>,
    delay: Option<DELAY>,
    name: Option<heapless::String<32>>,
    invert_direction: bool,
}

impl<STEP, DIR, EN, DELAY> Default for StepperAxisBuilder<STEP, DIR, EN, DELAY>
where
    STEP: OutputPin,
    DIR: OutputPin,
    EN: OutputPin,
    DELAY: DelayNs,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<STEP, DIR, EN, DELAY> StepperAxisBuilder<STEP, DIR, EN, DELAY>
where
    STEP: OutputPin,
    DIR: OutputPin,
    EN: OutputPin,
    DELAY: DelayNs,
{
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            step_pin: None,
            dir_pin: None,
            enable_pin: None,
            delay: None,
            name: None,
            invert_direction: false,
        }
    }

    /// Set the STEP pin.
    pub fn step_pin(mut self, pin: STEP) -> Self {
        self.step_pin = Some(pin);
        self
    }

    /// Set the DIR pin.
    pub fn dir_pin(mut self, pin: DIR) -> Self {
        self.dir_pin = Some(pin);
        self
    }

    /// Set the active-low ENABLE pin.
    pub fn enable_pin(mut self, pin: EN) -> Self {
        self.enable_pin = Some(pin);
        self
    }

    /// Set the delay provider.
    pub fn delay(mut self, delay: DELAY) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Set the axis name used in log output.
    pub fn name(mut self, name: &str) -> Self {
        self.name = heapless::String::try_from(name).ok();
        self
    }

    /// Set direction inversion.
    pub fn invert_direction(mut self, invert: bool) -> Self {
        self.invert_direction = invert;
        self
    }

    /// Build the StepperAxis.
    ///
    /// # Errors
    ///
    /// Returns `HardwareError::InitFailed` if a pin is missing or cannot be
    /// driven to its idle level.
    pub fn build(self) -> Result<StepperAxis<STEP, DIR, EN, DELAY>> {
        let mut step_pin = self.step_pin.ok_or(Error::Hardware(HardwareError::InitFailed("step pin")))?;
        let mut dir_pin = self.dir_pin.ok_or(Error::Hardware(HardwareError::InitFailed("dir pin")))?;
        let mut enable_pin = self
            .enable_pin
            .ok_or(Error::Hardware(HardwareError::InitFailed("enable pin")))?;
        let delay = self.delay.ok_or(Error::Hardware(HardwareError::InitFailed("axis delay")))?;

        let init = HardwareError::InitFailed("stepper");
        step_pin.set_low().map_err(|_| init)?;
        dir_pin.set_low().map_err(|_| init)?;
        enable_pin.set_low().map_err(|_| init)?;

        let mut name = self.name.unwrap_or_default();
        if name.is_empty() {
            let _ = name.push_str("rail");
        }
        info!("{}: stepper axis ready", name.as_str());

        Ok(StepperAxis::new(
            step_pin,
            dir_pin,
            enable_pin,
            delay,
            self.invert_direction,
            name,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_hal_mock::eh1::delay::NoopDelay;
    use embedded_hal_mock::eh1::digital::{Mock as PinMock, State, Transaction};

    #[test]
    fn test_build_drives_idle_levels() {
        let low = [Transaction::set(State::Low)];
        let axis = StepperAxisBuilder::new()
            .step_pin(PinMock::new(&low))
            .dir_pin(PinMock::new(&low))
            .enable_pin(PinMock::new(&low))
            .delay(NoopDelay::new())
            .name("focus")
            .build()
            .unwrap();

        assert_eq!(axis.name(), "focus");
        let (mut step, mut dir, mut en, _) = axis.release();
        step.done();
        dir.done();
        en.done();
    }

    #[test]
    fn test_missing_pin_is_init_failure() {
        let result = StepperAxisBuilder::<PinMock, PinMock, PinMock, NoopDelay>::new()
            .delay(NoopDelay::new())
            .build();
        assert!(matches!(
            result,
            Err(Error::Hardware(HardwareError::InitFailed("step pin")))
        ));
    }
}
