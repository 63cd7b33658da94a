//! Stepper axis driver.
//!
//! Generic over embedded-hal 1.0 pin types. Pulses are fixed width and
//! blocking; a move returns once the carriage has settled.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

use crate::config::units::Steps;
use crate::config::SystemSettings;
use crate::error::{AxisError, Result};

/// Width of the STEP high phase.
pub const PULSE_HIGH_US: u32 = 1000;
/// Width of the STEP low phase.
pub const PULSE_LOW_US: u32 = 1000;
/// DIR setup time before the first pulse of a move.
pub const DIR_SETUP_MS: u32 = 1;

/// Direction of carriage travel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    /// Away from home (positive step count).
    Forward,
    /// Toward home (negative step count).
    Reverse,
}

impl Direction {
    /// Get direction from signed step count.
    #[inline]
    pub fn from_steps(steps: i64) -> Self {
        if steps >= 0 {
            Direction::Forward
        } else {
            Direction::Reverse
        }
    }

    /// Get the sign multiplier.
    #[inline]
    pub fn sign(self) -> i64 {
        match self {
            Direction::Forward => 1,
            Direction::Reverse => -1,
        }
    }
}

/// Per-move mechanical tuning, derived from the system settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AxisTuning {
    /// Extra pulses issued on a direction reversal.
    pub backlash_steps: u32,
    /// Blocking pause after the requested pulses.
    pub settling_ms: u32,
}

impl AxisTuning {
    /// Derive tuning for a rail with the given resolution.
    pub fn from_settings(settings: &SystemSettings, steps_per_mm: i32) -> Self {
        Self {
            backlash_steps: settings.backlash().to_steps(steps_per_mm),
            settling_ms: settings.settling_time_ms,
        }
    }
}

/// Pulse-level motion primitive the rail drives.
pub trait AxisDrive {
    /// Issue `steps` pulses (sign selects direction), compensating backlash
    /// on a reversal, then settle.
    fn move_steps(&mut self, steps: Steps, tuning: &AxisTuning) -> Result<()>;

    /// Energize or release the motor.
    fn enable(&mut self, enabled: bool) -> Result<()>;

    /// Signed count of requested steps since the last reset.
    fn position_steps(&self) -> Steps;

    /// Make the current position the step origin.
    fn reset_position(&mut self);
}

/// STEP/DIR/ENABLE stepper driver.
///
/// Generic over:
/// - `STEP`: STEP pin type (must implement `OutputPin`)
/// - `DIR`: DIR pin type (must implement `OutputPin`)
/// - `EN`: active-low ENABLE pin type (must implement `OutputPin`)
/// - `DELAY`: Delay provider (must implement `DelayNs`)
pub struct StepperAxis<STEP, DIR, EN, DELAY>
where
    STEP: OutputPin,
    DIR: OutputPin,
    EN: OutputPin,
    DELAY: DelayNs,
{
    step_pin: STEP,
    dir_pin: DIR,
    enable_pin: EN,
    delay: DELAY,

    /// Requested steps only; backlash pulses never count.
    position: Steps,

    /// Direction of the last executed move.
    last_direction: Option<Direction>,

    /// Whether direction pin logic is inverted.
    invert_direction: bool,

    name: heapless::String<32>,
}

impl<STEP, DIR, EN, DELAY> StepperAxis<STEP, DIR, EN, DELAY>
where
    STEP: OutputPin,
    DIR: OutputPin,
    EN: OutputPin,
    DELAY: DelayNs,
{
    pub(crate) fn new(
        step_pin: STEP,
        dir_pin: DIR,
        enable_pin: EN,
        delay: DELAY,
        invert_direction: bool,
        name: heapless::String<32>,
    ) -> Self {
        Self {
            step_pin,
            dir_pin,
            enable_pin,
            delay,
            position: Steps(0),
            last_direction: None,
            invert_direction,
            name,
        }
    }

    /// Get the axis name.
    #[inline]
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Direction of the last executed move, if any.
    #[inline]
    pub fn last_direction(&self) -> Option<Direction> {
        self.last_direction
    }

    /// Release the pins and delay provider.
    pub fn release(self) -> (STEP, DIR, EN, DELAY) {
        (self.step_pin, self.dir_pin, self.enable_pin, self.delay)
    }

    fn set_direction(&mut self, direction: Direction) -> Result<()> {
        let pin_high = match direction {
            Direction::Forward => !self.invert_direction,
            Direction::Reverse => self.invert_direction,
        };

        if pin_high {
            self.dir_pin.set_high().map_err(|_| AxisError::PinError)?;
        } else {
            self.dir_pin.set_low().map_err(|_| AxisError::PinError)?;
        }
        Ok(())
    }

    fn pulse_train(&mut self, count: u64) -> Result<()> {
        for _ in 0..count {
            self.step_pin.set_high().map_err(|_| AxisError::PinError)?;
            self.delay.delay_us(PULSE_HIGH_US);
            self.step_pin.set_low().map_err(|_| AxisError::PinError)?;
            self.delay.delay_us(PULSE_LOW_US);
        }
        Ok(())
    }
}

impl<STEP, DIR, EN, DELAY> AxisDrive for StepperAxis<STEP, DIR, EN, DELAY>
where
    STEP: OutputPin,
    DIR: OutputPin,
    EN: OutputPin,
    DELAY: DelayNs,
{
    fn move_steps(&mut self, steps: Steps, tuning: &AxisTuning) -> Result<()> {
        if steps.0 == 0 {
            return Ok(());
        }

        let direction = Direction::from_steps(steps.0);
        self.set_direction(direction)?;
        self.delay.delay_ms(DIR_SETUP_MS);

        if self.last_direction.is_some_and(|last| last != direction) && tuning.backlash_steps > 0 {
            debug!("{}: reversal, {} backlash steps", self.name.as_str(), tuning.backlash_steps);
            self.pulse_train(u64::from(tuning.backlash_steps))?;
        }
        self.last_direction = Some(direction);

        self.pulse_train(steps.abs())?;
        self.position = self.position + steps;

        if tuning.settling_ms > 0 {
            self.delay.delay_ms(tuning.settling_ms);
        }
        Ok(())
    }

    fn enable(&mut self, enabled: bool) -> Result<()> {
        if enabled {
            self.enable_pin.set_low().map_err(|_| AxisError::PinError)?;
        } else {
            self.enable_pin.set_high().map_err(|_| AxisError::PinError)?;
        }
        Ok(())
    }

    #[inline]
    fn position_steps(&self) -> Steps {
        self.position
    }

    fn reset_position(&mut self) {
        self.position = Steps(0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_hal_mock::eh1::delay::NoopDelay;
    use embedded_hal_mock::eh1::digital::{Mock as PinMock, State, Transaction};

    fn pulses(n: usize) -> std::vec::Vec<Transaction> {
        let mut t = std::vec::Vec::new();
        for _ in 0..n {
            t.push(Transaction::set(State::High));
            t.push(Transaction::set(State::Low));
        }
        t
    }

    fn axis(
        step: &[Transaction],
        dir: &[Transaction],
        en: &[Transaction],
    ) -> StepperAxis<PinMock, PinMock, PinMock, NoopDelay> {
        StepperAxis::new(
            PinMock::new(step),
            PinMock::new(dir),
            PinMock::new(en),
            NoopDelay::new(),
            false,
            heapless::String::try_from("rail").unwrap(),
        )
    }

    fn finish(axis: StepperAxis<PinMock, PinMock, PinMock, NoopDelay>) {
        let (mut step, mut dir, mut en, _) = axis.release();
        step.done();
        dir.done();
        en.done();
    }

    #[test]
    fn test_reversal_adds_backlash_pulses() {
        // 3 forward, then 2 backlash + 2 requested in reverse
        let step = pulses(3 + 2 + 2);
        let dir = [Transaction::set(State::High), Transaction::set(State::Low)];
        let mut ax = axis(&step, &dir, &[]);

        let tuning = AxisTuning {
            backlash_steps: 2,
            settling_ms: 0,
        };
        ax.move_steps(Steps(3), &tuning).unwrap();
        ax.move_steps(Steps(-2), &tuning).unwrap();

        assert_eq!(ax.position_steps(), Steps(1));
        assert_eq!(ax.last_direction(), Some(Direction::Reverse));
        finish(ax);
    }

    #[test]
    fn test_first_move_has_no_backlash() {
        let step = pulses(2);
        let dir = [Transaction::set(State::Low)];
        let mut ax = axis(&step, &dir, &[]);

        let tuning = AxisTuning {
            backlash_steps: 5,
            settling_ms: 10,
        };
        ax.move_steps(Steps(-2), &tuning).unwrap();
        assert_eq!(ax.position_steps(), Steps(-2));
        finish(ax);
    }

    #[test]
    fn test_zero_steps_touches_nothing() {
        let mut ax = axis(&[], &[], &[]);
        ax.move_steps(Steps(0), &AxisTuning::default()).unwrap();
        assert_eq!(ax.last_direction(), None);
        finish(ax);
    }

    #[test]
    fn test_enable_is_active_low() {
        let en = [Transaction::set(State::Low), Transaction::set(State::High)];
        let mut ax = axis(&[], &[], &en);
        ax.enable(true).unwrap();
        ax.enable(false).unwrap();
        finish(ax);
    }

    #[test]
    fn test_tuning_from_settings() {
        let tuning = AxisTuning::from_settings(&SystemSettings::default(), 1600);
        assert_eq!(tuning.backlash_steps, 40);
        assert_eq!(tuning.settling_ms, 500);
    }
}
