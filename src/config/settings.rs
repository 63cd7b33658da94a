//! Operator-tunable system settings.

use super::units::Microns;

/// Brightness range in percent.
pub const BRIGHTNESS_RANGE: (i32, i32) = (10, 100);
/// Shortest camera trigger pulse.
pub const MIN_TRIGGER_MS: i32 = 50;
/// Shortest settling delay after a move.
pub const MIN_SETTLING_MS: i32 = 100;
/// Encoder sensitivity multiplier range.
pub const SENSITIVITY_RANGE: (i32, i32) = (1, 10);

/// System settings, each field independently range-clamped.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SystemSettings {
    /// Display backlight in percent, 10..=100.
    pub brightness: u8,
    /// Camera trigger pulse width, >= 50 ms.
    pub trigger_duration_ms: u32,
    /// Post-move settling delay, >= 100 ms.
    pub settling_time_ms: u32,
    /// Audible feedback.
    pub beep_enabled: bool,
    /// Extra travel taken up on direction reversal, >= 0.
    pub backlash_microns: f32,
    /// Encoder detent multiplier, 1..=10.
    pub encoder_sensitivity: u8,
}

impl Default for SystemSettings {
    fn default() -> Self {
        Self {
            brightness: 80,
            trigger_duration_ms: 100,
            settling_time_ms: 500,
            beep_enabled: true,
            backlash_microns: 25.0,
            encoder_sensitivity: 1,
        }
    }
}

impl SystemSettings {
    /// Return a copy with every field forced into range.
    pub fn clamped(self) -> Self {
        Self {
            brightness: clamp_i32(self.brightness as i32, BRIGHTNESS_RANGE.0, BRIGHTNESS_RANGE.1) as u8,
            trigger_duration_ms: self.trigger_duration_ms.max(MIN_TRIGGER_MS as u32),
            settling_time_ms: self.settling_time_ms.max(MIN_SETTLING_MS as u32),
            beep_enabled: self.beep_enabled,
            backlash_microns: self.backlash_microns.max(0.0),
            encoder_sensitivity: clamp_i32(
                self.encoder_sensitivity as i32,
                SENSITIVITY_RANGE.0,
                SENSITIVITY_RANGE.1,
            ) as u8,
        }
    }

    /// Backlash compensation as a distance.
    #[inline]
    pub fn backlash(&self) -> Microns {
        Microns(self.backlash_microns)
    }

    /// Sensitivity as a signed multiplier.
    #[inline]
    pub fn sensitivity(&self) -> i32 {
        self.encoder_sensitivity as i32
    }
}

#[inline]
pub(crate) fn clamp_i32(value: i32, min: i32, max: i32) -> i32 {
    value.max(min).min(max)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamped_forces_ranges() {
        let raw = SystemSettings {
            brightness: 0,
            trigger_duration_ms: 5,
            settling_time_ms: 0,
            beep_enabled: false,
            backlash_microns: -4.0,
            encoder_sensitivity: 42,
        };
        let s = raw.clamped();
        assert_eq!(s.brightness, 10);
        assert_eq!(s.trigger_duration_ms, 50);
        assert_eq!(s.settling_time_ms, 100);
        assert_eq!(s.backlash_microns, 0.0);
        assert_eq!(s.encoder_sensitivity, 10);
        assert!(!s.beep_enabled);
    }

    #[test]
    fn test_defaults_already_in_range() {
        let s = SystemSettings::default();
        assert_eq!(s, s.clamped());
    }
}
