//! Settings record validation.

use crate::error::{ConfigError, Error, Result};

use super::SettingsRecord;

/// Validate a settings record.
///
/// Checks the values that cannot be repaired by clamping:
/// - Steps per millimeter is positive
/// - Travel is positive
/// - Rail and stack step sizes are positive
pub fn validate_record(record: &SettingsRecord) -> Result<()> {
    if record.steps_per_mm <= 0 {
        return Err(Error::Config(ConfigError::InvalidStepsPerMm(record.steps_per_mm)));
    }

    if !(record.max_travel_mm > 0.0) {
        return Err(Error::Config(ConfigError::InvalidMaxTravel(record.max_travel_mm)));
    }

    if !(record.step_size_microns > 0.0) {
        return Err(Error::Config(ConfigError::InvalidStepSize(
            record.step_size_microns,
        )));
    }

    if !(record.stack_step_microns > 0.0) {
        return Err(Error::Config(ConfigError::InvalidStackStep(
            record.stack_step_microns,
        )));
    }

    Ok(())
}
