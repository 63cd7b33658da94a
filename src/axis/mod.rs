//! Stepper axis and logical rail.
//!
//! [`StepperAxis`] turns signed step counts into STEP/DIR pulse trains with
//! backlash compensation on reversal. [`Rail`] binds an axis to its
//! [`RailConfig`](crate::config::RailConfig) and works in millimeters.

mod builder;
mod driver;
mod rail;

pub use builder::StepperAxisBuilder;
pub use driver::{
    AxisDrive, AxisTuning, Direction, StepperAxis, DIR_SETUP_MS, PULSE_HIGH_US, PULSE_LOW_US,
};
pub use rail::Rail;
