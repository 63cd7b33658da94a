//! Configuration module for macro-rail.
//!
//! Holds the rail, stack and system records the menu edits, the flattened
//! record used for persistence, and TOML loading (with `std` feature).

mod options;
mod rail;
mod record;
mod settings;
mod stack;
pub mod units;
#[cfg(feature = "std")]
mod loader;
mod validation;

pub use options::{DecoderOptions, MenuOptions};
pub use rail::RailConfig;
pub use record::SettingsRecord;
pub use settings::{
    SystemSettings, BRIGHTNESS_RANGE, MIN_SETTLING_MS, MIN_TRIGGER_MS, SENSITIVITY_RANGE,
};
pub(crate) use settings::clamp_i32;
pub use stack::{total_shots, StackPlan};
pub use validation::validate_record;

#[cfg(feature = "std")]
pub use loader::{load_record, parse_record, render_record, save_record};

// Re-export unit types at config level
pub use units::{Microns, Millimeters, Steps};
