//! Unit test harness for macro-rail.
//!
//! Organizes the cross-module tests per component.

mod config_parsing;
mod encoder_input;
mod properties;
mod settings_store;
