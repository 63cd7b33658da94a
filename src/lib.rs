//! # macro-rail
//!
//! Firmware core for a motorized macro focus rail with embedded-hal 1.0 support.
//!
//! ## Features
//!
//! - **Encoder input**: Quadrature and button decoding into a bounded, lock-free event queue
//! - **Backlash compensation**: Extra take-up steps on every direction reversal
//! - **Menu state machine**: Table-driven screens, per-field edit rules, on-screen notices
//! - **Focus stacking**: Sequencer on its own task with cooperative stop and progress reporting
//! - **Settings records**: Flattened TOML record with clamping on load
//! - **no_std compatible**: Decoding, axis, menu tables and sequencer work without the standard library
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use macro_rail::{
//!     CameraTrigger, EventQueue, FileStore, MenuController, MenuOptions, Rail, RailConfig, Rig,
//!     StepperAxisBuilder, SystemClock,
//! };
//!
//! static EVENTS: EventQueue = EventQueue::new();
//!
//! let axis = StepperAxisBuilder::new()
//!     .step_pin(step_pin)
//!     .dir_pin(dir_pin)
//!     .enable_pin(enable_pin)
//!     .delay(delay.clone())
//!     .build()?;
//! let camera = CameraTrigger::new(trigger_pin, delay)?;
//! let rig = Rig::new(Rail::new(axis, RailConfig::default()), camera);
//!
//! let mut menu = MenuController::new(
//!     &EVENTS,
//!     rig,
//!     display,
//!     FileStore::new("rail.toml"),
//!     SystemClock::new(),
//!     MenuOptions::default(),
//! );
//! menu.boot();
//! menu.run();
//! ```
//!
//! ## Feature Flags
//!
//! - `std` (default): TOML settings files, `log` output, the threaded stack runner,
//!   the menu controller and the `sim` backends
//! - `defmt`: Enables defmt logging for embedded targets

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]
// Allow large error types - necessary for no_std with heapless strings
#![allow(clippy::result_large_err)]

#[macro_use]
mod fmt;

// Core modules
pub mod axis;
pub mod camera;
pub mod clock;
pub mod config;
pub mod display;
pub mod error;
pub mod input;
pub mod menu;
pub mod stack;
pub mod store;

// Host simulation backends (std only)
#[cfg(feature = "std")]
pub mod sim;

// Re-exports for ergonomic API
pub use axis::{AxisDrive, Rail, StepperAxis, StepperAxisBuilder};
pub use camera::{CameraTrigger, Shutter};
pub use clock::Clock;
pub use config::{
    validate_record, DecoderOptions, MenuOptions, RailConfig, SettingsRecord, StackPlan,
    SystemSettings,
};
pub use display::{GraphicsSurface, Surface};
pub use error::{Error, Result};
pub use input::{EncoderDecoder, EncoderEvent, EncoderPins, EventPump, EventQueue};
pub use menu::{MenuSession, Screen};
pub use stack::{Rig, StackControl, StackOutcome, StackSequencer};
pub use store::{MemoryStore, SettingsStore};

// std-only pieces
#[cfg(feature = "std")]
pub use clock::SystemClock;
#[cfg(feature = "std")]
pub use config::{load_record, save_record};
#[cfg(feature = "std")]
pub use menu::MenuController;
#[cfg(feature = "std")]
pub use stack::StackRunner;
#[cfg(feature = "std")]
pub use store::FileStore;

// Unit types
pub use config::units::{Microns, Millimeters, Steps};
