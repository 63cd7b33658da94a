//! Menu state machine.
//!
//! Screens and their items are static tables ([`screen`]); rotation in
//! edit mode runs the per-field rules in [`edit`]; [`render_screen`] draws
//! a frame from the records. With `std`, [`MenuController`] ties these to
//! the encoder queue, the rig and the stack runner.

#[cfg(feature = "std")]
mod controller;
mod edit;
mod render;
pub mod screen;
mod session;

#[cfg(feature = "std")]
pub use controller::MenuController;
pub use edit::{adjust, Adjustment, Records};
pub use render::{render_screen, View};
pub use screen::{Action, Field, ItemKind, MenuItem, Readout, Screen, ScreenSpec, Toggle};
pub use session::MenuSession;
