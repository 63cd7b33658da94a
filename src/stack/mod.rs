//! Focus stack sequencing.
//!
//! [`StackSequencer`] walks a [`StackPlan`](crate::config::StackPlan) over a
//! [`Rig`], reporting through a shared [`StackControl`]. Under `std`,
//! [`StackRunner`] runs it on its own thread.

mod control;
#[cfg(feature = "std")]
mod runner;
mod sequencer;

pub use control::{ProgressSnapshot, StackControl, StackPhase};
#[cfg(feature = "std")]
pub use runner::StackRunner;
pub use sequencer::{Rig, StackOutcome, StackSequencer, ACK_POLL_MS};
