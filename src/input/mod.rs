//! Rotary encoder input.
//!
//! The interrupt side ([`EncoderDecoder`], [`EncoderPins`]) decodes
//! quadrature and button edges into [`EncoderEvent`]s on a bounded
//! [`EventQueue`]. The menu side ([`EventPump`]) is the single consumer.

mod button;
mod coalesce;
mod decoder;
mod event;
mod pump;
pub mod quadrature;
mod queue;

pub use button::ButtonDebouncer;
pub use coalesce::RotationCoalescer;
pub use decoder::{EncoderDecoder, EncoderPins};
pub use event::EncoderEvent;
pub use pump::EventPump;
pub use quadrature::QuadratureDecoder;
pub use queue::{EventQueue, EVENT_QUEUE_CAPACITY};
