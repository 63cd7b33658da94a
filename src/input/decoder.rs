//! Interrupt-side encoder decoding.

use embedded_hal::digital::InputPin;

use crate::config::DecoderOptions;
use crate::error::{HardwareError, Result};

use super::button::ButtonDebouncer;
use super::event::EncoderEvent;
use super::quadrature::QuadratureDecoder;
use super::queue::EventQueue;

/// Turns raw channel and button levels into queued events.
///
/// Every method runs to completion without blocking and may be called from
/// interrupt context.
#[derive(Debug)]
pub struct EncoderDecoder<'q> {
    quadrature: QuadratureDecoder,
    button: ButtonDebouncer,
    queue: &'q EventQueue,
}

impl<'q> EncoderDecoder<'q> {
    /// Create a decoder feeding `queue`.
    pub fn new(queue: &'q EventQueue, options: &DecoderOptions) -> Self {
        Self {
            quadrature: QuadratureDecoder::new(options.transitions_per_detent),
            button: ButtonDebouncer::new(options.button_refractory_ms),
            queue,
        }
    }

    /// Handle a change on either quadrature channel.
    pub fn on_channels(&mut self, a: bool, b: bool) {
        if let Some(direction) = self.quadrature.update(a, b) {
            self.queue.push(EncoderEvent::Rotate(direction));
        }
    }

    /// Handle a change on the button line.
    pub fn on_button(&mut self, level_high: bool, now_ms: u64) {
        if self.button.update(level_high, now_ms) {
            self.queue.push(EncoderEvent::ButtonPressed);
        }
    }

    /// The queue this decoder feeds.
    #[inline]
    pub fn queue(&self) -> &'q EventQueue {
        self.queue
    }
}

/// Encoder input pins: channel A, channel B and the active-low switch.
pub struct EncoderPins<A, B, SW>
where
    A: InputPin,
    B: InputPin,
    SW: InputPin,
{
    a: A,
    b: B,
    sw: SW,
}

impl<A, B, SW> EncoderPins<A, B, SW>
where
    A: InputPin,
    B: InputPin,
    SW: InputPin,
{
    /// Bundle the encoder pins.
    pub fn new(a: A, b: B, sw: SW) -> Self {
        Self { a, b, sw }
    }

    /// Sample all three lines and feed the decoder.
    ///
    /// This is the body of the pin-change interrupt handler.
    ///
    /// # Errors
    ///
    /// Returns `HardwareError::PinRead` if a pin cannot be read.
    pub fn sample(&mut self, decoder: &mut EncoderDecoder<'_>, now_ms: u64) -> Result<()> {
        let a = self.a.is_high().map_err(|_| HardwareError::PinRead)?;
        let b = self.b.is_high().map_err(|_| HardwareError::PinRead)?;
        let sw = self.sw.is_high().map_err(|_| HardwareError::PinRead)?;

        decoder.on_channels(a, b);
        decoder.on_button(sw, now_ms);
        Ok(())
    }

    /// Release the pins.
    pub fn release(self) -> (A, B, SW) {
        (self.a, self.b, self.sw)
    }
}
