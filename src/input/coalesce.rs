//! Optional rotation burst coalescing.

use heapless::Vec;

use super::event::EncoderEvent;

/// Merges a burst of same-direction rotation into a single event.
///
/// A burst closes after a quiet window, on a direction change, or when a
/// button event arrives. A pending rotation is always delivered before the
/// event that closed it.
#[derive(Debug, Clone)]
pub struct RotationCoalescer {
    window_ms: u32,
    pending: Option<(i8, u64)>,
}

impl RotationCoalescer {
    /// Create a coalescer with the given quiet window.
    pub fn new(window_ms: u32) -> Self {
        Self {
            window_ms,
            pending: None,
        }
    }

    /// Whether a rotation is waiting for its window to close.
    #[inline]
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Feed an event; returns the events ready for delivery, in order.
    pub fn push(&mut self, event: EncoderEvent, now_ms: u64) -> Vec<EncoderEvent, 2> {
        let mut out = Vec::new();
        match event {
            EncoderEvent::Rotate(direction) => match self.pending {
                Some((pending, _)) if pending == direction => {
                    self.pending = Some((direction, now_ms));
                }
                Some((pending, _)) => {
                    let _ = out.push(EncoderEvent::Rotate(pending));
                    self.pending = Some((direction, now_ms));
                }
                None => self.pending = Some((direction, now_ms)),
            },
            EncoderEvent::ButtonPressed => {
                if let Some(flushed) = self.take() {
                    let _ = out.push(flushed);
                }
                let _ = out.push(event);
            }
        }
        out
    }

    /// Deliver the pending rotation once its quiet window has elapsed.
    pub fn poll(&mut self, now_ms: u64) -> Option<EncoderEvent> {
        match self.pending {
            Some((_, last)) if now_ms.saturating_sub(last) >= u64::from(self.window_ms) => {
                self.take()
            }
            _ => None,
        }
    }

    /// Deliver the pending rotation immediately.
    pub fn take(&mut self) -> Option<EncoderEvent> {
        self.pending.take().map(|(d, _)| EncoderEvent::Rotate(d))
    }
}
