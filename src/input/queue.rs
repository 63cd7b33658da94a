//! Bounded handoff between the encoder interrupt and the menu task.

use core::sync::atomic::{AtomicU32, Ordering};

use heapless::mpmc::MpMcQueue;

use super::event::EncoderEvent;

/// Number of events the queue holds before new ones are dropped.
pub const EVENT_QUEUE_CAPACITY: usize = 16;

/// Lock-free event queue.
///
/// Producers never block: when the queue is full the newest event is
/// dropped and counted. Can live in a `static`.
pub struct EventQueue {
    inner: MpMcQueue<EncoderEvent, EVENT_QUEUE_CAPACITY>,
    dropped: AtomicU32,
}

impl EventQueue {
    /// Create an empty queue.
    pub const fn new() -> Self {
        Self {
            inner: MpMcQueue::new(),
            dropped: AtomicU32::new(0),
        }
    }

    /// Enqueue an event. Returns `false` if it was dropped.
    pub fn push(&self, event: EncoderEvent) -> bool {
        match self.inner.enqueue(event) {
            Ok(()) => true,
            Err(_) => {
                let total = self.dropped.fetch_add(1, Ordering::Relaxed) + 1;
                trace!("encoder queue full, dropped {} events", total);
                false
            }
        }
    }

    /// Dequeue the oldest event.
    #[inline]
    pub fn pop(&self) -> Option<EncoderEvent> {
        self.inner.dequeue()
    }

    /// Events dropped since creation.
    #[inline]
    pub fn dropped(&self) -> u32 {
        self.dropped.load(Ordering::Relaxed)
    }

    /// Discard everything queued.
    pub fn clear(&self) {
        while self.inner.dequeue().is_some() {}
    }
}

impl Default for EventQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Debug for EventQueue {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("EventQueue")
            .field("capacity", &EVENT_QUEUE_CAPACITY)
            .field("dropped", &self.dropped())
            .finish()
    }
}
