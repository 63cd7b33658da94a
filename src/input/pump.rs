//! Menu-side event receive.

use heapless::Deque;

use crate::clock::Clock;

use super::coalesce::RotationCoalescer;
use super::event::EncoderEvent;
use super::queue::EventQueue;

const POLL_INTERVAL_MS: u32 = 5;

/// Single consumer of the encoder queue.
///
/// Adds a timeout receive on top of the lock-free queue and, when enabled,
/// applies rotation coalescing before events reach the menu.
pub struct EventPump<'q, K: Clock> {
    queue: &'q EventQueue,
    clock: K,
    coalescer: Option<RotationCoalescer>,
    ready: Deque<EncoderEvent, 4>,
}

impl<'q, K: Clock> EventPump<'q, K> {
    /// Receive directly from `queue`.
    pub fn new(queue: &'q EventQueue, clock: K) -> Self {
        Self {
            queue,
            clock,
            coalescer: None,
            ready: Deque::new(),
        }
    }

    /// Merge rotation bursts separated by less than `window_ms`.
    pub fn with_coalescing(mut self, window_ms: u32) -> Self {
        self.coalescer = Some(RotationCoalescer::new(window_ms));
        self
    }

    /// The clock used for timeouts.
    #[inline]
    pub fn clock(&self) -> &K {
        &self.clock
    }

    /// Wait up to `timeout_ms` for the next event.
    ///
    /// A timeout of 0 checks once without sleeping.
    pub fn next(&mut self, timeout_ms: u32) -> Option<EncoderEvent> {
        let start = self.clock.now_ms();
        loop {
            if let Some(event) = self.ready.pop_front() {
                return Some(event);
            }

            if let Some(event) = self.queue.pop() {
                self.accept(event);
                continue;
            }

            let now = self.clock.now_ms();
            if let Some(event) = self.coalescer.as_mut().and_then(|c| c.poll(now)) {
                return Some(event);
            }

            let waited = now.saturating_sub(start);
            if waited >= u64::from(timeout_ms) {
                return None;
            }
            let remaining = (u64::from(timeout_ms) - waited) as u32;
            self.clock.sleep_ms(remaining.min(POLL_INTERVAL_MS));
        }
    }

    /// Block until a button press, discarding rotation.
    ///
    /// Returns `false` if `timeout_ms` elapsed first; `None` waits forever.
    pub fn wait_for_press(&mut self, timeout_ms: Option<u32>) -> bool {
        let start = self.clock.now_ms();
        loop {
            let slice = match timeout_ms {
                Some(limit) => {
                    let waited = self.clock.elapsed_ms(start);
                    if waited >= u64::from(limit) {
                        return false;
                    }
                    (u64::from(limit) - waited) as u32
                }
                None => 1000,
            };
            if self.next(slice).is_some_and(EncoderEvent::is_press) {
                return true;
            }
        }
    }

    fn accept(&mut self, event: EncoderEvent) {
        let now = self.clock.now_ms();
        match self.coalescer.as_mut() {
            Some(c) => {
                for out in c.push(event, now) {
                    let _ = self.ready.push_back(out);
                }
            }
            None => {
                let _ = self.ready.push_back(event);
            }
        }
    }
}
