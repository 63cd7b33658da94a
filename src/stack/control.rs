//! Shared stack run state.
//!
//! The only state the menu task and the sequencer task share. Each field
//! has a single writer: the menu arms, stops and acknowledges; the
//! sequencer records progress and finishes.

use core::sync::atomic::{AtomicBool, AtomicU32, AtomicU8, Ordering};

/// Where a stack run is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum StackPhase {
    /// No run in progress.
    Idle = 0,
    /// Moving and shooting.
    Running = 1,
    /// Shots done, waiting for the operator to acknowledge.
    AwaitingAck = 2,
}

impl StackPhase {
    fn from_u8(raw: u8) -> Self {
        match raw {
            1 => StackPhase::Running,
            2 => StackPhase::AwaitingAck,
            _ => StackPhase::Idle,
        }
    }
}

/// Progress as seen by the display path.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProgressSnapshot {
    /// Lifecycle phase.
    pub phase: StackPhase,
    /// Cooperative run flag.
    pub running: bool,
    /// Shots completed so far.
    pub shots_taken: u32,
    /// Last logical carriage position reported by the sequencer.
    pub position_mm: f32,
}

/// Atomic control block for one stack run at a time.
#[derive(Debug)]
pub struct StackControl {
    running: AtomicBool,
    phase: AtomicU8,
    shots_taken: AtomicU32,
    position_bits: AtomicU32,
    acknowledged: AtomicBool,
}

impl StackControl {
    /// Create an idle control block.
    pub const fn new() -> Self {
        Self {
            running: AtomicBool::new(false),
            phase: AtomicU8::new(StackPhase::Idle as u8),
            shots_taken: AtomicU32::new(0),
            position_bits: AtomicU32::new(0),
            acknowledged: AtomicBool::new(false),
        }
    }

    /// Reset progress and mark a run as started.
    pub fn arm(&self, position_mm: f32) {
        self.shots_taken.store(0, Ordering::Relaxed);
        self.position_bits.store(position_mm.to_bits(), Ordering::Relaxed);
        self.acknowledged.store(false, Ordering::Relaxed);
        self.phase.store(StackPhase::Running as u8, Ordering::Release);
        self.running.store(true, Ordering::Release);
    }

    /// Ask the sequencer to stop at its next check point.
    pub fn request_stop(&self) {
        self.running.store(false, Ordering::Release);
    }

    /// Whether the run has not been stopped or finished.
    #[inline]
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }

    /// Current lifecycle phase.
    #[inline]
    pub fn phase(&self) -> StackPhase {
        StackPhase::from_u8(self.phase.load(Ordering::Acquire))
    }

    /// Shots completed so far.
    #[inline]
    pub fn shots_taken(&self) -> u32 {
        self.shots_taken.load(Ordering::Acquire)
    }

    /// Last reported carriage position.
    #[inline]
    pub fn position_mm(&self) -> f32 {
        f32::from_bits(self.position_bits.load(Ordering::Acquire))
    }

    pub(crate) fn record_shot(&self, shots_taken: u32) {
        self.shots_taken.store(shots_taken, Ordering::Release);
    }

    pub(crate) fn record_position(&self, position_mm: f32) {
        self.position_bits.store(position_mm.to_bits(), Ordering::Release);
    }

    pub(crate) fn await_ack(&self) {
        self.acknowledged.store(false, Ordering::Relaxed);
        self.phase.store(StackPhase::AwaitingAck as u8, Ordering::Release);
    }

    /// Deliver the operator's acknowledgment of a completed run.
    ///
    /// Ignored unless the sequencer is waiting for it.
    pub fn acknowledge(&self) -> bool {
        if self.phase() == StackPhase::AwaitingAck {
            self.acknowledged.store(true, Ordering::Release);
            true
        } else {
            false
        }
    }

    pub(crate) fn take_ack(&self) -> bool {
        self.acknowledged.swap(false, Ordering::AcqRel)
    }

    pub(crate) fn finish(&self) {
        self.running.store(false, Ordering::Release);
        self.phase.store(StackPhase::Idle as u8, Ordering::Release);
    }

    /// Sample everything the progress display needs.
    pub fn snapshot(&self) -> ProgressSnapshot {
        ProgressSnapshot {
            phase: self.phase(),
            running: self.is_running(),
            shots_taken: self.shots_taken(),
            position_mm: self.position_mm(),
        }
    }
}

impl Default for StackControl {
    fn default() -> Self {
        Self::new()
    }
}
