//! Host simulation backends (std only).
//!
//! Stand-ins for the GPIO, delay, clock and display collaborators, so the
//! firmware logic runs unchanged on a desktop and in tests.

use std::convert::Infallible;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use embedded_graphics::pixelcolor::Rgb565;
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{ErrorType, InputPin, OutputPin};

use crate::axis::{Rail, StepperAxis, StepperAxisBuilder};
use crate::camera::CameraTrigger;
use crate::clock::Clock;
use crate::config::RailConfig;
use crate::display::Surface;
use crate::error::Result;
use crate::stack::Rig;

#[derive(Debug, Default)]
struct Line {
    high: AtomicBool,
    rising_edges: AtomicU64,
}

/// Simulated output pin counting rising edges. Clones share the line.
#[derive(Debug, Clone, Default)]
pub struct SimPin {
    line: Arc<Line>,
}

impl SimPin {
    /// A new line, initially low.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current level.
    pub fn is_set_high(&self) -> bool {
        self.line.high.load(Ordering::Acquire)
    }

    /// Low to high transitions since creation.
    pub fn pulses(&self) -> u64 {
        self.line.rising_edges.load(Ordering::Acquire)
    }
}

impl ErrorType for SimPin {
    type Error = Infallible;
}

impl OutputPin for SimPin {
    fn set_high(&mut self) -> core::result::Result<(), Self::Error> {
        if !self.line.high.swap(true, Ordering::AcqRel) {
            self.line.rising_edges.fetch_add(1, Ordering::AcqRel);
        }
        Ok(())
    }

    fn set_low(&mut self) -> core::result::Result<(), Self::Error> {
        self.line.high.store(false, Ordering::Release);
        Ok(())
    }
}

/// Simulated input pin driven from the test side. Clones share the line.
#[derive(Debug, Clone)]
pub struct SimInputPin {
    level: Arc<AtomicBool>,
}

impl SimInputPin {
    /// A line resting at `high`.
    pub fn new(high: bool) -> Self {
        Self {
            level: Arc::new(AtomicBool::new(high)),
        }
    }

    /// Drive the line.
    pub fn set(&self, high: bool) {
        self.level.store(high, Ordering::Release);
    }
}

impl ErrorType for SimInputPin {
    type Error = Infallible;
}

impl InputPin for SimInputPin {
    fn is_high(&mut self) -> core::result::Result<bool, Self::Error> {
        Ok(self.level.load(Ordering::Acquire))
    }

    fn is_low(&mut self) -> core::result::Result<bool, Self::Error> {
        Ok(!self.level.load(Ordering::Acquire))
    }
}

/// Delay that only accounts the requested time. Clones share the total.
#[derive(Debug, Clone, Default)]
pub struct SimDelay {
    elapsed_ns: Arc<AtomicU64>,
}

impl SimDelay {
    /// A delay with nothing accounted.
    pub fn new() -> Self {
        Self::default()
    }

    /// Total requested delay in nanoseconds.
    pub fn elapsed_ns(&self) -> u64 {
        self.elapsed_ns.load(Ordering::Acquire)
    }
}

impl DelayNs for SimDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.elapsed_ns.fetch_add(u64::from(ns), Ordering::AcqRel);
    }
}

/// Manually driven clock; sleeping advances it. Clones share the time.
///
/// A paced clock additionally blocks for a fixed wall-clock slice on every
/// sleep, so concurrent tasks interleave the way they would on hardware.
#[derive(Debug, Clone, Default)]
pub struct SimClock {
    now: Arc<AtomicU64>,
    pace: Option<Duration>,
}

impl SimClock {
    /// A clock at time 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// A clock at time 0 whose every sleep also takes `pace` of real time.
    pub fn paced(pace: Duration) -> Self {
        Self {
            now: Arc::default(),
            pace: Some(pace),
        }
    }

    /// Move time forward.
    pub fn advance(&self, ms: u64) {
        self.now.fetch_add(ms, Ordering::AcqRel);
    }
}

impl Clock for SimClock {
    fn now_ms(&self) -> u64 {
        self.now.load(Ordering::Acquire)
    }

    fn sleep_ms(&self, ms: u32) {
        self.advance(u64::from(ms));
        match self.pace {
            Some(pace) => std::thread::sleep(pace),
            None => std::thread::yield_now(),
        }
    }
}

/// Simulated stepper axis.
pub type SimAxis = StepperAxis<SimPin, SimPin, SimPin, SimDelay>;
/// Simulated camera trigger.
pub type SimCamera = CameraTrigger<SimPin, SimDelay>;

/// Handles onto the lines of a simulated rig.
#[derive(Debug, Clone)]
pub struct RigProbes {
    /// STEP line.
    pub step: SimPin,
    /// DIR line.
    pub dir: SimPin,
    /// ENABLE line (active low).
    pub enable: SimPin,
    /// Camera trigger line.
    pub trigger: SimPin,
    /// Shared delay accounting of axis and camera.
    pub delay: SimDelay,
}

/// Build a rail and camera on simulated lines.
///
/// # Errors
///
/// Propagates peripheral bring-up failures, which the simulated lines
/// never produce.
pub fn sim_rig(config: RailConfig) -> Result<(Rig<SimAxis, SimCamera>, RigProbes)> {
    let probes = RigProbes {
        step: SimPin::new(),
        dir: SimPin::new(),
        enable: SimPin::new(),
        trigger: SimPin::new(),
        delay: SimDelay::new(),
    };

    let axis = StepperAxisBuilder::new()
        .step_pin(probes.step.clone())
        .dir_pin(probes.dir.clone())
        .enable_pin(probes.enable.clone())
        .delay(probes.delay.clone())
        .name("sim")
        .build()?;
    let camera = CameraTrigger::new(probes.trigger.clone(), probes.delay.clone())?;

    Ok((Rig::new(Rail::new(axis, config), camera), probes))
}

/// One recorded text draw.
#[derive(Debug, Clone, PartialEq)]
pub struct TextDraw {
    /// Left edge.
    pub x: i32,
    /// Top edge.
    pub y: i32,
    /// The text.
    pub text: String,
    /// Foreground color.
    pub fg: Rgb565,
}

#[derive(Debug, Default)]
struct Frame {
    clears: u32,
    texts: Vec<TextDraw>,
    shapes: u32,
}

/// Display surface that records what was drawn. Clones share the record.
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    frame: Arc<Mutex<Frame>>,
}

impl RecordingSurface {
    /// An empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of full-screen clears.
    pub fn clears(&self) -> u32 {
        self.with(|f| f.clears)
    }

    /// Text drawn since the last clear.
    pub fn texts(&self) -> Vec<String> {
        self.with(|f| f.texts.iter().map(|t| t.text.clone()).collect())
    }

    /// Text draws since the last clear, with position and color.
    pub fn text_draws(&self) -> Vec<TextDraw> {
        self.with(|f| f.texts.clone())
    }

    /// Whether any text drawn since the last clear contains `needle`.
    pub fn shows(&self, needle: &str) -> bool {
        self.with(|f| f.texts.iter().any(|t| t.text.contains(needle)))
    }

    /// Lines, rectangles and fills drawn since creation.
    pub fn shapes(&self) -> u32 {
        self.with(|f| f.shapes)
    }

    fn with<R>(&self, read: impl FnOnce(&mut Frame) -> R) -> R {
        let mut frame = match self.frame.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        read(&mut frame)
    }
}

impl Surface for RecordingSurface {
    fn clear(&mut self, _color: Rgb565) {
        self.with(|f| {
            f.clears += 1;
            f.texts.clear();
        });
    }

    fn draw_text(&mut self, x: i32, y: i32, text: &str, fg: Rgb565, _bg: Rgb565) {
        self.with(|f| {
            f.texts.push(TextDraw {
                x,
                y,
                text: text.to_string(),
                fg,
            })
        });
    }

    fn draw_line(&mut self, _x0: i32, _y0: i32, _x1: i32, _y1: i32, _color: Rgb565) {
        self.with(|f| f.shapes += 1);
    }

    fn draw_rect(&mut self, _x: i32, _y: i32, _w: u32, _h: u32, _color: Rgb565) {
        self.with(|f| f.shapes += 1);
    }

    fn fill_rect(&mut self, _x: i32, _y: i32, _w: u32, _h: u32, _color: Rgb565) {
        self.with(|f| f.shapes += 1);
    }
}
