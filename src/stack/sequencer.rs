//! Automated focus stack sequence.

use crate::axis::{AxisDrive, Rail};
use crate::camera::{Shutter, TRIGGER_HOLD_MS};
use crate::clock::Clock;
use crate::config::units::Millimeters;
use crate::config::{StackPlan, SystemSettings};
use crate::error::{Error, Result};

use super::control::StackControl;

/// Poll period while waiting for the completion acknowledgment.
pub const ACK_POLL_MS: u32 = 100;

/// Everything a stack run drives: the rail and the camera.
///
/// Held by exactly one task at a time.
#[derive(Debug)]
pub struct Rig<A: AxisDrive, C: Shutter> {
    /// Focus rail.
    pub rail: Rail<A>,
    /// Camera trigger.
    pub camera: C,
}

impl<A: AxisDrive, C: Shutter> Rig<A, C> {
    /// Bundle a rail and a camera.
    pub fn new(rail: Rail<A>, camera: C) -> Self {
        Self { rail, camera }
    }
}

/// How a stack run ended.
#[derive(Debug, Clone, PartialEq)]
pub enum StackOutcome {
    /// All shots taken and acknowledged.
    Completed {
        /// Shots taken.
        shots: u32,
    },
    /// Stopped by the operator.
    Stopped {
        /// Shots taken before the stop took effect.
        shots: u32,
    },
    /// Motion or trigger failed mid-run.
    Faulted {
        /// Shots taken before the fault.
        shots: u32,
        /// What failed.
        error: Error,
    },
}

impl StackOutcome {
    /// Shots taken, whatever the outcome.
    pub fn shots(&self) -> u32 {
        match self {
            StackOutcome::Completed { shots }
            | StackOutcome::Stopped { shots }
            | StackOutcome::Faulted { shots, .. } => *shots,
        }
    }
}

/// Drives one armed stack run to its end.
pub struct StackSequencer<'c, K: Clock> {
    control: &'c StackControl,
    clock: K,
}

impl<'c, K: Clock> StackSequencer<'c, K> {
    /// Create a sequencer reporting through `control`.
    pub fn new(control: &'c StackControl, clock: K) -> Self {
        Self { control, clock }
    }

    /// Run the plan. The control block must already be armed.
    ///
    /// Every shutter pulse is followed by a fixed hold. Stop requests take
    /// effect before each trigger and before each inter-shot move; an
    /// in-flight pulse train or trigger always completes. A stopped run
    /// skips the return to start and the acknowledgment wait; a stop that
    /// arrives during the return move still ends the run as stopped.
    pub fn run<A, C>(
        &self,
        rig: &mut Rig<A, C>,
        plan: &StackPlan,
        settings: &SystemSettings,
    ) -> StackOutcome
    where
        A: AxisDrive,
        C: Shutter,
    {
        match self.execute(rig, plan, settings) {
            Ok(outcome) => outcome,
            Err(error) => {
                let shots = self.control.shots_taken();
                error!("stack aborted after {} shots", shots);
                self.control.finish();
                StackOutcome::Faulted { shots, error }
            }
        }
    }

    fn execute<A, C>(
        &self,
        rig: &mut Rig<A, C>,
        plan: &StackPlan,
        settings: &SystemSettings,
    ) -> Result<StackOutcome>
    where
        A: AxisDrive,
        C: Shutter,
    {
        let total = plan.total_shots();
        let start = Millimeters(plan.start_mm());
        let step = plan.signed_step();
        info!(
            "stack: {} shots from {} to {} mm",
            total,
            plan.start_mm(),
            plan.end_mm()
        );

        rig.rail.move_to(start, settings)?;
        self.control.record_position(rig.rail.position().0);

        for index in 0..total {
            if !self.control.is_running() {
                break;
            }

            rig.camera.trigger(settings.trigger_duration_ms)?;
            self.control.record_shot(index + 1);
            self.clock.sleep_ms(TRIGGER_HOLD_MS);

            if index + 1 < total {
                if !self.control.is_running() {
                    break;
                }
                rig.rail.move_relative(step, settings)?;
                self.control.record_position(rig.rail.position().0);
                self.clock.sleep_ms(plan.delay_ms);
            }
        }

        let shots = self.control.shots_taken();
        if !self.control.is_running() {
            info!("stack stopped after {} of {} shots", shots, total);
            self.control.finish();
            return Ok(StackOutcome::Stopped { shots });
        }

        if plan.return_to_start {
            rig.rail.move_to(start, settings)?;
            self.control.record_position(rig.rail.position().0);
            if !self.control.is_running() {
                info!("stack stopped during return, {} shots", shots);
                self.control.finish();
                return Ok(StackOutcome::Stopped { shots });
            }
        }

        info!("stack complete: {} shots", shots);
        self.control.await_ack();
        while self.control.is_running() && !self.control.take_ack() {
            self.clock.sleep_ms(ACK_POLL_MS);
        }
        self.control.finish();
        Ok(StackOutcome::Completed { shots })
    }
}

#[cfg(all(test, feature = "std"))]
mod tests {
    use super::*;
    use crate::axis::AxisTuning;
    use crate::config::units::Steps;
    use crate::config::RailConfig;
    use crate::sim::SimClock;
    use crate::stack::StackPhase;
    use std::sync::Arc;

    #[derive(Debug, Default)]
    struct LogAxis {
        moves: std::vec::Vec<i64>,
        /// Raises a stop from inside the first move toward home.
        stop_on_reverse: Option<Arc<StackControl>>,
    }

    impl AxisDrive for LogAxis {
        fn move_steps(&mut self, steps: Steps, _tuning: &AxisTuning) -> Result<()> {
            if steps.0 < 0 {
                if let Some(control) = self.stop_on_reverse.take() {
                    control.request_stop();
                }
            }
            if steps.0 != 0 {
                self.moves.push(steps.0);
            }
            Ok(())
        }
        fn enable(&mut self, _enabled: bool) -> Result<()> {
            Ok(())
        }
        fn position_steps(&self) -> Steps {
            Steps(self.moves.iter().sum())
        }
        fn reset_position(&mut self) {}
    }

    /// Stops the run from inside the trigger of shot `stop_on`.
    #[derive(Debug)]
    struct StoppingCamera {
        control: Arc<StackControl>,
        stop_on: Option<u32>,
        fired: u32,
    }

    impl Shutter for StoppingCamera {
        fn trigger(&mut self, _duration_ms: u32) -> Result<()> {
            self.fired += 1;
            if self.stop_on == Some(self.fired) {
                self.control.request_stop();
            }
            Ok(())
        }
    }

    fn rig(control: &Arc<StackControl>, stop_on: Option<u32>) -> Rig<LogAxis, StoppingCamera> {
        let rail_config = RailConfig {
            homed: true,
            ..RailConfig::default()
        };
        Rig::new(
            Rail::new(LogAxis::default(), rail_config),
            StoppingCamera {
                control: Arc::clone(control),
                stop_on,
                fired: 0,
            },
        )
    }

    fn settings() -> SystemSettings {
        SystemSettings {
            settling_time_ms: 100,
            ..SystemSettings::default()
        }
    }

    #[test]
    fn test_stop_after_shot_skips_remaining_motion() {
        let control = Arc::new(StackControl::new());
        let mut rig = rig(&control, Some(3));
        // 1.0 -> 1.5 mm at 100um: 6 shots
        let plan = StackPlan::new(1.0, 1.5, 100.0, 200, false, true);
        let clock = SimClock::new();

        control.arm(0.0);
        let outcome = StackSequencer::new(&control, clock.clone()).run(&mut rig, &plan, &settings());

        assert_eq!(outcome, StackOutcome::Stopped { shots: 3 });
        // Hold after each of the 3 shots, delay after the 2 moves
        assert_eq!(clock.now_ms(), 3 * u64::from(TRIGGER_HOLD_MS) + 2 * 200);
        assert_eq!(rig.camera.fired, 3);
        // Move to start, then two inter-shot moves; no return to start
        assert_eq!(rig.rail.axis().moves, vec![1600, 160, 160]);
        assert_eq!(control.phase(), StackPhase::Idle);
    }

    #[test]
    fn test_completed_run_returns_and_waits_for_ack() {
        let control = Arc::new(StackControl::new());
        let mut rig = rig(&control, None);
        let plan = StackPlan::new(0.5, 0.75, 100.0, 0, false, true);
        assert_eq!(plan.total_shots(), 3);

        control.arm(0.0);
        let waiter = Arc::clone(&control);
        let acker = std::thread::spawn(move || {
            while !waiter.acknowledge() {
                std::thread::yield_now();
            }
        });
        let outcome = StackSequencer::new(&control, SimClock::new()).run(&mut rig, &plan, &settings());
        acker.join().unwrap();

        assert_eq!(outcome, StackOutcome::Completed { shots: 3 });
        let moves = &rig.rail.axis().moves;
        assert_eq!(moves.first(), Some(&800));
        // Return to start undoes the two inter-shot moves
        assert_eq!(moves.last(), Some(&-320));
        assert_eq!(rig.rail.position(), Millimeters(0.5));
        assert!(!control.is_running());
    }

    #[test]
    fn test_stop_during_return_ends_stopped() {
        let control = Arc::new(StackControl::new());
        let axis = LogAxis {
            stop_on_reverse: Some(Arc::clone(&control)),
            ..LogAxis::default()
        };
        let rail_config = RailConfig {
            homed: true,
            ..RailConfig::default()
        };
        let mut rig = Rig::new(
            Rail::new(axis, rail_config),
            StoppingCamera {
                control: Arc::clone(&control),
                stop_on: None,
                fired: 0,
            },
        );
        let plan = StackPlan::new(0.5, 0.75, 100.0, 0, false, true);

        control.arm(0.0);
        let outcome = StackSequencer::new(&control, SimClock::new()).run(&mut rig, &plan, &settings());

        assert_eq!(outcome, StackOutcome::Stopped { shots: 3 });
        // The return move itself still completes
        assert_eq!(rig.rail.axis().moves.last(), Some(&-320));
        assert_eq!(control.phase(), StackPhase::Idle);
    }

    #[test]
    fn test_reverse_direction_steps_away_from_end() {
        let control = Arc::new(StackControl::new());
        let mut rig = rig(&control, Some(2));
        let plan = StackPlan::new(5.0, 6.0, 50.0, 0, true, false);

        control.arm(0.0);
        StackSequencer::new(&control, SimClock::new()).run(&mut rig, &plan, &settings());
        assert_eq!(rig.rail.axis().moves, vec![8000, -80]);
    }

    #[test]
    fn test_unhomed_rail_faults() {
        let control = Arc::new(StackControl::new());
        let mut rig = rig(&control, None);
        rig.rail.reset_calibration();
        let plan = StackPlan::new(1.0, 2.0, 100.0, 0, false, false);

        control.arm(0.0);
        let outcome = StackSequencer::new(&control, SimClock::new()).run(&mut rig, &plan, &settings());
        assert!(matches!(outcome, StackOutcome::Faulted { shots: 0, .. }));
        assert!(!control.is_running());
    }
}
