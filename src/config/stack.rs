//! Focus stack plan.

use super::units::{Microns, Millimeters};

/// Planned focus stack.
///
/// `total_shots` is derived from start, end and step and is recomputed by
/// every setter that touches one of them, so it can never go stale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StackPlan {
    start_mm: f32,
    end_mm: f32,
    step_microns: f32,
    total_shots: u32,
    /// Shots completed in the current or last run.
    pub shots_taken: u32,
    /// Pause after each inter-shot move, in milliseconds.
    pub delay_ms: u32,
    /// Travel away from the end position instead of toward it.
    pub reverse_direction: bool,
    /// Drive back to the start position after a completed run.
    pub return_to_start: bool,
}

impl Default for StackPlan {
    fn default() -> Self {
        Self::new(0.0, 10.0, 50.0, 2000, false, true)
    }
}

/// Number of shots needed to cover `start..=end` at `step_microns` spacing.
///
/// `floor(|end - start| / (step / 1000)) + 1` when both the distance and the
/// step are positive, otherwise 0.
pub fn total_shots(start_mm: f32, end_mm: f32, step_microns: f32) -> u32 {
    let distance = libm::fabsf(end_mm - start_mm);
    let step_mm = step_microns / 1000.0;
    if distance > 0.0 && step_mm > 0.0 {
        libm::floorf(distance / step_mm) as u32 + 1
    } else {
        0
    }
}

impl StackPlan {
    /// Create a plan; `total_shots` is derived.
    pub fn new(
        start_mm: f32,
        end_mm: f32,
        step_microns: f32,
        delay_ms: u32,
        reverse_direction: bool,
        return_to_start: bool,
    ) -> Self {
        Self {
            start_mm,
            end_mm,
            step_microns,
            total_shots: total_shots(start_mm, end_mm, step_microns),
            shots_taken: 0,
            delay_ms,
            reverse_direction,
            return_to_start,
        }
    }

    /// Stack start position.
    #[inline]
    pub fn start_mm(&self) -> f32 {
        self.start_mm
    }

    /// Stack end position.
    #[inline]
    pub fn end_mm(&self) -> f32 {
        self.end_mm
    }

    /// Distance between shots in microns.
    #[inline]
    pub fn step_microns(&self) -> f32 {
        self.step_microns
    }

    /// Derived shot count.
    #[inline]
    pub fn total_shots(&self) -> u32 {
        self.total_shots
    }

    /// Set the start position.
    pub fn set_start_mm(&mut self, start_mm: f32) {
        self.start_mm = start_mm;
        self.recompute();
    }

    /// Set the end position.
    pub fn set_end_mm(&mut self, end_mm: f32) {
        self.end_mm = end_mm;
        self.recompute();
    }

    /// Set the distance between shots.
    pub fn set_step_microns(&mut self, step_microns: f32) {
        self.step_microns = step_microns;
        self.recompute();
    }

    /// Pull start and end back inside `[0, max_travel_mm]`.
    pub fn clamp_to_travel(&mut self, max_travel_mm: f32) {
        self.set_start_mm(self.start_mm.max(0.0).min(max_travel_mm));
        self.set_end_mm(self.end_mm.max(0.0).min(max_travel_mm));
    }

    /// Recompute `total_shots` from start, end and step.
    pub fn recompute(&mut self) {
        self.total_shots = total_shots(self.start_mm, self.end_mm, self.step_microns);
    }

    /// Absolute distance covered by the stack.
    #[inline]
    pub fn distance(&self) -> Millimeters {
        Millimeters(self.end_mm - self.start_mm).abs()
    }

    /// Signed carriage move between consecutive shots.
    ///
    /// Points from start toward end, flipped when `reverse_direction` is set.
    pub fn signed_step(&self) -> Millimeters {
        let mut forward = self.end_mm > self.start_mm;
        if self.reverse_direction {
            forward = !forward;
        }
        let step = Microns(self.step_microns).to_mm();
        if forward {
            step
        } else {
            -step
        }
    }

    /// Shots still to be taken.
    #[inline]
    pub fn remaining_shots(&self) -> u32 {
        self.total_shots.saturating_sub(self.shots_taken)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_plan_shots() {
        // 10mm at 50um
        assert_eq!(StackPlan::default().total_shots(), 201);
    }

    #[test]
    fn test_zero_distance_or_step_has_no_shots() {
        assert_eq!(total_shots(5.0, 5.0, 50.0), 0);
        assert_eq!(total_shots(0.0, 5.0, 0.0), 0);
        assert_eq!(total_shots(0.0, 5.0, -10.0), 0);
    }

    #[test]
    fn test_setters_recompute() {
        let mut plan = StackPlan::default();
        plan.set_end_mm(1.0);
        assert_eq!(plan.total_shots(), 21);
        plan.set_step_microns(100.0);
        assert_eq!(plan.total_shots(), 11);
        plan.set_start_mm(1.0);
        assert_eq!(plan.total_shots(), 0);
    }

    #[test]
    fn test_clamp_to_travel_recomputes() {
        let mut plan = StackPlan::new(30.0, 50.0, 100.0, 2000, false, true);
        plan.clamp_to_travel(20.0);
        assert_eq!(plan.start_mm(), 20.0);
        assert_eq!(plan.end_mm(), 20.0);
        assert_eq!(plan.total_shots(), 0);
    }

    #[test]
    fn test_signed_step_direction() {
        let plan = StackPlan::new(0.0, 2.0, 50.0, 100, false, true);
        assert!((plan.signed_step().0 - 0.05).abs() < 1e-6);

        let plan = StackPlan::new(2.0, 0.0, 50.0, 100, false, true);
        assert!((plan.signed_step().0 + 0.05).abs() < 1e-6);

        let plan = StackPlan::new(0.0, 2.0, 50.0, 100, true, true);
        assert!((plan.signed_step().0 + 0.05).abs() < 1e-6);
    }
}
