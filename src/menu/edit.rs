//! Per-field edit rules.
//!
//! A rotation in edit mode arrives here as a sensitivity-scaled detent
//! count. Each field applies its own increment and clamp; stack plan edits
//! go through the plan's setters so the shot count is always recomputed.

use super::screen::Field;
use crate::config::{
    clamp_i32, Millimeters, RailConfig, StackPlan, SystemSettings, BRIGHTNESS_RANGE,
    MIN_SETTLING_MS, MIN_TRIGGER_MS, SENSITIVITY_RANGE,
};

/// Mutable view of the records a field edit may touch.
#[derive(Debug)]
pub struct Records<'a> {
    /// Rail geometry and position.
    pub rail: &'a mut RailConfig,
    /// Stack plan.
    pub plan: &'a mut StackPlan,
    /// System settings.
    pub settings: &'a mut SystemSettings,
    /// Pending go-to target on the manual screen.
    pub move_target_mm: &'a mut f32,
}

/// Result of applying an edit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Adjustment {
    /// A record changed in place.
    Updated,
    /// The field is the jog control; the caller should move the rail.
    Jog(Millimeters),
}

/// Apply `delta` detents (already multiplied by sensitivity) to `field`.
pub fn adjust(field: Field, delta: i32, records: &mut Records<'_>) -> Adjustment {
    let d = delta as f32;
    let max_travel = records.rail.max_travel_mm;

    match field {
        Field::Jog => {
            return Adjustment::Jog(Millimeters(d * records.rail.step_size_microns / 1000.0));
        }
        Field::MoveTarget => {
            *records.move_target_mm = clamp_f32(*records.move_target_mm + d * 0.1, 0.0, max_travel);
        }
        Field::RailStepSize => {
            records.rail.step_size_microns = (records.rail.step_size_microns + d * 0.1).max(0.1);
        }
        Field::StackStart => {
            let start = clamp_f32(records.plan.start_mm() + d * 0.1, 0.0, max_travel);
            records.plan.set_start_mm(start);
        }
        Field::StackEnd => {
            let end = clamp_f32(records.plan.end_mm() + d * 0.1, 0.0, max_travel);
            records.plan.set_end_mm(end);
        }
        Field::StackStep => {
            let step = (records.plan.step_microns() + d * 5.0).max(1.0);
            records.plan.set_step_microns(step);
        }
        Field::StackDelay => {
            records.plan.delay_ms = floor_u32(records.plan.delay_ms, delta * 100, 100);
        }
        Field::Brightness => {
            let value = records.settings.brightness as i32 + delta * 5;
            records.settings.brightness =
                clamp_i32(value, BRIGHTNESS_RANGE.0, BRIGHTNESS_RANGE.1) as u8;
        }
        Field::TriggerDuration => {
            records.settings.trigger_duration_ms =
                floor_u32(records.settings.trigger_duration_ms, delta * 10, MIN_TRIGGER_MS);
        }
        Field::SettlingTime => {
            records.settings.settling_time_ms =
                floor_u32(records.settings.settling_time_ms, delta * 50, MIN_SETTLING_MS);
        }
        Field::Backlash => {
            records.settings.backlash_microns = (records.settings.backlash_microns + d * 5.0).max(0.0);
        }
        Field::Sensitivity => {
            let value = records.settings.encoder_sensitivity as i32 + delta;
            records.settings.encoder_sensitivity =
                clamp_i32(value, SENSITIVITY_RANGE.0, SENSITIVITY_RANGE.1) as u8;
        }
        Field::StepsPerMm => {
            records.rail.steps_per_mm = records.rail.steps_per_mm.saturating_add(delta * 10).max(100);
        }
        Field::MaxTravel => {
            records.rail.max_travel_mm = (records.rail.max_travel_mm + d).max(10.0);
            records.rail.reclamp();
            records.plan.clamp_to_travel(records.rail.max_travel_mm);
        }
    }

    Adjustment::Updated
}

#[inline]
fn clamp_f32(value: f32, min: f32, max: f32) -> f32 {
    value.max(min).min(max)
}

/// Add a signed increment to an unsigned field with a lower bound.
#[inline]
fn floor_u32(value: u32, delta: i32, floor: i32) -> u32 {
    let raw = (value as i64 + delta as i64).max(floor as i64);
    raw.min(u32::MAX as i64) as u32
}
