//! Flattened persistence record.

use serde::{Deserialize, Serialize};

use super::rail::RailConfig;
use super::settings::SystemSettings;
use super::stack::StackPlan;

/// Flattened rail, stack and system settings as stored on disk.
///
/// Missing keys fall back to the defaults, so older records stay loadable.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct SettingsRecord {
    /// Rail jog step in microns.
    pub step_size_microns: f32,
    /// Rail travel in millimeters.
    pub max_travel_mm: f32,
    /// Last logical position.
    pub current_position_mm: f32,
    /// Last cumulative step count.
    pub total_steps: i32,
    /// Steps per millimeter.
    pub steps_per_mm: i32,
    /// Homed flag at save time; never restored as true.
    pub homed: bool,
    /// Stack start position.
    pub stack_start_mm: f32,
    /// Stack end position.
    pub stack_end_mm: f32,
    /// Stack step in microns.
    pub stack_step_microns: f32,
    /// Inter-shot delay.
    pub stack_delay_ms: u32,
    /// Stack travels away from the end position.
    pub reverse_direction: bool,
    /// Return to start after a completed stack.
    pub return_to_start: bool,
    /// Display brightness in percent.
    pub brightness: u8,
    /// Camera trigger pulse width.
    pub trigger_duration_ms: u32,
    /// Post-move settling delay.
    pub settling_time_ms: u32,
    /// Audible feedback.
    pub beep_enabled: bool,
    /// Backlash compensation in microns.
    pub backlash_microns: f32,
    /// Encoder sensitivity multiplier.
    pub encoder_sensitivity: u8,
}

impl Default for SettingsRecord {
    fn default() -> Self {
        Self::capture(
            &RailConfig::default(),
            &StackPlan::default(),
            &SystemSettings::default(),
        )
    }
}

impl SettingsRecord {
    /// Flatten the live records.
    pub fn capture(rail: &RailConfig, plan: &StackPlan, settings: &SystemSettings) -> Self {
        Self {
            step_size_microns: rail.step_size_microns,
            max_travel_mm: rail.max_travel_mm,
            current_position_mm: rail.current_position_mm,
            total_steps: rail.total_steps,
            steps_per_mm: rail.steps_per_mm,
            homed: rail.homed,
            stack_start_mm: plan.start_mm(),
            stack_end_mm: plan.end_mm(),
            stack_step_microns: plan.step_microns(),
            stack_delay_ms: plan.delay_ms,
            reverse_direction: plan.reverse_direction,
            return_to_start: plan.return_to_start,
            brightness: settings.brightness,
            trigger_duration_ms: settings.trigger_duration_ms,
            settling_time_ms: settings.settling_time_ms,
            beep_enabled: settings.beep_enabled,
            backlash_microns: settings.backlash_microns,
            encoder_sensitivity: settings.encoder_sensitivity,
        }
    }

    /// Rebuild the live records.
    ///
    /// Settings are clamped, the rail comes back un-homed with its position
    /// inside the travel, the stack endpoints are pulled inside the travel
    /// and the plan's shot count is derived afresh.
    pub fn restore(&self) -> (RailConfig, StackPlan, SystemSettings) {
        let mut rail = RailConfig {
            step_size_microns: self.step_size_microns,
            max_travel_mm: self.max_travel_mm,
            current_position_mm: self.current_position_mm,
            total_steps: self.total_steps,
            steps_per_mm: self.steps_per_mm,
            homed: false,
        };
        rail.reclamp();

        let mut plan = StackPlan::new(
            self.stack_start_mm,
            self.stack_end_mm,
            self.stack_step_microns,
            self.stack_delay_ms,
            self.reverse_direction,
            self.return_to_start,
        );
        plan.clamp_to_travel(rail.max_travel_mm);

        let settings = SystemSettings {
            brightness: self.brightness,
            trigger_duration_ms: self.trigger_duration_ms,
            settling_time_ms: self.settling_time_ms,
            beep_enabled: self.beep_enabled,
            backlash_microns: self.backlash_microns,
            encoder_sensitivity: self.encoder_sensitivity,
        }
        .clamped();

        (rail, plan, settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_restore_never_homes() {
        let rail = RailConfig {
            homed: true,
            current_position_mm: 12.5,
            ..RailConfig::default()
        };
        let record = SettingsRecord::capture(&rail, &StackPlan::default(), &SystemSettings::default());
        assert!(record.homed);

        let (restored, plan, _) = record.restore();
        assert!(!restored.homed);
        assert_eq!(restored.current_position_mm, 12.5);
        assert_eq!(plan.shots_taken, 0);
        assert_eq!(plan.total_shots(), 201);
    }

    #[test]
    fn test_restore_clamps_out_of_range_fields() {
        let record = SettingsRecord {
            brightness: 3,
            encoder_sensitivity: 0,
            current_position_mm: 250.0,
            ..SettingsRecord::default()
        };
        let (rail, _, settings) = record.restore();
        assert_eq!(settings.brightness, 10);
        assert_eq!(settings.encoder_sensitivity, 1);
        assert_eq!(rail.current_position_mm, 100.0);
    }

    #[test]
    fn test_restore_keeps_stack_inside_travel() {
        let record = SettingsRecord {
            max_travel_mm: 20.0,
            stack_start_mm: 5.0,
            stack_end_mm: 50.0,
            stack_step_microns: 500.0,
            ..SettingsRecord::default()
        };
        let (rail, plan, _) = record.restore();
        assert_eq!(rail.max_travel_mm, 20.0);
        assert_eq!(plan.start_mm(), 5.0);
        assert_eq!(plan.end_mm(), 20.0);
        // 15mm at 500um
        assert_eq!(plan.total_shots(), 31);
    }
}
