//! Unit tests for settings record parsing and restoring.

use macro_rail::config::{parse_record, render_record, SettingsRecord};
use macro_rail::error::{ConfigError, Error};

/// A complete record as written by the firmware.
const FULL_RECORD: &str = r#"
step_size_microns = 2.5
max_travel_mm = 80.0
current_position_mm = 12.5
total_steps = 20000
steps_per_mm = 1600
homed = true
stack_start_mm = 10.0
stack_end_mm = 12.0
stack_step_microns = 100.0
stack_delay_ms = 1500
reverse_direction = true
return_to_start = false
brightness = 60
trigger_duration_ms = 150
settling_time_ms = 300
beep_enabled = false
backlash_microns = 30.0
encoder_sensitivity = 2
"#;

#[test]
fn test_parse_full_record() {
    let record = parse_record(FULL_RECORD).expect("Failed to parse record");

    assert_eq!(record.step_size_microns, 2.5);
    assert_eq!(record.max_travel_mm, 80.0);
    assert_eq!(record.stack_delay_ms, 1500);
    assert!(record.reverse_direction);
    assert!(!record.return_to_start);
    assert_eq!(record.encoder_sensitivity, 2);
}

#[test]
fn test_restore_never_comes_back_homed() {
    let record = parse_record(FULL_RECORD).unwrap();
    let (rail, plan, settings) = record.restore();

    assert!(!rail.homed);
    assert_eq!(rail.current_position_mm, 12.5);
    // 2.0mm at 100um
    assert_eq!(plan.total_shots(), 21);
    assert_eq!(plan.shots_taken, 0);
    assert_eq!(settings.backlash_microns, 30.0);
}

#[test]
fn test_restore_clamps_out_of_range_values() {
    let record = SettingsRecord {
        max_travel_mm: 50.0,
        current_position_mm: 75.0,
        brightness: 3,
        trigger_duration_ms: 1,
        encoder_sensitivity: 0,
        ..SettingsRecord::default()
    };
    let (rail, _, settings) = record.restore();

    assert_eq!(rail.current_position_mm, 50.0);
    assert_eq!(settings.brightness, 10);
    assert_eq!(settings.trigger_duration_ms, 50);
    assert_eq!(settings.encoder_sensitivity, 1);
}

#[test]
fn test_empty_record_is_all_defaults() {
    let record = parse_record("").unwrap();
    assert_eq!(record, SettingsRecord::default());
}

#[test]
fn test_zero_travel_rejected() {
    let result = parse_record("max_travel_mm = 0.0");
    assert!(matches!(
        result,
        Err(Error::Config(ConfigError::InvalidMaxTravel(_)))
    ));
}

#[test]
fn test_rendered_record_uses_unit_suffixed_keys() {
    let text = render_record(&SettingsRecord::default()).unwrap();
    for key in ["steps_per_mm", "stack_step_microns", "settling_time_ms", "backlash_microns"] {
        assert!(text.contains(key), "missing {}", key);
    }
}
