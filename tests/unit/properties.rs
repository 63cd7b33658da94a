//! Property tests for the shot count, menu navigation and quadrature table.

use proptest::prelude::*;

use macro_rail::config::{total_shots, StackPlan};
use macro_rail::input::quadrature::{transition, TRANSITIONS};
use macro_rail::menu::{MenuSession, Screen};

proptest! {
    #[test]
    fn prop_total_shots_formula(
        start in 0.0f32..100.0,
        end in 0.0f32..100.0,
        step in 1.0f32..500.0,
    ) {
        let distance = (end - start).abs();
        let expected = if distance > 0.0 {
            (distance / (step / 1000.0)).floor() as u32 + 1
        } else {
            0
        };
        prop_assert_eq!(total_shots(start, end, step), expected);
    }

    #[test]
    fn prop_total_shots_symmetric(
        start in 0.0f32..100.0,
        end in 0.0f32..100.0,
        step in 1.0f32..500.0,
    ) {
        prop_assert_eq!(total_shots(start, end, step), total_shots(end, start, step));
    }

    #[test]
    fn prop_recompute_is_idempotent(
        start in 0.0f32..100.0,
        end in 0.0f32..100.0,
        step in 1.0f32..500.0,
    ) {
        let mut plan = StackPlan::new(start, end, step, 1000, false, true);
        let first = plan.total_shots();
        plan.recompute();
        plan.recompute();
        prop_assert_eq!(plan.total_shots(), first);
    }

    #[test]
    fn prop_no_positive_step_means_no_shots(
        start in 0.0f32..100.0,
        end in 0.0f32..100.0,
        step in -500.0f32..=0.0,
    ) {
        prop_assert_eq!(total_shots(start, end, step), 0);
    }

    #[test]
    fn prop_selection_stays_in_range(
        screen_index in 0usize..7,
        moves in prop::collection::vec(prop_oneof![Just(-1i32), Just(1i32)], 0..64),
    ) {
        let screen = Screen::ALL[screen_index];
        let count = screen.item_count() as i64;
        let mut session = MenuSession::new();
        session.set_screen(screen);

        let mut expected: i64 = 0;
        for delta in moves {
            session.rotate_selection(delta);
            expected = (expected + i64::from(delta)).rem_euclid(count);
            prop_assert!(session.selection() < screen.item_count());
            prop_assert_eq!(session.selection() as i64, expected);
        }
    }
}

#[test]
fn test_selection_wraps_at_both_ends() {
    for screen in Screen::ALL {
        let last = screen.item_count() - 1;
        let mut session = MenuSession::new();
        session.set_screen(screen);

        session.rotate_selection(-1);
        assert_eq!(session.selection(), last, "{:?}", screen);
        session.rotate_selection(1);
        assert_eq!(session.selection(), 0, "{:?}", screen);
    }
}

#[test]
fn test_quadrature_table_properties() {
    for previous in 0u8..4 {
        for current in 0u8..4 {
            let direction = transition(previous, current);
            assert!((-1..=1).contains(&direction));
            assert_eq!(direction, TRANSITIONS[usize::from((previous << 2) | current)]);
            assert_eq!(direction, -transition(current, previous));
            if previous == current {
                assert_eq!(direction, 0);
            }
        }
    }
}
