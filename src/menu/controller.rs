//! The menu task (std only).
//!
//! Single consumer of the encoder queue. Interprets events against the
//! current screen, edits the records, runs the blocking operator actions
//! (homing, test moves, single shots) and hands the rig to the stack
//! runner for the duration of a focus stack.

use std::sync::Arc;

use crate::axis::{AxisDrive, Rail};
use crate::camera::{Shutter, TRIGGER_HOLD_MS};
use crate::clock::Clock;
use crate::config::{MenuOptions, Millimeters, RailConfig, SettingsRecord, StackPlan, SystemSettings};
use crate::display::{
    draw_complete_prompt, draw_confirm_prompt, draw_homing_prompt, draw_trigger_indicator, Notice,
    Surface,
};
use crate::error::{Error, RejectReason, Result};
use crate::input::{EncoderEvent, EventPump, EventQueue};
use crate::stack::{ProgressSnapshot, Rig, StackControl, StackOutcome, StackPhase, StackRunner};
use crate::store::SettingsStore;

use super::edit::{adjust, Adjustment, Records};
use super::render::{render_screen, View};
use super::screen::{Action, Field, ItemKind, Screen, Toggle};
use super::session::MenuSession;

/// Fields stored in the rail record, which travels with the rig.
fn edits_rail(field: Field) -> bool {
    matches!(
        field,
        Field::RailStepSize | Field::StepsPerMm | Field::MaxTravel
    )
}

/// Menu state machine bound to its peripherals.
///
/// # Type Parameters
///
/// - `A`: stepper axis behind the rail
/// - `C`: camera shutter
/// - `S`: display surface
/// - `P`: settings store
/// - `K`: task clock, shared with the stack runner
pub struct MenuController<'q, A, C, S, P, K>
where
    A: AxisDrive + Send + 'static,
    C: Shutter + Send + 'static,
    S: Surface,
    P: SettingsStore,
    K: Clock + Clone + Send + 'static,
{
    pump: EventPump<'q, K>,
    surface: S,
    store: P,
    options: MenuOptions,

    /// Present while the menu owns the axis and camera.
    rig: Option<Rig<A, C>>,
    /// Last known rail record; authoritative only while the rig is away.
    rail: RailConfig,
    plan: StackPlan,
    settings: SystemSettings,
    move_target_mm: f32,

    session: MenuSession,
    control: Arc<StackControl>,
    runner: Option<StackRunner<A, C>>,
    last_press_ms: Option<u64>,
    last_progress: Option<ProgressSnapshot>,
    drawn_position_mm: f32,
}

impl<'q, A, C, S, P, K> MenuController<'q, A, C, S, P, K>
where
    A: AxisDrive + Send + 'static,
    C: Shutter + Send + 'static,
    S: Surface,
    P: SettingsStore,
    K: Clock + Clone + Send + 'static,
{
    /// Bind the menu to its peripherals. Records start at their defaults
    /// until [`boot`](Self::boot) loads the saved ones.
    pub fn new(
        queue: &'q EventQueue,
        rig: Rig<A, C>,
        surface: S,
        store: P,
        clock: K,
        options: MenuOptions,
    ) -> Self {
        let mut pump = EventPump::new(queue, clock);
        if options.coalesce_rotation {
            pump = pump.with_coalescing(options.coalesce_window_ms);
        }

        Self {
            pump,
            surface,
            store,
            options,
            rail: *rig.rail.config(),
            rig: Some(rig),
            plan: StackPlan::default(),
            settings: SystemSettings::default(),
            move_target_mm: 0.0,
            session: MenuSession::new(),
            control: Arc::new(StackControl::new()),
            runner: None,
            last_press_ms: None,
            last_progress: None,
            drawn_position_mm: 0.0,
        }
    }

    /// Load the saved records, falling back to defaults, and draw the
    /// first frame.
    pub fn boot(&mut self) {
        match self.store.load() {
            Ok(Some(record)) => {
                let (rail, plan, settings) = record.restore();
                self.install_rail(rail);
                self.plan = plan;
                self.settings = settings;
                info!("settings loaded, rail travel {} mm", self.rail.max_travel_mm);
            }
            Ok(None) => info!("no saved settings, using defaults"),
            Err(e) => {
                warn!("saved settings unusable, using defaults: {}", e);
            }
        }
        self.move_target_mm = self.rail.current_position_mm;
        self.session.request_redraw();
        self.refresh();
    }

    /// Run the menu forever.
    pub fn run(&mut self) -> ! {
        loop {
            self.step();
        }
    }

    /// One loop iteration: wait up to a tick for an event, handle it,
    /// refresh stack progress, redraw if anything changed.
    pub fn step(&mut self) {
        if let Some(event) = self.pump.next(self.options.tick_ms) {
            self.handle_event(event);
        }
        self.tick();
        self.refresh();
    }

    /// Apply one encoder event.
    pub fn handle_event(&mut self, event: EncoderEvent) {
        match event {
            EncoderEvent::Rotate(direction) => self.on_rotate(i32::from(direction)),
            EncoderEvent::ButtonPressed => self.on_press(),
        }
    }

    /// Navigation state.
    pub fn session(&self) -> &MenuSession {
        &self.session
    }

    /// Rail record as last seen by the menu.
    pub fn rail(&self) -> &RailConfig {
        &self.rail
    }

    /// Stack plan.
    pub fn plan(&self) -> &StackPlan {
        &self.plan
    }

    /// System settings.
    pub fn settings(&self) -> &SystemSettings {
        &self.settings
    }

    /// Shared stack state.
    pub fn control(&self) -> &StackControl {
        &self.control
    }

    /// The rig, unless a stack run holds it.
    pub fn rig(&self) -> Option<&Rig<A, C>> {
        self.rig.as_ref()
    }

    /// Whether a stack run still holds the rig.
    pub fn stack_active(&self) -> bool {
        self.runner.is_some()
    }

    /// The settings store.
    pub fn store(&self) -> &P {
        &self.store
    }

    /// The display surface.
    pub fn surface(&self) -> &S {
        &self.surface
    }

    fn clock(&self) -> &K {
        self.pump.clock()
    }

    fn on_rotate(&mut self, direction: i32) {
        let delta = direction * self.settings.sensitivity();

        if !self.session.edit_mode() {
            self.session.rotate_selection(delta);
            return;
        }

        if let Some(ItemKind::Edit(field)) = self.session.selected_item().map(|item| item.kind) {
            if let Err(e) = self.edit(field, delta) {
                self.report(e);
            }
        }
        if matches!(self.session.screen(), Screen::AutoStack | Screen::ManualControl) {
            self.plan.recompute();
        }
        self.session.request_redraw();
    }

    fn edit(&mut self, field: Field, delta: i32) -> Result<()> {
        if edits_rail(field) && self.rig.is_none() {
            return Err(RejectReason::Busy.into());
        }

        let mut rail = self.rail;
        let adjustment = adjust(
            field,
            delta,
            &mut Records {
                rail: &mut rail,
                plan: &mut self.plan,
                settings: &mut self.settings,
                move_target_mm: &mut self.move_target_mm,
            },
        );

        match adjustment {
            Adjustment::Updated => {
                if field == Field::MaxTravel {
                    self.rail_mut()?.set_max_travel(rail.max_travel_mm);
                    self.sync_rail();
                } else if edits_rail(field) {
                    self.install_rail(rail);
                }
                Ok(())
            }
            Adjustment::Jog(distance) => {
                let settings = self.settings;
                self.rail_mut()?.move_relative(distance, &settings)?;
                self.sync_rail();
                Ok(())
            }
        }
    }

    fn on_press(&mut self) {
        let now = self.clock().now_ms();
        if let Some(last) = self.last_press_ms {
            if now.saturating_sub(last) < u64::from(self.options.press_debounce_ms) {
                trace!("press ignored, {} ms after previous", now.saturating_sub(last));
                return;
            }
        }
        self.last_press_ms = Some(now);
        self.session.request_redraw();

        if self.control.phase() == StackPhase::AwaitingAck {
            self.control.acknowledge();
            return;
        }
        if self.control.is_running() {
            self.stop_stack();
            return;
        }

        let Some(item) = self.session.selected_item() else {
            return;
        };
        let result = match item.kind {
            ItemKind::Nav(screen) => {
                self.session.set_screen(screen);
                Ok(())
            }
            ItemKind::Edit(field) => {
                let editing = self.session.toggle_edit();
                if !editing && field == Field::MoveTarget {
                    self.move_rail_to(Millimeters(self.move_target_mm))
                } else {
                    Ok(())
                }
            }
            ItemKind::Toggle(toggle) => {
                self.flip(toggle);
                Ok(())
            }
            ItemKind::Action(action) => self.perform(action),
            ItemKind::Readout(_) => Ok(()),
        };

        if let Err(e) = result {
            self.report(e);
        }
    }

    fn flip(&mut self, toggle: Toggle) {
        match toggle {
            Toggle::Beep => self.settings.beep_enabled = !self.settings.beep_enabled,
            Toggle::ReverseDirection => {
                self.plan.reverse_direction = !self.plan.reverse_direction
            }
            Toggle::ReturnToStart => self.plan.return_to_start = !self.plan.return_to_start,
        }
    }

    fn perform(&mut self, action: Action) -> Result<()> {
        let settings = self.settings;
        match action {
            Action::HomeRail => self.home_rail(),
            Action::TakePhoto => {
                let rig = self.rig.as_mut().ok_or(Error::Rejected(RejectReason::Busy))?;
                draw_trigger_indicator(&mut self.surface);
                rig.camera.trigger(settings.trigger_duration_ms)?;
                self.pump.clock().sleep_ms(TRIGGER_HOLD_MS);
                Ok(())
            }
            Action::StartStack => self.start_stack(),
            Action::SetStartHere => {
                self.plan.set_start_mm(self.rail.current_position_mm);
                Ok(())
            }
            Action::SetEndHere => {
                self.plan.set_end_mm(self.rail.current_position_mm);
                Ok(())
            }
            Action::SaveSettings => {
                self.save_settings();
                Ok(())
            }
            Action::TestMove(mm) => {
                self.rail_mut()?.move_relative(Millimeters(f32::from(mm)), &settings)?;
                self.sync_rail();
                Ok(())
            }
            Action::ResetPosition => {
                self.rail_mut()?.reset_calibration();
                self.sync_rail();
                Ok(())
            }
            Action::StopStack => {
                if self.control.is_running() {
                    self.stop_stack();
                } else {
                    self.session.set_screen(Screen::AutoStack);
                }
                Ok(())
            }
            Action::FactoryReset => self.factory_reset(),
        }
    }

    fn home_rail(&mut self) -> Result<()> {
        if self.rig.is_none() {
            return Err(RejectReason::Busy.into());
        }
        draw_homing_prompt(&mut self.surface);
        self.pump.wait_for_press(None);
        self.last_press_ms = Some(self.clock().now_ms());

        self.rail_mut()?.home();
        self.sync_rail();
        self.move_target_mm = 0.0;
        self.show_notice(Notice::Homed);
        Ok(())
    }

    fn start_stack(&mut self) -> Result<()> {
        if self.rig.is_none() || self.control.is_running() {
            return Err(RejectReason::Busy.into());
        }
        if !self.rail.homed {
            return Err(RejectReason::NotHomed.into());
        }
        let total = self.plan.total_shots();
        if total == 0 {
            return Err(RejectReason::InvalidStackPlan.into());
        }

        let timeout_ms = self.options.confirm_timeout_ms;
        draw_confirm_prompt(&mut self.surface, total, self.plan.distance().0, timeout_ms);
        if !self.pump.wait_for_press(Some(timeout_ms)) {
            debug!("stack start not confirmed within {} ms", timeout_ms);
            return Ok(());
        }
        self.last_press_ms = Some(self.clock().now_ms());

        let Some(rig) = self.rig.take() else {
            return Err(RejectReason::Busy.into());
        };
        self.plan.shots_taken = 0;
        self.control.arm(rig.rail.position().0);
        self.last_progress = None;
        self.session.set_screen(Screen::StackProgress);

        let clock = self.clock().clone();
        match StackRunner::spawn(rig, self.plan, self.settings, Arc::clone(&self.control), clock) {
            Ok(runner) => {
                info!("stack armed: {} shots", total);
                self.runner = Some(runner);
                Ok(())
            }
            Err((rig, e)) => {
                self.control.finish();
                self.rig = Some(rig);
                self.session.set_screen(Screen::AutoStack);
                Err(e)
            }
        }
    }

    fn stop_stack(&mut self) {
        info!("stack stop requested at shot {}", self.control.shots_taken());
        self.control.request_stop();
        self.show_notice(Notice::Stopping);
        self.session.set_screen(Screen::AutoStack);
    }

    fn save_settings(&mut self) {
        let record = SettingsRecord::capture(&self.rail, &self.plan, &self.settings);
        match self.store.save(&record) {
            Ok(()) => {
                info!("settings saved");
                self.show_notice(Notice::Saved);
            }
            Err(e) => {
                error!("settings save failed: {}", e);
                self.show_notice(Notice::SaveFailed);
            }
        }
    }

    fn factory_reset(&mut self) -> Result<()> {
        if self.rig.is_none() {
            return Err(RejectReason::Busy.into());
        }
        self.rail_mut()?.reset_calibration();
        self.install_rail(RailConfig::default());
        self.plan = StackPlan::default();
        self.settings = SystemSettings::default();
        self.move_target_mm = 0.0;
        info!("factory defaults restored");
        self.show_notice(Notice::DefaultsRestored);
        self.session.set_screen(Screen::Main);
        Ok(())
    }

    fn move_rail_to(&mut self, target: Millimeters) -> Result<()> {
        let settings = self.settings;
        self.rail_mut()?.move_to(target, &settings)?;
        self.sync_rail();
        Ok(())
    }

    fn rail_mut(&mut self) -> Result<&mut Rail<A>> {
        match self.rig.as_mut() {
            Some(rig) => Ok(&mut rig.rail),
            None => Err(RejectReason::Busy.into()),
        }
    }

    /// Replace the rail record, on the rig too if the menu holds it.
    fn install_rail(&mut self, rail: RailConfig) {
        if let Some(rig) = self.rig.as_mut() {
            *rig.rail.config_mut() = rail;
        }
        self.rail = rail;
    }

    fn sync_rail(&mut self) {
        if let Some(rig) = self.rig.as_ref() {
            self.rail = *rig.rail.config();
        }
    }

    fn report(&mut self, e: Error) {
        let notice = match e {
            Error::Rejected(RejectReason::NotHomed) => Notice::NotHomed,
            Error::Rejected(RejectReason::InvalidStackPlan) => Notice::InvalidStack,
            Error::Rejected(RejectReason::Busy) => Notice::Busy,
            _ => Notice::Fault,
        };
        if notice == Notice::Fault {
            error!("{}", e);
        } else {
            warn!("{}", e);
        }
        self.show_notice(notice);
    }

    fn show_notice(&mut self, notice: Notice) {
        notice.draw(&mut self.surface);
        self.pump.clock().sleep_ms(notice.hold_ms());
        self.session.request_redraw();
    }

    fn tick(&mut self) {
        if self.runner.as_ref().is_some_and(|runner| runner.is_finished()) {
            if let Some(runner) = self.runner.take() {
                self.reclaim(runner);
            }
        }

        if self.runner.is_some() {
            let snapshot = self.control.snapshot();
            if self.last_progress != Some(snapshot) {
                self.plan.shots_taken = snapshot.shots_taken;
                self.rail.current_position_mm = snapshot.position_mm;
                self.last_progress = Some(snapshot);
                self.session.request_redraw();
            }
        }

        if self.session.screen() == Screen::ManualControl
            && libm::fabsf(self.rail.current_position_mm - self.drawn_position_mm) > 0.001
        {
            self.session.request_redraw();
        }
    }

    fn reclaim(&mut self, runner: StackRunner<A, C>) {
        self.last_progress = None;
        if self.session.screen() == Screen::StackProgress {
            self.session.set_screen(Screen::AutoStack);
        }
        self.session.request_redraw();

        let Some((rig, outcome)) = runner.join() else {
            return;
        };
        self.rail = *rig.rail.config();
        self.rig = Some(rig);
        self.plan.shots_taken = outcome.shots();
        debug!("rig reclaimed after {} shots", outcome.shots());

        if let StackOutcome::Faulted { error, .. } = outcome {
            self.report(error);
        }
    }

    fn refresh(&mut self) {
        if !self.session.take_redraw() {
            return;
        }

        if self.control.phase() == StackPhase::AwaitingAck {
            draw_complete_prompt(&mut self.surface, self.control.shots_taken());
            return;
        }

        let view = View {
            screen: self.session.screen(),
            selection: self.session.selection(),
            edit_mode: self.session.edit_mode(),
            rail: &self.rail,
            plan: &self.plan,
            settings: &self.settings,
            move_target_mm: self.move_target_mm,
        };
        render_screen(&mut self.surface, &view);
        self.drawn_position_mm = self.rail.current_position_mm;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::EVENT_QUEUE_CAPACITY;
    use crate::sim::{sim_rig, RecordingSurface, RigProbes, SimAxis, SimCamera, SimClock};
    use crate::store::MemoryStore;

    type TestMenu<'q> =
        MenuController<'q, SimAxis, SimCamera, RecordingSurface, MemoryStore, SimClock>;

    struct Bench {
        queue: EventQueue,
        clock: SimClock,
        surface: RecordingSurface,
    }

    impl Bench {
        fn new() -> Self {
            Self {
                queue: EventQueue::new(),
                clock: SimClock::new(),
                surface: RecordingSurface::new(),
            }
        }

        fn menu(&self, rail: RailConfig) -> (TestMenu<'_>, RigProbes) {
            let (rig, probes) = sim_rig(rail).unwrap();
            let mut menu = MenuController::new(
                &self.queue,
                rig,
                self.surface.clone(),
                MemoryStore::new(),
                self.clock.clone(),
                MenuOptions::default(),
            );
            menu.boot();
            (menu, probes)
        }

        /// Press, then let the debounce window pass.
        fn press(&self, menu: &mut TestMenu<'_>) {
            menu.handle_event(EncoderEvent::ButtonPressed);
            self.clock.advance(250);
        }

        fn homed() -> RailConfig {
            RailConfig {
                homed: true,
                ..RailConfig::default()
            }
        }
    }

    #[test]
    fn test_boot_draws_main() {
        let bench = Bench::new();
        let (menu, _) = bench.menu(RailConfig::default());
        assert_eq!(menu.session().screen(), Screen::Main);
        assert!(bench.surface.shows("MACRO RAIL"));
        assert!(bench.surface.shows("NOT HOMED"));
        assert_eq!(EVENT_QUEUE_CAPACITY, 16);
    }

    #[test]
    fn test_press_navigates_and_back() {
        let bench = Bench::new();
        let (mut menu, _) = bench.menu(RailConfig::default());

        menu.handle_event(EncoderEvent::Rotate(1));
        bench.press(&mut menu);
        assert_eq!(menu.session().screen(), Screen::AutoStack);

        menu.handle_event(EncoderEvent::Rotate(-1));
        assert_eq!(menu.session().selection(), 10);
        bench.press(&mut menu);
        assert_eq!(menu.session().screen(), Screen::Main);
    }

    #[test]
    fn test_presses_inside_debounce_are_ignored() {
        let bench = Bench::new();
        let (mut menu, _) = bench.menu(RailConfig::default());

        menu.handle_event(EncoderEvent::ButtonPressed);
        assert_eq!(menu.session().screen(), Screen::ManualControl);
        bench.clock.advance(100);
        menu.handle_event(EncoderEvent::ButtonPressed);
        assert!(!menu.session().edit_mode());
        bench.clock.advance(150);
        menu.handle_event(EncoderEvent::ButtonPressed);
        assert!(menu.session().edit_mode());
    }

    #[test]
    fn test_rotation_scaled_by_sensitivity() {
        let bench = Bench::new();
        let (mut menu, _) = bench.menu(RailConfig::default());
        menu.settings.encoder_sensitivity = 3;

        menu.handle_event(EncoderEvent::Rotate(1));
        assert_eq!(menu.session().selection(), 3);
        menu.handle_event(EncoderEvent::Rotate(1));
        assert_eq!(menu.session().selection(), 1);
    }

    #[test]
    fn test_jog_refused_until_homed() {
        let bench = Bench::new();
        let (mut menu, probes) = bench.menu(RailConfig::default());

        bench.press(&mut menu); // Manual Control
        bench.press(&mut menu); // edit Position
        menu.handle_event(EncoderEvent::Rotate(1));

        assert_eq!(probes.step.pulses(), 0);
        assert_eq!(menu.rail().current_position_mm, 0.0);
        assert!(bench.surface.shows("RAIL NOT HOMED!"));
    }

    #[test]
    fn test_homing_waits_for_confirmation() {
        let bench = Bench::new();
        let (mut menu, _) = bench.menu(RailConfig {
            current_position_mm: 12.0,
            ..RailConfig::default()
        });

        bench.press(&mut menu); // Manual Control
        menu.handle_event(EncoderEvent::Rotate(3));
        bench.queue.push(EncoderEvent::ButtonPressed);
        bench.press(&mut menu); // Home Rail

        assert!(menu.rail().homed);
        assert_eq!(menu.rail().current_position_mm, 0.0);
        assert!(bench.queue.pop().is_none());
    }

    #[test]
    fn test_homing_confirmation_counts_as_press() {
        let bench = Bench::new();
        let (mut menu, _) = bench.menu(RailConfig::default());

        bench.press(&mut menu); // Manual Control
        menu.handle_event(EncoderEvent::Rotate(3));
        let queue = &bench.queue;
        let clock = bench.clock.clone();
        std::thread::scope(|scope| {
            scope.spawn(move || {
                while clock.now_ms() < 5000 {
                    std::thread::yield_now();
                }
                queue.push(EncoderEvent::ButtonPressed);
            });
            menu.handle_event(EncoderEvent::ButtonPressed); // Home Rail
        });

        assert!(menu.rail().homed);
        assert!(menu.last_press_ms.is_some_and(|at| at >= 5000));
    }

    #[test]
    fn test_test_move_updates_position() {
        let bench = Bench::new();
        let (mut menu, probes) = bench.menu(Bench::homed());

        menu.handle_event(EncoderEvent::Rotate(3));
        bench.press(&mut menu); // Calibration
        menu.handle_event(EncoderEvent::Rotate(5));
        bench.press(&mut menu); // Test Move 10mm

        assert_eq!(probes.step.pulses(), 16000);
        assert_eq!(menu.rail().current_position_mm, 10.0);
        assert_eq!(menu.rail().total_steps, 16000);
    }

    #[test]
    fn test_max_travel_edit_clamps_carriage_and_stack() {
        let bench = Bench::new();
        let (mut menu, probes) = bench.menu(RailConfig {
            current_position_mm: 95.0,
            ..Bench::homed()
        });
        menu.plan = StackPlan::new(10.0, 95.0, 50.0, 0, false, false);

        menu.handle_event(EncoderEvent::Rotate(3));
        bench.press(&mut menu); // Calibration
        menu.handle_event(EncoderEvent::Rotate(1));
        bench.press(&mut menu); // edit Max Travel
        for _ in 0..10 {
            menu.handle_event(EncoderEvent::Rotate(-1));
        }

        assert_eq!(menu.rail().max_travel_mm, 90.0);
        assert_eq!(menu.rail().current_position_mm, 90.0);
        assert_eq!(menu.rig().map(|rig| rig.rail.position().0), Some(90.0));
        assert_eq!(menu.plan().end_mm(), 90.0);
        // Logical clamp only, the carriage is not driven
        assert_eq!(probes.step.pulses(), 0);
    }

    #[test]
    fn test_start_rejected_when_not_homed() {
        let bench = Bench::new();
        let (mut menu, _) = bench.menu(RailConfig::default());

        menu.handle_event(EncoderEvent::Rotate(1));
        bench.press(&mut menu); // Auto Stack
        menu.handle_event(EncoderEvent::Rotate(5));
        bench.press(&mut menu); // START STACK

        assert!(bench.surface.shows("RAIL NOT HOMED!"));
        assert!(!menu.control().is_running());
        assert!(menu.rig().is_some());
    }

    #[test]
    fn test_start_rejected_with_empty_plan() {
        let bench = Bench::new();
        let (mut menu, _) = bench.menu(Bench::homed());
        menu.plan = StackPlan::new(3.0, 3.0, 50.0, 100, false, false);

        menu.handle_event(EncoderEvent::Rotate(1));
        bench.press(&mut menu);
        menu.handle_event(EncoderEvent::Rotate(5));
        bench.press(&mut menu);

        assert!(bench.surface.shows("INVALID STACK"));
        assert!(!menu.stack_active());
    }

    #[test]
    fn test_confirmation_timeout_cancels() {
        let bench = Bench::new();
        let (mut menu, _) = bench.menu(Bench::homed());

        menu.handle_event(EncoderEvent::Rotate(1));
        bench.press(&mut menu);
        menu.handle_event(EncoderEvent::Rotate(5));
        let before = bench.clock.now_ms();
        bench.press(&mut menu);

        assert!(bench.clock.now_ms() - before >= 10_000);
        assert!(!menu.stack_active());
        assert_eq!(menu.session().screen(), Screen::AutoStack);
    }

    #[test]
    fn test_save_writes_store() {
        let bench = Bench::new();
        let (mut menu, _) = bench.menu(RailConfig::default());
        menu.settings.brightness = 55;

        menu.handle_event(EncoderEvent::Rotate(2));
        bench.press(&mut menu); // Settings
        menu.handle_event(EncoderEvent::Rotate(6));
        bench.press(&mut menu); // SAVE SETTINGS

        assert_eq!(menu.store().record().map(|r| r.brightness), Some(55));
        assert!(bench.surface.shows("SAVED!"));
    }

    #[test]
    fn test_factory_reset_restores_defaults() {
        let bench = Bench::new();
        let (mut menu, _) = bench.menu(Bench::homed());
        menu.plan.delay_ms = 9000;

        menu.handle_event(EncoderEvent::Rotate(4));
        bench.press(&mut menu); // Advanced
        menu.handle_event(EncoderEvent::Rotate(6));
        bench.press(&mut menu); // Factory Reset

        assert_eq!(menu.session().screen(), Screen::Main);
        assert_eq!(*menu.plan(), StackPlan::default());
        assert!(!menu.rail().homed);
    }
}
