//! Screen dispatch tables.
//!
//! Every screen maps to a static [`ScreenSpec`]: its title, layout and the
//! ordered items the selection index walks over. Input handling and
//! rendering both dispatch through these tables.

/// Menu screens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Screen {
    /// Top-level menu.
    Main,
    /// Jogging, go-to, homing and single shots.
    ManualControl,
    /// Stack plan editing and start.
    AutoStack,
    /// System settings.
    Settings,
    /// Rail geometry and test moves.
    Calibration,
    /// Live progress of a running stack.
    StackProgress,
    /// Placeholders and factory reset.
    Advanced,
}

impl Screen {
    /// All screens, in table order.
    pub const ALL: [Screen; 7] = [
        Screen::Main,
        Screen::ManualControl,
        Screen::AutoStack,
        Screen::Settings,
        Screen::Calibration,
        Screen::StackProgress,
        Screen::Advanced,
    ];

    /// Static description of this screen.
    #[inline]
    pub fn spec(self) -> &'static ScreenSpec {
        &SCREENS[self as usize]
    }

    /// Number of selectable items.
    #[inline]
    pub fn item_count(self) -> usize {
        self.spec().items.len()
    }

    /// Item at `index`, if any.
    #[inline]
    pub fn item(self, index: usize) -> Option<&'static MenuItem> {
        self.spec().items.get(index)
    }
}

/// A value edited by rotation while in edit mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Field {
    /// Moves the rail by one jog step per detent.
    Jog,
    /// Go-to target; the rail moves there when editing ends.
    MoveTarget,
    /// Rail jog step size in microns.
    RailStepSize,
    /// Stack start position.
    StackStart,
    /// Stack end position.
    StackEnd,
    /// Distance between shots.
    StackStep,
    /// Inter-shot delay.
    StackDelay,
    /// Display brightness.
    Brightness,
    /// Camera trigger pulse width.
    TriggerDuration,
    /// Post-move settling delay.
    SettlingTime,
    /// Backlash compensation.
    Backlash,
    /// Encoder sensitivity multiplier.
    Sensitivity,
    /// Rail steps per millimeter.
    StepsPerMm,
    /// Rail travel.
    MaxTravel,
}

/// A flag flipped by a press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Toggle {
    /// Audible feedback.
    Beep,
    /// Stack travels away from the end position.
    ReverseDirection,
    /// Return to start after a completed stack.
    ReturnToStart,
}

/// A read-only value shown in a list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Readout {
    /// Derived shot count of the stack plan.
    TotalShots,
}

/// An operation triggered by a press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Action {
    /// Interactive homing.
    HomeRail,
    /// Single camera trigger.
    TakePhoto,
    /// Confirm and arm the stack sequencer.
    StartStack,
    /// Copy the rail position into the stack start.
    SetStartHere,
    /// Copy the rail position into the stack end.
    SetEndHere,
    /// Persist the current records.
    SaveSettings,
    /// Relative test move of the given whole millimeters.
    TestMove(u8),
    /// Forget the zero reference.
    ResetPosition,
    /// Stop the running stack.
    StopStack,
    /// Restore default records.
    FactoryReset,
}

/// What pressing an item does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemKind {
    /// Go to another screen.
    Nav(Screen),
    /// Enter or leave edit mode for a field.
    Edit(Field),
    /// Flip a flag.
    Toggle(Toggle),
    /// Perform an operation.
    Action(Action),
    /// Shows a value; pressing does nothing.
    Readout(Readout),
}

/// One row of a screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuItem {
    /// Row label.
    pub label: &'static str,
    /// Press semantics.
    pub kind: ItemKind,
    /// Drawn in the accent palette.
    pub accent: bool,
}

impl MenuItem {
    const fn new(label: &'static str, kind: ItemKind) -> Self {
        Self {
            label,
            kind,
            accent: false,
        }
    }

    const fn accent(label: &'static str, kind: ItemKind) -> Self {
        Self {
            label,
            kind,
            accent: true,
        }
    }

    /// Whether a press toggles edit mode on this item.
    #[inline]
    pub fn is_editable(&self) -> bool {
        matches!(self.kind, ItemKind::Edit(_))
    }
}

/// Static layout and items of one screen.
#[derive(Debug)]
pub struct ScreenSpec {
    /// Title text.
    pub title: &'static str,
    /// Title left edge.
    pub title_x: i32,
    /// Top of the first item row.
    pub first_row_y: i32,
    /// Vertical distance between rows.
    pub row_pitch: i32,
    /// Items in selection order.
    pub items: &'static [MenuItem],
}

use Action as A;
use Field as F;
use ItemKind::{Action as Act, Edit, Nav, Readout as Show, Toggle as Flip};

static MAIN_ITEMS: [MenuItem; 5] = [
    MenuItem::new("Manual Control", Nav(Screen::ManualControl)),
    MenuItem::new("Auto Stack", Nav(Screen::AutoStack)),
    MenuItem::new("Settings", Nav(Screen::Settings)),
    MenuItem::new("Calibration", Nav(Screen::Calibration)),
    MenuItem::new("Advanced", Nav(Screen::Advanced)),
];

static MANUAL_ITEMS: [MenuItem; 6] = [
    MenuItem::new("Position", Edit(F::Jog)),
    MenuItem::new("Move to", Edit(F::MoveTarget)),
    MenuItem::new("Step", Edit(F::RailStepSize)),
    MenuItem::new("Home Rail", Act(A::HomeRail)),
    MenuItem::new("Take Photo", Act(A::TakePhoto)),
    MenuItem::new("Back", Nav(Screen::Main)),
];

static AUTO_STACK_ITEMS: [MenuItem; 11] = [
    MenuItem::new("Start", Edit(F::StackStart)),
    MenuItem::new("End", Edit(F::StackEnd)),
    MenuItem::new("Step", Edit(F::StackStep)),
    MenuItem::new("Delay", Edit(F::StackDelay)),
    MenuItem::new("Shots", Show(Readout::TotalShots)),
    MenuItem::accent("START STACK", Act(A::StartStack)),
    MenuItem::new("Set Start Here", Act(A::SetStartHere)),
    MenuItem::new("Set End Here", Act(A::SetEndHere)),
    MenuItem::new("Reverse", Flip(Toggle::ReverseDirection)),
    MenuItem::new("Return", Flip(Toggle::ReturnToStart)),
    MenuItem::new("Back", Nav(Screen::Main)),
];

static SETTINGS_ITEMS: [MenuItem; 8] = [
    MenuItem::new("Bright", Edit(F::Brightness)),
    MenuItem::new("Trigger", Edit(F::TriggerDuration)),
    MenuItem::new("Settle", Edit(F::SettlingTime)),
    MenuItem::new("Beep", Flip(Toggle::Beep)),
    MenuItem::new("Backlash", Edit(F::Backlash)),
    MenuItem::new("Enc Sens", Edit(F::Sensitivity)),
    MenuItem::accent("SAVE SETTINGS", Act(A::SaveSettings)),
    MenuItem::new("Back", Nav(Screen::Main)),
];

static CALIBRATION_ITEMS: [MenuItem; 8] = [
    MenuItem::new("Steps/mm", Edit(F::StepsPerMm)),
    MenuItem::new("Max Travel", Edit(F::MaxTravel)),
    MenuItem::new("Step Size", Edit(F::RailStepSize)),
    MenuItem::new("Home Rail", Act(A::HomeRail)),
    MenuItem::new("Test Move 1mm", Act(A::TestMove(1))),
    MenuItem::new("Test Move 10mm", Act(A::TestMove(10))),
    MenuItem::new("Reset Position", Act(A::ResetPosition)),
    MenuItem::new("Back to Main", Nav(Screen::Main)),
];

static PROGRESS_ITEMS: [MenuItem; 1] = [MenuItem::new("Stop", Act(A::StopStack))];

static ADVANCED_ITEMS: [MenuItem; 7] = [
    MenuItem::new("Focus Peak Mode", Nav(Screen::Main)),
    MenuItem::new("Exposure Bracket", Nav(Screen::Main)),
    MenuItem::new("Time Lapse", Nav(Screen::Main)),
    MenuItem::new("Custom Patterns", Nav(Screen::Main)),
    MenuItem::new("Motor Tuning", Nav(Screen::Main)),
    MenuItem::new("Statistics", Nav(Screen::Main)),
    MenuItem::new("Factory Reset", Act(A::FactoryReset)),
];

static SCREENS: [ScreenSpec; 7] = [
    ScreenSpec {
        title: "MACRO RAIL",
        title_x: 20,
        first_row_y: 25,
        row_pitch: 12,
        items: &MAIN_ITEMS,
    },
    ScreenSpec {
        title: "MANUAL CONTROL",
        title_x: 15,
        first_row_y: 45,
        row_pitch: 12,
        items: &MANUAL_ITEMS,
    },
    ScreenSpec {
        title: "AUTO STACK",
        title_x: 20,
        first_row_y: 25,
        row_pitch: 10,
        items: &AUTO_STACK_ITEMS,
    },
    ScreenSpec {
        title: "SETTINGS",
        title_x: 30,
        first_row_y: 25,
        row_pitch: 12,
        items: &SETTINGS_ITEMS,
    },
    ScreenSpec {
        title: "CALIBRATION",
        title_x: 20,
        first_row_y: 25,
        row_pitch: 12,
        items: &CALIBRATION_ITEMS,
    },
    ScreenSpec {
        title: "STACKING...",
        title_x: 25,
        first_row_y: 130,
        row_pitch: 12,
        items: &PROGRESS_ITEMS,
    },
    ScreenSpec {
        title: "ADVANCED",
        title_x: 25,
        first_row_y: 25,
        row_pitch: 12,
        items: &ADVANCED_ITEMS,
    },
];
