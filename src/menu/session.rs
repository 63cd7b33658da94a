//! Transient menu navigation state.

use super::screen::{MenuItem, Screen};

/// Current screen, selection, edit flag and pending redraw.
///
/// Owned solely by the menu task. Every screen transition resets the
/// selection to 0 and leaves edit mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuSession {
    screen: Screen,
    selection: usize,
    edit_mode: bool,
    redraw_pending: bool,
}

impl Default for MenuSession {
    fn default() -> Self {
        Self::new()
    }
}

impl MenuSession {
    /// Start on the main screen with a redraw pending.
    pub const fn new() -> Self {
        Self {
            screen: Screen::Main,
            selection: 0,
            edit_mode: false,
            redraw_pending: true,
        }
    }

    /// Current screen.
    #[inline]
    pub fn screen(&self) -> Screen {
        self.screen
    }

    /// Selected row on the current screen.
    #[inline]
    pub fn selection(&self) -> usize {
        self.selection
    }

    /// Whether rotation edits the selected field.
    #[inline]
    pub fn edit_mode(&self) -> bool {
        self.edit_mode
    }

    /// The selected item of the current screen.
    pub fn selected_item(&self) -> Option<&'static MenuItem> {
        self.screen.item(self.selection)
    }

    /// Switch screens.
    pub fn set_screen(&mut self, screen: Screen) {
        if screen != self.screen {
            debug!("screen {} -> {}", self.screen.spec().title, screen.spec().title);
        }
        self.screen = screen;
        self.selection = 0;
        self.edit_mode = false;
        self.redraw_pending = true;
    }

    /// Move the selection by `delta` rows, wrapping in both directions.
    pub fn rotate_selection(&mut self, delta: i32) {
        let count = self.screen.item_count() as i64;
        if count == 0 {
            return;
        }
        let next = (self.selection as i64 + delta as i64).rem_euclid(count);
        self.selection = next as usize;
        self.redraw_pending = true;
    }

    /// Flip edit mode, returning the new state.
    pub fn toggle_edit(&mut self) -> bool {
        self.edit_mode = !self.edit_mode;
        self.redraw_pending = true;
        self.edit_mode
    }

    /// Mark the screen dirty.
    #[inline]
    pub fn request_redraw(&mut self) {
        self.redraw_pending = true;
    }

    /// Whether a redraw is pending, without clearing it.
    #[inline]
    pub fn redraw_pending(&self) -> bool {
        self.redraw_pending
    }

    /// Consume the pending redraw flag.
    #[inline]
    pub fn take_redraw(&mut self) -> bool {
        core::mem::replace(&mut self.redraw_pending, false)
    }
}
