//! Encoder events.

/// One discrete operator input.
///
/// Rotation carries the raw detent direction; sensitivity scaling happens
/// in the menu, never here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EncoderEvent {
    /// One detent, `+1` clockwise or `-1` counter-clockwise.
    Rotate(i8),
    /// Debounced press of the encoder button.
    ButtonPressed,
}

impl EncoderEvent {
    /// One detent clockwise.
    pub const CLOCKWISE: Self = Self::Rotate(1);
    /// One detent counter-clockwise.
    pub const COUNTER_CLOCKWISE: Self = Self::Rotate(-1);

    /// Whether this is a button press.
    #[inline]
    pub fn is_press(self) -> bool {
        matches!(self, Self::ButtonPressed)
    }
}
