//! Display collaborator.
//!
//! The menu draws through the narrow [`Surface`] contract. Any
//! embedded-graphics `DrawTarget<Color = Rgb565>` can back it via
//! [`GraphicsSurface`].

mod overlay;
mod surface;

pub use embedded_graphics::pixelcolor::Rgb565;
pub use overlay::{
    draw_complete_prompt, draw_confirm_prompt, draw_homing_prompt, draw_trigger_indicator, Notice,
};
pub use surface::{
    GraphicsSurface, Surface, CANVAS_HEIGHT, CANVAS_WIDTH, GLYPH_ADVANCE, LINE_HEIGHT, MENU_FONT,
};
