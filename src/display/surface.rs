//! Display surface contract and the embedded-graphics adapter.

use embedded_graphics::{
    mono_font::{ascii::FONT_5X8, MonoFont, MonoTextStyleBuilder},
    pixelcolor::Rgb565,
    prelude::*,
    primitives::{Line, PrimitiveStyle, Rectangle},
    text::{Baseline, Text},
};

/// Logical canvas width in pixels.
pub const CANVAS_WIDTH: u32 = 128;
/// Logical canvas height in pixels.
pub const CANVAS_HEIGHT: u32 = 160;
/// Horizontal advance per glyph.
pub const GLYPH_ADVANCE: u32 = 6;
/// Height of one text line.
pub const LINE_HEIGHT: u32 = 8;

/// 5x8 glyphs with one column of spacing, giving a 6 px advance.
pub const MENU_FONT: MonoFont<'static> = MonoFont {
    character_spacing: GLYPH_ADVANCE - 5,
    ..FONT_5X8
};

/// Drawing primitives the menu renders through.
///
/// Coordinates are logical canvas pixels, origin top left. Text `y` is the
/// top of the glyph cell.
pub trait Surface {
    /// Fill the whole canvas.
    fn clear(&mut self, color: Rgb565);

    /// Draw a single line of text with a background fill behind each glyph.
    fn draw_text(&mut self, x: i32, y: i32, text: &str, fg: Rgb565, bg: Rgb565);

    /// Draw a one pixel line.
    fn draw_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, color: Rgb565);

    /// Draw a one pixel rectangle outline.
    fn draw_rect(&mut self, x: i32, y: i32, w: u32, h: u32, color: Rgb565);

    /// Draw a filled rectangle.
    fn fill_rect(&mut self, x: i32, y: i32, w: u32, h: u32, color: Rgb565);
}

impl<S: Surface + ?Sized> Surface for &mut S {
    fn clear(&mut self, color: Rgb565) {
        (**self).clear(color)
    }

    fn draw_text(&mut self, x: i32, y: i32, text: &str, fg: Rgb565, bg: Rgb565) {
        (**self).draw_text(x, y, text, fg, bg)
    }

    fn draw_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, color: Rgb565) {
        (**self).draw_line(x0, y0, x1, y1, color)
    }

    fn draw_rect(&mut self, x: i32, y: i32, w: u32, h: u32, color: Rgb565) {
        (**self).draw_rect(x, y, w, h, color)
    }

    fn fill_rect(&mut self, x: i32, y: i32, w: u32, h: u32, color: Rgb565) {
        (**self).fill_rect(x, y, w, h, color)
    }
}

/// Any 16-bit embedded-graphics draw target as a menu surface.
///
/// Draw errors are counted rather than propagated; a frame is redrawn
/// from scratch on the next refresh anyway.
#[derive(Debug)]
pub struct GraphicsSurface<D>
where
    D: DrawTarget<Color = Rgb565>,
{
    target: D,
    draw_errors: u32,
}

impl<D> GraphicsSurface<D>
where
    D: DrawTarget<Color = Rgb565>,
{
    /// Wrap a draw target.
    pub fn new(target: D) -> Self {
        Self {
            target,
            draw_errors: 0,
        }
    }

    /// Draw calls that failed since creation.
    #[inline]
    pub fn draw_errors(&self) -> u32 {
        self.draw_errors
    }

    /// The wrapped target, e.g. to flush a frame buffer.
    #[inline]
    pub fn target_mut(&mut self) -> &mut D {
        &mut self.target
    }

    /// Unwrap the draw target.
    pub fn into_inner(self) -> D {
        self.target
    }

    fn check<T, E>(&mut self, result: Result<T, E>) {
        if result.is_err() {
            self.draw_errors = self.draw_errors.wrapping_add(1);
        }
    }
}

impl<D> Surface for GraphicsSurface<D>
where
    D: DrawTarget<Color = Rgb565>,
{
    fn clear(&mut self, color: Rgb565) {
        let result = self.target.clear(color);
        self.check(result);
    }

    fn draw_text(&mut self, x: i32, y: i32, text: &str, fg: Rgb565, bg: Rgb565) {
        let style = MonoTextStyleBuilder::new()
            .font(&MENU_FONT)
            .text_color(fg)
            .background_color(bg)
            .build();
        let result = Text::with_baseline(text, Point::new(x, y), style, Baseline::Top).draw(&mut self.target);
        self.check(result);
    }

    fn draw_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, color: Rgb565) {
        let result = Line::new(Point::new(x0, y0), Point::new(x1, y1))
            .into_styled(PrimitiveStyle::with_stroke(color, 1))
            .draw(&mut self.target);
        self.check(result);
    }

    fn draw_rect(&mut self, x: i32, y: i32, w: u32, h: u32, color: Rgb565) {
        let result = Rectangle::new(Point::new(x, y), Size::new(w, h))
            .into_styled(PrimitiveStyle::with_stroke(color, 1))
            .draw(&mut self.target);
        self.check(result);
    }

    fn fill_rect(&mut self, x: i32, y: i32, w: u32, h: u32, color: Rgb565) {
        let result = Rectangle::new(Point::new(x, y), Size::new(w, h))
            .into_styled(PrimitiveStyle::with_fill(color))
            .draw(&mut self.target);
        self.check(result);
    }
}
