//! Text and symbol rendering
//!
//! Glyphs are painted as full cells: set bits take the requested color and
//! clear bits its inverse, so text always overwrites its background.
//!
//! The cursor set by [`Framebuffer::set_cursor`] is the top-left corner of the
//! next glyph. With [`Rotation::Rotated180`] it is the top-right corner as
//! seen on the upside-down panel, and text runs leftward from there so that
//! a viewer of the rotated panel still reads it left to right.

use crate::color::Color;
use crate::config::Rotation;
use crate::error::TextError;
use crate::font::{Font, Symbol};
use crate::framebuffer::Framebuffer;
use crate::rotation::{advance, apply_rotation, cell_fits, glyph_pixel};

impl<B> Framebuffer<B>
where
    B: AsRef<[u8]> + AsMut<[u8]>,
{
    /// Move the text cursor
    ///
    /// The configured pixel offset is subtracted in normal orientation. When
    /// rotated, the position is reflected into native coordinates.
    pub fn set_cursor(&mut self, x: i32, y: i32) {
        self.cursor = apply_rotation(x, y, self.offset, self.dimensions(), self.rotation);
    }

    /// Put the native cursor back to `(0, 0)`
    pub fn reset_cursor(&mut self) {
        self.cursor = (0, 0);
    }

    /// Native cursor position
    pub fn cursor(&self) -> (i32, i32) {
        self.cursor
    }

    /// Write one character at the cursor and advance it by the glyph width
    ///
    /// # Errors
    ///
    /// * `TextError::UnsupportedChar` - `ch` is not printable ASCII or the
    ///   font table has no glyph for it
    /// * `TextError::NoSpace` - the glyph does not fit before the panel edge
    ///
    /// Nothing is drawn and the cursor stays put on error.
    pub fn write_char(&mut self, ch: char, font: &Font<'_>, color: Color) -> Result<(), TextError> {
        let Some(rows) = font.glyph(ch) else {
            log::trace!("unsupported character {:?}", ch);
            return Err(TextError::UnsupportedChar(ch));
        };

        let width = font.width as i32;
        let height = font.height as i32;
        if !cell_fits(self.cursor, width, height, self.dimensions(), self.rotation) {
            log::trace!("no space for {:?} at {:?}", ch, self.cursor);
            return Err(TextError::NoSpace(ch));
        }

        self.paint_cell(rows, width, color);
        self.cursor = advance(self.cursor, width);
        Ok(())
    }

    /// Write a string, stopping at the first character that cannot be written
    ///
    /// When rotated the characters are emitted last to first, which presents
    /// them in reading order on the upside-down panel.
    ///
    /// # Errors
    ///
    /// Returns the error of the first failing [`write_char`](Self::write_char).
    /// Characters written before it stay on the framebuffer.
    pub fn write_string(&mut self, text: &str, font: &Font<'_>, color: Color) -> Result<(), TextError> {
        match self.rotation {
            Rotation::Normal => text
                .chars()
                .try_for_each(|ch| self.write_char(ch, font, color)),
            Rotation::Rotated180 => text
                .chars()
                .rev()
                .try_for_each(|ch| self.write_char(ch, font, color)),
        }
    }

    /// Draw a symbol white on black at `(x, y)` and advance the cursor past it
    ///
    /// The position is handled like [`set_cursor`](Self::set_cursor) and
    /// the fit is checked against the symbol's declared size. One row past the
    /// declared height is painted when the table provides it.
    ///
    /// Returns `false` without drawing if the symbol does not fit.
    pub fn write_symbol(&mut self, symbol: &Symbol<'_>, x: i32, y: i32) -> bool {
        self.set_cursor(x, y);

        let width = symbol.width as i32;
        if !cell_fits(
            self.cursor,
            width,
            symbol.height as i32,
            self.dimensions(),
            self.rotation,
        ) {
            log::trace!("no space for symbol at {:?}", self.cursor);
            return false;
        }

        let rows = symbol.height as usize + 1;
        let rows = &symbol.data[..rows.min(symbol.data.len())];
        self.paint_cell(rows, width, Color::White);
        self.cursor = advance(self.cursor, width);
        true
    }

    fn paint_cell(&mut self, rows: &[u16], width: i32, color: Color) {
        for (row, &bits) in rows.iter().enumerate() {
            for col in 0..width {
                let on = bits.checked_shl(col as u32).unwrap_or(0) & 0x8000 != 0;
                let (x, y) = glyph_pixel(self.cursor, col, row as i32, width, self.rotation);
                self.set_pixel(x, y, if on { color } else { !color });
            }
        }
    }
}
