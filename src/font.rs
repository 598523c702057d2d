//! Glyph and symbol table types
//!
//! Font and symbol bitmaps are supplied by the application as read-only
//! tables of `u16` rows. Bit 15 of a row is the leftmost column, so a glyph
//! can be at most 16 pixels wide.
//!
//! A font table stores the 95 printable ASCII characters (`' '..='~'`) in
//! order, `height` rows per character: the rows of character `ch` start at
//! `(ch - 32) * height`.
//!
//! ## Example
//!
//! ```
//! use ssd1309::Font;
//!
//! // 2x2 font where every glyph is a checkerboard
//! static DATA: [u16; 95 * 2] = {
//!     let mut rows = [0u16; 95 * 2];
//!     let mut i = 0;
//!     while i < rows.len() {
//!         rows[i] = if i % 2 == 0 { 0x8000 } else { 0x4000 };
//!         i += 1;
//!     }
//!     rows
//! };
//! let font = Font::new(2, 2, &DATA);
//! assert_eq!(font.glyph('A'), Some(&[0x8000, 0x4000][..]));
//! assert_eq!(font.glyph('\n'), None);
//! ```

/// Widest glyph a `u16` row can describe
pub const MAX_GLYPH_WIDTH: u8 = 16;

/// First character stored in a font table
pub const FIRST_CHAR: char = ' ';

/// Last character stored in a font table
pub const LAST_CHAR: char = '~';

/// Fixed-width bitmap font
#[derive(Clone, Copy, Debug)]
pub struct Font<'a> {
    /// Glyph width in pixels (at most [`MAX_GLYPH_WIDTH`])
    pub width: u8,
    /// Glyph height in pixels
    pub height: u8,
    /// Row bitmasks, `height` rows per printable character
    pub data: &'a [u16],
}

impl<'a> Font<'a> {
    /// Create a font over a glyph table
    pub const fn new(width: u8, height: u8, data: &'a [u16]) -> Self {
        Self {
            width,
            height,
            data,
        }
    }

    /// Rows of the glyph for `ch`
    ///
    /// Returns `None` for characters outside printable ASCII and for
    /// characters the table is too short to contain.
    pub fn glyph(&self, ch: char) -> Option<&'a [u16]> {
        if !(FIRST_CHAR..=LAST_CHAR).contains(&ch) {
            return None;
        }
        let height = self.height as usize;
        let start = (ch as usize - FIRST_CHAR as usize) * height;
        self.data.get(start..start + height)
    }
}

/// Fixed-size bitmap icon
///
/// Rows use the same layout as font glyphs.
#[derive(Clone, Copy, Debug)]
pub struct Symbol<'a> {
    /// Symbol width in pixels (at most [`MAX_GLYPH_WIDTH`])
    pub width: u8,
    /// Declared symbol height in pixels
    pub height: u8,
    /// Row bitmasks
    pub data: &'a [u16],
}

impl<'a> Symbol<'a> {
    /// Create a symbol over its row table
    pub const fn new(width: u8, height: u8, data: &'a [u16]) -> Self {
        Self {
            width,
            height,
            data,
        }
    }
}

/// Identifiers of the standard status symbols
///
/// Symbol tables are ordered by this enum; use [`SymbolId::index`] to look
/// up an entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum SymbolId {
    /// Power button
    Power = 0,
    /// Enter / return arrow
    Enter,
    /// Antenna / signal
    Antenna,
    /// Empty battery
    Battery0,
    /// Battery one third full
    Battery33,
    /// Battery two thirds full
    Battery66,
    /// Full battery
    Battery100,
    /// Bluetooth Low Energy
    Ble,
    /// Down arrow
    Down,
    /// Up arrow
    Up,
}

impl SymbolId {
    /// Number of standard symbols
    pub const COUNT: usize = 10;

    /// Position of this symbol in a symbol table
    pub fn index(self) -> usize {
        self as usize
    }

    /// Look up this symbol in `table`
    pub fn lookup<'t, 'a>(self, table: &'t [Symbol<'a>]) -> Option<&'t Symbol<'a>> {
        table.get(self.index())
    }
}
