//! Coordinate rotation utilities
//!
//! This module maps text coordinates to native panel coordinates.
//!
//! Drawing primitives always address the panel natively. Text and symbols
//! follow the [`Rotation`] so that a panel mounted upside down still reads
//! left to right:
//!
//! - **Normal**: the cursor is the top-left corner of the next glyph, offset
//!   by the configured pixel offset, and writing advances to the right.
//! - **Rotated180**: the cursor is stored point-reflected. Each glyph is
//!   painted point-reflected and writing advances to the right on the panel,
//!   which is to the left for a viewer of the rotated panel.
//!
//! ## Example
//!
//! ```
//! use ssd1309::{rotation::apply_rotation, Dimensions, Rotation};
//!
//! let dims = match Dimensions::new(128, 64) {
//!     Ok(dims) => dims,
//!     Err(_) => return,
//! };
//!
//! // Normal cursor only removes the pixel offset
//! assert_eq!(apply_rotation(10, 5, (0, 0), dims, Rotation::Normal), (10, 5));
//!
//! // Rotated cursor is reflected across both axes
//! assert_eq!(apply_rotation(10, 5, (0, 0), dims, Rotation::Rotated180), (118, 58));
//! ```

use crate::config::{Dimensions, Rotation};

/// Convert a cursor position to the stored native cursor
///
/// # Arguments
///
/// * `x` - X coordinate requested by the caller
/// * `y` - Y coordinate requested by the caller
/// * `offset` - Pixel offset `(x, y)` subtracted in normal orientation
/// * `dims` - Panel dimensions
/// * `rotation` - Rotation mode
///
/// # Returns
///
/// `(x - offset_x, y - offset_y)` when not rotated,
/// `(width - x, height - 1 - y)` when rotated.
pub fn apply_rotation(
    x: i32,
    y: i32,
    offset: (i16, i16),
    dims: Dimensions,
    rotation: Rotation,
) -> (i32, i32) {
    match rotation {
        Rotation::Normal => (
            x.saturating_sub(offset.0 as i32),
            y.saturating_sub(offset.1 as i32),
        ),
        Rotation::Rotated180 => (
            (dims.width as i32).saturating_sub(x),
            (dims.height as i32 - 1).saturating_sub(y),
        ),
    }
}

/// Native coordinate of one pixel of a glyph cell
///
/// `col` and `row` index the glyph bitmap (row 0 on top, column 0 leftmost),
/// `cursor` is the stored native cursor and `width` the glyph width.
pub fn glyph_pixel(
    cursor: (i32, i32),
    col: i32,
    row: i32,
    width: i32,
    rotation: Rotation,
) -> (i32, i32) {
    match rotation {
        Rotation::Normal => (cursor.0 + col, cursor.1 + row),
        Rotation::Rotated180 => (cursor.0 + width - 1 - col, cursor.1 - row),
    }
}

/// Whether a `width` x `height` cell fits at `cursor` in the direction of writing
///
/// The cell must start on the panel. In normal orientation a cell reaching
/// the last column or the last row is also rejected. Rotated, the cell grows
/// upwards from `cursor` and only has to lie within the panel.
pub fn cell_fits(
    cursor: (i32, i32),
    width: i32,
    height: i32,
    dims: Dimensions,
    rotation: Rotation,
) -> bool {
    let panel_w = dims.width as i32;
    let panel_h = dims.height as i32;

    match rotation {
        Rotation::Normal => {
            cursor.0 >= 0
                && cursor.1 >= 0
                && cursor.0 < panel_w - width
                && cursor.1 < panel_h - height
        }
        Rotation::Rotated180 => {
            cursor.0 >= 0
                && cursor.1 < panel_h
                && cursor.0 <= panel_w - width
                && cursor.1 >= height - 1
        }
    }
}

/// Cursor after writing a cell of `width` columns
///
/// Writing always moves right in native coordinates.
pub fn advance(cursor: (i32, i32), width: i32) -> (i32, i32) {
    (cursor.0 + width, cursor.1)
}
