//! Packed 1-bit framebuffer and drawing primitives
//!
//! The framebuffer mirrors the controller's page layout: `height / 8` pages
//! of `width` bytes each. Bit `y % 8` of byte `x + (y / 8) * width` holds
//! pixel `(x, y)`, so each byte is an 8 pixel tall column slice of one page.
//!
//! All drawing happens in memory. Nothing reaches the panel until the buffer
//! is flushed through [`Display::flush`](crate::display::Display::flush).
//!
//! Coordinates are native panel coordinates. Pixels outside the panel are
//! silently clipped; no primitive reports an error.
//!
//! ## Example
//!
//! ```
//! use ssd1309::{Builder, Color, Dimensions, Framebuffer};
//!
//! let dims = match Dimensions::new(128, 64) {
//!     Ok(dims) => dims,
//!     Err(_) => return,
//! };
//! let config = match Builder::new().dimensions(dims).build() {
//!     Ok(config) => config,
//!     Err(_) => return,
//! };
//! let mut fb = match Framebuffer::try_new([0u8; 1024], &config) {
//!     Ok(fb) => fb,
//!     Err(_) => return,
//! };
//!
//! fb.draw_line(0, 0, 10, 0, Color::White);
//! assert_eq!(fb.get_pixel(10, 0), Some(Color::White));
//! assert_eq!(fb.get_pixel(11, 0), Some(Color::Black));
//! ```

use crate::color::Color;
use crate::config::{Config, Dimensions, Rotation};
use crate::error::BuilderError;

/// Number of straight segments a full circle is approximated with in arcs
pub const ARC_SEGMENTS: u32 = 36;

/// A polyline vertex in native panel coordinates
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Vertex {
    /// X coordinate
    pub x: i32,
    /// Y coordinate
    pub y: i32,
}

impl Vertex {
    /// Create a vertex
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Byte index and bit mask of pixel `(x, y)` on a panel `width` columns wide
///
/// The caller is responsible for bounds checking.
///
/// ```
/// use ssd1309::framebuffer::pixel_address;
///
/// assert_eq!(pixel_address(0, 0, 128), (0, 0x01));
/// assert_eq!(pixel_address(5, 9, 128), (133, 0x02));
/// ```
pub fn pixel_address(x: u32, y: u32, width: u32) -> (usize, u8) {
    let index = (x + (y / 8) * width) as usize;
    let bit = 0x01 << (y % 8);
    (index, bit)
}

/// Packed framebuffer with cursor and text rotation state
///
/// ## Type Parameters
///
/// * `B` - Buffer storage, e.g. `[u8; 1024]` or `&'static mut [u8]`
pub struct Framebuffer<B> {
    /// Pixel storage, at least `dimensions.buffer_size()` bytes
    buffer: B,
    /// Panel dimensions
    dimensions: Dimensions,
    /// Native cursor used by text rendering
    pub(crate) cursor: (i32, i32),
    /// Text rotation
    pub(crate) rotation: Rotation,
    /// Cursor offset applied in normal orientation
    pub(crate) offset: (i16, i16),
}

impl<B> Framebuffer<B>
where
    B: AsRef<[u8]> + AsMut<[u8]>,
{
    /// Create a framebuffer over `buffer`
    ///
    /// # Panics
    ///
    /// Panics if the buffer is smaller than `config.dimensions.buffer_size()`.
    pub fn new(buffer: B, config: &Config) -> Self {
        let required = config.dimensions.buffer_size();
        assert!(
            buffer.as_ref().len() >= required,
            "framebuffer too small: required {} bytes, got {}",
            required,
            buffer.as_ref().len()
        );
        Self::from_parts(buffer, config)
    }

    /// Try to create a framebuffer, returning an error if the buffer is too small
    ///
    /// This is the fallible version of [`new`](Self::new).
    pub fn try_new(buffer: B, config: &Config) -> Result<Self, BuilderError> {
        let required = config.dimensions.buffer_size();
        let provided = buffer.as_ref().len();
        if provided < required {
            return Err(BuilderError::BufferTooSmall { required, provided });
        }
        Ok(Self::from_parts(buffer, config))
    }

    fn from_parts(buffer: B, config: &Config) -> Self {
        Self {
            buffer,
            dimensions: config.dimensions,
            cursor: (0, 0),
            rotation: config.rotation,
            offset: (config.offset_x, config.offset_y),
        }
    }

    /// Get panel dimensions
    pub fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    /// The framebuffer bytes, exactly `dimensions.buffer_size()` long
    pub fn as_bytes(&self) -> &[u8] {
        &self.buffer.as_ref()[..self.dimensions.buffer_size()]
    }

    fn bytes_mut(&mut self) -> &mut [u8] {
        let size = self.dimensions.buffer_size();
        &mut self.buffer.as_mut()[..size]
    }

    /// Bytes of one 8-row page, or `None` past the last page
    pub fn page(&self, page: u8) -> Option<&[u8]> {
        let width = self.dimensions.width as usize;
        let start = page as usize * width;
        self.as_bytes().get(start..start + width)
    }

    /// Release the buffer storage
    pub fn release(self) -> B {
        self.buffer
    }

    /// Fill the whole framebuffer with a color
    pub fn fill(&mut self, color: Color) {
        let byte = color.fill_byte();
        self.bytes_mut().fill(byte);
    }

    /// Copy a prebuilt page-layout image into the framebuffer
    ///
    /// Images shorter than the framebuffer overwrite only its start.
    ///
    /// # Errors
    ///
    /// Returns `BuilderError::ImageTooLarge` if `image` is longer than the
    /// framebuffer. The framebuffer is left untouched in that case.
    pub fn fill_buffer(&mut self, image: &[u8]) -> Result<(), BuilderError> {
        let max = self.dimensions.buffer_size();
        if image.len() > max {
            return Err(BuilderError::ImageTooLarge {
                max,
                provided: image.len(),
            });
        }
        self.bytes_mut()[..image.len()].copy_from_slice(image);
        Ok(())
    }

    /// Set a single pixel
    ///
    /// Pixels outside the panel are ignored.
    pub fn set_pixel(&mut self, x: i32, y: i32, color: Color) {
        if !self.dimensions.contains(x, y) {
            return;
        }
        let (index, bit) = pixel_address(x as u32, y as u32, self.dimensions.width as u32);
        let bytes = self.bytes_mut();
        match color {
            Color::White => bytes[index] |= bit,
            Color::Black => bytes[index] &= !bit,
        }
    }

    /// Read a single pixel, `None` outside the panel
    pub fn get_pixel(&self, x: i32, y: i32) -> Option<Color> {
        if !self.dimensions.contains(x, y) {
            return None;
        }
        let (index, bit) = pixel_address(x as u32, y as u32, self.dimensions.width as u32);
        Some(Color::from(self.as_bytes()[index] & bit != 0))
    }

    /// Draw a line with Bresenham's algorithm
    ///
    /// The segment is first clipped to the panel, so far off-panel end
    /// points cost nothing. The end point is drawn first, then the walk
    /// starts at `(x1, y1)` and may step both axes at once on exact diagonals.
    pub fn draw_line(&mut self, x1: i32, y1: i32, x2: i32, y2: i32, color: Color) {
        let Some(((x1, y1), (x2, y2))) = clip_line(self.dimensions, (x1, y1), (x2, y2)) else {
            return;
        };

        let dx = (x2 - x1).abs();
        let dy = (y2 - y1).abs();
        let sx = if x1 < x2 { 1 } else { -1 };
        let sy = if y1 < y2 { 1 } else { -1 };
        let mut err = dx - dy;

        let (mut x, mut y) = (x1, y1);

        self.set_pixel(x2, y2, color);
        while x != x2 || y != y2 {
            self.set_pixel(x, y, color);
            let e2 = err * 2;

            if e2 > -dy {
                err -= dy;
                x += sx;
            }

            if e2 < dx {
                err += dx;
                y += sy;
            }
        }
    }

    /// Draw lines between consecutive vertices
    ///
    /// Fewer than two vertices draw nothing.
    pub fn draw_polyline(&mut self, vertices: &[Vertex], color: Color) {
        for pair in vertices.windows(2) {
            self.draw_line(pair[0].x, pair[0].y, pair[1].x, pair[1].y, color);
        }
    }

    /// Draw a rectangle outline through two opposite corners
    pub fn draw_rectangle(&mut self, x1: i32, y1: i32, x2: i32, y2: i32, color: Color) {
        self.draw_line(x1, y1, x2, y1, color);
        self.draw_line(x2, y1, x2, y2, color);
        self.draw_line(x2, y2, x1, y2, color);
        self.draw_line(x1, y2, x1, y1, color);
    }

    /// Fill a rectangle through two opposite corners, edges included
    pub fn fill_rectangle(&mut self, x1: i32, y1: i32, x2: i32, y2: i32, color: Color) {
        let x_start = x1.min(x2).max(0);
        let x_end = x1.max(x2).min(self.dimensions.width as i32 - 1);
        let y_start = y1.min(y2).max(0);
        let y_end = y1.max(y2).min(self.dimensions.height as i32 - 1);

        for y in y_start..=y_end {
            for x in x_start..=x_end {
                self.set_pixel(x, y, color);
            }
        }
    }

    /// Draw a circle outline with the midpoint algorithm
    ///
    /// Nothing is drawn if the center is off the panel. The radius is not
    /// checked; pixels beyond the edges are clipped.
    pub fn draw_circle(&mut self, cx: i32, cy: i32, r: u16, color: Color) {
        if !self.dimensions.contains(cx, cy) {
            return;
        }
        for (x, y) in circle_steps(r) {
            self.set_pixel(cx - x, cy + y, color);
            self.set_pixel(cx + x, cy + y, color);
            self.set_pixel(cx + x, cy - y, color);
            self.set_pixel(cx - x, cy - y, color);
        }
    }

    /// Draw a filled circle
    ///
    /// Every step of the outline walk paints the two horizontal spans
    /// between its symmetric points. Same clipping as [`draw_circle`](Self::draw_circle).
    pub fn fill_circle(&mut self, cx: i32, cy: i32, r: u16, color: Color) {
        if !self.dimensions.contains(cx, cy) {
            return;
        }
        for (x, y) in circle_steps(r) {
            // x <= 0 during the walk
            for px in (cx + x)..=(cx - x) {
                self.set_pixel(px, cy + y, color);
                self.set_pixel(px, cy - y, color);
            }
        }
    }

    /// Draw an arc
    ///
    /// Angles are in degrees and start at the bottom of the circle (the
    /// 3π/2 reference), growing counter-clockwise on the panel. The walk
    /// covers [`ARC_SEGMENTS`] segments per full turn, starting at the
    /// segment containing `start_angle` and ending at `sweep`.
    pub fn draw_arc(&mut self, cx: i32, cy: i32, r: u16, start_angle: u16, sweep: u16, color: Color) {
        if let Some(walk) = ArcWalk::new(start_angle, sweep) {
            self.draw_arc_segments(cx, cy, r, walk, color);
        }
    }

    /// Draw an arc and the two radii to its end points
    pub fn draw_arc_with_radius_line(
        &mut self,
        cx: i32,
        cy: i32,
        r: u16,
        start_angle: u16,
        sweep: u16,
        color: Color,
    ) {
        if let Some(walk) = ArcWalk::new(start_angle, sweep) {
            self.draw_arc_segments(cx, cy, r, walk, color);
            let first = arc_point(cx, cy, r, walk.angle(walk.first));
            let last = arc_point(cx, cy, r, walk.angle(walk.segments));
            self.draw_line(cx, cy, first.x, first.y, color);
            self.draw_line(cx, cy, last.x, last.y, color);
        }
    }

    fn draw_arc_segments(&mut self, cx: i32, cy: i32, r: u16, walk: ArcWalk, color: Color) {
        let mut from = arc_point(cx, cy, r, walk.angle(walk.first));
        for count in walk.first + 1..=walk.segments {
            let to = arc_point(cx, cy, r, walk.angle(count));
            self.draw_line(from.x, from.y, to.x, to.y, color);
            from = to;
        }
    }

    /// Draw a 1-bit bitmap, painting only its set bits
    ///
    /// Rows are `ceil(w / 8)` bytes, most significant bit leftmost. Nothing is
    /// drawn if `(x, y)` is off the panel; otherwise pixels are clipped
    /// individually. Missing bytes at the end of `bitmap` are treated as clear.
    pub fn draw_bitmap(&mut self, x: i32, y: i32, bitmap: &[u8], w: u16, h: u16, color: Color) {
        if !self.dimensions.contains(x, y) {
            return;
        }
        let byte_width = (w as usize).div_ceil(8);

        for j in 0..h as usize {
            for i in 0..w as usize {
                let Some(&byte) = bitmap.get(j * byte_width + i / 8) else {
                    continue;
                };
                if byte & (0x80 >> (i % 8)) != 0 {
                    self.set_pixel(x + i as i32, y + j as i32, color);
                }
            }
        }
    }

    /// Switch text rotation on or off
    ///
    /// The cursor is kept as stored; call `set_cursor` after toggling.
    pub fn set_rotated(&mut self, rotated: bool) {
        self.rotation = if rotated {
            Rotation::Rotated180
        } else {
            Rotation::Normal
        };
    }

    /// Whether text is rendered rotated by 180 degrees
    pub fn is_rotated(&self) -> bool {
        self.rotation == Rotation::Rotated180
    }

    /// Get the text rotation
    pub fn rotation(&self) -> Rotation {
        self.rotation
    }

    /// Set the text rotation
    pub fn set_rotation(&mut self, rotation: Rotation) {
        self.rotation = rotation;
    }
}

/// Steps of the midpoint circle walk for radius `r`
///
/// Yields `(x, y)` with `x` running from `-r` up to `0` and `y` from `0` up
/// to `r`; every point is mirrored into the four quadrants by the caller.
fn circle_steps(r: u16) -> impl Iterator<Item = (i32, i32)> {
    let r = r as i32;
    let mut x = -r;
    let mut y = 0;
    let mut err = 2 - 2 * r;
    let mut done = false;

    core::iter::from_fn(move || {
        if done {
            return None;
        }
        let point = (x, y);

        let mut e2 = err;
        if e2 <= y {
            y += 1;
            err += y * 2 + 1;
            if -x == y && e2 <= x {
                e2 = 0;
            }
        }
        if e2 > x {
            x += 1;
            err += x * 2 + 1;
        }
        done = x > 0;

        Some(point)
    })
}

/// Segment range of an arc
#[derive(Clone, Copy, Debug)]
struct ArcWalk {
    /// Segment index the arc starts at
    first: u32,
    /// Segment index the arc ends at
    segments: u32,
    /// Degrees per segment
    step: f32,
    /// End angle in degrees
    sweep: u32,
}

impl ArcWalk {
    /// `None` when the arc has no segment to draw
    fn new(start_angle: u16, sweep: u16) -> Option<Self> {
        let sweep = normalize_degrees(sweep) as u32;
        let start = normalize_degrees(start_angle) as u32;

        let segments = sweep * ARC_SEGMENTS / 360;
        let first = start * ARC_SEGMENTS / 360;
        if segments == 0 || first >= segments {
            return None;
        }
        Some(Self {
            first,
            segments,
            step: sweep as f32 / segments as f32,
            sweep,
        })
    }

    /// Angle of segment boundary `count`; the last boundary is exactly `sweep`
    fn angle(&self, count: u32) -> f32 {
        if count == self.segments {
            self.sweep as f32
        } else {
            count as f32 * self.step
        }
    }
}

/// Point on the circle at `degrees`, measured from the bottom
fn arc_point(cx: i32, cy: i32, r: u16, degrees: f32) -> Vertex {
    let rad = degrees.to_radians();
    let r = r as f32;
    Vertex {
        x: cx.saturating_add(libm::roundf(libm::sinf(rad) * r) as i32),
        y: cy.saturating_add(libm::roundf(libm::cosf(rad) * r) as i32),
    }
}

const LEFT: u8 = 0b0001;
const RIGHT: u8 = 0b0010;
const ABOVE: u8 = 0b0100;
const BELOW: u8 = 0b1000;

/// Cohen-Sutherland region code of `(x, y)` relative to the panel
fn outcode(x: i64, y: i64, max_x: i64, max_y: i64) -> u8 {
    let mut code = 0;
    if x < 0 {
        code |= LEFT;
    } else if x > max_x {
        code |= RIGHT;
    }
    if y < 0 {
        code |= ABOVE;
    } else if y > max_y {
        code |= BELOW;
    }
    code
}

/// `n / d` rounded to the nearest integer, `d != 0`
fn div_round(n: i128, d: i128) -> i128 {
    let (n, d) = if d < 0 { (-n, -d) } else { (n, d) };
    if n >= 0 {
        (2 * n + d) / (2 * d)
    } else {
        -((-2 * n + d) / (2 * d))
    }
}

/// Clip a segment to the panel with Cohen-Sutherland
///
/// Returns `None` when no part of the segment is on the panel. Segments
/// already on the panel are returned unchanged; cut end points are rounded to
/// the nearest pixel on the panel edge.
fn clip_line(
    dims: Dimensions,
    p1: (i32, i32),
    p2: (i32, i32),
) -> Option<((i32, i32), (i32, i32))> {
    let max_x = dims.width as i64 - 1;
    let max_y = dims.height as i64 - 1;
    let (mut x1, mut y1) = (p1.0 as i64, p1.1 as i64);
    let (mut x2, mut y2) = (p2.0 as i64, p2.1 as i64);

    // Each pass moves one end point onto a panel edge
    for _ in 0..8 {
        let code1 = outcode(x1, y1, max_x, max_y);
        let code2 = outcode(x2, y2, max_x, max_y);
        if code1 | code2 == 0 {
            return Some(((x1 as i32, y1 as i32), (x2 as i32, y2 as i32)));
        }
        if code1 & code2 != 0 {
            return None;
        }

        let code = if code1 != 0 { code1 } else { code2 };
        let (dx, dy) = ((x2 - x1) as i128, (y2 - y1) as i128);
        let (x, y) = if code & ABOVE != 0 {
            (x1 + div_round(dx * (0 - y1) as i128, dy) as i64, 0)
        } else if code & BELOW != 0 {
            (x1 + div_round(dx * (max_y - y1) as i128, dy) as i64, max_y)
        } else if code & RIGHT != 0 {
            (max_x, y1 + div_round(dy * (max_x - x1) as i128, dx) as i64)
        } else {
            (0, y1 + div_round(dy * (0 - x1) as i128, dx) as i64)
        };

        if code1 != 0 {
            (x1, y1) = (x, y);
        } else {
            (x2, y2) = (x, y);
        }
    }
    None
}

/// Reduce angles above a full turn, keeping 360 as a full sweep
fn normalize_degrees(degrees: u16) -> u16 {
    if degrees <= 360 {
        degrees
    } else {
        degrees % 360
    }
}
