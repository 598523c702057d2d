//! Framebuffer-backed display driver
//!
//! [`GraphicDisplay`] pairs a [`Display`] with a [`Framebuffer`]. Drawing
//! calls only touch memory; [`GraphicDisplay::flush`] sends the whole buffer
//! to the panel.
//!
//! With the `graphics` feature both [`GraphicDisplay`] and [`Framebuffer`]
//! implement [`DrawTarget`](embedded_graphics_core::draw_target::DrawTarget),
//! so embedded-graphics primitives, fonts and images can be drawn next to
//! the built-in primitives.
//!
//! ## Example
//!
//! ```rust,no_run
//! use embedded_graphics::{
//!     prelude::*,
//!     primitives::{PrimitiveStyle, Rectangle},
//! };
//! use ssd1309::{Color, GraphicDisplay};
//! # use core::convert::Infallible;
//! # use embedded_hal::delay::DelayNs;
//! # use embedded_hal::digital::OutputPin;
//! # use embedded_hal::spi::{Operation, SpiDevice};
//! # use ssd1309::{Builder, Dimensions, Display, SpiInterface};
//! # struct MockSpi;
//! # impl embedded_hal::spi::ErrorType for MockSpi { type Error = Infallible; }
//! # impl SpiDevice for MockSpi {
//! #     fn transaction(
//! #         &mut self,
//! #         _operations: &mut [Operation<'_, u8>],
//! #     ) -> Result<(), Self::Error> {
//! #         Ok(())
//! #     }
//! # }
//! # struct MockPin;
//! # impl embedded_hal::digital::ErrorType for MockPin { type Error = Infallible; }
//! # impl OutputPin for MockPin {
//! #     fn set_low(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! #     fn set_high(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! # }
//! # struct MockDelay;
//! # impl DelayNs for MockDelay { fn delay_ns(&mut self, _ns: u32) {} }
//! # let interface = SpiInterface::new(MockSpi, MockPin, MockPin);
//! # let dims = match Dimensions::new(128, 64) {
//! #     Ok(dims) => dims,
//! #     Err(_) => return,
//! # };
//! # let config = match Builder::new().dimensions(dims).build() {
//! #     Ok(config) => config,
//! #     Err(_) => return,
//! # };
//! # let mut delay = MockDelay;
//! let mut display = GraphicDisplay::new(Display::new(interface, config), [0u8; 1024]);
//! let _ = display.init(&mut delay);
//!
//! display.draw_circle(64, 32, 20, Color::White);
//! let _ = Rectangle::new(Point::new(4, 4), Size::new(16, 8))
//!     .into_styled(PrimitiveStyle::with_fill(Color::White))
//!     .draw(&mut display);
//!
//! let _ = display.flush();
//! ```

use embedded_hal::delay::DelayNs;

use crate::color::Color;
use crate::config::Rotation;
use crate::display::Display;
use crate::error::{BuilderError, Error, TextError};
use crate::font::{Font, Symbol};
use crate::framebuffer::{Framebuffer, Vertex};
use crate::interface::DisplayInterface;

type GraphicsResult<I> = core::result::Result<(), Error<I>>;

/// Display with a framebuffer
///
/// ## Type Parameters
///
/// * `I` - Interface type implementing [`DisplayInterface`]
/// * `B` - Buffer type implementing `AsRef<[u8]> + AsMut<[u8]>`
pub struct GraphicDisplay<I, B>
where
    I: DisplayInterface,
    B: AsRef<[u8]> + AsMut<[u8]>,
{
    display: Display<I>,
    framebuffer: Framebuffer<B>,
}

impl<I, B> GraphicDisplay<I, B>
where
    I: DisplayInterface,
    B: AsRef<[u8]> + AsMut<[u8]>,
{
    /// Create a new GraphicDisplay
    ///
    /// # Panics
    ///
    /// Panics if `buffer` is smaller than `dimensions.buffer_size()`.
    /// Use [`try_new`](Self::try_new) for a fallible version.
    pub fn new(display: Display<I>, buffer: B) -> Self {
        let framebuffer = Framebuffer::new(buffer, display.config());
        Self {
            display,
            framebuffer,
        }
    }

    /// Try to create a new GraphicDisplay, returning an error if the buffer is too small
    pub fn try_new(display: Display<I>, buffer: B) -> Result<Self, Error<I>> {
        let required = display.dimensions().buffer_size();
        let provided = buffer.as_ref().len();
        if provided < required {
            return Err(Error::BufferTooSmall { required, provided });
        }
        Ok(Self::new(display, buffer))
    }

    /// Initialize the controller and show a blank screen
    ///
    /// The framebuffer is cleared to black, the cursor goes back to the
    /// origin and text rotation to the configured one before the first flush.
    pub fn init<D: DelayNs>(&mut self, delay: &mut D) -> GraphicsResult<I> {
        self.display.init(delay)?;
        self.framebuffer.fill(Color::Black);
        self.framebuffer.reset_cursor();
        self.framebuffer.set_rotation(self.display.config().rotation);
        self.flush()
    }

    /// Send the framebuffer to the panel
    pub fn flush(&mut self) -> GraphicsResult<I> {
        self.display.flush(self.framebuffer.as_bytes())
    }

    /// Change the panel contrast
    pub fn set_contrast(&mut self, value: u8) -> GraphicsResult<I> {
        self.display.set_contrast(value)
    }

    /// Switch the panel output on or off
    pub fn set_display_on(&mut self, on: bool) -> GraphicsResult<I> {
        self.display.set_display_on(on)
    }

    /// Fill the framebuffer with a color
    pub fn fill(&mut self, color: Color) {
        self.framebuffer.fill(color);
    }

    /// Copy a prebuilt page-layout image into the framebuffer
    pub fn fill_buffer(&mut self, image: &[u8]) -> Result<(), BuilderError> {
        self.framebuffer.fill_buffer(image)
    }

    /// Set a single pixel
    pub fn set_pixel(&mut self, x: i32, y: i32, color: Color) {
        self.framebuffer.set_pixel(x, y, color);
    }

    /// Draw a line
    pub fn draw_line(&mut self, x1: i32, y1: i32, x2: i32, y2: i32, color: Color) {
        self.framebuffer.draw_line(x1, y1, x2, y2, color);
    }

    /// Draw a circle outline
    pub fn draw_circle(&mut self, cx: i32, cy: i32, r: u16, color: Color) {
        self.framebuffer.draw_circle(cx, cy, r, color);
    }

    /// Draw a filled circle
    pub fn fill_circle(&mut self, cx: i32, cy: i32, r: u16, color: Color) {
        self.framebuffer.fill_circle(cx, cy, r, color);
    }

    /// Draw an arc, see [`Framebuffer::draw_arc`]
    pub fn draw_arc(&mut self, cx: i32, cy: i32, r: u16, start_angle: u16, sweep: u16, color: Color) {
        self.framebuffer
            .draw_arc(cx, cy, r, start_angle, sweep, color);
    }

    /// Draw an arc with radii to both end points
    pub fn draw_arc_with_radius_line(
        &mut self,
        cx: i32,
        cy: i32,
        r: u16,
        start_angle: u16,
        sweep: u16,
        color: Color,
    ) {
        self.framebuffer
            .draw_arc_with_radius_line(cx, cy, r, start_angle, sweep, color);
    }

    /// Draw a rectangle outline
    pub fn draw_rectangle(&mut self, x1: i32, y1: i32, x2: i32, y2: i32, color: Color) {
        self.framebuffer.draw_rectangle(x1, y1, x2, y2, color);
    }

    /// Draw a filled rectangle
    pub fn fill_rectangle(&mut self, x1: i32, y1: i32, x2: i32, y2: i32, color: Color) {
        self.framebuffer.fill_rectangle(x1, y1, x2, y2, color);
    }

    /// Draw connected line segments
    pub fn draw_polyline(&mut self, vertices: &[Vertex], color: Color) {
        self.framebuffer.draw_polyline(vertices, color);
    }

    /// Draw a 1-bit bitmap
    pub fn draw_bitmap(&mut self, x: i32, y: i32, bitmap: &[u8], w: u16, h: u16, color: Color) {
        self.framebuffer.draw_bitmap(x, y, bitmap, w, h, color);
    }

    /// Move the text cursor
    pub fn set_cursor(&mut self, x: i32, y: i32) {
        self.framebuffer.set_cursor(x, y);
    }

    /// Write one character at the cursor
    pub fn write_char(&mut self, ch: char, font: &Font<'_>, color: Color) -> Result<(), TextError> {
        self.framebuffer.write_char(ch, font, color)
    }

    /// Write a string at the cursor
    pub fn write_string(&mut self, text: &str, font: &Font<'_>, color: Color) -> Result<(), TextError> {
        self.framebuffer.write_string(text, font, color)
    }

    /// Draw a symbol at `(x, y)`
    pub fn write_symbol(&mut self, symbol: &Symbol<'_>, x: i32, y: i32) -> bool {
        self.framebuffer.write_symbol(symbol, x, y)
    }

    /// Switch rotated text on or off
    pub fn set_rotated(&mut self, rotated: bool) {
        self.framebuffer.set_rotated(rotated);
    }

    /// Whether text is rendered rotated
    pub fn is_rotated(&self) -> bool {
        self.framebuffer.is_rotated()
    }

    /// Get text rotation
    pub fn rotation(&self) -> Rotation {
        self.framebuffer.rotation()
    }

    /// Access the framebuffer
    pub fn framebuffer(&self) -> &Framebuffer<B> {
        &self.framebuffer
    }

    /// Mutable access to the framebuffer
    pub fn framebuffer_mut(&mut self) -> &mut Framebuffer<B> {
        &mut self.framebuffer
    }

    /// Access the display driver
    pub fn display(&self) -> &Display<I> {
        &self.display
    }

    /// Mutable access to the display driver
    pub fn display_mut(&mut self) -> &mut Display<I> {
        &mut self.display
    }

    /// Split into the display driver and the buffer storage
    pub fn release(self) -> (Display<I>, B) {
        (self.display, self.framebuffer.release())
    }
}

#[cfg(feature = "graphics")]
mod draw_target {
    use core::convert::Infallible;
    use embedded_graphics_core::{
        draw_target::DrawTarget,
        geometry::{OriginDimensions, Point, Size},
        prelude::Pixel,
    };

    use super::GraphicDisplay;
    use crate::color::Color;
    use crate::framebuffer::Framebuffer;
    use crate::interface::DisplayInterface;

    impl<B> DrawTarget for Framebuffer<B>
    where
        B: AsRef<[u8]> + AsMut<[u8]>,
    {
        type Color = Color;
        type Error = Infallible;

        fn draw_iter<Iter>(&mut self, pixels: Iter) -> Result<(), Self::Error>
        where
            Iter: IntoIterator<Item = Pixel<Self::Color>>,
        {
            for Pixel(Point { x, y }, color) in pixels {
                self.set_pixel(x, y, color);
            }
            Ok(())
        }

        fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
            self.fill(color);
            Ok(())
        }
    }

    impl<B> OriginDimensions for Framebuffer<B>
    where
        B: AsRef<[u8]> + AsMut<[u8]>,
    {
        fn size(&self) -> Size {
            let dims = self.dimensions();
            Size::new(dims.width as u32, dims.height as u32)
        }
    }

    impl<I, B> DrawTarget for GraphicDisplay<I, B>
    where
        I: DisplayInterface,
        B: AsRef<[u8]> + AsMut<[u8]>,
    {
        type Color = Color;
        type Error = Infallible;

        fn draw_iter<Iter>(&mut self, pixels: Iter) -> Result<(), Self::Error>
        where
            Iter: IntoIterator<Item = Pixel<Self::Color>>,
        {
            self.framebuffer_mut().draw_iter(pixels)
        }

        fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
            self.fill(color);
            Ok(())
        }
    }

    impl<I, B> OriginDimensions for GraphicDisplay<I, B>
    where
        I: DisplayInterface,
        B: AsRef<[u8]> + AsMut<[u8]>,
    {
        fn size(&self) -> Size {
            self.framebuffer().size()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Builder, Dimensions};
    use crate::display::State;
    use alloc::vec::Vec;

    #[derive(Debug, Default)]
    struct MockInterface {
        commands: Vec<u8>,
        data: Vec<Vec<u8>>,
    }

    impl DisplayInterface for MockInterface {
        type Error = core::convert::Infallible;

        fn send_command(&mut self, command: u8) -> Result<(), Self::Error> {
            self.commands.push(command);
            Ok(())
        }

        fn send_data(&mut self, data: &[u8]) -> Result<(), Self::Error> {
            self.data.push(data.to_vec());
            Ok(())
        }

        fn reset<D: DelayNs>(&mut self, _delay: &mut D) {}
    }

    struct MockDelay;
    impl DelayNs for MockDelay {
        fn delay_ns(&mut self, _ns: u32) {}
    }

    fn test_display(rotation: Rotation) -> Display<MockInterface> {
        let config = Builder::new()
            .dimensions(Dimensions::new(128, 64).unwrap())
            .rotation(rotation)
            .build()
            .unwrap();
        Display::new(MockInterface::default(), config)
    }

    fn bursts(gd: &GraphicDisplay<MockInterface, [u8; 1024]>) -> &[Vec<u8>] {
        &gd.display().interface().data
    }

    #[test]
    fn test_try_new_small_buffer_returns_error() {
        let result = GraphicDisplay::try_new(test_display(Rotation::Normal), [0u8; 512]);
        assert!(matches!(
            result,
            Err(Error::BufferTooSmall {
                required: 1024,
                provided: 512
            })
        ));
    }

    #[test]
    #[should_panic(expected = "framebuffer too small")]
    fn test_new_panics_on_small_buffer() {
        let _ = GraphicDisplay::new(test_display(Rotation::Normal), [0u8; 512]);
    }

    #[test]
    fn test_init_clears_and_flushes() {
        let mut gd = GraphicDisplay::new(test_display(Rotation::Normal), [0xFFu8; 1024]);
        gd.init(&mut MockDelay).unwrap();

        assert_eq!(gd.display().state(), State::Ready);
        assert_eq!(bursts(&gd).len(), 8);
        assert!(bursts(&gd).iter().flatten().all(|&b| b == 0x00));
    }

    #[test]
    fn test_init_restores_cursor_and_rotation() {
        let mut gd = GraphicDisplay::new(test_display(Rotation::Rotated180), [0u8; 1024]);
        gd.set_rotated(false);
        gd.set_cursor(40, 20);
        gd.init(&mut MockDelay).unwrap();

        assert!(gd.is_rotated());
        assert_eq!(gd.framebuffer().cursor(), (0, 0));
    }

    #[test]
    fn test_draw_and_flush_scenario() {
        let mut gd = GraphicDisplay::new(test_display(Rotation::Normal), [0u8; 1024]);
        gd.init(&mut MockDelay).unwrap();

        gd.fill(Color::Black);
        gd.draw_circle(64, 32, 10, Color::White);
        gd.flush().unwrap();

        let data = bursts(&gd);
        assert_eq!(data.len(), 16);
        assert!(data[8..].iter().all(|burst| burst.len() == 128));
        // Circle spans rows 22..=42, i.e. pages 2 to 5
        assert!(data[8 + 2].iter().any(|&b| b != 0));
        assert!(data[8 + 5].iter().any(|&b| b != 0));
        assert!(data[8].iter().all(|&b| b == 0));
        assert!(data[8 + 7].iter().all(|&b| b == 0));
        // Rightmost point (74, 32) is bit 0 of page 4
        assert_ne!(data[8 + 4][74] & 0x01, 0);
    }

    #[test]
    fn test_flush_before_init_returns_error() {
        let mut gd = GraphicDisplay::new(test_display(Rotation::Normal), [0u8; 1024]);
        assert!(matches!(gd.flush(), Err(Error::NotInitialized)));
    }

    #[test]
    fn test_text_through_display() {
        static ROWS: [u16; 95 * 2] = [0xC000; 95 * 2];
        let font = Font::new(2, 2, &ROWS);

        let mut gd = GraphicDisplay::new(test_display(Rotation::Normal), [0u8; 1024]);
        gd.set_cursor(0, 0);
        gd.write_string("ab", &font, Color::White).unwrap();
        assert_eq!(&gd.framebuffer().as_bytes()[..5], &[0x03, 0x03, 0x03, 0x03, 0x00]);
        assert_eq!(
            gd.write_char('\t', &font, Color::White),
            Err(TextError::UnsupportedChar('\t'))
        );
    }

    #[test]
    fn test_release_returns_buffer() {
        let mut gd = GraphicDisplay::new(test_display(Rotation::Normal), [0u8; 1024]);
        gd.set_pixel(0, 0, Color::White);
        let (_display, buffer) = gd.release();
        assert_eq!(buffer[0], 0x01);
    }

    #[cfg(feature = "graphics")]
    #[test]
    fn test_embedded_graphics_primitives() {
        use embedded_graphics::{
            pixelcolor::BinaryColor,
            prelude::*,
            primitives::{Line, PrimitiveStyle, Rectangle},
        };

        let mut gd = GraphicDisplay::new(test_display(Rotation::Normal), [0u8; 1024]);
        assert_eq!(gd.size(), Size::new(128, 64));

        Rectangle::new(Point::new(10, 10), Size::new(4, 3))
            .into_styled(PrimitiveStyle::with_fill(Color::White))
            .draw(&mut gd)
            .unwrap();
        let fb = gd.framebuffer();
        assert_eq!(fb.get_pixel(10, 10), Some(Color::White));
        assert_eq!(fb.get_pixel(13, 12), Some(Color::White));
        assert_eq!(fb.get_pixel(14, 12), Some(Color::Black));

        // Off-panel pixels are clipped
        Line::new(Point::new(120, 63), Point::new(140, 63))
            .into_styled(PrimitiveStyle::with_stroke(Color::from(BinaryColor::On), 1))
            .draw(gd.framebuffer_mut())
            .unwrap();
        assert_eq!(gd.framebuffer().get_pixel(127, 63), Some(Color::White));

        gd.clear(Color::White).unwrap();
        assert!(gd.framebuffer().as_bytes().iter().all(|&b| b == 0xFF));
    }
}
