//! SSD1309 OLED Display Driver
//!
//! A driver for the SSD1309 monochrome OLED controller with panels of 32, 64
//! or 128 rows and up to 132 columns.
//!
//! ## Features
//!
//! - `no_std` compatible
//! - `embedded-hal` v1.0 support, over SPI or I2C
//! - Packed 1-bit framebuffer with lines, circles, arcs, rectangles,
//!   polylines and bitmaps
//! - Fixed-width bitmap fonts and status symbols, with 180° rotated text
//! - `embedded-graphics` integration (with `graphics` feature)
//!
//! ## Usage
//!
//! ```rust,no_run
//! use core::convert::Infallible;
//! use embedded_hal::delay::DelayNs;
//! use embedded_hal::digital::OutputPin;
//! use embedded_hal::spi::{Operation, SpiDevice};
//! use ssd1309::{Builder, Color, Dimensions, Display, GraphicDisplay, SpiInterface};
//!
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
//! # let spi = MockSpi;
//! # let dc = MockPin;
//! # let rst = MockPin;
//! # let mut delay = MockDelay;
//! let interface = SpiInterface::new(spi, dc, rst);
//! let dims = match Dimensions::new(128, 64) {
//!     Ok(dims) => dims,
//!     Err(_) => return,
//! };
//! let config = match Builder::new().dimensions(dims).build() {
//!     Ok(config) => config,
//!     Err(_) => return,
//! };
//!
//! let mut display = GraphicDisplay::new(Display::new(interface, config), [0u8; 1024]);
//! let _ = display.init(&mut delay);
//!
//! display.draw_rectangle(0, 0, 127, 63, Color::White);
//! display.fill_circle(64, 32, 12, Color::White);
//! let _ = display.flush();
//! ```

#![no_std]

#[cfg(test)]
extern crate alloc;

/// Monochrome pixel color
pub mod color;
/// SSD1309 command definitions
pub mod command;
/// Display configuration types and builder
pub mod config;
/// Core display operations
pub mod display;
/// Error types for the driver
pub mod error;
/// Glyph and symbol table types
pub mod font;
/// Packed framebuffer and drawing primitives
pub mod framebuffer;
/// Framebuffer-backed display driver
pub mod graphics;
/// Hardware interface abstraction
pub mod interface;
/// Coordinate rotation utilities
pub mod rotation;
/// Text and symbol rendering
mod text;

pub use color::Color;
pub use config::{Builder, Config, Dimensions, MAX_COLUMNS, Rotation};
pub use display::{Display, State};
pub use error::{BuilderError, Error, TextError};
pub use font::{Font, Symbol, SymbolId};
pub use framebuffer::{Framebuffer, Vertex};
pub use graphics::GraphicDisplay;
pub use interface::InterfaceError;
pub use interface::{DEFAULT_I2C_ADDRESS, DisplayInterface, I2cInterface, SpiInterface};
