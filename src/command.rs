//! SSD1309 command definitions
//!
//! This module defines the register bytes used to drive the SSD1309 OLED
//! controller. On SPI every command byte is clocked out with the DC pin low,
//! on I2C it is prefixed with a command control byte. Parameters of
//! multi-byte commands are sent as further command bytes, not as data.
//!
//! ## Example
//!
//! ```rust,no_run
//! use ssd1309::{command, DisplayInterface, SpiInterface};
//! # use core::convert::Infallible;
//! # use embedded_hal::digital::OutputPin;
//! # use embedded_hal::spi::{Operation, SpiDevice};
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
//! # let mut interface = SpiInterface::new(MockSpi, MockPin, MockPin);
//! // Contrast is a two-byte command: register, then value
//! let _ = interface.send_command(command::SET_CONTRAST);
//! let _ = interface.send_command(0x7F);
//! ```

// Fundamental commands

/// Set contrast control (0x81)
///
/// Followed by one byte; contrast grows with the value. Reset value is 0x7F.
pub const SET_CONTRAST: u8 = 0x81;

/// Entire display on, output follows RAM content (0xA4)
pub const DISPLAY_ALL_ON_RESUME: u8 = 0xA4;

/// Normal display, a set RAM bit lights the pixel (0xA6)
pub const NORMAL_DISPLAY: u8 = 0xA6;

/// Inverse display, a clear RAM bit lights the pixel (0xA7)
pub const INVERSE_DISPLAY: u8 = 0xA7;

/// Display off, sleep mode (0xAE)
pub const DISPLAY_OFF: u8 = 0xAE;

/// Display on, normal mode (0xAF)
pub const DISPLAY_ON: u8 = 0xAF;

// Addressing commands

/// Set memory addressing mode (0x20)
///
/// Followed by one byte: 0x00 horizontal, 0x01 vertical, 0x10 page addressing.
pub const MEMORY_ADDRESSING_MODE: u8 = 0x20;

/// Page addressing mode parameter for [`MEMORY_ADDRESSING_MODE`]
pub const PAGE_ADDRESSING: u8 = 0x10;

/// Set page start address for page addressing mode (0xB0 | page)
pub const SET_PAGE_START: u8 = 0xB0;

/// Set lower nibble of the column start address (0x00 | nibble)
pub const SET_LOW_COLUMN: u8 = 0x00;

/// Set upper bits of the column start address (0x10 | bits)
pub const SET_HIGH_COLUMN: u8 = 0x10;

// Hardware configuration commands

/// Set display start line (0x40 | line)
pub const SET_START_LINE: u8 = 0x40;

/// Segment re-map, column 0 mapped to SEG0 (0xA0)
///
/// Mirrors the image horizontally compared to [`SEGMENT_REMAP_REVERSED`].
pub const SEGMENT_REMAP_NORMAL: u8 = 0xA0;

/// Segment re-map, column 127 mapped to SEG0 (0xA1)
pub const SEGMENT_REMAP_REVERSED: u8 = 0xA1;

/// Set multiplex ratio (0xA8)
///
/// Followed by one byte: number of active rows minus one.
pub const SET_MULTIPLEX_RATIO: u8 = 0xA8;

/// Replacement for [`SET_MULTIPLEX_RATIO`] on 128-row glass
///
/// Taken over from SH1106 init sequences; 128-row panels stay at a 64 row
/// multiplex ratio.
pub const SET_MULTIPLEX_RATIO_128: u8 = 0xFF;

/// COM output scan direction, COM0 to COM[N-1] (0xC0)
///
/// Mirrors the image vertically compared to [`COM_SCAN_DECREMENT`].
pub const COM_SCAN_INCREMENT: u8 = 0xC0;

/// COM output scan direction, COM[N-1] to COM0 (0xC8)
pub const COM_SCAN_DECREMENT: u8 = 0xC8;

/// Set display offset (0xD3)
///
/// Followed by one byte: vertical shift by COM.
pub const SET_DISPLAY_OFFSET: u8 = 0xD3;

/// Set COM pins hardware configuration (0xDA)
///
/// Followed by one byte: 0x02 sequential (32 rows), 0x12 alternative.
pub const SET_COM_PINS: u8 = 0xDA;

// Timing and driving scheme commands

/// Set display clock divide ratio / oscillator frequency (0xD5)
pub const SET_CLOCK_DIVIDE: u8 = 0xD5;

/// Set pre-charge period (0xD9)
pub const SET_PRECHARGE: u8 = 0xD9;

/// Set VCOMH deselect level (0xDB)
pub const SET_VCOMH: u8 = 0xDB;

/// DC-DC / charge pump setting (0x8D)
///
/// Followed by one byte: 0x14 enables the internal supply.
pub const CHARGE_PUMP: u8 = 0x8D;

// I2C control bytes

/// I2C control byte announcing a command stream
pub const I2C_CONTROL_COMMAND: u8 = 0x00;

/// I2C control byte announcing a data stream
pub const I2C_CONTROL_DATA: u8 = 0x40;
