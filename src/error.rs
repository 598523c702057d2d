//! Error types for the driver
//!
//! This module defines error types for configuration building ([`BuilderError`]),
//! controller operations ([`Error`]) and text rendering ([`TextError`]).
//!
//! ## Error Types
//!
//! - [`BuilderError`] - Errors during configuration, framebuffer construction
//!   and image loading
//! - [`Error`] - Runtime errors during controller operations
//! - [`TextError`] - A character that could not be written
//! - [`InterfaceError`](crate::interface::InterfaceError) - Low-level bus communication errors
//!
//! Drawing primitives never fail: geometry outside the panel is clipped.
//!
//! ## Example
//!
//! ```
//! use ssd1309::{Builder, BuilderError, Dimensions};
//!
//! // Missing dimensions
//! let result = Builder::new().build();
//! assert!(matches!(result, Err(BuilderError::MissingDimensions)));
//!
//! // Unsupported panel height
//! let result = Dimensions::new(128, 48);
//! assert!(result.is_err());
//! ```

use crate::interface::DisplayInterface;

/// Largest column count addressable by the controller's column counter
///
/// The SSD1309 drives 128 segments; some glass is sold with 130 or 132
/// columns and a column offset, so the column address space is accepted.
pub const MAX_COLUMNS: u16 = 132;

/// Panel heights supported by the init sequence
pub const SUPPORTED_HEIGHTS: [u16; 3] = [32, 64, 128];

/// Errors that can occur when interacting with the display
///
/// Generic over the interface type to preserve the specific error type.
#[derive(Debug)]
pub enum Error<I: DisplayInterface> {
    /// Interface error (SPI/I2C/GPIO)
    ///
    /// Wraps the underlying hardware error from the [`DisplayInterface`] implementation.
    Interface(I::Error),
    /// Buffer is too small for the display
    ///
    /// The provided buffer must be at least `dimensions.buffer_size()` bytes.
    BufferTooSmall {
        /// Required buffer size in bytes
        required: usize,
        /// Provided buffer size in bytes
        provided: usize,
    },
    /// The controller has not completed its init sequence
    ///
    /// Call [`Display::init`](crate::Display::init) first. An init interrupted
    /// by a transport error also leaves the controller in this condition.
    NotInitialized,
}

impl<I: DisplayInterface> core::fmt::Display for Error<I> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Interface(_) => write!(f, "Interface error"),
            Self::BufferTooSmall { required, provided } => {
                write!(
                    f,
                    "Buffer too small: required {required} bytes, provided {provided}"
                )
            }
            Self::NotInitialized => write!(f, "Display not initialized"),
        }
    }
}

impl<I: DisplayInterface + core::fmt::Debug> core::error::Error for Error<I> {}

/// Errors that can occur when building configuration
///
/// These errors occur before the display is created, either in the builder
/// or when a framebuffer is attached to a buffer.
#[derive(Debug, PartialEq, Eq)]
pub enum BuilderError {
    /// Dimensions were not specified
    ///
    /// [`Builder::dimensions()`](crate::config::Builder::dimensions) must be called before building.
    MissingDimensions,
    /// Invalid dimensions provided
    ///
    /// See [`Dimensions::new()`](crate::config::Dimensions::new) for constraints.
    InvalidDimensions {
        /// Number of columns (width) requested
        width: u16,
        /// Number of rows (height) requested
        height: u16,
    },
    /// Framebuffer storage is smaller than `dimensions.buffer_size()`
    BufferTooSmall {
        /// Required buffer size in bytes
        required: usize,
        /// Provided buffer size in bytes
        provided: usize,
    },
    /// Image passed to [`fill_buffer`](crate::Framebuffer::fill_buffer) is
    /// longer than the framebuffer
    ImageTooLarge {
        /// Framebuffer size in bytes
        max: usize,
        /// Image length in bytes
        provided: usize,
    },
}

impl core::fmt::Display for BuilderError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::MissingDimensions => write!(f, "Dimensions must be specified"),
            Self::InvalidDimensions { width, height } => write!(
                f,
                "Invalid dimensions {width}x{height} (max width {MAX_COLUMNS}, height must be 32, 64 or 128)"
            ),
            Self::BufferTooSmall { required, provided } => write!(
                f,
                "Buffer too small: required {required} bytes, provided {provided}"
            ),
            Self::ImageTooLarge { max, provided } => write!(
                f,
                "Image too large: framebuffer holds {max} bytes, provided {provided}"
            ),
        }
    }
}

impl core::error::Error for BuilderError {}

/// A character that could not be written to the framebuffer
///
/// Carries the offending character so callers of
/// [`write_string`](crate::Framebuffer::write_string) can tell where
/// rendering stopped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextError {
    /// Character outside printable ASCII (`' '..='~'`) or missing from the font table
    UnsupportedChar(char),
    /// The glyph would run off the panel in the direction of writing
    NoSpace(char),
}

impl TextError {
    /// The character that failed to render
    pub fn char(self) -> char {
        match self {
            Self::UnsupportedChar(ch) | Self::NoSpace(ch) => ch,
        }
    }
}

impl core::fmt::Display for TextError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::UnsupportedChar(ch) => write!(f, "Unsupported character {ch:?}"),
            Self::NoSpace(ch) => write!(f, "No space left for character {ch:?}"),
        }
    }
}

impl core::error::Error for TextError {}
