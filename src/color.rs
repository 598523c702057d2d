//! Pixel colors for monochrome OLED panels
//!
//! The SSD1309 drives one bit per pixel. A set bit lights the pixel
//! ([`Color::White`]), a clear bit leaves it dark ([`Color::Black`]).
//! With inverse color mode enabled in [`crate::Builder`] the panel swaps the
//! meaning in hardware; the framebuffer contents stay the same.
//!
//! ## Example
//!
//! ```
//! use ssd1309::Color;
//!
//! assert_eq!(Color::Black.fill_byte(), 0x00);
//! assert_eq!(Color::White.fill_byte(), 0xFF);
//! assert_eq!(!Color::White, Color::Black);
//! ```

/// Colors supported by SSD1309 panels
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum Color {
    /// Pixel off (bit clear)
    #[default]
    Black,
    /// Pixel on (bit set)
    White,
}

#[cfg(feature = "graphics")]
impl embedded_graphics_core::prelude::PixelColor for Color {
    type Raw = embedded_graphics_core::pixelcolor::raw::RawU1;
}

#[cfg(feature = "graphics")]
impl From<embedded_graphics_core::pixelcolor::BinaryColor> for Color {
    fn from(color: embedded_graphics_core::pixelcolor::BinaryColor) -> Self {
        match color {
            embedded_graphics_core::pixelcolor::BinaryColor::Off => Self::Black,
            embedded_graphics_core::pixelcolor::BinaryColor::On => Self::White,
        }
    }
}

impl Color {
    /// Byte value that paints eight pixels of a page with this color
    ///
    /// ## Example
    ///
    /// ```
    /// use ssd1309::Color;
    ///
    /// assert_eq!(Color::Black.fill_byte(), 0x00);
    /// assert_eq!(Color::White.fill_byte(), 0xFF);
    /// ```
    pub fn fill_byte(self) -> u8 {
        match self {
            Self::Black => 0x00,
            Self::White => 0xFF,
        }
    }

    /// Whether this color sets the pixel bit
    pub fn is_on(self) -> bool {
        self == Self::White
    }
}

impl core::ops::Not for Color {
    type Output = Self;

    fn not(self) -> Self::Output {
        match self {
            Self::Black => Self::White,
            Self::White => Self::Black,
        }
    }
}

impl From<bool> for Color {
    fn from(on: bool) -> Self {
        if on { Self::White } else { Self::Black }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inverse_color() {
        assert_eq!(!Color::Black, Color::White);
        assert_eq!(!!Color::White, Color::White);
    }

    #[test]
    fn test_color_from_bool() {
        assert_eq!(Color::from(true), Color::White);
        assert_eq!(Color::from(false), Color::Black);
        assert!(Color::White.is_on());
        assert!(!Color::Black.is_on());
    }
}
