//! Display configuration types and builder

pub use crate::error::{BuilderError, MAX_COLUMNS, SUPPORTED_HEIGHTS};

/// Display dimensions
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Dimensions {
    /// Number of columns (width in pixels, corresponds to segment outputs)
    pub width: u16,
    /// Number of rows (height in pixels, corresponds to COM outputs)
    pub height: u16,
}

impl Dimensions {
    /// Create new dimensions with validation
    ///
    /// # Errors
    ///
    /// Returns `BuilderError::InvalidDimensions` if:
    /// - width == 0 or width > MAX_COLUMNS
    /// - height is not one of 32, 64 or 128
    pub fn new(width: u16, height: u16) -> Result<Self, BuilderError> {
        if width == 0 || width > MAX_COLUMNS {
            return Err(BuilderError::InvalidDimensions { width, height });
        }
        if !SUPPORTED_HEIGHTS.contains(&height) {
            return Err(BuilderError::InvalidDimensions { width, height });
        }
        Ok(Self { width, height })
    }

    /// Calculate required buffer size in bytes
    pub fn buffer_size(&self) -> usize {
        (self.width as usize * self.height as usize) / 8
    }

    /// Number of 8-row pages
    pub fn pages(&self) -> u8 {
        (self.height / 8) as u8
    }

    /// Whether `(x, y)` addresses a pixel on the panel
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && x < self.width as i32 && y < self.height as i32
    }
}

/// Presentation of text and symbols relative to the native orientation
///
/// Rotation only affects the cursor and text rendering. Primitives such as
/// lines and circles always use native panel coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Rotation {
    /// Native orientation
    #[default]
    Normal,
    /// Panel mounted upside down; text is point-reflected and written right to left
    Rotated180,
}

/// Display configuration
///
/// This struct holds all configurable parameters for the SSD1309 controller.
/// Use `Builder` to create a Config.
#[derive(Clone, Debug)]
pub struct Config {
    /// Display dimensions
    pub dimensions: Dimensions,
    /// Text rotation applied after init
    pub rotation: Rotation,
    /// Use 0xA0 segment re-map instead of 0xA1
    pub mirror_horizontal: bool,
    /// Use 0xC0 COM scan direction instead of 0xC8
    pub mirror_vertical: bool,
    /// Light pixels whose RAM bit is clear
    pub inverse_color: bool,
    /// Contrast programmed during init
    pub contrast: u8,
    /// Display clock divide ratio / oscillator frequency byte
    pub clock_divide: u8,
    /// Pre-charge period byte
    pub precharge_period: u8,
    /// VCOMH deselect level byte
    pub vcomh_level: u8,
    /// DC-DC / charge pump setting byte
    pub charge_pump: u8,
    /// Horizontal cursor offset subtracted in `set_cursor`
    pub offset_x: i16,
    /// Vertical cursor offset subtracted in `set_cursor`
    pub offset_y: i16,
    /// Column address the first framebuffer column is written to
    pub column_offset: u8,
}

impl Config {
    /// Multiplex ratio byte for the configured height
    pub fn multiplex_ratio(&self) -> u8 {
        match self.dimensions.height {
            32 => 0x1F,
            _ => 0x3F,
        }
    }

    /// COM pins hardware configuration byte for the configured height
    pub fn com_pins(&self) -> u8 {
        match self.dimensions.height {
            32 => 0x02,
            _ => 0x12,
        }
    }
}

/// Builder for constructing display configuration
///
/// # Example
///
/// ```rust,no_run
/// use ssd1309::{Builder, Dimensions, Rotation};
///
/// let dims = match Dimensions::new(128, 64) {
///     Ok(dims) => dims,
///     Err(_) => return,
/// };
/// let config = match Builder::new()
///     .dimensions(dims)
///     .rotation(Rotation::Rotated180)
///     .contrast(0x7F)
///     .build()
/// {
///     Ok(config) => config,
///     Err(_) => return,
/// };
/// let _ = config;
/// ```
#[must_use]
pub struct Builder {
    /// Display dimensions (required)
    dimensions: Option<Dimensions>,
    /// Text rotation
    rotation: Rotation,
    /// Use 0xA0 segment re-map
    mirror_horizontal: bool,
    /// Use 0xC0 COM scan direction
    mirror_vertical: bool,
    /// Inverse color mode
    inverse_color: bool,
    /// Contrast programmed during init
    contrast: u8,
    /// Display clock divide byte
    clock_divide: u8,
    /// Pre-charge period byte
    precharge_period: u8,
    /// VCOMH deselect level byte
    vcomh_level: u8,
    /// Charge pump byte
    charge_pump: u8,
    /// Horizontal cursor offset
    offset_x: i16,
    /// Vertical cursor offset
    offset_y: i16,
    /// First column address
    column_offset: u8,
}

impl Default for Builder {
    fn default() -> Self {
        Self {
            dimensions: None,
            rotation: Rotation::Normal,
            mirror_horizontal: false,
            mirror_vertical: false,
            inverse_color: false,
            // Full contrast, the reset value is 0x7F
            contrast: 0xFF,
            // Divide ratio 1, highest oscillator frequency
            clock_divide: 0xF0,
            // Phase 1 and phase 2 of two DCLKs
            precharge_period: 0x22,
            // ~0.77 x VCC
            vcomh_level: 0x20,
            charge_pump: 0x14,
            offset_x: 0,
            offset_y: 0,
            column_offset: 0,
        }
    }
}

impl Builder {
    /// Create a new Builder with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set display dimensions (required)
    pub fn dimensions(mut self, dims: Dimensions) -> Self {
        self.dimensions = Some(dims);
        self
    }

    /// Set text rotation
    pub fn rotation(mut self, rotation: Rotation) -> Self {
        self.rotation = rotation;
        self
    }

    /// Mirror the image horizontally (segment re-map 0xA0)
    pub fn mirror_horizontal(mut self, value: bool) -> Self {
        self.mirror_horizontal = value;
        self
    }

    /// Mirror the image vertically (COM scan 0xC0)
    pub fn mirror_vertical(mut self, value: bool) -> Self {
        self.mirror_vertical = value;
        self
    }

    /// Enable inverse color mode (0xA7)
    pub fn inverse_color(mut self, value: bool) -> Self {
        self.inverse_color = value;
        self
    }

    /// Set the contrast programmed during init
    pub fn contrast(mut self, value: u8) -> Self {
        self.contrast = value;
        self
    }

    /// Set display clock divide ratio / oscillator frequency
    pub fn clock_divide(mut self, value: u8) -> Self {
        self.clock_divide = value;
        self
    }

    /// Set pre-charge period
    pub fn precharge_period(mut self, value: u8) -> Self {
        self.precharge_period = value;
        self
    }

    /// Set VCOMH deselect level
    pub fn vcomh_level(mut self, value: u8) -> Self {
        self.vcomh_level = value;
        self
    }

    /// Set charge pump byte
    pub fn charge_pump(mut self, value: u8) -> Self {
        self.charge_pump = value;
        self
    }

    /// Set the pixel offset subtracted from cursor positions
    ///
    /// Panels whose visible area starts a few columns into the controller RAM
    /// use a negative X offset (for example -2 on 130 column glass).
    pub fn offset(mut self, x: i16, y: i16) -> Self {
        self.offset_x = x;
        self.offset_y = y;
        self
    }

    /// Set the column address the framebuffer is flushed to
    ///
    /// Only the low 7 bits are used.
    pub fn column_offset(mut self, value: u8) -> Self {
        self.column_offset = value;
        self
    }

    /// Build the configuration
    ///
    /// # Errors
    ///
    /// Returns `BuilderError::MissingDimensions` if dimensions were not set
    pub fn build(self) -> Result<Config, BuilderError> {
        Ok(Config {
            dimensions: self.dimensions.ok_or(BuilderError::MissingDimensions)?,
            rotation: self.rotation,
            mirror_horizontal: self.mirror_horizontal,
            mirror_vertical: self.mirror_vertical,
            inverse_color: self.inverse_color,
            contrast: self.contrast,
            clock_divide: self.clock_divide,
            precharge_period: self.precharge_period,
            vcomh_level: self.vcomh_level,
            charge_pump: self.charge_pump,
            offset_x: self.offset_x,
            offset_y: self.offset_y,
            column_offset: self.column_offset,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dimensions_supported_heights() {
        assert!(Dimensions::new(128, 32).is_ok());
        assert!(Dimensions::new(128, 64).is_ok());
        assert!(Dimensions::new(128, 128).is_ok());
        assert_eq!(
            Dimensions::new(128, 48),
            Err(BuilderError::InvalidDimensions {
                width: 128,
                height: 48
            })
        );
    }

    #[test]
    fn test_dimensions_width_limits() {
        assert!(Dimensions::new(0, 64).is_err());
        assert!(Dimensions::new(130, 64).is_ok());
        assert!(Dimensions::new(MAX_COLUMNS + 1, 64).is_err());
    }

    #[test]
    fn test_buffer_size_and_pages() {
        let dims = Dimensions::new(128, 64).unwrap();
        assert_eq!(dims.buffer_size(), 1024);
        assert_eq!(dims.pages(), 8);

        let dims = Dimensions::new(128, 32).unwrap();
        assert_eq!(dims.buffer_size(), 512);
        assert_eq!(dims.pages(), 4);
    }

    #[test]
    fn test_contains() {
        let dims = Dimensions::new(128, 64).unwrap();
        assert!(dims.contains(0, 0));
        assert!(dims.contains(127, 63));
        assert!(!dims.contains(128, 0));
        assert!(!dims.contains(0, 64));
        assert!(!dims.contains(-1, 0));
    }

    #[test]
    fn test_builder_requires_dimensions() {
        assert!(matches!(
            Builder::new().build(),
            Err(BuilderError::MissingDimensions)
        ));
    }

    #[test]
    fn test_height_dependent_registers() {
        let config = Builder::new()
            .dimensions(Dimensions::new(128, 32).unwrap())
            .build()
            .unwrap();
        assert_eq!(config.multiplex_ratio(), 0x1F);
        assert_eq!(config.com_pins(), 0x02);

        let config = Builder::new()
            .dimensions(Dimensions::new(128, 128).unwrap())
            .build()
            .unwrap();
        assert_eq!(config.multiplex_ratio(), 0x3F);
        assert_eq!(config.com_pins(), 0x12);
    }

    #[test]
    fn test_builder_defaults() {
        let config = Builder::new()
            .dimensions(Dimensions::new(128, 64).unwrap())
            .build()
            .unwrap();
        assert_eq!(config.rotation, Rotation::Normal);
        assert_eq!(config.contrast, 0xFF);
        assert_eq!(config.column_offset, 0);
        assert!(!config.inverse_color);
    }
}
