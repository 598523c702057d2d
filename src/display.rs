//! Core display operations
//!
//! [`Display`] owns the bus and runs the controller's command protocol:
//! reset, the register programming sequence and page-by-page flushes of a
//! framebuffer. It never looks at pixel data beyond its size.

use embedded_hal::delay::DelayNs;

use crate::command::{
    CHARGE_PUMP, COM_SCAN_DECREMENT, COM_SCAN_INCREMENT, DISPLAY_ALL_ON_RESUME, DISPLAY_OFF,
    DISPLAY_ON, INVERSE_DISPLAY, MEMORY_ADDRESSING_MODE, NORMAL_DISPLAY, PAGE_ADDRESSING,
    SEGMENT_REMAP_NORMAL, SEGMENT_REMAP_REVERSED, SET_CLOCK_DIVIDE, SET_COM_PINS, SET_CONTRAST,
    SET_DISPLAY_OFFSET, SET_HIGH_COLUMN, SET_LOW_COLUMN, SET_MULTIPLEX_RATIO,
    SET_MULTIPLEX_RATIO_128, SET_PAGE_START, SET_PRECHARGE, SET_START_LINE, SET_VCOMH,
};
use crate::config::{Config, Dimensions};
use crate::error::Error;
use crate::interface::DisplayInterface;

type DisplayResult<I> = core::result::Result<(), Error<I>>;

/// Time the controller needs after reset before it accepts commands
pub const BOOT_DELAY_MS: u32 = 100;

/// Number of command bytes sent by [`Display::init`]
pub const INIT_SEQUENCE_LEN: usize = 28;

/// Command protocol state
///
/// `init` walks `Uninitialized → Resetting → Configuring → Ready`. A failed
/// transfer leaves the state where it failed; running `init` again restarts
/// from `Resetting`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum State {
    /// `init` has not been called
    #[default]
    Uninitialized,
    /// Reset line toggled, waiting for the controller to boot
    Resetting,
    /// Register programming in progress
    Configuring,
    /// Accepting flushes
    Ready,
}

/// Core display driver for SSD1309
///
/// This struct provides low-level operations for the SSD1309 controller.
/// For drawing support, use [`GraphicDisplay`](crate::graphics::GraphicDisplay).
pub struct Display<I>
where
    I: DisplayInterface,
{
    /// Hardware interface
    interface: I,
    /// Display configuration
    config: Config,
    /// Command protocol state
    state: State,
    /// Whether the panel output is on
    is_display_on: bool,
}

impl<I> Display<I>
where
    I: DisplayInterface,
{
    /// Create a new Display instance
    ///
    /// Nothing is sent to the controller until [`init`](Self::init).
    pub fn new(interface: I, config: Config) -> Self {
        Self {
            interface,
            config,
            state: State::Uninitialized,
            is_display_on: false,
        }
    }

    /// Reset the controller and program every register
    ///
    /// Ends with the display switched on and ready to accept flushes.
    pub fn init<D: DelayNs>(&mut self, delay: &mut D) -> DisplayResult<I> {
        self.state = State::Resetting;
        self.is_display_on = false;
        log::debug!("ssd1309: reset");
        self.interface.reset(delay);
        delay.delay_ms(BOOT_DELAY_MS);

        self.state = State::Configuring;
        for command in init_sequence(&self.config) {
            self.send_command(command)?;
        }
        log::debug!("ssd1309: configured");

        self.state = State::Ready;
        self.is_display_on = true;
        log::debug!("ssd1309: ready");
        Ok(())
    }

    /// Send a framebuffer to display RAM
    ///
    /// Each page is addressed with page and column commands followed by one
    /// burst of `width` bytes.
    ///
    /// # Errors
    ///
    /// * `Error::NotInitialized` - [`init`](Self::init) has not completed
    /// * `Error::BufferTooSmall` - `buffer` is shorter than the panel
    pub fn flush(&mut self, buffer: &[u8]) -> DisplayResult<I> {
        self.ensure_ready()?;

        let required = self.config.dimensions.buffer_size();
        if buffer.len() < required {
            return Err(Error::BufferTooSmall {
                required,
                provided: buffer.len(),
            });
        }

        let width = self.config.dimensions.width as usize;
        let column = self.config.column_offset;
        log::trace!("ssd1309: flush {} pages", self.config.dimensions.pages());

        for (page, bytes) in buffer[..required].chunks_exact(width).enumerate() {
            self.send_command(SET_PAGE_START + page as u8)?;
            self.send_command(SET_LOW_COLUMN | (column & 0x0F))?;
            self.send_command(SET_HIGH_COLUMN | ((column >> 4) & 0x07))?;
            self.send_data(bytes)?;
        }
        Ok(())
    }

    /// Change the contrast without re-running init
    pub fn set_contrast(&mut self, value: u8) -> DisplayResult<I> {
        self.ensure_ready()?;
        self.send_command(SET_CONTRAST)?;
        self.send_command(value)?;
        self.config.contrast = value;
        log::debug!("ssd1309: contrast {:#04x}", value);
        Ok(())
    }

    /// Switch the panel output on or off
    ///
    /// Display RAM is retained while off.
    pub fn set_display_on(&mut self, on: bool) -> DisplayResult<I> {
        self.ensure_ready()?;
        self.send_command(if on { DISPLAY_ON } else { DISPLAY_OFF })?;
        self.is_display_on = on;
        log::debug!("ssd1309: display {}", if on { "on" } else { "off" });
        Ok(())
    }

    /// Current command protocol state
    pub fn state(&self) -> State {
        self.state
    }

    /// Whether the panel output is on
    pub fn is_display_on(&self) -> bool {
        self.is_display_on
    }

    /// Get display dimensions
    pub fn dimensions(&self) -> &Dimensions {
        &self.config.dimensions
    }

    /// Access the underlying configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Access the hardware interface
    pub fn interface(&self) -> &I {
        &self.interface
    }

    /// Mutable access to the hardware interface
    pub fn interface_mut(&mut self) -> &mut I {
        &mut self.interface
    }

    /// Release the hardware interface
    pub fn release(self) -> I {
        self.interface
    }

    fn ensure_ready(&self) -> DisplayResult<I> {
        if self.state == State::Ready {
            Ok(())
        } else {
            Err(Error::NotInitialized)
        }
    }

    /// Send a command to the display controller
    fn send_command(&mut self, cmd: u8) -> DisplayResult<I> {
        self.interface.send_command(cmd).map_err(Error::Interface)
    }

    /// Send data to the display controller
    fn send_data(&mut self, data: &[u8]) -> DisplayResult<I> {
        self.interface.send_data(data).map_err(Error::Interface)
    }
}

/// Register programming sequence for `config`, one command byte per entry
pub fn init_sequence(config: &Config) -> [u8; INIT_SEQUENCE_LEN] {
    let dims = config.dimensions;
    [
        DISPLAY_OFF,
        MEMORY_ADDRESSING_MODE,
        PAGE_ADDRESSING,
        SET_PAGE_START,
        if config.mirror_vertical {
            COM_SCAN_INCREMENT
        } else {
            COM_SCAN_DECREMENT
        },
        SET_LOW_COLUMN,
        SET_HIGH_COLUMN,
        SET_START_LINE,
        SET_CONTRAST,
        config.contrast,
        if config.mirror_horizontal {
            SEGMENT_REMAP_NORMAL
        } else {
            SEGMENT_REMAP_REVERSED
        },
        if config.inverse_color {
            INVERSE_DISPLAY
        } else {
            NORMAL_DISPLAY
        },
        if dims.height == 128 {
            SET_MULTIPLEX_RATIO_128
        } else {
            SET_MULTIPLEX_RATIO
        },
        config.multiplex_ratio(),
        DISPLAY_ALL_ON_RESUME,
        SET_DISPLAY_OFFSET,
        0x00,
        SET_CLOCK_DIVIDE,
        config.clock_divide,
        SET_PRECHARGE,
        config.precharge_period,
        SET_COM_PINS,
        config.com_pins(),
        SET_VCOMH,
        config.vcomh_level,
        CHARGE_PUMP,
        config.charge_pump,
        DISPLAY_ON,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Builder, Dimensions};
    use alloc::vec::Vec;

    #[derive(Debug, PartialEq)]
    struct BusFault;

    #[derive(Debug)]
    struct MockInterface {
        commands: Vec<u8>,
        data: Vec<Vec<u8>>,
        resets: usize,
        /// Fail the transfer with this index (commands and data counted together)
        fail_at: Option<usize>,
        transfers: usize,
    }

    impl MockInterface {
        fn new() -> Self {
            Self {
                commands: Vec::new(),
                data: Vec::new(),
                resets: 0,
                fail_at: None,
                transfers: 0,
            }
        }

        fn check(&mut self) -> Result<(), BusFault> {
            let index = self.transfers;
            self.transfers += 1;
            if self.fail_at == Some(index) {
                Err(BusFault)
            } else {
                Ok(())
            }
        }
    }

    impl DisplayInterface for MockInterface {
        type Error = BusFault;

        fn send_command(&mut self, command: u8) -> Result<(), Self::Error> {
            self.check()?;
            self.commands.push(command);
            Ok(())
        }

        fn send_data(&mut self, data: &[u8]) -> Result<(), Self::Error> {
            self.check()?;
            self.data.push(data.to_vec());
            Ok(())
        }

        fn reset<D: DelayNs>(&mut self, _delay: &mut D) {
            self.resets += 1;
        }
    }

    #[derive(Default)]
    struct MockDelay {
        total_ms: u32,
    }

    impl DelayNs for MockDelay {
        fn delay_ns(&mut self, ns: u32) {
            self.total_ms += ns / 1_000_000;
        }

        fn delay_ms(&mut self, ms: u32) {
            self.total_ms += ms;
        }
    }

    fn config(height: u16) -> Config {
        Builder::new()
            .dimensions(Dimensions::new(128, height).unwrap())
            .build()
            .unwrap()
    }

    fn test_display() -> Display<MockInterface> {
        Display::new(MockInterface::new(), config(64))
    }

    fn ready_display() -> Display<MockInterface> {
        let mut display = test_display();
        display.init(&mut MockDelay::default()).unwrap();
        display.interface.commands.clear();
        display.interface.data.clear();
        display
    }

    #[test]
    fn test_init_sequence_exact_order() {
        let mut display = test_display();
        let mut delay = MockDelay::default();
        display.init(&mut delay).unwrap();

        assert_eq!(
            display.interface.commands,
            [
                0xAE, 0x20, 0x10, 0xB0, 0xC8, 0x00, 0x10, 0x40, 0x81, 0xFF, 0xA1, 0xA6, 0xA8,
                0x3F, 0xA4, 0xD3, 0x00, 0xD5, 0xF0, 0xD9, 0x22, 0xDA, 0x12, 0xDB, 0x20, 0x8D,
                0x14, 0xAF,
            ]
        );
        assert!(display.interface.data.is_empty());
        assert_eq!(display.interface.resets, 1);
        assert_eq!(delay.total_ms, BOOT_DELAY_MS);
        assert_eq!(display.state(), State::Ready);
        assert!(display.is_display_on());
    }

    #[test]
    fn test_init_sequence_height_dependent() {
        let seq = init_sequence(&config(32));
        assert_eq!(seq[12..14], [0xA8, 0x1F]);
        assert_eq!(seq[21..23], [0xDA, 0x02]);

        let seq = init_sequence(&config(128));
        assert_eq!(seq[12..14], [0xFF, 0x3F]);
        assert_eq!(seq[21..23], [0xDA, 0x12]);
    }

    #[test]
    fn test_init_sequence_options() {
        let config = Builder::new()
            .dimensions(Dimensions::new(128, 64).unwrap())
            .mirror_horizontal(true)
            .mirror_vertical(true)
            .inverse_color(true)
            .contrast(0x42)
            .build()
            .unwrap();
        let seq = init_sequence(&config);
        assert_eq!(seq[4], 0xC0);
        assert_eq!(seq[9], 0x42);
        assert_eq!(seq[10], 0xA0);
        assert_eq!(seq[11], 0xA7);
    }

    #[test]
    fn test_flush_sends_pages() {
        let mut display = ready_display();
        let mut buffer = [0u8; 1024];
        for (i, byte) in buffer.iter_mut().enumerate() {
            *byte = (i / 128) as u8;
        }
        display.flush(&buffer).unwrap();

        assert_eq!(display.interface.data.len(), 8);
        for (page, burst) in display.interface.data.iter().enumerate() {
            assert_eq!(burst.len(), 128);
            assert!(burst.iter().all(|&b| b == page as u8));
        }
        let expected: Vec<u8> = (0..8).flat_map(|p| [0xB0 + p, 0x00, 0x10]).collect();
        assert_eq!(display.interface.commands, expected);
    }

    #[test]
    fn test_flush_column_offset() {
        let config = Builder::new()
            .dimensions(Dimensions::new(128, 32).unwrap())
            .column_offset(0x82)
            .build()
            .unwrap();
        let mut display = Display::new(MockInterface::new(), config);
        display.init(&mut MockDelay::default()).unwrap();
        display.interface.commands.clear();

        display.flush(&[0u8; 512]).unwrap();
        assert_eq!(display.interface.commands[..3], [0xB0, 0x02, 0x10]);
        assert_eq!(display.interface.data.len(), 4);
    }

    #[test]
    fn test_flush_before_init_returns_error() {
        let mut display = test_display();
        assert!(matches!(
            display.flush(&[0u8; 1024]),
            Err(Error::NotInitialized)
        ));
        assert!(display.interface.commands.is_empty());
    }

    #[test]
    fn test_flush_small_buffer_returns_error() {
        let mut display = ready_display();
        assert!(matches!(
            display.flush(&[0u8; 1000]),
            Err(Error::BufferTooSmall {
                required: 1024,
                provided: 1000
            })
        ));
        assert!(display.interface.commands.is_empty());
    }

    #[test]
    fn test_failed_init_stays_configuring() {
        let mut interface = MockInterface::new();
        interface.fail_at = Some(3);
        let mut display = Display::new(interface, config(64));

        assert!(matches!(
            display.init(&mut MockDelay::default()),
            Err(Error::Interface(BusFault))
        ));
        assert_eq!(display.state(), State::Configuring);
        assert_eq!(display.interface.commands, [0xAE, 0x20, 0x10]);
        assert!(matches!(
            display.flush(&[0u8; 1024]),
            Err(Error::NotInitialized)
        ));

        // A fresh init starts over with a reset
        display.interface.commands.clear();
        display.init(&mut MockDelay::default()).unwrap();
        assert_eq!(display.interface.resets, 2);
        assert_eq!(display.interface.commands.len(), INIT_SEQUENCE_LEN);
        assert_eq!(display.state(), State::Ready);
    }

    #[test]
    fn test_set_contrast() {
        let mut display = ready_display();
        display.set_contrast(0x10).unwrap();
        assert_eq!(display.interface.commands, [0x81, 0x10]);
        assert_eq!(display.config().contrast, 0x10);

        let mut display = test_display();
        assert!(matches!(
            display.set_contrast(0x10),
            Err(Error::NotInitialized)
        ));
    }

    #[test]
    fn test_set_display_on_off() {
        let mut display = ready_display();
        display.set_display_on(false).unwrap();
        assert!(!display.is_display_on());
        display.set_display_on(true).unwrap();
        assert!(display.is_display_on());
        assert_eq!(display.interface.commands, [0xAE, 0xAF]);
    }
}
