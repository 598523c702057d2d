//! Hardware interface abstraction
//!
//! This module provides the [`DisplayInterface`] trait and two implementations
//! for talking to the SSD1309 controller:
//!
//! - [`SpiInterface`]: 4-wire SPI with a DC (data/command) pin and a reset pin
//! - [`I2cInterface`]: I2C, using control bytes instead of a DC pin
//!
//! The transport is picked when the driver is constructed; the command
//! protocol in [`Display`](crate::display::Display) only sees the trait.
//!
//! ## Example
//!
//! ```rust,no_run
//! use embedded_hal::digital::OutputPin;
//! use embedded_hal::spi::{Operation, SpiDevice};
//! use ssd1309::{DisplayInterface, SpiInterface};
//! # use core::convert::Infallible;
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
//! // Create interface with SPI device, DC pin and reset pin
//! let mut interface = SpiInterface::new(MockSpi, MockPin, MockPin);
//!
//! // Send command
//! let _ = interface.send_command(0xAF); // Display on
//!
//! // Send data
//! let _ = interface.send_data(&[0xFF, 0x00, 0xFF]);
//! ```

use core::fmt::Debug;
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use embedded_hal::i2c::I2c;
use embedded_hal::spi::SpiDevice;

use crate::command::{I2C_CONTROL_COMMAND, I2C_CONTROL_DATA};

type InterfaceResult<T, E> = core::result::Result<T, E>;

/// Trait for hardware interface to SSD1309 controller
///
/// This trait abstracts over the bus the controller is wired to, allowing
/// [`Display`](crate::display::Display) to work with any implementation.
/// Delays are not part of the trait; they are passed to
/// [`Display::init`](crate::display::Display::init) as an embedded-hal
/// [`DelayNs`].
///
/// ## Implementing
///
/// For most cases, use [`SpiInterface`] or [`I2cInterface`]. If you need
/// custom behavior (e.g., a DMA queue, an enable pin), implement this trait
/// on your own type.
pub trait DisplayInterface {
    /// Error type for interface operations
    ///
    /// Must implement [`Debug`] for error reporting.
    type Error: Debug;

    /// Send a command byte to the controller
    ///
    /// # Errors
    ///
    /// Returns an error if bus communication or GPIO fails.
    fn send_command(&mut self, command: u8) -> InterfaceResult<(), Self::Error>;

    /// Send display RAM bytes to the controller
    ///
    /// # Arguments
    ///
    /// * `data` - Slice of bytes to send
    ///
    /// # Errors
    ///
    /// Returns an error if bus communication or GPIO fails.
    fn send_data(&mut self, data: &[u8]) -> InterfaceResult<(), Self::Error>;

    /// Perform hardware reset
    ///
    /// Interfaces without a reset line do nothing.
    ///
    /// # Arguments
    ///
    /// * `delay` - Delay implementation for timing
    fn reset<D: DelayNs>(&mut self, delay: &mut D);
}

/// Errors that can occur at the interface level
///
/// Generic over bus and GPIO error types.
#[derive(Debug)]
pub enum InterfaceError<BusErr, PinErr> {
    /// SPI or I2C communication error
    Bus(BusErr),
    /// GPIO pin error
    Pin(PinErr),
}

impl<BusErr: Debug, PinErr: Debug> core::fmt::Display for InterfaceError<BusErr, PinErr> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Bus(e) => write!(f, "Bus error: {e:?}"),
            Self::Pin(e) => write!(f, "Pin error: {e:?}"),
        }
    }
}

impl<BusErr: Debug, PinErr: Debug> core::error::Error for InterfaceError<BusErr, PinErr> {}

/// Reset pulse width and recovery time in milliseconds
pub const RESET_DELAY_MS: u32 = 10;

/// SPI interface implementation for SSD1309
///
/// Implements [`DisplayInterface`] for embedded-hal v1.0 SPI and GPIO traits.
/// Chip select is owned by the [`SpiDevice`].
///
/// ## Type Parameters
///
/// * `SPI` - SPI device implementing [`SpiDevice`]
/// * `DC` - Data/Command pin implementing [`OutputPin`]
/// * `RST` - Reset pin implementing [`OutputPin`]
pub struct SpiInterface<SPI, DC, RST> {
    /// SPI device for communication
    spi: SPI,
    /// Data/Command select pin (low=command, high=data)
    dc: DC,
    /// Reset pin (active low)
    rst: RST,
}

impl<SPI, DC, RST> SpiInterface<SPI, DC, RST>
where
    SPI: SpiDevice,
    DC: OutputPin,
    RST: OutputPin,
{
    /// Create a new SPI interface
    ///
    /// # Arguments
    ///
    /// * `spi` - SPI device (must implement [`SpiDevice`])
    /// * `dc` - Data/Command pin (output, low=command, high=data)
    /// * `rst` - Reset pin (output, active low)
    pub fn new(spi: SPI, dc: DC, rst: RST) -> Self {
        Self { spi, dc, rst }
    }

    /// Release the bus and pins
    pub fn release(self) -> (SPI, DC, RST) {
        (self.spi, self.dc, self.rst)
    }
}

impl<SPI, DC, RST, PinErr> DisplayInterface for SpiInterface<SPI, DC, RST>
where
    SPI: SpiDevice,
    SPI::Error: Debug,
    DC: OutputPin<Error = PinErr>,
    RST: OutputPin<Error = PinErr>,
    PinErr: Debug,
{
    type Error = InterfaceError<SPI::Error, PinErr>;

    fn send_command(&mut self, command: u8) -> InterfaceResult<(), Self::Error> {
        self.dc.set_low().map_err(InterfaceError::Pin)?;
        self.spi.write(&[command]).map_err(InterfaceError::Bus)?;
        Ok(())
    }

    fn send_data(&mut self, data: &[u8]) -> InterfaceResult<(), Self::Error> {
        self.dc.set_high().map_err(InterfaceError::Pin)?;
        self.spi.write(data).map_err(InterfaceError::Bus)?;
        Ok(())
    }

    fn reset<D: DelayNs>(&mut self, delay: &mut D) {
        // Reset sequence: LOW -> wait 10ms -> HIGH -> wait 10ms
        let _ = self.rst.set_low();
        delay.delay_ms(RESET_DELAY_MS);
        let _ = self.rst.set_high();
        delay.delay_ms(RESET_DELAY_MS);
    }
}

/// Default 7-bit I2C address of SSD1309 modules (SA0 low)
pub const DEFAULT_I2C_ADDRESS: u8 = 0x3C;

/// Largest data payload sent in a single I2C write
pub const I2C_MAX_CHUNK: usize = 64;

/// I2C interface implementation for SSD1309
///
/// Every write starts with a control byte: [`I2C_CONTROL_COMMAND`] for
/// commands, [`I2C_CONTROL_DATA`] for display RAM. Data longer than
/// [`I2C_MAX_CHUNK`] bytes is split into several writes.
pub struct I2cInterface<I2C> {
    /// I2C bus
    i2c: I2C,
    /// 7-bit device address
    address: u8,
}

impl<I2C: I2c> I2cInterface<I2C> {
    /// Create a new I2C interface at [`DEFAULT_I2C_ADDRESS`]
    pub fn new(i2c: I2C) -> Self {
        Self::with_address(i2c, DEFAULT_I2C_ADDRESS)
    }

    /// Create a new I2C interface at a custom address (0x3D with SA0 high)
    pub fn with_address(i2c: I2C, address: u8) -> Self {
        Self { i2c, address }
    }

    /// Get the configured device address
    pub fn address(&self) -> u8 {
        self.address
    }

    /// Release the bus
    pub fn release(self) -> I2C {
        self.i2c
    }
}

impl<I2C> DisplayInterface for I2cInterface<I2C>
where
    I2C: I2c,
    I2C::Error: Debug,
{
    type Error = InterfaceError<I2C::Error, core::convert::Infallible>;

    fn send_command(&mut self, command: u8) -> InterfaceResult<(), Self::Error> {
        self.i2c
            .write(self.address, &[I2C_CONTROL_COMMAND, command])
            .map_err(InterfaceError::Bus)
    }

    fn send_data(&mut self, data: &[u8]) -> InterfaceResult<(), Self::Error> {
        let mut frame = [0u8; I2C_MAX_CHUNK + 1];
        frame[0] = I2C_CONTROL_DATA;

        for chunk in data.chunks(I2C_MAX_CHUNK) {
            frame[1..=chunk.len()].copy_from_slice(chunk);
            self.i2c
                .write(self.address, &frame[..=chunk.len()])
                .map_err(InterfaceError::Bus)?;
        }
        Ok(())
    }

    fn reset<D: DelayNs>(&mut self, _delay: &mut D) {
        // No reset line on I2C modules
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;
    use core::convert::Infallible;
    use embedded_hal::digital::ErrorType;
    use embedded_hal::spi::ErrorType as SpiErrorType;

    #[derive(Debug, Clone, Copy, PartialEq)]
    enum Event {
        DcLow,
        DcHigh,
        RstLow,
        RstHigh,
        Write(u8, usize),
        DelayMs(u32),
    }

    #[derive(Debug, Default)]
    struct Log(core::cell::RefCell<Vec<Event>>);

    impl Log {
        fn push(&self, event: Event) {
            self.0.borrow_mut().push(event);
        }

        fn events(&self) -> Vec<Event> {
            self.0.borrow().clone()
        }
    }

    struct MockSpi<'a>(&'a Log);

    impl SpiErrorType for MockSpi<'_> {
        type Error = Infallible;
    }

    impl SpiDevice for MockSpi<'_> {
        fn transaction(
            &mut self,
            operations: &mut [embedded_hal::spi::Operation<'_, u8>],
        ) -> Result<(), Self::Error> {
            for op in operations.iter() {
                if let embedded_hal::spi::Operation::Write(bytes) = op {
                    self.0.push(Event::Write(bytes[0], bytes.len()));
                }
            }
            Ok(())
        }
    }

    struct MockDc<'a>(&'a Log);
    struct MockRst<'a>(&'a Log);

    impl ErrorType for MockDc<'_> {
        type Error = Infallible;
    }

    impl OutputPin for MockDc<'_> {
        fn set_low(&mut self) -> Result<(), Self::Error> {
            self.0.push(Event::DcLow);
            Ok(())
        }
        fn set_high(&mut self) -> Result<(), Self::Error> {
            self.0.push(Event::DcHigh);
            Ok(())
        }
    }

    impl ErrorType for MockRst<'_> {
        type Error = Infallible;
    }

    impl OutputPin for MockRst<'_> {
        fn set_low(&mut self) -> Result<(), Self::Error> {
            self.0.push(Event::RstLow);
            Ok(())
        }
        fn set_high(&mut self) -> Result<(), Self::Error> {
            self.0.push(Event::RstHigh);
            Ok(())
        }
    }

    struct MockDelay<'a>(&'a Log);

    impl DelayNs for MockDelay<'_> {
        fn delay_ns(&mut self, _ns: u32) {}

        fn delay_ms(&mut self, ms: u32) {
            self.0.push(Event::DelayMs(ms));
        }
    }

    #[test]
    fn test_spi_command_sets_dc_low() {
        let log = Log::default();
        let mut interface = SpiInterface::new(MockSpi(&log), MockDc(&log), MockRst(&log));
        interface.send_command(0xAF).unwrap();
        assert_eq!(log.events(), [Event::DcLow, Event::Write(0xAF, 1)]);
    }

    #[test]
    fn test_spi_data_sets_dc_high() {
        let log = Log::default();
        let mut interface = SpiInterface::new(MockSpi(&log), MockDc(&log), MockRst(&log));
        interface.send_data(&[0x55; 128]).unwrap();
        assert_eq!(log.events(), [Event::DcHigh, Event::Write(0x55, 128)]);
    }

    #[test]
    fn test_spi_reset_sequence() {
        let log = Log::default();
        let mut interface = SpiInterface::new(MockSpi(&log), MockDc(&log), MockRst(&log));
        let mut delay = MockDelay(&log);
        interface.reset(&mut delay);
        assert_eq!(
            log.events(),
            [
                Event::RstLow,
                Event::DelayMs(RESET_DELAY_MS),
                Event::RstHigh,
                Event::DelayMs(RESET_DELAY_MS),
            ]
        );
    }

    #[derive(Debug, Default)]
    struct MockI2c {
        writes: Vec<(u8, Vec<u8>)>,
    }

    impl embedded_hal::i2c::ErrorType for MockI2c {
        type Error = Infallible;
    }

    impl I2c for MockI2c {
        fn transaction(
            &mut self,
            address: u8,
            operations: &mut [embedded_hal::i2c::Operation<'_>],
        ) -> Result<(), Self::Error> {
            for op in operations.iter() {
                if let embedded_hal::i2c::Operation::Write(bytes) = op {
                    self.writes.push((address, bytes.to_vec()));
                }
            }
            Ok(())
        }
    }

    #[test]
    fn test_i2c_default_address() {
        let interface = I2cInterface::new(MockI2c::default());
        assert_eq!(interface.address(), 0x3C);
        let interface = I2cInterface::with_address(MockI2c::default(), 0x3D);
        assert_eq!(interface.address(), 0x3D);
    }

    #[test]
    fn test_i2c_command_prefixes_control_byte() {
        let mut interface = I2cInterface::new(MockI2c::default());
        interface.send_command(0xAE).unwrap();
        let i2c = interface.release();
        assert_eq!(i2c.writes, [(0x3C, alloc::vec![0x00, 0xAE])]);
    }

    #[test]
    fn test_i2c_data_is_chunked() {
        let mut interface = I2cInterface::new(MockI2c::default());
        let data: Vec<u8> = (0..130u8).collect();
        interface.send_data(&data).unwrap();
        let i2c = interface.release();

        assert_eq!(i2c.writes.len(), 3);
        assert_eq!(i2c.writes[0].1.len(), I2C_MAX_CHUNK + 1);
        assert_eq!(i2c.writes[1].1.len(), I2C_MAX_CHUNK + 1);
        assert_eq!(i2c.writes[2].1, [I2C_CONTROL_DATA, 128, 129]);

        let payload: Vec<u8> = i2c
            .writes
            .iter()
            .flat_map(|(_, frame)| {
                assert_eq!(frame[0], I2C_CONTROL_DATA);
                frame[1..].to_vec()
            })
            .collect();
        assert_eq!(payload, data);
    }
}
