//! Display transport abstraction
//!
//! This module provides the [`DisplayTransport`] trait, the single capability
//! the rasterizer needs from the outside world, and [`SpiTransport`], an
//! implementation for SSD1306-class panels on an embedded-hal SPI bus.
//!
//! ## Hardware Requirements
//!
//! - SPI bus (MOSI + SCK, CS handled by the [`SpiDevice`])
//! - 2 GPIO pins:
//!   - **DC**: Data/Command select (output)
//!   - **RST**: Reset (output, active low)
//!
//! ## Example
//!
//! ```rust,no_run
//! use embedded_hal::delay::DelayNs;
//! use embedded_hal::digital::OutputPin;
//! use embedded_hal::spi::{Operation, SpiDevice};
//! use bandraster::{Dimensions, DisplayTransport, SpiTransport};
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
//! # struct MockDelay;
//! # impl DelayNs for MockDelay { fn delay_ns(&mut self, _ns: u32) {} }
//! # let mut delay = MockDelay;
//! let mut transport = SpiTransport::new(MockSpi, MockPin, MockPin);
//! let dims = match Dimensions::new(128, 64) {
//!     Ok(dims) => dims,
//!     Err(_) => return,
//! };
//!
//! transport.reset(&mut delay);
//! let _ = transport.init(dims);
//!
//! // One band: 128 column bytes
//! let _ = transport.paint_band(&[0u8; 128]);
//! ```

use core::fmt::Debug;
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use embedded_hal::spi::SpiDevice;

use crate::command::{
    BOOT_SEQUENCE, DISPLAY_ALL_ON, DISPLAY_ALL_ON_RESUME, DISPLAY_ON, MAX_COLUMNS, MAX_ROWS,
    SET_COLUMN_ADDRESS, SET_MULTIPLEX_RATIO, SET_PAGE_ADDRESS,
};
use crate::config::Dimensions;

type InterfaceResult<T, E> = core::result::Result<T, E>;

/// Sink for finished bands
///
/// The rasterizer calls [`paint_band`](Self::paint_band) once per band, top
/// to bottom, up to `height / 8` times per frame. Implementations push the
/// bytes to the panel synchronously; the buffer is reused as soon as the call
/// returns.
///
/// ## Implementing
///
/// For SSD1306-class panels on SPI use [`SpiTransport`]. Anything else (I2C,
/// a simulator, a test recorder) implements this trait directly.
pub trait DisplayTransport {
    /// Error type for transport operations
    ///
    /// Must implement [`Debug`] for error reporting.
    type Error: Debug;

    /// Send one band of column bytes to the panel
    ///
    /// Byte `i` holds the eight pixels of column `i`, LSB topmost.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying bus fails.
    fn paint_band(&mut self, band: &[u8]) -> InterfaceResult<(), Self::Error>;
}

impl<T: DisplayTransport + ?Sized> DisplayTransport for &mut T {
    type Error = T::Error;

    fn paint_band(&mut self, band: &[u8]) -> InterfaceResult<(), Self::Error> {
        (**self).paint_band(band)
    }
}

/// Errors that can occur at the interface level
///
/// Generic over SPI and GPIO error types.
#[derive(Debug)]
pub enum InterfaceError<SpiErr, PinErr> {
    /// SPI communication error
    Spi(SpiErr),
    /// GPIO pin error
    Pin(PinErr),
    /// Panel geometry exceeds what the controller can address
    UnsupportedDimensions {
        /// Requested width in pixels
        width: u16,
        /// Requested height in pixels
        height: u16,
    },
}

impl<SpiErr: Debug, PinErr: Debug> core::fmt::Display for InterfaceError<SpiErr, PinErr> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Spi(e) => write!(f, "SPI error: {e:?}"),
            Self::Pin(e) => write!(f, "Pin error: {e:?}"),
            Self::UnsupportedDimensions { width, height } => write!(
                f,
                "unsupported dimensions: {width}x{height} (max {MAX_COLUMNS}x{MAX_ROWS})"
            ),
        }
    }
}

impl<SpiErr: Debug, PinErr: Debug> core::error::Error for InterfaceError<SpiErr, PinErr> {}

/// SPI transport for SSD1306-class controllers
///
/// ## Type Parameters
///
/// * `SPI` - SPI device implementing [`SpiDevice`]
/// * `DC` - Data/Command pin implementing [`OutputPin`]
/// * `RST` - Reset pin implementing [`OutputPin`]
pub struct SpiTransport<SPI, DC, RST> {
    /// SPI device for communication
    spi: SPI,
    /// Data/Command select pin (low=command, high=data)
    dc: DC,
    /// Reset pin (active low)
    rst: RST,
}

impl<SPI, DC, RST, PinErr> SpiTransport<SPI, DC, RST>
where
    SPI: SpiDevice,
    SPI::Error: Debug,
    DC: OutputPin<Error = PinErr>,
    RST: OutputPin<Error = PinErr>,
    PinErr: Debug,
{
    /// Create a new transport
    pub fn new(spi: SPI, dc: DC, rst: RST) -> Self {
        Self { spi, dc, rst }
    }

    /// Pulse the reset line
    pub fn reset<D: DelayNs>(&mut self, delay: &mut D) {
        // LOW -> wait 10ms -> HIGH -> wait 10ms
        let _ = self.rst.set_low();
        delay.delay_ms(10);
        let _ = self.rst.set_high();
        delay.delay_ms(10);
    }

    /// Send the boot sequence and address the whole panel
    ///
    /// # Errors
    ///
    /// Returns [`InterfaceError::UnsupportedDimensions`] without touching the
    /// bus if `dims` is wider than [`MAX_COLUMNS`] or taller than
    /// [`MAX_ROWS`], or an error if SPI communication or GPIO fails.
    pub fn init(
        &mut self,
        dims: Dimensions,
    ) -> InterfaceResult<(), InterfaceError<SPI::Error, PinErr>> {
        if dims.width > MAX_COLUMNS || dims.height > MAX_ROWS {
            return Err(InterfaceError::UnsupportedDimensions {
                width: dims.width,
                height: dims.height,
            });
        }

        self.send_commands(BOOT_SEQUENCE)?;
        self.send_commands(&[SET_MULTIPLEX_RATIO, (dims.height - 1) as u8])?;
        self.send_commands(&[SET_COLUMN_ADDRESS, 0, (dims.width - 1) as u8])?;
        self.send_commands(&[SET_PAGE_ADDRESS, 0, (dims.band_count() - 1) as u8])?;
        self.send_commands(&[DISPLAY_ON])
    }

    /// Light every pixel regardless of RAM content
    ///
    /// # Errors
    ///
    /// Returns an error if SPI communication or GPIO fails.
    pub fn all_pixels_on(&mut self) -> InterfaceResult<(), InterfaceError<SPI::Error, PinErr>> {
        self.send_commands(&[DISPLAY_ALL_ON])
    }

    /// Show RAM content again after [`all_pixels_on`](Self::all_pixels_on)
    ///
    /// # Errors
    ///
    /// Returns an error if SPI communication or GPIO fails.
    pub fn resume_from_ram(&mut self) -> InterfaceResult<(), InterfaceError<SPI::Error, PinErr>> {
        self.send_commands(&[DISPLAY_ALL_ON_RESUME])
    }

    /// Send command bytes (DC low)
    ///
    /// # Errors
    ///
    /// Returns an error if SPI communication or GPIO fails.
    pub fn send_commands(
        &mut self,
        commands: &[u8],
    ) -> InterfaceResult<(), InterfaceError<SPI::Error, PinErr>> {
        self.dc.set_low().map_err(InterfaceError::Pin)?;
        self.spi.write(commands).map_err(InterfaceError::Spi)
    }

    /// Send data bytes (DC high)
    ///
    /// # Errors
    ///
    /// Returns an error if SPI communication or GPIO fails.
    pub fn send_data(&mut self, data: &[u8]) -> InterfaceResult<(), InterfaceError<SPI::Error, PinErr>> {
        self.dc.set_high().map_err(InterfaceError::Pin)?;
        self.spi.write(data).map_err(InterfaceError::Spi)
    }

    /// Release the bus and pins
    pub fn release(self) -> (SPI, DC, RST) {
        (self.spi, self.dc, self.rst)
    }
}

impl<SPI, DC, RST, PinErr> DisplayTransport for SpiTransport<SPI, DC, RST>
where
    SPI: SpiDevice,
    SPI::Error: Debug,
    DC: OutputPin<Error = PinErr>,
    RST: OutputPin<Error = PinErr>,
    PinErr: Debug,
{
    type Error = InterfaceError<SPI::Error, PinErr>;

    fn paint_band(&mut self, band: &[u8]) -> InterfaceResult<(), Self::Error> {
        self.send_data(band)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;
    use core::convert::Infallible;
    use embedded_hal::digital::ErrorType;
    use embedded_hal::spi::{ErrorType as SpiErrorType, Operation};

    #[derive(Debug, Clone, Copy, PartialEq)]
    enum Mode {
        Command,
        Data,
    }

    #[derive(Debug, Default)]
    struct Bus {
        dc_high: bool,
        writes: Vec<(Mode, Vec<u8>)>,
    }

    struct MockSpi<'a>(&'a core::cell::RefCell<Bus>);
    struct MockDc<'a>(&'a core::cell::RefCell<Bus>);
    struct MockRst;

    impl SpiErrorType for MockSpi<'_> {
        type Error = Infallible;
    }

    impl SpiDevice for MockSpi<'_> {
        fn transaction(&mut self, operations: &mut [Operation<'_, u8>]) -> Result<(), Self::Error> {
            let mut bus = self.0.borrow_mut();
            let mode = if bus.dc_high { Mode::Data } else { Mode::Command };
            for op in operations.iter() {
                if let Operation::Write(bytes) = op {
                    bus.writes.push((mode, bytes.to_vec()));
                }
            }
            Ok(())
        }
    }

    impl ErrorType for MockDc<'_> {
        type Error = Infallible;
    }

    impl OutputPin for MockDc<'_> {
        fn set_low(&mut self) -> Result<(), Self::Error> {
            self.0.borrow_mut().dc_high = false;
            Ok(())
        }
        fn set_high(&mut self) -> Result<(), Self::Error> {
            self.0.borrow_mut().dc_high = true;
            Ok(())
        }
    }

    impl ErrorType for MockRst {
        type Error = Infallible;
    }

    impl OutputPin for MockRst {
        fn set_low(&mut self) -> Result<(), Self::Error> {
            Ok(())
        }
        fn set_high(&mut self) -> Result<(), Self::Error> {
            Ok(())
        }
    }

    #[test]
    fn test_paint_band_sends_data() {
        let bus = core::cell::RefCell::new(Bus::default());
        let mut transport = SpiTransport::new(MockSpi(&bus), MockDc(&bus), MockRst);
        transport.paint_band(&[0x01, 0x02, 0x03]).unwrap();

        let bus = bus.borrow();
        assert_eq!(bus.writes.len(), 1);
        assert_eq!(bus.writes[0], (Mode::Data, alloc::vec![0x01, 0x02, 0x03]));
    }

    #[test]
    fn test_init_sends_commands_only() {
        let bus = core::cell::RefCell::new(Bus::default());
        let mut transport = SpiTransport::new(MockSpi(&bus), MockDc(&bus), MockRst);
        transport.init(Dimensions::new(128, 64).unwrap()).unwrap();

        let bus = bus.borrow();
        assert!(bus.writes.iter().all(|(mode, _)| *mode == Mode::Command));
        assert_eq!(bus.writes[0].1, BOOT_SEQUENCE);
        assert!(bus.writes.contains(&(Mode::Command, alloc::vec![SET_MULTIPLEX_RATIO, 63])));
        assert!(bus.writes.contains(&(Mode::Command, alloc::vec![SET_PAGE_ADDRESS, 0, 7])));
        assert_eq!(bus.writes.last().unwrap().1, alloc::vec![DISPLAY_ON]);
    }

    #[test]
    fn test_init_small_panel_addresses_its_own_window() {
        let bus = core::cell::RefCell::new(Bus::default());
        let mut transport = SpiTransport::new(MockSpi(&bus), MockDc(&bus), MockRst);
        transport.init(Dimensions::new(64, 32).unwrap()).unwrap();

        let bus = bus.borrow();
        assert!(bus.writes.contains(&(Mode::Command, alloc::vec![SET_MULTIPLEX_RATIO, 31])));
        assert!(bus.writes.contains(&(Mode::Command, alloc::vec![SET_COLUMN_ADDRESS, 0, 63])));
        assert!(bus.writes.contains(&(Mode::Command, alloc::vec![SET_PAGE_ADDRESS, 0, 3])));
    }

    #[test]
    fn test_init_rejects_panel_beyond_controller_limits() {
        let bus = core::cell::RefCell::new(Bus::default());
        let mut transport = SpiTransport::new(MockSpi(&bus), MockDc(&bus), MockRst);

        let wide = transport.init(Dimensions::new(256, 64).unwrap());
        assert!(matches!(
            wide,
            Err(InterfaceError::UnsupportedDimensions {
                width: 256,
                height: 64
            })
        ));
        let tall = transport.init(Dimensions::new(128, 128).unwrap());
        assert!(matches!(
            tall,
            Err(InterfaceError::UnsupportedDimensions {
                width: 128,
                height: 128
            })
        ));
        assert!(bus.borrow().writes.is_empty());
    }

    #[test]
    fn test_all_pixels_on_command() {
        let bus = core::cell::RefCell::new(Bus::default());
        let mut transport = SpiTransport::new(MockSpi(&bus), MockDc(&bus), MockRst);
        transport.all_pixels_on().unwrap();
        transport.resume_from_ram().unwrap();

        let bus = bus.borrow();
        assert_eq!(bus.writes[0], (Mode::Command, alloc::vec![DISPLAY_ALL_ON]));
        assert_eq!(
            bus.writes[1],
            (Mode::Command, alloc::vec![DISPLAY_ALL_ON_RESUME])
        );
    }
}
