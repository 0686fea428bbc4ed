//! Band-rendered monochrome display core
//!
//! Renders 1-bit displays without a frame buffer. The canvas is split into
//! 8-row bands and a single buffer of one byte per column is reused for
//! every band: each frame replays the drawing code once per band and flushes
//! the band to the panel before moving on.
//!
//! ## Features
//!
//! - `no_std` compatible
//! - `embedded-hal` v1.0 SPI transport for SSD1306-class controllers
//! - `embedded-graphics` integration (with `graphics` feature)
//! - Deterministic frame pacing with overrun reporting
//! - Line, rectangle, circle, rounded-rectangle, triangle, bitmap and text primitives
//! - Optional full-canvas bounds check (`pixel-safe-mode` feature)
//!
//! ## Usage
//!
//! ```rust,no_run
//! use core::convert::Infallible;
//! use embedded_hal::delay::DelayNs;
//! use embedded_hal::digital::OutputPin;
//! use embedded_hal::spi::{Operation, SpiDevice};
//! use bandraster::{
//!     BandDisplay, BootState, Builder, Buttons, Color, Dimensions, Primitives, SleepClock,
//!     SpiTransport,
//! };
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
//! # fn read_timer_us() -> u64 { 0 }
//! # fn wait_for_interrupt() {}
//! # fn read_buttons() -> Buttons { Buttons::empty() }
//! # let (spi, dc, rst) = (MockSpi, MockPin, MockPin);
//! # let mut delay = MockDelay;
//! let dims = match Dimensions::new(128, 64) {
//!     Ok(dims) => dims,
//!     Err(_) => return,
//! };
//! let config = match Builder::new().dimensions(dims).frame_rate(60).build() {
//!     Ok(config) => config,
//!     Err(_) => return,
//! };
//!
//! let mut transport = SpiTransport::new(spi, dc, rst);
//! transport.reset(&mut delay);
//! if transport.init(dims).is_err() {
//!     return;
//! }
//!
//! // sleeps in `idle` until the next 1 kHz timer interrupt
//! let clock = SleepClock::new(read_timer_us, wait_for_interrupt);
//! let mut display = BandDisplay::new(transport, config, [0u8; 128], clock);
//! match display.begin(&mut read_buttons()) {
//!     Ok(BootState::Running) => {}
//!     _ => return,
//! }
//!
//! loop {
//!     if !display.poll_frame() {
//!         continue;
//!     }
//!     let _ = display.render_frame(|raster| {
//!         raster.draw_round_rect(0, 0, 128, 64, 6, Color::White);
//!         if raster.glyph_intersects_band(24, 2) {
//!             raster.draw_str(16, 24, "BANDS", Color::White, Color::Black, 2);
//!         }
//!     });
//! }
//! ```

#![no_std]

#[cfg(any(test, feature = "alloc"))]
extern crate alloc;

/// Monotonic time source
pub mod clock;
/// 1-bit colour
pub mod color;
/// SSD1306-class command definitions
pub mod command;
/// Canvas configuration types and builder
pub mod config;
/// Paced display façade and boot state
pub mod device;
/// Entropy seeding and pseudo-random numbers
pub mod entropy;
/// Error types
pub mod error;
/// Built-in glyph table
pub mod font;
/// Button state
pub mod input;
/// Band transport abstraction
pub mod interface;
/// Frame pacing
pub mod pacer;
/// Band intersection predicates
pub mod predicates;
/// Drawing primitives
pub mod primitives;
/// Band rasterizer
pub mod raster;

/// Graphics support via embedded-graphics (requires `graphics` feature)
#[cfg(feature = "graphics")]
pub mod graphics;

pub use clock::{Clock, DelayClock, SleepClock};
pub use color::Color;
pub use config::{BAND_HEIGHT, Builder, Config, DEFAULT_FRAME_RATE, Dimensions, MAX_HEIGHT, MAX_WIDTH};
pub use device::{BandDisplay, BootState};
pub use entropy::{RandomEntropySource, Rng, entropy_seed};
pub use error::{BuilderError, Error};
pub use input::{Buttons, InputSource};
pub use interface::{DisplayTransport, InterfaceError, SpiTransport};
pub use pacer::{FramePacer, FramePoll};
pub use primitives::{Corners, Halves, PixelSink, Primitives};
pub use raster::BandRasterizer;
