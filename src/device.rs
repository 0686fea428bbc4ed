//! Band display façade
//!
//! [`BandDisplay`] ties a [`BandRasterizer`], a [`FramePacer`] and a
//! [`Clock`] together into the usual main loop:
//!
//! ```rust
//! use bandraster::{BandDisplay, Builder, Buttons, Clock, Color, Dimensions, DisplayTransport, Primitives};
//! # use core::convert::Infallible;
//! # struct Panel;
//! # impl DisplayTransport for Panel {
//! #     type Error = Infallible;
//! #     fn paint_band(&mut self, _band: &[u8]) -> Result<(), Infallible> { Ok(()) }
//! # }
//! # struct Ticks(u32);
//! # impl Clock for Ticks {
//! #     fn millis(&mut self) -> u32 { self.0 }
//! #     fn micros(&mut self) -> u32 { self.0 * 1000 }
//! #     fn idle(&mut self) { self.0 += 1; }
//! # }
//! let dims = match Dimensions::new(128, 64) {
//!     Ok(dims) => dims,
//!     Err(_) => return,
//! };
//! let config = match Builder::new().dimensions(dims).frame_rate(30).build() {
//!     Ok(config) => config,
//!     Err(_) => return,
//! };
//! let mut display = BandDisplay::new(Panel, config, [0u8; 128], Ticks(0));
//! if display.begin(&mut Buttons::empty()).is_err() {
//!     return;
//! }
//!
//! let mut x = 0;
//! for _ in 0..100 {
//!     if !display.poll_frame() {
//!         continue;
//!     }
//!     x = (x + 1) % 128;
//!     let _ = display.render_frame(|raster| {
//!         if raster.small_glyph_intersects_band(28) {
//!             raster.draw_str(x, 28, "hello", Color::White, Color::Black, 1);
//!         }
//!     });
//! }
//! ```

use core::num::NonZeroU16;

use crate::clock::Clock;
use crate::color::Color;
use crate::config::Config;
use crate::entropy::{RandomEntropySource, Rng, entropy_seed};
use crate::error::{BuilderError, Error};
use crate::input::{Buttons, InputSource};
use crate::interface::DisplayTransport;
use crate::pacer::{FramePacer, FramePoll};
use crate::raster::BandRasterizer;

type DeviceResult<T, R> = core::result::Result<R, Error<T>>;

/// Start-up state of a [`BandDisplay`]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BootState {
    /// [`BandDisplay::begin`] has not run yet
    #[default]
    Idle,
    /// Normal operation
    Running,
    /// Diagnostic mode requested at boot
    ///
    /// Terminal: the panel shows every pixel lit and no further frames are
    /// granted.
    DiagnosticHalt,
}

/// Paced band display
///
/// ## Type Parameters
///
/// * `T` - Transport implementing [`DisplayTransport`]
/// * `B` - Band buffer, at least one byte per column
/// * `C` - Tick source implementing [`Clock`]
pub struct BandDisplay<T, B, C>
where
    T: DisplayTransport,
    B: AsRef<[u8]> + AsMut<[u8]>,
    C: Clock,
{
    raster: BandRasterizer<T, B>,
    pacer: FramePacer,
    clock: C,
    state: BootState,
}

impl<T, B, C> BandDisplay<T, B, C>
where
    T: DisplayTransport,
    B: AsRef<[u8]> + AsMut<[u8]>,
    C: Clock,
{
    /// Create a display in the [`BootState::Idle`] state
    ///
    /// # Panics
    ///
    /// Panics if `buffer` holds fewer bytes than the canvas has columns.
    pub fn new(transport: T, config: Config, buffer: B, clock: C) -> Self {
        let pacer = FramePacer::new(config.frame_rate);
        Self {
            raster: BandRasterizer::new(transport, config, buffer),
            pacer,
            clock,
            state: BootState::Idle,
        }
    }

    /// Fallible version of [`new`](Self::new)
    ///
    /// # Errors
    ///
    /// Returns `Error::BufferTooSmall` if `buffer` is shorter than the canvas width.
    pub fn try_new(transport: T, config: Config, buffer: B, clock: C) -> DeviceResult<T, Self> {
        let pacer = FramePacer::new(config.frame_rate);
        Ok(Self {
            raster: BandRasterizer::try_new(transport, config, buffer)?,
            pacer,
            clock,
            state: BootState::Idle,
        })
    }

    /// Run the boot decision
    ///
    /// Holding UP enters [`BootState::DiagnosticHalt`] and paints every band
    /// fully lit; otherwise the display becomes [`BootState::Running`]. Only
    /// the first call has an effect.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Transport`] if painting the diagnostic frame fails.
    /// The display stays halted.
    pub fn begin<I>(&mut self, input: &mut I) -> DeviceResult<T, BootState>
    where
        I: InputSource + ?Sized,
    {
        if self.state != BootState::Idle {
            return Ok(self.state);
        }

        if input.pressed(Buttons::UP) {
            log::warn!("UP held at boot, entering diagnostic halt");
            self.state = BootState::DiagnosticHalt;
            self.paint_all_lit()?;
        } else {
            log::debug!(
                "display running at {} fps",
                self.pacer.frame_rate()
            );
            self.state = BootState::Running;
        }
        Ok(self.state)
    }

    fn paint_all_lit(&mut self) -> DeviceResult<T, ()> {
        self.raster.begin_frame();
        while self.raster.needs_band() {
            self.raster.fill_band(Color::White);
            self.raster.flush_band()?;
        }
        Ok(())
    }

    /// Check whether a new frame should be drawn
    ///
    /// On `true` the band cursor has been rewound to the top of the canvas.
    /// On `false` with more than a millisecond to wait, the clock idles until
    /// its next tick before returning. Always `false` once halted.
    pub fn poll_frame(&mut self) -> bool {
        if self.state == BootState::DiagnosticHalt {
            return false;
        }

        match self.pacer.poll(self.clock.millis()) {
            FramePoll::Ready => {
                self.raster.begin_frame();
                true
            }
            poll => {
                if poll.should_idle() {
                    self.clock.idle();
                }
                false
            }
        }
    }

    /// Draw and flush every remaining band of the current frame
    ///
    /// Each band is cleared to the configured background, handed to `draw`
    /// and flushed. Nothing happens once halted.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Transport`] from the first band the transport rejects.
    pub fn render_frame<F>(&mut self, mut draw: F) -> DeviceResult<T, ()>
    where
        F: FnMut(&mut BandRasterizer<T, B>),
    {
        if self.state == BootState::DiagnosticHalt {
            return Ok(());
        }
        while self.raster.needs_band() {
            self.raster.clear_band();
            draw(&mut self.raster);
            self.raster.flush_band()?;
        }
        Ok(())
    }

    /// Change the frame rate
    ///
    /// # Errors
    ///
    /// Returns [`BuilderError::InvalidFrameRate`] for a rate of 0.
    pub fn set_frame_rate(&mut self, rate: u16) -> Result<(), BuilderError> {
        let rate = NonZeroU16::new(rate).ok_or(BuilderError::InvalidFrameRate { rate })?;
        self.pacer.set_frame_rate(rate);
        Ok(())
    }

    /// Last frame's duration as a percentage of the frame period
    pub fn cpu_load_percent(&self) -> u32 {
        self.pacer.cpu_load_percent()
    }

    /// Whether the frame count is a multiple of `n`
    pub const fn every_n_frames(&self, n: u32) -> bool {
        self.pacer.every_n_frames(n)
    }

    /// Completed frames
    pub const fn frame_count(&self) -> u32 {
        self.pacer.frame_count()
    }

    /// Build a generator seeded from `source` and the clock
    pub fn init_random_seed<E>(&mut self, source: &mut E) -> Rng
    where
        E: RandomEntropySource + ?Sized,
    {
        let seed = entropy_seed(source, &mut self.clock);
        log::debug!("random seed {seed:#010x}");
        Rng::new(seed)
    }

    /// Current boot state
    pub const fn state(&self) -> BootState {
        self.state
    }

    /// Get a reference to the rasterizer
    pub const fn raster(&self) -> &BandRasterizer<T, B> {
        &self.raster
    }

    /// Get a mutable reference to the rasterizer
    pub fn raster_mut(&mut self) -> &mut BandRasterizer<T, B> {
        &mut self.raster
    }

    /// Get a reference to the pacer
    pub const fn pacer(&self) -> &FramePacer {
        &self.pacer
    }

    /// Get a mutable reference to the clock
    pub fn clock_mut(&mut self) -> &mut C {
        &mut self.clock
    }

    /// Release the transport, buffer and clock
    pub fn release(self) -> (T, B, C) {
        let (transport, buffer) = self.raster.release();
        (transport, buffer, self.clock)
    }
}
