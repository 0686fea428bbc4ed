//! Band rasterizer
//!
//! The canvas is never held in memory as a whole. It is cut into horizontal
//! bands of [`BAND_HEIGHT`] rows and a single buffer of one byte per column
//! holds whichever band is active. A frame is drawn by replaying every shape
//! once per band:
//!
//! ```text
//! cursor = 0
//! while needs_band():
//!     clear_band()
//!     draw everything          <- writes outside the band are dropped
//!     flush_band()             <- hands the band over, cursor += 8
//! ```
//!
//! [`draw_pixel`](BandRasterizer::draw_pixel) only touches the buffer when the
//! row falls inside the active band. Everything else is silently discarded,
//! never queued, so primitives can always draw their whole shape and still be
//! correct. The buffer is not cleared by [`flush_band`](BandRasterizer::flush_band);
//! call [`clear_band`](BandRasterizer::clear_band) before drawing the next band
//! unless the previous band should bleed through.
//!
//! ## Example
//!
//! ```
//! use bandraster::{BandRasterizer, Builder, Color, Dimensions, DisplayTransport, Primitives};
//! # use core::convert::Infallible;
//! # struct Panel;
//! # impl DisplayTransport for Panel {
//! #     type Error = Infallible;
//! #     fn paint_band(&mut self, _band: &[u8]) -> Result<(), Infallible> { Ok(()) }
//! # }
//! let dims = match Dimensions::new(128, 64) {
//!     Ok(dims) => dims,
//!     Err(_) => return,
//! };
//! let config = match Builder::new().dimensions(dims).build() {
//!     Ok(config) => config,
//!     Err(_) => return,
//! };
//! let mut raster = BandRasterizer::new(Panel, config, [0u8; 128]);
//!
//! raster.begin_frame();
//! while raster.needs_band() {
//!     raster.clear_band();
//!     raster.draw_line(0, 0, 127, 63, Color::White);
//!     raster.fill_circle(64, 32, 10, Color::White);
//!     if raster.flush_band().is_err() {
//!         break;
//!     }
//! }
//! ```

use crate::color::Color;
use crate::config::{BAND_HEIGHT, Config, Dimensions};
use crate::error::Error;
use crate::interface::DisplayTransport;
use crate::predicates;
use crate::primitives::PixelSink;

type RasterResult<T> = core::result::Result<(), Error<T>>;
type RasterNewResult<T, R> = core::result::Result<R, Error<T>>;

const BAND_ROW_MASK: i32 = BAND_HEIGHT as i32 - 1;

/// Single-band pixel buffer plus band cursor
///
/// ## Type Parameters
///
/// * `T` - Transport implementing [`DisplayTransport`]
/// * `B` - Buffer type implementing `AsRef<[u8]> + AsMut<[u8]>`, at least one
///   byte per canvas column
pub struct BandRasterizer<T, B>
where
    T: DisplayTransport,
    B: AsRef<[u8]> + AsMut<[u8]>,
{
    /// Destination for finished bands
    transport: T,
    /// Canvas dimensions
    dimensions: Dimensions,
    /// Colour written by `clear_band`
    background: Color,
    /// One byte per column, bit n = row `cursor + n`
    buffer: B,
    /// First row of the active band, always a multiple of 8
    cursor: i32,
}

impl<T, B> BandRasterizer<T, B>
where
    T: DisplayTransport,
    B: AsRef<[u8]> + AsMut<[u8]>,
{
    /// Create a new rasterizer
    ///
    /// The band cursor starts at 0, ready for the first band.
    ///
    /// # Panics
    ///
    /// Panics if `buffer` holds fewer bytes than the canvas has columns.
    pub fn new(transport: T, config: Config, buffer: B) -> Self {
        let required = config.dimensions.buffer_size();
        assert!(
            buffer.as_ref().len() >= required,
            "band buffer too small: required {} bytes, got {}",
            required,
            buffer.as_ref().len()
        );
        Self {
            transport,
            dimensions: config.dimensions,
            background: config.background,
            buffer,
            cursor: 0,
        }
    }

    /// Try to create a new rasterizer, returning an error if the buffer is too small
    ///
    /// This is the fallible version of [`new`](Self::new).
    ///
    /// # Errors
    ///
    /// Returns `Error::BufferTooSmall` if `buffer` holds fewer bytes than the
    /// canvas has columns.
    pub fn try_new(transport: T, config: Config, buffer: B) -> RasterNewResult<T, Self> {
        let required = config.dimensions.buffer_size();
        if buffer.as_ref().len() < required {
            return Err(Error::BufferTooSmall {
                required,
                provided: buffer.as_ref().len(),
            });
        }
        Ok(Self::new(transport, config, buffer))
    }

    /// Rewind the band cursor to the top of the canvas
    pub fn begin_frame(&mut self) {
        self.cursor = 0;
    }

    /// Whether bands remain to be drawn in this frame
    pub fn needs_band(&self) -> bool {
        self.cursor < i32::from(self.dimensions.height)
    }

    /// First row of the active band
    pub fn band_start(&self) -> i32 {
        self.cursor
    }

    /// Index of the active band, 0 for the top band
    pub fn band_index(&self) -> u16 {
        (self.cursor / i32::from(BAND_HEIGHT)) as u16
    }

    /// Fill the band with the configured background colour
    pub fn clear_band(&mut self) {
        self.fill_band(self.background);
    }

    /// Overwrite every column of the band with `color`
    pub fn fill_band(&mut self, color: Color) {
        let width = self.dimensions.buffer_size();
        self.buffer.as_mut()[..width].fill(color.fill_byte());
    }

    /// Set or clear one pixel of the active band
    ///
    /// Writes outside the canvas, or outside the active band, are dropped.
    /// With the `pixel-safe-mode` feature disabled the canvas check is
    /// skipped; rows are still filtered by band and columns past the end of
    /// the buffer are still ignored.
    #[inline]
    pub fn draw_pixel(&mut self, x: i32, y: i32, color: Color) {
        #[cfg(feature = "pixel-safe-mode")]
        if x < 0
            || y < 0
            || x >= i32::from(self.dimensions.width)
            || y >= i32::from(self.dimensions.height)
        {
            return;
        }

        if (y & !BAND_ROW_MASK) != self.cursor {
            return;
        }

        let Ok(x) = usize::try_from(x) else {
            return;
        };
        let Some(column) = self.buffer.as_mut().get_mut(x) else {
            return;
        };

        let bit = 1u8 << (y & BAND_ROW_MASK);
        if color.is_lit() {
            *column |= bit;
        } else {
            *column &= !bit;
        }
    }

    /// Read back a pixel of the active band
    ///
    /// Returns `None` for positions outside the canvas or the band.
    pub fn pixel(&self, x: i32, y: i32) -> Option<Color> {
        if x < 0
            || x >= i32::from(self.dimensions.width)
            || y >= i32::from(self.dimensions.height)
            || !self.intersects_band(y)
        {
            return None;
        }
        let column = self.buffer.as_ref()[x as usize];
        Some(Color::from(column & (1 << (y & BAND_ROW_MASK)) != 0))
    }

    /// Hand the band to the transport and advance to the next one
    ///
    /// Does nothing once every band of the frame has been flushed. The buffer
    /// keeps its contents.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Transport`] if the transport rejects the band; the
    /// cursor is left where it was.
    pub fn flush_band(&mut self) -> RasterResult<T> {
        if !self.needs_band() {
            return Ok(());
        }
        let width = self.dimensions.buffer_size();
        self.transport
            .paint_band(&self.buffer.as_ref()[..width])
            .map_err(Error::Transport)?;
        log::trace!("flushed band {}", self.band_index());
        self.cursor += i32::from(BAND_HEIGHT);
        Ok(())
    }

    /// Whether row `y` lies in the active band
    pub fn intersects_band(&self, y: i32) -> bool {
        predicates::intersects_band(y, self.cursor)
    }

    /// Whether rows `y..y + h` overlap the active band
    pub fn span_intersects_band(&self, y: i32, h: i32) -> bool {
        predicates::span_intersects_band(y, h, self.cursor)
    }

    /// Whether a glyph drawn at row `y` with scale `size` overlaps the active band
    pub fn glyph_intersects_band(&self, y: i32, size: u8) -> bool {
        predicates::glyph_intersects_band(y, size, self.cursor)
    }

    /// Whether an unscaled glyph drawn at row `y` overlaps the active band
    pub fn small_glyph_intersects_band(&self, y: i32) -> bool {
        predicates::small_glyph_intersects_band(y, self.cursor)
    }

    /// Current band bytes, one per column
    pub fn buffer(&self) -> &[u8] {
        &self.buffer.as_ref()[..self.dimensions.buffer_size()]
    }

    /// Mutable band bytes for direct column blits
    pub fn buffer_mut(&mut self) -> &mut [u8] {
        let width = self.dimensions.buffer_size();
        &mut self.buffer.as_mut()[..width]
    }

    /// Canvas dimensions
    pub fn dimensions(&self) -> &Dimensions {
        &self.dimensions
    }

    /// Access the transport
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Access the transport mutably
    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    /// Give back the transport and buffer
    pub fn release(self) -> (T, B) {
        (self.transport, self.buffer)
    }
}

impl<T, B> PixelSink for BandRasterizer<T, B>
where
    T: DisplayTransport,
    B: AsRef<[u8]> + AsMut<[u8]>,
{
    fn canvas_size(&self) -> (i32, i32) {
        (
            i32::from(self.dimensions.width),
            i32::from(self.dimensions.height),
        )
    }

    fn draw_pixel(&mut self, x: i32, y: i32, color: Color) {
        Self::draw_pixel(self, x, y, color);
    }
}
