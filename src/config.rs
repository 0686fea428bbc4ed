//! Canvas configuration types and builder

use core::num::NonZeroU16;

use crate::color::Color;
pub use crate::error::{BuilderError, MAX_HEIGHT, MAX_WIDTH};

/// Rows covered by one band; also the number of bits in a band column byte
pub const BAND_HEIGHT: u16 = 8;

/// Frame rate used when none is configured
pub const DEFAULT_FRAME_RATE: u16 = 60;

/// Canvas dimensions
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Dimensions {
    /// Width in pixels (number of band columns)
    pub width: u16,
    /// Height in pixels
    pub height: u16,
}

impl Dimensions {
    /// Create new dimensions with validation
    ///
    /// # Errors
    ///
    /// Returns `BuilderError::InvalidDimensions` if:
    /// - width is 0 or greater than MAX_WIDTH
    /// - height is 0 or greater than MAX_HEIGHT
    /// - height % 8 != 0 (the canvas must split into whole bands)
    pub fn new(width: u16, height: u16) -> Result<Self, BuilderError> {
        if width == 0 || width > MAX_WIDTH {
            return Err(BuilderError::InvalidDimensions { width, height });
        }
        if height == 0 || height > MAX_HEIGHT || height % BAND_HEIGHT != 0 {
            return Err(BuilderError::InvalidDimensions { width, height });
        }
        Ok(Self { width, height })
    }

    /// Number of bands in one frame
    pub fn band_count(&self) -> u16 {
        self.height / BAND_HEIGHT
    }

    /// Band buffer size in bytes: one column byte per x
    pub fn buffer_size(&self) -> usize {
        self.width as usize
    }
}

/// Canvas configuration
///
/// Use [`Builder`] to create a Config.
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    /// Canvas dimensions
    pub dimensions: Dimensions,
    /// Initial frame rate in frames per second
    pub frame_rate: NonZeroU16,
    /// Colour written by `clear_band`
    pub background: Color,
}

/// Builder for constructing canvas configuration
///
/// # Example
///
/// ```
/// use bandraster::{Builder, Dimensions};
///
/// let dims = match Dimensions::new(128, 64) {
///     Ok(dims) => dims,
///     Err(_) => return,
/// };
/// let config = match Builder::new().dimensions(dims).frame_rate(30).build() {
///     Ok(config) => config,
///     Err(_) => return,
/// };
/// assert_eq!(config.dimensions.band_count(), 8);
/// ```
#[must_use]
pub struct Builder {
    /// Canvas dimensions (required)
    dimensions: Option<Dimensions>,
    /// Frames per second
    frame_rate: u16,
    /// Colour written by `clear_band`
    background: Color,
}

impl Default for Builder {
    fn default() -> Self {
        Self {
            dimensions: None,
            frame_rate: DEFAULT_FRAME_RATE,
            background: Color::Black,
        }
    }
}

impl Builder {
    /// Create a new Builder with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set canvas dimensions (required)
    pub fn dimensions(mut self, dims: Dimensions) -> Self {
        self.dimensions = Some(dims);
        self
    }

    /// Set the initial frame rate
    pub fn frame_rate(mut self, rate: u16) -> Self {
        self.frame_rate = rate;
        self
    }

    /// Set the colour used to clear each band
    pub fn background(mut self, color: Color) -> Self {
        self.background = color;
        self
    }

    /// Build the configuration
    ///
    /// # Errors
    ///
    /// Returns `BuilderError::MissingDimensions` if dimensions were not set and
    /// `BuilderError::InvalidFrameRate` for a rate of zero.
    pub fn build(self) -> Result<Config, BuilderError> {
        let frame_rate = NonZeroU16::new(self.frame_rate)
            .ok_or(BuilderError::InvalidFrameRate { rate: self.frame_rate })?;
        Ok(Config {
            dimensions: self.dimensions.ok_or(BuilderError::MissingDimensions)?,
            frame_rate,
            background: self.background,
        })
    }
}
