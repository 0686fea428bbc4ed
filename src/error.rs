//! Error types for the crate
//!
//! Drawing never fails: off-canvas and off-band writes are silently dropped.
//! The only fallible operations are configuration ([`BuilderError`]),
//! construction with a short buffer and handing a band to the transport
//! ([`Error`]).
//!
//! ## Example
//!
//! ```
//! use bandraster::{Builder, BuilderError, Dimensions};
//!
//! // Missing dimensions
//! let result = Builder::new().build();
//! assert!(matches!(result, Err(BuilderError::MissingDimensions)));
//!
//! // Height must be a whole number of bands
//! assert!(Dimensions::new(128, 60).is_err());
//! ```

use crate::interface::DisplayTransport;

/// Widest canvas accepted by [`Dimensions`](crate::Dimensions)
pub const MAX_WIDTH: u16 = 1024;

/// Tallest canvas accepted by [`Dimensions`](crate::Dimensions)
pub const MAX_HEIGHT: u16 = 1024;

/// Errors that can occur while running the display
///
/// Generic over the transport type to preserve its specific error type.
#[derive(Debug)]
pub enum Error<T: DisplayTransport> {
    /// The transport failed to take a band
    Transport(T::Error),
    /// Band buffer is narrower than the canvas
    ///
    /// The buffer must hold at least one byte per column.
    BufferTooSmall {
        /// Required buffer size in bytes
        required: usize,
        /// Provided buffer size in bytes
        provided: usize,
    },
}

impl<T: DisplayTransport> core::fmt::Display for Error<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Transport(e) => write!(f, "Transport error: {e:?}"),
            Self::BufferTooSmall { required, provided } => write!(
                f,
                "Band buffer too small: required {required} bytes, provided {provided}"
            ),
        }
    }
}

impl<T: DisplayTransport + core::fmt::Debug> core::error::Error for Error<T> {}

/// Errors that can occur when building configuration
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
        /// Requested width in pixels
        width: u16,
        /// Requested height in pixels
        height: u16,
    },
    /// Frame rate of zero frames per second
    InvalidFrameRate {
        /// Requested rate
        rate: u16,
    },
}

impl core::fmt::Display for BuilderError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::MissingDimensions => write!(f, "Dimensions must be specified"),
            Self::InvalidDimensions { width, height } => write!(
                f,
                "Invalid dimensions {width}x{height} (max {MAX_WIDTH}x{MAX_HEIGHT}, height must be a multiple of 8)"
            ),
            Self::InvalidFrameRate { rate } => write!(f, "Invalid frame rate {rate}"),
        }
    }
}

impl core::error::Error for BuilderError {}
