//! Pixel colour for 1-bit panels
//!
//! Every pixel of the band buffer is a single bit: set means the pixel is lit
//! ([`Color::White`]), clear means it is dark ([`Color::Black`]).
//!
//! ## Example
//!
//! ```
//! use bandraster::Color;
//!
//! assert_eq!(Color::from_raw(0), Color::Black);
//! assert_eq!(Color::from_raw(7), Color::White);
//! assert_eq!(Color::White.fill_byte(), 0xFF);
//! ```

/// Colour of a single pixel on a monochrome panel
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

impl From<bool> for Color {
    fn from(lit: bool) -> Self {
        if lit { Self::White } else { Self::Black }
    }
}

impl Color {
    /// Build a colour from a raw value; any nonzero value is [`Color::White`]
    pub fn from_raw(value: u8) -> Self {
        Self::from(value != 0)
    }

    /// Whether the pixel bit is set
    pub fn is_lit(self) -> bool {
        self == Self::White
    }

    /// The opposite colour
    pub fn inverse(self) -> Self {
        match self {
            Self::Black => Self::White,
            Self::White => Self::Black,
        }
    }

    /// Byte that fills a whole band column with this colour
    ///
    /// ```
    /// use bandraster::Color;
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
}
