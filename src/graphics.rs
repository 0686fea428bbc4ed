//! embedded-graphics support
//!
//! [`BandRasterizer`] implements [`DrawTarget`], so any embedded-graphics
//! drawable can be replayed once per band like the built-in primitives. As
//! with [`draw_pixel`](BandRasterizer::draw_pixel), pixels outside the active
//! band are dropped.
//!
//! ## Example
//!
//! ```rust
//! use embedded_graphics::{
//!     mono_font::{ascii::FONT_6X10, MonoTextStyle},
//!     prelude::*,
//!     primitives::{Circle, PrimitiveStyle, Rectangle},
//!     text::Text,
//! };
//! use bandraster::{BandRasterizer, Builder, Color, Dimensions, DisplayTransport};
//! # use core::convert::Infallible;
//! # struct Panel;
//! # impl DisplayTransport for Panel {
//! #     type Error = Infallible;
//! #     fn paint_band(&mut self, _band: &[u8]) -> Result<(), Infallible> { Ok(()) }
//! # }
//! # let dims = match Dimensions::new(128, 64) {
//! #     Ok(dims) => dims,
//! #     Err(_) => return,
//! # };
//! # let config = match Builder::new().dimensions(dims).build() {
//! #     Ok(config) => config,
//! #     Err(_) => return,
//! # };
//! let mut raster = BandRasterizer::new(Panel, config, [0u8; 128]);
//! let text_style = MonoTextStyle::new(&FONT_6X10, Color::White);
//!
//! raster.begin_frame();
//! while raster.needs_band() {
//!     raster.clear_band();
//!
//!     let _ = Rectangle::new(Point::new(10, 10), Size::new(50, 30))
//!         .into_styled(PrimitiveStyle::with_stroke(Color::White, 1))
//!         .draw(&mut raster);
//!     let _ = Circle::new(Point::new(80, 20), 24)
//!         .into_styled(PrimitiveStyle::with_fill(Color::White))
//!         .draw(&mut raster);
//!     let _ = Text::new("band by band", Point::new(4, 56), text_style).draw(&mut raster);
//!
//!     if raster.flush_band().is_err() {
//!         break;
//!     }
//! }
//! ```

use core::convert::Infallible;
use embedded_graphics_core::{
    draw_target::DrawTarget,
    geometry::{OriginDimensions, Point, Size},
    prelude::Pixel,
    primitives::{PointsIter, Rectangle},
};

use crate::color::Color;
use crate::config::BAND_HEIGHT;
use crate::interface::DisplayTransport;
use crate::raster::BandRasterizer;

impl<T, B> OriginDimensions for BandRasterizer<T, B>
where
    T: DisplayTransport,
    B: AsRef<[u8]> + AsMut<[u8]>,
{
    fn size(&self) -> Size {
        let dims = self.dimensions();
        Size::new(u32::from(dims.width), u32::from(dims.height))
    }
}

impl<T, B> DrawTarget for BandRasterizer<T, B>
where
    T: DisplayTransport,
    B: AsRef<[u8]> + AsMut<[u8]>,
{
    type Color = Color;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(Point { x, y }, color) in pixels {
            self.draw_pixel(x, y, color);
        }
        Ok(())
    }

    fn fill_solid(&mut self, area: &Rectangle, color: Self::Color) -> Result<(), Self::Error> {
        // only the rows of the active band can change
        let band = Rectangle::new(
            Point::new(0, self.band_start()),
            Size::new(self.size().width, u32::from(BAND_HEIGHT)),
        );
        for point in area.intersection(&band).points() {
            self.draw_pixel(point.x, point.y, color);
        }
        Ok(())
    }

    /// Fill the active band
    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        self.fill_band(color);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Builder, Dimensions};
    use crate::primitives::Primitives;
    use alloc::vec;
    use alloc::vec::Vec;
    use embedded_graphics::{
        mono_font::{MonoTextStyle, ascii::FONT_6X10},
        prelude::*,
        primitives::{Circle, Line, PrimitiveStyle, Triangle},
        text::Text,
    };

    const W: usize = 48;
    const H: usize = 32;

    #[derive(Debug, Default)]
    struct RecordingTransport {
        bands: Vec<Vec<u8>>,
    }

    impl DisplayTransport for RecordingTransport {
        type Error = Infallible;

        fn paint_band(&mut self, band: &[u8]) -> Result<(), Self::Error> {
            self.bands.push(band.to_vec());
            Ok(())
        }
    }

    /// Whole-frame target used as the reference rendering
    struct Canvas {
        pixels: Vec<Vec<bool>>,
    }

    impl OriginDimensions for Canvas {
        fn size(&self) -> Size {
            Size::new(W as u32, H as u32)
        }
    }

    impl DrawTarget for Canvas {
        type Color = Color;
        type Error = Infallible;

        fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
        where
            I: IntoIterator<Item = Pixel<Self::Color>>,
        {
            for Pixel(p, color) in pixels {
                if (0..W as i32).contains(&p.x) && (0..H as i32).contains(&p.y) {
                    self.pixels[p.y as usize][p.x as usize] = color.is_lit();
                }
            }
            Ok(())
        }
    }

    fn raster() -> BandRasterizer<RecordingTransport, [u8; W]> {
        let config = Builder::new()
            .dimensions(Dimensions::new(W as u16, H as u16).unwrap())
            .build()
            .unwrap();
        BandRasterizer::new(RecordingTransport::default(), config, [0u8; W])
    }

    fn render_bands<F>(mut scene: F) -> Vec<Vec<bool>>
    where
        F: FnMut(&mut BandRasterizer<RecordingTransport, [u8; W]>),
    {
        let mut r = raster();
        r.begin_frame();
        while r.needs_band() {
            r.clear_band();
            scene(&mut r);
            r.flush_band().unwrap();
        }
        let (transport, _) = r.release();
        let mut frame = vec![vec![false; W]; H];
        for (band, bytes) in transport.bands.iter().enumerate() {
            for (x, byte) in bytes.iter().enumerate() {
                for bit in 0..8 {
                    frame[band * 8 + bit][x] = byte & (1 << bit) != 0;
                }
            }
        }
        frame
    }

    fn scene<D>(target: &mut D)
    where
        D: DrawTarget<Color = Color, Error = Infallible>,
    {
        let thick = PrimitiveStyle::with_stroke(Color::White, 3);
        Line::new(Point::new(-4, 2), Point::new(50, 29))
            .into_styled(thick)
            .draw(target)
            .unwrap();
        Circle::new(Point::new(20, 4), 21)
            .into_styled(PrimitiveStyle::with_fill(Color::White))
            .draw(target)
            .unwrap();
        Rectangle::new(Point::new(24, 6), Size::new(10, 13))
            .into_styled(PrimitiveStyle::with_fill(Color::Black))
            .draw(target)
            .unwrap();
        Triangle::new(Point::new(2, 30), Point::new(12, 14), Point::new(22, 31))
            .into_styled(PrimitiveStyle::with_stroke(Color::White, 1))
            .draw(target)
            .unwrap();
        Text::new("Ab1", Point::new(1, 8), MonoTextStyle::new(&FONT_6X10, Color::White))
            .draw(target)
            .unwrap();
    }

    #[test]
    fn test_size_matches_dimensions() {
        assert_eq!(raster().size(), Size::new(W as u32, H as u32));
    }

    #[test]
    fn test_banded_scene_matches_full_frame() {
        let mut canvas = Canvas {
            pixels: vec![vec![false; W]; H],
        };
        scene(&mut canvas);
        let banded = render_bands(|r| scene(r));
        assert_eq!(banded, canvas.pixels);
        assert!(banded.iter().flatten().any(|&lit| lit));
    }

    #[test]
    fn test_fill_solid_matches_fill_rect() {
        let area = Rectangle::new(Point::new(-3, 5), Size::new(20, 14));
        let via_target = render_bands(|r| r.fill_solid(&area, Color::White).unwrap());
        let via_primitive = render_bands(|r| r.fill_rect(-3, 5, 20, 14, Color::White));
        assert_eq!(via_target, via_primitive);
        assert!(via_target[5][0]);
        assert!(via_target[18][16]);
        assert!(!via_target[19][0]);
        assert!(!via_target[4][0]);
    }

    #[test]
    fn test_clear_fills_active_band_only() {
        let mut r = raster();
        r.begin_frame();
        r.flush_band().unwrap();
        DrawTarget::clear(&mut r, Color::White).unwrap();
        assert!(r.buffer()[..W].iter().all(|&b| b == 0xFF));
        assert_eq!(r.band_start(), 8);
    }

    #[test]
    fn test_pixels_outside_band_are_dropped() {
        let mut r = raster();
        r.begin_frame();
        r.draw_iter([
            Pixel(Point::new(1, 1), Color::White),
            Pixel(Point::new(2, 9), Color::White),
            Pixel(Point::new(-1, 3), Color::White),
        ])
        .unwrap();
        assert_eq!(r.buffer()[1], 0x02);
        assert_eq!(r.buffer()[2], 0x00);
    }
}
