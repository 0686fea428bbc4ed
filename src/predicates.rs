//! Band intersection predicates
//!
//! Cheap tests a caller can run before an expensive primitive to find out
//! whether it can touch the active band at all. They never report a miss for
//! a shape that would draw into the band; a false positive only costs the
//! discarded pixel writes.

use crate::config::BAND_HEIGHT;
use crate::font::GLYPH_ROWS;

const BAND: i32 = BAND_HEIGHT as i32;

/// Whether row `y` lies inside the band starting at `band_start`
#[inline]
pub const fn intersects_band(y: i32, band_start: i32) -> bool {
    y >= band_start && y < band_start.saturating_add(BAND)
}

/// Whether rows `y..y + h` overlap the band starting at `band_start`
///
/// A non-positive `h` never intersects.
#[inline]
pub const fn span_intersects_band(y: i32, h: i32, band_start: i32) -> bool {
    h > 0 && y.saturating_add(h) > band_start && y < band_start.saturating_add(BAND)
}

/// Whether a glyph drawn at `y` with scale `size` overlaps the band
#[inline]
pub const fn glyph_intersects_band(y: i32, size: u8, band_start: i32) -> bool {
    span_intersects_band(y, GLYPH_ROWS * size as i32, band_start)
}

/// Whether an unscaled glyph drawn at `y` overlaps the band
#[inline]
pub const fn small_glyph_intersects_band(y: i32, band_start: i32) -> bool {
    span_intersects_band(y, GLYPH_ROWS, band_start)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_membership() {
        assert!(intersects_band(8, 8));
        assert!(intersects_band(15, 8));
        assert!(!intersects_band(7, 8));
        assert!(!intersects_band(16, 8));
        assert!(!intersects_band(-1, 0));
    }

    #[test]
    fn test_span_edges() {
        // ends exactly at the band start
        assert!(!span_intersects_band(0, 8, 8));
        assert!(span_intersects_band(0, 9, 8));
        // starts on the last band row
        assert!(span_intersects_band(15, 1, 8));
        assert!(!span_intersects_band(16, 100, 8));
        // covers the whole band from above
        assert!(span_intersects_band(-50, 100, 8));
        assert!(!span_intersects_band(10, 0, 8));
        assert!(!span_intersects_band(10, -3, 8));
        assert!(!span_intersects_band(9, i32::MIN, 8));
    }

    #[test]
    fn test_glyph_height_scales() {
        assert!(!small_glyph_intersects_band(0, 8));
        assert!(small_glyph_intersects_band(1, 8));
        assert!(glyph_intersects_band(0, 2, 8));
        assert!(!glyph_intersects_band(0, 1, 8));
        assert!(glyph_intersects_band(-20, 4, 8));
    }

    #[test]
    fn test_no_false_negatives() {
        for band_start in (0..64).step_by(8) {
            for y in -16..80 {
                for h in 1..24 {
                    let actual = (y..y + h).any(|row| (row & !7) == band_start);
                    if actual {
                        assert!(span_intersects_band(y, h, band_start), "y={y} h={h}");
                    }
                }
            }
        }
    }

    #[test]
    fn test_extreme_coordinates_do_not_overflow() {
        assert!(!span_intersects_band(i32::MAX, i32::MAX, 0));
        assert!(span_intersects_band(i32::MIN, i32::MAX, -8));
        assert!(!intersects_band(i32::MAX, i32::MAX - 2));
    }
}
