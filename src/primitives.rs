//! Drawing primitives
//!
//! Every primitive here is written purely against [`PixelSink::draw_pixel`].
//! None of them clip to the active band: each call walks the entire shape and
//! relies on the sink to drop rows that are not in the band. That keeps the
//! algorithms textbook-simple at the cost of repeating the geometry once per
//! band. Use the [`predicates`](crate::predicates) to skip shapes that cannot
//! touch the band at all.
//!
//! All coordinates are signed; shapes may hang off any edge of the canvas,
//! as far as the `i32` range allows.

use core::mem::swap;
use core::ops::Range;

use bitflags::bitflags;

use crate::color::Color;
use crate::font::{GLYPH_ADVANCE, GLYPH_COLUMNS, GLYPH_ROWS, glyph};

/// Anything that accepts individual pixels
pub trait PixelSink {
    /// Canvas width and height in pixels
    fn canvas_size(&self) -> (i32, i32);

    /// Set a pixel; positions the sink cannot hold are ignored
    fn draw_pixel(&mut self, x: i32, y: i32, color: Color);
}

bitflags! {
    /// Quarter-circle selection for [`Primitives::draw_circle_helper`]
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct Corners: u8 {
        /// Upper-left quarter
        const TOP_LEFT = 0x1;
        /// Upper-right quarter
        const TOP_RIGHT = 0x2;
        /// Lower-right quarter
        const BOTTOM_RIGHT = 0x4;
        /// Lower-left quarter
        const BOTTOM_LEFT = 0x8;
    }
}

bitflags! {
    /// Half-disc selection for [`Primitives::fill_circle_helper`]
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct Halves: u8 {
        /// Columns right of the centre
        const RIGHT = 0x1;
        /// Columns left of the centre
        const LEFT = 0x2;
    }
}

/// Midpoint circle walk, yielding `(x, y)` offsets of one octant
///
/// The first point emitted is the one after `(0, r)`.
struct CircleSteps {
    f: i64,
    ddf_x: i64,
    ddf_y: i64,
    x: i64,
    y: i64,
}

impl CircleSteps {
    fn new(r: i64) -> Self {
        Self {
            f: 1 - r,
            ddf_x: 1,
            ddf_y: -2 * r,
            x: 0,
            y: r,
        }
    }
}

impl Iterator for CircleSteps {
    type Item = (i64, i64);

    fn next(&mut self) -> Option<Self::Item> {
        if self.x >= self.y {
            return None;
        }
        if self.f >= 0 {
            self.y -= 1;
            self.ddf_y += 2;
            self.f += self.ddf_y;
        }
        self.x += 1;
        self.ddf_x += 2;
        self.f += self.ddf_x;
        Some((self.x, self.y))
    }
}

/// Shape drawing on top of a [`PixelSink`]
///
/// Implemented for every sink; bring the trait into scope to use it.
///
/// Geometry is computed in 64-bit arithmetic, so any `i32` coordinate or
/// size is accepted. Lines, rectangles, triangles and bitmaps only walk the
/// part of the shape that lies on the canvas; circles walk their whole
/// outline.
pub trait Primitives: PixelSink {
    /// Line between two points, endpoints included (Bresenham)
    fn draw_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, color: Color) {
        let (mut x0, mut y0) = (i64::from(x0), i64::from(y0));
        let (mut x1, mut y1) = (i64::from(x1), i64::from(y1));
        let steep = (y1 - y0).abs() > (x1 - x0).abs();
        if steep {
            swap(&mut x0, &mut y0);
            swap(&mut x1, &mut y1);
        }
        if x0 > x1 {
            swap(&mut x0, &mut x1);
            swap(&mut y0, &mut y1);
        }

        let dx = x1 - x0;
        let dy = (y1 - y0).abs();
        let ystep = if y0 < y1 { 1 } else { -1 };

        // only major-axis positions on the canvas are walked
        let (width, height) = self.canvas_size();
        let limit = i64::from(if steep { height } else { width });
        let first = x0.max(0);
        let last = x1.min(limit - 1);
        if first > last {
            return;
        }

        // error term and minor axis after `first - x0` skipped steps
        let skipped = i128::from(first - x0);
        let (wide_dx, wide_dy) = (i128::from(dx), i128::from(dy));
        let rises = if dx == 0 {
            0
        } else {
            (skipped * wide_dy - wide_dx / 2 + wide_dx - 1).div_euclid(wide_dx)
        };
        let mut err = (wide_dx / 2 - skipped * wide_dy + rises * wide_dx) as i64;
        let mut y = y0 + ystep * rises as i64;

        for x in first..=last {
            if steep {
                plot(self, y, x, color);
            } else {
                plot(self, x, y, color);
            }
            err -= dy;
            if err < 0 {
                y += ystep;
                err += dx;
            }
        }
    }

    /// Vertical run of `h` pixels starting at `(x, y)`
    fn draw_fast_vline(&mut self, x: i32, y: i32, h: i32, color: Color) {
        vline(self, x.into(), y.into(), h.into(), color);
    }

    /// Horizontal run of `w` pixels starting at `(x, y)`
    fn draw_fast_hline(&mut self, x: i32, y: i32, w: i32, color: Color) {
        hline(self, x.into(), y.into(), w.into(), color);
    }

    /// Rectangle outline
    fn draw_rect(&mut self, x: i32, y: i32, w: i32, h: i32, color: Color) {
        let (x, y, w, h) = (i64::from(x), i64::from(y), i64::from(w), i64::from(h));
        hline(self, x, y, w, color);
        hline(self, x, y + h - 1, w, color);
        vline(self, x, y, h, color);
        vline(self, x + w - 1, y, h, color);
    }

    /// Solid rectangle, drawn as `w` vertical lines
    fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32, color: Color) {
        fill(self, x.into(), y.into(), w.into(), h.into(), color);
    }

    /// Circle outline centred on `(x0, y0)`
    fn draw_circle(&mut self, x0: i32, y0: i32, r: i32, color: Color) {
        let (x0, y0, r) = (i64::from(x0), i64::from(y0), i64::from(r));
        plot(self, x0, y0 + r, color);
        plot(self, x0, y0 - r, color);
        plot(self, x0 + r, y0, color);
        plot(self, x0 - r, y0, color);

        for (x, y) in CircleSteps::new(r) {
            plot(self, x0 + x, y0 + y, color);
            plot(self, x0 - x, y0 + y, color);
            plot(self, x0 + x, y0 - y, color);
            plot(self, x0 - x, y0 - y, color);
            plot(self, x0 + y, y0 + x, color);
            plot(self, x0 - y, y0 + x, color);
            plot(self, x0 + y, y0 - x, color);
            plot(self, x0 - y, y0 - x, color);
        }
    }

    /// Selected quarters of a circle outline, without the axis points
    fn draw_circle_helper(&mut self, x0: i32, y0: i32, r: i32, corners: Corners, color: Color) {
        arc(self, x0.into(), y0.into(), r.into(), corners, color);
    }

    /// Solid disc centred on `(x0, y0)`
    fn fill_circle(&mut self, x0: i32, y0: i32, r: i32, color: Color) {
        let (x0, y0, r) = (i64::from(x0), i64::from(y0), i64::from(r));
        vline(self, x0, y0 - r, 2 * r + 1, color);
        disc(self, x0, y0, r, Halves::all(), 0, color);
    }

    /// Vertical spans of the selected disc halves, centre column excluded
    ///
    /// Each span is stretched by `delta` rows downwards so the halves of a
    /// rounded rectangle meet its middle section without a seam.
    fn fill_circle_helper(
        &mut self,
        x0: i32,
        y0: i32,
        r: i32,
        halves: Halves,
        delta: i32,
        color: Color,
    ) {
        disc(self, x0.into(), y0.into(), r.into(), halves, delta.into(), color);
    }

    /// Rectangle outline with corners of radius `r`
    fn draw_round_rect(&mut self, x: i32, y: i32, w: i32, h: i32, r: i32, color: Color) {
        let (x, y, w, h, r) = (
            i64::from(x),
            i64::from(y),
            i64::from(w),
            i64::from(h),
            i64::from(r),
        );
        hline(self, x + r, y, w - 2 * r, color);
        hline(self, x + r, y + h - 1, w - 2 * r, color);
        vline(self, x, y + r, h - 2 * r, color);
        vline(self, x + w - 1, y + r, h - 2 * r, color);

        arc(self, x + r, y + r, r, Corners::TOP_LEFT, color);
        arc(self, x + w - r - 1, y + r, r, Corners::TOP_RIGHT, color);
        arc(self, x + w - r - 1, y + h - r - 1, r, Corners::BOTTOM_RIGHT, color);
        arc(self, x + r, y + h - r - 1, r, Corners::BOTTOM_LEFT, color);
    }

    /// Solid rectangle with corners of radius `r`
    fn fill_round_rect(&mut self, x: i32, y: i32, w: i32, h: i32, r: i32, color: Color) {
        let (x, y, w, h, r) = (
            i64::from(x),
            i64::from(y),
            i64::from(w),
            i64::from(h),
            i64::from(r),
        );
        fill(self, x + r, y, w - 2 * r, h, color);

        let delta = h - 2 * r - 1;
        disc(self, x + w - r - 1, y + r, r, Halves::RIGHT, delta, color);
        disc(self, x + r, y + r, r, Halves::LEFT, delta, color);
    }

    /// Triangle outline
    fn draw_triangle(
        &mut self,
        x0: i32,
        y0: i32,
        x1: i32,
        y1: i32,
        x2: i32,
        y2: i32,
        color: Color,
    ) {
        self.draw_line(x0, y0, x1, y1, color);
        self.draw_line(x1, y1, x2, y2, color);
        self.draw_line(x2, y2, x0, y0, color);
    }

    /// Solid triangle, filled with horizontal scanlines
    fn fill_triangle(
        &mut self,
        x0: i32,
        y0: i32,
        x1: i32,
        y1: i32,
        x2: i32,
        y2: i32,
        color: Color,
    ) {
        let (mut x0, mut y0) = (i64::from(x0), i64::from(y0));
        let (mut x1, mut y1) = (i64::from(x1), i64::from(y1));
        let (mut x2, mut y2) = (i64::from(x2), i64::from(y2));

        // Sort so that y0 <= y1 <= y2
        if y0 > y1 {
            swap(&mut y0, &mut y1);
            swap(&mut x0, &mut x1);
        }
        if y1 > y2 {
            swap(&mut y2, &mut y1);
            swap(&mut x2, &mut x1);
        }
        if y0 > y1 {
            swap(&mut y0, &mut y1);
            swap(&mut x0, &mut x1);
        }

        if y0 == y2 {
            let a = x0.min(x1).min(x2);
            let b = x0.max(x1).max(x2);
            hline(self, a, y0, b - a + 1, color);
            return;
        }

        let (dx01, dy01) = (x1 - x0, y1 - y0);
        let (dx02, dy02) = (x2 - x0, y2 - y0);
        let (dx12, dy12) = (x2 - x1, y2 - y1);

        // Upper half uses edges 0-1 and 0-2. A flat bottom (y1 == y2) takes
        // scanline y1 here so the lower loop never runs and never divides by
        // dy12; otherwise y1 belongs to the lower half, which keeps a flat top
        // (y0 == y1) from dividing by dy01.
        let last = if y1 == y2 { y1 } else { y1 - 1 };
        let bottom = i64::from(self.canvas_size().1) - 1;

        for y in y0.max(0)..=last.min(bottom) {
            let a = x0 + edge(dx01, y - y0, dy01);
            let b = x0 + edge(dx02, y - y0, dy02);
            hline(self, a.min(b), y, (a - b).abs() + 1, color);
        }

        // Lower half uses edges 1-2 and 0-2
        for y in (last + 1).max(0)..=y2.min(bottom) {
            let a = x1 + edge(dx12, y - y1, dy12);
            let b = x0 + edge(dx02, y - y0, dy02);
            hline(self, a.min(b), y, (a - b).abs() + 1, color);
        }
    }

    /// Row-major, MSB-first bitmap; only set bits are drawn
    ///
    /// Each row occupies `ceil(w / 8)` bytes. Missing trailing bytes read as
    /// clear.
    fn draw_slow_xy_bitmap(
        &mut self,
        x: i32,
        y: i32,
        bitmap: &[u8],
        w: i32,
        h: i32,
        color: Color,
    ) {
        let (width, height) = self.canvas_size();
        let (width, height) = (i64::from(width), i64::from(height));
        let (x, y, w, h) = (i64::from(x), i64::from(y), i64::from(w), i64::from(h));
        if x + w < 0 || x > width - 1 || y + h < 0 || y > height - 1 {
            return;
        }

        let byte_width = (w + 7) / 8;
        for yi in (-y).max(0)..h.min(height - y) {
            for xi in (-x).max(0)..w.min(width - x) {
                let Ok(index) = usize::try_from(yi * byte_width + xi / 8) else {
                    continue;
                };
                let byte = bitmap.get(index).copied().unwrap_or(0);
                if byte & (0x80 >> (xi & 7)) != 0 {
                    plot(self, x + xi, y + yi, color);
                }
            }
        }
    }

    /// Glyph for byte `c`, each font pixel scaled to a `size` x `size` block
    ///
    /// The cell is six columns wide (five glyph columns plus one blank) and
    /// eight rows tall before scaling. Background pixels are painted in `bg`
    /// unless `bg == fg`, in which case only the glyph's set pixels are
    /// drawn: text with matching colours is transparent, even when both are
    /// [`Color::White`].
    fn draw_char(&mut self, x: i32, y: i32, c: u8, fg: Color, bg: Color, size: u8) {
        let (x, y, size) = (i64::from(x), i64::from(y), i64::from(size));
        let draw_background = bg != fg;
        let columns = glyph(c);

        for i in 0..i64::from(GLYPH_ADVANCE) {
            let mut line = if i < i64::from(GLYPH_COLUMNS) { columns[i as usize] } else { 0 };
            for j in 0..i64::from(GLYPH_ROWS) {
                let lit = line & 0x1 != 0;
                if lit || draw_background {
                    let color = if lit { fg } else { bg };
                    for a in 0..size {
                        for b in 0..size {
                            plot(self, x + i * size + a, y + j * size + b, color);
                        }
                    }
                }
                line >>= 1;
            }
        }
    }

    /// Unscaled glyph for byte `c`
    ///
    /// Same cell and background rules as [`draw_char`](Self::draw_char).
    fn draw_small_char(&mut self, x: i32, y: i32, c: u8, fg: Color, bg: Color) {
        let (x, y) = (i64::from(x), i64::from(y));
        let draw_background = bg != fg;
        let columns = glyph(c);

        for i in 0..i64::from(GLYPH_ADVANCE) {
            let mut line = if i < i64::from(GLYPH_COLUMNS) { columns[i as usize] } else { 0 };
            for j in 0..i64::from(GLYPH_ROWS) {
                let lit = line & 0x1 != 0;
                if lit || draw_background {
                    plot(self, x + i, y + j, if lit { fg } else { bg });
                }
                line >>= 1;
            }
        }
    }

    /// Run of glyphs starting at `(x, y)`
    ///
    /// `'\n'` starts a new line below the first glyph. Returns the x position
    /// after the last glyph, saturated to the `i32` range.
    fn draw_str(&mut self, x: i32, y: i32, text: &str, fg: Color, bg: Color, size: u8) -> i32 {
        let step = GLYPH_ADVANCE * i32::from(size);
        let mut cx = x;
        let mut cy = y;
        for byte in text.bytes() {
            if byte == b'\n' {
                cx = x;
                cy = cy.saturating_add(GLYPH_ROWS * i32::from(size));
                continue;
            }
            self.draw_char(cx, cy, byte, fg, bg, size);
            cx = cx.saturating_add(step);
        }
        cx
    }
}

impl<S: PixelSink + ?Sized> Primitives for S {}

/// Single pixel; positions outside the `i32` range are dropped
fn plot<S: PixelSink + ?Sized>(sink: &mut S, x: i64, y: i64, color: Color) {
    if let (Ok(x), Ok(y)) = (i32::try_from(x), i32::try_from(y)) {
        sink.draw_pixel(x, y, color);
    }
}

/// `start..start + len` clipped to `0..limit`
fn clip(start: i64, len: i64, limit: i32) -> Range<i32> {
    let limit = i64::from(limit);
    let lo = start.clamp(0, limit);
    let hi = (start + len).clamp(0, limit);
    lo as i32..hi as i32
}

fn vline<S: PixelSink + ?Sized>(sink: &mut S, x: i64, y: i64, h: i64, color: Color) {
    let (width, height) = sink.canvas_size();
    let Ok(x) = i32::try_from(x) else {
        return;
    };
    if !(0..width).contains(&x) {
        return;
    }
    for row in clip(y, h, height) {
        sink.draw_pixel(x, row, color);
    }
}

fn hline<S: PixelSink + ?Sized>(sink: &mut S, x: i64, y: i64, w: i64, color: Color) {
    let (width, height) = sink.canvas_size();
    let Ok(y) = i32::try_from(y) else {
        return;
    };
    if !(0..height).contains(&y) {
        return;
    }
    for col in clip(x, w, width) {
        sink.draw_pixel(col, y, color);
    }
}

fn fill<S: PixelSink + ?Sized>(sink: &mut S, x: i64, y: i64, w: i64, h: i64, color: Color) {
    let (width, _) = sink.canvas_size();
    for col in clip(x, w, width) {
        vline(sink, col.into(), y, h, color);
    }
}

fn arc<S: PixelSink + ?Sized>(sink: &mut S, x0: i64, y0: i64, r: i64, corners: Corners, color: Color) {
    for (x, y) in CircleSteps::new(r) {
        if corners.contains(Corners::BOTTOM_RIGHT) {
            plot(sink, x0 + x, y0 + y, color);
            plot(sink, x0 + y, y0 + x, color);
        }
        if corners.contains(Corners::TOP_RIGHT) {
            plot(sink, x0 + x, y0 - y, color);
            plot(sink, x0 + y, y0 - x, color);
        }
        if corners.contains(Corners::BOTTOM_LEFT) {
            plot(sink, x0 - y, y0 + x, color);
            plot(sink, x0 - x, y0 + y, color);
        }
        if corners.contains(Corners::TOP_LEFT) {
            plot(sink, x0 - y, y0 - x, color);
            plot(sink, x0 - x, y0 - y, color);
        }
    }
}

fn disc<S: PixelSink + ?Sized>(
    sink: &mut S,
    x0: i64,
    y0: i64,
    r: i64,
    halves: Halves,
    delta: i64,
    color: Color,
) {
    for (x, y) in CircleSteps::new(r) {
        if halves.contains(Halves::RIGHT) {
            vline(sink, x0 + x, y0 - y, 2 * y + 1 + delta, color);
            vline(sink, x0 + y, y0 - x, 2 * x + 1 + delta, color);
        }
        if halves.contains(Halves::LEFT) {
            vline(sink, x0 - x, y0 - y, 2 * y + 1 + delta, color);
            vline(sink, x0 - y, y0 - x, 2 * x + 1 + delta, color);
        }
    }
}

/// x offset of an edge `run` wide and `rise` tall, `step` rows below its start
fn edge(run: i64, step: i64, rise: i64) -> i64 {
    (i128::from(run) * i128::from(step) / i128::from(rise)) as i64
}
