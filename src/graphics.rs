//! Pixel, line, rectangle and bitmap operations.

use embedded_hal::digital::OutputPin;

use crate::{
    color::Color,
    interface::Interface,
    models::Model,
    row_buffer::{RowBuffer, MAX_ROW_PIXELS},
    set_window, Display,
};

impl<DI, M, RST> Display<DI, M, RST>
where
    DI: Interface,
    M: Model,
    RST: OutputPin,
{
    /// Sets a single pixel.
    pub fn draw_pixel(&mut self, x: u16, y: u16, color: Color) -> Result<(), DI::Error> {
        let offset = self.options.display_offset;
        self.transaction(|di, _| {
            set_window::<_, M>(di, offset, x, y, 1, 1)?;
            di.send_data16(color.0)
        })
    }

    /// Fills a rectangle with a solid color.
    ///
    /// One row is staged and replayed `height` times, so only `2·width` bytes
    /// are held in memory whatever the rectangle's size. A zero-sized
    /// rectangle sends nothing.
    pub fn fill_rect(
        &mut self,
        x: u16,
        y: u16,
        width: u16,
        height: u16,
        color: Color,
    ) -> Result<(), DI::Error> {
        if width == 0 || height == 0 {
            return Ok(());
        }
        let offset = self.options.display_offset;
        self.transaction(|di, row| {
            set_window::<_, M>(di, offset, x, y, width, height)?;
            stream_run(di, row, color, width, height)
        })
    }

    /// Fills the whole visible area.
    pub fn clear(&mut self, color: Color) -> Result<(), DI::Error> {
        let (width, height) = self.options.display_size;
        self.fill_rect(0, 0, width, height, color)
    }

    /// Draws a horizontal line of `length` pixels starting at `(x, y)`.
    pub fn draw_fast_h_line(
        &mut self,
        x: u16,
        y: u16,
        length: u16,
        color: Color,
    ) -> Result<(), DI::Error> {
        self.fill_rect(x, y, length, 1, color)
    }

    /// Draws a vertical line of `length` pixels starting at `(x, y)`.
    pub fn draw_fast_v_line(
        &mut self,
        x: u16,
        y: u16,
        length: u16,
        color: Color,
    ) -> Result<(), DI::Error> {
        if length == 0 {
            return Ok(());
        }
        let offset = self.options.display_offset;
        self.transaction(|di, row| {
            set_window::<_, M>(di, offset, x, y, 1, length)?;
            stream_run(di, row, color, length, 1)
        })
    }

    /// Draws the outline of a rectangle.
    ///
    /// Corner pixels are written twice.
    pub fn draw_rect(
        &mut self,
        x: u16,
        y: u16,
        width: u16,
        height: u16,
        color: Color,
    ) -> Result<(), DI::Error> {
        if width == 0 || height == 0 {
            return Ok(());
        }
        let right = x.saturating_add(width - 1);
        let bottom = y.saturating_add(height - 1);
        self.draw_fast_h_line(x, y, width, color)?;
        self.draw_fast_h_line(x, bottom, width, color)?;
        self.draw_fast_v_line(x, y, height, color)?;
        self.draw_fast_v_line(right, y, height, color)
    }

    /// Copies pre-packed RGB565 pixels (big endian, row-major) into a
    /// rectangle.
    ///
    /// The caller's buffer is streamed as is. At most `2·width·height` bytes
    /// are sent; a shorter buffer leaves the rest of the window untouched.
    pub fn draw_bitmap(
        &mut self,
        x: u16,
        y: u16,
        width: u16,
        height: u16,
        pixels: &[u8],
    ) -> Result<(), DI::Error> {
        if width == 0 || height == 0 {
            return Ok(());
        }
        let len = usize::from(width)
            .saturating_mul(usize::from(height))
            .saturating_mul(2)
            .min(pixels.len());
        let offset = self.options.display_offset;
        self.transaction(|di, _| {
            set_window::<_, M>(di, offset, x, y, width, height)?;
            di.send_block(&pixels[..len], 1)
        })
    }

    /// Draws a line between two points, inclusive.
    ///
    /// Horizontal and vertical lines take the staged fast path; any other
    /// slope is rasterized with Bresenham's algorithm, one pixel write per
    /// point. Points left of or above the origin are skipped.
    pub fn draw_line(
        &mut self,
        x0: i16,
        y0: i16,
        x1: i16,
        y1: i16,
        color: Color,
    ) -> Result<(), DI::Error> {
        if x0 == x1 {
            let (top, bottom) = if y0 > y1 { (y1, y0) } else { (y0, y1) };
            return match clip_span(x0, top, bottom) {
                Some((x, y, length)) => self.draw_fast_v_line(x, y, length, color),
                None => Ok(()),
            };
        }
        if y0 == y1 {
            let (left, right) = if x0 > x1 { (x1, x0) } else { (x0, x1) };
            return match clip_span(y0, left, right) {
                Some((y, x, length)) => self.draw_fast_h_line(x, y, length, color),
                None => Ok(()),
            };
        }

        for (x, y) in Bresenham::new(x0, y0, x1, y1) {
            if let (Ok(x), Ok(y)) = (u16::try_from(x), u16::try_from(y)) {
                self.draw_pixel(x, y, color)?;
            }
        }
        Ok(())
    }
}

/// Sends `rows` rows of `width` pixels of `color` into the open window.
///
/// Rows that fit the staging buffer are replayed whole. Wider rows are sent
/// as a continuous stream of buffer-sized pieces, which the panel wraps into
/// rows on its own.
fn stream_run<DI: Interface>(
    di: &mut DI,
    row: &mut RowBuffer,
    color: Color,
    width: u16,
    rows: u16,
) -> Result<(), DI::Error> {
    let capacity = row.capacity_pixels();
    if usize::from(width) <= capacity {
        return di.send_block(row.fill(color, usize::from(width)), rows);
    }

    // At most 65535 × 65535 pixels, which fits a u32.
    let total = u32::from(width) * u32::from(rows);
    let chunk_pixels = MAX_ROW_PIXELS as u32;
    let mut full = total / chunk_pixels;
    let rest = (total % chunk_pixels) as usize;
    let chunk = row.fill(color, capacity);
    while full > 0 {
        let batch = full.min(u32::from(u16::MAX));
        di.send_block(chunk, batch as u16)?;
        full -= batch;
    }
    if rest > 0 {
        di.send_block(&chunk[..rest * 2], 1)?;
    }
    Ok(())
}

/// Clips a vertical or horizontal span to non-negative coordinates.
///
/// Returns `(fixed, start, length)`.
fn clip_span(fixed: i16, start: i16, end: i16) -> Option<(u16, u16, u16)> {
    let fixed = u16::try_from(fixed).ok()?;
    let end = u16::try_from(end).ok()?;
    let start = start.max(0) as u16;
    Some((fixed, start, end - start + 1))
}

/// Points of a line from Bresenham's algorithm.
///
/// The iteration always runs along the major axis in increasing order, so a
/// line is yielded from whichever endpoint has the smaller major coordinate.
#[derive(Debug, Clone)]
pub struct Bresenham {
    x: i32,
    y: i32,
    x_end: i32,
    dx: i32,
    dy: i32,
    err: i32,
    step: i32,
    steep: bool,
}

impl Bresenham {
    pub fn new(x0: i16, y0: i16, x1: i16, y1: i16) -> Self {
        let (mut x0, mut y0, mut x1, mut y1) = (
            i32::from(x0),
            i32::from(y0),
            i32::from(x1),
            i32::from(y1),
        );

        let steep = (y1 - y0).abs() > (x1 - x0).abs();
        if steep {
            core::mem::swap(&mut x0, &mut y0);
            core::mem::swap(&mut x1, &mut y1);
        }
        if x0 > x1 {
            core::mem::swap(&mut x0, &mut x1);
            core::mem::swap(&mut y0, &mut y1);
        }

        let dx = x1 - x0;
        Self {
            x: x0,
            y: y0,
            x_end: x1,
            dx,
            dy: (y1 - y0).abs(),
            err: dx / 2,
            step: if y0 < y1 { 1 } else { -1 },
            steep,
        }
    }
}

impl Iterator for Bresenham {
    type Item = (i32, i32);

    fn next(&mut self) -> Option<Self::Item> {
        if self.x > self.x_end {
            return None;
        }
        let point = if self.steep {
            (self.y, self.x)
        } else {
            (self.x, self.y)
        };
        self.err -= self.dy;
        if self.err < 0 {
            self.err += self.dx;
            self.y += self.step;
        }
        self.x += 1;
        Some(point)
    }
}
