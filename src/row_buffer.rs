//! Staging buffer for repeated color runs.

use crate::color::Color;

/// Longest row the ST7735 can address, in pixels.
pub const MAX_ROW_PIXELS: usize = 162;

/// Capacity in bytes: one full row of 16-bit pixels.
pub const ROW_BUFFER_LEN: usize = MAX_ROW_PIXELS * 2;

/// One row of packed pixels that block transfers can replay.
///
/// Only the bytes returned by the last staging call are meaningful; the rest
/// keeps whatever an earlier operation left there.
pub struct RowBuffer {
    bytes: [u8; ROW_BUFFER_LEN],
}

impl RowBuffer {
    pub const fn new() -> Self {
        Self {
            bytes: [0; ROW_BUFFER_LEN],
        }
    }

    /// Number of pixels that fit in the buffer.
    pub const fn capacity_pixels(&self) -> usize {
        MAX_ROW_PIXELS
    }

    /// Writes `pixels` copies of `color` and returns them as wire bytes.
    ///
    /// `pixels` is clamped to the buffer capacity.
    pub fn fill(&mut self, color: Color, pixels: usize) -> &[u8] {
        let len = pixels.min(MAX_ROW_PIXELS) * 2;
        let bytes = color.to_be_bytes();
        for chunk in self.bytes[..len].chunks_exact_mut(2) {
            chunk.copy_from_slice(&bytes);
        }
        &self.bytes[..len]
    }

    /// Writes the given colors in order and returns them as wire bytes.
    ///
    /// Colors beyond the buffer capacity are dropped.
    pub fn stage(&mut self, colors: impl IntoIterator<Item = Color>) -> &[u8] {
        let mut len = 0;
        for (color, chunk) in colors.into_iter().zip(self.bytes.chunks_exact_mut(2)) {
            chunk.copy_from_slice(&color.to_be_bytes());
            len += 2;
        }
        &self.bytes[..len]
    }
}

impl Default for RowBuffer {
    fn default() -> Self {
        Self::new()
    }
}
