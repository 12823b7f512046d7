//! Cursor based text output with a fixed 5x7 font.
//!
//! Glyphs come from a caller-supplied table: five bytes per character code,
//! one byte per column, bit 0 at the top. Each glyph is staged as a 5x7 block
//! of foreground and background pixels and sent as one window and one block
//! transfer. The cursor moves right by [`GLYPH_ADVANCE`] pixels per character
//! and never wraps.

use core::fmt;

use embedded_hal::digital::OutputPin;

use crate::{color::Color, interface::Interface, models::Model, set_window, Display};

/// Glyph width in pixels.
pub const GLYPH_WIDTH: u16 = 5;
/// Glyph height in pixels.
pub const GLYPH_HEIGHT: u16 = 7;
/// Horizontal cursor step: one glyph plus one column of spacing.
pub const GLYPH_ADVANCE: u16 = GLYPH_WIDTH + 1;

/// Room for `i32::MIN`: ten digits and a sign.
const NUMBER_BUFFER_LEN: usize = 12;

/// A 5x7 column-major glyph table indexed by character code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Font {
    table: &'static [u8],
}

impl Font {
    /// A font without glyphs; every character renders as a blank cell.
    pub const EMPTY: Self = Self { table: &[] };

    /// Wraps a table of `5 × n` bytes covering character codes `0..n`.
    pub const fn new(table: &'static [u8]) -> Self {
        Self { table }
    }

    /// Returns the five column bytes for `c`, or a blank glyph if the table
    /// has no entry for it.
    pub fn glyph(&self, c: char) -> [u8; 5] {
        let start = c as usize * GLYPH_WIDTH as usize;
        self.table
            .get(start..start + GLYPH_WIDTH as usize)
            .and_then(|bytes| bytes.try_into().ok())
            .unwrap_or([0; 5])
    }
}

/// Cursor position and text colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextState {
    /// Top-left corner of the next glyph, in display coordinates.
    pub cursor: (u16, u16),
    /// Color of set glyph bits.
    pub color: Color,
    /// Color of clear glyph bits.
    pub background: Color,
}

impl Default for TextState {
    fn default() -> Self {
        Self {
            cursor: (0, 0),
            color: Color::WHITE,
            background: Color::BLACK,
        }
    }
}

impl<DI, M, RST> Display<DI, M, RST>
where
    DI: Interface,
    M: Model,
    RST: OutputPin,
{
    /// Moves the text cursor.
    pub fn set_cursor(&mut self, x: u16, y: u16) {
        self.text.cursor = (x, y);
    }

    /// Returns the text cursor.
    pub fn cursor(&self) -> (u16, u16) {
        self.text.cursor
    }

    /// Sets the text color.
    pub fn set_color(&mut self, color: Color) {
        self.text.color = color;
    }

    /// Sets the text background color.
    pub fn set_background_color(&mut self, color: Color) {
        self.text.background = color;
    }

    /// Replaces the glyph table.
    pub fn set_font(&mut self, font: Font) {
        self.font = font;
    }

    /// Renders one character at the cursor and advances it.
    pub fn print_char(&mut self, c: char) -> Result<(), DI::Error> {
        let glyph = self.font.glyph(c);
        let TextState {
            cursor: (x, y),
            color,
            background,
        } = self.text;
        let offset = self.options.display_offset;

        self.transaction(|di, row| {
            let pixels = (0..GLYPH_HEIGHT).flat_map(|i| {
                glyph.iter().map(move |column| {
                    if column & (1 << i) != 0 {
                        color
                    } else {
                        background
                    }
                })
            });
            let block = row.stage(pixels);
            set_window::<_, M>(di, offset, x, y, GLYPH_WIDTH, GLYPH_HEIGHT)?;
            di.send_block(block, 1)
        })?;

        self.text.cursor.0 = x.saturating_add(GLYPH_ADVANCE);
        Ok(())
    }

    /// Renders a string at the cursor.
    pub fn print(&mut self, s: &str) -> Result<(), DI::Error> {
        s.chars().try_for_each(|c| self.print_char(c))
    }

    /// Renders a signed decimal number at the cursor.
    ///
    /// `min_width` is in pixels. A number narrower than that is right
    /// aligned by padding it on the left with blank cells, so that it ends
    /// exactly `min_width` pixels right of the cursor.
    pub fn print_number(&mut self, n: i32, min_width: u16) -> Result<(), DI::Error> {
        let mut buf = [0u8; NUMBER_BUFFER_LEN];
        let mut pos = buf.len();

        let mut value = n.unsigned_abs();
        loop {
            pos -= 1;
            buf[pos] = b'0' + (value % 10) as u8;
            value /= 10;
            if value == 0 {
                break;
            }
        }
        if n < 0 {
            pos -= 1;
            buf[pos] = b'-';
        }

        let chars = (buf.len() - pos) as u16;
        let used = chars * GLYPH_ADVANCE - 1;
        if min_width > used {
            let pad = min_width - used;
            for _ in 0..pad / GLYPH_ADVANCE {
                self.print_char(' ')?;
            }
            self.text.cursor.0 = self.text.cursor.0.saturating_add(pad % GLYPH_ADVANCE);
        }

        buf[pos..]
            .iter()
            .try_for_each(|&b| self.print_char(char::from(b)))
    }
}

impl<DI, M, RST> fmt::Write for Display<DI, M, RST>
where
    DI: Interface,
    M: Model,
    RST: OutputPin,
{
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.print(s).map_err(|_| fmt::Error)
    }
}
