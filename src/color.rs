//! Packed 16-bit colors.

use embedded_graphics_core::pixelcolor::{
    raw::RawU16,
    IntoStorage, Rgb565,
};

/// A packed RGB565 pixel value, sent to the panel most significant byte first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Color(pub u16);

impl Color {
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    pub const NAVY: Self = Self::rgb(0, 0, 123);
    pub const DARKGREEN: Self = Self::rgb(0, 125, 0);
    pub const DARKCYAN: Self = Self::rgb(0, 125, 123);
    pub const MAROON: Self = Self::rgb(123, 0, 0);
    pub const PURPLE: Self = Self::rgb(123, 0, 123);
    pub const OLIVE: Self = Self::rgb(123, 125, 0);
    pub const LIGHTGREY: Self = Self::rgb(198, 195, 198);
    pub const DARKGREY: Self = Self::rgb(123, 125, 123);
    pub const BLUE: Self = Self::rgb(0, 0, 255);
    pub const GREEN: Self = Self::rgb(0, 255, 0);
    pub const CYAN: Self = Self::rgb(0, 255, 255);
    pub const RED: Self = Self::rgb(255, 0, 0);
    pub const MAGENTA: Self = Self::rgb(255, 0, 255);
    pub const YELLOW: Self = Self::rgb(255, 255, 0);
    pub const WHITE: Self = Self::rgb(255, 255, 255);
    pub const ORANGE: Self = Self::rgb(255, 165, 0);
    pub const GREENYELLOW: Self = Self::rgb(173, 255, 41);
    pub const PINK: Self = Self::rgb(255, 130, 198);

    /// Packs 8-bit channels as RGB565, keeping the top 5/6/5 bits.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self(((r as u16 & 0xF8) << 8) | ((g as u16 & 0xFC) << 3) | (b as u16 >> 3))
    }

    /// Packs 8-bit channels with red and blue exchanged, for panels whose
    /// channels are wired in BGR order while MADCTL is left in RGB mode.
    pub const fn bgr(r: u8, g: u8, b: u8) -> Self {
        Self::rgb(b, g, r)
    }

    /// Raw packed value.
    pub const fn into_inner(self) -> u16 {
        self.0
    }

    /// Bytes in wire order.
    pub const fn to_be_bytes(self) -> [u8; 2] {
        self.0.to_be_bytes()
    }
}

impl From<u16> for Color {
    fn from(value: u16) -> Self {
        Self(value)
    }
}

impl From<Color> for u16 {
    fn from(color: Color) -> Self {
        color.0
    }
}

impl From<Rgb565> for Color {
    fn from(color: Rgb565) -> Self {
        Self(color.into_storage())
    }
}

impl From<Color> for Rgb565 {
    fn from(color: Color) -> Self {
        Rgb565::from(RawU16::new(color.0))
    }
}
