//! [`embedded-graphics`](embedded_graphics_core) integration.
//!
//! Pixels outside the visible area are dropped here, before they reach the
//! unchecked drawing functions. Solid fills go through the staged row path.

use embedded_graphics_core::{
    draw_target::DrawTarget,
    geometry::{Dimensions, OriginDimensions, Size},
    pixelcolor::Rgb565,
    primitives::Rectangle,
    Pixel,
};
use embedded_hal::digital::OutputPin;

use crate::{color::Color, interface::Interface, models::Model, Display};

impl<DI, M, RST> DrawTarget for Display<DI, M, RST>
where
    DI: Interface,
    M: Model,
    RST: OutputPin,
{
    type Color = Rgb565;
    type Error = DI::Error;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        let (width, height) = self.options.display_size;
        for Pixel(point, color) in pixels {
            if let (Ok(x), Ok(y)) = (u16::try_from(point.x), u16::try_from(point.y)) {
                if x < width && y < height {
                    self.draw_pixel(x, y, color.into())?;
                }
            }
        }
        Ok(())
    }

    fn fill_solid(&mut self, area: &Rectangle, color: Self::Color) -> Result<(), Self::Error> {
        let area = area.intersection(&self.bounding_box());
        let Some(bottom_right) = area.bottom_right() else {
            return Ok(());
        };
        // Inside the bounding box, so every coordinate fits a u16.
        let x = area.top_left.x as u16;
        let y = area.top_left.y as u16;
        let width = (bottom_right.x - area.top_left.x + 1) as u16;
        let height = (bottom_right.y - area.top_left.y + 1) as u16;
        self.fill_rect(x, y, width, height, color.into())
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        Display::clear(self, Color::from(color))
    }
}

impl<DI, M, RST> OriginDimensions for Display<DI, M, RST>
where
    DI: Interface,
    M: Model,
    RST: OutputPin,
{
    fn size(&self) -> Size {
        let (width, height) = self.options.display_size;
        Size::new(u32::from(width), u32::from(height))
    }
}
