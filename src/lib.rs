#![cfg_attr(not(test), no_std)]

//! This crate provides a blocking driver for TFT displays built on the
//! ST7735 family of controllers, connected over a transmit-only SPI bus.
//!
//! Fills and lines are staged once in a one-row buffer and replayed by the
//! transport's block mode, which on boards with a circular DMA channel
//! ([`interface::DmaInterface`]) costs no CPU time per repetition. A 5x7 text
//! engine renders glyphs from a caller-supplied font table through the same
//! block path.
//!
//! ## Example
//! ```
//! use embedded_hal::{delay::DelayNs, digital::OutputPin, spi::SpiBus};
//! use st7735_dma::{
//!     color::Color, interface::SpiInterface, models::ST7735S, text::Font, Builder,
//! };
//!
//! static FONT: [u8; 5 * 128] = [0; 5 * 128];
//!
//! fn run<SPI: SpiBus, DC: OutputPin, RST: OutputPin>(
//!     spi: SPI,
//!     dc: DC,
//!     rst: RST,
//!     delay: &mut impl DelayNs,
//! ) {
//!     let di = SpiInterface::new(spi, dc);
//!     let mut display = Builder::new(ST7735S, di)
//!         .reset_pin(rst)
//!         .font(Font::new(&FONT))
//!         .init(delay)
//!         .unwrap();
//!
//!     display.clear(Color::BLACK).unwrap();
//!     display.fill_rect(10, 10, 40, 20, Color::RED).unwrap();
//!     display.draw_line(0, 0, 159, 79, Color::YELLOW).unwrap();
//!     display.set_cursor(10, 40);
//!     display.print("T=").unwrap();
//!     display.print_number(-12, 0).unwrap();
//! }
//! ```
//!
//! ## Concurrency
//!
//! Every call blocks until its bytes have been sent. There is no timeout: a
//! bus or DMA engine that never completes hangs the caller. The display is
//! not reentrant; sharing it with an interrupt handler needs an external
//! lock.

use embedded_hal::{delay::DelayNs, digital::OutputPin};

pub mod interface;

pub mod options;

mod builder;
pub use builder::*;

pub mod color;
pub mod dcs;
pub mod draw_target;
mod graphics;
pub use graphics::Bresenham;
pub mod models;
pub mod row_buffer;
pub mod text;

use dcs::SetAddressMode;
use models::Model;
use row_buffer::RowBuffer;
use text::{Font, TextState};

#[cfg(test)]
pub(crate) mod _mock;

/// Display driver structure.
pub struct Display<DI, MODEL, RST>
where
    DI: interface::Interface,
    MODEL: Model,
    RST: OutputPin,
{
    /// The display interface.
    di: DI,
    /// The display model instance.
    model: MODEL,
    /// The reset pin.
    rst: Option<RST>,
    /// Display options.
    options: options::ModelOptions,
    /// Current MADCTL value.
    madctl: SetAddressMode,
    /// Sleep state.
    sleeping: bool,
    /// Staging buffer for fills, lines and glyphs.
    row: RowBuffer,
    /// Cursor and text colors.
    text: TextState,
    /// Glyph table for the text functions.
    font: Font,
}

impl<DI, M, RST> Display<DI, M, RST>
where
    DI: interface::Interface,
    M: Model,
    RST: OutputPin,
{
    /// Returns the visible size in pixels as `(width, height)`.
    pub fn size(&self) -> (u16, u16) {
        self.options.display_size
    }

    /// Returns the current rotation.
    pub fn rotation(&self) -> options::Rotation {
        self.options.rotation
    }

    /// Sets the rotation and re-sends MADCTL.
    ///
    /// Switching between landscape and portrait exchanges the display size
    /// and offset, so the visible area stays on the same panel pixels. The
    /// new options take effect only once the command has been sent.
    pub fn set_rotation(&mut self, rotation: options::Rotation) -> Result<(), DI::Error> {
        let mut options = self.options;
        if rotation.is_landscape() != options.rotation.is_landscape() {
            let (width, height) = options.display_size;
            let (offset_x, offset_y) = options.display_offset;
            options.display_size = (height, width);
            options.display_offset = (offset_y, offset_x);
        }
        options.rotation = rotation;

        let Self { di, model, .. } = self;
        di.select()?;
        let result = model.update_options(di, &options);
        let released = di.deselect();
        let madctl = result?;
        released?;

        self.madctl = madctl;
        self.options = options;
        Ok(())
    }

    /// Returns the MADCTL value last sent to the panel.
    pub fn address_mode(&self) -> SetAddressMode {
        self.madctl
    }

    /// Turns display inversion on or off.
    pub fn set_invert_colors(
        &mut self,
        inversion: options::ColorInversion,
    ) -> Result<(), DI::Error> {
        self.options.invert_colors = inversion;
        self.transaction(|di, _| M::set_invert_colors(di, inversion))
    }

    /// Turns the panel output on or off without touching display RAM.
    pub fn set_display_on(&mut self, on: bool) -> Result<(), DI::Error> {
        self.transaction(|di, _| M::set_display_on(di, on))
    }

    /// Returns `true` if the display is currently in sleep mode.
    pub fn is_sleeping(&self) -> bool {
        self.sleeping
    }

    /// Puts the display into sleep mode.
    pub fn sleep<DLY: DelayNs>(&mut self, delay: &mut DLY) -> Result<(), DI::Error> {
        self.transaction(|di, _| M::sleep(di, delay))?;
        self.sleeping = true;
        Ok(())
    }

    /// Wakes the display from sleep mode.
    pub fn wake<DLY: DelayNs>(&mut self, delay: &mut DLY) -> Result<(), DI::Error> {
        self.transaction(|di, _| M::wake(di, delay))?;
        self.sleeping = false;
        Ok(())
    }

    /// Releases the display interface, model instance, and reset pin.
    pub fn release(self) -> (DI, M, Option<RST>) {
        (self.di, self.model, self.rst)
    }

    /// Runs `f` with chip-select asserted for its whole duration.
    ///
    /// Chip-select is released even if `f` fails.
    fn transaction<F>(&mut self, f: F) -> Result<(), DI::Error>
    where
        F: FnOnce(&mut DI, &mut RowBuffer) -> Result<(), DI::Error>,
    {
        self.di.select()?;
        let result = f(&mut self.di, &mut self.row);
        let released = self.di.deselect();
        result.and(released)
    }
}

/// Offsets a display-space rectangle and addresses it on the panel.
///
/// `w` and `h` must be non-zero.
fn set_window<DI, M>(
    di: &mut DI,
    offset: (u16, u16),
    x: u16,
    y: u16,
    w: u16,
    h: u16,
) -> Result<(), DI::Error>
where
    DI: interface::Interface,
    M: Model,
{
    let sx = x.saturating_add(offset.0);
    let sy = y.saturating_add(offset.1);
    let ex = sx.saturating_add(w - 1);
    let ey = sy.saturating_add(h - 1);

    #[cfg(feature = "defmt")]
    defmt::trace!("window ({}, {})..=({}, {})", sx, sy, ex, ey);

    M::set_window(di, sx, sy, ex, ey)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        _mock::{self, Event, MockDelay, MockError},
        color::Color,
        options::{framebuffer_size, ColorInversion, Rotation},
    };

    #[test]
    fn rotation_change_resends_madctl() {
        let mut display = crate::_mock::display();
        display.set_rotation(Rotation::Deg90).unwrap();
        assert_eq!(display.rotation(), Rotation::Deg90);
        assert_eq!(display.address_mode().bits(), 0x08);
        assert_eq!(
            display.di.events,
            vec![
                Event::Select,
                Event::Command(dcs::MADCTL),
                Event::Data(0x08),
                Event::Deselect,
            ]
        );
    }

    #[test]
    fn rotation_to_portrait_swaps_geometry() {
        let mut display = _mock::display();
        display.set_rotation(Rotation::Deg90).unwrap();
        assert_eq!(display.size(), (80, 160));

        display.di.events.clear();
        display.clear(Color::RED).unwrap();
        let windows = _mock::windows(&display.di.events);
        assert_eq!(windows, vec![(26, 1, 105, 160)]);

        let (columns, rows) = framebuffer_size::<models::ST7735S>(Rotation::Deg90);
        let (_, _, x1, y1) = windows[0];
        assert!(x1 < columns && y1 < rows);
    }

    #[test]
    fn rotation_within_orientation_keeps_geometry() {
        let mut display = _mock::display();
        display.set_rotation(Rotation::Deg180).unwrap();
        assert_eq!(display.size(), (160, 80));
        display.set_rotation(Rotation::Deg270).unwrap();
        display.set_rotation(Rotation::Deg0).unwrap();
        assert_eq!(display.size(), (160, 80));

        display.di.events.clear();
        display.clear(Color::RED).unwrap();
        assert_eq!(_mock::windows(&display.di.events), vec![(1, 26, 160, 105)]);
    }

    #[test]
    fn failed_command_leaves_options_untouched() {
        let mut display = _mock::display();
        display.di.fail_commands = true;
        assert_eq!(display.set_rotation(Rotation::Deg90), Err(MockError));
        assert_eq!(display.rotation(), Rotation::Deg0);
        assert_eq!(display.size(), (160, 80));
        assert_eq!(display.address_mode().bits(), 0xA8);
        assert_eq!(display.di.events.last(), Some(&Event::Deselect));
    }

    #[test]
    fn chip_select_is_released_when_a_transfer_fails() {
        let mut display = _mock::display();
        display.di.fail_blocks = true;
        assert_eq!(display.fill_rect(0, 0, 4, 4, Color::BLUE), Err(MockError));
        assert_eq!(display.di.events.first(), Some(&Event::Select));
        assert_eq!(display.di.events.last(), Some(&Event::Deselect));
    }

    #[test]
    fn sleep_state_is_tracked() {
        let mut display = crate::_mock::display();
        let mut delay = MockDelay::default();
        display.sleep(&mut delay).unwrap();
        assert!(display.is_sleeping());
        display.wake(&mut delay).unwrap();
        assert!(!display.is_sleeping());
    }

    #[test]
    fn runtime_commands_are_bracketed() {
        let mut display = crate::_mock::display();
        display.set_invert_colors(ColorInversion::Normal).unwrap();
        display.set_display_on(false).unwrap();
        assert_eq!(
            display.di.events,
            vec![
                Event::Select,
                Event::Command(dcs::INVOFF),
                Event::Deselect,
                Event::Select,
                Event::Command(dcs::DISPOFF),
                Event::Deselect,
            ]
        );
    }
}
