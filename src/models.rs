//! Display models.

use crate::{
    dcs::{self, InterfaceExt, SetAddressMode},
    interface::Interface,
    options::{ColorInversion, ModelOptions},
};
use embedded_hal::delay::DelayNs;

mod st7735s;

pub use st7735s::*;

/// Display model.
pub trait Model {
    /// The framebuffer size in pixels, in the controller's native portrait
    /// orientation.
    const FRAMEBUFFER_SIZE: (u16, u16);

    /// Visible area of the usual module in the default rotation.
    const DISPLAY_SIZE: (u16, u16) = Self::FRAMEBUFFER_SIZE;

    /// Offset of the visible area in the default rotation.
    const DISPLAY_OFFSET: (u16, u16) = (0, 0);

    /// Duration of the active low reset pulse in µs.
    const RESET_DURATION: u32 = 50_000;

    /// Time the controller needs after the reset pulse, in µs.
    const RESET_SETTLE: u32 = 50_000;

    /// Initializes the display for this model and returns the MADCTL value
    /// that was set.
    fn init<DELAY, DI>(
        &mut self,
        di: &mut DI,
        delay: &mut DELAY,
        options: &ModelOptions,
    ) -> Result<SetAddressMode, DI::Error>
    where
        DELAY: DelayNs,
        DI: Interface;

    /// Sets the address window and starts a memory write.
    ///
    /// Coordinates are inclusive and already offset. Every pixel byte sent
    /// afterwards fills the window row by row.
    fn set_window<DI>(di: &mut DI, sx: u16, sy: u16, ex: u16, ey: u16) -> Result<(), DI::Error>
    where
        DI: Interface,
    {
        di.write_command(dcs::SetColumnAddress::new(sx, ex))?;
        di.write_command(dcs::SetPageAddress::new(sy, ey))?;
        di.write_command(dcs::WriteMemoryStart)
    }

    ///
    /// Need to call [Self::wake] before issuing other commands
    ///
    fn sleep<DI, DELAY>(di: &mut DI, delay: &mut DELAY) -> Result<(), DI::Error>
    where
        DI: Interface,
        DELAY: DelayNs,
    {
        di.write_command(dcs::EnterSleepMode)?;
        delay.delay_ms(120);
        Ok(())
    }

    ///
    /// Wakes the display after it's been set to sleep via [Self::sleep]
    ///
    fn wake<DI, DELAY>(di: &mut DI, delay: &mut DELAY) -> Result<(), DI::Error>
    where
        DI: Interface,
        DELAY: DelayNs,
    {
        di.write_command(dcs::ExitSleepMode)?;
        delay.delay_ms(120);
        Ok(())
    }

    /// Re-sends MADCTL after the options changed.
    fn update_options<DI>(&self, di: &mut DI, options: &ModelOptions) -> Result<SetAddressMode, DI::Error>
    where
        DI: Interface,
    {
        let madctl = SetAddressMode::from(options);
        di.write_command(madctl)?;
        Ok(madctl)
    }

    /// Turns display inversion on or off.
    fn set_invert_colors<DI>(di: &mut DI, inversion: ColorInversion) -> Result<(), DI::Error>
    where
        DI: Interface,
    {
        di.write_command(dcs::SetInvertMode::new(inversion))
    }

    /// Turns the panel output on or off. Display RAM is kept either way.
    fn set_display_on<DI>(di: &mut DI, on: bool) -> Result<(), DI::Error>
    where
        DI: Interface,
    {
        if on {
            di.write_command(dcs::SetDisplayOn)
        } else {
            di.write_command(dcs::SetDisplayOff)
        }
    }
}
