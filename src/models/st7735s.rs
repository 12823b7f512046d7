use embedded_hal::delay::DelayNs;

use crate::{
    dcs::{
        EnterNormalMode, ExitSleepMode, InterfaceExt, SetAddressMode, SetDisplayOn, SetGamma,
        SetInvertMode, SetPixelFormat,
    },
    interface::Interface,
    models::Model,
    options::ModelOptions,
};

/// Positive polarity gamma calibration.
pub const GAMMA_POSITIVE: [u8; 16] = [
    0x09, 0x16, 0x09, 0x20, 0x21, 0x1B, 0x13, 0x19, 0x17, 0x15, 0x1E, 0x2B, 0x04, 0x05, 0x02, 0x0E,
];

/// Negative polarity gamma calibration.
pub const GAMMA_NEGATIVE: [u8; 16] = [
    0x0B, 0x14, 0x08, 0x1E, 0x22, 0x1D, 0x18, 0x1E, 0x1B, 0x1A, 0x24, 0x2B, 0x06, 0x06, 0x02, 0x0F,
];

/// ST7735S display in Rgb565 color mode.
///
/// The defaults describe the common 0.96" 160x80 IPS module, whose visible
/// area sits at column 1, row 26 of the controller memory in landscape.
pub struct ST7735S;

impl Model for ST7735S {
    const FRAMEBUFFER_SIZE: (u16, u16) = (132, 162);
    const DISPLAY_SIZE: (u16, u16) = (160, 80);
    const DISPLAY_OFFSET: (u16, u16) = (1, 26);

    fn init<DELAY, DI>(
        &mut self,
        di: &mut DI,
        delay: &mut DELAY,
        options: &ModelOptions,
    ) -> Result<SetAddressMode, DI::Error>
    where
        DELAY: DelayNs,
        DI: Interface,
    {
        let madctl = SetAddressMode::from(options);

        di.select()?;

        di.write_command(ExitSleepMode)?;
        delay.delay_ms(120);

        di.write_command(madctl)?;
        di.write_command(SetPixelFormat::RGB565)?;

        di.write_command(SetGamma::positive(&GAMMA_POSITIVE))?;
        di.write_command(SetGamma::negative(&GAMMA_NEGATIVE))?;
        delay.delay_ms(10);

        di.write_command(SetInvertMode::new(options.invert_colors))?;
        delay.delay_ms(10);
        di.write_command(EnterNormalMode)?;
        delay.delay_ms(10);
        di.write_command(SetDisplayOn)?;
        delay.delay_ms(10);

        di.deselect()?;

        Ok(madctl)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        _mock::{Event, MockDelay, MockDisplayInterface},
        dcs,
        options::{ColorInversion, ColorOrder, Rotation},
    };

    #[test]
    fn init_sequence_is_exact() {
        let mut di = MockDisplayInterface::new();
        let mut delay = MockDelay::default();
        let options = ModelOptions::with_model::<ST7735S>();

        let madctl = ST7735S.init(&mut di, &mut delay, &options).unwrap();
        assert_eq!(madctl.bits(), 0xA8);

        assert_eq!(
            di.events,
            vec![
                Event::Select,
                Event::Command(dcs::SLPOUT),
                Event::Command(dcs::MADCTL),
                Event::Data(0xA8),
                Event::Command(dcs::COLMOD),
                Event::Data(0x05),
                Event::Command(dcs::GMCTRP1),
                Event::Block {
                    data: GAMMA_POSITIVE.to_vec(),
                    repeat: 1
                },
                Event::Command(dcs::GMCTRN1),
                Event::Block {
                    data: GAMMA_NEGATIVE.to_vec(),
                    repeat: 1
                },
                Event::Command(dcs::INVON),
                Event::Command(dcs::NORON),
                Event::Command(dcs::DISPON),
                Event::Deselect,
            ]
        );
        assert_eq!(delay.total_ns, 160_000_000);
    }

    #[test]
    fn init_honours_configuration() {
        let mut di = MockDisplayInterface::new();
        let mut delay = MockDelay::default();
        let options = ModelOptions {
            rotation: Rotation::Deg90,
            color_order: ColorOrder::Rgb,
            invert_colors: ColorInversion::Normal,
            ..ModelOptions::with_model::<ST7735S>()
        };

        ST7735S.init(&mut di, &mut delay, &options).unwrap();

        assert!(di
            .events
            .windows(2)
            .any(|w| w == [Event::Command(dcs::MADCTL), Event::Data(0x00)]));
        assert!(di.events.contains(&Event::Command(dcs::INVOFF)));
        assert!(!di.events.contains(&Event::Command(dcs::INVON)));
    }
}
