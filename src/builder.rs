//! [super::Display] builder module

use embedded_hal::{
    delay::DelayNs,
    digital::{self, OutputPin},
};

use crate::{
    dcs::{InterfaceExt, SoftReset},
    interface::Interface,
    models::Model,
    options::{self, ColorInversion, ColorOrder, ModelOptions, Rotation},
    row_buffer::RowBuffer,
    text::{Font, TextState},
    Display,
};

/// Builder for [Display] instances.
///
/// Exposes all possible display options.
///
/// # Examples
///
/// ```
/// use embedded_hal::delay::DelayNs;
/// use st7735_dma::{interface::Interface, models::ST7735S, options::Rotation, Builder};
///
/// fn setup(di: impl Interface, delay: &mut impl DelayNs) {
///     let mut display = Builder::new(ST7735S, di)
///         .rotation(Rotation::Deg180)
///         .init(delay)
///         .unwrap();
///     display.print("hello").unwrap();
/// }
/// ```
pub struct Builder<DI, MODEL, RST>
where
    DI: Interface,
    MODEL: Model,
{
    di: DI,
    model: MODEL,
    rst: Option<RST>,
    options: ModelOptions,
    font: Font,
}

impl<DI, MODEL> Builder<DI, MODEL, NoResetPin>
where
    DI: Interface,
    MODEL: Model,
{
    /// Constructs a new builder for the given model and interface.
    #[must_use]
    pub fn new(model: MODEL, di: DI) -> Self {
        Self {
            di,
            model,
            rst: None,
            options: ModelOptions::with_model::<MODEL>(),
            font: Font::EMPTY,
        }
    }
}

impl<DI, MODEL, RST> Builder<DI, MODEL, RST>
where
    DI: Interface,
    MODEL: Model,
    RST: OutputPin,
{
    /// Sets the display inversion applied at init.
    #[must_use]
    pub fn invert_colors(mut self, color_inversion: ColorInversion) -> Self {
        self.options.invert_colors = color_inversion;
        self
    }

    /// Sets the panel's color channel order.
    #[must_use]
    pub fn color_order(mut self, color_order: ColorOrder) -> Self {
        self.options.color_order = color_order;
        self
    }

    /// Sets the scan direction.
    ///
    /// The display size and offset are not adjusted; set them for the chosen
    /// rotation.
    #[must_use]
    pub fn rotation(mut self, rotation: Rotation) -> Self {
        self.options.rotation = rotation;
        self
    }

    /// Sets the visible area in pixels.
    #[must_use]
    pub fn display_size(mut self, width: u16, height: u16) -> Self {
        self.options.display_size = (width, height);
        self
    }

    /// Sets the position of the visible area inside the controller memory.
    #[must_use]
    pub fn display_offset(mut self, x: u16, y: u16) -> Self {
        self.options.display_offset = (x, y);
        self
    }

    /// Sets the 5x7 glyph table used by the text functions.
    #[must_use]
    pub fn font(mut self, font: Font) -> Self {
        self.font = font;
        self
    }

    /// Sets the reset pin.
    ///
    /// Without one the controller is reset with the software reset command.
    #[must_use]
    pub fn reset_pin<RST2: OutputPin>(self, rst: RST2) -> Builder<DI, MODEL, RST2> {
        Builder {
            di: self.di,
            model: self.model,
            rst: Some(rst),
            options: self.options,
            font: self.font,
        }
    }

    /// Consumes the builder, resets the controller and runs the model's init
    /// sequence.
    ///
    /// Returns [`InitError::InvalidConfiguration`] if the visible area does
    /// not fit the model's framebuffer in the chosen rotation.
    pub fn init(
        mut self,
        delay_source: &mut impl DelayNs,
    ) -> Result<Display<DI, MODEL, RST>, InitError<DI::Error, RST::Error>> {
        let to_u32 = |(a, b)| (u32::from(a), u32::from(b));
        let (width, height) = to_u32(self.options.display_size);
        let (offset_x, offset_y) = to_u32(self.options.display_offset);
        let (max_width, max_height) =
            to_u32(options::framebuffer_size::<MODEL>(self.options.rotation));

        if width == 0 || height == 0 || width > max_width || height > max_height {
            #[cfg(feature = "defmt")]
            defmt::warn!("display size {}x{} does not fit the framebuffer", width, height);
            return Err(InitError::InvalidConfiguration(
                ConfigurationError::InvalidDisplaySize,
            ));
        }
        if width + offset_x > max_width || height + offset_y > max_height {
            #[cfg(feature = "defmt")]
            defmt::warn!("display offset ({}, {}) out of range", offset_x, offset_y);
            return Err(InitError::InvalidConfiguration(
                ConfigurationError::InvalidDisplayOffset,
            ));
        }

        match self.rst {
            Some(ref mut rst_pin) => hardware_reset::<MODEL, _, _>(rst_pin, delay_source)
                .map_err(InitError::ResetPin)?,
            None => {
                self.di.select().map_err(InitError::Interface)?;
                self.di
                    .write_command(SoftReset)
                    .map_err(InitError::Interface)?;
                self.di.deselect().map_err(InitError::Interface)?;
                delay_source.delay_us(MODEL::RESET_SETTLE);
            }
        }

        #[cfg(feature = "defmt")]
        defmt::debug!(
            "init {}x{} at ({}, {}), {}",
            width,
            height,
            offset_x,
            offset_y,
            self.options.rotation
        );

        let madctl = self
            .model
            .init(&mut self.di, delay_source, &self.options)
            .map_err(InitError::Interface)?;

        Ok(Display {
            di: self.di,
            model: self.model,
            rst: self.rst,
            options: self.options,
            madctl,
            sleeping: false,
            row: RowBuffer::new(),
            text: TextState::default(),
            font: self.font,
        })
    }
}

/// Pulses the reset line low and waits for the controller to come back.
///
/// A panel that never leaves reset is not detected; later commands are
/// silently ignored by it.
pub fn hardware_reset<MODEL, RST, DELAY>(rst: &mut RST, delay: &mut DELAY) -> Result<(), RST::Error>
where
    MODEL: Model,
    RST: OutputPin,
    DELAY: DelayNs,
{
    rst.set_low()?;
    delay.delay_us(MODEL::RESET_DURATION);
    rst.set_high()?;
    delay.delay_us(MODEL::RESET_SETTLE);
    Ok(())
}

/// Error returned by [`Builder::init`].
#[derive(Debug)]
pub enum InitError<DIError, PinError> {
    /// Error caused by the display interface.
    Interface(DIError),

    /// Error caused by the reset pin's [`OutputPin`](embedded_hal::digital::OutputPin) implementation.
    ResetPin(PinError),

    /// Invalid configuration error.
    ///
    /// This error is returned when the configuration passed to the builder is
    /// invalid. For example, when the visible area is larger than the
    /// framebuffer.
    InvalidConfiguration(ConfigurationError),
}

/// Specifics of [InitError::InvalidConfiguration] if configuration was found invalid
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigurationError {
    /// Display size is zero or larger than the framebuffer.
    InvalidDisplaySize,
    /// Display size plus offset is larger than the framebuffer.
    InvalidDisplayOffset,
}

/// Marker type for no reset pin.
pub enum NoResetPin {}

impl digital::OutputPin for NoResetPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
    fn set_high(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

impl digital::ErrorType for NoResetPin {
    type Error = core::convert::Infallible;
}

#[cfg(test)]
mod tests {
    use embedded_hal_mock::eh1::digital::{
        Mock as PinMock, State as PinState, Transaction as PinTransaction,
    };

    use crate::{
        _mock::{Event, MockDelay, MockDisplayInterface},
        dcs,
        models::ST7735S,
    };

    use super::*;

    #[test]
    fn init_without_reset_pin_sends_software_reset() {
        let mut delay = MockDelay::default();
        let display = Builder::new(ST7735S, MockDisplayInterface::new())
            .init(&mut delay)
            .unwrap();
        let (di, _, _) = display.release();
        assert_eq!(
            &di.events[..4],
            &[
                Event::Select,
                Event::Command(dcs::SWRESET),
                Event::Deselect,
                Event::Select,
            ]
        );
    }

    #[test]
    fn init_with_reset_pin_pulses_it_first() {
        let mut rst = PinMock::new(&[
            PinTransaction::set(PinState::Low),
            PinTransaction::set(PinState::High),
        ]);
        let mut delay = MockDelay::default();
        let display = Builder::new(ST7735S, MockDisplayInterface::new())
            .reset_pin(rst.clone())
            .init(&mut delay)
            .unwrap();

        let (di, _, _) = display.release();
        assert_eq!(di.events[0], Event::Select);
        assert_eq!(di.events[1], Event::Command(dcs::SLPOUT));
        assert_eq!(delay.total_ns, 100_000_000 + 160_000_000);
        rst.done();
    }

    #[test]
    fn rejects_zero_and_oversized_areas() {
        let mut delay = MockDelay::default();
        for (w, h) in [(0, 80), (160, 0), (163, 80), (160, 133)] {
            let result = Builder::new(ST7735S, MockDisplayInterface::new())
                .display_size(w, h)
                .display_offset(0, 0)
                .init(&mut delay);
            assert!(matches!(
                result,
                Err(InitError::InvalidConfiguration(
                    ConfigurationError::InvalidDisplaySize
                ))
            ));
        }
    }

    #[test]
    fn rejects_offset_past_framebuffer() {
        let mut delay = MockDelay::default();
        let result = Builder::new(ST7735S, MockDisplayInterface::new())
            .display_offset(3, 26)
            .init(&mut delay);
        assert!(matches!(
            result,
            Err(InitError::InvalidConfiguration(
                ConfigurationError::InvalidDisplayOffset
            ))
        ));
    }

    #[test]
    fn portrait_rotation_uses_portrait_limits() {
        let mut delay = MockDelay::default();
        let display = Builder::new(ST7735S, MockDisplayInterface::new())
            .rotation(Rotation::Deg90)
            .display_size(80, 160)
            .display_offset(26, 1)
            .init(&mut delay)
            .unwrap();
        assert_eq!(display.size(), (80, 160));
        assert!(Builder::new(ST7735S, MockDisplayInterface::new())
            .rotation(Rotation::Deg90)
            .init(&mut delay)
            .is_err());
    }
}
