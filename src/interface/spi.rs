use embedded_hal::{digital::OutputPin, spi::SpiBus};

use super::{Interface, NoCsPin};

/// Spi interface error
#[derive(Clone, Copy, Debug)]
pub enum SpiError<SPI, DC, CS> {
    Spi(SPI),
    Dc(DC),
    Cs(CS),
}

/// Blocking SPI transport.
///
/// Every byte is flushed before the call returns so the D/C line never
/// changes while a byte is still shifting out.
pub struct SpiInterface<SPI, DC, CS = NoCsPin> {
    spi: SPI,
    dc: DC,
    cs: Option<CS>,
}

impl<SPI, DC> SpiInterface<SPI, DC, NoCsPin>
where
    SPI: SpiBus,
    DC: OutputPin,
{
    /// Create a new interface for a panel whose chip-select is tied low.
    pub fn new(spi: SPI, dc: DC) -> Self {
        Self { spi, dc, cs: None }
    }

    /// Use a chip-select line, asserted around every drawing operation.
    pub fn with_cs<CS2: OutputPin>(self, cs: CS2) -> SpiInterface<SPI, DC, CS2> {
        SpiInterface {
            spi: self.spi,
            dc: self.dc,
            cs: Some(cs),
        }
    }
}

impl<SPI, DC, CS> SpiInterface<SPI, DC, CS>
where
    SPI: SpiBus,
    DC: OutputPin,
    CS: OutputPin,
{
    /// Release the bus and pins, deconstructing the interface
    pub fn release(self) -> (SPI, DC, Option<CS>) {
        (self.spi, self.dc, self.cs)
    }

    fn write(&mut self, bytes: &[u8]) -> Result<(), SpiError<SPI::Error, DC::Error, CS::Error>> {
        self.spi.write(bytes).map_err(SpiError::Spi)?;
        self.spi.flush().map_err(SpiError::Spi)
    }
}

impl<SPI, DC, CS> Interface for SpiInterface<SPI, DC, CS>
where
    SPI: SpiBus,
    DC: OutputPin,
    CS: OutputPin,
{
    type Error = SpiError<SPI::Error, DC::Error, CS::Error>;

    fn select(&mut self) -> Result<(), Self::Error> {
        match self.cs.as_mut() {
            Some(cs) => cs.set_low().map_err(SpiError::Cs),
            None => Ok(()),
        }
    }

    fn deselect(&mut self) -> Result<(), Self::Error> {
        match self.cs.as_mut() {
            Some(cs) => cs.set_high().map_err(SpiError::Cs),
            None => Ok(()),
        }
    }

    fn send_command(&mut self, command: u8) -> Result<(), Self::Error> {
        self.dc.set_low().map_err(SpiError::Dc)?;
        self.write(&[command])
    }

    fn send_data8(&mut self, data: u8) -> Result<(), Self::Error> {
        self.dc.set_high().map_err(SpiError::Dc)?;
        self.write(&[data])
    }

    fn send_data16(&mut self, data: u16) -> Result<(), Self::Error> {
        self.dc.set_high().map_err(SpiError::Dc)?;
        self.write(&data.to_be_bytes())
    }

    fn send_block(&mut self, data: &[u8], repeat: u16) -> Result<(), Self::Error> {
        if data.is_empty() || repeat == 0 {
            return Ok(());
        }
        self.dc.set_high().map_err(SpiError::Dc)?;
        for _ in 0..repeat {
            self.spi.write(data).map_err(SpiError::Spi)?;
        }
        self.spi.flush().map_err(SpiError::Spi)
    }
}
