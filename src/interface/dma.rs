use embedded_hal::digital::OutputPin;

use super::{Interface, NoCsPin};

/// A transmit-only SPI peripheral with a DMA channel feeding its data register.
///
/// Boards implement this on top of their PAC/HAL. The channel must run in
/// circular mode: once started it keeps replaying the same buffer and raises
/// its transfer-complete flag at the end of every pass until stopped.
///
/// The driver always calls [`stop`](SpiDma::stop) before the buffer passed to
/// [`start_circular`](SpiDma::start_circular) goes out of scope, so an
/// implementation may hand the raw address to the hardware.
pub trait SpiDma {
    /// Error type
    type Error: core::fmt::Debug;

    /// Writes a single byte through the data register and waits for the
    /// transmit-empty flag.
    fn write_byte(&mut self, byte: u8) -> Result<(), Self::Error>;

    /// Sets memory address and length and enables the channel.
    fn start_circular(&mut self, buffer: &[u8]) -> Result<(), Self::Error>;

    /// Clears the transfer-complete flag.
    fn clear_complete(&mut self);

    /// Returns `true` once a pass over the buffer has finished since the last
    /// [`clear_complete`](SpiDma::clear_complete).
    fn is_complete(&mut self) -> bool;

    /// Disables the channel.
    fn stop(&mut self);
}

/// Dma interface error
#[derive(Clone, Copy, Debug)]
pub enum DmaError<DMA, DC, CS> {
    Dma(DMA),
    Dc(DC),
    Cs(CS),
}

/// SPI transport whose block transfers are replayed by a circular DMA channel.
///
/// A row of `2·w` bytes staged once in RAM is transmitted `h` times by the
/// hardware, so filling a rectangle costs one short buffer and `h` flag polls
/// instead of `2·w·h` CPU byte writes.
pub struct DmaInterface<DMA, DC, CS = NoCsPin> {
    dma: DMA,
    dc: DC,
    cs: Option<CS>,
}

impl<DMA, DC> DmaInterface<DMA, DC, NoCsPin>
where
    DMA: SpiDma,
    DC: OutputPin,
{
    /// Create a new interface for a panel whose chip-select is tied low.
    pub fn new(dma: DMA, dc: DC) -> Self {
        Self { dma, dc, cs: None }
    }

    /// Use a chip-select line, asserted around every drawing operation.
    pub fn with_cs<CS2: OutputPin>(self, cs: CS2) -> DmaInterface<DMA, DC, CS2> {
        DmaInterface {
            dma: self.dma,
            dc: self.dc,
            cs: Some(cs),
        }
    }
}

impl<DMA, DC, CS> DmaInterface<DMA, DC, CS>
where
    DMA: SpiDma,
    DC: OutputPin,
    CS: OutputPin,
{
    /// Release the DMA engine and pins, deconstructing the interface
    pub fn release(self) -> (DMA, DC, Option<CS>) {
        (self.dma, self.dc, self.cs)
    }
}

impl<DMA, DC, CS> Interface for DmaInterface<DMA, DC, CS>
where
    DMA: SpiDma,
    DC: OutputPin,
    CS: OutputPin,
{
    type Error = DmaError<DMA::Error, DC::Error, CS::Error>;

    fn select(&mut self) -> Result<(), Self::Error> {
        match self.cs.as_mut() {
            Some(cs) => cs.set_low().map_err(DmaError::Cs),
            None => Ok(()),
        }
    }

    fn deselect(&mut self) -> Result<(), Self::Error> {
        match self.cs.as_mut() {
            Some(cs) => cs.set_high().map_err(DmaError::Cs),
            None => Ok(()),
        }
    }

    fn send_command(&mut self, command: u8) -> Result<(), Self::Error> {
        self.dc.set_low().map_err(DmaError::Dc)?;
        self.dma.write_byte(command).map_err(DmaError::Dma)
    }

    fn send_data8(&mut self, data: u8) -> Result<(), Self::Error> {
        self.dc.set_high().map_err(DmaError::Dc)?;
        self.dma.write_byte(data).map_err(DmaError::Dma)
    }

    fn send_block(&mut self, data: &[u8], repeat: u16) -> Result<(), Self::Error> {
        if data.is_empty() || repeat == 0 {
            return Ok(());
        }
        self.dc.set_high().map_err(DmaError::Dc)?;

        if let Err(e) = self.dma.start_circular(data) {
            self.dma.stop();
            return Err(DmaError::Dma(e));
        }
        for _ in 0..repeat {
            // A flag left over from an earlier transfer must not count as this pass.
            self.dma.clear_complete();
            while !self.dma.is_complete() {
                core::hint::spin_loop();
            }
        }
        self.dma.stop();
        Ok(())
    }
}
