//! Transport between the driver and the panel.
//!
//! An [`Interface`] moves command bytes, parameter bytes and pixel blocks to
//! the controller and drives the data/command and chip-select lines. Two
//! implementations are provided: [`SpiInterface`] for any blocking
//! [`SpiBus`](embedded_hal::spi::SpiBus), and [`DmaInterface`] for boards that
//! expose a circular DMA channel feeding the SPI transmit register.
//!
//! All transfers block until the bytes have left the engine. There is no
//! timeout: a bus or DMA engine that never reports completion hangs the
//! caller.

mod dma;
pub use dma::*;

mod spi;
pub use spi::*;

use embedded_hal::digital;

/// Command and pixel transport.
pub trait Interface {
    /// Error type
    type Error: core::fmt::Debug;

    /// Asserts chip-select, if one is wired.
    fn select(&mut self) -> Result<(), Self::Error>;

    /// Releases chip-select, if one is wired.
    fn deselect(&mut self) -> Result<(), Self::Error>;

    /// Sends a single command byte with the D/C line low.
    fn send_command(&mut self, command: u8) -> Result<(), Self::Error>;

    /// Sends a single parameter or pixel byte with the D/C line high.
    fn send_data8(&mut self, data: u8) -> Result<(), Self::Error>;

    /// Sends a 16-bit word, most significant byte first.
    fn send_data16(&mut self, data: u16) -> Result<(), Self::Error> {
        let [hi, lo] = data.to_be_bytes();
        self.send_data8(hi)?;
        self.send_data8(lo)
    }

    /// Sends `data` in data mode `repeat` times back to back.
    ///
    /// The same slice is replayed for every repetition, which is how a single
    /// staged row fills a whole rectangle.
    fn send_block(&mut self, data: &[u8], repeat: u16) -> Result<(), Self::Error>;
}

impl<T: Interface + ?Sized> Interface for &mut T {
    type Error = T::Error;

    fn select(&mut self) -> Result<(), Self::Error> {
        T::select(self)
    }

    fn deselect(&mut self) -> Result<(), Self::Error> {
        T::deselect(self)
    }

    fn send_command(&mut self, command: u8) -> Result<(), Self::Error> {
        T::send_command(self, command)
    }

    fn send_data8(&mut self, data: u8) -> Result<(), Self::Error> {
        T::send_data8(self, data)
    }

    fn send_data16(&mut self, data: u16) -> Result<(), Self::Error> {
        T::send_data16(self, data)
    }

    fn send_block(&mut self, data: &[u8], repeat: u16) -> Result<(), Self::Error> {
        T::send_block(self, data, repeat)
    }
}

/// Placeholder for a chip-select line that is tied permanently active.
pub enum NoCsPin {}

impl digital::OutputPin for NoCsPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
    fn set_high(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

impl digital::ErrorType for NoCsPin {
    type Error = core::convert::Infallible;
}
