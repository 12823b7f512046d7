//! ST7735 command set.
//!
//! Each command knows its opcode and how its parameters go over the wire;
//! [`InterfaceExt::write_command`] sends the opcode followed by the
//! parameters.

use crate::{
    interface::Interface,
    options::{ColorInversion, ColorOrder, ModelOptions, Rotation},
};

/// Software reset.
pub const SWRESET: u8 = 0x01;
/// Sleep in.
pub const SLPIN: u8 = 0x10;
/// Sleep out.
pub const SLPOUT: u8 = 0x11;
/// Normal display mode on.
pub const NORON: u8 = 0x13;
/// Display inversion off.
pub const INVOFF: u8 = 0x20;
/// Display inversion on.
pub const INVON: u8 = 0x21;
/// Display off.
pub const DISPOFF: u8 = 0x28;
/// Display on.
pub const DISPON: u8 = 0x29;
/// Column address set.
pub const CASET: u8 = 0x2A;
/// Row address set.
pub const RASET: u8 = 0x2B;
/// Memory write.
pub const RAMWR: u8 = 0x2C;
/// Memory data access control.
pub const MADCTL: u8 = 0x36;
/// Interface pixel format.
pub const COLMOD: u8 = 0x3A;
/// Gamma '+' polarity correction characteristics.
pub const GMCTRP1: u8 = 0xE0;
/// Gamma '-' polarity correction characteristics.
pub const GMCTRN1: u8 = 0xE1;

/// A command with its parameters.
pub trait DcsCommand {
    /// Opcode byte.
    fn instruction(&self) -> u8;

    /// Sends the parameters, if any.
    fn write_params<DI: Interface + ?Sized>(&self, _di: &mut DI) -> Result<(), DI::Error> {
        Ok(())
    }
}

/// Extension trait for sending [`DcsCommand`]s over an [`Interface`].
pub trait InterfaceExt: Interface {
    fn write_command(&mut self, command: impl DcsCommand) -> Result<(), Self::Error> {
        self.send_command(command.instruction())?;
        command.write_params(self)
    }
}

impl<T: Interface + ?Sized> InterfaceExt for T {}

macro_rules! parameterless {
    ($($(#[$doc:meta])* $name:ident => $op:expr;)*) => {
        $(
            $(#[$doc])*
            #[derive(Debug, Clone, Copy, PartialEq, Eq)]
            pub struct $name;

            impl DcsCommand for $name {
                fn instruction(&self) -> u8 {
                    $op
                }
            }
        )*
    };
}

parameterless! {
    /// Software reset.
    SoftReset => SWRESET;
    /// Enter sleep mode.
    EnterSleepMode => SLPIN;
    /// Exit sleep mode.
    ExitSleepMode => SLPOUT;
    /// Normal display mode on.
    EnterNormalMode => NORON;
    /// Display on.
    SetDisplayOn => DISPON;
    /// Display off.
    SetDisplayOff => DISPOFF;
    /// Start writing pixels into the current address window.
    WriteMemoryStart => RAMWR;
}

/// Display inversion on or off.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SetInvertMode(ColorInversion);

impl SetInvertMode {
    pub fn new(inversion: ColorInversion) -> Self {
        Self(inversion)
    }
}

impl DcsCommand for SetInvertMode {
    fn instruction(&self) -> u8 {
        match self.0 {
            ColorInversion::Normal => INVOFF,
            ColorInversion::Inverted => INVON,
        }
    }
}

/// Interface pixel format. Only 16 bits per pixel is used by this driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SetPixelFormat(u8);

impl SetPixelFormat {
    /// 16 bits per pixel (`101b`).
    pub const RGB565: Self = Self(0x05);
}

impl DcsCommand for SetPixelFormat {
    fn instruction(&self) -> u8 {
        COLMOD
    }

    fn write_params<DI: Interface + ?Sized>(&self, di: &mut DI) -> Result<(), DI::Error> {
        di.send_data8(self.0)
    }
}

/// Memory data access control: scan direction, axis swap and color order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SetAddressMode(u8);

impl SetAddressMode {
    /// Row address order (Y mirror).
    pub const MY: u8 = 0x80;
    /// Column address order (X mirror).
    pub const MX: u8 = 0x40;
    /// Row/column exchange.
    pub const MV: u8 = 0x20;
    /// Vertical refresh order.
    pub const ML: u8 = 0x10;
    /// BGR color filter order.
    pub const BGR: u8 = 0x08;
    /// Horizontal refresh order.
    pub const MH: u8 = 0x04;

    pub fn new(rotation: Rotation, color_order: ColorOrder) -> Self {
        let scan = match rotation {
            Rotation::Deg0 => Self::MY | Self::MV,
            Rotation::Deg90 => 0,
            Rotation::Deg180 => Self::MX | Self::MV,
            Rotation::Deg270 => Self::MX | Self::MY,
        };
        let order = match color_order {
            ColorOrder::Rgb => 0,
            ColorOrder::Bgr => Self::BGR,
        };
        Self(scan | order)
    }

    /// Raw MADCTL parameter byte.
    pub fn bits(self) -> u8 {
        self.0
    }

    /// Returns `true` if rows and columns are exchanged.
    pub fn swaps_axes(self) -> bool {
        self.0 & Self::MV != 0
    }
}

impl From<&ModelOptions> for SetAddressMode {
    fn from(options: &ModelOptions) -> Self {
        Self::new(options.rotation, options.color_order)
    }
}

impl DcsCommand for SetAddressMode {
    fn instruction(&self) -> u8 {
        MADCTL
    }

    fn write_params<DI: Interface + ?Sized>(&self, di: &mut DI) -> Result<(), DI::Error> {
        di.send_data8(self.0)
    }
}

/// Column address range, inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SetColumnAddress {
    start: u16,
    end: u16,
}

impl SetColumnAddress {
    pub fn new(start: u16, end: u16) -> Self {
        Self { start, end }
    }
}

impl DcsCommand for SetColumnAddress {
    fn instruction(&self) -> u8 {
        CASET
    }

    fn write_params<DI: Interface + ?Sized>(&self, di: &mut DI) -> Result<(), DI::Error> {
        di.send_data16(self.start)?;
        di.send_data16(self.end)
    }
}

/// Row address range, inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SetPageAddress {
    start: u16,
    end: u16,
}

impl SetPageAddress {
    pub fn new(start: u16, end: u16) -> Self {
        Self { start, end }
    }
}

impl DcsCommand for SetPageAddress {
    fn instruction(&self) -> u8 {
        RASET
    }

    fn write_params<DI: Interface + ?Sized>(&self, di: &mut DI) -> Result<(), DI::Error> {
        di.send_data16(self.start)?;
        di.send_data16(self.end)
    }
}

/// Gamma correction table for one polarity.
///
/// The 16 parameters are sent as a single block transfer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SetGamma<'a> {
    instruction: u8,
    table: &'a [u8; 16],
}

impl<'a> SetGamma<'a> {
    pub fn positive(table: &'a [u8; 16]) -> Self {
        Self {
            instruction: GMCTRP1,
            table,
        }
    }

    pub fn negative(table: &'a [u8; 16]) -> Self {
        Self {
            instruction: GMCTRN1,
            table,
        }
    }
}

impl DcsCommand for SetGamma<'_> {
    fn instruction(&self) -> u8 {
        self.instruction
    }

    fn write_params<DI: Interface + ?Sized>(&self, di: &mut DI) -> Result<(), DI::Error> {
        di.send_block(self.table, 1)
    }
}
