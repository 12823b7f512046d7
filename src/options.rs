//! [ModelOptions] and the configuration enums it is built from.

use crate::models::Model;

/// Display rotation.
///
/// Each variant maps to one scan-direction setting of the MADCTL register.
/// `Deg0` and `Deg180` exchange rows and columns, giving a landscape view of
/// the portrait framebuffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Rotation {
    /// Landscape, Y mirrored.
    #[default]
    Deg0,
    /// Portrait, native scan order.
    Deg90,
    /// Landscape, X mirrored.
    Deg180,
    /// Portrait, both axes mirrored.
    Deg270,
}

impl Rotation {
    /// Returns `true` if the rotation exchanges rows and columns.
    pub fn is_landscape(self) -> bool {
        matches!(self, Rotation::Deg0 | Rotation::Deg180)
    }
}

/// Order of the color channels on the panel's color filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ColorOrder {
    Rgb,
    /// Most ST7735 modules are wired BGR.
    #[default]
    Bgr,
}

/// Display inversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ColorInversion {
    Normal,
    /// IPS panels of this family need inversion on to show true colors.
    #[default]
    Inverted,
}

/// Panel configuration, resolved once when the display is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModelOptions {
    /// Scan direction.
    pub rotation: Rotation,
    /// Channel order of the panel.
    pub color_order: ColorOrder,
    /// Inversion setting applied at init.
    pub invert_colors: ColorInversion,
    /// Visible area in pixels, in the rotated coordinate space.
    pub display_size: (u16, u16),
    /// Position of the visible area inside the controller's memory, added to
    /// every coordinate before addressing.
    pub display_offset: (u16, u16),
}

impl ModelOptions {
    /// Default options for `M`: its usual visible area and offset in the
    /// default rotation.
    pub fn with_model<M: Model>() -> Self {
        Self {
            rotation: Rotation::default(),
            color_order: ColorOrder::default(),
            invert_colors: ColorInversion::default(),
            display_size: M::DISPLAY_SIZE,
            display_offset: M::DISPLAY_OFFSET,
        }
    }

    /// Visible width in pixels.
    pub fn width(&self) -> u16 {
        self.display_size.0
    }

    /// Visible height in pixels.
    pub fn height(&self) -> u16 {
        self.display_size.1
    }
}

/// Size of the model's framebuffer as seen through `rotation`.
pub fn framebuffer_size<M: Model>(rotation: Rotation) -> (u16, u16) {
    let (w, h) = M::FRAMEBUFFER_SIZE;
    if rotation.is_landscape() {
        (h, w)
    } else {
        (w, h)
    }
}
