//! Display material carried by each building mesh.
//!
//! Only the handful of properties the display layer toggles for selection
//! and debug views are modelled here.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// RGB color with 8-bit components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Color {
    /// Red component (0-255).
    pub r: u8,
    /// Green component (0-255).
    pub g: u8,
    /// Blue component (0-255).
    pub b: u8,
}

impl Color {
    /// Create a new color from RGB components.
    #[inline]
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Create a color from a packed `0xRRGGBB` value.
    ///
    /// # Example
    ///
    /// ```
    /// use mesh_types::Color;
    ///
    /// assert_eq!(Color::from_hex(0x00ff00), Color::new(0, 255, 0));
    /// ```
    #[inline]
    #[must_use]
    #[allow(clippy::cast_possible_truncation)] // each channel is masked to 8 bits
    pub const fn from_hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xff) as u8,
            g: ((hex >> 8) & 0xff) as u8,
            b: (hex & 0xff) as u8,
        }
    }

    /// Black color (0, 0, 0).
    pub const BLACK: Self = Self::from_hex(0x00_0000);

    /// Neutral building grey.
    pub const GREY: Self = Self::from_hex(0xcc_cccc);

    /// Emissive glow used for a highlighted building.
    pub const GLOW: Self = Self::from_hex(0x66_6666);

    /// Red color (255, 0, 0).
    pub const RED: Self = Self::from_hex(0xff_0000);

    /// Green color (0, 255, 0).
    pub const GREEN: Self = Self::from_hex(0x00_ff00);
}

impl Default for Color {
    fn default() -> Self {
        Self::GREY
    }
}

/// Surface material of a mesh.
///
/// `Material` is a plain value: every building owns its own copy, so
/// recoloring one building never touches another.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Material {
    /// Base color.
    pub color: Color,
    /// Emissive color, black when not highlighted.
    pub emissive: Color,
    /// Opacity in `[0, 1]`.
    pub opacity: f32,
    /// Whether the renderer should blend this material.
    pub transparent: bool,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            color: Color::GREY,
            emissive: Color::BLACK,
            opacity: 1.0,
            transparent: false,
        }
    }
}

impl Material {
    /// Turn the emissive glow on.
    pub fn highlight(&mut self) {
        self.emissive = Color::GLOW;
    }

    /// Turn the emissive glow off.
    pub fn clear_highlight(&mut self) {
        self.emissive = Color::BLACK;
    }

    /// Check whether the glow is on.
    #[must_use]
    pub fn is_highlighted(&self) -> bool {
        self.emissive != Color::BLACK
    }

    /// Mark as the selected building.
    pub fn select(&mut self) {
        self.color = Color::GREEN;
        self.opacity = 0.8;
    }

    /// Tint for the match debug view: green when matched, red otherwise,
    /// half transparent.
    pub fn debug_tint(&mut self, matched: bool) {
        self.transparent = true;
        self.opacity = 0.5;
        self.color = if matched { Color::GREEN } else { Color::RED };
    }

    /// Restore the neutral look.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
