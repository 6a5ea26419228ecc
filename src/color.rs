//! Channel Color
//!
//! This module defines the canonical 4-channel color value and its hex codec.
//!
//! A `ChannelColor` is used in two contexts:
//! - Absolute color, with every channel in 0.0-1.0
//! - Additive offset, with every channel in -255.0-255.0 (see [`ChannelColor::offset_by`])
//!
//! The type does not track which one it holds; callers do.

use std::fmt;
use std::str::FromStr;

/// RGBA color with `f32` channels.
///
/// Equality is exact: two colors are equal only when all four channels
/// compare equal as stored.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ChannelColor {
    pub red: f32,
    pub green: f32,
    pub blue: f32,
    pub alpha: f32,
}

/// Error returned when a hex string cannot be decoded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorParseError {
    /// Nothing left after trimming whitespace and the prefix
    Empty,
    /// Digit count other than 3, 4, 6 or 8
    InvalidLength,
    /// A character outside `0-9a-fA-F`
    InvalidHex,
}

impl fmt::Display for ColorParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            ColorParseError::Empty => "empty color string",
            ColorParseError::InvalidLength => "invalid hex length",
            ColorParseError::InvalidHex => "invalid hex digits",
        };
        f.write_str(msg)
    }
}

impl std::error::Error for ColorParseError {}

impl ChannelColor {
    /// The "no color" sentinel. Conversions short-circuit on it.
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0, 0.0);
    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0, 1.0);
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0, 1.0);
    pub const RED: Self = Self::new(1.0, 0.0, 0.0, 1.0);
    pub const GREEN: Self = Self::new(0.0, 1.0, 0.0, 1.0);
    pub const BLUE: Self = Self::new(0.0, 0.0, 1.0, 1.0);

    /// Create a color from its four channels, stored as given
    pub const fn new(red: f32, green: f32, blue: f32, alpha: f32) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// Check for the [`ChannelColor::ZERO`] sentinel
    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }

    /// Decode a `0xRRGGBB` integer. Bits above 23 are ignored and alpha is 1.0.
    pub fn from_hex(value: u32) -> Self {
        let mask = 0xFF;
        Self::new(
            ((value >> 16) & mask) as f32 / 255.0,
            ((value >> 8) & mask) as f32 / 255.0,
            (value & mask) as f32 / 255.0,
            1.0,
        )
    }

    /// Decode a `0xAARRGGBB` integer
    pub fn from_argb_hex(value: u32) -> Self {
        Self {
            alpha: ((value >> 24) & 0xFF) as f32 / 255.0,
            ..Self::from_hex(value)
        }
    }

    /// Parse a hex string.
    ///
    /// Accepts an optional `#` or `0x` prefix followed by one of:
    /// * `RGB`
    /// * `ARGB`
    /// * `RRGGBB`
    /// * `AARRGGBB`
    ///
    /// Forms without alpha decode as fully opaque.
    pub fn from_hex_str(value: &str) -> Result<Self, ColorParseError> {
        let trimmed = value.trim();
        let digits = trimmed
            .strip_prefix('#')
            .or_else(|| trimmed.strip_prefix("0x"))
            .or_else(|| trimmed.strip_prefix("0X"))
            .unwrap_or(trimmed);

        if digits.is_empty() {
            return Err(ColorParseError::Empty);
        }
        if !matches!(digits.len(), 3 | 4 | 6 | 8) {
            return Err(ColorParseError::InvalidLength);
        }

        let mut nibbles = [0u8; 8];
        for (slot, c) in nibbles.iter_mut().zip(digits.chars()) {
            *slot = c.to_digit(16).ok_or(ColorParseError::InvalidHex)? as u8;
        }

        // Short forms repeat each nibble: "F80" is "FF8800".
        let [a, r, g, b] = match digits.len() {
            3 => [0xFF, nibbles[0] * 17, nibbles[1] * 17, nibbles[2] * 17],
            4 => [nibbles[0] * 17, nibbles[1] * 17, nibbles[2] * 17, nibbles[3] * 17],
            6 => [
                0xFF,
                nibbles[0] << 4 | nibbles[1],
                nibbles[2] << 4 | nibbles[3],
                nibbles[4] << 4 | nibbles[5],
            ],
            _ => [
                nibbles[0] << 4 | nibbles[1],
                nibbles[2] << 4 | nibbles[3],
                nibbles[4] << 4 | nibbles[5],
                nibbles[6] << 4 | nibbles[7],
            ],
        };

        Ok(Self::from_rgba8(r, g, b, a))
    }

    /// Lenient hex decode: malformed input yields [`ChannelColor::ZERO`]
    pub fn from_hex_str_lossy(value: &str) -> Self {
        Self::from_hex_str(value).unwrap_or_else(|err| {
            log::warn!("Invalid hex color {:?} ({}), using empty color", value, err);
            Self::ZERO
        })
    }

    /// Format as `#RRGGBB`, or `#AARRGGBB` when not fully opaque
    pub fn to_hex_string(&self) -> String {
        let [r, g, b, a] = self.to_rgba8();
        if a == 0xFF {
            format!("#{:02X}{:02X}{:02X}", r, g, b)
        } else {
            format!("#{:02X}{:02X}{:02X}{:02X}", a, r, g, b)
        }
    }

    /// Create from 0-255 channel values
    pub fn from_rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self::new(
            r as f32 / 255.0,
            g as f32 / 255.0,
            b as f32 / 255.0,
            a as f32 / 255.0,
        )
    }

    /// Convert to 0-255 channel values, rounding and clamping
    pub fn to_rgba8(&self) -> [u8; 4] {
        self.to_array()
            .map(|c| (c * 255.0).round().clamp(0.0, 255.0) as u8)
    }

    /// Returns `[red, green, blue, alpha]`
    #[inline]
    pub fn to_array(&self) -> [f32; 4] {
        [self.red, self.green, self.blue, self.alpha]
    }

    /// Returns `(red, green, blue, alpha)`
    #[inline]
    pub fn to_rgba(&self) -> (f32, f32, f32, f32) {
        (self.red, self.green, self.blue, self.alpha)
    }

    /// Apply a channel offset in -255.0-255.0 to this normalized color.
    ///
    /// Every channel becomes `c + offset / 255`, clamped to 0.0-1.0.
    pub fn offset_by(self, offset: ChannelColor) -> Self {
        let apply = |c: f32, o: f32| (c + o / 255.0).clamp(0.0, 1.0);
        Self::new(
            apply(self.red, offset.red),
            apply(self.green, offset.green),
            apply(self.blue, offset.blue),
            apply(self.alpha, offset.alpha),
        )
    }
}

impl From<[f32; 4]> for ChannelColor {
    fn from([red, green, blue, alpha]: [f32; 4]) -> Self {
        Self::new(red, green, blue, alpha)
    }
}

impl From<ChannelColor> for [f32; 4] {
    fn from(color: ChannelColor) -> Self {
        color.to_array()
    }
}

impl FromStr for ChannelColor {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex_str(s)
    }
}
