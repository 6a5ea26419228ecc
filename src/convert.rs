//! Color Space Conversion
//!
//! This module normalizes platform color objects into sRGB and converts
//! between RGB and YUV.
//!
//! Color workflow:
//! - Platform colors may arrive in a profile that cannot be read as RGB
//!   (a generic gray profile, extended linear sRGB)
//! - [`platform_normalize`] converts them to sRGB first; failure is not fatal
//! - Channel reads ([`to_rgba`]) always go through that normalization step

use std::fmt;

use crate::color::ChannelColor;

/// Luma weight of the red channel (BT.709)
pub const BT709_Y_R: f32 = 0.2126;
/// Luma weight of the green channel (BT.709)
pub const BT709_Y_G: f32 = 0.7152;
/// Luma weight of the blue channel (BT.709)
pub const BT709_Y_B: f32 = 0.0722;
/// U chroma weights for red, green and blue
pub const BT709_U: [f32; 3] = [-0.09991, -0.33609, 0.436];
/// V chroma weights for red, green and blue
pub const BT709_V: [f32; 3] = [0.615, -0.55861, -0.05639];

/// Gamma of the generic gray profile
const GRAY_GAMMA: f32 = 2.2;

/// A color as handed over by the host platform, tagged with its profile
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PlatformColor {
    /// Gamma-encoded sRGB, readable as is
    Srgb { red: f32, green: f32, blue: f32, alpha: f32 },
    /// Extended linear sRGB; must be encoded before reading
    LinearSrgb { red: f32, green: f32, blue: f32, alpha: f32 },
    /// Generic gray profile with gamma 2.2; has no RGB components
    GenericGray { white: f32, alpha: f32 },
    /// Pattern or image backed color without components
    Pattern,
}

/// Error from [`try_normalize`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NormalizeError {
    /// The profile has no sRGB equivalent
    Unsupported(&'static str),
}

impl fmt::Display for NormalizeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NormalizeError::Unsupported(profile) => {
                write!(f, "cannot convert {} color to sRGB", profile)
            }
        }
    }
}

impl std::error::Error for NormalizeError {}

impl PlatformColor {
    /// The platform's "no color": fully transparent gray
    pub const CLEAR: Self = PlatformColor::GenericGray {
        white: 0.0,
        alpha: 0.0,
    };

    /// Check for the [`PlatformColor::CLEAR`] sentinel
    pub fn is_clear(&self) -> bool {
        *self == Self::CLEAR
    }

    fn profile_name(&self) -> &'static str {
        match self {
            PlatformColor::Srgb { .. } => "sRGB",
            PlatformColor::LinearSrgb { .. } => "extended linear sRGB",
            PlatformColor::GenericGray { .. } => "generic gray gamma 2.2",
            PlatformColor::Pattern => "pattern",
        }
    }

    /// Extract normalized channels, see [`to_rgba`]
    pub fn to_channel_color(&self) -> ChannelColor {
        let (red, green, blue, alpha) = to_rgba(self);
        ChannelColor::new(red, green, blue, alpha)
    }

    /// Convert to YUV, see [`Yuv::from_rgb`]
    pub fn to_yuv(&self) -> Yuv {
        if self.is_clear() {
            return Yuv::default();
        }
        let (r, g, b, _) = to_rgba(self);
        Yuv::from_rgb(r, g, b)
    }
}

impl From<ChannelColor> for PlatformColor {
    fn from(color: ChannelColor) -> Self {
        PlatformColor::Srgb {
            red: color.red,
            green: color.green,
            blue: color.blue,
            alpha: color.alpha,
        }
    }
}

/// Convert a single sRGB color component to linear space
///
/// sRGB uses a gamma curve with a linear segment near black for efficiency.
/// Formula from: https://en.wikipedia.org/wiki/SRGB#From_sRGB_to_CIE_XYZ
#[inline]
pub fn srgb_to_linear(srgb: f32) -> f32 {
    if srgb <= 0.04045 {
        srgb / 12.92
    } else {
        ((srgb + 0.055) / 1.055).powf(2.4)
    }
}

/// Convert a single linear component to sRGB.
///
/// Negative values from extended ranges are mirrored around zero.
#[inline]
pub fn linear_to_srgb(linear: f32) -> f32 {
    if linear < 0.0 {
        return -linear_to_srgb(-linear);
    }
    if linear <= 0.0031308 {
        linear * 12.92
    } else {
        1.055 * linear.powf(1.0 / 2.4) - 0.055
    }
}

/// Convert sRGB color (0.0-1.0) to linear RGB
///
/// # Arguments
/// * `srgb` - Color in sRGB space [r, g, b, a] where RGB are gamma-encoded and alpha is linear
///
/// # Returns
/// Color in linear space [r, g, b, a] where all components are linear
#[inline]
pub fn srgb_to_linear_rgba(srgb: [f32; 4]) -> [f32; 4] {
    [
        srgb_to_linear(srgb[0]),
        srgb_to_linear(srgb[1]),
        srgb_to_linear(srgb[2]),
        srgb[3], // Alpha is already linear
    ]
}

/// Convert linear RGBA to sRGB, leaving alpha untouched
#[inline]
pub fn linear_to_srgb_rgba(linear: [f32; 4]) -> [f32; 4] {
    [
        linear_to_srgb(linear[0]),
        linear_to_srgb(linear[1]),
        linear_to_srgb(linear[2]),
        linear[3],
    ]
}

/// Convert a platform color to the sRGB profile
pub fn try_normalize(color: &PlatformColor) -> Result<PlatformColor, NormalizeError> {
    match *color {
        PlatformColor::Srgb { .. } => Ok(*color),
        PlatformColor::LinearSrgb {
            red,
            green,
            blue,
            alpha,
        } => {
            let [red, green, blue, alpha] = linear_to_srgb_rgba([red, green, blue, alpha]);
            Ok(PlatformColor::Srgb {
                red,
                green,
                blue,
                alpha,
            })
        }
        PlatformColor::GenericGray { white, alpha } => {
            let gray = linear_to_srgb(white.max(0.0).powf(GRAY_GAMMA));
            Ok(PlatformColor::Srgb {
                red: gray,
                green: gray,
                blue: gray,
                alpha,
            })
        }
        PlatformColor::Pattern => Err(NormalizeError::Unsupported(color.profile_name())),
    }
}

/// Best-effort normalization to sRGB.
///
/// On failure the color is returned unchanged.
pub fn platform_normalize(color: &PlatformColor) -> PlatformColor {
    match try_normalize(color) {
        Ok(normalized) => normalized,
        Err(err) => {
            log::debug!("Color normalization skipped: {}", err);
            *color
        }
    }
}

/// Read normalized RGBA channels (0.0-1.0) from a platform color.
///
/// [`PlatformColor::CLEAR`] returns all zeros without normalizing. A color that
/// is still unreadable after normalization also returns all zeros.
pub fn to_rgba(color: &PlatformColor) -> (f32, f32, f32, f32) {
    if color.is_clear() {
        return (0.0, 0.0, 0.0, 0.0);
    }
    match platform_normalize(color) {
        PlatformColor::Srgb {
            red,
            green,
            blue,
            alpha,
        } => (red, green, blue, alpha),
        other => {
            log::warn!("Cannot read channels from {} color", other.profile_name());
            (0.0, 0.0, 0.0, 0.0)
        }
    }
}

/// Write the channels of `color` into `out`.
///
/// `out` is left untouched when `color` is [`PlatformColor::CLEAR`].
pub fn write_rgba(color: &PlatformColor, out: &mut ChannelColor) {
    if color.is_clear() {
        return;
    }
    let (red, green, blue, alpha) = to_rgba(color);
    *out = ChannelColor::new(red, green, blue, alpha);
}

/// Write the RGB channels of `color` into `out`, keeping `out.alpha`.
///
/// `out` is left untouched when `color` is [`PlatformColor::CLEAR`].
pub fn write_rgb(color: &PlatformColor, out: &mut ChannelColor) {
    if color.is_clear() {
        return;
    }
    let (red, green, blue, _) = to_rgba(color);
    out.red = red;
    out.green = green;
    out.blue = blue;
}

/// Luma/chroma triple.
///
/// See: https://en.wikipedia.org/wiki/YUV
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Yuv {
    pub y: f32,
    pub u: f32,
    pub v: f32,
}

impl Yuv {
    /// Forward BT.709 transform of normalized RGB
    pub fn from_rgb(r: f32, g: f32, b: f32) -> Self {
        Self {
            y: BT709_Y_R * r + BT709_Y_G * g + BT709_Y_B * b,
            u: BT709_U[0] * r + BT709_U[1] * g + BT709_U[2] * b,
            v: BT709_V[0] * r + BT709_V[1] * g + BT709_V[2] * b,
        }
    }

    /// Inverse BT.709 transform, returns `(r, g, b)`
    pub fn to_rgb(&self) -> (f32, f32, f32) {
        (
            self.y + 1.28033 * self.v,
            self.y - 0.21482 * self.u - 0.38059 * self.v,
            self.y + 2.12798 * self.u,
        )
    }
}

impl ChannelColor {
    /// Convert to YUV, ignoring alpha.
    ///
    /// The [`ChannelColor::ZERO`] sentinel returns all zeros directly.
    pub fn to_yuv(&self) -> Yuv {
        if self.is_zero() {
            return Yuv::default();
        }
        Yuv::from_rgb(self.red, self.green, self.blue)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_srgb_to_linear() {
        // Test black
        assert_eq!(srgb_to_linear(0.0), 0.0);

        // Test white
        assert!((srgb_to_linear(1.0) - 1.0).abs() < 0.001);

        // Test middle gray (sRGB 0.5 ≈ linear 0.214)
        let linear = srgb_to_linear(0.5);
        assert!((linear - 0.214).abs() < 0.01);
    }

    #[test]
    fn test_linear_to_srgb_inverts() {
        for &v in &[0.0, 0.002, 0.1, 0.5, 0.9, 1.0] {
            assert_abs_diff_eq!(linear_to_srgb(srgb_to_linear(v)), v, epsilon = 1e-5);
        }
        assert_abs_diff_eq!(linear_to_srgb(-0.5), -linear_to_srgb(0.5));
    }

    #[test]
    fn test_yuv_of_white() {
        let yuv = ChannelColor::WHITE.to_yuv();
        assert_abs_diff_eq!(yuv.y, 1.0, epsilon = 1e-5);
        assert_abs_diff_eq!(yuv.u, 0.0, epsilon = 1e-5);
        assert_abs_diff_eq!(yuv.v, 0.0, epsilon = 1e-5);
    }

    #[test]
    fn test_yuv_uses_canonical_constants() {
        let red = ChannelColor::RED.to_yuv();
        assert_eq!(red, Yuv { y: 0.2126, u: -0.09991, v: 0.615 });
        let blue = ChannelColor::BLUE.to_yuv();
        assert_eq!(blue, Yuv { y: 0.0722, u: 0.436, v: -0.05639 });
    }

    #[test]
    fn test_yuv_ignores_alpha() {
        let opaque = ChannelColor::new(0.2, 0.4, 0.6, 1.0).to_yuv();
        let translucent = ChannelColor::new(0.2, 0.4, 0.6, 0.1).to_yuv();
        assert_eq!(opaque, translucent);
    }

    #[test]
    fn test_yuv_inverse() {
        let color = ChannelColor::new(0.8, 0.3, 0.55, 1.0);
        let (r, g, b) = color.to_yuv().to_rgb();
        assert_abs_diff_eq!(r, 0.8, epsilon = 1e-3);
        assert_abs_diff_eq!(g, 0.3, epsilon = 1e-3);
        assert_abs_diff_eq!(b, 0.55, epsilon = 1e-3);
    }

    #[test]
    fn test_sentinels_short_circuit() {
        assert_eq!(ChannelColor::ZERO.to_yuv(), Yuv::default());
        assert_eq!(PlatformColor::CLEAR.to_yuv(), Yuv::default());
        assert_eq!(to_rgba(&PlatformColor::CLEAR), (0.0, 0.0, 0.0, 0.0));
    }

    #[test]
    fn test_write_rgba_leaves_output_on_clear() {
        let mut out = ChannelColor::new(0.1, 0.2, 0.3, 0.4);
        write_rgba(&PlatformColor::CLEAR, &mut out);
        assert_eq!(out, ChannelColor::new(0.1, 0.2, 0.3, 0.4));

        write_rgba(&PlatformColor::from(ChannelColor::RED), &mut out);
        assert_eq!(out, ChannelColor::RED);
    }

    #[test]
    fn test_write_rgb_keeps_alpha() {
        let mut out = ChannelColor::new(0.1, 0.2, 0.3, 0.4);
        write_rgb(&PlatformColor::CLEAR, &mut out);
        assert_eq!(out, ChannelColor::new(0.1, 0.2, 0.3, 0.4));

        let half_blue = ChannelColor::new(0.0, 0.0, 1.0, 0.5);
        write_rgb(&PlatformColor::from(half_blue), &mut out);
        assert_eq!(out, ChannelColor::new(0.0, 0.0, 1.0, 0.4));
    }

    #[test]
    fn test_gray_profile_is_normalized_before_reading() {
        let white = PlatformColor::GenericGray { white: 1.0, alpha: 1.0 };
        let (r, g, b, a) = to_rgba(&white);
        assert_abs_diff_eq!(r, 1.0, epsilon = 1e-5);
        assert_eq!((r, r, a), (g, b, 1.0));

        let mid = PlatformColor::GenericGray { white: 0.5, alpha: 0.5 }.to_channel_color();
        assert_abs_diff_eq!(mid.red, 0.503, epsilon = 0.01);
        assert_eq!(mid.alpha, 0.5);

        // Opaque black is not the sentinel and must still be readable
        let black = PlatformColor::GenericGray { white: 0.0, alpha: 1.0 };
        assert_eq!(to_rgba(&black), (0.0, 0.0, 0.0, 1.0));
    }

    #[test]
    fn test_linear_profile_is_encoded() {
        let color = PlatformColor::LinearSrgb { red: 0.214, green: 1.0, blue: 0.0, alpha: 0.7 };
        let (r, g, b, a) = to_rgba(&color);
        assert_abs_diff_eq!(r, 0.5, epsilon = 0.01);
        assert_abs_diff_eq!(g, 1.0, epsilon = 1e-5);
        assert_eq!((b, a), (0.0, 0.7));
    }

    #[test]
    fn test_normalize_failure_passes_through() {
        assert_eq!(
            try_normalize(&PlatformColor::Pattern),
            Err(NormalizeError::Unsupported("pattern"))
        );
        assert_eq!(platform_normalize(&PlatformColor::Pattern), PlatformColor::Pattern);
        assert_eq!(to_rgba(&PlatformColor::Pattern), (0.0, 0.0, 0.0, 0.0));
    }

    #[test]
    fn test_srgb_passes_through_unchanged() {
        let color = PlatformColor::from(ChannelColor::new(0.25, 0.5, 0.75, 1.0));
        assert_eq!(platform_normalize(&color), color);
        assert_eq!(color.to_channel_color(), ChannelColor::new(0.25, 0.5, 0.75, 1.0));
    }
}
