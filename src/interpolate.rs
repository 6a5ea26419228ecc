//! Color Interpolation
//!
//! Linear blending between two colors and random color sampling.
//!
//! All colors here use the normalized 0.0-1.0 scale. Values in 0-255 should
//! be converted with [`ChannelColor::from_rgba8`] before blending.

use palette::{FromColor, Hsv, Srgb};
use rand::Rng;

use crate::color::ChannelColor;

/// Blend from `from` towards `to`.
///
/// `rate` is clamped to 0.0-1.0, where 0.0 yields `from` and 1.0 yields `to`.
/// A NaN rate counts as 0.0. Every channel, alpha included, is interpolated
/// with its own delta.
pub fn lerp(from: ChannelColor, to: ChannelColor, rate: f32) -> ChannelColor {
    let rate = if rate.is_nan() { 0.0 } else { rate.clamp(0.0, 1.0) };
    let mix = |f: f32, t: f32| f + (t - f) * rate;
    ChannelColor::new(
        mix(from.red, to.red),
        mix(from.green, to.green),
        mix(from.blue, to.blue),
        mix(from.alpha, to.alpha),
    )
}

impl ChannelColor {
    /// Blend towards `direction`, see [`lerp`]
    pub fn lerp(self, direction: ChannelColor, rate: f32) -> ChannelColor {
        lerp(self, direction, rate)
    }
}

/// Sample a bright, saturated opaque color from `rng`.
///
/// Hue covers the full circle in 256 steps; saturation and brightness are
/// drawn from 0.5-1.0 in steps of 1/256.
pub fn random_color<R: Rng>(rng: &mut R) -> ChannelColor {
    let hue = rng.gen_range(0..256u32) as f32 / 256.0 * 360.0;
    let saturation = rng.gen_range(0..128u32) as f32 / 256.0 + 0.5;
    let brightness = rng.gen_range(0..128u32) as f32 / 256.0 + 0.5;

    let hsv: Hsv = Hsv::new(hue, saturation, brightness);
    let rgb = Srgb::from_color(hsv);
    log::debug!("Random color: hue={} s={} v={} -> {:?}", hue, saturation, brightness, rgb);
    ChannelColor::new(rgb.red, rgb.green, rgb.blue, 1.0)
}
