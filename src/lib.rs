//! GPU Color Library
//!
//! This crate provides the color layer of a GPU image-processing toolkit:
//! - A 4-channel color value with hex decoding
//! - Platform color normalization, RGBA and YUV conversion
//! - Linear interpolation and random sampling
//! - Rendering a solid color to an image through a compute filter pipeline
//!
//! The color math is pure and platform independent. Rendering goes through
//! the collaborator traits in [`render`]; [`GpuContext`] implements them on wgpu
//! for native targets.

pub mod color;
pub mod convert;
mod error;
pub mod gpu;
pub mod interpolate;
pub mod render;

pub use color::{ChannelColor, ColorParseError};
pub use convert::{platform_normalize, to_rgba, write_rgb, write_rgba, NormalizeError, PlatformColor, Yuv};
pub use error::GpuError;
pub use gpu::{GpuConfig, GpuContext};
pub use interpolate::{lerp, random_color};
pub use render::{
    FillColorSpace, FilterDescriptor, FilterPipelineExecutor, ImageCodec, SolidColorFilter,
    SolidColorRenderer, TextureAllocator, TextureSize,
};

/// Initialize panic hook for better error messages in WASM
#[cfg(target_arch = "wasm32")]
pub fn init_panic_hook() {
    console_error_panic_hook::set_once();
}

/// Initialize logging for WASM (logs go to browser console)
#[cfg(target_arch = "wasm32")]
pub fn init_logging() {
    // Fails only when a logger is already installed
    let _ = console_log::init_with_level(log::Level::Debug);
}

/// Initialize logging from `RUST_LOG`. Calling it twice is harmless.
#[cfg(not(target_arch = "wasm32"))]
pub fn init_logging() {
    if env_logger::try_init().is_ok() {
        log::info!("🚀 gpu_color logging initialized");
    }
}
