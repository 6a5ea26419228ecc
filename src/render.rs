//! Solid Color Rendering
//!
//! This module turns a single color into an image by running a solid fill
//! filter through a texture pipeline. The pipeline pieces are traits so the
//! renderer does not depend on a particular backend:
//! - [`TextureAllocator`] creates the empty input texture
//! - [`FilterPipelineExecutor`] runs the fill filter over it
//! - [`ImageCodec`] reads the result back as an image

use image::RgbaImage;

use crate::color::ChannelColor;
use crate::convert;
use crate::error::GpuError;

/// Texture dimensions in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextureSize {
    pub width: u32,
    pub height: u32,
}

impl TextureSize {
    /// A single pixel, the default render size
    pub const ONE_PIXEL: Self = Self::new(1, 1);

    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Number of pixels covered
    pub fn area(&self) -> u64 {
        self.width as u64 * self.height as u64
    }
}

impl Default for TextureSize {
    fn default() -> Self {
        Self::ONE_PIXEL
    }
}

/// Color space the fill color is written in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FillColorSpace {
    /// Write channels as given (gamma-encoded sRGB)
    #[default]
    Srgb,
    /// Convert RGB to linear light before writing
    Linear,
}

/// Uniforms for the solid color shader
#[repr(C, align(16))]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct SolidColorUniforms {
    pub color: [f32; 4],
}

/// Fill every pixel with one color
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolidColorFilter {
    pub color: ChannelColor,
    pub color_space: FillColorSpace,
}

impl SolidColorFilter {
    pub fn new(color: ChannelColor) -> Self {
        Self {
            color,
            color_space: FillColorSpace::default(),
        }
    }

    /// The color as it should be written to the texture
    pub fn fill_color(&self) -> [f32; 4] {
        match self.color_space {
            FillColorSpace::Srgb => self.color.to_array(),
            FillColorSpace::Linear => convert::srgb_to_linear_rgba(self.color.to_array()),
        }
    }

    pub fn uniforms(&self) -> SolidColorUniforms {
        SolidColorUniforms {
            color: self.fill_color(),
        }
    }
}

/// A filter submitted to a [`FilterPipelineExecutor`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FilterDescriptor {
    SolidColor(SolidColorFilter),
}

/// Creates empty textures
pub trait TextureAllocator {
    type Texture;

    /// Fails with [`GpuError::Allocation`] on an invalid size or when memory is exhausted
    fn empty_texture(&self, size: TextureSize) -> Result<Self::Texture, GpuError>;
}

/// Runs a filter over an input texture
pub trait FilterPipelineExecutor<T> {
    fn run(&self, input: T, filter: &FilterDescriptor) -> Result<T, GpuError>;
}

/// Converts textures to images
pub trait ImageCodec<T> {
    fn texture_to_image(&self, texture: &T) -> Result<RgbaImage, GpuError>;
}

/// Rasterizes flat colors into images.
///
/// Without an executor every render returns `None`. The renderer keeps no GPU
/// resources between calls.
pub struct SolidColorRenderer<'a, A: TextureAllocator> {
    allocator: &'a A,
    executor: Option<&'a dyn FilterPipelineExecutor<A::Texture>>,
    codec: &'a dyn ImageCodec<A::Texture>,
    color_space: FillColorSpace,
}

impl<'a, A: TextureAllocator> SolidColorRenderer<'a, A> {
    pub fn new(
        allocator: &'a A,
        executor: Option<&'a dyn FilterPipelineExecutor<A::Texture>>,
        codec: &'a dyn ImageCodec<A::Texture>,
    ) -> Self {
        Self {
            allocator,
            executor,
            codec,
            color_space: FillColorSpace::default(),
        }
    }

    pub fn set_color_space(&mut self, color_space: FillColorSpace) {
        self.color_space = color_space;
    }

    pub fn color_space(&self) -> FillColorSpace {
        self.color_space
    }

    /// Check if a filter executor is available
    pub fn is_available(&self) -> bool {
        self.executor.is_some()
    }

    /// Render `color` into a 1x1 image
    pub fn render_pixel(&self, color: ChannelColor) -> Option<RgbaImage> {
        self.render(color, TextureSize::ONE_PIXEL)
    }

    /// Render `color` into an image of `size`.
    ///
    /// Blocks until the pipeline finishes. Any failure is logged and yields `None`.
    pub fn render(&self, color: ChannelColor, size: TextureSize) -> Option<RgbaImage> {
        let executor = match self.executor {
            Some(executor) => executor,
            None => {
                log::debug!("No filter executor, skipping solid color render");
                return None;
            }
        };

        match self.try_render(executor, color, size) {
            Ok(image) => {
                log::debug!("Rendered solid color {:?} at {}x{}", color, size.width, size.height);
                Some(image)
            }
            Err(e) => {
                log::warn!("Solid color render failed: {}", e);
                None
            }
        }
    }

    fn try_render(
        &self,
        executor: &dyn FilterPipelineExecutor<A::Texture>,
        color: ChannelColor,
        size: TextureSize,
    ) -> Result<RgbaImage, GpuError> {
        let texture = self.allocator.empty_texture(size)?;
        let filter = FilterDescriptor::SolidColor(SolidColorFilter {
            color,
            color_space: self.color_space,
        });
        let output = executor.run(texture, &filter)?;
        self.codec.texture_to_image(&output)
    }
}

impl<'a, B> SolidColorRenderer<'a, B>
where
    B: TextureAllocator + FilterPipelineExecutor<B::Texture> + ImageCodec<B::Texture>,
{
    /// Use a backend that provides all three collaborators
    pub fn with_backend(backend: &'a B) -> Self {
        let executor: &'a dyn FilterPipelineExecutor<B::Texture> = backend;
        Self::new(backend, Some(executor), backend)
    }
}
