//! wgpu Backend
//!
//! This module implements the texture, filter and image collaborators on a
//! headless wgpu device. Filters run as compute shaders over `Rgba16Float`
//! storage textures; results are read back to the CPU and converted to 8-bit.
//!
//! The collaborator impls block on the device, so they are native only. On
//! wasm32 a context can still be created, but rendering needs the browser's
//! event loop and is not offered.

#[cfg(not(target_arch = "wasm32"))]
use image::RgbaImage;
#[cfg(not(target_arch = "wasm32"))]
use wgpu::util::DeviceExt;

use crate::error::GpuError;
#[cfg(not(target_arch = "wasm32"))]
use crate::render::{
    FilterDescriptor, FilterPipelineExecutor, ImageCodec, SolidColorRenderer, SolidColorUniforms,
    TextureAllocator, TextureSize,
};

/// Texture format used for every texture the backend creates
pub const TEXTURE_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba16Float;

/// Must match `@workgroup_size` in `shaders/solid_color.wgsl`
#[cfg(not(target_arch = "wasm32"))]
const WORKGROUP_SIZE: u32 = 8;

/// Rgba16Float is 8 bytes per pixel: 4 channels * 2 bytes per f16
const BYTES_PER_PIXEL: u64 = 8;

/// Row layout of a texture copied into a mappable buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadbackLayout {
    pub bytes_per_row_unpadded: u32,
    /// Rounded up to `COPY_BYTES_PER_ROW_ALIGNMENT`
    pub bytes_per_row_padded: u32,
    pub buffer_size: u64,
}

impl ReadbackLayout {
    /// Layout for a `width` x `height` texture, or an error when the buffer
    /// would exceed `max_buffer_size`
    pub fn new(width: u32, height: u32, max_buffer_size: u64) -> Result<Self, String> {
        let align = wgpu::COPY_BYTES_PER_ROW_ALIGNMENT as u64;
        let unpadded = width as u64 * BYTES_PER_PIXEL;
        let padded = unpadded.div_ceil(align) * align;
        let buffer_size = padded
            .checked_mul(height as u64)
            .ok_or_else(|| format!("Readback of {}x{} overflows", width, height))?;
        if buffer_size > max_buffer_size {
            return Err(format!(
                "Readback of {}x{} needs {} bytes, buffer limit is {}",
                width, height, buffer_size, max_buffer_size
            ));
        }
        // Both fit in u32 once the buffer fits, unless the limit itself is huge
        let row_size = |bytes: u64| {
            u32::try_from(bytes).map_err(|_| format!("Row of {} bytes is too large", bytes))
        };
        Ok(Self {
            bytes_per_row_unpadded: row_size(unpadded)?,
            bytes_per_row_padded: row_size(padded)?,
            buffer_size,
        })
    }
}

/// Strip row padding from Rgba16Float readback data and convert to RGBA8
pub fn unpad_rgba16f(data: &[u8], width: u32, height: u32, bytes_per_row_padded: u32) -> Vec<u8> {
    let row_bytes = (width as u64 * BYTES_PER_PIXEL) as usize;
    let padded = (bytes_per_row_padded as usize).max(row_bytes).max(1);
    let mut rgba8_data = Vec::with_capacity(width as usize * height as usize * 4);
    for row in data.chunks_exact(padded).take(height as usize) {
        for f16_bytes in row[..row_bytes].chunks_exact(2) {
            let value = half::f16::from_le_bytes([f16_bytes[0], f16_bytes[1]]).to_f32();
            // Convert 0.0-1.0 float to 0-255 u8, clamping for safety
            rgba8_data.push((value * 255.0).round().clamp(0.0, 255.0) as u8);
        }
    }
    rgba8_data
}

/// Options for [`GpuContext::new`]
#[derive(Debug, Clone)]
pub struct GpuConfig {
    pub power_preference: wgpu::PowerPreference,
    /// Use a software adapter, useful for CI without a GPU
    pub force_fallback_adapter: bool,
    pub label: String,
    /// Upper bound on texture width and height, below the adapter limit
    pub max_texture_size: Option<u32>,
}

impl GpuConfig {
    /// Validate that parameters are in acceptable ranges
    pub fn validate(&self) -> Result<(), String> {
        if self.label.is_empty() {
            return Err("Label must not be empty".to_string());
        }
        if self.max_texture_size == Some(0) {
            return Err("Max texture size must be positive".to_string());
        }
        Ok(())
    }
}

impl Default for GpuConfig {
    fn default() -> Self {
        Self {
            power_preference: wgpu::PowerPreference::default(),
            force_fallback_adapter: false,
            label: "gpu_color".to_string(),
            max_texture_size: None,
        }
    }
}

/// Headless device plus the solid color compute pipeline
pub struct GpuContext {
    device: wgpu::Device,
    queue: wgpu::Queue,
    max_texture_dimension: u32,
    max_buffer_size: u64,
    solid_color_pipeline: wgpu::ComputePipeline,
    solid_color_layout: wgpu::BindGroupLayout,
}

impl GpuContext {
    /// Create a device and compile the filter pipelines.
    ///
    /// Fails with [`GpuError::NoAdapter`] when no adapter supports compute shaders.
    pub async fn new(config: &GpuConfig) -> Result<Self, GpuError> {
        config.validate().map_err(GpuError::Device)?;
        log::info!("🔧 GpuContext::new() starting...");

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor::default());

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: config.power_preference,
                compatible_surface: None,
                force_fallback_adapter: config.force_fallback_adapter,
            })
            .await
            .map_err(|e| GpuError::NoAdapter(format!("{:?}", e)))?;

        let adapter_info = adapter.get_info();
        log::info!("✅ Adapter acquired: {:?} (backend: {:?})", adapter_info.name, adapter_info.backend);

        let downlevel = adapter.get_downlevel_capabilities();
        if !downlevel.flags.contains(wgpu::DownlevelFlags::COMPUTE_SHADERS) {
            return Err(GpuError::NoAdapter(format!(
                "{} does not support compute shaders",
                adapter_info.name
            )));
        }

        // Downlevel defaults still allow compute; take texture sizes from the adapter
        let device_limits = wgpu::Limits::downlevel_defaults().using_resolution(adapter.limits());
        let max_texture_dimension = match config.max_texture_size {
            Some(cap) => cap.min(device_limits.max_texture_dimension_2d),
            None => device_limits.max_texture_dimension_2d,
        };
        log::info!("📏 Max texture dimension: {}", max_texture_dimension);

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some(config.label.as_str()),
                required_features: wgpu::Features::empty(),
                required_limits: device_limits,
                memory_hints: Default::default(),
                trace: Default::default(),
                experimental_features: Default::default(),
            })
            .await
            .map_err(|e| GpuError::Device(format!("{:?}", e)))?;
        log::info!("✅ Device and queue created");

        let max_buffer_size = device.limits().max_buffer_size;
        log::info!("📏 Max buffer size: {}", max_buffer_size);

        device.push_error_scope(wgpu::ErrorFilter::Validation);
        let solid_color_layout = Self::create_solid_color_layout(&device);
        let solid_color_pipeline = Self::create_solid_color_pipeline(&device, &solid_color_layout);
        if let Some(err) = device.pop_error_scope().await {
            return Err(GpuError::Device(format!("Solid color pipeline: {}", err)));
        }
        log::info!("✅ Solid color pipeline created for format: {:?}", TEXTURE_FORMAT);

        Ok(Self {
            device,
            queue,
            max_texture_dimension,
            max_buffer_size,
            solid_color_pipeline,
            solid_color_layout,
        })
    }

    /// Blocking version of [`GpuContext::new`]
    #[cfg(not(target_arch = "wasm32"))]
    pub fn new_blocking(config: &GpuConfig) -> Result<Self, GpuError> {
        pollster::block_on(Self::new(config))
    }

    /// A renderer that uses this context for every collaborator
    #[cfg(not(target_arch = "wasm32"))]
    pub fn renderer(&self) -> SolidColorRenderer<'_, GpuContext> {
        SolidColorRenderer::with_backend(self)
    }

    pub fn max_texture_dimension(&self) -> u32 {
        self.max_texture_dimension
    }

    /// Largest buffer the device accepts, which bounds texture readback
    pub fn max_buffer_size(&self) -> u64 {
        self.max_buffer_size
    }

    /// Create bind group layout: input texture, output storage texture, uniforms
    fn create_solid_color_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
        device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Solid Color Bind Group Layout"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::COMPUTE,
                    ty: wgpu::BindingType::Texture {
                        multisampled: false,
                        view_dimension: wgpu::TextureViewDimension::D2,
                        sample_type: wgpu::TextureSampleType::Float { filterable: false },
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::COMPUTE,
                    ty: wgpu::BindingType::StorageTexture {
                        access: wgpu::StorageTextureAccess::WriteOnly,
                        format: TEXTURE_FORMAT,
                        view_dimension: wgpu::TextureViewDimension::D2,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 2,
                    visibility: wgpu::ShaderStages::COMPUTE,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                },
            ],
        })
    }

    fn create_solid_color_pipeline(
        device: &wgpu::Device,
        bind_group_layout: &wgpu::BindGroupLayout,
    ) -> wgpu::ComputePipeline {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Solid Color Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/solid_color.wgsl").into()),
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Solid Color Pipeline Layout"),
            bind_group_layouts: &[bind_group_layout],
            push_constant_ranges: &[],
        });

        device.create_compute_pipeline(&wgpu::ComputePipelineDescriptor {
            label: Some("Solid Color Pipeline"),
            layout: Some(&pipeline_layout),
            module: &shader,
            entry_point: Some("cs_main"),
            compilation_options: Default::default(),
            cache: None,
        })
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn create_texture(&self, width: u32, height: u32, label: &str) -> wgpu::Texture {
        self.device.create_texture(&wgpu::TextureDescriptor {
            label: Some(label),
            size: wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: TEXTURE_FORMAT,
            usage: wgpu::TextureUsages::TEXTURE_BINDING
                | wgpu::TextureUsages::STORAGE_BINDING
                | wgpu::TextureUsages::COPY_SRC
                | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        })
    }

    /// Block until the device reports errors captured since the matching push
    #[cfg(not(target_arch = "wasm32"))]
    fn pop_error(&self) -> Option<wgpu::Error> {
        pollster::block_on(self.device.pop_error_scope())
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn run_solid_color(
        &self,
        input: &wgpu::Texture,
        uniforms: SolidColorUniforms,
    ) -> wgpu::Texture {
        let (width, height) = (input.width(), input.height());
        let output = self.create_texture(width, height, "Solid Color Output");

        let uniform_buffer = self.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Solid Color Uniform Buffer"),
            contents: bytemuck::cast_slice(&[uniforms]),
            usage: wgpu::BufferUsages::UNIFORM,
        });

        let input_view = input.create_view(&wgpu::TextureViewDescriptor::default());
        let output_view = output.create_view(&wgpu::TextureViewDescriptor::default());
        let bind_group = self.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Solid Color Bind Group"),
            layout: &self.solid_color_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&input_view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::TextureView(&output_view),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: uniform_buffer.as_entire_binding(),
                },
            ],
        });

        let mut encoder = self.device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("Solid Color Encoder"),
        });
        {
            let mut compute_pass = encoder.begin_compute_pass(&wgpu::ComputePassDescriptor {
                label: Some("Solid Color Pass"),
                timestamp_writes: None,
            });
            compute_pass.set_pipeline(&self.solid_color_pipeline);
            compute_pass.set_bind_group(0, &bind_group, &[]);
            compute_pass.dispatch_workgroups(
                width.div_ceil(WORKGROUP_SIZE),
                height.div_ceil(WORKGROUP_SIZE),
                1,
            );
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        output
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl TextureAllocator for GpuContext {
    type Texture = wgpu::Texture;

    fn empty_texture(&self, size: TextureSize) -> Result<wgpu::Texture, GpuError> {
        if size.width == 0 || size.height == 0 {
            return Err(GpuError::Allocation(format!(
                "Invalid size {}x{}",
                size.width, size.height
            )));
        }
        if size.width > self.max_texture_dimension || size.height > self.max_texture_dimension {
            return Err(GpuError::Allocation(format!(
                "Size {}x{} exceeds max texture size {}",
                size.width, size.height, self.max_texture_dimension
            )));
        }
        // A texture that can never be read back is useless to the codec
        ReadbackLayout::new(size.width, size.height, self.max_buffer_size)
            .map_err(GpuError::Allocation)?;

        self.device.push_error_scope(wgpu::ErrorFilter::OutOfMemory);
        let texture = self.create_texture(size.width, size.height, "Empty Texture");
        if let Some(err) = self.pop_error() {
            return Err(GpuError::Allocation(err.to_string()));
        }

        log::debug!("Empty texture created: {}x{}, format: {:?}", size.width, size.height, TEXTURE_FORMAT);
        Ok(texture)
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl FilterPipelineExecutor<wgpu::Texture> for GpuContext {
    fn run(&self, input: wgpu::Texture, filter: &FilterDescriptor) -> Result<wgpu::Texture, GpuError> {
        self.device.push_error_scope(wgpu::ErrorFilter::OutOfMemory);
        self.device.push_error_scope(wgpu::ErrorFilter::Validation);

        let output = match filter {
            FilterDescriptor::SolidColor(solid) => self.run_solid_color(&input, solid.uniforms()),
        };

        // Scopes pop in reverse order of pushing
        let validation = self.pop_error();
        let out_of_memory = self.pop_error();
        if let Some(err) = validation.or(out_of_memory) {
            return Err(GpuError::Pipeline(err.to_string()));
        }

        log::debug!("Filter {:?} ran over {}x{} texture", filter, output.width(), output.height());
        Ok(output)
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl ImageCodec<wgpu::Texture> for GpuContext {
    /// Read the texture back to CPU as RGBA8.
    ///
    /// This is an expensive operation requiring GPU->CPU transfer.
    fn texture_to_image(&self, texture: &wgpu::Texture) -> Result<RgbaImage, GpuError> {
        if texture.format() != TEXTURE_FORMAT {
            return Err(GpuError::Codec(format!(
                "Unsupported texture format {:?}",
                texture.format()
            )));
        }

        let width = texture.width();
        let height = texture.height();
        let layout =
            ReadbackLayout::new(width, height, self.max_buffer_size).map_err(GpuError::Codec)?;

        self.device.push_error_scope(wgpu::ErrorFilter::OutOfMemory);
        self.device.push_error_scope(wgpu::ErrorFilter::Validation);

        let output_buffer = self.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Texture Readback Buffer"),
            size: layout.buffer_size,
            usage: wgpu::BufferUsages::COPY_DST | wgpu::BufferUsages::MAP_READ,
            mapped_at_creation: false,
        });

        let mut encoder = self.device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("Texture Readback Encoder"),
        });
        encoder.copy_texture_to_buffer(
            wgpu::TexelCopyTextureInfo {
                texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            wgpu::TexelCopyBufferInfo {
                buffer: &output_buffer,
                layout: wgpu::TexelCopyBufferLayout {
                    offset: 0,
                    bytes_per_row: Some(layout.bytes_per_row_padded),
                    rows_per_image: Some(height),
                },
            },
            wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
        );
        self.queue.submit(std::iter::once(encoder.finish()));

        let validation = self.pop_error();
        let out_of_memory = self.pop_error();
        if let Some(err) = validation.or(out_of_memory) {
            return Err(GpuError::Codec(err.to_string()));
        }

        let buffer_slice = output_buffer.slice(..);
        let (tx, rx) = futures::channel::oneshot::channel();
        buffer_slice.map_async(wgpu::MapMode::Read, move |result| {
            let _ = tx.send(result);
        });

        // Native backends only fire the map callback while the device is polled
        self.device
            .poll(wgpu::PollType::wait_indefinitely())
            .map_err(|e| GpuError::Map(format!("{:?}", e)))?;
        pollster::block_on(rx)
            .map_err(|_| GpuError::Map("Map callback dropped".to_string()))?
            .map_err(|e| GpuError::Map(format!("{:?}", e)))?;

        let mapped_data = buffer_slice.get_mapped_range();
        let rgba8_data = unpad_rgba16f(&mapped_data, width, height, layout.bytes_per_row_padded);
        drop(mapped_data);
        output_buffer.unmap();

        log::debug!("Texture read back: {}x{} pixels ({} bytes)", width, height, rgba8_data.len());
        RgbaImage::from_raw(width, height, rgba8_data)
            .ok_or_else(|| GpuError::Codec("Readback size mismatch".to_string()))
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;
    use crate::color::ChannelColor;

    /// Buffer limit of `Limits::downlevel_defaults()`
    const DOWNLEVEL_MAX_BUFFER: u64 = 256 << 20;

    #[test]
    fn test_readback_rows_are_aligned() {
        let one = ReadbackLayout::new(1, 1, DOWNLEVEL_MAX_BUFFER).expect("layout");
        assert_eq!(one.bytes_per_row_unpadded, 8);
        assert_eq!(one.bytes_per_row_padded, 256);
        assert_eq!(one.buffer_size, 256);

        let exact = ReadbackLayout::new(32, 2, DOWNLEVEL_MAX_BUFFER).expect("layout");
        assert_eq!(exact.bytes_per_row_padded, 256);
        assert_eq!(exact.buffer_size, 512);

        let over = ReadbackLayout::new(33, 3, DOWNLEVEL_MAX_BUFFER).expect("layout");
        assert_eq!(over.bytes_per_row_unpadded, 264);
        assert_eq!(over.bytes_per_row_padded, 512);
        assert_eq!(over.buffer_size, 1536);
    }

    #[test]
    fn test_readback_over_buffer_limit_is_rejected() {
        // 6000 * 8 pads to 48128 bytes per row, about 289 MB in total
        assert!(ReadbackLayout::new(6000, 6000, DOWNLEVEL_MAX_BUFFER).is_err());
        assert!(ReadbackLayout::new(4000, 4000, DOWNLEVEL_MAX_BUFFER).is_ok());
    }

    #[test]
    fn test_readback_size_does_not_overflow_u32() {
        let err = ReadbackLayout::new(u32::MAX, u32::MAX, u64::MAX);
        assert!(err.is_err(), "row size must not wrap: {:?}", err);
    }

    #[test]
    fn test_unpad_drops_row_padding() {
        // Width 3 is 24 bytes per row, padded to 256
        let (width, height, padded) = (3u32, 2u32, 256u32);
        let texel = |v: f32| half::f16::from_f32(v).to_le_bytes();
        let pixels: [[f32; 4]; 6] = [
            [1.0, 0.0, 0.0, 1.0],
            [0.0, 1.0, 0.0, 1.0],
            [0.0, 0.0, 1.0, 1.0],
            [0.5, 0.5, 0.5, 0.5],
            [-1.0, 2.0, 0.0, 1.0],
            [0.0, 0.0, 0.0, 0.0],
        ];
        let mut data = Vec::new();
        for row in pixels.chunks(width as usize) {
            let start = data.len();
            for channel in row.iter().flatten() {
                data.extend_from_slice(&texel(*channel));
            }
            // Padding holds values that would show up as 255 if kept
            while data.len() < start + padded as usize {
                data.extend_from_slice(&texel(1.0));
            }
        }

        let rgba8 = unpad_rgba16f(&data, width, height, padded);
        assert_eq!(rgba8.len(), (width * height * 4) as usize);
        assert_eq!(
            rgba8,
            vec![
                255, 0, 0, 255, 0, 255, 0, 255, 0, 0, 255, 255,
                128, 128, 128, 128, 0, 255, 0, 255, 0, 0, 0, 0,
            ]
        );
    }

    #[test]
    fn test_default_config_is_valid() {
        assert_eq!(GpuConfig::default().validate(), Ok(()));
    }

    #[test]
    fn test_config_validation() {
        let zero_cap = GpuConfig {
            max_texture_size: Some(0),
            ..Default::default()
        };
        assert!(zero_cap.validate().is_err());

        let no_label = GpuConfig {
            label: String::new(),
            ..Default::default()
        };
        assert!(no_label.validate().is_err());
    }

    fn context() -> GpuContext {
        let _ = env_logger::builder().is_test(true).try_init();
        GpuContext::new_blocking(&GpuConfig::default()).expect("GPU adapter")
    }

    #[test]
    #[ignore = "requires a GPU adapter"]
    fn test_render_red_pixel_on_gpu() {
        let gpu = context();
        let image = gpu.renderer().render_pixel(ChannelColor::RED).expect("image");
        assert_eq!(image.dimensions(), (1, 1));
        assert_eq!(image.get_pixel(0, 0).0, [255, 0, 0, 255]);
    }

    #[test]
    #[ignore = "requires a GPU adapter"]
    fn test_render_covers_partial_workgroups() {
        let gpu = context();
        let size = TextureSize::new(70, 9);
        let image = gpu
            .renderer()
            .render(ChannelColor::from_hex(0x00FF00), size)
            .expect("image");
        assert_eq!(image.dimensions(), (70, 9));
        assert!(image.pixels().all(|p| p.0 == [0, 255, 0, 255]));
    }

    #[test]
    #[ignore = "requires a GPU adapter"]
    fn test_oversized_texture_is_rejected() {
        let gpu = context();
        let too_big = TextureSize::new(gpu.max_texture_dimension() + 1, 1);
        assert!(matches!(gpu.empty_texture(too_big), Err(GpuError::Allocation(_))));
        assert!(gpu.renderer().render(ChannelColor::RED, too_big).is_none());
    }

    #[test]
    #[ignore = "requires a GPU adapter"]
    fn test_unreadable_texture_size_renders_none() {
        let gpu = context();
        let side = gpu.max_texture_dimension();
        if ReadbackLayout::new(side, side, gpu.max_buffer_size()).is_ok() {
            // The adapter can read back every texture it can allocate
            return;
        }
        let size = TextureSize::new(side, side);
        assert!(matches!(gpu.empty_texture(size), Err(GpuError::Allocation(_))));
        assert!(gpu.renderer().render(ChannelColor::RED, size).is_none());
    }
}
