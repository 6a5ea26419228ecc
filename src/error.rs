//! Errors raised by the texture, filter and image collaborators

use std::fmt;

/// Failure inside the GPU pipeline
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GpuError {
    /// No adapter matched the requested options
    NoAdapter(String),
    /// Device creation or shader setup failed
    Device(String),
    /// Invalid texture size or device memory exhausted
    Allocation(String),
    /// Shader, binding or queue failure while running a filter
    Pipeline(String),
    /// The texture could not be converted to an image
    Codec(String),
    /// Mapping a readback buffer failed
    Map(String),
}

impl fmt::Display for GpuError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GpuError::NoAdapter(msg) => write!(f, "no suitable adapter: {}", msg),
            GpuError::Device(msg) => write!(f, "device error: {}", msg),
            GpuError::Allocation(msg) => write!(f, "texture allocation failed: {}", msg),
            GpuError::Pipeline(msg) => write!(f, "filter pipeline failed: {}", msg),
            GpuError::Codec(msg) => write!(f, "image conversion failed: {}", msg),
            GpuError::Map(msg) => write!(f, "buffer mapping failed: {}", msg),
        }
    }
}

impl std::error::Error for GpuError {}
