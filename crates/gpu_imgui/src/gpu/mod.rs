//! GPU abstraction seam
//!
//! The renderer never talks to a graphics API directly. It creates resources
//! through [`GpuDevice`] and records work through [`CommandEncoder`]; an
//! application plugs in its own graphics layer by implementing these traits.
//!
//! ```text
//! DrawListRenderer ──creates──▶ GpuDevice ──▶ buffers, textures, pipeline,
//!        │                                     sampler, shader instances
//!        └──────records────────▶ CommandEncoder ──▶ viewport, scissor,
//!                                                   pipeline, draw_indexed
//! ```
//!
//! [`recording`] provides a CPU-side implementation that keeps every call for
//! inspection.

pub mod recording;

use std::any::Any;

use crate::gui::{DrawIdx, DrawVert};
use crate::render::pipeline::{PipelineDescriptor, SamplerDescriptor};
use crate::render::projection::VertUniforms;

/// Errors reported by the GPU abstraction
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum GpuError {
    /// A buffer, texture, pipeline or shader instance could not be created
    #[error("Resource creation failed: {0}")]
    ResourceCreationFailed(String),

    /// Data could not be written into a resource
    #[error("Upload failed: {0}")]
    UploadFailed(String),

    /// The data handed to the GPU abstraction was malformed
    #[error("Invalid data: {0}")]
    InvalidData(String),
}

/// Result type for GPU abstraction calls
pub type GpuResult<T> = Result<T, GpuError>;

/// Pixel formats accepted by [`GpuTexture::set_data`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextureFormat {
    /// 8-bit RGBA, normalized
    Rgba8Unorm,
}

impl TextureFormat {
    /// Bytes per pixel
    pub const fn bytes_per_pixel(self) -> usize {
        match self {
            Self::Rgba8Unorm => 4,
        }
    }
}

/// Viewport rectangle in framebuffer pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Viewport {
    /// Left edge
    pub x: u32,
    /// Top edge
    pub y: u32,
    /// Width
    pub width: u32,
    /// Height
    pub height: u32,
}

impl Viewport {
    /// Create a viewport
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self { x, y, width, height }
    }
}

/// Scissor rectangle in framebuffer pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScissorRect {
    /// Left edge
    pub x: i32,
    /// Top edge
    pub y: i32,
    /// Width
    pub width: u32,
    /// Height
    pub height: u32,
}

impl ScissorRect {
    /// Create a scissor rectangle
    pub const fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self { x, y, width, height }
    }
}

/// A typed GPU buffer that can grow but never shrinks
pub trait GpuBuffer {
    /// Element type stored in the buffer
    type Element: bytemuck::Pod;

    /// Capacity in elements
    fn len(&self) -> usize;

    /// Whether the buffer has zero capacity
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Reallocate storage for `len` elements, discarding the contents
    fn allocate(&mut self, len: usize) -> GpuResult<()>;

    /// Write `data` at the start of the buffer
    ///
    /// `data.len()` must not exceed [`len`](Self::len).
    fn write(&mut self, data: &[Self::Element]) -> GpuResult<()>;
}

/// A GPU texture
pub trait GpuTexture {
    /// Width in pixels
    fn width(&self) -> u32;

    /// Height in pixels
    fn height(&self) -> u32;

    /// Replace the texture contents and extent
    fn set_data(&mut self, pixels: &[u8], width: u32, height: u32, format: TextureFormat) -> GpuResult<()>;

    /// Whether the texture has no pixels to sample
    fn is_zero_sized(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }
}

/// Per-draw shader parameter bindings for the GUI shader
pub trait ShaderInstance<D: GpuDevice + ?Sized> {
    /// Bind the vertex buffer
    fn set_vertex_buffer(&mut self, buffer: &D::VertexBuffer);

    /// Bind the vertex uniforms (projection matrix)
    fn set_uniforms(&mut self, buffer: &D::UniformBuffer);

    /// Bind the sampled texture
    fn set_texture(&mut self, texture: &D::Texture);

    /// Bind the texture sampler
    fn set_sampler(&mut self, sampler: &D::Sampler);
}

/// Resource factory of the GPU abstraction
///
/// Creation takes `&self`: devices are expected to be cheap shared handles.
pub trait GpuDevice {
    /// Vertex buffer holding GUI vertices
    type VertexBuffer: GpuBuffer<Element = DrawVert>;
    /// Index buffer holding 16-bit GUI indices
    type IndexBuffer: GpuBuffer<Element = DrawIdx>;
    /// Uniform buffer holding the projection matrix
    type UniformBuffer: GpuBuffer<Element = VertUniforms>;
    /// Sampled texture
    type Texture: GpuTexture;
    /// Texture sampler
    type Sampler;
    /// Compiled pipeline state object
    type Pipeline;
    /// Shader parameter instance
    type Instance: ShaderInstance<Self>;

    /// Create a pipeline from a declarative render-state description
    fn create_pipeline(&self, descriptor: &PipelineDescriptor) -> GpuResult<Self::Pipeline>;

    /// Create a streaming vertex buffer with room for `len` vertices
    fn create_vertex_buffer(&self, len: usize) -> GpuResult<Self::VertexBuffer>;

    /// Create a streaming index buffer with room for `len` indices
    fn create_index_buffer(&self, len: usize) -> GpuResult<Self::IndexBuffer>;

    /// Create a streaming uniform buffer with room for `len` elements
    fn create_uniform_buffer(&self, len: usize) -> GpuResult<Self::UniformBuffer>;

    /// Create an empty texture
    fn create_texture(&self) -> GpuResult<Self::Texture>;

    /// Create a sampler
    fn create_sampler(&self, descriptor: &SamplerDescriptor) -> GpuResult<Self::Sampler>;

    /// Create a shader parameter instance for the GUI shader
    fn create_shader_instance(&self) -> GpuResult<Self::Instance>;
}

/// Dynamic render state that user draw callbacks may change
///
/// This part of the encoder is object safe so it can be handed to callbacks
/// stored inside draw commands. Callbacks needing more can downcast through
/// [`as_any_mut`](Self::as_any_mut).
pub trait RenderStateEncoder {
    /// Set the viewport
    fn set_viewport(&mut self, viewport: Viewport);

    /// Set the scissor rectangle
    fn set_scissor(&mut self, scissor: ScissorRect);

    /// Access the concrete encoder type
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

/// Command encoder of the GPU abstraction
pub trait CommandEncoder<D: GpuDevice + ?Sized>: RenderStateEncoder {
    /// Bind the pipeline together with its shader parameters
    fn set_pipeline(&mut self, pipeline: &D::Pipeline, instance: &D::Instance);

    /// Record an indexed draw with 16-bit indices
    fn draw_indexed(
        &mut self,
        index_buffer: &D::IndexBuffer,
        index_count: u32,
        instance_count: u32,
        first_index: u32,
        vertex_offset: i32,
        first_instance: u32,
    );
}
