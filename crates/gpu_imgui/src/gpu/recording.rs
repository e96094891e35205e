//! CPU-side GPU abstraction that records every call
//!
//! Used for headless frame capture and in tests: resources keep their data in
//! memory and [`RecordingEncoder`] keeps the command stream.

use std::any::Any;
use std::cell::RefCell;
use std::rc::Rc;

use super::{
    CommandEncoder, GpuBuffer, GpuDevice, GpuError, GpuResult, GpuTexture, RenderStateEncoder, ScissorRect,
    ShaderInstance, TextureFormat, Viewport,
};
use crate::gui::{DrawIdx, DrawVert};
use crate::render::pipeline::{PipelineDescriptor, SamplerDescriptor};
use crate::render::projection::VertUniforms;

/// Number of resources created, per kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CreationCounts {
    /// Pipelines
    pub pipelines: usize,
    /// Vertex buffers
    pub vertex_buffers: usize,
    /// Index buffers
    pub index_buffers: usize,
    /// Uniform buffers
    pub uniform_buffers: usize,
    /// Textures
    pub textures: usize,
    /// Samplers
    pub samplers: usize,
    /// Shader instances
    pub shader_instances: usize,
}

#[derive(Debug, Default)]
struct DeviceState {
    next_id: u64,
    counts: CreationCounts,
    fail_creation: bool,
}

impl DeviceState {
    fn allocate_id(&mut self, kind: &str) -> GpuResult<u64> {
        if self.fail_creation {
            return Err(GpuError::ResourceCreationFailed(format!("{kind} creation disabled")));
        }
        self.next_id += 1;
        Ok(self.next_id)
    }
}

/// Recording implementation of [`GpuDevice`]
///
/// Clones share their state, so a test can keep a handle to a device it
/// moved into a renderer.
#[derive(Debug, Clone, Default)]
pub struct RecordingDevice {
    state: Rc<RefCell<DeviceState>>,
}

impl RecordingDevice {
    /// Create a device
    pub fn new() -> Self {
        Self::default()
    }

    /// Resources created so far
    pub fn creation_counts(&self) -> CreationCounts {
        self.state.borrow().counts
    }

    /// Make every subsequent creation call fail
    pub fn set_fail_creation(&self, fail: bool) {
        self.state.borrow_mut().fail_creation = fail;
    }

    fn create<T>(
        &self,
        kind: &str,
        count: impl FnOnce(&mut CreationCounts),
        build: impl FnOnce(u64) -> T,
    ) -> GpuResult<T> {
        let mut state = self.state.borrow_mut();
        let id = state.allocate_id(kind)?;
        count(&mut state.counts);
        Ok(build(id))
    }
}

/// Buffer keeping its contents in memory
#[derive(Debug, Clone)]
pub struct RecordingBuffer<T> {
    id: u64,
    capacity: usize,
    contents: Vec<T>,
    allocations: usize,
}

impl<T> RecordingBuffer<T> {
    fn new(id: u64, capacity: usize) -> Self {
        Self {
            id,
            capacity,
            contents: Vec::new(),
            allocations: 1,
        }
    }

    /// Resource identifier
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Data from the last write
    pub fn contents(&self) -> &[T] {
        &self.contents
    }

    /// Number of storage allocations, including the initial one
    pub fn allocations(&self) -> usize {
        self.allocations
    }
}

impl<T: bytemuck::Pod> GpuBuffer for RecordingBuffer<T> {
    type Element = T;

    fn len(&self) -> usize {
        self.capacity
    }

    fn allocate(&mut self, len: usize) -> GpuResult<()> {
        self.capacity = len;
        self.contents.clear();
        self.allocations += 1;
        Ok(())
    }

    fn write(&mut self, data: &[T]) -> GpuResult<()> {
        if data.len() > self.capacity {
            return Err(GpuError::UploadFailed(format!(
                "{} elements written to buffer {} of capacity {}",
                data.len(),
                self.id,
                self.capacity
            )));
        }
        self.contents.clear();
        self.contents.extend_from_slice(data);
        Ok(())
    }
}

/// Identity and extent of a texture at the time it was bound
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextureSnapshot {
    /// Resource identifier
    pub id: u64,
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

/// Texture keeping its pixels in memory
#[derive(Debug, Clone)]
pub struct RecordingTexture {
    id: u64,
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl RecordingTexture {
    /// Resource identifier
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Pixel data
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Identity and extent
    pub fn snapshot(&self) -> TextureSnapshot {
        TextureSnapshot {
            id: self.id,
            width: self.width,
            height: self.height,
        }
    }
}

impl GpuTexture for RecordingTexture {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn set_data(&mut self, pixels: &[u8], width: u32, height: u32, format: TextureFormat) -> GpuResult<()> {
        let expected = width as usize * height as usize * format.bytes_per_pixel();
        if pixels.len() != expected {
            return Err(GpuError::InvalidData(format!(
                "{}x{} texture needs {} bytes, got {}",
                width,
                height,
                expected,
                pixels.len()
            )));
        }
        self.width = width;
        self.height = height;
        self.pixels = pixels.to_vec();
        Ok(())
    }
}

/// Recorded sampler
#[derive(Debug, Clone)]
pub struct RecordingSampler {
    /// Resource identifier
    pub id: u64,
    /// Creation parameters
    pub descriptor: SamplerDescriptor,
}

/// Recorded pipeline
#[derive(Debug, Clone)]
pub struct RecordingPipeline {
    /// Resource identifier
    pub id: u64,
    /// Creation parameters
    pub descriptor: PipelineDescriptor,
}

/// Recorded shader instance, remembering its bindings
#[derive(Debug, Clone, Default)]
pub struct RecordingInstance {
    /// Resource identifier
    pub id: u64,
    /// Bound vertex buffer
    pub vertex_buffer: Option<u64>,
    /// Bound uniform buffer
    pub uniforms: Option<u64>,
    /// Bound texture
    pub texture: Option<TextureSnapshot>,
    /// Bound sampler
    pub sampler: Option<u64>,
}

impl ShaderInstance<RecordingDevice> for RecordingInstance {
    fn set_vertex_buffer(&mut self, buffer: &RecordingBuffer<DrawVert>) {
        self.vertex_buffer = Some(buffer.id);
    }

    fn set_uniforms(&mut self, buffer: &RecordingBuffer<VertUniforms>) {
        self.uniforms = Some(buffer.id);
    }

    fn set_texture(&mut self, texture: &RecordingTexture) {
        self.texture = Some(texture.snapshot());
    }

    fn set_sampler(&mut self, sampler: &RecordingSampler) {
        self.sampler = Some(sampler.id);
    }
}

impl GpuDevice for RecordingDevice {
    type VertexBuffer = RecordingBuffer<DrawVert>;
    type IndexBuffer = RecordingBuffer<DrawIdx>;
    type UniformBuffer = RecordingBuffer<VertUniforms>;
    type Texture = RecordingTexture;
    type Sampler = RecordingSampler;
    type Pipeline = RecordingPipeline;
    type Instance = RecordingInstance;

    fn create_pipeline(&self, descriptor: &PipelineDescriptor) -> GpuResult<RecordingPipeline> {
        self.create("pipeline", |c| c.pipelines += 1, |id| RecordingPipeline {
            id,
            descriptor: descriptor.clone(),
        })
    }

    fn create_vertex_buffer(&self, len: usize) -> GpuResult<RecordingBuffer<DrawVert>> {
        self.create("vertex buffer", |c| c.vertex_buffers += 1, |id| RecordingBuffer::new(id, len))
    }

    fn create_index_buffer(&self, len: usize) -> GpuResult<RecordingBuffer<DrawIdx>> {
        self.create("index buffer", |c| c.index_buffers += 1, |id| RecordingBuffer::new(id, len))
    }

    fn create_uniform_buffer(&self, len: usize) -> GpuResult<RecordingBuffer<VertUniforms>> {
        self.create("uniform buffer", |c| c.uniform_buffers += 1, |id| RecordingBuffer::new(id, len))
    }

    fn create_texture(&self) -> GpuResult<RecordingTexture> {
        self.create("texture", |c| c.textures += 1, |id| RecordingTexture {
            id,
            width: 0,
            height: 0,
            pixels: Vec::new(),
        })
    }

    fn create_sampler(&self, descriptor: &SamplerDescriptor) -> GpuResult<RecordingSampler> {
        self.create("sampler", |c| c.samplers += 1, |id| RecordingSampler {
            id,
            descriptor: *descriptor,
        })
    }

    fn create_shader_instance(&self) -> GpuResult<RecordingInstance> {
        self.create("shader instance", |c| c.shader_instances += 1, |id| RecordingInstance {
            id,
            ..RecordingInstance::default()
        })
    }
}

/// A command recorded by [`RecordingEncoder`]
#[derive(Debug, Clone, PartialEq)]
pub enum RecordedCommand {
    /// Viewport change
    SetViewport(Viewport),
    /// Scissor change
    SetScissor(ScissorRect),
    /// Pipeline bind with the instance's bindings at that moment
    SetPipeline {
        /// Pipeline identifier
        pipeline: u64,
        /// Instance identifier
        instance: u64,
        /// Bound vertex buffer
        vertex_buffer: Option<u64>,
        /// Bound texture
        texture: Option<TextureSnapshot>,
    },
    /// Indexed draw
    DrawIndexed {
        /// Index buffer identifier
        index_buffer: u64,
        /// Index count
        index_count: u32,
        /// Instance count
        instance_count: u32,
        /// First index
        first_index: u32,
        /// Value added to each index
        vertex_offset: i32,
        /// First instance
        first_instance: u32,
    },
    /// Free-form marker, e.g. from a user callback
    Marker(String),
}

/// Encoder recording every command in order
#[derive(Debug, Clone, Default)]
pub struct RecordingEncoder {
    commands: Vec<RecordedCommand>,
}

impl RecordingEncoder {
    /// Create an empty encoder
    pub fn new() -> Self {
        Self::default()
    }

    /// Commands recorded so far
    pub fn commands(&self) -> &[RecordedCommand] {
        &self.commands
    }

    /// Take the recorded commands
    pub fn take_commands(&mut self) -> Vec<RecordedCommand> {
        std::mem::take(&mut self.commands)
    }

    /// Record a marker
    pub fn push_marker(&mut self, label: impl Into<String>) {
        self.commands.push(RecordedCommand::Marker(label.into()));
    }

    /// Recorded indexed draws
    pub fn draw_calls(&self) -> impl Iterator<Item = &RecordedCommand> {
        self.commands
            .iter()
            .filter(|command| matches!(command, RecordedCommand::DrawIndexed { .. }))
    }
}

impl RenderStateEncoder for RecordingEncoder {
    fn set_viewport(&mut self, viewport: Viewport) {
        self.commands.push(RecordedCommand::SetViewport(viewport));
    }

    fn set_scissor(&mut self, scissor: ScissorRect) {
        self.commands.push(RecordedCommand::SetScissor(scissor));
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

impl CommandEncoder<RecordingDevice> for RecordingEncoder {
    fn set_pipeline(&mut self, pipeline: &RecordingPipeline, instance: &RecordingInstance) {
        self.commands.push(RecordedCommand::SetPipeline {
            pipeline: pipeline.id,
            instance: instance.id,
            vertex_buffer: instance.vertex_buffer,
            texture: instance.texture,
        });
    }

    fn draw_indexed(
        &mut self,
        index_buffer: &RecordingBuffer<DrawIdx>,
        index_count: u32,
        instance_count: u32,
        first_index: u32,
        vertex_offset: i32,
        first_instance: u32,
    ) {
        self.commands.push(RecordedCommand::DrawIndexed {
            index_buffer: index_buffer.id,
            index_count,
            instance_count,
            first_index,
            vertex_offset,
            first_instance,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buffer_write_respects_capacity() {
        let device = RecordingDevice::new();
        let mut buffer = device.create_index_buffer(3).unwrap();
        buffer.write(&[0, 1, 2]).unwrap();
        assert_eq!(buffer.contents(), &[0, 1, 2]);
        assert!(buffer.write(&[0, 1, 2, 3]).is_err());

        buffer.allocate(8).unwrap();
        buffer.write(&[0, 1, 2, 3]).unwrap();
        assert_eq!(buffer.allocations(), 2);
    }

    #[test]
    fn test_texture_validates_pixel_count() {
        let device = RecordingDevice::new();
        let mut texture = device.create_texture().unwrap();
        assert!(texture.is_zero_sized());
        assert!(texture.set_data(&[0; 7], 1, 2, TextureFormat::Rgba8Unorm).is_err());
        texture.set_data(&[0; 8], 1, 2, TextureFormat::Rgba8Unorm).unwrap();
        assert_eq!((texture.width(), texture.height()), (1, 2));
    }

    #[test]
    fn test_clones_share_state() {
        let device = RecordingDevice::new();
        let observer = device.clone();
        device.create_texture().unwrap();
        device.create_shader_instance().unwrap();
        assert_eq!(observer.creation_counts().textures, 1);

        observer.set_fail_creation(true);
        assert!(matches!(
            device.create_texture(),
            Err(GpuError::ResourceCreationFailed(_))
        ));
    }
}
