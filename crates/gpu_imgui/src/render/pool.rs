//! Double-buffered GPU resource pool
//!
//! ```text
//!   frame N:   available ──acquire──▶ in_use
//!   swap:      available ◀────────▶ in_use     (exchanged, not cleared)
//!   frame N+1: resources used in frame N are candidates again
//! ```
//!
//! A resource handed out during a frame is never handed out again in the same
//! frame, and items left over in `available` sit out the following frame.
//! The GPU may therefore still read last frame's buffers while this frame
//! writes different ones.

use log::trace;

use crate::gpu::{GpuBuffer, GpuDevice, GpuError, GpuResult};

/// Two-collection pool with one-frame quarantine
#[derive(Debug)]
pub struct SwapPool<T> {
    available: Vec<T>,
    in_use: Vec<T>,
}

impl<T> Default for SwapPool<T> {
    fn default() -> Self {
        Self {
            available: Vec::new(),
            in_use: Vec::new(),
        }
    }
}

impl<T> SwapPool<T> {
    /// Create an empty pool
    pub fn new() -> Self {
        Self::default()
    }

    /// Take an available item, or create one, and mark it in use
    ///
    /// `recycle` prepares a reused item; if it fails the item is returned to
    /// the available collection and the error propagated.
    pub fn acquire_with<E>(
        &mut self,
        create: impl FnOnce() -> Result<T, E>,
        recycle: impl FnOnce(&mut T) -> Result<(), E>,
    ) -> Result<&mut T, E> {
        let item = match self.available.pop() {
            Some(mut item) => {
                if let Err(err) = recycle(&mut item) {
                    self.available.push(item);
                    return Err(err);
                }
                item
            }
            None => create()?,
        };
        self.in_use.push(item);
        let last = self.in_use.len() - 1;
        Ok(&mut self.in_use[last])
    }

    /// Exchange the available and in-use collections
    pub fn swap(&mut self) {
        std::mem::swap(&mut self.available, &mut self.in_use);
    }

    /// Items that may be handed out this frame
    pub fn available(&self) -> &[T] {
        &self.available
    }

    /// Items handed out this frame
    pub fn in_use(&self) -> &[T] {
        &self.in_use
    }

    /// Items held by the pool
    pub fn total(&self) -> usize {
        self.available.len() + self.in_use.len()
    }

    /// Drop every item
    pub fn clear(&mut self) {
        self.available.clear();
        self.in_use.clear();
    }
}

impl<B: GpuBuffer> SwapPool<B> {
    /// Acquire a buffer holding at least `min_len` elements
    ///
    /// Reused buffers that are too small are grown; buffers never shrink.
    pub fn acquire_buffer(
        &mut self,
        min_len: usize,
        create: impl FnOnce(usize) -> GpuResult<B>,
    ) -> GpuResult<&mut B> {
        let len = min_len.max(1);
        self.acquire_with(
            || create(len),
            |buffer| {
                if buffer.len() < min_len {
                    buffer.allocate(min_len)?;
                }
                Ok(())
            },
        )
    }
}

/// Item counts of a [`ResourcePool`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PoolStats {
    /// Vertex buffers held
    pub vertex_buffers: usize,
    /// Index buffers held
    pub index_buffers: usize,
    /// Shader instances held
    pub shader_instances: usize,
}

/// Resources for one indexed draw: the current list's buffers and a fresh
/// shader instance
pub struct DrawBindings<'a, D: GpuDevice> {
    /// Vertex buffer of the current draw list
    pub vertex_buffer: &'a D::VertexBuffer,
    /// Index buffer of the current draw list
    pub index_buffer: &'a D::IndexBuffer,
    /// Shader instance for this draw only
    pub instance: &'a mut D::Instance,
}

/// Per-frame vertex buffers, index buffers and shader instances
pub struct ResourcePool<D: GpuDevice> {
    vertex_buffers: SwapPool<D::VertexBuffer>,
    index_buffers: SwapPool<D::IndexBuffer>,
    shader_instances: SwapPool<D::Instance>,
}

impl<D: GpuDevice> Default for ResourcePool<D> {
    fn default() -> Self {
        Self {
            vertex_buffers: SwapPool::new(),
            index_buffers: SwapPool::new(),
            shader_instances: SwapPool::new(),
        }
    }
}

impl<D: GpuDevice> ResourcePool<D> {
    /// Create an empty pool
    pub fn new() -> Self {
        Self::default()
    }

    /// Acquire a vertex buffer with room for `min_len` vertices
    pub fn acquire_vertex_buffer(&mut self, device: &D, min_len: usize) -> GpuResult<&mut D::VertexBuffer> {
        self.vertex_buffers.acquire_buffer(min_len, |len| device.create_vertex_buffer(len))
    }

    /// Acquire an index buffer with room for `min_len` indices
    pub fn acquire_index_buffer(&mut self, device: &D, min_len: usize) -> GpuResult<&mut D::IndexBuffer> {
        self.index_buffers.acquire_buffer(min_len, |len| device.create_index_buffer(len))
    }

    /// Acquire a shader instance
    pub fn acquire_shader_instance(&mut self, device: &D) -> GpuResult<&mut D::Instance> {
        self.shader_instances
            .acquire_with(|| device.create_shader_instance(), |_| Ok(()))
    }

    /// Acquire a shader instance and pair it with the buffers acquired last
    ///
    /// Fails if no vertex or index buffer was acquired since the last swap.
    pub fn acquire_draw_bindings(&mut self, device: &D) -> GpuResult<DrawBindings<'_, D>> {
        self.acquire_shader_instance(device)?;
        match (
            self.vertex_buffers.in_use.last(),
            self.index_buffers.in_use.last(),
            self.shader_instances.in_use.last_mut(),
        ) {
            (Some(vertex_buffer), Some(index_buffer), Some(instance)) => Ok(DrawBindings {
                vertex_buffer,
                index_buffer,
                instance,
            }),
            _ => Err(GpuError::InvalidData(
                "draw bindings requested before acquiring list buffers".to_string(),
            )),
        }
    }

    /// Vertex buffers held
    pub fn vertex_buffers(&self) -> &SwapPool<D::VertexBuffer> {
        &self.vertex_buffers
    }

    /// Index buffers held
    pub fn index_buffers(&self) -> &SwapPool<D::IndexBuffer> {
        &self.index_buffers
    }

    /// Shader instances held
    pub fn shader_instances(&self) -> &SwapPool<D::Instance> {
        &self.shader_instances
    }

    /// End the frame: everything used becomes available next frame
    pub fn swap(&mut self) {
        self.vertex_buffers.swap();
        self.index_buffers.swap();
        self.shader_instances.swap();
        trace!(
            "Resource pool swapped ({} vertex buffers, {} index buffers, {} instances available)",
            self.vertex_buffers.available().len(),
            self.index_buffers.available().len(),
            self.shader_instances.available().len()
        );
    }

    /// Items held by each pool
    pub fn stats(&self) -> PoolStats {
        PoolStats {
            vertex_buffers: self.vertex_buffers.total(),
            index_buffers: self.index_buffers.total(),
            shader_instances: self.shader_instances.total(),
        }
    }

    /// Drop every pooled resource
    pub fn clear(&mut self) {
        self.vertex_buffers.clear();
        self.index_buffers.clear();
        self.shader_instances.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gpu::recording::RecordingDevice;

    #[derive(Debug, PartialEq)]
    struct Slot(u32);

    #[test]
    fn test_acquired_items_are_quarantined_for_one_frame() {
        let mut pool = SwapPool::new();
        let mut next = 0;
        let mut create = || -> Result<Slot, ()> {
            next += 1;
            Ok(Slot(next))
        };

        pool.acquire_with(&mut create, |_| Ok(())).unwrap();
        pool.acquire_with(&mut create, |_| Ok(())).unwrap();
        assert!(pool.available().is_empty());
        pool.swap();

        // Frame 2 reuses one of frame 1's items, leaves the other
        let reused = pool.acquire_with(&mut create, |_| Ok(())).unwrap().0;
        assert_eq!(reused, 2);
        pool.swap();

        // The leftover from frame 1 is now in the in-use accumulator's
        // place and cannot be handed out this frame
        assert_eq!(pool.available(), &[Slot(2)]);
        assert_eq!(pool.in_use(), &[Slot(1)]);
        assert_eq!(pool.total(), 2);
    }

    #[test]
    fn test_failed_recycle_keeps_item() {
        let mut pool = SwapPool::new();
        pool.acquire_with(|| Ok::<_, GpuError>(Slot(1)), |_| Ok(())).unwrap();
        pool.swap();

        let result = pool.acquire_with(
            || Ok(Slot(2)),
            |_| Err(GpuError::UploadFailed("out of memory".to_string())),
        );
        assert!(result.is_err());
        assert_eq!(pool.available(), &[Slot(1)]);
        assert!(pool.in_use().is_empty());
    }

    #[test]
    fn test_reused_buffers_grow_but_never_shrink() {
        let device = RecordingDevice::new();
        let mut pool = ResourcePool::<RecordingDevice>::new();

        let small = pool.acquire_vertex_buffer(&device, 4).unwrap().id();
        let large = pool.acquire_vertex_buffer(&device, 64).unwrap().id();
        pool.swap();

        // Most recently released buffer comes back first
        let grown = pool.acquire_vertex_buffer(&device, 100).unwrap();
        assert_eq!(grown.id(), large);
        assert!(grown.len() >= 100);

        let reused = pool.acquire_vertex_buffer(&device, 1).unwrap();
        assert_eq!(reused.id(), small);
        assert_eq!(reused.len(), 4);

        assert_eq!(device.creation_counts().vertex_buffers, 2);
        assert!(pool.vertex_buffers().in_use().iter().all(|buffer| buffer.len() >= 4));
        assert_eq!(pool.vertex_buffers().in_use()[0].len(), 100);
    }

    #[test]
    fn test_index_buffers_cover_requested_length() {
        let device = RecordingDevice::new();
        let mut pool = ResourcePool::<RecordingDevice>::new();

        assert!(pool.acquire_index_buffer(&device, 0).unwrap().len() >= 1);
        assert_eq!(pool.acquire_index_buffer(&device, 300).unwrap().len(), 300);
        assert_eq!(pool.stats().index_buffers, 2);
    }

    #[test]
    fn test_draw_bindings_pair_last_buffers_with_fresh_instance() {
        let device = RecordingDevice::new();
        let mut pool = ResourcePool::<RecordingDevice>::new();
        assert!(pool.acquire_draw_bindings(&device).is_err());
        pool.swap();
        pool.clear();

        pool.acquire_vertex_buffer(&device, 4).unwrap();
        pool.acquire_index_buffer(&device, 6).unwrap();
        let vertex_id = pool.acquire_vertex_buffer(&device, 8).unwrap().id();
        let index_id = pool.acquire_index_buffer(&device, 12).unwrap().id();

        let first = pool.acquire_draw_bindings(&device).unwrap();
        assert_eq!(first.vertex_buffer.id(), vertex_id);
        assert_eq!(first.index_buffer.id(), index_id);
        let first_instance = first.instance.id;

        let second = pool.acquire_draw_bindings(&device).unwrap();
        assert_ne!(second.instance.id, first_instance);
        assert_eq!(pool.stats().shader_instances, 2);
    }
}
