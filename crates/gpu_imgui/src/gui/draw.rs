//! Draw-command model produced by the GUI library each frame
//!
//! ```text
//! DrawData
//!   ├── display_pos / display_size / framebuffer_scale
//!   └── draw_lists: [DrawList]
//!           ├── vtx_buffer: [DrawVert]   (GPU-ready, uploaded verbatim)
//!           ├── idx_buffer: [DrawIdx]
//!           └── cmd_buffer: [DrawCmd]    (clip rect, texture, index range)
//! ```

use std::fmt;
use std::rc::Rc;

use bitflags::bitflags;
use bytemuck::{Pod, Zeroable};

use crate::foundation::math::{Vec2, Vec4};
use crate::gpu::RenderStateEncoder;

/// Index type of GUI meshes
pub type DrawIdx = u16;

/// GUI vertex: position, texture coordinate and packed RGBA color
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct DrawVert {
    /// Position in logical display units
    pub pos: [f32; 2],
    /// Texture coordinate
    pub uv: [f32; 2],
    /// Color, packed as `0xAABBGGRR`
    pub col: u32,
}

impl DrawVert {
    /// Create a vertex
    pub const fn new(pos: [f32; 2], uv: [f32; 2], col: u32) -> Self {
        Self { pos, uv, col }
    }
}

/// Opaque texture identifier embedded in draw commands
///
/// The identifier never owns the texture it names; it is resolved through the
/// renderer's texture registry each time it is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TextureId(pub u64);

bitflags! {
    /// Render-state overrides requested through a user callback's data value
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct CallbackFlags: u32 {
        /// Set the scissor to the command's clip rectangle before the callback
        const SCISSOR = 0b01;
        /// Set the viewport to the command's clip rectangle before the callback
        const VIEWPORT = 0b10;
    }
}

impl CallbackFlags {
    /// Decode the auxiliary data value attached to a user callback
    ///
    /// Non-positive values request nothing; unknown bits are ignored.
    pub fn from_user_data(data: isize) -> Self {
        if data <= 0 {
            return Self::empty();
        }
        Self::from_bits_truncate(u32::try_from(data).unwrap_or(u32::MAX))
    }
}

/// User draw callback
///
/// Receives the draw list and command being executed and the encoder's
/// dynamic render state.
pub type UserCallback = Rc<dyn Fn(&DrawList, &DrawCmd, &mut dyn RenderStateEncoder)>;

/// Callback attached to a draw command in place of geometry
#[derive(Clone)]
pub enum DrawCallback {
    /// Reserved sentinel asking the renderer to re-apply its default state
    ResetRenderState,
    /// Application callback
    User {
        /// The callback
        callback: UserCallback,
        /// Auxiliary data; see [`CallbackFlags::from_user_data`]
        data: isize,
    },
}

impl fmt::Debug for DrawCallback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ResetRenderState => f.write_str("ResetRenderState"),
            Self::User { data, .. } => f.debug_struct("User").field("data", data).finish_non_exhaustive(),
        }
    }
}

/// A single draw command
#[derive(Debug, Clone)]
pub struct DrawCmd {
    /// Clip rectangle `(min_x, min_y, max_x, max_y)` in logical display units
    pub clip_rect: Vec4,
    /// Texture sampled by this command
    pub texture_id: TextureId,
    /// Offset added to every index
    pub vtx_offset: u32,
    /// First index in the list's index buffer
    pub idx_offset: u32,
    /// Number of indices
    pub elem_count: u32,
    /// Callback executed instead of drawing geometry
    pub callback: Option<DrawCallback>,
}

impl DrawCmd {
    /// Create a geometry command
    pub fn new(clip_rect: Vec4, texture_id: TextureId, idx_offset: u32, elem_count: u32) -> Self {
        Self {
            clip_rect,
            texture_id,
            vtx_offset: 0,
            idx_offset,
            elem_count,
            callback: None,
        }
    }

    /// Create a callback command
    pub fn with_callback(clip_rect: Vec4, callback: DrawCallback) -> Self {
        Self {
            clip_rect,
            texture_id: TextureId::default(),
            vtx_offset: 0,
            idx_offset: 0,
            elem_count: 0,
            callback: Some(callback),
        }
    }
}

/// One command buffer: vertices, indices and the commands drawing them
#[derive(Debug, Clone, Default)]
pub struct DrawList {
    /// Vertices
    pub vtx_buffer: Vec<DrawVert>,
    /// Indices
    pub idx_buffer: Vec<DrawIdx>,
    /// Commands, in submission order
    pub cmd_buffer: Vec<DrawCmd>,
}

/// Everything the GUI library wants drawn this frame
#[derive(Debug, Clone)]
pub struct DrawData {
    /// Top-left of the displayed region in logical units
    pub display_pos: Vec2,
    /// Size of the displayed region in logical units
    pub display_size: Vec2,
    /// Framebuffer pixels per logical unit
    pub framebuffer_scale: Vec2,
    /// Command buffers, back to front
    pub draw_lists: Vec<DrawList>,
}

impl Default for DrawData {
    fn default() -> Self {
        Self {
            display_pos: Vec2::zeros(),
            display_size: Vec2::zeros(),
            framebuffer_scale: Vec2::new(1.0, 1.0),
            draw_lists: Vec::new(),
        }
    }
}

impl DrawData {
    /// Total vertices across all lists
    pub fn total_vtx_count(&self) -> usize {
        self.draw_lists.iter().map(|list| list.vtx_buffer.len()).sum()
    }

    /// Total indices across all lists
    pub fn total_idx_count(&self) -> usize {
        self.draw_lists.iter().map(|list| list.idx_buffer.len()).sum()
    }

    /// Framebuffer extent in pixels, truncated toward zero
    pub fn framebuffer_size(&self) -> (i32, i32) {
        (
            (self.display_size.x * self.framebuffer_scale.x) as i32,
            (self.display_size.y * self.framebuffer_scale.y) as i32,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertex_layout_is_tightly_packed() {
        assert_eq!(std::mem::size_of::<DrawVert>(), 20);
        let vertex = DrawVert::new([1.0, 2.0], [0.5, 0.25], 0xFF00_00FF);
        let bytes = bytemuck::bytes_of(&vertex);
        assert_eq!(&bytes[16..20], &0xFF00_00FFu32.to_ne_bytes());
    }

    #[test]
    fn test_callback_flags_decoding() {
        assert_eq!(CallbackFlags::from_user_data(0), CallbackFlags::empty());
        assert_eq!(CallbackFlags::from_user_data(-3), CallbackFlags::empty());
        assert_eq!(CallbackFlags::from_user_data(1), CallbackFlags::SCISSOR);
        assert_eq!(CallbackFlags::from_user_data(2), CallbackFlags::VIEWPORT);
        assert_eq!(CallbackFlags::from_user_data(7), CallbackFlags::SCISSOR | CallbackFlags::VIEWPORT);
    }

    #[test]
    fn test_framebuffer_size_scales_display() {
        let data = DrawData {
            display_size: Vec2::new(640.0, 360.5),
            framebuffer_scale: Vec2::new(2.0, 2.0),
            ..DrawData::default()
        };
        assert_eq!(data.framebuffer_size(), (1280, 721));
    }
}
