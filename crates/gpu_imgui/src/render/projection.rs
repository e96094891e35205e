//! Orthographic projection for GUI geometry

use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

use crate::foundation::math::{Mat4, Vec2};

/// Clip-space Y convention of the target GPU abstraction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CoordinateSystem {
    /// Clip-space Y points up (OpenGL, Metal, D3D)
    #[default]
    YUp,
    /// Clip-space Y points down (Vulkan)
    YDown,
}

/// Vertex shader uniforms of the GUI pipeline
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct VertUniforms {
    /// Projection matrix, column-major
    pub proj_mtx: [[f32; 4]; 4],
}

impl VertUniforms {
    /// Uniforms holding `projection`
    pub fn new(projection: &Mat4) -> Self {
        Self {
            proj_mtx: (*projection).into(),
        }
    }
}

/// Projection mapping the displayed region onto clip space
///
/// `display_pos` maps to the top-left corner and `display_pos + display_size`
/// to the bottom-right. Depth passes through unchanged.
pub fn ortho_projection(display_pos: Vec2, display_size: Vec2, coordinate_system: CoordinateSystem) -> Mat4 {
    let left = display_pos.x;
    let right = display_pos.x + display_size.x;
    let (top, bottom) = match coordinate_system {
        CoordinateSystem::YUp => (display_pos.y, display_pos.y + display_size.y),
        CoordinateSystem::YDown => (display_pos.y + display_size.y, display_pos.y),
    };

    #[rustfmt::skip]
    let projection = Mat4::new(
        2.0 / (right - left), 0.0,                  0.0, (right + left) / (left - right),
        0.0,                  2.0 / (top - bottom), 0.0, (top + bottom) / (bottom - top),
        0.0,                  0.0,                  1.0, 0.0,
        0.0,                  0.0,                  0.0, 1.0,
    );
    projection
}
