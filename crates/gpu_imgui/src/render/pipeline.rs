//! Declarative render state for the GUI pipeline
//!
//! The GUI is drawn with one fixed pipeline: alpha blending, no culling, no
//! depth test or write, scissor enabled.

use std::mem::{offset_of, size_of};

use crate::gui::DrawVert;

/// Blend factor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlendFactor {
    /// 0
    Zero,
    /// 1
    One,
    /// Source alpha
    SrcAlpha,
    /// 1 - source alpha
    OneMinusSrcAlpha,
}

/// Blend equation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlendEquation {
    /// `src * src_factor + dst * dst_factor`
    Add,
}

/// Face culling modes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CullMode {
    /// No culling
    None,
    /// Cull front faces
    Front,
    /// Cull back faces
    Back,
}

/// Comparison used by depth and stencil tests
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareFunction {
    /// Never passes
    Never,
    /// Always passes
    Always,
    /// Passes when less
    Less,
    /// Passes when less or equal
    LessEqual,
}

/// Blend state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlendState {
    /// Equation for color and alpha
    pub equation: BlendEquation,
    /// Source color factor
    pub src_rgb: BlendFactor,
    /// Destination color factor
    pub dst_rgb: BlendFactor,
    /// Source alpha factor
    pub src_alpha: BlendFactor,
    /// Destination alpha factor
    pub dst_alpha: BlendFactor,
}

/// Depth and stencil state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DepthStencilState {
    /// Depth comparison
    pub depth_compare: CompareFunction,
    /// Whether depth is written
    pub depth_write: bool,
    /// Front-face stencil comparison
    pub stencil_compare: CompareFunction,
}

/// Vertex attribute format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VertexFormat {
    /// Two 32-bit floats
    Float32x2,
    /// Four normalized bytes
    Unorm8x4,
}

/// One vertex attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VertexAttribute {
    /// Shader location
    pub location: u32,
    /// Byte offset in the vertex
    pub offset: usize,
    /// Format
    pub format: VertexFormat,
}

/// Vertex buffer layout
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VertexLayout {
    /// Bytes between consecutive vertices
    pub stride: usize,
    /// Attributes
    pub attributes: Vec<VertexAttribute>,
}

impl VertexLayout {
    /// Layout of [`DrawVert`]: position, texture coordinate, color
    pub fn draw_vert() -> Self {
        Self {
            stride: size_of::<DrawVert>(),
            attributes: vec![
                VertexAttribute {
                    location: 0,
                    offset: offset_of!(DrawVert, pos),
                    format: VertexFormat::Float32x2,
                },
                VertexAttribute {
                    location: 1,
                    offset: offset_of!(DrawVert, uv),
                    format: VertexFormat::Float32x2,
                },
                VertexAttribute {
                    location: 2,
                    offset: offset_of!(DrawVert, col),
                    format: VertexFormat::Unorm8x4,
                },
            ],
        }
    }
}

/// Configuration for a graphics pipeline
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineDescriptor {
    /// Debug label
    pub label: &'static str,
    /// Blending; `None` disables it
    pub blend: Option<BlendState>,
    /// Face culling
    pub cull_mode: CullMode,
    /// Depth and stencil tests
    pub depth_stencil: DepthStencilState,
    /// Whether the scissor test is enabled
    pub scissor_test: bool,
    /// Vertex input layout
    pub vertex_layout: VertexLayout,
}

impl PipelineDescriptor {
    /// Render state for GUI overlays
    pub fn gui_overlay() -> Self {
        Self {
            label: "gui_overlay",
            blend: Some(BlendState {
                equation: BlendEquation::Add,
                src_rgb: BlendFactor::SrcAlpha,
                dst_rgb: BlendFactor::OneMinusSrcAlpha,
                src_alpha: BlendFactor::One,
                dst_alpha: BlendFactor::OneMinusSrcAlpha,
            }),
            cull_mode: CullMode::None,
            depth_stencil: DepthStencilState {
                depth_compare: CompareFunction::Always,
                depth_write: false,
                stencil_compare: CompareFunction::Always,
            },
            scissor_test: true,
            vertex_layout: VertexLayout::draw_vert(),
        }
    }
}

/// Texture filtering
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterMode {
    /// Nearest texel
    Nearest,
    /// Bilinear
    Linear,
}

/// Texture addressing outside `0..1`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressMode {
    /// Clamp to the edge texel
    ClampToEdge,
    /// Repeat
    Repeat,
}

/// Sampler configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SamplerDescriptor {
    /// Magnification and minification filter
    pub filter: FilterMode,
    /// Addressing mode for both axes
    pub address_mode: AddressMode,
}

impl SamplerDescriptor {
    /// Bilinear filtering, clamped to the edge
    pub const fn linear() -> Self {
        Self {
            filter: FilterMode::Linear,
            address_mode: AddressMode::ClampToEdge,
        }
    }
}

impl Default for SamplerDescriptor {
    fn default() -> Self {
        Self::linear()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gui_overlay_state() {
        let descriptor = PipelineDescriptor::gui_overlay();
        let blend = descriptor.blend.unwrap();
        assert_eq!(blend.src_rgb, BlendFactor::SrcAlpha);
        assert_eq!(blend.dst_alpha, BlendFactor::OneMinusSrcAlpha);
        assert_eq!(descriptor.cull_mode, CullMode::None);
        assert_eq!(descriptor.depth_stencil.depth_compare, CompareFunction::Always);
        assert!(!descriptor.depth_stencil.depth_write);
        assert!(descriptor.scissor_test);
    }

    #[test]
    fn test_vertex_layout_offsets() {
        let layout = VertexLayout::draw_vert();
        assert_eq!(layout.stride, 20);
        let offsets: Vec<_> = layout.attributes.iter().map(|a| a.offset).collect();
        assert_eq!(offsets, vec![0, 8, 16]);
    }
}
