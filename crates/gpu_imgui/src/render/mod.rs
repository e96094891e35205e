//! Renderer backend: GUI draw data to GPU draw calls
//!
//! ```text
//! DrawData ──▶ DrawListRenderer ──▶ CommandEncoder
//!                 ├── projection   (uniforms, once per frame)
//!                 ├── pool         (vertex/index buffers, shader instances)
//!                 ├── clip         (scissor/viewport per command)
//!                 └── textures     (TextureId -> texture or placeholder)
//! ```

pub mod clip;
pub mod pipeline;
pub mod pool;
pub mod projection;
mod renderer;
mod stats;
pub mod textures;

pub use clip::{clip_to_framebuffer, ClipRect, ClipSpace};
pub use pool::{DrawBindings, PoolStats, ResourcePool, SwapPool};
pub use projection::{ortho_projection, CoordinateSystem, VertUniforms};
pub use renderer::DrawListRenderer;
pub use stats::RenderStats;
pub use textures::TextureRegistry;
