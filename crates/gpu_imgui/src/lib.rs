//! # gpu_imgui
//!
//! Platform and renderer backends connecting an immediate-mode GUI library to
//! a windowing layer and a GPU abstraction.
//!
//! ## Frame flow
//!
//! ```text
//! Platform events ─▶ InputTranslator ─▶ FrameInput ─▶ GUI library
//!                                                        │
//!                  CommandEncoder ◀─ DrawListRenderer ◀─ DrawData
//! ```
//!
//! - [`input`]: window events and state to [`gui::FrameInput`]
//! - [`render`]: [`gui::DrawData`] to draw calls, with pooled buffers, clip
//!   rectangle projection and texture handle resolution
//! - [`gpu`] and [`platform`]: the seams to the graphics and windowing layers
//! - [`integration`]: both backends and the GUI context driven together
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use gpu_imgui::prelude::*;
//! use gpu_imgui::gpu::recording::{RecordingDevice, RecordingEncoder};
//!
//! fn main() -> Result<(), BackendError> {
//!     let mut platform = HeadlessPlatform::new(1280, 720);
//!     let mut gui = GuiIntegration::new(
//!         ReplayContext::default(),
//!         &mut platform,
//!         RecordingDevice::new(),
//!         &BackendConfig::default(),
//!     )?;
//!
//!     let mut encoder = RecordingEncoder::new();
//!     gui.new_frame(&mut platform)?;
//!     gui.render(&mut encoder)?;
//!     gui.dispose(&mut platform)
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(
    clippy::module_name_repetitions,
    clippy::similar_names,
    clippy::too_many_arguments,
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    clippy::cast_sign_loss,
    clippy::cast_possible_wrap
)]

pub mod config;
pub mod error;
pub mod foundation;
pub mod gpu;
pub mod gui;
pub mod input;
pub mod integration;
pub mod platform;
pub mod render;

pub use error::{BackendError, BackendResult};
pub use input::InputTranslator;
pub use integration::GuiIntegration;
pub use render::DrawListRenderer;

/// Common imports for backend users
pub mod prelude {
    pub use crate::{
        config::{BackendConfig, Config, PlatformConfig, RendererConfig},
        error::{BackendError, BackendResult},
        gpu::{CommandEncoder, GpuDevice, RenderStateEncoder},
        gui::{DrawData, FrameInput, GuiContext, ReplayContext, TextureId},
        input::InputTranslator,
        integration::GuiIntegration,
        platform::{HeadlessPlatform, Platform, PlatformEvent},
        render::{CoordinateSystem, DrawListRenderer},
    };
}
