//! GUI library model
//!
//! The immediate-mode GUI library is an external collaborator. This module
//! fixes the shape of what the backends exchange with it:
//!
//! - [`FrameInput`]: the per-frame input snapshot the platform backend fills
//! - [`DrawData`]: the per-frame draw-command list the renderer consumes
//! - [`GuiContext`]: the context lifetime and frame entry points
//!
//! [`ReplayContext`] is a headless context that replays recorded frames.

pub mod context;
pub mod draw;
pub mod io;
pub mod keys;
pub mod replay;

pub use context::{FontAtlasPixels, GuiContext};
pub use draw::{
    CallbackFlags, DrawCallback, DrawCmd, DrawData, DrawIdx, DrawList, DrawVert, TextureId,
    UserCallback,
};
pub use io::{BackendFlags, ClipboardExchange, ConfigFlags, FrameInput, KeyEvent, MOUSE_BUTTON_COUNT};
pub use keys::{GuiKey, MouseCursor, NavInput};
pub use replay::ReplayContext;
