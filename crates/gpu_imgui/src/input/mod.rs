//! Platform backend: window input to GUI input
//!
//! [`InputTranslator`] runs at the start of every frame and from the event
//! pump. The pieces it is built from are pure and usable on their own:
//!
//! - [`keymap`]: layout-aware key code translation
//! - [`cursor`]: OS and GUI cursor coordinate conversion
//! - [`gamepad`]: joystick to navigation input mapping

pub mod cursor;
pub mod gamepad;
pub mod keymap;
mod translator;

pub use cursor::CursorTransform;
pub use translator::{InputTranslator, PLATFORM_BACKEND_NAME};
