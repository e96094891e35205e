//! Windowing layer seam
//!
//! The input translator reads window state and receives events through
//! [`Platform`]. [`HeadlessPlatform`] scripts that state for tests and
//! offscreen use; the `glfw` feature adds a GLFW-backed implementation.

mod events;
mod headless;
mod keycodes;

#[cfg(feature = "glfw")]
mod glfw_backend;

pub use events::{Action, Modifiers, PlatformEvent};
#[cfg(feature = "glfw")]
pub use glfw_backend::GlfwPlatform;
pub use headless::HeadlessPlatform;
pub use keycodes::Key;

/// Cursor visibility and capture mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CursorMode {
    /// Visible and free
    #[default]
    Normal,
    /// Invisible while over the window
    Hidden,
    /// Invisible and captured by the window
    Disabled,
}

/// Cursor shapes every windowing layer is expected to provide
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StandardCursor {
    /// Arrow
    Arrow,
    /// Text insertion beam
    IBeam,
    /// Crosshair
    Crosshair,
    /// Pointing hand
    Hand,
    /// Horizontal resize arrows
    HResize,
    /// Vertical resize arrows
    VResize,
}

/// Window and input-device queries used by the input translator
///
/// Sizes are `(width, height)`; positions are in window coordinates.
pub trait Platform {
    /// Window size in window coordinates
    fn window_size(&self) -> (i32, i32);

    /// Framebuffer size in pixels
    fn framebuffer_size(&self) -> (i32, i32);

    /// Content scale of the window's monitor
    fn content_scale(&self) -> (f32, f32);

    /// Cursor position in window coordinates
    fn cursor_pos(&self) -> (f64, f64);

    /// Move the cursor
    fn set_cursor_pos(&mut self, x: f64, y: f64);

    /// Whether the button is currently held; buttons are numbered from zero
    fn is_mouse_button_down(&self, button: usize) -> bool;

    /// Whether the window has input focus
    fn is_focused(&self) -> bool;

    /// Current cursor mode
    fn cursor_mode(&self) -> CursorMode;

    /// Change the cursor mode
    fn set_cursor_mode(&mut self, mode: CursorMode);

    /// Show a standard cursor shape; `false` when the shape is unavailable
    fn set_standard_cursor(&mut self, cursor: StandardCursor) -> bool;

    /// Release cached cursor objects
    fn release_cursors(&mut self) {}

    /// Seconds since the windowing layer was initialized
    fn time(&self) -> f64;

    /// Fill `out` with the joystick's axis values; empty when disconnected
    fn joystick_axes(&self, joystick: u32, out: &mut Vec<f32>);

    /// Fill `out` with the joystick's button states; empty when disconnected
    fn joystick_buttons(&self, joystick: u32, out: &mut Vec<bool>);

    /// Layout-dependent name of a printable key
    fn key_name(&self, key: Key, scancode: i32) -> Option<String>;

    /// Clipboard contents as raw bytes
    fn clipboard_text(&self) -> Option<Vec<u8>>;

    /// Replace the clipboard contents
    fn set_clipboard_text(&mut self, text: &[u8]);

    /// Start or stop delivering input events to [`drain_input_events`](Self::drain_input_events)
    fn set_input_subscription(&mut self, enabled: bool);

    /// Move pending input events into `out`
    fn drain_input_events(&mut self, out: &mut Vec<PlatformEvent>);
}
