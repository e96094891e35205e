//! Per-frame input snapshot consumed by the GUI library

use bitflags::bitflags;

use super::keys::{GuiKey, NavInput};
use crate::foundation::math::Vec2;

/// Number of mouse buttons tracked by the GUI library
pub const MOUSE_BUTTON_COUNT: usize = 5;

bitflags! {
    /// Feature switches owned by the application
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct ConfigFlags: u32 {
        /// Keyboard navigation
        const NAV_ENABLE_KEYBOARD = 1 << 0;
        /// Gamepad navigation
        const NAV_ENABLE_GAMEPAD = 1 << 1;
        /// Navigation may move the OS cursor
        const NAV_ENABLE_SET_MOUSE_POS = 1 << 2;
        /// Backends must not change the OS cursor
        const NO_MOUSE_CURSOR_CHANGE = 1 << 5;
    }
}

bitflags! {
    /// Capabilities advertised by the backends
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct BackendFlags: u32 {
        /// A gamepad is connected and mapped
        const HAS_GAMEPAD = 1 << 0;
        /// The platform honors requested cursor shapes
        const HAS_MOUSE_CURSORS = 1 << 1;
        /// The platform honors mouse position write-back
        const HAS_SET_MOUSE_POS = 1 << 2;
        /// The renderer honors per-command vertex offsets
        const RENDERER_HAS_VTX_OFFSET = 1 << 3;
    }
}

/// A discrete key transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    /// Canonical key
    pub key: GuiKey,
    /// Pressed (`true`) or released (`false`)
    pub down: bool,
    /// Platform key code after untranslation, -1 when not applicable
    pub native_keycode: i32,
    /// Platform scancode, -1 when not applicable
    pub native_scancode: i32,
}

/// Clipboard traffic between the GUI library and the platform
///
/// The GUI library posts requests during a frame; the platform backend
/// services them at the start of the next frame.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClipboardExchange {
    pending_write: Option<String>,
    want_read: bool,
    text: Option<String>,
}

impl ClipboardExchange {
    /// Ask the platform to place `text` on the clipboard
    pub fn request_write(&mut self, text: impl Into<String>) {
        self.pending_write = Some(text.into());
    }

    /// Ask the platform to refresh [`text`](Self::text)
    pub fn request_read(&mut self) {
        self.want_read = true;
    }

    /// Clipboard contents from the last serviced read
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// Take the pending write request
    pub fn take_pending_write(&mut self) -> Option<String> {
        self.pending_write.take()
    }

    /// Take the pending read request
    pub fn take_read_request(&mut self) -> bool {
        std::mem::take(&mut self.want_read)
    }

    /// Store text read from the platform
    pub fn set_text(&mut self, text: Option<String>) {
        self.text = text;
    }
}

/// Mutable per-frame input state of the GUI library
#[derive(Debug, Clone)]
pub struct FrameInput {
    /// Application feature switches
    pub config_flags: ConfigFlags,
    /// Backend capabilities
    pub backend_flags: BackendFlags,
    /// Display size in logical units
    pub display_size: Vec2,
    /// Framebuffer pixels per logical unit
    pub display_framebuffer_scale: Vec2,
    /// Seconds since the previous frame
    pub delta_time: f32,
    /// Mouse position in logical units
    pub mouse_pos: Vec2,
    /// Mouse button down state, indexed by button
    pub mouse_down: [bool; MOUSE_BUTTON_COUNT],
    /// Vertical wheel delta accumulated this frame
    pub mouse_wheel: f32,
    /// Horizontal wheel delta accumulated this frame
    pub mouse_wheel_h: f32,
    /// The GUI library wants the OS cursor moved to [`mouse_pos`](Self::mouse_pos)
    pub want_set_mouse_pos: bool,
    /// The GUI library draws its own cursor
    pub mouse_draw_cursor: bool,
    /// Gamepad navigation values in `0.0..=1.0`, indexed by [`NavInput`]
    pub nav_inputs: [f32; NavInput::COUNT],
    /// Name of the platform backend
    pub backend_platform_name: Option<String>,
    /// Name of the renderer backend
    pub backend_renderer_name: Option<String>,
    /// Clipboard requests and contents
    pub clipboard: ClipboardExchange,
    key_events: Vec<KeyEvent>,
    input_characters: Vec<u32>,
}

impl Default for FrameInput {
    fn default() -> Self {
        Self {
            config_flags: ConfigFlags::empty(),
            backend_flags: BackendFlags::empty(),
            display_size: Vec2::zeros(),
            display_framebuffer_scale: Vec2::new(1.0, 1.0),
            delta_time: 1.0 / 60.0,
            mouse_pos: Self::invalid_mouse_pos(),
            mouse_down: [false; MOUSE_BUTTON_COUNT],
            mouse_wheel: 0.0,
            mouse_wheel_h: 0.0,
            want_set_mouse_pos: false,
            mouse_draw_cursor: false,
            nav_inputs: [0.0; NavInput::COUNT],
            backend_platform_name: None,
            backend_renderer_name: None,
            clipboard: ClipboardExchange::default(),
            key_events: Vec::new(),
            input_characters: Vec::new(),
        }
    }
}

impl FrameInput {
    /// Mouse position meaning "no mouse available"
    pub fn invalid_mouse_pos() -> Vec2 {
        Vec2::new(-f32::MAX, -f32::MAX)
    }

    /// Queue a key transition
    pub fn add_key_event(&mut self, key: GuiKey, down: bool) {
        self.add_key_event_with_native(key, down, -1, -1);
    }

    /// Queue a key transition carrying the platform's key code and scancode
    pub fn add_key_event_with_native(&mut self, key: GuiKey, down: bool, native_keycode: i32, native_scancode: i32) {
        self.key_events.push(KeyEvent {
            key,
            down,
            native_keycode,
            native_scancode,
        });
    }

    /// Queue a text input codepoint
    ///
    /// Zero is ignored, as is anything outside the Unicode scalar range.
    pub fn add_input_character(&mut self, codepoint: u32) {
        if codepoint != 0 && char::from_u32(codepoint).is_some() {
            self.input_characters.push(codepoint);
        }
    }

    /// Key transitions queued since the last drain
    pub fn key_events(&self) -> &[KeyEvent] {
        &self.key_events
    }

    /// Text input queued since the last drain
    pub fn input_characters(&self) -> &[u32] {
        &self.input_characters
    }

    /// Hand the queued key transitions to the GUI library
    pub fn drain_key_events(&mut self) -> std::vec::Drain<'_, KeyEvent> {
        self.key_events.drain(..)
    }

    /// Hand the queued text input to the GUI library
    pub fn drain_input_characters(&mut self) -> std::vec::Drain<'_, u32> {
        self.input_characters.drain(..)
    }

    /// Whether the mouse position is valid
    pub fn is_mouse_pos_valid(&self) -> bool {
        self.mouse_pos.x > -f32::MAX && self.mouse_pos.y > -f32::MAX
    }
}
