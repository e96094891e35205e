use std::collections::HashMap;

use super::{CursorMode, Key, Platform, PlatformEvent, StandardCursor};

/// Scripted window with no display behind it
///
/// Every query returns the matching public field. Events pushed with
/// [`push_event`](Self::push_event) are only kept while input is subscribed.
#[derive(Debug, Clone)]
pub struct HeadlessPlatform {
    /// Window size
    pub window_size: (i32, i32),
    /// Framebuffer size
    pub framebuffer_size: (i32, i32),
    /// Monitor content scale
    pub content_scale: (f32, f32),
    /// Cursor position
    pub cursor_pos: (f64, f64),
    /// Held mouse buttons
    pub mouse_buttons: [bool; 8],
    /// Input focus
    pub focused: bool,
    /// Cursor mode
    pub cursor_mode: CursorMode,
    /// Last cursor shape shown
    pub cursor: Option<StandardCursor>,
    /// Shapes that [`set_standard_cursor`](Platform::set_standard_cursor) rejects
    pub unavailable_cursors: Vec<StandardCursor>,
    /// Times [`release_cursors`](Platform::release_cursors) was called
    pub cursor_releases: u32,
    /// Clock value
    pub time: f64,
    /// Joystick axes, keyed by joystick index
    pub joystick_axes: HashMap<u32, Vec<f32>>,
    /// Joystick buttons, keyed by joystick index
    pub joystick_buttons: HashMap<u32, Vec<bool>>,
    /// Key names, keyed by scancode
    pub key_names: HashMap<i32, String>,
    /// Number of key name lookups performed
    pub key_name_lookups: std::cell::Cell<u32>,
    /// Clipboard bytes
    pub clipboard: Option<Vec<u8>>,
    /// Whether input events are delivered
    pub subscribed: bool,
    events: Vec<PlatformEvent>,
}

impl Default for HeadlessPlatform {
    fn default() -> Self {
        Self::new(1280, 720)
    }
}

impl HeadlessPlatform {
    /// Create a focused window whose framebuffer matches its size
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            window_size: (width, height),
            framebuffer_size: (width, height),
            content_scale: (1.0, 1.0),
            cursor_pos: (0.0, 0.0),
            mouse_buttons: [false; 8],
            focused: true,
            cursor_mode: CursorMode::Normal,
            cursor: None,
            unavailable_cursors: Vec::new(),
            cursor_releases: 0,
            time: 0.0,
            joystick_axes: HashMap::new(),
            joystick_buttons: HashMap::new(),
            key_names: HashMap::new(),
            key_name_lookups: std::cell::Cell::new(0),
            clipboard: None,
            subscribed: false,
            events: Vec::new(),
        }
    }

    /// Deliver an input event; dropped unless input is subscribed
    pub fn push_event(&mut self, event: PlatformEvent) {
        if self.subscribed {
            self.events.push(event);
        }
    }

    /// Number of events waiting to be drained
    pub fn pending_events(&self) -> usize {
        self.events.len()
    }
}

impl Platform for HeadlessPlatform {
    fn window_size(&self) -> (i32, i32) {
        self.window_size
    }

    fn framebuffer_size(&self) -> (i32, i32) {
        self.framebuffer_size
    }

    fn content_scale(&self) -> (f32, f32) {
        self.content_scale
    }

    fn cursor_pos(&self) -> (f64, f64) {
        self.cursor_pos
    }

    fn set_cursor_pos(&mut self, x: f64, y: f64) {
        self.cursor_pos = (x, y);
    }

    fn is_mouse_button_down(&self, button: usize) -> bool {
        self.mouse_buttons.get(button).copied().unwrap_or(false)
    }

    fn is_focused(&self) -> bool {
        self.focused
    }

    fn cursor_mode(&self) -> CursorMode {
        self.cursor_mode
    }

    fn set_cursor_mode(&mut self, mode: CursorMode) {
        self.cursor_mode = mode;
    }

    fn set_standard_cursor(&mut self, cursor: StandardCursor) -> bool {
        if self.unavailable_cursors.contains(&cursor) {
            return false;
        }
        self.cursor = Some(cursor);
        true
    }

    fn release_cursors(&mut self) {
        self.cursor_releases += 1;
        self.cursor = None;
    }

    fn time(&self) -> f64 {
        self.time
    }

    fn joystick_axes(&self, joystick: u32, out: &mut Vec<f32>) {
        out.clear();
        if let Some(axes) = self.joystick_axes.get(&joystick) {
            out.extend_from_slice(axes);
        }
    }

    fn joystick_buttons(&self, joystick: u32, out: &mut Vec<bool>) {
        out.clear();
        if let Some(buttons) = self.joystick_buttons.get(&joystick) {
            out.extend_from_slice(buttons);
        }
    }

    fn key_name(&self, _key: Key, scancode: i32) -> Option<String> {
        self.key_name_lookups.set(self.key_name_lookups.get() + 1);
        self.key_names.get(&scancode).cloned()
    }

    fn clipboard_text(&self) -> Option<Vec<u8>> {
        self.clipboard.clone()
    }

    fn set_clipboard_text(&mut self, text: &[u8]) {
        self.clipboard = Some(text.to_vec());
    }

    fn set_input_subscription(&mut self, enabled: bool) {
        self.subscribed = enabled;
        if !enabled {
            self.events.clear();
        }
    }

    fn drain_input_events(&mut self, out: &mut Vec<PlatformEvent>) {
        out.append(&mut self.events);
    }
}
