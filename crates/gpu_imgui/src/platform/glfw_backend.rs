use glfw::{Context, Glfw, GlfwReceiver, JoystickId, MouseButton, PWindow, WindowEvent};

use super::{Action, CursorMode, Key, Modifiers, Platform, PlatformEvent, StandardCursor};

/// [`Platform`] backed by a GLFW window
///
/// Owns the window and its event receiver. [`poll_events`](Self::poll_events)
/// splits incoming events: input events go to the GUI while subscribed,
/// everything is also kept for the application in
/// [`take_window_events`](Self::take_window_events).
pub struct GlfwPlatform {
    glfw: Glfw,
    window: PWindow,
    events: GlfwReceiver<(f64, WindowEvent)>,
    input_queue: Vec<PlatformEvent>,
    window_events: Vec<WindowEvent>,
    subscribed: bool,
    saved_polling: Option<InputPolling>,
    cursor: Option<StandardCursor>,
}

impl GlfwPlatform {
    /// Wrap an existing window
    pub fn new(glfw: Glfw, window: PWindow, events: GlfwReceiver<(f64, WindowEvent)>) -> Self {
        Self {
            glfw,
            window,
            events,
            input_queue: Vec::new(),
            window_events: Vec::new(),
            subscribed: false,
            saved_polling: None,
            cursor: None,
        }
    }

    /// Poll GLFW and sort the received events
    pub fn poll_events(&mut self) {
        self.glfw.poll_events();
        for (_, event) in glfw::flush_messages(&self.events) {
            if self.subscribed {
                if let Some(input) = convert_event(&event) {
                    self.input_queue.push(input);
                }
            }
            self.window_events.push(event);
        }
    }

    /// Window events received since the last call
    pub fn take_window_events(&mut self) -> Vec<WindowEvent> {
        std::mem::take(&mut self.window_events)
    }

    /// Present the back buffer
    pub fn swap_buffers(&mut self) {
        self.window.swap_buffers();
    }

    /// Whether the user asked to close the window
    pub fn should_close(&self) -> bool {
        self.window.should_close()
    }

    /// The window
    pub fn window(&self) -> &PWindow {
        &self.window
    }

    /// The window, mutably
    pub fn window_mut(&mut self) -> &mut PWindow {
        &mut self.window
    }
}

impl Platform for GlfwPlatform {
    fn window_size(&self) -> (i32, i32) {
        self.window.get_size()
    }

    fn framebuffer_size(&self) -> (i32, i32) {
        self.window.get_framebuffer_size()
    }

    fn content_scale(&self) -> (f32, f32) {
        self.window.get_content_scale()
    }

    fn cursor_pos(&self) -> (f64, f64) {
        self.window.get_cursor_pos()
    }

    fn set_cursor_pos(&mut self, x: f64, y: f64) {
        self.window.set_cursor_pos(x, y);
    }

    fn is_mouse_button_down(&self, button: usize) -> bool {
        mouse_button(button).is_some_and(|button| self.window.get_mouse_button(button) == glfw::Action::Press)
    }

    fn is_focused(&self) -> bool {
        self.window.is_focused()
    }

    fn cursor_mode(&self) -> CursorMode {
        match self.window.get_cursor_mode() {
            glfw::CursorMode::Hidden => CursorMode::Hidden,
            glfw::CursorMode::Disabled => CursorMode::Disabled,
            _ => CursorMode::Normal,
        }
    }

    fn set_cursor_mode(&mut self, mode: CursorMode) {
        self.window.set_cursor_mode(match mode {
            CursorMode::Normal => glfw::CursorMode::Normal,
            CursorMode::Hidden => glfw::CursorMode::Hidden,
            CursorMode::Disabled => glfw::CursorMode::Disabled,
        });
    }

    fn set_standard_cursor(&mut self, cursor: StandardCursor) -> bool {
        if self.cursor == Some(cursor) {
            return true;
        }
        let shape = match cursor {
            StandardCursor::Arrow => glfw::StandardCursor::Arrow,
            StandardCursor::IBeam => glfw::StandardCursor::IBeam,
            StandardCursor::Crosshair => glfw::StandardCursor::Crosshair,
            StandardCursor::Hand => glfw::StandardCursor::Hand,
            StandardCursor::HResize => glfw::StandardCursor::HResize,
            StandardCursor::VResize => glfw::StandardCursor::VResize,
        };
        self.window.set_cursor(Some(glfw::Cursor::standard(shape)));
        self.cursor = Some(cursor);
        true
    }

    fn release_cursors(&mut self) {
        self.window.set_cursor(None);
        self.cursor = None;
    }

    fn time(&self) -> f64 {
        self.glfw.get_time()
    }

    fn joystick_axes(&self, joystick: u32, out: &mut Vec<f32>) {
        out.clear();
        if let Some(id) = joystick_id(joystick) {
            let joystick = self.glfw.get_joystick(id);
            if joystick.is_present() {
                out.extend(joystick.get_axes());
            }
        }
    }

    fn joystick_buttons(&self, joystick: u32, out: &mut Vec<bool>) {
        out.clear();
        if let Some(id) = joystick_id(joystick) {
            let joystick = self.glfw.get_joystick(id);
            if joystick.is_present() {
                out.extend(joystick.get_buttons().into_iter().map(|state| state != 0));
            }
        }
    }

    fn key_name(&self, _key: Key, scancode: i32) -> Option<String> {
        glfw::get_key_name(None, Some(scancode))
    }

    fn clipboard_text(&self) -> Option<Vec<u8>> {
        self.window.get_clipboard_string().map(String::into_bytes)
    }

    fn set_clipboard_text(&mut self, text: &[u8]) {
        self.window.set_clipboard_string(&String::from_utf8_lossy(text));
    }

    fn set_input_subscription(&mut self, enabled: bool) {
        let current = InputPolling::read(&self.window);
        next_polling(&mut self.saved_polling, current, enabled).apply(&mut self.window);
        self.subscribed = enabled;
        if !enabled {
            self.input_queue.clear();
        }
    }

    fn drain_input_events(&mut self, out: &mut Vec<PlatformEvent>) {
        out.append(&mut self.input_queue);
    }
}

/// Polling state of the window's input event kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
struct InputPolling {
    key: bool,
    character: bool,
    mouse_button: bool,
    scroll: bool,
}

impl InputPolling {
    const ALL: Self = Self {
        key: true,
        character: true,
        mouse_button: true,
        scroll: true,
    };

    fn read(window: &PWindow) -> Self {
        Self {
            key: window.is_key_polling(),
            character: window.is_char_polling(),
            mouse_button: window.is_mouse_button_polling(),
            scroll: window.is_scroll_polling(),
        }
    }

    fn apply(self, window: &mut PWindow) {
        window.set_key_polling(self.key);
        window.set_char_polling(self.character);
        window.set_mouse_button_polling(self.mouse_button);
        window.set_scroll_polling(self.scroll);
    }
}

/// Polling state to apply when the GUI subscription changes
///
/// Subscribing remembers what the application had enabled; unsubscribing
/// restores exactly that.
fn next_polling(saved: &mut Option<InputPolling>, current: InputPolling, subscribe: bool) -> InputPolling {
    if subscribe {
        saved.get_or_insert(current);
        InputPolling::ALL
    } else {
        saved.take().unwrap_or(current)
    }
}

fn convert_event(event: &WindowEvent) -> Option<PlatformEvent> {
    match *event {
        WindowEvent::MouseButton(button, action, mods) => Some(PlatformEvent::MouseButton {
            button: button as usize,
            action: convert_action(action),
            mods: convert_mods(mods),
        }),
        WindowEvent::Scroll(x, y) => Some(PlatformEvent::Scroll { x, y }),
        WindowEvent::Key(key, scancode, action, mods) => Some(PlatformEvent::Key {
            key: Key(key as i32),
            scancode,
            action: convert_action(action),
            mods: convert_mods(mods),
        }),
        WindowEvent::Char(character) => Some(PlatformEvent::Char(character as u32)),
        _ => None,
    }
}

const fn convert_action(action: glfw::Action) -> Action {
    match action {
        glfw::Action::Press => Action::Press,
        glfw::Action::Release => Action::Release,
        glfw::Action::Repeat => Action::Repeat,
    }
}

fn convert_mods(mods: glfw::Modifiers) -> Modifiers {
    let mut out = Modifiers::empty();
    out.set(Modifiers::SHIFT, mods.contains(glfw::Modifiers::Shift));
    out.set(Modifiers::CONTROL, mods.contains(glfw::Modifiers::Control));
    out.set(Modifiers::ALT, mods.contains(glfw::Modifiers::Alt));
    out.set(Modifiers::SUPER, mods.contains(glfw::Modifiers::Super));
    out
}

const fn mouse_button(index: usize) -> Option<MouseButton> {
    Some(match index {
        0 => MouseButton::Button1,
        1 => MouseButton::Button2,
        2 => MouseButton::Button3,
        3 => MouseButton::Button4,
        4 => MouseButton::Button5,
        5 => MouseButton::Button6,
        6 => MouseButton::Button7,
        7 => MouseButton::Button8,
        _ => return None,
    })
}

const fn joystick_id(index: u32) -> Option<JoystickId> {
    Some(match index {
        0 => JoystickId::Joystick1,
        1 => JoystickId::Joystick2,
        2 => JoystickId::Joystick3,
        3 => JoystickId::Joystick4,
        4 => JoystickId::Joystick5,
        5 => JoystickId::Joystick6,
        6 => JoystickId::Joystick7,
        7 => JoystickId::Joystick8,
        8 => JoystickId::Joystick9,
        9 => JoystickId::Joystick10,
        10 => JoystickId::Joystick11,
        11 => JoystickId::Joystick12,
        12 => JoystickId::Joystick13,
        13 => JoystickId::Joystick14,
        14 => JoystickId::Joystick15,
        15 => JoystickId::Joystick16,
        _ => return None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsubscribe_restores_application_polling() {
        let app = InputPolling {
            key: true,
            scroll: true,
            ..InputPolling::default()
        };
        let mut saved = None;

        assert_eq!(next_polling(&mut saved, app, true), InputPolling::ALL);
        // Subscribing twice must not overwrite what the application had
        assert_eq!(next_polling(&mut saved, InputPolling::ALL, true), InputPolling::ALL);
        assert_eq!(next_polling(&mut saved, InputPolling::ALL, false), app);
        assert!(saved.is_none());
    }

    #[test]
    fn test_unsubscribe_without_subscription_keeps_state() {
        let app = InputPolling {
            character: true,
            ..InputPolling::default()
        };
        let mut saved = None;
        assert_eq!(next_polling(&mut saved, app, false), app);
    }
}
