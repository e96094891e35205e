use log::{debug, info, trace};

use super::cursor::{standard_cursor_for, CursorTransform};
use super::gamepad::map_gamepad_navigation;
use super::keymap::{gui_key_for, untranslate_key};
use crate::config::PlatformConfig;
use crate::error::{BackendError, BackendResult};
use crate::foundation::math::{safe_div, Vec2};
use crate::foundation::time::DeltaTimer;
use crate::gui::{BackendFlags, ConfigFlags, FrameInput, GuiKey, MouseCursor, MOUSE_BUTTON_COUNT};
use crate::platform::{Action, CursorMode, Modifiers, Platform, PlatformEvent, StandardCursor};

/// Name reported to the GUI library as the platform backend
pub const PLATFORM_BACKEND_NAME: &str = "gpu_imgui_platform";

/// Translates window events and state into the GUI library's [`FrameInput`]
///
/// Construction subscribes to the platform's input events (unless
/// [`PlatformConfig::install_callbacks`] is off) and [`dispose`](Self::dispose)
/// unsubscribes. Every operation after disposal fails with
/// [`BackendError::Disposed`].
#[derive(Debug)]
pub struct InputTranslator {
    config: PlatformConfig,
    timer: DeltaTimer,
    mouse_just_pressed: [bool; MOUSE_BUTTON_COUNT],
    last_cursor: Option<Option<MouseCursor>>,
    axes: Vec<f32>,
    buttons: Vec<bool>,
    events: Vec<PlatformEvent>,
    disposed: bool,
}

impl InputTranslator {
    /// Attach to a window and advertise the platform capabilities
    pub fn new<P: Platform + ?Sized>(platform: &mut P, io: &mut FrameInput, config: &PlatformConfig) -> Self {
        io.backend_flags |= BackendFlags::HAS_MOUSE_CURSORS | BackendFlags::HAS_SET_MOUSE_POS;
        io.backend_platform_name = Some(PLATFORM_BACKEND_NAME.to_string());
        io.config_flags.set(ConfigFlags::NAV_ENABLE_KEYBOARD, config.nav_enable_keyboard);
        io.config_flags.set(ConfigFlags::NAV_ENABLE_GAMEPAD, config.nav_enable_gamepad);
        if config.no_mouse_cursor_change {
            io.config_flags |= ConfigFlags::NO_MOUSE_CURSOR_CHANGE;
        }

        if config.install_callbacks {
            platform.set_input_subscription(true);
        }

        info!(
            "Input translator attached (callbacks: {}, gamepad navigation: {})",
            config.install_callbacks, config.nav_enable_gamepad
        );

        Self {
            config: config.clone(),
            timer: DeltaTimer::new(config.fallback_delta_time),
            mouse_just_pressed: [false; MOUSE_BUTTON_COUNT],
            last_cursor: None,
            axes: Vec::new(),
            buttons: Vec::new(),
            events: Vec::new(),
            disposed: false,
        }
    }

    /// Whether [`dispose`](Self::dispose) has run
    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    fn ensure_alive(&self) -> BackendResult<()> {
        if self.disposed {
            return Err(BackendError::Disposed("InputTranslator"));
        }
        Ok(())
    }

    /// Apply one input event to the frame input
    ///
    /// Applications that disabled [`PlatformConfig::install_callbacks`] call
    /// this with the events they receive.
    pub fn handle_event<P: Platform + ?Sized>(
        &mut self,
        platform: &P,
        io: &mut FrameInput,
        event: &PlatformEvent,
    ) -> BackendResult<()> {
        self.ensure_alive()?;

        match *event {
            PlatformEvent::MouseButton { button, action, .. } => {
                if action == Action::Press && button < MOUSE_BUTTON_COUNT {
                    self.mouse_just_pressed[button] = true;
                }
            }
            PlatformEvent::Scroll { x, y } => {
                io.mouse_wheel_h += x as f32;
                io.mouse_wheel += y as f32;
            }
            PlatformEvent::Key { key, scancode, action, mods } => {
                if action == Action::Repeat {
                    return Ok(());
                }
                update_key_modifiers(io, mods);

                let keycode = untranslate_key(key, scancode, |key, scancode| platform.key_name(key, scancode));
                let gui_key = gui_key_for(keycode);
                io.add_key_event_with_native(gui_key, action == Action::Press, keycode.0, scancode);
                trace!("Key {:?} -> {:?} ({:?})", key, gui_key, action);
            }
            PlatformEvent::Char(codepoint) => io.add_input_character(codepoint),
        }
        Ok(())
    }

    /// Apply every event the platform delivered since the last call
    pub fn pump_events<P: Platform + ?Sized>(&mut self, platform: &mut P, io: &mut FrameInput) -> BackendResult<usize> {
        self.ensure_alive()?;

        let mut events = std::mem::take(&mut self.events);
        platform.drain_input_events(&mut events);
        let count = events.len();
        for event in events.drain(..) {
            self.handle_event(&*platform, io, &event)?;
        }
        self.events = events;
        Ok(count)
    }

    /// Refresh the frame input from the window before the GUI library's frame
    ///
    /// `requested_cursor` is the cursor the GUI library asked for in the
    /// previous frame; `None` hides the OS cursor.
    pub fn new_frame<P: Platform + ?Sized>(
        &mut self,
        platform: &mut P,
        io: &mut FrameInput,
        requested_cursor: Option<MouseCursor>,
    ) -> BackendResult<()> {
        self.ensure_alive()?;

        let (fb_width, fb_height) = platform.framebuffer_size();
        let (scale_x, scale_y) = platform.content_scale();
        let framebuffer_size = Vec2::new(fb_width as f32, fb_height as f32);
        let content_scale = Vec2::new(scale_x, scale_y);
        io.display_size = safe_div(framebuffer_size, content_scale);
        io.display_framebuffer_scale = content_scale;

        io.delta_time = self.timer.tick(platform.time());

        self.update_mouse_pos_and_buttons(platform, io, framebuffer_size, content_scale);
        self.update_mouse_cursor(platform, io, requested_cursor);
        self.update_gamepads(&*platform, io);
        service_clipboard(platform, io);
        Ok(())
    }

    fn update_mouse_pos_and_buttons<P: Platform + ?Sized>(
        &mut self,
        platform: &mut P,
        io: &mut FrameInput,
        framebuffer_size: Vec2,
        content_scale: Vec2,
    ) {
        let previous_pos = io.mouse_pos;
        io.mouse_pos = FrameInput::invalid_mouse_pos();

        let (window_width, window_height) = platform.window_size();
        let transform = CursorTransform::new(
            Vec2::new(window_width as f32, window_height as f32),
            framebuffer_size,
            content_scale,
        );

        // A press shorter than one frame still reads as down this frame
        for (button, just_pressed) in self.mouse_just_pressed.iter_mut().enumerate() {
            io.mouse_down[button] = *just_pressed || platform.is_mouse_button_down(button);
            *just_pressed = false;
        }

        if io.want_set_mouse_pos && platform.is_focused() {
            let target = transform.to_os(previous_pos);
            platform.set_cursor_pos(f64::from(target.x), f64::from(target.y));
        }

        let (cursor_x, cursor_y) = platform.cursor_pos();
        io.mouse_pos = transform.to_gui(Vec2::new(cursor_x as f32, cursor_y as f32));
    }

    fn update_mouse_cursor<P: Platform + ?Sized>(
        &mut self,
        platform: &mut P,
        io: &FrameInput,
        requested_cursor: Option<MouseCursor>,
    ) {
        if io.config_flags.contains(ConfigFlags::NO_MOUSE_CURSOR_CHANGE)
            || platform.cursor_mode() == CursorMode::Disabled
        {
            return;
        }

        match requested_cursor {
            Some(cursor) if !io.mouse_draw_cursor => {
                let shape = standard_cursor_for(cursor);
                if !platform.set_standard_cursor(shape) {
                    if self.last_cursor != Some(requested_cursor) {
                        debug!("Cursor shape {:?} unavailable, using arrow", shape);
                    }
                    let arrow_set = platform.set_standard_cursor(StandardCursor::Arrow);
                    if !arrow_set && self.last_cursor != Some(requested_cursor) {
                        debug!("Arrow cursor unavailable, keeping the current OS cursor");
                    }
                }
                platform.set_cursor_mode(CursorMode::Normal);
            }
            _ => platform.set_cursor_mode(CursorMode::Hidden),
        }
        self.last_cursor = Some(requested_cursor);
    }

    fn update_gamepads<P: Platform + ?Sized>(&mut self, platform: &P, io: &mut FrameInput) {
        let joystick = self.config.gamepad.joystick;
        if io.config_flags.contains(ConfigFlags::NAV_ENABLE_GAMEPAD) {
            platform.joystick_axes(joystick, &mut self.axes);
            platform.joystick_buttons(joystick, &mut self.buttons);
        } else {
            self.axes.clear();
            self.buttons.clear();
        }
        map_gamepad_navigation(io, &self.axes, &self.buttons, &self.config.gamepad);
    }

    /// Detach from the window
    ///
    /// Unsubscribes from input events, releases cursors and withdraws the
    /// advertised capabilities. A second call fails with
    /// [`BackendError::Disposed`].
    pub fn dispose<P: Platform + ?Sized>(&mut self, platform: &mut P, io: &mut FrameInput) -> BackendResult<()> {
        self.ensure_alive()?;
        self.disposed = true;

        platform.set_input_subscription(false);
        platform.release_cursors();
        io.backend_platform_name = None;
        io.backend_flags
            .remove(BackendFlags::HAS_MOUSE_CURSORS | BackendFlags::HAS_SET_MOUSE_POS | BackendFlags::HAS_GAMEPAD);
        self.events = Vec::new();

        info!("Input translator detached");
        Ok(())
    }
}

fn update_key_modifiers(io: &mut FrameInput, mods: Modifiers) {
    io.add_key_event(GuiKey::ModCtrl, mods.contains(Modifiers::CONTROL));
    io.add_key_event(GuiKey::ModShift, mods.contains(Modifiers::SHIFT));
    io.add_key_event(GuiKey::ModAlt, mods.contains(Modifiers::ALT));
    io.add_key_event(GuiKey::ModSuper, mods.contains(Modifiers::SUPER));
}

fn service_clipboard<P: Platform + ?Sized>(platform: &mut P, io: &mut FrameInput) {
    if let Some(text) = io.clipboard.take_pending_write() {
        platform.set_clipboard_text(text.as_bytes());
    }
    if io.clipboard.take_read_request() {
        let text = platform
            .clipboard_text()
            .map(|bytes| String::from_utf8_lossy(&bytes).into_owned());
        io.clipboard.set_text(text);
    }
}
