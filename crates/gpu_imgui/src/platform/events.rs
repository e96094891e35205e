//! Input events delivered by the windowing layer

use bitflags::bitflags;

use super::keycodes::Key;

/// Button or key transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Pressed
    Press,
    /// Released
    Release,
    /// Held long enough to auto-repeat
    Repeat,
}

bitflags! {
    /// Modifier keys held during an event
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Modifiers: u32 {
        /// Either shift key
        const SHIFT = 1 << 0;
        /// Either control key
        const CONTROL = 1 << 1;
        /// Either alt key
        const ALT = 1 << 2;
        /// Either super key
        const SUPER = 1 << 3;
    }
}

/// An input event from the windowing layer
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PlatformEvent {
    /// Mouse button transition; buttons are numbered from zero
    MouseButton {
        /// Button index
        button: usize,
        /// Transition
        action: Action,
        /// Held modifiers
        mods: Modifiers,
    },
    /// Wheel or trackpad scroll
    Scroll {
        /// Horizontal offset
        x: f64,
        /// Vertical offset
        y: f64,
    },
    /// Keyboard key transition
    Key {
        /// Layout-independent key code
        key: Key,
        /// Hardware scancode
        scancode: i32,
        /// Transition
        action: Action,
        /// Held modifiers
        mods: Modifiers,
    },
    /// Text input codepoint
    Char(u32),
}
