//! Canonical key, navigation and cursor identifiers of the GUI library

/// Canonical GUI key
#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GuiKey {
    None,
    Tab,
    LeftArrow,
    RightArrow,
    UpArrow,
    DownArrow,
    PageUp,
    PageDown,
    Home,
    End,
    Insert,
    Delete,
    Backspace,
    Space,
    Enter,
    Escape,
    LeftCtrl,
    LeftShift,
    LeftAlt,
    LeftSuper,
    RightCtrl,
    RightShift,
    RightAlt,
    RightSuper,
    Menu,
    Num0,
    Num1,
    Num2,
    Num3,
    Num4,
    Num5,
    Num6,
    Num7,
    Num8,
    Num9,
    A,
    B,
    C,
    D,
    E,
    F,
    G,
    H,
    I,
    J,
    K,
    L,
    M,
    N,
    O,
    P,
    Q,
    R,
    S,
    T,
    U,
    V,
    W,
    X,
    Y,
    Z,
    F1,
    F2,
    F3,
    F4,
    F5,
    F6,
    F7,
    F8,
    F9,
    F10,
    F11,
    F12,
    Apostrophe,
    Comma,
    Minus,
    Period,
    Slash,
    Semicolon,
    Equal,
    LeftBracket,
    Backslash,
    RightBracket,
    GraveAccent,
    CapsLock,
    ScrollLock,
    NumLock,
    PrintScreen,
    Pause,
    Keypad0,
    Keypad1,
    Keypad2,
    Keypad3,
    Keypad4,
    Keypad5,
    Keypad6,
    Keypad7,
    Keypad8,
    Keypad9,
    KeypadDecimal,
    KeypadDivide,
    KeypadMultiply,
    KeypadSubtract,
    KeypadAdd,
    KeypadEnter,
    KeypadEqual,
    /// Ctrl modifier state
    ModCtrl,
    /// Shift modifier state
    ModShift,
    /// Alt modifier state
    ModAlt,
    /// Super/Cmd/Windows modifier state
    ModSuper,
}

impl GuiKey {
    /// Digit keys in order
    pub const DIGITS: [Self; 10] = [
        Self::Num0, Self::Num1, Self::Num2, Self::Num3, Self::Num4,
        Self::Num5, Self::Num6, Self::Num7, Self::Num8, Self::Num9,
    ];

    /// Letter keys in order
    pub const LETTERS: [Self; 26] = [
        Self::A, Self::B, Self::C, Self::D, Self::E, Self::F, Self::G, Self::H, Self::I,
        Self::J, Self::K, Self::L, Self::M, Self::N, Self::O, Self::P, Self::Q, Self::R,
        Self::S, Self::T, Self::U, Self::V, Self::W, Self::X, Self::Y, Self::Z,
    ];

    /// Function keys F1 to F12 in order
    pub const FUNCTION_KEYS: [Self; 12] = [
        Self::F1, Self::F2, Self::F3, Self::F4, Self::F5, Self::F6,
        Self::F7, Self::F8, Self::F9, Self::F10, Self::F11, Self::F12,
    ];

    /// Keypad digit keys in order
    pub const KEYPAD_DIGITS: [Self; 10] = [
        Self::Keypad0, Self::Keypad1, Self::Keypad2, Self::Keypad3, Self::Keypad4,
        Self::Keypad5, Self::Keypad6, Self::Keypad7, Self::Keypad8, Self::Keypad9,
    ];

    /// Whether this key reports modifier state rather than a physical key
    pub const fn is_modifier_state(self) -> bool {
        matches!(self, Self::ModCtrl | Self::ModShift | Self::ModAlt | Self::ModSuper)
    }
}

/// Gamepad navigation input slots
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NavInput {
    /// Activate / open / toggle (Cross / A)
    Activate,
    /// Cancel / close (Circle / B)
    Cancel,
    /// Text input / on-screen keyboard (Triangle / Y)
    Input,
    /// Context menu / move / resize (Square / X)
    Menu,
    /// D-pad left
    DpadLeft,
    /// D-pad right
    DpadRight,
    /// D-pad up
    DpadUp,
    /// D-pad down
    DpadDown,
    /// Left stick left
    LStickLeft,
    /// Left stick right
    LStickRight,
    /// Left stick up
    LStickUp,
    /// Left stick down
    LStickDown,
    /// Focus previous window (L1 / LB)
    FocusPrev,
    /// Focus next window (R1 / RB)
    FocusNext,
    /// Slower tweaks (L1 / LB)
    TweakSlow,
    /// Faster tweaks (R1 / RB)
    TweakFast,
}

impl NavInput {
    /// Number of navigation input slots
    pub const COUNT: usize = 16;

    /// Slot index into [`FrameInput::nav_inputs`](super::FrameInput::nav_inputs)
    pub const fn index(self) -> usize {
        self as usize
    }
}

/// Mouse cursor shapes the GUI library can request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseCursor {
    /// Default arrow
    Arrow,
    /// Text input I-beam
    TextInput,
    /// Move in all directions
    ResizeAll,
    /// Vertical resize
    ResizeNS,
    /// Horizontal resize
    ResizeEW,
    /// Diagonal resize, bottom-left to top-right
    ResizeNESW,
    /// Diagonal resize, top-left to bottom-right
    ResizeNWSE,
    /// Pointing hand
    Hand,
    /// Action not allowed
    NotAllowed,
}
