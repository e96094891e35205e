//! Platform key code translation
//!
//! Windowing layers report printable keys by their position on a US layout.
//! [`untranslate_key`] maps them back to the character actually printed on
//! the key, so shortcuts follow the user's layout.

use crate::gui::GuiKey;
use crate::platform::Key;

/// Punctuation characters and the platform keys that print them on a US layout
const PUNCTUATION: [(char, Key); 11] = [
    ('`', Key::GRAVE_ACCENT),
    ('-', Key::MINUS),
    ('=', Key::EQUAL),
    ('[', Key::LEFT_BRACKET),
    (']', Key::RIGHT_BRACKET),
    ('\\', Key::BACKSLASH),
    (',', Key::COMMA),
    (';', Key::SEMICOLON),
    ('\'', Key::APOSTROPHE),
    ('.', Key::PERIOD),
    ('/', Key::SLASH),
];

/// Map a printable key to the key matching the character it prints
///
/// `key_name` returns the layout-dependent name of the key. Keypad keys are
/// returned unchanged without consulting it, as are keys whose name is not a
/// single digit, letter or known punctuation character.
pub fn untranslate_key<F>(key: Key, scancode: i32, key_name: F) -> Key
where
    F: FnOnce(Key, i32) -> Option<String>,
{
    if key.is_keypad() {
        return key;
    }
    let Some(name) = key_name(key, scancode) else {
        return key;
    };
    let mut chars = name.chars();
    let (Some(ch), None) = (chars.next(), chars.next()) else {
        return key;
    };

    match ch {
        '0'..='9' => Key(Key::NUM_0.0 + (ch as i32 - '0' as i32)),
        'A'..='Z' => Key(Key::A.0 + (ch as i32 - 'A' as i32)),
        'a'..='z' => Key(Key::A.0 + (ch as i32 - 'a' as i32)),
        _ => PUNCTUATION
            .iter()
            .find(|(printed, _)| *printed == ch)
            .map_or(key, |&(_, mapped)| mapped),
    }
}

/// Canonical GUI key for a platform key
pub fn gui_key_for(key: Key) -> GuiKey {
    if let Some(offset) = key.offset_in(Key::NUM_0, Key::NUM_9) {
        return GuiKey::DIGITS[offset];
    }
    if let Some(offset) = key.offset_in(Key::A, Key::Z) {
        return GuiKey::LETTERS[offset];
    }
    if let Some(offset) = key.offset_in(Key::F1, Key::F12) {
        return GuiKey::FUNCTION_KEYS[offset];
    }
    if let Some(offset) = key.offset_in(Key::KP_0, Key::KP_9) {
        return GuiKey::KEYPAD_DIGITS[offset];
    }

    match key {
        Key::TAB => GuiKey::Tab,
        Key::LEFT => GuiKey::LeftArrow,
        Key::RIGHT => GuiKey::RightArrow,
        Key::UP => GuiKey::UpArrow,
        Key::DOWN => GuiKey::DownArrow,
        Key::PAGE_UP => GuiKey::PageUp,
        Key::PAGE_DOWN => GuiKey::PageDown,
        Key::HOME => GuiKey::Home,
        Key::END => GuiKey::End,
        Key::INSERT => GuiKey::Insert,
        Key::DELETE => GuiKey::Delete,
        Key::BACKSPACE => GuiKey::Backspace,
        Key::SPACE => GuiKey::Space,
        Key::ENTER => GuiKey::Enter,
        Key::ESCAPE => GuiKey::Escape,
        Key::APOSTROPHE => GuiKey::Apostrophe,
        Key::COMMA => GuiKey::Comma,
        Key::MINUS => GuiKey::Minus,
        Key::PERIOD => GuiKey::Period,
        Key::SLASH => GuiKey::Slash,
        Key::SEMICOLON => GuiKey::Semicolon,
        Key::EQUAL => GuiKey::Equal,
        Key::LEFT_BRACKET => GuiKey::LeftBracket,
        Key::BACKSLASH => GuiKey::Backslash,
        Key::RIGHT_BRACKET => GuiKey::RightBracket,
        Key::GRAVE_ACCENT => GuiKey::GraveAccent,
        Key::CAPS_LOCK => GuiKey::CapsLock,
        Key::SCROLL_LOCK => GuiKey::ScrollLock,
        Key::NUM_LOCK => GuiKey::NumLock,
        Key::PRINT_SCREEN => GuiKey::PrintScreen,
        Key::PAUSE => GuiKey::Pause,
        Key::KP_DECIMAL => GuiKey::KeypadDecimal,
        Key::KP_DIVIDE => GuiKey::KeypadDivide,
        Key::KP_MULTIPLY => GuiKey::KeypadMultiply,
        Key::KP_SUBTRACT => GuiKey::KeypadSubtract,
        Key::KP_ADD => GuiKey::KeypadAdd,
        Key::KP_ENTER => GuiKey::KeypadEnter,
        Key::KP_EQUAL => GuiKey::KeypadEqual,
        Key::LEFT_SHIFT => GuiKey::LeftShift,
        Key::LEFT_CONTROL => GuiKey::LeftCtrl,
        Key::LEFT_ALT => GuiKey::LeftAlt,
        Key::LEFT_SUPER => GuiKey::LeftSuper,
        Key::RIGHT_SHIFT => GuiKey::RightShift,
        Key::RIGHT_CONTROL => GuiKey::RightCtrl,
        Key::RIGHT_ALT => GuiKey::RightAlt,
        Key::RIGHT_SUPER => GuiKey::RightSuper,
        Key::MENU => GuiKey::Menu,
        _ => GuiKey::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn named(name: &'static str) -> impl FnOnce(Key, i32) -> Option<String> {
        move |_, _| Some(name.to_string())
    }

    #[test]
    fn test_azerty_letters_follow_printed_character() {
        // 'Q' position on a US layout prints 'a' on AZERTY
        assert_eq!(untranslate_key(Key(81), 16, named("a")), Key::A);
        assert_eq!(untranslate_key(Key::A, 30, named("Q")), Key(81));
    }

    #[test]
    fn test_digits_and_punctuation_remap() {
        assert_eq!(untranslate_key(Key::MINUS, 12, named("7")), Key(55));
        assert_eq!(untranslate_key(Key::A, 30, named("`")), Key::GRAVE_ACCENT);
        assert_eq!(untranslate_key(Key::A, 30, named("/")), Key::SLASH);
    }

    #[test]
    fn test_unmapped_names_keep_key() {
        assert_eq!(untranslate_key(Key::SEMICOLON, 39, named("ö")), Key::SEMICOLON);
        assert_eq!(untranslate_key(Key::SPACE, 57, named("space")), Key::SPACE);
        assert_eq!(untranslate_key(Key::ENTER, 28, |_, _| None), Key::ENTER);
    }

    #[test]
    fn test_keypad_skips_name_lookup() {
        let key = untranslate_key(Key::KP_ADD, 78, |_, _| panic!("keypad keys are never looked up"));
        assert_eq!(key, Key::KP_ADD);
    }

    #[test]
    fn test_gui_key_ranges() {
        assert_eq!(gui_key_for(Key(50)), GuiKey::Num2);
        assert_eq!(gui_key_for(Key(77)), GuiKey::M);
        assert_eq!(gui_key_for(Key(300)), GuiKey::F11);
        assert_eq!(gui_key_for(Key(327)), GuiKey::Keypad7);
        assert_eq!(gui_key_for(Key::RIGHT_CONTROL), GuiKey::RightCtrl);
        assert_eq!(gui_key_for(Key::UNKNOWN), GuiKey::None);
    }
}
