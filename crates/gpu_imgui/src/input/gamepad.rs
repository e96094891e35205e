//! Gamepad to navigation input mapping

use crate::config::GamepadConfig;
use crate::gui::{BackendFlags, ConfigFlags, FrameInput, NavInput};

/// Button index per navigation slot, standard XInput-style layout
const BUTTON_MAP: [(NavInput, usize); 12] = [
    (NavInput::Activate, 0),
    (NavInput::Cancel, 1),
    (NavInput::Menu, 2),
    (NavInput::Input, 3),
    (NavInput::DpadLeft, 13),
    (NavInput::DpadRight, 11),
    (NavInput::DpadUp, 10),
    (NavInput::DpadDown, 12),
    (NavInput::FocusPrev, 4),
    (NavInput::FocusNext, 5),
    (NavInput::TweakSlow, 4),
    (NavInput::TweakFast, 5),
];

/// Direction of a stick half-axis
#[derive(Clone, Copy)]
enum Half {
    Negative,
    Positive,
}

/// Analog axis index and direction per navigation slot
const AXIS_MAP: [(NavInput, usize, Half); 4] = [
    (NavInput::LStickLeft, 0, Half::Negative),
    (NavInput::LStickRight, 0, Half::Positive),
    (NavInput::LStickUp, 1, Half::Positive),
    (NavInput::LStickDown, 1, Half::Negative),
];

/// Write gamepad state into the navigation inputs
///
/// Navigation inputs are always reset. With gamepad navigation enabled they
/// are filled from `buttons` and `axes`, and [`BackendFlags::HAS_GAMEPAD`]
/// reports whether the joystick delivered anything.
pub fn map_gamepad_navigation(io: &mut FrameInput, axes: &[f32], buttons: &[bool], config: &GamepadConfig) {
    io.nav_inputs = [0.0; NavInput::COUNT];
    if !io.config_flags.contains(ConfigFlags::NAV_ENABLE_GAMEPAD) {
        return;
    }

    for &(input, button) in &BUTTON_MAP {
        if buttons.get(button).copied().unwrap_or(false) {
            io.nav_inputs[input.index()] = 1.0;
        }
    }

    for &(input, axis, half) in &AXIS_MAP {
        let (v0, v1) = match half {
            Half::Negative => (-config.dead_zone, -config.saturation),
            Half::Positive => (config.dead_zone, config.saturation),
        };
        let raw = axes.get(axis).copied().unwrap_or(v0);
        let value = ((raw - v0) / (v1 - v0)).min(1.0);
        let slot = &mut io.nav_inputs[input.index()];
        *slot = slot.max(value);
    }

    io.backend_flags
        .set(BackendFlags::HAS_GAMEPAD, !axes.is_empty() && !buttons.is_empty());
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn gamepad_io() -> FrameInput {
        let mut io = FrameInput::default();
        io.config_flags |= ConfigFlags::NAV_ENABLE_GAMEPAD;
        io
    }

    #[test]
    fn test_disabled_navigation_only_resets() {
        let mut io = FrameInput::default();
        io.nav_inputs[NavInput::Activate.index()] = 1.0;
        map_gamepad_navigation(&mut io, &[1.0, 1.0], &[true; 14], &GamepadConfig::default());

        assert!(io.nav_inputs.iter().all(|&v| v == 0.0));
        assert!(!io.backend_flags.contains(BackendFlags::HAS_GAMEPAD));
    }

    #[test]
    fn test_buttons_map_to_slots() {
        let mut io = gamepad_io();
        let mut buttons = [false; 14];
        buttons[0] = true;
        buttons[4] = true;
        buttons[13] = true;
        map_gamepad_navigation(&mut io, &[0.0, 0.0], &buttons, &GamepadConfig::default());

        assert_eq!(io.nav_inputs[NavInput::Activate.index()], 1.0);
        assert_eq!(io.nav_inputs[NavInput::FocusPrev.index()], 1.0);
        assert_eq!(io.nav_inputs[NavInput::TweakSlow.index()], 1.0);
        assert_eq!(io.nav_inputs[NavInput::DpadLeft.index()], 1.0);
        assert_eq!(io.nav_inputs[NavInput::Cancel.index()], 0.0);
        assert!(io.backend_flags.contains(BackendFlags::HAS_GAMEPAD));
    }

    #[test]
    fn test_stick_dead_zone_and_saturation() {
        let config = GamepadConfig::default();
        let mut io = gamepad_io();
        map_gamepad_navigation(&mut io, &[0.6, -0.95], &[false], &config);

        assert_relative_eq!(io.nav_inputs[NavInput::LStickRight.index()], 0.5, epsilon = 1e-5);
        assert_relative_eq!(io.nav_inputs[NavInput::LStickDown.index()], 1.0);
        // Below the dead zone values go negative; the reset zero wins
        assert_eq!(io.nav_inputs[NavInput::LStickLeft.index()], 0.0);
        assert_eq!(io.nav_inputs[NavInput::LStickUp.index()], 0.0);
    }

    #[test]
    fn test_disconnected_clears_gamepad_flag() {
        let mut io = gamepad_io();
        io.backend_flags |= BackendFlags::HAS_GAMEPAD;
        map_gamepad_navigation(&mut io, &[], &[], &GamepadConfig::default());

        assert!(!io.backend_flags.contains(BackendFlags::HAS_GAMEPAD));
        assert!(io.nav_inputs.iter().all(|&v| v == 0.0));
    }
}
