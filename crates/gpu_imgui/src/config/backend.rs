//! # Backend Configuration
//!
//! Settings for the platform (input) backend and the renderer backend.
//!
//! ```toml
//! [platform]
//! nav_enable_gamepad = true
//!
//! [platform.gamepad]
//! dead_zone = 0.25
//!
//! [renderer]
//! coordinate_system = "YDown"
//! ```

use serde::{Serialize, Deserialize};

use super::Config;
use crate::foundation::time::DEFAULT_FALLBACK_DELTA;
use crate::render::projection::CoordinateSystem;

/// Top-level configuration for both backends
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    /// Platform/input backend settings
    pub platform: PlatformConfig,
    /// Renderer backend settings
    pub renderer: RendererConfig,
}

impl Config for BackendConfig {}

/// Platform backend configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlatformConfig {
    /// Subscribe to the window's input events at construction
    ///
    /// When disabled the application forwards events itself through
    /// [`InputTranslator::handle_event`](crate::input::InputTranslator::handle_event).
    pub install_callbacks: bool,
    /// Enable keyboard navigation in the GUI library
    pub nav_enable_keyboard: bool,
    /// Enable gamepad navigation in the GUI library
    pub nav_enable_gamepad: bool,
    /// Never touch the OS cursor shape or visibility
    pub no_mouse_cursor_change: bool,
    /// Delta time reported for the first frame, in seconds
    pub fallback_delta_time: f32,
    /// Gamepad mapping settings
    pub gamepad: GamepadConfig,
}

impl Default for PlatformConfig {
    fn default() -> Self {
        Self {
            install_callbacks: true,
            nav_enable_keyboard: true,
            nav_enable_gamepad: false,
            no_mouse_cursor_change: false,
            fallback_delta_time: DEFAULT_FALLBACK_DELTA,
            gamepad: GamepadConfig::default(),
        }
    }
}

/// Gamepad analog mapping configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GamepadConfig {
    /// Joystick slot polled for navigation input
    pub joystick: u32,
    /// Axis magnitude below which the stick reads as zero
    pub dead_zone: f32,
    /// Axis magnitude at which the stick reads as fully pushed
    pub saturation: f32,
}

impl Default for GamepadConfig {
    fn default() -> Self {
        Self {
            joystick: 0,
            dead_zone: 0.3,
            saturation: 0.9,
        }
    }
}

/// Renderer backend configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RendererConfig {
    /// Name reported to the GUI library
    pub backend_name: String,
    /// Clip-space Y convention of the target GPU abstraction
    pub coordinate_system: CoordinateSystem,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            backend_name: "gpu_imgui_renderer".to_string(),
            coordinate_system: CoordinateSystem::YUp,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigError;

    #[test]
    fn test_defaults() {
        let config = BackendConfig::default();
        assert!(config.platform.install_callbacks);
        assert!(config.platform.nav_enable_keyboard);
        assert!(!config.platform.nav_enable_gamepad);
        assert_eq!(config.platform.gamepad.dead_zone, 0.3);
        assert_eq!(config.renderer.coordinate_system, CoordinateSystem::YUp);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = BackendConfig::from_toml_str(
            r#"
            [platform]
            nav_enable_gamepad = true

            [platform.gamepad]
            dead_zone = 0.25

            [renderer]
            coordinate_system = "YDown"
            "#,
        )
        .unwrap();

        assert!(config.platform.nav_enable_gamepad);
        assert!(config.platform.install_callbacks);
        assert_eq!(config.platform.gamepad.dead_zone, 0.25);
        assert_eq!(config.platform.gamepad.saturation, 0.9);
        assert_eq!(config.renderer.coordinate_system, CoordinateSystem::YDown);
        assert_eq!(config.renderer.backend_name, "gpu_imgui_renderer");
    }

    #[test]
    fn test_toml_round_trip_through_file() {
        let path = std::env::temp_dir().join(format!("gpu_imgui_config_{}.toml", std::process::id()));
        let mut config = BackendConfig::default();
        config.platform.no_mouse_cursor_change = true;

        config.save_to_file(&path).unwrap();
        let loaded = BackendConfig::load_from_file(&path).unwrap();
        let _ = std::fs::remove_file(&path);

        assert_eq!(loaded, config);
    }

    #[test]
    fn test_unsupported_extension() {
        let result = BackendConfig::load_from_file("settings.ini");
        // Missing file surfaces as IO before the extension is looked at
        assert!(matches!(result, Err(ConfigError::Io(_))));
        let result = BackendConfig::default().save_to_file("settings.ini");
        assert!(matches!(result, Err(ConfigError::UnsupportedFormat(_))));
    }
}
